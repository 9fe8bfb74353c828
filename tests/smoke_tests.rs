use dallyeok::components::event_store::EventStoreHandle;
use dallyeok::components::holidays::{HolidayCalendar, HolidaySource, KoreanHolidays};
use dallyeok::components::reminders::ReminderService;
use dallyeok::components::{Component, ComponentManager};
use dallyeok::config::Config;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dallyeok-smoke-{}-{}", std::process::id(), name))
}

fn test_config(data_file: PathBuf, components: HashMap<String, bool>) -> Config {
    Config {
        data_file,
        notification_title: "알림".to_string(),
        check_interval_secs: 60,
        components,
    }
}

/// Smoke test to verify the config surface
#[tokio::test]
async fn test_config_component_toggles() {
    let mut components = HashMap::new();
    components.insert("holidays".to_string(), true);
    components.insert("reminders".to_string(), false);

    let config = test_config(temp_file("config.json"), components);

    assert_eq!(config.notification_title, "알림");
    assert_eq!(config.check_interval_secs, 60);
    assert!(config.is_component_enabled("holidays"));
    assert!(!config.is_component_enabled("reminders"));
    // Unknown components default to disabled
    assert!(!config.is_component_enabled("missing"));
}

/// Smoke test for opening a store on a path with no data file yet
#[tokio::test]
async fn test_store_opens_empty_without_file() {
    let path = temp_file("empty-store.json");

    let store = EventStoreHandle::open(path).unwrap();
    let data = store.snapshot().await.unwrap();

    assert!(data.events.is_empty());
    assert!(data.holidays.is_empty());
}

/// Smoke test for component registration and lookup
#[tokio::test]
async fn test_component_manager_registration() {
    let config = Arc::new(RwLock::new(test_config(
        temp_file("manager.json"),
        HashMap::new(),
    )));

    let mut manager = ComponentManager::new(Arc::clone(&config));
    manager.register(HolidayCalendar::new());
    manager.register(ReminderService::new());

    assert!(manager.get_component_by_name("holidays").is_some());
    assert!(manager.get_component_by_name("reminders").is_some());
    assert!(manager.get_component_by_name("weather").is_none());
}

/// Disabled components are skipped during init, so nothing touches the
/// store
#[tokio::test]
async fn test_init_all_skips_disabled_components() {
    let path = temp_file("disabled.json");
    let config = Arc::new(RwLock::new(test_config(path.clone(), HashMap::new())));

    let store = EventStoreHandle::open(path.clone()).unwrap();

    let mut manager = ComponentManager::new(Arc::clone(&config));
    manager.register(HolidayCalendar::new());
    manager.register(ReminderService::new());

    manager
        .init_all(Arc::clone(&config), store.clone())
        .await
        .unwrap();

    let data = store.snapshot().await.unwrap();
    assert!(data.holidays.is_empty());
    assert!(!path.exists());
}

/// The holiday component materializes the current year through the same
/// source the daemon uses
#[tokio::test]
async fn test_holiday_component_materializes_current_year() {
    let path = temp_file("holiday-init.json");
    let mut components = HashMap::new();
    components.insert("holidays".to_string(), true);

    let config = Arc::new(RwLock::new(test_config(path.clone(), components)));
    let store = EventStoreHandle::open(path.clone()).unwrap();

    let component = HolidayCalendar::new();
    component
        .init(Arc::clone(&config), store.clone())
        .await
        .unwrap();

    let year = chrono::Datelike::year(&chrono::Local::now());
    let expected = KoreanHolidays.holidays_for(year);

    let data = store.snapshot().await.unwrap();
    assert_eq!(data.holidays.len(), expected.len());
    for (date, name) in &expected {
        assert_eq!(data.holidays.get(date), Some(name));
        assert_eq!(data.events.get(date).unwrap()[0].title, *name);
    }

    std::fs::remove_file(&path).ok();
}
