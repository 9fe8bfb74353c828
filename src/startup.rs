use crate::components::event_store::EventStoreHandle;
use crate::components::{holidays::HolidayCalendar, reminders::ReminderService, ComponentManager};
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Open the event store, start the components and run until a shutdown
/// signal arrives
pub async fn run(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let data_file = {
        let config_read = config.read().await;
        config_read.data_file.clone()
    };

    // Open the store eagerly so a corrupt data file surfaces before any
    // component starts
    let store = EventStoreHandle::open(data_file.clone())?;
    info!("Event store opened from {}", data_file.display());

    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));

    // Register the holiday calendar component
    component_manager.register(HolidayCalendar::new());

    // Register the reminder service component
    component_manager.register(ReminderService::new());

    // Create a shared component manager
    let component_manager = Arc::new(component_manager);

    component_manager
        .init_all(Arc::clone(&config), store.clone())
        .await?;

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Clone handles for the shutdown handler
    let shutdown_components = Arc::clone(&component_manager);
    let shutdown_store = store.clone();

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components, shutdown_store).await;
    });

    info!("dallyeok is running");

    // Wait for the shutdown handler to finish
    let _ = shutdown_recv.await;
    info!("Shutdown complete");

    Ok(())
}
