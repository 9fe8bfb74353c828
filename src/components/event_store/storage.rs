use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::models::CalendarData;
use crate::error::{CalResult, Error};

/// Load calendar data from `path`. A missing file is not an error: the
/// store simply starts empty. A file that exists but cannot be parsed into
/// the expected shape is reported as corrupt.
pub fn load_data(path: &Path) -> CalResult<CalendarData> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CalendarData::default()),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&text)
        .map_err(|e| Error::DataCorrupt(format!("{}: {}", path.display(), e)))
}

/// Persist calendar data to `path` as human-readable JSON, date keys as
/// `YYYY-MM-DD`, non-ASCII text verbatim. The content is written to a
/// sibling temp file and renamed over the target, so a failed save leaves
/// the previous file intact and a concurrent reader never sees a partial
/// write.
pub fn save_data(path: &Path, data: &CalendarData) -> CalResult<()> {
    let text =
        serde_json::to_string_pretty(data).map_err(|e| Error::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::event_store::models::Event;
    use chrono::NaiveDate;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dallyeok-storage-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let path = temp_file("missing.json");
        let data = load_data(&path).unwrap();
        assert!(data.events.is_empty());
        assert!(data.holidays.is_empty());
    }

    #[test]
    fn test_invalid_json_is_corrupt() {
        let path = temp_file("invalid.json");
        fs::write(&path, "not json at all").unwrap();

        let result = load_data(&path);
        assert!(matches!(result, Err(Error::DataCorrupt(_))));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_top_level_keys_is_corrupt() {
        let path = temp_file("missing-keys.json");
        fs::write(&path, r#"{ "events": {} }"#).unwrap();

        let result = load_data(&path);
        assert!(matches!(result, Err(Error::DataCorrupt(_))));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let path = temp_file("round-trip.json");
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let mut data = CalendarData::default();
        data.holidays.insert(day, "삼일절".to_string());
        data.push_event(day, Event::titled("삼일절"));

        save_data(&path, &data).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        // Date keys and Korean text written verbatim, not escaped
        assert!(text.contains("2024-03-01"));
        assert!(text.contains("삼일절"));

        let loaded = load_data(&path).unwrap();
        assert_eq!(loaded, data);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let path = temp_file("no-temp.json");
        save_data(&path, &CalendarData::default()).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());

        fs::remove_file(&path).ok();
    }
}
