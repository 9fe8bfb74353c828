use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::components::event_store::models::{AlarmKind, Event};

/// One notification ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueAlarm {
    pub event_title: String,
    pub body: String,
}

/// Scan every event list for alarms due at the given date and minute.
///
/// Daily alarms match on the minute alone; once alarms additionally
/// require the event's own date to be today. An event with no recorded
/// alarm kind behaves as a once alarm, which is how files written by app
/// versions that predate the kind field read back.
pub fn due_alarms(
    events: &BTreeMap<NaiveDate, Vec<Event>>,
    today: NaiveDate,
    minute: &str,
) -> Vec<DueAlarm> {
    let mut due = Vec::new();

    for (date, list) in events {
        for event in list {
            if !event.alarm {
                continue;
            }
            let Some(alarm_time) = event.alarm_time.as_deref() else {
                continue;
            };
            if alarm_time != minute {
                continue;
            }

            match event.alarm_type.unwrap_or(AlarmKind::Once) {
                AlarmKind::Daily => due.push(DueAlarm {
                    event_title: event.title.clone(),
                    body: format!("{} 작업을 할 시간입니다.", event.title),
                }),
                AlarmKind::Once if *date == today => due.push(DueAlarm {
                    event_title: event.title.clone(),
                    body: format!(
                        "{} 작업을 할 시간입니다.\n - 작업 내용 : {}",
                        event.title, event.description
                    ),
                }),
                AlarmKind::Once => {}
            }
        }
    }

    due
}
