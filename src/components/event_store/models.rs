use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::time::parse_time;

/// How an alarm repeats: daily alarms fire every day at their time, once
/// alarms only on the event's own date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmKind {
    Daily,
    Once,
}

/// One scheduled item on a date.
///
/// Events carry no synthetic id: within a day an event is identified by
/// structural equality of the whole record, so update/delete target the
/// first matching entry. The `debug` flag is persisted for compatibility
/// with files written by older app versions and has no effect on alarm
/// timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub alarm: bool,
    #[serde(default)]
    pub alarm_time: Option<String>,
    #[serde(default)]
    pub alarm_type: Option<AlarmKind>,
    #[serde(default)]
    pub debug: bool,
}

impl Event {
    /// Event carrying only a title, all other fields defaulted. This is the
    /// shape of holiday entries and of upgraded legacy records.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            alarm: false,
            alarm_time: None,
            alarm_type: None,
            debug: false,
        }
    }
}

/// Caller-facing bundle of fields for add/update operations
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub alarm: bool,
    pub alarm_time: Option<String>,
    pub alarm_type: Option<AlarmKind>,
    pub debug: bool,
}

impl EventDraft {
    /// Validate and normalize the draft into a storable event.
    ///
    /// Returns `None` when the title is empty after trimming, or when the
    /// alarm flag is set without a valid "HH:MM" time; the store treats
    /// both as silent no-ops. When the alarm flag is off, any stray alarm
    /// time/kind are cleared so that `alarm_time` is present iff `alarm`.
    pub fn into_event(self) -> Option<Event> {
        if self.title.trim().is_empty() {
            return None;
        }

        let (alarm_time, alarm_type) = if self.alarm {
            let time = self.alarm_time?;
            parse_time(&time)?;
            (Some(time), self.alarm_type)
        } else {
            (None, None)
        };

        Some(Event {
            title: self.title,
            description: self.description.trim().to_string(),
            alarm: self.alarm,
            alarm_time,
            alarm_type,
            debug: self.debug,
        })
    }
}

/// The aggregate persisted to the data file: per-day event lists plus the
/// holiday names that have been materialized into them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCalendarData")]
pub struct CalendarData {
    pub events: BTreeMap<NaiveDate, Vec<Event>>,
    pub holidays: BTreeMap<NaiveDate, String>,
}

impl CalendarData {
    /// Events recorded for one day, in insertion order
    pub fn events_on(&self, date: &NaiveDate) -> Vec<Event> {
        self.events.get(date).cloned().unwrap_or_default()
    }

    /// Append an event to the end of a day's list
    pub fn push_event(&mut self, date: NaiveDate, event: Event) {
        self.events.entry(date).or_default().push(event);
    }

    /// Remove the first structural match of `event` on `date`.
    /// Returns whether anything was removed.
    pub fn remove_event(&mut self, date: &NaiveDate, event: &Event) -> bool {
        match self.events.get_mut(date) {
            Some(list) => match list.iter().position(|e| e == event) {
                Some(index) => {
                    list.remove(index);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Replace the whole events map with one default-field event per
    /// recorded holiday, discarding every user-created event
    pub fn reset_to_holidays(&mut self) {
        self.events = self
            .holidays
            .iter()
            .map(|(date, name)| (*date, vec![Event::titled(name.clone())]))
            .collect();
    }

    /// Record the given holidays and inject a pseudo-event at position 0 of
    /// each date's list unless an event with that title already exists
    /// there. Idempotent; returns the number of events inserted.
    pub fn materialize_holidays(&mut self, holidays: &BTreeMap<NaiveDate, String>) -> usize {
        let mut inserted = 0;
        for (date, name) in holidays {
            self.holidays.insert(*date, name.clone());
            let list = self.events.entry(*date).or_default();
            if !list.iter().any(|event| event.title == *name) {
                list.insert(0, Event::titled(name.clone()));
                inserted += 1;
            }
        }
        inserted
    }
}

/// Wire shape of one event entry. Early versions of the app persisted a
/// bare title string instead of the full object; loading upgrades those to
/// default-field events.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventEntry {
    Full(Event),
    Legacy(String),
}

#[derive(Deserialize)]
struct RawCalendarData {
    events: BTreeMap<NaiveDate, Vec<EventEntry>>,
    holidays: BTreeMap<NaiveDate, String>,
}

impl From<RawCalendarData> for CalendarData {
    fn from(raw: RawCalendarData) -> Self {
        let events = raw
            .events
            .into_iter()
            .map(|(date, entries)| {
                let upgraded = entries
                    .into_iter()
                    .map(|entry| match entry {
                        EventEntry::Full(event) => event,
                        EventEntry::Legacy(title) => Event::titled(title),
                    })
                    .collect();
                (date, upgraded)
            })
            .collect();

        CalendarData {
            events,
            holidays: raw.holidays,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_draft_rejects_blank_title() {
        let draft = EventDraft {
            title: "   ".to_string(),
            ..Default::default()
        };
        assert!(draft.into_event().is_none());
    }

    #[test]
    fn test_draft_rejects_alarm_without_time() {
        let draft = EventDraft {
            title: "치과 예약".to_string(),
            alarm: true,
            alarm_time: None,
            alarm_type: Some(AlarmKind::Once),
            ..Default::default()
        };
        assert!(draft.clone().into_event().is_none());

        let draft = EventDraft {
            alarm_time: Some("25:00".to_string()),
            ..draft
        };
        assert!(draft.into_event().is_none());
    }

    #[test]
    fn test_draft_clears_alarm_fields_when_alarm_off() {
        let draft = EventDraft {
            title: "장보기".to_string(),
            description: "  우유, 계란  ".to_string(),
            alarm: false,
            alarm_time: Some("09:00".to_string()),
            alarm_type: Some(AlarmKind::Daily),
            debug: false,
        };
        let event = draft.into_event().unwrap();
        assert_eq!(event.description, "우유, 계란");
        assert_eq!(event.alarm_time, None);
        assert_eq!(event.alarm_type, None);
    }

    #[test]
    fn test_legacy_string_entry_upgrades_to_full_event() {
        let json = r#"{
            "events": { "2024-08-15": ["광복절"] },
            "holidays": { "2024-08-15": "광복절" }
        }"#;
        let data: CalendarData = serde_json::from_str(json).unwrap();
        let events = data.events_on(&date(2024, 8, 15));
        assert_eq!(events, vec![Event::titled("광복절")]);
    }

    #[test]
    fn test_remove_event_takes_first_structural_match() {
        let mut data = CalendarData::default();
        let day = date(2024, 3, 1);
        data.push_event(day, Event::titled("중복"));
        data.push_event(day, Event::titled("중복"));

        assert!(data.remove_event(&day, &Event::titled("중복")));
        assert_eq!(data.events_on(&day).len(), 1);

        assert!(!data.remove_event(&day, &Event::titled("없는 일정")));
    }

    #[test]
    fn test_materialize_holidays_is_idempotent() {
        let mut data = CalendarData::default();
        let day = date(2024, 10, 9);
        data.push_event(day, Event::titled("기존 일정"));

        let mut holidays = BTreeMap::new();
        holidays.insert(day, "한글날".to_string());

        assert_eq!(data.materialize_holidays(&holidays), 1);
        assert_eq!(data.materialize_holidays(&holidays), 0);

        let events = data.events_on(&day);
        assert_eq!(events.len(), 2);
        // Holiday entry sits in front of the pre-existing event
        assert_eq!(events[0].title, "한글날");
        assert_eq!(events[1].title, "기존 일정");
    }

    #[test]
    fn test_reset_discards_user_events() {
        let mut data = CalendarData::default();
        let holiday_day = date(2024, 1, 1);
        let other_day = date(2024, 1, 2);
        data.holidays.insert(holiday_day, "신정".to_string());
        data.push_event(other_day, Event::titled("회의"));

        data.reset_to_holidays();

        assert_eq!(data.events.len(), 1);
        assert_eq!(data.events_on(&holiday_day), vec![Event::titled("신정")]);
    }
}
