use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Read-only lookup of official holiday names by date for a given year
pub trait HolidaySource: Send + Sync {
    /// Holiday names for the given year, keyed by date
    fn holidays_for(&self, year: i32) -> BTreeMap<NaiveDate, String>;
}

/// Korean national holidays.
///
/// The fixed-date days apply to any year. The lunar-derived days (설날,
/// 부처님오신날, 추석) are tabulated per year; a year outside the table
/// yields only the fixed days. Substitute holidays are not included.
pub struct KoreanHolidays;

const FIXED_DAYS: [(u32, u32, &str); 8] = [
    (1, 1, "신정"),
    (3, 1, "삼일절"),
    (5, 5, "어린이날"),
    (6, 6, "현충일"),
    (8, 15, "광복절"),
    (10, 3, "개천절"),
    (10, 9, "한글날"),
    (12, 25, "크리스마스"),
];

fn lunar_days(year: i32) -> &'static [(u32, u32, &'static str)] {
    match year {
        2024 => &[
            (2, 9, "설날 연휴"),
            (2, 10, "설날"),
            (2, 11, "설날 연휴"),
            (5, 15, "부처님오신날"),
            (9, 16, "추석 연휴"),
            (9, 17, "추석"),
            (9, 18, "추석 연휴"),
        ],
        2025 => &[
            (1, 28, "설날 연휴"),
            (1, 29, "설날"),
            (1, 30, "설날 연휴"),
            (5, 5, "부처님오신날"),
            (10, 5, "추석 연휴"),
            (10, 6, "추석"),
            (10, 7, "추석 연휴"),
        ],
        2026 => &[
            (2, 16, "설날 연휴"),
            (2, 17, "설날"),
            (2, 18, "설날 연휴"),
            (5, 24, "부처님오신날"),
            (9, 24, "추석 연휴"),
            (9, 25, "추석"),
            (9, 26, "추석 연휴"),
        ],
        2027 => &[
            (2, 6, "설날 연휴"),
            (2, 7, "설날"),
            (2, 8, "설날 연휴"),
            (5, 13, "부처님오신날"),
            (9, 14, "추석 연휴"),
            (9, 15, "추석"),
            (9, 16, "추석 연휴"),
        ],
        _ => &[],
    }
}

impl HolidaySource for KoreanHolidays {
    fn holidays_for(&self, year: i32) -> BTreeMap<NaiveDate, String> {
        let mut holidays = BTreeMap::new();

        for (month, day, name) in FIXED_DAYS {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                holidays.insert(date, name.to_string());
            }
        }

        // Lunar days go in last: when one lands on a fixed day (부처님오신날
        // fell on 어린이날 in 2025) the lunar name wins
        for &(month, day, name) in lunar_days(year) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                holidays.insert(date, name.to_string());
            }
        }

        holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_days_present_any_year() {
        let holidays = KoreanHolidays.holidays_for(2031);
        assert_eq!(holidays.get(&date(2031, 8, 15)), Some(&"광복절".to_string()));
        assert_eq!(holidays.get(&date(2031, 10, 9)), Some(&"한글날".to_string()));
        assert_eq!(holidays.len(), FIXED_DAYS.len());
    }

    #[test]
    fn test_lunar_days_for_tabulated_year() {
        let holidays = KoreanHolidays.holidays_for(2025);
        assert_eq!(holidays.get(&date(2025, 1, 29)), Some(&"설날".to_string()));
        assert_eq!(holidays.get(&date(2025, 10, 6)), Some(&"추석".to_string()));
        // 2025-05-05 is both 어린이날 and 부처님오신날; the lunar name wins
        assert_eq!(
            holidays.get(&date(2025, 5, 5)),
            Some(&"부처님오신날".to_string())
        );
    }
}
