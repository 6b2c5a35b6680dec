use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::PrayerDay;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no schedule for division '{0}'")]
    UnknownDivision(String),
    #[error("schedule for division '{0}' is empty")]
    Empty(String),
}

/// A day picked from the schedule. `fell_back` is set when the requested
/// date was missing and the division's first entry was used instead.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedDay<'a> {
    pub day: &'a PrayerDay,
    pub fell_back: bool,
}

/// Per-division prayer schedule, entries in dataset order.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    by_division: BTreeMap<String, Vec<PrayerDay>>,
}

impl Schedule {
    pub fn new(by_division: BTreeMap<String, Vec<PrayerDay>>) -> Self {
        Self { by_division }
    }

    pub fn days(&self, division: &str) -> Result<&[PrayerDay], LookupError> {
        self.by_division
            .get(division)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::UnknownDivision(division.to_string()))
    }

    pub fn exact(&self, division: &str, date: NaiveDate) -> Result<Option<&PrayerDay>, LookupError> {
        let key = date.format(DATE_FORMAT).to_string();
        Ok(self.days(division)?.iter().find(|d| d.date == key))
    }

    /// Exact-date match, or the division's first entry with a warning.
    pub fn resolve(&self, division: &str, date: NaiveDate) -> Result<ResolvedDay<'_>, LookupError> {
        if let Some(day) = self.exact(division, date)? {
            return Ok(ResolvedDay {
                day,
                fell_back: false,
            });
        }

        let first = self
            .days(division)?
            .first()
            .ok_or_else(|| LookupError::Empty(division.to_string()))?;
        log::warn!(
            "No schedule entry for {} on {}; falling back to {}",
            division,
            date.format(DATE_FORMAT),
            first.date
        );
        Ok(ResolvedDay {
            day: first,
            fell_back: true,
        })
    }

    /// First and last scheduled dates for a division.
    pub fn date_range(&self, division: &str) -> Result<Option<(&str, &str)>, LookupError> {
        let days = self.days(division)?;
        Ok(match (days.first(), days.last()) {
            (Some(first), Some(last)) => Some((first.date.as_str(), last.date.as_str())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, sehri: &str) -> PrayerDay {
        PrayerDay {
            date: date.to_string(),
            fajr: "5:11 AM".to_string(),
            dhuhr: "12:11 PM".to_string(),
            asr: "4:23 PM".to_string(),
            maghrib: "6:04 PM".to_string(),
            isha: "7:20 PM".to_string(),
            sehri_end: sehri.to_string(),
            iftar_start: "6:04 PM".to_string(),
        }
    }

    fn schedule() -> Schedule {
        let mut map = BTreeMap::new();
        map.insert(
            "dhaka".to_string(),
            vec![day("2025-03-01", "5:05 AM"), day("2025-03-02", "5:04 AM")],
        );
        map.insert("sylhet".to_string(), vec![]);
        Schedule::new(map)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_resolve_exact_date() {
        let schedule = schedule();
        let resolved = schedule.resolve("dhaka", date("2025-03-02")).unwrap();
        assert!(!resolved.fell_back);
        assert_eq!(resolved.day.sehri_end, "5:04 AM");
    }

    #[test]
    fn test_resolve_missing_date_falls_back_to_first() {
        let schedule = schedule();
        let resolved = schedule.resolve("dhaka", date("2025-04-15")).unwrap();
        assert!(resolved.fell_back);
        assert_eq!(resolved.day.date, "2025-03-01");
    }

    #[test]
    fn test_unknown_and_empty_divisions() {
        let schedule = schedule();
        assert_eq!(
            schedule.resolve("atlantis", date("2025-03-01")).unwrap_err(),
            LookupError::UnknownDivision("atlantis".to_string())
        );
        assert_eq!(
            schedule.resolve("sylhet", date("2025-03-01")).unwrap_err(),
            LookupError::Empty("sylhet".to_string())
        );
    }

    #[test]
    fn test_date_range() {
        let schedule = schedule();
        assert_eq!(
            schedule.date_range("dhaka").unwrap(),
            Some(("2025-03-01", "2025-03-02"))
        );
        assert_eq!(schedule.date_range("sylhet").unwrap(), None);
    }
}
