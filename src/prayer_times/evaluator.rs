use std::fmt;

use crate::models::{PrayerDay, PrayerType};
use crate::prayer_times::clock::{parse_minutes, TimeError, MINUTES_PER_DAY};

/// Hours and minutes left until an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub hours: u32,
    pub minutes: u32,
}

impl Countdown {
    pub fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours > 0 {
            write!(f, "{}h {}m", self.hours, self.minutes)
        } else {
            write!(f, "{}m", self.minutes)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPrayer {
    pub prayer: PrayerType,
    /// Minute of day the prayer starts.
    pub at: u32,
    /// Every prayer of today has passed; this is tomorrow's Fajr.
    pub tomorrow: bool,
}

/// Today's five prayer start times in minutes since midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPrayers {
    slots: [(PrayerType, u32); 5],
}

impl DailyPrayers {
    pub fn new(fajr: u32, dhuhr: u32, asr: u32, maghrib: u32, isha: u32) -> Self {
        Self {
            slots: [
                (PrayerType::Fajr, fajr),
                (PrayerType::Dhuhr, dhuhr),
                (PrayerType::Asr, asr),
                (PrayerType::Maghrib, maghrib),
                (PrayerType::Isha, isha),
            ],
        }
    }

    pub fn from_day(day: &PrayerDay) -> Result<Self, TimeError> {
        Ok(Self::new(
            parse_minutes(&day.fajr)?,
            parse_minutes(&day.dhuhr)?,
            parse_minutes(&day.asr)?,
            parse_minutes(&day.maghrib)?,
            parse_minutes(&day.isha)?,
        ))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrayerType, u32)> + '_ {
        self.slots.iter().copied()
    }

    fn first(&self) -> (PrayerType, u32) {
        self.slots[0]
    }

    fn last(&self) -> (PrayerType, u32) {
        self.slots[self.slots.len() - 1]
    }

    /// First prayer strictly after `now`; after Isha this wraps to tomorrow's Fajr.
    pub fn next_prayer(&self, now: u32) -> NextPrayer {
        match self.slots.iter().find(|(_, at)| *at > now) {
            Some((prayer, at)) => NextPrayer {
                prayer: *prayer,
                at: *at,
                tomorrow: false,
            },
            None => {
                let (prayer, at) = self.first();
                NextPrayer {
                    prayer,
                    at,
                    tomorrow: true,
                }
            }
        }
    }

    /// The prayer whose time has most recently begun, or `None` before Fajr.
    pub fn current_prayer(&self, now: u32) -> Option<PrayerType> {
        self.slots
            .iter()
            .rev()
            .find(|(_, at)| *at <= now)
            .map(|(prayer, _)| *prayer)
    }

    pub fn time_remaining(&self, now: u32) -> Countdown {
        let next = self.next_prayer(now);
        let end = next.at as i64 + if next.tomorrow { MINUTES_PER_DAY as i64 } else { 0 };
        Countdown::from_minutes((end - now as i64).max(0) as u32)
    }

    /// Share of the current prayer interval already elapsed, in percent.
    ///
    /// Before Fajr the interval runs from the previous night's Isha, so its
    /// start lies one day back; after Isha it runs to tomorrow's Fajr.
    pub fn progress(&self, now: u32) -> f64 {
        let day = MINUTES_PER_DAY as i64;
        let now = now as i64;

        let next = self.next_prayer(now as u32);
        let end = next.at as i64 + if next.tomorrow { day } else { 0 };

        let start = match self.slots.iter().rev().find(|(_, at)| *at as i64 <= now) {
            Some((_, at)) => *at as i64,
            None => self.last().1 as i64 - day,
        };

        // end > now >= start, so the interval is never empty
        let total = end - start;
        let elapsed = now - start;
        (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastingEvent {
    SehriEnd,
    Iftar,
}

impl FastingEvent {
    pub fn display_name(&self) -> &'static str {
        match self {
            FastingEvent::SehriEnd => "Sehri ends",
            FastingEvent::Iftar => "Iftar",
        }
    }
}

/// Sehri end and Iftar start for one day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastingTimes {
    pub sehri_end: u32,
    pub iftar_start: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextFastingEvent {
    pub event: FastingEvent,
    pub at: u32,
    pub tomorrow: bool,
    pub remaining: Countdown,
}

impl FastingTimes {
    pub fn from_day(day: &PrayerDay) -> Result<Self, TimeError> {
        Ok(Self {
            sehri_end: parse_minutes(&day.sehri_end)?,
            iftar_start: parse_minutes(&day.iftar_start)?,
        })
    }

    pub fn is_fasting(&self, now: u32) -> bool {
        self.sehri_end <= now && now < self.iftar_start
    }

    /// Next of: today's Sehri end, today's Iftar, tomorrow's Sehri end.
    /// Without tomorrow's record, today's Sehri time stands in for it.
    pub fn next_event(&self, tomorrow: Option<&FastingTimes>, now: u32) -> NextFastingEvent {
        let (event, at, is_tomorrow) = if now < self.sehri_end {
            (FastingEvent::SehriEnd, self.sehri_end, false)
        } else if now < self.iftar_start {
            (FastingEvent::Iftar, self.iftar_start, false)
        } else {
            let sehri = tomorrow.map(|t| t.sehri_end).unwrap_or(self.sehri_end);
            (FastingEvent::SehriEnd, sehri, true)
        };

        let end = at + if is_tomorrow { MINUTES_PER_DAY } else { 0 };
        NextFastingEvent {
            event,
            at,
            tomorrow: is_tomorrow,
            remaining: Countdown::from_minutes(end.saturating_sub(now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> u32 {
        h * 60 + m
    }

    /// Fajr 5:00, Dhuhr 12:00, Asr 15:30, Maghrib 18:00, Isha 20:00.
    fn sample() -> DailyPrayers {
        DailyPrayers::new(hm(5, 0), hm(12, 0), hm(15, 30), hm(18, 0), hm(20, 0))
    }

    #[test]
    fn test_next_prayer_during_the_day() {
        let next = sample().next_prayer(hm(13, 0));
        assert_eq!(next.prayer, PrayerType::Asr);
        assert!(!next.tomorrow);
        assert_eq!(sample().time_remaining(hm(13, 0)), Countdown { hours: 2, minutes: 30 });
    }

    #[test]
    fn test_next_prayer_at_exact_start_moves_on() {
        let next = sample().next_prayer(hm(12, 0));
        assert_eq!(next.prayer, PrayerType::Asr);
        assert_eq!(sample().current_prayer(hm(12, 0)), Some(PrayerType::Dhuhr));
    }

    #[test]
    fn test_next_prayer_wraps_after_isha() {
        let prayers = sample();
        let next = prayers.next_prayer(hm(23, 0));
        assert_eq!(next.prayer, PrayerType::Fajr);
        assert!(next.tomorrow);
        assert_eq!(prayers.time_remaining(hm(23, 0)), Countdown { hours: 6, minutes: 0 });
    }

    #[test]
    fn test_before_fajr_counts_down_to_todays_fajr() {
        let prayers = sample();
        let next = prayers.next_prayer(hm(3, 15));
        assert_eq!(next.prayer, PrayerType::Fajr);
        assert!(!next.tomorrow);
        assert_eq!(prayers.time_remaining(hm(3, 15)), Countdown { hours: 1, minutes: 45 });
        assert_eq!(prayers.current_prayer(hm(3, 15)), None);
    }

    #[test]
    fn test_progress_within_interval() {
        // Dhuhr 12:00 to Asr 15:30 is 210 minutes; 13:45 is halfway.
        let pct = sample().progress(hm(13, 45));
        assert!((pct - 50.0).abs() < 1e-9);
        assert_eq!(sample().progress(hm(12, 0)), 0.0);
    }

    #[test]
    fn test_progress_after_isha_spans_midnight() {
        // Isha 20:00 to Fajr 05:00 next day is 540 minutes; 23:00 is 180 in.
        let pct = sample().progress(hm(23, 0));
        assert!((pct - 180.0 / 540.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_before_fajr_uses_previous_isha() {
        // 02:00 is 360 minutes after the previous 20:00 Isha.
        let pct = sample().progress(hm(2, 0));
        assert!((pct - 360.0 / 540.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_always_in_range() {
        let prayers = sample();
        for now in 0..MINUTES_PER_DAY {
            let pct = prayers.progress(now);
            assert!((0.0..=100.0).contains(&pct), "{} -> {}", now, pct);
        }
    }

    #[test]
    fn test_progress_when_prayers_coincide() {
        // All five at 5:00 leaves one full-day interval from 5:00 to 5:00
        let prayers = DailyPrayers::new(hm(5, 0), hm(5, 0), hm(5, 0), hm(5, 0), hm(5, 0));
        assert_eq!(prayers.progress(hm(5, 0)), 0.0);
        assert_eq!(prayers.progress(hm(17, 0)), 50.0);
        assert_eq!(prayers.progress(hm(23, 0)), 75.0);
        assert_eq!(prayers.progress(hm(2, 0)), 87.5);
    }

    #[test]
    fn test_from_day_parses_dataset_strings() {
        let day = PrayerDay {
            date: "2025-03-01".to_string(),
            fajr: "5:11 AM".to_string(),
            dhuhr: "12:11 PM".to_string(),
            asr: "4:23 PM".to_string(),
            maghrib: "6:04 PM".to_string(),
            isha: "7:20 PM".to_string(),
            sehri_end: "5:05 AM".to_string(),
            iftar_start: "6:04 PM".to_string(),
        };
        let prayers = DailyPrayers::from_day(&day).unwrap();
        assert_eq!(prayers.iter().nth(1), Some((PrayerType::Dhuhr, hm(12, 11))));
        let fasting = FastingTimes::from_day(&day).unwrap();
        assert_eq!(fasting.iftar_start, hm(18, 4));

        let broken = PrayerDay {
            asr: "4:23".to_string(),
            ..day
        };
        assert!(DailyPrayers::from_day(&broken).is_err());
    }

    #[test]
    fn test_fasting_countdown() {
        let today = FastingTimes {
            sehri_end: hm(5, 5),
            iftar_start: hm(18, 4),
        };
        let tomorrow = FastingTimes {
            sehri_end: hm(5, 4),
            iftar_start: hm(18, 5),
        };

        let next = today.next_event(Some(&tomorrow), hm(4, 0));
        assert_eq!(next.event, FastingEvent::SehriEnd);
        assert_eq!(next.remaining, Countdown { hours: 1, minutes: 5 });

        let next = today.next_event(Some(&tomorrow), hm(12, 4));
        assert_eq!(next.event, FastingEvent::Iftar);
        assert_eq!(next.remaining.total_minutes(), 6 * 60);
        assert!(today.is_fasting(hm(12, 4)));

        let next = today.next_event(Some(&tomorrow), hm(22, 0));
        assert_eq!(next.event, FastingEvent::SehriEnd);
        assert!(next.tomorrow);
        assert_eq!(next.at, hm(5, 4));
        assert_eq!(next.remaining, Countdown { hours: 7, minutes: 4 });

        let next = today.next_event(None, hm(22, 0));
        assert_eq!(next.remaining, Countdown { hours: 7, minutes: 5 });
        assert!(!today.is_fasting(hm(22, 0)));
    }

    #[test]
    fn test_countdown_display() {
        assert_eq!(Countdown::from_minutes(125).to_string(), "2h 5m");
        assert_eq!(Countdown::from_minutes(42).to_string(), "42m");
    }
}
