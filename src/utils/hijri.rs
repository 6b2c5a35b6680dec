use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

const RAMADAN: usize = 9;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

#[derive(Debug, Clone)]
pub struct HijriInfo {
    pub day: usize,
    pub month: usize,
    pub year: usize,
    pub month_name: String,
}

impl HijriInfo {
    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month_name, self.year)
    }

    pub fn is_ramadan(&self) -> bool {
        self.month == RAMADAN
    }
}

/// Hijri date for a Gregorian date shifted by `offset_days`.
/// The offset adjusts for local moon sighting (-1 is common in Bangladesh).
pub fn to_hijri(date: NaiveDate, offset_days: i32) -> Result<HijriInfo> {
    let adjusted = date + Duration::days(offset_days as i64);
    let hd = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .map_err(|e| anyhow::anyhow!("Hijri conversion error: {}", e))?;

    let month = hd.month();
    Ok(HijriInfo {
        day: hd.day(),
        month,
        year: hd.year(),
        month_name: hijri_month_name(month).to_string(),
    })
}

/// Day of Ramadan (1-based), or None outside the month.
pub fn ramadan_day(date: NaiveDate, offset_days: i32) -> Option<usize> {
    to_hijri(date, offset_days)
        .ok()
        .filter(HijriInfo::is_ramadan)
        .map(|h| h.day)
}

/// Header text for a date: "15 Ramadan 1446", or empty when out of range.
pub fn hijri_string(date: NaiveDate, offset_days: i32) -> String {
    match to_hijri(date, offset_days) {
        Ok(h) => h.formatted(),
        Err(e) => {
            log::warn!("{}", e);
            String::new()
        }
    }
}
