use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerType {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerType {
    /// Daily order, Fajr first.
    pub fn all() -> [PrayerType; 5] {
        [
            PrayerType::Fajr,
            PrayerType::Dhuhr,
            PrayerType::Asr,
            PrayerType::Maghrib,
            PrayerType::Isha,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "Fajr",
            PrayerType::Dhuhr => "Dhuhr",
            PrayerType::Asr => "Asr",
            PrayerType::Maghrib => "Maghrib",
            PrayerType::Isha => "Isha",
        }
    }

    pub fn display_name_bn(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "ফজর",
            PrayerType::Dhuhr => "যোহর",
            PrayerType::Asr => "আসর",
            PrayerType::Maghrib => "মাগরিব",
            PrayerType::Isha => "এশা",
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fajr" => Ok(PrayerType::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerType::Dhuhr),
            "asr" => Ok(PrayerType::Asr),
            "maghrib" => Ok(PrayerType::Maghrib),
            "isha" => Ok(PrayerType::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer type: {}", s)),
        }
    }
}

/// One day of the bundled schedule. Times are 12-hour clock strings
/// ("5:05 AM") exactly as they appear in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerDay {
    pub date: String,
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
    pub sehri_end: String,
    pub iftar_start: String,
}

impl PrayerDay {
    pub fn time_of(&self, prayer: PrayerType) -> &str {
        match prayer {
            PrayerType::Fajr => &self.fajr,
            PrayerType::Dhuhr => &self.dhuhr,
            PrayerType::Asr => &self.asr,
            PrayerType::Maghrib => &self.maghrib,
            PrayerType::Isha => &self.isha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_zuhr_spelling() {
        assert_eq!(PrayerType::from_str("Zuhr").unwrap(), PrayerType::Dhuhr);
        assert_eq!(PrayerType::from_str("ISHA").unwrap(), PrayerType::Isha);
        assert!(PrayerType::from_str("tahajjud").is_err());
    }

    #[test]
    fn test_prayer_day_deserializes_camel_case() {
        let json = r#"{
            "date": "2025-03-01",
            "fajr": "5:11 AM", "dhuhr": "12:11 PM", "asr": "4:23 PM",
            "maghrib": "6:04 PM", "isha": "7:20 PM",
            "sehriEnd": "5:05 AM", "iftarStart": "6:04 PM"
        }"#;
        let day: PrayerDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.sehri_end, "5:05 AM");
        assert_eq!(day.time_of(PrayerType::Asr), "4:23 PM");
    }

    #[test]
    fn test_prayer_day_requires_every_field() {
        let json = r#"{ "date": "2025-03-01", "fajr": "5:11 AM" }"#;
        assert!(serde_json::from_str::<PrayerDay>(json).is_err());
    }
}
