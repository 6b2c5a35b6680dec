use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{AllahName, Chapter, Division, Dua, FoodItem, FoodTip, PrayerDay};
use crate::prayer_times::lookup::DATE_FORMAT;
use crate::prayer_times::{parse_minutes, Schedule};

const DIVISIONS_JSON: &str = include_str!("../../assets/divisions.json");
const SCHEDULE_JSON: &str = include_str!("../../assets/schedule.json");
const FOODS_JSON: &str = include_str!("../../assets/foods.json");
const DUAS_JSON: &str = include_str!("../../assets/duas.json");
const NAMES_JSON: &str = include_str!("../../assets/names.json");
const FOOD_TIPS_JSON: &str = include_str!("../../assets/food_tips.json");
const QURAN_JSON: &str = include_str!("../../assets/quran.json");

pub const NAMES_OF_ALLAH: usize = 99;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("{file}: {source}")]
    Parse {
        file: String,
        source: serde_json::Error,
    },
    #[error("{file}: {message}")]
    Invalid { file: String, message: String },
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn invalid(file: &str, message: impl Into<String>) -> DataError {
    DataError::Invalid {
        file: file.to_string(),
        message: message.into(),
    }
}

fn parse<T: DeserializeOwned>(file: &str, text: &str) -> Result<T, DataError> {
    serde_json::from_str(text).map_err(|source| DataError::Parse {
        file: file.to_string(),
        source,
    })
}

#[derive(Deserialize)]
struct DivisionsFile {
    divisions: Vec<Division>,
}

#[derive(Deserialize)]
struct ScheduleFile {
    schedule: BTreeMap<String, Vec<PrayerDay>>,
}

#[derive(Deserialize)]
struct FoodsFile {
    foods: Vec<FoodItem>,
}

#[derive(Deserialize)]
struct DuasFile {
    duas: Vec<Dua>,
}

#[derive(Deserialize)]
struct NamesFile {
    names: Vec<AllahName>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodTipsFile {
    food_tips: Vec<FoodTip>,
}

#[derive(Deserialize)]
struct QuranFile {
    chapters: Vec<Chapter>,
}

/// All read-only reference data, parsed and checked once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub divisions: Vec<Division>,
    pub schedule: Schedule,
    pub foods: Vec<FoodItem>,
    pub duas: Vec<Dua>,
    pub names: Vec<AllahName>,
    pub tips: Vec<FoodTip>,
    pub chapters: Vec<Chapter>,
}

impl Catalog {
    pub fn bundled() -> Result<Self, DataError> {
        Self::build("schedule.json", SCHEDULE_JSON)
    }

    /// Bundled data, with the schedule optionally read from a user file.
    pub fn load(schedule_override: Option<&Path>) -> Result<Self, DataError> {
        let Some(path) = schedule_override else {
            return Self::bundled();
        };
        let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Using schedule from {:?}", path);
        Self::build(&path.display().to_string(), &text)
    }

    fn build(schedule_file: &str, schedule_text: &str) -> Result<Self, DataError> {
        let divisions = parse::<DivisionsFile>("divisions.json", DIVISIONS_JSON)?.divisions;
        validate_divisions("divisions.json", &divisions)?;

        let schedule = parse::<ScheduleFile>(schedule_file, schedule_text)?.schedule;
        validate_schedule(schedule_file, &schedule, &divisions)?;

        let foods = parse::<FoodsFile>("foods.json", FOODS_JSON)?.foods;
        validate_foods("foods.json", &foods)?;

        let duas = parse::<DuasFile>("duas.json", DUAS_JSON)?.duas;
        unique_ids("duas.json", duas.iter().map(|d| d.id))?;

        let names = parse::<NamesFile>("names.json", NAMES_JSON)?.names;
        validate_names("names.json", &names)?;

        let tips = parse::<FoodTipsFile>("food_tips.json", FOOD_TIPS_JSON)?.food_tips;
        unique_ids("food_tips.json", tips.iter().map(|t| t.id))?;

        let chapters = parse::<QuranFile>("quran.json", QURAN_JSON)?.chapters;
        validate_chapters("quran.json", &chapters)?;

        log::debug!(
            "Catalog loaded: {} divisions, {} foods, {} duas, {} chapters",
            divisions.len(),
            foods.len(),
            duas.len(),
            chapters.len()
        );

        Ok(Self {
            divisions,
            schedule: Schedule::new(schedule),
            foods,
            duas,
            names,
            tips,
            chapters,
        })
    }

    pub fn division(&self, id: &str) -> Option<&Division> {
        self.divisions.iter().find(|d| d.id == id)
    }

    pub fn food(&self, id: &str) -> Option<&FoodItem> {
        self.foods.iter().find(|f| f.id == id)
    }

    pub fn chapter(&self, id: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }
}

fn unique_ids<T>(file: &str, ids: impl Iterator<Item = T>) -> Result<(), DataError>
where
    T: std::hash::Hash + Eq + std::fmt::Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(invalid(file, format!("duplicate id '{}'", id)));
        }
        seen.insert(id);
    }
    Ok(())
}

fn validate_divisions(file: &str, divisions: &[Division]) -> Result<(), DataError> {
    if divisions.is_empty() {
        return Err(invalid(file, "no divisions"));
    }
    unique_ids(file, divisions.iter().map(|d| d.id.as_str()))
}

fn validate_schedule(
    file: &str,
    schedule: &BTreeMap<String, Vec<PrayerDay>>,
    divisions: &[Division],
) -> Result<(), DataError> {
    for (division, days) in schedule {
        if !divisions.iter().any(|d| &d.id == division) {
            return Err(invalid(file, format!("unknown division '{}'", division)));
        }
        if days.is_empty() {
            return Err(invalid(file, format!("{}: no entries", division)));
        }

        let mut dates = HashSet::new();
        for day in days {
            let record = format!("{} {}", division, day.date);
            NaiveDate::parse_from_str(&day.date, DATE_FORMAT)
                .map_err(|_| invalid(file, format!("{}: bad date", record)))?;
            if !dates.insert(day.date.as_str()) {
                return Err(invalid(file, format!("{}: duplicate date", record)));
            }

            let times = [
                ("fajr", &day.fajr),
                ("dhuhr", &day.dhuhr),
                ("asr", &day.asr),
                ("maghrib", &day.maghrib),
                ("isha", &day.isha),
                ("sehriEnd", &day.sehri_end),
                ("iftarStart", &day.iftar_start),
            ];
            let mut minutes = Vec::with_capacity(times.len());
            for (field, value) in times {
                let m = parse_minutes(value)
                    .map_err(|e| invalid(file, format!("{} {}: {}", record, field, e)))?;
                minutes.push(m);
            }
            // Prayers only; sehri/iftar are checked for format above.
            if minutes[..5].windows(2).any(|w| w[0] >= w[1]) {
                return Err(invalid(
                    file,
                    format!("{}: prayers out of order", record),
                ));
            }
        }
    }

    for d in divisions {
        if !schedule.contains_key(&d.id) {
            log::warn!("{}: no schedule for division '{}'", file, d.id);
        }
    }
    Ok(())
}

fn validate_foods(file: &str, foods: &[FoodItem]) -> Result<(), DataError> {
    unique_ids(file, foods.iter().map(|f| f.id.as_str()))?;
    for food in foods {
        if food.portions.is_empty() {
            return Err(invalid(file, format!("{}: no portions", food.id)));
        }
        if food
            .portions
            .iter()
            .any(|p| !p.calories.is_finite() || p.calories < 0.0)
        {
            return Err(invalid(file, format!("{}: bad calorie value", food.id)));
        }
    }
    Ok(())
}

fn validate_names(file: &str, names: &[AllahName]) -> Result<(), DataError> {
    if names.len() != NAMES_OF_ALLAH {
        return Err(invalid(
            file,
            format!("expected {} names, found {}", NAMES_OF_ALLAH, names.len()),
        ));
    }
    unique_ids(file, names.iter().map(|n| n.id))
}

fn validate_chapters(file: &str, chapters: &[Chapter]) -> Result<(), DataError> {
    unique_ids(file, chapters.iter().map(|c| c.id))?;
    for chapter in chapters {
        if chapter.verses.len() > chapter.verse_count as usize {
            return Err(invalid(
                file,
                format!("chapter {}: more verses than verseCount", chapter.id),
            ));
        }
        let mut previous = 0;
        for verse in &chapter.verses {
            if verse.number <= previous || verse.number > chapter.verse_count {
                return Err(invalid(
                    file,
                    format!("chapter {}: bad verse number {}", chapter.id, verse.number),
                ));
            }
            previous = verse.number;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::Verse;
    use crate::models::food::Portion;

    #[test]
    fn test_bundled_data_is_valid() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.divisions.len(), 8);
        assert_eq!(catalog.names.len(), NAMES_OF_ALLAH);
        assert!(catalog.division("dhaka").is_some());
        assert!(catalog.food("dates").is_some());
        assert!(catalog.chapter(1).is_some_and(|c| c.has_text()));
        for d in &catalog.divisions {
            assert!(!catalog.schedule.days(&d.id).unwrap().is_empty());
        }
    }

    #[test]
    fn test_bundled_schedule_iftar_matches_maghrib() {
        let catalog = Catalog::bundled().unwrap();
        for d in &catalog.divisions {
            for day in catalog.schedule.days(&d.id).unwrap() {
                assert_eq!(day.iftar_start, day.maghrib, "{} {}", d.id, day.date);
            }
        }
    }

    fn divisions() -> Vec<Division> {
        vec![Division {
            id: "dhaka".to_string(),
            name: "Dhaka".to_string(),
            name_bn: "ঢাকা".to_string(),
        }]
    }

    fn day(date: &str) -> PrayerDay {
        PrayerDay {
            date: date.to_string(),
            fajr: "5:11 AM".to_string(),
            dhuhr: "12:11 PM".to_string(),
            asr: "4:23 PM".to_string(),
            maghrib: "6:04 PM".to_string(),
            isha: "7:20 PM".to_string(),
            sehri_end: "5:05 AM".to_string(),
            iftar_start: "6:04 PM".to_string(),
        }
    }

    fn schedule_of(days: Vec<PrayerDay>) -> BTreeMap<String, Vec<PrayerDay>> {
        BTreeMap::from([("dhaka".to_string(), days)])
    }

    fn message(err: DataError) -> String {
        err.to_string()
    }

    #[test]
    fn test_schedule_rejects_bad_time() {
        let mut bad = day("2025-03-01");
        bad.asr = "16:23".to_string();
        let err = validate_schedule("s.json", &schedule_of(vec![bad]), &divisions()).unwrap_err();
        assert!(message(err).contains("dhaka 2025-03-01 asr"));
    }

    #[test]
    fn test_schedule_rejects_out_of_order_prayers() {
        let mut bad = day("2025-03-01");
        bad.isha = "5:00 PM".to_string();
        let err = validate_schedule("s.json", &schedule_of(vec![bad]), &divisions()).unwrap_err();
        assert!(message(err).contains("out of order"));
    }

    #[test]
    fn test_schedule_rejects_duplicate_and_bad_dates() {
        let dup = schedule_of(vec![day("2025-03-01"), day("2025-03-01")]);
        assert!(validate_schedule("s.json", &dup, &divisions()).is_err());
        let bad = schedule_of(vec![day("March 1")]);
        assert!(validate_schedule("s.json", &bad, &divisions()).is_err());
    }

    #[test]
    fn test_schedule_rejects_unknown_division_and_empty_list() {
        let unknown = BTreeMap::from([("atlantis".to_string(), vec![day("2025-03-01")])]);
        assert!(validate_schedule("s.json", &unknown, &divisions()).is_err());
        assert!(validate_schedule("s.json", &schedule_of(vec![]), &divisions()).is_err());
    }

    #[test]
    fn test_foods_need_portions() {
        let food = FoodItem {
            id: "water".to_string(),
            name: "Water".to_string(),
            name_bn: "পানি".to_string(),
            category: "drink".to_string(),
            image_url: None,
            portions: vec![],
        };
        assert!(validate_foods("f.json", std::slice::from_ref(&food)).is_err());

        let negative = FoodItem {
            portions: vec![Portion {
                size: "1 glass".to_string(),
                calories: -1.0,
            }],
            ..food
        };
        assert!(validate_foods("f.json", &[negative]).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let divs = [divisions(), divisions()].concat();
        let err = validate_divisions("d.json", &divs).unwrap_err();
        assert!(message(err).contains("duplicate id 'dhaka'"));
    }

    #[test]
    fn test_names_must_number_99() {
        let names: Vec<AllahName> = (1..=98)
            .map(|id| AllahName {
                id,
                transliteration: format!("Name {}", id),
                meaning: String::new(),
            })
            .collect();
        assert!(validate_names("n.json", &names).is_err());
    }

    #[test]
    fn test_chapter_verse_numbers() {
        let chapter = Chapter {
            id: 112,
            name: "Al-Ikhlas".to_string(),
            meaning: "Sincerity".to_string(),
            verse_count: 4,
            verses: vec![
                Verse {
                    number: 1,
                    text: String::new(),
                },
                Verse {
                    number: 5,
                    text: String::new(),
                },
            ],
        };
        assert!(validate_chapters("q.json", &[chapter]).is_err());
    }

    #[test]
    fn test_schedule_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule-2026.json");
        let file = serde_json::json!({ "schedule": schedule_of(vec![day("2026-02-18")]) });
        std::fs::write(&path, file.to_string()).unwrap();

        let catalog = Catalog::load(Some(&path)).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        assert!(!catalog.schedule.resolve("dhaka", date).unwrap().fell_back);
        assert!(catalog.schedule.days("khulna").is_err());
    }

    #[test]
    fn test_schedule_override_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            Catalog::load(Some(&missing)),
            Err(DataError::Io { .. })
        ));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "{").unwrap();
        assert!(matches!(
            Catalog::load(Some(&garbage)),
            Err(DataError::Parse { .. })
        ));
    }
}
