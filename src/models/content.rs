use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dua {
    pub id: u32,
    pub title: String,
    pub arabic: String,
    pub pronunciation: String,
    pub meaning: String,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllahName {
    pub id: u32,
    pub transliteration: String,
    pub meaning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodTip {
    pub id: u32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

/// A Quran chapter. `verses` holds the bundled Bengali translation and may be
/// empty for chapters whose text is not shipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: u32,
    pub name: String,
    pub meaning: String,
    pub verse_count: u32,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

impl Chapter {
    pub fn has_text(&self) -> bool {
        !self.verses.is_empty()
    }
}

impl Dua {
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q)
            || self.meaning.to_lowercase().contains(&q)
            || self.pronunciation.to_lowercase().contains(&q)
    }
}
