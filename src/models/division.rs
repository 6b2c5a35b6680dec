use serde::{Deserialize, Serialize};

use crate::models::Language;

/// An administrative region with its own sehri/iftar schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: String,
    pub name: String,
    pub name_bn: String,
}

impl Division {
    pub fn label(&self, language: Language) -> &str {
        match language {
            Language::En => &self.name,
            Language::Bn => &self.name_bn,
        }
    }
}
