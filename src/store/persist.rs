use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::db::repository::StorageRepo;
use crate::models::{FoodItem, FoodSelection, SelectedFood, Settings};
use crate::store::state::AppState;

pub const STORAGE_KEY: &str = "ramadan-app-storage";
pub const STORAGE_VERSION: u64 = 1;

#[derive(Debug, Error)]
#[error("stored state has version {found}, newer than this build understands ({})", STORAGE_VERSION)]
pub struct UnsupportedVersion {
    pub found: u64,
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    state: &'a AppState,
}

/// Version 0 kept the food record itself in the selection map, with the
/// serving count and custom amount mixed in beside its fields.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyState {
    #[serde(default)]
    selected_division: Option<String>,
    #[serde(default)]
    selected_foods: BTreeMap<String, LegacyFood>,
    #[serde(default)]
    settings: Settings,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyFood {
    #[serde(flatten)]
    food: FoodItem,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    custom_amount: Option<f64>,
}

impl LegacyState {
    fn upgrade(self) -> AppState {
        let defaults = AppState::default();
        let selected_foods: FoodSelection = self
            .selected_foods
            .into_iter()
            .map(|(id, legacy)| {
                let selected = SelectedFood {
                    food: legacy.food,
                    quantity: legacy.quantity.unwrap_or(1).max(1),
                    custom_amount: legacy.custom_amount.filter(|a| *a > 0.0),
                };
                (id, selected)
            })
            .collect();
        AppState {
            selected_division: self.selected_division.unwrap_or(defaults.selected_division),
            selected_foods,
            settings: self.settings,
        }
    }
}

pub fn encode(state: &AppState) -> Result<String> {
    serde_json::to_string(&Envelope {
        version: STORAGE_VERSION,
        state,
    })
    .context("Serializing app state")
}

/// Decode a stored blob, upgrading older layouts. Blobs are either wrapped
/// as `{ "version", "state" }` or, in the oldest form, the bare state object.
pub fn decode(blob: &str) -> Result<AppState> {
    let value: Value = serde_json::from_str(blob).context("Parsing stored app state")?;
    let version = value.get("version").and_then(Value::as_u64).unwrap_or(0);
    let body = match value.get("state") {
        Some(state) => state.clone(),
        None => value,
    };

    match version {
        0 => {
            let legacy: LegacyState =
                serde_json::from_value(body).context("Reading version 0 app state")?;
            log::info!("Upgrading stored state from version 0 to {}", STORAGE_VERSION);
            Ok(legacy.upgrade())
        }
        STORAGE_VERSION => serde_json::from_value(body).context("Reading app state"),
        found => Err(UnsupportedVersion { found }.into()),
    }
}

/// Loads and saves `AppState` under a single key of the local store.
pub struct StateStore<'c> {
    conn: &'c Connection,
}

impl<'c> StateStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Stored state, or defaults on first launch. A blob that no longer parses
    /// is logged and replaced by defaults on the next write.
    pub fn load(&self) -> Result<AppState> {
        let Some(blob) = StorageRepo::get(self.conn, STORAGE_KEY)? else {
            log::info!("No stored state; starting with defaults");
            return Ok(AppState::default());
        };
        match decode(&blob) {
            Ok(state) => Ok(state),
            Err(e) if e.is::<UnsupportedVersion>() => Err(e),
            Err(e) => {
                log::warn!("Discarding unreadable stored state: {:#}", e);
                Ok(AppState::default())
            }
        }
    }

    pub fn save(&self, state: &AppState) -> Result<()> {
        let blob = encode(state)?;
        StorageRepo::set(self.conn, STORAGE_KEY, &blob)?;
        log::debug!("Saved app state ({} bytes)", blob.len());
        Ok(())
    }

    /// Run `update` and write the result. A failed write is logged and the
    /// new state is returned regardless.
    pub fn apply<F>(&self, state: &AppState, update: F) -> AppState
    where
        F: FnOnce(&AppState) -> AppState,
    {
        let next = update(state);
        if let Err(e) = self.save(&next) {
            log::warn!("Could not persist app state: {:#}", e);
        }
        next
    }

    pub fn reset(&self) -> Result<bool> {
        StorageRepo::remove(self.conn, STORAGE_KEY)
    }
}
