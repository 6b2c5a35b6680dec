use serde::{Deserialize, Serialize};

use crate::models::food::total_calories;
use crate::models::{FoodItem, FoodSelection, SelectedFood, Settings, SettingsPatch};

fn default_division() -> String {
    "dhaka".to_string()
}

/// Everything that survives a restart. Updates never mutate in place; each
/// returns the next state so callers decide when to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default = "default_division")]
    pub selected_division: String,
    #[serde(default)]
    pub selected_foods: FoodSelection,
    #[serde(default)]
    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selected_division: default_division(),
            selected_foods: FoodSelection::new(),
            settings: Settings::default(),
        }
    }
}

impl AppState {
    pub fn set_selected_division(&self, division: &str) -> Self {
        Self {
            selected_division: division.to_string(),
            ..self.clone()
        }
    }

    /// Presence toggle: a selected food is removed, an unselected one is
    /// added with `quantity` servings (1 when not given).
    pub fn toggle_food_selection(&self, food: &FoodItem, quantity: Option<u32>) -> Self {
        let mut next = self.clone();
        if next.selected_foods.remove(&food.id).is_none() {
            let quantity = quantity.unwrap_or(1).max(1);
            next.selected_foods
                .insert(food.id.clone(), SelectedFood::new(food.clone(), quantity));
        }
        next
    }

    /// Overwrite the serving count of a selected food. Unselected foods are
    /// left alone; counts below 1 are raised to 1.
    pub fn update_food_quantity(&self, food_id: &str, quantity: u32) -> Self {
        let mut next = self.clone();
        if let Some(selected) = next.selected_foods.get_mut(food_id) {
            selected.quantity = quantity.max(1);
        }
        next
    }

    /// Set a custom amount (in the reference portion's unit) for a selected
    /// food. A non-positive amount clears it and the serving count applies again.
    pub fn update_food_amount(&self, food_id: &str, amount: f64) -> Self {
        let mut next = self.clone();
        if let Some(selected) = next.selected_foods.get_mut(food_id) {
            selected.custom_amount = (amount > 0.0).then_some(amount);
        }
        next
    }

    pub fn clear_food_selections(&self) -> Self {
        Self {
            selected_foods: FoodSelection::new(),
            ..self.clone()
        }
    }

    pub fn update_settings(&self, patch: &SettingsPatch) -> Self {
        Self {
            settings: self.settings.merged(patch),
            ..self.clone()
        }
    }

    pub fn is_selected(&self, food_id: &str) -> bool {
        self.selected_foods.contains_key(food_id)
    }

    pub fn total_calories(&self) -> f64 {
        total_calories(&self.selected_foods)
    }
}
