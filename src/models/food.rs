use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Portion size used when a portion label carries no leading number.
const DEFAULT_BASE_PORTION: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portion {
    pub size: String,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub name_bn: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub portions: Vec<Portion>,
}

impl FoodItem {
    /// The first portion is the reference portion for calorie math.
    pub fn base_portion(&self) -> Option<&Portion> {
        self.portions.first()
    }

    /// Leading integer of the reference portion label: "100g" is 100,
    /// "1 piece (8g)" is 1. Falls back to 100 when there is none.
    pub fn base_portion_size(&self) -> f64 {
        self.base_portion()
            .and_then(|p| leading_integer(&p.size))
            .filter(|n| *n > 0)
            .map(|n| n as f64)
            .unwrap_or(DEFAULT_BASE_PORTION)
    }

    pub fn base_calories(&self) -> f64 {
        self.base_portion().map(|p| p.calories).unwrap_or(0.0)
    }
}

fn leading_integer(s: &str) -> Option<u64> {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn default_quantity() -> u32 {
    1
}

/// A food in the tracker, with either a serving count or a custom amount
/// in the unit of the reference portion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFood {
    pub food: FoodItem,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_amount: Option<f64>,
}

impl SelectedFood {
    pub fn new(food: FoodItem, quantity: u32) -> Self {
        Self {
            food,
            quantity,
            custom_amount: None,
        }
    }

    pub fn calories(&self) -> f64 {
        match self.custom_amount {
            Some(amount) => {
                (amount / self.food.base_portion_size() * self.food.base_calories()).round()
            }
            None => self.food.base_calories() * self.quantity as f64,
        }
    }
}

/// Selected foods keyed by food id.
pub type FoodSelection = BTreeMap<String, SelectedFood>;

pub fn total_calories(selection: &FoodSelection) -> f64 {
    selection.values().map(SelectedFood::calories).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(id: &str, size: &str, calories: f64) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            name: id.to_string(),
            name_bn: String::new(),
            category: "iftar".to_string(),
            image_url: None,
            portions: vec![Portion {
                size: size.to_string(),
                calories,
            }],
        }
    }

    #[test]
    fn test_base_portion_size() {
        assert_eq!(food("a", "100g", 1.0).base_portion_size(), 100.0);
        assert_eq!(food("b", "250ml", 1.0).base_portion_size(), 250.0);
        assert_eq!(food("c", "1 piece (8g)", 1.0).base_portion_size(), 1.0);
        assert_eq!(food("d", "a bowl", 1.0).base_portion_size(), 100.0);
    }

    #[test]
    fn test_calories_by_quantity() {
        let selected = SelectedFood::new(food("dates", "100g", 282.0), 3);
        assert_eq!(selected.calories(), 846.0);
    }

    #[test]
    fn test_calories_by_custom_amount() {
        let mut selected = SelectedFood::new(food("haleem", "250g", 350.0), 1);
        selected.custom_amount = Some(100.0);
        assert_eq!(selected.calories(), 140.0);
    }

    #[test]
    fn test_total_calories() {
        let mut selection = FoodSelection::new();
        selection.insert("a".into(), SelectedFood::new(food("a", "100g", 100.0), 2));
        selection.insert("b".into(), SelectedFood::new(food("b", "50g", 185.0), 1));
        assert_eq!(total_calories(&selection), 385.0);
        assert_eq!(total_calories(&FoodSelection::new()), 0.0);
    }
}
