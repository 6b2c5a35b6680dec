pub mod content;
pub mod division;
pub mod food;
pub mod prayer;
pub mod settings;
pub mod zakat;

pub use content::{AllahName, Chapter, Dua, FoodTip};
pub use division::Division;
pub use food::{FoodItem, FoodSelection, SelectedFood};
pub use prayer::{PrayerDay, PrayerType};
pub use settings::{Language, Settings, SettingsPatch, Theme};
pub use zakat::{MetalType, MetalUnit, ZakatInputs, ZakatResult};
