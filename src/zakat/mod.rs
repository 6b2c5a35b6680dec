pub mod calculator;
pub mod form;

pub use calculator::{parse_amount, ZakatCalculator};
