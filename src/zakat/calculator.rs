use crate::config::ZakatConfig;
use crate::models::{MetalType, MetalUnit, ZakatInputs, ZakatResult};

/// Coerce a free-text amount to a number. Blank or non-numeric text is 0;
/// a numeric prefix is honoured ("12abc" is 12, "12,50" is 12). Commas are
/// dropped only when they group digits, so "1,00,000" reads as 100000.
pub fn parse_amount(s: &str) -> f64 {
    let cleaned = strip_grouping(s.trim());
    let bytes = cleaned.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    cleaned[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Remove the commas of a leading digit run when they form a grouping:
/// 1 to 3 digits, then groups of 2 or 3 digits, the last group exactly 3.
/// Anything else is returned untouched and the comma ends the number.
fn strip_grouping(s: &str) -> String {
    let sign = if s.starts_with(['+', '-']) { 1 } else { 0 };
    let run_end = s[sign..]
        .find(|c: char| !(c.is_ascii_digit() || c == ','))
        .map_or(s.len(), |i| sign + i);
    let run = &s[sign..run_end];
    if !run.contains(',') {
        return s.to_string();
    }

    let groups: Vec<&str> = run.split(',').collect();
    let last = groups.len() - 1;
    let grouped = groups.iter().enumerate().all(|(i, g)| match i {
        0 => (1..=3).contains(&g.len()),
        i if i == last => g.len() == 3,
        _ => (2..=3).contains(&g.len()),
    });
    if !grouped {
        return s.to_string();
    }
    format!("{}{}{}", &s[..sign], run.replace(',', ""), &s[run_end..])
}

/// Zakat on cash-like wealth using fixed metal prices.
pub struct ZakatCalculator {
    gold_price_per_gram: f64,
    silver_price_per_gram: f64,
    gold_nisab_grams: f64,
    silver_nisab_grams: f64,
    rate: f64,
}

impl ZakatCalculator {
    pub fn new(config: &ZakatConfig) -> Self {
        Self {
            gold_price_per_gram: config.gold_price_per_gram,
            silver_price_per_gram: config.silver_price_per_gram,
            gold_nisab_grams: config.gold_nisab_grams,
            silver_nisab_grams: config.silver_nisab_grams,
            rate: config.rate,
        }
    }

    pub fn price_per_gram(&self, metal: MetalType) -> f64 {
        match metal {
            MetalType::Gold => self.gold_price_per_gram,
            MetalType::Silver => self.silver_price_per_gram,
        }
    }

    /// Exemption threshold in currency for the chosen metal standard.
    pub fn nisab(&self, metal: MetalType) -> f64 {
        match metal {
            MetalType::Gold => self.gold_nisab_grams * self.gold_price_per_gram,
            MetalType::Silver => self.silver_nisab_grams * self.silver_price_per_gram,
        }
    }

    pub fn metal_value(&self, inputs: &ZakatInputs) -> f64 {
        let amount = parse_amount(&inputs.metal);
        match inputs.metal_unit {
            MetalUnit::Grams => amount * self.price_per_gram(inputs.metal_type),
            MetalUnit::Currency => amount,
        }
    }

    /// Pure and unrounded. The total may be negative when liabilities exceed
    /// assets; such a total is simply below the threshold.
    pub fn calculate(&self, inputs: &ZakatInputs) -> ZakatResult {
        let metal_value = self.metal_value(inputs);

        let assets = parse_amount(&inputs.cash)
            + metal_value
            + parse_amount(&inputs.investments)
            + parse_amount(&inputs.loans_given)
            + parse_amount(&inputs.stocks)
            + parse_amount(&inputs.rental_income)
            + parse_amount(&inputs.agriculture)
            + parse_amount(&inputs.savings);
        let total = assets - parse_amount(&inputs.liabilities);

        let nisab_value = self.nisab(inputs.metal_type);
        let is_eligible = total >= nisab_value;
        let zakat_amount = if is_eligible { total * self.rate } else { 0.0 };

        ZakatResult {
            metal_value,
            total_zakatable_assets: total,
            nisab_value,
            is_eligible,
            zakat_amount,
        }
    }
}
