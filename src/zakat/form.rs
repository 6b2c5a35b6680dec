use anyhow::Result;

use crate::models::ZakatInputs;

/// Text fields of the calculator in the order the form asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZakatField {
    Cash,
    Metal,
    Investments,
    LoansGiven,
    Stocks,
    RentalIncome,
    Agriculture,
    Savings,
    Liabilities,
}

impl ZakatField {
    pub const ALL: [ZakatField; 9] = [
        ZakatField::Cash,
        ZakatField::Metal,
        ZakatField::Investments,
        ZakatField::LoansGiven,
        ZakatField::Stocks,
        ZakatField::RentalIncome,
        ZakatField::Agriculture,
        ZakatField::Savings,
        ZakatField::Liabilities,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ZakatField::Cash => "Cash in hand and bank",
            ZakatField::Metal => "Gold or silver",
            ZakatField::Investments => "Business investments",
            ZakatField::LoansGiven => "Money lent to others",
            ZakatField::Stocks => "Shares and stocks",
            ZakatField::RentalIncome => "Rental income",
            ZakatField::Agriculture => "Agricultural produce",
            ZakatField::Savings => "Other savings",
            ZakatField::Liabilities => "Debts due now",
        }
    }

    fn slot<'a>(&self, inputs: &'a mut ZakatInputs) -> &'a mut String {
        match self {
            ZakatField::Cash => &mut inputs.cash,
            ZakatField::Metal => &mut inputs.metal,
            ZakatField::Investments => &mut inputs.investments,
            ZakatField::LoansGiven => &mut inputs.loans_given,
            ZakatField::Stocks => &mut inputs.stocks,
            ZakatField::RentalIncome => &mut inputs.rental_income,
            ZakatField::Agriculture => &mut inputs.agriculture,
            ZakatField::Savings => &mut inputs.savings,
            ZakatField::Liabilities => &mut inputs.liabilities,
        }
    }
}

pub const RESET_COMMAND: &str = ":reset";
pub const UNIT_COMMAND: &str = ":unit";

/// Walk the fields, asking `read` for each one. `read` gets the field and
/// the current inputs and returns `None` at end of input.
///
/// `:reset` clears the whole form and starts over. `:unit` switches the
/// metal entry between grams and currency, which empties the metal field,
/// so the form goes back to it when it was already answered.
pub fn fill<F>(inputs: &mut ZakatInputs, mut read: F) -> Result<()>
where
    F: FnMut(ZakatField, &ZakatInputs) -> Result<Option<String>>,
{
    let metal_index = ZakatField::ALL
        .iter()
        .position(|f| *f == ZakatField::Metal)
        .unwrap_or(0);
    let mut index = 0;

    while index < ZakatField::ALL.len() {
        let field = ZakatField::ALL[index];
        let Some(line) = read(field, inputs)? else {
            break;
        };
        match line.trim() {
            RESET_COMMAND => {
                inputs.reset();
                index = 0;
            }
            UNIT_COMMAND => {
                inputs.toggle_unit();
                index = index.min(metal_index);
            }
            value => {
                *field.slot(inputs) = value.to_string();
                index += 1;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetalUnit;
    use std::collections::VecDeque;

    fn run(lines: &[&str]) -> (ZakatInputs, Vec<ZakatField>) {
        let mut queue: VecDeque<String> = lines.iter().map(|s| s.to_string()).collect();
        let mut asked = Vec::new();
        let mut inputs = ZakatInputs::default();
        fill(&mut inputs, |field, _| {
            asked.push(field);
            Ok(queue.pop_front())
        })
        .unwrap();
        (inputs, asked)
    }

    #[test]
    fn test_fills_every_field_in_order() {
        let (inputs, asked) = run(&["100000", "90", "", "", "", "", "", "", "500"]);
        assert_eq!(asked, ZakatField::ALL.to_vec());
        assert_eq!(inputs.cash, "100000");
        assert_eq!(inputs.metal, "90");
        assert_eq!(inputs.liabilities, "500");
        assert!(inputs.stocks.is_empty());
    }

    #[test]
    fn test_reset_clears_and_restarts() {
        let (inputs, asked) = run(&["5000", "10", ":reset", "42"]);
        assert_eq!(&asked[..4], &[
            ZakatField::Cash,
            ZakatField::Metal,
            ZakatField::Investments,
            ZakatField::Cash,
        ]);
        assert_eq!(inputs.cash, "42");
        assert!(inputs.metal.is_empty());
    }

    #[test]
    fn test_unit_switch_reasks_metal() {
        let (inputs, asked) = run(&["1000", "90", "7", ":unit", "675000"]);
        assert_eq!(asked[4], ZakatField::Metal);
        assert_eq!(inputs.metal_unit, MetalUnit::Currency);
        assert_eq!(inputs.metal, "675000");
        assert_eq!(inputs.investments, "7");
    }

    #[test]
    fn test_unit_switch_before_metal_stays_put() {
        let (inputs, asked) = run(&[":unit", "250"]);
        assert_eq!(asked[..2], [ZakatField::Cash, ZakatField::Cash]);
        assert_eq!(inputs.metal_unit, MetalUnit::Currency);
        assert_eq!(inputs.cash, "250");
    }

    #[test]
    fn test_end_of_input_keeps_answers() {
        let (inputs, asked) = run(&["300"]);
        assert_eq!(asked.len(), 2);
        assert_eq!(inputs.cash, "300");
        assert!(inputs.metal.is_empty());
    }
}
