use unicode_width::UnicodeWidthStr;

/// Format a money amount with thousands separators. Whole amounts drop the
/// decimals; anything else keeps two.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    if frac == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, frac)
    }
}

pub fn format_calories(kcal: f64) -> String {
    format!("{} kcal", format_amount(kcal.round()))
}

/// Create a simple ASCII progress bar from a percentage
pub fn progress_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Right-pad to a terminal column width. Bengali and Arabic text does not
/// line up with `{:<n}` because that counts chars, not columns.
pub fn pad_display(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(775000.0), "775,000");
        assert_eq!(format_amount(19375.5), "19,375.50");
        assert_eq!(format_amount(-4000.0), "-4,000");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(50.0, 4), "██░░");
        assert_eq!(progress_bar(250.0, 4), "████");
    }

    #[test]
    fn test_pad_display_counts_columns() {
        assert_eq!(pad_display("Asr", 6), "Asr   ");
        assert_eq!(pad_display("toolong", 3), "toolong");
        assert_eq!(UnicodeWidthStr::width(pad_display("ঢাকা", 8).as_str()), 8);
    }
}
