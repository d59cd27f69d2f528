use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Group the digits of an integer with commas, en-US style.
///
/// # Examples
/// ```
/// use estate_core::utils::text::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(-980), "-980");
/// ```
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Whole-dollar price, e.g. `$675,000`.
pub fn format_price(dollars: u64) -> String {
    format!("${}", format_number(dollars.min(i64::MAX as u64) as i64))
}

/// Dollar amount with cents, e.g. `$1,798.65`.
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}${}.{:02}", sign, format_number(cents / 100), cents % 100)
}

/// Bathroom counts come as halves (2.5); whole values print without a fraction.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Truncate text to a display width, appending an ellipsis
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    const ELLIPSIS: &str = "...";
    let ellipsis_width = ELLIPSIS.width();

    if max_width <= ellipsis_width {
        return ELLIPSIS[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ELLIPSIS);
    result
}
