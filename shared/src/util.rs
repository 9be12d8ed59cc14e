use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's date in the server's local time zone
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Format a price as a whole number with thousands separators (`#,###`)
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round();
    let digits = rounded.abs().trunc().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Five-star rating string with one filled star per whole point
pub fn star_string(avg_score: f64) -> String {
    let filled = avg_score.floor().clamp(0.0, 5.0).to_usize().unwrap_or(0);
    let mut stars = "★".repeat(filled);
    stars.push_str(&"☆".repeat(5 - filled));
    stars
}
