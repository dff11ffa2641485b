/// Format an amount as Indian rupees with lakh/crore digit grouping.
///
/// Always two decimals. Non-finite input renders as zero.
///
/// ```
/// use fleetpulse_domain::currency::format_inr;
///
/// assert_eq!(format_inr(1234567.5), "₹12,34,567.50");
/// assert_eq!(format_inr(f64::NAN), "₹0.00");
/// ```
pub fn format_inr(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let paise = (value.abs() * 100.0).round() as u128;
    let rupees = (paise / 100).to_string();
    let fraction = paise % 100;

    let grouped = group_indian(&rupees);
    let sign = if value < 0.0 && paise != 0 { "-" } else { "" };
    format!("{sign}₹{grouped}.{fraction:02}")
}

/// Last three digits form one group; everything before is grouped in pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    let lead = head.len() % 2;
    if lead == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[lead..].chunks(2).enumerate() {
        if i > 0 || lead == 1 {
            out.push(',');
        }
        out.extend(pair.iter().map(|b| *b as char));
    }
    out.push(',');
    out.push_str(tail);
    out
}
