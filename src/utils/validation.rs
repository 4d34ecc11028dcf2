// Request field checks shared by the services.

pub const MOBILE_NUMBER_LENGTH: usize = 11;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// An email is accepted as long as it contains an `@`.
pub fn is_email_shaped(email: Option<&str>) -> bool {
    email.map_or(false, |e| e.contains('@'))
}

pub fn is_valid_mobile_number(mobile_no: Option<&str>) -> bool {
    mobile_no.map_or(false, |m| m.chars().count() == MOBILE_NUMBER_LENGTH)
}

pub fn is_valid_password(password: Option<&str>) -> bool {
    password.map_or(false, |p| p.chars().count() >= MIN_PASSWORD_LENGTH)
}

/// Reads a price bound sent either as a JSON number or a numeric string.
pub fn parse_price(value: Option<&serde_json::Value>) -> Option<f64> {
    let parsed = match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Treats missing and whitespace-only strings alike.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
