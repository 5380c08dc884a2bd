//! Form Validation
//!
//! Field presence and format checks; messages are shown inline.

pub type FieldResult = Result<(), String>;

pub fn required(label: &str, value: &str) -> FieldResult {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

/// Loose address check: one `@`, non-empty local part, dotted domain
pub fn email(value: &str) -> FieldResult {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid { Ok(()) } else { Err("Enter a valid email address".to_string()) }
}

/// Ten-digit mobile number; spaces, dashes and a +91 prefix are tolerated
pub fn phone(value: &str) -> FieldResult {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix("+91").unwrap_or(trimmed);
    let digits: String = trimmed.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Phone number must have 10 digits".to_string())
    }
}

pub fn password(value: &str) -> FieldResult {
    if value.chars().count() >= 6 {
        Ok(())
    } else {
        Err("Password must be at least 6 characters".to_string())
    }
}

/// Parse an amount that must be greater than zero
pub fn positive_amount(label: &str, value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(format!("{} must be a positive number", label)),
    }
}

/// Parse an optional non-negative amount; blank means zero
pub fn optional_amount(label: &str, value: &str) -> Result<f64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("{} must be zero or more", label)),
    }
}

pub fn non_negative_int(label: &str, value: &str) -> Result<i64, String> {
    match value.trim().parse::<i64>() {
        Ok(v) if v >= 0 => Ok(v),
        _ => Err(format!("{} must be a whole number", label)),
    }
}

/// First error among the checks
pub fn first_error(checks: impl IntoIterator<Item = FieldResult>) -> FieldResult {
    checks.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required("Name", "Asha").is_ok());
        assert_eq!(required("Name", "   "), Err("Name is required".to_string()));
    }

    #[test]
    fn test_email() {
        assert!(email("owner@shop.in").is_ok());
        assert!(email(" a.b@mail.example.com ").is_ok());
        assert!(email("owner@shop").is_err());
        assert!(email("@shop.in").is_err());
        assert!(email("a@@shop.in").is_err());
        assert!(email("a b@shop.in").is_err());
        assert!(email("owner@shop.").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(phone("9876543210").is_ok());
        assert!(phone("+91 98765-43210").is_ok());
        assert!(phone("98765").is_err());
        assert!(phone("98765abcde").is_err());
    }

    #[test]
    fn test_amounts() {
        assert_eq!(positive_amount("Price", "12.50"), Ok(12.5));
        assert!(positive_amount("Price", "0").is_err());
        assert!(positive_amount("Price", "abc").is_err());
        assert_eq!(optional_amount("Labour", ""), Ok(0.0));
        assert!(optional_amount("Labour", "-3").is_err());
        assert_eq!(non_negative_int("Stock", "7"), Ok(7));
        assert!(non_negative_int("Stock", "-1").is_err());
        assert!(non_negative_int("Stock", "1.5").is_err());
    }

    #[test]
    fn test_first_error_and_password() {
        assert!(password("secret").is_ok());
        assert!(password("abc").is_err());
        let result = first_error([required("Name", "x"), phone("1"), password("")]);
        assert_eq!(result, Err("Phone number must have 10 digits".to_string()));
    }
}
