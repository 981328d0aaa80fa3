//! Request field validators.
//!
//! Pure predicates used by registration and profile handlers. Error
//! messages are user-facing and therefore in Norwegian, matching the rest
//! of the product surface.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern"));

static NORWEGIAN_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+47)?[2-9]\d{7}$").expect("invalid phone pattern"));

const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Loose shape check plus the RFC length cap.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email) && email.chars().count() <= 254
}

/// Norwegian subscriber numbers: optional +47 prefix, then eight digits of
/// which the first is 2-9. Spaces and hyphens are ignored.
pub fn is_valid_norwegian_phone(phone: &str) -> bool {
    let cleaned: String = phone.chars().filter(|c| *c != ' ' && *c != '-').collect();
    NORWEGIAN_PHONE_RE.is_match(&cleaned)
}

/// Result of a password strength check. One message per failed rule so the
/// caller can surface all of them at once.
#[derive(Debug, Clone)]
pub struct PasswordStrength {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check a password against the strength rules. Accumulates errors instead
/// of short-circuiting.
pub fn check_password_strength(password: &str) -> PasswordStrength {
    let mut errors = Vec::new();
    if password.chars().count() < 8 {
        errors.push("Passordet må være minst 8 tegn".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Passordet må inneholde minst én stor bokstav".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Passordet må inneholde minst én liten bokstav".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Passordet må inneholde minst ett tall".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        errors.push("Passordet må inneholde minst ett spesialtegn".to_string());
    }
    PasswordStrength {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user @example.com"));
    }

    #[test]
    fn test_email_length_cap() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(!is_valid_email(&long));
    }

    #[test]
    fn test_valid_norwegian_phones() {
        assert!(is_valid_norwegian_phone("+4791234567"));
        assert!(is_valid_norwegian_phone("91234567"));
        assert!(is_valid_norwegian_phone("+47 912 34 567"));
        assert!(is_valid_norwegian_phone("912-34-567"));
    }

    #[test]
    fn test_invalid_norwegian_phones() {
        assert!(!is_valid_norwegian_phone("1234567")); // too short
        assert!(!is_valid_norwegian_phone("123456789")); // too long
        assert!(!is_valid_norwegian_phone("01234567")); // leading zero
        assert!(!is_valid_norwegian_phone("+4601234567")); // wrong prefix
    }

    #[test]
    fn test_strong_password() {
        let result = check_password_strength("SecureP@ss123");
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_short_password() {
        let result = check_password_strength("Short1!");
        assert!(!result.valid);
        assert!(result
            .errors
            .contains(&"Passordet må være minst 8 tegn".to_string()));
    }

    #[test]
    fn test_missing_digit_reports_exactly_the_digit_rule() {
        let result = check_password_strength("NoNumbers!");
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Passordet må inneholde minst ett tall"]);
    }

    #[test]
    fn test_missing_character_classes() {
        assert!(!check_password_strength("lowercase123!").valid);
        assert!(!check_password_strength("UPPERCASE123!").valid);
        assert!(!check_password_strength("NoSpecial123").valid);
    }
}
