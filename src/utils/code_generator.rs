//! Short code generation and validation utilities.
//!
//! Generated codes are drawn uniformly from a base-36 alphabet. Uniqueness is
//! not checked here: the link store enforces it, and callers regenerate on
//! conflict.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Alphabet for generated codes (base-36, upper case).
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 5;

/// Maximum length of any short code, generated or custom.
pub const MAX_CODE_LENGTH: usize = 8;

/// Codes that would shadow API routes and cannot be used as short links.
const RESERVED_CODES: &[&str] = &["links", "health"];

/// Generates a random short code of `length` characters.
///
/// `length` is clamped to `1..=MAX_CODE_LENGTH` so the result always passes
/// [`is_valid_code`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(5);
/// assert_eq!(code.len(), 5);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code(length: usize) -> String {
    let length = length.clamp(1, MAX_CODE_LENGTH);
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Format rule shared by generated and custom codes: 1-8 ASCII alphanumerics.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-8 characters
/// - Allowed characters: ASCII letters and digits
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Custom code must be 1-8 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !is_valid_code(code) {
        return Err(AppError::bad_request(
            "Custom code can only contain letters and digits",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_default_length() {
        let code = generate_code(DEFAULT_CODE_LENGTH);
        assert_eq!(code.len(), 5);
    }

    #[test]
    fn test_generate_code_uses_alphabet() {
        for _ in 0..200 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
            assert!(is_valid_code(&code));
        }
    }

    #[test]
    fn test_generate_code_clamps_length() {
        assert_eq!(generate_code(0).len(), 1);
        assert_eq!(generate_code(42).len(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_spreads_over_space() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code(8)).collect();
        // 36^8 possibilities; a handful of collisions would still be suspicious.
        assert!(codes.len() > 995);
    }

    #[test]
    fn test_is_valid_code_bounds() {
        assert!(is_valid_code("a"));
        assert!(is_valid_code("A1b2C3d4"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("abcdefghi"));
    }

    #[test]
    fn test_is_valid_code_rejects_symbols() {
        assert!(!is_valid_code("ab-cd"));
        assert!(!is_valid_code("ab_cd"));
        assert!(!is_valid_code("ab cd"));
        assert!(!is_valid_code("héllo"));
    }

    #[test]
    fn test_validate_custom_code_accepts_mixed_case() {
        assert!(validate_custom_code("MyLink1").is_ok());
    }

    #[test]
    fn test_validate_custom_code_too_long() {
        let err = validate_custom_code("toolong123").unwrap_err();
        assert!(err.to_string().contains("1-8 characters"));
    }

    #[test]
    fn test_validate_custom_code_empty() {
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_custom_code_special_characters() {
        let err = validate_custom_code("my_code").unwrap_err();
        assert!(err.to_string().contains("letters and digits"));
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            let result = validate_custom_code(reserved);
            assert!(
                result.is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
    }
}
