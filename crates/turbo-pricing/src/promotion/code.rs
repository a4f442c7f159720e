//! Normalized promotion codes.

use serde::Serialize;
use std::fmt;

/// A promotion code in canonical form: trimmed and uppercased.
///
/// Two codes entered as `" Save20 "` and `"SAVE20"` normalize to the same
/// value, so equality on `PromotionCode` is case-insensitive equality on
/// what the customer typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PromotionCode(String);

impl PromotionCode {
    /// Normalize a raw code. Returns `None` for blank input.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromotionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PromotionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_whitespace() {
        let a = PromotionCode::normalize("SAVE20").unwrap();
        let b = PromotionCode::normalize("save20").unwrap();
        let c = PromotionCode::normalize(" Save20 ").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(c.as_str(), "SAVE20");
    }

    #[test]
    fn test_blank_is_none() {
        assert_eq!(PromotionCode::normalize(""), None);
        assert_eq!(PromotionCode::normalize("  \t "), None);
    }
}
