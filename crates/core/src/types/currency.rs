//! ISO 4217 currency codes.

use serde::{Deserialize, Serialize};

/// Currency attached to order totals.
///
/// Amounts themselves are `rust_decimal::Decimal` values in the
/// currency's standard unit (rupees, not paise). The default is INR,
/// the storefront's home currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// The ISO 4217 code as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_inr() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::INR);
    }

    #[test]
    fn test_serde_uses_code() {
        #[allow(clippy::unwrap_used)]
        let json = serde_json::to_string(&CurrencyCode::INR).unwrap();
        assert_eq!(json, "\"INR\"");
    }
}
