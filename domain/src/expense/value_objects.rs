//! Expense value objects: identifiers, lifecycle status and money amounts.

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identifier of an expense record
    ExpenseId
);
id_type!(
    /// Identifier of an expense category
    CategoryId
);
id_type!(
    /// Identifier of a user (employee or manager)
    UserId
);

/// Lifecycle status of an expense.
///
/// `Draft → Submitted → Approved | Rejected`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 4] = [
        ExpenseStatus::Draft,
        ExpenseStatus::Submitted,
        ExpenseStatus::Approved,
        ExpenseStatus::Rejected,
    ];

    pub fn id(&self) -> i64 {
        match self {
            ExpenseStatus::Draft => 1,
            ExpenseStatus::Submitted => 2,
            ExpenseStatus::Approved => 3,
            ExpenseStatus::Rejected => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Draft => "Draft",
            ExpenseStatus::Submitted => "Submitted",
            ExpenseStatus::Approved => "Approved",
            ExpenseStatus::Rejected => "Rejected",
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name))
    }

    /// Whether a manager decision (approve/reject) is still possible.
    pub fn awaits_review(&self) -> bool {
        matches!(self, ExpenseStatus::Submitted)
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Money amount in GBP, held as integer pence.
///
/// Serialized as a JSON number (`42.5`); decoded from either a number or a
/// decimal string with at most two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_pence(pence: i64) -> Self {
        Self(pence)
    }

    pub fn pence(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Parse a plain decimal such as `42`, `42.5` or `42.50`.
    pub fn parse_decimal(input: &str) -> Result<Self, DomainError> {
        let s = input.trim();
        let invalid = || DomainError::InvalidAmount(format!("'{}' is not a valid amount", input));

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(DomainError::InvalidAmount(format!(
                "'{}' has more than two decimal places",
                input
            )));
        }

        let pounds: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let pence: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        pounds
            .checked_mul(100)
            .and_then(|p| p.checked_add(pence))
            .map(Amount)
            .ok_or_else(invalid)
    }

    /// Decode from a JSON number or decimal string.
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::Number(n) => {
                if let Some(whole) = n.as_i64() {
                    whole.checked_mul(100).map(Amount).ok_or_else(|| {
                        DomainError::InvalidAmount(format!("'{}' is out of range", n))
                    })
                } else if n.as_f64().is_some_and(|f| f < 0.0) {
                    Err(DomainError::InvalidAmount(
                        "Amount must be greater than zero.".to_string(),
                    ))
                } else {
                    Self::parse_decimal(&n.to_string())
                }
            }
            Value::String(s) => Self::parse_decimal(s),
            other => Err(DomainError::InvalidAmount(format!(
                "expected a number, got {}",
                other
            ))),
        }
    }

    /// Decode an amount that must be strictly positive.
    pub fn positive_from_json(value: &Value) -> Result<Self, DomainError> {
        let amount = Self::from_json(value)?;
        if !amount.is_positive() {
            return Err(DomainError::InvalidAmount(
                "Amount must be greater than zero.".to_string(),
            ));
        }
        Ok(amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        Amount(iter.map(|a| a.0).sum())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Amount::from_json(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_lookup() {
        assert_eq!(ExpenseStatus::from_id(2), Some(ExpenseStatus::Submitted));
        assert_eq!(ExpenseStatus::from_id(9), None);
        assert_eq!(
            ExpenseStatus::from_name(" approved "),
            Some(ExpenseStatus::Approved)
        );
        assert_eq!(ExpenseStatus::from_name("pending"), None);
        assert!(ExpenseStatus::Submitted.awaits_review());
        assert!(!ExpenseStatus::Draft.awaits_review());
    }

    #[test]
    fn test_amount_parse_decimal() {
        assert_eq!(Amount::parse_decimal("42.50").unwrap().pence(), 4250);
        assert_eq!(Amount::parse_decimal("42.5").unwrap().pence(), 4250);
        assert_eq!(Amount::parse_decimal("42").unwrap().pence(), 4200);
        assert_eq!(Amount::parse_decimal(".99").unwrap().pence(), 99);
        assert!(Amount::parse_decimal("42.505").is_err());
        assert!(Amount::parse_decimal("-1").is_err());
        assert!(Amount::parse_decimal("abc").is_err());
        assert!(Amount::parse_decimal("").is_err());
        assert!(Amount::parse_decimal(".").is_err());
    }

    #[test]
    fn test_amount_from_json() {
        assert_eq!(Amount::from_json(&json!(120)).unwrap().pence(), 12000);
        assert_eq!(Amount::from_json(&json!(99.5)).unwrap().pence(), 9950);
        assert_eq!(Amount::from_json(&json!("19.20")).unwrap().pence(), 1920);
        assert!(Amount::from_json(&json!(true)).is_err());
        assert!(Amount::from_json(&json!(null)).is_err());
    }

    #[test]
    fn test_positive_amount_required() {
        assert!(Amount::positive_from_json(&json!(0)).is_err());
        assert!(Amount::positive_from_json(&json!("0.00")).is_err());
        assert!(Amount::positive_from_json(&json!(-5)).is_err());
        assert!(Amount::positive_from_json(&json!(-5.5)).is_err());
        assert!(Amount::positive_from_json(&json!(0.01)).is_ok());
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::from_pence(4250).to_string(), "42.50");
        assert_eq!(Amount::from_pence(5).to_string(), "0.05");
        assert_eq!(Amount::from_pence(-1_999).to_string(), "-19.99");
    }

    #[test]
    fn test_amount_serializes_as_number() {
        assert_eq!(serde_json::to_value(Amount::from_pence(4250)).unwrap(), json!(42.5));
        let parsed: Amount = serde_json::from_value(json!("7.25")).unwrap();
        assert_eq!(parsed.pence(), 725);
    }
}
