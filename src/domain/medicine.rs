use std::{
    fmt,
    iter::Sum,
    ops::{Add, Mul},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// An amount of money in whole rupees.
///
/// Prices in the pharmacy catalogue have no fractional part, so the amount
/// is stored as an unsigned integer and can never be negative.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupees(u64);

impl Rupees {
    /// Zero rupees.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from a whole number of rupees.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Returns the amount as a whole number of rupees.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

impl Add for Rupees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Rupees {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(u64::from(rhs)))
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Catalogue identifier of a medicine, e.g. `M-101`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(String);

impl MedicineId {
    /// Creates an identifier from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MedicineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MedicineId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl From<&str> for MedicineId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A medicine listed in the pharmacy.
///
/// Medicines come from the seed data and are never mutated. In particular
/// `stock` is informational only: checking out does not decrement it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    /// Unique catalogue identifier.
    pub id: MedicineId,
    /// Display name, including strength (e.g. `Paracetamol 500mg`).
    pub name: String,
    /// What the medicine is used for.
    #[serde(rename = "use")]
    pub usage: String,
    /// Unit price.
    pub price: Rupees,
    /// Units on hand.
    pub stock: u32,
}

impl Medicine {
    /// Whether the medicine can currently be offered for sale.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn rupees_display_uses_symbol() {
        assert_eq!(Rupees::new(68).to_string(), "₹68");
        assert_eq!(Rupees::ZERO.to_string(), "₹0");
    }

    #[test]
    fn rupees_sum_and_multiply() {
        let total: Rupees = [Rupees::new(25) * 2, Rupees::new(18) * 1].into_iter().sum();
        assert_eq!(total, Rupees::new(68));
    }

    #[test_case(0, false; "out of stock")]
    #[test_case(1, true; "last unit")]
    #[test_case(42, true; "plenty")]
    fn availability_follows_stock(stock: u32, expected: bool) {
        let medicine = Medicine {
            id: MedicineId::new("M-1"),
            name: "Test".to_string(),
            usage: "Testing".to_string(),
            price: Rupees::new(1),
            stock,
        };
        assert_eq!(medicine.is_available(), expected);
    }

    #[test]
    fn medicine_id_parse_trims() {
        let id: MedicineId = "  M-101 ".parse().unwrap();
        assert_eq!(id.as_str(), "M-101");
    }
}
