//! Price scalars, in integer ticks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A price in integer ticks. Tick size and currency are reference data of
/// the excluded front-end layers; inside the engine a price is only ever
/// compared, never arithmetically combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Price(pub u64);

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One mass-quote leg: a size offered at a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceWithSize {
    pub price: Price,
    pub size: u64,
}

impl PriceWithSize {
    #[must_use]
    pub fn new(price: Price, size: u64) -> Self {
        Self { price, size }
    }
}

impl fmt::Display for PriceWithSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.size, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_order_numerically() {
        assert!(Price(9) < Price(10));
        assert!(Price(10) == Price(10));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", PriceWithSize::new(Price(15), 10)), "10@15");
    }

    #[test]
    fn serde_roundtrip() {
        let p = PriceWithSize::new(Price(15), 10);
        let json = serde_json::to_string(&p).unwrap();
        let back: PriceWithSize = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
