//! Coins and decimals as transmitted by the LCD.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Denomination of a native asset, e.g. `uluna` or `ukrw`.
pub type Denom = String;

/// Fixed-point decimal. Travels as a JSON string to avoid float precision loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(Decimal);

impl Dec {
    pub const ZERO: Dec = Dec(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Sum of two decimals, `None` on overflow.
    pub fn checked_add(self, rhs: Dec) -> Option<Dec> {
        self.0.checked_add(rhs.0).map(Dec)
    }
}

impl From<Decimal> for Dec {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<u64> for Dec {
    fn from(value: u64) -> Self {
        Self(Decimal::from(value))
    }
}

/// Rejects values needing more than 28 significant digits instead of
/// rounding them, so every accepted string prints back with its scale.
impl FromStr for Dec {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value =
            Decimal::from_str(trimmed).map_err(|_| CoreError::InvalidDecimal(s.to_string()))?;

        let fraction_digits = trimmed
            .split_once('.')
            .map(|(_, fraction)| fraction.chars().filter(char::is_ascii_digit).count())
            .unwrap_or(0);
        if fraction_digits != value.scale() as usize {
            return Err(CoreError::InvalidDecimal(s.to_string()));
        }

        Ok(Dec(value))
    }
}

/// Keeps the scale it was parsed with, so `"0.002500000000000000"` prints back unchanged.
impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DecVisitor;

        impl Visitor<'_> for DecVisitor {
            type Value = Dec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Dec, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Dec, E> {
                Ok(Dec(Decimal::from(v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Dec, E> {
                Ok(Dec(Decimal::from(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Dec, E> {
                Decimal::try_from(v)
                    .map(Dec)
                    .map_err(|_| E::custom(CoreError::InvalidDecimal(v.to_string())))
            }
        }

        deserializer.deserialize_any(DecVisitor)
    }
}

/// An amount of a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Dec,
}

impl Coin {
    pub fn new(denom: impl Into<Denom>, amount: impl Into<Dec>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// Parses the compact `<amount><denom>` form, e.g. `3500.12ukrw`.
impl FromStr for Coin {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| CoreError::InvalidCoin(s.to_string()))?;
        let (amount, denom) = s.split_at(split);

        if amount.is_empty() || !denom.chars().all(|c| c.is_ascii_alphanumeric() || c == '/') {
            return Err(CoreError::InvalidCoin(s.to_string()));
        }

        let amount = amount
            .parse()
            .map_err(|_| CoreError::InvalidCoin(s.to_string()))?;

        Ok(Coin {
            denom: denom.to_string(),
            amount,
        })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins holding at most one entry per denomination.
///
/// Encoded as a JSON array of coins ordered by denomination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coins {
    coins: BTreeMap<Denom, Coin>,
}

impl Coins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coin, summing with any existing amount of the same denomination.
    ///
    /// Fails, leaving the set unchanged, if the sum overflows.
    pub fn add(&mut self, coin: Coin) -> Result<(), CoreError> {
        match self.coins.get_mut(&coin.denom) {
            Some(existing) => {
                existing.amount = existing
                    .amount
                    .checked_add(coin.amount)
                    .ok_or_else(|| CoreError::InvalidCoin(coin.to_string()))?;
            }
            None => {
                self.coins.insert(coin.denom.clone(), coin);
            }
        }
        Ok(())
    }

    /// Build a set from coins, summing duplicate denominations.
    pub fn try_from_coins<I: IntoIterator<Item = Coin>>(coins: I) -> Result<Self, CoreError> {
        let mut set = Coins::new();
        for coin in coins {
            set.add(coin)?;
        }
        Ok(set)
    }

    /// Get the coin of a denomination, if present.
    pub fn get(&self, denom: &str) -> Option<&Coin> {
        self.coins.get(denom)
    }

    pub fn denoms(&self) -> impl Iterator<Item = &Denom> {
        self.coins.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.coins.values()
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

impl IntoIterator for Coins {
    type Item = Coin;
    type IntoIter = std::collections::btree_map::IntoValues<Denom, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.coins.into_values()
    }
}

/// Parses a comma-separated coin list, e.g. `0.015uluna,0.1ukrw`.
impl FromStr for Coins {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coins = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Coin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Coins::try_from_coins(coins)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

impl Serialize for Coins {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for Coins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let coins = Vec::<Coin>::deserialize(deserializer)?;
        Coins::try_from_coins(coins).map_err(de::Error::custom)
    }
}
