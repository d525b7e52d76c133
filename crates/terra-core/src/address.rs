//! Bech32 account and validator operator addresses.

use std::fmt;
use std::str::FromStr;

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Human readable prefix of account addresses.
pub const ACC_ADDRESS_PREFIX: &str = "terra";
/// Human readable prefix of validator operator addresses.
pub const VAL_ADDRESS_PREFIX: &str = "terravaloper";

/// Address of an account, e.g. a feeder or a connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccAddress {
    encoded: String,
    bytes: Vec<u8>,
}

/// Operator address of a validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValAddress {
    encoded: String,
    bytes: Vec<u8>,
}

impl AccAddress {
    /// Encode raw address bytes with the account prefix.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let encoded = encode(ACC_ADDRESS_PREFIX, bytes)?;
        Ok(Self {
            encoded,
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The validator operator address sharing the same key bytes.
    pub fn to_val_address(&self) -> Result<ValAddress, CoreError> {
        ValAddress::from_bytes(&self.bytes)
    }
}

impl ValAddress {
    /// Encode raw address bytes with the validator operator prefix.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let encoded = encode(VAL_ADDRESS_PREFIX, bytes)?;
        Ok(Self {
            encoded,
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// The account address sharing the same key bytes.
    pub fn to_acc_address(&self) -> Result<AccAddress, CoreError> {
        AccAddress::from_bytes(&self.bytes)
    }
}

impl FromStr for AccAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode(ACC_ADDRESS_PREFIX, s)?;
        Ok(Self {
            encoded: s.to_ascii_lowercase(),
            bytes,
        })
    }
}

impl FromStr for ValAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode(VAL_ADDRESS_PREFIX, s)?;
        Ok(Self {
            encoded: s.to_ascii_lowercase(),
            bytes,
        })
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Display for ValAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl TryFrom<String> for AccAddress {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for ValAddress {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccAddress> for String {
    fn from(value: AccAddress) -> Self {
        value.encoded
    }
}

impl From<ValAddress> for String {
    fn from(value: ValAddress) -> Self {
        value.encoded
    }
}

fn encode(prefix: &'static str, bytes: &[u8]) -> Result<String, CoreError> {
    let hrp = Hrp::parse(prefix).map_err(|_| CoreError::InvalidAddress(prefix.to_string()))?;
    bech32::encode::<Bech32>(hrp, bytes).map_err(|_| CoreError::InvalidAddress(prefix.to_string()))
}

fn decode(expected: &'static str, s: &str) -> Result<Vec<u8>, CoreError> {
    let (hrp, bytes) = bech32::decode(s).map_err(|_| CoreError::InvalidAddress(s.to_string()))?;

    if !hrp.as_str().eq_ignore_ascii_case(expected) {
        return Err(CoreError::InvalidAddressPrefix {
            expected,
            found: hrp.as_str().to_string(),
        });
    }

    Ok(bytes)
}
