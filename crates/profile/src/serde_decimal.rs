// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Serde helpers that write big integers as decimal strings.
//!
//! Device configuration layers consume these values as text, and JSON numbers
//! cannot hold 64 bit and larger values without losing precision.

use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_str_radix(10))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    BigInt::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal integer '{s}'")))
}

/// Same as the parent module for `Vec<BigInt>`.
pub mod vec {
    use num_bigint::BigInt;
    use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(values: &[BigInt], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_str_radix(10))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<BigInt>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings: Vec<String> = Deserialize::deserialize(deserializer)?;
        strings
            .into_iter()
            .map(|s| {
                BigInt::parse_bytes(s.as_bytes(), 10).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid decimal integer '{s}'"))
                })
            })
            .collect()
    }
}

/// Same as the parent module for `Option<BigInt>`.
pub mod option {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<BigInt>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(&value.to_str_radix(10)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigInt>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let maybe: Option<String> = Deserialize::deserialize(deserializer)?;
        maybe
            .map(|s| {
                BigInt::parse_bytes(s.as_bytes(), 10).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid decimal integer '{s}'"))
                })
            })
            .transpose()
    }
}
