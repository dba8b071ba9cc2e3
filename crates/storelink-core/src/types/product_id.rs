//! Canonical product identifier.
//!
//! A product id is exactly 12 ASCII alphanumeric characters, stored uppercase.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of every canonical product id
pub const PRODUCT_ID_LEN: usize = 12;

/// Canonical 12-character package identifier, always uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Parse a bare identifier, accepting any letter case
    pub fn parse(input: &str) -> StoreResult<Self> {
        if Self::is_valid(input) {
            Ok(Self(input.to_ascii_uppercase()))
        } else {
            Err(StoreError::InvalidInput {
                input: input.to_string(),
            })
        }
    }

    /// Check whether `input` has the shape of a product id (case-insensitive)
    pub fn is_valid(input: &str) -> bool {
        input.len() == PRODUCT_ID_LEN && input.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
