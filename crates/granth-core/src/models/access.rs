use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A price in whole rupees. Zero is not a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(NonZeroU32);

impl Price {
    pub fn rupees(amount: u32) -> Option<Self> {
        NonZeroU32::new(amount).map(Self)
    }

    pub fn amount(&self) -> u32 {
        self.0.get()
    }

    /// Amount in paise, the unit order creation takes.
    pub fn minor_units(&self) -> u64 {
        u64::from(self.0.get()) * 100
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

/// Free/paid gating of a PDF or combo.
///
/// Serialized flat as `accessType` plus, for paid items, `price`, so a paid
/// record without a positive price fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "accessType")]
pub enum Access {
    Free,
    Paid { price: Price },
}

impl Access {
    pub fn paid(price: Price) -> Self {
        Self::Paid { price }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    pub fn price(&self) -> Option<Price> {
        match self {
            Self::Free => None,
            Self::Paid { price } => Some(*price),
        }
    }

    pub fn access_type(&self) -> AccessType {
        match self {
            Self::Free => AccessType::Free,
            Self::Paid { .. } => AccessType::Paid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessType {
    Free,
    Paid,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}
