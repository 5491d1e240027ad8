// src/domain/core.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type LotId = String;
pub type Price = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotStatus {
    Wait,
    Active,
    Closed,
}

impl fmt::Display for LotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotStatus::Wait => write!(f, "wait"),
            LotStatus::Active => write!(f, "active"),
            LotStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for LotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wait" => Ok(LotStatus::Wait),
            "active" => Ok(LotStatus::Active),
            "closed" => Ok(LotStatus::Closed),
            _ => Err(format!("Unknown lot status: {}", s)),
        }
    }
}

impl Serialize for LotStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LotStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        LotStatus::from_str(&text).map_err(serde::de::Error::custom)
    }
}

/// Which subset of basket items the modal presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Active,
    Closed,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Active => write!(f, "active"),
            Tab::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Tab::Active),
            "closed" => Ok(Tab::Closed),
            _ => Err(format!("Unknown basket tab: {}", s)),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Errors {
    #[error("Unknown lot: {0}")]
    UnknownLot(LotId),

    #[error("Bid of {bid} must exceed the current price {current}")]
    BidTooLow { bid: Price, current: Price },

    #[error("Lot has closed: {0}")]
    LotClosed(LotId),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid phone: {0}")]
    InvalidPhone(String),

    #[error("Order has no items")]
    EmptyOrder,
}
