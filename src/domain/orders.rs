// src/domain/orders.rs
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use super::core::{Errors, LotId};

pub type OrderId = Uuid;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

// Phone numbers arrive pre-masked by the form surface: +7(999)123-45-67.
fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+7\(\d{3}\)\d{3}-\d{2}-\d{2}$").unwrap())
}

/// Contact fields collected by the order form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub email: String,
    pub phone: String,
}

impl OrderForm {
    pub fn validate(&self) -> Result<(), Errors> {
        if !email_pattern().is_match(&self.email) {
            return Err(Errors::InvalidEmail(self.email.clone()));
        }
        if !phone_pattern().is_match(&self.phone) {
            return Err(Errors::InvalidPhone(self.phone.clone()));
        }
        Ok(())
    }

    /// Validate and combine with the basket's item ids into a submittable
    /// order.
    pub fn into_order(self, items: Vec<LotId>) -> Result<Order, Errors> {
        self.validate()?;
        if items.is_empty() {
            return Err(Errors::EmptyOrder);
        }
        Ok(Order {
            email: self.email,
            phone: self.phone,
            items,
        })
    }
}

/// Created only at checkout submission; not persisted beyond the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub email: String,
    pub phone: String,
    pub items: Vec<LotId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: OrderId,
}
