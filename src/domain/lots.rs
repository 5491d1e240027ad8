// src/domain/lots.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use super::core::{Errors, LotId, LotStatus, Price};
use super::events::AppEvent;
use super::observable::ObservableState;
use crate::bus::EventBus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: LotId,
    pub title: String,
    pub about: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image: String,
    pub status: LotStatus,
    /// The instant the auction ends.
    pub datetime: DateTime<Utc>,
    /// Current (winning) price; equals the last accepted bid, or `min_price`
    /// before any bid has been accepted.
    pub price: Price,
    #[serde(rename = "minPrice")]
    pub min_price: Price,
    /// Accepted bid amounts in order, strictly increasing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Price>>,
}

/// State machine for a single open lot.
///
/// States are `wait -> active -> closed`; the transitions themselves are
/// driven by an external auction-clock feed through `update_status`.
/// `closed` is terminal for bidding.
pub struct LotMachine {
    state: ObservableState<Lot>,
}

impl LotMachine {
    pub fn new(lot: Lot, events: Rc<EventBus>) -> Self {
        LotMachine {
            state: ObservableState::new(lot, events),
        }
    }

    pub fn lot(&self) -> &Lot {
        self.state.get()
    }

    /// Apply a bid. Ties are rejected: a bid must strictly exceed the
    /// current price, which keeps `history` strictly increasing. Bidding on
    /// a closed lot is rejected outright.
    ///
    /// On success the price moves, the amount is appended to `history`
    /// (created on the first bid), and `lot:bid` is announced.
    pub fn place_bid(&mut self, amount: Price) -> Result<(), Errors> {
        let lot = self.state.get();
        if lot.status == LotStatus::Closed {
            return Err(Errors::LotClosed(lot.id.clone()));
        }
        if amount <= lot.price {
            return Err(Errors::BidTooLow {
                bid: amount,
                current: lot.price,
            });
        }

        self.state.emit_changes(
            |lot| {
                lot.price = amount;
                lot.history.get_or_insert_with(Vec::new).push(amount);
            },
            |lot| AppEvent::LotBidAccepted {
                id: lot.id.clone(),
                price: lot.price,
            },
        );
        Ok(())
    }

    /// Transition the auction status unconditionally and announce
    /// `lot:status`. Callers are trusted to drive the ordering.
    pub fn update_status(&mut self, status: LotStatus) {
        self.state.emit_changes(
            |lot| lot.status = status,
            |lot| AppEvent::LotStatusChanged {
                id: lot.id.clone(),
                status: lot.status,
            },
        );
    }
}
