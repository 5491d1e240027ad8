// src/api/mod.rs
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Lot, LotId, Order, OrderResult, Price};

pub use http::HttpAuctionApi;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRequest {
    pub price: Price,
}

/// Contract of the backing auction service. Calls are asynchronous, resume
/// on the same single-threaded loop, and may fail with a transport or
/// validation error; there is no cancellation token for an in-flight call.
#[async_trait(?Send)]
pub trait AuctionApi {
    async fn lot_list(&self) -> Result<Vec<Lot>, ApiError>;

    async fn lot_item(&self, id: &LotId) -> Result<Lot, ApiError>;

    /// Returns the lot as the server sees it after applying the bid.
    async fn place_bid(&self, id: &LotId, bid: BidRequest) -> Result<Lot, ApiError>;

    async fn submit_order(&self, order: &Order) -> Result<OrderResult, ApiError>;
}
