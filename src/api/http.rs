// src/api/http.rs
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiError, AuctionApi, BidRequest};
use crate::domain::{Lot, LotId, Order, OrderResult};

/// List envelope returned by the lot endpoint.
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[allow(dead_code)]
    total: u64,
    items: Vec<Lot>,
}

pub struct HttpAuctionApi {
    base_url: String,
    cdn_url: String,
    client: Client,
}

impl HttpAuctionApi {
    pub fn new(base_url: &str, cdn_url: &str) -> Self {
        HttpAuctionApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Image references come back relative to the content CDN.
    fn resolve_image(&self, lot: &mut Lot) {
        if !lot.image.starts_with("http") {
            let separator = if lot.image.starts_with('/') { "" } else { "/" };
            lot.image = format!("{}{}{}", self.cdn_url, separator, lot.image);
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Error payloads carry a JSON `error` field when the server got
            // that far; fall back to the raw body.
            let body = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|value| value.get("error")?.as_str().map(str::to_string))
                .unwrap_or(body);
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait(?Send)]
impl AuctionApi for HttpAuctionApi {
    async fn lot_list(&self) -> Result<Vec<Lot>, ApiError> {
        let response = self.client.get(self.url("/lot")).send().await?;
        let list: ListResponse = Self::parse(response).await?;

        let mut lots = list.items;
        for lot in &mut lots {
            self.resolve_image(lot);
        }
        Ok(lots)
    }

    async fn lot_item(&self, id: &LotId) -> Result<Lot, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/lot/{}", id)))
            .send()
            .await?;
        let mut lot: Lot = Self::parse(response).await?;
        self.resolve_image(&mut lot);
        Ok(lot)
    }

    async fn place_bid(&self, id: &LotId, bid: BidRequest) -> Result<Lot, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/lot/{}/bid", id)))
            .json(&bid)
            .send()
            .await?;
        let mut lot: Lot = Self::parse(response).await?;
        self.resolve_image(&mut lot);
        Ok(lot)
    }

    async fn submit_order(&self, order: &Order) -> Result<OrderResult, ApiError> {
        let response = self
            .client
            .post(self.url("/order"))
            .json(order)
            .send()
            .await?;
        Self::parse(response).await
    }
}
