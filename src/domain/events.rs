// src/domain/events.rs
use super::basket::BasketItem;
use super::core::{LotId, LotStatus, Price, Tab};
use super::lots::Lot;
use super::orders::{OrderForm, OrderId};

/// The complete event vocabulary of the application.
///
/// Every message that crosses the bus is one of these variants, so handlers
/// pattern-match instead of downcasting a string-keyed payload. The string
/// names returned by [`AppEvent::name`] exist for pattern subscription and
/// audit logging only.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    CatalogLoading,
    CatalogLoaded { lots: Vec<Lot> },
    CatalogError { message: String },

    /// UI: a lot card's buy button, carrying the snapshot to add.
    LotBuy { item: BasketItem },
    /// UI: a lot card was opened for detail.
    LotDetails { id: LotId },
    /// UI: a basket row was opened for detail.
    LotOpen { id: LotId },
    /// UI: the lot modal's close button.
    LotClose,
    /// UI: the bid form was submitted.
    LotBid { lot_id: LotId, amount: Price },
    /// Lot machine: a bid passed validation and was applied.
    LotBidAccepted { id: LotId, price: Price },
    /// Lot machine: the auction status transitioned.
    LotStatusChanged { id: LotId, status: LotStatus },
    LotError { message: String },

    /// Basket machine: contents or total changed, full snapshot attached.
    BasketChanged { items: Vec<BasketItem>, total: Price },
    BasketClick,
    BasketSwitchTab { tab: Tab },
    BasketClose,
    /// UI: the checkout button; the order form is presented in response.
    BasketCheckout,
    /// UI: the completed order form was submitted.
    OrderSubmit { form: OrderForm },
    OrderPlaced { id: OrderId },

    AppReset,
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::CatalogLoading => "catalog:loading",
            AppEvent::CatalogLoaded { .. } => "catalog:loaded",
            AppEvent::CatalogError { .. } => "catalog:error",
            AppEvent::LotBuy { .. } => "lot:buy",
            AppEvent::LotDetails { .. } => "lot:details",
            AppEvent::LotOpen { .. } => "lot:open",
            AppEvent::LotClose => "lot:close",
            AppEvent::LotBid { .. } => "lot:place-bid",
            AppEvent::LotBidAccepted { .. } => "lot:bid",
            AppEvent::LotStatusChanged { .. } => "lot:status",
            AppEvent::LotError { .. } => "lot:error",
            AppEvent::BasketChanged { .. } => "basket:changed",
            AppEvent::BasketClick => "basket:click",
            AppEvent::BasketSwitchTab { .. } => "basket:switch-tab",
            AppEvent::BasketClose => "basket:close",
            AppEvent::BasketCheckout => "basket:checkout",
            AppEvent::OrderSubmit { .. } => "order:submit",
            AppEvent::OrderPlaced { .. } => "order:placed",
            AppEvent::AppReset => "app:reset",
        }
    }
}
