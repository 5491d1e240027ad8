use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use auction_market::api::{ApiError, AuctionApi, BidRequest};
use auction_market::bus::EventBus;
use auction_market::domain::{
    AppEvent, BasketItem, BasketModalSnapshot, BasketSnapshot, Lot, LotId, LotStatus, Order,
    OrderForm, OrderId, OrderResult, Price,
};
use auction_market::render::Renderer;
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

// Sample data for tests

pub fn sample_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

pub fn sample_lot(id: &str, price: Price) -> Lot {
    Lot {
        id: id.to_string(),
        title: format!("Lot {}", id),
        about: "A fine item".to_string(),
        description: None,
        image: format!("/images/{}.png", id),
        status: LotStatus::Active,
        datetime: sample_datetime(),
        price,
        min_price: price,
        history: None,
    }
}

pub fn closed_lot(id: &str, price: Price) -> Lot {
    Lot {
        status: LotStatus::Closed,
        ..sample_lot(id, price)
    }
}

pub fn basket_item(id: &str, price: Price) -> BasketItem {
    BasketItem {
        id: id.to_string(),
        title: format!("Lot {}", id),
        price,
        image: format!("/images/{}.png", id),
        closed: false,
    }
}

pub fn sample_form() -> OrderForm {
    OrderForm {
        email: "bidder@example.com".to_string(),
        phone: "+7(999)123-45-67".to_string(),
    }
}

/// Collect every event crossing the bus.
pub fn capture_events(bus: &Rc<EventBus>) -> Rc<RefCell<Vec<AppEvent>>> {
    let captured = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&captured);
    bus.subscribe_all(move |event| {
        sink.borrow_mut().push(event.clone());
        Ok(())
    });
    captured
}

/// Let spawned local tasks run to completion.
pub async fn drain() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

// Recording render surface

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Catalog(usize),
    Basket(BasketSnapshot),
    BasketModal(BasketModalSnapshot),
    OrderForm,
    FormError(String),
    OrderSuccess(OrderId),
    LotModal(LotId, Price),
    Countdown(LotId),
    CloseModal,
}

pub struct RecordingRenderer {
    calls: RefCell<Vec<RenderCall>>,
}

impl RecordingRenderer {
    pub fn new() -> Rc<Self> {
        Rc::new(RecordingRenderer {
            calls: RefCell::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    pub fn countdown_ticks(&self, id: &str) -> usize {
        self.count(|call| matches!(call, RenderCall::Countdown(lot) if lot == id))
    }

    pub fn lot_modals(&self) -> Vec<(LotId, Price)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                RenderCall::LotModal(id, price) => Some((id.clone(), *price)),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render_catalog(&self, lots: &[Lot]) {
        self.calls.borrow_mut().push(RenderCall::Catalog(lots.len()));
    }

    fn render_basket(&self, snapshot: &BasketSnapshot) {
        self.calls
            .borrow_mut()
            .push(RenderCall::Basket(snapshot.clone()));
    }

    fn render_basket_modal(&self, snapshot: &BasketModalSnapshot) {
        self.calls
            .borrow_mut()
            .push(RenderCall::BasketModal(snapshot.clone()));
    }

    fn render_order_form(&self) {
        self.calls.borrow_mut().push(RenderCall::OrderForm);
    }

    fn render_form_error(&self, message: &str) {
        self.calls
            .borrow_mut()
            .push(RenderCall::FormError(message.to_string()));
    }

    fn render_order_success(&self, order_id: &OrderId) {
        self.calls
            .borrow_mut()
            .push(RenderCall::OrderSuccess(*order_id));
    }

    fn render_lot_modal(&self, lot: &Lot) {
        self.calls
            .borrow_mut()
            .push(RenderCall::LotModal(lot.id.clone(), lot.price));
    }

    fn render_countdown(&self, id: &LotId, _remaining: chrono::Duration) {
        self.calls.borrow_mut().push(RenderCall::Countdown(id.clone()));
    }

    fn close_modal(&self) {
        self.calls.borrow_mut().push(RenderCall::CloseModal);
    }
}

// Programmable in-memory network double

pub struct FakeApi {
    lots: RefCell<HashMap<LotId, Lot>>,
    pub orders: RefCell<Vec<Order>>,
    pub bids: RefCell<Vec<(LotId, Price)>>,
    pub fail_orders: Cell<bool>,
    pub fail_bids: Cell<bool>,
    pub fail_list: Cell<bool>,
}

impl FakeApi {
    pub fn new() -> Rc<Self> {
        Rc::new(FakeApi {
            lots: RefCell::new(HashMap::new()),
            orders: RefCell::new(Vec::new()),
            bids: RefCell::new(Vec::new()),
            fail_orders: Cell::new(false),
            fail_bids: Cell::new(false),
            fail_list: Cell::new(false),
        })
    }

    pub fn with_lots(lots: Vec<Lot>) -> Rc<Self> {
        let api = Self::new();
        for lot in lots {
            api.lots.borrow_mut().insert(lot.id.clone(), lot);
        }
        api
    }

    pub fn lot(&self, id: &str) -> Option<Lot> {
        self.lots.borrow().get(id).cloned()
    }
}

#[async_trait(?Send)]
impl AuctionApi for FakeApi {
    async fn lot_list(&self) -> Result<Vec<Lot>, ApiError> {
        if self.fail_list.get() {
            return Err(ApiError::Server {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        let mut lots: Vec<Lot> = self.lots.borrow().values().cloned().collect();
        lots.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(lots)
    }

    async fn lot_item(&self, id: &LotId) -> Result<Lot, ApiError> {
        self.lots.borrow().get(id).cloned().ok_or(ApiError::Server {
            status: 404,
            body: "lot not found".to_string(),
        })
    }

    async fn place_bid(&self, id: &LotId, bid: BidRequest) -> Result<Lot, ApiError> {
        if self.fail_bids.get() {
            return Err(ApiError::Server {
                status: 500,
                body: "bid rejected".to_string(),
            });
        }
        self.bids.borrow_mut().push((id.clone(), bid.price));

        let mut lots = self.lots.borrow_mut();
        let lot = lots.get_mut(id).ok_or(ApiError::Server {
            status: 404,
            body: "lot not found".to_string(),
        })?;
        lot.price = bid.price;
        lot.history.get_or_insert_with(Vec::new).push(bid.price);
        Ok(lot.clone())
    }

    async fn submit_order(&self, order: &Order) -> Result<OrderResult, ApiError> {
        if self.fail_orders.get() {
            return Err(ApiError::Server {
                status: 500,
                body: "order rejected".to_string(),
            });
        }
        self.orders.borrow_mut().push(order.clone());
        Ok(OrderResult { id: Uuid::new_v4() })
    }
}
