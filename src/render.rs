// src/render.rs
use chrono::Duration;
use log::info;

use crate::domain::{BasketModalSnapshot, BasketSnapshot, Lot, LotId, OrderId};

/// Capability interface of the presentation layer.
///
/// Each method accepts a typed snapshot and is responsible purely for
/// presentation; the core never inspects what the surface does with it.
/// Views hand UI-origin events back through the bus, never by calling the
/// state machines.
pub trait Renderer {
    fn render_catalog(&self, lots: &[Lot]);

    /// The always-visible basket badge/list.
    fn render_basket(&self, snapshot: &BasketSnapshot);

    fn render_basket_modal(&self, snapshot: &BasketModalSnapshot);

    fn render_order_form(&self);

    /// Inline form error, for validation and checkout failures.
    fn render_form_error(&self, message: &str);

    fn render_order_success(&self, order_id: &OrderId);

    fn render_lot_modal(&self, lot: &Lot);

    /// Countdown tick for the open lot modal.
    fn render_countdown(&self, id: &LotId, remaining: Duration);

    fn close_modal(&self);
}

/// Remaining time the way the lot modal displays it.
pub fn format_time_left(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;
    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

/// Log-backed rendering surface.
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render_catalog(&self, lots: &[Lot]) {
        info!("catalog: {} lots", lots.len());
    }

    fn render_basket(&self, snapshot: &BasketSnapshot) {
        info!(
            "basket: {} items, total {}",
            snapshot.items.len(),
            snapshot.total
        );
    }

    fn render_basket_modal(&self, snapshot: &BasketModalSnapshot) {
        info!(
            "basket modal [{}]: {} of {} items, total {}",
            snapshot.current_tab,
            snapshot.tab_items().len(),
            snapshot.items.len(),
            snapshot.total
        );
    }

    fn render_order_form(&self) {
        info!("order form presented");
    }

    fn render_form_error(&self, message: &str) {
        info!("form error: {}", message);
    }

    fn render_order_success(&self, order_id: &OrderId) {
        info!("order placed: {}", order_id);
    }

    fn render_lot_modal(&self, lot: &Lot) {
        info!("lot modal: {} ({}) at {}", lot.title, lot.status, lot.price);
    }

    fn render_countdown(&self, id: &LotId, remaining: Duration) {
        info!("lot {}: {}", id, format_time_left(remaining));
    }

    fn close_modal(&self) {
        info!("modal closed");
    }
}
