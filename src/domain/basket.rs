// src/domain/basket.rs
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use super::core::{LotId, Price, Tab};
use super::events::AppEvent;
use super::observable::ObservableState;
use crate::bus::EventBus;

/// Snapshot of a lot at the moment it was added to the basket. The `closed`
/// flag is supplied externally when the underlying auction ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketItem {
    pub id: LotId,
    pub title: String,
    pub price: Price,
    pub image: String,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Basket {
    items: Vec<BasketItem>,
    total: Price,
    current_tab: Tab,
}

impl Basket {
    fn recalculate_total(&mut self) {
        self.total = self.items.iter().map(|item| item.price).sum();
    }
}

/// Badge/list snapshot handed to renderers on every `basket:changed`.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketSnapshot {
    pub items: Vec<BasketItem>,
    pub total: Price,
}

/// Full modal snapshot, including the tab selector.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketModalSnapshot {
    pub items: Vec<BasketItem>,
    pub total: Price,
    pub current_tab: Tab,
}

impl BasketModalSnapshot {
    /// The subset of items the selected tab presents. `total` stays
    /// basket-wide regardless of the selection.
    pub fn tab_items(&self) -> Vec<&BasketItem> {
        self.items
            .iter()
            .filter(|item| match self.current_tab {
                Tab::Active => !item.closed,
                Tab::Closed => item.closed,
            })
            .collect()
    }
}

/// Owns the basket contents, the derived total, and the tab selector.
pub struct BasketMachine {
    state: ObservableState<Basket>,
}

impl BasketMachine {
    pub fn new(events: Rc<EventBus>) -> Self {
        BasketMachine {
            state: ObservableState::new(
                Basket {
                    items: Vec::new(),
                    total: 0,
                    current_tab: Tab::Active,
                },
                events,
            ),
        }
    }

    /// Append an item, recompute the total, announce `basket:changed` with
    /// the full snapshot. Item content is trusted as supplied by the
    /// upstream lot-selection flow.
    pub fn add_item(&mut self, item: BasketItem) {
        self.state.emit_changes(
            |basket| {
                basket.items.push(item);
                basket.recalculate_total();
            },
            |basket| AppEvent::BasketChanged {
                items: basket.items.clone(),
                total: basket.total,
            },
        );
    }

    pub fn clear(&mut self) {
        self.state.emit_changes(
            |basket| {
                basket.items.clear();
                basket.total = 0;
            },
            |basket| AppEvent::BasketChanged {
                items: basket.items.clone(),
                total: basket.total,
            },
        );
    }

    /// Mark every snapshot of `id` as closed. The closing state comes from
    /// the lot lifecycle, not from the basket itself. The total is a
    /// basket-wide aggregate and does not move. Returns whether anything
    /// changed; `basket:changed` is announced only when it did.
    pub fn close_item(&mut self, id: &LotId) -> bool {
        let affected = self
            .state
            .get()
            .items
            .iter()
            .any(|item| item.id == *id && !item.closed);
        if !affected {
            return false;
        }

        self.state.emit_changes(
            |basket| {
                for item in basket.items.iter_mut().filter(|item| item.id == *id) {
                    item.closed = true;
                }
            },
            |basket| AppEvent::BasketChanged {
                items: basket.items.clone(),
                total: basket.total,
            },
        );
        true
    }

    // Tab selection is pure selector state; announcing the switch is the
    // mediator's job.
    pub fn set_current_tab(&mut self, tab: Tab) {
        self.state.apply(|basket| basket.current_tab = tab);
    }

    pub fn current_tab(&self) -> Tab {
        self.state.get().current_tab
    }

    pub fn items(&self) -> &[BasketItem] {
        &self.state.get().items
    }

    pub fn total(&self) -> Price {
        self.state.get().total
    }

    pub fn snapshot(&self) -> BasketSnapshot {
        let basket = self.state.get();
        BasketSnapshot {
            items: basket.items.clone(),
            total: basket.total,
        }
    }

    pub fn modal_snapshot(&self) -> BasketModalSnapshot {
        let basket = self.state.get();
        BasketModalSnapshot {
            items: basket.items.clone(),
            total: basket.total,
            current_tab: basket.current_tab,
        }
    }
}
