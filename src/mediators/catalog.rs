// src/mediators/catalog.rs
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, error};

use super::countdown::Countdown;
use crate::api::{AuctionApi, BidRequest};
use crate::bus::EventBus;
use crate::domain::{
    AppEvent, BasketMachine, Lot, LotId, LotMachine, LotStatus, Price,
};
use crate::render::Renderer;

/// Wires the catalog and lot-detail flows: initial load, add-to-basket,
/// the bidding protocol, and the lot modal lifecycle including its
/// countdown timer.
pub struct CatalogMediator {
    bus: Weak<EventBus>,
    basket: Rc<RefCell<BasketMachine>>,
    renderer: Rc<dyn Renderer>,
    api: Rc<dyn AuctionApi>,
    /// Machine for the lot currently presented in the modal, if any.
    lot: RefCell<Option<LotMachine>>,
    countdown: RefCell<Option<Countdown>>,
    /// Generation counter for the lot view. Fetches capture the epoch they
    /// were issued under; a completion whose epoch is stale belongs to a
    /// view that has since been replaced or closed and is dropped.
    epoch: Cell<u64>,
}

impl CatalogMediator {
    pub fn attach(
        bus: &Rc<EventBus>,
        basket: Rc<RefCell<BasketMachine>>,
        renderer: Rc<dyn Renderer>,
        api: Rc<dyn AuctionApi>,
    ) -> Rc<Self> {
        let mediator = Rc::new(CatalogMediator {
            bus: Rc::downgrade(bus),
            basket,
            renderer,
            api,
            lot: RefCell::new(None),
            countdown: RefCell::new(None),
            epoch: Cell::new(0),
        });

        let m = Rc::clone(&mediator);
        bus.on("lot:buy", move |event| {
            if let AppEvent::LotBuy { item } = event {
                m.basket.borrow_mut().add_item(item.clone());
            }
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("lot:details", move |event| {
            if let AppEvent::LotDetails { id } = event {
                Rc::clone(&m).open_lot(id.clone());
            }
            Ok(())
        });

        // Basket rows open the same detail modal.
        let m = Rc::clone(&mediator);
        bus.on("lot:open", move |event| {
            if let AppEvent::LotOpen { id } = event {
                Rc::clone(&m).open_lot(id.clone());
            }
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("lot:place-bid", move |event| {
            if let AppEvent::LotBid { lot_id, amount } = event {
                Rc::clone(&m).place_bid(lot_id.clone(), *amount);
            }
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("lot:status", move |event| {
            if let AppEvent::LotStatusChanged { id, status } = event {
                m.lot_status_changed(id, *status);
            }
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("lot:close", move |_| {
            m.close_lot();
            Ok(())
        });

        // The basket modal takes over the shared container; the lot view and
        // its timer must not outlive the surface.
        let m = Rc::clone(&mediator);
        bus.on("basket:click", move |_| {
            m.release_view();
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("app:reset", move |_| {
            m.close_lot();
            Ok(())
        });

        mediator
    }

    /// Fetch the catalog and render it, announcing the loading lifecycle.
    pub async fn load_catalog(self: Rc<Self>) {
        if let Some(bus) = self.bus.upgrade() {
            bus.emit(AppEvent::CatalogLoading);
        }
        match self.api.lot_list().await {
            Ok(lots) => {
                self.renderer.render_catalog(&lots);
                if let Some(bus) = self.bus.upgrade() {
                    bus.emit(AppEvent::CatalogLoaded { lots });
                }
            }
            Err(err) => {
                error!("catalog load failed: {}", err);
                if let Some(bus) = self.bus.upgrade() {
                    bus.emit(AppEvent::CatalogError {
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    fn open_lot(self: Rc<Self>, id: LotId) {
        let epoch = self.bump_epoch();
        let m = self;
        tokio::task::spawn_local(async move {
            match m.api.lot_item(&id).await {
                Ok(lot) => m.present_lot(epoch, lot),
                Err(err) => {
                    error!("lot detail fetch for {} failed: {}", id, err);
                    if let Some(bus) = m.bus.upgrade() {
                        bus.emit(AppEvent::LotError {
                            message: err.to_string(),
                        });
                    }
                }
            }
        });
    }

    /// Render a freshly fetched lot into the modal and rebuild the machine
    /// around the server snapshot. The countdown is replaced, never
    /// duplicated: at most one timer runs per open modal.
    fn present_lot(&self, epoch: u64, lot: Lot) {
        if epoch != self.epoch.get() {
            debug!("dropping stale fetch for lot {}", lot.id);
            return;
        }

        self.renderer.render_lot_modal(&lot);

        let countdown = if lot.status != LotStatus::Closed {
            Some(Countdown::start(
                lot.id.clone(),
                lot.datetime,
                Rc::clone(&self.renderer),
            ))
        } else {
            None
        };
        *self.countdown.borrow_mut() = countdown;

        if let Some(bus) = self.bus.upgrade() {
            *self.lot.borrow_mut() = Some(LotMachine::new(lot, bus));
        }
    }

    /// Bidding protocol: validate against the local machine first, then
    /// submit, re-fetch, and re-render. The server-refetched state replaces
    /// the optimistic local state wholesale (last-writer-wins-by-fetch-time),
    /// so a concurrent bidder's higher price is accepted as-is.
    fn place_bid(self: Rc<Self>, lot_id: LotId, amount: Price) {
        // The machine leaves the cell while it runs: accepting a bid emits
        // on the bus, and a handler re-borrowing the cell mid-dispatch
        // would panic.
        let taken = self.lot.borrow_mut().take();
        let mut machine = match taken {
            Some(machine) if machine.lot().id == lot_id => machine,
            other => {
                *self.lot.borrow_mut() = other;
                self.renderer
                    .render_form_error(&format!("Lot {} is not open for bidding", lot_id));
                return;
            }
        };
        let accepted = machine.place_bid(amount);
        *self.lot.borrow_mut() = Some(machine);

        if let Err(err) = accepted {
            // Validation and state errors stay inline, off the bus.
            self.renderer.render_form_error(&err.to_string());
            return;
        }

        let epoch = self.epoch.get();
        let m = self;
        tokio::task::spawn_local(async move {
            let refreshed = async {
                m.api.place_bid(&lot_id, BidRequest { price: amount }).await?;
                m.api.lot_item(&lot_id).await
            }
            .await;

            match refreshed {
                Ok(lot) => m.present_lot(epoch, lot),
                Err(err) => {
                    error!("bid on {} failed: {}", lot_id, err);
                    if let Some(bus) = m.bus.upgrade() {
                        bus.emit(AppEvent::LotError {
                            message: err.to_string(),
                        });
                    }
                }
            }
        });
    }

    /// An auction that ends while sitting in the basket flags the matching
    /// items; an auction that ends while its modal is open loses its timer.
    fn lot_status_changed(&self, id: &LotId, status: LotStatus) {
        if status != LotStatus::Closed {
            return;
        }

        self.basket.borrow_mut().close_item(id);

        let is_current = self
            .lot
            .borrow()
            .as_ref()
            .map(|machine| machine.lot().id == *id)
            .unwrap_or(false);
        if is_current {
            self.countdown.borrow_mut().take();
        }
    }

    fn close_lot(&self) {
        self.release_view();
        self.renderer.close_modal();
    }

    // Tear down the lot view without touching the shared modal surface.
    fn release_view(&self) {
        self.bump_epoch();
        self.countdown.borrow_mut().take();
        *self.lot.borrow_mut() = None;
    }

    fn bump_epoch(&self) -> u64 {
        let next = self.epoch.get() + 1;
        self.epoch.set(next);
        next
    }
}
