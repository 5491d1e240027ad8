// src/mediators/basket.rs
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::error;

use crate::api::AuctionApi;
use crate::bus::EventBus;
use crate::domain::{AppEvent, BasketMachine, BasketSnapshot, LotId, OrderForm};
use crate::render::Renderer;

/// Wires basket UI events and basket model changes to the state machine,
/// the render surface, and the checkout protocol. Owns no state beyond the
/// references; only this mediator mutates the basket machine.
pub struct BasketMediator {
    bus: Weak<EventBus>,
    basket: Rc<RefCell<BasketMachine>>,
    renderer: Rc<dyn Renderer>,
    api: Rc<dyn AuctionApi>,
}

impl BasketMediator {
    pub fn attach(
        bus: &Rc<EventBus>,
        basket: Rc<RefCell<BasketMachine>>,
        renderer: Rc<dyn Renderer>,
        api: Rc<dyn AuctionApi>,
    ) -> Rc<Self> {
        let mediator = Rc::new(BasketMediator {
            bus: Rc::downgrade(bus),
            basket,
            renderer,
            api,
        });

        // The machine announces while its mutation call is still on the
        // stack, so this handler renders from the event payload and never
        // re-borrows the machine.
        let m = Rc::clone(&mediator);
        bus.on("basket:changed", move |event| {
            if let AppEvent::BasketChanged { items, total } = event {
                m.renderer.render_basket(&BasketSnapshot {
                    items: items.clone(),
                    total: *total,
                });
            }
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("basket:click", move |_| {
            m.renderer
                .render_basket_modal(&m.basket.borrow().modal_snapshot());
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("basket:switch-tab", move |event| {
            if let AppEvent::BasketSwitchTab { tab } = event {
                m.basket.borrow_mut().set_current_tab(*tab);
                m.renderer
                    .render_basket_modal(&m.basket.borrow().modal_snapshot());
            }
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("basket:close", move |_| {
            m.renderer.close_modal();
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("basket:checkout", move |_| {
            m.renderer.render_order_form();
            Ok(())
        });

        let m = Rc::clone(&mediator);
        bus.on("order:submit", move |event| {
            if let AppEvent::OrderSubmit { form } = event {
                Rc::clone(&m).submit_order(form.clone());
            }
            Ok(())
        });

        mediator
    }

    /// Checkout protocol. Validation failures surface inline and never reach
    /// the bus; a network failure surfaces inline too and leaves the basket
    /// untouched (checkout is not retried automatically).
    fn submit_order(self: Rc<Self>, form: OrderForm) {
        let items: Vec<LotId> = self
            .basket
            .borrow()
            .items()
            .iter()
            .map(|item| item.id.clone())
            .collect();

        let order = match form.into_order(items) {
            Ok(order) => order,
            Err(err) => {
                self.renderer.render_form_error(&err.to_string());
                return;
            }
        };

        let m = self;
        tokio::task::spawn_local(async move {
            match m.api.submit_order(&order).await {
                Ok(result) => {
                    m.basket.borrow_mut().clear();
                    m.renderer.render_order_success(&result.id);
                    if let Some(bus) = m.bus.upgrade() {
                        bus.emit(AppEvent::OrderPlaced { id: result.id });
                    }
                }
                Err(err) => {
                    error!("order submission failed: {}", err);
                    m.renderer.render_form_error("Failed to submit the order");
                }
            }
        });
    }
}
