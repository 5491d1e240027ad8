// src/app.rs
use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use log::debug;

use crate::api::{AuctionApi, HttpAuctionApi};
use crate::bus::EventBus;
use crate::domain::BasketMachine;
use crate::mediators::{BasketMediator, CatalogMediator};
use crate::render::Renderer;

const DEFAULT_API_URL: &str = "http://localhost:8080/api/auction";
const DEFAULT_CDN_URL: &str = "http://localhost:8080/content";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub cdn_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            api_url: env::var("AUCTION_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            cdn_url: env::var("AUCTION_CDN_URL").unwrap_or_else(|_| DEFAULT_CDN_URL.to_string()),
        }
    }
}

/// The wired application: one bus, one basket machine, both mediators.
pub struct App {
    pub bus: Rc<EventBus>,
    pub basket: Rc<RefCell<BasketMachine>>,
    pub basket_mediator: Rc<BasketMediator>,
    pub catalog: Rc<CatalogMediator>,
}

impl App {
    pub fn bootstrap(config: &AppConfig, renderer: Rc<dyn Renderer>) -> App {
        let api: Rc<dyn AuctionApi> = Rc::new(HttpAuctionApi::new(&config.api_url, &config.cdn_url));
        Self::wire(renderer, api)
    }

    /// Construct and connect every component; the seam used by tests to
    /// inject collaborator doubles.
    pub fn wire(renderer: Rc<dyn Renderer>, api: Rc<dyn AuctionApi>) -> App {
        let bus = Rc::new(EventBus::new());
        let basket = Rc::new(RefCell::new(BasketMachine::new(Rc::clone(&bus))));

        let basket_mediator = BasketMediator::attach(
            &bus,
            Rc::clone(&basket),
            Rc::clone(&renderer),
            Rc::clone(&api),
        );
        let catalog = CatalogMediator::attach(&bus, Rc::clone(&basket), renderer, api);

        // Audit tap: one debug line per event crossing the bus.
        bus.subscribe_all(|event| {
            debug!("{}: {:?}", event.name(), event);
            Ok(())
        });

        App {
            bus,
            basket,
            basket_mediator,
            catalog,
        }
    }

    /// Initial catalog load. Everything after it is event-driven.
    pub async fn run(&self) {
        Rc::clone(&self.catalog).load_catalog().await;
    }
}
