use std::rc::Rc;

use auction_market::app::{App, AppConfig};
use auction_market::render::LogRenderer;
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let config = AppConfig::from_env();
    info!("starting against {}", config.api_url);

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let app = App::bootstrap(&config, Rc::new(LogRenderer));
            app.run().await;
        })
        .await;
}
