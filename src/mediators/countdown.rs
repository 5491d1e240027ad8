// src/mediators/countdown.rs
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::domain::LotId;
use crate::render::Renderer;

/// Scoped countdown for an open lot modal.
///
/// Ticks once a second, recomputing the remaining time until the auction
/// end instant and issuing a render command. The timer is owned: dropping
/// the handle aborts the task, so every path that tears the modal down
/// releases it, not just the close button.
pub struct Countdown {
    task: JoinHandle<()>,
}

impl Countdown {
    pub fn start(id: LotId, ends_at: DateTime<Utc>, renderer: Rc<dyn Renderer>) -> Self {
        let task = tokio::task::spawn_local(async move {
            let mut tick = interval(std::time::Duration::from_secs(1));
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tick.tick().await;
                let remaining = ends_at - Utc::now();
                renderer.render_countdown(&id, remaining);
                if remaining <= Duration::zero() {
                    break;
                }
            }
        });
        Countdown { task }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}
