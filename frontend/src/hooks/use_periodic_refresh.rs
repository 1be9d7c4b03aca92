use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Configuration for the fixed-interval poll driver.
#[derive(Clone, PartialEq)]
pub struct PeriodicRefreshConfig {
    pub interval_ms: u32,
    /// Optional delay before the first tick, for staggering multiple pollers.
    pub initial_delay_ms: Option<u32>,
}

impl Default for PeriodicRefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 30_000,
            initial_delay_ms: None,
        }
    }
}

/// Emit `refresh_fn` on a fixed interval for as long as the component is
/// mounted. The first tick fires one full interval after mount; failures are
/// the refresh path's to report, and the next attempt is simply the next
/// tick.
#[hook]
pub fn use_periodic_refresh(config: PeriodicRefreshConfig, refresh_fn: Callback<()>) {
    use_effect_with(config, move |config| {
        let alive = Rc::new(Cell::new(true));
        let config = config.clone();
        let refresh_fn = refresh_fn.clone();
        let ticking = alive.clone();

        spawn_local(async move {
            if let Some(initial_delay) = config.initial_delay_ms {
                TimeoutFuture::new(initial_delay).await;
            }
            loop {
                TimeoutFuture::new(config.interval_ms).await;
                if !ticking.get() {
                    break;
                }
                refresh_fn.emit(());
            }
            Logger::debug_with_component("periodic-refresh-hook", "Poll loop stopped");
        });

        move || alive.set(false)
    });
}
