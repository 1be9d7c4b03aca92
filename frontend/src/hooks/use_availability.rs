use shared::{CalendarMap, DisplayCursor, SyncError};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "availability-hook";

/// Snapshot of the calendar state for rendering.
#[derive(Clone)]
pub struct AvailabilityState {
    /// Latest known-good full map, replaced atomically on every sync.
    pub calendar: CalendarMap,
    pub cursor: DisplayCursor,
    /// True until the first load attempt completes.
    pub loading: bool,
    /// Wall-clock time of the last successful load or save.
    pub last_synced: Option<String>,
    pub error: Option<SyncError>,
}

pub struct UseAvailabilityResult {
    pub state: AvailabilityState,
    pub actions: UseAvailabilityActions,
}

#[derive(Clone)]
pub struct UseAvailabilityActions {
    pub load_all: Callback<()>,
    pub cycle_day: Callback<String>,
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
}

/// Owns the calendar state and all traffic to the calendar service.
///
/// Loads the full map on mount; `load_all` is also what the periodic poll
/// drives. Clicks go through `cycle_day`: advance the day's status, post the
/// full candidate map, and commit it locally only once the service accepted
/// it. A failed save falls back to `load_all` so local state converges on
/// whatever the service holds.
#[hook]
pub fn use_availability(api_client: &ApiClient) -> UseAvailabilityResult {
    let calendar = use_state(CalendarMap::new);
    let cursor = use_state(current_month_cursor);
    let loading = use_state(|| true);
    let last_synced = use_state(|| None::<String>);
    let error = use_state(|| None::<SyncError>);
    // Bumped on every committed replacement of `calendar`. Async completions
    // that started against an older value are dropped instead of clobbering
    // newer local state.
    let version = use_mut_ref(|| 0u64);

    let load_all = {
        let api_client = api_client.clone();
        let calendar = calendar.clone();
        let loading = loading.clone();
        let last_synced = last_synced.clone();
        let error = error.clone();
        let version = version.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let calendar = calendar.clone();
            let loading = loading.clone();
            let last_synced = last_synced.clone();
            let error = error.clone();
            let version = version.clone();
            let started_at = *version.borrow();

            spawn_local(async move {
                match api_client.get_calendar().await {
                    Ok(data) => {
                        if *version.borrow() == started_at {
                            *version.borrow_mut() += 1;
                            calendar.set(data);
                            last_synced.set(Some(now_display_time()));
                            error.set(None);
                        } else {
                            Logger::debug_with_component(
                                COMPONENT,
                                "Dropping poll response derived from a stale state",
                            );
                        }
                    }
                    Err(detail) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Load failed: {}", detail),
                        );
                        error.set(Some(SyncError::LoadFailed(detail)));
                    }
                }
                loading.set(false);
            });
        })
    };

    let cycle_day = {
        let api_client = api_client.clone();
        let calendar = calendar.clone();
        let last_synced = last_synced.clone();
        let error = error.clone();
        let version = version.clone();
        let load_all = load_all.clone();

        use_callback((*calendar).clone(), move |date: String, current: &CalendarMap| {
            let api_client = api_client.clone();
            let calendar = calendar.clone();
            let last_synced = last_synced.clone();
            let error = error.clone();
            let version = version.clone();
            let load_all = load_all.clone();

            let next_status = current.status_for(&date).next();
            let candidate = current.with_status(&date, next_status);
            let started_at = *version.borrow();

            spawn_local(async move {
                match api_client.save_calendar(&candidate).await {
                    Ok(()) => {
                        if *version.borrow() == started_at {
                            *version.borrow_mut() += 1;
                            calendar.set(candidate);
                            last_synced.set(Some(now_display_time()));
                            error.set(None);
                        } else {
                            Logger::warn_with_component(
                                COMPONENT,
                                &format!("Dropping save result derived from a stale state for {}", date),
                            );
                        }
                    }
                    Err(detail) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Save failed for {}: {}", date, detail),
                        );
                        error.set(Some(SyncError::SaveFailed(detail)));
                        // The service kept its state; resynchronize with it.
                        load_all.emit(());
                    }
                }
            });
        })
    };

    // Navigation only moves the cursor; the grid is recomputed from the map
    // already in hand, no fetch.
    let prev_month = {
        let cursor = cursor.clone();
        use_callback(*cursor, move |_: MouseEvent, current: &DisplayCursor| {
            cursor.set(current.prev());
        })
    };

    let next_month = {
        let cursor = cursor.clone();
        use_callback(*cursor, move |_: MouseEvent, current: &DisplayCursor| {
            cursor.set(current.next());
        })
    };

    // Initial load.
    {
        let load_all = load_all.clone();
        use_effect_with((), move |_| {
            load_all.emit(());
            || ()
        });
    }

    let state = AvailabilityState {
        calendar: (*calendar).clone(),
        cursor: *cursor,
        loading: *loading,
        last_synced: (*last_synced).clone(),
        error: (*error).clone(),
    };

    let actions = UseAvailabilityActions {
        load_all,
        cycle_day,
        prev_month,
        next_month,
    };

    UseAvailabilityResult { state, actions }
}

/// The browser's current month, as the starting cursor.
fn current_month_cursor() -> DisplayCursor {
    let now = js_sys::Date::new_0();
    DisplayCursor::new(now.get_full_year() as i32, now.get_month() + 1)
}

fn now_display_time() -> String {
    String::from(js_sys::Date::new_0().to_locale_time_string("en-US"))
}
