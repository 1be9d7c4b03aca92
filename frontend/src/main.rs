mod components;
mod hooks;
mod services;

use shared::DayStatus;
use yew::prelude::*;

use components::Calendar;
use hooks::{use_availability, use_periodic_refresh, PeriodicRefreshConfig};
use services::api::ApiClient;

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "January",
    }
}

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let availability = use_availability(&api_client);

    // Keep polling the service; the initial load already ran on mount.
    use_periodic_refresh(
        PeriodicRefreshConfig::default(),
        availability.actions.load_all.clone(),
    );

    let state = &availability.state;
    let legend = [
        DayStatus::Morning,
        DayStatus::Afternoon,
        DayStatus::FullDay,
        DayStatus::Bolo,
    ];

    html! {
        <div class="page">
            <header class="header">
                <h1 class="page-title">{"Availability Calendar"}</h1>
                <h2 class="month-title">
                    {format!("{} {}", month_name(state.cursor.month), state.cursor.year)}
                </h2>
                {if let Some(stamp) = &state.last_synced {
                    html! { <p class="sync-status">{format!("Last updated: {}", stamp)}</p> }
                } else { html! {} }}
                {if let Some(error) = &state.error {
                    html! { <p class="sync-error">{error.to_string()}</p> }
                } else { html! {} }}
            </header>

            <div class="calendar-nav">
                <button class="calendar-nav-btn" onclick={availability.actions.prev_month.clone()}>
                    {"‹ Previous"}
                </button>
                <button class="calendar-nav-btn" onclick={availability.actions.next_month.clone()}>
                    {"Next ›"}
                </button>
            </div>

            <div class="legend">
                {for legend.iter().map(|status| {
                    let chip_class = match status {
                        DayStatus::Morning => "legend-chip status-morning",
                        DayStatus::Afternoon => "legend-chip status-afternoon",
                        DayStatus::FullDay => "legend-chip status-full-day",
                        _ => "legend-chip status-bolo",
                    };
                    html! { <span class={chip_class}>{status.label()}</span> }
                })}
            </div>

            {if state.loading {
                html! { <div class="loading">{"Loading calendar..."}</div> }
            } else {
                html! {
                    <Calendar
                        calendar={state.calendar.clone()}
                        cursor={state.cursor}
                        on_day_click={availability.actions.cycle_day.clone()}
                    />
                }
            }}
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
