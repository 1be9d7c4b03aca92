use shared::{month_grid, CalendarMap, DayStatus, DisplayCursor};
use yew::prelude::*;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
    pub calendar: CalendarMap,
    pub cursor: DisplayCursor,
    /// Fires with the ISO date of the clicked day cell.
    pub on_day_click: Callback<String>,
}

/// Cell class for a day, one distinct treatment per status.
fn status_class(status: DayStatus) -> &'static str {
    match status {
        DayStatus::None => "calendar-day status-none",
        DayStatus::Morning => "calendar-day status-morning",
        DayStatus::Afternoon => "calendar-day status-afternoon",
        DayStatus::FullDay => "calendar-day status-full-day",
        DayStatus::Bolo => "calendar-day status-bolo",
    }
}

#[function_component(Calendar)]
pub fn calendar(props: &CalendarProps) -> Html {
    let grid = month_grid(props.cursor, &props.calendar);

    let mut cells = Vec::new();

    // Blank padding so day 1 lands under its weekday header.
    for _ in 0..grid.leading_blanks {
        cells.push(html! {
            <div class="calendar-day empty"></div>
        });
    }

    for day in &grid.days {
        let onclick = {
            let on_day_click = props.on_day_click.clone();
            let date = day.date.clone();
            Callback::from(move |_: MouseEvent| on_day_click.emit(date.clone()))
        };

        cells.push(html! {
            <div class={status_class(day.status)} {onclick} title={day.status.label()}>
                {day.day}
            </div>
        });
    }

    html! {
        <div class="calendar">
            <div class="calendar-weekdays">
                {for WEEKDAYS.iter().map(|weekday| html! {
                    <div class="weekday">{*weekday}</div>
                })}
            </div>
            <div class="calendar-grid">
                {for cells}
            </div>
        </div>
    }
}
