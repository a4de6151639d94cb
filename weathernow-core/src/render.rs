//! Text projection of the widget state.

use crate::{
    model::WeatherSnapshot,
    present::{compass_label, description_for, icon_for},
    state::WidgetState,
};

pub const TITLE: &str = "Weather Now";
const PLACEHOLDER: &str = "Enter city name";
const MISSING: &str = "--";

/// Submit button label; it reads as busy and is disabled while loading.
pub fn button_label(state: &WidgetState) -> &'static str {
    if state.is_loading() {
        "Searching..."
    } else {
        "Search"
    }
}

/// Render the whole widget: title, input line, alert banner and panel.
pub fn render(state: &WidgetState) -> String {
    let mut output = format!("{TITLE}\n\n");

    let input = if state.query().is_empty() {
        PLACEHOLDER
    } else {
        state.query()
    };
    let button = if state.is_loading() {
        format!("[ {} ] (disabled)", button_label(state))
    } else {
        format!("[ {} ]", button_label(state))
    };
    output.push_str(&format!("City name: {input}  {button}\n"));

    if let Some(city) = state.loading_city() {
        output.push_str(&format!("Searching for {city}...\n"));
    }

    if let Some(message) = state.error() {
        output.push_str(&format!("\n! {message}\n"));
    }

    if let Some(snapshot) = state.snapshot() {
        output.push('\n');
        output.push_str(&render_panel(snapshot));
    }

    output
}

/// The weather panel for one snapshot.
pub fn render_panel(snapshot: &WeatherSnapshot) -> String {
    let current = &snapshot.current;
    let icon = icon_for(current.weather_code);

    let mut output = format!(
        "{}\n{} {}\n{}°C\n{}\n",
        snapshot.city,
        icon.glyph(),
        icon,
        current.temperature_c,
        description_for(current.weather_code),
    );

    if let Some(observed_at) = current.observed_at {
        output.push_str(&format!("Observed at {}\n", observed_at.format("%Y-%m-%d %H:%M")));
    }

    output.push('\n');
    output.push_str(&grid_row(
        ("Wind Speed", format!("{} km/h", current.wind_speed_kmh)),
        ("Wind Direction", compass_label(current.wind_direction_deg).to_string()),
    ));
    output.push_str(&grid_row(
        ("Humidity", percent(snapshot.hourly.humidity_now())),
        ("Precipitation", percent(snapshot.hourly.precipitation_now())),
    ));

    output
}

fn grid_row(left: (&str, String), right: (&str, String)) -> String {
    format!("{:<16}{:<12}| {:<16}{}\n", left.0, left.1, right.0, right.1)
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v}%"))
}
