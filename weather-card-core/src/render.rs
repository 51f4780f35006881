//! Text presenter for the widget.
//!
//! Produces the whole screen as a string: error banner, search form and the
//! card in one of its three states.

use chrono::{Datelike, NaiveDate};
use std::fmt::{self, Write};

use crate::{
    icon::Icon,
    model::WeatherReading,
    widget::{View, WidgetState},
};

const WIDTH: usize = 42;
const SPINNER: &str = "◌";
const PLACEHOLDER: &str = "Search by city or country";
const MISSING: &str = "--";

/// Render the full screen for `state`. `today` is the date shown on the card.
pub fn render(state: &WidgetState, today: NaiveDate) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    render_into(&mut out, state, today).unwrap_or_default();
    out
}

/// Render just the card for a reading.
pub fn render_card(reading: &WeatherReading, today: NaiveDate) -> String {
    let mut out = String::new();
    card_into(&mut out, reading, today).unwrap_or_default();
    out
}

/// Write the full screen for `state` into `out`.
pub fn render_into(out: &mut impl Write, state: &WidgetState, today: NaiveDate) -> fmt::Result {
    if let Some(err) = state.error() {
        banner(out, err.message())?;
    }

    match state.view() {
        View::Bootstrapping => {
            writeln!(out)?;
            writeln!(out, "{}", centered(&format!("{SPINNER} loading")))
        }
        View::Loading => {
            search_form(out, state.draft(), state.is_shaking())?;
            card_top(out)?;
            writeln!(out, "│")?;
            writeln!(out, "│{}", centered(SPINNER))?;
            writeln!(out, "│")?;
            card_bottom(out)
        }
        View::Populated(reading) => {
            search_form(out, state.draft(), state.is_shaking())?;
            card_into(out, reading, today)
        }
    }
}

fn card_into(out: &mut impl Write, reading: &WeatherReading, today: NaiveDate) -> fmt::Result {
    let icon = Icon::for_condition(&reading.condition)
        .map(|i| i.glyph())
        .unwrap_or(" ");

    card_top(out)?;
    writeln!(out, "│ {icon}  {}, {}", reading.place, reading.country)?;
    writeln!(out, "│    {}", format_date(today))?;
    writeln!(out, "│")?;
    writeln!(
        out,
        "│{}",
        centered(&format!("{} °C", truncate(reading.temperature_c)))
    )?;
    writeln!(out, "│{}", centered(&capitalize_words(&reading.description)))?;
    writeln!(out, "│")?;

    let visibility = reading
        .visibility_km()
        .map(|km| format!("{km} km"))
        .unwrap_or_else(|| MISSING.to_string());
    let feels_like = format!("{} °C", truncate(reading.feels_like_c));
    let humidity = format!("{} %", reading.humidity_pct);
    let wind = reading
        .wind_speed_mps
        .map(|speed| format!("{speed} m/s"))
        .unwrap_or_else(|| MISSING.to_string());

    writeln!(
        out,
        "│ {:<20}{}",
        format!("Visibility {visibility}"),
        format!("Feels like {feels_like}")
    )?;
    writeln!(
        out,
        "│ {:<20}{}",
        format!("Humidity {humidity}"),
        format!("Wind {wind}")
    )?;
    card_bottom(out)
}

fn banner(out: &mut impl Write, message: &str) -> fmt::Result {
    writeln!(out, "┏{}", "━".repeat(WIDTH))?;
    writeln!(out, "┃ ! {message}")?;
    writeln!(out, "┗{}", "━".repeat(WIDTH))
}

fn search_form(out: &mut impl Write, draft: &str, shaking: bool) -> fmt::Result {
    let text = if draft.is_empty() { PLACEHOLDER } else { draft };
    if shaking {
        writeln!(out, "   ~( {text:<30} [search] )~")
    } else {
        writeln!(out, " ( {text:<30} [search] )")
    }
}

fn card_top(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "╭{}", "─".repeat(WIDTH))
}

fn card_bottom(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "╰{}", "─".repeat(WIDTH))
}

fn centered(text: &str) -> String {
    format!("{text:^WIDTH$}").trim_end().to_string()
}

/// Integer part of a temperature, truncated toward zero.
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

fn format_date(date: NaiveDate) -> String {
    format!("{} / {} / {}", date.day(), date.month(), date.year())
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
