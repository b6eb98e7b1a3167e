//! Text rendering of the question form and the scoreboard.

use std::fmt::Write;

use chrono::{DateTime, Local};
use trivia_core::{PresentedQuestion, ScoreboardView, TopScore};

pub const LOADING: &str = "Loading questions...";
const TOP_MARKER: &str = "*";

/// Letter shown next to the option at `index`.
pub fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Map typed input (a letter or a 1-based number) back to an option index.
pub fn parse_option(input: &str, option_count: usize) -> Option<usize> {
    let input = input.trim();

    let index = if let Ok(number) = input.parse::<usize>() {
        number.checked_sub(1)?
    } else {
        let mut chars = input.chars();
        let c = chars.next()?.to_ascii_uppercase();
        if chars.next().is_some() || !c.is_ascii_uppercase() {
            return None;
        }
        (c as u8 - b'A') as usize
    };

    (index < option_count).then_some(index)
}

pub fn question(q: &PresentedQuestion) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}. {}", q.number, q.text);
    for (i, option) in q.options.iter().enumerate() {
        let _ = writeln!(out, "   {}) {}", option_label(i), option);
    }
    out
}

pub fn top_summary(top: Option<TopScore>) -> Option<String> {
    top.map(|t| {
        let players = if t.count == 1 { "player" } else { "players" };
        format!("Top score: {}% ({} {})", t.percent, t.count, players)
    })
}

fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn scoreboard(view: &ScoreboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scoreboard (sorted by {})", view.preference);

    if view.is_empty() {
        let _ = writeln!(out, "No scores yet.");
        return out;
    }

    let name_width = view
        .entries
        .iter()
        .map(|e| e.record.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let _ = writeln!(
        out,
        "  {:>3}  {:<name_width$}  {:>7}  {:>4}  {}",
        "#", "Name", "Score", "%", "Played"
    );

    for (i, entry) in view.entries.iter().enumerate() {
        let marker = if entry.is_top { TOP_MARKER } else { " " };
        let score = format!("{}/{}", entry.record.correct, entry.record.total);
        let _ = writeln!(
            out,
            "{} {:>3}  {:<name_width$}  {:>7}  {:>3}%  {}",
            marker,
            i + 1,
            entry.record.name,
            score,
            entry.percent,
            format_timestamp(entry.record.timestamp),
        );
    }

    if let Some(summary) = top_summary(view.top) {
        let _ = writeln!(out, "\n{}", summary);
    }

    out
}
