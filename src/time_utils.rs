// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use serde::Serializer;

/// Timestamp format the backend expects (no offset, second precision).
const BACKEND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format used by `datetime-local` inputs.
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse a timestamp from user input or a backend record.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS[.fff]` and RFC3339 with an
/// offset; the latter is normalised to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, INPUT_FORMAT))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

pub fn format_backend_timestamp(time: NaiveDateTime) -> String {
    time.format(BACKEND_FORMAT).to_string()
}

pub fn serialize_backend_timestamp<S: Serializer>(
    time: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(BACKEND_FORMAT))
}

/// Current local time truncated to the minute, as a form input value.
pub fn default_start_time() -> String {
    format_input_timestamp(Local::now().naive_local())
}

pub fn format_input_timestamp(time: NaiveDateTime) -> String {
    time.format(INPUT_FORMAT).to_string()
}

/// `Jan 5, 2025`
pub fn format_short_date(time: NaiveDateTime) -> String {
    time.format("%b %-d, %Y").to_string()
}

/// `Sunday, January 5, 2025`
pub fn format_long_date(time: NaiveDateTime) -> String {
    time.format("%A, %B %-d, %Y").to_string()
}

/// `09:30 AM`
pub fn format_clock_time(time: NaiveDateTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// `1/5/2025, 9:30:00 AM`
pub fn format_date_time(time: NaiveDateTime) -> String {
    time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Greeting for the header, by hour of day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 17 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

pub fn motivational_message(hour: u32) -> &'static str {
    match hour {
        0..=5 => "Early bird catches the gains! 🌅",
        6..=11 => "Perfect time to crush your goals! 💪",
        12..=16 => "Keep the momentum going strong! ⚡",
        17..=20 => "Evening workout session awaits! 🔥",
        _ => "Rest well, tomorrow's gains await! 🌙",
    }
}

/// Hour of day in the server's local time zone.
pub fn current_hour() -> u32 {
    Local::now().hour()
}
