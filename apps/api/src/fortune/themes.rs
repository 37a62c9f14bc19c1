//! Theme selection: deterministic day-of-year → theme mapping.
//!
//! The day index is the 1-based ordinal of the date in the caller's time zone
//! (Jan 1 => 1), taken modulo the list length.

use std::fmt;

use anyhow::{bail, Result};
use chrono::{DateTime, Datelike, TimeZone};
use serde::Serialize;

/// Today's workplace mood, used to steer generation.
/// Either one of a fixed list or a caller-supplied override.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Theme(String);

impl Theme {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const STANDALONE_THEMES: &[&str] = &[
    "a Monday morning you do not want to commute into",
    "a day with far too many meetings",
    "an afternoon spent wanting to go home",
    "a report you really do not want to write",
    "an evening with overtime already scheduled",
    "the bank balance the day before payday",
    "a day of reading the boss's mood",
    "the drowsiness that hits after lunch",
    "a day you do not feel like doing anything",
    "the moment you start thinking about quitting",
    "a Monday after a weekend that was too short",
    "a day with lots of work and no drive",
    "dreaming of leaving right on time",
    "a morning running on coffee",
];

pub const SERVERLESS_THEMES: &[&str] = &[
    "a Monday morning you do not want to commute into",
    "a day with far too many meetings",
    "an afternoon spent wanting to go home",
    "a report you really do not want to write",
    "an evening with overtime already scheduled",
    "the bank balance the day before payday",
    "a day of reading the boss's mood",
    "the drowsiness that hits after lunch",
    "a day you do not feel like doing anything",
    "the moment you start thinking about quitting",
    "a Monday after a weekend that was too short",
    "a morning running on coffee",
];

/// Maps a timestamp onto a fixed, ordered theme list.
#[derive(Debug, Clone)]
pub struct ThemeSelector {
    themes: &'static [&'static str],
}

impl ThemeSelector {
    pub fn new(themes: &'static [&'static str]) -> Result<Self> {
        if themes.is_empty() {
            bail!("theme list must contain at least one theme");
        }
        Ok(Self { themes })
    }

    /// Returns `override_theme` verbatim when given, otherwise the theme for
    /// the day of year of `now`. Overrides are not checked against the list.
    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>, override_theme: Option<&str>) -> Theme {
        if let Some(theme) = override_theme {
            return Theme::new(theme);
        }
        let index = now.ordinal() as usize % self.themes.len();
        Theme::new(self.themes[index])
    }
}
