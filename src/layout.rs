//! Grid geometry: minutes to pixels, event boxes and the time axis.

use serde::{Deserialize, Deserializer, Serialize};

use crate::clock::{format_clock, parse_hhmm};
use crate::error::ConfigError;
use crate::projector::{TimedEvent, Window};

pub const DEFAULT_WINDOW_START: u32 = 8 * 60;
pub const DEFAULT_WINDOW_END: u32 = 19 * 60;
pub const DEFAULT_SLOT_MINUTES: u32 = 30;
pub const DEFAULT_SLOT_PX: f64 = 30.0;
pub const DEFAULT_MINIMUM_VISIBLE_PX: f64 = 18.0;

/// Scale and extent of the weekly grid.
///
/// Window bounds accept either minutes since midnight or `"H:MM"` strings
/// when read from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    #[serde(alias = "window-start", deserialize_with = "minutes_or_clock")]
    pub window_start: u32,
    #[serde(alias = "window-end", deserialize_with = "minutes_or_clock")]
    pub window_end: u32,
    #[serde(alias = "slot-minutes")]
    pub slot_minutes: u32,
    #[serde(alias = "slot-px")]
    pub slot_px: f64,
    #[serde(alias = "minimum-visible-px")]
    pub minimum_visible_px: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            window_start: DEFAULT_WINDOW_START,
            window_end: DEFAULT_WINDOW_END,
            slot_minutes: DEFAULT_SLOT_MINUTES,
            slot_px: DEFAULT_SLOT_PX,
            minimum_visible_px: DEFAULT_MINIMUM_VISIBLE_PX,
        }
    }
}

impl GridConfig {
    pub fn window(&self) -> Window {
        Window {
            start: self.window_start,
            end: self.window_end,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_minutes == 0 {
            return Err(ConfigError::ZeroSlot(self.slot_minutes));
        }
        if self.slot_px.is_nan() || self.slot_px <= 0.0 {
            return Err(ConfigError::SlotPx(self.slot_px));
        }
        if self.minimum_visible_px.is_nan() || self.minimum_visible_px < 0.0 {
            return Err(ConfigError::NegativeMinimum(self.minimum_visible_px));
        }
        if self.window_end <= self.window_start {
            return Err(ConfigError::EmptyWindow {
                start: self.window_start,
                end: self.window_end,
            });
        }
        if self.window_end > 24 * 60 {
            return Err(ConfigError::PastMidnight(self.window_end));
        }
        Ok(())
    }

    pub fn time_axis_labels(&self) -> Vec<String> {
        time_axis_labels(self.window_start, self.window_end, self.slot_minutes)
    }

    pub fn pixel_offset(&self, minute: u32) -> f64 {
        pixel_offset(minute, self.window_start, self.slot_minutes, self.slot_px)
    }

    /// Total pixel height of the grid body, down to `window_end` even when
    /// the last slot is partial.
    pub fn grid_height(&self) -> f64 {
        self.pixel_offset(self.window_end)
    }
}

/// Pixel placement of an event inside its day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventBox {
    pub top: f64,
    pub height: f64,
}

/// One label per slot boundary from `window_start` through `window_end`, as `H:MM`.
pub fn time_axis_labels(window_start: u32, window_end: u32, slot_minutes: u32) -> Vec<String> {
    (window_start..=window_end)
        .step_by(slot_minutes.max(1) as usize)
        .map(format_clock)
        .collect()
}

/// Rows between consecutive labels.
pub fn row_count(labels: &[String]) -> usize {
    labels.len().saturating_sub(1)
}

pub fn pixel_offset(minute: u32, window_start: u32, slot_minutes: u32, slot_px: f64) -> f64 {
    (f64::from(minute) - f64::from(window_start)) * slot_px / f64::from(slot_minutes)
}

/// Box for an event; the height never drops below `minimum_visible_px`.
pub fn event_box(event: &TimedEvent<'_>, config: &GridConfig) -> EventBox {
    span_box(event.start, event.end, config)
}

pub(crate) fn span_box(start: u32, end: u32, config: &GridConfig) -> EventBox {
    let top = config.pixel_offset(start);
    let bottom = config.pixel_offset(end);
    EventBox {
        top,
        height: config.minimum_visible_px.max(bottom - top),
    }
}

fn minutes_or_clock<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bound {
        Minutes(u32),
        Clock(String),
    }

    match Bound::deserialize(deserializer)? {
        Bound::Minutes(minutes) => Ok(minutes),
        Bound::Clock(text) => parse_hhmm(&text)
            .ok_or_else(|| serde::de::Error::custom(ConfigError::Clock(text))),
    }
}
