//! Expands a section into per-day timed events inside the visible window.

use std::fmt;

use serde::Serialize;

use crate::clock::parse_clock;
use crate::days::{parse_days, Weekday};
use crate::models::Section;

/// Clock range the grid displays, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: u32,
    pub end: u32,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            start: 8 * 60,
            end: 19 * 60,
        }
    }
}

/// One section meeting on one day, clipped to the window.
///
/// Always satisfies `start < end` with both inside the window.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent<'a> {
    pub section: &'a Section,
    pub day: Weekday,
    pub start: u32,
    pub end: u32,
}

/// Why a section contributes nothing to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DropReason {
    /// Start or end time is missing.
    MissingTime,
    /// No recognizable weekday in the day specifier.
    NoDays,
    /// Nothing left after clipping to the window.
    OutsideWindow,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DropReason::MissingTime => "missing start or end time",
            DropReason::NoDays => "no recognizable weekday",
            DropReason::OutsideWindow => "outside the visible window",
        };
        f.write_str(text)
    }
}

/// Outcome of projecting one section. A drop is a normal result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection<'a> {
    Placed(Vec<TimedEvent<'a>>),
    Dropped(DropReason),
}

impl<'a> Projection<'a> {
    pub fn events(&self) -> &[TimedEvent<'a>] {
        match self {
            Projection::Placed(events) => events,
            Projection::Dropped(_) => &[],
        }
    }

    pub fn into_events(self) -> Vec<TimedEvent<'a>> {
        match self {
            Projection::Placed(events) => events,
            Projection::Dropped(_) => Vec::new(),
        }
    }

    pub fn drop_reason(&self) -> Option<DropReason> {
        match self {
            Projection::Placed(_) => None,
            Projection::Dropped(reason) => Some(*reason),
        }
    }
}

/// Projects a section onto the week, one event per parsed day token.
///
/// Duplicate day tokens produce duplicate events.
pub fn project(section: &Section, window: Window) -> Projection<'_> {
    let start = parse_clock(section.start_time.as_deref());
    let end = parse_clock(section.end_time.as_deref());
    let days = parse_days(section.days.as_deref());

    let (Some(start), Some(end)) = (start, end) else {
        return Projection::Dropped(DropReason::MissingTime);
    };
    if days.is_empty() {
        return Projection::Dropped(DropReason::NoDays);
    }

    let start = start.max(window.start);
    let end = end.min(window.end);
    if end <= start {
        return Projection::Dropped(DropReason::OutsideWindow);
    }

    Projection::Placed(
        days.into_iter()
            .map(|day| TimedEvent {
                section,
                day,
                start,
                end,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(days: &str, start: &str, end: &str) -> Section {
        Section {
            section_id: "A".to_string(),
            course_code: "EECS2030".to_string(),
            days: Some(days.to_string()),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            ..Section::default()
        }
    }

    #[test]
    fn emits_one_event_per_day() {
        let sec = section("MWF", "09:30", "10:20");
        let projection = project(&sec, Window::default());
        let days: Vec<Weekday> = projection.events().iter().map(|e| e.day).collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        for event in projection.events() {
            assert_eq!((event.start, event.end), (570, 620));
            assert_eq!(event.section.section_id, "A");
        }
    }

    #[test]
    fn clips_to_window_start() {
        let sec = section("Mon", "07:00", "09:00");
        let events = project(&sec, Window::default()).into_events();
        assert_eq!(events.len(), 1);
        assert_eq!((events[0].start, events[0].end), (480, 540));
    }

    #[test]
    fn clips_to_window_end() {
        let sec = section("TR", "18:00", "21:00");
        let events = project(&sec, Window::default()).into_events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.start == 1080 && e.end == 1140));
    }

    #[test]
    fn drops_sections_outside_window() {
        let early = section("M", "06:00", "07:30");
        let late = section("M", "19:30", "21:00");
        let touching = section("M", "07:00", "08:00");
        for sec in [&early, &late, &touching] {
            assert_eq!(
                project(sec, Window::default()).drop_reason(),
                Some(DropReason::OutsideWindow)
            );
        }
    }

    #[test]
    fn drops_non_positive_durations() {
        let zero = section("M", "10:00", "10:00");
        let backwards = section("M", "11:00", "10:00");
        assert!(project(&zero, Window::default()).events().is_empty());
        assert!(project(&backwards, Window::default()).events().is_empty());
    }

    #[test]
    fn drops_missing_times() {
        let mut sec = section("MWF", "09:30", "10:20");
        sec.end_time = None;
        assert_eq!(
            project(&sec, Window::default()),
            Projection::Dropped(DropReason::MissingTime)
        );
        sec.end_time = Some(String::new());
        assert_eq!(
            project(&sec, Window::default()).drop_reason(),
            Some(DropReason::MissingTime)
        );
    }

    #[test]
    fn drops_unknown_days() {
        let sec = section("Sat,Sun", "09:30", "10:20");
        assert_eq!(
            project(&sec, Window::default()).drop_reason(),
            Some(DropReason::NoDays)
        );
    }

    #[test]
    fn duplicate_days_yield_duplicate_events() {
        let sec = section("Mon,Mon", "09:00", "10:00");
        assert_eq!(project(&sec, Window::default()).events().len(), 2);
    }

    #[test]
    fn honors_custom_window() {
        let sec = section("F", "07:00", "09:00");
        let window = Window {
            start: 6 * 60,
            end: 8 * 60 + 30,
        };
        let events = project(&sec, window).into_events();
        assert_eq!((events[0].start, events[0].end), (420, 510));
    }

    #[test]
    fn projection_is_repeatable() {
        let sec = section("TR", "13:00", "14:30");
        assert_eq!(
            project(&sec, Window::default()),
            project(&sec, Window::default())
        );
    }
}
