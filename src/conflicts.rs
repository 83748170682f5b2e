//! Overlapping blocks within a day column.
//!
//! The schedule builder is supposed to return a clash-free selection, so any
//! hit here points at bad upstream data rather than a layout problem.

use std::fmt;

use serde::Serialize;

use crate::clock::format_clock;
use crate::days::Weekday;
use crate::renderer::{EventBlock, Timetable};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlap {
    pub day: Weekday,
    pub first: String,
    pub second: String,
    pub start: u32,
    pub end: u32,
}

impl fmt::Display for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}: {} overlaps {}",
            self.day,
            format_clock(self.start),
            format_clock(self.end),
            self.first,
            self.second
        )
    }
}

/// Pairs of blocks on the same day whose clipped spans intersect.
///
/// Spans are half-open, so a class ending at 10:00 does not clash with one
/// starting at 10:00. Repeated day tokens of one section are not reported.
pub fn find_overlaps(timetable: &Timetable) -> Vec<Overlap> {
    let mut overlaps = Vec::new();

    for column in &timetable.columns {
        for (index, first) in column.blocks.iter().enumerate() {
            for second in &column.blocks[index + 1..] {
                if same_section(first, second) {
                    continue;
                }
                if first.start_minute < second.end_minute && second.start_minute < first.end_minute {
                    overlaps.push(Overlap {
                        day: column.day,
                        first: first.label.clone(),
                        second: second.label.clone(),
                        start: first.start_minute.max(second.start_minute),
                        end: first.end_minute.min(second.end_minute),
                    });
                }
            }
        }
    }

    overlaps
}

fn same_section(a: &EventBlock, b: &EventBlock) -> bool {
    a.section_id == b.section_id && a.course_code == b.course_code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridConfig;
    use crate::models::Section;
    use crate::renderer::render;

    fn section(id: &str, code: &str, days: &str, start: &str, end: &str) -> Section {
        Section {
            section_id: id.to_string(),
            course_code: code.to_string(),
            days: Some(days.to_string()),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            ..Section::default()
        }
    }

    #[test]
    fn reports_clash_window_per_day() {
        let sections = vec![
            section("A", "EECS2030", "MWF", "09:30", "10:20"),
            section("M", "MATH1013", "Mon,Tue", "10:00", "11:00"),
        ];
        let overlaps = find_overlaps(&render(&sections, &GridConfig::default()));
        assert_eq!(overlaps.len(), 1);
        let overlap = &overlaps[0];
        assert_eq!(overlap.day, Weekday::Mon);
        assert_eq!((overlap.start, overlap.end), (600, 620));
        assert_eq!(overlap.to_string(), "Mon 10:00-10:20: EECS2030 A overlaps MATH1013 M");
    }

    #[test]
    fn touching_ends_do_not_clash() {
        let sections = vec![
            section("A", "EECS2030", "TR", "09:00", "10:00"),
            section("B", "EECS2031", "TR", "10:00", "11:00"),
        ];
        assert!(find_overlaps(&render(&sections, &GridConfig::default())).is_empty());
    }

    #[test]
    fn repeated_day_tokens_are_not_conflicts() {
        let sections = vec![section("A", "EECS2030", "Mon,Mon", "09:00", "10:00")];
        assert!(find_overlaps(&render(&sections, &GridConfig::default())).is_empty());
    }

    #[test]
    fn uses_clipped_spans() {
        let sections = vec![
            section("A", "EECS2030", "F", "06:00", "08:00"),
            section("B", "EECS2031", "F", "07:00", "09:00"),
        ];
        // The first section is entirely before the window and never reaches the grid.
        assert!(find_overlaps(&render(&sections, &GridConfig::default())).is_empty());
    }
}
