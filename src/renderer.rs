//! Composes projection and layout into per-day columns of positioned blocks.

use serde::Serialize;

use crate::clock::clip_display;
use crate::days::Weekday;
use crate::layout::{event_box, row_count, EventBox, GridConfig};
use crate::models::Section;
use crate::projector::{project, DropReason, Projection, TimedEvent};

/// A section meeting placed in its day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBlock {
    pub section_id: String,
    pub course_code: String,
    #[serde(rename = "box")]
    pub event_box: EventBox,
    /// `"<courseCode> <sectionId>"`
    pub label: String,
    /// `"HH:MM–HH:MM"` taken from the raw section times.
    pub time_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_minute: u32,
    pub end_minute: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub day: Weekday,
    pub blocks: Vec<EventBlock>,
}

/// Background row, one per slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowMarker {
    pub index: usize,
    pub label: String,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedSection {
    pub section_id: String,
    pub course_code: String,
    pub reason: DropReason,
}

/// Everything the presentation layer needs to draw one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    pub columns: Vec<DayColumn>,
    pub time_labels: Vec<String>,
    pub rows: Vec<RowMarker>,
    pub dropped: Vec<DroppedSection>,
}

impl Timetable {
    pub fn column(&self, day: Weekday) -> Option<&DayColumn> {
        self.columns.iter().find(|column| column.day == day)
    }

    pub fn block_count(&self) -> usize {
        self.columns.iter().map(|column| column.blocks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.block_count() == 0
    }
}

/// Lays out a section list. Columns keep projection order, rows depend only on the config.
pub fn render(sections: &[Section], config: &GridConfig) -> Timetable {
    let window = config.window();
    let mut events = Vec::new();
    let mut dropped = Vec::new();

    for section in sections {
        match project(section, window) {
            Projection::Placed(placed) => events.extend(placed),
            Projection::Dropped(reason) => dropped.push(DroppedSection {
                section_id: section.section_id.clone(),
                course_code: section.course_code.clone(),
                reason,
            }),
        }
    }

    let columns = Weekday::ALL
        .iter()
        .map(|&day| DayColumn {
            day,
            blocks: events
                .iter()
                .filter(|event| event.day == day)
                .map(|event| block(event, config))
                .collect(),
        })
        .collect();

    let time_labels = config.time_axis_labels();
    let rows = row_markers(&time_labels, config);

    Timetable {
        columns,
        time_labels,
        rows,
        dropped,
    }
}

fn block(event: &TimedEvent<'_>, config: &GridConfig) -> EventBlock {
    let section = event.section;
    EventBlock {
        section_id: section.section_id.clone(),
        course_code: section.course_code.clone(),
        event_box: event_box(event, config),
        label: format!("{} {}", section.course_code, section.section_id),
        time_text: format!(
            "{}–{}",
            clip_display(section.start_time.as_deref()),
            clip_display(section.end_time.as_deref())
        ),
        location: section
            .location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .map(str::to_string),
        start_minute: event.start,
        end_minute: event.end,
    }
}

fn row_markers(labels: &[String], config: &GridConfig) -> Vec<RowMarker> {
    labels
        .iter()
        .take(row_count(labels))
        .enumerate()
        .map(|(index, label)| RowMarker {
            index,
            label: label.clone(),
            top: index as f64 * config.slot_px,
        })
        .collect()
}
