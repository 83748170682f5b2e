use serde::{Deserialize, Serialize};

/// One meeting pattern of a course as returned by the schedule builder.
///
/// Every field is optional on the wire. Day and time strings are kept raw;
/// they are only interpreted when the section is projected onto the grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    #[serde(alias = "SectionId")]
    pub section_id: String,
    #[serde(alias = "CourseCode")]
    pub course_code: String,
    #[serde(alias = "Term")]
    pub term: Option<String>,
    #[serde(alias = "Instructor")]
    pub instructor: Option<String>,
    #[serde(alias = "Days")]
    pub days: Option<String>,
    #[serde(alias = "StartTime")]
    pub start_time: Option<String>,
    #[serde(alias = "EndTime")]
    pub end_time: Option<String>,
    #[serde(alias = "Location")]
    pub location: Option<String>,
    #[serde(alias = "Capacity", deserialize_with = "csv::invalid_option")]
    pub capacity: Option<u32>,
}

impl Section {
    /// Course code with whitespace removed and letters upper-cased,
    /// so "eecs 2030" and "EECS2030" compare equal.
    pub fn normalized_course_code(&self) -> String {
        self.course_code
            .split_whitespace()
            .collect::<String>()
            .to_uppercase()
    }
}

/// Body of a schedule-build response: `{ "term": ..., "chosenSections": [...] }`.
///
/// `chosenSections` is required so that an unrelated object is rejected
/// instead of reading as an empty schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub term: Option<String>,
    pub chosen_sections: Vec<Section>,
}
