use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::InputError;
use crate::models::{ScheduleResponse, Section};

/// Sections to lay out, plus the term they were built for when known.
#[derive(Debug, Clone, Default)]
pub struct ScheduleInput {
    pub term: Option<String>,
    pub sections: Vec<Section>,
}

/// Loads sections from a `.csv` export or a JSON schedule-build response.
pub fn load_sections(path: &Path) -> Result<ScheduleInput, InputError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let input = if is_csv {
        ScheduleInput {
            term: None,
            sections: read_csv(path)?,
        }
    } else {
        read_json(path)?
    };

    info!(
        path = %path.display(),
        sections = input.sections.len(),
        "loaded sections"
    );
    Ok(input)
}

pub fn read_json(path: &Path) -> Result<ScheduleInput, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&content).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts either `{ "term", "chosenSections" }` or a bare array of sections.
pub fn parse_json(content: &str) -> Result<ScheduleInput, serde_json::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        Bare(Vec<Section>),
        Response(ScheduleResponse),
    }

    Ok(match serde_json::from_str(content)? {
        Payload::Bare(sections) => ScheduleInput {
            term: None,
            sections,
        },
        Payload::Response(response) => ScheduleInput {
            term: response.term,
            sections: response.chosen_sections,
        },
    })
}

/// Reads a section sheet with the header
/// `SectionId,CourseCode,Term,Instructor,Days,StartTime,EndTime,Location,Capacity`.
/// Blank cells are missing values; `#` lines are comments.
/// Rows whose field count differs from the header are errors, since an
/// unquoted `Mon,Wed` would otherwise shift every later column.
pub fn read_csv(path: &Path) -> Result<Vec<Section>, InputError> {
    read_csv_from(sheet_reader().from_path(path)?)
}

fn sheet_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).comment(Some(b'#'));
    builder
}

fn read_csv_from<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Section>, InputError> {
    let mut sections = Vec::new();
    for result in reader.deserialize::<Section>() {
        let section = result?;
        debug!(section = %section.section_id, course = %section.course_code, "read section row");
        sections.push(section);
    }
    Ok(sections)
}

/// Keeps sections for the given term (case-insensitive, blank = any) whose
/// normalized course code is listed (empty list = any).
pub fn filter_sections(sections: Vec<Section>, term: Option<&str>, courses: &[String]) -> Vec<Section> {
    let term = term.map(str::trim).filter(|term| !term.is_empty());
    let wanted: Vec<String> = courses
        .iter()
        .map(|code| code.split_whitespace().collect::<String>().to_uppercase())
        .collect();

    sections
        .into_iter()
        .filter(|section| match term {
            Some(term) => section
                .term
                .as_deref()
                .is_some_and(|value| value.trim().eq_ignore_ascii_case(term)),
            None => true,
        })
        .filter(|section| wanted.is_empty() || wanted.contains(&section.normalized_course_code()))
        .collect()
}
