use std::fmt::Write;

use chrono::NaiveDate;

use crate::clock::format_clock;
use crate::conflicts::find_overlaps;
use crate::days::Weekday;
use crate::layout::GridConfig;
use crate::renderer::Timetable;

const MISSING_DATA_TIP: &str =
    "Tip: if a course has no sections for the selected term, the schedule will be incomplete.";

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub day: Weekday,
    pub count: usize,
    pub minutes: u32,
}

pub fn summarize_by_day(timetable: &Timetable) -> Vec<DaySummary> {
    timetable
        .columns
        .iter()
        .map(|column| DaySummary {
            day: column.day,
            count: column.blocks.len(),
            minutes: column
                .blocks
                .iter()
                .map(|block| block.end_minute - block.start_minute)
                .sum(),
        })
        .collect()
}

pub fn build_report(
    term: Option<&str>,
    generated_on: NaiveDate,
    timetable: &Timetable,
    config: &GridConfig,
) -> String {
    let summaries = summarize_by_day(timetable);
    let overlaps = find_overlaps(timetable);

    let mut output = String::new();
    let term_label = term.unwrap_or("unspecified term");

    let _ = writeln!(output, "# Weekly Timetable");
    let _ = writeln!(output, "Generated for {} on {}", term_label, generated_on);
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Grid {} to {} in {}-minute slots ({} rows).",
        format_clock(config.window_start),
        format_clock(config.window_end),
        config.slot_minutes,
        timetable.rows.len()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weekly Load");
    for summary in &summaries {
        let _ = writeln!(
            output,
            "- {}: {} classes, {:.1} hours",
            summary.day,
            summary.count,
            f64::from(summary.minutes) / 60.0
        );
    }

    for column in &timetable.columns {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", column.day);

        if column.blocks.is_empty() {
            let _ = writeln!(output, "No classes.");
            continue;
        }

        for block in &column.blocks {
            let _ = write!(output, "- {} {}", block.time_text, block.label);
            if let Some(location) = &block.location {
                let _ = write!(output, " @ {}", location);
            }
            let _ = writeln!(
                output,
                " (top {:.0}px, height {:.0}px)",
                block.event_box.top, block.event_box.height
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Data Quality");

    if timetable.dropped.is_empty() && overlaps.is_empty() {
        let _ = writeln!(output, "All sections placed.");
    } else {
        for dropped in &timetable.dropped {
            let _ = writeln!(
                output,
                "- {} {} not shown: {}",
                dropped.course_code, dropped.section_id, dropped.reason
            );
        }
        for overlap in &overlaps {
            let _ = writeln!(output, "- {}", overlap);
        }
    }
    if !timetable.dropped.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "{}", MISSING_DATA_TIP);
    }

    output
}

/// Standalone HTML page with a time column and five positioned day columns.
pub fn build_html(term: Option<&str>, timetable: &Timetable, config: &GridConfig) -> String {
    let height = config.grid_height();
    let mut output = String::new();

    let _ = writeln!(output, "<!DOCTYPE html>");
    let _ = writeln!(output, "<html><head><meta charset=\"utf-8\">");
    let _ = writeln!(
        output,
        "<title>Timetable {}</title>",
        escape_html(term.unwrap_or_default())
    );
    let _ = writeln!(output, "<style>");
    let _ = writeln!(output, ".schedTable {{ display: flex; font-family: sans-serif; font-size: 12px; }}");
    let _ = writeln!(output, ".schedTimeCol, .schedDayCol {{ position: relative; width: 140px; height: {height}px; }}");
    let _ = writeln!(output, ".schedTimeCol {{ width: 60px; }}");
    let _ = writeln!(output, ".timeCell, .gridRow {{ position: absolute; left: 0; right: 0; height: {}px; box-sizing: border-box; border-top: 1px solid #ddd; }}", config.slot_px);
    let _ = writeln!(output, ".schedEvent {{ position: absolute; left: 2px; right: 2px; overflow: hidden; background: #e3ecff; border: 1px solid #7a9be0; border-radius: 4px; box-sizing: border-box; }}");
    let _ = writeln!(output, ".schedDayHead {{ text-align: center; font-weight: bold; }}");
    let _ = writeln!(output, "</style></head><body>");
    let _ = writeln!(output, "<div class=\"schedTable\">");

    let _ = writeln!(output, "<div><div class=\"schedDayHead\">Time</div><div class=\"schedTimeCol\">");
    for row in &timetable.rows {
        let _ = writeln!(
            output,
            "<div class=\"timeCell\" style=\"top: {}px\"><span>{}</span></div>",
            row.top, row.label
        );
    }
    let _ = writeln!(output, "</div></div>");

    for column in &timetable.columns {
        let _ = writeln!(
            output,
            "<div><div class=\"schedDayHead\">{}</div><div class=\"schedDayCol\" data-day=\"{}\">",
            column.day,
            column.day.code()
        );
        for row in &timetable.rows {
            let _ = writeln!(output, "<div class=\"gridRow\" style=\"top: {}px\"></div>", row.top);
        }
        for block in &column.blocks {
            let title = format!(
                "{} @ {}",
                block.label,
                block.location.as_deref().unwrap_or_default()
            );
            let _ = writeln!(
                output,
                "<div class=\"schedEvent\" style=\"top: {}px; height: {}px\" title=\"{}\">",
                block.event_box.top,
                block.event_box.height,
                escape_html(&title)
            );
            let _ = writeln!(output, "<div class=\"schedCode\">{}</div>", escape_html(&block.course_code));
            let _ = writeln!(output, "<div class=\"schedMeta\">{}</div>", escape_html(&block.time_text));
            if let Some(location) = &block.location {
                let _ = writeln!(output, "<div class=\"schedMeta\">{}</div>", escape_html(location));
            }
            let _ = writeln!(output, "</div>");
        }
        let _ = writeln!(output, "</div></div>");
    }

    let _ = writeln!(output, "</div>");
    if !timetable.dropped.is_empty() {
        let _ = writeln!(output, "<p class=\"muted\">{}</p>", MISSING_DATA_TIP);
    }
    let _ = writeln!(output, "</body></html>");

    output
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;
    use crate::renderer::render;

    fn sample() -> Vec<Section> {
        vec![
            Section {
                section_id: "A".to_string(),
                course_code: "EECS2030".to_string(),
                days: Some("MWF".to_string()),
                start_time: Some("09:30:00".to_string()),
                end_time: Some("10:20:00".to_string()),
                location: Some("LAS B".to_string()),
                ..Section::default()
            },
            Section {
                section_id: "Z".to_string(),
                course_code: "PHYS1800".to_string(),
                days: Some("TR".to_string()),
                ..Section::default()
            },
        ]
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 8).unwrap()
    }

    #[test]
    fn summarizes_minutes_per_day() {
        let timetable = render(&sample(), &GridConfig::default());
        let summaries = summarize_by_day(&timetable);
        assert_eq!(summaries.len(), 5);
        assert_eq!(summaries[0].count, 1);
        assert_eq!(summaries[0].minutes, 50);
        assert_eq!(summaries[1].count, 0);
    }

    #[test]
    fn report_lists_days_and_dropped_sections() {
        let config = GridConfig::default();
        let timetable = render(&sample(), &config);
        let report = build_report(Some("FALL 2026"), date(), &timetable, &config);

        assert!(report.starts_with("# Weekly Timetable\nGenerated for FALL 2026 on 2026-09-08"));
        assert!(report.contains("Grid 8:00 to 19:00 in 30-minute slots (22 rows)."));
        assert!(report.contains("## Mon\n- 09:30–10:20 EECS2030 A @ LAS B (top 90px, height 50px)"));
        assert!(report.contains("## Tue\nNo classes."));
        assert!(report.contains("- PHYS1800 Z not shown: missing start or end time"));
        assert!(report.contains(MISSING_DATA_TIP));
    }

    #[test]
    fn clean_report_has_no_tip() {
        let config = GridConfig::default();
        let timetable = render(&sample()[..1], &config);
        let report = build_report(None, date(), &timetable, &config);
        assert!(report.contains("Generated for unspecified term"));
        assert!(report.contains("All sections placed."));
        assert!(!report.contains("Tip:"));
    }

    #[test]
    fn html_positions_blocks_and_escapes_text() {
        let mut sections = sample();
        sections[0].location = Some("<Lassonde> & Co".to_string());
        let config = GridConfig::default();
        let timetable = render(&sections, &config);
        let html = build_html(Some("FALL 2026"), &timetable, &config);

        assert!(html.contains("style=\"top: 90px; height: 50px\""));
        assert!(html.contains("&lt;Lassonde&gt; &amp; Co"));
        assert!(!html.contains("<Lassonde>"));
        assert_eq!(html.matches("class=\"schedEvent\"").count(), 3);
        assert_eq!(html.matches("class=\"gridRow\"").count(), 5 * 22);
        assert_eq!(html.matches("class=\"timeCell\"").count(), 22);
        assert!(html.contains("class=\"schedDayCol\" data-day=\"THU\""));
        assert!(html.contains("height: 660px"));
    }

    #[test]
    fn html_column_covers_partial_last_slot() {
        let config = GridConfig {
            window_end: 545,
            ..GridConfig::default()
        };
        let timetable = render(&sample(), &config);
        let html = build_html(None, &timetable, &config);
        assert!(html.contains("height: 65px"));
        assert_eq!(html.matches("class=\"timeCell\"").count(), 2);
    }
}
