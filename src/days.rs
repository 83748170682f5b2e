//! Day-of-week specifiers to canonical weekday tokens.
//!
//! Upstream data mixes two conventions: spelled-out lists such as
//! `"Mon,Wed"` or `"mon wed"`, and compact letter codes such as `"MWF"` or
//! `"TR"` where `R` is Thursday. Input containing a comma or the substring
//! `"mon"` is read as a list; everything else is read letter by letter.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Upper-case token, e.g. `"MON"`.
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
        }
    }

    /// Column heading, e.g. `"Mon"`.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
        }
    }

    fn from_word(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        if token.starts_with("mon") {
            Some(Weekday::Mon)
        } else if token.starts_with("tue") {
            Some(Weekday::Tue)
        } else if token.starts_with("wed") {
            Some(Weekday::Wed)
        } else if token.starts_with("thu") {
            Some(Weekday::Thu)
        } else if token.starts_with("fri") {
            Some(Weekday::Fri)
        } else {
            None
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(Weekday::Mon),
            'T' => Some(Weekday::Tue),
            'W' => Some(Weekday::Wed),
            'R' => Some(Weekday::Thu),
            'F' => Some(Weekday::Fri),
            _ => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a day specifier into weekdays in input order.
///
/// Duplicates are kept. Unrecognized tokens or letters are dropped.
pub fn parse_days(text: Option<&str>) -> Vec<Weekday> {
    let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
        return Vec::new();
    };

    if is_word_list(text) {
        parse_word_list(text)
    } else {
        parse_letters(text)
    }
}

fn is_word_list(text: &str) -> bool {
    text.contains(',') || text.to_lowercase().contains("mon")
}

// Hyphens are not separators: "Mon-Wed" is one token, so only its leading day matches.
fn parse_word_list(text: &str) -> Vec<Weekday> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(Weekday::from_word)
        .collect()
}

fn parse_letters(text: &str) -> Vec<Weekday> {
    text.to_uppercase()
        .chars()
        .filter_map(Weekday::from_letter)
        .collect()
}
