use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::filter::search::Searchable;

/// One row of the line-level commit CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChangeRecord {
    pub commit_id: String,
    pub file: String,
    pub author: String,
    /// Local midnight of the commit's calendar date, in the row's timezone.
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    /// Authoritative instant of the commit.
    pub datetime: DateTime<FixedOffset>,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    #[serde(rename = "type")]
    pub line_type: String,
}

/// The serializable summary of a commit, without its line records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSummary {
    pub id: String,
    pub url: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    /// hour + minute / 60, always in [0, 24).
    pub hour_frac: f64,
    pub total_lines: usize,
}

/// A commit: its summary plus the line records it was built from.
///
/// `lines` is kept out of `summary` so anything that dumps or searches the
/// summary never sees the per-line data.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub summary: CommitSummary,
    pub lines: Vec<LineChangeRecord>,
}

impl Commit {
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn short_id(&self) -> &str {
        let id = self.id();
        match id.char_indices().nth(7) {
            Some((end, _)) => &id[..end],
            None => id,
        }
    }

    pub fn files_touched(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.file.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Searchable for LineChangeRecord {
    fn field_values(&self) -> Vec<String> {
        vec![
            self.commit_id.clone(),
            self.file.clone(),
            self.author.clone(),
            self.date.to_rfc3339(),
            self.time.clone(),
            self.timezone.clone(),
            self.datetime.to_rfc3339(),
            self.line.to_string(),
            self.depth.to_string(),
            self.length.to_string(),
            self.line_type.clone(),
        ]
    }
}

/// A commit matches on its summary or on any of its line records.
impl Searchable for Commit {
    fn field_values(&self) -> Vec<String> {
        let mut values = self.summary.field_values();
        values.extend(self.lines.iter().flat_map(|l| l.field_values()));
        values
    }
}

impl Searchable for CommitSummary {
    fn field_values(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.url.clone(),
            self.author.clone(),
            self.date.to_rfc3339(),
            self.time.clone(),
            self.timezone.clone(),
            self.datetime.to_rfc3339(),
            self.hour_frac.to_string(),
            self.total_lines.to_string(),
        ]
    }
}

/// A data row that failed to parse and was left out of aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRejection {
    /// 1-based index among data rows (the header is not counted).
    pub row: usize,
    pub reason: String,
}

/// Output of the row loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRows {
    pub records: Vec<LineChangeRecord>,
    pub rejected: Vec<RowRejection>,
}

/// Dataset-wide figures shown in the summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub commits: usize,
    pub files: usize,
    pub total_loc: usize,
    pub max_depth: Option<u32>,
    pub longest_line: Option<u32>,
    pub max_lines: Option<u32>,
}

/// One line drawn as a unit in the per-file breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineUnit {
    pub line_type: String,
    pub color_index: u32,
}

/// All lines of one file within a set of commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLines {
    pub name: String,
    pub line_count: usize,
    pub lines: Vec<LineUnit>,
}

/// Share of one language within the selected lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageShare {
    pub language: String,
    pub count: usize,
    pub proportion: f64,
    /// Proportion rendered with one decimal, e.g. "66.7%".
    pub formatted: String,
}

/// Broad time-of-day bucket used to color scatterplot dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeOfDay {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeOfDay::Night,
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TimeOfDay::Night => "#2c5282",
            TimeOfDay::Morning => "#ed8936",
            TimeOfDay::Afternoon => "#ecc94b",
            TimeOfDay::Evening => "#4299e1",
        }
    }
}

/// A commit projected into chart space, ready for the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// Position of the commit in the session's commit list.
    pub index: usize,
    pub id: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub total_lines: usize,
    pub time_of_day: TimeOfDay,
    pub color: String,
}

/// Hover card contents for one commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub short_id: String,
    pub url: String,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub total_lines: usize,
}

/// One narrative entry in the scrollytelling list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeItem {
    /// Absolute position within the scrolled list.
    pub index: usize,
    /// Offset from the top of the rendered window, in pixels.
    pub top: f64,
    pub first: bool,
    pub files_touched: usize,
    pub commit: CommitSummary,
}

/// The slice of commits currently rendered by the scrollytelling list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollWindow {
    pub start: usize,
    pub total_height: f64,
    pub items: Vec<NarrativeItem>,
}
