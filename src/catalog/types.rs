use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{FolioError, Result};
use crate::filter::search::Searchable;

/// A project year in its single canonical form: trimmed text.
///
/// The catalog writes years both as numbers and as strings; both land
/// here, so `2021` and `"2021"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Year(String);

impl Year {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Year(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for Year {
    fn from(year: u32) -> Self {
        Year(year.to_string())
    }
}

impl From<&str> for Year {
    fn from(year: &str) -> Self {
        Year::new(year)
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawYear {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawYear::deserialize(deserializer)? {
            RawYear::Int(n) => Year(n.to_string()),
            RawYear::Float(n) => Year(n.to_string()),
            RawYear::Text(s) => Year::new(s),
        })
    }
}

/// One entry of the static project catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub year: Year,
    #[serde(default)]
    pub image: String,
    /// Any further fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Searchable for ProjectRecord {
    fn field_values(&self) -> Vec<String> {
        let mut values = vec![
            self.title.clone(),
            self.description.clone(),
            self.year.to_string(),
            self.image.clone(),
        ];
        values.extend(self.extra.values().map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }));
        values
    }
}

/// HTML heading level used for project card titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct HeadingLevel(u8);

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[hH](?P<level>[1-6])$").expect("heading pattern is valid"))
}

impl HeadingLevel {
    pub fn parse(raw: &str) -> Result<Self> {
        heading_pattern()
            .captures(raw.trim())
            .and_then(|caps| caps["level"].parse().ok())
            .map(HeadingLevel)
            .ok_or_else(|| FolioError::InvalidHeading(raw.to_string()))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        HeadingLevel(2)
    }
}

impl From<HeadingLevel> for String {
    fn from(h: HeadingLevel) -> String {
        format!("h{}", h.0)
    }
}

/// What the render sink needs to draw one project card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub heading: HeadingLevel,
    pub title: String,
    pub image: String,
    pub description: String,
    pub year: Year,
}

impl ProjectCard {
    pub fn new(project: &ProjectRecord, heading: HeadingLevel) -> Self {
        ProjectCard {
            heading,
            title: project.title.clone(),
            image: project.image.clone(),
            description: project.description.clone(),
            year: project.year.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_number_and_string_agree() {
        let a: Year = serde_json::from_str("2021").unwrap();
        let b: Year = serde_json::from_str("\" 2021 \"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Year::from(2021));
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"2021\"");
    }

    #[test]
    fn test_project_keeps_extra_fields() {
        let p: ProjectRecord = serde_json::from_str(
            r#"{"title": "Lab 4", "year": 2024, "url": "https://example.com", "stars": 3}"#,
        )
        .unwrap();
        assert_eq!(p.description, "");
        assert_eq!(p.extra.len(), 2);
        let values = p.field_values();
        assert!(values.contains(&"https://example.com".to_string()));
        assert!(values.contains(&"3".to_string()));
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(HeadingLevel::parse("h3").unwrap().level(), 3);
        assert_eq!(HeadingLevel::parse("H1").unwrap().level(), 1);
        assert!(HeadingLevel::parse("h7").is_err());
        assert!(HeadingLevel::parse("div").is_err());
        assert_eq!(String::from(HeadingLevel::default()), "h2");
    }
}
