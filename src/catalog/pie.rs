use std::collections::HashMap;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::types::{ProjectRecord, Year};

/// One pie slice: a year and how many projects fall in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieDatum {
    pub label: Year,
    pub value: usize,
}

/// A slice with its angular extent, in radians clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieArc {
    pub index: usize,
    pub label: Year,
    pub value: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Count projects per year, one bucket per distinct year in first-seen order.
pub fn year_buckets<'a>(projects: impl IntoIterator<Item = &'a ProjectRecord>) -> Vec<PieDatum> {
    let mut bucket_of: HashMap<&Year, usize> = HashMap::new();
    let mut data: Vec<PieDatum> = Vec::new();
    for project in projects {
        match bucket_of.get(&project.year) {
            Some(&idx) => data[idx].value += 1,
            None => {
                bucket_of.insert(&project.year, data.len());
                data.push(PieDatum {
                    label: project.year.clone(),
                    value: 1,
                });
            }
        }
    }
    data
}

/// Lay slices around the circle in bucket order, each sweeping an angle
/// proportional to its value. The last slice ends at a full turn.
pub fn arcs(data: &[PieDatum]) -> Vec<PieArc> {
    let total: usize = data.iter().map(|d| d.value).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut running = 0usize;
    data.iter()
        .enumerate()
        .map(|(index, d)| {
            let start_angle = TAU * running as f64 / total as f64;
            running += d.value;
            PieArc {
                index,
                label: d.label.clone(),
                value: d.value,
                start_angle,
                end_angle: TAU * running as f64 / total as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parser::parse_catalog;

    fn projects() -> Vec<ProjectRecord> {
        parse_catalog(Some(
            r#"[{"title": "A", "year": 2021}, {"title": "B", "year": "2021"}, {"title": "C", "year": 2022}]"#,
        ))
        .unwrap()
    }

    #[test]
    fn test_year_buckets() {
        let data = year_buckets(&projects());
        assert_eq!(
            data,
            vec![
                PieDatum { label: Year::from(2021), value: 2 },
                PieDatum { label: Year::from(2022), value: 1 },
            ]
        );
    }

    #[test]
    fn test_arcs_cover_full_circle() {
        let arcs = arcs(&year_buckets(&projects()));
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].start_angle, 0.0);
        assert!((arcs[0].end_angle - TAU * 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(arcs[1].start_angle, arcs[0].end_angle);
        assert_eq!(arcs[1].end_angle, TAU);
    }

    #[test]
    fn test_arcs_empty() {
        assert!(arcs(&[]).is_empty());
    }
}
