use std::collections::BTreeMap;

use super::types::{Commit, LanguageShare};

/// Format a proportion with one decimal place, like d3's `.1%`.
///
/// Ties round away from zero (`0.25%` shows as `0.3%`), matching the
/// JavaScript `toFixed` the chart labels were designed against.
pub fn format_percent(proportion: f64) -> String {
    let tenths = (proportion * 100.0 * 10.0).round();
    format!("{:.1}%", tenths / 10.0)
}

/// Per-language line counts over the lines of `commits`.
///
/// Types are compared lower-cased and entries are sorted by language name.
/// No commits (or commits without lines) gives an empty breakdown.
pub fn language_breakdown<'a>(commits: impl IntoIterator<Item = &'a Commit>) -> Vec<LanguageShare> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total = 0usize;
    for line in commits.into_iter().flat_map(|c| c.lines.iter()) {
        *counts.entry(line.line_type.to_lowercase()).or_insert(0) += 1;
        total += 1;
    }

    counts
        .into_iter()
        .map(|(language, count)| {
            let proportion = count as f64 / total as f64;
            LanguageShare {
                language,
                count,
                proportion,
                formatted: format_percent(proportion),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::aggregate::tests::sample_commits;

    #[test]
    fn test_breakdown_sorted_and_normalized() {
        let commits = sample_commits();
        let shares = language_breakdown(&commits);
        let langs: Vec<_> = shares.iter().map(|s| s.language.as_str()).collect();
        assert_eq!(langs, vec!["css", "html", "js"]);
        assert_eq!(shares[2].count, 4);
        assert_eq!(shares[2].formatted, "66.7%");
        let sum: f64 = shares.iter().map(|s| s.proportion).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_of_one_commit() {
        let commits = sample_commits();
        let shares = language_breakdown(std::iter::once(&commits[1]));
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].language, "js");
        assert_eq!(shares[0].formatted, "100.0%");
    }

    #[test]
    fn test_format_percent_rounds_ties_up() {
        assert_eq!(format_percent(1.0 / 400.0), "0.3%");
        assert_eq!(format_percent(49.0 / 400.0), "12.3%");
        assert_eq!(format_percent(2.0 / 3.0), "66.7%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn test_breakdown_of_small_share() {
        let commits = sample_commits();
        let mut commit = commits[1].clone();
        let template = commit.lines[0].clone();
        commit.lines = (0..400)
            .map(|i| {
                let mut line = template.clone();
                line.line = i + 1;
                line.line_type = if i == 0 { "css".into() } else { "js".into() };
                line
            })
            .collect();
        let shares = language_breakdown(std::iter::once(&commit));
        assert_eq!(shares[0].language, "css");
        assert_eq!(shares[0].formatted, "0.3%");
    }

    #[test]
    fn test_breakdown_empty_selection() {
        assert!(language_breakdown(std::iter::empty()).is_empty());
    }
}
