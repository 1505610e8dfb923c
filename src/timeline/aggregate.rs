use std::collections::{HashMap, HashSet};

use chrono::Timelike;

use super::types::{Commit, CommitSummary, FileLines, LineChangeRecord, LineUnit, SummaryStats};

/// Number of distinct colors in the file-type palette.
const PALETTE_SIZE: u32 = 10;

/// Group line records into commits.
///
/// Commits come out in the order their ids first appear. Each commit takes
/// its metadata from its first row; `url` is `url_base` followed by the id.
pub fn group_commits(records: Vec<LineChangeRecord>, url_base: &str) -> Vec<Commit> {
    let mut group_of: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<LineChangeRecord>> = Vec::new();

    for record in records {
        match group_of.get(&record.commit_id) {
            Some(&idx) => groups[idx].push(record),
            None => {
                group_of.insert(record.commit_id.clone(), groups.len());
                groups.push(vec![record]);
            }
        }
    }

    groups
        .into_iter()
        .filter_map(|lines| build_commit(lines, url_base))
        .collect()
}

fn build_commit(lines: Vec<LineChangeRecord>, url_base: &str) -> Option<Commit> {
    let first = lines.first()?;
    let datetime = first.datetime;
    let summary = CommitSummary {
        id: first.commit_id.clone(),
        url: format!("{}{}", url_base, first.commit_id),
        author: first.author.clone(),
        date: first.date,
        time: first.time.clone(),
        timezone: first.timezone.clone(),
        datetime,
        hour_frac: datetime.hour() as f64 + datetime.minute() as f64 / 60.0,
        total_lines: lines.len(),
    };
    Some(Commit { summary, lines })
}

/// Dataset-wide figures over every line of every commit.
pub fn summary_stats(commits: &[Commit]) -> SummaryStats {
    let lines = || commits.iter().flat_map(|c| c.lines.iter());

    SummaryStats {
        commits: commits.len(),
        files: lines().map(|l| l.file.as_str()).collect::<HashSet<_>>().len(),
        total_loc: lines().count(),
        max_depth: lines().map(|l| l.depth).max(),
        longest_line: lines().map(|l| l.length).max(),
        max_lines: lines().map(|l| l.line).max(),
    }
}

/// Lines of `commits` grouped by file, largest file first.
///
/// Files with equal line counts keep first-seen order. Line types are
/// lower-cased and given palette slots in the order they are first drawn.
pub fn file_breakdown<'a>(commits: impl IntoIterator<Item = &'a Commit>) -> Vec<FileLines> {
    let mut file_of: HashMap<&str, usize> = HashMap::new();
    let mut files: Vec<(&str, Vec<&LineChangeRecord>)> = Vec::new();

    for line in commits.into_iter().flat_map(|c| c.lines.iter()) {
        match file_of.get(line.file.as_str()) {
            Some(&idx) => files[idx].1.push(line),
            None => {
                file_of.insert(line.file.as_str(), files.len());
                files.push((line.file.as_str(), vec![line]));
            }
        }
    }

    files.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut palette: HashMap<String, u32> = HashMap::new();
    files
        .into_iter()
        .map(|(name, lines)| {
            let units = lines
                .iter()
                .map(|line| {
                    let line_type = line.line_type.to_lowercase();
                    let next = palette.len() as u32;
                    let color_index = *palette.entry(line_type.clone()).or_insert(next) % PALETTE_SIZE;
                    LineUnit {
                        line_type,
                        color_index,
                    }
                })
                .collect::<Vec<_>>();
            FileLines {
                name: name.to_string(),
                line_count: units.len(),
                lines: units,
            }
        })
        .collect()
}
