use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::timeline::scale::{epoch_millis, TimeScale};
use crate::timeline::types::Commit;

/// Where the time slider currently cuts the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdCut {
    /// Slider position in [0, 100].
    pub progress: f64,
    /// Latest instant still shown, in epoch milliseconds.
    pub cutoff_ms: f64,
}

impl ThresholdCut {
    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.cutoff_ms.trunc() as i64)
    }
}

/// Keep the candidate commits made at or before the slider's cutoff.
///
/// `scale` maps the full commit timeline onto [0, 100]; `progress` is
/// clamped into that range and inverted to a cutoff instant. Candidate
/// order is preserved. A progress of 100 keeps every candidate and 0 keeps
/// only those at the earliest instant.
pub fn filter_commits_by_threshold(
    commits: &[Commit],
    candidates: &[usize],
    scale: &TimeScale,
    progress: f64,
) -> (ThresholdCut, Vec<usize>) {
    let progress = progress.clamp(0.0, 100.0);
    let cutoff_ms = scale.invert_millis(progress);

    let kept = candidates
        .iter()
        .copied()
        .filter(|&idx| {
            commits
                .get(idx)
                .is_some_and(|c| epoch_millis(&c.summary.datetime) <= cutoff_ms)
        })
        .collect();

    (ThresholdCut { progress, cutoff_ms }, kept)
}
