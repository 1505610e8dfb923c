pub mod brush_filter;
pub mod search;
pub mod time_filter;

pub use brush_filter::{select_in_rect, selection_label, BrushRect};
pub use search::{filter_records, matches, matching_indices, Searchable};
pub use time_filter::{filter_commits_by_threshold, ThresholdCut};
