use super::aggregate::{file_breakdown, group_commits, summary_stats};
use super::breakdown::language_breakdown;
use super::parser::parse_rows;
use super::scale::TimeScale;
use super::scatter::layout_points;
use super::types::*;
use crate::config::Config;
use crate::error::Result;
use crate::filter::{
    filter_commits_by_threshold, matching_indices, select_in_rect, selection_label, BrushRect,
    ThresholdCut,
};

/// View state of the commit timeline page.
///
/// Three index sets narrow each other: `filtered` (search, then time
/// threshold) ⊇ `plotted` (what the chart shows) ⊇ `selected` (brushed).
/// Any change to an outer set clears the selection.
#[derive(Debug, Clone)]
pub struct TimelineSession {
    config: Config,
    commits: Vec<Commit>,
    rejected: Vec<RowRejection>,
    time_scale: Option<TimeScale>,
    query: String,
    cut: Option<ThresholdCut>,
    filtered: Vec<usize>,
    plotted: Vec<usize>,
    selected: Vec<usize>,
}

impl TimelineSession {
    pub fn new(loaded: LoadedRows, config: Config) -> Self {
        let commits = group_commits(loaded.records, &config.commit_url_base);
        let time_scale = TimeScale::from_extent(commits.iter().map(|c| &c.summary.datetime), (0.0, 100.0));
        log::debug!("Timeline session holds {} commits", commits.len());

        let progress = config.initial_progress;
        let mut session = TimelineSession {
            config,
            commits,
            rejected: loaded.rejected,
            time_scale,
            query: String::new(),
            cut: None,
            filtered: Vec::new(),
            plotted: Vec::new(),
            selected: Vec::new(),
        };
        session.apply_filters(progress);
        session
    }

    /// Build a session from fetched CSV text. `None` means the fetch failed
    /// and yields an empty session.
    pub fn from_csv(csv: Option<&str>, config: Config) -> Result<Self> {
        let loaded = match csv {
            Some(text) => parse_rows(text)?,
            None => {
                log::warn!("No commit data available; starting with an empty timeline");
                LoadedRows::default()
            }
        };
        Ok(TimelineSession::new(loaded, config))
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn rejected(&self) -> &[RowRejection] {
        &self.rejected
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cut(&self) -> Option<&ThresholdCut> {
        self.cut.as_ref()
    }

    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn plotted(&self) -> &[usize] {
        &self.plotted
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn stats(&self) -> SummaryStats {
        summary_stats(&self.commits)
    }

    fn commits_at<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a Commit> + 'a {
        indices.iter().filter_map(move |&i| self.commits.get(i))
    }

    pub fn selected_commits(&self) -> impl Iterator<Item = &Commit> + '_ {
        self.commits_at(&self.selected)
    }

    /// A commit matches the search when its summary or any of its lines does.
    fn search_candidates(&self) -> Vec<usize> {
        matching_indices(&self.commits, &self.query)
    }

    fn apply_filters(&mut self, progress: f64) {
        let candidates = self.search_candidates();
        match &self.time_scale {
            Some(scale) => {
                let (cut, kept) = filter_commits_by_threshold(&self.commits, &candidates, scale, progress);
                self.cut = Some(cut);
                self.filtered = kept;
            }
            None => {
                self.cut = None;
                self.filtered = candidates;
            }
        }
        self.plotted = self.filtered.clone();
        self.selected.clear();
    }

    /// Change the search query. Resets the time slider to 100 and clears
    /// the selection.
    pub fn set_search(&mut self, query: &str) {
        self.query = query.to_string();
        self.apply_filters(100.0);
    }

    /// Move the time slider. Clears the selection.
    pub fn set_progress(&mut self, progress: f64) {
        let progress = if progress.is_nan() {
            log::warn!("Ignoring non-numeric slider position");
            self.cut.map(|c| c.progress).unwrap_or(100.0)
        } else {
            progress
        };
        self.apply_filters(progress);
    }

    /// Chart points for the plotted commits.
    pub fn points(&self) -> Vec<ScatterPoint> {
        layout_points(&self.commits, &self.plotted, &self.config.chart)
    }

    /// Replace the selection with the plotted commits inside `rect`.
    /// `None` clears the selection.
    pub fn brush(&mut self, rect: Option<BrushRect>) -> &[usize] {
        let points = self.points();
        self.selected = select_in_rect(&points, rect.as_ref());
        &self.selected
    }

    pub fn clear_brush(&mut self) {
        self.selected.clear();
    }

    pub fn selection_label(&self) -> String {
        selection_label(self.selected.len())
    }

    pub fn language_breakdown(&self) -> Vec<LanguageShare> {
        language_breakdown(self.selected_commits())
    }

    /// Per-file line units for the plotted commits.
    pub fn files(&self) -> Vec<FileLines> {
        file_breakdown(self.commits_at(&self.plotted))
    }

    pub fn tooltip(&self, id: &str) -> Option<Tooltip> {
        self.commits.iter().find(|c| c.id() == id).map(|c| Tooltip {
            short_id: c.short_id().to_string(),
            url: c.summary.url.clone(),
            author: c.summary.author.clone(),
            datetime: c.summary.datetime,
            total_lines: c.summary.total_lines,
        })
    }

    /// Scroll the narrative list to `scroll_top` pixels.
    ///
    /// The chart then plots only the commits in the visible window, and the
    /// selection is cleared.
    pub fn scroll_to(&mut self, scroll_top: f64) -> ScrollWindow {
        let scrolly = &self.config.scrolly;
        let count = self.filtered.len();
        let last_start = count.saturating_sub(scrolly.visible_count);
        let raw_start = if scrolly.item_height > 0.0 && scroll_top.is_finite() {
            (scroll_top / scrolly.item_height).floor().max(0.0) as usize
        } else {
            0
        };
        let start = raw_start.min(last_start);
        let end = (start + scrolly.visible_count).min(count);

        let items = self.filtered[start..end]
            .iter()
            .enumerate()
            .filter_map(|(offset, &idx)| {
                let commit = self.commits.get(idx)?;
                Some(NarrativeItem {
                    index: start + offset,
                    top: offset as f64 * scrolly.item_height,
                    first: start + offset == 0,
                    files_touched: commit.files_touched(),
                    commit: commit.summary.clone(),
                })
            })
            .collect();
        let window = ScrollWindow {
            start,
            total_height: count as f64 * scrolly.item_height,
            items,
        };

        self.plotted = self.filtered[start..end].to_vec();
        self.selected.clear();
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrollyConfig;
    use crate::timeline::aggregate::tests::SAMPLE;

    fn session() -> TimelineSession {
        TimelineSession::from_csv(Some(SAMPLE), Config::default()).unwrap()
    }

    /// Rectangle covering the whole default chart.
    fn everything() -> Option<BrushRect> {
        Some(BrushRect::new(0.0, 0.0, 1000.0, 600.0))
    }

    #[test]
    fn test_initial_state_shows_everything() {
        let s = session();
        assert_eq!(s.commits().len(), 3);
        assert_eq!(s.filtered(), &[0, 1, 2]);
        assert_eq!(s.plotted(), &[0, 1, 2]);
        assert!(s.selected().is_empty());
        assert_eq!(s.selection_label(), "No commits selected");
        assert!(s.language_breakdown().is_empty());
    }

    #[test]
    fn test_absent_csv_is_empty_session() {
        let mut s = TimelineSession::from_csv(None, Config::default()).unwrap();
        assert!(s.commits().is_empty());
        assert!(s.cut().is_none());
        s.set_progress(50.0);
        assert!(s.points().is_empty());
        assert!(s.brush(everything()).is_empty());
        assert!(s.scroll_to(120.0).items.is_empty());
    }

    #[test]
    fn test_brush_selects_and_breaks_down() {
        let mut s = session();
        assert_eq!(s.brush(everything()).len(), 3);
        assert_eq!(s.selection_label(), "3 commits selected");
        let langs: Vec<_> = s.language_breakdown().into_iter().map(|l| l.language).collect();
        assert_eq!(langs, vec!["css", "html", "js"]);

        // Left edge only: commit "a" sits at x = 20.
        let picked = s.brush(Some(BrushRect::new(0.0, 0.0, 25.0, 600.0))).to_vec();
        assert_eq!(picked, vec![0]);
        assert_eq!(s.selection_label(), "1 commit selected");

        s.brush(None);
        assert!(s.selected().is_empty());
    }

    #[test]
    fn test_threshold_change_clears_selection() {
        let mut s = session();
        s.brush(everything());
        s.set_progress(60.0);
        assert!(s.selected().is_empty());
        assert_eq!(s.filtered(), &[0]);
        assert_eq!(s.brush(everything()), &[0]);
    }

    #[test]
    fn test_nan_progress_keeps_previous_threshold() {
        let mut s = session();
        s.set_progress(60.0);
        s.set_progress(f64::NAN);
        assert_eq!(s.cut().unwrap().progress, 60.0);
        assert_eq!(s.filtered(), &[0]);
    }

    #[test]
    fn test_search_resets_threshold_and_selection() {
        let mut s = session();
        s.set_progress(0.0);
        s.brush(everything());
        s.set_search("bob");
        assert_eq!(s.cut().unwrap().progress, 100.0);
        assert_eq!(s.filtered(), &[1]);
        assert!(s.selected().is_empty());

        // Matches through line records too.
        s.set_search("index.html");
        assert_eq!(s.filtered(), &[2]);

        s.set_search("");
        assert_eq!(s.filtered(), &[0, 1, 2]);
    }

    #[test]
    fn test_search_then_threshold_intersect() {
        let mut s = session();
        s.set_search("alice");
        assert_eq!(s.filtered(), &[0, 2]);
        s.set_progress(60.0);
        assert_eq!(s.filtered(), &[0]);
    }

    #[test]
    fn test_scroll_window() {
        let config = Config {
            scrolly: ScrollyConfig {
                item_height: 60.0,
                visible_count: 2,
            },
            ..Config::default()
        };
        let mut s = TimelineSession::from_csv(Some(SAMPLE), config).unwrap();
        s.brush(everything());

        let window = s.scroll_to(0.0);
        assert_eq!(window.start, 0);
        assert_eq!(window.total_height, 180.0);
        assert_eq!(window.items.len(), 2);
        assert!(window.items[0].first);
        assert_eq!(window.items[0].files_touched, 2);
        assert_eq!(window.items[1].top, 60.0);
        assert!(s.selected().is_empty());
        assert_eq!(s.plotted(), &[0, 1]);

        // Clamped so the window stays full.
        let window = s.scroll_to(10_000.0);
        assert_eq!(window.start, 1);
        assert_eq!(window.items[0].index, 1);
        assert!(!window.items[0].first);
        assert_eq!(s.plotted(), &[1, 2]);
        assert_eq!(s.files().len(), 2);

        assert_eq!(s.scroll_to(-50.0).start, 0);
    }

    #[test]
    fn test_tooltip() {
        let s = session();
        let tip = s.tooltip("b").unwrap();
        assert_eq!(tip.short_id, "b");
        assert_eq!(tip.author, "Bob");
        assert_eq!(tip.total_lines, 1);
        assert!(s.tooltip("zzz").is_none());
    }
}
