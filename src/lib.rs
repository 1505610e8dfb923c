pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod site;
pub mod timeline;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use catalog::{CatalogSession, HeadingLevel, PieArc, PieDatum, ProjectCard, ProjectRecord, Year};
use config::Config;
use filter::BrushRect;
use timeline::{LanguageShare, LoadedRows, RowRejection, TimelineSession};

// ---------------------------------------------------------------------------
// JSON helpers shared by every export.
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ErrorResult {
    error: String,
}

fn json_error(msg: &str) -> String {
    serde_json::to_string(&ErrorResult {
        error: msg.to_string(),
    })
    .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", msg.replace('"', "'")))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| json_error(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// Commit timeline
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadStatus<'a> {
    commits: usize,
    rejected: &'a [RowRejection],
    error: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterView {
    progress: Option<f64>,
    cutoff: Option<String>,
    visible_count: usize,
    visible_ids: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectionView {
    label: String,
    count: usize,
    selected_ids: Vec<String>,
    breakdown: Vec<LanguageShare>,
}

/// Owns the commit timeline page's data and view state.
///
/// Construction never fails: a missing or unreadable CSV yields an empty
/// timeline and the problem is reported by `status()`.
#[wasm_bindgen]
pub struct TimelineController {
    session: TimelineSession,
    load_error: Option<String>,
}

impl TimelineController {
    fn ids(&self, indices: &[usize]) -> Vec<String> {
        let commits = self.session.commits();
        indices
            .iter()
            .filter_map(|&i| commits.get(i).map(|c| c.id().to_string()))
            .collect()
    }

    fn filter_view(&self) -> FilterView {
        let cut = self.session.cut();
        FilterView {
            progress: cut.map(|c| c.progress),
            cutoff: cut.and_then(|c| c.cutoff()).map(|dt| dt.to_rfc3339()),
            visible_count: self.session.filtered().len(),
            visible_ids: self.ids(self.session.filtered()),
        }
    }

    fn selection_view(&self) -> SelectionView {
        SelectionView {
            label: self.session.selection_label(),
            count: self.session.selected().len(),
            selected_ids: self.ids(self.session.selected()),
            breakdown: self.session.language_breakdown(),
        }
    }
}

#[wasm_bindgen]
impl TimelineController {
    /// Load the line-level CSV. Pass `undefined` when the fetch failed.
    /// `config_json` optionally overrides chart and scroll settings.
    #[wasm_bindgen(constructor)]
    pub fn new(csv: Option<String>, config_json: Option<String>) -> TimelineController {
        let config = Config::from_json(config_json.as_deref());
        match TimelineSession::from_csv(csv.as_deref(), config.clone()) {
            Ok(session) => TimelineController {
                session,
                load_error: None,
            },
            Err(e) => {
                log::warn!("Failed to load commit data: {}", e);
                TimelineController {
                    session: TimelineSession::new(LoadedRows::default(), config),
                    load_error: Some(e.to_string()),
                }
            }
        }
    }

    /// Returns: JSON { commits, rejected: [{ row, reason }], error }.
    pub fn status(&self) -> String {
        to_json(&LoadStatus {
            commits: self.session.commits().len(),
            rejected: self.session.rejected(),
            error: self.load_error.as_deref(),
        })
    }

    /// Returns: JSON SummaryStats for the whole dataset.
    pub fn stats(&self) -> String {
        to_json(&self.session.stats())
    }

    /// Returns: JSON array of every commit summary, in load order.
    pub fn commits(&self) -> String {
        let summaries: Vec<_> = self.session.commits().iter().map(|c| &c.summary).collect();
        to_json(&summaries)
    }

    /// Set the search query. Resets the time slider and the selection.
    /// Returns: JSON { progress, cutoff, visibleCount, visibleIds }.
    pub fn set_search(&mut self, query: &str) -> String {
        self.session.set_search(query);
        to_json(&self.filter_view())
    }

    /// Move the time slider (0-100). Clears the selection.
    /// Returns: JSON { progress, cutoff, visibleCount, visibleIds }.
    pub fn set_progress(&mut self, progress: f64) -> String {
        self.session.set_progress(progress);
        to_json(&self.filter_view())
    }

    /// Returns: JSON array of ScatterPoint for the plotted commits.
    pub fn points(&self) -> String {
        to_json(&self.session.points())
    }

    /// Select the plotted commits inside the brushed rectangle.
    /// Returns: JSON { label, count, selectedIds, breakdown }.
    pub fn brush(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> String {
        self.session.brush(Some(BrushRect::new(x0, y0, x1, y1)));
        to_json(&self.selection_view())
    }

    /// Clear the selection (brush removed).
    /// Returns: JSON { label, count, selectedIds, breakdown }.
    pub fn clear_brush(&mut self) -> String {
        self.session.clear_brush();
        to_json(&self.selection_view())
    }

    /// Returns: JSON { label, count, selectedIds, breakdown } for the current selection.
    pub fn selection(&self) -> String {
        to_json(&self.selection_view())
    }

    /// Returns: JSON array of FileLines for the plotted commits.
    pub fn files(&self) -> String {
        to_json(&self.session.files())
    }

    /// Scroll the narrative list. The chart then plots the visible window.
    /// Returns: JSON ScrollWindow { start, totalHeight, items }.
    pub fn scroll_to(&mut self, scroll_top: f64) -> String {
        to_json(&self.session.scroll_to(scroll_top))
    }

    /// Returns: JSON Tooltip for the commit with `id`, or an error.
    pub fn tooltip(&self, id: &str) -> String {
        match self.session.tooltip(id) {
            Some(tip) => to_json(&tip),
            None => json_error(&format!("Unknown commit: {}", id)),
        }
    }
}

// ---------------------------------------------------------------------------
// Project catalog
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogView<'a> {
    query: &'a str,
    selected_year: Option<&'a Year>,
    projects: Vec<&'a ProjectRecord>,
    pie: Vec<PieDatum>,
    arcs: Vec<PieArc>,
}

/// Owns the projects page's catalog, search box and pie filter.
#[wasm_bindgen]
pub struct CatalogController {
    session: CatalogSession,
    load_error: Option<String>,
}

impl CatalogController {
    fn view(&self) -> CatalogView<'_> {
        CatalogView {
            query: self.session.query(),
            selected_year: self.session.selected_year(),
            projects: self.session.visible(),
            pie: self.session.pie(),
            arcs: self.session.arcs(),
        }
    }
}

fn parse_heading(heading: &str) -> Option<HeadingLevel> {
    if heading.trim().is_empty() {
        return Some(HeadingLevel::default());
    }
    HeadingLevel::parse(heading).ok()
}

#[wasm_bindgen]
impl CatalogController {
    /// Load the projects JSON. Pass `undefined` when the fetch failed.
    #[wasm_bindgen(constructor)]
    pub fn new(json: Option<String>) -> CatalogController {
        match CatalogSession::from_json(json.as_deref()) {
            Ok(session) => CatalogController {
                session,
                load_error: None,
            },
            Err(e) => {
                log::warn!("Failed to load project catalog: {}", e);
                CatalogController {
                    session: CatalogSession::default(),
                    load_error: Some(e.to_string()),
                }
            }
        }
    }

    /// Returns: JSON { projects, error }.
    pub fn status(&self) -> String {
        to_json(&serde_json::json!({
            "projects": self.session.projects().len(),
            "error": self.load_error,
        }))
    }

    /// Returns: JSON { query, selectedYear, projects, pie, arcs }.
    pub fn view_json(&self) -> String {
        to_json(&self.view())
    }

    /// Set the search query and drop the selected slice.
    /// Returns: JSON { query, selectedYear, projects, pie, arcs }.
    pub fn set_search(&mut self, query: &str) -> String {
        self.session.set_search(query);
        to_json(&self.view())
    }

    /// Toggle the pie slice at `index`.
    /// Returns: JSON { query, selectedYear, projects, pie, arcs }, or an error.
    pub fn click_slice(&mut self, index: usize) -> String {
        let clicked = self.session.click_slice(index).map(|_| ());
        match clicked {
            Ok(()) => to_json(&self.view()),
            Err(e) => json_error(&e.to_string()),
        }
    }

    /// Returns: JSON array of project cards passing the filters.
    /// `heading` is "h1".."h6"; empty means "h2".
    pub fn cards(&self, heading: &str) -> String {
        match parse_heading(heading) {
            Some(level) => to_json(&self.session.cards(level)),
            None => json_error(&format!("Invalid heading level: {}", heading)),
        }
    }

    /// Returns: JSON array of cards for the first `count` projects.
    pub fn latest_cards(&self, count: usize, heading: &str) -> String {
        match parse_heading(heading) {
            Some(level) => {
                let cards: Vec<ProjectCard> = self.session.latest_cards(count, level);
                to_json(&cards)
            }
            None => json_error(&format!("Invalid heading level: {}", heading)),
        }
    }
}

// ---------------------------------------------------------------------------
// Site chrome
// ---------------------------------------------------------------------------

/// Resolve the navigation bar for the current page.
///
/// Returns: JSON array of { href, title, current, external }.
#[wasm_bindgen]
pub fn nav_links(is_home: bool, current_page: &str) -> String {
    to_json(&site::nav_links(&site::default_pages(), is_home, current_page))
}

/// Returns: JSON array of { value, label } for the theme switcher.
#[wasm_bindgen]
pub fn theme_options() -> String {
    to_json(&site::theme_options())
}

/// Validate a theme switcher value.
///
/// Returns: JSON string with the CSS `color-scheme` value, or an error.
#[wasm_bindgen]
pub fn color_scheme(value: &str) -> String {
    match site::ColorScheme::parse(value) {
        Some(scheme) => to_json(&scheme),
        None => json_error(&format!("Unknown color scheme: {}", value)),
    }
}

/// Returns: the GitHub API URL for `username`.
#[wasm_bindgen]
pub fn github_profile_url(username: &str) -> String {
    site::profile_url(username)
}

/// Parse a GitHub user response. Pass `undefined` when the fetch failed.
///
/// Returns: JSON { public_repos, public_gists, followers, following }, `null`, or an error.
#[wasm_bindgen]
pub fn github_profile(json: Option<String>) -> String {
    match site::parse_profile(json.as_deref()) {
        Ok(profile) => to_json(&profile),
        Err(e) => json_error(&e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "commit,author,date,time,timezone,datetime,file,line,depth,length,type\n\
        aaa111aaa111,Alice,2024-02-01,09:30:00,+00:00,2024-02-01T09:30:00+00:00,index.js,1,0,12,js\n\
        aaa111aaa111,Alice,2024-02-01,09:30:00,+00:00,2024-02-01T09:30:00+00:00,style.css,2,1,30,css\n\
        bbb222bbb222,Bob,2024-02-03,22:15:00,+00:00,2024-02-03T22:15:00+00:00,index.js,3,4,55,js\n";

    fn parse(json: &str) -> serde_json::Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_timeline_controller_flow() {
        let mut ctl = TimelineController::new(Some(CSV.to_string()), None);
        let status = parse(&ctl.status());
        assert_eq!(status["commits"], 2);
        assert!(status["error"].is_null());

        let stats = parse(&ctl.stats());
        assert_eq!(stats["totalLoc"], 3);
        assert_eq!(stats["maxDepth"], 4);

        let selection = parse(&ctl.brush(0.0, 0.0, 1000.0, 600.0));
        assert_eq!(selection["count"], 2);
        assert_eq!(selection["label"], "2 commits selected");
        assert_eq!(selection["breakdown"][1]["language"], "js");
        assert_eq!(selection["breakdown"][1]["formatted"], "66.7%");

        let view = parse(&ctl.set_progress(0.0));
        assert_eq!(view["visibleCount"], 1);
        assert_eq!(view["visibleIds"][0], "aaa111aaa111");
        assert_eq!(parse(&ctl.selection())["label"], "No commits selected");

        let tip = parse(&ctl.tooltip("bbb222bbb222"));
        assert_eq!(tip["shortId"], "bbb222b");
        assert!(parse(&ctl.tooltip("nope")).get("error").is_some());
    }

    #[test]
    fn test_timeline_controller_tolerates_missing_data() {
        let mut ctl = TimelineController::new(None, Some("{bad".to_string()));
        assert_eq!(parse(&ctl.status())["commits"], 0);
        assert_eq!(parse(&ctl.points()), serde_json::json!([]));
        assert_eq!(parse(&ctl.brush(0.0, 0.0, 10.0, 10.0))["count"], 0);
        assert_eq!(parse(&ctl.scroll_to(100.0))["items"], serde_json::json!([]));
    }

    #[test]
    fn test_timeline_controller_reports_bad_header() {
        let ctl = TimelineController::new(Some("a,b\n1,2\n".to_string()), None);
        let status = parse(&ctl.status());
        assert_eq!(status["commits"], 0);
        assert!(status["error"].as_str().unwrap().contains("Missing column"));
    }

    #[test]
    fn test_catalog_controller_flow() {
        let json = r#"[{"title": "A", "year": 2021}, {"title": "B", "year": "2021"}, {"title": "C", "year": 2022}]"#;
        let mut ctl = CatalogController::new(Some(json.to_string()));
        let view = parse(&ctl.view_json());
        assert_eq!(view["pie"], serde_json::json!([{"label": "2021", "value": 2}, {"label": "2022", "value": 1}]));

        let view = parse(&ctl.click_slice(1));
        assert_eq!(view["selectedYear"], "2022");
        assert_eq!(view["projects"].as_array().unwrap().len(), 1);

        let view = parse(&ctl.click_slice(1));
        assert!(view["selectedYear"].is_null());
        assert_eq!(view["projects"].as_array().unwrap().len(), 3);

        assert!(parse(&ctl.click_slice(7)).get("error").is_some());
        assert!(parse(&ctl.cards("h9")).get("error").is_some());
        assert_eq!(parse(&ctl.latest_cards(2, ""))[1]["heading"], "h2");
    }

    #[test]
    fn test_catalog_controller_bad_json() {
        let ctl = CatalogController::new(Some("not json".to_string()));
        let status = parse(&ctl.status());
        assert_eq!(status["projects"], 0);
        assert!(status["error"].is_string());
    }

    #[test]
    fn test_site_exports() {
        let links = parse(&nav_links(false, "/contact/"));
        assert_eq!(links[2]["href"], "../contact/");
        assert_eq!(links[2]["current"], true);
        assert_eq!(parse(&color_scheme("dark")), "dark");
        assert!(parse(&color_scheme("neon")).get("error").is_some());
        assert_eq!(parse(&github_profile(None)), serde_json::Value::Null);
        assert_eq!(parse(&theme_options()).as_array().unwrap().len(), 3);
    }
}
