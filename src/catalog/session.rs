use super::parser::{latest, parse_catalog};
use super::pie::{arcs, year_buckets, PieArc, PieDatum};
use super::types::{HeadingLevel, ProjectCard, ProjectRecord, Year};
use crate::error::{FolioError, Result};
use crate::filter::matches;

/// View state of the projects page: search box plus pie-slice filter.
///
/// The search narrows the catalog first; the selected year (at most one)
/// narrows the searched set further.
#[derive(Debug, Clone, Default)]
pub struct CatalogSession {
    projects: Vec<ProjectRecord>,
    query: String,
    selected_year: Option<Year>,
}

impl CatalogSession {
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        CatalogSession {
            projects,
            ..CatalogSession::default()
        }
    }

    pub fn from_json(json: Option<&str>) -> Result<Self> {
        Ok(CatalogSession::new(parse_catalog(json)?))
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_year(&self) -> Option<&Year> {
        self.selected_year.as_ref()
    }

    /// Change the search query and drop any selected slice.
    pub fn set_search(&mut self, query: &str) {
        self.query = query.to_string();
        self.selected_year = None;
    }

    pub fn searched(&self) -> Vec<&ProjectRecord> {
        self.projects
            .iter()
            .filter(|p| matches(*p, &self.query))
            .collect()
    }

    /// Year buckets of the searched projects.
    pub fn pie(&self) -> Vec<PieDatum> {
        year_buckets(self.searched())
    }

    pub fn arcs(&self) -> Vec<PieArc> {
        arcs(&self.pie())
    }

    /// Toggle the slice at `index` of the current pie.
    ///
    /// Clicking the selected slice clears the filter; clicking another one
    /// moves the selection there. Returns the year now selected.
    pub fn click_slice(&mut self, index: usize) -> Result<Option<&Year>> {
        let label = self
            .pie()
            .into_iter()
            .nth(index)
            .map(|d| d.label)
            .ok_or(FolioError::UnknownSlice(index))?;

        self.selected_year = match self.selected_year.take() {
            Some(current) if current == label => None,
            _ => Some(label),
        };
        Ok(self.selected_year.as_ref())
    }

    /// Projects passing both the search and the selected slice.
    pub fn visible(&self) -> Vec<&ProjectRecord> {
        self.searched()
            .into_iter()
            .filter(|p| self.selected_year.as_ref().map_or(true, |y| &p.year == y))
            .collect()
    }

    pub fn cards(&self, heading: HeadingLevel) -> Vec<ProjectCard> {
        self.visible()
            .into_iter()
            .map(|p| ProjectCard::new(p, heading))
            .collect()
    }

    /// Cards for the first `n` catalog entries, ignoring filters.
    pub fn latest_cards(&self, n: usize, heading: HeadingLevel) -> Vec<ProjectCard> {
        latest(&self.projects, n)
            .iter()
            .map(|p| ProjectCard::new(p, heading))
            .collect()
    }
}
