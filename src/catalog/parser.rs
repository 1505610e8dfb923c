use super::types::ProjectRecord;
use crate::error::Result;

/// Parse the projects JSON array.
///
/// `None` (or blank text) stands for a failed fetch and yields an empty
/// catalog rather than an error, so downstream views still render.
pub fn parse_catalog(json: Option<&str>) -> Result<Vec<ProjectRecord>> {
    let Some(text) = json.map(str::trim).filter(|t| !t.is_empty()) else {
        log::warn!("No project data available; starting with an empty catalog");
        return Ok(Vec::new());
    };
    let projects: Vec<ProjectRecord> = serde_json::from_str(text)?;
    log::debug!("Loaded {} projects", projects.len());
    Ok(projects)
}

/// The first `n` projects, as shown on the home page.
pub fn latest(projects: &[ProjectRecord], n: usize) -> &[ProjectRecord] {
    &projects[..n.min(projects.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::Year;

    const CATALOG: &str = r#"[
        {"title": "Pie Lab", "description": "D3 pie chart", "year": 2024, "image": "pie.png"},
        {"title": "Resume", "description": "Static page", "year": "2023", "image": "cv.png"}
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let projects = parse_catalog(Some(CATALOG)).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "Pie Lab");
        assert_eq!(projects[1].year, Year::from(2023));
    }

    #[test]
    fn test_absent_catalog_is_empty() {
        assert!(parse_catalog(None).unwrap().is_empty());
        assert!(parse_catalog(Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_catalog_is_error() {
        assert!(parse_catalog(Some("{\"title\": 1}")).is_err());
        assert!(parse_catalog(Some("[{\"description\": \"no title\"}]")).is_err());
    }

    #[test]
    fn test_latest() {
        let projects = parse_catalog(Some(CATALOG)).unwrap();
        assert_eq!(latest(&projects, 1).len(), 1);
        assert_eq!(latest(&projects, 3).len(), 2);
    }
}
