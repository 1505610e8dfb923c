use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The GitHub account figures shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubProfile {
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
}

pub fn profile_url(username: &str) -> String {
    format!("https://api.github.com/users/{}", username.trim())
}

/// Parse a GitHub user response. `None` (failed fetch) gives `Ok(None)`.
pub fn parse_profile(json: Option<&str>) -> Result<Option<GithubProfile>> {
    match json.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => Ok(Some(serde_json::from_str(text)?)),
        None => {
            log::warn!("No GitHub profile data available");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_ignores_other_fields() {
        let body = r#"{"login": "jaw039", "public_repos": 12, "public_gists": 0, "followers": 5, "following": 7}"#;
        let profile = parse_profile(Some(body)).unwrap().unwrap();
        assert_eq!(profile.public_repos, 12);
        assert_eq!(profile.following, 7);
    }

    #[test]
    fn test_parse_profile_absent() {
        assert_eq!(parse_profile(None).unwrap(), None);
        assert!(parse_profile(Some("{}")).is_err());
    }

    #[test]
    fn test_profile_url() {
        assert_eq!(profile_url("jaw039"), "https://api.github.com/users/jaw039");
    }
}
