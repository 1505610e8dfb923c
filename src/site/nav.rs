use serde::{Deserialize, Serialize};

/// A page listed in the site navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Site-relative path (`""` is home) or an absolute `http(s)` URL.
    pub url: String,
    pub title: String,
}

impl Page {
    fn new(url: &str, title: &str) -> Self {
        Page {
            url: url.to_string(),
            title: title.to_string(),
        }
    }

    pub fn is_external(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}

pub fn default_pages() -> Vec<Page> {
    vec![
        Page::new("", "Home"),
        Page::new("projects/", "Projects"),
        Page::new("contact/", "Contact"),
        Page::new("resume/", "Resume"),
        Page::new("https://github.com/jaw039", "Profile"),
    ]
}

/// A resolved navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub href: String,
    pub title: String,
    pub current: bool,
    /// External links open in a new tab.
    pub external: bool,
}

/// Drop a trailing `index.html` so `/a/` and `/a/index.html` compare equal.
fn strip_index(path: &str) -> &str {
    path.strip_suffix("index.html").unwrap_or(path)
}

/// Resolve a relative `href` against the absolute path of the current page.
///
/// An empty href refers to the page itself; `.` and `..` segments are
/// collapsed and never climb above the root.
fn resolve_path(current: &str, href: &str) -> String {
    if href.is_empty() {
        return current.to_string();
    }
    let joined = if href.starts_with('/') {
        href.to_string()
    } else {
        let dir = &current[..current.rfind('/').map_or(0, |i| i + 1)];
        format!("{}{}", dir, href)
    };

    let mut segments: Vec<&str> = Vec::new();
    let parts: Vec<&str> = joined.split('/').skip(1).collect();
    for (i, part) in parts.iter().enumerate() {
        let last = i + 1 == parts.len();
        match *part {
            "." => {
                if last {
                    segments.push("");
                }
            }
            ".." => {
                segments.pop();
                if last {
                    segments.push("");
                }
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Resolve the nav bar for the page at `current_page`.
///
/// Pages one level below home reach internal links through `../`. A link
/// is current when its href resolves to the current pathname, so the site
/// can be served from any base path.
pub fn nav_links(pages: &[Page], is_home: bool, current_page: &str) -> Vec<NavLink> {
    let current_page = current_page.trim();
    let current_page = if current_page.starts_with('/') {
        current_page.to_string()
    } else {
        format!("/{}", current_page)
    };
    let here = strip_index(&current_page);

    pages
        .iter()
        .map(|page| {
            let external = page.is_external();
            let href = if external || is_home {
                page.url.clone()
            } else {
                format!("../{}", page.url)
            };
            let current = !external && strip_index(&resolve_path(&current_page, &href)) == here;
            NavLink {
                href,
                title: page.title.clone(),
                current,
                external,
            }
        })
        .collect()
}
