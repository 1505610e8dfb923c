pub mod nav;
pub mod profile;
pub mod theme;

pub use nav::{default_pages, nav_links, NavLink, Page};
pub use profile::{parse_profile, profile_url, GithubProfile};
pub use theme::{theme_options, ColorScheme, ThemeOption};
