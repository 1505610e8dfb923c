pub mod aggregate;
pub mod breakdown;
pub mod parser;
pub mod scale;
pub mod scatter;
pub mod session;
pub mod types;

pub use aggregate::{file_breakdown, group_commits, summary_stats};
pub use breakdown::language_breakdown;
pub use parser::parse_rows;
pub use session::TimelineSession;
pub use types::*;
