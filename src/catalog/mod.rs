pub mod parser;
pub mod pie;
pub mod session;
pub mod types;

pub use parser::{latest, parse_catalog};
pub use pie::{arcs, year_buckets, PieArc, PieDatum};
pub use session::CatalogSession;
pub use types::*;
