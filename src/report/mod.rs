mod aggregate;
mod builder;
mod classify;
mod markdown;
mod title;

pub use aggregate::Aggregate;
pub use builder::{planning_report, retro_report};
pub use classify::classify;
pub use markdown::generate_markdown_table;
pub use title::TitleRenderer;
