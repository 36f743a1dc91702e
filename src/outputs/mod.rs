//! Output generation for JSON, Markdown, and the report index.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`Dashboard`](crate::analytics::Dashboard) as JSON
//! - [`markdown`]: Renders the dashboard as a Markdown report
//! - [`indexes`]: Maintains a Markdown index linking every report
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── morning.json
//!     └── evening.json
//!
//! markdown_output_dir/
//! ├── 2025-05-06_morning.md  # Full report
//! ├── 2025-05-06_evening.md
//! └── reports.md             # Index of all reports
//! ```

pub mod indexes;
pub mod json;
pub mod markdown;
