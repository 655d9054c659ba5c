//! Output generation for ranked pages.
//!
//! # Submodules
//!
//! - [`json`]: writes a [`RankedPage`](crate::models::RankedPage) as JSON
//! - [`markdown`]: renders a ranked page as a readable Markdown report
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
//! ├── 2025-05-06_morning.md
//! └── 2025-05-06_evening.md
//! ```

pub mod json;
pub mod markdown;
