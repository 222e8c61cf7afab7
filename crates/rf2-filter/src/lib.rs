//! # rf2-filter
//!
//! Reduces a SNOMED CT RF2 release to the rows of one module and/or namespace.
//!
//! A run has two passes over the input tree:
//!
//! 1. [`ModuleResolver`] scans `sct2_Relationship_*` files for modules that
//!    point at the requested module and adds them to the [`ModuleSet`].
//! 2. [`run`] mirrors the tree. Each `.txt` file goes through [`RowFilter`],
//!    whose [`FilterOutcome`] decides whether the filtered lines are kept, the
//!    original is copied, or the file is left out. Other files are copied.
//!
//! Every decision is recorded in a [`Summary`], written as `FilterInfo.txt`.
//!
//! ```no_run
//! use rf2_filter::{run, FilterConfig};
//!
//! let config = FilterConfig::new("SnomedCT_RF2Release_US1000124_20150301", "target")
//!     .with_module(731000124108);
//! let report = run(&config)?;
//! println!("{} files filtered", report.files_filtered);
//! # Ok::<(), rf2_filter::FilterError>(())
//! ```

#![warn(missing_docs)]

mod driver;
mod filter;
pub mod parser;
mod relationship;
mod summary;
mod types;

pub use driver::{run, run_validated};
pub use filter::{RowFilter, MAX_MISMATCH_WARNINGS};
pub use relationship::ModuleResolver;
pub use summary::Summary;
pub use types::{
    FilterConfig, FilterError, FilterMode, FilterResult, RunReport, ValidatedConfig,
};

// Re-export rf2-types for convenience
pub use rf2_types;
pub use rf2_types::{FileStats, FilterOutcome, ModuleSet, Namespace};
