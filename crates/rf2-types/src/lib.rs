//! # rf2-types
//!
//! Value types for filtering SNOMED CT Release Format 2 (RF2) distributions
//! down to a single module and/or namespace.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!
//! ## Usage
//!
//! ```rust
//! use rf2_types::{well_known, ModuleSet, Namespace};
//!
//! let mut modules = ModuleSet::from_id(well_known::US_EXTENSION_MODULE);
//! modules.insert_nested("900000000000207008");
//!
//! let namespace = Namespace::parse(well_known::US_NAMESPACE).unwrap();
//! assert!(namespace.matches("731000124108"));
//! assert!(modules.contains("900000000000207008"));
//! ```

#![warn(missing_docs)]

mod module_set;
mod namespace;
mod outcome;
mod sctid;
pub mod well_known;

pub use module_set::ModuleSet;
pub use namespace::{Namespace, NamespaceParseError};
pub use outcome::{FallbackReason, FileStats, FilterOutcome};
pub use sctid::{has_namespace, is_all_digits, SctId, MIN_NAMESPACED_LEN, NAMESPACE_LEN};
