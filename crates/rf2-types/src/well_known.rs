//! Well-known identifiers and RF2 file layout constants.
//!
//! # Examples
//!
//! ```
//! use rf2_types::well_known;
//!
//! assert_eq!(well_known::US_EXTENSION_MODULE, 731000124108);
//! assert!(rf2_types::has_namespace("731000124108", well_known::US_NAMESPACE));
//! ```

use crate::SctId;

// =============================================================================
// Modules and namespaces
// =============================================================================

/// US National Library of Medicine maintained module (731000124108).
pub const US_EXTENSION_MODULE: SctId = 731000124108;

/// Namespace of the US extension.
pub const US_NAMESPACE: &str = "1000124";

// =============================================================================
// RF2 column names
// =============================================================================

/// Header name of the module column, present in most RF2 data files.
pub const MODULE_ID_COLUMN: &str = "moduleId";

/// Header name of the relationship source column.
pub const SOURCE_ID_COLUMN: &str = "sourceId";

/// Header name of the relationship destination column.
pub const DESTINATION_ID_COLUMN: &str = "destinationId";

/// Fixed position of `sourceId` in a relationship file.
pub const SOURCE_ID_INDEX: usize = 4;

/// Fixed position of `destinationId` in a relationship file.
pub const DESTINATION_ID_INDEX: usize = 5;

// =============================================================================
// RF2 file names
// =============================================================================

/// File name prefix of (inferred) relationship files.
///
/// Stated relationship files (`sct2_StatedRelationship_`) do not match.
pub const RELATIONSHIP_FILE_PREFIX: &str = "sct2_Relationship_";

/// Extension of RF2 data files, compared case-insensitively.
pub const DATA_FILE_EXTENSION: &str = "txt";

/// Name of the report written at the root of the filtered tree.
pub const SUMMARY_FILE_NAME: &str = "FilterInfo.txt";
