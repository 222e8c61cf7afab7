//! SNOMED CT Identifier (SCTID) helpers.
//!
//! SCTIDs are 64-bit unsigned integers, but RF2 filtering treats them as text:
//! module identifiers are compared as strings and the namespace is read from a
//! fixed position counted from the right-hand end of the identifier.
//!
//! Layout of a long-format SCTID (right to left):
//!
//! ```text
//! ...item id... | namespace (7 digits) | partition (2) | check digit (1)
//! ```

/// A SNOMED CT identifier (SCTID).
///
/// # Examples
///
/// ```
/// use rf2_types::SctId;
///
/// let us_extension: SctId = 731000124108;
/// let core_module: SctId = 900000000000207008;
/// ```
pub type SctId = u64;

/// Number of digits in an SCTID namespace.
pub const NAMESPACE_LEN: usize = 7;

/// Digits after the namespace: two partition digits and the check digit.
const PARTITION_AND_CHECK_LEN: usize = 3;

/// Shortest identifier that can carry a namespace.
pub const MIN_NAMESPACED_LEN: usize = NAMESPACE_LEN + PARTITION_AND_CHECK_LEN;

/// Returns true if `field` is non-empty and made only of ASCII digits.
///
/// Identifiers may exceed native integer range, so no numeric parse is done.
///
/// # Examples
///
/// ```
/// use rf2_types::is_all_digits;
///
/// assert!(is_all_digits("731000124108"));
/// assert!(!is_all_digits(""));
/// assert!(!is_all_digits("12a4"));
/// assert!(!is_all_digits("-1"));
/// ```
#[inline]
pub fn is_all_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `field` is a numeric identifier carrying `namespace`.
///
/// The field must be all digits, at least 10 characters long, and the
/// 7 digits that end 3 characters before the end must equal `namespace`.
///
/// # Examples
///
/// ```
/// use rf2_types::has_namespace;
///
/// // US extension module: ...|1000124|10|8
/// assert!(has_namespace("731000124108", "1000124"));
/// assert!(!has_namespace("900000000000207008", "1000124"));
/// // Too short to contain a namespace.
/// assert!(!has_namespace("100012410", "1000124"));
/// ```
pub fn has_namespace(field: &str, namespace: &str) -> bool {
    if field.len() < MIN_NAMESPACED_LEN || !is_all_digits(field) {
        return false;
    }
    // All ASCII, so byte slicing is on char boundaries.
    field[..field.len() - PARTITION_AND_CHECK_LEN].ends_with(namespace)
}
