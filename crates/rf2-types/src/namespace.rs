//! Validated SNOMED CT namespace identifier.

use crate::sctid::{has_namespace, is_all_digits, NAMESPACE_LEN};

/// Error returned when a string is not a valid 7-digit namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceParseError(pub String);

impl std::fmt::Display for NamespaceParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid namespace: '{}' (expected exactly {} digits)",
            self.0, NAMESPACE_LEN
        )
    }
}

impl std::error::Error for NamespaceParseError {}

/// A 7-digit namespace identifier, such as `1000124` for the US extension.
///
/// Kept as text: leading zeros are significant (`0000000` is a valid value).
///
/// # Examples
///
/// ```
/// use rf2_types::Namespace;
///
/// let ns = Namespace::parse("1000124").unwrap();
/// assert_eq!(ns.as_str(), "1000124");
/// assert!(ns.matches("731000124108"));
///
/// assert!(Namespace::parse("100012").is_err());
/// assert!(Namespace::parse("10001240").is_err());
/// assert!(Namespace::parse("10a0124").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Namespace(String);

impl Namespace {
    /// Parses a namespace, requiring exactly 7 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, NamespaceParseError> {
        if s.len() != NAMESPACE_LEN || !is_all_digits(s) {
            return Err(NamespaceParseError(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the namespace digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `field` is an identifier issued in this namespace.
    pub fn matches(&self, field: &str) -> bool {
        has_namespace(field, &self.0)
    }

    /// Returns true if any of `fields` is an identifier in this namespace.
    pub fn matches_any<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields.into_iter().any(|field| self.matches(field))
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Namespace {
    type Err = NamespaceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Namespace {
    type Error = NamespaceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}
