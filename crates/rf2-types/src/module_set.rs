//! The set of modules retained by a module filter.

use std::collections::BTreeSet;

use crate::SctId;

/// The closed set of module identifiers treated as "the target module".
///
/// Holds the requested module plus any nested modules discovered from
/// relationship files. Identifiers are stored as text and compared as text.
/// The requested module always comes first when iterating; nested modules
/// follow in sorted order, so the result does not depend on the order in
/// which they were discovered.
///
/// # Examples
///
/// ```
/// use rf2_types::ModuleSet;
///
/// let mut modules = ModuleSet::from_id(731000124108);
/// assert!(modules.insert_nested("900000000000207008"));
/// assert!(!modules.insert_nested("731000124108"));
///
/// assert!(modules.contains("900000000000207008"));
/// assert_eq!(modules.len(), 2);
/// assert_eq!(modules.target(), "731000124108");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleSet {
    target: String,
    nested: BTreeSet<String>,
}

impl ModuleSet {
    /// Creates a set holding only the requested module.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            nested: BTreeSet::new(),
        }
    }

    /// Creates a set from a numeric module identifier.
    pub fn from_id(target: SctId) -> Self {
        Self::new(target.to_string())
    }

    /// The originally requested module.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Adds a nested module. Returns false if it was already present.
    pub fn insert_nested(&mut self, module_id: impl Into<String>) -> bool {
        let module_id = module_id.into();
        if module_id == self.target {
            return false;
        }
        self.nested.insert(module_id)
    }

    /// Returns true if `module_id` is the target or one of its nested modules.
    pub fn contains(&self, module_id: &str) -> bool {
        self.target == module_id || self.nested.contains(module_id)
    }

    /// Nested modules only, in sorted order.
    pub fn nested(&self) -> impl Iterator<Item = &str> {
        self.nested.iter().map(String::as_str)
    }

    /// All modules, target first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.target.as_str()).chain(self.nested())
    }

    /// Number of modules, including the target. Never zero.
    pub fn len(&self) -> usize {
        1 + self.nested.len()
    }

    /// Always false: the target module is always present.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for ModuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, module) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", module)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_always_first() {
        let mut modules = ModuleSet::new("731000124108");
        modules.insert_nested("900000000000207008");
        modules.insert_nested("100000000000000001");

        let all: Vec<&str> = modules.iter().collect();
        assert_eq!(
            all,
            vec!["731000124108", "100000000000000001", "900000000000207008"]
        );
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let mut a = ModuleSet::new("1");
        a.insert_nested("3");
        a.insert_nested("2");

        let mut b = ModuleSet::new("1");
        b.insert_nested("2");
        b.insert_nested("3");
        b.insert_nested("3");

        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_contains_is_textual() {
        let modules = ModuleSet::from_id(731000124108);
        assert!(modules.contains("731000124108"));
        assert!(!modules.contains("0731000124108"));
        assert!(!modules.contains(" 731000124108"));
    }

    #[test]
    fn test_display() {
        let mut modules = ModuleSet::new("731000124108");
        assert_eq!(modules.to_string(), "[731000124108]");
        modules.insert_nested("900000000000207008");
        assert_eq!(
            modules.to_string(),
            "[731000124108, 900000000000207008]"
        );
    }
}
