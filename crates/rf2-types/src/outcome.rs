//! Per-file filter results.

/// Line counts for one filtered file.
///
/// `total` counts every line read, including the header, so
/// `kept + skipped == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileStats {
    /// Lines written to the output (the header is always one of them).
    pub kept: u64,
    /// Lines dropped.
    pub skipped: u64,
    /// Lines read.
    pub total: u64,
    /// Rows where the module rule and the namespace rule disagreed.
    pub mismatches: u64,
}

/// Why a data file was not filtered line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackReason {
    /// The header has fewer than two columns.
    NotDataFile,
    /// No `moduleId` column while module filtering is mandatory.
    NoModuleColumn,
}

/// What the tree driver should do with one input file.
///
/// # Examples
///
/// ```
/// use rf2_types::{FileStats, FilterOutcome};
///
/// let outcome = FilterOutcome::Filtered(FileStats { kept: 2, skipped: 1, total: 3, mismatches: 0 });
/// assert_eq!(outcome.stats().map(|s| s.kept), Some(2));
/// assert!(FilterOutcome::Excluded.stats().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterOutcome {
    /// Rows were filtered; the kept lines were written to the sink.
    Filtered(FileStats),
    /// The original bytes should be copied unchanged.
    CopiedVerbatim,
    /// The file should not appear in the output at all.
    Excluded,
}

impl FilterOutcome {
    /// Returns the line counts for a filtered file.
    pub fn stats(&self) -> Option<&FileStats> {
        match self {
            Self::Filtered(stats) => Some(stats),
            _ => None,
        }
    }
}

impl From<FallbackReason> for FilterOutcome {
    fn from(reason: FallbackReason) -> Self {
        match reason {
            FallbackReason::NotDataFile => Self::CopiedVerbatim,
            FallbackReason::NoModuleColumn => Self::Excluded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_mapping() {
        assert_eq!(
            FilterOutcome::from(FallbackReason::NotDataFile),
            FilterOutcome::CopiedVerbatim
        );
        assert_eq!(
            FilterOutcome::from(FallbackReason::NoModuleColumn),
            FilterOutcome::Excluded
        );
        assert!(FilterOutcome::Excluded.stats().is_none());
    }
}
