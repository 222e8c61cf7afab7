//! Filter-specific types: errors, run configuration and run statistics.

use std::fs;
use std::path::{Path, PathBuf};

use rf2_types::{FilterOutcome, ModuleSet, Namespace, SctId};
use thiserror::Error;

/// Errors that can occur while filtering an RF2 release.
#[derive(Error, Debug)]
pub enum FilterError {
    /// I/O error reading or writing release files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error in a relationship file.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Error walking the input tree.
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Input path is missing or not a directory.
    #[error("Path doesn't exist or isn't a folder: {path}")]
    InputNotDirectory {
        /// The offending path.
        path: String,
    },

    /// Neither a module nor a namespace was supplied.
    #[error("You must provide a module or namespace for filtering")]
    NoFilterCriterion,

    /// Namespace is not exactly 7 digits.
    #[error("Invalid namespace '{value}': expected exactly 7 digits")]
    InvalidNamespace {
        /// The rejected value.
        value: String,
    },

    /// Relationship file header does not have the expected layout.
    #[error("Unexpected column '{found}' at position {position} in {file}, expected '{expected}'")]
    UnexpectedColumn {
        /// Relationship file, relative to the input root.
        file: String,
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name (empty if the column is missing).
        found: String,
    },

    /// Relationship file has no header row.
    #[error("Relationship file has no header: {file}")]
    EmptyRelationshipFile {
        /// Relationship file, relative to the input root.
        file: String,
    },
}

impl FilterError {
    /// Returns true for invalid or missing run parameters.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InputNotDirectory { .. } | Self::NoFilterCriterion | Self::InvalidNamespace { .. }
        )
    }

    /// Returns true for relationship files that break the header contract.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedColumn { .. } | Self::EmptyRelationshipFile { .. }
        )
    }
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Run parameters as supplied by the caller.
///
/// # Example
///
/// ```no_run
/// use rf2_filter::FilterConfig;
///
/// let config = FilterConfig::new("SnomedCT_RF2Release_US1000124_20150301", "target")
///     .with_module(731000124108)
///     .with_namespace("1000124");
/// let validated = config.validate()?;
/// # Ok::<(), rf2_filter::FilterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Root of the release to filter.
    pub input_dir: PathBuf,
    /// Directory receiving the filtered copy.
    pub output_dir: PathBuf,
    /// Module to retain.
    pub module: Option<SctId>,
    /// Namespace to retain, unvalidated.
    pub namespace: Option<String>,
    /// Tool version recorded in the report.
    pub converter_version: String,
}

impl FilterConfig {
    /// Creates a config with no filter criterion set.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            module: None,
            namespace: None,
            converter_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Sets the module to retain.
    pub fn with_module(mut self, module: SctId) -> Self {
        self.module = Some(module);
        self
    }

    /// Sets the namespace to retain.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the version string recorded in the report.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.converter_version = version.into();
        self
    }

    /// Checks the parameters before anything is written.
    pub fn validate(&self) -> FilterResult<ValidatedConfig> {
        if !self.input_dir.is_dir() {
            return Err(FilterError::InputNotDirectory {
                path: self.input_dir.display().to_string(),
            });
        }

        if self.module.is_none() && self.namespace.is_none() {
            return Err(FilterError::NoFilterCriterion);
        }

        let namespace = self
            .namespace
            .as_deref()
            .map(|value| {
                Namespace::parse(value).map_err(|_| FilterError::InvalidNamespace {
                    value: value.to_string(),
                })
            })
            .transpose()?;

        Ok(ValidatedConfig {
            input_dir: fs::canonicalize(&self.input_dir)?,
            output_dir: self.output_dir.clone(),
            module: self.module,
            namespace,
            converter_version: self.converter_version.clone(),
        })
    }
}

/// Which criteria decide whether a row is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Module only. Files without a `moduleId` column are excluded.
    ModuleOnly,
    /// Namespace only.
    NamespaceOnly,
    /// Either criterion keeps a row; disagreements are reported.
    ModuleAndNamespace,
}

impl FilterMode {
    /// Derives the mode from which criteria are present.
    ///
    /// With neither criterion nothing but headers can match; that is treated
    /// as module-only so files without a `moduleId` column are excluded.
    pub fn from_criteria(has_module: bool, has_namespace: bool) -> Self {
        match (has_module, has_namespace) {
            (true, true) => Self::ModuleAndNamespace,
            (false, true) => Self::NamespaceOnly,
            _ => Self::ModuleOnly,
        }
    }

    /// Returns true if a data file must have a `moduleId` column.
    pub fn module_required(self) -> bool {
        self == Self::ModuleOnly
    }

    /// Returns true if module/namespace disagreements are reported.
    pub fn checks_consistency(self) -> bool {
        self == Self::ModuleAndNamespace
    }
}

/// Run parameters after validation.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Canonical root of the release to filter.
    pub input_dir: PathBuf,
    /// Directory receiving the filtered copy.
    pub output_dir: PathBuf,
    /// Module to retain.
    pub module: Option<SctId>,
    /// Namespace to retain.
    pub namespace: Option<Namespace>,
    /// Tool version recorded in the report.
    pub converter_version: String,
}

impl ValidatedConfig {
    /// Returns the filter mode implied by the supplied criteria.
    pub fn mode(&self) -> FilterMode {
        FilterMode::from_criteria(self.module.is_some(), self.namespace.is_some())
    }

    /// `output_dir/<leaf name of input_dir>`, where the filtered tree goes.
    pub fn destination_root(&self) -> PathBuf {
        match self.input_dir.file_name() {
            Some(leaf) => self.output_dir.join(leaf),
            None => self.output_dir.clone(),
        }
    }

    /// Path of `file` relative to the input root, for log messages.
    pub fn relative_name(&self, file: &Path) -> String {
        file.strip_prefix(&self.input_dir)
            .unwrap_or(file)
            .display()
            .to_string()
    }
}

/// Totals for a whole run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Root of the filtered tree.
    pub destination_root: PathBuf,
    /// Resolved module set, if module filtering was requested.
    pub modules: Option<ModuleSet>,
    /// Data files filtered line by line.
    pub files_filtered: usize,
    /// Files copied unchanged.
    pub files_copied: usize,
    /// Files left out of the output.
    pub files_excluded: usize,
    /// Lines kept across all filtered files.
    pub lines_kept: u64,
    /// Lines skipped across all filtered files.
    pub lines_skipped: u64,
}

impl RunReport {
    /// Creates an empty report for a run writing to `destination_root`.
    pub fn new(destination_root: PathBuf, modules: Option<ModuleSet>) -> Self {
        Self {
            destination_root,
            modules,
            files_filtered: 0,
            files_copied: 0,
            files_excluded: 0,
            lines_kept: 0,
            lines_skipped: 0,
        }
    }

    /// Adds one file's outcome to the totals.
    pub fn record(&mut self, outcome: &FilterOutcome) {
        match outcome {
            FilterOutcome::Filtered(stats) => {
                self.files_filtered += 1;
                self.lines_kept += stats.kept;
                self.lines_skipped += stats.skipped;
            }
            FilterOutcome::CopiedVerbatim => self.files_copied += 1,
            FilterOutcome::Excluded => self.files_excluded += 1,
        }
    }
}
