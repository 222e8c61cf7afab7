//! Streaming row filter for RF2 data files.
//!
//! A row is kept if it is the header, if its `moduleId` is in the module set,
//! or if any of its fields is an identifier in the configured namespace. When
//! both a module and a namespace are configured, rows where the two rules
//! disagree are reported (at most [`MAX_MISMATCH_WARNINGS`] per file) but the
//! keep decision is unchanged.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use rf2_types::well_known::{DATA_FILE_EXTENSION, MODULE_ID_COLUMN};
use rf2_types::{FallbackReason, FileStats, FilterOutcome, ModuleSet, Namespace};

use crate::parser::{split_fields, LineReader, LINE_SEPARATOR};
use crate::summary::Summary;
use crate::types::{FilterMode, FilterResult};

/// Per-file cap on module/namespace disagreement warnings.
pub const MAX_MISMATCH_WARNINGS: u64 = 10;

/// Classifies the rows of data files against a module set and/or namespace.
///
/// # Example
///
/// ```
/// use rf2_filter::{ModuleSet, RowFilter, Summary};
///
/// let modules = ModuleSet::from_id(731000124108);
/// let filter = RowFilter::new(Some(&modules), None);
///
/// let input = "id\tmoduleId\n1\t731000124108\n2\t900000000000207008\n";
/// let mut output = Vec::new();
/// let mut summary = Summary::default();
/// let outcome = filter
///     .filter_reader(input.as_bytes(), "concepts.txt", &mut output, &mut summary)
///     .unwrap();
///
/// assert_eq!(output, b"id\tmoduleId\r\n1\t731000124108\r\n");
/// assert_eq!(outcome.stats().unwrap().skipped, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RowFilter<'a> {
    modules: Option<&'a ModuleSet>,
    namespace: Option<&'a Namespace>,
    mode: FilterMode,
}

/// State for one file: the module column found in its header and running counts.
struct FileState {
    module_column: Option<usize>,
    stats: FileStats,
}

impl FileState {
    fn new(module_column: Option<usize>) -> Self {
        Self {
            module_column,
            stats: FileStats {
                kept: 1,
                skipped: 0,
                total: 1,
                mismatches: 0,
            },
        }
    }
}

impl<'a> RowFilter<'a> {
    /// Creates a filter. `None` for either criterion disables it.
    pub fn new(modules: Option<&'a ModuleSet>, namespace: Option<&'a Namespace>) -> Self {
        Self {
            modules,
            namespace,
            mode: FilterMode::from_criteria(modules.is_some(), namespace.is_some()),
        }
    }

    /// Returns true if the file should be filtered rather than copied.
    ///
    /// Data files end in `.txt`, compared case-insensitively.
    pub fn is_data_file(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case(DATA_FILE_EXTENSION))
            .unwrap_or(false)
    }

    /// Filters the file at `path`, writing kept lines to `sink`.
    pub fn filter_file<W: Write>(
        &self,
        path: &Path,
        name: &str,
        sink: &mut W,
        summary: &mut Summary,
    ) -> FilterResult<FilterOutcome> {
        let file = File::open(path)?;
        self.filter_reader(BufReader::new(file), name, sink, summary)
    }

    /// Filters one data file read from `reader`, writing kept lines to `sink`.
    ///
    /// Nothing is written to `sink` unless the outcome is
    /// [`FilterOutcome::Filtered`]. Every written line ends in CRLF.
    pub fn filter_reader<R: BufRead, W: Write>(
        &self,
        reader: R,
        name: &str,
        sink: &mut W,
        summary: &mut Summary,
    ) -> FilterResult<FilterOutcome> {
        let mut lines = LineReader::new(reader);

        let Some(header) = lines.next_line()? else {
            summary.log(format!("Kept 0 Skipped 0 out of 0 lines in {}", name));
            return Ok(FilterOutcome::Filtered(FileStats::default()));
        };

        summary.log(format!("Filtering file {}", name));

        let header_fields: Vec<&str> = split_fields(header).collect();
        if header_fields.len() < 2 {
            summary.warn("txt file doesn't look like a data file - abort and just copy.");
            return Ok(FallbackReason::NotDataFile.into());
        }

        let module_column = header_fields.iter().position(|f| *f == MODULE_ID_COLUMN);
        if module_column.is_none() {
            if self.mode.module_required() {
                summary.warn("No moduleId column found - skipping file");
                return Ok(FallbackReason::NoModuleColumn.into());
            }
            if self.mode.checks_consistency() {
                summary.log("No moduleId column found - matching on namespace only");
            }
        }

        sink.write_all(header.as_bytes())?;
        sink.write_all(LINE_SEPARATOR)?;

        let mut state = FileState::new(module_column);

        while let Some(line) = lines.next_line()? {
            state.stats.total += 1;
            let fields: Vec<&str> = split_fields(line).collect();

            let module_match = self.module_matches(&fields, state.module_column);
            let namespace_match = self
                .namespace
                .map(|ns| ns.matches_any(fields.iter().copied()));

            if module_match || namespace_match == Some(true) {
                state.stats.kept += 1;
                sink.write_all(line.as_bytes())?;
                sink.write_all(LINE_SEPARATOR)?;
            } else {
                state.stats.skipped += 1;
            }

            if let (true, Some(namespace_match)) =
                (self.mode.checks_consistency(), namespace_match)
            {
                if module_match != namespace_match {
                    state.stats.mismatches += 1;
                    if state.stats.mismatches <= MAX_MISMATCH_WARNINGS {
                        summary.warn(format!(
                            "Module match ({}) and namespace match ({}) disagree on line {} of {}: {}",
                            module_match, namespace_match, state.stats.total, name, line
                        ));
                    }
                }
            }
        }

        sink.flush()?;

        let stats = state.stats;
        summary.log(format!(
            "Kept {} Skipped {} out of {} lines in {}",
            stats.kept, stats.skipped, stats.total, name
        ));
        if stats.mismatches > MAX_MISMATCH_WARNINGS {
            summary.warn(format!(
                "{} further module/namespace mismatches in {} not shown",
                stats.mismatches - MAX_MISMATCH_WARNINGS,
                name
            ));
        }

        Ok(FilterOutcome::Filtered(stats))
    }

    /// True if the row's module field is in the module set.
    ///
    /// Rows too short to reach the module column never match.
    fn module_matches(&self, fields: &[&str], module_column: Option<usize>) -> bool {
        match (self.modules, module_column) {
            (Some(modules), Some(column)) => fields
                .get(column)
                .is_some_and(|module| modules.contains(module)),
            _ => false,
        }
    }
}
