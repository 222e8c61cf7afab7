//! Two-pass tree driver: resolve modules, then mirror the input tree.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use rf2_types::FilterOutcome;
use tracing::info;
use walkdir::WalkDir;

use crate::filter::RowFilter;
use crate::relationship::ModuleResolver;
use crate::summary::Summary;
use crate::types::{FilterConfig, FilterResult, RunReport, ValidatedConfig};

/// Filters a whole release.
///
/// Validates `config`, resolves nested modules (when a module is given), then
/// walks the input tree: directories are recreated, `.txt` files filtered and
/// everything else copied. The report `FilterInfo.txt` is written last, at
/// the destination root.
///
/// # Errors
/// Configuration problems are reported before anything is written. A bad
/// relationship header or any I/O failure aborts the run.
pub fn run(config: &FilterConfig) -> FilterResult<RunReport> {
    let config = config.validate()?;
    run_validated(&config)
}

/// Filters a whole release using already validated parameters.
pub fn run_validated(config: &ValidatedConfig) -> FilterResult<RunReport> {
    let destination = config.destination_root();
    fs::create_dir_all(&destination)?;
    let destination = fs::canonicalize(&destination)?;

    info!("Reading from {}", config.input_dir.display());
    info!("Writing to {}", destination.display());
    info!(mode = ?config.mode(), "Filter criteria");

    let mut summary = Summary::for_config(config);

    let modules = match config.module {
        Some(module) => {
            info!("Checking for nested child modules");
            let modules = ModuleResolver::new(module).resolve(&config.input_dir)?;
            summary.log(format!(
                "Full module list (including detected nested modules): {}",
                modules
            ));
            Some(modules)
        }
        None => None,
    };

    let filter = RowFilter::new(modules.as_ref(), config.namespace.as_ref());
    let mut report = RunReport::new(destination.clone(), modules.clone());

    let walker = WalkDir::new(&config.input_dir)
        .sort_by_file_name()
        .into_iter()
        // Output nested inside the input, and the directories leading to it,
        // must not be read back.
        .filter_entry(|entry| {
            entry.depth() == 0 || !destination.starts_with(entry.path())
        });

    for entry in walker {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(&config.input_dir) else {
            continue;
        };
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        let name = config.relative_name(entry.path());
        let outcome = handle_file(&filter, entry.path(), &target, &name, &mut summary)?;
        report.record(&outcome);
    }

    summary.write_to(&destination)?;
    info!(
        events = summary.entries().len(),
        filtered = report.files_filtered,
        copied = report.files_copied,
        excluded = report.files_excluded,
        "Filter Complete"
    );

    Ok(report)
}

/// Filters, copies or drops one file and reports which.
fn handle_file(
    filter: &RowFilter<'_>,
    input: &Path,
    output: &Path,
    name: &str,
    summary: &mut Summary,
) -> FilterResult<FilterOutcome> {
    if RowFilter::is_data_file(input) {
        let mut sink = BufWriter::new(File::create(output)?);
        let outcome = filter.filter_file(input, name, &mut sink, summary)?;
        sink.flush()?;
        drop(sink);

        match outcome {
            FilterOutcome::Filtered(_) => return Ok(outcome),
            FilterOutcome::Excluded => {
                fs::remove_file(output)?;
                summary.log(format!(
                    "Skipped file {} because it doesn't contain a moduleId",
                    name
                ));
                return Ok(outcome);
            }
            FilterOutcome::CopiedVerbatim => {}
        }
    }

    fs::copy(input, output)?;
    summary.log(format!("Copied file {}", name));
    Ok(FilterOutcome::CopiedVerbatim)
}
