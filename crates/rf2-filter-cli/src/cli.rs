//! Command-line arguments.
//!
//! Every option can also come from an `RF2_FILTER_*` environment variable;
//! a flag on the command line wins.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use rf2_filter::FilterConfig;

/// Filter an RF2 release down to one module and/or namespace.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Filter a SNOMED CT RF2 release by module and/or namespace")]
pub struct Args {
    /// Root directory of the RF2 release to filter.
    #[arg(
        long,
        short = 'i',
        env = "RF2_FILTER_INPUT",
        value_name = "DIR",
        value_hint = ValueHint::DirPath
    )]
    pub input: PathBuf,

    /// Directory receiving the filtered copy (created if missing).
    #[arg(
        long,
        short = 'o',
        env = "RF2_FILTER_OUTPUT",
        value_name = "DIR",
        default_value = "target",
        value_hint = ValueHint::DirPath
    )]
    pub output: PathBuf,

    /// Module identifier to keep, e.g. 731000124108.
    #[arg(long, short = 'm', env = "RF2_FILTER_MODULE")]
    pub module: Option<u64>,

    /// 7-digit namespace to keep, e.g. 1000124.
    #[arg(long, short = 'n', env = "RF2_FILTER_NAMESPACE")]
    pub namespace: Option<String>,

    /// Version string recorded in FilterInfo.txt.
    #[arg(
        long = "converter-version",
        env = "RF2_FILTER_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub converter_version: String,

    /// Enable debug logging (RUST_LOG still takes precedence).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the filter configuration from the parsed arguments.
    pub fn to_config(&self) -> FilterConfig {
        let mut config = FilterConfig::new(&self.input, &self.output)
            .with_version(self.converter_version.clone());
        if let Some(module) = self.module {
            config = config.with_module(module);
        }
        if let Some(namespace) = &self.namespace {
            config = config.with_namespace(namespace.clone());
        }
        config
    }
}
