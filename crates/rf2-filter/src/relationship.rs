//! Nested module discovery from relationship files.
//!
//! Scans every `sct2_Relationship_*` file under the input root. Any row whose
//! `destinationId` is the requested module contributes its `sourceId` as a
//! nested module. This is a single pass: modules found this way are not used
//! as targets for a further scan.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ByteRecord;
use rf2_types::well_known::{DESTINATION_ID_INDEX, RELATIONSHIP_FILE_PREFIX, SOURCE_ID_INDEX};
use rf2_types::{ModuleSet, SctId};
use tracing::debug;
use walkdir::WalkDir;

use crate::parser::{relationship_reader, validate_relationship_header};
use crate::types::{FilterError, FilterResult};

/// Builds the module set for a requested module.
///
/// # Example
///
/// ```no_run
/// use rf2_filter::ModuleResolver;
///
/// let modules = ModuleResolver::new(731000124108).resolve("SnomedCT_RF2Release_US1000124_20150301")?;
/// println!("Filtering on {}", modules);
/// # Ok::<(), rf2_filter::FilterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    target: String,
}

impl ModuleResolver {
    /// Creates a resolver for the requested module.
    pub fn new(target: SctId) -> Self {
        Self {
            target: target.to_string(),
        }
    }

    /// Returns true if the file name marks a relationship file.
    pub fn is_relationship_file(path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().starts_with(RELATIONSHIP_FILE_PREFIX))
            .unwrap_or(false)
    }

    /// Scans all relationship files under `input_root`.
    ///
    /// # Errors
    /// Fails if a relationship file cannot be read or its header does not
    /// have `sourceId` and `destinationId` at columns 4 and 5.
    pub fn resolve<P: AsRef<Path>>(&self, input_root: P) -> FilterResult<ModuleSet> {
        let input_root = input_root.as_ref();
        let mut modules = ModuleSet::new(self.target.clone());

        for entry in WalkDir::new(input_root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() || !Self::is_relationship_file(entry.path()) {
                continue;
            }

            let name = entry
                .path()
                .strip_prefix(input_root)
                .unwrap_or(entry.path())
                .display()
                .to_string();
            let file = File::open(entry.path())?;
            let found = self.scan_reader(BufReader::new(file), &name, &mut modules)?;
            debug!(file = %name, found, "Scanned relationship file for nested modules");
        }

        Ok(modules)
    }

    /// Scans one relationship file, adding nested modules to `modules`.
    ///
    /// Returns the number of rows pointing at the requested module.
    pub fn scan_reader<R: Read>(
        &self,
        reader: R,
        name: &str,
        modules: &mut ModuleSet,
    ) -> FilterResult<usize> {
        let mut reader = relationship_reader(reader);
        let mut record = ByteRecord::new();

        if !reader.read_byte_record(&mut record)? {
            return Err(FilterError::EmptyRelationshipFile {
                file: name.to_string(),
            });
        }
        validate_relationship_header(&record, name)?;

        let target = self.target.as_bytes();
        let mut matches = 0;

        while reader.read_byte_record(&mut record)? {
            let (Some(source), Some(destination)) =
                (record.get(SOURCE_ID_INDEX), record.get(DESTINATION_ID_INDEX))
            else {
                debug!(
                    file = %name,
                    line = record.position().map(|p| p.line()).unwrap_or(0),
                    fields = record.len(),
                    "Skipping short relationship row"
                );
                continue;
            };

            if destination == target {
                matches += 1;
                modules.insert_nested(String::from_utf8_lossy(source).into_owned());
            }
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id\teffectiveTime\tactive\tmoduleId\tsourceId\tdestinationId\trelationshipGroup\ttypeId\tcharacteristicTypeId\tmodifierId";

    fn relationship_file(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        text.push_str("\r\n");
        for row in rows {
            text.push_str(row);
            text.push_str("\r\n");
        }
        text
    }

    #[test]
    fn test_is_relationship_file() {
        assert!(ModuleResolver::is_relationship_file(Path::new(
            "Snapshot/Terminology/sct2_Relationship_Snapshot_US1000124_20150301.txt"
        )));
        assert!(!ModuleResolver::is_relationship_file(Path::new(
            "sct2_StatedRelationship_Snapshot_US1000124_20150301.txt"
        )));
        assert!(!ModuleResolver::is_relationship_file(Path::new(
            "sct2_Relationship_dir/readme.md"
        )));
    }

    #[test]
    fn test_scan_adds_sources_pointing_at_target() {
        let resolver = ModuleResolver::new(731000124108);
        let mut modules = ModuleSet::from_id(731000124108);
        let data = relationship_file(&[
            "\"R1\tignored\tignored\tignored\t900000000000207008\t731000124108",
            "R2\t20150301\t1\t731000124108\t404684003\t138875005\t0\t116680003\t900000000000011006\t900000000000451002",
        ]);

        let found = resolver
            .scan_reader(data.as_bytes(), "rel.txt", &mut modules)
            .unwrap();

        assert_eq!(found, 1);
        let all: Vec<&str> = modules.iter().collect();
        assert_eq!(all, vec!["731000124108", "900000000000207008"]);
    }

    #[test]
    fn test_scan_is_single_level() {
        // 111 -> 222 -> target: only 222 is nested.
        let resolver = ModuleResolver::new(731000124108);
        let mut modules = ModuleSet::from_id(731000124108);
        let data = relationship_file(&[
            "a\t1\t1\tm\t222\t731000124108",
            "b\t1\t1\tm\t111\t222",
        ]);

        resolver
            .scan_reader(data.as_bytes(), "rel.txt", &mut modules)
            .unwrap();

        assert!(modules.contains("222"));
        assert!(!modules.contains("111"));
    }

    #[test]
    fn test_scan_tolerates_short_rows() {
        let resolver = ModuleResolver::new(731000124108);
        let mut modules = ModuleSet::from_id(731000124108);
        let data = relationship_file(&["short\trow", "a\t1\t1\tm\t333\t731000124108"]);

        let found = resolver
            .scan_reader(data.as_bytes(), "rel.txt", &mut modules)
            .unwrap();
        assert_eq!(found, 1);
        assert!(modules.contains("333"));
    }

    #[test]
    fn test_scan_rejects_bad_header() {
        let resolver = ModuleResolver::new(731000124108);
        let mut modules = ModuleSet::from_id(731000124108);
        let data = "id\teffectiveTime\tactive\tmoduleId\tsource\tdestinationId\n";

        let err = resolver
            .scan_reader(data.as_bytes(), "rel.txt", &mut modules)
            .unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_scan_rejects_empty_file() {
        let resolver = ModuleResolver::new(731000124108);
        let mut modules = ModuleSet::from_id(731000124108);

        let err = resolver
            .scan_reader(&b""[..], "rel.txt", &mut modules)
            .unwrap_err();
        assert!(matches!(err, FilterError::EmptyRelationshipFile { .. }));
    }
}
