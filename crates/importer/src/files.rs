use crate::error::{ImportError, QuerySizeError};
use chrono::{DateTime, Local, NaiveDate};
use std::{
    env, fmt,
    fs::{self, Metadata},
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

pub const CATALOG_PREFIX: &str = "QNS_QCCV_CU_CATALOG_NP";
pub const REQUISITES_PREFIX: &str = "QNS_QCCV_CU_REQUISITES_NP";
pub const ATTRIBUTES_PREFIX: &str = "QNS_QCCV_COURSE_ATTRIBUTES_NP";
pub const ATTRIBUTE_VALUES_PREFIX: &str = "SR742A___CRSE_ATTRIBUTE_VALUE";
pub const TRANSFER_RULES_PREFIX: &str = "QNS_CV_SR_TRNS_INTERNAL_RULES";

/// Size difference, as a fraction of the previous size, that `check-query-sizes` tolerates
pub const SIZE_TOLERANCE: f64 = 0.1;

/// Finds the latest extract for `prefix` in `dir`.
///
/// Extract names carry a run timestamp after the prefix, so the lexicographically
/// greatest matching `.csv` name is the most recent.
pub fn latest_extract(dir: &Path, prefix: &str) -> Result<PathBuf, ImportError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.starts_with(prefix) && name.ends_with(".csv") {
            names.push(name);
        }
    }

    names
        .into_iter()
        .max()
        .map(|name| dir.join(name))
        .ok_or_else(|| ImportError::MissingExtract {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
        })
}

/// Which file timestamp counts as an extract's date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// Creation time, falling back to modification time where the platform lacks it
    Birth,
    Modified,
}

/// An extract together with the date it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct DatedFile {
    pub date: NaiveDate,
    pub path: PathBuf,
}

impl DatedFile {
    pub fn read(path: &Path, source: DateSource) -> Result<Self, ImportError> {
        let metadata = fs::symlink_metadata(path)?;

        Ok(Self {
            date: file_date(&metadata, source)?,
            path: path.to_path_buf(),
        })
    }

    pub fn file_name(&self) -> String {
        self.path.display().to_string()
    }
}

impl fmt::Display for DatedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.path.display())
    }
}

fn file_date(metadata: &Metadata, source: DateSource) -> io::Result<NaiveDate> {
    let time: SystemTime = match source {
        DateSource::Birth => metadata.created().or_else(|_| metadata.modified())?,
        DateSource::Modified => metadata.modified()?,
    };

    Ok(DateTime::<Local>::from(time).date_naive())
}

/// Checks that every extract of a set was produced on the same day
///
/// # Returns
/// The shared date, or [`ImportError::FileDateMismatch`] listing every file
pub fn ensure_same_date(files: Vec<DatedFile>) -> Result<NaiveDate, ImportError> {
    let Some(first) = files.first().map(|file| file.date) else {
        return Err(ImportError::FileDateMismatch(files));
    };

    if files.iter().all(|file| file.date == first) {
        Ok(first)
    } else {
        Err(ImportError::FileDateMismatch(files))
    }
}

/// Short host name used to keep per-machine logs apart
pub fn host_name() -> String {
    env::var("HOSTNAME")
        .ok()
        .and_then(|host| host.split('.').next().map(str::to_owned))
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

/// Compares each previous extract with its replacement.
///
/// Every `*.csv` in `previous_dir` must have exactly one counterpart in `new_dir` whose
/// name starts with the previous file's stem. The counterpart must be non-empty and
/// within [`SIZE_TOLERANCE`] of the previous size.
///
/// # Returns
/// One line per favorable comparison, or the first failure
pub fn compare_query_sizes(
    new_dir: &Path,
    previous_dir: &Path,
) -> Result<Vec<String>, QuerySizeError> {
    let new_names = csv_names(new_dir)?;
    let mut report = Vec::new();

    for previous_name in csv_names(previous_dir)? {
        let stem = previous_name.trim_end_matches(".csv");
        let matches: Vec<&String> = new_names
            .iter()
            .filter(|name| name.starts_with(stem))
            .collect();

        let new_name = match matches.as_slice() {
            [] => return Err(QuerySizeError::Missing(previous_name)),
            [only] => *only,
            _ => {
                return Err(QuerySizeError::Ambiguous {
                    count: matches.len(),
                    name: previous_name,
                });
            }
        };

        let previous_size = fs::metadata(previous_dir.join(&previous_name))?.len();
        let new_size = fs::metadata(new_dir.join(new_name))?.len();

        if new_size == 0 {
            return Err(QuerySizeError::Empty(new_name.clone()));
        }
        if previous_size.abs_diff(new_size) as f64 > SIZE_TOLERANCE * previous_size as f64 {
            return Err(QuerySizeError::SizeChanged {
                new: new_name.clone(),
                new_size,
                previous: previous_name,
                previous_size,
            });
        }

        report.push(format!("{new_name} compares favorably to {previous_name}"));
    }

    Ok(report)
}

fn csv_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".csv") {
            names.push(name);
        }
    }
    names.sort();

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, bytes: usize) {
        fs::write(dir.join(name), "x".repeat(bytes)).unwrap();
    }

    fn dated(date: &str, path: &str) -> DatedFile {
        DatedFile {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_latest_extract_picks_greatest_name() {
        let dir = tempdir().unwrap();
        write(dir.path(), "QNS_CV_SR_TRNS_INTERNAL_RULES-1001.csv", 1);
        write(dir.path(), "QNS_CV_SR_TRNS_INTERNAL_RULES-1003.csv", 1);
        write(dir.path(), "QNS_CV_SR_TRNS_INTERNAL_RULES-1002.csv", 1);
        write(dir.path(), "QNS_CV_SR_TRNS_INTERNAL_RULES-9999.txt", 1);

        let latest = latest_extract(dir.path(), TRANSFER_RULES_PREFIX).unwrap();
        assert_eq!(
            latest.file_name().unwrap(),
            "QNS_CV_SR_TRNS_INTERNAL_RULES-1003.csv"
        );
    }

    #[test]
    fn test_latest_extract_missing() {
        let dir = tempdir().unwrap();
        write(dir.path(), "QNS_QCCV_CU_CATALOG_NP.csv", 1);

        let err = latest_extract(dir.path(), REQUISITES_PREFIX).unwrap_err();
        assert!(matches!(err, ImportError::MissingExtract { .. }));
    }

    #[test]
    fn test_same_dates_pass() {
        let date = ensure_same_date(vec![
            dated("2025-08-01", "catalog.csv"),
            dated("2025-08-01", "requisites.csv"),
            dated("2025-08-01", "attributes.csv"),
        ])
        .unwrap();

        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    }

    #[test]
    fn test_mismatched_dates_list_every_file() {
        let err = ensure_same_date(vec![
            dated("2025-08-01", "catalog.csv"),
            dated("2025-07-31", "requisites.csv"),
            dated("2025-08-01", "attributes.csv"),
        ])
        .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("*** FILE DATES DO NOT MATCH ***"));
        assert!(message.contains("  2025-07-31 requisites.csv"));
        assert!(message.contains("  2025-08-01 attributes.csv"));
    }

    #[test]
    fn test_freshly_written_file_is_dated_today() {
        let dir = tempdir().unwrap();
        write(dir.path(), "today.csv", 3);

        let file = DatedFile::read(&dir.path().join("today.csv"), DateSource::Birth).unwrap();
        assert_eq!(file.date, Local::now().date_naive());
    }

    #[test]
    fn test_query_sizes_within_tolerance() {
        let new = tempdir().unwrap();
        let previous = tempdir().unwrap();
        write(previous.path(), "QNS_QCCV_CU_CATALOG_NP.csv", 1000);
        write(new.path(), "QNS_QCCV_CU_CATALOG_NP-2025.csv", 1090);

        let report = compare_query_sizes(new.path(), previous.path()).unwrap();
        assert_eq!(
            report,
            vec![
                "QNS_QCCV_CU_CATALOG_NP-2025.csv compares favorably to QNS_QCCV_CU_CATALOG_NP.csv"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_query_size_changed_too_much() {
        let new = tempdir().unwrap();
        let previous = tempdir().unwrap();
        write(previous.path(), "QNS_QCCV_CU_CATALOG_NP.csv", 1000);
        write(new.path(), "QNS_QCCV_CU_CATALOG_NP-2025.csv", 850);

        let err = compare_query_sizes(new.path(), previous.path()).unwrap_err();
        assert!(matches!(
            err,
            QuerySizeError::SizeChanged {
                new_size: 850,
                previous_size: 1000,
                ..
            }
        ));
    }

    #[test]
    fn test_query_missing_empty_or_ambiguous() {
        let previous = tempdir().unwrap();
        write(previous.path(), "QNS_QCCV_CU_CATALOG_NP.csv", 100);

        let new = tempdir().unwrap();
        let err = compare_query_sizes(new.path(), previous.path()).unwrap_err();
        assert!(matches!(err, QuerySizeError::Missing(_)));

        write(new.path(), "QNS_QCCV_CU_CATALOG_NP-1.csv", 0);
        let err = compare_query_sizes(new.path(), previous.path()).unwrap_err();
        assert!(matches!(err, QuerySizeError::Empty(_)));

        write(new.path(), "QNS_QCCV_CU_CATALOG_NP-2.csv", 100);
        let err = compare_query_sizes(new.path(), previous.path()).unwrap_err();
        assert!(matches!(err, QuerySizeError::Ambiguous { count: 2, .. }));
    }
}
