//! # Batch Runner
//!
//! Converts every annotated file of a directory and collects the results.
//!
//! ## Ordering
//! Directory entries are sorted the way people number files: `1, 2, 10`
//! rather than `1, 10, 2` (see [`natural_cmp`]). Rows appear in the output in
//! this order, so repeated runs over the same directory give identical tables.
//!
//! ## Failures
//! A file that cannot be read or does not align is recorded as a
//! [`SampleFailure`] and skipped; the batch always runs to the end. Failed
//! files contribute no rows at all.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::Config;
use crate::encoding::Encoding;
use crate::error::TableError;
use crate::row::{Row, Speaker};
use crate::sample::{load_sample, process_sample};

/// A file that could not be converted.
#[derive(Debug)]
pub struct SampleFailure {
    /// 1-based position of the file in the sorted directory listing
    pub index: usize,
    pub sample: String,
    pub error: TableError,
}

impl SampleFailure {
    pub fn message(&self) -> String {
        format!(
            "{}. Error while processing file '{}': {}",
            self.index, self.sample, self.error
        )
    }
}

/// Result of converting a single file.
#[derive(Debug)]
pub enum SampleOutcome {
    Converted(Vec<Row>),
    Failed(TableError),
}

impl From<Result<Vec<Row>, TableError>> for SampleOutcome {
    fn from(result: Result<Vec<Row>, TableError>) -> Self {
        match result {
            Ok(rows) => SampleOutcome::Converted(rows),
            Err(e) => SampleOutcome::Failed(e),
        }
    }
}

/// Everything a batch run produced.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Rows of all converted samples, in processing order (no header)
    pub rows: Vec<Row>,
    pub failures: Vec<SampleFailure>,
    /// Number of files attempted
    pub attempted: usize,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// Error count line followed by one line per failure, even when empty.
    pub fn error_summary(&self) -> Vec<String> {
        std::iter::once(format!("{} errors:", self.failures.len()))
            .chain(self.failures.iter().map(SampleFailure::message))
            .collect()
    }
}

/// One input file picked from the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile {
    pub index: usize,
    pub name: String,
    pub path: PathBuf,
}

/// List `dir`, sort naturally, and keep the files ending in `.{extension}`.
///
/// Indices count every sorted entry, matching or not.
pub fn list_samples(dir: &Path, extension: &str) -> Result<Vec<SampleFile>, TableError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| TableError::io(dir, e))? {
        let entry = entry.map_err(|e| TableError::io(dir, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort_by(|a, b| natural_cmp(a, b));

    let suffix = format!(".{}", extension);
    let samples = names
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let sample = name.strip_suffix(&suffix)?.to_string();
            let path = dir.join(&name);
            if !path.is_file() {
                return None;
            }
            Some(SampleFile {
                index: i + 1,
                name: sample,
                path,
            })
        })
        .collect();
    Ok(samples)
}

/// Convert one file, never panicking on bad input.
pub fn convert_file(
    path: &Path,
    sample: &str,
    encoding: Encoding,
    speaker: &Speaker,
) -> SampleOutcome {
    load_sample(path, encoding)
        .and_then(|tiers| process_sample(&tiers, sample, speaker))
        .into()
}

/// Convert every sample file in the configured input directory.
///
/// Only failing to list the directory is an error; per-file problems end up
/// in [`BatchReport::failures`].
pub fn run(config: &Config) -> Result<BatchReport, TableError> {
    let samples = list_samples(&config.input_dir, &config.extension)?;
    info!(
        "Processing {} files from {}",
        samples.len(),
        config.input_dir.display()
    );

    let mut report = BatchReport::default();
    for file in &samples {
        info!("{}. Processing file {}", file.index, file.name);
        report.attempted += 1;

        match convert_file(&file.path, &file.name, config.encoding, &config.speaker) {
            SampleOutcome::Converted(rows) => {
                info!(sample = %file.name, rows = rows.len(), "Converted");
                report.rows.extend(rows);
            }
            SampleOutcome::Failed(error) => {
                let failure = SampleFailure {
                    index: file.index,
                    sample: file.name.clone(),
                    error,
                };
                error!("{}", failure.message());
                report.failures.push(failure);
            }
        }
    }

    Ok(report)
}

/// Compare names so that embedded numbers sort by value.
///
/// Names are split into digit and non-digit runs. Digit runs compare as
/// numbers of any length, text runs compare as text, and a number sorts before
/// text at the same position. Names equal under these rules fall back to plain
/// string order so the result is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut ra, mut rb) = (runs(a), runs(b));
    loop {
        match (ra.next(), rb.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_runs(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_runs(x: &str, y: &str) -> Ordering {
    let x_digits = x.starts_with(|c: char| c.is_ascii_digit());
    let y_digits = y.starts_with(|c: char| c.is_ascii_digit());
    match (x_digits, y_digits) {
        (true, true) => {
            let xs = x.trim_start_matches('0');
            let ys = y.trim_start_matches('0');
            xs.len().cmp(&ys.len()).then_with(|| xs.cmp(ys))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.cmp(y),
    }
}

/// Split into maximal runs of ASCII digits and non-digits.
fn runs(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(run)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| natural_cmp(a, b));
        v
    }

    #[test]
    fn test_numeric_order() {
        assert_eq!(
            sorted(&["2.TextGrid", "10.TextGrid", "1.TextGrid"]),
            vec!["1.TextGrid", "2.TextGrid", "10.TextGrid"]
        );
    }

    #[test]
    fn test_prefixed_numbers() {
        assert_eq!(
            sorted(&["s10", "s9", "s100", "s1"]),
            vec!["s1", "s9", "s10", "s100"]
        );
    }

    #[test]
    fn test_leading_zeros_tie_broken_by_text() {
        assert_eq!(sorted(&["07", "7", "007"]), vec!["007", "07", "7"]);
    }

    #[test]
    fn test_numbers_before_text() {
        assert_eq!(sorted(&["a", "1"]), vec!["1", "a"]);
    }

    #[test]
    fn test_huge_numbers_do_not_overflow() {
        assert_eq!(
            natural_cmp("99999999999999999999999", "100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_runs() {
        assert_eq!(runs("ab12c3").collect::<Vec<_>>(), vec!["ab", "12", "c", "3"]);
        assert_eq!(runs("").count(), 0);
    }

    #[test]
    fn test_failure_message() {
        let failure = SampleFailure {
            index: 3,
            sample: "12".to_string(),
            error: TableError::ConsistencyError {
                sample: "12".to_string(),
                message: "formant count (4) does not match vowel symbol count (5)".to_string(),
            },
        };
        assert_eq!(
            failure.message(),
            "3. Error while processing file '12': Inconsistent sample '12': formant count (4) does not match vowel symbol count (5)"
        );
    }

    #[test]
    fn test_error_summary_always_reports_count() {
        assert_eq!(BatchReport::default().error_summary(), vec!["0 errors:"]);

        let report = BatchReport {
            rows: vec![],
            failures: vec![SampleFailure {
                index: 4,
                sample: "x".to_string(),
                error: TableError::Encoding("bad".to_string()),
            }],
            attempted: 1,
        };
        assert_eq!(
            report.error_summary(),
            vec![
                "1 errors:".to_string(),
                "4. Error while processing file 'x': Encoding error: bad".to_string(),
            ]
        );
    }

    #[test]
    fn test_outcome_from_result() {
        assert!(matches!(SampleOutcome::from(Ok(vec![])), SampleOutcome::Converted(_)));
        let failed = SampleOutcome::from(Err(TableError::Encoding("bad".to_string())));
        assert!(matches!(failed, SampleOutcome::Failed(TableError::Encoding(_))));
    }
}
