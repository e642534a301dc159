//! Record loading from line-delimited JSON.
//!
//! Each line is parsed on its own. A line that fails to parse is skipped and reported as a
//! [`LineDiagnostic`]; it never aborts the load. The only fatal failures are being unable to
//! open the source, or an I/O error part-way through reading it.

use crate::{CoverageError, CoverageResult};
use coverage_types::{Corpus, Record};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A skipped source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// 1-based line number in the source.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error parsing line {}: {}", self.line, self.message)
    }
}

/// The outcome of a load: the records that parsed and the lines that did not.
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    pub corpus: Corpus,
    pub diagnostics: Vec<LineDiagnostic>,
}

/// Loads a corpus from the file at `path`.
///
/// # Arguments
///
/// * `path` - Line-delimited JSON file, one report object per line.
///
/// # Returns
///
/// The parsed records in file order, plus one [`LineDiagnostic`] per skipped line.
///
/// # Errors
///
/// Returns `CoverageError::SourceOpen` if the file cannot be opened, or
/// `CoverageError::SourceRead` if reading fails part-way through.
pub fn load_path(path: &Path) -> CoverageResult<LoadedCorpus> {
    tracing::info!("loading data from {}", path.display());

    let file = File::open(path).map_err(|source| CoverageError::SourceOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = load_reader(BufReader::new(file), path)?;

    tracing::info!(
        "loaded {} reports ({} lines skipped)",
        loaded.corpus.len(),
        loaded.diagnostics.len()
    );
    Ok(loaded)
}

/// Loads a corpus from any buffered reader. `source` is only used in error messages.
pub fn load_reader<R: BufRead>(mut reader: R, source: &Path) -> CoverageResult<LoadedCorpus> {
    let mut records = Vec::new();
    let mut diagnostics = Vec::new();
    let mut buf = Vec::new();
    let mut line_num = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source_err| CoverageError::SourceRead {
                path: source.to_path_buf(),
                source: source_err,
            })?;
        if read == 0 {
            break;
        }
        line_num += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                skip(&mut diagnostics, line_num, format!("invalid UTF-8: {}", e));
                continue;
            }
        };

        if line.trim().is_empty() {
            tracing::debug!("skipping blank line {}", line_num);
            continue;
        }

        match Record::from_json_line(line) {
            Ok(record) => records.push(record),
            Err(e) => skip(&mut diagnostics, line_num, e.to_string()),
        }
    }

    Ok(LoadedCorpus {
        corpus: Corpus::new(records),
        diagnostics,
    })
}

fn skip(diagnostics: &mut Vec<LineDiagnostic>, line: usize, message: String) {
    let diagnostic = LineDiagnostic { line, message };
    tracing::warn!("{}", diagnostic);
    diagnostics.push(diagnostic);
}
