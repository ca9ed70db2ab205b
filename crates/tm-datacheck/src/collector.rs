use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use parking_lot::Mutex;
use tm_common::ErrorList;

use crate::always_error::ALWAYS_ERROR;
use crate::entry::{DatacheckEntry, FpRow};

#[derive(Debug, Default)]
pub struct MarkFpsOutcome {
    pub matched: usize,
    pub total: usize,
}

/// Thread-safe collector for data-quality diagnostics raised throughout the
/// run (stages 3, 6, and 9 all call `add`). Reconciliation against
/// `datacheckfps.csv` happens once, after every stage that can raise a
/// diagnostic has finished.
#[derive(Default)]
pub struct Datacheck {
    errors: Mutex<Vec<DatacheckEntry>>,
}

impl Datacheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, entry: DatacheckEntry) {
        self.errors.lock().push(entry);
    }

    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    /// Rendered (`render()`) lines for every entry with the given code, for
    /// driver-level logs that report on one check in isolation (e.g.
    /// `unprocessedwpts.log` over `MALFORMED_URL`).
    pub fn render_matching(&self, code: &str) -> Vec<String> {
        let mut out: Vec<String> =
            self.errors.lock().iter().filter(|e| e.code == code).map(DatacheckEntry::render).collect();
        out.sort();
        out
    }

    /// Read `datacheckfps.csv`: `root;label1;label2;label3;code;info` rows,
    /// semicolon-delimited, one header line. A row naming an
    /// [`ALWAYS_ERROR`](crate::always_error::ALWAYS_ERROR) code is logged
    /// and discarded rather than applied. A missing file means no false
    /// positives are known yet, not an error.
    pub fn read_fps(path: &Path, errors: &ErrorList) -> Vec<FpRow> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let mut out = Vec::new();
        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.add_error(format!("Could not parse datacheckfps.csv line: {e}"));
                    continue;
                }
            };
            if record.len() != 6 {
                errors.add_error(format!(
                    "Could not parse datacheckfps.csv line: [{}], expected 6 fields, found {}",
                    record.iter().collect::<Vec<_>>().join(";"),
                    record.len()
                ));
                continue;
            }
            let code = record[4].to_string();
            if ALWAYS_ERROR.contains(&code.as_str()) {
                tracing::warn!(
                    line = %record.iter().collect::<Vec<_>>().join(";"),
                    "datacheckfps.csv line not allowed (always error)"
                );
                continue;
            }
            out.push(FpRow {
                root: record[0].to_string(),
                label1: record[1].to_string(),
                label2: record[2].to_string(),
                label3: record[3].to_string(),
                code,
                info: record[5].to_string(),
            });
        }
        out
    }

    /// Sort all collected entries by their rendered form, then mark each
    /// one a false positive when a `datacheckfps.csv` row matches it in
    /// every field including `info`. Rows that match everything but
    /// `info` produce a `CHANGETO` suggestion instead, written to
    /// `nearmatchfps.log`, and are left in `fps` (returned) so
    /// `unmatchedfps_log` can report them.
    pub fn mark_fps(&self, mut fps: Vec<FpRow>, logfile_dir: &Path) -> std::io::Result<(MarkFpsOutcome, Vec<FpRow>)> {
        let mut errors = self.errors.lock();
        errors.sort_by(|a, b| a.render().cmp(&b.render()));

        let mut changeto_lines = Vec::new();
        let mut matched = 0usize;
        for d in errors.iter_mut() {
            let mut i = 0;
            while i < fps.len() {
                if d.matches_except_info(&fps[i]) {
                    if d.info == fps[i].info {
                        d.fp = true;
                        matched += 1;
                        fps.remove(i);
                        break;
                    } else {
                        let fp = &fps[i];
                        changeto_lines.push(format!(
                            "FP_ENTRY: {};{};{};{};{};{}\nCHANGETO: {};{};{};{};{};{}",
                            fp.root, fp.label1, fp.label2, fp.label3, fp.code, fp.info,
                            fp.root, fp.label1, fp.label2, fp.label3, fp.code, d.info
                        ));
                        i += 1;
                    }
                } else {
                    i += 1;
                }
            }
        }

        let mut f = BufWriter::new(File::create(logfile_dir.join("nearmatchfps.log"))?);
        writeln!(f, "Log file created at: {}", chrono::Local::now())?;
        for line in &changeto_lines {
            writeln!(f, "{line}")?;
        }

        let total = errors.len();
        Ok((MarkFpsOutcome { matched, total }, fps))
    }

    pub fn unmatchedfps_log(path: &Path, remaining: &[FpRow]) -> std::io::Result<()> {
        let mut f = BufWriter::new(File::create(path)?);
        writeln!(f, "Log file created at: {}", chrono::Local::now())?;
        if remaining.is_empty() {
            writeln!(f, "No unmatched FP entries.")?;
        } else {
            for r in remaining {
                writeln!(f, "{};{};{};{};{};{}", r.root, r.label1, r.label2, r.label3, r.code, r.info)?;
            }
        }
        Ok(())
    }

    /// Write every non-false-positive entry, sorted, in a format ready to
    /// paste into `datacheckfps.csv`.
    pub fn datacheck_log(&self, path: &Path) -> std::io::Result<()> {
        let errors = self.errors.lock();
        let mut f = BufWriter::new(File::create(path)?);
        writeln!(f, "Log file created at: {}", chrono::Local::now())?;
        writeln!(f, "Datacheck errors that have been flagged as false positives are not included.")?;
        writeln!(f, "These entries should be in a format ready to paste into datacheckfps.csv.")?;
        writeln!(f, "Root;Waypoint1;Waypoint2;Waypoint3;Error;Info")?;
        if errors.is_empty() {
            writeln!(f, "No datacheck errors found.")?;
        } else {
            for d in errors.iter().filter(|d| !d.fp) {
                writeln!(f, "{}", d.render())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_model::RouteIdx;

    #[test]
    fn marks_exact_fp_match() {
        let dc = Datacheck::new();
        dc.add(DatacheckEntry::new(RouteIdx(0), "ca.1", "A", "", "", "DUPLICATE_LABEL", "extra"));
        let fps = vec![FpRow {
            root: "ca.1".into(),
            label1: "A".into(),
            label2: "".into(),
            label3: "".into(),
            code: "DUPLICATE_LABEL".into(),
            info: "extra".into(),
        }];
        let dir = tempfile::tempdir().unwrap();
        let (outcome, remaining) = dc.mark_fps(fps, dir.path()).unwrap();
        assert_eq!(outcome.matched, 1);
        assert!(remaining.is_empty());
    }

    #[test]
    fn leaves_info_mismatch_unmatched() {
        let dc = Datacheck::new();
        dc.add(DatacheckEntry::new(RouteIdx(0), "ca.1", "A", "", "", "DUPLICATE_LABEL", "new-info"));
        let fps = vec![FpRow {
            root: "ca.1".into(),
            label1: "A".into(),
            label2: "".into(),
            label3: "".into(),
            code: "DUPLICATE_LABEL".into(),
            info: "old-info".into(),
        }];
        let dir = tempfile::tempdir().unwrap();
        let (outcome, remaining) = dc.mark_fps(fps, dir.path()).unwrap();
        assert_eq!(outcome.matched, 0);
        assert_eq!(remaining.len(), 1);
    }
}
