use crate::error::Error;
use crate::transcript::{value_text, BANNER, FAREWELL};

use std::fmt;
use std::fs;
use std::path::Path;

/// Largest accepted `|expected / actual - 1|` between two result values.
pub const TOLERANCE: f64 = 1e-5;

/// Compares a calculator transcript against the oracle's expectations.
///
/// Lines are paired by position. The first `leading` and last `trailing` lines are
/// framing and are not compared as results (by default 1 and 3). Framing is still
/// checked: both transcripts must start with [`BANNER`] and end with [`FAREWELL`],
/// otherwise the pairing is likely shifted and a [`Diagnostic::Framing`] is reported.
#[derive(Debug, Clone)]
pub struct Checker {
    tolerance: f64,
    leading: usize,
    trailing: usize,
}

impl Default for Checker {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            leading: 1,
            trailing: 3,
        }
    }
}

/// Which transcript a framing problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Expected => "expected",
            Self::Actual => "actual",
        })
    }
}

/// A single problem found by the [`Checker`]. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The transcripts differ in length, nothing else was compared.
    LengthMismatch { expected: usize, actual: usize },
    Framing {
        side: Side,
        line: usize,
        wanted: &'static str,
        found: String,
    },
    Mismatch {
        line: usize,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { .. } => write!(f, "Lengths don't match!"),
            Self::Framing {
                side,
                line,
                wanted,
                found,
            } => write!(
                f,
                "Framing: {} line {} is {:?}, wanted {:?}",
                side, line, found, wanted
            ),
            Self::Mismatch {
                expected, actual, ..
            } => write!(f, "Mismatch: {} != {}", expected, actual),
        }
    }
}

/// Result of a comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Number of result line pairs that were compared.
    pub compared: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// `true` if no diagnostics were produced.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Mismatch { .. }))
    }
}

/// One diagnostic per line, as printed on the status stream.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.diagnostics {
            writeln!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets how many lines at the start and at the end of a transcript are skipped.
    pub fn with_framing(mut self, leading: usize, trailing: usize) -> Self {
        self.leading = leading;
        self.trailing = trailing;
        self
    }

    /// Compares two transcripts given as lines (without line terminators).
    pub fn compare<E, A>(&self, expected: &[E], actual: &[A]) -> Report
    where
        E: AsRef<str>,
        A: AsRef<str>,
    {
        let mut report = Report::default();
        if expected.len() != actual.len() {
            report.diagnostics.push(Diagnostic::LengthMismatch {
                expected: expected.len(),
                actual: actual.len(),
            });
            return report;
        }

        check_framing(Side::Expected, expected, &mut report);
        check_framing(Side::Actual, actual, &mut report);

        let end = expected.len().saturating_sub(self.trailing);
        let start = self.leading.min(end);
        for (i, (e, a)) in expected[start..end].iter().zip(&actual[start..end]).enumerate() {
            let (e, a) = (e.as_ref(), a.as_ref());
            report.compared += 1;
            if e == a || self.same_value(e, a) {
                continue;
            }
            report.diagnostics.push(Diagnostic::Mismatch {
                line: start + i + 1,
                expected: e.to_string(),
                actual: a.to_string(),
            });
        }
        report
    }

    /// Reads both transcripts and compares them, see [`Checker::compare`].
    pub fn check_files(
        &self,
        expect_file: impl AsRef<Path>,
        results_file: impl AsRef<Path>,
    ) -> Result<Report, Error> {
        let (expect_file, results_file) = (expect_file.as_ref(), results_file.as_ref());
        let expected = fs::read_to_string(expect_file).map_err(|e| Error::io(expect_file, e))?;
        let actual = fs::read_to_string(results_file).map_err(|e| Error::io(results_file, e))?;
        let expected: Vec<&str> = expected.lines().collect();
        let actual: Vec<&str> = actual.lines().collect();

        let report = self.compare(&expected, &actual);
        if report.is_clean() {
            log::info!(
                "{} matches {} ({} results)",
                results_file.display(),
                expect_file.display(),
                report.compared
            );
        } else {
            log::warn!(
                "{} differs from {}: {} diagnostics over {} results",
                results_file.display(),
                expect_file.display(),
                report.diagnostics.len(),
                report.compared
            );
        }
        Ok(report)
    }

    /// `true` if both lines carry numbers within the tolerance of each other.
    /// A line without a number (e.g. a division by zero message) never matches a different line.
    fn same_value(&self, expected: &str, actual: &str) -> bool {
        let parse = |line: &str| value_text(line).and_then(|s| s.parse::<f64>().ok());
        match (parse(expected), parse(actual)) {
            // a NaN ratio is not a mismatch
            (Some(e), Some(a)) => e == a || !((e / a - 1.0).abs() > self.tolerance),
            _ => false,
        }
    }
}

fn check_framing<L: AsRef<str>>(side: Side, lines: &[L], report: &mut Report) {
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return;
    };
    if first.as_ref().trim_end() != BANNER {
        report.diagnostics.push(Diagnostic::Framing {
            side,
            line: 1,
            wanted: BANNER,
            found: first.as_ref().to_string(),
        });
    }
    if last.as_ref().trim_end() != FAREWELL {
        log::debug!("{} transcript ends with {:?}", side, last.as_ref());
        report.diagnostics.push(Diagnostic::Framing {
            side,
            line: lines.len(),
            wanted: FAREWELL,
            found: last.as_ref().to_string(),
        });
    }
}

/// Compares `results_file` against `expect_file` with the default [`Checker`].
pub fn check(expect_file: impl AsRef<Path>, results_file: impl AsRef<Path>) -> Result<Report, Error> {
    Checker::default().check_files(expect_file, results_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn transcript(results: &[&str]) -> Vec<String> {
        let mut lines = vec![BANNER.to_string()];
        lines.extend(results.iter().map(|r| r.to_string()));
        lines.push(">".into());
        lines.push(FAREWELL.into());
        lines
    }

    #[test]
    fn identical_is_clean() {
        let t = transcript(&["> = 1", "> = 2", "> ! Division by 0.", "> = 4"]);
        let report = Checker::new().compare(&t, &t);
        assert!(report.is_clean(), "{}", report);
        assert_eq!(report.compared, 3);
    }

    #[test]
    fn length_mismatch_stops() {
        let e = transcript(&["> = 1", "> = 2"]);
        let a = transcript(&["> = 9"]);
        let report = Checker::new().compare(&e, &a);
        assert_eq!(
            report.diagnostics,
            [Diagnostic::LengthMismatch {
                expected: 5,
                actual: 4
            }]
        );
        assert_eq!(report.compared, 0);
        assert_eq!(report.to_string(), "Lengths don't match!\n");
    }

    #[test]
    fn tolerance_boundary() {
        let e = transcript(&["> = 100000", "> = 100000", "> = 0"]);
        let a = transcript(&["> = 100000.9", "> = 100001.1", "> = 0"]);
        // last result line is framing with the default slicing; compare everything instead
        let report = Checker::new().with_framing(1, 2).compare(&e, &a);
        let mismatches: Vec<_> = report.mismatches().collect();
        assert_eq!(
            mismatches,
            [&Diagnostic::Mismatch {
                line: 3,
                expected: "> = 100000".into(),
                actual: "> = 100001.1".into()
            }]
        );
        assert_eq!(
            report.to_string(),
            "Mismatch: > = 100000 != > = 100001.1\n"
        );
    }

    #[test]
    fn default_skips_last_three_lines() {
        let e = transcript(&["> = 1", "> = 2"]);
        let a = transcript(&["> = 1", "> = 3"]);
        let report = Checker::new().compare(&e, &a);
        assert!(report.is_clean());
        assert_eq!(report.compared, 1);

        let report = Checker::new().with_framing(1, 2).compare(&e, &a);
        assert_eq!(report.mismatches().count(), 1);
    }

    #[test]
    fn spacing_after_prefix_is_ignored() {
        let e = transcript(&["> = 2.5", "x"]);
        let a = transcript(&[">  =   2.5", "x"]);
        // only the first three characters are skipped, the '=' is left in front of the number
        let report = Checker::new().compare(&e, &a);
        assert_eq!(report.mismatches().count(), 1);

        let a = transcript(&["> = 2.50000", "x"]);
        assert!(Checker::new().compare(&e, &a).is_clean());
    }

    #[test]
    fn division_sentinel_against_value() {
        let e = transcript(&["> ! Division by 0.", "x"]);
        let a = transcript(&["> = inf", "x"]);
        let report = Checker::new().compare(&e, &a);
        assert_eq!(report.mismatches().count(), 1);
    }

    #[test]
    fn zero_actual_against_nonzero() {
        let e = transcript(&["> = 0.000001", "x"]);
        let a = transcript(&["> = 0", "x"]);
        assert_eq!(Checker::new().compare(&e, &a).mismatches().count(), 1);
    }

    #[test]
    fn framing_is_reported() {
        let e = transcript(&["> = 1", "x"]);
        let mut a = e.clone();
        a[0] = "Welcome!".into();
        let report = Checker::new().compare(&e, &a);
        assert_eq!(
            report.diagnostics,
            [Diagnostic::Framing {
                side: Side::Actual,
                line: 1,
                wanted: BANNER,
                found: "Welcome!".into()
            }]
        );
        assert!(!report.is_clean());
        assert_eq!(report.compared, 1);
    }

    #[test]
    fn short_transcripts_compare_nothing() {
        for n in 0..4 {
            let lines = vec!["> = 1"; n];
            let other = vec!["> = 2"; n];
            assert_eq!(Checker::new().compare(&lines, &other).compared, 0);
        }
    }

    #[test]
    fn check_files_reads_both() {
        let dir = tempfile::tempdir().unwrap();
        let expect = dir.path().join("pcalc.expect");
        let out = dir.path().join("pcalc.out");
        std::fs::write(&expect, transcript(&["> = 1", "> = 2", "x"]).join("\n") + "\n").unwrap();
        std::fs::write(&out, transcript(&["> = 1.000001", "> = 2", "x"]).join("\n")).unwrap();
        let report = check(&expect, &out).unwrap();
        assert!(report.is_clean(), "{}", report);
        assert_eq!(report.compared, 2);

        assert!(check(&expect, dir.path().join("missing")).is_err());
    }

    proptest! {
        #[test]
        fn relative_error_within_tolerance_accepted(v in 1e-300f64..1e300, r in -0.9e-5f64..0.9e-5) {
            let (ev, av) = (format!("> = {}", v), format!("> = {}", v * (1.0 + r)));
            let e = transcript(&[ev.as_str(), "x"]);
            let a = transcript(&[av.as_str(), "x"]);
            prop_assert!(Checker::new().compare(&e, &a).is_clean());
        }

        #[test]
        fn relative_error_beyond_tolerance_reported(v in 1e-300f64..1e300, r in 1.1e-5f64..1.0) {
            let (ev, av) = (format!("> = {}", v), format!("> = {}", v * (1.0 + r)));
            let e = transcript(&[ev.as_str(), "x"]);
            let a = transcript(&[av.as_str(), "x"]);
            prop_assert_eq!(Checker::new().compare(&e, &a).mismatches().count(), 1);
        }

        #[test]
        fn self_comparison_is_clean(values in proptest::collection::vec(any::<f64>(), 0..20)) {
            let lines: Vec<String> = values.iter().map(|v| format!("> = {}", v)).collect();
            let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
            let t = transcript(&refs);
            prop_assert!(Checker::new().compare(&t, &t).is_clean());
        }
    }
}
