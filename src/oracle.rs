use crate::error::Error;
use crate::eval::{evaluate_line, Outcome};
use crate::transcript::{BANNER, FAREWELL, PROMPT};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Returns the transcript Power Calculator is expected to print for `tests`, one input per item.
///
/// The first expression that fails to parse aborts the whole transcript.
pub fn expectations<'a, I>(tests: I) -> Result<Vec<String>, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = vec![BANNER.to_string()];
    for (i, expr) in tests.into_iter().enumerate() {
        let outcome = evaluate_line(i + 1, expr)?;
        if outcome == Outcome::DivisionByZero {
            log::trace!("line {}: division by zero", i + 1);
        }
        lines.push(outcome.to_string());
    }
    lines.push(PROMPT.to_string());
    lines.push(FAREWELL.to_string());
    Ok(lines)
}

/// Reads the test cases in `test_file` and writes the expected transcript to `expect_file`,
/// replacing its content. Returns the number of test cases.
///
/// Nothing is written if a test case fails to parse.
pub fn generate_expects(
    test_file: impl AsRef<Path>,
    expect_file: impl AsRef<Path>,
) -> Result<usize, Error> {
    let (test_file, expect_file) = (test_file.as_ref(), expect_file.as_ref());
    let tests = fs::read_to_string(test_file).map_err(|e| Error::io(test_file, e))?;
    let transcript = expectations(tests.lines())?;

    let mut out = BufWriter::new(File::create(expect_file).map_err(|e| Error::io(expect_file, e))?);
    for line in &transcript {
        writeln!(out, "{}", line).map_err(|e| Error::io(expect_file, e))?;
    }
    out.flush().map_err(|e| Error::io(expect_file, e))?;

    let cases = transcript.len() - crate::FRAMING_LINES;
    log::info!(
        "wrote {} expectations for {} to {}",
        cases,
        test_file.display(),
        expect_file.display()
    );
    Ok(cases)
}
