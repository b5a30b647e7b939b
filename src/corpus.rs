use crate::error::{Error, ErrorRepr};
use crate::Generator;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// What was written by [`Generator::write_tests`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of test cases (lines) written.
    pub cases: usize,
    /// Number of distinct expression shapes among them, see [`crate::Visitor`] for `u64`.
    pub shapes: usize,
}

impl Generator {
    /// Writes `count` expressions generated from `seed` to `path`, one per line,
    /// replacing any previous content. Duplicates are kept.
    pub fn write_tests(
        &self,
        count: usize,
        seed: u64,
        path: impl AsRef<Path>,
    ) -> Result<Summary, Error> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path).map_err(|e| Error::io(path, e))?);
        let mut shapes = fxhash::FxHashSet::default();

        for case in self.cases::<(String, u64)>(seed).take(count) {
            let (expr, shape) = case.map_err(|e| Error(ErrorRepr::Generate(e)))?;
            writeln!(out, "{}", expr).map_err(|e| Error::io(path, e))?;
            shapes.insert(shape);
        }
        out.flush().map_err(|e| Error::io(path, e))?;

        let summary = Summary {
            cases: count,
            shapes: shapes.len(),
        };
        log::info!(
            "wrote {} test cases ({} shapes, seed {}, max depth {}) to {}",
            summary.cases,
            summary.shapes,
            seed,
            self.max_depth(),
            path.display()
        );
        Ok(summary)
    }
}

/// Writes `count` expressions to `path` with the default [`Generator`] and [`crate::DEFAULT_SEED`].
pub fn generate_tests(count: usize, path: impl AsRef<Path>) -> Result<Summary, Error> {
    Generator::default().write_tests(count, crate::DEFAULT_SEED, path)
}

/// Writes [`crate::DEFAULT_COUNT`] test cases to `test_file`, then their expectations to `expect_file`.
pub fn generate_required_files(
    test_file: impl AsRef<Path>,
    expect_file: impl AsRef<Path>,
) -> Result<Summary, Error> {
    let summary = generate_tests(crate::DEFAULT_COUNT, test_file.as_ref())?;
    crate::generate_expects(test_file, expect_file)?;
    Ok(summary)
}
