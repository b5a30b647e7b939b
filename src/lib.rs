#![allow(rustdoc::bare_urls)]
#![doc = include_str!("../README.md")]

mod check;
mod corpus;
mod error;
mod eval;
mod generator;
mod oracle;
mod symbols;
mod transcript;
mod visitor;

pub use check::{check, Checker, Diagnostic, Report, Side, TOLERANCE};
pub use corpus::{generate_required_files, generate_tests, Summary};
pub use error::Error;
pub use eval::{evaluate, format_value, Outcome};
pub use generator::{Cases, Generator, BYTES_PER_CASE, DEFAULT_MAX_DEPTH};
pub use oracle::{expectations, generate_expects};
pub use symbols::{ExponentMarker, Operator, Sign};
pub use transcript::{
    BANNER, DIVISION_BY_ZERO, FAREWELL, FRAMING_LINES, PROMPT, RESULT_PREFIX, VALUE_OFFSET,
};
pub use visitor::Visitor;

/// Default test-case file.
pub const DEFAULT_TEST_FILE: &str = "autogentest.tc";

/// Default expectation transcript written by the oracle.
pub const DEFAULT_EXPECT_FILE: &str = "pcalc.expect";

/// Default transcript captured from the calculator.
pub const DEFAULT_RESULTS_FILE: &str = "pcalc.out";

/// Default number of test cases.
pub const DEFAULT_COUNT: usize = 10_000;

/// Seed used when none is given to the library entry points.
pub const DEFAULT_SEED: u64 = 0x7063_616c_63;
