//! Fixed framing of a Power Calculator session transcript.
//!
//! ```text
//! Welcome to Power Calculator!
//! > = 11
//! > ! Division by 0.
//! >
//! Bye!
//! ```

/// First line of every transcript.
pub const BANNER: &str = "Welcome to Power Calculator!";

/// The prompt left on screen when input runs out.
pub const PROMPT: &str = ">";

/// Last line of every transcript.
pub const FAREWELL: &str = "Bye!";

/// Result line for an input that divides by zero.
pub const DIVISION_BY_ZERO: &str = "> ! Division by 0.";

/// Prefix of a result line carrying a value.
pub const RESULT_PREFIX: &str = "> = ";

/// Characters before the numeric part of a result line (`"> ="`). The remainder may carry spaces.
pub const VALUE_OFFSET: usize = 3;

/// Lines a transcript has in addition to one line per test case.
pub const FRAMING_LINES: usize = 3;

/// Returns the text after [`VALUE_OFFSET`], or `None` if the line is shorter.
pub(crate) fn value_text(line: &str) -> Option<&str> {
    line.get(VALUE_OFFSET..).map(str::trim)
}
