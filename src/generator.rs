use crate::symbols::{ADDITIVE, EXPONENT_MARKERS, MULTIPLICATIVE, SIGNS};
use crate::Visitor;

use arbitrary::Unstructured;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::marker::PhantomData;

/// Default nesting limit of parenthesized sub-expressions.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Number of random bytes backing one generated expression.
pub const BYTES_PER_CASE: usize = 4096;

const MAX_INT_PART: u8 = 10;
const MAX_FRAC_PART: u16 = 999;
const MAX_EXPONENT: u8 = 10;

/// A chain of operands keeps growing until this value is drawn from `0..=2`.
const CHAIN_STOP: u8 = 0;

/// Produces random arithmetic expressions from [`Unstructured`](https://docs.rs/arbitrary/latest/arbitrary/struct.Unstructured.html).
///
/// # Grammar
/// ```text
/// expression : term (("+" | "-") term)* ;
/// term       : primary (("*" | "/") primary)* ;
/// primary    : sign? int "." frac exponent? | "(" expression ")" ;
/// sign       : "+" | "-" ;
/// int        : 0..=10 ;
/// frac       : 0..=999 ;
/// exponent   : ("e" | "E" | "e+" | "e-" | "E+" | "E-") 0..=10 ;
/// ```
///
/// # Implementation
/// Every random decision is drawn from the `Unstructured` passed in, so the same bytes always
/// produce the same expression. Choices are laid out so that an exhausted byte source
/// picks the shortest continuation: a literal instead of a group, no exponent, end of chain.
/// Generation therefore never fails for lack of data.
///
/// A chain of terms (or primaries) grows while a uniform draw from three values is not the
/// stop value, so chain lengths are geometric with mean 3. Nesting is capped by `max_depth`:
/// a primary at that depth is always a literal.
#[derive(Debug, Clone)]
pub struct Generator {
    max_depth: usize,
    paren_odds: u16,
    exponent_odds: u16,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            paren_odds: 10,
            exponent_odds: 2,
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how deeply parenthesized groups nest. A `max_depth` of 0 never produces parentheses.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// A primary is a parenthesized group with probability `1 / odds` (while below `max_depth`).
    /// `odds` of 0 is treated as 1.
    pub fn with_paren_odds(mut self, odds: u16) -> Self {
        self.paren_odds = odds.max(1);
        self
    }

    /// A literal carries an exponent with probability `1 / odds`. `odds` of 0 is treated as 1.
    pub fn with_exponent_odds(mut self, odds: u16) -> Self {
        self.exponent_odds = odds.max(1);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns a resulting `Visitor` after generating one arbitrary expression.
    pub fn expression<V: Visitor>(&self, u: &mut Unstructured<'_>) -> arbitrary::Result<V> {
        let mut visitor = V::new();
        self.visit_expression(&mut visitor, u, 0)?;
        Ok(visitor)
    }

    /// Returns a resulting `Visitor` after generating one arbitrary term.
    pub fn term<V: Visitor>(&self, u: &mut Unstructured<'_>) -> arbitrary::Result<V> {
        let mut visitor = V::new();
        self.visit_term(&mut visitor, u, 0)?;
        Ok(visitor)
    }

    /// Returns a resulting `Visitor` after generating one arbitrary primary.
    pub fn primary<V: Visitor>(&self, u: &mut Unstructured<'_>) -> arbitrary::Result<V> {
        let mut visitor = V::new();
        self.visit_primary(&mut visitor, u, 0)?;
        Ok(visitor)
    }

    /// Returns an endless, reproducible stream of expressions.
    ///
    /// Each item is generated from its own [`BYTES_PER_CASE`] bytes drawn from a `StdRng`
    /// seeded with `seed`.
    pub fn cases<V: Visitor>(&self, seed: u64) -> Cases<'_, V> {
        Cases {
            generator: self,
            rng: StdRng::seed_from_u64(seed),
            buf: vec![0; BYTES_PER_CASE],
            _visitor: PhantomData,
        }
    }

    fn visit_expression<V: Visitor>(
        &self,
        v: &mut V,
        u: &mut Unstructured<'_>,
        depth: usize,
    ) -> arbitrary::Result<()> {
        self.visit_term(v, u, depth)?;
        while extend_chain(u)? {
            v.visit_operator(*u.choose(&ADDITIVE)?);
            self.visit_term(v, u, depth)?;
        }
        Ok(())
    }

    fn visit_term<V: Visitor>(
        &self,
        v: &mut V,
        u: &mut Unstructured<'_>,
        depth: usize,
    ) -> arbitrary::Result<()> {
        self.visit_primary(v, u, depth)?;
        while extend_chain(u)? {
            v.visit_operator(*u.choose(&MULTIPLICATIVE)?);
            self.visit_primary(v, u, depth)?;
        }
        Ok(())
    }

    fn visit_primary<V: Visitor>(
        &self,
        v: &mut V,
        u: &mut Unstructured<'_>,
        depth: usize,
    ) -> arbitrary::Result<()> {
        if depth < self.max_depth && one_in(u, self.paren_odds)? {
            v.visit_group();
            self.visit_expression(v, u, depth + 1)?;
            v.visit_group_end();
            return Ok(());
        }

        v.visit_sign(*u.choose(SIGNS.as_slice())?);
        let int_part = u.int_in_range(0..=MAX_INT_PART)?;
        let frac_part = u.int_in_range(0..=MAX_FRAC_PART)?;
        v.visit_digits(int_part, frac_part);

        if one_in(u, self.exponent_odds)? {
            let marker = *u.choose(EXPONENT_MARKERS.as_slice())?;
            let magnitude = u.int_in_range(0..=MAX_EXPONENT)?;
            v.visit_exponent(marker, magnitude);
        }
        Ok(())
    }
}

fn extend_chain(u: &mut Unstructured<'_>) -> arbitrary::Result<bool> {
    Ok(u.int_in_range(0..=2u8)? != CHAIN_STOP)
}

/// `true` with probability `1 / odds`. Empty data draws the lower bound, i.e. `false` unless `odds == 1`.
fn one_in(u: &mut Unstructured<'_>, odds: u16) -> arbitrary::Result<bool> {
    Ok(u.int_in_range(1..=odds)? == odds)
}

/// Iterator returned by [`Generator::cases`].
pub struct Cases<'g, V> {
    generator: &'g Generator,
    rng: StdRng,
    buf: Vec<u8>,
    _visitor: PhantomData<fn() -> V>,
}

impl<V: Visitor> Iterator for Cases<'_, V> {
    type Item = arbitrary::Result<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rng.fill_bytes(&mut self.buf);
        let mut u = Unstructured::new(&self.buf);
        Some(self.generator.expression(&mut u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_nesting(s: &str) -> usize {
        let mut depth = 0usize;
        let mut max = 0;
        for c in s.chars() {
            match c {
                '(' => {
                    depth += 1;
                    max = max.max(depth);
                }
                ')' => depth -= 1,
                _ => (),
            }
        }
        assert_eq!(depth, 0, "unbalanced: {}", s);
        max
    }

    #[test]
    fn empty_data_gives_shortest_expression() {
        let mut u = Unstructured::new(&[]);
        let expr: String = Generator::new().expression(&mut u).unwrap();
        assert_eq!(expr, "0.0");
    }

    #[test]
    fn exhaustion_midway_still_terminates() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 0..64 {
            let mut buf = vec![0u8; len];
            rng.fill_bytes(&mut buf);
            let mut u = Unstructured::new(&buf);
            let expr: String = Generator::new().expression(&mut u).unwrap();
            assert!(!expr.is_empty());
            max_nesting(&expr);
        }
    }

    #[test]
    fn primary_only_literal_at_zero_depth() {
        let gen = Generator::new().with_max_depth(0).with_paren_odds(1);
        let mut rng = StdRng::seed_from_u64(42);
        let mut buf = [0u8; 64];
        for _ in 0..200 {
            rng.fill_bytes(&mut buf);
            let mut u = Unstructured::new(&buf);
            let p: String = gen.primary(&mut u).unwrap();
            assert!(!p.contains('('), "{}", p);
            assert!(p.contains('.'), "{}", p);
        }
    }

    #[test]
    fn respects_max_depth() {
        // every primary wants to be a group; only the depth limit stops it
        for max_depth in 0..5 {
            let gen = Generator::new()
                .with_max_depth(max_depth)
                .with_paren_odds(1);
            for expr in gen.cases::<String>(42).take(50) {
                let expr = expr.unwrap();
                assert_eq!(max_nesting(&expr), max_depth, "{}", expr);
            }
        }
    }

    #[test]
    fn term_has_no_additive_operator_outside_groups() {
        let gen = Generator::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut buf = [0u8; 1024];
        for _ in 0..200 {
            rng.fill_bytes(&mut buf);
            let mut u = Unstructured::new(&buf);
            let term: String = gen.term(&mut u).unwrap();
            let mut depth = 0;
            let mut prev = '*';
            for c in term.chars() {
                match c {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    // a sign directly after an operator (or at the start) belongs to a literal
                    '+' | '-' if depth == 0 && !"*/eE".contains(prev) => {
                        panic!("additive operator in term {}", term)
                    }
                    _ => (),
                }
                prev = c;
            }
        }
    }

    #[test]
    fn cases_are_reproducible() {
        let gen = Generator::new();
        let a: Vec<String> = gen.cases(9).take(20).map(Result::unwrap).collect();
        let b: Vec<String> = gen.cases(9).take(20).map(Result::unwrap).collect();
        let c: Vec<String> = gen.cases(10).take(20).map(Result::unwrap).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn chain_lengths_vary() {
        let gen = Generator::new().with_max_depth(0);
        let mut lengths = fxhash::FxHashSet::default();
        for expr in gen.cases::<String>(42).take(500) {
            let expr = expr.unwrap();
            // count binary operators: a sign never follows a digit
            let ops = expr
                .as_bytes()
                .windows(2)
                .filter(|w| w[0].is_ascii_digit() && b"+-*/".contains(&w[1]))
                .count();
            lengths.insert(ops);
        }
        assert!(lengths.contains(&0));
        assert!(lengths.len() > 4);
    }

    #[test]
    fn parens_and_exponents_show_up() {
        let gen = Generator::new();
        let exprs: Vec<String> = gen.cases(42).take(300).map(Result::unwrap).collect();
        assert!(exprs.iter().any(|e| e.contains('(')));
        assert!(exprs.iter().any(|e| e.contains(['e', 'E'])));
        assert!(exprs.iter().any(|e| !e.contains(['e', 'E', '('])));
    }
}
