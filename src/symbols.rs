use std::fmt;
use std::sync::LazyLock;

/// Every sign a literal may carry, in declaration order.
/// `Unsigned` is first so that an exhausted byte source picks it.
pub(crate) static SIGNS: LazyLock<Vec<Sign>> = LazyLock::new(|| Sign::all().collect());

/// Every exponent marker a literal may carry.
pub(crate) static EXPONENT_MARKERS: LazyLock<Vec<ExponentMarker>> =
    LazyLock::new(|| ExponentMarker::all().collect());

/// Operators joining terms into an expression.
pub(crate) const ADDITIVE: [Operator; 2] = [Operator::Add, Operator::Sub];

/// Operators joining primaries into a term.
pub(crate) const MULTIPLICATIVE: [Operator; 2] = [Operator::Mul, Operator::Div];

/// Optional sign in front of a decimal literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_iterator::Sequence)]
pub enum Sign {
    /// No sign character at all.
    Unsigned,
    Plus,
    Minus,
}

impl Sign {
    pub(crate) fn all() -> impl Iterator<Item = Self> {
        enum_iterator::all::<Self>()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unsigned => "",
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// The letter (and optional sign) that introduces an exponent, e.g. the `e-` in `1.5e-3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_iterator::Sequence)]
pub enum ExponentMarker {
    Lower,
    Upper,
    LowerPlus,
    LowerMinus,
    UpperPlus,
    UpperMinus,
}

impl ExponentMarker {
    pub(crate) fn all() -> impl Iterator<Item = Self> {
        enum_iterator::all::<Self>()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lower => "e",
            Self::Upper => "E",
            Self::LowerPlus => "e+",
            Self::LowerMinus => "e-",
            Self::UpperPlus => "E+",
            Self::UpperMinus => "E-",
        }
    }
}

/// Binary operator between two operands of an expression or a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_iterator::Sequence)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const fn as_char(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// `true` for `+` and `-`, which bind looser than `*` and `/`.
    pub const fn is_additive(&self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
