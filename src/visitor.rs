use crate::symbols::{ExponentMarker, Operator, Sign};
use itoa::Buffer as itoaBuffer;

/// Defines state that is built during [`crate::Generator::expression`].
///
/// Events arrive in the order the characters of the expression are written.
///
/// This is implemented for
/// - `String` to produce the expression text
/// - `u64` to produce a class ID of the expression's shape: the path taken through
///   the grammar, ignoring the digits of literals. Two expressions with the same ID
///   differ only in their numbers.
/// - tuples of visitors, each member seeing every event.
pub trait Visitor {
    fn new() -> Self;
    fn visit_group(&mut self) {}
    fn visit_group_end(&mut self) {}
    fn visit_operator(&mut self, _op: Operator) {}
    fn visit_sign(&mut self, _sign: Sign) {}
    fn visit_digits(&mut self, _int_part: u8, _frac_part: u16) {}
    fn visit_exponent(&mut self, _marker: ExponentMarker, _magnitude: u8) {}
}

/// Returns the expression text, e.g. `-3.14*(2.0e-3+7.5)`.
impl Visitor for String {
    fn new() -> Self {
        Default::default()
    }
    fn visit_group(&mut self) {
        self.push('(');
    }
    fn visit_group_end(&mut self) {
        self.push(')');
    }
    fn visit_operator(&mut self, op: Operator) {
        self.push(op.as_char());
    }
    fn visit_sign(&mut self, sign: Sign) {
        self.push_str(sign.as_str());
    }
    fn visit_digits(&mut self, int_part: u8, frac_part: u16) {
        let mut buf = itoaBuffer::new();
        self.push_str(buf.format(int_part));
        self.push('.');
        self.push_str(buf.format(frac_part));
    }
    fn visit_exponent(&mut self, marker: ExponentMarker, magnitude: u8) {
        self.push_str(marker.as_str());
        self.push_str(itoaBuffer::new().format(magnitude));
    }
}

fn id_hash(val: &mut u64, event_id: u64) {
    *val = fxhash::hash64(&(event_id, *val));
}

/// Returns an identifier of the shape of the expression.
impl Visitor for u64 {
    fn new() -> Self {
        u64::MAX
    }
    fn visit_group(&mut self) {
        id_hash(self, 0)
    }
    fn visit_group_end(&mut self) {
        id_hash(self, 1)
    }
    fn visit_operator(&mut self, op: Operator) {
        id_hash(self, fxhash::hash64(&(2, op as u64)))
    }
    fn visit_sign(&mut self, sign: Sign) {
        id_hash(self, fxhash::hash64(&(3, sign as u64)))
    }
    fn visit_digits(&mut self, _: u8, _: u16) {
        id_hash(self, 4)
    }
    fn visit_exponent(&mut self, marker: ExponentMarker, _: u8) {
        id_hash(self, fxhash::hash64(&(5, marker as u64)))
    }
}

macro_rules! impl_visitor_tuple {
    ( $($name:ident)+) => (
        #[allow(non_snake_case)]
        impl<$($name: Visitor),+> Visitor for ($($name,)+) {
            fn new() -> ($($name,)+) {
                ($({ let x: $name = Visitor::new(); x},)+)
            }

            fn visit_group(&mut self) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_group();)+
            }
            fn visit_group_end(&mut self) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_group_end();)+
            }
            fn visit_operator(&mut self, op: Operator) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_operator(op);)+
            }
            fn visit_sign(&mut self, sign: Sign) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_sign(sign);)+
            }
            fn visit_digits(&mut self, int_part: u8, frac_part: u16) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_digits(int_part, frac_part);)+
            }
            fn visit_exponent(&mut self, marker: ExponentMarker, magnitude: u8) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_exponent(marker, magnitude);)+
            }
        }
    );
}

impl_visitor_tuple! { T }
impl_visitor_tuple! { T B }
impl_visitor_tuple! { T B C }
