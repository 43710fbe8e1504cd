//! Runtime "expected" values handed to the context resolver
//!
//! The resolver compares these against literal arguments found in source
//! text, so only primitive shapes that can appear as Rust literals are
//! modelled.

use std::fmt;

/// A single comparable primitive value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Absent value (`None`)
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    Char(char),
    Str(String),
}

impl Scalar {
    /// Whether this is the zero/default value of its type
    ///
    /// Default values are not discriminative: a caller may or may not have
    /// written them explicitly, so the disambiguator skips them.
    pub fn is_default(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Bool(b) => !b,
            Scalar::Int(i) => *i == 0,
            Scalar::Float(f) => *f == 0.0,
            Scalar::Char(c) => *c == '\0',
            Scalar::Str(s) => s.is_empty(),
        }
    }

    /// Short name of the scalar kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Char(_) => "char",
            Scalar::Str(_) => "str",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "None"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x:?}"),
            Scalar::Char(c) => write!(f, "{c:?}"),
            Scalar::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// The expected argument(s) of a validation call
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// Single expected value, e.g. `be(42)`
    Scalar(Scalar),
    /// Ordered expected values, e.g. `be_between(10, 20)`
    Sequence(Vec<Scalar>),
}

impl Expected {
    /// Expected value for checks without an argument, e.g. `be_true()`
    pub fn none() -> Self {
        Expected::Sequence(Vec::new())
    }

    pub fn scalar(value: impl ToScalar) -> Self {
        Expected::Scalar(value.to_scalar())
    }

    pub fn sequence<T: ToScalar>(values: impl IntoIterator<Item = T>) -> Self {
        Expected::Sequence(values.into_iter().map(|v| v.to_scalar()).collect())
    }
}

impl From<Scalar> for Expected {
    fn from(value: Scalar) -> Self {
        Expected::Scalar(value)
    }
}

impl From<Vec<Scalar>> for Expected {
    fn from(values: Vec<Scalar>) -> Self {
        Expected::Sequence(values)
    }
}

/// Conversion of a runtime value into a [`Scalar`]
///
/// Values with no literal form map to [`Scalar::Null`]; the resolver never
/// compares such an element against source literals.
pub trait ToScalar {
    fn to_scalar(&self) -> Scalar;
}

macro_rules! int_to_scalar {
    ($($t:ty),*) => {
        $(
            impl ToScalar for $t {
                fn to_scalar(&self) -> Scalar {
                    Scalar::Int(*self as i128)
                }
            }
        )*
    };
}

int_to_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl ToScalar for u128 {
    fn to_scalar(&self) -> Scalar {
        match i128::try_from(*self) {
            Ok(v) => Scalar::Int(v),
            Err(_) => Scalar::Null,
        }
    }
}

impl ToScalar for f32 {
    fn to_scalar(&self) -> Scalar {
        Scalar::Float(f64::from(*self))
    }
}

impl ToScalar for f64 {
    fn to_scalar(&self) -> Scalar {
        Scalar::Float(*self)
    }
}

impl ToScalar for bool {
    fn to_scalar(&self) -> Scalar {
        Scalar::Bool(*self)
    }
}

impl ToScalar for char {
    fn to_scalar(&self) -> Scalar {
        Scalar::Char(*self)
    }
}

impl ToScalar for str {
    fn to_scalar(&self) -> Scalar {
        Scalar::Str(self.to_string())
    }
}

impl ToScalar for String {
    fn to_scalar(&self) -> Scalar {
        Scalar::Str(self.clone())
    }
}

impl ToScalar for Scalar {
    fn to_scalar(&self) -> Scalar {
        self.clone()
    }
}

impl<T: ToScalar> ToScalar for Option<T> {
    fn to_scalar(&self) -> Scalar {
        match self {
            Some(v) => v.to_scalar(),
            None => Scalar::Null,
        }
    }
}

impl<T: ToScalar + ?Sized> ToScalar for &T {
    fn to_scalar(&self) -> Scalar {
        (**self).to_scalar()
    }
}
