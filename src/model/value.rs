//! Cell values produced by column accessors.
//!
//! The engine never looks inside a row. Everything it knows about a row
//! comes through a [`CellValue`] returned by an accessor.

use std::cmp::Ordering;
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A single value read out of a row by a column accessor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Free text.
    Text(String),
    /// Any numeric value. Integers are carried as `f64`.
    Number(f64),
    /// Boolean flag.
    Bool(bool),
    /// Missing or undefined value.
    #[default]
    Null,
}

impl CellValue {
    /// True for [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// String form used by the filter stage.
    ///
    /// `Null` becomes the empty string. Integral numbers print without a
    /// fractional part (`3`, not `3.0`).
    pub fn to_search_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Null => String::new(),
        }
    }

    /// Ordering of two values for the sort stage.
    ///
    /// `Null` sorts after every defined value; the caller applies the sort
    /// direction to defined comparisons only.
    pub fn compare(&self, other: &CellValue) -> NullableOrdering {
        match (self.is_null(), other.is_null()) {
            (true, true) => NullableOrdering::BothNull,
            (true, false) => NullableOrdering::LeftNull,
            (false, true) => NullableOrdering::RightNull,
            (false, false) => NullableOrdering::Defined(compare_defined(self, other)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_search_text())
    }
}

/// Result of comparing two possibly-null cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullableOrdering {
    /// Both values are defined.
    Defined(Ordering),
    /// Left side is null, right side is defined.
    LeftNull,
    /// Right side is null, left side is defined.
    RightNull,
    /// Both values are null.
    BothNull,
}

impl NullableOrdering {
    /// Resolve to an [`Ordering`], reversing only the defined comparison.
    ///
    /// Null placement does not depend on `reverse`, so toggling direction
    /// never moves null rows.
    pub fn resolve(self, reverse: bool) -> Ordering {
        match self {
            NullableOrdering::Defined(ord) if reverse => ord.reverse(),
            NullableOrdering::Defined(ord) => ord,
            NullableOrdering::LeftNull => Ordering::Greater,
            NullableOrdering::RightNull => Ordering::Less,
            NullableOrdering::BothNull => Ordering::Equal,
        }
    }
}

/// Rank of a defined value's type. Values of different types never compare
/// by content: numbers sort before booleans, booleans before text.
fn type_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Number(_) => 0,
        CellValue::Bool(_) => 1,
        CellValue::Text(_) => 2,
        CellValue::Null => 3,
    }
}

fn compare_defined(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => locale_cmp(x, y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn without_accents(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c))
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    without_accents(s).flat_map(char::to_lowercase)
}

/// Locale-aware string ordering.
///
/// Letters are compared first with case and accents ignored, so
/// `"Ángel" < "Beto"` and `"Muñoz" < "Murillo"`. Ties are broken by case
/// with lower case first (`"ana" < "Ana"`), then by code point, which puts
/// the unaccented form first (`"emile" < "émile"`) and keeps the order total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    folded(a)
        .cmp(folded(b))
        .then_with(|| without_accents(b).cmp(without_accents(a)))
        .then_with(|| a.cmp(b))
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

macro_rules! impl_from_numeric {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellValue {
                fn from(value: $ty) -> Self {
                    CellValue::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_numeric!(i32, i64, u32, u64, usize, f32);

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}
