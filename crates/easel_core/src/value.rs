//! Loosely-typed values
//!
//! Native toolkits hand over event data in whatever shape they have. [`Value`]
//! is the dynamic representation used at that boundary; payload constructors
//! coerce it into the strict field types, and anything they do not recognise
//! is kept as an extra attribute.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::errors::{EaselError, Result};
use crate::event::NativeEvent;

/// A dynamically typed field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent / unspecified.
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
}

/// Extra named attributes attached to a payload at construction time.
pub type Extras = FxHashMap<String, Value>;

impl Value {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
        }
    }

    pub(crate) fn coercion_error(&self, field: &'static str, expected: &'static str) -> EaselError {
        EaselError::Coercion {
            field,
            expected,
            found: format!("{} {self}", self.kind_name()),
        }
    }

    // ========================================================================
    // Coercion
    // ========================================================================

    /// Coerces to an integer. Floats are truncated toward zero, booleans map
    /// to 0/1 and numeric strings are parsed.
    pub fn to_int(&self, field: &'static str) -> Result<i64> {
        match self {
            Value::Int(v) => Ok(*v),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| self.coercion_error(field, "an integer")),
            _ => Err(self.coercion_error(field, "an integer")),
        }
    }

    /// Coerces to an `i32`, rejecting out-of-range values.
    pub fn to_i32(&self, field: &'static str) -> Result<i32> {
        let v = self.to_int(field)?;
        i32::try_from(v).map_err(|_| self.coercion_error(field, "a 32-bit integer"))
    }

    /// Coerces to a non-negative `u32`.
    pub fn to_u32(&self, field: &'static str) -> Result<u32> {
        let v = self.to_int(field)?;
        u32::try_from(v).map_err(|_| self.coercion_error(field, "a non-negative integer"))
    }

    pub fn to_bool(&self, field: &'static str) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Int(v) => Ok(*v != 0),
            _ => Err(self.coercion_error(field, "a boolean")),
        }
    }

    /// Coerces scalars to their textual form. `None` becomes the empty string.
    pub fn to_text(&self, field: &'static str) -> Result<String> {
        match self {
            Value::None => Ok(String::new()),
            Value::Str(s) => Ok(s.clone()),
            Value::Int(_) | Value::Float(_) | Value::Bool(_) => Ok(self.to_string()),
            Value::Tuple(_) => Err(self.coercion_error(field, "a string")),
        }
    }

    /// Returns the elements of a tuple value, checking its arity.
    pub fn to_tuple(&self, field: &'static str, arity: usize) -> Result<&[Value]> {
        match self {
            Value::Tuple(items) if items.len() == arity => Ok(items),
            Value::Tuple(items) => Err(EaselError::Arity {
                field,
                expected: arity,
                found: items.len(),
            }),
            _ => Err(self.coercion_error(field, "a tuple")),
        }
    }

    /// Returns the elements of any sequence value; `None` is the empty sequence.
    pub fn to_sequence(&self, field: &'static str) -> Result<&[Value]> {
        match self {
            Value::None => Ok(&[]),
            Value::Tuple(items) => Ok(items),
            _ => Err(self.coercion_error(field, "a sequence")),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Tuple(v.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>, D: Into<Value>> From<(A, B, C, D)> for Value {
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        Value::Tuple(vec![a.into(), b.into(), c.into(), d.into()])
    }
}

// ============================================================================
// EventArgs
// ============================================================================

/// Named, loosely-typed constructor arguments for an event payload.
///
/// This is what a backend fills in from a native event before handing it to
/// `from_args` on one of the payload types (or to `CanvasEvents::emit_args`).
#[derive(Debug, Clone, Default)]
pub struct EventArgs {
    values: FxHashMap<String, Value>,
    native: Option<NativeEvent>,
}

impl EventArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named argument (builder style).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Attaches the originating native event.
    #[must_use]
    pub fn with_native(mut self, native: NativeEvent) -> Self {
        self.native = Some(native);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Removes and returns an argument; missing arguments read as `Value::None`.
    pub fn take(&mut self, name: &str) -> Value {
        self.values.remove(name).unwrap_or_default()
    }

    pub fn take_native(&mut self) -> Option<NativeEvent> {
        self.native.take()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whatever has not been taken becomes the payload's extras.
    #[must_use]
    pub fn into_extras(self) -> Extras {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_coercion_accepts_numeric_forms() {
        assert_eq!(Value::Int(3).to_int("f").unwrap(), 3);
        assert_eq!(Value::Float(2.9).to_int("f").unwrap(), 2);
        assert_eq!(Value::Bool(true).to_int("f").unwrap(), 1);
        assert_eq!(Value::from(" 42 ").to_int("f").unwrap(), 42);
    }

    #[test]
    fn int_coercion_rejects_garbage() {
        let err = Value::from("left").to_int("button").unwrap_err();
        assert!(matches!(err, EaselError::Coercion { field: "button", .. }));
        assert!(Value::None.to_int("button").is_err());
        assert!(Value::Float(f64::NAN).to_int("button").is_err());
    }

    #[test]
    fn unsigned_coercion_rejects_negative() {
        assert!(Value::Int(-1).to_u32("size").is_err());
        assert_eq!(Value::Int(7).to_u32("size").unwrap(), 7);
    }

    #[test]
    fn tuple_arity_is_checked() {
        let v = Value::from((1, 2));
        assert_eq!(v.to_tuple("pos", 2).unwrap().len(), 2);
        let err = v.to_tuple("region", 4).unwrap_err();
        assert!(matches!(
            err,
            EaselError::Arity { field: "region", expected: 4, found: 2 }
        ));
    }

    #[test]
    fn take_missing_reads_as_none() {
        let mut args = EventArgs::new().with("a", 1);
        assert_eq!(args.take("a"), Value::Int(1));
        assert_eq!(args.take("a"), Value::None);
        assert!(args.is_empty());
    }
}
