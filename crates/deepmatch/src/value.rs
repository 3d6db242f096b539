//! Runtime value types for structural comparison.
//!
//! A [`Value`] is either a primitive (absence, null, boolean, number, string,
//! symbol) or a handle to a shared composite [`Object`]. Two relations are
//! defined on values:
//!
//! - [`strict_eq`]: identity. Primitives compare by value (NaN is never
//!   identical to anything), symbols and composites by reference.
//! - [`same_value_zero`]: identity, except NaN equals NaN. Map keys and set
//!   members use this relation.

use std::fmt;
use std::rc::Rc;

use crate::object::{MapData, Object, ObjectId, ObjectKind, Record, SetData};
use crate::pattern::Pattern;

/// A comparison input.
///
/// Cloning a `Value` is cheap: strings, symbols and composites are
/// reference-counted, so a clone shares the underlying data and keeps the
/// same identity.
///
/// # Example
///
/// ```
/// use deepmatch::{equals, Value};
///
/// let a = Value::record([("name", Value::from("ada")), ("age", Value::from(36))]);
/// let b = Value::record([("name", Value::from("ada")), ("age", Value::from(36))]);
///
/// assert!(equals(&a, &b));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value. Reading a missing key yields this.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(Rc<str>),
    /// Unique token, identical only to its own clones.
    Symbol(Symbol),
    /// Composite value.
    Object(Object),
}

impl Value {
    /// Builds an array value.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Object(Object::new(ObjectKind::Array(items.into_iter().collect())))
    }

    /// Builds a plain record from key/value pairs.
    ///
    /// Later keys overwrite earlier ones, keeping the first position.
    pub fn record<K, I>(fields: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut record = Record::new();
        for (key, value) in fields {
            record.insert(key.as_ref(), value);
        }
        Value::from(record)
    }

    /// Builds a map value from key/value pairs.
    pub fn map<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        Value::Object(Object::new(ObjectKind::Map(entries.into_iter().collect())))
    }

    /// Builds a set value. Duplicate members are dropped.
    pub fn set<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Object(Object::new(ObjectKind::Set(items.into_iter().collect())))
    }

    /// Wraps a pattern in a composite value.
    pub fn pattern(pattern: Pattern) -> Self {
        Value::Object(Object::new(ObjectKind::Pattern(pattern)))
    }

    /// Returns `true` if this is a composite value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` if this is `Undefined`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the composite handle, if present.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Object(_) => "object",
        }
    }

    /// Hashable key agreeing with [`same_value_zero`].
    pub(crate) fn key(&self) -> ValueKey {
        match self {
            Value::Undefined => ValueKey::Undefined,
            Value::Null => ValueKey::Null,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Number(n) => n.key(),
            Value::String(s) => ValueKey::String(s.clone()),
            Value::Symbol(s) => ValueKey::Symbol(s.addr()),
            Value::Object(o) => ValueKey::Object(o.id()),
        }
    }
}

/// Identity comparison.
///
/// - primitives compare by value, with `NaN` never identical and `+0`
///   identical to `-0`
/// - symbols and composites compare by reference
/// - values of different types are never identical
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a.same(*b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Symbol(a), Value::Symbol(b)) => a.ptr_eq(b),
        (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
        _ => false,
    }
}

/// Key equality for maps and sets: [`strict_eq`], except `NaN` equals `NaN`.
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
        _ => strict_eq(a, b),
    }
}

/// Hashable form of a value under [`same_value_zero`].
///
/// Two values produce equal keys exactly when they are same-value-zero
/// equal, so a key can index map entries and set members directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Undefined,
    Null,
    Bool(bool),
    Integer(i128),
    Float(u64),
    NaN,
    String(Rc<str>),
    Symbol(usize),
    Object(ObjectId),
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Identity between different representations is exact: `I64(1)` is
/// identical to `U64(1)` and `F64(1.0)`, but not to `F64(1.5)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

/// 2^63, the first float above the `i64` range.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// 2^64, the first float above the `u64` range.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

impl Number {
    /// Returns `true` if this is a floating point NaN.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Numeric identity, handling mixed representations.
    pub fn same(self, other: Number) -> bool {
        match (self, other) {
            (Number::F64(a), Number::F64(b)) => a == b,
            _ => matches!(
                (self.integer(), other.integer()),
                (Some(a), Some(b)) if a == b
            ),
        }
    }

    /// The exact integer value, if there is one in the `i64` or `u64` range.
    ///
    /// Floats only qualify when they have no fractional part and lie inside
    /// one of the two ranges, so no conversion saturates.
    fn integer(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(i128::from(n)),
            Number::U64(n) => Some(i128::from(n)),
            Number::F64(f) if f.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&f) => {
                Some(i128::from(f as i64))
            }
            Number::F64(f) if f.fract() == 0.0 && (0.0..TWO_POW_64).contains(&f) => {
                Some(i128::from(f as u64))
            }
            Number::F64(_) => None,
        }
    }

    fn key(self) -> ValueKey {
        match self {
            Number::F64(f) if f.is_nan() => ValueKey::NaN,
            _ => match self.integer() {
                Some(n) => ValueKey::Integer(n),
                None => ValueKey::Float(self.float_bits()),
            },
        }
    }

    fn float_bits(self) -> u64 {
        match self {
            Number::F64(f) => f.to_bits(),
            Number::I64(n) => (n as f64).to_bits(),
            Number::U64(n) => (n as f64).to_bits(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

// Conversions from primitive types
impl From<i8> for Number {
    fn from(n: i8) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i16> for Number {
    fn from(n: i16) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u8> for Number {
    fn from(n: u8) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u16> for Number {
    fn from(n: u16) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<f32> for Number {
    fn from(n: f32) -> Self {
        Number::F64(n as f64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<isize> for Number {
    fn from(n: isize) -> Self {
        Number::I64(n as i64)
    }
}

/// Unique token compared by identity.
///
/// Every call to [`Symbol::new`] creates a distinct symbol; clones share the
/// identity of the original.
///
/// ```
/// use deepmatch::{equals, Symbol, Value};
///
/// let shared = Symbol::new("shared");
/// assert!(equals(&Value::from(shared.clone()), &Value::from(shared)));
/// assert!(!equals(&Value::from(Symbol::new("x")), &Value::from(Symbol::new("x"))));
/// ```
#[derive(Clone)]
pub struct Symbol(Rc<str>);

impl Symbol {
    /// Creates a new unique symbol with a description.
    pub fn new(description: &str) -> Self {
        Symbol(Rc::from(description))
    }

    /// Returns the symbol's description.
    pub fn description(&self) -> &str {
        &self.0
    }

    /// Returns `true` if both handles refer to the same symbol.
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const u8 as usize
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, usize, isize);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(Object::new(ObjectKind::Record(record)))
    }
}

impl From<MapData> for Value {
    fn from(map: MapData) -> Self {
        Value::Object(Object::new(ObjectKind::Map(map)))
    }
}

impl From<SetData> for Value {
    fn from(set: SetData) -> Self {
        Value::Object(Object::new(ObjectKind::Set(set)))
    }
}

impl From<Pattern> for Value {
    fn from(pattern: Pattern) -> Self {
        Value::pattern(pattern)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
