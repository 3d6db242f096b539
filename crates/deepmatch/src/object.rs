//! Composite values.
//!
//! An [`Object`] is a shared, reference-counted handle to one of the
//! composite kinds in [`ObjectKind`]. Handles compare by identity, and
//! because the contents sit behind a `RefCell` a composite can be made to
//! reference itself, directly or through other composites:
//!
//! ```
//! use deepmatch::{equals, Value};
//!
//! let node = Value::record([("name", Value::from("loop"))]);
//! let handle = node.as_object().unwrap();
//! handle.set_field("next", node.clone());
//!
//! assert!(equals(&node, &node.clone()));
//! ```

use std::cell::{BorrowError, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};

use crate::pattern::Pattern;
use crate::value::{Value, ValueKey};

/// Class name given to records built without an explicit one.
pub const DEFAULT_CLASS: &str = "Object";

/// Text of a record that has no rendering of its own.
pub const DEFAULT_TEXT: &str = "[object Object]";

/// Identity of a composite value, valid while the composite is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

/// Runtime type of a composite.
///
/// Records carry their class name, so two records of different classes are
/// different runtime types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Ordered sequence.
    Array,
    /// Key-ordered map.
    Map,
    /// Unique-element set.
    Set,
    /// Pattern object.
    Pattern,
    /// Keyed record of the named class.
    Record(Rc<str>),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Array => write!(f, "Array"),
            Kind::Map => write!(f, "Map"),
            Kind::Set => write!(f, "Set"),
            Kind::Pattern => write!(f, "Pattern"),
            Kind::Record(class) => write!(f, "{class}"),
        }
    }
}

/// Contents of a composite value.
#[derive(Debug)]
pub enum ObjectKind {
    Array(Vec<Value>),
    Map(MapData),
    Set(SetData),
    Pattern(Pattern),
    Record(Record),
}

impl ObjectKind {
    /// Returns the runtime type of these contents.
    pub fn kind(&self) -> Kind {
        match self {
            ObjectKind::Array(_) => Kind::Array,
            ObjectKind::Map(_) => Kind::Map,
            ObjectKind::Set(_) => Kind::Set,
            ObjectKind::Pattern(_) => Kind::Pattern,
            ObjectKind::Record(record) => Kind::Record(record.class.clone()),
        }
    }
}

/// Shared handle to a composite value.
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectKind>>);

impl Object {
    /// Allocates a new composite.
    pub fn new(kind: ObjectKind) -> Self {
        Object(Rc::new(RefCell::new(kind)))
    }

    /// Returns the identity of this composite.
    pub fn id(&self) -> ObjectId {
        ObjectId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    /// Returns `true` if both handles refer to the same composite.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the runtime type of this composite.
    pub fn kind(&self) -> Kind {
        self.0.borrow().kind()
    }

    /// Returns `true` if both composites share a runtime type.
    ///
    /// Contents that cannot be borrowed count as a different type.
    pub fn same_kind(&self, other: &Object) -> bool {
        match (self.0.try_borrow(), other.0.try_borrow()) {
            (Ok(a), Ok(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }

    /// Borrows the contents.
    ///
    /// # Panics
    ///
    /// Panics if the contents are currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, ObjectKind> {
        self.0.borrow()
    }

    /// Borrows the contents, failing if they are mutably borrowed.
    pub fn try_borrow(&self) -> Result<Ref<'_, ObjectKind>, BorrowError> {
        self.0.try_borrow()
    }

    /// Sets a field on a record, returning `false` if this is not a record.
    pub fn set_field(&self, key: &str, value: Value) -> bool {
        match &mut *self.0.borrow_mut() {
            ObjectKind::Record(record) => {
                record.insert(key, value);
                true
            }
            _ => false,
        }
    }

    /// Appends to an array, returning `false` if this is not an array.
    pub fn push(&self, value: Value) -> bool {
        match &mut *self.0.borrow_mut() {
            ObjectKind::Array(items) => {
                items.push(value);
                true
            }
            _ => false,
        }
    }

    /// Inserts into a map, returning `false` if this is not a map.
    pub fn map_insert(&self, key: Value, value: Value) -> bool {
        match &mut *self.0.borrow_mut() {
            ObjectKind::Map(map) => {
                map.insert(key, value);
                true
            }
            _ => false,
        }
    }

    /// Adds to a set, returning `false` if this is not a set.
    pub fn set_add(&self, value: Value) -> bool {
        match &mut *self.0.borrow_mut() {
            ObjectKind::Set(set) => {
                set.insert(value);
                true
            }
            _ => false,
        }
    }
}

// Contents are not printed: composites may be cyclic.
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(contents) => write!(f, "Object({}@{:#x})", contents.kind(), self.id().0),
            Err(_) => write!(f, "Object(<borrowed>@{:#x})", self.id().0),
        }
    }
}

/// Insertion-ordered map with same-value-zero keys.
///
/// Entries keep their insertion order; a hash index over the keys makes
/// lookups constant time.
#[derive(Debug, Default)]
pub struct MapData {
    entries: Vec<(Value, Value)>,
    index: HashMap<ValueKey, usize>,
}

impl MapData {
    /// Creates an empty map.
    pub fn new() -> Self {
        MapData::default()
    }

    /// Inserts an entry, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.index.entry(key.key()) {
            Entry::Occupied(slot) => {
                if let Some(entry) = self.entries.get_mut(*slot.get()) {
                    entry.1 = value;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.index
            .get(&key.key())
            .and_then(|&i| self.entries.get(i))
            .map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &Value) -> bool {
        self.index.contains_key(&key.key())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(Value, Value)> for MapData {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = MapData::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Insertion-ordered set with same-value-zero membership.
#[derive(Debug, Default)]
pub struct SetData {
    items: Vec<Value>,
    index: HashSet<ValueKey>,
}

impl SetData {
    /// Creates an empty set.
    pub fn new() -> Self {
        SetData::default()
    }

    /// Adds a member. Returns `false` if it was already present.
    pub fn insert(&mut self, value: Value) -> bool {
        if !self.index.insert(value.key()) {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Returns `true` if `value` is a member.
    pub fn contains(&self, value: &Value) -> bool {
        self.index.contains(&value.key())
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }
}

impl FromIterator<Value> for SetData {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = SetData::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// Scalar coercion hook: produces the primitive a record stands for.
pub type ValueOfFn = Rc<dyn Fn(&Record) -> Value>;

/// Text rendering hook.
pub type ToTextFn = Rc<dyn Fn(&Record) -> String>;

/// Generic keyed record.
///
/// A record has a class name (its runtime type), insertion-ordered own keys,
/// and two optional capabilities: a scalar coercion ([`Record::with_value_of`])
/// and a text rendering ([`Record::with_to_text`]). A record with either
/// capability is compared through it instead of field by field. A record
/// without a rendering renders as [`DEFAULT_TEXT`].
///
/// ```
/// use deepmatch::{equals, Record, Value};
///
/// let a = Record::new()
///     .field("different", Value::from(10))
///     .with_value_of(|_| Value::from(true));
/// let b = Record::new()
///     .field("different", Value::from(20))
///     .with_value_of(|_| Value::from(true));
///
/// assert!(equals(&Value::from(a), &Value::from(b)));
/// ```
#[derive(Clone)]
pub struct Record {
    class: Rc<str>,
    fields: Vec<(Rc<str>, Value)>,
    value_of: Option<ValueOfFn>,
    to_text: Option<ToTextFn>,
}

impl Record {
    /// Creates an empty record of the default class.
    pub fn new() -> Self {
        Record::with_class(DEFAULT_CLASS)
    }

    /// Creates an empty record of the given class.
    pub fn with_class(class: &str) -> Self {
        Record {
            class: Rc::from(class),
            fields: Vec::new(),
            value_of: None,
            to_text: None,
        }
    }

    /// Adds a field, builder style.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Installs a scalar coercion.
    pub fn with_value_of<F>(mut self, f: F) -> Self
    where
        F: Fn(&Record) -> Value + 'static,
    {
        self.value_of = Some(Rc::new(f));
        self
    }

    /// Installs a text rendering.
    pub fn with_to_text<F>(mut self, f: F) -> Self
    where
        F: Fn(&Record) -> String + 'static,
    {
        self.to_text = Some(Rc::new(f));
        self
    }

    /// Class name of this record.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Sets a field. An existing key keeps its position.
    pub fn insert(&mut self, key: &str, value: Value) {
        match self.fields.iter_mut().find(|(k, _)| &**k == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((Rc::from(key), value)),
        }
    }

    /// Looks up an own key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| &**k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if `key` is an own key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of own keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no own keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates own keys and values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (&**k, v))
    }

    /// Iterates own keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| &**k)
    }

    /// Returns `true` if this record has a scalar coercion.
    pub fn has_value_of(&self) -> bool {
        self.value_of.is_some()
    }

    /// Returns `true` if this record has a text rendering.
    pub fn has_to_text(&self) -> bool {
        self.to_text.is_some()
    }

    /// Runs the scalar coercion, if any.
    pub fn value_of(&self) -> Option<Value> {
        self.value_of.as_ref().map(|f| f(self))
    }

    /// Runs the text rendering, if any.
    pub fn to_text(&self) -> Option<String> {
        self.to_text.as_ref().map(|f| f(self))
    }

    /// Renders the record as text, falling back to [`DEFAULT_TEXT`].
    pub fn text(&self) -> String {
        self.to_text().unwrap_or_else(|| DEFAULT_TEXT.to_string())
    }
}

impl Default for Record {
    fn default() -> Self {
        Record::new()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("class", &self.class)
            .field("keys", &self.keys().collect::<Vec<_>>())
            .field("value_of", &self.has_value_of())
            .field("to_text", &self.has_to_text())
            .finish()
    }
}
