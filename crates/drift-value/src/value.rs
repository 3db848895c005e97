use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A tree-shaped input value.
///
/// Covers the JSON kinds plus the extended kinds the diff engine
/// understands. Composite variants hold shared handles ([`ObjectRef`],
/// [`ArrayRef`]) rather than owned collections: handles give composites an
/// identity (pointer address) and let callers alias subtrees or build
/// reference cycles, both of which the engine must handle.
#[derive(Clone)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    /// All numbers are doubles, mirroring the dynamic values this engine
    /// was built to compare. `NaN` is representable and never equal to
    /// itself.
    Number(f64),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
    Function(FunctionValue),
    Date(DateValue),
    Regex(RegexValue),
    Symbol(SymbolValue),
}

impl Value {
    /// Build an array value from owned elements.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(ArrayRef::new(items.into_iter().collect()))
    }

    /// Build an object value from key-value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(ObjectRef::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build a function value from its source text.
    pub fn function(source: impl Into<String>) -> Self {
        Value::Function(FunctionValue::new(source))
    }

    /// Build a date value from milliseconds since the UNIX epoch.
    pub fn date(epoch_ms: i64) -> Self {
        Value::Date(DateValue::new(epoch_ms))
    }

    /// Build a regex value from a pattern source and flag string.
    pub fn regex(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::Regex(RegexValue::new(source, flags))
    }

    /// Build a described symbol value.
    pub fn symbol(description: impl Into<String>) -> Self {
        Value::Symbol(SymbolValue::new(Some(description.into())))
    }

    /// Build a symbol value with no description.
    pub fn anonymous_symbol() -> Self {
        Value::Symbol(SymbolValue::new(None))
    }

    /// The structural kind of this value.
    pub fn kind(&self) -> crate::ValueKind {
        crate::classify(self)
    }
}

/// Strict equality: primitives compare by value, composites by handle
/// identity (two objects are equal only if they are the *same* object).
/// Extended kinds compare by exact field equality. Cycle-safe, because
/// composite contents are never traversed.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Regex(a), Value::Regex(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::display::serialize(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::display::serialize(self))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Shared handle to an object's entries.
///
/// Entries are kept in a `BTreeMap`, so key iteration is deterministic.
#[derive(Clone, Default)]
pub struct ObjectRef(Rc<RefCell<BTreeMap<String, Value>>>);

impl ObjectRef {
    /// Wrap an entry map in a fresh handle.
    pub fn new(entries: BTreeMap<String, Value>) -> Self {
        Self(Rc::new(RefCell::new(entries)))
    }

    /// A handle to a fresh empty object.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The handle's identity: the address of the shared allocation.
    /// Stable for the lifetime of the handle, unique among live handles.
    pub fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Returns `true` if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Borrow the entries for reading.
    pub fn borrow(&self) -> Ref<'_, BTreeMap<String, Value>> {
        self.0.borrow()
    }

    /// Insert an entry. This is how callers wire up aliases and cycles.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().insert(key.into(), value);
    }

    /// Clone out the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the object has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.clone()).to_json())
    }
}

/// Shared handle to an array's elements.
#[derive(Clone, Default)]
pub struct ArrayRef(Rc<RefCell<Vec<Value>>>);

impl ArrayRef {
    /// Wrap owned elements in a fresh handle.
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    /// A handle to a fresh empty array.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The handle's identity: the address of the shared allocation.
    pub fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Returns `true` if both handles refer to the same array.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Borrow the elements for reading.
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Append an element.
    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl PartialEq for ArrayRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Array(self.clone()).to_json())
    }
}

/// A function value, represented purely by its source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionValue {
    source: String,
}

impl FunctionValue {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The raw source text, exactly as supplied.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A timestamp value: milliseconds since the UNIX epoch.
///
/// The instant is the value; two dates with the same instant are the same
/// date regardless of how they were written down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateValue {
    epoch_ms: i64,
}

impl DateValue {
    pub fn new(epoch_ms: i64) -> Self {
        Self { epoch_ms }
    }

    /// The instant in milliseconds since the UNIX epoch.
    pub fn epoch_ms(&self) -> i64 {
        self.epoch_ms
    }
}

/// A regular-expression value: pattern source plus a flag string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegexValue {
    source: String,
    flags: String,
}

impl RegexValue {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }

    /// The pattern source, without delimiters.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flag string, in the order it was supplied.
    pub fn flags(&self) -> &str {
        &self.flags
    }
}

/// A symbol value, carrying only its optional description.
///
/// Symbol *identity* is deliberately not modeled: two symbols with equal
/// descriptions are indistinguishable here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolValue {
    description: Option<String>,
}

impl SymbolValue {
    pub fn new(description: Option<String>) -> Self {
        Self { description }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
