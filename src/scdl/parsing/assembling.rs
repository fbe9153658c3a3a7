//! Value assembling - transactional field accumulation.
//!
//! The assembler is the mutable twin of the token cursor: grammar scopes
//! fork a child, record captured values into it, and either commit the
//! child into its parent or drop it wholesale. Committing merges scalar
//! fields (a later write for the same field wins) and extends list fields
//! in order; dropping leaks nothing into the parent.
//!
//! Construction happens only after a fully successful scope: the finished
//! maps become a `FieldSet`, and a rule's construction function takes
//! fields out of it by name. A field that was never recorded resolves to
//! "absent" (an optional stays unset, a list is empty, a flag is false);
//! taking a *required* field that is absent is a construction
//! inconsistency, which is a fault in the grammar definition rather than
//! in the input.

use std::any::{self, Any};
use std::collections::HashMap;
use std::fmt;

/// A captured value, as recorded by the engine.
pub enum Value {
    Word(String),
    Number(i64),
    Flag(bool),
    Object {
        type_name: &'static str,
        value: Box<dyn Any>,
    },
}

impl Value {
    pub fn object<V: Any>(value: V) -> Value {
        Value::Object {
            type_name: any::type_name::<V>(),
            value: Box::new(value),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Value::Word(_) => "word",
            Value::Number(_) => "number",
            Value::Flag(_) => "flag",
            Value::Object { type_name, .. } => type_name,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Word(word) => f.debug_tuple("Word").field(word).finish(),
            Value::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Value::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            Value::Object { type_name, .. } => write!(f, "Object({})", type_name),
        }
    }
}

/// Errors reported by construction functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// A required field was never captured.
    MissingField(&'static str),
    /// A field was captured with a different shape than the construction
    /// function expects.
    FieldType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// The grammar's construction functions do not produce the type the
    /// caller asked for.
    ResultType {
        expected: &'static str,
        grammar: &'static str,
    },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyError::MissingField(field) => {
                write!(f, "required field '{}' was never captured", field)
            }
            AssemblyError::FieldType {
                field,
                expected,
                found,
            } => write!(
                f,
                "field '{}' holds a {} where a {} was expected",
                field, found, expected
            ),
            AssemblyError::ResultType { expected, grammar } => write!(
                f,
                "grammar '{}' does not assemble values of type {}",
                grammar, expected
            ),
        }
    }
}

impl std::error::Error for AssemblyError {}

/// Transactional accumulator of named scalars and named ordered lists.
#[derive(Debug, Default)]
pub struct ValueAssembler {
    values: HashMap<&'static str, Value>,
    lists: HashMap<&'static str, Vec<Value>>,
}

impl ValueAssembler {
    pub fn new() -> ValueAssembler {
        ValueAssembler::default()
    }

    /// Fork a child transaction. The child starts empty; its recordings
    /// become visible to the parent only on commit.
    pub fn child(&self) -> ValueAssembler {
        ValueAssembler::new()
    }

    pub fn set(&mut self, field: &'static str, value: Value) {
        self.values.insert(field, value);
    }

    pub fn append(&mut self, field: &'static str, value: Value) {
        self.lists.entry(field).or_default().push(value);
    }

    /// Merge a finished child transaction: its scalars overwrite, its
    /// lists extend in order.
    pub fn commit(&mut self, child: ValueAssembler) {
        for (field, value) in child.values {
            self.values.insert(field, value);
        }
        for (field, mut list) in child.lists {
            self.lists.entry(field).or_default().append(&mut list);
        }
    }

    /// Close the root transaction for construction.
    pub fn into_fields(self) -> FieldSet {
        FieldSet {
            values: self.values,
            lists: self.lists,
        }
    }
}

/// The captured fields of one successful scope, consumed by a rule's
/// construction function.
#[derive(Debug)]
pub struct FieldSet {
    values: HashMap<&'static str, Value>,
    lists: HashMap<&'static str, Vec<Value>>,
}

impl FieldSet {
    pub fn word(&mut self, field: &'static str) -> Result<String, AssemblyError> {
        match self.word_opt(field)? {
            Some(word) => Ok(word),
            None => Err(AssemblyError::MissingField(field)),
        }
    }

    pub fn word_opt(&mut self, field: &'static str) -> Result<Option<String>, AssemblyError> {
        match self.values.remove(field) {
            Some(Value::Word(word)) => Ok(Some(word)),
            Some(other) => Err(mismatch(field, "word", &other)),
            None => Ok(None),
        }
    }

    pub fn number(&mut self, field: &'static str) -> Result<i64, AssemblyError> {
        match self.number_opt(field)? {
            Some(number) => Ok(number),
            None => Err(AssemblyError::MissingField(field)),
        }
    }

    pub fn number_opt(&mut self, field: &'static str) -> Result<Option<i64>, AssemblyError> {
        match self.values.remove(field) {
            Some(Value::Number(number)) => Ok(Some(number)),
            Some(other) => Err(mismatch(field, "number", &other)),
            None => Ok(None),
        }
    }

    /// Flags are inherently optional: an absent flag is `false`.
    pub fn flag(&mut self, field: &'static str) -> Result<bool, AssemblyError> {
        match self.values.remove(field) {
            Some(Value::Flag(flag)) => Ok(flag),
            Some(other) => Err(mismatch(field, "flag", &other)),
            None => Ok(false),
        }
    }

    pub fn object<V: Any>(&mut self, field: &'static str) -> Result<V, AssemblyError> {
        match self.object_opt(field)? {
            Some(value) => Ok(value),
            None => Err(AssemblyError::MissingField(field)),
        }
    }

    pub fn object_opt<V: Any>(&mut self, field: &'static str) -> Result<Option<V>, AssemblyError> {
        match self.values.remove(field) {
            Some(value) => downcast(field, value).map(Some),
            None => Ok(None),
        }
    }

    /// The recorded list for a field, empty when nothing was appended.
    pub fn objects<V: Any>(&mut self, field: &'static str) -> Result<Vec<V>, AssemblyError> {
        self.lists
            .remove(field)
            .unwrap_or_default()
            .into_iter()
            .map(|value| downcast(field, value))
            .collect()
    }

    /// The recorded word list for a field, empty when nothing was appended.
    pub fn words(&mut self, field: &'static str) -> Result<Vec<String>, AssemblyError> {
        self.lists
            .remove(field)
            .unwrap_or_default()
            .into_iter()
            .map(|value| match value {
                Value::Word(word) => Ok(word),
                other => Err(mismatch(field, "word", &other)),
            })
            .collect()
    }
}

fn mismatch(field: &'static str, expected: &'static str, found: &Value) -> AssemblyError {
    AssemblyError::FieldType {
        field,
        expected,
        found: found.kind_name(),
    }
}

fn downcast<V: Any>(field: &'static str, value: Value) -> Result<V, AssemblyError> {
    let found = value.kind_name();
    if let Value::Object { value, .. } = value {
        if let Ok(boxed) = value.downcast::<V>() {
            return Ok(*boxed);
        }
    }
    Err(AssemblyError::FieldType {
        field,
        expected: any::type_name::<V>(),
        found,
    })
}
