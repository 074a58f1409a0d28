//! Runtime values and object instances.
//!
//! Accessors move [`Value`]s in and out of [`Instance`]s. An instance is a bag of field slots
//! keyed by field token, so fields with the same name declared on different levels of a
//! hierarchy never alias. Slots that were never written read as the field's initial value.
//!
//! # Thread Safety
//!
//! [`Instance`] stores its slots in a `DashMap`, so a single instance may be read and written
//! from multiple threads through the same accessors.

use std::{fmt, sync::Arc};

use dashmap::DashMap;

use crate::metadata::token::Token;

/// Reference to an [`Instance`]
pub type InstanceRc = Arc<Instance>;

/// A dynamically typed value read from or written to a property
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value / null reference
    #[default]
    Null,
    /// `boolean`
    Boolean(bool),
    /// `byte`
    Byte(i8),
    /// `short`
    Short(i16),
    /// `int`
    Int(i32),
    /// `long`
    Long(i64),
    /// `float`
    Float(f32),
    /// `double`
    Double(f64),
    /// `char`
    Char(char),
    /// Text
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Reference to another object
    Object(InstanceRc),
}

impl Value {
    /// Returns `true` for [`Value::Null`]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to convert to a boolean value
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Try to convert to a 64-bit integer value
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(value) => Some(i64::from(*value)),
            Value::Short(value) => Some(i64::from(*value)),
            Value::Int(value) => Some(i64::from(*value)),
            Value::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow the text of a [`Value::String`]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the referenced instance of a [`Value::Object`]
    #[must_use]
    pub fn as_object(&self) -> Option<&InstanceRc> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            // Object references compare by identity
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<InstanceRc> for Value {
    fn from(value: InstanceRc) -> Self {
        Value::Object(value)
    }
}

/// An object of a described type
pub struct Instance {
    /// Token of the concrete type this object was created as
    type_token: Token,
    /// Instance field slots, keyed by field token
    slots: DashMap<Token, Value>,
}

impl Instance {
    /// Create a new object with all slots unset
    ///
    /// ## Arguments
    /// * `type_token` - The concrete type of the object
    #[must_use]
    pub fn new(type_token: Token) -> InstanceRc {
        Arc::new(Instance {
            type_token,
            slots: DashMap::new(),
        })
    }

    /// The concrete type of this object
    #[must_use]
    pub fn type_token(&self) -> Token {
        self.type_token
    }

    /// Read a slot, `None` if it was never written
    #[must_use]
    pub fn slot(&self, field: Token) -> Option<Value> {
        self.slots.get(&field).map(|value| value.clone())
    }

    /// Write a slot
    pub fn set_slot(&self, field: Token, value: Value) {
        self.slots.insert(field, value);
    }

    /// Number of slots that have been written
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_token", &self.type_token)
            .field("slots", &self.slots.len())
            .finish()
    }
}
