//! Built-in platform types.
//!
//! Every [`crate::metadata::typesystem::TypeRegistry`] starts out with two groups of types
//! that user descriptions refer to by fixed tokens:
//!
//! - [`PrimitiveKind`] - value types without members or supertypes (`int`, `boolean`, ...)
//! - [`CoreType`] - the universal root `core.Object` and a small reference library
//!   (`core.String`, the boxed numbers, `core.collections.List`, ...)
//!
//! Both enums hand out stable tokens in the [`TOKEN_PLATFORM`] range, so descriptions can be
//! written before a registry exists.

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::metadata::{
    token::{Token, TOKEN_PLATFORM},
    value::Value,
};

/// Row offset of the first reference platform type, primitives occupy the rows below
const CORE_TYPE_ROW_BASE: u32 = 0x20;

/// The primitive value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum PrimitiveKind {
    /// `boolean`
    Boolean,
    /// signed 8bit integer
    Byte,
    /// signed 16bit integer
    Short,
    /// signed 32bit integer
    Int,
    /// signed 64bit integer
    Long,
    /// 32bit floating-point
    Float,
    /// 64bit floating-point
    Double,
    /// 16bit character
    Char,
    /// no value, only valid as a return type
    Void,
}

impl PrimitiveKind {
    /// The token of this primitive
    #[must_use]
    pub fn token(&self) -> Token {
        Token::from_parts(TOKEN_PLATFORM, *self as u32 + 1)
    }

    /// The name of this primitive, which is also its full name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Void => "void",
        }
    }

    /// Look up the primitive a token belongs to
    #[must_use]
    pub fn from_token(token: Token) -> Option<Self> {
        PrimitiveKind::iter().find(|kind| kind.token() == token)
    }

    /// The value an unset slot of this type reads as
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            PrimitiveKind::Boolean => Value::Boolean(false),
            PrimitiveKind::Byte => Value::Byte(0),
            PrimitiveKind::Short => Value::Short(0),
            PrimitiveKind::Int => Value::Int(0),
            PrimitiveKind::Long => Value::Long(0),
            PrimitiveKind::Float => Value::Float(0.0),
            PrimitiveKind::Double => Value::Double(0.0),
            PrimitiveKind::Char => Value::Char('\0'),
            PrimitiveKind::Void => Value::Null,
        }
    }
}

/// The reference types every registry provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum CoreType {
    /// The universal root, every class ultimately extends it
    Object,
    /// Marker interface
    Serializable,
    /// `Comparable<T>`
    Comparable,
    /// Immutable text
    String,
    /// Abstract base of the boxed numbers
    Number,
    /// Boxed `long`
    Long,
    /// Boxed `int`
    Integer,
    /// Boxed `double`
    Double,
    /// Boxed `boolean`
    Boolean,
    /// `Collection<E>`
    Collection,
    /// `List<E>`
    List,
    /// `ArrayList<E>`
    ArrayList,
    /// `Map<K, V>`
    Map,
}

impl CoreType {
    /// The token of this type
    #[must_use]
    pub fn token(&self) -> Token {
        Token::from_parts(TOKEN_PLATFORM, CORE_TYPE_ROW_BASE + *self as u32)
    }

    /// The namespace of this type
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        match self {
            CoreType::Collection | CoreType::List | CoreType::ArrayList | CoreType::Map => {
                "core.collections"
            }
            _ => "core",
        }
    }

    /// The simple name of this type
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CoreType::Object => "Object",
            CoreType::Serializable => "Serializable",
            CoreType::Comparable => "Comparable",
            CoreType::String => "String",
            CoreType::Number => "Number",
            CoreType::Long => "Long",
            CoreType::Integer => "Integer",
            CoreType::Double => "Double",
            CoreType::Boolean => "Boolean",
            CoreType::Collection => "Collection",
            CoreType::List => "List",
            CoreType::ArrayList => "ArrayList",
            CoreType::Map => "Map",
        }
    }

    /// Returns the full name (Namespace.Name)
    #[must_use]
    pub fn fullname(&self) -> String {
        format!("{}.{}", self.namespace(), self.name())
    }

    /// Returns `true` for the interface types
    #[must_use]
    pub fn is_interface(&self) -> bool {
        matches!(
            self,
            CoreType::Serializable
                | CoreType::Comparable
                | CoreType::Collection
                | CoreType::List
                | CoreType::Map
        )
    }

    /// Generic parameter names declared by this type
    #[must_use]
    pub fn generic_params(&self) -> &'static [&'static str] {
        match self {
            CoreType::Comparable => &["T"],
            CoreType::Collection | CoreType::List | CoreType::ArrayList => &["E"],
            CoreType::Map => &["K", "V"],
            _ => &[],
        }
    }

    /// Look up the platform type a token belongs to
    #[must_use]
    pub fn from_token(token: Token) -> Option<Self> {
        CoreType::iter().find(|core| core.token() == token)
    }
}
