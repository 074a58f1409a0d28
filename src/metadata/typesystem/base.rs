//! Building blocks of a [`crate::metadata::typesystem::TypeDescriptor`].
//!
//! - [`TypeFlavor`] - What kind of type a descriptor describes
//! - [`TypeFlags`] - Modifiers of a type declaration
//! - [`GenericParam`] - A type variable declared by a generic type

use bitflags::bitflags;

use crate::metadata::{
    token::Token,
    typesystem::{primitives::PrimitiveKind, signature::TypeSignature},
};

/// The kind of a described type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFlavor {
    /// A primitive value type
    Primitive(PrimitiveKind),
    /// A class, has at most one base class
    Class,
    /// An interface, has super-interfaces but no base class
    Interface,
    /// An array type created by the registry
    Array {
        /// Token of the component type
        component: Token,
    },
}

impl TypeFlavor {
    /// Returns `true` for reference types (everything but primitives)
    #[must_use]
    pub fn is_reference(&self) -> bool {
        !matches!(self, TypeFlavor::Primitive(_))
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Modifiers of a type declaration
    pub struct TypeFlags: u32 {
        /// The type is visible outside of its namespace
        const PUBLIC = 0x0001;
        /// The type cannot be instantiated
        const ABSTRACT = 0x0002;
        /// The type cannot be extended
        const FINAL = 0x0004;
    }
}

/// A type variable declared by a generic type, e.g. `T extends Serializable`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    /// Name of the variable
    pub name: String,
    /// Declared upper bounds, the first one is used for erasure
    pub bounds: Vec<TypeSignature>,
}

impl GenericParam {
    /// Create an unbounded variable
    #[must_use]
    pub fn new(name: &str) -> Self {
        GenericParam {
            name: name.to_string(),
            bounds: Vec::new(),
        }
    }

    /// Create a variable with upper bounds
    #[must_use]
    pub fn bounded(name: &str, bounds: Vec<TypeSignature>) -> Self {
        GenericParam {
            name: name.to_string(),
            bounds,
        }
    }
}
