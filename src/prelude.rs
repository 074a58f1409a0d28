//! # beanscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the beanscope library. Import this module to describe types and introspect their
//! properties.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all beanscope operations
pub use crate::Error;

/// The accessor direction reported by `PropertyNotFound`
pub use crate::PropertyAccess;

/// The result type used throughout beanscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Introspection of a single type and its result
pub use crate::reflection::{PropertyIndex, Reflector};

/// Cached introspection
pub use crate::reflection::{DefaultReflectorFactory, ReflectorFactory};

/// Options for building and caching indices
pub use crate::reflection::ReflectorConfig;

/// Property accessors
pub use crate::reflection::{FieldInvoker, MethodInvoker, ReadAccessor, WriteAccessor};

// ================================================================================================
// Type System
// ================================================================================================

/// Identity of types and members
pub use crate::metadata::token::Token;

/// Type descriptors, the registry and signatures
pub use crate::metadata::typesystem::{
    CoreType, GenericParam, PrimitiveKind, TypeDescriptor, TypeFlags, TypeFlavor, TypeRc,
    TypeRegistry, TypeResolver, TypeSignature,
};

/// Fluent description of user types
pub use crate::metadata::typesystem::{FieldBuilder, MethodBuilder, TypeBuilder};

// ================================================================================================
// Members and Values
// ================================================================================================

/// Field descriptors
pub use crate::metadata::field::{Field, FieldModifiers, FieldRc};

/// Method and constructor descriptors
pub use crate::metadata::method::{
    Constructor, ConstructorRc, MemberAccessFlags, Method, MethodBody, MethodModifiers, MethodRc,
};

/// Runtime values and instances
pub use crate::metadata::value::{Instance, InstanceRc, Value};
