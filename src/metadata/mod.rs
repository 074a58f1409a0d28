//! Type descriptions and runtime values.
//!
//! This module contains everything the reflection layer introspects: the described types and
//! their members, the identities they are referenced by, and the values that flow through
//! accessors.
//!
//! # Key Components
//!
//! - [`token`] - Identities of types and members
//! - [`typesystem`] - Type descriptors, registry, generic resolution and builders
//! - [`method`] - Method and constructor descriptors
//! - [`field`] - Field descriptors
//! - [`value`] - Dynamic values and object instances
//!
//! # Examples
//!
//! ```rust
//! use beanscope::metadata::typesystem::{CoreType, TypeBuilder, TypeRegistry, TypeSignature};
//!
//! let registry = TypeRegistry::new();
//! let ty = TypeBuilder::class(&registry, "app", "Order")
//!     .implements(TypeSignature::core(CoreType::Serializable))
//!     .build();
//!
//! println!("{} (Token: {})", ty.fullname(), ty.token);
//! ```

/// Implementation of field descriptors
pub mod field;
/// Implementation of method and constructor descriptors
pub mod method;
/// Implementation of the identity tokens
pub mod token;
/// Implementation of the type system
pub mod typesystem;
/// Implementation of runtime values and instances
pub mod value;
