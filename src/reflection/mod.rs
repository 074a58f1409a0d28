//! Property introspection.
//!
//! This module turns a [`crate::metadata::typesystem::TypeDescriptor`] into a
//! [`PropertyIndex`]: the readable and writable properties of the type, the accessor selected
//! for each of them, and their resolved types.
//!
//! # Key Components
//!
//! - [`Reflector`] - Runs the introspection passes for one type
//! - [`PropertyIndex`] - The immutable result, queried by property name
//! - [`ReadAccessor`] / [`WriteAccessor`] - Method or field backed property access
//! - [`DefaultReflectorFactory`] - Caches one index per type
//! - [`ReflectorConfig`] - Access checks, caching and hierarchy depth
//!
//! # Conflict Resolution
//!
//! Covariant overrides, `isX`/`getX` pairs and overloaded setters give a property several
//! accessor candidates. The narrower type wins; `isX` wins over `getX` for booleans; a setter
//! whose parameter type equals the getter type wins over all other setters. Candidates with
//! unrelated types fail the build with [`crate::Error::AmbiguousGetter`] or
//! [`crate::Error::AmbiguousSetter`].
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use beanscope::prelude::*;
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let ty = TypeBuilder::class(&registry, "app", "Flag")
//!     .field(FieldBuilder::new("on", TypeSignature::primitive(PrimitiveKind::Boolean)))
//!     .method(
//!         MethodBuilder::new("isOn")
//!             .returns(TypeSignature::primitive(PrimitiveKind::Boolean))
//!             .reads_field("on"),
//!     )
//!     .build();
//!
//! let factory = DefaultReflectorFactory::new(registry.clone());
//! let index = factory.find_for_type(&ty)?;
//! assert_eq!(index.getter_type("on")?.name, "boolean");
//! assert_eq!(index.get_accessor("on")?.member_name(), "isOn");
//! # Ok::<(), beanscope::Error>(())
//! ```

mod accessor;
mod collector;
mod config;
mod conflicts;
mod factory;
mod fields;
mod index;
pub mod namer;
mod reflector;

pub use accessor::{FieldInvoker, MethodInvoker, ReadAccessor, WriteAccessor};
pub use collector::MethodCollector;
pub use config::ReflectorConfig;
pub use conflicts::ConflictResolver;
pub use factory::{DefaultReflectorFactory, ReflectorFactory};
pub use index::PropertyIndex;
pub use reflector::Reflector;
