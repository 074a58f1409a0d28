// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # beanscope
//!
//! Property introspection for described object types. Given a type with its fields, methods,
//! constructors and (possibly generic) supertypes, `beanscope` works out which properties can be
//! read and written, which getter or setter backs each of them, and what type each property has
//! once the generic bindings of the hierarchy are applied.
//!
//! The hard part is conflict resolution. Covariant overrides, generic erasure, `isX`/`getX`
//! pairs and overloaded setters regularly give one property several candidate accessors; the
//! [`reflection::Reflector`] picks one deterministically or fails with a typed error naming the
//! property, the declaring type and the conflicting types.
//!
//! ## Features
//!
//! - **Type description** - A registry pre-populated with platform types and a fluent builder
//!   for user types, see [`metadata::typesystem`]
//! - **Generic resolution** - Type variables bound through any number of generic ancestors
//! - **Conflict resolution** - Narrowest getter, `is` preference for booleans, getter-guided
//!   setter selection
//! - **Field fallback** - Fields fill the gaps accessor methods leave
//! - **Caching** - One immutable, thread-safe index per type, built at most once
//!
//! ## Quick Start
//!
//! ```rust
//! use beanscope::prelude::*;
//!
//! let registry = TypeRegistry::new();
//! let person = TypeBuilder::class(&registry, "app", "Person")
//!     .field(FieldBuilder::new("name", TypeSignature::core(CoreType::String)))
//!     .method(
//!         MethodBuilder::new("getName")
//!             .returns(TypeSignature::core(CoreType::String))
//!             .reads_field("name"),
//!     )
//!     .method(
//!         MethodBuilder::new("setName")
//!             .param(TypeSignature::core(CoreType::String))
//!             .writes_field("name"),
//!     )
//!     .default_constructor()
//!     .build();
//!
//! let index = Reflector::build(&registry, &person)?;
//! assert_eq!(index.readable_names(), &["name".to_string()]);
//! assert_eq!(index.getter_type("name")?.fullname(), "core.String");
//!
//! let instance = index.default_constructor()?.new_instance()?;
//! index.set_accessor("name")?.write(&instance, Value::from("Ada"))?;
//! assert_eq!(index.get_accessor("name")?.read(&instance)?, Value::from("Ada"));
//! # Ok::<(), beanscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata`] - Tokens, type descriptors, members, values and the type registry
//! - [`reflection`] - Method collection, conflict resolution, property indices and caching
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! `beanscope` logs through the [`log`](https://docs.rs/log) facade. Install any logger to see
//! which types are introspected (`debug`) and how each conflict was decided (`trace`).

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use beanscope::prelude::*;
///
/// let registry = TypeRegistry::new();
/// let ty = TypeBuilder::class(&registry, "app", "Empty").build();
/// let index = Reflector::build(&registry, &ty)?;
/// assert_eq!(index.property_count(), 0);
/// # Ok::<(), beanscope::Error>(())
/// ```
pub mod prelude;

/// Type descriptors, members, tokens and runtime values
///
/// # Key Components
///
/// - [`metadata::typesystem::TypeRegistry`] - Owns every described type
/// - [`metadata::typesystem::TypeBuilder`] - Describes user types
/// - [`metadata::typesystem::TypeResolver`] - Erases and binds generic signatures
/// - [`metadata::value::Instance`] - An object whose fields accessors read and write
pub mod metadata;

/// Property introspection and conflict resolution
///
/// # Key Components
///
/// - [`reflection::Reflector`] - Builds the index of one type
/// - [`reflection::PropertyIndex`] - Immutable, queryable result
/// - [`reflection::DefaultReflectorFactory`] - Per-type cache
pub mod reflection;

/// `beanscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `beanscope` Error type
///
/// # Examples
///
/// ```rust
/// use beanscope::{prelude::*, Error};
///
/// let registry = TypeRegistry::new();
/// let ty = TypeBuilder::class(&registry, "app", "Empty").build();
///
/// match Reflector::build(&registry, &ty) {
///     Ok(index) => println!("{} properties", index.property_count()),
///     Err(Error::AmbiguousGetter { property, .. }) => println!("ambiguous: {property}"),
///     Err(e) => println!("Error: {e}"),
/// }
/// ```
pub use error::{Error, PropertyAccess};
