//! Type system for described classes and interfaces.
//!
//! This module holds the runtime description of the types a mapping layer introspects: their
//! supertypes (possibly generic), their generic parameters, and their declared fields, methods
//! and constructors. Types are identified by [`Token`], so two descriptors of the same type are
//! interchangeable.
//!
//! # Key Components
//!
//! - [`TypeDescriptor`]: A class, interface, primitive or array type
//! - [`TypeRegistry`]: Owns all descriptors, provides the platform types and subtype checks
//! - [`TypeResolver`]: Binds type variables against a concrete reflected type
//! - [`TypeBuilder`]: Fluent description of user types
//! - [`TypeSignature`]: A declared, possibly generic type expression
//!
//! # Examples
//!
//! ```rust
//! use beanscope::metadata::typesystem::{CoreType, TypeBuilder, TypeRegistry, TypeSignature};
//!
//! let registry = TypeRegistry::new();
//! let entity = TypeBuilder::class(&registry, "app", "Entity")
//!     .implements(TypeSignature::core(CoreType::Serializable))
//!     .build();
//!
//! assert_eq!(entity.fullname(), "app.Entity");
//! assert!(registry.is_assignable_from(CoreType::Serializable.token(), entity.token));
//! ```

mod base;
mod builder;
mod primitives;
mod registry;
mod resolver;
mod signature;

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, OnceLock},
};

pub use base::{GenericParam, TypeFlags, TypeFlavor};
pub use builder::{FieldBuilder, MethodBuilder, TypeBuilder};
pub use primitives::{CoreType, PrimitiveKind};
pub use registry::TypeRegistry;
pub use resolver::{TypeResolver, MAX_RESOLUTION_DEPTH};
pub use signature::TypeSignature;

use crate::metadata::{
    field::FieldList,
    method::{ConstructorList, ConstructorRc, MethodList},
    token::Token,
};

/// Reference to a `TypeDescriptor`
pub type TypeRc = Arc<TypeDescriptor>;

/// A described type.
///
/// Equality and hashing only consider the token.
pub struct TypeDescriptor {
    /// Token
    pub token: Token,
    /// Namespace, empty for primitives
    pub namespace: String,
    /// Simple name
    pub name: String,
    /// What kind of type this is
    pub flavor: TypeFlavor,
    /// Declaration modifiers
    pub flags: TypeFlags,
    /// The base class, classes without an explicit one extend `core.Object`
    base: OnceLock<TypeSignature>,
    /// Implemented interfaces, or super-interfaces for an interface
    pub interfaces: Arc<boxcar::Vec<TypeSignature>>,
    /// Declared type variables
    pub generic_params: Arc<boxcar::Vec<GenericParam>>,
    /// Declared fields
    pub fields: FieldList,
    /// Declared methods
    pub methods: MethodList,
    /// Declared constructors
    pub constructors: ConstructorList,
}

impl TypeDescriptor {
    /// Create a new instance of a `TypeDescriptor`
    #[must_use]
    pub fn new(
        token: Token,
        namespace: String,
        name: String,
        flavor: TypeFlavor,
        flags: TypeFlags,
        base: Option<TypeSignature>,
    ) -> Self {
        let base_lock = OnceLock::new();
        if let Some(base_value) = base {
            base_lock.set(base_value).ok();
        }

        TypeDescriptor {
            token,
            namespace,
            name,
            flavor,
            flags,
            base: base_lock,
            interfaces: Arc::new(boxcar::Vec::new()),
            generic_params: Arc::new(boxcar::Vec::new()),
            fields: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
            constructors: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Access the base class of this type, if it has one
    pub fn base(&self) -> Option<&TypeSignature> {
        self.base.get()
    }

    /// Returns the full name (Namespace.Name) of the type
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{0}.{1}", self.namespace, self.name)
        }
    }

    /// Returns `true` for interfaces
    pub fn is_interface(&self) -> bool {
        self.flavor == TypeFlavor::Interface
    }

    /// Returns `true` for primitive value types
    pub fn is_primitive(&self) -> bool {
        matches!(self.flavor, TypeFlavor::Primitive(_))
    }

    /// Returns `true` for array types
    pub fn is_array(&self) -> bool {
        matches!(self.flavor, TypeFlavor::Array { .. })
    }

    /// Returns `true` for abstract classes and interfaces
    pub fn is_abstract(&self) -> bool {
        self.is_interface() || self.flags.contains(TypeFlags::ABSTRACT)
    }

    /// The component type token of an array type
    pub fn component(&self) -> Option<Token> {
        match self.flavor {
            TypeFlavor::Array { component } => Some(component),
            _ => None,
        }
    }

    /// The names of the declared type variables, in declaration order
    pub fn generic_param_names(&self) -> Vec<String> {
        self.generic_params
            .iter()
            .map(|(_, param)| param.name.clone())
            .collect()
    }

    /// Look up a declared type variable by name
    pub fn generic_param(&self, name: &str) -> Option<&GenericParam> {
        self.generic_params
            .iter()
            .map(|(_, param)| param)
            .find(|param| param.name == name)
    }

    /// The base class followed by all directly implemented interfaces
    pub fn supertypes(&self) -> Vec<TypeSignature> {
        self.base
            .get()
            .into_iter()
            .cloned()
            .chain(self.interfaces.iter().map(|(_, iface)| iface.clone()))
            .collect()
    }

    /// The first declared constructor that takes no arguments
    pub fn default_constructor(&self) -> Option<ConstructorRc> {
        self.constructors
            .iter()
            .map(|(_, ctor)| ctor)
            .find(|ctor| ctor.is_default())
            .cloned()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("token", &self.token)
            .field("fullname", &self.fullname())
            .field("flavor", &self.flavor)
            .field("base", &self.base.get())
            .field("interfaces", &self.interfaces.count())
            .field("fields", &self.fields.count())
            .field("methods", &self.methods.count())
            .finish_non_exhaustive()
    }
}
