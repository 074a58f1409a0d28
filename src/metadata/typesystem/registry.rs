//! Central type registry.
//!
//! The [`TypeRegistry`] owns every [`TypeDescriptor`] and serves as the hub for token lookup,
//! name lookup and subtype checks.
//!
//! # Registry Architecture
//!
//! - **Token-based lookup**: Primary index using tokens (`SkipMap`)
//! - **Name-based lookup**: Secondary index for full names (`DashMap`)
//! - **Array cache**: One array type per component type, created on demand
//!
//! # Platform Types
//!
//! A new registry already contains the primitives ([`PrimitiveKind`]) and the reference
//! platform types ([`CoreType`]) with their supertype relations, so `core.Long` is a
//! `core.Number`, which is a `core.Serializable`, and every reference type is a `core.Object`.
//!
//! # Thread Safety
//!
//! - Lock-free data structures for primary storage (`SkipMap`)
//! - Concurrent hash maps for indices (`DashMap`)
//! - Atomic operations for token generation
//!
//! # Examples
//!
//! ```rust
//! use beanscope::metadata::typesystem::{CoreType, PrimitiveKind, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//!
//! let long = registry.get_by_fullname("core.Long").unwrap();
//! assert!(registry.is_assignable_from(CoreType::Number.token(), long.token));
//! assert!(!registry.is_assignable_from(PrimitiveKind::Long.token(), long.token));
//! ```

use std::{
    collections::{HashSet, VecDeque},
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use log::trace;
use strum::IntoEnumIterator;

use crate::{
    metadata::{
        method::{MemberAccessFlags, Method, MethodModifiers},
        token::{Token, TOKEN_ARRAY, TOKEN_FIELD, TOKEN_METHOD, TOKEN_TYPE},
        typesystem::{
            CoreType, GenericParam, PrimitiveKind, TypeDescriptor, TypeFlags, TypeFlavor, TypeRc,
            TypeSignature,
        },
    },
    Error, Result,
};

/// Upper bound for supertype walks in subtype checks
const MAX_SUPERTYPE_DEPTH: usize = 256;

/// Central registry for all described types
pub struct TypeRegistry {
    /// Primary storage, by token
    types: SkipMap<Token, TypeRc>,
    /// Full name to token index
    types_by_fullname: DashMap<String, Token>,
    /// Component token to array type token
    arrays: DashMap<Token, Token>,
    /// Next user type row
    next_type: AtomicU32,
    /// Next field row
    next_field: AtomicU32,
    /// Next method / constructor row
    next_method: AtomicU32,
    /// Next array type row
    next_array: AtomicU32,
}

impl TypeRegistry {
    /// Create a new registry, populated with the platform types
    #[must_use]
    pub fn new() -> Self {
        let registry = TypeRegistry {
            types: SkipMap::new(),
            types_by_fullname: DashMap::new(),
            arrays: DashMap::new(),
            next_type: AtomicU32::new(1),
            next_field: AtomicU32::new(1),
            next_method: AtomicU32::new(1),
            next_array: AtomicU32::new(1),
        };

        registry.initialize_platform();
        registry
    }

    /// Get the next available token of `kind` and increment the counter
    fn next_token(counter: &AtomicU32, kind: u8) -> Token {
        let row = counter.fetch_add(1, Ordering::Relaxed);
        debug_assert!(row <= 0x00FF_FFFF, "We ran out of tokens for kind 0x{kind:02x}");

        Token::from_parts(kind, row)
    }

    /// Allocate a token for a new user type
    pub fn next_type_token(&self) -> Token {
        Self::next_token(&self.next_type, TOKEN_TYPE)
    }

    /// Allocate a token for a new field
    pub fn next_field_token(&self) -> Token {
        Self::next_token(&self.next_field, TOKEN_FIELD)
    }

    /// Allocate a token for a new method or constructor
    pub fn next_method_token(&self) -> Token {
        Self::next_token(&self.next_method, TOKEN_METHOD)
    }

    /// Initialize primitive and reference platform types
    fn initialize_platform(&self) {
        for kind in PrimitiveKind::iter() {
            self.insert(&Arc::new(TypeDescriptor::new(
                kind.token(),
                String::new(),
                kind.name().to_string(),
                TypeFlavor::Primitive(kind),
                TypeFlags::PUBLIC | TypeFlags::FINAL,
                None,
            )));
        }

        let object = TypeSignature::core(CoreType::Object);
        let number = TypeSignature::core(CoreType::Number);
        let serializable = TypeSignature::core(CoreType::Serializable);
        let comparable_of = |core: CoreType| {
            TypeSignature::generic(
                CoreType::Comparable.token(),
                vec![TypeSignature::core(core)],
            )
        };
        let element = || vec![TypeSignature::var("E")];

        for core in CoreType::iter() {
            let (flavor, mut flags, base) = if core.is_interface() {
                (
                    TypeFlavor::Interface,
                    TypeFlags::PUBLIC | TypeFlags::ABSTRACT,
                    None,
                )
            } else if core == CoreType::Object {
                (TypeFlavor::Class, TypeFlags::PUBLIC, None)
            } else {
                let base = match core {
                    CoreType::Long | CoreType::Integer | CoreType::Double => number.clone(),
                    _ => object.clone(),
                };
                (TypeFlavor::Class, TypeFlags::PUBLIC, Some(base))
            };
            match core {
                CoreType::Number => flags |= TypeFlags::ABSTRACT,
                CoreType::String
                | CoreType::Long
                | CoreType::Integer
                | CoreType::Double
                | CoreType::Boolean => flags |= TypeFlags::FINAL,
                _ => {}
            }

            let descriptor = TypeDescriptor::new(
                core.token(),
                core.namespace().to_string(),
                core.name().to_string(),
                flavor,
                flags,
                base,
            );
            for name in core.generic_params() {
                descriptor.generic_params.push(GenericParam::new(name));
            }

            match core {
                CoreType::String
                | CoreType::Long
                | CoreType::Integer
                | CoreType::Double
                | CoreType::Boolean => {
                    descriptor.interfaces.push(serializable.clone());
                    descriptor.interfaces.push(comparable_of(core));
                }
                CoreType::Number => {
                    descriptor.interfaces.push(serializable.clone());
                }
                CoreType::List => {
                    descriptor
                        .interfaces
                        .push(TypeSignature::generic(CoreType::Collection.token(), element()));
                }
                CoreType::ArrayList => {
                    descriptor
                        .interfaces
                        .push(TypeSignature::generic(CoreType::List.token(), element()));
                    descriptor.interfaces.push(serializable.clone());
                }
                _ => {}
            }

            self.insert(&Arc::new(descriptor));
        }

        self.initialize_root_methods();
    }

    /// The root type declares a handful of members, none of which ever become properties
    fn initialize_root_methods(&self) {
        let Some(root) = self.get(&CoreType::Object.token()) else {
            return;
        };

        for (name, params, return_type) in [
            ("getClass", Vec::new(), TypeSignature::core(CoreType::Object)),
            ("hashCode", Vec::new(), TypeSignature::primitive(PrimitiveKind::Int)),
            ("toString", Vec::new(), TypeSignature::core(CoreType::String)),
            (
                "equals",
                vec![TypeSignature::core(CoreType::Object)],
                TypeSignature::primitive(PrimitiveKind::Boolean),
            ),
        ] {
            root.methods.push(Arc::new(Method {
                token: self.next_method_token(),
                name: name.to_string(),
                declaring: root.token,
                params,
                return_type,
                access: MemberAccessFlags::PUBLIC,
                modifiers: MethodModifiers::FINAL,
                body: None,
            }));
        }
    }

    /// Insert a `TypeDescriptor` into the registry
    ///
    /// A descriptor whose token is already registered is ignored.
    ///
    /// ## Arguments
    /// * '`new_type`' - The type to register
    pub fn insert(&self, new_type: &TypeRc) {
        let token = new_type.token;
        if self.types.contains_key(&token) {
            return;
        }

        self.types.insert(token, new_type.clone());
        self.types_by_fullname.insert(new_type.fullname(), token);
    }

    /// Look up a type by token
    ///
    /// ## Arguments
    /// * 'token' - The token of the type
    pub fn get(&self, token: &Token) -> Option<TypeRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Look up a type by token, failing if it does not exist
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] for unknown tokens.
    pub fn resolve(&self, token: &Token) -> Result<TypeRc> {
        self.get(token).ok_or(Error::TypeNotFound(*token))
    }

    /// Look up a type by its full name (`Namespace.Name`)
    pub fn get_by_fullname(&self, fullname: &str) -> Option<TypeRc> {
        self.types_by_fullname
            .get(fullname)
            .and_then(|entry| self.get(entry.value()))
    }

    /// Get a primitive type
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the platform types are missing.
    pub fn get_primitive(&self, kind: PrimitiveKind) -> Result<TypeRc> {
        self.resolve(&kind.token())
    }

    /// Get a reference platform type
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the platform types are missing.
    pub fn get_core(&self, core: CoreType) -> Result<TypeRc> {
        self.resolve(&core.token())
    }

    /// The universal root type `core.Object`
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the platform types are missing.
    pub fn root(&self) -> Result<TypeRc> {
        self.get_core(CoreType::Object)
    }

    /// A printable name for a token, for messages
    pub fn type_name(&self, token: &Token) -> String {
        self.get(token)
            .map_or_else(|| format!("<unknown {token}>"), |ty| ty.fullname())
    }

    /// Get (or create) the array type of `component`
    ///
    /// At most one array type exists per component type.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the component does not exist.
    pub fn array_of(&self, component: Token) -> Result<TypeRc> {
        let component_type = self.resolve(&component)?;

        let token = *self.arrays.entry(component).or_insert_with(|| {
            let token = Self::next_token(&self.next_array, TOKEN_ARRAY);
            let array = Arc::new(TypeDescriptor::new(
                token,
                component_type.namespace.clone(),
                format!("{}[]", component_type.name),
                TypeFlavor::Array { component },
                TypeFlags::PUBLIC | TypeFlags::FINAL,
                Some(TypeSignature::core(CoreType::Object)),
            ));
            trace!("created array type {}", array.fullname());
            self.insert(&array);
            token
        });

        self.resolve(&token)
    }

    /// Returns `true` if a value of type `source` can be used where `target` is expected.
    ///
    /// - A type is assignable to itself
    /// - Primitives are only assignable to themselves
    /// - Every reference type is assignable to `core.Object`
    /// - Arrays are covariant in their reference component types
    /// - Otherwise `target` must be reachable over the base and interface chain of `source`
    ///
    /// Unknown tokens are never assignable, except for the identity case.
    pub fn is_assignable_from(&self, target: Token, source: Token) -> bool {
        if target == source {
            return true;
        }

        let (Some(target_type), Some(source_type)) = (self.get(&target), self.get(&source)) else {
            return false;
        };

        if target_type.is_primitive() || source_type.is_primitive() {
            return false;
        }

        if target == CoreType::Object.token() {
            return true;
        }

        match (target_type.flavor, source_type.flavor) {
            (
                TypeFlavor::Array {
                    component: target_component,
                },
                TypeFlavor::Array {
                    component: source_component,
                },
            ) => {
                let both_reference = [target_component, source_component].iter().all(|token| {
                    self.get(token)
                        .is_some_and(|component| component.flavor.is_reference())
                });

                both_reference && self.is_assignable_from(target_component, source_component)
            }
            (_, TypeFlavor::Array { .. }) | (TypeFlavor::Array { .. }, _) => false,
            _ => self.is_supertype(target, &source_type),
        }
    }

    /// Breadth-first search for `target` over the supertypes of `source`
    fn is_supertype(&self, target: Token, source: &TypeRc) -> bool {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([(source.clone(), 0usize)]);

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= MAX_SUPERTYPE_DEPTH || !visited.insert(current.token) {
                continue;
            }

            for supertype in current.supertypes() {
                let Some(token) = supertype.raw_token() else {
                    continue;
                };
                if token == target {
                    return true;
                }
                if let Some(next) = self.get(&token) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        false
    }

    /// Count of types in the registry
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over all types in the registry
    pub fn iter(&self) -> crossbeam_skiplist::map::Iter<'_, Token, TypeRc> {
        self.types.iter()
    }

    /// Get all types in the registry
    pub fn all_types(&self) -> Vec<TypeRc> {
        self.types
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Get all user described types, without platform and array types
    pub fn user_types(&self) -> Vec<TypeRc> {
        self.types
            .iter()
            .filter(|entry| entry.key().kind() == TOKEN_TYPE)
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use strum::EnumCount;

    use super::*;

    #[test]
    fn test_platform_types_registered() {
        let registry = TypeRegistry::new();

        assert_eq!(registry.len(), PrimitiveKind::COUNT + CoreType::COUNT);
        assert!(registry.user_types().is_empty());

        let string = registry.get_by_fullname("core.String").unwrap();
        assert_eq!(string.token, CoreType::String.token());
        assert_eq!(
            string.base(),
            Some(&TypeSignature::core(CoreType::Object))
        );

        let int = registry.get_by_fullname("int").unwrap();
        assert!(int.is_primitive());
        assert!(int.base().is_none());

        let root = registry.root().unwrap();
        assert!(root.base().is_none());
        assert_eq!(root.methods.count(), 4);
    }

    #[test]
    fn test_assignable_references() {
        let registry = TypeRegistry::new();

        let object = CoreType::Object.token();
        let long = CoreType::Long.token();
        let number = CoreType::Number.token();
        let serializable = CoreType::Serializable.token();
        let comparable = CoreType::Comparable.token();
        let string = CoreType::String.token();

        assert!(registry.is_assignable_from(object, long));
        assert!(registry.is_assignable_from(number, long));
        assert!(registry.is_assignable_from(serializable, long));
        assert!(registry.is_assignable_from(comparable, string));
        assert!(registry.is_assignable_from(object, serializable));
        assert!(!registry.is_assignable_from(long, number));
        assert!(!registry.is_assignable_from(string, CoreType::Integer.token()));
        assert!(!registry.is_assignable_from(long, object));
    }

    #[test]
    fn test_assignable_primitives() {
        let registry = TypeRegistry::new();
        let int = PrimitiveKind::Int.token();
        let long = PrimitiveKind::Long.token();

        assert!(registry.is_assignable_from(int, int));
        assert!(!registry.is_assignable_from(long, int));
        assert!(!registry.is_assignable_from(CoreType::Object.token(), int));
        assert!(!registry.is_assignable_from(CoreType::Integer.token(), int));
    }

    #[test]
    fn test_assignable_collections() {
        let registry = TypeRegistry::new();

        assert!(registry.is_assignable_from(CoreType::List.token(), CoreType::ArrayList.token()));
        assert!(registry.is_assignable_from(
            CoreType::Collection.token(),
            CoreType::ArrayList.token()
        ));
        assert!(!registry.is_assignable_from(CoreType::ArrayList.token(), CoreType::List.token()));
    }

    #[test]
    fn test_array_types() {
        let registry = TypeRegistry::new();

        let strings = registry.array_of(CoreType::String.token()).unwrap();
        let again = registry.array_of(CoreType::String.token()).unwrap();
        assert_eq!(strings.token, again.token);
        assert_eq!(strings.fullname(), "core.String[]");
        assert_eq!(strings.component(), Some(CoreType::String.token()));

        let objects = registry.array_of(CoreType::Object.token()).unwrap();
        let ints = registry.array_of(PrimitiveKind::Int.token()).unwrap();
        let longs = registry.array_of(PrimitiveKind::Long.token()).unwrap();
        assert_eq!(ints.fullname(), "int[]");

        assert!(registry.is_assignable_from(objects.token, strings.token));
        assert!(!registry.is_assignable_from(strings.token, objects.token));
        assert!(!registry.is_assignable_from(longs.token, ints.token));
        assert!(registry.is_assignable_from(CoreType::Object.token(), ints.token));
        assert!(!registry.is_assignable_from(CoreType::String.token(), strings.token));
    }

    #[test]
    fn test_array_of_unknown_component() {
        let registry = TypeRegistry::new();
        let missing = Token::from_parts(TOKEN_TYPE, 0x999);

        assert!(matches!(
            registry.array_of(missing),
            Err(Error::TypeNotFound(token)) if token == missing
        ));
    }

    #[test]
    fn test_token_allocation() {
        let registry = TypeRegistry::new();

        let first = registry.next_type_token();
        let second = registry.next_type_token();
        assert_eq!(first.kind(), TOKEN_TYPE);
        assert_eq!(second.row(), first.row() + 1);
        assert_eq!(registry.next_field_token().kind(), TOKEN_FIELD);
        assert_eq!(registry.next_method_token().kind(), TOKEN_METHOD);
    }
}
