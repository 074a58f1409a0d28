//! The immutable per-type property index.
//!
//! A [`PropertyIndex`] is the result of introspecting one type. It maps every readable and
//! writable property name to the accessor that was selected for it, exposes the resolved
//! property types, and answers case-insensitive name lookups. Once built it never changes, so
//! it can be shared between threads without synchronization.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    metadata::{method::ConstructorRc, token::Token, typesystem::TypeRc},
    reflection::accessor::{ReadAccessor, WriteAccessor},
    Error, PropertyAccess, Result,
};

/// Accessors collected while a [`PropertyIndex`] is being built
#[derive(Default)]
pub(crate) struct PropertyTable {
    getters: IndexMap<String, ReadAccessor>,
    setters: IndexMap<String, WriteAccessor>,
}

impl PropertyTable {
    /// Returns `false` for names that never become properties: `$` prefixed synthetic names,
    /// `serialVersionUID` and `class`
    pub(crate) fn is_valid_name(name: &str) -> bool {
        !(name.starts_with('$') || name == "serialVersionUID" || name == "class")
    }

    pub(crate) fn add_getter(&mut self, name: &str, accessor: ReadAccessor) {
        if Self::is_valid_name(name) {
            self.getters.insert(name.to_string(), accessor);
        }
    }

    pub(crate) fn add_setter(&mut self, name: &str, accessor: WriteAccessor) {
        if Self::is_valid_name(name) {
            self.setters.insert(name.to_string(), accessor);
        }
    }

    pub(crate) fn has_getter(&self, name: &str) -> bool {
        self.getters.contains_key(name)
    }

    pub(crate) fn has_setter(&self, name: &str) -> bool {
        self.setters.contains_key(name)
    }

    /// The resolved type of the getter registered for `name`
    pub(crate) fn getter_type(&self, name: &str) -> Option<Token> {
        self.getters
            .get(name)
            .map(|accessor| accessor.property_type().token)
    }

    #[cfg(test)]
    pub(crate) fn getters(&self) -> impl Iterator<Item = (&str, &ReadAccessor)> {
        self.getters.iter().map(|(name, accessor)| (name.as_str(), accessor))
    }

    #[cfg(test)]
    pub(crate) fn setters(&self) -> impl Iterator<Item = (&str, &WriteAccessor)> {
        self.setters.iter().map(|(name, accessor)| (name.as_str(), accessor))
    }
}

/// Everything known about the properties of one type
///
/// # Examples
///
/// ```rust
/// use beanscope::prelude::*;
///
/// let registry = TypeRegistry::new();
/// let ty = TypeBuilder::class(&registry, "app", "Account")
///     .field(FieldBuilder::new("owner", TypeSignature::core(CoreType::String)))
///     .method(
///         MethodBuilder::new("getOwner")
///             .returns(TypeSignature::core(CoreType::String))
///             .reads_field("owner"),
///     )
///     .default_constructor()
///     .build();
///
/// let index = Reflector::build(&registry, &ty)?;
/// assert_eq!(index.find_property_name("OWNER"), Some("owner"));
///
/// let account = index.default_constructor()?.new_instance()?;
/// index.set_accessor("owner")?.write(&account, Value::from("ada"))?;
/// assert_eq!(index.get_accessor("owner")?.read(&account)?, Value::from("ada"));
/// # Ok::<(), beanscope::Error>(())
/// ```
#[derive(Debug)]
pub struct PropertyIndex {
    type_token: Token,
    type_name: String,
    default_constructor: Option<ConstructorRc>,
    getters: IndexMap<String, ReadAccessor>,
    setters: IndexMap<String, WriteAccessor>,
    readable_names: Vec<String>,
    writable_names: Vec<String>,
    case_insensitive: HashMap<String, String>,
}

impl PropertyIndex {
    pub(crate) fn new(
        ty: &TypeRc,
        default_constructor: Option<ConstructorRc>,
        table: PropertyTable,
    ) -> Self {
        let readable_names: Vec<String> = table.getters.keys().cloned().collect();
        let writable_names: Vec<String> = table.setters.keys().cloned().collect();

        let mut case_insensitive = HashMap::new();
        for name in readable_names.iter().chain(writable_names.iter()) {
            case_insensitive.insert(name.to_uppercase(), name.clone());
        }

        PropertyIndex {
            type_token: ty.token,
            type_name: ty.fullname(),
            default_constructor,
            getters: table.getters,
            setters: table.setters,
            readable_names,
            writable_names,
            case_insensitive,
        }
    }

    fn not_found(&self, property: &str, access: PropertyAccess) -> Error {
        Error::PropertyNotFound {
            property: property.to_string(),
            type_name: self.type_name.clone(),
            access,
        }
    }

    /// Token of the reflected type
    #[must_use]
    pub fn type_token(&self) -> Token {
        self.type_token
    }

    /// Full name of the reflected type
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns `true` if `name` can be read
    #[must_use]
    pub fn has_getter(&self, name: &str) -> bool {
        self.getters.contains_key(name)
    }

    /// Returns `true` if `name` can be written
    #[must_use]
    pub fn has_setter(&self, name: &str) -> bool {
        self.setters.contains_key(name)
    }

    /// The resolved type a property is read as
    ///
    /// # Errors
    /// Returns [`Error::PropertyNotFound`] if `name` is not readable.
    pub fn getter_type(&self, name: &str) -> Result<&TypeRc> {
        self.getters
            .get(name)
            .map(ReadAccessor::property_type)
            .ok_or_else(|| self.not_found(name, PropertyAccess::Getter))
    }

    /// The resolved type a property is written as
    ///
    /// # Errors
    /// Returns [`Error::PropertyNotFound`] if `name` is not writable.
    pub fn setter_type(&self, name: &str) -> Result<&TypeRc> {
        self.setters
            .get(name)
            .map(WriteAccessor::property_type)
            .ok_or_else(|| self.not_found(name, PropertyAccess::Setter))
    }

    /// The accessor that reads `name`
    ///
    /// # Errors
    /// Returns [`Error::PropertyNotFound`] if `name` is not readable.
    pub fn get_accessor(&self, name: &str) -> Result<&ReadAccessor> {
        self.getters
            .get(name)
            .ok_or_else(|| self.not_found(name, PropertyAccess::Getter))
    }

    /// The accessor that writes `name`
    ///
    /// # Errors
    /// Returns [`Error::PropertyNotFound`] if `name` is not writable.
    pub fn set_accessor(&self, name: &str) -> Result<&WriteAccessor> {
        self.setters
            .get(name)
            .ok_or_else(|| self.not_found(name, PropertyAccess::Setter))
    }

    /// Readable property names, in resolution order
    #[must_use]
    pub fn readable_names(&self) -> &[String] {
        &self.readable_names
    }

    /// Writable property names, in resolution order
    #[must_use]
    pub fn writable_names(&self) -> &[String] {
        &self.writable_names
    }

    /// The declared spelling of a property name given in any case
    #[must_use]
    pub fn find_property_name(&self, name: &str) -> Option<&str> {
        self.case_insensitive
            .get(&name.to_uppercase())
            .map(String::as_str)
    }

    /// The zero-argument constructor of the reflected type
    ///
    /// # Errors
    /// Returns [`Error::NoDefaultConstructor`] if the type declares none.
    pub fn default_constructor(&self) -> Result<&ConstructorRc> {
        self.default_constructor
            .as_ref()
            .ok_or_else(|| Error::NoDefaultConstructor(self.type_name.clone()))
    }

    /// Returns `true` if the reflected type declares a zero-argument constructor
    #[must_use]
    pub fn has_default_constructor(&self) -> bool {
        self.default_constructor.is_some()
    }

    /// Readable properties with their resolved types
    pub fn getter_types(&self) -> impl Iterator<Item = (&str, &TypeRc)> {
        self.getters
            .iter()
            .map(|(name, accessor)| (name.as_str(), accessor.property_type()))
    }

    /// Writable properties with their resolved types
    pub fn setter_types(&self) -> impl Iterator<Item = (&str, &TypeRc)> {
        self.setters
            .iter()
            .map(|(name, accessor)| (name.as_str(), accessor.property_type()))
    }

    /// Number of distinct property names, readable or writable
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.case_insensitive.len()
    }
}
