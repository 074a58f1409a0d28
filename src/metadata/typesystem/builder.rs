//! Builder for user type descriptions.
//!
//! This module provides the [`TypeBuilder`] struct, which offers a fluent API for describing
//! classes and interfaces with their supertypes, generic parameters, fields, methods and
//! constructors, and for registering them in a [`TypeRegistry`].
//!
//! The token of the new type is allocated up front ([`TypeBuilder::token`]), so a type can
//! refer to itself in its own signatures. The descriptor itself is only registered by
//! [`TypeBuilder::build`].
//!
//! Method bodies may be bound to fields by name ([`MethodBuilder::reads_field`],
//! [`MethodBuilder::writes_field`]). The field is looked up on the new type first and then
//! along its base classes, which therefore have to be built before their subclasses.
//!
//! # Example
//!
//! ```rust
//! use beanscope::metadata::typesystem::{
//!     CoreType, FieldBuilder, MethodBuilder, TypeBuilder, TypeRegistry, TypeSignature,
//! };
//!
//! let registry = TypeRegistry::new();
//! let person = TypeBuilder::class(&registry, "app", "Person")
//!     .field(FieldBuilder::new("name", TypeSignature::core(CoreType::String)))
//!     .method(
//!         MethodBuilder::new("getName")
//!             .returns(TypeSignature::core(CoreType::String))
//!             .reads_field("name"),
//!     )
//!     .default_constructor()
//!     .build();
//!
//! assert_eq!(person.methods.count(), 1);
//! assert!(person.default_constructor().is_some());
//! ```

use std::sync::Arc;

use log::{debug, warn};

use crate::metadata::{
    field::{Field, FieldModifiers, FieldRc},
    method::{Constructor, MemberAccessFlags, Method, MethodBody, MethodModifiers},
    token::Token,
    typesystem::{
        CoreType, GenericParam, TypeDescriptor, TypeFlags, TypeFlavor, TypeRc, TypeRegistry,
        TypeSignature,
    },
    value::{Instance, Value},
};

/// Upper bound for the base class walk when binding bodies to fields
const MAX_FIELD_LOOKUP_DEPTH: usize = 64;

/// Describes a field for [`TypeBuilder::field`]
pub struct FieldBuilder {
    name: String,
    signature: TypeSignature,
    access: MemberAccessFlags,
    modifiers: FieldModifiers,
    initial: Option<Value>,
}

impl FieldBuilder {
    /// A private instance field
    #[must_use]
    pub fn new(name: &str, signature: TypeSignature) -> Self {
        FieldBuilder {
            name: name.to_string(),
            signature,
            access: MemberAccessFlags::PRIVATE,
            modifiers: FieldModifiers::empty(),
            initial: None,
        }
    }

    /// Make the field public
    #[must_use]
    pub fn public(mut self) -> Self {
        self.access = MemberAccessFlags::PUBLIC;
        self
    }

    /// Make the field protected
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.access = MemberAccessFlags::PROTECTED;
        self
    }

    /// Make the field package visible
    #[must_use]
    pub fn package(mut self) -> Self {
        self.access = MemberAccessFlags::PACKAGE;
        self
    }

    /// Mark the field as static
    #[must_use]
    pub fn static_field(mut self) -> Self {
        self.modifiers |= FieldModifiers::STATIC;
        self
    }

    /// Mark the field as final
    #[must_use]
    pub fn final_field(mut self) -> Self {
        self.modifiers |= FieldModifiers::FINAL;
        self
    }

    /// Value of the field before it is first written
    #[must_use]
    pub fn initial(mut self, value: Value) -> Self {
        self.initial = Some(value);
        self
    }
}

/// How a described method behaves when invoked
enum BodySpec {
    None,
    ReadField(String),
    WriteField(String),
    Returns(Value),
    Custom(MethodBody),
}

/// Describes a method for [`TypeBuilder::method`]
pub struct MethodBuilder {
    name: String,
    params: Vec<TypeSignature>,
    return_type: TypeSignature,
    access: MemberAccessFlags,
    modifiers: MethodModifiers,
    body: BodySpec,
}

impl MethodBuilder {
    /// A public `void` method without parameters and without a body
    #[must_use]
    pub fn new(name: &str) -> Self {
        MethodBuilder {
            name: name.to_string(),
            params: Vec::new(),
            return_type: TypeSignature::void(),
            access: MemberAccessFlags::PUBLIC,
            modifiers: MethodModifiers::empty(),
            body: BodySpec::None,
        }
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, signature: TypeSignature) -> Self {
        self.return_type = signature;
        self
    }

    /// Append a parameter
    #[must_use]
    pub fn param(mut self, signature: TypeSignature) -> Self {
        self.params.push(signature);
        self
    }

    /// Make the method private
    #[must_use]
    pub fn private(mut self) -> Self {
        self.access = MemberAccessFlags::PRIVATE;
        self
    }

    /// Make the method protected
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.access = MemberAccessFlags::PROTECTED;
        self
    }

    /// Make the method package visible
    #[must_use]
    pub fn package(mut self) -> Self {
        self.access = MemberAccessFlags::PACKAGE;
        self
    }

    /// Mark the method as static
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.modifiers |= MethodModifiers::STATIC;
        self
    }

    /// Mark the method as abstract
    #[must_use]
    pub fn abstract_method(mut self) -> Self {
        self.modifiers |= MethodModifiers::ABSTRACT;
        self
    }

    /// Mark the method as a compiler generated bridge
    #[must_use]
    pub fn bridge(mut self) -> Self {
        self.modifiers |= MethodModifiers::BRIDGE | MethodModifiers::SYNTHETIC;
        self
    }

    /// The method returns the value of the named field
    #[must_use]
    pub fn reads_field(mut self, field: &str) -> Self {
        self.body = BodySpec::ReadField(field.to_string());
        self
    }

    /// The method stores its first argument into the named field
    #[must_use]
    pub fn writes_field(mut self, field: &str) -> Self {
        self.body = BodySpec::WriteField(field.to_string());
        self
    }

    /// The method always returns `value`
    #[must_use]
    pub fn returns_value(mut self, value: Value) -> Self {
        self.body = BodySpec::Returns(value);
        self
    }

    /// Use a custom body
    #[must_use]
    pub fn body(mut self, body: MethodBody) -> Self {
        self.body = BodySpec::Custom(body);
        self
    }
}

/// Provides a fluent API for describing a class or interface
pub struct TypeBuilder<'a> {
    registry: &'a TypeRegistry,
    token: Token,
    namespace: String,
    name: String,
    flavor: TypeFlavor,
    flags: TypeFlags,
    base: Option<TypeSignature>,
    interfaces: Vec<TypeSignature>,
    generic_params: Vec<GenericParam>,
    fields: Vec<FieldBuilder>,
    methods: Vec<MethodBuilder>,
    constructors: Vec<(MemberAccessFlags, Vec<TypeSignature>, Option<MethodBody>)>,
}

impl<'a> TypeBuilder<'a> {
    fn start(registry: &'a TypeRegistry, namespace: &str, name: &str, flavor: TypeFlavor) -> Self {
        TypeBuilder {
            registry,
            token: registry.next_type_token(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            flavor,
            flags: TypeFlags::PUBLIC,
            base: None,
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Start describing a class
    ///
    /// ## Arguments
    /// * 'registry'  - The registry the type is registered in
    /// * 'namespace' - Namespace of the class
    /// * 'name'      - Simple name of the class
    #[must_use]
    pub fn class(registry: &'a TypeRegistry, namespace: &str, name: &str) -> Self {
        Self::start(registry, namespace, name, TypeFlavor::Class)
    }

    /// Start describing an interface
    ///
    /// ## Arguments
    /// * 'registry'  - The registry the type is registered in
    /// * 'namespace' - Namespace of the interface
    /// * 'name'      - Simple name of the interface
    #[must_use]
    pub fn interface(registry: &'a TypeRegistry, namespace: &str, name: &str) -> Self {
        let mut builder = Self::start(registry, namespace, name, TypeFlavor::Interface);
        builder.flags |= TypeFlags::ABSTRACT;
        builder
    }

    /// The token the type will be registered with
    #[must_use]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Mark the class as abstract
    #[must_use]
    pub fn abstract_type(mut self) -> Self {
        self.flags |= TypeFlags::ABSTRACT;
        self
    }

    /// Mark the class as final
    #[must_use]
    pub fn final_type(mut self) -> Self {
        self.flags |= TypeFlags::FINAL;
        self
    }

    /// Set the base class, classes without one extend `core.Object`
    #[must_use]
    pub fn extends(mut self, base: TypeSignature) -> Self {
        self.base = Some(base);
        self
    }

    /// Add an implemented interface (or a super-interface, for interfaces)
    #[must_use]
    pub fn implements(mut self, interface: TypeSignature) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Declare a type variable
    ///
    /// ## Arguments
    /// * 'name'   - Name of the variable
    /// * 'bounds' - Upper bounds, may be empty
    #[must_use]
    pub fn generic_param(mut self, name: &str, bounds: Vec<TypeSignature>) -> Self {
        self.generic_params.push(GenericParam::bounded(name, bounds));
        self
    }

    /// Declare a field
    #[must_use]
    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a method
    #[must_use]
    pub fn method(mut self, method: MethodBuilder) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare a public constructor without parameters
    #[must_use]
    pub fn default_constructor(self) -> Self {
        self.constructor(MemberAccessFlags::PUBLIC, Vec::new(), None)
    }

    /// Declare a constructor
    ///
    /// ## Arguments
    /// * 'access'      - Visibility of the constructor
    /// * 'params'      - Parameter signatures
    /// * 'initializer' - Body run on the new instance
    #[must_use]
    pub fn constructor(
        mut self,
        access: MemberAccessFlags,
        params: Vec<TypeSignature>,
        initializer: Option<MethodBody>,
    ) -> Self {
        self.constructors.push((access, params, initializer));
        self
    }

    /// Create the descriptor and register it
    pub fn build(self) -> TypeRc {
        let base = match (self.base, self.flavor) {
            (Some(base), _) => Some(base),
            (None, TypeFlavor::Class) => Some(TypeSignature::core(CoreType::Object)),
            (None, _) => None,
        };

        let new_type = Arc::new(TypeDescriptor::new(
            self.token,
            self.namespace,
            self.name,
            self.flavor,
            self.flags,
            base,
        ));

        for param in self.generic_params {
            new_type.generic_params.push(param);
        }
        for interface in self.interfaces {
            new_type.interfaces.push(interface);
        }

        for field in self.fields {
            new_type.fields.push(Arc::new(Field::new(
                self.registry.next_field_token(),
                field.name,
                new_type.token,
                field.signature,
                field.access,
                field.modifiers,
                field.initial,
            )));
        }

        for method in self.methods {
            let body = match method.body {
                BodySpec::None => None,
                BodySpec::ReadField(name) => {
                    Self::bound_field(self.registry, &new_type, &name).map(|f| Field::reader(&f))
                }
                BodySpec::WriteField(name) => {
                    Self::bound_field(self.registry, &new_type, &name).map(|f| Field::writer(&f))
                }
                BodySpec::Returns(value) => {
                    let body: MethodBody = Arc::new(move |_: &Instance, _: &[Value]| Ok(value.clone()));
                    Some(body)
                }
                BodySpec::Custom(body) => Some(body),
            };

            new_type.methods.push(Arc::new(Method {
                token: self.registry.next_method_token(),
                name: method.name,
                declaring: new_type.token,
                params: method.params,
                return_type: method.return_type,
                access: method.access,
                modifiers: method.modifiers,
                body,
            }));
        }

        for (access, params, body) in self.constructors {
            new_type.constructors.push(Arc::new(Constructor {
                token: self.registry.next_method_token(),
                declaring: new_type.token,
                params,
                access,
                body,
            }));
        }

        debug!(
            "described {} with {} field(s) and {} method(s)",
            new_type.fullname(),
            new_type.fields.count(),
            new_type.methods.count()
        );

        self.registry.insert(&new_type);
        new_type
    }

    /// Find the field a method body is bound to, on `start` or one of its base classes
    fn bound_field(registry: &TypeRegistry, start: &TypeRc, name: &str) -> Option<FieldRc> {
        let mut current = start.clone();
        for _ in 0..MAX_FIELD_LOOKUP_DEPTH {
            if let Some(field) = current
                .fields
                .iter()
                .map(|(_, field)| field)
                .find(|field| field.name == name)
            {
                return Some(field.clone());
            }

            match current
                .base()
                .and_then(TypeSignature::raw_token)
                .and_then(|token| registry.get(&token))
            {
                Some(base) => current = base,
                None => break,
            }
        }

        warn!(
            "{}: no field '{}' to bind a method body to",
            start.fullname(),
            name
        );
        None
    }
}
