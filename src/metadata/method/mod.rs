//! Method and constructor descriptors.
//!
//! A [`Method`] is a declared operation of a type: name, parameter and return signatures,
//! access and modifier flags, and optionally an executable body. Bodies are plain closures
//! over an [`Instance`], which is all the reflection layer needs to invoke getters and setters.
//!
//! # Key Types
//! - [`Method`] / [`MethodRc`]: a declared method
//! - [`Constructor`] / [`ConstructorRc`]: a declared constructor
//! - [`MethodBody`]: the executable part of either

mod types;

use std::{fmt, sync::Arc};

pub use types::*;

use crate::{
    metadata::{
        token::Token,
        typesystem::TypeSignature,
        value::{Instance, InstanceRc, Value},
    },
    Error, Result,
};

/// Executable body of a method or constructor, receives the target and the arguments
pub type MethodBody = Arc<dyn Fn(&Instance, &[Value]) -> Result<Value> + Send + Sync>;
/// Reference to a `Method`
pub type MethodRc = Arc<Method>;
/// A vector that holds a list of `Method`
pub type MethodList = Arc<boxcar::Vec<MethodRc>>;
/// Reference to a `Constructor`
pub type ConstructorRc = Arc<Constructor>;
/// A vector that holds a list of `Constructor`
pub type ConstructorList = Arc<boxcar::Vec<ConstructorRc>>;

/// A method declared by a type
pub struct Method {
    /// Token
    pub token: Token,
    /// Name of the method
    pub name: String,
    /// The type that declares this method
    pub declaring: Token,
    /// Parameter signatures, in declaration order
    pub params: Vec<TypeSignature>,
    /// Return signature, `void` for methods without a result
    pub return_type: TypeSignature,
    /// Access flags
    pub access: MemberAccessFlags,
    /// Modifier flags
    pub modifiers: MethodModifiers,
    /// Executable body, methods without one return [`Value::Null`]
    pub body: Option<MethodBody>,
}

impl Method {
    /// Number of declared parameters
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` for compiler generated bridge methods
    #[must_use]
    pub fn is_bridge(&self) -> bool {
        self.modifiers.contains(MethodModifiers::BRIDGE)
    }

    /// Returns `true` for static methods
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MethodModifiers::STATIC)
    }

    /// Invoke this method on `target`.
    ///
    /// Access flags are not checked here, that is up to the caller.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `args` does not match the declared arity, or
    /// whatever the body reports.
    pub fn invoke(&self, target: &Instance, args: &[Value]) -> Result<Value> {
        if args.len() != self.params.len() {
            return Err(Error::InvalidArgument {
                member: self.name.clone(),
                expected: self.params.len(),
                actual: args.len(),
            });
        }

        match &self.body {
            Some(body) => body(target, args),
            None => Ok(Value::Null),
        }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("declaring", &self.declaring)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .field("access", &self.access)
            .field("modifiers", &self.modifiers)
            .field("body", &self.body.is_some())
            .finish()
    }
}

/// A constructor declared by a type
pub struct Constructor {
    /// Token
    pub token: Token,
    /// The type that declares (and is created by) this constructor
    pub declaring: Token,
    /// Parameter signatures, in declaration order
    pub params: Vec<TypeSignature>,
    /// Access flags
    pub access: MemberAccessFlags,
    /// Initializer run on the freshly created instance
    pub body: Option<MethodBody>,
}

impl Constructor {
    /// Returns `true` for constructors without parameters
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.params.is_empty()
    }

    /// Create a new instance of the declaring type and run the initializer on it.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] on an arity mismatch, or whatever the initializer
    /// reports.
    pub fn invoke(&self, args: &[Value]) -> Result<InstanceRc> {
        if args.len() != self.params.len() {
            return Err(Error::InvalidArgument {
                member: "<init>".to_string(),
                expected: self.params.len(),
                actual: args.len(),
            });
        }

        let instance = Instance::new(self.declaring);
        if let Some(body) = &self.body {
            body(&instance, args)?;
        }
        Ok(instance)
    }

    /// Create a new instance through a parameterless constructor.
    ///
    /// # Errors
    /// See [`Constructor::invoke`].
    pub fn new_instance(&self) -> Result<InstanceRc> {
        self.invoke(&[])
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("token", &self.token)
            .field("declaring", &self.declaring)
            .field("params", &self.params)
            .field("access", &self.access)
            .field("body", &self.body.is_some())
            .finish()
    }
}
