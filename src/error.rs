use std::fmt;

use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The direction a property is accessed in.
///
/// Used by [`Error::PropertyNotFound`] to report whether a reader or a writer was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyAccess {
    /// Read access through a getter method or a field
    Getter,
    /// Write access through a setter method or a field
    Setter,
}

impl fmt::Display for PropertyAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyAccess::Getter => write!(f, "getter"),
            PropertyAccess::Setter => write!(f, "setter"),
        }
    }
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Type Shape Errors
/// Raised while a [`crate::reflection::PropertyIndex`] is built. They describe a defect in the
/// shape of the introspected type and are never transient, so retrying is pointless.
/// - [`Error::AmbiguousGetter`] - Two getters for one property with unrelated return types
/// - [`Error::AmbiguousSetter`] - Two setters for one property with unrelated parameter types
/// - [`Error::RecursionLimit`] - The supertype chain is deeper than configured (or cyclic)
///
/// ## Query Errors
/// Raised when a built index is asked for something it does not have.
/// - [`Error::PropertyNotFound`] - No reader/writer was resolved for the name
/// - [`Error::NoDefaultConstructor`] - The type declares no zero-argument constructor
///
/// ## Invocation Errors
/// Raised by accessors and constructors when they touch an [`crate::metadata::value::Instance`].
/// - [`Error::AccessDenied`] - Non-public member while access checks cannot be suppressed
/// - [`Error::InvalidArgument`] - Wrong number of arguments for a member
/// - [`Error::Invocation`] - A member body reported a failure
///
/// ## Type System Errors
/// - [`Error::TypeNotFound`] - A token does not resolve in the registry
/// - [`Error::InvalidPropertyMethod`] - A method name does not follow the accessor convention
/// - [`Error::LockError`] - A static field slot was poisoned
/// - [`Error::Malformed`] - Internal inconsistency of the type description
///
/// # Examples
///
/// ```rust
/// use beanscope::{Error, prelude::*};
///
/// let registry = TypeRegistry::new();
/// let ty = TypeBuilder::class(&registry, "app", "Empty").build();
/// let index = Reflector::build(&registry, &ty)?;
///
/// match index.getter_type("missing") {
///     Err(Error::PropertyNotFound { property, .. }) => assert_eq!(property, "missing"),
///     _ => unreachable!(),
/// }
/// # Ok::<(), beanscope::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Two or more getter candidates for one property have return types that are not related
    /// by subtyping (or are equal and not boolean).
    ///
    /// # Fields
    ///
    /// * `property` - The property the getters map to
    /// * `type_name` - The type that declares the conflicting getter
    /// * `first` - Return type of the current winner
    /// * `second` - Return type of the rejected candidate
    #[error("Illegal overloaded getter method with ambiguous type for property '{property}' in type '{type_name}' ('{first}' vs '{second}')")]
    AmbiguousGetter {
        /// Property name
        property: String,
        /// Declaring type of the conflicting method
        type_name: String,
        /// First conflicting type
        first: String,
        /// Second conflicting type
        second: String,
    },

    /// Setter candidates for one property have unrelated parameter types and no candidate
    /// matches the resolved getter type exactly.
    #[error("Ambiguous setters defined for property '{property}' in type '{type_name}' with types '{first}' and '{second}'")]
    AmbiguousSetter {
        /// Property name
        property: String,
        /// Declaring type of the conflicting method
        type_name: String,
        /// First conflicting type
        first: String,
        /// Second conflicting type
        second: String,
    },

    /// The requested property has no resolved reader or writer.
    #[error("There is no {access} for property named '{property}' in '{type_name}'")]
    PropertyNotFound {
        /// Property name that was requested
        property: String,
        /// The introspected type
        type_name: String,
        /// Which direction was requested
        access: PropertyAccess,
    },

    /// The default constructor was requested, but the type does not declare one.
    ///
    /// Absence alone is not an error while the index is built.
    #[error("There is no default constructor for '{0}'")]
    NoDefaultConstructor(String),

    /// A non-public member was invoked while access checks may not be suppressed.
    #[error("Member '{member}' of '{type_name}' is not accessible")]
    AccessDenied {
        /// Member name
        member: String,
        /// Declaring type
        type_name: String,
    },

    /// A member was invoked with the wrong number of arguments.
    #[error("Member '{member}' expects {expected} argument(s), got {actual}")]
    InvalidArgument {
        /// Member name
        member: String,
        /// Declared arity
        expected: usize,
        /// Supplied arity
        actual: usize,
    },

    /// A member body failed.
    #[error("{0}")]
    Invocation(String),

    /// The method name does not start with `get`, `set` or `is`.
    #[error("Error parsing property name '{0}'. Didn't start with 'is', 'get' or 'set'.")]
    InvalidPropertyMethod(String),

    /// Failed to lock a shared slot, a writer panicked while holding it.
    #[error("Failed to lock target")]
    LockError,

    /// Failed to find type in the `TypeRegistry`.
    ///
    /// The associated [`Token`] identifies which type was not found.
    #[error("Failed to find type in TypeRegistry - {0}")]
    TypeNotFound(Token),

    /// Recursion limit reached.
    ///
    /// Hierarchy walks are bounded to protect against cyclic or pathological supertype
    /// declarations. The associated value shows the limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// The type description is internally inconsistent.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}
