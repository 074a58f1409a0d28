//! Declared (possibly generic) type expressions.
//!
//! A [`TypeSignature`] is how members and supertypes spell the type they refer to. It is the
//! unresolved form: type variables stay symbolic until a [`crate::metadata::typesystem::TypeResolver`]
//! binds them against a concrete reflected type.

use std::fmt;

use crate::metadata::{
    token::Token,
    typesystem::primitives::{CoreType, PrimitiveKind},
};

/// A type as written in a declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    /// A plain, non-generic type (or the raw use of a generic one)
    Class(Token),
    /// A generic type with actual arguments, e.g. `List<T>` or `Entity<Long>`
    Generic {
        /// The generic type definition
        raw: Token,
        /// The actual type arguments, in declaration order
        args: Vec<TypeSignature>,
    },
    /// An array whose component is itself a signature, e.g. `T[]`
    Array(Box<TypeSignature>),
    /// A reference to a type variable declared on the enclosing type
    Var(String),
    /// A wildcard argument, `?`, `? extends X` or `? super X`
    Wildcard {
        /// Upper bounds (`extends`)
        upper: Vec<TypeSignature>,
        /// Lower bounds (`super`)
        lower: Vec<TypeSignature>,
    },
}

impl TypeSignature {
    /// A plain type reference
    #[must_use]
    pub fn class(token: Token) -> Self {
        TypeSignature::Class(token)
    }

    /// A generic instantiation
    #[must_use]
    pub fn generic(raw: Token, args: Vec<TypeSignature>) -> Self {
        TypeSignature::Generic { raw, args }
    }

    /// An array of `component`
    #[must_use]
    pub fn array(component: TypeSignature) -> Self {
        TypeSignature::Array(Box::new(component))
    }

    /// A type variable reference
    #[must_use]
    pub fn var(name: &str) -> Self {
        TypeSignature::Var(name.to_string())
    }

    /// The unbounded wildcard `?`
    #[must_use]
    pub fn wildcard() -> Self {
        TypeSignature::Wildcard {
            upper: Vec::new(),
            lower: Vec::new(),
        }
    }

    /// A primitive type
    #[must_use]
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeSignature::Class(kind.token())
    }

    /// A built-in reference type
    #[must_use]
    pub fn core(core: CoreType) -> Self {
        TypeSignature::Class(core.token())
    }

    /// The `void` return type
    #[must_use]
    pub fn void() -> Self {
        TypeSignature::primitive(PrimitiveKind::Void)
    }

    /// The token of the named type, `None` for variables, wildcards and arrays
    #[must_use]
    pub fn raw_token(&self) -> Option<Token> {
        match self {
            TypeSignature::Class(token) | TypeSignature::Generic { raw: token, .. } => Some(*token),
            _ => None,
        }
    }

    /// The actual type arguments, empty unless this is [`TypeSignature::Generic`]
    #[must_use]
    pub fn type_args(&self) -> &[TypeSignature] {
        match self {
            TypeSignature::Generic { args, .. } => args,
            _ => &[],
        }
    }

    /// Returns `true` if the signature mentions a type variable anywhere
    #[must_use]
    pub fn has_vars(&self) -> bool {
        match self {
            TypeSignature::Class(_) => false,
            TypeSignature::Var(_) => true,
            TypeSignature::Generic { args, .. } => args.iter().any(TypeSignature::has_vars),
            TypeSignature::Array(component) => component.has_vars(),
            TypeSignature::Wildcard { upper, lower } => {
                upper.iter().chain(lower.iter()).any(TypeSignature::has_vars)
            }
        }
    }

    /// Replace every variable in `names` by the signature at the same position in `args`.
    ///
    /// Variables without a counterpart are left untouched.
    #[must_use]
    pub fn substitute(&self, names: &[String], args: &[TypeSignature]) -> TypeSignature {
        match self {
            TypeSignature::Class(_) => self.clone(),
            TypeSignature::Var(name) => names
                .iter()
                .position(|candidate| candidate == name)
                .and_then(|index| args.get(index))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeSignature::Generic { raw, args: inner } => TypeSignature::Generic {
                raw: *raw,
                args: inner
                    .iter()
                    .map(|arg| arg.substitute(names, args))
                    .collect(),
            },
            TypeSignature::Array(component) => {
                TypeSignature::Array(Box::new(component.substitute(names, args)))
            }
            TypeSignature::Wildcard { upper, lower } => TypeSignature::Wildcard {
                upper: upper.iter().map(|b| b.substitute(names, args)).collect(),
                lower: lower.iter().map(|b| b.substitute(names, args)).collect(),
            },
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSignature::Class(token) => write!(f, "{token}"),
            TypeSignature::Generic { raw, args } => {
                write!(f, "{raw}<")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            }
            TypeSignature::Array(component) => write!(f, "{component}[]"),
            TypeSignature::Var(name) => write!(f, "{name}"),
            TypeSignature::Wildcard { upper, lower } => {
                write!(f, "?")?;
                if let Some(bound) = upper.first() {
                    write!(f, " extends {bound}")?;
                }
                if let Some(bound) = lower.first() {
                    write!(f, " super {bound}")?;
                }
                Ok(())
            }
        }
    }
}
