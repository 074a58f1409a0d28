//! Generic type resolution.
//!
//! Member signatures are written in the context of the type that declares them. When a
//! subclass is introspected, the type variables of its ancestors have to be bound to the
//! arguments the subclass (or one of its intermediate ancestors) supplied. The
//! [`TypeResolver`] provides three views of a signature:
//!
//! - [`TypeResolver::erase`] - context free, a variable becomes its first bound (or the root)
//! - [`TypeResolver::resolve`] - variables bound as seen from a concrete reflected type
//! - [`TypeResolver::to_concrete`] - a resolved signature turned into a registered type
//!
//! # Examples
//!
//! ```rust
//! use beanscope::metadata::typesystem::{
//!     CoreType, MethodBuilder, TypeBuilder, TypeRegistry, TypeResolver, TypeSignature,
//! };
//!
//! let registry = TypeRegistry::new();
//! let holder = TypeBuilder::class(&registry, "app", "Holder")
//!     .generic_param("T", Vec::new())
//!     .method(MethodBuilder::new("getValue").returns(TypeSignature::var("T")))
//!     .build();
//! let names = TypeBuilder::class(&registry, "app", "Names")
//!     .extends(TypeSignature::generic(
//!         holder.token,
//!         vec![TypeSignature::core(CoreType::String)],
//!     ))
//!     .build();
//!
//! let resolver = TypeResolver::new(&registry);
//! let get_value = holder.methods.get(0).unwrap();
//! let resolved = resolver.return_type(get_value, &names)?;
//! assert_eq!(resolved.token, CoreType::String.token());
//! # Ok::<(), beanscope::Error>(())
//! ```

use crate::{
    metadata::{
        field::Field,
        method::Method,
        token::Token,
        typesystem::{CoreType, TypeDescriptor, TypeRc, TypeRegistry, TypeSignature},
    },
    Error, Result,
};

/// Default bound for the supertype walks of a resolver
pub const MAX_RESOLUTION_DEPTH: usize = 64;

/// Binds generic signatures against concrete types
pub struct TypeResolver<'a> {
    registry: &'a TypeRegistry,
    max_depth: usize,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver working on `registry`
    #[must_use]
    pub fn new(registry: &'a TypeRegistry) -> Self {
        TypeResolver {
            registry,
            max_depth: MAX_RESOLUTION_DEPTH,
        }
    }

    /// Limit the depth of supertype walks
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The registry this resolver works on
    #[must_use]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// The erasure of `signature`, as declared inside `declaring`.
    ///
    /// A variable erases to the erasure of its first bound, or to the root type if it has none
    /// (or is not declared by `declaring`).
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] for unknown tokens and [`Error::RecursionLimit`] for
    /// bound chains deeper than the configured limit.
    pub fn erase(&self, signature: &TypeSignature, declaring: &TypeDescriptor) -> Result<TypeRc> {
        self.erase_bounded(signature, declaring, 0)
    }

    fn erase_bounded(
        &self,
        signature: &TypeSignature,
        declaring: &TypeDescriptor,
        depth: usize,
    ) -> Result<TypeRc> {
        if depth > self.max_depth {
            return Err(Error::RecursionLimit(self.max_depth));
        }

        match signature {
            TypeSignature::Class(token) | TypeSignature::Generic { raw: token, .. } => {
                self.registry.resolve(token)
            }
            TypeSignature::Array(component) => {
                let component = self.erase_bounded(component, declaring, depth + 1)?;
                self.registry.array_of(component.token)
            }
            TypeSignature::Var(name) => {
                match declaring
                    .generic_param(name)
                    .and_then(|param| param.bounds.first())
                {
                    Some(bound) => self.erase_bounded(bound, declaring, depth + 1),
                    None => self.registry.root(),
                }
            }
            TypeSignature::Wildcard { upper, .. } => match upper.first() {
                Some(bound) => self.erase_bounded(bound, declaring, depth + 1),
                None => self.registry.root(),
            },
        }
    }

    /// Bind the variables of `signature`, declared inside `declaring`, as seen from `src`.
    ///
    /// Variables that cannot be bound (because `src` is the declaring type itself, or reaches
    /// it only through a raw supertype) become their first declared bound, or the root type if
    /// they have none. The same holds for variables of `src` that an ancestor was
    /// parameterized with.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] for unknown tokens and [`Error::RecursionLimit`] for
    /// supertype chains deeper than the configured limit.
    pub fn resolve(
        &self,
        signature: &TypeSignature,
        declaring: Token,
        src: &TypeDescriptor,
    ) -> Result<TypeSignature> {
        match signature {
            TypeSignature::Class(_) => Ok(signature.clone()),
            TypeSignature::Generic { raw, args } => Ok(TypeSignature::Generic {
                raw: *raw,
                args: args
                    .iter()
                    .map(|arg| self.resolve(arg, declaring, src))
                    .collect::<Result<_>>()?,
            }),
            TypeSignature::Array(component) => Ok(TypeSignature::Array(Box::new(
                self.resolve(component, declaring, src)?,
            ))),
            TypeSignature::Var(name) => self.resolve_var(name, declaring, src),
            TypeSignature::Wildcard { upper, lower } => Ok(TypeSignature::Wildcard {
                upper: upper
                    .iter()
                    .map(|bound| self.resolve(bound, declaring, src))
                    .collect::<Result<_>>()?,
                lower: lower
                    .iter()
                    .map(|bound| self.resolve(bound, declaring, src))
                    .collect::<Result<_>>()?,
            }),
        }
    }

    fn resolve_var(
        &self,
        name: &str,
        declaring: Token,
        src: &TypeDescriptor,
    ) -> Result<TypeSignature> {
        if declaring == src.token {
            return Ok(Self::first_bound(src, name));
        }

        let declaring_type = self.registry.resolve(&declaring)?;
        let Some(index) = declaring_type
            .generic_param_names()
            .iter()
            .position(|param| param == name)
        else {
            return Ok(TypeSignature::Var(name.to_string()));
        };

        match self
            .bindings(declaring, src, 0)?
            .and_then(|args| args.get(index).cloned())
        {
            Some(actual) => {
                let open = src.generic_param_names();
                let bounds = open
                    .iter()
                    .map(|param| Self::first_bound(src, param))
                    .collect::<Vec<_>>();
                Ok(actual.substitute(&open, &bounds))
            }
            None => Ok(Self::first_bound(&declaring_type, name)),
        }
    }

    /// The first declared bound of the variable `name` of `ty`, the root type if it has none
    fn first_bound(ty: &TypeDescriptor, name: &str) -> TypeSignature {
        ty.generic_param(name)
            .and_then(|param| param.bounds.first().cloned())
            .unwrap_or_else(|| TypeSignature::core(CoreType::Object))
    }

    /// The actual type arguments `from` supplies to `target`, expressed in the variables of
    /// `from`. `None` if `target` is not a generic supertype of `from`.
    fn bindings(
        &self,
        target: Token,
        from: &TypeDescriptor,
        depth: usize,
    ) -> Result<Option<Vec<TypeSignature>>> {
        if depth > self.max_depth {
            return Err(Error::RecursionLimit(self.max_depth));
        }

        for supertype in from.supertypes() {
            let Some(raw) = supertype.raw_token() else {
                continue;
            };

            if raw == target {
                return Ok(match supertype {
                    TypeSignature::Generic { args, .. } => Some(args),
                    _ => None,
                });
            }

            let Some(super_type) = self.registry.get(&raw) else {
                continue;
            };
            let Some(args) = self.bindings(target, &super_type, depth + 1)? else {
                continue;
            };

            let names = super_type.generic_param_names();
            let actual = supertype.type_args();
            if actual.is_empty() && !names.is_empty() {
                // raw use of a generic supertype drops every binding behind it
                return Ok(None);
            }

            return Ok(Some(
                args.iter()
                    .map(|arg| arg.substitute(&names, actual))
                    .collect(),
            ));
        }

        Ok(None)
    }

    /// The registered type a resolved signature denotes.
    ///
    /// Generic instantiations become their raw type, arrays the array type of their concrete
    /// component, and variables or wildcards that are still unbound the root type.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] for unknown tokens.
    pub fn to_concrete(&self, signature: &TypeSignature) -> Result<TypeRc> {
        match signature {
            TypeSignature::Class(token) | TypeSignature::Generic { raw: token, .. } => {
                self.registry.resolve(token)
            }
            TypeSignature::Array(component) => {
                let component = self.to_concrete(component)?;
                self.registry.array_of(component.token)
            }
            TypeSignature::Var(_) | TypeSignature::Wildcard { .. } => self.registry.root(),
        }
    }

    /// The concrete return type of `method` as seen from `src`
    ///
    /// # Errors
    /// See [`TypeResolver::resolve`].
    pub fn return_type(&self, method: &Method, src: &TypeDescriptor) -> Result<TypeRc> {
        let resolved = self.resolve(&method.return_type, method.declaring, src)?;
        self.to_concrete(&resolved)
    }

    /// The concrete parameter types of `method` as seen from `src`
    ///
    /// # Errors
    /// See [`TypeResolver::resolve`].
    pub fn param_types(&self, method: &Method, src: &TypeDescriptor) -> Result<Vec<TypeRc>> {
        method
            .params
            .iter()
            .map(|param| {
                let resolved = self.resolve(param, method.declaring, src)?;
                self.to_concrete(&resolved)
            })
            .collect()
    }

    /// The concrete type of `field` as seen from `src`
    ///
    /// # Errors
    /// See [`TypeResolver::resolve`].
    pub fn field_type(&self, field: &Field, src: &TypeDescriptor) -> Result<TypeRc> {
        let resolved = self.resolve(&field.signature, field.declaring, src)?;
        self.to_concrete(&resolved)
    }

    /// The erased return type of `method`
    ///
    /// # Errors
    /// See [`TypeResolver::erase`].
    pub fn erased_return_type(&self, method: &Method) -> Result<TypeRc> {
        let declaring = self.registry.resolve(&method.declaring)?;
        self.erase(&method.return_type, &declaring)
    }

    /// The erased parameter types of `method`
    ///
    /// # Errors
    /// See [`TypeResolver::erase`].
    pub fn erased_param_types(&self, method: &Method) -> Result<Vec<TypeRc>> {
        let declaring = self.registry.resolve(&method.declaring)?;
        method
            .params
            .iter()
            .map(|param| self.erase(param, &declaring))
            .collect()
    }
}
