//! Getter and setter conflict resolution.
//!
//! After collection, a property name can still map to several accessor candidates: a
//! covariant override next to the declaration it narrows, an `isX`/`getX` pair, or overloaded
//! setters. The [`ConflictResolver`] reduces each candidate list to a single winner, comparing
//! the erased member types through [`TypeRegistry::is_assignable_from`].
//!
//! # Getters
//!
//! Folded left to right. The narrower return type wins. Equal types are only legal for the
//! boolean primitive, in which case the `is` prefixed candidate wins. Unrelated types fail with
//! [`Error::AmbiguousGetter`].
//!
//! # Setters
//!
//! A candidate whose parameter type equals the resolved getter type wins outright. Otherwise
//! the narrower parameter type wins. Unrelated parameter types mark the property ambiguous; the
//! first ambiguity is kept and reported as [`Error::AmbiguousSetter`] unless a later candidate
//! matches the getter type exactly.

use log::{trace, warn};

use crate::{
    metadata::{
        method::MethodRc,
        token::Token,
        typesystem::{PrimitiveKind, TypeRc, TypeRegistry, TypeResolver},
    },
    Error, Result,
};

/// Picks one getter and one setter per property
pub struct ConflictResolver<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
}

impl<'r, 'a> ConflictResolver<'r, 'a> {
    /// Create a conflict resolver
    ///
    /// ## Arguments
    /// * 'resolver' - Provides the registry and the erased member types
    #[must_use]
    pub fn new(resolver: &'r TypeResolver<'a>) -> Self {
        ConflictResolver { resolver }
    }

    fn registry(&self) -> &'a TypeRegistry {
        self.resolver.registry()
    }

    /// Select the getter of `property` from `candidates`
    ///
    /// ## Arguments
    /// * 'property'   - The property all candidates map to
    /// * 'candidates' - Zero-argument getters, in collection order
    ///
    /// # Errors
    /// Returns [`Error::AmbiguousGetter`] for two candidates with equal non-boolean or
    /// unrelated return types, and [`Error::Malformed`] for an empty candidate list.
    pub fn resolve_getter(&self, property: &str, candidates: &[MethodRc]) -> Result<MethodRc> {
        let mut remaining = candidates.iter();
        let Some(first) = remaining.next() else {
            return Err(malformed_error!(
                "No getter candidates for property '{}'",
                property
            ));
        };

        let mut winner = first.clone();
        let mut winner_type = self.resolver.erased_return_type(first)?;

        for candidate in remaining {
            let candidate_type = self.resolver.erased_return_type(candidate)?;

            if candidate_type.token == winner_type.token {
                if candidate_type.token != PrimitiveKind::Boolean.token() {
                    return Err(self.ambiguous_getter(property, &winner, &winner_type, &candidate_type));
                }

                if candidate.name.starts_with("is") {
                    winner = candidate.clone();
                } else if !winner.name.starts_with("is") {
                    warn!(
                        "Boolean property '{}' has getters '{}' and '{}', keeping '{}'",
                        property, winner.name, candidate.name, winner.name
                    );
                }
                continue;
            }

            if self
                .registry()
                .is_assignable_from(candidate_type.token, winner_type.token)
            {
                continue;
            }

            if self
                .registry()
                .is_assignable_from(winner_type.token, candidate_type.token)
            {
                winner = candidate.clone();
                winner_type = candidate_type;
                continue;
            }

            return Err(self.ambiguous_getter(property, &winner, &winner_type, &candidate_type));
        }

        trace!(
            "getter for '{}' resolved to {} -> {}",
            property,
            winner.name,
            winner_type.fullname()
        );
        Ok(winner)
    }

    fn ambiguous_getter(
        &self,
        property: &str,
        winner: &MethodRc,
        winner_type: &TypeRc,
        candidate_type: &TypeRc,
    ) -> Error {
        Error::AmbiguousGetter {
            property: property.to_string(),
            type_name: self.registry().type_name(&winner.declaring),
            first: winner_type.fullname(),
            second: candidate_type.fullname(),
        }
    }

    /// Select the setter of `property` from `candidates`
    ///
    /// ## Arguments
    /// * 'property'    - The property all candidates map to
    /// * 'candidates'  - One-argument setters, in collection order
    /// * 'getter_type' - The resolved type of the property's getter, if it has one
    ///
    /// # Errors
    /// Returns [`Error::AmbiguousSetter`] if two candidates with unrelated parameter types
    /// were found and no candidate matches the getter type, and [`Error::Malformed`] for an
    /// empty candidate list or a setter that does not take exactly one parameter.
    pub fn resolve_setter(
        &self,
        property: &str,
        candidates: &[MethodRc],
        getter_type: Option<Token>,
    ) -> Result<MethodRc> {
        let mut best: Option<(MethodRc, TypeRc)> = None;
        let mut ambiguity: Option<Error> = None;

        for candidate in candidates {
            let candidate_type = self.param_type(candidate)?;

            if getter_type == Some(candidate_type.token) {
                trace!(
                    "setter for '{}' matches the getter type {}",
                    property,
                    candidate_type.fullname()
                );
                return Ok(candidate.clone());
            }

            if ambiguity.is_some() {
                continue;
            }

            best = match best {
                None => Some((candidate.clone(), candidate_type)),
                Some((current, current_type)) => {
                    if self
                        .registry()
                        .is_assignable_from(current_type.token, candidate_type.token)
                    {
                        Some((candidate.clone(), candidate_type))
                    } else if self
                        .registry()
                        .is_assignable_from(candidate_type.token, current_type.token)
                    {
                        Some((current, current_type))
                    } else {
                        ambiguity = Some(Error::AmbiguousSetter {
                            property: property.to_string(),
                            type_name: self.registry().type_name(&candidate.declaring),
                            first: current_type.fullname(),
                            second: candidate_type.fullname(),
                        });
                        None
                    }
                }
            };
        }

        match (best, ambiguity) {
            (_, Some(error)) => Err(error),
            (Some((winner, winner_type)), None) => {
                trace!(
                    "setter for '{}' resolved to {}({})",
                    property,
                    winner.name,
                    winner_type.fullname()
                );
                Ok(winner)
            }
            (None, None) => Err(malformed_error!(
                "No setter candidates for property '{}'",
                property
            )),
        }
    }

    fn param_type(&self, setter: &MethodRc) -> Result<TypeRc> {
        let mut params = self.resolver.erased_param_types(setter)?;
        if params.len() != 1 {
            return Err(malformed_error!(
                "Setter '{}' takes {} parameters",
                setter.name,
                params.len()
            ));
        }
        Ok(params.remove(0))
    }
}
