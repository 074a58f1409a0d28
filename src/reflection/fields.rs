//! Field fallback for properties without accessor methods.
//!
//! After getters and setters are resolved, the [`FieldScanner`] walks the declared fields of the
//! reflected type and then of each base class. A field fills the read direction of its name if
//! no getter was resolved, and the write direction if no setter was resolved and the field is
//! not both static and final. Fields of a subclass take precedence over same-named fields of
//! its ancestors because they are visited first.

use log::trace;

use crate::{
    metadata::{
        token::Token,
        typesystem::{CoreType, TypeDescriptor, TypeResolver, TypeSignature},
    },
    reflection::{
        accessor::{FieldInvoker, ReadAccessor, WriteAccessor},
        index::PropertyTable,
    },
    Error, Result,
};

/// Registers field backed accessors for the gaps left by accessor methods
pub struct FieldScanner<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
    suppress_access_checks: bool,
    max_depth: usize,
}

impl<'r, 'a> FieldScanner<'r, 'a> {
    /// Create a field scanner
    ///
    /// ## Arguments
    /// * 'resolver'               - Resolves field types against the reflected type
    /// * 'suppress_access_checks' - Passed on to the created accessors
    /// * 'max_depth'              - Maximum number of base classes to walk
    #[must_use]
    pub fn new(resolver: &'r TypeResolver<'a>, suppress_access_checks: bool, max_depth: usize) -> Self {
        FieldScanner {
            resolver,
            suppress_access_checks,
            max_depth,
        }
    }

    /// Add field accessors for `ty` and its base classes to `table`
    ///
    /// # Errors
    /// Returns [`Error::RecursionLimit`] if the base class chain is deeper than allowed, or
    /// [`Error::TypeNotFound`] if a field or base type does not resolve.
    pub(crate) fn scan(&self, ty: &TypeDescriptor, table: &mut PropertyTable) -> Result<()> {
        let registry = self.resolver.registry();
        let root = CoreType::Object.token();

        let mut current: Option<Token> = Some(ty.token);
        let mut depth = 0;

        while let Some(token) = current {
            if token == root {
                break;
            }
            if depth > self.max_depth {
                return Err(Error::RecursionLimit(self.max_depth));
            }

            let declaring = registry.resolve(&token)?;
            let type_name = declaring.fullname();

            for (_, field) in declaring.fields.iter() {
                let wants_setter = !table.has_setter(&field.name)
                    && !(field.is_static() && field.is_final());
                let wants_getter = !table.has_getter(&field.name);
                if !wants_setter && !wants_getter {
                    continue;
                }

                let field_type = self.resolver.field_type(field, ty)?;
                let invoker = FieldInvoker::new(
                    field.clone(),
                    type_name.clone(),
                    field_type,
                    self.suppress_access_checks,
                );

                if wants_setter {
                    table.add_setter(&field.name, WriteAccessor::Field(invoker.clone()));
                }
                if wants_getter {
                    table.add_getter(&field.name, ReadAccessor::Field(invoker));
                }
                trace!(
                    "field {}.{} backs getter={} setter={}",
                    type_name,
                    field.name,
                    wants_getter,
                    wants_setter
                );
            }

            current = declaring.base().and_then(TypeSignature::raw_token);
            depth += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        typesystem::{FieldBuilder, PrimitiveKind, TypeBuilder, TypeRegistry},
        value::{Instance, Value},
    };

    #[test]
    fn test_fields_fill_both_directions() {
        let registry = TypeRegistry::new();
        let ty = TypeBuilder::class(&registry, "app", "Plain")
            .field(FieldBuilder::new("name", TypeSignature::core(CoreType::String)))
            .field(FieldBuilder::new("count", TypeSignature::primitive(PrimitiveKind::Int)))
            .build();
        let resolver = TypeResolver::new(&registry);
        let mut table = PropertyTable::default();

        FieldScanner::new(&resolver, true, 64).scan(&ty, &mut table).unwrap();

        assert!(table.has_getter("name"));
        assert!(table.has_setter("name"));
        assert!(table.has_getter("count"));
        assert!(table.has_setter("count"));
        assert_eq!(table.getter_type("count"), Some(PrimitiveKind::Int.token()));
    }

    #[test]
    fn test_static_final_is_read_only() {
        let registry = TypeRegistry::new();
        let ty = TypeBuilder::class(&registry, "app", "Constants")
            .field(
                FieldBuilder::new("LIMIT", TypeSignature::primitive(PrimitiveKind::Int))
                    .public()
                    .static_field()
                    .final_field()
                    .initial(Value::Int(10)),
            )
            .field(
                FieldBuilder::new("counter", TypeSignature::primitive(PrimitiveKind::Int))
                    .static_field(),
            )
            .build();
        let resolver = TypeResolver::new(&registry);
        let mut table = PropertyTable::default();

        FieldScanner::new(&resolver, true, 64).scan(&ty, &mut table).unwrap();

        assert!(table.has_getter("LIMIT"));
        assert!(!table.has_setter("LIMIT"));
        assert!(table.has_getter("counter"));
        assert!(table.has_setter("counter"));
    }

    #[test]
    fn test_subclass_field_shadows_ancestor() {
        let registry = TypeRegistry::new();
        let base = TypeBuilder::class(&registry, "app", "Base")
            .field(FieldBuilder::new("value", TypeSignature::core(CoreType::Number)))
            .field(FieldBuilder::new("inherited", TypeSignature::core(CoreType::String)))
            .build();
        let derived = TypeBuilder::class(&registry, "app", "Derived")
            .extends(TypeSignature::class(base.token))
            .field(FieldBuilder::new("value", TypeSignature::core(CoreType::Long)))
            .build();
        let resolver = TypeResolver::new(&registry);
        let mut table = PropertyTable::default();

        FieldScanner::new(&resolver, true, 64)
            .scan(&derived, &mut table)
            .unwrap();

        assert_eq!(table.getter_type("value"), Some(CoreType::Long.token()));
        assert_eq!(table.getter_type("inherited"), Some(CoreType::String.token()));

        let target = Instance::new(derived.token);
        let (_, setter) = table
            .setters()
            .find(|(name, _)| *name == "value")
            .unwrap();
        setter.write(&target, Value::Long(7)).unwrap();
        assert_eq!(
            derived.fields.get(0).unwrap().get(&target).unwrap(),
            Value::Long(7)
        );
    }

    #[test]
    fn test_filtered_names_are_skipped() {
        let registry = TypeRegistry::new();
        let ty = TypeBuilder::class(&registry, "app", "Filtered")
            .field(
                FieldBuilder::new("serialVersionUID", TypeSignature::primitive(PrimitiveKind::Long))
                    .static_field(),
            )
            .field(FieldBuilder::new("$jacocoData", TypeSignature::core(CoreType::Object)))
            .field(FieldBuilder::new("class", TypeSignature::core(CoreType::Object)))
            .build();
        let resolver = TypeResolver::new(&registry);
        let mut table = PropertyTable::default();

        FieldScanner::new(&resolver, true, 64).scan(&ty, &mut table).unwrap();

        assert_eq!(table.getters().count(), 0);
        assert_eq!(table.setters().count(), 0);
    }
}
