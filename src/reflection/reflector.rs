//! Builds a [`PropertyIndex`] from a type descriptor.
//!
//! The passes run in a fixed order, since setter resolution relies on the getter types:
//!
//! 1. Look up the zero-argument constructor (a missing one is only an error when requested)
//! 2. Collect the method set of the type, see [`MethodCollector`]
//! 3. Group the getters by property and resolve each group, see [`ConflictResolver`]
//! 4. Group the setters by property and resolve each group against the getter types
//! 5. Fill remaining gaps from fields of the type and its ancestors, see [`FieldScanner`]
//! 6. Derive the name lists and the case-insensitive name index

use indexmap::IndexMap;
use log::debug;

use crate::{
    metadata::{
        method::MethodRc,
        typesystem::{TypeRc, TypeRegistry, TypeResolver},
    },
    reflection::{
        accessor::{MethodInvoker, ReadAccessor, WriteAccessor},
        collector::MethodCollector,
        config::ReflectorConfig,
        conflicts::ConflictResolver,
        fields::FieldScanner,
        index::{PropertyIndex, PropertyTable},
        namer,
    },
    Result,
};

/// Entry point for introspecting a single type
pub struct Reflector;

impl Reflector {
    /// Introspect `ty` with the default configuration
    ///
    /// ## Arguments
    /// * 'registry' - The registry `ty` and all of its supertypes are registered in
    /// * 'ty'       - The type to introspect
    ///
    /// # Errors
    /// See [`Reflector::build_with_config`].
    pub fn build(registry: &TypeRegistry, ty: &TypeRc) -> Result<PropertyIndex> {
        Self::build_with_config(registry, ty, ReflectorConfig::default())
    }

    /// Introspect `ty`
    ///
    /// ## Arguments
    /// * 'registry' - The registry `ty` and all of its supertypes are registered in
    /// * 'ty'       - The type to introspect
    /// * 'config'   - Access checks and hierarchy depth
    ///
    /// # Errors
    /// Returns [`crate::Error::AmbiguousGetter`] or [`crate::Error::AmbiguousSetter`] if the
    /// accessors of a property cannot be told apart, [`crate::Error::RecursionLimit`] for
    /// hierarchies deeper than `config.max_hierarchy_depth`, and [`crate::Error::TypeNotFound`]
    /// if a referenced type is not registered.
    pub fn build_with_config(
        registry: &TypeRegistry,
        ty: &TypeRc,
        config: ReflectorConfig,
    ) -> Result<PropertyIndex> {
        debug!("Introspecting {} ({})", ty.fullname(), ty.token);

        let resolver = TypeResolver::new(registry).with_max_depth(config.max_hierarchy_depth);
        let conflicts = ConflictResolver::new(&resolver);
        let mut table = PropertyTable::default();

        let default_constructor = ty.default_constructor();
        let methods = MethodCollector::new(&resolver, config.max_hierarchy_depth).collect(ty)?;

        let getters = Self::group(&methods, 0, namer::is_getter)?;
        for (property, candidates) in &getters {
            let winner = conflicts.resolve_getter(property, candidates)?;
            let property_type = resolver.return_type(&winner, ty)?;
            let invoker = MethodInvoker::new(
                winner.clone(),
                registry.type_name(&winner.declaring),
                property_type,
                config.suppress_access_checks,
            );
            table.add_getter(property, ReadAccessor::Method(invoker));
        }

        let setters = Self::group(&methods, 1, namer::is_setter)?;
        for (property, candidates) in &setters {
            let getter_type = table.getter_type(property);
            let winner = conflicts.resolve_setter(property, candidates, getter_type)?;
            let Some(property_type) = resolver.param_types(&winner, ty)?.into_iter().next() else {
                return Err(malformed_error!("Setter '{}' takes no parameter", winner.name));
            };
            let invoker = MethodInvoker::new(
                winner.clone(),
                registry.type_name(&winner.declaring),
                property_type,
                config.suppress_access_checks,
            );
            table.add_setter(property, WriteAccessor::Method(invoker));
        }

        FieldScanner::new(
            &resolver,
            config.suppress_access_checks,
            config.max_hierarchy_depth,
        )
        .scan(ty, &mut table)?;

        let index = PropertyIndex::new(ty, default_constructor, table);
        debug!(
            "Introspected {}: {} readable, {} writable",
            index.type_name(),
            index.readable_names().len(),
            index.writable_names().len()
        );
        Ok(index)
    }

    /// Group the accessor shaped methods by property name, skipping names that never become
    /// properties
    fn group(
        methods: &[MethodRc],
        param_count: usize,
        is_accessor: fn(&str) -> bool,
    ) -> Result<IndexMap<String, Vec<MethodRc>>> {
        let mut groups: IndexMap<String, Vec<MethodRc>> = IndexMap::new();

        for method in methods {
            if method.param_count() != param_count || !is_accessor(&method.name) {
                continue;
            }

            let property = namer::method_to_property(&method.name)?;
            if PropertyTable::is_valid_name(&property) {
                groups.entry(property).or_default().push(method.clone());
            }
        }

        Ok(groups)
    }
}
