//! Method enumeration over a type hierarchy.
//!
//! The [`MethodCollector`] gathers the methods a type declares, inherits from its base
//! classes and receives from every interface it implements, transitively. Methods are keyed
//! by their erased signature (`return#name:param,param`), so an override with the same erased
//! signature hides the inherited declaration while a covariant override (different erased
//! return type) is kept as an additional candidate. Bridge methods are skipped and the
//! universal root type is never visited.
//!
//! # Traversal order
//!
//! 1. The methods declared by the type itself
//! 2. Its interfaces, breadth-first (an interface's own methods, then its super-interfaces)
//! 3. The base class, repeating from step 1
//!
//! The first method seen for a signature wins, unless it has no body and a class further up
//! the chain implements it. Interface declarations and defaults give way to a class
//! implementation the same way, so invoking the collected method behaves like a virtual call
//! on an instance of the type.

use std::collections::{HashSet, VecDeque};

use indexmap::{map::Entry, IndexMap};
use log::trace;

use crate::{
    metadata::{
        method::{Method, MethodRc},
        token::Token,
        typesystem::{CoreType, TypeDescriptor, TypeResolver, TypeSignature},
    },
    Error, Result,
};

/// Collects the deduplicated method set of a type
pub struct MethodCollector<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
    max_depth: usize,
}

impl<'r, 'a> MethodCollector<'r, 'a> {
    /// Create a collector
    ///
    /// ## Arguments
    /// * 'resolver'  - Provides the registry and the erasure of signatures
    /// * 'max_depth' - Maximum number of base classes to walk
    #[must_use]
    pub fn new(resolver: &'r TypeResolver<'a>, max_depth: usize) -> Self {
        MethodCollector {
            resolver,
            max_depth,
        }
    }

    /// Collect every non-bridge method visible on `ty`, in traversal order
    ///
    /// # Errors
    /// Returns [`Error::RecursionLimit`] if the base class chain is deeper than allowed, or
    /// [`Error::TypeNotFound`] if a supertype token does not resolve.
    pub fn collect(&self, ty: &TypeDescriptor) -> Result<Vec<MethodRc>> {
        let registry = self.resolver.registry();
        let root = CoreType::Object.token();

        let mut unique = IndexMap::new();
        let mut visited_interfaces = HashSet::new();
        let mut current = Some(ty.token);
        let mut depth = 0;

        while let Some(token) = current {
            if token == root {
                break;
            }
            if depth > self.max_depth {
                return Err(Error::RecursionLimit(self.max_depth));
            }

            let current_type = registry.resolve(&token)?;
            self.add_unique(&mut unique, &current_type)?;

            let mut queue = Self::raw_tokens(current_type.interfaces.iter().map(|(_, i)| i));
            while let Some(interface) = queue.pop_front() {
                if interface == root || !visited_interfaces.insert(interface) {
                    continue;
                }

                let interface_type = registry.resolve(&interface)?;
                self.add_unique(&mut unique, &interface_type)?;
                queue.extend(Self::raw_tokens(
                    interface_type.interfaces.iter().map(|(_, i)| i),
                ));
            }

            current = current_type.base().and_then(TypeSignature::raw_token);
            depth += 1;
        }

        trace!(
            "collected {} unique method(s) for {}",
            unique.len(),
            ty.fullname()
        );
        Ok(unique.into_values().map(|(method, _)| method).collect())
    }

    /// The erased signature used to detect overrides, `return#name:param,param`
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if a type of the signature does not resolve.
    pub fn signature(&self, method: &Method) -> Result<String> {
        let return_type = self.resolver.erased_return_type(method)?;
        let params = self
            .resolver
            .erased_param_types(method)?
            .iter()
            .map(|param| param.fullname())
            .collect::<Vec<_>>();

        let mut signature = format!("{}#{}", return_type.fullname(), method.name);
        if !params.is_empty() {
            signature.push(':');
            signature.push_str(&params.join(","));
        }
        Ok(signature)
    }

    fn add_unique(
        &self,
        unique: &mut IndexMap<String, (MethodRc, bool)>,
        declaring: &TypeDescriptor,
    ) -> Result<()> {
        let from_interface = declaring.is_interface();

        for (_, method) in declaring.methods.iter() {
            if method.is_bridge() {
                continue;
            }

            match unique.entry(self.signature(method)?) {
                Entry::Vacant(entry) => {
                    entry.insert((method.clone(), from_interface));
                }
                Entry::Occupied(mut entry) => {
                    let (seen, seen_in_interface) = entry.get();
                    let implements = method.body.is_some()
                        && (seen.body.is_none() || (*seen_in_interface && !from_interface));
                    if implements {
                        trace!(
                            "{} of {} is implemented by {}",
                            method.name,
                            self.resolver.registry().type_name(&seen.declaring),
                            declaring.fullname()
                        );
                        entry.insert((method.clone(), from_interface));
                    }
                }
            }
        }
        Ok(())
    }

    fn raw_tokens<'s>(signatures: impl Iterator<Item = &'s TypeSignature>) -> VecDeque<Token> {
        signatures.filter_map(TypeSignature::raw_token).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        typesystem::{MethodBuilder, PrimitiveKind, TypeBuilder, TypeRegistry},
        value::Value,
    };

    fn names(methods: &[MethodRc]) -> Vec<String> {
        methods.iter().map(|method| method.name.clone()).collect()
    }

    #[test]
    fn test_skips_root_and_bridges() {
        let registry = TypeRegistry::new();
        let ty = TypeBuilder::class(&registry, "app", "Plain")
            .method(MethodBuilder::new("getName").returns(TypeSignature::core(CoreType::String)))
            .method(
                MethodBuilder::new("getName")
                    .returns(TypeSignature::core(CoreType::Object))
                    .bridge(),
            )
            .build();
        let resolver = TypeResolver::new(&registry);

        let methods = MethodCollector::new(&resolver, 64).collect(&ty).unwrap();
        assert_eq!(names(&methods), vec!["getName"]);
    }

    #[test]
    fn test_override_hides_inherited_declaration() {
        let registry = TypeRegistry::new();
        let base = TypeBuilder::class(&registry, "app", "Base")
            .method(MethodBuilder::new("getName").returns(TypeSignature::core(CoreType::String)))
            .method(MethodBuilder::new("getAge").returns(TypeSignature::primitive(PrimitiveKind::Int)))
            .build();
        let derived = TypeBuilder::class(&registry, "app", "Derived")
            .extends(TypeSignature::class(base.token))
            .method(MethodBuilder::new("getName").returns(TypeSignature::core(CoreType::String)))
            .build();
        let resolver = TypeResolver::new(&registry);

        let methods = MethodCollector::new(&resolver, 64).collect(&derived).unwrap();
        assert_eq!(names(&methods), vec!["getName", "getAge"]);
        assert_eq!(methods[0].declaring, derived.token);
    }

    #[test]
    fn test_covariant_override_is_kept() {
        let registry = TypeRegistry::new();
        let base = TypeBuilder::class(&registry, "app", "Base")
            .method(MethodBuilder::new("getId").returns(TypeSignature::core(CoreType::Number)))
            .build();
        let derived = TypeBuilder::class(&registry, "app", "Derived")
            .extends(TypeSignature::class(base.token))
            .method(MethodBuilder::new("getId").returns(TypeSignature::core(CoreType::Long)))
            .build();
        let resolver = TypeResolver::new(&registry);

        let methods = MethodCollector::new(&resolver, 64).collect(&derived).unwrap();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].declaring, derived.token);
        assert_eq!(methods[1].declaring, base.token);
    }

    #[test]
    fn test_interfaces_follow_own_methods() {
        let registry = TypeRegistry::new();
        let named = TypeBuilder::interface(&registry, "app", "Named")
            .method(MethodBuilder::new("getName").returns(TypeSignature::core(CoreType::String)))
            .build();
        let labelled = TypeBuilder::interface(&registry, "app", "Labelled")
            .implements(TypeSignature::class(named.token))
            .method(MethodBuilder::new("getLabel").returns(TypeSignature::core(CoreType::String)))
            .build();
        let ty = TypeBuilder::class(&registry, "app", "Item")
            .implements(TypeSignature::class(labelled.token))
            .method(MethodBuilder::new("getPrice").returns(TypeSignature::primitive(PrimitiveKind::Double)))
            .build();
        let resolver = TypeResolver::new(&registry);

        let methods = MethodCollector::new(&resolver, 64).collect(&ty).unwrap();
        assert_eq!(names(&methods), vec!["getPrice", "getLabel", "getName"]);
    }

    #[test]
    fn test_base_implementation_replaces_interface_declaration() {
        // interface Named { String getName(); }
        // class Base { String getName() { return "base"; } }
        // class Sub extends Base implements Named {}
        let registry = TypeRegistry::new();
        let named = TypeBuilder::interface(&registry, "app", "Named")
            .method(
                MethodBuilder::new("getName")
                    .returns(TypeSignature::core(CoreType::String))
                    .abstract_method(),
            )
            .build();
        let base = TypeBuilder::class(&registry, "app", "Base")
            .method(
                MethodBuilder::new("getName")
                    .returns(TypeSignature::core(CoreType::String))
                    .returns_value(Value::from("base")),
            )
            .build();
        let sub = TypeBuilder::class(&registry, "app", "Sub")
            .extends(TypeSignature::class(base.token))
            .implements(TypeSignature::class(named.token))
            .build();
        let resolver = TypeResolver::new(&registry);

        let methods = MethodCollector::new(&resolver, 64).collect(&sub).unwrap();
        assert_eq!(names(&methods), vec!["getName"]);
        assert_eq!(methods[0].declaring, base.token);
    }

    #[test]
    fn test_class_implementation_replaces_interface_default() {
        let registry = TypeRegistry::new();
        let named = TypeBuilder::interface(&registry, "app", "Named")
            .method(
                MethodBuilder::new("getName")
                    .returns(TypeSignature::core(CoreType::String))
                    .returns_value(Value::from("default")),
            )
            .build();
        let base = TypeBuilder::class(&registry, "app", "Base")
            .method(
                MethodBuilder::new("getName")
                    .returns(TypeSignature::core(CoreType::String))
                    .returns_value(Value::from("base")),
            )
            .build();
        let sub = TypeBuilder::class(&registry, "app", "Sub")
            .extends(TypeSignature::class(base.token))
            .implements(TypeSignature::class(named.token))
            .build();
        // the most derived implementation stays in front of the base one
        let leaf = TypeBuilder::class(&registry, "app", "Leaf")
            .extends(TypeSignature::class(sub.token))
            .method(
                MethodBuilder::new("getName")
                    .returns(TypeSignature::core(CoreType::String))
                    .returns_value(Value::from("leaf")),
            )
            .build();
        let resolver = TypeResolver::new(&registry);
        let collector = MethodCollector::new(&resolver, 64);

        let methods = collector.collect(&sub).unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].declaring, base.token);

        let methods = collector.collect(&leaf).unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].declaring, leaf.token);
    }

    #[test]
    fn test_signature_format() {
        let registry = TypeRegistry::new();
        let ty = TypeBuilder::class(&registry, "app", "Sig")
            .generic_param("T", Vec::new())
            .method(
                MethodBuilder::new("setValue")
                    .param(TypeSignature::var("T"))
                    .param(TypeSignature::primitive(PrimitiveKind::Int)),
            )
            .method(MethodBuilder::new("getValue").returns(TypeSignature::var("T")))
            .build();
        let resolver = TypeResolver::new(&registry);
        let collector = MethodCollector::new(&resolver, 64);

        let set_value = ty.methods.get(0).unwrap();
        let get_value = ty.methods.get(1).unwrap();
        assert_eq!(
            collector.signature(set_value).unwrap(),
            "void#setValue:core.Object,int"
        );
        assert_eq!(collector.signature(get_value).unwrap(), "core.Object#getValue");
    }

    #[test]
    fn test_depth_limit() {
        let registry = TypeRegistry::new();
        let mut parent = TypeBuilder::class(&registry, "app", "Level0").build();
        for level in 1..5 {
            parent = TypeBuilder::class(&registry, "app", &format!("Level{level}"))
                .extends(TypeSignature::class(parent.token))
                .build();
        }
        let resolver = TypeResolver::new(&registry);

        assert!(MethodCollector::new(&resolver, 16).collect(&parent).is_ok());
        assert!(matches!(
            MethodCollector::new(&resolver, 2).collect(&parent),
            Err(Error::RecursionLimit(2))
        ));
    }
}
