//! Benchmarks for property introspection.
//!
//! - Building the index of a flat bean
//! - Building the index of a generic hierarchy with covariant overrides
//! - Cached lookups through the factory
//! - Reading and writing through accessors

extern crate beanscope;

use std::{hint::black_box, sync::Arc};

use beanscope::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};

/// A bean with `count` String properties, each with getter, setter and backing field
fn create_flat_bean(registry: &TypeRegistry, count: usize) -> TypeRc {
    let mut builder = TypeBuilder::class(registry, "bench", "Flat").default_constructor();
    for i in 0..count {
        let field = format!("value{i}");
        builder = builder
            .field(FieldBuilder::new(&field, TypeSignature::core(CoreType::String)))
            .method(
                MethodBuilder::new(&format!("getValue{i}"))
                    .returns(TypeSignature::core(CoreType::String))
                    .reads_field(&field),
            )
            .method(
                MethodBuilder::new(&format!("setValue{i}"))
                    .param(TypeSignature::core(CoreType::String))
                    .writes_field(&field),
            );
    }
    builder.build()
}

/// Entity<T> -> Base<T> implements Entity<T> -> ... -> Leaf extends Level<Long>
fn create_generic_hierarchy(registry: &TypeRegistry, depth: usize) -> TypeRc {
    let entity = TypeBuilder::interface(registry, "bench", "Entity")
        .generic_param("T", Vec::new())
        .method(MethodBuilder::new("getId").returns(TypeSignature::var("T")))
        .method(MethodBuilder::new("setId").param(TypeSignature::var("T")))
        .build();

    let mut parent = TypeBuilder::class(registry, "bench", "Level0")
        .generic_param("T", Vec::new())
        .implements(TypeSignature::generic(
            entity.token,
            vec![TypeSignature::var("T")],
        ))
        .field(FieldBuilder::new("id", TypeSignature::var("T")))
        .build();

    for level in 1..depth {
        parent = TypeBuilder::class(registry, "bench", &format!("Level{level}"))
            .generic_param("T", Vec::new())
            .extends(TypeSignature::generic(
                parent.token,
                vec![TypeSignature::var("T")],
            ))
            .field(FieldBuilder::new(
                &format!("field{level}"),
                TypeSignature::core(CoreType::String),
            ))
            .build();
    }

    TypeBuilder::class(registry, "bench", "Leaf")
        .extends(TypeSignature::generic(
            parent.token,
            vec![TypeSignature::core(CoreType::Long)],
        ))
        .method(MethodBuilder::new("getId").returns(TypeSignature::core(CoreType::Long)))
        .build()
}

fn bench_build_flat(c: &mut Criterion) {
    let registry = TypeRegistry::new();
    let ty = create_flat_bean(&registry, 32);

    c.bench_function("build_flat_32", |b| {
        b.iter(|| {
            let index = Reflector::build(&registry, black_box(&ty)).unwrap();
            black_box(index)
        });
    });
}

fn bench_build_generic(c: &mut Criterion) {
    let registry = TypeRegistry::new();
    let ty = create_generic_hierarchy(&registry, 8);

    c.bench_function("build_generic_depth_8", |b| {
        b.iter(|| {
            let index = Reflector::build(&registry, black_box(&ty)).unwrap();
            black_box(index)
        });
    });
}

fn bench_factory_cached(c: &mut Criterion) {
    let registry = Arc::new(TypeRegistry::new());
    let ty = create_flat_bean(&registry, 32);
    let factory = DefaultReflectorFactory::new(registry);
    factory.find_for_type(&ty).unwrap();

    c.bench_function("factory_cached_lookup", |b| {
        b.iter(|| {
            let index = factory.find_for_type(black_box(&ty)).unwrap();
            black_box(index)
        });
    });
}

fn bench_accessors(c: &mut Criterion) {
    let registry = TypeRegistry::new();
    let ty = create_flat_bean(&registry, 8);
    let index = Reflector::build(&registry, &ty).unwrap();
    let instance = index.default_constructor().unwrap().new_instance().unwrap();
    let getter = index.get_accessor("value3").unwrap();
    let setter = index.set_accessor("value3").unwrap();

    c.bench_function("accessor_write_read", |b| {
        b.iter(|| {
            setter.write(&instance, Value::from("bench")).unwrap();
            black_box(getter.read(&instance).unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_build_flat,
    bench_build_generic,
    bench_factory_cached,
    bench_accessors
);
criterion_main!(benches);
