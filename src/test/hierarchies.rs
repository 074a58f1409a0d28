use crate::metadata::{
    typesystem::{
        CoreType, FieldBuilder, MethodBuilder, PrimitiveKind, TypeBuilder, TypeRc, TypeRegistry,
        TypeSignature,
    },
    value::Value,
};

fn string() -> TypeSignature {
    TypeSignature::core(CoreType::String)
}

fn boolean() -> TypeSignature {
    TypeSignature::primitive(PrimitiveKind::Boolean)
}

/// interface Entity<T> { T getId(); void setId(T id); }
/// abstract class AbstractEntity implements Entity<Long> { private Long id; getId/setId + bridges }
/// class Section extends AbstractEntity implements Entity<Long> {}
pub fn create_section(registry: &TypeRegistry) -> TypeRc {
    let entity = TypeBuilder::interface(registry, "app.model", "Entity")
        .generic_param("T", Vec::new())
        .method(
            MethodBuilder::new("getId")
                .returns(TypeSignature::var("T"))
                .abstract_method(),
        )
        .method(
            MethodBuilder::new("setId")
                .param(TypeSignature::var("T"))
                .abstract_method(),
        )
        .build();
    let entity_of_long = TypeSignature::generic(entity.token, vec![TypeSignature::core(CoreType::Long)]);

    let abstract_entity = TypeBuilder::class(registry, "app.model", "AbstractEntity")
        .abstract_type()
        .implements(entity_of_long.clone())
        .field(FieldBuilder::new("id", TypeSignature::core(CoreType::Long)))
        .method(
            MethodBuilder::new("getId")
                .returns(TypeSignature::core(CoreType::Long))
                .reads_field("id"),
        )
        .method(
            MethodBuilder::new("setId")
                .param(TypeSignature::core(CoreType::Long))
                .writes_field("id"),
        )
        .method(
            MethodBuilder::new("getId")
                .returns(TypeSignature::core(CoreType::Object))
                .bridge(),
        )
        .method(
            MethodBuilder::new("setId")
                .param(TypeSignature::core(CoreType::Object))
                .bridge(),
        )
        .build();

    TypeBuilder::class(registry, "app.model", "Section")
        .extends(TypeSignature::class(abstract_entity.token))
        .implements(entity_of_long)
        .default_constructor()
        .build()
}

/// abstract class Parent<T extends Serializable> {
///     protected T id; protected List<T> list; protected T[] array; private T fld; public T pubFld;
///     getId/setId, getList/setList, getArray/setArray, getFld
/// }
/// class Child extends Parent<String> {}
pub fn create_child(registry: &TypeRegistry) -> TypeRc {
    let var = || TypeSignature::var("T");
    let list_of_t = || TypeSignature::generic(CoreType::List.token(), vec![TypeSignature::var("T")]);
    let array_of_t = || TypeSignature::array(TypeSignature::var("T"));

    let parent = TypeBuilder::class(registry, "app.generic", "Parent")
        .abstract_type()
        .generic_param("T", vec![TypeSignature::core(CoreType::Serializable)])
        .field(FieldBuilder::new("id", var()).protected())
        .field(FieldBuilder::new("list", list_of_t()).protected())
        .field(FieldBuilder::new("array", array_of_t()).protected())
        .field(FieldBuilder::new("fld", var()))
        .field(FieldBuilder::new("pubFld", var()).public())
        .method(MethodBuilder::new("getId").returns(var()).reads_field("id"))
        .method(MethodBuilder::new("setId").param(var()).writes_field("id"))
        .method(MethodBuilder::new("getList").returns(list_of_t()).reads_field("list"))
        .method(MethodBuilder::new("setList").param(list_of_t()).writes_field("list"))
        .method(MethodBuilder::new("getArray").returns(array_of_t()).reads_field("array"))
        .method(MethodBuilder::new("setArray").param(array_of_t()).writes_field("array"))
        .method(MethodBuilder::new("getFld").returns(var()).reads_field("fld"))
        .build();

    TypeBuilder::class(registry, "app.generic", "Child")
        .extends(TypeSignature::generic(parent.token, vec![string()]))
        .default_constructor()
        .build()
}

/// interface BeanInterface<T> { void setId(T id); }
/// class BeanClass implements BeanInterface<String> { setId(String) + bridge setId(Object) }
pub fn create_bean_class(registry: &TypeRegistry) -> TypeRc {
    let bean_interface = TypeBuilder::interface(registry, "app.bean", "BeanInterface")
        .generic_param("T", Vec::new())
        .method(
            MethodBuilder::new("setId")
                .param(TypeSignature::var("T"))
                .abstract_method(),
        )
        .build();

    TypeBuilder::class(registry, "app.bean", "BeanClass")
        .implements(TypeSignature::generic(bean_interface.token, vec![string()]))
        .field(FieldBuilder::new("id", string()))
        .method(MethodBuilder::new("setId").param(string()).writes_field("id"))
        .method(
            MethodBuilder::new("setId")
                .param(TypeSignature::core(CoreType::Object))
                .bridge(),
        )
        .build()
}

/// class BooleanBean { boolean bool; isBool(), getBool(), setBool(boolean) }
///
/// `getBool` answers the opposite of the field, so tests can tell which getter was invoked.
pub fn create_boolean_bean(registry: &TypeRegistry) -> TypeRc {
    TypeBuilder::class(registry, "app.bean", "BooleanBean")
        .field(FieldBuilder::new("bool", boolean()))
        .method(
            MethodBuilder::new("getBool")
                .returns(boolean())
                .returns_value(Value::Boolean(false)),
        )
        .method(MethodBuilder::new("isBool").returns(boolean()).reads_field("bool"))
        .method(MethodBuilder::new("setBool").param(boolean()).writes_field("bool"))
        .default_constructor()
        .build()
}

/// class AmbiguousSetters { setTheProp(String); setTheProp(Integer); }
pub fn create_ambiguous_setters(registry: &TypeRegistry) -> TypeRc {
    TypeBuilder::class(registry, "app.bean", "AmbiguousSetters")
        .method(MethodBuilder::new("setTheProp").param(string()))
        .method(MethodBuilder::new("setTheProp").param(TypeSignature::core(CoreType::Integer)))
        .build()
}

/// class Constants {
///     static final long serialVersionUID; public static final String CONSTANT = "fixed";
///     private static int counter; private String name; private String $synthetic;
/// }
pub fn create_constants(registry: &TypeRegistry) -> TypeRc {
    TypeBuilder::class(registry, "app.bean", "Constants")
        .field(
            FieldBuilder::new("serialVersionUID", TypeSignature::primitive(PrimitiveKind::Long))
                .static_field()
                .final_field()
                .initial(Value::Long(1)),
        )
        .field(
            FieldBuilder::new("CONSTANT", string())
                .public()
                .static_field()
                .final_field()
                .initial(Value::from("fixed")),
        )
        .field(
            FieldBuilder::new("counter", TypeSignature::primitive(PrimitiveKind::Int))
                .static_field(),
        )
        .field(FieldBuilder::new("name", string()))
        .field(FieldBuilder::new("$synthetic", string()))
        .default_constructor()
        .build()
}
