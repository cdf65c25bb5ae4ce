use builderscope_codegen::generate_builder_source;
use builderscope_core::model::{
    modifiers, BuilderMetadata, BuiltType, ClassKind, JavaClass, Setter, SetterVariant, TypeRef,
    Visibility,
};
use std::sync::Arc;

fn target_class(fqn: &str) -> Arc<JavaClass> {
    Arc::new(JavaClass {
        fqn: fqn.to_string(),
        package_name: fqn.rsplit_once('.').map(|(p, _)| p).unwrap_or("").to_string(),
        simple_name: fqn.rsplit(['.', '$']).next().unwrap().to_string(),
        kind: ClassKind::Class,
        modifiers: modifiers::PUBLIC,
        is_anonymous: false,
        is_member: false,
        is_static_member: false,
        type_parameters: vec![],
        superclass: Some(TypeRef::object()),
        interfaces: vec![],
        methods: vec![],
        constructors: vec![],
    })
}

fn setter(method: &str, name: &str, param_type: TypeRef, variant: SetterVariant) -> Setter {
    Setter {
        method_name: method.to_string(),
        param_name: name.to_string(),
        param_type,
        visibility: Visibility::Public,
        declaring_class: None,
        variant,
    }
}

fn metadata_for(setters: Vec<Setter>, has_ctor: bool) -> BuilderMetadata {
    BuilderMetadata {
        package_name: "com.example".to_string(),
        name: "PersonBuilder".to_string(),
        built_type: BuiltType {
            class: target_class("com.example.Person"),
            accessible_no_args_constructor: has_ctor,
            setters,
        },
    }
}

#[test]
fn simple_properties_produce_fluent_methods_and_build_calls() {
    let metadata = metadata_for(
        vec![
            setter("setAge", "age", TypeRef::primitive("int"), SetterVariant::Simple),
            setter(
                "setName",
                "name",
                TypeRef::class("java.lang.String"),
                SetterVariant::Simple,
            ),
        ],
        true,
    );
    let source = generate_builder_source(&metadata);

    assert!(source.starts_with("package com.example;\n"));
    assert!(source.contains("public class PersonBuilder {"));
    assert!(source.contains("public static PersonBuilder newInstance() {"));
    assert!(source.contains("public PersonBuilder age(final int age) {"));
    assert!(source.contains("public PersonBuilder name(final java.lang.String name) {"));
    assert!(source.contains("final com.example.Person result = new com.example.Person();"));
    assert!(source.contains("result.setAge(this.age);"));
    assert!(source.contains("result.setName(this.name);"));
    assert!(source.contains("return result;"));
    // Both fluent methods hand back the builder.
    assert_eq!(source.matches("return this;").count(), 2);
}

#[test]
fn collection_properties_get_an_add_helper() {
    let list_of_string = TypeRef::generic(
        TypeRef::class("java.util.List"),
        vec![TypeRef::class("java.lang.String")],
    );
    let metadata = metadata_for(
        vec![setter(
            "setNames",
            "names",
            list_of_string,
            SetterVariant::Collection {
                type_arg: TypeRef::class("java.lang.String"),
            },
        )],
        true,
    );
    let source = generate_builder_source(&metadata);

    assert!(source.contains(
        "public PersonBuilder names(final java.util.List<java.lang.String> names) {"
    ));
    assert!(source.contains("public PersonBuilder addToNames(final java.lang.String item) {"));
    assert!(source.contains("this.namesAdditions.add(item);"));
    assert!(source.contains("new java.util.ArrayList<>();"));
    assert!(source.contains("collection.addAll(this.namesAdditions);"));
    assert!(source.contains("result.setNames(collection);"));
}

#[test]
fn map_properties_get_a_put_helper() {
    let map_type = TypeRef::generic(
        TypeRef::class("java.util.Map"),
        vec![
            TypeRef::class("java.lang.String"),
            TypeRef::primitive("int"),
        ],
    );
    let metadata = metadata_for(
        vec![setter(
            "setScores",
            "scores",
            map_type,
            SetterVariant::Map {
                key: TypeRef::class("java.lang.String"),
                value: TypeRef::primitive("int"),
            },
        )],
        true,
    );
    let source = generate_builder_source(&metadata);

    assert!(source.contains(
        "public PersonBuilder putInScores(final java.lang.String key, final int value) {"
    ));
    // The accumulator uses boxed types in generic positions.
    assert!(source.contains(
        "private final java.util.Map<java.lang.String, java.lang.Integer> scoresPuts"
    ));
    assert!(source.contains("map.putAll(this.scoresPuts);"));
    assert!(source.contains("result.setScores(map);"));
}

#[test]
fn array_properties_accumulate_then_convert() {
    let metadata = metadata_for(
        vec![setter(
            "setFloats",
            "floats",
            TypeRef::array(TypeRef::primitive("float"), 1),
            SetterVariant::Array {
                component: TypeRef::primitive("float"),
            },
        )],
        true,
    );
    let source = generate_builder_source(&metadata);

    assert!(source.contains("public PersonBuilder floats(final float[] floats) {"));
    assert!(source.contains("public PersonBuilder addToFloats(final float item) {"));
    assert!(source.contains("private final java.util.List<java.lang.Float> floatsAdditions"));
    assert!(source.contains("final float[] array = new float[this.floatsAdditions.size()];"));
    assert!(source.contains("result.setFloats(array);"));
}

#[test]
fn get_and_adders_route_through_the_getter() {
    let list_of_string = TypeRef::generic(
        TypeRef::class("java.util.List"),
        vec![TypeRef::class("java.lang.String")],
    );
    let metadata = metadata_for(
        vec![setter(
            "getTags",
            "tags",
            list_of_string,
            SetterVariant::CollectionGetAndAdd {
                type_arg: TypeRef::class("java.lang.String"),
            },
        )],
        true,
    );
    let source = generate_builder_source(&metadata);

    assert!(source.contains("public PersonBuilder addToTags(final java.lang.String item) {"));
    assert!(source.contains("result.getTags().add(item);"));
    // No whole-value setter is emitted for a read-only property.
    assert!(!source.contains("public PersonBuilder tags("));
}

#[test]
fn missing_no_args_constructor_turns_build_into_a_failure() {
    let metadata = metadata_for(vec![], false);
    let source = generate_builder_source(&metadata);

    assert!(source.contains("public com.example.Person build() {"));
    assert!(source.contains("throw new UnsupportedOperationException("));
    assert!(!source.contains("new com.example.Person();"));
}

#[test]
fn nested_target_classes_render_with_dots() {
    let metadata = BuilderMetadata {
        package_name: "com.example".to_string(),
        name: "InnerBuilder".to_string(),
        built_type: BuiltType {
            class: target_class("com.example.Outer$Inner"),
            accessible_no_args_constructor: true,
            setters: vec![],
        },
    };
    let source = generate_builder_source(&metadata);
    assert!(source.contains("public com.example.Outer.Inner build() {"));
    assert!(source.contains("new com.example.Outer.Inner();"));
}
