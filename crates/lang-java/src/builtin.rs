//! Built-in stubs for common JDK types.
//!
//! Classification of collection and map parameters needs the `java.util`
//! hierarchy, and hierarchy collection needs `java.lang.Object`, but the JDK
//! is rarely part of the scanned classpath. This table serves hierarchy-only
//! stubs (no members) for the types that matter.

use builderscope_core::model::{
    modifiers, ClassKind, JavaClass, JavaConstructor, TypeParameter, TypeRef,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Look up a built-in stub by qualified name.
pub fn builtin_class(fqn: &str) -> Option<Arc<JavaClass>> {
    BUILTINS.get(fqn).cloned()
}

static BUILTINS: Lazy<HashMap<String, Arc<JavaClass>>> = Lazy::new(build_table);

fn build_table() -> HashMap<String, Arc<JavaClass>> {
    let mut table: HashMap<String, Arc<JavaClass>> = HashMap::new();
    let mut put = |class: JavaClass| {
        table.insert(class.fqn.clone(), Arc::new(class));
    };

    let mut object = stub("java.lang.Object", ClassKind::Class, &[], None, vec![]);
    object.constructors.push(JavaConstructor {
        modifiers: modifiers::PUBLIC,
        parameters: vec![],
    });
    put(object);

    for name in [
        "java.lang.String",
        "java.lang.Boolean",
        "java.lang.Byte",
        "java.lang.Character",
        "java.lang.Double",
        "java.lang.Float",
        "java.lang.Integer",
        "java.lang.Long",
        "java.lang.Number",
        "java.lang.Short",
        "java.lang.CharSequence",
    ] {
        put(stub(name, ClassKind::Class, &[], Some(TypeRef::object()), vec![]));
    }

    put(interface("java.lang.Iterable", &["T"], vec![]));
    put(interface("java.lang.Comparable", &["T"], vec![]));

    // Marker and functional interfaces routinely found on POJO hierarchies.
    for name in [
        "java.io.Serializable",
        "java.io.Closeable",
        "java.lang.AutoCloseable",
        "java.lang.Cloneable",
        "java.lang.Runnable",
        "java.util.RandomAccess",
    ] {
        put(interface(name, &[], vec![]));
    }

    put(stub(
        "java.lang.Record",
        ClassKind::Class,
        &[],
        Some(TypeRef::object()),
        vec![],
    ));
    put(abstract_class(
        "java.lang.Enum",
        &["E"],
        Some(TypeRef::object()),
        vec![parameterized("java.lang.Comparable", &["E"])],
    ));
    put(stub(
        "java.lang.Throwable",
        ClassKind::Class,
        &[],
        Some(TypeRef::object()),
        vec![TypeRef::class("java.io.Serializable")],
    ));
    put(stub(
        "java.lang.Exception",
        ClassKind::Class,
        &[],
        Some(TypeRef::class("java.lang.Throwable")),
        vec![],
    ));
    put(stub(
        "java.lang.RuntimeException",
        ClassKind::Class,
        &[],
        Some(TypeRef::class("java.lang.Exception")),
        vec![],
    ));
    put(stub(
        "java.lang.Error",
        ClassKind::Class,
        &[],
        Some(TypeRef::class("java.lang.Throwable")),
        vec![],
    ));

    put(interface(
        "java.util.Collection",
        &["E"],
        vec![parameterized("java.lang.Iterable", &["E"])],
    ));
    for name in ["java.util.List", "java.util.Set", "java.util.Queue"] {
        put(interface(
            name,
            &["E"],
            vec![parameterized("java.util.Collection", &["E"])],
        ));
    }
    put(interface(
        "java.util.Deque",
        &["E"],
        vec![parameterized("java.util.Queue", &["E"])],
    ));
    put(interface(
        "java.util.SortedSet",
        &["E"],
        vec![parameterized("java.util.Set", &["E"])],
    ));
    put(interface(
        "java.util.NavigableSet",
        &["E"],
        vec![parameterized("java.util.SortedSet", &["E"])],
    ));
    put(interface("java.util.Map", &["K", "V"], vec![]));
    put(interface(
        "java.util.SortedMap",
        &["K", "V"],
        vec![parameterized("java.util.Map", &["K", "V"])],
    ));
    put(interface(
        "java.util.NavigableMap",
        &["K", "V"],
        vec![parameterized("java.util.SortedMap", &["K", "V"])],
    ));

    put(abstract_class(
        "java.util.AbstractCollection",
        &["E"],
        Some(TypeRef::object()),
        vec![parameterized("java.util.Collection", &["E"])],
    ));
    put(abstract_class(
        "java.util.AbstractList",
        &["E"],
        Some(parameterized("java.util.AbstractCollection", &["E"])),
        vec![parameterized("java.util.List", &["E"])],
    ));
    put(abstract_class(
        "java.util.AbstractSet",
        &["E"],
        Some(parameterized("java.util.AbstractCollection", &["E"])),
        vec![parameterized("java.util.Set", &["E"])],
    ));
    put(abstract_class(
        "java.util.AbstractMap",
        &["K", "V"],
        Some(TypeRef::object()),
        vec![parameterized("java.util.Map", &["K", "V"])],
    ));

    put(stub(
        "java.util.ArrayList",
        ClassKind::Class,
        &["E"],
        Some(parameterized("java.util.AbstractList", &["E"])),
        vec![parameterized("java.util.List", &["E"])],
    ));
    put(stub(
        "java.util.LinkedList",
        ClassKind::Class,
        &["E"],
        Some(parameterized("java.util.AbstractList", &["E"])),
        vec![
            parameterized("java.util.List", &["E"]),
            parameterized("java.util.Deque", &["E"]),
        ],
    ));
    put(stub(
        "java.util.HashSet",
        ClassKind::Class,
        &["E"],
        Some(parameterized("java.util.AbstractSet", &["E"])),
        vec![parameterized("java.util.Set", &["E"])],
    ));
    put(stub(
        "java.util.LinkedHashSet",
        ClassKind::Class,
        &["E"],
        Some(parameterized("java.util.HashSet", &["E"])),
        vec![parameterized("java.util.Set", &["E"])],
    ));
    put(stub(
        "java.util.TreeSet",
        ClassKind::Class,
        &["E"],
        Some(parameterized("java.util.AbstractSet", &["E"])),
        vec![parameterized("java.util.NavigableSet", &["E"])],
    ));
    put(stub(
        "java.util.ArrayDeque",
        ClassKind::Class,
        &["E"],
        Some(parameterized("java.util.AbstractCollection", &["E"])),
        vec![parameterized("java.util.Deque", &["E"])],
    ));
    put(stub(
        "java.util.PriorityQueue",
        ClassKind::Class,
        &["E"],
        Some(parameterized("java.util.AbstractCollection", &["E"])),
        vec![parameterized("java.util.Queue", &["E"])],
    ));
    put(stub(
        "java.util.HashMap",
        ClassKind::Class,
        &["K", "V"],
        Some(parameterized("java.util.AbstractMap", &["K", "V"])),
        vec![parameterized("java.util.Map", &["K", "V"])],
    ));
    put(stub(
        "java.util.LinkedHashMap",
        ClassKind::Class,
        &["K", "V"],
        Some(parameterized("java.util.HashMap", &["K", "V"])),
        vec![parameterized("java.util.Map", &["K", "V"])],
    ));
    put(stub(
        "java.util.TreeMap",
        ClassKind::Class,
        &["K", "V"],
        Some(parameterized("java.util.AbstractMap", &["K", "V"])),
        vec![parameterized("java.util.NavigableMap", &["K", "V"])],
    ));

    table
}

fn parameterized(fqn: &str, params: &[&str]) -> TypeRef {
    TypeRef::generic(
        TypeRef::class(fqn),
        params.iter().map(|name| TypeRef::variable(*name)).collect(),
    )
}

fn interface(fqn: &str, params: &[&str], supers: Vec<TypeRef>) -> JavaClass {
    let mut class = stub(fqn, ClassKind::Interface, params, None, supers);
    class.modifiers |= modifiers::INTERFACE | modifiers::ABSTRACT;
    class
}

fn abstract_class(
    fqn: &str,
    params: &[&str],
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
) -> JavaClass {
    let mut class = stub(fqn, ClassKind::Class, params, superclass, interfaces);
    class.modifiers |= modifiers::ABSTRACT;
    class
}

fn stub(
    fqn: &str,
    kind: ClassKind,
    params: &[&str],
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
) -> JavaClass {
    JavaClass {
        fqn: fqn.to_string(),
        package_name: fqn.rsplit_once('.').map(|(p, _)| p).unwrap_or("").to_string(),
        simple_name: fqn.rsplit('.').next().unwrap_or(fqn).to_string(),
        kind,
        modifiers: modifiers::PUBLIC,
        is_anonymous: false,
        is_member: false,
        is_static_member: false,
        type_parameters: params
            .iter()
            .map(|name| TypeParameter {
                name: name.to_string(),
                bounds: vec![],
            })
            .collect(),
        superclass,
        interfaces,
        methods: vec![],
        constructors: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_serves_core_types() {
        assert!(builtin_class("java.lang.Object").is_some());
        assert!(builtin_class("java.util.Collection").is_some());
        assert!(builtin_class("java.util.HashMap").is_some());
        assert!(builtin_class("com.example.NotBuiltin").is_none());
    }

    #[test]
    fn stubs_carry_their_generic_supertype_links() {
        let array_list = builtin_class("java.util.ArrayList").unwrap();
        assert_eq!(array_list.superclass_fqn(), Some("java.util.AbstractList"));
        assert_eq!(
            array_list.interfaces,
            vec![parameterized("java.util.List", &["E"])]
        );
        assert_eq!(array_list.type_parameters.len(), 1);
    }
}
