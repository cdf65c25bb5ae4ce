//! Mock class store used by the integration tests.
//!
//! Built with a fluent API so tests read like the class declarations they
//! model. A fresh store is seeded with the handful of `java.lang` /
//! `java.util` types the services routinely touch.

#![allow(dead_code)]

use builderscope_core::error::Result;
use builderscope_core::introspect::ClassStore;
use builderscope_core::model::{
    modifiers, ClassKind, JavaClass, JavaConstructor, JavaMethod, TypeParameter, TypeRef,
};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct MockClassStore {
    classes: HashMap<String, Arc<JavaClass>>,
}

impl MockClassStore {
    /// Empty store seeded with basic JDK types.
    pub fn new() -> Self {
        let mut store = MockClassStore {
            classes: HashMap::new(),
        };
        store = store.add(
            ClassBuilder::new("java.lang.Object")
                .root()
                .constructor(modifiers::PUBLIC, vec![])
                .build(),
        );
        store = store.add(ClassBuilder::new("java.lang.String").build());
        store = store.add(ClassBuilder::new("java.lang.Integer").build());
        store = store.add(
            ClassBuilder::new("java.util.Collection")
                .interface()
                .type_params(&["E"])
                .root()
                .build(),
        );
        for (name, parent) in [
            ("java.util.List", "java.util.Collection"),
            ("java.util.Set", "java.util.Collection"),
            ("java.util.Queue", "java.util.Collection"),
            ("java.util.Deque", "java.util.Queue"),
        ] {
            store = store.add(
                ClassBuilder::new(name)
                    .interface()
                    .type_params(&["E"])
                    .root()
                    .implements(TypeRef::generic(
                        TypeRef::class(parent),
                        vec![TypeRef::variable("E")],
                    ))
                    .build(),
            );
        }
        store = store.add(
            ClassBuilder::new("java.util.Map")
                .interface()
                .type_params(&["K", "V"])
                .root()
                .build(),
        );
        store = store.add(
            ClassBuilder::new("java.util.ArrayList")
                .type_params(&["E"])
                .implements(TypeRef::generic(
                    TypeRef::class("java.util.List"),
                    vec![TypeRef::variable("E")],
                ))
                .build(),
        );
        store
    }

    pub fn add(mut self, class: JavaClass) -> Self {
        self.classes.insert(class.fqn.clone(), Arc::new(class));
        self
    }

    pub fn get(&self, fqn: &str) -> Arc<JavaClass> {
        Arc::clone(self.classes.get(fqn).expect("class not registered in mock"))
    }
}

impl ClassStore for MockClassStore {
    fn load(&self, fqn: &str) -> Result<Option<Arc<JavaClass>>> {
        Ok(self.classes.get(fqn).map(Arc::clone))
    }

    fn collect_package(&self, package: &str) -> Result<Vec<Arc<JavaClass>>> {
        let prefix = format!("{}.", package);
        let mut found: Vec<Arc<JavaClass>> = self
            .classes
            .values()
            .filter(|class| class.fqn.starts_with(&prefix))
            .map(Arc::clone)
            .collect();
        found.sort_by(|a, b| a.fqn.cmp(&b.fqn));
        Ok(found)
    }
}

/// Fluent builder for mock classes.
pub struct ClassBuilder {
    class: JavaClass,
}

impl ClassBuilder {
    pub fn new(fqn: &str) -> Self {
        let simple_name = fqn.rsplit(['.', '$']).next().unwrap_or(fqn).to_string();
        let package_name = fqn.rsplit_once('.').map(|(p, _)| p).unwrap_or("").to_string();
        ClassBuilder {
            class: JavaClass {
                fqn: fqn.to_string(),
                package_name,
                simple_name,
                kind: ClassKind::Class,
                modifiers: modifiers::PUBLIC,
                is_anonymous: false,
                is_member: fqn.contains('$'),
                is_static_member: fqn.contains('$'),
                type_parameters: vec![],
                superclass: Some(TypeRef::object()),
                interfaces: vec![],
                methods: vec![],
                constructors: vec![],
            },
        }
    }

    /// No superclass; for java.lang.Object and interfaces.
    pub fn root(mut self) -> Self {
        self.class.superclass = None;
        self
    }

    pub fn interface(mut self) -> Self {
        self.class.kind = ClassKind::Interface;
        self.class.modifiers |= modifiers::INTERFACE | modifiers::ABSTRACT;
        self
    }

    pub fn enumeration(mut self) -> Self {
        self.class.kind = ClassKind::Enum;
        self
    }

    pub fn modifiers(mut self, modifiers: u32) -> Self {
        self.class.modifiers = modifiers;
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.class.is_anonymous = true;
        self
    }

    pub fn inner_non_static(mut self) -> Self {
        self.class.is_member = true;
        self.class.is_static_member = false;
        self
    }

    pub fn type_params(mut self, names: &[&str]) -> Self {
        self.class.type_parameters = names
            .iter()
            .map(|name| TypeParameter {
                name: name.to_string(),
                bounds: vec![],
            })
            .collect();
        self
    }

    pub fn extends(mut self, superclass: TypeRef) -> Self {
        self.class.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.class.interfaces.push(interface);
        self
    }

    pub fn method(mut self, name: &str, modifiers: u32, parameters: Vec<TypeRef>, return_type: TypeRef) -> Self {
        self.class.methods.push(JavaMethod {
            name: name.to_string(),
            modifiers,
            is_bridge: false,
            parameters,
            return_type,
        });
        self
    }

    pub fn bridge_method(mut self, name: &str, parameters: Vec<TypeRef>) -> Self {
        self.class.methods.push(JavaMethod {
            name: name.to_string(),
            modifiers: modifiers::PUBLIC,
            is_bridge: true,
            parameters,
            return_type: TypeRef::primitive("void"),
        });
        self
    }

    /// Public void setter taking one parameter.
    pub fn setter(self, name: &str, param: TypeRef) -> Self {
        self.method(name, modifiers::PUBLIC, vec![param], TypeRef::primitive("void"))
    }

    /// Public zero-argument getter.
    pub fn getter(self, name: &str, return_type: TypeRef) -> Self {
        self.method(name, modifiers::PUBLIC, vec![], return_type)
    }

    pub fn constructor(mut self, modifiers: u32, parameters: Vec<TypeRef>) -> Self {
        self.class.constructors.push(JavaConstructor {
            modifiers,
            parameters,
        });
        self
    }

    pub fn build(self) -> JavaClass {
        self.class
    }
}
