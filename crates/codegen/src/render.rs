//! Rendering of resolved types into Java source text.

use builderscope_core::model::TypeRef;

/// Render a type the way it appears in source, fully qualified. Nested class
/// separators become dots.
pub fn java_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive(name) | TypeRef::Variable(name) => name.clone(),
        TypeRef::Class(fqn) => fqn.replace('$', "."),
        TypeRef::Generic { base, args } => {
            let rendered: Vec<String> = args.iter().map(java_type).collect();
            format!("{}<{}>", java_type(base), rendered.join(", "))
        }
        TypeRef::Array {
            element,
            dimensions,
        } => format!("{}{}", java_type(element), "[]".repeat(*dimensions)),
        TypeRef::Wildcard { bound, is_upper } => match bound {
            Some(bound) if *is_upper => format!("? extends {}", java_type(bound)),
            Some(bound) => format!("? super {}", java_type(bound)),
            None => "?".to_string(),
        },
    }
}

/// Render a type for a declaration position inside the builder. Free type
/// variables of the built class are not in scope there, so they erase to
/// `java.lang.Object`.
pub fn declaration_type(ty: &TypeRef) -> String {
    java_type(&erase_variables(ty))
}

/// Render a type usable as a standalone value parameter: wildcards collapse
/// to their upper bound (or `Object`), type variables erase.
pub fn value_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Wildcard {
            bound: Some(bound),
            is_upper: true,
        } => declaration_type(bound),
        TypeRef::Wildcard { .. } => "java.lang.Object".to_string(),
        other => declaration_type(other),
    }
}

/// Boxed counterpart of a primitive, for use in generic positions.
pub fn boxed_type(ty: &TypeRef) -> String {
    if let TypeRef::Primitive(name) = ty {
        let wrapper = match name.as_str() {
            "boolean" => "java.lang.Boolean",
            "byte" => "java.lang.Byte",
            "char" => "java.lang.Character",
            "double" => "java.lang.Double",
            "float" => "java.lang.Float",
            "int" => "java.lang.Integer",
            "long" => "java.lang.Long",
            "short" => "java.lang.Short",
            other => other,
        };
        return wrapper.to_string();
    }
    value_type(ty)
}

fn erase_variables(ty: &TypeRef) -> TypeRef {
    match ty {
        TypeRef::Variable(_) => TypeRef::object(),
        TypeRef::Generic { base, args } => TypeRef::Generic {
            base: Box::new(erase_variables(base)),
            args: args.iter().map(erase_variables).collect(),
        },
        TypeRef::Array {
            element,
            dimensions,
        } => TypeRef::Array {
            element: Box::new(erase_variables(element)),
            dimensions: *dimensions,
        },
        TypeRef::Wildcard { bound, is_upper } => TypeRef::Wildcard {
            bound: bound.as_ref().map(|bound| Box::new(erase_variables(bound))),
            is_upper: *is_upper,
        },
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_classes_with_dots() {
        assert_eq!(
            java_type(&TypeRef::class("com.example.Outer$Inner")),
            "com.example.Outer.Inner"
        );
    }

    #[test]
    fn renders_generics_arrays_and_wildcards() {
        let ty = TypeRef::generic(
            TypeRef::class("java.util.Map"),
            vec![
                TypeRef::unbounded_wildcard(),
                TypeRef::array(TypeRef::primitive("int"), 1),
            ],
        );
        assert_eq!(java_type(&ty), "java.util.Map<?, int[]>");
    }

    #[test]
    fn declaration_type_erases_free_variables() {
        let ty = TypeRef::generic(
            TypeRef::class("java.util.List"),
            vec![TypeRef::variable("T")],
        );
        assert_eq!(declaration_type(&ty), "java.util.List<java.lang.Object>");
    }

    #[test]
    fn value_type_collapses_wildcards() {
        let upper = TypeRef::Wildcard {
            bound: Some(Box::new(TypeRef::class("java.lang.Number"))),
            is_upper: true,
        };
        assert_eq!(value_type(&upper), "java.lang.Number");
        assert_eq!(value_type(&TypeRef::unbounded_wildcard()), "java.lang.Object");
    }

    #[test]
    fn boxes_primitives() {
        assert_eq!(boxed_type(&TypeRef::primitive("float")), "java.lang.Float");
        assert_eq!(
            boxed_type(&TypeRef::class("java.lang.String")),
            "java.lang.String"
        );
    }
}
