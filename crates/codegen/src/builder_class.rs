//! Emits the Java source of one builder class.

use crate::render::{boxed_type, declaration_type, java_type, value_type};
use crate::source::SourceWriter;
use builderscope_core::model::{BuilderMetadata, Setter, SetterVariant, TypeRef};
use tracing::debug;

/// Render the complete compilation unit for one builder.
pub fn generate_builder_source(metadata: &BuilderMetadata) -> String {
    let target = metadata.built_type.class.fqn.replace('$', ".");
    let mut writer = SourceWriter::new();

    if !metadata.package_name.is_empty() {
        writer.line(&format!("package {};", metadata.package_name));
        writer.blank();
    }
    writer.line("/**");
    writer.line(&format!(" * Fluent builder for {{@link {}}}.", target));
    writer.line(" *");
    writer.line(" * <p>Generated by builderscope; manual edits will be overwritten.</p>");
    writer.line(" */");
    writer.line(&format!("public class {} {{", metadata.name));
    writer.indent();

    for setter in &metadata.built_type.setters {
        emit_fields(&mut writer, setter);
    }

    writer.blank();
    writer.line(&format!("private {}() {{", metadata.name));
    writer.indent();
    writer.line("// instances are obtained via newInstance()");
    writer.dedent();
    writer.line("}");
    writer.blank();
    writer.line(&format!("public static {} newInstance() {{", metadata.name));
    writer.indent();
    writer.line(&format!("return new {}();", metadata.name));
    writer.dedent();
    writer.line("}");

    for setter in &metadata.built_type.setters {
        emit_methods(&mut writer, &metadata.name, setter);
    }

    emit_build(&mut writer, &target, metadata);

    writer.dedent();
    writer.line("}");

    debug!(
        "generated builder {} for {} with {} setters",
        metadata.name,
        target,
        metadata.built_type.setters.len()
    );
    writer.finish()
}

fn emit_fields(writer: &mut SourceWriter, setter: &Setter) {
    let name = &setter.param_name;
    writer.blank();
    match &setter.variant {
        SetterVariant::Simple => {
            writer.line(&format!("private {} {};", declaration_type(&setter.param_type), name));
            writer.line(&format!("private boolean {}Set;", name));
        }
        SetterVariant::Array { component } => {
            writer.line(&format!("private {} {};", declaration_type(&setter.param_type), name));
            writer.line(&format!("private boolean {}Set;", name));
            writer.line(&format!(
                "private final java.util.List<{}> {}Additions = new java.util.ArrayList<>();",
                boxed_type(component),
                name
            ));
        }
        SetterVariant::Collection { type_arg } => {
            writer.line(&format!("private {} {};", declaration_type(&setter.param_type), name));
            writer.line(&format!("private boolean {}Set;", name));
            writer.line(&format!(
                "private final java.util.List<{}> {}Additions = new java.util.ArrayList<>();",
                boxed_type(type_arg),
                name
            ));
        }
        SetterVariant::Map { key, value } => {
            writer.line(&format!("private {} {};", declaration_type(&setter.param_type), name));
            writer.line(&format!("private boolean {}Set;", name));
            writer.line(&format!(
                "private final java.util.Map<{}, {}> {}Puts = new java.util.LinkedHashMap<>();",
                boxed_type(key),
                boxed_type(value),
                name
            ));
        }
        SetterVariant::CollectionGetAndAdd { type_arg } => {
            writer.line(&format!(
                "private final java.util.List<{}> {}Additions = new java.util.ArrayList<>();",
                boxed_type(type_arg),
                name
            ));
        }
    }
}

fn emit_methods(writer: &mut SourceWriter, builder_name: &str, setter: &Setter) {
    let name = &setter.param_name;
    match &setter.variant {
        SetterVariant::Simple | SetterVariant::Array { .. } => {
            emit_value_method(writer, builder_name, setter);
        }
        SetterVariant::Collection { type_arg } => {
            emit_value_method(writer, builder_name, setter);
            emit_add_method(writer, builder_name, name, type_arg);
        }
        SetterVariant::Map { key, value } => {
            emit_value_method(writer, builder_name, setter);
            writer.blank();
            writer.line(&format!(
                "public {} putIn{}(final {} key, final {} value) {{",
                builder_name,
                capitalize(name),
                value_type(key),
                value_type(value)
            ));
            writer.indent();
            writer.line(&format!("this.{}Puts.put(key, value);", name));
            writer.line("return this;");
            writer.dedent();
            writer.line("}");
        }
        SetterVariant::CollectionGetAndAdd { type_arg } => {
            emit_add_method(writer, builder_name, name, type_arg);
        }
    }
    if let SetterVariant::Array { component } = &setter.variant {
        emit_add_method(writer, builder_name, name, component);
    }
}

fn emit_value_method(writer: &mut SourceWriter, builder_name: &str, setter: &Setter) {
    let name = &setter.param_name;
    writer.blank();
    writer.line(&format!(
        "public {} {}(final {} {}) {{",
        builder_name,
        name,
        declaration_type(&setter.param_type),
        name
    ));
    writer.indent();
    writer.line(&format!("this.{} = {};", name, name));
    writer.line(&format!("this.{}Set = true;", name));
    writer.line("return this;");
    writer.dedent();
    writer.line("}");
}

fn emit_add_method(writer: &mut SourceWriter, builder_name: &str, name: &str, element: &TypeRef) {
    writer.blank();
    writer.line(&format!(
        "public {} addTo{}(final {} item) {{",
        builder_name,
        capitalize(name),
        value_type(element)
    ));
    writer.indent();
    writer.line(&format!("this.{}Additions.add(item);", name));
    writer.line("return this;");
    writer.dedent();
    writer.line("}");
}

fn emit_build(writer: &mut SourceWriter, target: &str, metadata: &BuilderMetadata) {
    writer.blank();
    writer.line(&format!("public {} build() {{", target));
    writer.indent();

    if !metadata.built_type.accessible_no_args_constructor {
        writer.line(&format!(
            "throw new UnsupportedOperationException(\"{} has no accessible no-args constructor\");",
            target
        ));
        writer.dedent();
        writer.line("}");
        return;
    }

    writer.line(&format!("final {} result = new {}();", target, target));
    for setter in &metadata.built_type.setters {
        emit_build_step(writer, setter);
    }
    writer.line("return result;");
    writer.dedent();
    writer.line("}");
}

fn emit_build_step(writer: &mut SourceWriter, setter: &Setter) {
    let name = &setter.param_name;
    let method = &setter.method_name;
    match &setter.variant {
        SetterVariant::Simple => {
            writer.line(&format!("if (this.{}Set) {{", name));
            writer.indent();
            writer.line(&format!("result.{}(this.{});", method, name));
            writer.dedent();
            writer.line("}");
        }
        SetterVariant::Array { component } => {
            writer.line(&format!("if (this.{}Set) {{", name));
            writer.indent();
            writer.line(&format!("result.{}(this.{});", method, name));
            writer.dedent();
            writer.line("}");
            writer.line(&format!("if (!this.{}Additions.isEmpty()) {{", name));
            writer.indent();
            writer.line(&format!(
                "final {}[] array = new {}[this.{}Additions.size()];",
                value_type(component),
                value_type(component),
                name
            ));
            writer.line("for (int i = 0; i < array.length; i++) {");
            writer.indent();
            writer.line(&format!("array[i] = this.{}Additions.get(i);", name));
            writer.dedent();
            writer.line("}");
            writer.line(&format!("result.{}(array);", method));
            writer.dedent();
            writer.line("}");
        }
        SetterVariant::Collection { .. } => {
            writer.line(&format!(
                "if (this.{}Set || !this.{}Additions.isEmpty()) {{",
                name, name
            ));
            writer.indent();
            writer.line(&format!(
                "final {} collection = this.{} != null ? this.{} : new {}<>();",
                declaration_type(&setter.param_type),
                name,
                name,
                collection_impl(&setter.param_type)
            ));
            writer.line(&format!("collection.addAll(this.{}Additions);", name));
            writer.line(&format!("result.{}(collection);", method));
            writer.dedent();
            writer.line("}");
        }
        SetterVariant::Map { .. } => {
            writer.line(&format!(
                "if (this.{}Set || !this.{}Puts.isEmpty()) {{",
                name, name
            ));
            writer.indent();
            writer.line(&format!(
                "final {} map = this.{} != null ? this.{} : new {}<>();",
                declaration_type(&setter.param_type),
                name,
                name,
                map_impl(&setter.param_type)
            ));
            writer.line(&format!("map.putAll(this.{}Puts);", name));
            writer.line(&format!("result.{}(map);", method));
            writer.dedent();
            writer.line("}");
        }
        SetterVariant::CollectionGetAndAdd { type_arg } => {
            writer.line(&format!(
                "for (final {} item : this.{}Additions) {{",
                value_type(type_arg),
                name
            ));
            writer.indent();
            writer.line(&format!("result.{}().add(item);", method));
            writer.dedent();
            writer.line("}");
        }
    }
}

/// Concrete collection implementation to instantiate for a collection
/// interface, chosen by the parameter's erasure.
fn collection_impl(param_type: &TypeRef) -> String {
    match param_type.erasure_fqn() {
        Some("java.util.Set") | Some("java.util.LinkedHashSet") => {
            "java.util.LinkedHashSet".to_string()
        }
        Some("java.util.SortedSet") | Some("java.util.NavigableSet") => {
            "java.util.TreeSet".to_string()
        }
        Some("java.util.Queue") | Some("java.util.Deque") => "java.util.ArrayDeque".to_string(),
        Some("java.util.Collection") | Some("java.util.List") | Some("java.lang.Iterable")
        | None => "java.util.ArrayList".to_string(),
        Some(concrete) => java_type(&TypeRef::class(concrete)),
    }
}

fn map_impl(param_type: &TypeRef) -> String {
    match param_type.erasure_fqn() {
        Some("java.util.SortedMap") | Some("java.util.NavigableMap") => {
            "java.util.TreeMap".to_string()
        }
        Some("java.util.Map") | None => "java.util.LinkedHashMap".to_string(),
        Some(concrete) => java_type(&TypeRef::class(concrete)),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
