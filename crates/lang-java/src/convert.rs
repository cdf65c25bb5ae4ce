//! Conversion from parsed class files into the core class model.

use crate::signature::{parse_class_signature, parse_method_signature};
use builderscope_core::error::{CoreError, Result};
use builderscope_core::model::{
    ClassKind, JavaClass, JavaConstructor, JavaMethod, TypeParameter, TypeRef,
};
use ristretto_classfile::attributes::Attribute;
use ristretto_classfile::{
    BaseType, ClassAccessFlags, ClassFile, ConstantPool, FieldType, MethodAccessFlags,
};

/// Build a [`JavaClass`] from a parsed class file.
///
/// `fqn` is the dotted binary name the caller indexed the file under; the
/// class file itself is trusted to match it.
pub fn convert_class(class_file: &ClassFile, fqn: &str) -> Result<JavaClass> {
    let pool = &class_file.constant_pool;
    let access = class_file.access_flags;

    let kind = if access.contains(ClassAccessFlags::ANNOTATION) {
        ClassKind::Annotation
    } else if access.contains(ClassAccessFlags::INTERFACE) {
        ClassKind::Interface
    } else if access.contains(ClassAccessFlags::ENUM) {
        ClassKind::Enum
    } else {
        ClassKind::Class
    };

    let simple_name = fqn.rsplit(['.', '$']).next().unwrap_or(fqn).to_string();
    let package_name = fqn.rsplit_once('.').map(|(p, _)| p).unwrap_or("").to_string();

    let nested_segment = fqn.rsplit('$').next().filter(|_| fqn.contains('$'));
    let is_member = nested_segment.is_some();
    // Anonymous and local classes carry a numeric segment in their binary
    // name; instance inner classes carry an outer-instance reference field.
    let is_anonymous = nested_segment
        .is_some_and(|segment| segment.chars().next().is_some_and(|c| c.is_ascii_digit()));
    let has_outer_reference = class_file.fields.iter().any(|field| {
        utf8(pool, field.name_index)
            .map(|name| name.starts_with("this$"))
            .unwrap_or(false)
    });
    let is_static_member = is_member && !is_anonymous && !has_outer_reference;

    let (type_parameters, superclass, interfaces) =
        match signature_of(&class_file.attributes, pool) {
            Some(signature) => {
                let parsed = parse_class_signature(&signature)?;
                (
                    parsed.type_parameters,
                    Some(parsed.superclass),
                    parsed.interfaces,
                )
            }
            None => {
                let superclass = if class_file.super_class == 0 {
                    None
                } else {
                    Some(TypeRef::class(class_name(pool, class_file.super_class)?))
                };
                let interfaces = class_file
                    .interfaces
                    .iter()
                    .map(|&index| Ok(TypeRef::class(class_name(pool, index)?)))
                    .collect::<Result<Vec<_>>>()?;
                (Vec::<TypeParameter>::new(), superclass, interfaces)
            }
        };

    let mut methods = Vec::new();
    let mut constructors = Vec::new();
    for method in &class_file.methods {
        let name = utf8(pool, method.name_index)?.to_string();
        if name == "<clinit>" {
            continue;
        }
        let flags = method.access_flags;
        let modifiers = u32::from(flags.bits());
        let descriptor = utf8(pool, method.descriptor_index)?;
        let (descriptor_params, descriptor_return) = parse_descriptor(descriptor)?;

        let (parameters, return_type) = match signature_of(&method.attributes, pool) {
            Some(signature) => {
                let parsed = parse_method_signature(&signature)?;
                if parsed.parameters.len() == descriptor_params.len() {
                    (parsed.parameters, parsed.return_type)
                } else {
                    // Signatures of inner-class constructors omit synthetic
                    // parameters; the descriptor view is authoritative then.
                    (descriptor_params, descriptor_return)
                }
            }
            None => (descriptor_params, descriptor_return),
        };

        if name == "<init>" {
            constructors.push(JavaConstructor {
                modifiers,
                parameters,
            });
        } else {
            methods.push(JavaMethod {
                name,
                modifiers,
                is_bridge: flags.contains(MethodAccessFlags::BRIDGE),
                parameters,
                return_type,
            });
        }
    }

    Ok(JavaClass {
        fqn: fqn.to_string(),
        package_name,
        simple_name,
        kind,
        modifiers: u32::from(access.bits()),
        is_anonymous,
        is_member,
        is_static_member,
        type_parameters,
        superclass,
        interfaces,
        methods,
        constructors,
    })
}

/// Method descriptor to declared parameter and return types.
fn parse_descriptor(descriptor: &str) -> Result<(Vec<TypeRef>, TypeRef)> {
    let (params, return_type) = FieldType::parse_method_descriptor(descriptor).map_err(|err| {
        CoreError::Reflection(format!(
            "failed to parse method descriptor {}: {:?}",
            descriptor, err
        ))
    })?;
    let parameters = params.iter().map(field_type_to_ref).collect();
    let return_type = match &return_type {
        Some(field_type) => field_type_to_ref(field_type),
        None => TypeRef::primitive("void"),
    };
    Ok((parameters, return_type))
}

pub(crate) fn field_type_to_ref(field_type: &FieldType) -> TypeRef {
    match field_type {
        FieldType::Base(BaseType::Byte) => TypeRef::primitive("byte"),
        FieldType::Base(BaseType::Char) => TypeRef::primitive("char"),
        FieldType::Base(BaseType::Double) => TypeRef::primitive("double"),
        FieldType::Base(BaseType::Float) => TypeRef::primitive("float"),
        FieldType::Base(BaseType::Int) => TypeRef::primitive("int"),
        FieldType::Base(BaseType::Long) => TypeRef::primitive("long"),
        FieldType::Base(BaseType::Short) => TypeRef::primitive("short"),
        FieldType::Base(BaseType::Boolean) => TypeRef::primitive("boolean"),
        FieldType::Object(name) => TypeRef::class(name.replace('/', ".")),
        FieldType::Array(component) => {
            let mut dimensions = 1usize;
            let mut current = component.as_ref();
            while let FieldType::Array(inner) = current {
                dimensions += 1;
                current = inner.as_ref();
            }
            TypeRef::array(field_type_to_ref(current), dimensions)
        }
    }
}

fn signature_of(attributes: &[Attribute], pool: &ConstantPool) -> Option<String> {
    attributes.iter().find_map(|attribute| match attribute {
        Attribute::Signature {
            signature_index, ..
        } => utf8(pool, *signature_index).ok().map(str::to_string),
        _ => None,
    })
}

fn utf8(pool: &ConstantPool, index: u16) -> Result<&str> {
    pool.try_get_utf8(index)
        .map_err(|err| {
            CoreError::Reflection(format!(
                "failed to read constant pool entry {}: {:?}",
                index, err
            ))
        })
}

fn class_name(pool: &ConstantPool, index: u16) -> Result<String> {
    pool.try_get_class(index)
        .map(|name| name.replace('/', "."))
        .map_err(|err| {
            CoreError::Reflection(format!(
                "failed to read class constant {}: {:?}",
                index, err
            ))
        })
}
