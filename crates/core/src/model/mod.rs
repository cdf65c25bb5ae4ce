pub mod class;
pub mod metadata;
pub mod setter;
pub mod types;
pub mod visibility;

pub use class::{ClassKind, JavaClass, JavaConstructor, JavaMethod, TypeParameter};
pub use metadata::{BuilderMetadata, BuiltType};
pub use setter::{Setter, SetterVariant};
pub use types::{TypeRef, OBJECT};
pub use visibility::{modifiers, Visibility};
