use serde::{Deserialize, Serialize};

/// JVM access and property flags shared by classes, methods and fields.
pub mod modifiers {
    pub const PUBLIC: u32 = 0x0001;
    pub const PRIVATE: u32 = 0x0002;
    pub const PROTECTED: u32 = 0x0004;
    pub const STATIC: u32 = 0x0008;
    pub const FINAL: u32 = 0x0010;
    pub const BRIDGE: u32 = 0x0040;
    pub const VARARGS: u32 = 0x0080;
    pub const INTERFACE: u32 = 0x0200;
    pub const ABSTRACT: u32 = 0x0400;
    pub const SYNTHETIC: u32 = 0x1000;
    pub const ANNOTATION: u32 = 0x2000;
    pub const ENUM: u32 = 0x4000;
}

/// Access level of a class or member, ordered from most to least permissive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    PackagePrivate,
    Private,
}

impl Visibility {
    /// Classify a raw modifier bitmask. Total over all 32-bit inputs: absent
    /// access bits mean package-private.
    pub fn from_modifiers(mods: u32) -> Self {
        if mods & modifiers::PUBLIC != 0 {
            Visibility::Public
        } else if mods & modifiers::PROTECTED != 0 {
            Visibility::Protected
        } else if mods & modifiers::PRIVATE != 0 {
            Visibility::Private
        } else {
            Visibility::PackagePrivate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_access_bits() {
        assert_eq!(Visibility::from_modifiers(modifiers::PUBLIC), Visibility::Public);
        assert_eq!(
            Visibility::from_modifiers(modifiers::PROTECTED),
            Visibility::Protected
        );
        assert_eq!(
            Visibility::from_modifiers(modifiers::PRIVATE),
            Visibility::Private
        );
        assert_eq!(Visibility::from_modifiers(0), Visibility::PackagePrivate);
    }

    #[test]
    fn total_over_arbitrary_bitmasks() {
        // Non-access bits never change the outcome.
        assert_eq!(
            Visibility::from_modifiers(modifiers::PUBLIC | modifiers::STATIC | modifiers::FINAL),
            Visibility::Public
        );
        assert_eq!(
            Visibility::from_modifiers(0xFFFF_FFF8),
            Visibility::PackagePrivate
        );
    }

    #[test]
    fn ordered_most_to_least_permissive() {
        assert!(Visibility::Public < Visibility::Protected);
        assert!(Visibility::Protected < Visibility::PackagePrivate);
        assert!(Visibility::PackagePrivate < Visibility::Private);
    }
}
