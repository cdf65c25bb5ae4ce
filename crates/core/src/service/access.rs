//! Accessibility evaluation for classes and members.

use crate::model::Visibility;

/// Whether a member (or class) with the given visibility, declared in
/// `declaring_package`, is usable from code generated into `from_package`.
///
/// Public members always are; protected and package-private members only
/// within their own package; private members never across classes.
pub fn is_accessible_from(
    visibility: Visibility,
    declaring_package: &str,
    from_package: &str,
) -> bool {
    match visibility {
        Visibility::Public => true,
        Visibility::Protected | Visibility::PackagePrivate => declaring_package == from_package,
        Visibility::Private => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_is_always_accessible() {
        assert!(is_accessible_from(Visibility::Public, "com.a", "com.b"));
    }

    #[test]
    fn protected_and_package_private_require_same_package() {
        for visibility in [Visibility::Protected, Visibility::PackagePrivate] {
            assert!(is_accessible_from(visibility, "com.a", "com.a"));
            assert!(!is_accessible_from(visibility, "com.a", "com.b"));
        }
    }

    #[test]
    fn private_is_never_accessible() {
        assert!(!is_accessible_from(Visibility::Private, "com.a", "com.a"));
        assert!(!is_accessible_from(Visibility::Private, "com.a", "com.b"));
    }
}
