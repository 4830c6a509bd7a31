use std::fmt;

/// Separator between package name and version in a release tag
pub const PACKAGE_SEPARATOR: char = '@';

/// A release tag of the form `<package>@<version>` (e.g. "pkg-a@1.2.3")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Format the release tag for a package version
    pub fn for_package(package_name: &str, version: &semver::Version) -> Self {
        Tag::new(format!("{}{}{}", package_name, PACKAGE_SEPARATOR, version))
    }

    /// Package part of the tag (everything before the last `@`).
    ///
    /// The search skips the first character so scoped names like
    /// `@scope/pkg@1.0.0` keep their leading `@`.
    pub fn package(&self) -> Option<&str> {
        let idx = self.separator_index()?;
        Some(&self.name[..idx])
    }

    /// Semantic version part of the tag, if it parses
    pub fn version(&self) -> Option<semver::Version> {
        let idx = self.separator_index()?;
        let raw = &self.name[idx + PACKAGE_SEPARATOR.len_utf8()..];
        semver::Version::parse(raw.trim_start_matches('v')).ok()
    }

    /// Whether this tag is a semver release of `package_name`
    pub fn is_release_of(&self, package_name: &str) -> bool {
        self.package() == Some(package_name) && self.version().is_some()
    }

    fn separator_index(&self) -> Option<usize> {
        let mut chars = self.name.char_indices();
        let (_, first) = chars.next()?;
        self.name[first.len_utf8()..]
            .rfind(PACKAGE_SEPARATOR)
            .map(|idx| idx + first.len_utf8())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_new() {
        let tag = Tag::new("pkg-a@1.2.3");
        assert_eq!(tag.name, "pkg-a@1.2.3");
    }

    #[test]
    fn test_tag_parts() {
        let tag = Tag::new("pkg-a@1.2.3");
        assert_eq!(tag.package(), Some("pkg-a"));
        assert_eq!(tag.version(), Some(semver::Version::new(1, 2, 3)));
    }

    #[test]
    fn test_scoped_package() {
        let tag = Tag::new("@scope/pkg@2.0.0-beta.1");
        assert_eq!(tag.package(), Some("@scope/pkg"));
        assert_eq!(
            tag.version(),
            Some(semver::Version::parse("2.0.0-beta.1").unwrap())
        );
    }

    #[test]
    fn test_v_prefixed_version() {
        let tag = Tag::new("pkg@v0.4.1");
        assert_eq!(tag.version(), Some(semver::Version::new(0, 4, 1)));
    }

    #[test]
    fn test_not_a_release_tag() {
        assert_eq!(Tag::new("v1.2.3").package(), None);
        assert!(!Tag::new("pkg@latest").is_release_of("pkg"));
        assert!(!Tag::new("@scope").is_release_of("@scope"));
    }

    #[test]
    fn test_is_release_of_exact_package() {
        let tag = Tag::new("backend@1.0.0");
        assert!(tag.is_release_of("backend"));
        assert!(!tag.is_release_of("back"));
        assert!(!Tag::new("backend-api@1.0.0").is_release_of("backend"));
    }

    #[test]
    fn test_for_package() {
        let tag = Tag::for_package("pkg-b", &semver::Version::new(0, 1, 0));
        assert_eq!(tag.to_string(), "pkg-b@0.1.0");
    }
}
