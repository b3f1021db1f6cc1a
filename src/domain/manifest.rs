//! Build manifest reader
//!
//! The product name is found by scanning `Cargo.toml` line by line rather than
//! parsing it: the first `name = "..."` line anywhere in the file wins, and a
//! manifest without one falls back to the project directory's own name.

use std::path::Path;

use crate::error::{StagehandError, StagehandResult};

/// File that must sit at the root of every project directory
pub const MANIFEST_FILE: &str = "Cargo.toml";

/// Where the product name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// A `name` declaration in the manifest
    Declared,
    /// No usable declaration; the project directory's base name was used
    DirectoryFallback,
}

/// Identity of the project being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildManifest {
    pub product_name: String,
    pub source: NameSource,
}

impl BuildManifest {
    /// Read and scan `<project_dir>/Cargo.toml`.
    pub fn read(project_dir: &Path) -> StagehandResult<Self> {
        let path = project_dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path)
            .map_err(|source| StagehandError::ManifestRead { path, source })?;
        Ok(Self::from_manifest_text(&content, project_dir))
    }

    /// Scan manifest text; `project_dir` only supplies the fallback name.
    pub fn from_manifest_text(content: &str, project_dir: &Path) -> Self {
        match first_name_declaration(content) {
            Some(name) => Self {
                product_name: name,
                source: NameSource::Declared,
            },
            None => Self {
                product_name: directory_name(project_dir),
                source: NameSource::DirectoryFallback,
            },
        }
    }
}

/// Only the first `name` line counts; an empty value there means no name.
fn first_name_declaration(content: &str) -> Option<String> {
    let value = content.lines().find_map(|line| {
        let (key, value) = line.trim().split_once('=')?;
        (key.trim() == "name").then(|| unquote(value.trim()))
    })?;

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(rest) = value.strip_prefix(quote) {
            return rest.split(quote).next().unwrap_or(rest).trim();
        }
    }
    value.split('#').next().unwrap_or(value).trim()
}

fn directory_name(project_dir: &Path) -> String {
    project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "app".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn project() -> PathBuf {
        PathBuf::from("/work/charmline-project")
    }

    #[test]
    fn reads_package_name() {
        let manifest = BuildManifest::from_manifest_text(
            "[package]\nname = \"charmline\"\nversion = \"0.1.0\"\n",
            &project(),
        );
        assert_eq!(manifest.product_name, "charmline");
        assert_eq!(manifest.source, NameSource::Declared);
    }

    #[test]
    fn first_declaration_wins() {
        let manifest = BuildManifest::from_manifest_text(
            "[package]\nname = \"alpha\"\n\n[[bin]]\nname = \"beta\"\n",
            &project(),
        );
        assert_eq!(manifest.product_name, "alpha");
    }

    #[test]
    fn tolerates_indentation_and_missing_spaces() {
        let manifest =
            BuildManifest::from_manifest_text("[package]\n    name=\"charmline\"\n", &project());
        assert_eq!(manifest.product_name, "charmline");
    }

    #[test]
    fn ignores_keys_that_merely_start_with_name() {
        let manifest = BuildManifest::from_manifest_text(
            "[package]\nname_prefix = \"nope\"\nname = \"charmline\"\n",
            &project(),
        );
        assert_eq!(manifest.product_name, "charmline");
    }

    #[test]
    fn trailing_comment_is_not_part_of_the_name() {
        let manifest =
            BuildManifest::from_manifest_text("name = \"charmline\" # server\n", &project());
        assert_eq!(manifest.product_name, "charmline");
    }

    #[test]
    fn falls_back_to_directory_name() {
        let manifest =
            BuildManifest::from_manifest_text("[package]\nversion = \"0.1.0\"\n", &project());
        assert_eq!(manifest.product_name, "charmline-project");
        assert_eq!(manifest.source, NameSource::DirectoryFallback);
    }

    #[test]
    fn empty_name_falls_back_to_directory_name() {
        let manifest = BuildManifest::from_manifest_text("name = \"\"\n", &project());
        assert_eq!(manifest.source, NameSource::DirectoryFallback);
    }

    #[test]
    fn empty_first_name_is_not_overridden_by_a_later_one() {
        let manifest =
            BuildManifest::from_manifest_text("name = \"\"\nname = \"beta\"\n", &project());
        assert_eq!(manifest.product_name, "charmline-project");
        assert_eq!(manifest.source, NameSource::DirectoryFallback);
    }

    #[test]
    fn read_from_disk() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "name = 'server'\n").unwrap();

        let manifest = BuildManifest::read(dir.path()).unwrap();
        assert_eq!(manifest.product_name, "server");
    }

    #[test]
    fn unreadable_manifest_is_consistency_error() {
        let dir = tempdir().unwrap();

        let err = BuildManifest::read(dir.path()).unwrap_err();

        assert!(matches!(err, StagehandError::ManifestRead { .. }));
        assert_eq!(err.class(), crate::error::ErrorClass::Consistency);
    }

    proptest! {
        #[test]
        fn later_declarations_never_override_the_first(
            first in "[a-z][a-z0-9_-]{0,12}",
            later in proptest::collection::vec("[a-z][a-z0-9_-]{0,12}", 1..4),
        ) {
            let mut text = format!("[package]\nname = \"{}\"\n", first);
            for name in &later {
                text.push_str(&format!("[[bin]]\nname = \"{}\"\n", name));
            }

            let manifest = BuildManifest::from_manifest_text(&text, &project());
            prop_assert_eq!(manifest.product_name, first);
        }
    }
}
