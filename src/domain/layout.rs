//! Build output layout
//!
//! Pure path arithmetic: where the build tool leaves the executable, and
//! where staging puts it.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;

/// Locates build output inside a project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    project_dir: PathBuf,
    target_dir: PathBuf,
    profile: String,
}

impl ProjectLayout {
    pub fn new(project_dir: impl Into<PathBuf>, build: &BuildConfig) -> Self {
        Self {
            project_dir: project_dir.into(),
            target_dir: PathBuf::from(&build.target_dir),
            profile: build.profile.clone(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Directory holding the profile's build output, e.g. `<project>/target/release`
    pub fn profile_dir(&self) -> PathBuf {
        self.project_dir.join(&self.target_dir).join(&self.profile)
    }

    /// Expected executable for `product_name`, with the platform suffix appended
    pub fn artifact_path(&self, product_name: &str) -> PathBuf {
        self.profile_dir()
            .join(executable_file_name(product_name, std::env::consts::EXE_SUFFIX))
    }

    /// Source directory of a named asset bundle
    pub fn bundle_dir(&self, bundle: &str) -> PathBuf {
        self.project_dir.join(bundle)
    }
}

fn executable_file_name(product_name: &str, suffix: &str) -> String {
    format!("{}{}", product_name, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ProjectLayout {
        ProjectLayout::new("/work/charmline", &BuildConfig::default())
    }

    #[test]
    fn artifact_lives_under_release_profile() {
        let path = layout().artifact_path("charmline");
        let expected = PathBuf::from("/work/charmline/target/release")
            .join(format!("charmline{}", std::env::consts::EXE_SUFFIX));
        assert_eq!(path, expected);
    }

    #[test]
    fn windows_suffix_is_appended_not_substituted() {
        assert_eq!(executable_file_name("my.server", ".exe"), "my.server.exe");
        assert_eq!(executable_file_name("charmline", ""), "charmline");
    }

    #[test]
    fn custom_target_dir_and_profile() {
        let build = BuildConfig {
            target_dir: "out".to_string(),
            profile: "dist".to_string(),
            ..BuildConfig::default()
        };
        let layout = ProjectLayout::new("/p", &build);
        assert_eq!(layout.profile_dir(), PathBuf::from("/p/out/dist"));
    }

    #[test]
    fn bundle_dir_is_project_relative() {
        assert_eq!(
            layout().bundle_dir("static"),
            PathBuf::from("/work/charmline/static")
        );
    }
}
