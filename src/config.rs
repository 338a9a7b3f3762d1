use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use directories::ProjectDirs;
use crate::errors::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Which generation of the service's endpoint layout a profile talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ApiRevision {
    /// `/generate/copy`, `/generate/copy-with-file`, `/generate/image`
    Classic,
    /// `/upload-brand-assets`, `/generate-copy`, `/generate-image`
    Guidelines,
    /// `/extract-context-from-file`, `/generate-visual`, `/swap-background`, `/audit-content`
    #[default]
    Studio,
}

impl ApiRevision {
    pub fn label(self) -> &'static str {
        match self {
            ApiRevision::Classic => "classic",
            ApiRevision::Guidelines => "guidelines",
            ApiRevision::Studio => "studio",
        }
    }
}

/// Representation of a single service profile
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub api_revision: ApiRevision,
    /// Where generated images are written; falls back to the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Profile {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Profile {
            name: name.into(),
            base_url: base_url.into(),
            api_revision: ApiRevision::default(),
            output_dir: None,
        }
    }

    /// Resolved image output directory
    pub fn output_dir(&self) -> Result<PathBuf, ClientError> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().join("renders")),
        }
    }
}

/// Wrapper for the profiles file
#[derive(Debug, Serialize, Deserialize)]
struct ProfilesFile {
    pub profiles: Vec<Profile>,
}

fn project_dirs() -> Result<ProjectDirs, ClientError> {
    ProjectDirs::from("io", "brandgenius", "brandgenius-console")
        .ok_or_else(|| ClientError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Unable to determine config directory",
        )))
}

/// Returns the path to the profiles.toml file, creating directories if needed
fn profiles_path() -> Result<PathBuf, ClientError> {
    let proj = project_dirs()?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir)?;
    Ok(dir.join("profiles.toml"))
}

/// Default log file location inside the data directory
pub fn default_log_path() -> Result<PathBuf, ClientError> {
    Ok(project_dirs()?.data_dir().join("brandgenius.log"))
}

/// Load all profiles from disk
pub fn load_profiles() -> Result<Vec<Profile>, ClientError> {
    load_profiles_from(&profiles_path()?)
}

/// Save all profiles to disk
pub fn save_profiles(profiles: &[Profile]) -> Result<(), ClientError> {
    save_profiles_to(&profiles_path()?, profiles)
}

pub fn load_profiles_from(path: &Path) -> Result<Vec<Profile>, ClientError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    let file: ProfilesFile = toml::from_str(&contents)?;
    Ok(file.profiles)
}

pub fn save_profiles_to(path: &Path, profiles: &[Profile]) -> Result<(), ClientError> {
    let file = ProfilesFile { profiles: profiles.to_vec() };
    let toml = toml::to_string_pretty(&file)?;
    fs::write(path, toml)?;
    Ok(())
}

/// Command-line overrides applied on top of a stored profile
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub api_revision: Option<ApiRevision>,
    pub output_dir: Option<PathBuf>,
}

/// Pick the named profile (or the first one) and apply overrides
pub fn resolve_profile(profiles: &[Profile], name: Option<&str>, overrides: &Overrides) -> Option<Profile> {
    let mut profile = match name {
        Some(n) => profiles.iter().find(|p| p.name == n)?.clone(),
        None => profiles.first()?.clone(),
    };
    if let Some(url) = &overrides.base_url {
        profile.base_url = url.clone();
    }
    if let Some(rev) = overrides.api_revision {
        profile.api_revision = rev;
    }
    if let Some(dir) = &overrides.output_dir {
        profile.output_dir = Some(dir.clone());
    }
    Some(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.toml");
        let mut staging = Profile::new("staging", "https://staging.example.com");
        staging.api_revision = ApiRevision::Classic;
        staging.output_dir = Some(dir.path().join("out"));
        let profiles = vec![Profile::new("local", DEFAULT_BASE_URL), staging];

        save_profiles_to(&path, &profiles).unwrap();
        let loaded = load_profiles_from(&path).unwrap();
        assert_eq!(loaded, profiles);
    }

    #[test]
    fn missing_file_yields_no_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_profiles_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn revision_defaults_to_studio_when_omitted() {
        let raw = "[[profiles]]\nname = \"a\"\nbase_url = \"http://x\"\n";
        let file: ProfilesFile = toml::from_str(raw).unwrap();
        assert_eq!(file.profiles[0].api_revision, ApiRevision::Studio);
        assert!(file.profiles[0].output_dir.is_none());
    }

    #[test]
    fn overrides_win_over_stored_values() {
        let profiles = vec![Profile::new("local", DEFAULT_BASE_URL), Profile::new("prod", "https://prod")];
        let overrides = Overrides {
            base_url: Some("http://override:9000".into()),
            api_revision: Some(ApiRevision::Guidelines),
            output_dir: None,
        };
        let p = resolve_profile(&profiles, Some("prod"), &overrides).unwrap();
        assert_eq!(p.name, "prod");
        assert_eq!(p.base_url, "http://override:9000");
        assert_eq!(p.api_revision, ApiRevision::Guidelines);

        assert!(resolve_profile(&profiles, Some("missing"), &Overrides::default()).is_none());
        assert_eq!(resolve_profile(&profiles, None, &Overrides::default()).unwrap().name, "local");
    }
}
