//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["estate-quorum.toml", ".estate-quorum.toml"];

/// Environment variable prefix; `__` separates nested keys
/// (`ESTATE_QUORUM_GATES__STAFF_GROUP=finance`)
const ENV_PREFIX: &str = "ESTATE_QUORUM_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `ESTATE_QUORUM_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./estate-quorum.toml` or `./.estate-quorum.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/estate-quorum/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Path::new("."),
            config_path.map(PathBuf::as_path),
        )
    }

    /// Same as [`load`](Self::load) with explicit global path and project directory
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(path) = Self::project_config_in(project_dir) {
            figment = figment.merge(Toml::file(path));
        }

        // Explicit path must exist; a typo should not silently fall back
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/estate-quorum/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("estate-quorum").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./estate-quorum.toml or ./.estate-quorum.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.gates.staff_group, "staff");
        assert!(config.notifications.outbox.is_none());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("estate-quorum"));
    }

    #[test]
    fn test_sources_merge_in_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(
            &global,
            "[gates]\nstaff_group = \"global-staff\"\ncommittee_group = \"global-committee\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("estate-quorum.toml"),
            "[gates]\nstaff_group = \"project-staff\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "[storage]\nstate_file = \"explicit.json\"\n").unwrap();

        let config =
            ConfigLoader::load_from(Some(&global), dir.path(), Some(&explicit)).unwrap();

        assert_eq!(config.gates.staff_group, "project-staff");
        assert_eq!(config.gates.committee_group, "global-committee");
        assert_eq!(config.storage.state_file, PathBuf::from("explicit.json"));
        assert_eq!(config.gates.committee_amount_threshold, 1_000_000);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load_from(None, dir.path(), Some(&missing)).is_err());
    }
}
