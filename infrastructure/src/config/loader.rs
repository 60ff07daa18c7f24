//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "expense-assistant";
const PROJECT_FILES: [&str; 2] = ["expense-assistant.toml", ".expense-assistant.toml"];
const ENV_PREFIX: &str = "EXPENSE_ASSISTANT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `EXPENSE_ASSISTANT_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./expense-assistant.toml` or `./.expense-assistant.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/expense-assistant/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// The merged provider chain, exposed for inspection in tests.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Environment: {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:^5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]);
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }

    /// Render the effective configuration as TOML with secrets masked.
    pub fn render(config: &FileConfig) -> String {
        toml::to_string_pretty(&config.redacted())
            .unwrap_or_else(|e| format!("# could not render configuration: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::openai::ApiFlavor;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.assistant.endpoint().is_none());
        assert_eq!(config.assistant.max_tool_rounds, 8);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("expense-assistant"));
    }

    #[test]
    fn test_project_file_then_explicit_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "expense-assistant.toml",
                r#"
                [assistant]
                endpoint = "https://project.example.com"
                deployment = "project-deployment"
                max_tool_rounds = 5
                "#,
            )?;
            jail.create_file(
                "override.toml",
                r#"
                [assistant]
                deployment = "explicit-deployment"
                flavor = "openai"
                "#,
            )?;
            jail.set_env("EXPENSE_ASSISTANT_ASSISTANT__MAX_TOOL_ROUNDS", "3");
            jail.set_env("EXPENSE_ASSISTANT_DEMO__REVIEWER_ID", "7");

            let config = ConfigLoader::load(Some(Path::new("override.toml"))).map_err(|e| *e)?;

            assert_eq!(
                config.assistant.endpoint(),
                Some("https://project.example.com")
            );
            assert_eq!(config.assistant.deployment, "explicit-deployment");
            assert_eq!(config.assistant.flavor, ApiFlavor::OpenAi);
            assert_eq!(config.assistant.max_tool_rounds, 3);
            assert_eq!(config.demo.reviewer_id, 7);
            assert_eq!(config.demo.user_id, 1);
            Ok(())
        });
    }

    #[test]
    fn test_render_masks_api_key() {
        let mut config = FileConfig::default();
        config.assistant.api_key = Some("top-secret".to_string());
        let rendered = ConfigLoader::render(&config);
        assert!(rendered.contains("[assistant]"));
        assert!(!rendered.contains("top-secret"));
    }
}
