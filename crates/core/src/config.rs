//! Configuration management for the Listin CLI.
//!
//! Configuration is merged from several sources, lowest precedence first:
//! - Built-in defaults
//! - Config file (`.listin/config.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! The configuration is workspace-centric: relative paths are resolved
//! against the workspace root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default location of the knowledge document, relative to the workspace.
pub const DEFAULT_DATA_FILE: &str = "agent/listin_seller_data.json";

/// Identifier of the bundled instruction template.
pub const DEFAULT_TEMPLATE_ID: &str = "listin.agent.instruction";

/// Store name used when the knowledge document does not provide one.
pub const DEFAULT_FALLBACK_STORE_NAME: &str = "Magazin";

/// Port reported when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .listin/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Knowledge document path (relative paths resolve against the workspace)
    pub data_file: PathBuf,

    /// Instruction template identifier
    pub template_id: String,

    /// Store name substituted when the document has none
    pub fallback_store_name: String,

    /// Agent construction parameters
    pub agent: AgentSettings,

    /// Names of the credential environment variables
    pub credentials: CredentialSettings,

    /// Port the hosting server is expected to listen on
    pub port: u16,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Emit logs as JSON
    pub log_json: bool,
}

/// Parameters handed to the external agent framework alongside the
/// compiled instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    pub name: String,
    pub model: String,
    pub description: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: "listin_agent".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            description: "A helpful, uzbek speaking assistant for Listin online store.".to_string(),
        }
    }
}

/// Environment variable names holding model API credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSettings {
    /// Required API key variable
    pub api_key_env: String,

    /// Optional service-account file variable
    pub credentials_file_env: String,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            credentials_file_env: "GOOGLE_APPLICATION_CREDENTIALS".to_string(),
        }
    }
}

/// Values supplied on the command line. `None`/`false` leaves the
/// configured value untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workspace: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub template_id: Option<String>,
    pub model: Option<String>,
    pub log_level: Option<String>,
    pub verbose: bool,
    pub no_color: bool,
    pub log_json: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    knowledge: Option<KnowledgeSection>,
    prompt: Option<PromptSection>,
    agent: Option<AgentSection>,
    credentials: Option<CredentialsSection>,
    server: Option<ServerSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KnowledgeSection {
    path: Option<String>,
    #[serde(rename = "fallbackStoreName")]
    fallback_store_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PromptSection {
    template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AgentSection {
    name: Option<String>,
    model: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialsSection {
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    #[serde(rename = "credentialsFileEnv")]
    credentials_file_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerSection {
    port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    json: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            fallback_store_name: DEFAULT_FALLBACK_STORE_NAME.to_string(),
            agent: AgentSettings::default(),
            credentials: CredentialSettings::default(),
            port: DEFAULT_PORT,
            log_level: None,
            verbose: false,
            no_color: false,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment and CLI overrides.
    ///
    /// Environment variables:
    /// - `LISTIN_WORKSPACE`: Override workspace path
    /// - `LISTIN_CONFIG`: Path to config file
    /// - `LISTIN_DATA`: Knowledge document path
    /// - `LISTIN_TEMPLATE`: Instruction template id
    /// - `LISTIN_MODEL`: Model identifier
    /// - `PORT`: Server port (default 8080)
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use listin_core::config::{AppConfig, ConfigOverrides};
    ///
    /// let config = AppConfig::load(ConfigOverrides::default()).expect("Failed to load config");
    /// println!("Knowledge document: {:?}", config.knowledge_path());
    /// ```
    pub fn load(overrides: ConfigOverrides) -> AppResult<Self> {
        Self::load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration with an explicit environment lookup.
    pub fn load_with_env<F>(overrides: ConfigOverrides, env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Workspace and config file must be known before the YAML merge
        if let Some(workspace) = overrides
            .workspace
            .clone()
            .or_else(|| env("LISTIN_WORKSPACE").map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        config.config_file = overrides
            .config_file
            .clone()
            .or_else(|| env("LISTIN_CONFIG").map(PathBuf::from));

        if !config.workspace.is_dir() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => config.resolve(cf),
            None => config.listin_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Some(data) = env("LISTIN_DATA") {
            config.data_file = PathBuf::from(data);
        }

        if let Some(template) = env("LISTIN_TEMPLATE") {
            config.template_id = template;
        }

        if let Some(model) = env("LISTIN_MODEL") {
            config.agent.model = model;
        }

        if let Some(port) = env("PORT") {
            config.port = port.trim().parse().map_err(|_| {
                AppError::Config(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }

        if let Some(level) = env("RUST_LOG") {
            config.log_level = Some(level);
        }

        if env("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.no_color = true;
        }

        let config = config.with_overrides(overrides);
        config.validate()?;

        tracing::debug!("Configuration loaded for workspace {:?}", config.workspace);
        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &Path) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(knowledge) = file.knowledge {
            if let Some(path) = knowledge.path {
                self.data_file = PathBuf::from(path);
            }
            if let Some(name) = knowledge.fallback_store_name {
                self.fallback_store_name = name;
            }
        }

        if let Some(template) = file.prompt.and_then(|p| p.template) {
            self.template_id = template;
        }

        if let Some(agent) = file.agent {
            if let Some(name) = agent.name {
                self.agent.name = name;
            }
            if let Some(model) = agent.model {
                self.agent.model = model;
            }
            if let Some(description) = agent.description {
                self.agent.description = description;
            }
        }

        if let Some(credentials) = file.credentials {
            if let Some(var) = credentials.api_key_env {
                self.credentials.api_key_env = var;
            }
            if let Some(var) = credentials.credentials_file_env {
                self.credentials.credentials_file_env = var;
            }
        }

        if let Some(port) = file.server.and_then(|s| s.port) {
            self.port = port;
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
            if let Some(json) = logging.json {
                self.log_json = json;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags take precedence over both the config file and the environment.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(workspace) = overrides.workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = overrides.config_file {
            self.config_file = Some(config_file);
        }

        if let Some(data_file) = overrides.data_file {
            self.data_file = data_file;
        }

        if let Some(template_id) = overrides.template_id {
            self.template_id = template_id;
        }

        if let Some(model) = overrides.model {
            self.agent.model = model;
        }

        if let Some(log_level) = overrides.log_level {
            self.log_level = Some(log_level);
        }

        if overrides.verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if overrides.no_color {
            self.no_color = true;
        }

        if overrides.log_json {
            self.log_json = true;
        }

        self
    }

    /// Get the path to the .listin directory.
    pub fn listin_dir(&self) -> PathBuf {
        self.workspace.join(".listin")
    }

    /// Absolute location of the knowledge document.
    pub fn knowledge_path(&self) -> PathBuf {
        self.resolve(&self.data_file)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Validate settings that would otherwise surface as confusing
    /// failures further down the line.
    pub fn validate(&self) -> AppResult<()> {
        if self.template_id.trim().is_empty() {
            return Err(AppError::Config(
                "Instruction template id cannot be empty".to_string(),
            ));
        }

        if self.fallback_store_name.trim().is_empty() {
            return Err(AppError::Config(
                "Fallback store name cannot be empty".to_string(),
            ));
        }

        if self.agent.name.trim().is_empty() {
            return Err(AppError::Config("Agent name cannot be empty".to_string()));
        }

        if self.agent.model.trim().is_empty() {
            return Err(AppError::Config("Agent model cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn overrides_for(dir: &TempDir) -> ConfigOverrides {
        ConfigOverrides {
            workspace: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.template_id, DEFAULT_TEMPLATE_ID);
        assert_eq!(config.fallback_store_name, "Magazin");
        assert_eq!(config.agent.name, "listin_agent");
        assert_eq!(config.agent.model, "gemini-2.0-flash-exp");
        assert_eq!(config.port, 8080);
        assert!(!config.verbose);
    }

    #[test]
    fn test_knowledge_path_resolves_against_workspace() {
        let config = AppConfig {
            workspace: PathBuf::from("/srv/listin"),
            ..Default::default()
        };
        assert_eq!(
            config.knowledge_path(),
            PathBuf::from("/srv/listin/agent/listin_seller_data.json")
        );

        let absolute = AppConfig {
            data_file: PathBuf::from("/data/store.json"),
            ..config
        };
        assert_eq!(absolute.knowledge_path(), PathBuf::from("/data/store.json"));
    }

    #[test]
    fn test_missing_workspace_is_rejected() {
        let overrides = ConfigOverrides {
            workspace: Some(PathBuf::from("/definitely/not/here")),
            ..Default::default()
        };
        let result = AppConfig::load_with_env(overrides, env_from(&[]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_env_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let env = env_from(&[
            ("PORT", "9090"),
            ("LISTIN_MODEL", "gemini-1.5-pro"),
            ("LISTIN_DATA", "store.json"),
        ]);

        let config = AppConfig::load_with_env(overrides_for(&dir), env).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.agent.model, "gemini-1.5-pro");
        assert_eq!(config.knowledge_path(), dir.path().join("store.json"));
    }

    #[test]
    fn test_no_color_env_disables_color() {
        let dir = TempDir::new().unwrap();

        let plain = AppConfig::load_with_env(overrides_for(&dir), env_from(&[])).unwrap();
        assert!(!plain.no_color);

        let config =
            AppConfig::load_with_env(overrides_for(&dir), env_from(&[("NO_COLOR", "1")])).unwrap();
        assert!(config.no_color);

        let empty =
            AppConfig::load_with_env(overrides_for(&dir), env_from(&[("NO_COLOR", "")])).unwrap();
        assert!(!empty.no_color);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load_with_env(overrides_for(&dir), env_from(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_precedence_yaml_then_env_then_cli() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".listin")).unwrap();
        std::fs::write(
            dir.path().join(".listin/config.yaml"),
            r#"
knowledge:
  path: data/yaml.json
  fallbackStoreName: Do'kon
agent:
  model: yaml-model
  description: Test assistant
server:
  port: 7000
logging:
  json: true
"#,
        )
        .unwrap();

        let from_yaml = AppConfig::load_with_env(overrides_for(&dir), env_from(&[])).unwrap();
        assert_eq!(from_yaml.agent.model, "yaml-model");
        assert_eq!(from_yaml.agent.description, "Test assistant");
        assert_eq!(from_yaml.fallback_store_name, "Do'kon");
        assert_eq!(from_yaml.port, 7000);
        assert!(from_yaml.log_json);
        assert_eq!(from_yaml.data_file, PathBuf::from("data/yaml.json"));

        let from_env =
            AppConfig::load_with_env(overrides_for(&dir), env_from(&[("LISTIN_MODEL", "env-model")]))
                .unwrap();
        assert_eq!(from_env.agent.model, "env-model");

        let overrides = ConfigOverrides {
            model: Some("cli-model".to_string()),
            verbose: true,
            ..overrides_for(&dir)
        };
        let from_cli =
            AppConfig::load_with_env(overrides, env_from(&[("LISTIN_MODEL", "env-model")])).unwrap();
        assert_eq!(from_cli.agent.model, "cli-model");
        assert_eq!(from_cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_explicit_missing_config_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config_file: Some(PathBuf::from("missing.yaml")),
            ..overrides_for(&dir)
        };
        assert!(AppConfig::load_with_env(overrides, env_from(&[])).is_err());
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".listin")).unwrap();
        std::fs::write(dir.path().join(".listin/config.yaml"), "server: [unclosed").unwrap();

        let result = AppConfig::load_with_env(overrides_for(&dir), env_from(&[]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_blank_fallback() {
        let config = AppConfig {
            fallback_store_name: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
