use crate::errors::{FacadeError, FacadeResult};
use crate::infrastructure::logging::{LogConfig, LogFormat, LogOutput};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, Level};

pub const CONFIG_FILE_NAME: &str = ".typefacade.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacadeConfig {
    #[serde(default)]
    pub workarounds: Workarounds,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Switches for the backend defect workarounds.
///
/// Each flag guards one special case tied to one backend. Turn a flag off only
/// when running against a backend known not to have the defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workarounds {
    /// Symbol-processing raw types report their formal parameters as type
    /// arguments; detect raw types by comparing names with the raw type instead.
    #[serde(default = "default_true")]
    pub symbol_raw_type_name_compare: bool,

    /// Array and wildcard types may carry a bogus declaration handle.
    #[serde(default = "default_true")]
    pub spurious_element_guard: bool,

    /// Check native wildcards by kind tag. Requesting the type name of an
    /// unresolved native type caches a wrong name.
    #[serde(default = "default_true")]
    pub native_wildcard_kind_tag: bool,

    /// Force completion of `$`-named native declarations on request.
    #[serde(default = "default_true")]
    pub native_eager_resolution: bool,
}

impl Default for Workarounds {
    fn default() -> Self {
        Self::all()
    }
}

impl Workarounds {
    pub fn all() -> Self {
        Self {
            symbol_raw_type_name_compare: true,
            spurious_element_guard: true,
            native_wildcard_kind_tag: true,
            native_eager_resolution: true,
        }
    }

    pub fn none() -> Self {
        Self {
            symbol_raw_type_name_compare: false,
            spurious_element_guard: false,
            native_wildcard_kind_tag: false,
            native_eager_resolution: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormatConfig,

    #[serde(default)]
    pub output: LogOutputConfig,

    #[serde(default = "default_log_dir")]
    pub directory: String,

    #[serde(default = "default_log_prefix")]
    pub prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatConfig {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutputConfig {
    Stdout,
    #[default]
    Stderr,
    File,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormatConfig::default(),
            output: LogOutputConfig::default(),
            directory: default_log_dir(),
            prefix: default_log_prefix(),
            filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self) -> FacadeResult<LogConfig> {
        let level: Level = self
            .level
            .parse()
            .map_err(|_| FacadeError::Config(format!("Invalid log level: {}", self.level)))?;

        let format = match self.format {
            LogFormatConfig::Pretty => LogFormat::Pretty,
            LogFormatConfig::Compact => LogFormat::Compact,
            LogFormatConfig::Json => LogFormat::Json,
        };

        let output = match self.output {
            LogOutputConfig::Stdout => LogOutput::Stdout,
            LogOutputConfig::Stderr => LogOutput::Stderr,
            LogOutputConfig::File => LogOutput::File {
                directory: self.directory.clone(),
                prefix: self.prefix.clone(),
            },
        };

        let mut config = LogConfig::new()
            .with_level(level)
            .with_format(format)
            .with_output(output);
        if let Some(filter) = &self.filter {
            config = config.with_filter(filter.clone());
        }
        Ok(config)
    }
}

fn default_true() -> bool { true }
fn default_level() -> String { "info".to_string() }
fn default_log_dir() -> String { "logs".to_string() }
fn default_log_prefix() -> String { "typefacade".to_string() }

impl FacadeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> FacadeResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FacadeError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> FacadeResult<Self> {
        toml::from_str(content)
            .map_err(|e| FacadeError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Find and load `.typefacade.toml` from the current directory or its parents
    pub fn discover() -> Self {
        match std::env::current_dir() {
            Ok(dir) => Self::discover_from(&dir),
            Err(_) => Self::default(),
        }
    }

    pub fn discover_from(start: &Path) -> Self {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => {
                        debug!(path = %config_path.display(), "Loaded facade config");
                        return config;
                    }
                    Err(err) => {
                        debug!(path = %config_path.display(), error = %err, "Skipping unreadable config");
                    }
                }
            }

            current = dir.parent().map(|p| p.to_path_buf());
        }

        Self::default()
    }

    /// Generate default configuration file content
    pub fn generate_default() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate config"))
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> FacadeResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FacadeError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| FacadeError::Config(format!("Failed to write config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FacadeConfig::default();
        assert_eq!(config.workarounds, Workarounds::all());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[workarounds]
symbol_raw_type_name_compare = false

[logging]
level = "debug"
format = "json"
"#;

        let config = FacadeConfig::parse(toml).unwrap();
        assert!(!config.workarounds.symbol_raw_type_name_compare);
        assert!(config.workarounds.spurious_element_guard);
        assert_eq!(config.logging.format, LogFormatConfig::Json);

        let log = config.logging.to_log_config().unwrap();
        assert_eq!(log.level, Level::DEBUG);
        assert_eq!(log.format, LogFormat::Json);
        assert_eq!(log.output, LogOutput::Stderr);
    }

    #[test]
    fn test_parse_error() {
        let err = FacadeConfig::parse("[workarounds\n").unwrap_err();
        assert!(matches!(err, FacadeError::Config(_)));
    }

    #[test]
    fn test_invalid_level() {
        let logging = LoggingConfig {
            level: "loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(logging.to_log_config().is_err());
    }

    #[test]
    fn test_save_and_discover() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = FacadeConfig {
            workarounds: Workarounds::none(),
            ..FacadeConfig::default()
        };
        config.save(&dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let found = FacadeConfig::discover_from(&nested);
        assert_eq!(found, config);
    }

    #[test]
    fn test_generate_default_parses_back() {
        let text = FacadeConfig::generate_default();
        assert_eq!(FacadeConfig::parse(&text).unwrap(), FacadeConfig::default());
    }
}
