use crate::{
    conf::{ServerConfig, SessionConfig},
    core::SweeperError::{self, ConfigParsingError},
};
use config::{Config as CConfig, ConfigBuilder, Environment, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "SWEEPER";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, SweeperError> {
        let builder = CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml));
        Self::build(builder)
    }

    /// Reads the optional TOML file, then `SWEEPER_*` environment overrides
    /// (`SWEEPER_SERVER__PORT=9000`).
    pub fn load(path: Option<&str>) -> Result<Config, SweeperError> {
        let mut builder = CConfig::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(Path::new(path)).format(config::FileFormat::Toml),
            );
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Config, SweeperError> {
        builder
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_correct_toml() {
        let toml = r#"
        [server]
        host = "127.0.0.1"
        port = 3000

        [session]
        preview_rows = 5
        "#;
        let conf = Config::from_str(toml);
        assert_eq!(
            conf,
            Ok(Config {
                server: ServerConfig {
                    host: String::from("127.0.0.1"),
                    port: 3000,
                    ..ServerConfig::default()
                },
                session: SessionConfig {
                    preview_rows: 5,
                    schema_inference_rows: None,
                },
            })
        );
    }

    #[test]
    fn load_empty_toml_uses_defaults() {
        assert_eq!(Config::from_str(""), Ok(Config::default()));
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
        [server]
        hostname = "x"
        "#;
        assert!(matches!(
            Config::from_str(toml),
            Err(SweeperError::ConfigParsingError(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[session]\nschema_inference_rows = 100").unwrap();

        let conf = Config::load(file.path().to_str()).unwrap();
        assert_eq!(conf.session.schema_inference_rows, Some(100));
        assert_eq!(conf.server, ServerConfig::default());
    }

    #[test]
    fn load_missing_file_errors() {
        let conf = Config::load(Some("/nonexistent/sweeper.toml"));
        assert!(conf.is_err());
    }
}
