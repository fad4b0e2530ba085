use std::fs;

use config as config_rs;
use serde::Deserialize;
use thiserror::Error;

/// Optional JSON config file. Everything has a sensible Go default, so the
/// tool runs with no config at all.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub go_binary: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub excluded_kinds: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct AppConfig {
    pub go_binary: String,
    pub extensions: Vec<String>,
    pub excluded_kinds: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
}

/// Resolves the effective configuration: JSON file defaults, then the
/// `CODECLOAK_GO` environment variable, then the CLI flag, each layer
/// overriding the previous for the toolchain binary.
pub fn load_config(
    path: Option<&str>,
    go_binary: Option<&str>,
) -> Result<AppConfig, ConfigError> {
    let file_cfg: FileConfig = match path {
        Some(p) => serde_json::from_str(&fs::read_to_string(p)?)?,
        None => FileConfig::default(),
    };

    let mut builder = config_rs::Config::builder()
        .set_default("go_binary", file_cfg.go_binary.unwrap_or_else(|| "go".into()))?;

    if let Ok(bin) = std::env::var("CODECLOAK_GO") {
        builder = builder.set_override("go_binary", bin)?;
    }
    if let Some(bin) = go_binary {
        builder = builder.set_override("go_binary", bin.to_string())?;
    }

    let cfg = builder.build()?;

    Ok(AppConfig {
        go_binary: cfg.get::<String>("go_binary")?,
        extensions: file_cfg.extensions.unwrap_or_else(|| vec!["go".into()]),
        excluded_kinds: file_cfg.excluded_kinds.unwrap_or_else(|| {
            vec![
                "import_declaration".into(),
                "const_declaration".into(),
                "struct_type".into(),
            ]
        }),
    })
}
