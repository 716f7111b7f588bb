use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH: &str = "config.json";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// TorchScript export of the fitted pipeline
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Sidecar JSON with the training-time feature list
    #[serde(default = "default_meta_path")]
    pub meta_path: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_model_path() -> PathBuf {
    PathBuf::from("pipe.pt")
}

fn default_meta_path() -> PathBuf {
    PathBuf::from("pipe.meta.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model_path: default_model_path(),
            meta_path: default_meta_path(),
        }
    }
}

impl Config {
    /// Missing file means defaults; an unreadable or malformed one is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("invalid config JSON in {}", path.display()))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = Config::load("/nonexistent/ev_range_estimator/config.json").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8501");
        assert_eq!(cfg.model_path, PathBuf::from("pipe.pt"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "port": 9000, "modelPath": "models/ev.pt" }"#).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.model_path, PathBuf::from("models/ev.pt"));
        assert_eq!(cfg.meta_path, PathBuf::from("pipe.meta.json"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join("ev_range_estimator_bad_config.json");
        fs::write(&path, "{ port: ").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config JSON"));
        let _ = fs::remove_file(&path);
    }
}
