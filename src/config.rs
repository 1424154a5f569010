// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Gateway configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::codec::{CommandTranscoder, DisabledTranscoder, VoiceTranscoder, XorDatDecoder};
use crate::database::MediaDatabase;
use crate::error::{GatewayError, Result};
use crate::media::MediaGateway;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5030
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Gateway configuration, loaded from `<config_dir>/chatlog/config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind the HTTP server to
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Root directory of the messaging client's data
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Media index database (defaults to `<data_dir>/media.db`)
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Command that reads SILK on stdin and writes MP3 to stdout
    #[serde(default)]
    pub voice_command: Option<String>,

    /// Extra allowed CORS origins; localhost is always allowed
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            database: None,
            voice_command: None,
            cors_origins: Vec::new(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the given location
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GatewayError::Config("could not find config directory".to_string()))?;
        Ok(config_dir.join("chatlog").join("config.json"))
    }

    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| self.data_dir.join("media.db"))
    }

    pub fn transcoder(&self) -> Arc<dyn VoiceTranscoder> {
        let command = self
            .voice_command
            .as_deref()
            .and_then(CommandTranscoder::from_command_line);
        if let Some(t) = command {
            return Arc::new(t);
        }
        Arc::new(DisabledTranscoder)
    }

    /// Open the media index and assemble the gateway
    pub fn build_gateway(&self) -> Result<MediaGateway> {
        if !self.data_dir.is_dir() {
            return Err(GatewayError::Config(format!(
                "data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        let db_path = self.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = MediaDatabase::open(&db_path)?;

        Ok(MediaGateway::new(
            self.data_dir.clone(),
            Arc::new(store),
            Arc::new(XorDatDecoder::new()),
            self.transcoder(),
        ))
    }
}
