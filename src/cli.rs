// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::GatewayConfig;
use crate::models::MediaType;

/// chatlog - serve chat history media over HTTP and MCP
#[derive(Parser)]
#[command(name = "chatlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.json (default: <config dir>/chatlog/config.json)
    #[arg(long, global = true, env = "CHATLOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Data location overrides shared by every command that opens the gateway
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Root directory of the messaging client's data
    #[arg(long, env = "CHATLOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to the media index database
    #[arg(long, env = "CHATLOG_DATABASE")]
    pub database: Option<PathBuf>,

    /// Command that converts SILK on stdin to MP3 on stdout
    #[arg(long, env = "CHATLOG_VOICE_COMMAND")]
    pub voice_command: Option<String>,
}

impl DataArgs {
    /// Overlay these flags on a loaded configuration
    pub fn apply(&self, config: &mut GatewayConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(db) = &self.database {
            config.database = Some(db.clone());
        }
        if let Some(cmd) = &self.voice_command {
            config.voice_command = Some(cmd.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, env = "CHATLOG_HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "CHATLOG_PORT")]
        port: Option<u16>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Resolve a media key and print what the server would answer
    Resolve {
        /// Media category
        #[arg(value_parser = parse_media_type)]
        media_type: MediaType,

        /// Media key (comma-separated candidates)
        key: String,

        /// Print metadata only
        #[arg(long)]
        info: bool,

        /// Write resolved bytes to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Decode an image container file
    Decode {
        /// Container file (.dat)
        file: PathBuf,

        /// Output file (default: input with the decoded extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage the media index
    Index {
        #[command(subcommand)]
        command: IndexCommands,
    },
}

#[derive(Subcommand)]
pub enum IndexCommands {
    /// Add or replace a media record
    Add {
        /// Media category
        #[arg(value_parser = parse_media_type)]
        media_type: MediaType,

        /// 32-character content hash
        key: String,

        /// Payload path relative to the data root
        #[arg(long, default_value = "")]
        path: String,

        /// Read an inline voice payload from this file
        #[arg(long)]
        data_file: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Count indexed records
    Count {
        #[command(flatten)]
        data: DataArgs,
    },
}

fn parse_media_type(s: &str) -> Result<MediaType, String> {
    s.parse().map_err(|e: crate::error::GatewayError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "chatlog",
            "-vv",
            "resolve",
            "voice",
            "0123456789abcdef0123456789abcdef",
            "--info",
            "--data-dir",
            "/tmp/data",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Resolve {
                media_type,
                info,
                data,
                ..
            } => {
                assert_eq!(media_type, MediaType::Voice);
                assert!(info);
                assert_eq!(data.data_dir, Some(PathBuf::from("/tmp/data")));
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_rejects_unknown_media_type() {
        assert!(Cli::try_parse_from(["chatlog", "resolve", "sticker", "k"]).is_err());
    }

    #[test]
    fn test_data_args_apply() {
        let mut config = GatewayConfig::default();
        DataArgs {
            data_dir: Some(PathBuf::from("/data")),
            database: None,
            voice_command: Some("silk2mp3".to_string()),
        }
        .apply(&mut config);
        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.database, None);
        assert_eq!(config.voice_command.as_deref(), Some("silk2mp3"));
    }
}
