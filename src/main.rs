// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! chatlog - Main entry point
//!
//! Serves media referenced by chat history: images, video, files and voice.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;

use chatlog::api;
use chatlog::cli::{Cli, Commands, DataArgs, IndexCommands};
use chatlog::codec::{ContainerDecoder, XorDatDecoder};
use chatlog::config::GatewayConfig;
use chatlog::database::MediaDatabase;
use chatlog::logging;
use chatlog::media::ResolvedOutcome;
use chatlog::models::{MediaRecord, MediaType};

fn load_config(path: Option<&Path>, data: &DataArgs) -> Result<GatewayConfig> {
    let mut config = match path {
        Some(path) => GatewayConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GatewayConfig::load()?,
    };
    data.apply(&mut config);
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config_path = cli.config.as_deref();

    match cli.command {
        // ====================================================================
        // Server
        // ====================================================================
        Commands::Serve { host, port, data } => {
            let mut config = load_config(config_path, &data)?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            // Create tokio runtime and run the server
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            rt.block_on(api::start_server(config))
        }

        // ====================================================================
        // One-shot resolution
        // ====================================================================
        Commands::Resolve {
            media_type,
            key,
            info,
            output,
            data,
        } => {
            let config = load_config(config_path, &data)?;
            let gateway = config.build_gateway()?;
            // Follow the redirect the HTTP client would take
            let outcome = match gateway.resolve(media_type, &key, info)? {
                ResolvedOutcome::Redirect(path) => {
                    println!("redirect: {}", path);
                    gateway.resolve_data(&path)?
                }
                other => other,
            };
            print_outcome(outcome, output.as_deref())
        }

        // ====================================================================
        // Container decoding
        // ====================================================================
        Commands::Decode { file, output } => {
            let raw = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let image = XorDatDecoder::new()
                .decode(&raw)
                .with_context(|| format!("{} is not a recognized container", file.display()))?;

            let output =
                output.unwrap_or_else(|| file.with_extension(image.format.extension()));
            std::fs::write(&output, &image.bytes)?;
            println!(
                "[OK] {} -> {} ({}, {} bytes)",
                file.display(),
                output.display(),
                image.format.content_type(),
                image.bytes.len()
            );
            Ok(())
        }

        // ====================================================================
        // Media index
        // ====================================================================
        Commands::Index { command } => match command {
            IndexCommands::Add {
                media_type,
                key,
                path,
                data_file,
                data,
            } => {
                let config = load_config(config_path, &data)?;
                let db = MediaDatabase::open(&config.database_path())?;

                let record = match data_file {
                    Some(file) if media_type == MediaType::Voice => {
                        MediaRecord::voice(key, std::fs::read(&file)?)
                    }
                    Some(_) => anyhow::bail!("--data-file is only valid for voice records"),
                    None => MediaRecord::stored(key, media_type, path),
                };
                db.insert(&record)?;
                println!("[OK] indexed {} {}", record.media_type, record.key);
                Ok(())
            }
            IndexCommands::Count { data } => {
                let config = load_config(config_path, &data)?;
                let db = MediaDatabase::open(&config.database_path())?;
                println!("{}", db.count()?);
                Ok(())
            }
        },
    }
}

fn print_outcome(outcome: ResolvedOutcome, output: Option<&Path>) -> Result<()> {
    match outcome {
        ResolvedOutcome::Metadata(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        ResolvedOutcome::InlineBytes {
            content_type,
            bytes,
        } => {
            println!("content-type: {} ({} bytes)", content_type, bytes.len());
            write_output(output, &bytes)?;
        }
        ResolvedOutcome::File(path) => {
            println!("file: {}", path.display());
            if output.is_some() {
                write_output(output, &std::fs::read(&path)?)?;
            }
        }
        ResolvedOutcome::Redirect(path) => println!("redirect: {}", path),
        ResolvedOutcome::NotFound => anyhow::bail!("not found"),
    }
    Ok(())
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    if let Some(path) = output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(bytes)?;
        println!("[OK] wrote {}", path.display());
    }
    Ok(())
}

