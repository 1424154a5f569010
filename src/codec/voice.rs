// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Voice transcoding
//!
//! Voice messages are stored as SILK v3 frames, optionally prefixed with a
//! single `0x02` byte. Browsers cannot play SILK, so the gateway hands the
//! payload to an external decoder (for example `silk_v3_decoder` piped into
//! `ffmpeg`) and serves the MP3 it produces.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{GatewayError, Result};

const SILK_HEADER: &[u8] = b"#!SILK";

/// Converts a voice payload to MP3
pub trait VoiceTranscoder: Send + Sync {
    fn transcode(&self, silk: &[u8]) -> Result<Vec<u8>>;
}

/// Whether the payload starts with a SILK header
pub fn is_silk(data: &[u8]) -> bool {
    let body = data.strip_prefix(&[0x02u8]).unwrap_or(data);
    body.starts_with(SILK_HEADER)
}

/// Transcoder that pipes the payload through an external program.
///
/// The program reads SILK on stdin and writes MP3 to stdout.
#[derive(Debug, Clone)]
pub struct CommandTranscoder {
    program: String,
    args: Vec<String>,
}

impl CommandTranscoder {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a command line such as `"silk2mp3 --quiet"`
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl VoiceTranscoder for CommandTranscoder {
    fn transcode(&self, silk: &[u8]) -> Result<Vec<u8>> {
        if !is_silk(silk) {
            return Err(GatewayError::Transcode("missing SILK header".to_string()));
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GatewayError::Transcode(format!("{}: {}", self.program, e)))?;

        // Write stdin concurrently with draining stdout
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| GatewayError::Transcode("stdin unavailable".to_string()))?;
        let payload = silk.to_vec();
        let writer = std::thread::spawn(move || stdin.write_all(&payload));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(GatewayError::Transcode("stdin writer panicked".to_string())),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GatewayError::Transcode(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(GatewayError::Transcode(format!(
                "{} produced no output",
                self.program
            )));
        }

        Ok(output.stdout)
    }
}

/// Transcoder used when no decoder is configured; voice is served as SILK
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTranscoder;

impl VoiceTranscoder for DisabledTranscoder {
    fn transcode(&self, _silk: &[u8]) -> Result<Vec<u8>> {
        Err(GatewayError::Transcode(
            "no voice transcoder configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_silk() {
        assert!(is_silk(b"#!SILK_V3\x0c\x00"));
        assert!(is_silk(b"\x02#!SILK_V3"));
        assert!(!is_silk(b"ID3\x03"));
        assert!(!is_silk(b""));
    }

    #[test]
    fn test_from_command_line() {
        let t = CommandTranscoder::from_command_line("silk2mp3 --rate 24000").unwrap();
        assert_eq!(t.program(), "silk2mp3");
        assert_eq!(t.args, vec!["--rate", "24000"]);
        assert!(CommandTranscoder::from_command_line("   ").is_none());
    }

    #[test]
    fn test_rejects_non_silk_without_spawning() {
        let t = CommandTranscoder::new("/nonexistent/decoder", vec![]);
        let err = t.transcode(b"not silk").unwrap_err();
        assert!(err.to_string().contains("missing SILK header"));
    }

    #[test]
    fn test_missing_program_fails() {
        let t = CommandTranscoder::new("/nonexistent/decoder", vec![]);
        assert!(t.transcode(b"#!SILK_V3").is_err());
    }

    #[test]
    fn test_disabled_always_fails() {
        assert!(DisabledTranscoder.transcode(b"#!SILK_V3").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_pipes_through_program() {
        let t = CommandTranscoder::new("cat", vec![]);
        let out = t.transcode(b"#!SILK_V3 frames").unwrap();
        assert_eq!(out, b"#!SILK_V3 frames");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_error() {
        let t = CommandTranscoder::new("false", vec![]);
        assert!(t.transcode(b"#!SILK_V3").is_err());
    }
}
