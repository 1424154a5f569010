// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Candidate resolution over the media index and data root

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::data::normalize_relative;
use super::key::{parse_key, Candidate};
use super::outcome::ResolvedOutcome;
use crate::codec::{ContainerDecoder, VoiceTranscoder};
use crate::database::MediaStore;
use crate::error::{GatewayError, Result};
use crate::models::{MediaRecord, MediaType};

/// Content type for transcoded voice
pub const VOICE_MP3: &str = "audio/mp3";
/// Content type for voice served untranscoded
pub const VOICE_SILK: &str = "audio/silk";

/// Holds the most recent candidate failure
#[derive(Debug, Default)]
pub struct LastError(Option<GatewayError>);

impl LastError {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn record(&mut self, err: GatewayError) {
        self.0 = Some(err);
    }

    pub fn get(&self) -> Option<&GatewayError> {
        self.0.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Outcome once every candidate has been tried
    pub fn into_result(self) -> Result<ResolvedOutcome> {
        match self.0 {
            Some(err) => Err(err),
            None => Ok(ResolvedOutcome::NotFound),
        }
    }
}

/// Media gateway over a data root and its collaborators
#[derive(Clone)]
pub struct MediaGateway {
    data_root: PathBuf,
    store: Arc<dyn MediaStore>,
    decoder: Arc<dyn ContainerDecoder>,
    transcoder: Arc<dyn VoiceTranscoder>,
}

impl MediaGateway {
    pub fn new(
        data_root: impl Into<PathBuf>,
        store: Arc<dyn MediaStore>,
        decoder: Arc<dyn ContainerDecoder>,
        transcoder: Arc<dyn VoiceTranscoder>,
    ) -> Self {
        Self {
            data_root: data_root.into(),
            store,
            decoder,
            transcoder,
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub(crate) fn decoder(&self) -> &dyn ContainerDecoder {
        self.decoder.as_ref()
    }

    /// Resolve a media key of the given category.
    ///
    /// With `info` set, a store hit is answered with its metadata instead of
    /// being redirected or transcoded.
    pub fn resolve(
        &self,
        category: MediaType,
        raw_key: &str,
        info: bool,
    ) -> Result<ResolvedOutcome> {
        let mut last_error = LastError::new();
        match self.resolve_candidates(category, raw_key, info, &mut last_error)? {
            Some(outcome) => Ok(outcome),
            None => last_error.into_result(),
        }
    }

    /// Walk the candidates in order, stopping at the first success.
    ///
    /// Missing paths are skipped silently; failed lookups are recorded in
    /// `last_error` and the walk continues. `Ok(None)` means exhausted.
    pub fn resolve_candidates(
        &self,
        category: MediaType,
        raw_key: &str,
        info: bool,
        last_error: &mut LastError,
    ) -> Result<Option<ResolvedOutcome>> {
        for candidate in parse_key(raw_key)? {
            match candidate {
                Candidate::Path(path) => {
                    let relative = normalize_relative(path);
                    if !self.probe(&relative) {
                        log::debug!("{} candidate {} not on disk, skipping", category, path);
                        continue;
                    }
                    return Ok(Some(ResolvedOutcome::Redirect(relative)));
                }
                Candidate::Hash(hash) => match self.store.get_media(category, hash) {
                    Ok(record) => return Ok(Some(self.answer(record, info))),
                    Err(e) => {
                        log::debug!("{} candidate {} lookup failed: {}", category, hash, e);
                        last_error.record(e);
                    }
                },
            }
        }
        Ok(None)
    }

    fn answer(&self, record: MediaRecord, info: bool) -> ResolvedOutcome {
        if info {
            return ResolvedOutcome::Metadata(record);
        }
        match record.media_type {
            MediaType::Voice => self.resolve_voice(record.data.unwrap_or_default()),
            _ => ResolvedOutcome::Redirect(normalize_relative(&record.path)),
        }
    }

    /// Anything other than a confirmed "not found" counts as present
    fn probe(&self, relative: &str) -> bool {
        match std::fs::metadata(self.data_path(relative)) {
            Ok(_) => true,
            Err(e) => e.kind() != std::io::ErrorKind::NotFound,
        }
    }

    /// Transcode a voice payload to MP3, or hand back the original SILK
    pub fn resolve_voice(&self, data: Vec<u8>) -> ResolvedOutcome {
        match self.transcoder.transcode(&data) {
            Ok(mp3) => ResolvedOutcome::inline(VOICE_MP3, mp3),
            Err(e) => {
                log::warn!("voice transcode failed, serving silk: {}", e);
                ResolvedOutcome::inline(VOICE_SILK, data)
            }
        }
    }
}
