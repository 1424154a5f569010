// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Media codecs
//!
//! Format-specific conversions the gateway applies on the way out:
//! - [`dat`] - image container decoding (`.dat` attachments)
//! - [`voice`] - SILK voice transcoding to MP3

pub mod dat;
pub mod voice;

pub use dat::{ContainerDecoder, DecodedImage, ImageFormat, XorDatDecoder};
pub use voice::{CommandTranscoder, DisabledTranscoder, VoiceTranscoder};
