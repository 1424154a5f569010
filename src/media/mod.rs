// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Media reference resolution
//!
//! Turns a media key from a chat message into something a client can fetch.
//! A key may list several candidates separated by commas; each is either a
//! 32-character content hash (looked up in the media index) or a path
//! relative to the data root. The first candidate that resolves wins.
//!
//! ```text
//! /image/<key>  --> MediaGateway::resolve --> Redirect("/data/<path>")
//!                                         --> Metadata(record)      (?info=1)
//! /voice/<key>  --> MediaGateway::resolve --> InlineBytes(audio/mp3 | audio/silk)
//! /data/<path>  --> MediaGateway::resolve_data --> InlineBytes(image/*) | File(path)
//! ```

mod data;
mod key;
mod outcome;
mod resolver;

pub use data::normalize_relative;
pub use key::{parse_key, Candidate, HASH_LEN};
pub use outcome::{data_url, ResolvedOutcome};
pub use resolver::{LastError, MediaGateway, VOICE_MP3, VOICE_SILK};
