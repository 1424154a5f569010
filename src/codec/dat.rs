// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Image container decoding
//!
//! The messaging client stores image attachments as `.dat` files. The legacy
//! layout is a plain JPEG/PNG/GIF/BMP/WebP file with every byte XOR-ed by a
//! single per-install key. The key is never stored; it is recovered by
//! matching the first bytes against known image signatures.

/// Container extension, compared case-insensitively
pub const CONTAINER_EXTENSION: &str = "dat";

/// Header of the versioned (AES) container layout
const VERSIONED_HEADERS: [&[u8]; 2] = [
    &[0x07, 0x08, b'V', b'1', 0x08, 0x07],
    &[0x07, 0x08, b'V', b'2', 0x08, 0x07],
];

const SIGNATURES: [(&[u8], ImageFormat); 5] = [
    (&[0xFF, 0xD8, 0xFF], ImageFormat::Jpg),
    (&[0x89, 0x50, 0x4E, 0x47], ImageFormat::Png),
    (&[0x47, 0x49, 0x46, 0x38], ImageFormat::Gif),
    (&[0x42, 0x4D], ImageFormat::Bmp),
    (&[0x52, 0x49, 0x46, 0x46], ImageFormat::Webp),
];

/// Format of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpg,
    Png,
    Gif,
    Bmp,
    Webp,
}

impl ImageFormat {
    /// Short extension tag ("jpg", "png", ...)
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Webp => "webp",
        }
    }

    /// Content type sent to clients. Formats without a dedicated mapping
    /// are labelled `image/jpg`.
    pub fn content_type(&self) -> &'static str {
        content_type_for_tag(self.extension())
    }
}

/// Map a decoder format tag to a content type
pub fn content_type_for_tag(tag: &str) -> &'static str {
    match tag {
        "jpg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "image/jpg",
    }
}

/// A successfully decoded container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

/// Converts a container blob to a standard image.
///
/// `None` means "not a recognized container"; callers fall back to the raw
/// bytes.
pub trait ContainerDecoder: Send + Sync {
    fn decode(&self, raw: &[u8]) -> Option<DecodedImage>;
}

/// Decoder for the single-byte XOR container layout
#[derive(Debug, Default, Clone, Copy)]
pub struct XorDatDecoder;

impl XorDatDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Recover the XOR key and image format from the leading bytes
    pub fn detect(raw: &[u8]) -> Option<(u8, ImageFormat)> {
        SIGNATURES.iter().find_map(|(magic, format)| {
            if raw.len() < magic.len() {
                return None;
            }
            let key = raw[0] ^ magic[0];
            magic
                .iter()
                .zip(raw)
                .all(|(m, b)| b ^ key == *m)
                .then_some((key, *format))
        })
    }

    /// Whether the blob uses the versioned layout this decoder cannot read
    pub fn is_versioned(raw: &[u8]) -> bool {
        VERSIONED_HEADERS.iter().any(|h| raw.starts_with(h))
    }
}

impl ContainerDecoder for XorDatDecoder {
    fn decode(&self, raw: &[u8]) -> Option<DecodedImage> {
        if raw.is_empty() {
            return None;
        }
        if Self::is_versioned(raw) {
            log::debug!("versioned image container needs an account key, skipping decode");
            return None;
        }

        let (key, format) = Self::detect(raw)?;
        Some(DecodedImage {
            bytes: raw.iter().map(|b| b ^ key).collect(),
            format,
        })
    }
}
