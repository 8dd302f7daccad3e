//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing the error types used in the crate.
//!
//! Errors fall in three groups: decoding errors (the bytes on disk don't
//! match the format, reported with the offset where decoding broke),
//! validation errors (a model built from JSON or code holds values the
//! format cannot store), and script errors (an animation string failed to
//! tokenize, reported with the character position and the fragment around
//! it).

use thiserror::Error;

/// Alias for the standard Result type, with the error type of this crate.
pub type Result<T, E = SDLibError> = core::result::Result<T, E>;

/// Custom error type for the lib.
#[derive(Error, Debug)]
pub enum SDLibError {

    //-----------------------------------------------------//
    //                  Decoding errors
    //-----------------------------------------------------//

    /// Error for when we expect a bool (0 or 1) and we find another value.
    #[error("Error trying to decode a bool value: found {0} at offset {1}.")]
    DecodingBoolError(u8, u64),

    /// Error for when a length-prefixed string is missing its NUL terminator.
    #[error("Error trying to decode a string: missing NUL terminator at offset {0}.")]
    DecodingMissingStringTerminator(u64),

    /// Error for when a field that must hold a fixed value holds something else.
    #[error("Error trying to decode {field}: expected {expected}, found {found} at offset {offset}.")]
    DecodingFieldMismatch {
        field: &'static str,
        expected: u64,
        found: u64,
        offset: u64,
    },

    /// Error for when we finish decoding a file and there's still data left.
    #[error("Error while trying to decode a file: we expected a size of {0}, but we got a size of {1}. If you see this, it means this file is either corrupted, or the decoding logic is incorrect.")]
    DecodingMismatchSizeError(usize, usize),

    /// Error for sprite payloads with an end-of-stream opcode before the end.
    #[error("Error trying to decode a sprite: end opcode found at offset {0} before the end of the payload.")]
    DecodingSpriteEarlyEndMarker(u64),

    /// Error for sprite literal runs that write outside the declared canvas.
    #[error("Error trying to decode a sprite: pixel write at ({x}, {y}) falls outside a {width}x{height} canvas.")]
    DecodingSpriteOutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    /// Error for sprite payloads that end in the middle of a literal run.
    #[error("Error trying to decode a sprite: the payload ended in the middle of a literal run at offset {0}.")]
    DecodingSpriteTruncatedRun(u64),

    /// Error for sound archives with a broken header.
    #[error("Error trying to decode a sound archive: {0}.")]
    DecodingSoundHeaderError(String),

    //-----------------------------------------------------//
    //                 Validation errors
    //-----------------------------------------------------//

    /// Error for when a field holds a value outside what the format can store.
    #[error("The field {field} holds the value {value}, outside the valid range {min}..={max}.")]
    InvalidFieldRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Error for when a list has a length the format cannot store.
    #[error("The field {field} holds {found} entries, but the format requires {expected}.")]
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// Error for when a string doesn't fit in its fixed-width field.
    #[error("The string '{0}' is {1} bytes long, but its field only holds {2} bytes.")]
    EncodingPaddedStringError(String, usize, usize),

    /// Error for when a string contains characters the target code page can't represent.
    #[error("The string '{0}' contains characters that cannot be encoded.")]
    EncodingUnrepresentableString(String),

    //-----------------------------------------------------//
    //                   Script errors
    //-----------------------------------------------------//

    /// Error for animation strings that fail to tokenize.
    #[error("Unparseable animation string at character {position}, near '{fragment}'.")]
    UnparseableScript {
        position: usize,
        fragment: String,
    },

    /// Error for numbers in animation strings that don't fit the value range.
    #[error("Animation string number '{0}' at character {1} is out of range.")]
    ScriptNumberOutOfRange(String, usize),

    //-----------------------------------------------------//
    //              Wrappers of other errors
    //-----------------------------------------------------//

    /// Error for when io fails.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Error for when serde_json fails.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}
