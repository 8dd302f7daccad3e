//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write the language DAT files (ENGLISH.DAT, GERMAN.DAT).
//!
//! A language file is a table of title entries (a dword offset plus a
//! fixed 32-byte title) followed by one scrambled string block per title,
//! the first block starting right where the table ends. There is no entry
//! count: the table ends when a read offset lands at or past the end of
//! the file, which on a real file is the leading bytes of the first block.
//! Each block is XORed with a rolling key that starts at the block's size
//! modulo 256, and holds a NUL-terminated string.
//!
//! Block offsets are derived data and get recomputed on write; each written
//! block is the string plus its single NUL terminator.

use encoding_rs::ISO_8859_15;
use getset::*;
use itertools::Itertools;
use serde_derive::{Serialize, Deserialize};

use std::io::SeekFrom;

use crate::binary::{ReadBytes, WriteBytes, XorStream};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable, NativeFile};

/// Extension used by language files.
pub const EXTENSION: &str = ".DAT";

/// Size of the fixed title field of each entry.
const TITLE_SIZE: usize = 32;

/// Bytes each entry takes on the header table.
const ENTRY_SIZE: u32 = 4 + TITLE_SIZE as u32;

#[cfg(test)] mod language_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents an entire language file decoded in memory.
///
/// Titles and strings pair up by index: `titles[n]` is the menu title of
/// the scrambled string stored at `strings[n]`.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct LanguageFile {
    titles: Vec<String>,
    strings: Vec<String>,
}

//---------------------------------------------------------------------------//
//                       Implementation of LanguageFile
//---------------------------------------------------------------------------//

impl Decodeable for LanguageFile {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let file_size = data.len()?;

        let mut language = Self::default();
        let mut offsets = vec![];
        while data.stream_position()? < file_size {
            let offset = data.read_u32()? as u64;
            if offset >= file_size {
                break;
            }

            offsets.push(offset);
            language.titles.push(data.read_string_u8_0padded(TITLE_SIZE)?);
        }
        offsets.push(file_size);

        // The scan above consumed the leading dword of the first block, so
        // every block gets sought by its recorded offset.
        for (offset, end) in offsets.iter().tuple_windows() {
            if end < offset {
                return Err(SDLibError::DecodingFieldMismatch {
                    field: "language block end",
                    expected: *offset,
                    found: *end,
                    offset: *offset,
                })
            }

            data.seek(SeekFrom::Start(*offset))?;

            let block_size = (end - offset) as usize;
            let mut data = XorStream::new(&mut *data);
            data.set_key(Some((block_size % 256) as u8));
            language.strings.push(data.read_string_u8_0padded(block_size)?);
        }

        Ok(language)
    }
}

impl Encodeable for LanguageFile {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        // Block sizes depend on the encoded form of each string.
        let mut block_sizes = Vec::with_capacity(self.strings.len());
        for string in &self.strings {
            let (encoded, _, had_errors) = ISO_8859_15.encode(string);
            if had_errors {
                return Err(SDLibError::EncodingUnrepresentableString(string.to_owned()));
            }

            block_sizes.push(encoded.len() + 1);
        }

        // There's no dedicated table terminator: the first block starts
        // right after the last entry, and the read scan stops on its
        // leading bytes.
        let header_size = ENTRY_SIZE * self.titles.len() as u32;
        let mut position = header_size;
        for (title, block_size) in self.titles.iter().zip(&block_sizes) {
            buffer.write_u32(position)?;
            buffer.write_string_u8_0padded(title, TITLE_SIZE, false)?;
            position += *block_size as u32;
        }

        for (string, block_size) in self.strings.iter().zip(&block_sizes) {
            let mut buffer = XorStream::new(&mut *buffer);
            buffer.set_key(Some((block_size % 256) as u8));
            buffer.write_string_u8_0padded(string, *block_size, false)?;
        }

        Ok(())
    }
}

impl NativeFile for LanguageFile {

    fn validate(&self) -> Result<()> {
        if self.titles.len() != self.strings.len() {
            return Err(SDLibError::InvalidFieldLength {
                field: "language titles",
                expected: self.strings.len(),
                found: self.titles.len(),
            })
        }

        Ok(())
    }
}
