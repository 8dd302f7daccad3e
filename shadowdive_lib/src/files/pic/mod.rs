//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write PIC (pilot photo collection) files.
//!
//! A PIC file starts with a photo count, 196 bytes of header padding the
//! game never reads but we keep verbatim, and one absolute offset per
//! photo. Each photo is a player flag, a sex word, the first 48 colors of a
//! palette, and the portrait sprite.
//!
//! The portrait dimensions are stored off by one on disk; they are
//! corrected on read and the correction is undone on write, so the struct
//! always holds the real size.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use std::io::SeekFrom;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable, NativeFile};
use crate::files::palette::Palette;
use crate::files::sprite::Sprite;

/// Extension used by photo collection files.
pub const EXTENSION: &str = ".PIC";

/// Maximum number of photos a file can hold.
pub const PHOTO_MAX_COUNT: u32 = 256;

/// Offset where the photo offset table starts.
const TABLE_OFFSET: usize = 200;

/// Size of the padding between the photo count and the offset table.
const HEADER_PAD_SIZE: usize = TABLE_OFFSET - 4;

/// Number of colors of the embedded palettes.
const PHOTO_PALETTE_SIZE: usize = 48;

#[cfg(test)] mod pic_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents an entire PIC file decoded in memory.
#[derive(PartialEq, Eq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct PicFile {

    /// Header padding, kept verbatim.
    #[serde(with = "crate::utils::serde_base64")]
    header_pad: Vec<u8>,

    /// The photos of the collection.
    photos: Vec<Photo>,
}

/// This represents a single pilot photo.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Photo {

    /// If the photo belongs to a playable pilot.
    is_player: bool,

    /// Sex of the pilot: 0 male, 1 female.
    sex: u16,

    /// The first 48 colors of the photo's palette.
    palette: Palette,
    unknown: u8,

    /// The portrait sprite.
    sprite: Sprite,
}

//---------------------------------------------------------------------------//
//                          Implementation of PicFile
//---------------------------------------------------------------------------//

impl Default for PicFile {
    fn default() -> Self {
        Self {
            header_pad: vec![0; HEADER_PAD_SIZE],
            photos: vec![],
        }
    }
}

impl Decodeable for PicFile {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let photo_count = data.read_u32()?;
        if photo_count > PHOTO_MAX_COUNT {
            return Err(SDLibError::InvalidFieldRange {
                field: "photo count",
                value: photo_count as i64,
                min: 0,
                max: PHOTO_MAX_COUNT as i64,
            })
        }

        let mut pic = Self {
            header_pad: data.read_slice(HEADER_PAD_SIZE, false)?,
            photos: vec![],
        };

        let offsets = (0..photo_count)
            .map(|_| data.read_u32().map(u64::from))
            .collect::<Result<Vec<_>>>()?;

        // Photos get sought by their recorded offsets, so files with slack
        // between records decode fine.
        for offset in &offsets {
            data.seek(SeekFrom::Start(*offset))?;
            pic.photos.push(Photo::decode(data)?);
        }

        Ok(pic)
    }
}

impl Encodeable for PicFile {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        buffer.write_u32(self.photos.len() as u32)?;
        buffer.write_all(&self.header_pad)?;

        // Photos are staged first so the offset table can be written before
        // them.
        let mut records = Vec::with_capacity(self.photos.len());
        for photo in &mut self.photos {
            let mut record = vec![];
            photo.encode(&mut record)?;
            records.push(record);
        }

        let mut position = (TABLE_OFFSET + 4 * records.len()) as u32;
        for record in &records {
            buffer.write_u32(position)?;
            position += record.len() as u32;
        }

        for record in &records {
            buffer.write_all(record)?;
        }

        Ok(())
    }
}

impl NativeFile for PicFile {

    fn validate(&self) -> Result<()> {
        if self.photos.len() > PHOTO_MAX_COUNT as usize {
            return Err(SDLibError::InvalidFieldRange {
                field: "photo count",
                value: self.photos.len() as i64,
                min: 0,
                max: PHOTO_MAX_COUNT as i64,
            })
        }

        if self.header_pad.len() != HEADER_PAD_SIZE {
            return Err(SDLibError::InvalidFieldLength {
                field: "header padding",
                expected: HEADER_PAD_SIZE,
                found: self.header_pad.len(),
            })
        }

        for photo in &self.photos {
            photo.validate()?;
        }

        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Photo
//---------------------------------------------------------------------------//

impl Photo {

    fn validate(&self) -> Result<()> {
        if self.sex > 1 {
            return Err(SDLibError::InvalidFieldRange {
                field: "photo sex",
                value: self.sex as i64,
                min: 0,
                max: 1,
            })
        }

        if *self.sprite.width() == 0 || *self.sprite.height() == 0 {
            return Err(SDLibError::InvalidFieldRange {
                field: "photo size",
                value: 0,
                min: 1,
                max: u16::MAX as i64,
            })
        }

        Ok(())
    }
}

impl Decodeable for Photo {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let mut photo = Self {
            is_player: data.read_bool()?,
            sex: data.read_u16()?,
            ..Default::default()
        };

        photo.palette.read_range(data, 0, PHOTO_PALETTE_SIZE)?;
        photo.unknown = data.read_u8()?;
        photo.sprite = Sprite::decode(data)?;

        // The stored dimensions are one short of the real ones.
        let fix_dimension = |field: &'static str, value: u16| value.checked_add(1)
            .ok_or(SDLibError::InvalidFieldRange {
                field,
                value: value as i64,
                min: 0,
                max: u16::MAX as i64 - 1,
            });

        let width = fix_dimension("photo width", *photo.sprite.width())?;
        let height = fix_dimension("photo height", *photo.sprite.height())?;
        photo.sprite.set_width(width);
        photo.sprite.set_height(height);

        Ok(photo)
    }
}

impl Encodeable for Photo {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        buffer.write_bool(self.is_player)?;
        buffer.write_u16(self.sex)?;
        self.palette.write_range(buffer, 0, PHOTO_PALETTE_SIZE)?;
        buffer.write_u8(self.unknown)?;

        *self.sprite.width_mut() -= 1;
        *self.sprite.height_mut() -= 1;
        let result = self.sprite.encode(buffer);
        *self.sprite.width_mut() += 1;
        *self.sprite.height_mut() += 1;

        result
    }
}
