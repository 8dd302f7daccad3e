//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write the sprites embedded on AF, BK, TRN and PIC files.
//!
//! A sprite is a small header plus an opcode-compressed image. The payload
//! is a stream of 16-bit words where the low 2 bits are the opcode and the
//! high 14 bits its argument:
//!
//! | Opcode | Meaning |
//! | ------ | ------- |
//! | 0 | Set the X position to the argument. |
//! | 1 | Copy the next `argument` bytes as literal pixels, advancing X, then reset X to 0. |
//! | 2 | Set the Y position to the argument. |
//! | 3 | End of image. Must be the last word of the payload. |
//!
//! Pixels never written stay transparent. The payload is kept verbatim on
//! the struct so unmodified sprites re-encode byte-identical; the decoded
//! raster is derived on demand.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use std::io::{Cursor, Seek, Write};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable};

/// Maximum argument an opcode word can carry.
const MAX_OPCODE_ARG: usize = 0x3FFF;

#[cfg(test)] mod sprite_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents a sprite decoded in memory, with its payload still compressed.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Sprite {

    /// Horizontal offset of the sprite relative to its owner.
    pos_x: i16,

    /// Vertical offset of the sprite relative to its owner.
    pos_y: i16,

    width: u16,
    height: u16,

    /// Index of the sprite within its animation.
    index: u8,

    /// If the sprite is a placeholder reusing the image of another sprite.
    missing: bool,

    /// The compressed image payload, verbatim from disk.
    #[serde(with = "crate::utils::serde_base64")]
    data: Vec<u8>,
}

//---------------------------------------------------------------------------//
//                          Implementation of Sprite
//---------------------------------------------------------------------------//

impl Decodeable for Sprite {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let image_len = data.read_u16()? as usize;
        let pos_x = data.read_i16()?;
        let pos_y = data.read_i16()?;
        let width = data.read_u16()?;
        let height = data.read_u16()?;
        let index = data.read_u8()?;
        let missing = data.read_bool()?;

        let image_data = if image_len > 0 && !missing {
            data.read_slice(image_len, false)?
        } else {
            vec![]
        };

        Ok(Self {
            pos_x,
            pos_y,
            width,
            height,
            index,
            missing,
            data: image_data,
        })
    }
}

impl Encodeable for Sprite {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        let has_payload = !self.data.is_empty() && !self.missing;

        buffer.write_u16(if has_payload { self.data.len() as u16 } else { 0 })?;
        buffer.write_i16(self.pos_x)?;
        buffer.write_i16(self.pos_y)?;
        buffer.write_u16(self.width)?;
        buffer.write_u16(self.height)?;
        buffer.write_u8(self.index)?;
        buffer.write_bool(self.missing)?;

        if has_payload {
            buffer.write_all(&self.data)?;
        }

        Ok(())
    }
}

impl Sprite {

    /// This function decompresses the payload into a row-major raster.
    ///
    /// Transparent pixels are `None`. It fails if an end opcode shows up
    /// before the end of the payload, a literal run gets cut short, or a
    /// pixel lands outside the canvas.
    pub fn decode_image(&self) -> Result<Vec<Option<u8>>> {
        let mut raster = vec![None; self.width as usize * self.height as usize];

        let mut data = Cursor::new(&self.data);
        let len = data.len()?;

        let mut x = 0u16;
        let mut y = 0u16;

        while data.stream_position()? < len {
            let word = data.read_u16()?;
            let arg = word >> 2;

            match word & 3 {
                0 => x = arg,
                2 => y = arg,
                1 => {
                    for _ in 0..arg {
                        let offset = data.stream_position()?;
                        let pixel = data.read_u8()
                            .map_err(|_| SDLibError::DecodingSpriteTruncatedRun(offset))?;

                        let position = y as usize * self.width as usize + x as usize;
                        if position >= raster.len() {
                            return Err(SDLibError::DecodingSpriteOutOfBounds {
                                x,
                                y,
                                width: self.width,
                                height: self.height,
                            })
                        }

                        raster[position] = Some(pixel);
                        x += 1;
                    }

                    x = 0;
                }
                _ => {
                    if data.stream_position()? != len {
                        return Err(SDLibError::DecodingSpriteEarlyEndMarker(data.stream_position()?.saturating_sub(2)))
                    }
                }
            }
        }

        Ok(raster)
    }

    /// This function compresses the provided raster into a fresh payload,
    /// replacing the sprite's image and dimensions.
    ///
    /// The output uses one literal run per stretch of opaque pixels, with
    /// X/Y repositioning opcodes only where the decoder needs them.
    pub fn set_image(&mut self, raster: &[Option<u8>], width: u16, height: u16) -> Result<()> {
        if raster.len() != width as usize * height as usize {
            return Err(SDLibError::InvalidFieldLength {
                field: "sprite raster",
                expected: width as usize * height as usize,
                found: raster.len(),
            })
        }

        // Positions have to fit in the 14-bit opcode argument.
        if width as usize > MAX_OPCODE_ARG || height as usize > MAX_OPCODE_ARG {
            return Err(SDLibError::InvalidFieldRange {
                field: "sprite dimensions",
                value: width.max(height) as i64,
                min: 0,
                max: MAX_OPCODE_ARG as i64,
            })
        }

        let mut data = vec![];
        let mut current_y = 0u16;

        for y in 0..height {
            let row = &raster[y as usize * width as usize..(y + 1) as usize * width as usize];

            let mut x = 0u16;
            while (x as usize) < row.len() {
                if row[x as usize].is_none() {
                    x += 1;
                    continue;
                }

                let start = x;
                let mut run = vec![];
                while let Some(Some(pixel)) = row.get(x as usize) {
                    run.push(*pixel);
                    x += 1;
                }

                if current_y != y {
                    data.write_u16((y << 2) | 2)?;
                    current_y = y;
                }

                // After every literal run the decoder resets X to 0, so a
                // chunk starting at 0 needs no repositioning.
                let mut chunk_start = start;
                for chunk in run.chunks(MAX_OPCODE_ARG) {
                    if chunk_start != 0 {
                        data.write_u16(chunk_start << 2)?;
                    }

                    data.write_u16(((chunk.len() as u16) << 2) | 1)?;
                    data.write_all(chunk)?;

                    chunk_start += chunk.len() as u16;
                }
            }
        }

        data.write_u16(3)?;

        self.width = width;
        self.height = height;
        self.data = data;

        Ok(())
    }
}
