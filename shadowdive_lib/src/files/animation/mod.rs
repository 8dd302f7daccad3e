//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write the animation blocks shared by AF and BK files.
//!
//! An animation is a list of sprites, a hit-coordinate table (the collision
//! outline per frame, packed in 10-bit signed coordinates), an animation
//! string (the tag script driving playback, see [`crate::script`]) and a few
//! extra strings used by specific moves.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable};
use crate::files::sprite::Sprite;
use crate::script::Script;

#[cfg(test)] mod animation_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents one entry of the hit-coordinate table.
///
/// On disk each entry is a u32 with both coordinates packed in 10 bits
/// (sign-folded at 512), the owning frame in the top 6 bits, and 6 more
/// bits with no known use.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Getters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", set = "pub")]
pub struct HitCoordinate {
    x: i16,
    y: i16,

    /// Bits 10-15 of the packed entry. Unused by the game as far as we know.
    unknown: u8,

    /// Index of the frame this outline point belongs to.
    frame_id: u8,
}

/// This represents an animation block decoded in memory.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Animation {

    /// Horizontal position of the animation on screen.
    start_x: i16,

    /// Vertical position of the animation on screen.
    start_y: i16,

    /// The collision outline points of the animation.
    coord_table: Vec<HitCoordinate>,

    /// The tag script driving the animation. Parse it with [`Self::script`].
    anim_string: String,

    /// Extra strings, used by a few moves for projectile scripts.
    extra_strings: Vec<String>,

    /// The sprites of the animation.
    sprites: Vec<Sprite>,
}

//---------------------------------------------------------------------------//
//                      Implementation of HitCoordinate
//---------------------------------------------------------------------------//

impl HitCoordinate {

    /// This function unpacks an entry from its two 16-bit halves.
    fn unpack(low: u16, high: u16) -> Self {
        Self {
            x: Self::unfold(low & 0x3FF),
            y: Self::unfold(high & 0x3FF),
            unknown: (low >> 10) as u8,
            frame_id: (high >> 10) as u8,
        }
    }

    /// This function packs the entry back into its on-disk u32.
    fn pack(&self) -> u32 {
        ((self.frame_id as u32 & 0x3F) << 26)
            | ((self.y as u32 & 0x3FF) << 16)
            | ((self.unknown as u32 & 0x3F) << 10)
            | (self.x as u32 & 0x3FF)
    }

    /// 10-bit values of 512 and above are negative.
    fn unfold(value: u16) -> i16 {
        if value < 512 {
            value as i16
        } else {
            value as i16 - 1024
        }
    }
}

//---------------------------------------------------------------------------//
//                        Implementation of Animation
//---------------------------------------------------------------------------//

impl Decodeable for Animation {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let start_x = data.read_i16()?;
        let start_y = data.read_i16()?;

        // Four bytes of padding that must be zero.
        let offset = data.stream_position()?;
        let padding = data.read_u32()?;
        if padding != 0 {
            return Err(SDLibError::DecodingFieldMismatch {
                field: "animation padding",
                expected: 0,
                found: padding as u64,
                offset,
            })
        }

        let coord_count = data.read_u16()?;
        let sprite_count = data.read_u8()?;

        let mut coord_table = Vec::with_capacity(coord_count as usize);
        for _ in 0..coord_count {
            let low = data.read_u16()?;
            let high = data.read_u16()?;
            coord_table.push(HitCoordinate::unpack(low, high));
        }

        let anim_string = data.read_var_string(false)?;

        let extra_string_count = data.read_u8()?;
        let mut extra_strings = Vec::with_capacity(extra_string_count as usize);
        for _ in 0..extra_string_count {
            extra_strings.push(data.read_var_string(false)?);
        }

        let mut sprites = Vec::with_capacity(sprite_count as usize);
        for _ in 0..sprite_count {
            sprites.push(Sprite::decode(data)?);
        }

        Ok(Self {
            start_x,
            start_y,
            coord_table,
            anim_string,
            extra_strings,
            sprites,
        })
    }
}

impl Encodeable for Animation {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        buffer.write_i16(self.start_x)?;
        buffer.write_i16(self.start_y)?;
        buffer.write_u32(0)?;

        buffer.write_u16(self.coord_table.len() as u16)?;
        buffer.write_u8(self.sprites.len() as u8)?;

        for coord in &self.coord_table {
            buffer.write_u32(coord.pack())?;
        }

        buffer.write_var_string(&self.anim_string, false)?;

        buffer.write_u8(self.extra_strings.len() as u8)?;
        for string in &self.extra_strings {
            buffer.write_var_string(string, false)?;
        }

        for sprite in &mut self.sprites {
            sprite.encode(buffer)?;
        }

        Ok(())
    }
}

impl Animation {

    /// This function parses the animation string into a [`Script`].
    pub fn script(&self) -> Result<Script> {
        Script::decode(&self.anim_string)
    }

    /// This function checks that the lists fit in their on-disk counters.
    pub fn validate(&self) -> Result<()> {
        if self.coord_table.len() > u16::MAX as usize {
            return Err(SDLibError::InvalidFieldLength {
                field: "animation coord table",
                expected: u16::MAX as usize,
                found: self.coord_table.len(),
            })
        }

        if self.sprites.len() > u8::MAX as usize {
            return Err(SDLibError::InvalidFieldLength {
                field: "animation sprites",
                expected: u8::MAX as usize,
                found: self.sprites.len(),
            })
        }

        if self.extra_strings.len() > u8::MAX as usize {
            return Err(SDLibError::InvalidFieldLength {
                field: "animation extra strings",
                expected: u8::MAX as usize,
                found: self.extra_strings.len(),
            })
        }

        Ok(())
    }
}
