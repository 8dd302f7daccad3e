//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write BK (stage) files.
//!
//! A BK file holds a stage: the raw background image, a numbered table of
//! stage animations (hazards, scenery, intro sequences), the stage palettes
//! with their remapping tables, and a sound lookup table.
//!
//! Each entry of the animation table is prefixed with the absolute offset of
//! the byte right after the entry, so the game can skip entries it doesn't
//! care about. Those offsets are derived data; they get recomputed on write.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use std::collections::BTreeMap;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable, NativeFile};
use crate::files::animation::Animation;
use crate::files::palette::PaletteMapping;
use crate::utils::check_size_mismatch;

/// Extension used by stage files.
pub const EXTENSION: &str = ".BK";

/// First animation number outside the valid range. Numbers at or past it end the table.
pub const ANIMATION_MAX_NUMBER: u8 = 50;

/// Number of entries on the sound table.
pub const SOUND_TABLE_SIZE: usize = 30;

/// Size of the fixed part of the header, before the animation table.
const HEADER_SIZE: u32 = 9;

#[cfg(test)] mod bk_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents an entire BK file decoded in memory.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Stage {
    file_id: u32,
    unknown_a: u8,

    background_width: u16,
    background_height: u16,

    /// The stage animations, keyed by their slot number.
    animations: BTreeMap<u8, StageAnimation>,

    /// The raw background image, one palette index per pixel.
    #[serde(with = "crate::utils::serde_base64")]
    background: Vec<u8>,

    /// The stage palettes, each with its remapping tables.
    palettes: Vec<PaletteMapping>,

    /// Sound lookup table, referenced by the `s` tag of animation strings.
    sound_table: Vec<u8>,
}

/// This represents a single stage animation of a BK file.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct StageAnimation {
    unknown_a: u8,

    /// Animation to chain into when this one hits the player.
    chain_hit: u8,

    /// Animation to chain into when this one misses.
    chain_no_hit: u8,

    /// If the animation starts playing when the stage loads.
    load_on_start: u8,

    /// Trigger probability weight.
    probability: u16,

    /// Damage dealt when the animation is a hazard and connects.
    hazard_damage: u8,
    footer_string: String,

    /// The animation itself.
    animation: Animation,
}

//---------------------------------------------------------------------------//
//                           Implementation of Stage
//---------------------------------------------------------------------------//

impl Decodeable for Stage {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let mut stage = Self {
            file_id: data.read_u32()?,
            unknown_a: data.read_u8()?,
            background_width: data.read_u16()?,
            background_height: data.read_u16()?,
            ..Default::default()
        };

        loop {

            // Forward offset of the next entry. Derived, so not kept.
            let _offset = data.read_u32()?;

            let number = data.read_u8()?;
            if number >= ANIMATION_MAX_NUMBER {
                break;
            }

            stage.animations.insert(number, StageAnimation::decode(data)?);
        }

        let background_size = stage.background_width as usize * stage.background_height as usize;
        stage.background = data.read_slice(background_size, false)?;

        let palette_count = data.read_u8()?;
        for _ in 0..palette_count {
            stage.palettes.push(PaletteMapping::decode(data)?);
        }

        stage.sound_table = data.read_slice(SOUND_TABLE_SIZE, false)?;

        // Trigger an error if there's left data on the source.
        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        Ok(stage)
    }
}

impl Encodeable for Stage {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        buffer.write_u32(self.file_id)?;
        buffer.write_u8(self.unknown_a)?;
        buffer.write_u16(self.background_width)?;
        buffer.write_u16(self.background_height)?;

        // Each record is staged first so its forward offset can be written
        // before it.
        let mut position = HEADER_SIZE;
        for (number, animation) in self.animations.iter_mut() {
            let mut record = vec![];
            animation.encode(&mut record)?;

            position += 5 + record.len() as u32;
            buffer.write_u32(position)?;
            buffer.write_u8(*number)?;
            buffer.write_all(&record)?;
        }

        // The terminator entry points right past itself.
        position += 5;
        buffer.write_u32(position)?;
        buffer.write_u8(ANIMATION_MAX_NUMBER)?;

        buffer.write_all(&self.background)?;

        buffer.write_u8(self.palettes.len() as u8)?;
        for palette in &mut self.palettes {
            palette.encode(buffer)?;
        }

        buffer.write_all(&self.sound_table)?;

        Ok(())
    }
}

impl NativeFile for Stage {

    fn validate(&self) -> Result<()> {
        if let Some(number) = self.animations.keys().find(|number| **number >= ANIMATION_MAX_NUMBER) {
            return Err(SDLibError::InvalidFieldRange {
                field: "stage animation number",
                value: *number as i64,
                min: 0,
                max: ANIMATION_MAX_NUMBER as i64 - 1,
            })
        }

        let background_size = self.background_width as usize * self.background_height as usize;
        if self.background.len() != background_size {
            return Err(SDLibError::InvalidFieldLength {
                field: "stage background",
                expected: background_size,
                found: self.background.len(),
            })
        }

        if self.palettes.len() > u8::MAX as usize {
            return Err(SDLibError::InvalidFieldLength {
                field: "stage palettes",
                expected: u8::MAX as usize,
                found: self.palettes.len(),
            })
        }

        if self.sound_table.len() != SOUND_TABLE_SIZE {
            return Err(SDLibError::InvalidFieldLength {
                field: "sound table",
                expected: SOUND_TABLE_SIZE,
                found: self.sound_table.len(),
            })
        }

        for palette in &self.palettes {
            palette.validate()?;
        }

        for animation in self.animations.values() {
            animation.animation().validate()?;
        }

        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                      Implementation of StageAnimation
//---------------------------------------------------------------------------//

impl Decodeable for StageAnimation {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        Ok(Self {
            unknown_a: data.read_u8()?,
            chain_hit: data.read_u8()?,
            chain_no_hit: data.read_u8()?,
            load_on_start: data.read_u8()?,
            probability: data.read_u16()?,
            hazard_damage: data.read_u8()?,
            footer_string: data.read_var_string(true)?,
            animation: Animation::decode(data)?,
        })
    }
}

impl Encodeable for StageAnimation {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        buffer.write_u8(self.unknown_a)?;
        buffer.write_u8(self.chain_hit)?;
        buffer.write_u8(self.chain_no_hit)?;
        buffer.write_u8(self.load_on_start)?;
        buffer.write_u16(self.probability)?;
        buffer.write_u8(self.hazard_damage)?;
        buffer.write_var_string(&self.footer_string, true)?;
        self.animation.encode(buffer)
    }
}
