//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write AF (fighter) files.
//!
//! An AF file describes one HAR: its stats, its numbered move table (each
//! move being an animation plus combat data) and a sound lookup table. Move
//! numbers identify the move slot; the table on disk ends at the first
//! number past the valid range.
//!
//! Speeds and endurance are fixed-point values stored as integers scaled by
//! 256. The raw integers are what's kept on the struct; use the `*_as_f32`
//! accessors for the scaled form.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use std::collections::BTreeMap;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable, NativeFile};
use crate::files::animation::Animation;
use crate::utils::check_size_mismatch;

/// Extension used by fighter files.
pub const EXTENSION: &str = ".AF";

/// First move number outside the valid range. Numbers at or past it end the table.
pub const MOVE_MAX_NUMBER: u8 = 70;

/// The terminator byte the game writes after the move table.
const END_MARKER: u8 = 250;

/// Number of entries on the sound table.
pub const SOUND_TABLE_SIZE: usize = 30;

/// Scale of the fixed-point stats.
const FIXED_POINT_SCALE: f32 = 256.0;

#[cfg(test)] mod af_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents an entire AF file decoded in memory.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Fighter {
    file_id: u16,
    exec_window: u16,

    /// Endurance of the HAR, fixed-point scaled by 256.
    endurance: u32,
    unknown_b: u8,
    health: u16,

    /// Walking speed, fixed-point scaled by 256. Same for the other three.
    forward_speed: i32,
    reverse_speed: i32,
    jump_speed: i32,
    fall_speed: i32,
    unknown_c: u8,
    unknown_d: u8,

    /// The moves of the HAR, keyed by their move number.
    moves: BTreeMap<u8, Move>,

    /// Sound lookup table, referenced by the `s` tag of animation strings.
    sound_table: Vec<u8>,
}

/// This represents a single move of an AF file.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Move {

    /// The animation of the move.
    animation: Animation,

    /// AI options for the move. Meaning mostly unknown.
    ai_opts: u16,

    /// Position constraints for the move to trigger.
    pos_constraints: u16,
    unknown_4: u8,
    unknown_5: u8,
    unknown_6: u8,
    unknown_7: u8,
    unknown_8: u8,
    unknown_9: u8,
    unknown_10: u8,
    unknown_11: u8,

    /// Animation to chain into when the move ends.
    next_anim_id: u8,

    /// Category of the move (jumping, standing, crouching...).
    category: u8,
    unknown_14: u8,

    /// Scrap value awarded when the move destroys the enemy.
    scrap_amount: u8,

    /// Animation to chain into on a successful hit.
    successor_id: u8,

    /// Damage dealt on hit.
    damage_amount: u8,
    unknown_18: u8,
    unknown_19: u8,

    /// Score points awarded on hit.
    points: u8,

    /// The input string that triggers the move. Fixed 21-byte field on disk.
    move_string: String,

    /// The string executed on the enemy HAR when the move connects.
    enemy_string: String,
}

//---------------------------------------------------------------------------//
//                          Implementation of Fighter
//---------------------------------------------------------------------------//

impl Decodeable for Fighter {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let mut fighter = Self {
            file_id: data.read_u16()?,
            exec_window: data.read_u16()?,
            endurance: data.read_u32()?,
            unknown_b: data.read_u8()?,
            health: data.read_u16()?,
            forward_speed: data.read_i32()?,
            reverse_speed: data.read_i32()?,
            jump_speed: data.read_i32()?,
            fall_speed: data.read_i32()?,
            unknown_c: data.read_u8()?,
            unknown_d: data.read_u8()?,
            ..Default::default()
        };

        loop {
            let number = data.read_u8()?;
            if number >= MOVE_MAX_NUMBER {
                break;
            }

            fighter.moves.insert(number, Move::decode(data)?);
        }

        fighter.sound_table = data.read_slice(SOUND_TABLE_SIZE, false)?;

        // Trigger an error if there's left data on the source.
        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        Ok(fighter)
    }
}

impl Encodeable for Fighter {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        buffer.write_u16(self.file_id)?;
        buffer.write_u16(self.exec_window)?;
        buffer.write_u32(self.endurance)?;
        buffer.write_u8(self.unknown_b)?;
        buffer.write_u16(self.health)?;
        buffer.write_i32(self.forward_speed)?;
        buffer.write_i32(self.reverse_speed)?;
        buffer.write_i32(self.jump_speed)?;
        buffer.write_i32(self.fall_speed)?;
        buffer.write_u8(self.unknown_c)?;
        buffer.write_u8(self.unknown_d)?;

        for (number, mov) in self.moves.iter_mut() {
            buffer.write_u8(*number)?;
            mov.encode(buffer)?;
        }

        buffer.write_u8(END_MARKER)?;
        buffer.write_all(&self.sound_table)?;

        Ok(())
    }
}

impl NativeFile for Fighter {

    fn validate(&self) -> Result<()> {
        if let Some(number) = self.moves.keys().find(|number| **number >= MOVE_MAX_NUMBER) {
            return Err(SDLibError::InvalidFieldRange {
                field: "move number",
                value: *number as i64,
                min: 0,
                max: MOVE_MAX_NUMBER as i64 - 1,
            })
        }

        if self.sound_table.len() != SOUND_TABLE_SIZE {
            return Err(SDLibError::InvalidFieldLength {
                field: "sound table",
                expected: SOUND_TABLE_SIZE,
                found: self.sound_table.len(),
            })
        }

        for mov in self.moves.values() {
            mov.animation().validate()?;
        }

        Ok(())
    }
}

impl Fighter {

    /// Endurance as the fractional value the game works with.
    pub fn endurance_as_f32(&self) -> f32 {
        self.endurance as f32 / FIXED_POINT_SCALE
    }

    pub fn forward_speed_as_f32(&self) -> f32 {
        self.forward_speed as f32 / FIXED_POINT_SCALE
    }

    pub fn reverse_speed_as_f32(&self) -> f32 {
        self.reverse_speed as f32 / FIXED_POINT_SCALE
    }

    pub fn jump_speed_as_f32(&self) -> f32 {
        self.jump_speed as f32 / FIXED_POINT_SCALE
    }

    pub fn fall_speed_as_f32(&self) -> f32 {
        self.fall_speed as f32 / FIXED_POINT_SCALE
    }
}

//---------------------------------------------------------------------------//
//                            Implementation of Move
//---------------------------------------------------------------------------//

impl Decodeable for Move {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let animation = Animation::decode(data)?;

        Ok(Self {
            animation,
            ai_opts: data.read_u16()?,
            pos_constraints: data.read_u16()?,
            unknown_4: data.read_u8()?,
            unknown_5: data.read_u8()?,
            unknown_6: data.read_u8()?,
            unknown_7: data.read_u8()?,
            unknown_8: data.read_u8()?,
            unknown_9: data.read_u8()?,
            unknown_10: data.read_u8()?,
            unknown_11: data.read_u8()?,
            next_anim_id: data.read_u8()?,
            category: data.read_u8()?,
            unknown_14: data.read_u8()?,
            scrap_amount: data.read_u8()?,
            successor_id: data.read_u8()?,
            damage_amount: data.read_u8()?,
            unknown_18: data.read_u8()?,
            unknown_19: data.read_u8()?,
            points: data.read_u8()?,
            move_string: data.read_string_u8_0padded(21)?,
            enemy_string: data.read_var_string(true)?,
        })
    }
}

impl Encodeable for Move {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.animation.encode(buffer)?;

        buffer.write_u16(self.ai_opts)?;
        buffer.write_u16(self.pos_constraints)?;
        buffer.write_u8(self.unknown_4)?;
        buffer.write_u8(self.unknown_5)?;
        buffer.write_u8(self.unknown_6)?;
        buffer.write_u8(self.unknown_7)?;
        buffer.write_u8(self.unknown_8)?;
        buffer.write_u8(self.unknown_9)?;
        buffer.write_u8(self.unknown_10)?;
        buffer.write_u8(self.unknown_11)?;
        buffer.write_u8(self.next_anim_id)?;
        buffer.write_u8(self.category)?;
        buffer.write_u8(self.unknown_14)?;
        buffer.write_u8(self.scrap_amount)?;
        buffer.write_u8(self.successor_id)?;
        buffer.write_u8(self.damage_amount)?;
        buffer.write_u8(self.unknown_18)?;
        buffer.write_u8(self.unknown_19)?;
        buffer.write_u8(self.points)?;
        buffer.write_string_u8_0padded(&self.move_string, 21, false)?;
        buffer.write_var_string(&self.enemy_string, true)
    }
}
