//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write the pilot records used by tournaments and save files.
//!
//! A pilot record is a 428-byte block scrambled with a rolling XOR (the key
//! starts at the block length modulo 256, so 172, and grows by one per
//! byte), followed by 10 plaintext quote strings.
//!
//! The block is dense: fixed-width strings, a 48-color palette, and a pile
//! of bit-packed words holding the stats, the AI preferences and the
//! requirements the pilot imposes on a challenger. Every field the game
//! leaves undocumented, and every spare bit of the packed words, is kept on
//! the struct verbatim so re-encoding is byte-identical.

use bitflags::bitflags;
use getset::*;
use serde_derive::{Serialize, Deserialize};

use std::io::Write;

use crate::binary::{ReadBytes, WriteBytes, XorStream};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable, NativeFile};
use crate::files::palette::Palette;

/// Size of the scrambled block, quotes excluded.
pub const PILOT_BLOCK_LENGTH: usize = 428;

/// Initial XOR key of the scrambled block: its length modulo 256.
const XOR_KEY: u8 = (PILOT_BLOCK_LENGTH % 256) as u8;

/// Number of quote strings after the block.
pub const QUOTE_COUNT: usize = 10;

/// Number of colors of the embedded palette.
const PILOT_PALETTE_SIZE: usize = 48;


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

bitflags! {

    /// Boolean flags of a pilot. Unknown bits are kept as-is.
    #[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
    pub struct PilotFlags: u8 {
        const SECRET          = 0x02;
        const ONLY_FIGHT_ONCE = 0x08;
    }
}

/// This represents a pilot record decoded in memory.
#[derive(PartialEq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Pilot {
    unknown_a: u32,

    /// Name of the pilot. Up to 17 characters on disk.
    name: String,
    wins: u16,
    losses: u16,
    rank: u8,

    /// The HAR the pilot uses.
    har_id: u8,

    // Stats, packed in four words on disk. 5 or 7 bits each.
    arm_power: u8,
    leg_power: u8,
    arm_speed: u8,
    leg_speed: u8,
    armor: u8,
    stun_resistance: u8,
    agility: u8,
    power: u8,
    endurance: u8,
    unknown_stats_a: u8,
    unknown_stats_b: u8,
    unknown_stats_c: u8,
    unknown_stats_d: u8,
    unknown_stats_e: u8,

    offense: u16,
    defense: u16,
    money: u32,

    /// The three color slots of the pilot's HAR.
    color_1: u8,
    color_2: u8,
    color_3: u8,

    /// Name of the tournament the pilot belongs to.
    trn_name: String,
    trn_desc: String,
    trn_image: String,

    unk_f_c: f32,
    unk_f_d: f32,
    unk_block_a: Vec<u8>,

    pilot_id: u8,
    unknown_k: u8,

    /// Arena the pilot always fights on, when forced.
    force_arena: u16,

    /// AI difficulty, 0-3. The rest of its byte is kept in `difficulty_unknown`.
    difficulty: u8,
    difficulty_unknown: u8,

    unk_block_b: Vec<u8>,
    movement: u8,
    unk_block_c: Vec<u16>,

    /// The enhancement level bought for each HAR.
    enhancements: Vec<u8>,
    unknown_g: u8,

    #[serde(with = "flags_serde")]
    flags: PilotFlags,
    unknown_h: u8,

    // Requirements a challenger must meet, packed in five words on disk.
    req_rank: u8,
    req_max_rank: u8,
    req_fighter: u8,
    req_enemy: u8,
    req_difficulty: u8,
    req_vitality: u8,
    req_accuracy: u8,
    req_avg_damage: u8,
    req_scrap: bool,
    req_destroy: bool,
    unknown_req_a: u16,
    unknown_req_b: u8,
    unknown_req_c: u8,
    unknown_req_d: u8,

    // Attack preference weights, packed in three words on disk.
    att_normal: u8,
    att_hyper: u8,
    att_jump: u8,
    att_def: u8,
    att_sniper: u8,
    unknown_att_a: u8,
    unknown_att_b: u8,
    unknown_att_c: u8,
    unknown_att_d: u8,

    unk_block_d: Vec<u16>,

    // AI aggression/preference values.
    ap_throw: i16,
    ap_special: i16,
    ap_jump: i16,
    ap_high: i16,
    ap_low: i16,
    ap_middle: i16,
    pref_jump: i16,
    pref_fwd: i16,
    pref_back: i16,

    unknown_e: u32,
    learning: f32,
    forget: f32,
    unk_block_f: Vec<u8>,

    enemies_inc_unranked: u16,
    enemies_ex_unranked: u16,
    unk_d_a: u16,
    unk_d_b: u32,
    winnings: u32,
    total_value: u32,
    unk_f_a: f32,
    unk_f_b: f32,
    unk_block_g: Vec<u8>,

    /// The first 48 colors of the pilot's palette.
    palette: Palette,
    unk_block_i: u16,

    /// Index of the pilot's photo on the PIC file. 10 bits on disk.
    photo_id: u16,
    photo_unknown: u8,

    /// The quotes of the pilot, stored unscrambled after the block.
    quotes: Vec<String>,
}

//---------------------------------------------------------------------------//
//                          Implementation of Pilot
//---------------------------------------------------------------------------//

impl Decodeable for Pilot {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let mut pilot = Self::default();

        let start = data.stream_position()?;
        {
            let mut data = XorStream::new(&mut *data);
            data.set_key(Some(XOR_KEY));

            pilot.unknown_a = data.read_u32()?;
            pilot.name = data.read_string_u8_0padded(18)?;
            pilot.wins = data.read_u16()?;
            pilot.losses = data.read_u16()?;
            pilot.rank = data.read_u8()?;
            pilot.har_id = data.read_u8()?;

            let stats_a = data.read_u16()?;
            let stats_b = data.read_u16()?;
            let stats_c = data.read_u16()?;
            let stats_d = data.read_u8()?;
            pilot.arm_power = (stats_a & 0x1F) as u8;
            pilot.leg_power = ((stats_a >> 5) & 0x1F) as u8;
            pilot.arm_speed = ((stats_a >> 10) & 0x1F) as u8;
            pilot.unknown_stats_a = (stats_a >> 15) as u8;
            pilot.leg_speed = (stats_b & 0x1F) as u8;
            pilot.armor = ((stats_b >> 5) & 0x1F) as u8;
            pilot.stun_resistance = ((stats_b >> 10) & 0x1F) as u8;
            pilot.unknown_stats_b = (stats_b >> 15) as u8;
            pilot.agility = (stats_c & 0x7F) as u8;
            pilot.power = ((stats_c >> 7) & 0x7F) as u8;
            pilot.unknown_stats_c = (stats_c >> 14) as u8;
            pilot.endurance = stats_d & 0x7F;
            pilot.unknown_stats_d = stats_d >> 7;
            pilot.unknown_stats_e = data.read_u8()?;

            pilot.offense = data.read_u16()?;
            pilot.defense = data.read_u16()?;
            pilot.money = data.read_u32()?;
            pilot.color_1 = data.read_u8()?;
            pilot.color_2 = data.read_u8()?;
            pilot.color_3 = data.read_u8()?;

            pilot.trn_name = data.read_string_u8_0padded(13)?;
            pilot.trn_desc = data.read_string_u8_0padded(31)?;
            pilot.trn_image = data.read_string_u8_0padded(13)?;

            pilot.unk_f_c = data.read_f32()?;
            pilot.unk_f_d = data.read_f32()?;
            pilot.unk_block_a = data.read_slice(40, false)?;

            pilot.pilot_id = data.read_u8()?;
            pilot.unknown_k = data.read_u8()?;
            pilot.force_arena = data.read_u16()?;

            let difficulty = data.read_u8()?;
            pilot.difficulty = (difficulty >> 3) & 0x3;
            pilot.difficulty_unknown = difficulty & !0x18;

            pilot.unk_block_b = data.read_slice(2, false)?;
            pilot.movement = data.read_u8()?;
            pilot.unk_block_c = (0..3).map(|_| data.read_u16()).collect::<Result<_>>()?;
            pilot.enhancements = data.read_slice(11, false)?;
            pilot.unknown_g = data.read_u8()?;
            pilot.flags = PilotFlags::from_bits_retain(data.read_u8()?);
            pilot.unknown_h = data.read_u8()?;

            let req_a = data.read_u16()?;
            let req_b = data.read_u16()?;
            let req_c = data.read_u16()?;
            let req_d = data.read_u16()?;
            let req_e = data.read_u16()?;
            pilot.req_rank = (req_a & 0xFF) as u8;
            pilot.req_max_rank = (req_a >> 8) as u8;
            pilot.req_fighter = (req_b & 0x1F) as u8;
            pilot.unknown_req_a = req_b >> 5;
            pilot.req_enemy = (req_c & 0xFF) as u8;
            pilot.req_difficulty = ((req_c >> 8) & 0xF) as u8;
            pilot.unknown_req_b = (req_c >> 12) as u8;
            pilot.req_vitality = (req_d & 0x7F) as u8;
            pilot.req_accuracy = ((req_d >> 7) & 0x7F) as u8;
            pilot.unknown_req_c = (req_d >> 14) as u8;
            pilot.req_avg_damage = (req_e & 0x7F) as u8;
            pilot.req_scrap = (req_e & 0x80) != 0;
            pilot.req_destroy = (req_e & 0x100) != 0;
            pilot.unknown_req_d = (req_e >> 9) as u8;

            let att_a = data.read_u16()?;
            let att_b = data.read_u16()?;
            let att_c = data.read_u16()?;
            pilot.unknown_att_a = (att_a & 0xF) as u8;
            pilot.att_normal = ((att_a >> 4) & 0x7F) as u8;
            pilot.unknown_att_b = (att_a >> 11) as u8;
            pilot.att_hyper = (att_b & 0x7F) as u8;
            pilot.att_jump = ((att_b >> 7) & 0x7F) as u8;
            pilot.unknown_att_c = (att_b >> 14) as u8;
            pilot.att_def = (att_c & 0x7F) as u8;
            pilot.att_sniper = ((att_c >> 7) & 0x7F) as u8;
            pilot.unknown_att_d = (att_c >> 14) as u8;

            pilot.unk_block_d = (0..3).map(|_| data.read_u16()).collect::<Result<_>>()?;

            pilot.ap_throw = data.read_i16()?;
            pilot.ap_special = data.read_i16()?;
            pilot.ap_jump = data.read_i16()?;
            pilot.ap_high = data.read_i16()?;
            pilot.ap_low = data.read_i16()?;
            pilot.ap_middle = data.read_i16()?;
            pilot.pref_jump = data.read_i16()?;
            pilot.pref_fwd = data.read_i16()?;
            pilot.pref_back = data.read_i16()?;

            pilot.unknown_e = data.read_u32()?;
            pilot.learning = data.read_f32()?;
            pilot.forget = data.read_f32()?;
            pilot.unk_block_f = data.read_slice(14, false)?;

            pilot.enemies_inc_unranked = data.read_u16()?;
            pilot.enemies_ex_unranked = data.read_u16()?;
            pilot.unk_d_a = data.read_u16()?;
            pilot.unk_d_b = data.read_u32()?;
            pilot.winnings = data.read_u32()?;
            pilot.total_value = data.read_u32()?;
            pilot.unk_f_a = data.read_f32()?;
            pilot.unk_f_b = data.read_f32()?;
            pilot.unk_block_g = data.read_slice(8, false)?;

            pilot.palette.read_range(&mut data, 0, PILOT_PALETTE_SIZE)?;

            pilot.unk_block_i = data.read_u16()?;

            let photo = data.read_u16()?;
            pilot.photo_id = photo & 0x3FF;
            pilot.photo_unknown = (photo >> 10) as u8;
        }

        // The whole block must have been consumed for the key to be right.
        debug_assert_eq!(data.stream_position()? - start, PILOT_BLOCK_LENGTH as u64);

        for _ in 0..QUOTE_COUNT {
            pilot.quotes.push(data.read_var_string(true)?);
        }

        Ok(pilot)
    }
}

impl Encodeable for Pilot {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        {
            let mut buffer = XorStream::new(&mut *buffer);
            buffer.set_key(Some(XOR_KEY));

            buffer.write_u32(self.unknown_a)?;
            buffer.write_string_u8_0padded(&self.name, 18, false)?;
            buffer.write_u16(self.wins)?;
            buffer.write_u16(self.losses)?;
            buffer.write_u8(self.rank)?;
            buffer.write_u8(self.har_id)?;

            buffer.write_u16((self.arm_power as u16 & 0x1F)
                | ((self.leg_power as u16 & 0x1F) << 5)
                | ((self.arm_speed as u16 & 0x1F) << 10)
                | ((self.unknown_stats_a as u16) << 15))?;
            buffer.write_u16((self.leg_speed as u16 & 0x1F)
                | ((self.armor as u16 & 0x1F) << 5)
                | ((self.stun_resistance as u16 & 0x1F) << 10)
                | ((self.unknown_stats_b as u16) << 15))?;
            buffer.write_u16((self.agility as u16 & 0x7F)
                | ((self.power as u16 & 0x7F) << 7)
                | ((self.unknown_stats_c as u16) << 14))?;
            buffer.write_u8((self.endurance & 0x7F) | (self.unknown_stats_d << 7))?;
            buffer.write_u8(self.unknown_stats_e)?;

            buffer.write_u16(self.offense)?;
            buffer.write_u16(self.defense)?;
            buffer.write_u32(self.money)?;
            buffer.write_u8(self.color_1)?;
            buffer.write_u8(self.color_2)?;
            buffer.write_u8(self.color_3)?;

            buffer.write_string_u8_0padded(&self.trn_name, 13, false)?;
            buffer.write_string_u8_0padded(&self.trn_desc, 31, false)?;
            buffer.write_string_u8_0padded(&self.trn_image, 13, false)?;

            buffer.write_f32(self.unk_f_c)?;
            buffer.write_f32(self.unk_f_d)?;
            buffer.write_all(&self.unk_block_a)?;

            buffer.write_u8(self.pilot_id)?;
            buffer.write_u8(self.unknown_k)?;
            buffer.write_u16(self.force_arena)?;
            buffer.write_u8((self.difficulty_unknown & !0x18) | ((self.difficulty & 0x3) << 3))?;

            buffer.write_all(&self.unk_block_b)?;
            buffer.write_u8(self.movement)?;
            for value in &self.unk_block_c {
                buffer.write_u16(*value)?;
            }
            buffer.write_all(&self.enhancements)?;
            buffer.write_u8(self.unknown_g)?;
            buffer.write_u8(self.flags.bits())?;
            buffer.write_u8(self.unknown_h)?;

            buffer.write_u16((self.req_rank as u16) | ((self.req_max_rank as u16) << 8))?;
            buffer.write_u16((self.req_fighter as u16 & 0x1F) | (self.unknown_req_a << 5))?;
            buffer.write_u16((self.req_enemy as u16)
                | ((self.req_difficulty as u16 & 0xF) << 8)
                | ((self.unknown_req_b as u16) << 12))?;
            buffer.write_u16((self.req_vitality as u16 & 0x7F)
                | ((self.req_accuracy as u16 & 0x7F) << 7)
                | ((self.unknown_req_c as u16) << 14))?;
            buffer.write_u16((self.req_avg_damage as u16 & 0x7F)
                | ((self.req_scrap as u16) << 7)
                | ((self.req_destroy as u16) << 8)
                | ((self.unknown_req_d as u16) << 9))?;

            buffer.write_u16((self.unknown_att_a as u16 & 0xF)
                | ((self.att_normal as u16 & 0x7F) << 4)
                | ((self.unknown_att_b as u16) << 11))?;
            buffer.write_u16((self.att_hyper as u16 & 0x7F)
                | ((self.att_jump as u16 & 0x7F) << 7)
                | ((self.unknown_att_c as u16) << 14))?;
            buffer.write_u16((self.att_def as u16 & 0x7F)
                | ((self.att_sniper as u16 & 0x7F) << 7)
                | ((self.unknown_att_d as u16) << 14))?;

            for value in &self.unk_block_d {
                buffer.write_u16(*value)?;
            }

            buffer.write_i16(self.ap_throw)?;
            buffer.write_i16(self.ap_special)?;
            buffer.write_i16(self.ap_jump)?;
            buffer.write_i16(self.ap_high)?;
            buffer.write_i16(self.ap_low)?;
            buffer.write_i16(self.ap_middle)?;
            buffer.write_i16(self.pref_jump)?;
            buffer.write_i16(self.pref_fwd)?;
            buffer.write_i16(self.pref_back)?;

            buffer.write_u32(self.unknown_e)?;
            buffer.write_f32(self.learning)?;
            buffer.write_f32(self.forget)?;
            buffer.write_all(&self.unk_block_f)?;

            buffer.write_u16(self.enemies_inc_unranked)?;
            buffer.write_u16(self.enemies_ex_unranked)?;
            buffer.write_u16(self.unk_d_a)?;
            buffer.write_u32(self.unk_d_b)?;
            buffer.write_u32(self.winnings)?;
            buffer.write_u32(self.total_value)?;
            buffer.write_f32(self.unk_f_a)?;
            buffer.write_f32(self.unk_f_b)?;
            buffer.write_all(&self.unk_block_g)?;

            self.palette.write_range(&mut buffer, 0, PILOT_PALETTE_SIZE)?;

            buffer.write_u16(self.unk_block_i)?;
            buffer.write_u16((self.photo_id & 0x3FF) | ((self.photo_unknown as u16) << 10))?;
        }

        for quote in &self.quotes {
            buffer.write_var_string(quote, true)?;
        }

        Ok(())
    }
}

impl NativeFile for Pilot {

    fn validate(&self) -> Result<()> {
        check_width("arm power", self.arm_power as u16, 5)?;
        check_width("leg power", self.leg_power as u16, 5)?;
        check_width("arm speed", self.arm_speed as u16, 5)?;
        check_width("leg speed", self.leg_speed as u16, 5)?;
        check_width("armor", self.armor as u16, 5)?;
        check_width("stun resistance", self.stun_resistance as u16, 5)?;
        check_width("agility", self.agility as u16, 7)?;
        check_width("power", self.power as u16, 7)?;
        check_width("endurance", self.endurance as u16, 7)?;
        check_width("difficulty", self.difficulty as u16, 2)?;
        check_width("photo id", self.photo_id, 10)?;
        check_width("attack preference", self.att_normal as u16, 7)?;
        check_width("attack preference", self.att_hyper as u16, 7)?;
        check_width("attack preference", self.att_jump as u16, 7)?;
        check_width("attack preference", self.att_def as u16, 7)?;
        check_width("attack preference", self.att_sniper as u16, 7)?;
        check_width("fighter requirement", self.req_fighter as u16, 5)?;
        check_width("difficulty requirement", self.req_difficulty as u16, 4)?;
        check_width("vitality requirement", self.req_vitality as u16, 7)?;
        check_width("accuracy requirement", self.req_accuracy as u16, 7)?;
        check_width("damage requirement", self.req_avg_damage as u16, 7)?;

        if self.quotes.len() != QUOTE_COUNT {
            return Err(SDLibError::InvalidFieldLength {
                field: "pilot quotes",
                expected: QUOTE_COUNT,
                found: self.quotes.len(),
            })
        }

        let block_lengths = [
            ("pilot unknown block a", self.unk_block_a.len(), 40),
            ("pilot unknown block b", self.unk_block_b.len(), 2),
            ("pilot unknown block c", self.unk_block_c.len(), 3),
            ("pilot enhancements", self.enhancements.len(), 11),
            ("pilot unknown block d", self.unk_block_d.len(), 3),
            ("pilot unknown block f", self.unk_block_f.len(), 14),
            ("pilot unknown block g", self.unk_block_g.len(), 8),
        ];

        for (field, found, expected) in block_lengths {
            if found != expected {
                return Err(SDLibError::InvalidFieldLength {
                    field,
                    expected,
                    found,
                })
            }
        }

        Ok(())
    }
}

/// Checks a packed field against the width of its slot on disk.
fn check_width(field: &'static str, value: u16, bits: u32) -> Result<()> {
    let max = (1u16 << bits) - 1;
    if value > max {
        return Err(SDLibError::InvalidFieldRange {
            field,
            value: value as i64,
            min: 0,
            max: max as i64,
        })
    }

    Ok(())
}

/// Serde adapter for [`PilotFlags`], stored as its raw bits.
mod flags_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PilotFlags;

    pub fn serialize<S: Serializer>(flags: &PilotFlags, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(flags.bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PilotFlags, D::Error> {
        Ok(PilotFlags::from_bits_retain(u8::deserialize(deserializer)?))
    }
}
