//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write TRN (tournament) files.
//!
//! A tournament is a roster of enemy pilots plus the presentation data of
//! the tournament itself: per-locale logos, titles and descriptions, a
//! palette slice, and the victory texts shown when the player beats each
//! enemy.
//!
//! The layout on disk is a 42-byte header, padding up to offset 300 we keep
//! verbatim, a table of absolute offsets (one per pilot, plus one for the
//! locale block), the pilot records, the locale block, and the victory
//! texts at the offset the header points to. All offsets are derived data
//! and get recomputed on write.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use std::io::SeekFrom;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable, NativeFile};
use crate::files::palette::Palette;
use crate::files::pilot::Pilot;
use crate::files::sprite::Sprite;
use crate::utils::check_size_mismatch;

/// Extension used by tournament files.
pub const EXTENSION: &str = ".TRN";

/// Maximum number of enemies of a tournament.
pub const MAX_ENEMIES: usize = 256;

/// Number of locales every tournament carries texts for.
pub const LOCALE_COUNT: usize = 10;

/// Number of victory text slots per locale: one per playable pilot.
pub const VICTORY_PILOT_COUNT: usize = 11;

/// Number of victory text pages per pilot.
pub const VICTORY_PAGE_COUNT: usize = 10;

/// Offset where the enemy offset table starts.
const TABLE_OFFSET: usize = 300;

/// Size of the fixed header before the padding.
const HEADER_SIZE: usize = 42;

/// Size of the padding between the header and the offset table.
const HEADER_PAD_SIZE: usize = TABLE_OFFSET - HEADER_SIZE;

/// Range of palette entries a tournament provides.
const PALETTE_START: usize = 128;
const PALETTE_COUNT: usize = 40;

#[cfg(test)] mod tournament_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents an entire TRN file decoded in memory.
#[derive(PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Tournament {
    unknown_b: u16,

    /// Name of the BK file with the tournament's menu background.
    bk_name: String,

    /// Multiplier applied to the winnings of each match.
    winnings_multiplier: f32,
    unknown_a: u32,

    /// Fee charged for entering the tournament.
    registration_fee: u32,

    /// HAR value the tournament assumes the player starts with.
    assumed_initial_value: u32,
    tournament_id: u32,

    /// Header padding, kept verbatim.
    #[serde(with = "crate::utils::serde_base64")]
    header_pad: Vec<u8>,

    /// The enemy roster, in challenge order.
    pilots: Vec<Pilot>,

    /// The tournament logo, one sprite per locale.
    locale_logos: Vec<Sprite>,

    /// The palette slice the tournament loads over entries 128-167.
    palette: Palette,

    /// Name of the PIC file with the enemy photos.
    pic_filename: String,

    /// Name of the tournament, per locale.
    locale_titles: Vec<String>,

    /// Description of the tournament, per locale.
    locale_descriptions: Vec<String>,

    /// Victory text pages, indexed by locale, then pilot, then page.
    locale_end_texts: Vec<Vec<Vec<String>>>,
}

//---------------------------------------------------------------------------//
//                        Implementation of Tournament
//---------------------------------------------------------------------------//

impl Default for Tournament {
    fn default() -> Self {
        Self {
            unknown_b: 0,
            bk_name: String::new(),
            winnings_multiplier: 0.0,
            unknown_a: 0,
            registration_fee: 0,
            assumed_initial_value: 0,
            tournament_id: 0,
            header_pad: vec![0; HEADER_PAD_SIZE],
            pilots: vec![],
            locale_logos: vec![Sprite::default(); LOCALE_COUNT],
            palette: Palette::default(),
            pic_filename: String::new(),
            locale_titles: vec![String::new(); LOCALE_COUNT],
            locale_descriptions: vec![String::new(); LOCALE_COUNT],
            locale_end_texts: vec![vec![vec![String::new(); VICTORY_PAGE_COUNT]; VICTORY_PILOT_COUNT]; LOCALE_COUNT],
        }
    }
}

impl Decodeable for Tournament {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let enemy_count = data.read_u16()? as usize;
        if enemy_count > MAX_ENEMIES {
            return Err(SDLibError::InvalidFieldRange {
                field: "enemy count",
                value: enemy_count as i64,
                min: 0,
                max: MAX_ENEMIES as i64,
            })
        }

        let unknown_b = data.read_u16()?;
        let victory_text_offset = data.read_u32()? as u64;

        let mut tournament = Self {
            unknown_b,
            bk_name: data.read_string_u8_0padded(14)?,
            winnings_multiplier: data.read_f32()?,
            unknown_a: data.read_u32()?,
            registration_fee: data.read_u32()?,
            assumed_initial_value: data.read_u32()?,
            tournament_id: data.read_u32()?,
            header_pad: data.read_slice(HEADER_PAD_SIZE, false)?,
            pilots: vec![],
            locale_logos: vec![],
            locale_titles: vec![],
            locale_descriptions: vec![],
            locale_end_texts: vec![],
            ..Default::default()
        };

        let offsets = (0..=enemy_count)
            .map(|_| data.read_u32().map(u64::from))
            .collect::<Result<Vec<_>>>()?;

        // Records get sought by their recorded offsets, so files with slack
        // between them decode fine.
        for offset in offsets.iter().take(enemy_count) {
            data.seek(SeekFrom::Start(*offset))?;
            tournament.pilots.push(Pilot::decode(data)?);
        }

        // The last offset is the locale block, not a pilot.
        data.seek(SeekFrom::Start(offsets[enemy_count]))?;

        for _ in 0..LOCALE_COUNT {
            tournament.locale_logos.push(Sprite::decode(data)?);
        }

        tournament.palette.read_range(data, PALETTE_START, PALETTE_COUNT)?;
        tournament.pic_filename = data.read_var_string(true)?;

        for _ in 0..LOCALE_COUNT {
            tournament.locale_titles.push(data.read_var_string(true)?);
            tournament.locale_descriptions.push(data.read_var_string(true)?);
        }

        data.seek(SeekFrom::Start(victory_text_offset))?;

        for _ in 0..LOCALE_COUNT {
            let mut locale = Vec::with_capacity(VICTORY_PILOT_COUNT);
            for _ in 0..VICTORY_PILOT_COUNT {
                let mut pages = Vec::with_capacity(VICTORY_PAGE_COUNT);
                for _ in 0..VICTORY_PAGE_COUNT {
                    pages.push(data.read_var_string(true)?);
                }
                locale.push(pages);
            }
            tournament.locale_end_texts.push(locale);
        }

        // Trigger an error if there's left data on the source.
        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        Ok(tournament)
    }
}

impl Encodeable for Tournament {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        // Pilots and the locale block are staged first so the offsets and
        // the victory text offset can be computed up front.
        let mut records = Vec::with_capacity(self.pilots.len());
        for pilot in &mut self.pilots {
            let mut record = vec![];
            pilot.encode(&mut record)?;
            records.push(record);
        }

        let mut locale_block: Vec<u8> = vec![];
        for logo in &mut self.locale_logos {
            logo.encode(&mut locale_block)?;
        }

        self.palette.write_range(&mut locale_block, PALETTE_START, PALETTE_COUNT)?;
        locale_block.write_var_string(&self.pic_filename, true)?;

        for (title, description) in self.locale_titles.iter().zip(&self.locale_descriptions) {
            locale_block.write_var_string(title, true)?;
            locale_block.write_var_string(description, true)?;
        }

        let table_size = 4 * (records.len() + 1);
        let pilots_size = records.iter().map(|record| record.len()).sum::<usize>();
        let victory_text_offset = TABLE_OFFSET + table_size + pilots_size + locale_block.len();

        buffer.write_u16(self.pilots.len() as u16)?;
        buffer.write_u16(self.unknown_b)?;
        buffer.write_u32(victory_text_offset as u32)?;
        buffer.write_string_u8_0padded(&self.bk_name, 14, false)?;
        buffer.write_f32(self.winnings_multiplier)?;
        buffer.write_u32(self.unknown_a)?;
        buffer.write_u32(self.registration_fee)?;
        buffer.write_u32(self.assumed_initial_value)?;
        buffer.write_u32(self.tournament_id)?;
        buffer.write_all(&self.header_pad)?;

        let mut position = (TABLE_OFFSET + table_size) as u32;
        for record in &records {
            buffer.write_u32(position)?;
            position += record.len() as u32;
        }

        // The extra offset points at the locale block.
        buffer.write_u32(position)?;

        for record in &records {
            buffer.write_all(record)?;
        }

        buffer.write_all(&locale_block)?;

        for locale in &self.locale_end_texts {
            for pages in locale {
                for page in pages {
                    buffer.write_var_string(page, true)?;
                }
            }
        }

        Ok(())
    }
}

impl NativeFile for Tournament {

    fn validate(&self) -> Result<()> {
        if self.pilots.len() > MAX_ENEMIES {
            return Err(SDLibError::InvalidFieldRange {
                field: "enemy count",
                value: self.pilots.len() as i64,
                min: 0,
                max: MAX_ENEMIES as i64,
            })
        }

        let lengths = [
            ("tournament header padding", self.header_pad.len(), HEADER_PAD_SIZE),
            ("locale logos", self.locale_logos.len(), LOCALE_COUNT),
            ("locale titles", self.locale_titles.len(), LOCALE_COUNT),
            ("locale descriptions", self.locale_descriptions.len(), LOCALE_COUNT),
            ("victory texts", self.locale_end_texts.len(), LOCALE_COUNT),
        ];

        for (field, found, expected) in lengths {
            if found != expected {
                return Err(SDLibError::InvalidFieldLength {
                    field,
                    expected,
                    found,
                })
            }
        }

        for locale in &self.locale_end_texts {
            if locale.len() != VICTORY_PILOT_COUNT {
                return Err(SDLibError::InvalidFieldLength {
                    field: "victory text pilots",
                    expected: VICTORY_PILOT_COUNT,
                    found: locale.len(),
                })
            }

            for pages in locale {
                if pages.len() != VICTORY_PAGE_COUNT {
                    return Err(SDLibError::InvalidFieldLength {
                        field: "victory text pages",
                        expected: VICTORY_PAGE_COUNT,
                        found: pages.len(),
                    })
                }
            }
        }

        for pilot in &self.pilots {
            pilot.validate()?;
        }

        Ok(())
    }
}
