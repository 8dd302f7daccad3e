//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write the SOUNDS.DAT archive.
//!
//! The archive is a flat list of unsigned 8-bit PCM samples. The header is a
//! leading zero dword, the header size in bytes, and one dword per sound
//! holding the absolute offset where the *next* sound starts; the first
//! sound always starts right at the end of the header, and the last offset
//! is the file size. The offsets are derived data and get recomputed on
//! write.
//!
//! Each sample stores its playback rate as the VGA timer divisor the game
//! feeds the sound card, `256 - (1000000 / hz)`. Use
//! [`Sound::real_frequency`] for the rate in hertz.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable, NativeFile};
use crate::utils::check_size_mismatch;

/// Name of the archive on disk.
pub const FILE_NAME: &str = "SOUNDS.DAT";

/// Dwords the header holds on top of the per-sound offsets.
const HEADER_EXTRA_DWORDS: u32 = 2;

#[cfg(test)] mod sounds_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents an entire SOUNDS.DAT archive decoded in memory.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct SoundArchive {

    /// The sounds of the archive, empty slots included.
    sounds: Vec<Sound>,
}

/// This represents a single sound of the archive. Empty slots decode as an empty sound.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Sound {

    /// Timer divisor for the playback rate.
    frequency: u8,

    /// The raw unsigned 8-bit PCM sample.
    #[serde(with = "crate::utils::serde_base64")]
    data: Vec<u8>,
}

//---------------------------------------------------------------------------//
//                       Implementation of SoundArchive
//---------------------------------------------------------------------------//

impl Decodeable for SoundArchive {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let leader = data.read_u32()?;
        if leader != 0 {
            return Err(SDLibError::DecodingSoundHeaderError(format!("Leading dword is {leader}, expected 0.")));
        }

        let header_size = data.read_u32()?;
        if header_size % 4 != 0 || header_size / 4 < HEADER_EXTRA_DWORDS {
            return Err(SDLibError::DecodingSoundHeaderError(format!("Invalid header size {header_size}.")));
        }

        let sound_count = (header_size / 4 - HEADER_EXTRA_DWORDS) as usize;

        // The first sound starts right after the header; each table entry is
        // where the sound after it starts.
        let mut offsets = Vec::with_capacity(sound_count + 1);
        offsets.push(header_size as u64);
        for _ in 0..sound_count {
            offsets.push(data.read_u32()? as u64);
        }

        let mut archive = Self::default();
        for offset in offsets.iter().take(sound_count) {
            let curr_pos = data.stream_position()?;
            if curr_pos != *offset {
                return Err(SDLibError::DecodingSoundHeaderError(format!("Sound expected at offset {offset}, found at {curr_pos}.")));
            }

            archive.sounds.push(Sound::decode(data)?);
        }

        // Trigger an error if there's left data on the source.
        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        Ok(archive)
    }
}

impl Encodeable for SoundArchive {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        let header_size = (self.sounds.len() as u32 + HEADER_EXTRA_DWORDS) * 4;
        buffer.write_u32(0)?;
        buffer.write_u32(header_size)?;

        let mut position = header_size;
        for sound in &self.sounds {
            position += sound.encoded_len() as u32;
            buffer.write_u32(position)?;
        }

        for sound in &mut self.sounds {
            sound.encode(buffer)?;
        }

        Ok(())
    }
}

impl NativeFile for SoundArchive {

    fn validate(&self) -> Result<()> {
        for sound in &self.sounds {
            sound.validate()?;
        }

        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of Sound
//---------------------------------------------------------------------------//

impl Sound {

    /// Playback rate of the sample, in hertz.
    pub fn real_frequency(&self) -> u32 {
        1_000_000 / (256 - self.frequency as u32)
    }

    /// This function sets the playback rate from a value in hertz.
    pub fn set_real_frequency(&mut self, hz: u32) -> Result<()> {
        let divisor = 256i64 - (1_000_000i64 / hz.max(1) as i64);
        if !(0..256).contains(&divisor) {
            return Err(SDLibError::InvalidFieldRange {
                field: "sound frequency",
                value: hz as i64,
                min: 3_907,
                max: 1_000_000,
            })
        }

        self.frequency = divisor as u8;
        Ok(())
    }

    /// Bytes the sound takes on disk.
    fn encoded_len(&self) -> usize {
        if self.data.is_empty() {
            2
        } else {
            3 + self.data.len()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.data.len() > u16::MAX as usize {
            return Err(SDLibError::InvalidFieldLength {
                field: "sound sample",
                expected: u16::MAX as usize,
                found: self.data.len(),
            })
        }

        // An empty slot is stored as a lone zero length, with no room for a
        // playback rate.
        if self.data.is_empty() && self.frequency != 0 {
            return Err(SDLibError::InvalidFieldRange {
                field: "sound frequency",
                value: self.frequency as i64,
                min: 0,
                max: 0,
            })
        }

        Ok(())
    }
}

impl Decodeable for Sound {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let mut sound = Self::default();

        let length = data.read_u16()?;
        if length > 0 {
            sound.frequency = data.read_u8()?;
            sound.data = data.read_slice(length as usize, false)?;
        }

        Ok(sound)
    }
}

impl Encodeable for Sound {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        if self.data.is_empty() {
            buffer.write_u16(0)?;
        } else {
            buffer.write_u16(self.data.len() as u16)?;
            buffer.write_u8(self.frequency)?;
            buffer.write_all(&self.data)?;
        }

        Ok(())
    }
}
