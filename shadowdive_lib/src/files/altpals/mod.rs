//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write `ALTPALS.DAT` files.
//!
//! The file is nothing more than 11 full palettes back to back, used by the
//! game for alternate HAR color schemes.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable, NativeFile};
use crate::files::palette::Palette;
use crate::utils::check_size_mismatch;

/// Name of the only file of this format.
pub const FILE_NAME: &str = "ALTPALS.DAT";

/// Number of palettes on the file.
pub const PALETTE_COUNT: usize = 11;

#[cfg(test)] mod altpals_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents an entire `ALTPALS.DAT` file decoded in memory.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct AltPalettes {
    palettes: Vec<Palette>,
}

//---------------------------------------------------------------------------//
//                       Implementation of AltPalettes
//---------------------------------------------------------------------------//

impl Decodeable for AltPalettes {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let mut palettes = Vec::with_capacity(PALETTE_COUNT);
        for _ in 0..PALETTE_COUNT {
            palettes.push(Palette::decode(data)?);
        }

        // Trigger an error if there's left data on the source.
        check_size_mismatch(data.stream_position()? as usize, data.len()? as usize)?;

        Ok(Self {
            palettes,
        })
    }
}

impl Encodeable for AltPalettes {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;

        for palette in &mut self.palettes {
            palette.encode(buffer)?;
        }

        Ok(())
    }
}

impl NativeFile for AltPalettes {

    fn validate(&self) -> Result<()> {
        if self.palettes.len() != PALETTE_COUNT {
            return Err(SDLibError::InvalidFieldLength {
                field: "alternate palettes",
                expected: PALETTE_COUNT,
                found: self.palettes.len(),
            })
        }

        Ok(())
    }
}
