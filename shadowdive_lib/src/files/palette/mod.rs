//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to read/write the VGA palettes used across all formats.
//!
//! On disk a palette is 256 RGB entries with 6 bits per channel (the VGA DAC
//! range, 0-63). In memory channels are widened to the full 8-bit range, so
//! the colors can be used directly. Widening is `(v * 255) / 63` with integer
//! math; narrowing back is a plain `v >> 2`, which reproduces every 6-bit
//! value exactly.
//!
//! Stage files pair each palette with 19 remapping tables of 256 indices,
//! used for lighting and damage effects. Those are kept as raw tables.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{Result, SDLibError};
use crate::files::{Decodeable, Encodeable};

/// Number of entries on a full palette.
pub const PALETTE_SIZE: usize = 256;

/// Number of remapping tables paired with a stage palette.
pub const REMAP_COUNT: usize = 19;

#[cfg(test)] mod palette_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents a single RGB color, with 8 bits per channel.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Getters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", set = "pub")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

/// This represents a full 256-entry palette decoded in memory.
#[derive(PartialEq, Eq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Palette {
    colors: Vec<Color>,
}

/// This represents a stage palette: a full palette plus its remapping tables.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct PaletteMapping {

    /// The colors of the palette.
    colors: Palette,

    /// The 19 remapping tables, each one 256 indices into the palette.
    remaps: Vec<Vec<u8>>,
}

//---------------------------------------------------------------------------//
//                           Implementation of Color
//---------------------------------------------------------------------------//

impl Color {

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// This function widens a 6-bit VGA channel value to 8 bits.
    ///
    /// Out-of-range input (the two top bits are unused by the DAC) is masked off.
    pub fn widen(value: u8) -> u8 {
        (((value & 0x3F) as u16 * 255) / 63) as u8
    }

    /// This function narrows an 8-bit channel value back to the 6-bit VGA range.
    pub fn narrow(value: u8) -> u8 {
        value >> 2
    }
}

impl Decodeable for Color {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        Ok(Self {
            r: Self::widen(data.read_u8()?),
            g: Self::widen(data.read_u8()?),
            b: Self::widen(data.read_u8()?),
        })
    }
}

impl Encodeable for Color {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        buffer.write_u8(Self::narrow(self.r))?;
        buffer.write_u8(Self::narrow(self.g))?;
        buffer.write_u8(Self::narrow(self.b))
    }
}

//---------------------------------------------------------------------------//
//                          Implementation of Palette
//---------------------------------------------------------------------------//

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![Color::default(); PALETTE_SIZE],
        }
    }
}

impl Palette {

    /// This function reads `count` entries starting at `start` from the provided source.
    ///
    /// Entries outside the range keep whatever they held before.
    pub fn read_range<R: ReadBytes>(&mut self, data: &mut R, start: usize, count: usize) -> Result<()> {
        self.check_range(start, count)?;

        for index in start..start + count {
            self.colors[index] = Color::decode(data)?;
        }

        Ok(())
    }

    /// This function writes `count` entries starting at `start` to the provided buffer.
    pub fn write_range<W: WriteBytes>(&mut self, buffer: &mut W, start: usize, count: usize) -> Result<()> {
        self.check_range(start, count)?;

        for index in start..start + count {
            self.colors[index].encode(buffer)?;
        }

        Ok(())
    }

    /// This function returns a new palette with every entry replaced through the provided remapping table.
    pub fn remap(&self, table: &[u8]) -> Self {
        let colors = table.iter()
            .map(|index| self.colors[*index as usize])
            .collect();

        Self {
            colors,
        }
    }

    fn check_range(&self, start: usize, count: usize) -> Result<()> {
        if start + count > self.colors.len() {
            return Err(SDLibError::InvalidFieldRange {
                field: "palette range",
                value: (start + count) as i64,
                min: 0,
                max: self.colors.len() as i64,
            })
        }

        Ok(())
    }
}

impl Decodeable for Palette {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let mut palette = Self::default();
        palette.read_range(data, 0, PALETTE_SIZE)?;

        Ok(palette)
    }
}

impl Encodeable for Palette {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.write_range(buffer, 0, PALETTE_SIZE)
    }
}

//---------------------------------------------------------------------------//
//                      Implementation of PaletteMapping
//---------------------------------------------------------------------------//

impl PaletteMapping {

    /// This function checks that the remapping tables have the shape the format requires.
    pub fn validate(&self) -> Result<()> {
        if self.remaps.len() != REMAP_COUNT {
            return Err(SDLibError::InvalidFieldLength {
                field: "palette remaps",
                expected: REMAP_COUNT,
                found: self.remaps.len(),
            })
        }

        for remap in &self.remaps {
            if remap.len() != PALETTE_SIZE {
                return Err(SDLibError::InvalidFieldLength {
                    field: "palette remap table",
                    expected: PALETTE_SIZE,
                    found: remap.len(),
                })
            }
        }

        Ok(())
    }
}

impl Decodeable for PaletteMapping {

    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let colors = Palette::decode(data)?;

        let mut remaps = Vec::with_capacity(REMAP_COUNT);
        for _ in 0..REMAP_COUNT {
            remaps.push(data.read_slice(PALETTE_SIZE, false)?);
        }

        Ok(Self {
            colors,
            remaps,
        })
    }
}

impl Encodeable for PaletteMapping {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()> {
        self.validate()?;
        self.colors.encode(buffer)?;

        for remap in &self.remaps {
            buffer.write_all(remap)?;
        }

        Ok(())
    }
}
