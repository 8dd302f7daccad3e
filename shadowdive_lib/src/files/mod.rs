//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the code to decode/encode the different file formats
//! of the game into usable structs, and the common traits they implement.
//!
//! Each format lives in its own submodule. The decoded structs are plain
//! data: edit them through their getters/setters, then encode them back to
//! binary or dump them to JSON.

use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::Result;

pub mod af;
pub mod altpals;
pub mod animation;
pub mod bk;
pub mod language;
pub mod palette;
pub mod pic;
pub mod pilot;
pub mod sounds;
pub mod sprite;
pub mod tournament;

//---------------------------------------------------------------------------//
//                              Enums & Structs
//---------------------------------------------------------------------------//

/// This enum represents the kind of file a path points to, based on its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    Fighter,
    Stage,
    Tournament,
    Photos,
    Sounds,
    Language,
    AltPalettes,
    Unknown,
}

//---------------------------------------------------------------------------//
//                           Traits & Implementations
//---------------------------------------------------------------------------//

/// A generic trait to implement in anything we want to decode into a struct.
pub trait Decodeable: Send + Sync + Sized {

    /// This method provides a generic and expandable way to decode anything into the implementor's structure.
    fn decode<R: ReadBytes>(data: &mut R) -> Result<Self>;
}

/// A generic trait to implement in anything we want to encode back into binary data.
pub trait Encodeable: Send + Sync {

    /// This method provides a generic and expandable way to encode any implementor's structure into binary data.
    fn encode<W: WriteBytes>(&mut self, buffer: &mut W) -> Result<()>;
}

/// Trait for the top-level file models, providing the disk/JSON entry points.
pub trait NativeFile: Decodeable + Encodeable + Serialize + DeserializeOwned {

    /// This method checks that the struct holds values the format can actually store.
    ///
    /// It's called before encoding and after importing from JSON, so broken
    /// data is caught before it hits the disk.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// This method reads and decodes the file at the provided path.
    fn load_native(path: &Path) -> Result<Self> {
        info!("Loading file: {}.", path.display());

        let mut file = BufReader::new(File::open(path)?);
        Self::decode(&mut file)
    }

    /// This method encodes and writes the file to the provided path.
    fn save_native(&mut self, path: &Path) -> Result<()> {
        info!("Saving file: {}.", path.display());
        self.validate()?;

        let mut file = BufWriter::new(File::create(path)?);
        self.encode(&mut file)
    }

    /// This method builds the struct from its JSON projection, validating it.
    fn from_json(data: &str) -> Result<Self> {
        let decoded: Self = serde_json::from_str(data)?;
        decoded.validate()?;

        Ok(decoded)
    }

    /// This method dumps the struct to its JSON projection.
    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self).map_err(From::from)
    }

    /// This method reads the struct from a JSON file at the provided path.
    fn load_json(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// This method dumps the struct to a JSON file at the provided path.
    fn save_json(&self, path: &Path) -> Result<()> {
        self.validate()?;

        std::fs::write(path, self.to_json()?).map_err(From::from)
    }
}

//---------------------------------------------------------------------------//
//                          Implementation of FileType
//---------------------------------------------------------------------------//

impl FileType {

    /// This function guesses the type of the file at the provided path from its name.
    ///
    /// The `.DAT` extension is shared by three formats, so the full name
    /// disambiguates: `SOUNDS.DAT` and `ALTPALS.DAT` are containers of their
    /// own, any other `.DAT` is a language file.
    pub fn from_path(path: &Path) -> Self {
        let name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_uppercase(),
            None => return Self::Unknown,
        };

        match name.as_str() {
            sounds::FILE_NAME => return Self::Sounds,
            altpals::FILE_NAME => return Self::AltPalettes,
            _ => {}
        }

        if name.ends_with(af::EXTENSION) {
            Self::Fighter
        } else if name.ends_with(bk::EXTENSION) {
            Self::Stage
        } else if name.ends_with(tournament::EXTENSION) {
            Self::Tournament
        } else if name.ends_with(pic::EXTENSION) {
            Self::Photos
        } else if name.ends_with(language::EXTENSION) {
            Self::Language
        } else {
            Self::Unknown
        }
    }
}
