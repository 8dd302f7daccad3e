//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This crate provides utilities to read/write One Must Fall 2097 game files.
//!
//! Supported formats are:
//! - `AF`: fighter files, with the move list of each HAR.
//! - `BK`: stage files, with backgrounds, stage animations and palettes.
//! - `TRN`: tournament files, with enemy rosters and locale texts.
//! - `PIC`: pilot photo collections.
//! - `CHR`-style pilot blocks, as embedded in tournaments and save files.
//! - `SOUNDS.DAT`: the PCM sound archive.
//! - Language files (`ENGLISH.DAT`, `GERMAN.DAT`...), with scrambled texts.
//! - `ALTPALS.DAT`: the alternate palette pack.
//!
//! All formats decode into plain structs that can be edited, re-encoded
//! byte-identical to their source, or round-tripped through JSON. Animation
//! strings (the tag scripts driving every animation) get their own parser
//! under [`script`].

pub mod binary;
pub mod error;
pub mod files;
pub mod script;
pub mod utils;
