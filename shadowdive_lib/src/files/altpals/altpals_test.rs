//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the `ALTPALS.DAT` format.

use std::io::Cursor;

use super::*;

#[test]
fn test_altpals_round_trip() {
    let mut before = Vec::with_capacity(PALETTE_COUNT * 768);
    for index in 0..PALETTE_COUNT * 768 {
        before.push((index % 64) as u8);
    }

    let mut altpals = AltPalettes::decode(&mut Cursor::new(&before)).unwrap();
    assert_eq!(altpals.palettes().len(), PALETTE_COUNT);

    let mut after = vec![];
    altpals.encode(&mut after).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_altpals_trailing_data_is_an_error() {
    let before = vec![0u8; PALETTE_COUNT * 768 + 1];
    assert!(AltPalettes::decode(&mut Cursor::new(&before)).is_err());
}

#[test]
fn test_altpals_validation() {
    let altpals = AltPalettes::default();
    assert!(altpals.validate().is_err());
}
