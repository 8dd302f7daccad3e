//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the palette types.

use std::io::Cursor;

use super::*;

#[test]
fn test_channel_widen_narrow_round_trip() {

    // Every 6-bit DAC value has to survive the widen/narrow pair untouched.
    for value in 0..64u8 {
        assert_eq!(Color::narrow(Color::widen(value)), value);
    }

    assert_eq!(Color::widen(0), 0);
    assert_eq!(Color::widen(63), 255);
}

#[test]
fn test_palette_round_trip() {
    let mut before = Vec::with_capacity(PALETTE_SIZE * 3);
    for index in 0..PALETTE_SIZE * 3 {
        before.push((index % 64) as u8);
    }

    let mut palette = Palette::decode(&mut Cursor::new(&before)).unwrap();

    let mut after = vec![];
    palette.encode(&mut after).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_palette_read_range_leaves_rest_untouched() {
    let data = vec![63u8; 6];
    let mut palette = Palette::default();
    palette.read_range(&mut Cursor::new(&data), 10, 2).unwrap();

    assert_eq!(palette.colors()[10], Color::new(255, 255, 255));
    assert_eq!(palette.colors()[11], Color::new(255, 255, 255));
    assert_eq!(palette.colors()[9], Color::default());
    assert_eq!(palette.colors()[12], Color::default());
}

#[test]
fn test_palette_read_range_out_of_bounds() {
    let data = vec![0u8; 768];
    let mut palette = Palette::default();

    assert!(palette.read_range(&mut Cursor::new(&data), 250, 10).is_err());
}

#[test]
fn test_palette_remap() {
    let mut palette = Palette::default();
    palette.colors_mut()[1] = Color::new(255, 0, 0);

    // A table that maps every entry to index 1.
    let table = vec![1u8; PALETTE_SIZE];
    let remapped = palette.remap(&table);

    assert!(remapped.colors().iter().all(|color| *color == Color::new(255, 0, 0)));
}

#[test]
fn test_palette_mapping_round_trip() {
    let mut before = Vec::with_capacity(PALETTE_SIZE * 3 + REMAP_COUNT * PALETTE_SIZE);
    for index in 0..PALETTE_SIZE * 3 {
        before.push((index % 64) as u8);
    }
    for table in 0..REMAP_COUNT {
        for index in 0..PALETTE_SIZE {
            before.push(((table + index) % 256) as u8);
        }
    }

    let mut mapping = PaletteMapping::decode(&mut Cursor::new(&before)).unwrap();

    let mut after = vec![];
    mapping.encode(&mut after).unwrap();

    assert_eq!(before, after);
}
