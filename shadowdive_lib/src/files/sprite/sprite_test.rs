//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the sprite codec.

use std::io::{Cursor, Write};

use crate::binary::WriteBytes;

use super::*;

/// Builds the binary form of a sprite with the provided payload.
fn sprite_bytes(width: u16, height: u16, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![];
    data.write_u16(payload.len() as u16).unwrap();
    data.write_i16(-4).unwrap();
    data.write_i16(10).unwrap();
    data.write_u16(width).unwrap();
    data.write_u16(height).unwrap();
    data.write_u8(2).unwrap();
    data.write_bool(false).unwrap();
    data.write_all(payload).unwrap();
    data
}

#[test]
fn test_sprite_round_trip() {
    let payload = [
        8, 0,       // x = 2
        9, 0, 7, 8, // run of 2: 7, 8
        6, 0,       // y = 1
        5, 0, 9,    // run of 1: 9
        3, 0,       // end
    ];
    let before = sprite_bytes(5, 2, &payload);

    let mut sprite = Sprite::decode(&mut Cursor::new(&before)).unwrap();
    assert_eq!(*sprite.width(), 5);
    assert_eq!(*sprite.height(), 2);
    assert_eq!(*sprite.pos_x(), -4);
    assert_eq!(*sprite.pos_y(), 10);
    assert_eq!(*sprite.index(), 2);

    let mut after = vec![];
    sprite.encode(&mut after).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_sprite_image_decoding() {
    let payload = [
        8, 0,       // x = 2
        9, 0, 7, 8, // run of 2: 7, 8
        6, 0,       // y = 1
        5, 0, 9,    // run of 1: 9
        3, 0,       // end
    ];
    let data = sprite_bytes(5, 2, &payload);
    let sprite = Sprite::decode(&mut Cursor::new(&data)).unwrap();

    let raster = sprite.decode_image().unwrap();
    assert_eq!(raster, vec![
        None, None, Some(7), Some(8), None,
        Some(9), None, None, None, None,
    ]);
}

#[test]
fn test_sprite_image_encoding_round_trip() {
    let raster = vec![
        None, None, Some(7), Some(8), None,
        Some(9), None, None, None, None,
    ];

    let mut sprite = Sprite::default();
    sprite.set_image(&raster, 5, 2).unwrap();

    assert_eq!(sprite.decode_image().unwrap(), raster);
}

#[test]
fn test_sprite_early_end_marker_is_an_error() {

    // The end opcode followed by more data has to fail.
    let payload = [
        3, 0,
        5, 0, 9,
    ];
    let data = sprite_bytes(5, 2, &payload);
    let sprite = Sprite::decode(&mut Cursor::new(&data)).unwrap();

    assert!(matches!(sprite.decode_image(), Err(SDLibError::DecodingSpriteEarlyEndMarker(_))));
}

#[test]
fn test_sprite_truncated_run_is_an_error() {

    // A run of 3 with only one pixel behind it has to fail.
    let payload = [
        13, 0, 9,
    ];
    let data = sprite_bytes(5, 2, &payload);
    let sprite = Sprite::decode(&mut Cursor::new(&data)).unwrap();

    assert!(matches!(sprite.decode_image(), Err(SDLibError::DecodingSpriteTruncatedRun(_))));
}

#[test]
fn test_sprite_out_of_bounds_write_is_an_error() {

    // y = 4 on a 5x2 canvas.
    let payload = [
        18, 0,
        5, 0, 9,
        3, 0,
    ];
    let data = sprite_bytes(5, 2, &payload);
    let sprite = Sprite::decode(&mut Cursor::new(&data)).unwrap();

    assert!(matches!(sprite.decode_image(), Err(SDLibError::DecodingSpriteOutOfBounds { .. })));
}

#[test]
fn test_missing_sprite_has_no_payload() {
    let mut data = vec![];
    data.write_u16(4).unwrap();
    data.write_i16(0).unwrap();
    data.write_i16(0).unwrap();
    data.write_u16(5).unwrap();
    data.write_u16(2).unwrap();
    data.write_u8(0).unwrap();
    data.write_bool(true).unwrap();

    // The length field says 4 bytes, but missing sprites carry no payload.
    let mut sprite = Sprite::decode(&mut Cursor::new(&data)).unwrap();
    assert!(sprite.data().is_empty());

    let mut after = vec![];
    sprite.encode(&mut after).unwrap();

    // The length field collapses to 0 on write.
    assert_eq!(after[0], 0);
    assert_eq!(after[1], 0);
}
