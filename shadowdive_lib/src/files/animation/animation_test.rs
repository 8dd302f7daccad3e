//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the animation blocks.

use std::io::Cursor;

use crate::binary::WriteBytes;

use super::*;

/// Builds the binary form of a small two-coordinate, one-sprite animation.
fn animation_bytes() -> Vec<u8> {
    let mut data = vec![];
    data.write_i16(10).unwrap();
    data.write_i16(-5).unwrap();
    data.write_u32(0).unwrap();
    data.write_u16(2).unwrap();
    data.write_u8(1).unwrap();

    // x = -4, unknown = 0 / y = 100, frame 1.
    data.write_u16(0x3FC).unwrap();
    data.write_u16((1 << 10) | 100).unwrap();

    // x = 12, unknown = 3 / y = -1, frame 0.
    data.write_u16((3 << 10) | 12).unwrap();
    data.write_u16(0x3FF).unwrap();

    data.write_var_string("A100-B100", false).unwrap();

    data.write_u8(1).unwrap();
    data.write_var_string("x+5y+2", false).unwrap();

    // One sprite with an empty payload.
    data.write_u16(0).unwrap();
    data.write_i16(0).unwrap();
    data.write_i16(0).unwrap();
    data.write_u16(0).unwrap();
    data.write_u16(0).unwrap();
    data.write_u8(0).unwrap();
    data.write_bool(false).unwrap();

    data
}

#[test]
fn test_animation_round_trip() {
    let before = animation_bytes();

    let mut animation = Animation::decode(&mut Cursor::new(&before)).unwrap();
    assert_eq!(*animation.start_x(), 10);
    assert_eq!(*animation.start_y(), -5);
    assert_eq!(animation.anim_string(), "A100-B100");
    assert_eq!(animation.extra_strings().len(), 1);
    assert_eq!(animation.sprites().len(), 1);

    let coords = animation.coord_table();
    assert_eq!(*coords[0].x(), -4);
    assert_eq!(*coords[0].y(), 100);
    assert_eq!(*coords[0].frame_id(), 1);
    assert_eq!(*coords[1].x(), 12);
    assert_eq!(*coords[1].y(), -1);
    assert_eq!(*coords[1].unknown(), 3);

    let mut after = vec![];
    animation.encode(&mut after).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_animation_nonzero_padding_is_an_error() {
    let mut data = vec![];
    data.write_i16(0).unwrap();
    data.write_i16(0).unwrap();
    data.write_u32(1).unwrap();

    assert!(matches!(
        Animation::decode(&mut Cursor::new(&data)),
        Err(SDLibError::DecodingFieldMismatch { .. })
    ));
}

#[test]
fn test_animation_script_accessor() {
    let data = animation_bytes();
    let animation = Animation::decode(&mut Cursor::new(&data)).unwrap();

    let script = animation.script().unwrap();
    assert_eq!(script.frames().len(), 2);
}
