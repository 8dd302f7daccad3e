//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the AF format.

use std::io::{Cursor, Write};

use crate::binary::WriteBytes;

use super::*;

/// Builds the bytes of an animation with no coordinates and no sprites.
fn animation_bytes(anim_string: &str) -> Vec<u8> {
    let mut data = vec![];
    data.write_i16(0).unwrap();
    data.write_i16(0).unwrap();
    data.write_u32(0).unwrap();
    data.write_u16(0).unwrap();
    data.write_u8(0).unwrap();
    data.write_var_string(anim_string, false).unwrap();
    data.write_u8(0).unwrap();
    data
}

/// Builds the bytes of a whole AF file with a single move on slot 5.
fn fighter_bytes() -> Vec<u8> {
    let mut data = vec![];
    data.write_u16(1).unwrap();
    data.write_u16(10).unwrap();
    data.write_u32(512).unwrap();
    data.write_u8(0).unwrap();
    data.write_u16(100).unwrap();
    data.write_i32(640).unwrap();
    data.write_i32(-320).unwrap();
    data.write_i32(1024).unwrap();
    data.write_i32(512).unwrap();
    data.write_u8(0).unwrap();
    data.write_u8(0).unwrap();

    // Move 5.
    data.write_u8(5).unwrap();
    data.write_all(&animation_bytes("A10-B10")).unwrap();
    data.write_u16(1).unwrap();
    data.write_u16(2).unwrap();
    for value in 0..8u8 {
        data.write_u8(value).unwrap();
    }
    data.write_u8(9).unwrap();
    data.write_u8(10).unwrap();
    data.write_u8(0).unwrap();
    data.write_u8(11).unwrap();
    data.write_u8(12).unwrap();
    data.write_u8(13).unwrap();
    data.write_u8(0).unwrap();
    data.write_u8(0).unwrap();
    data.write_u8(14).unwrap();
    data.write_string_u8_0padded("P+K", 21, false).unwrap();
    data.write_var_string("ua", true).unwrap();

    // Table terminator and sound table.
    data.write_u8(250).unwrap();
    data.write_all(&[7; SOUND_TABLE_SIZE]).unwrap();

    data
}

#[test]
fn test_fighter_round_trip() {
    let before = fighter_bytes();

    let mut fighter = Fighter::decode(&mut Cursor::new(&before)).unwrap();
    assert_eq!(*fighter.file_id(), 1);
    assert_eq!(*fighter.health(), 100);
    assert_eq!(fighter.moves().len(), 1);
    assert_eq!(fighter.sound_table().len(), SOUND_TABLE_SIZE);

    let mov = &fighter.moves()[&5];
    assert_eq!(mov.animation().anim_string(), "A10-B10");
    assert_eq!(*mov.damage_amount(), 13);
    assert_eq!(mov.move_string(), "P+K");
    assert_eq!(mov.enemy_string(), "ua");

    let mut after = vec![];
    fighter.encode(&mut after).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_fighter_fixed_point_accessors() {
    let data = fighter_bytes();
    let fighter = Fighter::decode(&mut Cursor::new(&data)).unwrap();

    assert_eq!(fighter.endurance_as_f32(), 2.0);
    assert_eq!(fighter.forward_speed_as_f32(), 2.5);
    assert_eq!(fighter.reverse_speed_as_f32(), -1.25);
    assert_eq!(fighter.jump_speed_as_f32(), 4.0);
    assert_eq!(fighter.fall_speed_as_f32(), 2.0);
}

#[test]
fn test_fighter_validation_rejects_bad_move_numbers() {
    let data = fighter_bytes();
    let mut fighter = Fighter::decode(&mut Cursor::new(&data)).unwrap();

    let mov = fighter.moves()[&5].clone();
    fighter.moves_mut().insert(80, mov);

    assert!(fighter.validate().is_err());
}

#[test]
fn test_fighter_truncated_file_is_an_error() {
    let data = fighter_bytes();
    assert!(Fighter::decode(&mut Cursor::new(&data[..data.len() - 2])).is_err());
}
