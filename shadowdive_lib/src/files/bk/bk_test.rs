//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the BK format.

use std::io::{Cursor, Write};

use crate::binary::WriteBytes;

use super::*;

/// Builds the bytes of a stage animation record on slot 3.
fn stage_animation_bytes() -> Vec<u8> {
    let mut record = vec![];
    record.write_u8(1).unwrap();
    record.write_u8(2).unwrap();
    record.write_u8(0).unwrap();
    record.write_u8(1).unwrap();
    record.write_u16(50).unwrap();
    record.write_u8(10).unwrap();
    record.write_var_string("A5-", true).unwrap();

    // The embedded animation, with no coordinates and no sprites.
    record.write_i16(0).unwrap();
    record.write_i16(0).unwrap();
    record.write_u32(0).unwrap();
    record.write_u16(0).unwrap();
    record.write_u8(0).unwrap();
    record.write_var_string("B100", false).unwrap();
    record.write_u8(0).unwrap();

    record
}

/// Builds the bytes of a whole BK file with a 4x2 background and one animation.
fn stage_bytes() -> Vec<u8> {
    let mut data = vec![];
    data.write_u32(4).unwrap();
    data.write_u8(1).unwrap();
    data.write_u16(4).unwrap();
    data.write_u16(2).unwrap();

    let record = stage_animation_bytes();
    let mut position = 9u32;

    position += 5 + record.len() as u32;
    data.write_u32(position).unwrap();
    data.write_u8(3).unwrap();
    data.write_all(&record).unwrap();

    position += 5;
    data.write_u32(position).unwrap();
    data.write_u8(ANIMATION_MAX_NUMBER).unwrap();

    // Background image.
    data.write_all(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

    // One palette with its remapping tables.
    data.write_u8(1).unwrap();
    for index in 0..768 {
        data.write_u8((index % 64) as u8).unwrap();
    }
    for _ in 0..19 {
        for index in 0..256u16 {
            data.write_u8(index as u8).unwrap();
        }
    }

    data.write_all(&[9; SOUND_TABLE_SIZE]).unwrap();

    data
}

#[test]
fn test_stage_round_trip() {
    let before = stage_bytes();

    let mut stage = Stage::decode(&mut Cursor::new(&before)).unwrap();
    assert_eq!(*stage.file_id(), 4);
    assert_eq!(*stage.background_width(), 4);
    assert_eq!(*stage.background_height(), 2);
    assert_eq!(stage.background(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(stage.animations().len(), 1);
    assert_eq!(stage.palettes().len(), 1);

    let animation = &stage.animations()[&3];
    assert_eq!(*animation.chain_hit(), 2);
    assert_eq!(*animation.probability(), 50);
    assert_eq!(animation.footer_string(), "A5-");
    assert_eq!(animation.animation().anim_string(), "B100");

    let mut after = vec![];
    stage.encode(&mut after).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_stage_background_size_validation() {
    let data = stage_bytes();
    let mut stage = Stage::decode(&mut Cursor::new(&data)).unwrap();

    stage.background_mut().pop();
    assert!(stage.validate().is_err());
}

#[test]
fn test_stage_trailing_data_is_an_error() {
    let mut data = stage_bytes();
    data.push(0);

    assert!(Stage::decode(&mut Cursor::new(&data)).is_err());
}
