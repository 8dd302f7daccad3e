//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the PIC format.

use std::io::{Cursor, Write};

use crate::binary::WriteBytes;

use super::*;

/// Builds the bytes of a PIC file with a single 5x2 photo.
fn pic_bytes() -> Vec<u8> {
    let mut data = vec![];
    data.write_u32(1).unwrap();
    for index in 0..HEADER_PAD_SIZE {
        data.write_u8((index % 251) as u8).unwrap();
    }

    data.write_u32(204).unwrap();

    // The photo itself.
    data.write_bool(true).unwrap();
    data.write_u16(1).unwrap();
    for index in 0..PHOTO_PALETTE_SIZE * 3 {
        data.write_u8((index % 64) as u8).unwrap();
    }
    data.write_u8(7).unwrap();

    // The portrait sprite, with its dimensions stored one short.
    let payload = [8, 0, 9, 0, 7, 8, 6, 0, 5, 0, 9, 3, 0];
    data.write_u16(payload.len() as u16).unwrap();
    data.write_i16(10).unwrap();
    data.write_i16(-5).unwrap();
    data.write_u16(4).unwrap();
    data.write_u16(1).unwrap();
    data.write_u8(2).unwrap();
    data.write_bool(false).unwrap();
    data.write_all(&payload).unwrap();

    data
}

#[test]
fn test_pic_round_trip() {
    let before = pic_bytes();

    let mut pic = PicFile::decode(&mut Cursor::new(&before)).unwrap();
    assert_eq!(pic.photos().len(), 1);
    assert_eq!(pic.header_pad()[10], 10);

    let photo = &pic.photos()[0];
    assert!(*photo.is_player());
    assert_eq!(*photo.sex(), 1);
    assert_eq!(*photo.unknown(), 7);

    // The off-by-one of the stored dimensions is corrected on read.
    assert_eq!(*photo.sprite().width(), 5);
    assert_eq!(*photo.sprite().height(), 2);

    let mut after = vec![];
    pic.encode(&mut after).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_pic_rejects_excessive_photo_count() {
    let mut data = vec![];
    data.write_u32(300).unwrap();

    assert!(PicFile::decode(&mut Cursor::new(&data)).is_err());
}

#[test]
fn test_pic_rejects_bad_offsets() {
    let mut data = pic_bytes();

    // Point the photo past the end of the file.
    data[200..204].copy_from_slice(&u32::MAX.to_le_bytes());

    assert!(PicFile::decode(&mut Cursor::new(&data)).is_err());
}

#[test]
fn test_pic_decodes_photos_by_offset() {
    let mut data = pic_bytes();

    // Push the photo 4 bytes forward, leaving slack after the table.
    let record = data.split_off(204);
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&record);
    data[200..204].copy_from_slice(&208u32.to_le_bytes());

    let pic = PicFile::decode(&mut Cursor::new(&data)).unwrap();
    assert_eq!(pic.photos().len(), 1);
    assert_eq!(*pic.photos()[0].sprite().width(), 5);
}

#[test]
fn test_pic_rejects_overflowing_photo_dimensions() {
    let mut data = pic_bytes();

    // Stored width of the only photo's sprite, set to the maximum so the
    // off-by-one correction can't be applied.
    let width_pos = 204 + 1 + 2 + PHOTO_PALETTE_SIZE * 3 + 1 + 6;
    data[width_pos..width_pos + 2].copy_from_slice(&u16::MAX.to_le_bytes());

    assert!(PicFile::decode(&mut Cursor::new(&data)).is_err());
}

#[test]
fn test_pic_validation_rejects_bad_sex() {
    let data = pic_bytes();
    let mut pic = PicFile::decode(&mut Cursor::new(&data)).unwrap();
    pic.photos_mut()[0].set_sex(2);

    assert!(pic.validate().is_err());
}
