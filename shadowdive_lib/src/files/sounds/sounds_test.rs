//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the SOUNDS.DAT archive.

use std::io::{Cursor, Write};

use crate::binary::WriteBytes;

use super::*;

/// Builds the bytes of an archive with three sounds, the middle one empty.
fn archive_bytes() -> Vec<u8> {
    let mut data = vec![];
    data.write_u32(0).unwrap();
    data.write_u32(20).unwrap();

    // Offsets: where each sound ends.
    data.write_u32(20 + 7).unwrap();
    data.write_u32(20 + 7 + 2).unwrap();
    data.write_u32(20 + 7 + 2 + 5).unwrap();

    data.write_u16(4).unwrap();
    data.write_u8(56).unwrap();
    data.write_all(&[128, 130, 127, 125]).unwrap();

    data.write_u16(0).unwrap();

    data.write_u16(2).unwrap();
    data.write_u8(128).unwrap();
    data.write_all(&[1, 2]).unwrap();

    data
}

#[test]
fn test_sound_archive_round_trip() {
    let before = archive_bytes();

    let mut archive = SoundArchive::decode(&mut Cursor::new(&before)).unwrap();
    assert_eq!(archive.sounds().len(), 3);
    assert_eq!(*archive.sounds()[0].frequency(), 56);
    assert_eq!(archive.sounds()[0].data(), &[128, 130, 127, 125]);
    assert!(archive.sounds()[1].data().is_empty());

    let mut after = vec![];
    archive.encode(&mut after).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_sound_real_frequency() {
    let mut sound = Sound::default();
    sound.set_frequency(56);
    assert_eq!(sound.real_frequency(), 5000);

    sound.set_real_frequency(8000).unwrap();
    assert_eq!(*sound.frequency(), 131);

    assert!(sound.set_real_frequency(100).is_err());
}

#[test]
fn test_empty_sound_with_frequency_is_rejected() {

    // An empty slot can't store a playback rate, so instead of dropping it
    // on write the encoder has to fail.
    let mut sound = Sound::default();
    sound.set_frequency(56);

    let mut data = vec![];
    assert!(sound.encode(&mut data).is_err());
    assert!(data.is_empty());
}

#[test]
fn test_sound_archive_rejects_nonzero_leader() {
    let mut data = archive_bytes();
    data[0] = 1;

    assert!(SoundArchive::decode(&mut Cursor::new(&data)).is_err());
}

#[test]
fn test_sound_archive_rejects_bad_offsets() {
    let mut data = archive_bytes();

    // Point the first offset past where the second sound really starts.
    data[8] += 1;

    assert!(SoundArchive::decode(&mut Cursor::new(&data)).is_err());
}

#[test]
fn test_sound_archive_trailing_data_is_an_error() {
    let mut data = archive_bytes();
    data.push(0);

    assert!(SoundArchive::decode(&mut Cursor::new(&data)).is_err());
}
