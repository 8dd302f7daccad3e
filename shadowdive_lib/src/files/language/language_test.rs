//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the language files.

use std::io::Cursor;

use super::*;

/// Builds a language file with two entries.
fn test_language() -> LanguageFile {
    let mut language = LanguageFile::default();
    language.set_titles(vec!["MAIN MENU".to_owned(), "OPTIONS".to_owned()]);
    language.set_strings(vec!["One Must Fall 2097".to_owned(), "Sound: %s".to_owned()]);
    language
}

#[test]
fn test_language_round_trip() {
    let mut before = test_language();

    let mut data = vec![];
    before.encode(&mut data).unwrap();

    let after = LanguageFile::decode(&mut Cursor::new(&data)).unwrap();
    assert_eq!(before, after);

    let mut data_again = vec![];
    before.encode(&mut data_again).unwrap();
    assert_eq!(data, data_again);
}

#[test]
fn test_language_blocks_are_scrambled() {
    let mut language = test_language();

    let mut data = vec![];
    language.encode(&mut data).unwrap();

    // Two entries of 36 bytes each, no terminator.
    let header_size = 72;
    let block = &data[header_size..header_size + 18];
    assert_ne!(block, &b"One Must Fall 2097"[..]);

    // First block is 19 bytes with its terminator, so its key starts at 19.
    let unscrambled = block.iter()
        .enumerate()
        .map(|(index, byte)| byte ^ (19 + index as u8))
        .collect::<Vec<_>>();
    assert_eq!(unscrambled, b"One Must Fall 2097");
}

#[test]
fn test_language_blocks_follow_the_entry_table() {
    let mut language = test_language();

    let mut data = vec![];
    language.encode(&mut data).unwrap();

    // The first block starts right after the two entries.
    let first = u32::from_le_bytes(data[0..4].try_into().unwrap());
    assert_eq!(first, ENTRY_SIZE * 2);

    // 19 and 10 bytes of blocks, NULs included.
    assert_eq!(data.len(), ENTRY_SIZE as usize * 2 + 19 + 10);
}

#[test]
fn test_language_decodes_blocks_by_offset() {
    let mut data = vec![];
    data.write_u32(ENTRY_SIZE).unwrap();
    data.write_string_u8_0padded("MAIN MENU", TITLE_SIZE, false).unwrap();

    // The block, scrambled by hand with a rolling key starting at its size.
    let block = b"Fight!\0";
    for (index, byte) in block.iter().enumerate() {
        data.push(byte ^ (block.len() as u8 + index as u8));
    }

    // The scan reads the block's leading dword as the next offset and
    // stops on it, as it lands past the end of the file.
    let language = LanguageFile::decode(&mut Cursor::new(&data)).unwrap();
    assert_eq!(language.titles(), &["MAIN MENU".to_owned()]);
    assert_eq!(language.strings(), &["Fight!".to_owned()]);
}

#[test]
fn test_empty_language_file_round_trip() {
    let mut language = LanguageFile::default();

    let mut data = vec![];
    language.encode(&mut data).unwrap();
    assert!(data.is_empty());

    let after = LanguageFile::decode(&mut Cursor::new(&data)).unwrap();
    assert_eq!(language, after);
}

#[test]
fn test_language_validation_rejects_uneven_tables() {
    let mut language = test_language();
    language.strings_mut().pop();

    assert!(language.validate().is_err());
}
