//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the TRN format.

use std::io::Cursor;

use crate::files::pilot::QUOTE_COUNT;

use super::*;

/// Builds an enemy pilot with every fixed-size block at its required length.
fn test_pilot(name: &str) -> Pilot {
    let mut pilot = Pilot::default();
    pilot.set_name(name.to_owned());
    pilot.set_unk_block_a(vec![0; 40]);
    pilot.set_unk_block_b(vec![0; 2]);
    pilot.set_unk_block_c(vec![0; 3]);
    pilot.set_enhancements(vec![0; 11]);
    pilot.set_unk_block_d(vec![0; 3]);
    pilot.set_unk_block_f(vec![0; 14]);
    pilot.set_unk_block_g(vec![0; 8]);
    pilot.set_quotes(vec!["...".to_owned(); QUOTE_COUNT]);
    pilot
}

/// Builds a tournament with two enemies and some locale texts.
fn test_tournament() -> Tournament {
    let mut tournament = Tournament::default();
    tournament.set_bk_name("MAIN.BK".to_owned());
    tournament.set_winnings_multiplier(1.25);
    tournament.set_registration_fee(1000);
    tournament.set_assumed_initial_value(2500);
    tournament.set_tournament_id(1);
    tournament.set_pic_filename("MAIN.PIC".to_owned());
    tournament.set_pilots(vec![test_pilot("SHIRRO"), test_pilot("MILANO")]);

    tournament.locale_titles_mut()[0] = "World Championship".to_owned();
    tournament.locale_descriptions_mut()[0] = "The big one.".to_owned();
    tournament.locale_end_texts_mut()[0][1][0] = "You did it!".to_owned();
    tournament
}

#[test]
fn test_tournament_round_trip() {
    let mut before = test_tournament();

    let mut data = vec![];
    before.encode(&mut data).unwrap();

    let after = Tournament::decode(&mut Cursor::new(&data)).unwrap();
    assert_eq!(before, after);

    let mut data_again = vec![];
    before.encode(&mut data_again).unwrap();
    assert_eq!(data, data_again);
}

#[test]
fn test_tournament_offsets_line_up() {
    let mut tournament = test_tournament();

    let mut data = vec![];
    tournament.encode(&mut data).unwrap();

    // First pilot offset: right after the offset table.
    let first = u32::from_le_bytes(data[300..304].try_into().unwrap());
    assert_eq!(first, 300 + 4 * 3);

    // The victory text offset on the header points inside the file.
    let victory = u32::from_le_bytes(data[4..8].try_into().unwrap());
    assert!((victory as usize) < data.len());

    // An offset past the end of the file makes the decoder bail out.
    data[300..304].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(Tournament::decode(&mut Cursor::new(&data)).is_err());
}

#[test]
fn test_tournament_tolerates_slack_before_victory_texts() {
    let mut tournament = test_tournament();

    let mut data = vec![];
    tournament.encode(&mut data).unwrap();

    // Insert unused bytes between the locale block and the victory texts,
    // then point the header past them.
    let victory = u32::from_le_bytes(data[4..8].try_into().unwrap()) as usize;
    let texts = data.split_off(victory);
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&texts);
    data[4..8].copy_from_slice(&((victory + 4) as u32).to_le_bytes());

    let decoded = Tournament::decode(&mut Cursor::new(&data)).unwrap();
    assert_eq!(decoded.pilots().len(), 2);
    assert_eq!(decoded.locale_end_texts()[0][1][0], "You did it!");
}

#[test]
fn test_tournament_decode_reads_pilots() {
    let mut tournament = test_tournament();

    let mut data = vec![];
    tournament.encode(&mut data).unwrap();

    let decoded = Tournament::decode(&mut Cursor::new(&data)).unwrap();
    assert_eq!(decoded.pilots().len(), 2);
    assert_eq!(decoded.pilots()[0].name(), "SHIRRO");
    assert_eq!(decoded.pilots()[1].name(), "MILANO");
    assert_eq!(decoded.locale_titles()[0], "World Championship");
    assert_eq!(decoded.locale_end_texts()[0][1][0], "You did it!");
}

#[test]
fn test_tournament_validation_rejects_bad_locale_counts() {
    let mut tournament = test_tournament();
    tournament.locale_titles_mut().pop();

    assert!(tournament.validate().is_err());
}

#[test]
fn test_tournament_trailing_data_is_an_error() {
    let mut tournament = test_tournament();

    let mut data = vec![];
    tournament.encode(&mut data).unwrap();
    data.push(0);

    assert!(Tournament::decode(&mut Cursor::new(&data)).is_err());
}
