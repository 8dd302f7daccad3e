//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is a module to parse and rebuild animation strings.
//!
//! Animation strings are the little scripts that drive every animation in
//! the game: a sequence of frames, each one an uppercase letter (the sprite
//! to show) with a duration, decorated with tags from the table in [`tags`].
//! `"A10-B10"` shows sprite A for 10 ticks, then sprite B for 10 ticks.
//!
//! The shipped game data is full of quirks: `+` signs and leading zeros on
//! numbers, stray filler characters, lowercase frame markers, separators with
//! no frame to close, and `!` as an empty script. The parser keeps every one
//! of those quirks on the parsed model, so rebuilding a parsed string always
//! returns the exact original. That makes the parsed form safe to store back
//! into files that must stay byte-identical.

use getset::*;
use serde_derive::{Serialize, Deserialize};

use crate::error::{Result, SDLibError};

pub mod tags;


//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This represents a whole animation string, parsed in memory.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Script {

    /// The frames of the script, in playback order.
    frames: Vec<Frame>,

    /// If the source string was the `!` placeholder instead of being empty.
    placeholder: bool,
}

/// This represents a single frame of an animation string.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Frame {

    /// The sprite letter of the frame, uppercased. None for tag-only trailers.
    key: Option<char>,

    /// If the marker was lowercase on the source string.
    lowercase_marker: bool,

    /// The duration of the frame, in ticks.
    duration: Option<ScriptNumber>,

    /// The tags attached to the frame, in source order.
    tags: Vec<Tag>,

    /// How many of the tags came before the frame marker on the source string.
    marker_pos: usize,

    /// If an explicit `-` closed the frame.
    terminated: bool,
}

/// This represents a single tag of a frame.
#[derive(PartialEq, Eq, Clone, Debug, Default, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Tag {

    /// The characters of the tag.
    key: String,

    /// The numeric argument of the tag, when present.
    arg: Option<ScriptNumber>,

    /// If the tag is a filler character or stray separator instead of a real tag.
    invalid: bool,
}

/// This represents a number on an animation string, quirks included.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Getters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", set = "pub")]
pub struct ScriptNumber {

    /// The parsed value.
    value: i32,

    /// If the source had an explicit `+` sign.
    plus_sign: bool,

    /// How many redundant leading zeros the source had.
    leading_zeros: u8,
}

//---------------------------------------------------------------------------//
//                          Implementation of Script
//---------------------------------------------------------------------------//

impl Script {

    /// This function parses the provided animation string.
    ///
    /// Both the empty string and the `!` placeholder parse into a script
    /// with no frames. Anything the tokenizer can't place fails with the
    /// position and the fragment of the string around it.
    pub fn decode(string: &str) -> Result<Self> {
        let mut script = Self::default();

        if string == "!" {
            script.placeholder = true;
            return Ok(script)
        }

        if let Some(position) = string.bytes().position(|byte| !byte.is_ascii()) {
            return Err(SDLibError::UnparseableScript {
                position,
                fragment: Self::fragment(string, position),
            })
        }

        let chars = string.as_bytes();
        let mut frame = Frame::default();
        let mut pos = 0;

        while pos < chars.len() {
            let character = chars[pos] as char;

            // A frame marker. It opens a new frame, implicitly closing the
            // previous one if no separator did it before.
            if character.is_ascii_uppercase() {
                if frame.key.is_some() {
                    script.frames.push(std::mem::take(&mut frame));
                }

                frame.key = Some(character);
                frame.marker_pos = frame.tags.len();
                pos += 1;
                frame.duration = Self::parse_number(chars, &mut pos)?;
                continue;
            }

            // A tag, longest match first.
            if let Some(info) = tags::match_tag(&string[pos..]) {
                pos += info.key.len();

                let arg = if info.has_arg {
                    Self::parse_number(chars, &mut pos)?
                } else {
                    None
                };

                frame.tags.push(Tag {
                    key: info.key.to_owned(),
                    arg,
                    invalid: false,
                });
                continue;
            }

            // A filler character, kept verbatim as an invalid tag.
            if tags::is_filler(character) {
                frame.tags.push(Tag {
                    key: character.to_string(),
                    arg: None,
                    invalid: true,
                });
                pos += 1;
                continue;
            }

            // A lowercase letter directly followed by a digit is a malformed
            // frame marker. Treated as its uppercase form, remembering the case.
            if character.is_ascii_lowercase() && chars.get(pos + 1).is_some_and(|next| next.is_ascii_digit()) {
                if frame.key.is_some() {
                    script.frames.push(std::mem::take(&mut frame));
                }

                frame.key = Some(character.to_ascii_uppercase());
                frame.lowercase_marker = true;
                frame.marker_pos = frame.tags.len();
                pos += 1;
                frame.duration = Self::parse_number(chars, &mut pos)?;
                continue;
            }

            // A separator. Closes the current frame if one is open; stray
            // separators are kept as invalid tags.
            if character == '-' {
                if frame.key.is_some() {
                    frame.terminated = true;
                    script.frames.push(std::mem::take(&mut frame));
                } else {
                    frame.tags.push(Tag {
                        key: "-".to_owned(),
                        arg: None,
                        invalid: true,
                    });
                }
                pos += 1;
                continue;
            }

            return Err(SDLibError::UnparseableScript {
                position: pos,
                fragment: Self::fragment(string, pos),
            })
        }

        if frame.key.is_some() || !frame.tags.is_empty() {
            script.frames.push(frame);
        }

        Ok(script)
    }

    /// This function rebuilds the animation string.
    ///
    /// For any string accepted by [`Self::decode`], this returns the exact
    /// source string, quirks included.
    pub fn encode(&self) -> String {
        if self.frames.is_empty() && self.placeholder {
            return "!".to_owned()
        }

        let mut string = String::new();
        for frame in &self.frames {
            frame.encode(&mut string);
        }

        string
    }

    /// This function returns the total duration of the script, in ticks.
    pub fn duration(&self) -> u32 {
        self.frames.iter()
            .filter_map(|frame| frame.duration.as_ref())
            .map(|duration| duration.value.max(0) as u32)
            .sum()
    }

    /// This function returns the frame playing at the provided tick, if any.
    pub fn frame_at(&self, tick: u32) -> Option<&Frame> {
        let mut elapsed = 0;
        for frame in &self.frames {
            let duration = frame.duration.as_ref().map_or(0, |duration| duration.value.max(0) as u32);
            if tick < elapsed + duration {
                return Some(frame)
            }
            elapsed += duration;
        }

        None
    }

    /// This function parses an optional signed integer at `pos`, quirks included.
    ///
    /// A sign only counts as part of a number when a digit follows it, so
    /// frame separators are left alone.
    fn parse_number(chars: &[u8], pos: &mut usize) -> Result<Option<ScriptNumber>> {
        let start = *pos;
        let mut negative = false;
        let mut plus_sign = false;

        match chars.get(*pos) {
            Some(b'-') if chars.get(*pos + 1).is_some_and(|next| next.is_ascii_digit()) => {
                negative = true;
                *pos += 1;
            }
            Some(b'+') if chars.get(*pos + 1).is_some_and(|next| next.is_ascii_digit()) => {
                plus_sign = true;
                *pos += 1;
            }
            _ => {}
        }

        let digits_start = *pos;
        while chars.get(*pos).is_some_and(|character| character.is_ascii_digit()) {
            *pos += 1;
        }

        let digits = &chars[digits_start..*pos];
        if digits.is_empty() {
            return Ok(None)
        }

        let digits_str: String = digits.iter().map(|digit| *digit as char).collect();
        let magnitude = digits_str.parse::<i64>()
            .map_err(|_| SDLibError::ScriptNumberOutOfRange(digits_str.to_owned(), start))?;

        if magnitude > i32::MAX as i64 {
            return Err(SDLibError::ScriptNumberOutOfRange(digits_str.to_owned(), start))
        }

        let leading_zeros = digits.len() - magnitude.to_string().len();
        if leading_zeros > u8::MAX as usize {
            return Err(SDLibError::ScriptNumberOutOfRange(digits_str.to_owned(), start))
        }

        Ok(Some(ScriptNumber {
            value: if negative { -(magnitude as i32) } else { magnitude as i32 },
            plus_sign,
            leading_zeros: leading_zeros as u8,
        }))
    }

    /// This function cuts the piece of string around `position`, for error reporting.
    fn fragment(string: &str, position: usize) -> String {
        let start = position.saturating_sub(5);
        let end = (position + 5).min(string.len());
        string.get(start..end).unwrap_or_default().to_owned()
    }
}

//---------------------------------------------------------------------------//
//                        Implementation of Frame & co
//---------------------------------------------------------------------------//

impl Frame {

    /// This function rebuilds the source form of the frame into `string`.
    fn encode(&self, string: &mut String) {
        for (index, tag) in self.tags.iter().enumerate() {
            if self.key.is_some() && index == self.marker_pos {
                self.encode_marker(string);
            }
            tag.encode(string);
        }

        if self.key.is_some() && self.marker_pos >= self.tags.len() {
            self.encode_marker(string);
        }

        if self.terminated {
            string.push('-');
        }
    }

    fn encode_marker(&self, string: &mut String) {
        if let Some(key) = self.key {
            string.push(if self.lowercase_marker { key.to_ascii_lowercase() } else { key });

            if let Some(duration) = &self.duration {
                duration.encode(string);
            }
        }
    }

    /// This function returns the duration of the frame in ticks, 0 if it has none.
    pub fn ticks(&self) -> u32 {
        self.duration.as_ref().map_or(0, |duration| duration.value.max(0) as u32)
    }
}

impl Tag {

    fn encode(&self, string: &mut String) {
        string.push_str(&self.key);

        if let Some(arg) = &self.arg {
            arg.encode(string);
        }
    }

    /// This function returns the table description of the tag, if it's a known one.
    pub fn describe(&self) -> Option<&'static str> {
        tags::tag_info(&self.key).map(|info| info.desc)
    }
}

impl ScriptNumber {

    pub fn new(value: i32) -> Self {
        Self {
            value,
            plus_sign: false,
            leading_zeros: 0,
        }
    }

    fn encode(&self, string: &mut String) {
        if self.value < 0 {
            string.push('-');
        } else if self.plus_sign {
            string.push('+');
        }

        for _ in 0..self.leading_zeros {
            string.push('0');
        }

        string.push_str(&self.value.unsigned_abs().to_string());
    }
}
