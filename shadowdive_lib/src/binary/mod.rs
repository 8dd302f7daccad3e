//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the traits [`ReadBytes`] and [`WriteBytes`], used to decode
//! binary data into usable types and encode it back to binary, and the
//! [`XorStream`] adapter for the scrambled regions some formats use.
//!
//! All multi-byte values are LittleEndian. The types used by the OMF 2097
//! formats are:
//!
//! | Type | Bytes | Binary Format | Example | Explanation |
//! | ---- | ----- | ------------- | ------- | ----------- |
//! | **[bool]** | 1   | ```00 or 01```      | 0/1     | Boolean value, 0 is false, 1 is true. |
//! | **[u8]**  | 1    | ```05```            | 5       | Unsigned Integer. |
//! | **[u16]** | 2    | ```05 00```         | 5       | Unsigned Integer. |
//! | **[u32]** | 4    | ```05 00 00 00```   | 5       | Unsigned Integer. |
//! | **[i8]**  | 1    | ```05```            | 5       | Signed Integer. |
//! | **[i16]** | 2    | ```05 00```         | 5       | Signed Integer. |
//! | **[i32]** | 4    | ```05 00 00 00```   | 5       | Signed Integer. |
//! | **[f32]** | 4    | ```00 00 80 3F```   | 1.0     | Floating Point Value. |
//! | **Padded String** | fixed | ```41 42 00 00``` | AB | Fixed-width string, padded with 00 bytes. |
//! | **Var String** | 2 (Length, u16) + Length + 1 | ```02 00 41 42 00``` | AB | Length-prefixed string followed by a 00 terminator. Some fields count the terminator in the length, some don't. |
//!
//! Strings use the ISO-8859-15 code page, which maps every byte value, so
//! string fields always round-trip byte-identical.

mod reader;
mod writer;
mod xor;

pub use self::reader::ReadBytes;
pub use self::writer::WriteBytes;
pub use self::xor::XorStream;
