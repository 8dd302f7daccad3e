//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the [`WriteBytes`] trait, to write known types to bytes.

use byteorder::{LittleEndian, WriteBytesExt};
use encoding_rs::ISO_8859_15;

use std::io::Write;

use crate::error::{Result, SDLibError};

//---------------------------------------------------------------------------//
//                            Trait Definition
//---------------------------------------------------------------------------//

/// This trait allow us to easily write all kind of data to a destination that implements [`Write`].
pub trait WriteBytes: Write {

    /// This function tries to write a bool value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use shadowdive_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// data.write_bool(true).unwrap();
    /// data.write_bool(false).unwrap();
    ///
    /// assert_eq!(data, vec![1, 0]);
    /// ```
    fn write_bool(&mut self, boolean: bool) -> Result<()> {
        self.write_u8(u8::from(boolean))
    }

    /// This function tries to write an u8 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    fn write_u8(&mut self, value: u8) -> Result<()> {
        WriteBytesExt::write_u8(self, value).map_err(From::from)
    }

    /// This function tries to write an u16 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    fn write_u16(&mut self, value: u16) -> Result<()> {
        WriteBytesExt::write_u16::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an u32 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    fn write_u32(&mut self, value: u32) -> Result<()> {
        WriteBytesExt::write_u32::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an i8 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    fn write_i8(&mut self, value: i8) -> Result<()> {
        WriteBytesExt::write_i8(self, value).map_err(From::from)
    }

    /// This function tries to write an i16 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    fn write_i16(&mut self, value: i16) -> Result<()> {
        WriteBytesExt::write_i16::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an i32 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    fn write_i32(&mut self, value: i32) -> Result<()> {
        WriteBytesExt::write_i32::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an f32 value to `self`.
    ///
    /// It may fail if `self` cannot be written to.
    fn write_f32(&mut self, value: f32) -> Result<()> {
        WriteBytesExt::write_f32::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write a String to `self` as a 00-Padded String with a fixed size of `size`.
    ///
    /// If `crop` is true and the string is longer than the field, the string will be
    /// cropped to fit. If it's false, an error will be returned instead.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use shadowdive_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// data.write_string_u8_0padded("AB", 4, false).unwrap();
    ///
    /// assert_eq!(data, vec![65, 66, 0, 0]);
    /// ```
    fn write_string_u8_0padded(&mut self, string: &str, size: usize, crop: bool) -> Result<()> {
        let (mut encoded, _, had_errors) = ISO_8859_15.encode(string);
        if had_errors {
            return Err(SDLibError::EncodingUnrepresentableString(string.to_owned()))
        }

        if encoded.len() > size {
            if crop {
                encoded = std::borrow::Cow::Owned(encoded[..size].to_vec());
            } else {
                return Err(SDLibError::EncodingPaddedStringError(string.to_owned(), encoded.len(), size))
            }
        }

        self.write_all(&encoded)?;
        self.write_all(&vec![0; size - encoded.len()]).map_err(From::from)
    }

    /// This function tries to write a String to `self` as a length-prefixed, 00-terminated String.
    ///
    /// The length is a u16 before the string. When `size_includes_zero` is true the
    /// terminator is counted in the length and an empty string writes only a zero
    /// length. When it's false the length only counts the content bytes and the
    /// terminator is always written.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use shadowdive_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// data.write_var_string("ABC", false).unwrap();
    ///
    /// assert_eq!(data, vec![3, 0, 65, 66, 67, 0]);
    /// ```
    fn write_var_string(&mut self, string: &str, size_includes_zero: bool) -> Result<()> {
        let (encoded, _, had_errors) = ISO_8859_15.encode(string);
        if had_errors {
            return Err(SDLibError::EncodingUnrepresentableString(string.to_owned()))
        }

        if size_includes_zero {
            if encoded.is_empty() {
                return self.write_u16(0)
            }
            self.write_u16(encoded.len() as u16 + 1)?;
        } else {
            self.write_u16(encoded.len() as u16)?;
        }

        self.write_all(&encoded)?;
        self.write_u8(0)
    }
}

// Automatic implementation for everything that implements `Write`.
impl<W: Write> WriteBytes for W {}
