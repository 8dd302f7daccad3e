//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 ShadowDive Contributors. All rights reserved.
//
// This file is part of the ShadowDive project, a library for reading and
// writing the game files of One Must Fall 2097.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/shadowdive/shadowdive-rs/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the [`XorStream`] adapter, for the scrambled regions of some formats.
//!
//! Pilot blocks and language files scramble their contents with a rolling
//! XOR: every byte is XORed against a key that starts at a value derived
//! from the block's length and increases by one (wrapping) per byte. The
//! adapter applies the same transform on both read and write, so codecs can
//! use it through [`ReadBytes`](super::ReadBytes)/[`WriteBytes`](super::WriteBytes)
//! without caring about the scrambling.

use std::io::{Read, Seek, SeekFrom, Write};

//---------------------------------------------------------------------------//
//                              Struct & Impls
//---------------------------------------------------------------------------//

/// Stream adapter that XORs bytes against a rolling key as they pass through.
///
/// While no key is set, the adapter is transparent. Seeking never advances
/// the key, so a codec that seeks inside a scrambled region must reset the
/// key itself, the same way the game does.
///
/// ```rust
/// use std::io::{Cursor, Read, Seek, SeekFrom, Write};
///
/// use shadowdive_lib::binary::XorStream;
///
/// let mut data = Cursor::new(vec![]);
/// let mut stream = XorStream::new(&mut data);
/// stream.set_key(Some(172));
/// stream.write_all(b"OMF").unwrap();
///
/// data.seek(SeekFrom::Start(0)).unwrap();
/// let mut stream = XorStream::new(&mut data);
/// stream.set_key(Some(172));
/// let mut decoded = vec![0; 3];
/// stream.read_exact(&mut decoded).unwrap();
///
/// assert_eq!(&decoded, b"OMF");
/// ```
pub struct XorStream<S> {
    inner: S,
    key: Option<u8>,
}

impl<S> XorStream<S> {

    /// This function creates a new transparent `XorStream` over the provided stream.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            key: None,
        }
    }

    /// This function sets (or clears) the current XOR key.
    pub fn set_key(&mut self, key: Option<u8>) {
        self.key = key;
    }

    /// This function consumes the adapter, returning the underlying stream.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// This function applies the rolling key to `data`, advancing the key per byte.
    fn apply_key(&mut self, data: &mut [u8]) {
        if let Some(mut key) = self.key {
            for byte in data.iter_mut() {
                *byte ^= key;
                key = key.wrapping_add(1);
            }
            self.key = Some(key);
        }
    }
}

impl<S: Read> Read for XorStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.apply_key(&mut buf[..read]);
        Ok(read)
    }
}

impl<S: Write> Write for XorStream<S> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.key {
            Some(_) => {
                let mut scrambled = buf.to_vec();
                self.apply_key(&mut scrambled);
                self.inner.write_all(&scrambled)?;
                Ok(buf.len())
            }
            None => self.inner.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl<S: Seek> Seek for XorStream<S> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}
