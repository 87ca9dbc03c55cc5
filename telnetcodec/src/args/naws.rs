//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Negotiate About Window Size
//!

use crate::{TelnetError, TelnetOption, TelnetResult};
use byteorder::{BigEndian, WriteBytesExt};
use bytes::Buf;

/// Terminal size reported through NAWS.
///
/// On the wire this is four bytes: columns then rows, both big-endian `u16`.
/// Escaping of any `0xFF` byte is left to the subnegotiation encoder.
///
/// # Example
/// ```
/// use mudlink_telnetcodec::naws::WindowSize;
///
/// let size = WindowSize::new(80, 24);
/// assert_eq!(size.to_bytes(), [0, 80, 0, 24]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// The number of columns (characters) in the terminal window
    pub cols: u16,
    /// The number of rows (lines) in the terminal window
    pub rows: u16,
}

impl WindowSize {
    /// Creates a new `WindowSize` with the specified columns and rows.
    pub fn new(cols: u16, rows: u16) -> Self {
        WindowSize { cols, rows }
    }

    /// Unescaped payload bytes.
    pub fn to_bytes(&self) -> [u8; 4] {
        let [c1, c2] = self.cols.to_be_bytes();
        let [r1, r2] = self.rows.to_be_bytes();
        [c1, c2, r1, r2]
    }

    /// Writes this `WindowSize` to a writer using big-endian format.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u16::<BigEndian>(self.cols)?;
        writer.write_u16::<BigEndian>(self.rows)?;
        Ok(4)
    }

    /// Decodes a `WindowSize` from an unescaped payload.
    ///
    /// # Errors
    /// [`TelnetError::InsufficientData`] if fewer than 4 bytes are available.
    pub fn decode<T: Buf>(src: &mut T) -> TelnetResult<WindowSize> {
        if src.remaining() >= 4 {
            Ok(WindowSize {
                cols: src.get_u16(),
                rows: src.get_u16(),
            })
        } else {
            Err(TelnetError::InsufficientData {
                option: TelnetOption::NAWS,
                required: 4,
                available: src.remaining(),
            })
        }
    }
}

impl Default for WindowSize {
    /// The traditional 80x24 terminal.
    fn default() -> Self {
        WindowSize { cols: 80, rows: 24 }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes_is_big_endian() {
        assert_eq!(WindowSize::new(0x0102, 0x00FF).to_bytes(), [1, 2, 0, 0xFF]);
    }

    #[test]
    fn test_write_matches_to_bytes() {
        let size = WindowSize::new(132, 43);
        let mut out = Vec::new();
        assert_eq!(size.write(&mut out).unwrap(), 4);
        assert_eq!(out, size.to_bytes());
    }

    #[test]
    fn test_decode_short_payload() {
        let mut src: &[u8] = &[0, 80];
        assert!(matches!(
            WindowSize::decode(&mut src),
            Err(TelnetError::InsufficientData { available: 2, .. })
        ));
    }

    #[test]
    fn test_decode() {
        let mut src: &[u8] = &[0, 80, 0, 24];
        assert_eq!(WindowSize::decode(&mut src).unwrap(), WindowSize::default());
    }
}
