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

use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use std::fmt;

/// Text attributes toggled by SGR codes, packed into one byte.
///
/// | Flag               | Set | Clear |
/// |--------------------|-----|-------|
/// | `BRIGHT`           | `1` | `22`  |
/// | `FAINT`            | `2` | `22`  |
/// | `ITALIC`           | `3` | `23`  |
/// | `UNDERLINE`        | `4` | `24`  |
/// | `DOUBLE_UNDERLINE` | `21`| `24`  |
/// | `BLINK`            | `5`, `6` | `25` |
/// | `INVERSE`          | `7` | `27`  |
/// | `STRIKE`           | `9` | `29`  |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleFlags(u8);

impl StyleFlags {
    /// Bold or increased intensity.
    pub const BRIGHT: StyleFlags = StyleFlags(1 << 0);
    /// Decreased intensity.
    pub const FAINT: StyleFlags = StyleFlags(1 << 1);
    /// Italic.
    pub const ITALIC: StyleFlags = StyleFlags(1 << 2);
    /// Single underline.
    pub const UNDERLINE: StyleFlags = StyleFlags(1 << 3);
    /// Double underline.
    pub const DOUBLE_UNDERLINE: StyleFlags = StyleFlags(1 << 4);
    /// Blinking, slow or rapid.
    pub const BLINK: StyleFlags = StyleFlags(1 << 5);
    /// Foreground and background swapped.
    pub const INVERSE: StyleFlags = StyleFlags(1 << 6);
    /// Struck through.
    pub const STRIKE: StyleFlags = StyleFlags(1 << 7);

    /// No flags set.
    pub const fn empty() -> Self {
        StyleFlags(0)
    }

    /// Raw bit pattern.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every flag in `other` is set.
    pub const fn contains(self, other: StyleFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set the flags in `other`.
    pub fn insert(&mut self, other: StyleFlags) {
        self.0 |= other.0;
    }

    /// Clear the flags in `other`.
    pub fn remove(&mut self, other: StyleFlags) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for StyleFlags {
    type Output = StyleFlags;

    fn bitor(self, rhs: StyleFlags) -> StyleFlags {
        StyleFlags(self.0 | rhs.0)
    }
}

/// A colour outside the 16-colour palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtendedColor {
    /// A colour number from 16 to 255 of the xterm 256-colour palette.
    ///
    /// - Colours 16 to 231 are a 6x6x6 colour cube.
    /// - Colours 232 to 255 are shades of gray from black to white.
    Palette(u8),
    /// A 24-bit RGB colour, as specified by ISO-8613-3.
    Rgb(u8, u8, u8),
}

impl ExtendedColor {
    /// Resolve to an RGB triple.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            ExtendedColor::Rgb(r, g, b) => (r, g, b),
            ExtendedColor::Palette(index @ 16..=231) => {
                let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
                let index = index - 16;
                (level(index / 36), level((index / 6) % 6), level(index % 6))
            }
            ExtendedColor::Palette(index @ 232..=255) => {
                let gray = 8 + (index - 232) * 10;
                (gray, gray, gray)
            }
            ExtendedColor::Palette(index) => BASIC_RGB[usize::from(index)],
        }
    }
}

/// xterm defaults for the 16 basic colours.
const BASIC_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Names of the 8 basic colours, indexed by colour number.
pub const COLOR_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// Display attributes in effect for the next character written.
///
/// Only SGR processing mutates a `StyleState`. Two pairs of attributes are
/// mutually exclusive: bright and faint, and single and double underline.
///
/// ```rust
/// use mudlink_ansicodec::{StyleFlags, StyleState};
///
/// let mut style = StyleState::default();
/// style.apply_sgr(&[1, 31]);
/// assert!(style.flags.contains(StyleFlags::BRIGHT));
/// assert_eq!(style.fg, 1);
///
/// style.apply_sgr(&[]);
/// assert_eq!(style, StyleState::default());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleState {
    /// Attribute flags.
    pub flags: StyleFlags,
    /// Foreground colour index, 0 to 15.
    pub fg: u8,
    /// Background colour index, 0 to 15.
    pub bg: u8,
    /// Font index, 0 (primary) to 9.
    pub font: u8,
    /// Foreground from `38;5;N` or `38;2;R;G;B`, overriding `fg`.
    pub extended_fg: Option<ExtendedColor>,
    /// Background from `48;5;N` or `48;2;R;G;B`, overriding `bg`.
    pub extended_bg: Option<ExtendedColor>,
}

impl Default for StyleState {
    fn default() -> Self {
        StyleState {
            flags: StyleFlags::empty(),
            fg: DEFAULT_FOREGROUND,
            bg: DEFAULT_BACKGROUND,
            font: 0,
            extended_fg: None,
            extended_bg: None,
        }
    }
}

impl StyleState {
    /// Back to white on black with no attributes.
    pub fn reset(&mut self) {
        *self = StyleState::default();
    }

    /// Whether this is the reset state.
    pub fn is_default(&self) -> bool {
        *self == StyleState::default()
    }

    /// Apply SGR parameters left to right.
    ///
    /// An empty list, like `0`, resets everything. Unknown codes are
    /// ignored. `38`/`48` consume the parameters of their extended form.
    pub fn apply_sgr(&mut self, params: &[u16]) {
        if params.is_empty() {
            self.reset();
            return;
        }
        let mut i = 0;
        while i < params.len() {
            match params[i] {
                0 => self.reset(),

                1 => self.set_exclusive(StyleFlags::BRIGHT, StyleFlags::FAINT),
                2 => self.set_exclusive(StyleFlags::FAINT, StyleFlags::BRIGHT),
                3 => self.flags.insert(StyleFlags::ITALIC),
                4 => self.set_exclusive(StyleFlags::UNDERLINE, StyleFlags::DOUBLE_UNDERLINE),
                5 | 6 => self.flags.insert(StyleFlags::BLINK),
                7 => self.flags.insert(StyleFlags::INVERSE),
                9 => self.flags.insert(StyleFlags::STRIKE),
                code @ 10..=19 => self.font = (code - 10) as u8,
                21 => self.set_exclusive(StyleFlags::DOUBLE_UNDERLINE, StyleFlags::UNDERLINE),
                22 => self.flags.remove(StyleFlags::BRIGHT | StyleFlags::FAINT),
                23 => self.flags.remove(StyleFlags::ITALIC),
                24 => self
                    .flags
                    .remove(StyleFlags::UNDERLINE | StyleFlags::DOUBLE_UNDERLINE),
                25 => self.flags.remove(StyleFlags::BLINK),
                27 => self.flags.remove(StyleFlags::INVERSE),
                29 => self.flags.remove(StyleFlags::STRIKE),

                code @ 30..=37 => self.set_fg((code - 30) as u8),
                39 => self.set_fg(DEFAULT_FOREGROUND),
                code @ 40..=47 => self.set_bg((code - 40) as u8),
                49 => self.set_bg(DEFAULT_BACKGROUND),
                code @ 90..=97 => self.set_fg((code - 90) as u8 + 8),
                code @ 100..=107 => self.set_bg((code - 100) as u8 + 8),

                code @ (38 | 48) => {
                    let (color, used) = extended_color(&params[i + 1..]);
                    match (color, code) {
                        (Some(Ok(index)), 38) => self.set_fg(index),
                        (Some(Ok(index)), _) => self.set_bg(index),
                        (Some(Err(extended)), 38) => self.extended_fg = Some(extended),
                        (Some(Err(extended)), _) => self.extended_bg = Some(extended),
                        (None, _) => {}
                    }
                    i += used;
                }

                _ => {}
            }
            i += 1;
        }
    }

    /// Write the SGR sequence that turns a reset terminal into this style.
    pub fn write_sgr<W: fmt::Write>(&self, writer: &mut W) -> fmt::Result {
        let mut codes: Vec<String> = vec!["0".to_string()];
        let table = [
            (StyleFlags::BRIGHT, "1"),
            (StyleFlags::FAINT, "2"),
            (StyleFlags::ITALIC, "3"),
            (StyleFlags::UNDERLINE, "4"),
            (StyleFlags::BLINK, "5"),
            (StyleFlags::INVERSE, "7"),
            (StyleFlags::STRIKE, "9"),
            (StyleFlags::DOUBLE_UNDERLINE, "21"),
        ];
        codes.extend(
            table
                .iter()
                .filter(|(flag, _)| self.flags.contains(*flag))
                .map(|(_, code)| (*code).to_string()),
        );
        if self.font != 0 {
            codes.push((10 + u16::from(self.font)).to_string());
        }
        codes.push(color_code(self.fg, self.extended_fg, 30, 90, 38));
        codes.push(color_code(self.bg, self.extended_bg, 40, 100, 48));
        write!(writer, "\x1b[{}m", codes.join(";"))
    }

    fn set_exclusive(&mut self, on: StyleFlags, off: StyleFlags) {
        self.flags.remove(off);
        self.flags.insert(on);
    }

    fn set_fg(&mut self, index: u8) {
        self.fg = index;
        self.extended_fg = None;
    }

    fn set_bg(&mut self, index: u8) {
        self.bg = index;
        self.extended_bg = None;
    }
}

impl fmt::Display for StyleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_sgr(f)
    }
}

/// Decode the tail of a `38`/`48` code. Returns the colour (a basic index
/// as `Ok`, anything wider as `Err`) and the number of parameters used.
fn extended_color(rest: &[u16]) -> (Option<Result<u8, ExtendedColor>>, usize) {
    match rest {
        [5, n, ..] => match u8::try_from(*n) {
            Ok(index) if index < 16 => (Some(Ok(index)), 2),
            Ok(index) => (Some(Err(ExtendedColor::Palette(index))), 2),
            Err(_) => (None, 2),
        },
        [2, r, g, b, ..] => {
            let channel = |v: u16| u8::try_from(v).ok();
            match (channel(*r), channel(*g), channel(*b)) {
                (Some(r), Some(g), Some(b)) => (Some(Err(ExtendedColor::Rgb(r, g, b))), 4),
                _ => (None, 4),
            }
        }
        // Truncated extended form: swallow the rest rather than misreading it.
        [5 | 2, ..] => (None, rest.len()),
        _ => (None, 0),
    }
}

fn color_code(index: u8, extended: Option<ExtendedColor>, base: u8, bright: u8, ext: u8) -> String {
    match extended {
        Some(ExtendedColor::Palette(n)) => format!("{ext};5;{n}"),
        Some(ExtendedColor::Rgb(r, g, b)) => format!("{ext};2;{r};{g};{b}"),
        None if index < 8 => (base + index).to_string(),
        None => (bright + index - 8).to_string(),
    }
}
