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

//! # ANSI Sequences for MUD Output
//!
//! A streaming parser for the escape sequences MUD servers embed in their
//! output, and the [`StyleState`] that SGR codes drive.
//!
//! ```rust
//! use mudlink_ansicodec::{AnsiParser, AnsiSequence, StyleState};
//!
//! let mut parser = AnsiParser::new();
//! let mut style = StyleState::default();
//! for sequence in parser.feed("\x1b[1;32mOk\x1b[0m") {
//!     match sequence {
//!         AnsiSequence::Csi(csi) if csi.is_sgr() => style.apply_sgr(&csi.sgr_params()),
//!         AnsiSequence::Text(text) => assert_eq!((text.as_str(), style.fg), ("Ok", 2)),
//!         _ => {}
//!     }
//! }
//! assert!(style.is_default());
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation
)]

mod consts;
mod parser;
mod result;
mod style;

pub use self::consts::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, MAX_SEQUENCE_LENGTH};
pub use self::parser::{AnsiParser, AnsiSequence, ControlSequence};
pub use self::result::{AnsiError, AnsiResult};
pub use self::style::{COLOR_NAMES, ExtendedColor, StyleFlags, StyleState};
