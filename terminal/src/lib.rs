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

//! # Append-only Terminal for MUD Output
//!
//! [`AnsiTerminalEngine`] consumes decoded server text and produces
//! [`DisplayEvent`]s: styled runs, line breaks and the few screen-level
//! effects MUDs rely on. A bounded [`Scrollback`] keeps the rendered
//! history and tells the display when to drop old lines.
//!
//! ```rust
//! use mudlink_terminal::{AnsiTerminalEngine, DisplayEvent, ScrollbackConfig, render};
//!
//! let mut engine = AnsiTerminalEngine::new(ScrollbackConfig::default()).unwrap();
//! let events = engine.feed("HP: \x1b[32m100\x1b[0m\r\n");
//! assert_eq!(events.last(), Some(&DisplayEvent::LineBreak));
//! assert_eq!(
//!     render::to_html(&events),
//!     "HP: <span class=\"fg-green\">100</span><br>"
//! );
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod engine;
pub mod render;
mod result;
mod scrollback;
mod types;

pub use self::engine::AnsiTerminalEngine;
pub use self::result::{TerminalError, TerminalResult};
pub use self::scrollback::{Scrollback, ScrollbackConfig};
pub use self::types::{DisplayEvent, StyledRun};
pub use mudlink_ansicodec::{ExtendedColor, StyleFlags, StyleState};
