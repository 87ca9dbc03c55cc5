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

//! # mudlink Client
//!
//! The per-connection core of a MUD client and a Tokio driver around it.
//!
//! ## Features
//!
//! - **Option Negotiation** - NAWS, TTYPE, CHARSET, MCCP2, GMCP, MSDP, ZMP and ECHO
//! - **Transparent Pipeline** - Decompression and character decoding happen before the terminal sees a byte
//! - **Styled Output** - ANSI text arrives as styled runs with bounded scrollback
//! - **Reconnection Support** - Automatic reconnection with configurable retry logic
//! - **Event-Driven** - Handler-based API for processing server events
//!
//! ## Sans-IO Session
//!
//! [`Session`] does no I/O. Feed it whatever the socket produced and ship
//! whatever it queued:
//!
//! ```
//! use mudlink_client::{ClientConfig, Session, SessionEvent};
//!
//! let mut session = Session::new(&ClientConfig::default()).unwrap();
//! session.connect();
//!
//! // Server offers to suppress go-ahead, then prints a red prompt.
//! let events = session.on_bytes(b"\xFF\xFB\x03\x1b[31m> \x1b[0m");
//! assert!(matches!(&events[..], [SessionEvent::Output(_)]));
//! assert_eq!(&session.take_outbound()[..], b"\xFF\xFD\x03");
//! ```
//!
//! ## Async Client
//!
//! ```no_run
//! use async_trait::async_trait;
//! use mudlink_client::{ClientCommand, ClientConfig, ClientHandler, TerminalClient};
//! use mudlink_terminal::render::to_html;
//! use mudlink_terminal::DisplayEvent;
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl ClientHandler for Printer {
//!     async fn on_output(&self, display: &[DisplayEvent]) {
//!         print!("{}", to_html(display));
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("localhost", 4000).with_auto_reconnect(true);
//!     let (mut client, commands) = TerminalClient::new(config);
//!     commands.send(ClientCommand::Send("look".into())).await?;
//!     client.run(Arc::new(Printer)).await?;
//!     Ok(())
//! }
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
    clippy::missing_panics_doc
)]

mod client;
mod config;
mod error;
mod event;
pub mod format;
pub mod gmcp;
mod handler;
mod options;
mod session;

pub use self::client::{ClientCommand, TerminalClient};
pub use self::config::ClientConfig;
pub use self::error::{ClientError, ClientResult};
pub use self::event::{ConnectionEvent, SessionEvent};
pub use self::handler::ClientHandler;
pub use self::session::{Session, ViewportProvider};
