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

use crate::{OptionState, TelnetCommand, TelnetOption, TelnetSide, consts};
use bytes::BytesMut;
use std::time::Instant;
use tracing::{debug, trace};

///
/// Outbound sink for raw Telnet bytes.
///
/// Everything the negotiator and option handlers put on the wire goes
/// through here. Writes are fire-and-forget.
///
pub trait IacSink {
    /// Queue `bytes` for the transport exactly as given.
    fn send_iac(&mut self, bytes: &[u8]);
}

impl IacSink for Vec<u8> {
    fn send_iac(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl IacSink for BytesMut {
    fn send_iac(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// A handler's answer to a negotiation request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reply {
    /// Agree. For WONT/DONT this means "acknowledge".
    Accept,
    /// Refuse. WONT/DONT are acknowledged regardless.
    Decline,
    /// Agree, but the handler has written (or will write) the reply itself.
    Suppress,
}

/// Whether a subnegotiation callback fully dealt with its payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Handled {
    /// The payload was consumed.
    Yes,
    /// The payload was not understood and should be traced.
    No,
}

///
/// Callbacks for one Telnet option.
///
/// `H` is the per-connection host the handler works against; it is always
/// an [`IacSink`] and usually carries whatever else the option touches
/// (viewport size, codec, compression stage, event queue).
///
/// Every method has a default: requests are declined, refusals acknowledged
/// and everything else ignored.
///
pub trait OptionCallbacks<H>: Send {
    /// Server offered to perform the option.
    fn on_will(&mut self, _host: &mut H) -> Reply {
        Reply::Decline
    }

    /// Server stopped or refused performing the option.
    fn on_wont(&mut self, _host: &mut H) -> Reply {
        Reply::Accept
    }

    /// Server asked us to perform the option.
    fn on_do(&mut self, _host: &mut H) -> Reply {
        Reply::Decline
    }

    /// Server asked us to stop performing the option.
    fn on_dont(&mut self, _host: &mut H) -> Reply {
        Reply::Accept
    }

    /// A subnegotiation payload arrived for the option.
    fn on_subnegotiation(&mut self, _host: &mut H, _payload: &[u8]) -> Handled {
        Handled::No
    }

    /// Transport connected.
    fn on_connect(&mut self, _host: &mut H) {}

    /// Transport disconnected. Timers must be cancelled here.
    fn on_disconnect(&mut self, _host: &mut H) {}

    /// Earliest instant at which [`OptionCallbacks::on_timer`] wants to run.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    /// Called once `now` has reached [`OptionCallbacks::next_deadline`].
    fn on_timer(&mut self, _host: &mut H, _now: Instant) {}
}

///
/// Registry entry for one option code.
///
pub enum OptionHandler<H> {
    /// Full callback implementation.
    Bound(Box<dyn OptionCallbacks<H>>),
    /// Agree to the option with no further behaviour.
    AlwaysAccept,
    /// Refuse the option. Same as having no entry at all.
    AlwaysReject,
}

impl<H> std::fmt::Debug for OptionHandler<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionHandler::Bound(_) => write!(f, "Bound"),
            OptionHandler::AlwaysAccept => write!(f, "AlwaysAccept"),
            OptionHandler::AlwaysReject => write!(f, "AlwaysReject"),
        }
    }
}

///
/// Tracks per-option state and routes negotiation traffic to handlers.
///
/// Options without a handler are refused (`DO` gets `WONT`, `WILL` gets
/// `DONT`). Handlers are registered once through [`OptionNegotiator::builder`]
/// and live as long as the negotiator.
///
pub struct OptionNegotiator<H> {
    handlers: Vec<Option<OptionHandler<H>>>,
    states: Vec<Option<OptionState>>,
}

/// Constructor-time handler registration for [`OptionNegotiator`].
pub struct OptionNegotiatorBuilder<H> {
    handlers: Vec<Option<OptionHandler<H>>>,
}

impl<H> OptionNegotiatorBuilder<H> {
    /// Register full callbacks for `option`.
    pub fn bind(mut self, option: u8, callbacks: Box<dyn OptionCallbacks<H>>) -> Self {
        self.handlers[option as usize] = Some(OptionHandler::Bound(callbacks));
        self
    }

    /// Agree to `option` without callbacks.
    pub fn accept(mut self, option: u8) -> Self {
        self.handlers[option as usize] = Some(OptionHandler::AlwaysAccept);
        self
    }

    /// Explicitly refuse `option`.
    pub fn reject(mut self, option: u8) -> Self {
        self.handlers[option as usize] = Some(OptionHandler::AlwaysReject);
        self
    }

    /// Finish registration.
    pub fn build(self) -> OptionNegotiator<H> {
        OptionNegotiator {
            handlers: self.handlers,
            states: (0..=u8::MAX).map(|_| None).collect(),
        }
    }
}

impl<H: IacSink> OptionNegotiator<H> {
    /// Start registering handlers.
    pub fn builder() -> OptionNegotiatorBuilder<H> {
        OptionNegotiatorBuilder {
            handlers: (0..=u8::MAX).map(|_| None).collect(),
        }
    }

    /// Current state of `option`. Options never negotiated report all-false.
    pub fn state(&self, option: u8) -> OptionState {
        self.states[option as usize].unwrap_or_default()
    }

    /// Whether `option` is enabled on `side`.
    pub fn is_enabled(&self, option: u8, side: TelnetSide) -> bool {
        self.state(option).enabled(side)
    }

    /// Handle `IAC <command> <option>` from the server.
    pub fn handle_command(&mut self, host: &mut H, command: TelnetCommand, option: u8) {
        let side = command.side();
        let state = self.states[option as usize].get_or_insert_with(OptionState::default);
        let handler = &mut self.handlers[option as usize];
        debug!("Received {} {}", command, TelnetOption::from_u8(option));

        match command {
            TelnetCommand::Will | TelnetCommand::Do => {
                if state.enabled(side) {
                    trace!("{} already enabled on {} side", TelnetOption::from_u8(option), side);
                    return;
                }
                let requested = match side {
                    TelnetSide::Local => state.want_local,
                    TelnetSide::Remote => state.want_remote,
                };
                let reply = match handler {
                    None | Some(OptionHandler::AlwaysReject) => Reply::Decline,
                    Some(OptionHandler::AlwaysAccept) => Reply::Accept,
                    Some(OptionHandler::Bound(callbacks)) => match command {
                        TelnetCommand::Will => callbacks.on_will(host),
                        _ => callbacks.on_do(host),
                    },
                };
                match reply {
                    Reply::Accept => {
                        state.set_enabled(side, true);
                        if !requested {
                            send_command(host, positive(side), option);
                        }
                    }
                    Reply::Suppress => state.set_enabled(side, true),
                    Reply::Decline => {
                        state.set_enabled(side, false);
                        send_command(host, negative(side), option);
                    }
                }
            }
            TelnetCommand::Wont | TelnetCommand::Dont => {
                let requested = match side {
                    TelnetSide::Local => state.want_local,
                    TelnetSide::Remote => state.want_remote,
                };
                let reply = match handler {
                    Some(OptionHandler::Bound(callbacks)) => match command {
                        TelnetCommand::Wont => callbacks.on_wont(host),
                        _ => callbacks.on_dont(host),
                    },
                    _ => Reply::Accept,
                };
                state.set_enabled(side, false);
                // A refusal answering our own request needs no acknowledgement.
                if reply != Reply::Suppress && !requested {
                    send_command(host, negative(side), option);
                }
            }
        }
    }

    /// Handle `IAC SB <option> <payload> IAC SE` from the server.
    pub fn handle_subnegotiation(&mut self, host: &mut H, option: u8, payload: &[u8]) {
        if let Some(OptionHandler::Bound(callbacks)) = &mut self.handlers[option as usize] {
            if callbacks.on_subnegotiation(host, payload) == Handled::Yes {
                return;
            }
        }
        debug!(
            "Unhandled subnegotiation {}: {:02X?}",
            TelnetOption::from_u8(option),
            payload
        );
    }

    /// Offer to perform `option` ourselves (`IAC WILL`).
    pub fn request_local(&mut self, host: &mut H, option: u8) {
        let state = self.states[option as usize].get_or_insert_with(OptionState::default);
        if state.enabled_local || state.want_local {
            return;
        }
        state.want_local = true;
        send_command(host, TelnetCommand::Will, option);
    }

    /// Ask the server to perform `option` (`IAC DO`).
    pub fn request_remote(&mut self, host: &mut H, option: u8) {
        let state = self.states[option as usize].get_or_insert_with(OptionState::default);
        if state.enabled_remote || state.want_remote {
            return;
        }
        state.want_remote = true;
        send_command(host, TelnetCommand::Do, option);
    }

    /// Broadcast a transport connect to every bound handler.
    pub fn connect(&mut self, host: &mut H) {
        for callbacks in self.bound_mut() {
            callbacks.on_connect(host);
        }
    }

    /// Broadcast a transport disconnect and forget all negotiated state.
    pub fn disconnect(&mut self, host: &mut H) {
        for callbacks in self.bound_mut() {
            callbacks.on_disconnect(host);
        }
        for state in self.states.iter_mut().flatten() {
            state.reset();
        }
    }

    /// Earliest pending handler deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.handlers
            .iter()
            .filter_map(|handler| match handler {
                Some(OptionHandler::Bound(callbacks)) => callbacks.next_deadline(),
                _ => None,
            })
            .min()
    }

    /// Fire every handler timer that is due at `now`.
    pub fn poll_timers(&mut self, host: &mut H, now: Instant) {
        for callbacks in self.bound_mut() {
            if callbacks.next_deadline().is_some_and(|deadline| deadline <= now) {
                callbacks.on_timer(host, now);
            }
        }
    }

    fn bound_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn OptionCallbacks<H>>> {
        self.handlers.iter_mut().filter_map(|handler| match handler {
            Some(OptionHandler::Bound(callbacks)) => Some(callbacks),
            _ => None,
        })
    }
}

fn positive(side: TelnetSide) -> TelnetCommand {
    match side {
        TelnetSide::Local => TelnetCommand::Will,
        TelnetSide::Remote => TelnetCommand::Do,
    }
}

fn negative(side: TelnetSide) -> TelnetCommand {
    match side {
        TelnetSide::Local => TelnetCommand::Wont,
        TelnetSide::Remote => TelnetCommand::Dont,
    }
}

fn send_command<H: IacSink>(host: &mut H, command: TelnetCommand, option: u8) {
    trace!("Sending {} {}", command, TelnetOption::from_u8(option));
    host.send_iac(&[consts::IAC, command.to_u8(), option]);
}
