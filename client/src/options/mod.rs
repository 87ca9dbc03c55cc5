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

//! Per-option negotiation handlers bound into the session negotiator.

mod charset;
mod compress2;
mod echo;
mod gmcp;
mod msdp;
mod naws;
mod ttype;
mod zmp;

use crate::gmcp::GmcpRouter;
use crate::session::Host;
use crate::ClientConfig;
use mudlink_telnetcodec::OptionNegotiator;
use mudlink_telnetcodec::consts::option;

pub(crate) use self::naws::report_window_size;

/// Negotiator with every option this client speaks.
pub(crate) fn negotiator(config: &ClientConfig, router: GmcpRouter) -> OptionNegotiator<Host> {
    OptionNegotiator::builder()
        .bind(option::ECHO, Box::new(echo::EchoHandler::default()))
        .accept(option::SGA)
        .bind(
            option::TTYPE,
            Box::new(ttype::TtypeHandler::new(config.terminal_types.clone())),
        )
        .accept(option::EOR)
        .bind(option::NAWS, Box::new(naws::NawsHandler))
        .bind(option::CHARSET, Box::new(charset::CharsetHandler))
        .bind(option::MSDP, Box::new(msdp::MsdpHandler))
        .bind(option::COMPRESS2, Box::<compress2::Compress2Handler>::default())
        .bind(option::ZMP, Box::new(zmp::ZmpHandler))
        .bind(option::GMCP, Box::new(gmcp::GmcpHandler::new(config, router)))
        .build()
}
