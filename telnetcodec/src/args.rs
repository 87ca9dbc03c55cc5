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

//! Typed subnegotiation payloads.
//!
//! Every parser here takes the payload exactly as [`crate::Frame::Subnegotiation`]
//! delivers it (already unescaped) and every `to_bytes` produces an unescaped
//! payload for [`crate::TelnetEncoder::subnegotiate`].

pub mod charset;
/// GMCP (Generic Mud Communication Protocol) messages
pub mod gmcp;
pub mod msdp;
pub mod naws;
pub mod ttype;
pub mod zmp;
