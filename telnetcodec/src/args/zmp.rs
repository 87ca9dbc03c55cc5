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

//! Zenith Mud Protocol
//!
//! <http://discworld.starturtle.net/external/protocols/zmp.html>
//!
//! A ZMP payload is a command name followed by zero or more arguments, each
//! terminated by a NUL byte.

use crate::{TelnetError, TelnetOption, TelnetResult};

/// One ZMP command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZmpCommand {
    /// Dotted command name, e.g. `zmp.ping`.
    pub name: String,
    /// Command arguments.
    pub args: Vec<String>,
}

impl ZmpCommand {
    /// Build a command.
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        ZmpCommand {
            name: name.into(),
            args,
        }
    }

    /// Parse an unescaped ZMP payload.
    pub fn parse(payload: &[u8]) -> TelnetResult<ZmpCommand> {
        let Some(body) = payload.strip_suffix(&[0]) else {
            return Err(TelnetError::malformed(
                TelnetOption::ZMP,
                "payload is not NUL terminated",
            ));
        };
        let mut parts = body.split(|&b| b == 0).map(|part| {
            String::from_utf8(part.to_vec()).map_err(|_| TelnetError::InvalidUtf8 {
                option: TelnetOption::ZMP,
            })
        });
        let name = match parts.next() {
            Some(name) => name?,
            None => String::new(),
        };
        if name.is_empty() {
            return Err(TelnetError::malformed(TelnetOption::ZMP, "empty command name"));
        }
        Ok(ZmpCommand {
            name,
            args: parts.collect::<TelnetResult<_>>()?,
        })
    }

    /// Whether the command belongs to `package` (e.g. `zmp` for `zmp.ping`).
    pub fn in_package(&self, package: &str) -> bool {
        self.name
            .strip_prefix(package)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
    }

    /// Unescaped payload bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.name.len() + 1);
        out.extend_from_slice(self.name.as_bytes());
        out.push(0);
        for arg in &self.args {
            out.extend_from_slice(arg.as_bytes());
            out.push(0);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_args() {
        let cmd = ZmpCommand::parse(b"zmp.check\0color.define\0").unwrap();
        assert_eq!(cmd.name, "zmp.check");
        assert_eq!(cmd.args, vec!["color.define".to_string()]);
    }

    #[test]
    fn test_parse_without_args() {
        let cmd = ZmpCommand::parse(b"zmp.ping\0").unwrap();
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_parse_requires_terminator() {
        assert!(ZmpCommand::parse(b"zmp.ping").is_err());
        assert!(ZmpCommand::parse(b"\0").is_err());
    }

    #[test]
    fn test_to_bytes() {
        let cmd = ZmpCommand::new("zmp.time", vec!["2026-01-01 00:00:00.000".into()]);
        assert_eq!(cmd.to_bytes(), b"zmp.time\02026-01-01 00:00:00.000\0".to_vec());
    }

    #[test]
    fn test_in_package() {
        let cmd = ZmpCommand::new("zmp.ping", Vec::new());
        assert!(cmd.in_package("zmp"));
        assert!(!cmd.in_package("zm"));
    }
}
