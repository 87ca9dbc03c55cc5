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

//! Status-line templates
//!
//! Templates use `{0}`, `{1}`, ... for positional arguments and
//! `{name}` for named ones. `{{` and `}}` are literal braces. A
//! placeholder with no matching argument is left in place.

/// Connection attempt started.
pub const CONNECTING: &str = "Connecting to {host}:{port}...";
/// Connection established.
pub const CONNECTED: &str = "Connected to {host}:{port}.";
/// Connection closed, no retry.
pub const DISCONNECTED: &str = "Disconnected from {host}:{port}.";
/// Connection closed, retry scheduled.
pub const RECONNECTING: &str = "Disconnected from {host}:{port}. Reconnecting in {delay}s...";
/// The compressed stream could not be inflated.
pub const COMPRESSION_ERROR: &str = "Compression error: {0}. Continuing uncompressed.";
/// The server asked for an encoding we do not have.
pub const ENCODING_ERROR: &str = "Server selected an unsupported encoding: {0}";
/// The server is about to close the connection.
pub const SERVER_GOODBYE: &str = "Server says goodbye: {0}";

/// Substitute `positional` and `named` arguments into `template`.
///
/// ```
/// use mudlink_client::format::format_template;
///
/// let line = format_template("{0} hits {target} for {1}", &["Orc", "7"], &[("target", "you")]);
/// assert_eq!(line, "Orc hits you for 7");
/// ```
pub fn format_template(template: &str, positional: &[&str], named: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('{') {
            match tail.find('}') {
                Some(end) => {
                    let key = &tail[1..end];
                    match lookup(key, positional, named) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&tail[..=end]),
                    }
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        } else {
            out.push('}');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

fn lookup<'a>(key: &str, positional: &[&'a str], named: &[(&str, &'a str)]) -> Option<&'a str> {
    match key.parse::<usize>() {
        Ok(index) => positional.get(index).copied(),
        Err(_) => named
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value),
    }
}
