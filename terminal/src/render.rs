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

//! HTML output framing
//!
//! Consumers that collapse whitespace would destroy the column layout MUDs
//! rely on, so runs of spaces alternate between a plain space and
//! `&nbsp;`. Styles become CSS classes:
//!
//! | Class                           | Source                          |
//! |---------------------------------|---------------------------------|
//! | `fg-red`, `bg-bright-blue`, ... | basic 16-colour indices         |
//! | `fg-256-196`                    | `38;5;196`                      |
//! | `style="color:#ff8000"`         | `38;2;255;128;0` (inline)       |
//! | `bright`, `italic`, ...         | attribute flags                 |
//! | `font-3`                        | alternate fonts                 |

use crate::DisplayEvent;
use mudlink_ansicodec::{
    COLOR_NAMES, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, ExtendedColor, StyleFlags, StyleState,
};
use std::fmt::Write;

const FLAG_CLASSES: [(StyleFlags, &str); 8] = [
    (StyleFlags::BRIGHT, "bright"),
    (StyleFlags::FAINT, "faint"),
    (StyleFlags::ITALIC, "italic"),
    (StyleFlags::UNDERLINE, "underline"),
    (StyleFlags::DOUBLE_UNDERLINE, "double-underline"),
    (StyleFlags::BLINK, "blink"),
    (StyleFlags::INVERSE, "inverse"),
    (StyleFlags::STRIKE, "strike"),
];

/// Make text safe for HTML while keeping its layout.
///
/// ```rust
/// use mudlink_terminal::render::escape_text;
///
/// assert_eq!(escape_text("a  <b>"), "a &nbsp;&lt;b>");
/// assert_eq!(escape_text("x\ny"), "x<br>y");
/// ```
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '<' => out.push_str("&lt;"),
            '&' => out.push_str("&amp;"),
            '\n' => out.push_str("<br>"),
            ' ' if chars.peek() == Some(&' ') => {
                let mut literal = true;
                out.push(' ');
                while chars.next_if_eq(&' ').is_some() {
                    literal = !literal;
                    out.push_str(if literal { " " } else { "&nbsp;" });
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// CSS classes and inline style for a run.
pub fn style_attributes(style: &StyleState) -> (Vec<String>, Option<String>) {
    let mut classes = Vec::new();
    let mut inline = Vec::new();
    color_attribute(
        ("fg", "color"),
        (style.fg, DEFAULT_FOREGROUND),
        style.extended_fg,
        &mut classes,
        &mut inline,
    );
    color_attribute(
        ("bg", "background-color"),
        (style.bg, DEFAULT_BACKGROUND),
        style.extended_bg,
        &mut classes,
        &mut inline,
    );
    classes.extend(
        FLAG_CLASSES
            .iter()
            .filter(|(flag, _)| style.flags.contains(*flag))
            .map(|(_, name)| (*name).to_string()),
    );
    if style.font != 0 {
        classes.push(format!("font-{}", style.font));
    }
    let inline = (!inline.is_empty()).then(|| inline.join(";"));
    (classes, inline)
}

/// Render display events as an HTML fragment.
///
/// Runs in the default style are written bare; others are wrapped in a
/// `<span>`. Only runs and line breaks produce markup.
pub fn to_html(events: &[DisplayEvent]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            DisplayEvent::Run(run) => {
                let text = escape_text(&run.text);
                let (classes, inline) = style_attributes(&run.style);
                if classes.is_empty() && inline.is_none() {
                    out.push_str(&text);
                    continue;
                }
                out.push_str("<span");
                if !classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", classes.join(" "));
                }
                if let Some(inline) = inline {
                    let _ = write!(out, " style=\"{inline}\"");
                }
                let _ = write!(out, ">{text}</span>");
            }
            DisplayEvent::LineBreak => out.push_str("<br>"),
            DisplayEvent::Clear
            | DisplayEvent::EraseLine
            | DisplayEvent::Evict(_)
            | DisplayEvent::Bell => {}
        }
    }
    out
}

fn color_attribute(
    (prefix, property): (&str, &str),
    (index, default): (u8, u8),
    extended: Option<ExtendedColor>,
    classes: &mut Vec<String>,
    inline: &mut Vec<String>,
) {
    match extended {
        Some(ExtendedColor::Palette(n)) => classes.push(format!("{prefix}-256-{n}")),
        Some(rgb @ ExtendedColor::Rgb(..)) => {
            let (r, g, b) = rgb.to_rgb();
            inline.push(format!("{property}:#{r:02x}{g:02x}{b:02x}"));
        }
        None if index == default => {}
        None if index < 8 => {
            classes.push(format!("{prefix}-{}", COLOR_NAMES[usize::from(index)]));
        }
        None => classes.push(format!(
            "{prefix}-bright-{}",
            COLOR_NAMES[usize::from(index % 8)]
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyledRun;

    #[test]
    fn test_escape_specials() {
        assert_eq!(escape_text("a<b & c"), "a&lt;b &amp; c");
    }

    #[test]
    fn test_space_runs_alternate() {
        assert_eq!(escape_text("a b"), "a b");
        assert_eq!(escape_text("a  b"), "a &nbsp;b");
        assert_eq!(escape_text("a    b"), "a &nbsp; &nbsp;b");
        assert_eq!(escape_text("   "), " &nbsp; ");
    }

    #[test]
    fn test_to_html() {
        let red = StyleState {
            fg: 1,
            ..StyleState::default()
        };
        let html = to_html(&[
            DisplayEvent::Run(StyledRun::new("Hello ", StyleState::default())),
            DisplayEvent::Run(StyledRun::new("Red", red)),
            DisplayEvent::LineBreak,
            DisplayEvent::Evict(3),
        ]);
        assert_eq!(html, "Hello <span class=\"fg-red\">Red</span><br>");
    }

    #[test]
    fn test_style_attributes() {
        let mut style = StyleState::default();
        style.apply_sgr(&[1, 4, 94, 48, 2, 255, 128, 0, 12]);
        let (classes, inline) = style_attributes(&style);
        assert_eq!(classes, vec!["fg-bright-blue", "bright", "underline", "font-2"]);
        assert_eq!(inline.as_deref(), Some("background-color:#ff8000"));

        style.apply_sgr(&[0, 38, 5, 202]);
        assert_eq!(style_attributes(&style).0, vec!["fg-256-202"]);
    }
}
