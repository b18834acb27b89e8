//! Console text styling.
//!
//! Rendering code never talks to the terminal directly; it asks a [`Styler`] to
//! paint a piece of text with a [`Tone`]. [`detect`] picks the ANSI styler when
//! stdout can show colors and the plain one otherwise.

use std::io::IsTerminal;

use crossterm::style::{Stylize, style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Info,
    Alert,
    Notice,
    Match,
}

pub trait Styler {
    fn paint(&self, text: &str, tone: Tone) -> String;
}

pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn paint(&self, text: &str, tone: Tone) -> String {
        let text = style(text);
        match tone {
            Tone::Heading => text.red().bold().to_string(),
            Tone::Info => text.cyan().to_string(),
            Tone::Alert | Tone::Match => text.red().to_string(),
            Tone::Notice => text.yellow().to_string(),
        }
    }
}

pub struct PlainStyler;

impl Styler for PlainStyler {
    fn paint(&self, text: &str, _tone: Tone) -> String {
        text.to_string()
    }
}

/// Choose a styler for stdout. `force_plain` comes from `--no-color`.
pub fn detect(force_plain: bool) -> Box<dyn Styler> {
    let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    let dumb = std::env::var("TERM").is_ok_and(|t| t == "dumb");
    if colors_enabled(force_plain, no_color_env, dumb, std::io::stdout().is_terminal()) {
        Box::new(AnsiStyler)
    } else {
        tracing::debug!("console colors disabled");
        Box::new(PlainStyler)
    }
}

fn colors_enabled(force_plain: bool, no_color_env: bool, dumb_term: bool, tty: bool) -> bool {
    tty && !force_plain && !no_color_env && !dumb_term
}
