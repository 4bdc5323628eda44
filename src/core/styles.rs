//! Terminal styling for help and error output
//!
//! Roles name what a piece of text is; the palette decides how it looks.
//! Nothing is colored unless the caller says the stream supports it.

use clap::builder::styling::{AnsiColor, Style, Styles};
use colored::{Color, Colorize};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StyleRole {
    /// Section headings in `--help`
    Header,
    /// Flags and check names
    Literal,
    /// Value placeholders such as `FILE`
    Placeholder,
    /// Error prefixes
    Error,
}

impl StyleRole {
    fn palette(self) -> (Color, AnsiColor) {
        match self {
            StyleRole::Header => (Color::Yellow, AnsiColor::Yellow),
            StyleRole::Literal => (Color::Cyan, AnsiColor::Cyan),
            StyleRole::Placeholder => (Color::Green, AnsiColor::Green),
            StyleRole::Error => (Color::BrightRed, AnsiColor::BrightRed),
        }
    }

    pub fn color(self) -> Color {
        self.palette().0
    }

    /// `text` in this role's color, or unchanged when `enabled` is false
    pub fn paint(self, text: &str, enabled: bool) -> String {
        if enabled {
            text.color(self.color()).to_string()
        } else {
            text.to_string()
        }
    }

    fn clap_style(self) -> Style {
        Style::new().fg_color(Some(self.palette().1.into()))
    }
}

/// clap help styles built from the palette; plain when disabled
pub fn palette_to_clap(enabled: bool) -> Styles {
    if !enabled {
        return Styles::plain();
    }
    Styles::styled()
        .header(StyleRole::Header.clap_style().bold())
        .usage(StyleRole::Header.clap_style().bold())
        .literal(StyleRole::Literal.clap_style())
        .placeholder(StyleRole::Placeholder.clap_style())
        .invalid(StyleRole::Error.clap_style())
        .error(StyleRole::Error.clap_style().bold())
}
