//! Terminal styling for CLI output
//!
//! Each fragment carries a [`Tone`]; the tone picks both the color and the
//! stream `owo-colors` checks for color support (`NO_COLOR`,
//! `CLICOLOR_FORCE` and TTY detection).

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::OnceLock;

pub use owo_colors::Stream;

/// Semantic role of a styled fragment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Identifiers the user may want to copy
    Accent,
    /// Completed steps
    Success,
    /// Failures
    Error,
    /// Retry hints
    Warn,
    /// Secondary detail
    Muted,
    /// Headers
    Emphasis,
}

impl Tone {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Success => Style::new().green(),
            Self::Error => Style::new().red(),
            Self::Warn => Style::new().yellow(),
            Self::Muted => Style::new().dimmed(),
            Self::Emphasis => Style::new().bold(),
        }
    }

    /// Failures and hints go to stderr, everything else to stdout
    const fn stream(self) -> Stream {
        match self {
            Self::Error | Self::Warn => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }
}

/// A displayable value tagged with a [`Tone`]
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    tone: Tone,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.tone.style();
        let painted = self
            .value
            .if_supports_color(self.tone.stream(), |v| v.style(style));
        write!(f, "{painted}")
    }
}

/// Semantic styling for anything that implements [`Display`]
pub trait Stylize: Display {
    /// Render with an explicit tone
    fn tone(&self, tone: Tone) -> Styled<&Self> {
        Styled { value: self, tone }
    }

    /// Cyan
    fn accent(&self) -> Styled<&Self> {
        self.tone(Tone::Accent)
    }

    /// Green
    fn success(&self) -> Styled<&Self> {
        self.tone(Tone::Success)
    }

    /// Red, rendered for stderr
    fn error(&self) -> Styled<&Self> {
        self.tone(Tone::Error)
    }

    /// Yellow, rendered for stderr
    fn warn(&self) -> Styled<&Self> {
        self.tone(Tone::Warn)
    }

    /// Dimmed
    fn muted(&self) -> Styled<&Self> {
        self.tone(Tone::Muted)
    }

    /// Bold
    fn emphasis(&self) -> Styled<&Self> {
        self.tone(Tone::Emphasis)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green check mark
pub const fn check() -> Styled<&'static str> {
    Styled {
        value: "✓",
        tone: Tone::Success,
    }
}

/// Red cross for stderr
pub const fn cross() -> Styled<&'static str> {
    Styled {
        value: "✗",
        tone: Tone::Error,
    }
}

/// Arrow for planned actions
pub const fn arrow() -> Styled<&'static str> {
    Styled {
        value: "→",
        tone: Tone::Accent,
    }
}

/// OSC 8 hyperlink for `url`, or the bare URL when unsupported
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner used while waiting on the hosting API
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}

/// First seven characters of a commit SHA
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
