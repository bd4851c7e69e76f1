//! Output types
//!
//! The render format is a closed set; each variant maps to a fixed `-T`
//! argument so user input is never passed to the layout tool.

use crate::error::RenderError;
use std::fmt;
use std::str::FromStr;

/// Formats the layout tool is allowed to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderFormat {
    Ps,
    Pdf,
    Svg,
    Png,
    Gif,
    Jpg,
}

impl RenderFormat {
    pub const ALL: [RenderFormat; 6] = [
        RenderFormat::Ps,
        RenderFormat::Pdf,
        RenderFormat::Svg,
        RenderFormat::Png,
        RenderFormat::Gif,
        RenderFormat::Jpg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Ps => "ps",
            RenderFormat::Pdf => "pdf",
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
            RenderFormat::Gif => "gif",
            RenderFormat::Jpg => "jpg",
        }
    }

    /// Argument selecting this format, ex) `-Tpng`
    pub fn arg(&self) -> &'static str {
        match self {
            RenderFormat::Ps => "-Tps",
            RenderFormat::Pdf => "-Tpdf",
            RenderFormat::Svg => "-Tsvg",
            RenderFormat::Png => "-Tpng",
            RenderFormat::Gif => "-Tgif",
            RenderFormat::Jpg => "-Tjpg",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| RenderError::UnsupportedFormat(s.to_string()))
    }
}

/// What to write to the output file: DOT text or a rendered image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputType {
    #[default]
    Dot,
    Render(RenderFormat),
}

impl OutputType {
    /// Every accepted `--type` value
    pub fn names() -> impl Iterator<Item = &'static str> {
        std::iter::once("dot").chain(RenderFormat::ALL.into_iter().map(|f| f.as_str()))
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputType::Dot => f.write_str("dot"),
            OutputType::Render(format) => fmt::Display::fmt(format, f),
        }
    }
}

impl FromStr for OutputType {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" => Ok(OutputType::Dot),
            other => other.parse().map(OutputType::Render),
        }
    }
}
