//! Glyph width table: per-character pixel metrics
//!
//! Text fitting needs to know how wide the renderer draws each character.
//! The table is loaded once from a plain-text resource with one
//! `<char><width>` entry per line (e.g. `A5`); every character gets one
//! extra pixel of inter-character spacing, so its advance is width + 1.

use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

/// Width assumed for characters missing from the table
pub const DEFAULT_WIDTH: u32 = 6;

/// Advance assumed for characters missing from the table
pub const DEFAULT_ADVANCE: u32 = 7;

/// Errors from loading a glyph width resource
#[derive(Debug, Error)]
pub enum GlyphTableError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed width entry
    #[error("Parse error on line {line}: {entry:?}")]
    Parse {
        /// 1-based line number of the bad entry
        line: usize,
        /// The offending line text
        entry: String,
    },
}

/// Maps a character to its rendered pixel width and advance
pub trait GlyphMetrics {
    /// Pixel width of a character
    fn width(&self, c: char) -> u32;

    /// Pixel width plus trailing inter-character spacing
    fn advance(&self, c: char) -> u32;

    /// Sum of advances over a string
    fn string_advance(&self, text: &str) -> u32 {
        text.chars().map(|c| self.advance(c)).sum()
    }

    /// Measured pixel width of a block of text
    ///
    /// Per line: advances for all but the last character plus the plain
    /// width of the last one, so trailing spacing is not over-counted.
    /// Multi-line text measures as its widest line.
    fn measure(&self, text: &str) -> u32 {
        text.lines()
            .map(|line| {
                let mut chars = line.chars().peekable();
                let mut total = 0;
                while let Some(c) = chars.next() {
                    total += if chars.peek().is_some() {
                        self.advance(c)
                    } else {
                        self.width(c)
                    };
                }
                total
            })
            .max()
            .unwrap_or(0)
    }
}

/// Character width table backed by a loaded resource
#[derive(Debug, Clone, Default)]
pub struct GlyphWidthTable {
    widths: HashMap<char, u32>,
}

impl GlyphWidthTable {
    /// Create an empty table where every character uses the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the width entry for a character
    pub fn set_width(&mut self, c: char, width: u32) {
        self.widths.insert(c, width);
    }

    /// Parse a table from resource text, one `<char><width>` entry per line
    ///
    /// Blank lines are skipped; a line whose remainder is not an integer is
    /// a parse error.
    pub fn parse(contents: &str) -> Result<Self, GlyphTableError> {
        let mut table = Self::new();
        for (index, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let mut chars = line.chars();
            let c = chars.next().ok_or_else(|| GlyphTableError::Parse {
                line: index + 1,
                entry: line.to_string(),
            })?;
            let width = chars.as_str().trim().parse().map_err(|_| {
                warn!("malformed glyph width entry on line {}: {line:?}", index + 1);
                GlyphTableError::Parse {
                    line: index + 1,
                    entry: line.to_string(),
                }
            })?;
            table.widths.insert(c, width);
        }
        Ok(table)
    }

    /// Load a table from a resource file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, GlyphTableError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let table = Self::parse(contents.as_str())?;
        info!(
            "loaded {} glyph widths from {}",
            table.widths.len(),
            path.as_ref().display()
        );
        Ok(table)
    }
}

impl GlyphMetrics for GlyphWidthTable {
    fn width(&self, c: char) -> u32 {
        self.widths.get(&c).copied().unwrap_or(DEFAULT_WIDTH)
    }

    fn advance(&self, c: char) -> u32 {
        // One pixel of spacing after every character
        self.widths
            .get(&c)
            .map_or(DEFAULT_ADVANCE, |width| width + 1)
    }
}
