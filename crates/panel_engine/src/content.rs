//! Content providers: the external source of a surface's text
//!
//! The engine never produces text itself. Each frame a surface asks its
//! provider for a string sized to a character grid and renders whatever comes
//! back.

/// Supplies the text a surface displays
///
/// Implementations must be cheap: the provider is queried once per surface
/// per tick with the character grid the surface can currently fit.
pub trait ContentProvider {
    /// Produce the content for a grid of `char_width` x `char_height`
    /// characters; may contain newlines
    fn content(&self, char_width: u32, char_height: u32) -> String;
}

/// A provider that always returns the same text
///
/// Useful for labels, previews, and tests.
#[derive(Debug, Clone)]
pub struct StaticContent {
    text: String,
}

impl StaticContent {
    /// Create a provider serving a fixed string
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ContentProvider for StaticContent {
    fn content(&self, _char_width: u32, _char_height: u32) -> String {
        self.text.clone()
    }
}

impl<F> ContentProvider for F
where
    F: Fn(u32, u32) -> String,
{
    fn content(&self, char_width: u32, char_height: u32) -> String {
        self(char_width, char_height)
    }
}
