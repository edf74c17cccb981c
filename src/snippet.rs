//! rustc-like rendering of a parse error against its tag.

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet, renderer::DecorStyle};

use crate::Error;

/// Columns kept on each side of the error when the tag is very long.
const CROP_RADIUS: usize = 64;

impl Error {
    /// Render the error as an annotated snippet of the tag, with a caret under
    /// the failing character.
    ///
    /// ```rust
    /// let err = tagparser::parse("min=5,max=1'0").unwrap_err();
    /// let rendered = err.render_snippet();
    /// assert!(rendered.contains("quotes must enclose the entire value"));
    /// assert!(rendered.contains("min=5,max=1'0"));
    /// ```
    pub fn render_snippet(&self) -> String {
        self.render_snippet_with_path("<tag>")
    }

    /// Like [`Error::render_snippet`], naming the tag's origin (for example
    /// `"User.email"`) in the header.
    pub fn render_snippet_with_path(&self, path: &str) -> String {
        let (window, start) = crop_window(self.input(), self.offset(), CROP_RADIUS);
        let end = next_char_boundary(window, start);
        let message = self.message();

        let report = &[Level::ERROR
            .primary_title(self.to_string())
            .element(
                Snippet::source(window)
                    .path(path)
                    .fold(false)
                    .annotation(AnnotationKind::Primary.span(start..end).label(&*message)),
            )];

        // Plain ASCII output keeps rendered errors stable and free of escape codes.
        let renderer = Renderer::plain().decor_style(DecorStyle::Ascii);
        renderer.render(report).to_string()
    }
}

/// Cut `text` down to roughly `radius` bytes on each side of `offset`, on
/// character boundaries. Returns the window and `offset` relative to it.
fn crop_window(text: &str, offset: usize, radius: usize) -> (&str, usize) {
    let offset = offset.min(text.len());
    let mut from = offset.saturating_sub(radius);
    while !text.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = offset.saturating_add(radius).min(text.len());
    while !text.is_char_boundary(to) {
        to += 1;
    }
    (&text[from..to], offset - from)
}

/// End of the character starting at `at`, or `at` itself at the end of `text`.
fn next_char_boundary(text: &str, at: usize) -> usize {
    text[at..].chars().next().map_or(at, |c| at + c.len_utf8())
}
