//! Status line templates: literal text with `{key}` placeholders.
//!
//! A template is scanned lazily, left to right, while it is rendered, so a
//! malformed template is only reported when the scan reaches the bad spot.

use std::borrow::Cow;

use super::RenderError;
use super::widget::Widget;

/// Built-in tmux status line.
pub const TMUX_TEMPLATE: &str = "#[fg=colour4]{uptime} \
#[fg=colour2]{load}\
#[fg=colour3]{memory}\
#[fg=colour5]{swap}\
#[fg=colour6]{cpu} \
#[fg=colour7]{wall_clock}";

/// One piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Immutable template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: Cow<'static, str>,
}

impl Template {
    pub fn new(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The built-in tmux template.
    pub fn tmux() -> Self {
        Self::new(TMUX_TEMPLATE)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Scans the template into segments.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            src: &self.source,
            pos: 0,
            failed: false,
        }
    }

    /// Scans the whole template up front and checks every placeholder key.
    pub fn validate(&self) -> Result<(), RenderError> {
        for segment in self.segments() {
            if let Segment::Placeholder(key) = segment? {
                Widget::from_key(key).ok_or_else(|| RenderError::UnknownKey(key.to_string()))?;
            }
        }
        Ok(())
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::tmux()
    }
}

/// Iterator over the segments of a [`Template`].
///
/// `{{` yields a literal `{`. A `{` without a closing `}` yields
/// `UnmatchedBrace` and ends the scan.
pub struct Segments<'a> {
    src: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<Segment<'a>, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.src.len() {
            return None;
        }
        let rest = &self.src[self.pos..];

        let Some(open) = rest.find('{') else {
            self.pos = self.src.len();
            return Some(Ok(Segment::Literal(rest)));
        };

        if open > 0 {
            self.pos += open;
            return Some(Ok(Segment::Literal(&rest[..open])));
        }

        if rest[1..].starts_with('{') {
            self.pos += 2;
            return Some(Ok(Segment::Literal("{")));
        }

        match rest.find('}') {
            Some(close) => {
                self.pos += close + 1;
                Some(Ok(Segment::Placeholder(&rest[1..close])))
            }
            None => {
                self.failed = true;
                Some(Err(RenderError::UnmatchedBrace { offset: self.pos }))
            }
        }
    }
}
