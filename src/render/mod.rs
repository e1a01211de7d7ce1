//! Template rendering for the status line.
//!
//! A [`Renderer`] walks a [`Template`] left to right, copies literal text and
//! replaces every `{key}` placeholder with the output of the matching
//! [`Widget`]. Rendering is a pure function of the template and the snapshot.
//!
//! ```
//! use yustat::model::StatSnapshot;
//! use yustat::render::{Renderer, Template};
//!
//! let renderer = Renderer::default();
//! let out = renderer
//!     .render_template(&Template::new("{{mem} {swap}"), &StatSnapshot::default())
//!     .unwrap();
//! assert_eq!(out, "{mem}   0.0%[     ]");
//! ```

mod template;
mod widget;

use std::fmt;

use crate::model::StatSnapshot;

pub use template::{Segment, Segments, TMUX_TEMPLATE, Template};
pub use widget::Widget;

/// Error type for rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("unmatched '{{' at byte {offset} in format string")]
    UnmatchedBrace { offset: usize },
    #[error("unknown key '{0}' in format string")]
    UnknownKey(String),
    #[error("output format '{0}' is not implemented yet")]
    Unsupported(OutputFormat),
}

/// Output backends selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// tmux status line with inline colour tags
    #[default]
    Tmux,
    /// plain terminal output
    Console,
    /// structured JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Tmux => "tmux",
            OutputFormat::Console => "console",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Widget settings shared by every placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Cells per horizontal bar.
    pub bar_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { bar_width: 5 }
    }
}

/// Renders snapshots through a configured template.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    template: Template,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(template: Template, options: RenderOptions) -> Self {
        Self { template, options }
    }

    /// Renders the configured template in the given output format.
    ///
    /// Only `Tmux` is implemented; the other formats report `Unsupported`.
    pub fn render_as(
        &self,
        format: OutputFormat,
        snapshot: &StatSnapshot,
    ) -> Result<String, RenderError> {
        match format {
            OutputFormat::Tmux => self.render(snapshot),
            OutputFormat::Console | OutputFormat::Json => Err(RenderError::Unsupported(format)),
        }
    }

    /// Renders the configured template.
    pub fn render(&self, snapshot: &StatSnapshot) -> Result<String, RenderError> {
        self.render_template(&self.template, snapshot)
    }

    /// Renders an arbitrary template with this renderer's options.
    pub fn render_template(
        &self,
        template: &Template,
        snapshot: &StatSnapshot,
    ) -> Result<String, RenderError> {
        let mut out = String::with_capacity(template.as_str().len() * 2);
        self.render_into(&mut out, template, snapshot)?;
        Ok(out)
    }

    /// Appends the rendered template to `out`.
    ///
    /// On error, whatever was rendered before the bad spot stays in `out`.
    pub fn render_into(
        &self,
        out: &mut String,
        template: &Template,
        snapshot: &StatSnapshot,
    ) -> Result<(), RenderError> {
        for segment in template.segments() {
            match segment? {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(key) => {
                    let widget = Widget::from_key(key)
                        .ok_or_else(|| RenderError::UnknownKey(key.to_string()))?;
                    out.push_str(&widget.render(snapshot, &self.options));
                }
            }
        }
        Ok(())
    }
}
