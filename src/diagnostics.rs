//! User-facing reports.
//!
//! A [`Diagnostic`] is pure data plus a deterministic text layout:
//!
//! ```text
//! error: Unexpected token
//! | Message: unexpected token ')' at line 1, column 9: at start of expression
//!
//! Notes:
//! Token
//! | At: 1:9
//! | Notes: found Punctuation ')'
//! ```
//!
//! Rendering never decides whether a report is fatal; callers do.
//! Colors come from a [`Palette`] and are purely decorative:
//! [`Palette::PLAIN`] produces the exact layout above.

use std::fmt::{self, Write};

use anstyle::{AnsiColor, Style};

/// How serious a report is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary note attached to a diagnostic, optionally positioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub title: String,
    pub message: String,
    /// 1-based `(line, column)`.
    pub position: Option<(usize, usize)>,
}

impl Label {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub const fn at(mut self, line: usize, column: usize) -> Self {
        self.position = Some((line, column));
        self
    }
}

/// Style per rendered element. [`Style::new`] renders as nothing, so a
/// plain palette leaves the layout untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub error: Style,
    pub warning: Style,
    pub note: Style,
    pub title: Style,
    pub section: Style,
    pub label: Style,
    pub position: Style,
}

impl Palette {
    pub const PLAIN: Self = Self {
        error: Style::new(),
        warning: Style::new(),
        note: Style::new(),
        title: Style::new(),
        section: Style::new(),
        label: Style::new(),
        position: Style::new(),
    };

    pub const ANSI: Self = Self {
        error: AnsiColor::Red.on_default().bold(),
        warning: AnsiColor::Yellow.on_default().bold(),
        note: AnsiColor::Cyan.on_default().bold(),
        title: AnsiColor::Cyan.on_default(),
        section: AnsiColor::Magenta.on_default(),
        label: AnsiColor::Blue.on_default(),
        position: AnsiColor::Magenta.on_default(),
    };

    const fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Note => self.note,
        }
    }
}

/// A value wrapped in a style and its reset.
struct Painted<T>(Style, T);

impl<T: fmt::Display> fmt::Display for Painted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.0.render(), self.1, self.0.render_reset())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// A structured report: severity, headline, summary, and labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub labels: Vec<Label>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    /// Append a label; labels render in insertion order.
    pub fn add_label(&mut self, label: Label) {
        self.labels.push(label);
    }

    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.add_label(label);
        self
    }

    /// Render without styling.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(&Palette::PLAIN)
    }

    #[must_use]
    pub fn render_with(&self, palette: &Palette) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, palette);
        out
    }

    fn write_to(&self, out: &mut impl Write, p: &Palette) -> fmt::Result {
        writeln!(
            out,
            "{}: {}",
            Painted(p.severity(self.severity), self.severity),
            Painted(p.title, &self.title)
        )?;
        writeln!(out, "| Message: {}", self.message)?;

        if self.labels.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{}", Painted(p.section, "Notes:"))?;
        for label in &self.labels {
            writeln!(out, "{}", Painted(p.label, &label.title))?;
            if let Some((line, col)) = label.position {
                writeln!(out, "| At: {}", Painted(p.position, format!("{line}:{col}")))?;
            }
            writeln!(out, "| Notes: {}", label.message)?;
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, &Palette::PLAIN)
    }
}
