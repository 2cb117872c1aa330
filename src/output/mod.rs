//! Output sink abstraction for user-visible text.
//!
//! Both the completion engine's host and the command router write through
//! an [`OutputSink`] instead of talking to a terminal directly. A sink only
//! knows how to append a tagged line and how to clear itself; everything
//! else (scrollback, styling, widgets) belongs to the front-end.
//!
//! Two implementations live here:
//! - [`ConsoleSink`]: styled stdout/stderr output for the interactive REPL
//! - [`MemorySink`]: collects lines in memory, used by tests and dry runs

use std::io::Write;
use std::sync::Mutex;

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use nu_ansi_term::Color;

/// Tag describing how a line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Plain command output.
    Output,

    /// Informational message from apsh itself.
    Info,

    /// Successful operation.
    Success,

    /// Warning-tagged line (unknown command, non-fatal stderr, busy).
    Warning,

    /// Error-tagged line (handler failure, shell failure).
    Error,
}

/// Destination for all user-visible text.
///
/// The core never assumes terminal semantics, only append and clear.
pub trait OutputSink: Send + Sync {
    /// Append one line with a presentation tag.
    fn append(&self, tag: Tag, text: &str);

    /// Clear all content.
    fn clear(&self);
}

/// Sink that writes styled lines to the console.
///
/// Output and informational lines go to stdout; warnings and errors go to
/// stderr. Clearing issues an ANSI clear-screen sequence.
pub struct ConsoleSink {
    /// Whether to apply ANSI colors.
    color: bool,
}

impl ConsoleSink {
    /// Create a new console sink.
    ///
    /// # Arguments
    /// * `color` - Whether to apply ANSI colors
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, tag: Tag, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match tag {
            Tag::Output => text.to_string(),
            Tag::Info => Color::Cyan.paint(text).to_string(),
            Tag::Success => Color::Green.paint(text).to_string(),
            Tag::Warning => Color::Yellow.paint(text).to_string(),
            Tag::Error => Color::Red.paint(text).to_string(),
        }
    }
}

impl OutputSink for ConsoleSink {
    fn append(&self, tag: Tag, text: &str) {
        let painted = self.paint(tag, text);
        match tag {
            Tag::Warning | Tag::Error => eprintln!("{painted}"),
            _ => println!("{painted}"),
        }
    }

    fn clear(&self) {
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(stdout, Clear(ClearType::All), MoveTo(0, 0));
        let _ = stdout.flush();
    }
}

/// A captured line with its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Presentation tag.
    pub tag: Tag,
    /// Line text.
    pub text: String,
}

/// Sink that collects lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<Line>>,
}

impl MemorySink {
    /// Create a new empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of all captured lines.
    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().unwrap().clone()
    }

    /// Count captured lines carrying the given tag.
    pub fn count(&self, tag: Tag) -> usize {
        self.lines.lock().unwrap().iter().filter(|l| l.tag == tag).count()
    }

    /// Check whether any captured line contains the given fragment.
    pub fn contains(&self, fragment: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|l| l.text.contains(fragment))
    }
}

impl OutputSink for MemorySink {
    fn append(&self, tag: Tag, text: &str) {
        self.lines.lock().unwrap().push(Line {
            tag,
            text: text.to_string(),
        });
    }

    fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_tags() {
        let sink = MemorySink::new();
        sink.append(Tag::Output, "hello");
        sink.append(Tag::Warning, "careful");
        sink.append(Tag::Warning, "again");

        assert_eq!(sink.lines().len(), 3);
        assert_eq!(sink.count(Tag::Warning), 2);
        assert_eq!(sink.count(Tag::Error), 0);
    }

    #[test]
    fn memory_sink_clear_empties() {
        let sink = MemorySink::new();
        sink.append(Tag::Info, "one");
        sink.clear();
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn memory_sink_contains_fragment() {
        let sink = MemorySink::new();
        sink.append(Tag::Error, "cd: no such directory");
        assert!(sink.contains("no such directory"));
        assert!(!sink.contains("permission denied"));
    }

    #[test]
    fn console_sink_paint_respects_color_flag() {
        let plain = ConsoleSink::new(false);
        assert_eq!(plain.paint(Tag::Error, "boom"), "boom");

        let colored = ConsoleSink::new(true);
        let painted = colored.paint(Tag::Error, "boom");
        assert!(painted.contains("boom"));
        assert_ne!(painted, "boom");
    }
}
