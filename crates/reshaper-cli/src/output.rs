//! Output formatting and writing utilities
//!
//! Data (the reshaped object, path listings, reports) is written to the
//! data stream in the selected format. Status messages go to a separate
//! message stream so that piping the data stays clean.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting serializable values
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human output falls back to pretty JSON for data
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
    messages: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout (data) and stderr (messages)
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writers(
            format,
            use_color,
            quiet,
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    /// Create an output writer with custom writers
    pub fn with_writers(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
        messages: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
            messages,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a line of data output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    fn message(&mut self, content: &str) -> Result<()> {
        writeln!(self.messages, "{}", content)?;
        self.messages.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.message(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.message(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.message(&message.green().to_string())
        } else {
            self.message(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.message(&message.yellow().to_string())
        } else {
            self.message(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        // YAML already ends with a newline
        if self.format == OutputFormat::Yaml {
            write!(self.writer, "{}", formatted)?;
            self.writer.flush()?;
            Ok(())
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(header_row.trim_end().bold().to_string().as_str())?;
        } else {
            self.writeln(header_row.trim_end())?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory writer whose contents stay readable after being boxed
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    pub(crate) fn capture(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer, SharedBuffer) {
        let data = SharedBuffer::default();
        let messages = SharedBuffer::default();
        let writer = OutputWriter::with_writers(
            format,
            false,
            quiet,
            Box::new(data.clone()),
            Box::new(messages.clone()),
        );
        (writer, data, messages)
    }

    #[test]
    fn test_json_data_is_compact() {
        let (mut output, data, messages) = capture(OutputFormat::Json, false);
        output.info("ignored for machine formats").unwrap();
        output.data(&json!({"x": {"y": 1}})).unwrap();

        assert_eq!(data.contents(), "{\"x\":{\"y\":1}}\n");
        assert!(messages.contents().is_empty());
    }

    #[test]
    fn test_yaml_data() {
        let (mut output, data, _) = capture(OutputFormat::Yaml, false);
        output.data(&json!({"x": 1})).unwrap();
        assert_eq!(data.contents(), "x: 1\n");
    }

    #[test]
    fn test_human_messages_go_to_message_stream() {
        let (mut output, data, messages) = capture(OutputFormat::Human, false);
        output.info("Loading template").unwrap();
        output.success("done").unwrap();
        output.data(&json!({"a": 1})).unwrap();

        assert_eq!(messages.contents(), "INFO: Loading template\ndone\n");
        assert_eq!(data.contents(), "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn test_quiet_suppresses_info_but_not_warnings() {
        let (mut output, _, messages) = capture(OutputFormat::Human, true);
        output.info("hidden").unwrap();
        output.warning("shown").unwrap();
        assert_eq!(messages.contents(), "WARNING: shown\n");
    }

    #[test]
    fn test_table_layout() {
        let (mut output, data, _) = capture(OutputFormat::Human, false);
        output
            .table(
                &["Path", "Source key"],
                vec![
                    vec!["contract._id".to_string(), "contract_id".to_string()],
                    vec!["x".to_string(), "a".to_string()],
                ],
            )
            .unwrap();

        let lines: Vec<String> = data.contents().lines().map(str::to_string).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Path         │ Source key");
        assert_eq!(lines[2], "contract._id │ contract_id");
        assert_eq!(lines[3], "x            │ a");
    }
}
