//! Print device support
//!
//! This module turns flattened rows into print commands and hands them to a
//! physical (or simulated) printer:
//! - each row becomes one `{text, font, line box}` command
//! - line boxes stack vertically: row *i* starts at the sum of the previous
//!   rows' line heights
//! - the whole batch is flushed with a single `print` call
//!
//! The key abstraction is the `PrintTarget` trait, passed to the device at
//! construction, which allows different implementations for real hardware,
//! logging-only environments and tests.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::compiler::Props;
use crate::core::layout::{LayoutNode, PrintRow, RowFlattener};
use crate::data::constants::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, PROP_FONT_FAMILY, PROP_FONT_SIZE, PROP_LINE_HEIGHT,
};

/// Error type for print emission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("Device rejected text: {0}")]
    Rejected(String),
    #[error("Print failed: {0}")]
    PrintFailed(String),
    #[error("Device unavailable: {0}")]
    Unavailable(String),
}

/// Font descriptor of one print command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FontSetting {
    #[cfg_attr(feature = "serde", serde(rename = "iFontSize"))]
    pub font_size: u32,
    #[cfg_attr(feature = "serde", serde(rename = "strFontName"))]
    pub font_name: String,
}

/// Line box descriptor of one print command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxSetting {
    #[cfg_attr(feature = "serde", serde(rename = "iHeight"))]
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(rename = "iX"))]
    pub x: u32,
    #[cfg_attr(feature = "serde", serde(rename = "iY"))]
    pub y: u32,
}

/// One queued line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrintCommand {
    pub text: String,
    pub font: FontSetting,
    pub line_box: BoxSetting,
}

/// Trait for the printer hardware
///
/// Implementations:
/// - `LoggingTarget`: writes every line to the `log` facade
/// - `MemoryTarget`: records commands and batches (testing, previews)
/// - `NoopTarget`: discards everything
pub trait PrintTarget {
    /// Queue one line of text
    fn add_single_text(
        &mut self,
        text: &str,
        font: &FontSetting,
        line_box: &BoxSetting,
    ) -> Result<(), DeviceError>;

    /// Print every queued line as one batch
    fn print(&mut self) -> Result<(), DeviceError>;
}

impl<T: PrintTarget + ?Sized> PrintTarget for Box<T> {
    fn add_single_text(
        &mut self,
        text: &str,
        font: &FontSetting,
        line_box: &BoxSetting,
    ) -> Result<(), DeviceError> {
        (**self).add_single_text(text, font, line_box)
    }

    fn print(&mut self) -> Result<(), DeviceError> {
        (**self).print()
    }
}

/// Target for environments without a printer: logs every line at `info`
#[derive(Debug, Default)]
pub struct LoggingTarget {
    queued: usize,
}

impl LoggingTarget {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrintTarget for LoggingTarget {
    fn add_single_text(
        &mut self,
        text: &str,
        font: &FontSetting,
        line_box: &BoxSetting,
    ) -> Result<(), DeviceError> {
        self.queued += 1;
        log::info!(
            "line {:>3} y={:<5} size={} font={} | {}",
            self.queued,
            line_box.y,
            font.font_size,
            font.font_name,
            text
        );
        Ok(())
    }

    fn print(&mut self) -> Result<(), DeviceError> {
        log::info!("print ({} lines)", self.queued);
        self.queued = 0;
        Ok(())
    }
}

/// Target that records commands in memory
#[derive(Debug, Default)]
pub struct MemoryTarget {
    /// Commands queued since the last `print`
    pub pending: Vec<PrintCommand>,
    /// Every printed batch, in order
    pub batches: Vec<Vec<PrintCommand>>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every printed line across all batches
    pub fn printed_lines(&self) -> Vec<&str> {
        self.batches
            .iter()
            .flatten()
            .map(|cmd| cmd.text.as_str())
            .collect()
    }
}

impl PrintTarget for MemoryTarget {
    fn add_single_text(
        &mut self,
        text: &str,
        font: &FontSetting,
        line_box: &BoxSetting,
    ) -> Result<(), DeviceError> {
        self.pending.push(PrintCommand {
            text: text.to_string(),
            font: font.clone(),
            line_box: *line_box,
        });
        Ok(())
    }

    fn print(&mut self) -> Result<(), DeviceError> {
        self.batches.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}

/// Target that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTarget;

impl PrintTarget for NoopTarget {
    fn add_single_text(&mut self, _: &str, _: &FontSetting, _: &BoxSetting) -> Result<(), DeviceError> {
        Ok(())
    }

    fn print(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }
}

/// Device-wide font and line settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DeviceSettings {
    pub font_size: u32,
    pub font_family: String,
    /// Line height; the font size when unset
    pub line_height: Option<u32>,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            line_height: None,
        }
    }
}

/// Outcome of [`PrintDevice::print`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintStatus {
    /// This many lines were sent and flushed
    Printed(usize),
    /// There was nothing to print
    Empty,
    /// Emission failed; the error has been logged
    Failed,
}

/// Queues print commands and emits them to a [`PrintTarget`]
pub struct PrintDevice<T: PrintTarget> {
    target: T,
    settings: DeviceSettings,
    commands: Vec<PrintCommand>,
    font: FontSetting,
    line_box: BoxSetting,
}

impl<T: PrintTarget> PrintDevice<T> {
    pub fn new(target: T, settings: DeviceSettings) -> Self {
        let mut device = Self {
            target,
            font: FontSetting {
                font_size: settings.font_size,
                font_name: settings.font_family.clone(),
            },
            settings,
            commands: Vec::new(),
            line_box: BoxSetting::default(),
        };
        device.configure_device();
        device.reset();
        device
    }

    pub fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    /// Commands queued and not yet emitted
    pub fn commands(&self) -> &[PrintCommand] {
        &self.commands
    }

    /// Current line box, including the position cursor
    pub fn cursor(&self) -> &BoxSetting {
        &self.line_box
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// Restore the font and line height from the device settings
    fn configure_device(&mut self) {
        self.font.font_size = self.settings.font_size;
        self.font.font_name = self.settings.font_family.clone();
        self.line_box.height = self.settings.line_height.unwrap_or(self.font.font_size);
    }

    /// Move the position cursor back to the origin
    pub fn reset(&mut self) {
        self.line_box.x = 0;
        self.line_box.y = 0;
    }

    /// Flatten a layout tree into printable rows
    pub fn convert_to_rows(&self, root: &LayoutNode) -> Vec<PrintRow> {
        RowFlattener::flatten(root)
    }

    /// Queue one command per row.
    ///
    /// A row's `fontSize`, `fontFamily` and `lineHeight` props apply to that
    /// row only; the device returns to its settings afterwards. Line height
    /// is the row's `lineHeight`, else the row's `fontSize`, else the
    /// configured `line_height`, else the device font size.
    pub fn create_commands(&mut self, rows: &[PrintRow]) {
        let mut y = 0u32;
        for row in rows {
            self.line_box.y = y;
            let row_font_size = numeric_prop(&row.props, PROP_FONT_SIZE);
            if let Some(size) = row_font_size {
                self.font.font_size = size;
            }
            if let Some(family) = row.props.get(PROP_FONT_FAMILY) {
                self.font.font_name = family.clone();
            }
            self.line_box.height = numeric_prop(&row.props, PROP_LINE_HEIGHT)
                .or(row_font_size)
                .or(self.settings.line_height)
                .unwrap_or(self.font.font_size);

            self.commands.push(PrintCommand {
                text: row.text.clone(),
                font: self.font.clone(),
                line_box: self.line_box,
            });
            y = y.saturating_add(self.line_box.height);
            self.configure_device();
        }
    }

    /// Print a laid-out tree.
    ///
    /// Emission errors are logged, never returned. The command queue and the
    /// position cursor are cleared on every outcome.
    pub fn print(&mut self, root: &LayoutNode) -> PrintStatus {
        let rows = self.convert_to_rows(root);
        self.create_commands(&rows);

        let status = match self.emit() {
            Ok(0) => PrintStatus::Empty,
            Ok(lines) => PrintStatus::Printed(lines),
            Err(e) => {
                log::error!("print device: {}", e);
                PrintStatus::Failed
            }
        };

        self.commands.clear();
        self.reset();
        status
    }

    fn emit(&mut self) -> Result<usize, DeviceError> {
        if self.commands.is_empty() {
            return Ok(0);
        }
        log::debug!("emitting {} print commands", self.commands.len());
        for cmd in &self.commands {
            self.target
                .add_single_text(&cmd.text, &cmd.font, &cmd.line_box)?;
        }
        self.target.print()?;
        Ok(self.commands.len())
    }
}

/// Parse a numeric prop, logging values that are not numbers
fn numeric_prop(props: &Props, key: &str) -> Option<u32> {
    let value = props.get(key)?;
    match value.trim().parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!("ignoring non-numeric {} {:?}", key, value);
            None
        }
    }
}
