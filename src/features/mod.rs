//! Feature modules - Printing
//!
//! This module contains the pieces around the core pipeline that drive a
//! line printer:
//! - Print device: command building, the `PrintTarget` boundary
//! - Printer: layout + device composition

pub mod device;
pub mod printer;

// Re-export commonly used types
pub use device::{
    BoxSetting, DeviceError, DeviceSettings, FontSetting, LoggingTarget, MemoryTarget, NoopTarget,
    PrintCommand, PrintDevice, PrintStatus, PrintTarget,
};
pub use printer::Printer;
