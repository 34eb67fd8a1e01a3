//! # Clock Face Errors
//!
//! The face has no recoverable runtime failures of its own: everything in here
//! is either a programmer error (a digit that does not fit its column, a
//! geometry that cannot be laid out) or a configuration file problem surfaced
//! by the host. Each variant carries enough context to tell which input was
//! wrong.

use std::io;
use thiserror::Error;

/// Errors raised by the clock face library.
#[derive(Error, Debug)]
pub enum ClockError {
    /// A digit was asked to fit into a column that cannot represent it
    #[error("digit {value} does not fit in {bit_width} bits")]
    DigitOutOfRange { value: u8, bit_width: u8 },

    /// Column heights are limited to 1..=4 dots
    #[error("invalid bit width {0} (expected 1..=4)")]
    InvalidBitWidth(u8),

    /// A time field outside its calendar range (e.g. second 61)
    #[error("{field} out of range: {value}")]
    TimeOutOfRange { field: &'static str, value: u32 },

    /// Zero columns or a zero radius cannot be laid out
    #[error("invalid geometry: {column_count} columns of radius {radius}")]
    InvalidGeometry { column_count: u32, radius: u32 },

    /// Display is narrower than the dots it has to hold
    #[error("display width {width} too narrow for {column_count} columns of radius {radius}")]
    DisplayTooNarrow {
        width: i32,
        column_count: u32,
        radius: u32,
    },

    /// Config file exists but could not be parsed
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config could not be serialized for saving
    #[error("config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Config file IO failed (permissions, missing directory)
    #[error("config IO: {0}")]
    Io(#[from] io::Error),
}
