//! # TextGrid Data Types
//!
//! In-memory form of a Praat TextGrid: an ordered list of tiers, each holding
//! either intervals or points.
//!
//! ## Structure
//! ```text
//! TextGrid
//!   └─ Tier (name, time range)
//!        ├─ Intervals: [Interval { start_time, end_time, text }]
//!        └─ Points:    [Point { time, text }]
//! ```
//!
//! Tiers are identified by position, not by name. The types are read-only
//! inputs to the rest of the crate.

use std::fs;
use std::path::Path;

use crate::encoding::{decode, Encoding};
use crate::error::TableError;
use crate::parser::parse;

/// A labelled time span on an interval tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

impl Interval {
    pub fn new(start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Length of the interval in the tier's time unit (seconds).
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// A labelled instant on a point tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub time: f64,
    pub text: String,
}

impl Point {
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TierEntries {
    Intervals(Vec<Interval>),
    Points(Vec<Point>),
}

impl TierEntries {
    /// Human-readable tier kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TierEntries::Intervals(_) => "interval tier",
            TierEntries::Points(_) => "point tier",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub name: String,
    pub xmin: f64,
    pub xmax: f64,
    pub entries: TierEntries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextGrid {
    pub xmin: f64,
    pub xmax: f64,
    pub tiers: Vec<Tier>,
}

/// Read, decode and parse a TextGrid file.
pub fn read_textgrid(path: &Path, encoding: Encoding) -> Result<TextGrid, TableError> {
    let bytes = fs::read(path).map_err(|e| TableError::io(path, e))?;
    let text = decode(&bytes, encoding)?;
    parse(&text)
}
