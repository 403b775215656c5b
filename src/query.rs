//! Text form of an [`OverlayTable`].
//!
//! One entry per `name=x1,y1,x2,y2,x3,y3,x4,y4` pair, corners in TL, TR, BR,
//! BL order, in image pixels. Pairs are separated by `&` or newlines. The
//! coordinate list may be wrapped in parentheses or brackets and may use
//! whitespace instead of commas. Lines starting with `#` are comments.
//!
//! ```
//! use coverwarp::query;
//!
//! let result = query::parse(
//!     "left=62,561,244,607,244,937,62,943\n\
//!      right=(780 607, 967 560, 967 944, 781 938)",
//! );
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.table.len(), 2);
//! ```
//!
//! Problems never abort the parse. Each one becomes a [`ParseWarning`] and
//! the offending entry is skipped (or, for duplicates, the last one wins).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Write as _;

use crate::geom::{Point, Quad};
use crate::table::OverlayTable;

/// Result of parsing a table.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Entries that parsed cleanly, in input order.
    pub table: OverlayTable,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from table parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A name appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// An entry had no name before `=`.
    EmptyKey { value: String },
    /// An entry's value could not be parsed; the entry was skipped.
    ValueInvalid {
        key: String,
        value: String,
        reason: &'static str,
    },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key, value } => {
                write!(f, "duplicate entry {key:?} (keeping {value:?})")
            }
            Self::EmptyKey { value } => write!(f, "entry without a name: {value:?}"),
            Self::ValueInvalid { key, value, reason } => {
                write!(f, "invalid value for {key:?}: {value:?} ({reason})")
            }
        }
    }
}

impl core::error::Error for ParseWarning {}

/// Parse a table from its text form.
pub fn parse(text: &str) -> ParseResult {
    let mut table = OverlayTable::new();
    let mut warnings = Vec::new();

    for entry in split_entries(text) {
        let (key, value) = match entry.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => {
                warnings.push(ParseWarning::ValueInvalid {
                    key: String::from(entry),
                    value: String::new(),
                    reason: "expected name=x1,y1,x2,y2,x3,y3,x4,y4",
                });
                continue;
            }
        };
        if key.is_empty() {
            warnings.push(ParseWarning::EmptyKey {
                value: String::from(value),
            });
            continue;
        }

        match parse_quad(value) {
            Ok(quad) => {
                if table.insert(key, quad).is_some() {
                    warnings.push(ParseWarning::DuplicateKey {
                        key: String::from(key),
                        value: String::from(value),
                    });
                }
            }
            Err(reason) => warnings.push(ParseWarning::ValueInvalid {
                key: String::from(key),
                value: String::from(value),
                reason,
            }),
        }
    }

    if !warnings.is_empty() {
        debug!(count = warnings.len(), "overlay table parsed with warnings");
    }

    ParseResult { table, warnings }
}

/// Render a table in the text form accepted by [`parse`], one entry per line.
pub fn to_text(table: &OverlayTable) -> String {
    let mut out = String::new();
    for (name, quad) in table.iter() {
        let _ = write!(out, "{name}=");
        for (i, p) in quad.corners().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{},{}", p.x, p.y);
        }
        out.push('\n');
    }
    out
}

fn split_entries(text: &str) -> impl Iterator<Item = &str> {
    text.split(['&', '\n'])
        .map(str::trim)
        .filter(|e| !e.is_empty() && !e.starts_with('#'))
}

fn parse_quad(value: &str) -> Result<Quad, &'static str> {
    let inner = strip_wrapping(value);
    let mut numbers = [0.0_f64; 8];
    let mut count = 0;
    for token in inner
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|t| !t.is_empty())
    {
        if count == numbers.len() {
            return Err("expected exactly 8 numbers (4 corners)");
        }
        let v: f64 = token.parse().map_err(|_| "expected numbers")?;
        if !v.is_finite() {
            return Err("coordinates must be finite");
        }
        numbers[count] = v;
        count += 1;
    }
    if count != numbers.len() {
        return Err("expected exactly 8 numbers (4 corners)");
    }

    let [x1, y1, x2, y2, x3, y3, x4, y4] = numbers;
    Ok(Quad::new(
        Point::new(x1, y1),
        Point::new(x2, y2),
        Point::new(x3, y3),
        Point::new(x4, y4),
    ))
}

fn strip_wrapping(value: &str) -> &str {
    let v = value.trim();
    for (open, close) in [('(', ')'), ('[', ']')] {
        if let Some(inner) = v.strip_prefix(open).and_then(|s| s.strip_suffix(close)) {
            return inner.trim();
        }
    }
    v
}
