//! Per-type cell formatting.
//!
//! [`render_cell`] is the single place that knows about column types; the
//! table view and search operate on its [`RenderedCell`] output only.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::schema::{CellType, CellValue};

/// Text shown for empty cells.
pub const PLACEHOLDER: &str = "-";

/// Badge color classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Red,
    Yellow,
    Blue,
    Gray,
    Neutral,
}

/// Badge icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeIcon {
    Check,
    X,
    Clock,
}

/// Recognized status labels and their styling.
pub const STATUS_STYLES: &[(&str, BadgeColor, BadgeIcon)] = &[
    ("Open", BadgeColor::Green, BadgeIcon::Check),
    ("Closed", BadgeColor::Red, BadgeIcon::X),
    ("Pending", BadgeColor::Yellow, BadgeIcon::Clock),
    ("Active", BadgeColor::Blue, BadgeIcon::Check),
    ("Inactive", BadgeColor::Gray, BadgeIcon::X),
];

/// A formatted cell, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedCell {
    Placeholder {
        text: &'static str,
    },
    Text {
        text: String,
    },
    /// Outbound action pointing at `href`.
    Link {
        href: String,
    },
    /// Thumbnail; clients show `fallback` when the image fails to load.
    Image {
        src: String,
        fallback: String,
    },
    Date {
        text: String,
    },
    Number {
        text: String,
    },
    Badge {
        label: String,
        color: BadgeColor,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<BadgeIcon>,
    },
}

impl RenderedCell {
    /// Plain text a reader sees, used for search. `None` for placeholders.
    pub fn search_text(&self) -> Option<&str> {
        match self {
            RenderedCell::Placeholder { .. } => None,
            RenderedCell::Text { text }
            | RenderedCell::Date { text }
            | RenderedCell::Number { text } => Some(text),
            RenderedCell::Link { href } => Some(href),
            RenderedCell::Image { src, .. } => Some(src),
            RenderedCell::Badge { label, .. } => Some(label),
        }
    }
}

/// Format one cell according to its column type.
///
/// Absent and falsy values (`null`, `""`, `0`) render as [`PLACEHOLDER`].
pub fn render_cell(cell_type: CellType, value: Option<&CellValue>) -> RenderedCell {
    let value = match value {
        Some(v) if !v.is_falsy() => v,
        _ => return RenderedCell::Placeholder { text: PLACEHOLDER },
    };
    let raw = value.raw_text();

    match cell_type {
        CellType::Link => RenderedCell::Link { href: raw },
        CellType::Image => {
            if is_absolute_url(&raw) {
                RenderedCell::Image {
                    fallback: raw.clone(),
                    src: raw,
                }
            } else {
                RenderedCell::Text { text: raw }
            }
        }
        CellType::Date => match parse_date(&raw) {
            Some(date) => RenderedCell::Date {
                text: format_locale_date(date),
            },
            None => RenderedCell::Text { text: raw },
        },
        CellType::Status => {
            let style = STATUS_STYLES.iter().find(|(label, _, _)| *label == raw);
            match style {
                Some((_, color, icon)) => RenderedCell::Badge {
                    label: raw,
                    color: *color,
                    icon: Some(*icon),
                },
                None => RenderedCell::Badge {
                    label: raw,
                    color: BadgeColor::Neutral,
                    icon: None,
                },
            }
        }
        CellType::Number => match numeric_value(value) {
            Some(n) => RenderedCell::Number {
                text: group_thousands(n),
            },
            None => RenderedCell::Text { text: raw },
        },
        CellType::Text | CellType::Richtext => RenderedCell::Text { text: raw },
    }
}

fn is_absolute_url(value: &str) -> bool {
    let lower = value.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM:SS`.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|ts| ts.date())
}

/// en-US short date, e.g. `1/15/2025`.
fn format_locale_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

fn numeric_value(value: &CellValue) -> Option<f64> {
    let n = match value {
        CellValue::Number(n) => n.as_f64()?,
        CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        CellValue::Empty => return None,
    };
    n.is_finite().then_some(n)
}

/// en-US grouping: comma thousands separators, at most three fraction
/// digits, trailing zeros dropped.
fn group_thousands(n: f64) -> String {
    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*d));
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let mut out = String::new();
    if n < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
