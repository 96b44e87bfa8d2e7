#![forbid(unsafe_code)]

//! Human-readable matrix output
//!
//! Renders the class matrix as an aligned grid with class names on both
//! axes. Long column labels are shortened so one wide class name does not
//! stretch every column.

use crate::matrix::{ClassMatrix, NOT_APPLICABLE};
use crate::types::Position;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Column labels longer than this are shortened
pub const MAX_COLUMN_LABEL: usize = 12;

const COLUMN_GAP: usize = 2;

/// Human-readable formatter for the class matrix
pub struct HumanFormatter;

impl HumanFormatter {
    /// Create a new human formatter
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Format the matrix as plain text
    pub fn format(&self, matrix: &ClassMatrix) -> String {
        let mut buffer = termcolor::NoColor::new(Vec::new());
        // Writing to a Vec cannot fail.
        let _ = self.write(matrix, &mut buffer);
        String::from_utf8_lossy(&buffer.into_inner()).into_owned()
    }

    /// Write the matrix to a color-capable writer
    pub fn write<W: WriteColor>(&self, matrix: &ClassMatrix, out: &mut W) -> io::Result<()> {
        let size = matrix.size();
        let labels: Vec<String> = matrix
            .classes()
            .iter()
            .map(|name| column_label(name))
            .collect();

        let row_label_width = matrix
            .classes()
            .iter()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0);

        let widths: Vec<usize> = (0..size)
            .map(|col| {
                (0..size)
                    .map(|row| matrix.display(Position::new(row, col)).chars().count())
                    .chain(std::iter::once(labels[col].chars().count()))
                    .max()
                    .unwrap_or(1)
            })
            .collect();

        let mut label_spec = ColorSpec::new();
        label_spec.set_bold(true);
        let mut value_spec = ColorSpec::new();
        value_spec.set_fg(Some(Color::Green));
        let mut blank_spec = ColorSpec::new();
        blank_spec.set_dimmed(true);

        write!(out, "{:width$}", "", width = row_label_width)?;
        out.set_color(&label_spec)?;
        for (label, width) in labels.iter().zip(&widths) {
            write!(out, "{:gap$}{:<width$}", "", label, gap = COLUMN_GAP, width = *width)?;
        }
        out.reset()?;
        writeln!(out)?;

        for row in 0..size {
            out.set_color(&label_spec)?;
            write!(
                out,
                "{:<width$}",
                matrix.classes()[row],
                width = row_label_width
            )?;
            out.reset()?;

            for (col, width) in widths.iter().enumerate() {
                let text = matrix.display(Position::new(row, col));
                write!(out, "{:gap$}", "", gap = COLUMN_GAP)?;
                if text == NOT_APPLICABLE {
                    out.set_color(&blank_spec)?;
                } else if !text.is_empty() {
                    out.set_color(&value_spec)?;
                }
                write!(out, "{:<width$}", text, width = *width)?;
                out.reset()?;
            }
            writeln!(out)?;
        }

        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortens a class name to [`MAX_COLUMN_LABEL`] characters
fn column_label(name: &str) -> String {
    if name.chars().count() <= MAX_COLUMN_LABEL {
        return name.to_string();
    }
    let mut label: String = name.chars().take(MAX_COLUMN_LABEL - 1).collect();
    label.push('…');
    label
}
