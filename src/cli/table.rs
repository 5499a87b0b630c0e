//! Plain-text table rendering shared by the list commands.

use std::fmt::Write as _;

use serde::Serialize;

/// A table of string cells with a header row.
#[derive(Debug)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub const fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    /// Renders the table with columns padded to their widest cell.
    pub fn render(&self) -> String {
        let widths = self
            .headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                self.rows
                    .iter()
                    .map(|row| row[idx].chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(header.chars().count())
            })
            .collect::<Vec<_>>();

        let mut out = String::new();
        write_row(&mut out, self.headers.iter().copied(), &widths);
        write_row(
            &mut out,
            widths.iter().map(|&width| "-".repeat(width)),
            &widths,
        );
        for row in &self.rows {
            write_row(&mut out, row.iter().map(String::as_str), &widths);
        }
        out
    }
}

fn write_row<I, S>(out: &mut String, cells: I, widths: &[usize])
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (cell, width) in cells.into_iter().zip(widths) {
        let cell = cell.as_ref();
        let padding = width.saturating_sub(cell.chars().count());
        let _ = write!(line, "{cell}{:padding$}  ", "");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Pretty-prints `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    use anyhow::Context;

    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("failed to render json output")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let mut table = Table::new(vec!["ID", "Name"]);
        table.push(vec!["M-101".to_string(), "Paracetamol 500mg".to_string()]);
        table.push(vec!["M-1".to_string(), "ORS".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "ID     Name");
        assert_eq!(lines[1], "-----  -----------------");
        assert_eq!(lines[2], "M-101  Paracetamol 500mg");
        assert_eq!(lines[3], "M-1    ORS");
    }

    #[test]
    fn multibyte_cells_are_measured_in_chars() {
        let mut table = Table::new(vec!["Price", "X"]);
        table.push(vec!["₹25".to_string(), "a".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[2], "₹25    a");
    }
}
