//! Aligned text tables for command output.

use std::fmt::{self, Display};
use std::io::{self, IsTerminal, Write};

/// Alignment of the cells of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub alignment: Alignment,
}

/// A table of text cells.
///
/// Each column is as wide as its widest cell or label, and columns are
/// separated by two spaces. Cells beyond the declared columns are ignored and
/// missing cells are blank.
///
/// # Examples
///
/// ```
/// use program_core::{Alignment, Table};
///
/// let mut table = Table::new();
/// table.add_column("name", Alignment::Left);
/// table.add_column("size", Alignment::Right);
/// table.add_row(["a.txt", "12"]);
/// table.add_row(["archive.tar", "4096"]);
///
/// assert_eq!(table.header(), "NAME         SIZE");
/// assert_eq!(table.render(), "a.txt          12\narchive.tar  4096\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, label: &str, alignment: Alignment) {
        self.columns.push(Column {
            label: label.to_string(),
            alignment,
        });
    }

    pub fn add_row<I>(&mut self, row: I)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.rows.push(row.into_iter().map(|cell| cell.to_string()).collect());
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Column labels in upper case, aligned like the cells below them.
    pub fn header(&self) -> String {
        let widths = self.widths();
        let labels: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.label.to_uppercase())
            .collect();

        self.line(&labels, &widths)
    }

    /// Rows of the table, one line each, without the header.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        for row in &self.rows {
            out.push_str(&self.line(row, &widths));
            out.push('\n');
        }

        out
    }

    /// Writes the rows to stdout. The header goes to stderr, and only when
    /// stdout is a terminal, so that piped output only contains data.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();

        if stdout.is_terminal() {
            writeln!(io::stderr().lock(), "{}", self.header())?;
        }

        let mut out = stdout.lock();
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain([column.label.chars().count()])
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let mut line = String::new();

        for (i, (column, &width)) in self.columns.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }

            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            match column.alignment {
                Alignment::Left => line.push_str(&format!("{cell:<width$}")),
                Alignment::Right => line.push_str(&format!("{cell:>width$}")),
            }
        }

        line.truncate(line.trim_end().len());
        line
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A two-column table of names and values.
///
/// ```
/// use program_core::KeyValueTable;
///
/// let mut table = KeyValueTable::new();
/// table.add_row("verbose", true);
/// table.add_row("output", "out.txt");
///
/// assert_eq!(table.render(), "verbose  true\noutput   out.txt\n");
/// ```
#[derive(Debug, Clone)]
pub struct KeyValueTable {
    table: Table,
}

impl Default for KeyValueTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueTable {
    pub fn new() -> Self {
        let mut table = Table::new();
        table.add_column("name", Alignment::Left);
        table.add_column("value", Alignment::Left);
        Self { table }
    }

    pub fn add_row(&mut self, key: &str, value: impl Display) {
        self.table.add_row([key.to_string(), value.to_string()]);
    }

    pub fn header(&self) -> String {
        self.table.header()
    }

    pub fn render(&self) -> String {
        self.table.render()
    }

    pub fn print(&self) -> io::Result<()> {
        self.table.print()
    }
}

impl fmt::Display for KeyValueTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.table, f)
    }
}
