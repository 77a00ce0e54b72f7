//! Hierarchical row output.
//!
//! Traversals fill a row list; the emission methods then print it either
//! from the back (upward walks built the path bottom-up) or from the
//! front (top-down walks), suppressing rows identical to the last one
//! emitted at the same level tag. Output accumulates in a buffer so
//! callers decide where it goes.

use std::fmt::Write;

use kabigraph_core::Ctl;

/// One output row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub level: u32,
    pub flags: Ctl,
    pub decl: String,
    pub name: String,
}

/// Level tag a row prints under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RowTag {
    File = 0,
    Exported,
    Arg,
    Nested,
}

fn tag(flags: Ctl) -> RowTag {
    if flags.contains(Ctl::FILE) {
        RowTag::File
    } else if flags.contains(Ctl::EXPORTED) {
        RowTag::Exported
    } else if flags.intersects(Ctl::ARG | Ctl::RETURN) {
        RowTag::Arg
    } else {
        RowTag::Nested
    }
}

/// Row formatter with a per-tag duplicate cache.
#[derive(Debug, Default)]
pub struct RowMan {
    rows: Vec<Row>,
    dups: [Row; 4],
    normalized_base: Option<u32>,
    out: String,
}

impl RowMan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// The accumulated output.
    pub fn finish(self) -> String {
        self.out
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    fn is_dup(&self, row: &Row) -> bool {
        self.dups[tag(row.flags) as usize] == *row
    }

    /// Remember `row` as the last one emitted at its tag; false when it
    /// already was.
    fn set_dup(&mut self, row: &Row) -> bool {
        let slot = tag(row.flags) as usize;
        if self.dups[slot] == *row {
            return false;
        }
        self.dups[slot] = row.clone();
        true
    }

    fn clear_dups(&mut self) {
        self.dups = Default::default();
    }

    /// Emit accumulated rows last-pushed first; upward walks push the
    /// deepest row first, so the batch prints root-down. The first-pushed
    /// row (the queried symbol) prints even when verbosity would hide it.
    pub fn put_rows_from_back(&mut self, verbose: bool) {
        let mut rows = std::mem::take(&mut self.rows);
        while let Some(row) = rows.pop() {
            let force = rows.is_empty();
            self.print_row(&row, verbose || force);
        }
        self.out.push('\n');
    }

    /// Emit accumulated rows in push order.
    pub fn put_rows_from_front(&mut self, verbose: bool) {
        let rows = std::mem::take(&mut self.rows);
        for row in &rows {
            self.print_row(row, verbose);
        }
        self.out.push('\n');
    }

    /// Emit in push order with levels rebased to the first row, so a
    /// compound listing starts at column 0. Non-verbose shows only the
    /// compound itself and its direct members.
    pub fn put_rows_from_front_normalized(&mut self, verbose: bool) {
        let rows = std::mem::take(&mut self.rows);
        for row in &rows {
            self.print_row_normalized(row, verbose);
        }
        self.normalized_base = None;
        self.out.push('\n');
    }

    fn print_row(&mut self, row: &Row, verbose: bool) {
        match tag(row.flags) {
            RowTag::File => {
                if self.is_dup(row) {
                    return;
                }
                // New translation unit: everything below it is fair game
                // again.
                self.clear_dups();
                self.set_dup(row);
                writeln!(self.out, "FILE: {}", row.decl).expect("String write never fails");
            }
            RowTag::Exported => {
                if self.set_dup(row) {
                    writeln!(self.out, " EXPORTED: {} {}", row.decl, row.name)
                        .expect("String write never fails");
                }
            }
            RowTag::Arg => {
                if self.set_dup(row) {
                    let label = if row.flags.contains(Ctl::RETURN) {
                        "RETURN"
                    } else {
                        "ARG"
                    };
                    writeln!(self.out, "  {}: {} {}", label, row.decl, row.name)
                        .expect("String write never fails");
                }
            }
            RowTag::Nested => {
                if self.set_dup(row) && verbose {
                    writeln!(
                        self.out,
                        "{}{} {}",
                        indent(row.level),
                        row.decl,
                        row.name
                    )
                    .expect("String write never fails");
                }
            }
        }
    }

    fn print_row_normalized(&mut self, row: &Row, verbose: bool) {
        let base = *self.normalized_base.get_or_insert(row.level);
        let current = row.level.saturating_sub(base);

        if !verbose && current > 1 {
            return;
        }
        if !self.set_dup(row) {
            return;
        }

        if current > 0 {
            writeln!(self.out, "{}{} {}", indent(current), row.decl, row.name)
                .expect("String write never fails");
        } else {
            writeln!(self.out, "{}", row.decl).expect("String write never fails");
        }
    }
}

fn indent(padsize: u32) -> String {
    " ".repeat(padsize as usize)
}
