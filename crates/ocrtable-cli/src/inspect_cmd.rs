use std::path::Path;

use ocrtable::{NormalizeOptions, Table, UnicodeNorm, Vendor, Warning, build_grid};

use crate::cli::{InspectFormat, VendorArg};
use crate::shared::load_tables;

pub fn run(file: &Path, vendor: VendorArg, format: InspectFormat) -> Result<(), i32> {
    // Inspect reports on the response as recognized, so text is left alone.
    let options = NormalizeOptions {
        unicode_norm: UnicodeNorm::None,
        ..NormalizeOptions::default()
    };
    let (vendor, outcome) = load_tables(file, vendor, &options)?;

    match format {
        InspectFormat::Text => write_text(vendor, &outcome.value, &outcome.warnings),
        InspectFormat::Json => write_json(vendor, &outcome.value, &outcome.warnings),
    }
}

struct TableSummary {
    rows: usize,
    cols: usize,
    cells: usize,
    merged: usize,
    header: usize,
    footer: usize,
}

fn summarize(table: &Table) -> TableSummary {
    let grid = build_grid(table);
    TableSummary {
        rows: grid.row_count(),
        cols: grid.col_count(),
        cells: table.cells.len(),
        merged: grid.cells().iter().filter(|c| c.is_merged()).count(),
        header: table.header.len(),
        footer: table.footer.len(),
    }
}

fn write_text(vendor: Vendor, tables: &[Table], warnings: &[Warning]) -> Result<(), i32> {
    println!("Vendor: {vendor}");
    println!("Tables: {}", tables.len());

    for (i, table) in tables.iter().enumerate() {
        let summary = summarize(table);
        println!();
        println!("Table {}:", i + 1);
        println!("  Dimensions: {} x {}", summary.rows, summary.cols);
        println!("  Cells: {}", summary.cells);
        println!("  Merged cells: {}", summary.merged);
        println!("  Header blocks: {}", summary.header);
        println!("  Footer blocks: {}", summary.footer);
    }

    // Grid warnings are already folded into the normalization outcome.
    println!();
    println!("Warnings: {}", warnings.len());
    for warning in warnings {
        println!("  Warning: {warning}");
    }
    Ok(())
}

fn write_json(vendor: Vendor, tables: &[Table], warnings: &[Warning]) -> Result<(), i32> {
    let table_infos: Vec<serde_json::Value> = tables
        .iter()
        .enumerate()
        .map(|(i, table)| {
            let summary = summarize(table);
            serde_json::json!({
                "table": i + 1,
                "rows": summary.rows,
                "cols": summary.cols,
                "cells": summary.cells,
                "merged_cells": summary.merged,
                "header_blocks": summary.header,
                "footer_blocks": summary.footer,
            })
        })
        .collect();

    let output = serde_json::json!({
        "vendor": vendor.name(),
        "tables": table_infos,
        "warnings": warnings,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: failed to serialize summary: {e}");
            Err(1)
        }
    }
}
