use std::path::Path;

use ocrtable::{NormalizeOptions, Rendered, Table, TableConverter, TextOptions};

use crate::cli::{RenderFormat, VendorArg};
use crate::shared::{load_tables, report_warnings, select_table};

pub fn run(
    file: &Path,
    vendor: VendorArg,
    format: RenderFormat,
    table_index: usize,
    text_options: TextOptions,
    normalize: &NormalizeOptions,
) -> Result<(), i32> {
    let (_, outcome) = load_tables(file, vendor, normalize)?;
    report_warnings(&outcome.warnings);

    let Some(table) = select_table(outcome.value, table_index)? else {
        println!("No table found.");
        return Ok(());
    };

    let converter = TableConverter::new().with_text_options(text_options);
    let rendered = match format {
        RenderFormat::Html => converter.to_html(&table),
        RenderFormat::Text => converter.to_text(&table),
        RenderFormat::Clipboard => converter.to_clipboard_html(&table),
        RenderFormat::Json => Ok(to_json(&table)?),
    };

    match rendered {
        Ok(Rendered::Table(output)) => {
            println!("{output}");
            Ok(())
        }
        Ok(Rendered::NoTable) => {
            println!("No table found.");
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Err(1)
        }
    }
}

fn to_json(table: &Table) -> Result<Rendered<String>, i32> {
    if table.is_empty() {
        return Ok(Rendered::NoTable);
    }
    serde_json::to_string_pretty(table)
        .map(Rendered::Table)
        .map_err(|e| {
            eprintln!("Error: failed to serialize table: {e}");
            1
        })
}
