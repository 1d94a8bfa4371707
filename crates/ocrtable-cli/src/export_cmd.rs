use std::path::Path;

use ocrtable::{NormalizeOptions, Rendered, TableConverter, XlsxOptions};

use crate::cli::VendorArg;
use crate::shared::{load_tables, report_warnings, select_table};

pub fn run(
    file: &Path,
    output: &Path,
    vendor: VendorArg,
    table_index: usize,
    xlsx_options: XlsxOptions,
    normalize: &NormalizeOptions,
) -> Result<(), i32> {
    if xlsx_options.max_column_width < xlsx_options.min_column_width {
        eprintln!(
            "Error: --max-column-width must be at least {}",
            xlsx_options.min_column_width
        );
        return Err(1);
    }

    let (_, outcome) = load_tables(file, vendor, normalize)?;
    report_warnings(&outcome.warnings);

    let Some(table) = select_table(outcome.value, table_index)? else {
        println!("No table found.");
        return Ok(());
    };

    let converter = TableConverter::new().with_xlsx_options(xlsx_options);
    let bytes = match converter.to_xlsx_bytes(&table) {
        Ok(Rendered::Table(bytes)) => bytes,
        Ok(Rendered::NoTable) => {
            println!("No table found.");
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return Err(1);
        }
    };

    std::fs::write(output, &bytes).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", output.display());
        1
    })?;
    tracing::info!(path = %output.display(), bytes = bytes.len(), "workbook written");

    println!(
        "Wrote {} ({} x {})",
        output.display(),
        table.row_count(),
        table.col_count()
    );
    Ok(())
}
