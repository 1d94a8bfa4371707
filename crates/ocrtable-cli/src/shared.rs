use std::io::{self, Read};
use std::path::Path;

use ocrtable::{NormalizeOptions, Outcome, Table, Vendor, Warning, normalize_auto};
use tracing_subscriber::EnvFilter;

use crate::cli::VendorArg;

/// Read a response body from a file, or from stdin when the path is `-`.
///
/// Returns `Err(1)` with a message printed to stderr if the file is missing
/// or unreadable.
pub fn read_input(file: &Path) -> Result<String, i32> {
    if file.as_os_str() == "-" {
        let mut body = String::new();
        return io::stdin()
            .read_to_string(&mut body)
            .map(|_| body)
            .map_err(|e| {
                eprintln!("Error: failed to read stdin: {e}");
                1
            });
    }

    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })
}

/// Read and normalize a response, detecting the vendor unless one is given.
pub fn load_tables(
    file: &Path,
    vendor: VendorArg,
    options: &NormalizeOptions,
) -> Result<(Vendor, Outcome<Vec<Table>>), i32> {
    let body = read_input(file)?;
    let result = match vendor.to_vendor() {
        Some(vendor) => vendor
            .normalize_str(&body, options)
            .map(|outcome| (vendor, outcome)),
        None => normalize_auto(&body, options),
    };
    result.map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Pick the 1-based `index`th table.
///
/// `Ok(None)` means the response holds no table at all, which is not an
/// error; an index past the end of a non-empty list is.
pub fn select_table(tables: Vec<Table>, index: usize) -> Result<Option<Table>, i32> {
    if tables.is_empty() {
        return Ok(None);
    }
    let count = tables.len();
    if index == 0 || index > count {
        eprintln!("Error: table {index} out of range (response has {count} table(s))");
        return Err(1);
    }
    Ok(tables.into_iter().nth(index - 1))
}

/// Print warnings to stderr.
pub fn report_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Install a stderr tracing subscriber when `--verbose` is given.
///
/// `RUST_LOG` overrides the default `debug` level.
pub fn init_tracing(verbose: bool) {
    if !verbose {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocrtable::CellSpan;

    fn tables(n: usize) -> Vec<Table> {
        (0..n)
            .map(|i| Table::new(vec![CellSpan::unit(format!("t{i}"), 0, 0)]))
            .collect()
    }

    #[test]
    fn select_first_table() {
        let table = select_table(tables(2), 1).unwrap().unwrap();
        assert_eq!(table.cells[0].text, "t0");
    }

    #[test]
    fn select_second_table() {
        let table = select_table(tables(2), 2).unwrap().unwrap();
        assert_eq!(table.cells[0].text, "t1");
    }

    #[test]
    fn select_from_empty_is_none() {
        assert!(select_table(Vec::new(), 3).unwrap().is_none());
    }

    #[test]
    fn select_out_of_range() {
        assert_eq!(select_table(tables(1), 2), Err(1));
        assert_eq!(select_table(tables(1), 0), Err(1));
    }

    #[test]
    fn read_missing_file() {
        assert_eq!(read_input(Path::new("/nonexistent/resp.json")), Err(1));
    }
}
