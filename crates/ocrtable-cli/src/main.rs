mod cli;
mod export_cmd;
mod inspect_cmd;
mod render_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use ocrtable::{NormalizeOptions, TextOptions, XlsxOptions};

fn main() {
    let cli = Cli::parse();
    shared::init_tracing(cli.verbose);

    let result = match cli.command {
        cli::Commands::Render {
            ref file,
            vendor,
            format,
            table,
            trim_trailing_tabs,
            with_blocks,
            unicode_norm,
            strict,
        } => render_cmd::run(
            file,
            vendor,
            format,
            table,
            TextOptions {
                trim_trailing_tabs,
                include_header_footer: with_blocks,
            },
            &NormalizeOptions {
                unicode_norm: unicode_norm.to_unicode_norm(),
                strict,
                ..NormalizeOptions::default()
            },
        ),
        cli::Commands::Export {
            ref file,
            ref output,
            vendor,
            table,
            ref sheet_name,
            max_column_width,
            store_numbers,
            unicode_norm,
            strict,
        } => export_cmd::run(
            file,
            output,
            vendor,
            table,
            XlsxOptions {
                sheet_name: sheet_name.clone(),
                max_column_width,
                store_numbers,
                ..XlsxOptions::default()
            },
            &NormalizeOptions {
                unicode_norm: unicode_norm.to_unicode_norm(),
                strict,
                ..NormalizeOptions::default()
            },
        ),
        cli::Commands::Inspect {
            ref file,
            vendor,
            format,
        } => inspect_cmd::run(file, vendor, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
