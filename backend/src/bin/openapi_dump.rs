//! Print the OpenAPI document as JSON.
//!
//! ```text
//! cargo run --bin openapi-dump -- --pretty > openapi.json
//! ```

use std::io::{self, Write};

use bookshelf::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the API's OpenAPI document")]
struct Cli {
    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let json = if cli.pretty {
        doc.to_pretty_json()
    } else {
        doc.to_json()
    }
    .map_err(io::Error::other)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.write_all(b"\n")
}
