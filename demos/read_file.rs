//! Parsing a file in small blocks.
//!
//! Run with: cargo run --example read_file -- <path> <format> [block]

use chunkcsv::{Parser, ParserOptions, TracingSink};
use std::env;
use std::error::Error;
use std::fs::File;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let (path, format) = match (args.next(), args.next()) {
        (Some(path), Some(format)) => (path, format),
        _ => {
            eprintln!("usage: read_file <path> <format> [block]");
            std::process::exit(2);
        }
    };
    let block = match args.next() {
        Some(block) => block.parse()?,
        None => chunkcsv::parser::DEFAULT_READ_BLOCK,
    };

    let file = File::open(&path)?;
    let mut parser = Parser::with_sink(ParserOptions::new(format), TracingSink)?;
    parser.read_from(file, block)?;

    print!("{}", parser);
    for warning in parser.warnings() {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}
