//! Dialects, headerless input and options loaded from JSON.
//!
//! Run with: cargo run --example custom_options

use chunkcsv::{from_str, Delimiter, ParserOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Tab separated, single-quoted
    println!("Tab delimiter, ' quotes:");
    let options = ParserOptions::new("sd")
        .with_delimiter(Delimiter::Tab)
        .with_quote_char(b'\'');
    let parser = from_str("name\tqty\n'bolts\tM4'\t120\nnuts\t75\n", options)?;
    println!("{}", parser);

    // No header: columns are only reachable by index
    println!("Headerless, hex columns:");
    let options = ParserOptions::new("xux").with_header(false);
    let parser = from_str("ff,0xDEADBEEF\n-1,-1\n", options)?;
    println!("{}", parser);
    if let Some(masks) = parser.values_by_index(1).and_then(|v| v.as_u32()) {
        println!("unsigned masks: {:?}\n", masks);
    }

    // Options from a config file
    println!("Options from JSON:");
    let json = r#"{ "format": "L-s", "delimiter": "semicolon", "max_buffer": 256 }"#;
    let options: ParserOptions = serde_json::from_str(json)?;
    let parser = from_str("id;secret;label\n1;x;first\n2;y;second\n", options)?;
    println!("{}", parser);

    Ok(())
}
