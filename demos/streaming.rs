//! Feeding a parser one fragment at a time.
//!
//! Run with: cargo run --example streaming

use chunkcsv::{Parser, ParserOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Fragments as they might arrive from a serial line; rows, quoted
    // fields and CR/LF pairs are all cut mid-way.
    let fragments: [&[u8]; 6] = [
        b"station,temp,hum",
        b"idity\r",
        b"\n\"North, roof\",21.5,4",
        b"0\r\n\"South \"\"annex",
        b"\"\"\",19.25,55\r\n",
        b"Cellar,12,80",
    ];

    let mut parser = Parser::new(ParserOptions::new("sfuc"))?;
    for fragment in fragments {
        parser.supply(fragment)?;
        println!(
            "supplied {:2} bytes -> {} rows, {} bytes pending",
            fragment.len(),
            parser.row_count(),
            parser.leftover_len()
        );
    }
    parser.finalize();
    println!("finalized -> {} rows\n", parser.row_count());

    let stations = parser
        .values_by_name("station")
        .and_then(|v| v.as_strings())
        .unwrap_or_default();
    let temps = parser
        .values_by_name("temp")
        .and_then(|v| v.as_f32())
        .unwrap_or_default();
    let humidity = parser
        .values_by_name("humidity")
        .and_then(|v| v.as_u8())
        .unwrap_or_default();

    for ((station, temp), hum) in stations.iter().zip(temps).zip(humidity) {
        println!("{:<16} {:>6.2} C {:>3} %", station, temp, hum);
    }

    println!("\n{}", parser);
    Ok(())
}
