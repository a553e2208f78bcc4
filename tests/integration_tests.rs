use chunkcsv::{
    from_reader, from_slice, from_str, ColumnType, Delimiter, Error, FnSink, Parser,
    ParserOptions, Value, Warning,
};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

fn headerless(format: &str) -> ParserOptions {
    ParserOptions::new(format).with_header(false)
}

fn strings(parser: &Parser, name: &str) -> Vec<String> {
    parser
        .values_by_name(name)
        .and_then(|v| v.as_strings())
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}

#[test]
fn test_escaped_quotes() {
    let parser = from_str("\"He said \"\"hi\"\"\",5\n", headerless("sd")).unwrap();
    assert_eq!(parser.row_count(), 1);
    assert_eq!(
        parser.values_by_index(0).unwrap().as_strings(),
        Some(&["He said \"hi\"".to_string()][..])
    );
    assert_eq!(parser.values_by_index(1).unwrap().as_i16(), Some(&[5][..]));
}

#[test]
fn test_skip_column() {
    let parser = from_str("a,b,c\n1,2,3\n4,5,6\n", ParserOptions::new("L-c")).unwrap();
    assert_eq!(parser.row_count(), 2);
    assert_eq!(parser.column_count(), 3);
    assert_eq!(parser.values_by_name("a").unwrap().as_i32(), Some(&[1, 4][..]));
    assert_eq!(parser.values_by_name("c").unwrap().as_i8(), Some(&[3, 6][..]));
    assert!(parser.values_by_name("b").is_none());
    assert!(parser.values_by_index(1).is_none());
    assert_eq!(
        parser.header().collect::<Vec<_>>(),
        vec![Some("a"), None, Some("c")]
    );
}

#[test]
fn test_unsigned_wraps() {
    let parser = from_str("-5\n", headerless("ud")).unwrap();
    assert_eq!(parser.values_by_index(0).unwrap().as_u16(), Some(&[65531][..]));
}

#[test]
fn test_unterminated_quote_completed_by_next_supply() {
    let mut parser = Parser::new(headerless("s")).unwrap();
    parser.supply(b"\"abc").unwrap();
    assert_eq!(parser.row_count(), 0);
    assert_eq!(parser.leftover_len(), 4);

    parser.supply(b"def\"\n").unwrap();
    assert_eq!(parser.row_count(), 1);
    assert_eq!(parser.leftover_len(), 0);
    assert_eq!(
        parser.values_by_index(0).unwrap().as_strings(),
        Some(&["abcdef".to_string()][..])
    );
}

#[test]
fn test_finalize_is_idempotent() {
    let mut parser = Parser::new(headerless("Ls")).unwrap();
    parser.supply(b"1,a\n2,b").unwrap();
    parser.finalize();
    let columns = parser.columns().to_vec();
    let warnings = parser.warnings().to_vec();

    parser.finalize();
    parser.finalize();
    assert_eq!(parser.row_count(), 2);
    assert_eq!(parser.columns(), &columns[..]);
    assert_eq!(parser.warnings(), &warnings[..]);
}

#[test]
fn test_closing_quote_and_delimiter_in_separate_chunks() {
    let mut parser = Parser::new(ParserOptions::new("sL")).unwrap();
    for chunk in ["name,n\n", "\"ab\"", ",1\n"] {
        parser.supply_str(chunk).unwrap();
    }
    parser.finalize();
    assert_eq!(strings(&parser, "name"), vec!["ab"]);
    assert_eq!(parser.values_by_name("n").unwrap().as_i32(), Some(&[1][..]));
}

#[test]
fn test_escaped_pair_split_across_chunks() {
    let mut parser = Parser::new(headerless("sL")).unwrap();
    parser.supply(b"\"a\"").unwrap();
    assert_eq!(parser.row_count(), 0);
    parser.supply(b"\"b\",1\n").unwrap();
    assert_eq!(
        parser.values_by_index(0).unwrap().as_strings(),
        Some(&["a\"b".to_string()][..])
    );
}

#[test]
fn test_crlf_split_across_chunks() {
    let mut parser = Parser::new(headerless("LL")).unwrap();
    parser.supply(b"1,2\r").unwrap();
    parser.supply(b"\n3,4\r").unwrap();
    parser.supply(b"\n").unwrap();
    parser.finalize();
    assert_eq!(parser.row_count(), 2);
    assert_eq!(parser.values_by_index(0).unwrap().as_i32(), Some(&[1, 3][..]));
    assert_eq!(parser.values_by_index(1).unwrap().as_i32(), Some(&[2, 4][..]));
    assert!(parser.warnings().is_empty());
}

#[test]
fn test_quoted_line_break_split_across_chunks() {
    let mut parser = Parser::new(headerless("sc")).unwrap();
    parser.supply(b"\"line1\n").unwrap();
    parser.supply(b"line2\",7\n").unwrap();
    assert_eq!(
        parser.values_by_index(0).unwrap().as_strings(),
        Some(&["line1\nline2".to_string()][..])
    );
    assert_eq!(parser.values_by_index(1).unwrap().as_i8(), Some(&[7][..]));
}

#[test]
fn test_blank_lines_are_absorbed() {
    let parser = from_str("a\n1\n\n\r\n2\n", ParserOptions::new("L")).unwrap();
    assert_eq!(parser.values_by_name("a").unwrap().as_i32(), Some(&[1, 2][..]));
}

#[test]
fn test_header_names_are_trimmed() {
    let parser = from_str(" id ,\tlabel\n1,x\n", ParserOptions::new("Ls")).unwrap();
    assert!(parser.values_by_name("id").is_some());
    assert_eq!(strings(&parser, "label"), vec!["x"]);
    assert!(parser.values_by_name(" id ").is_none());
}

#[test]
fn test_all_numeric_types() {
    let input = "1.25,-100000,-300,-3,ff,4000000000,65535,255,0xDEADBEEF\n";
    let parser = from_str(input, headerless("fLdcxuLuducux")).unwrap();
    let row: Vec<Value> = parser
        .columns()
        .iter()
        .map(|c| c.values().get(0).unwrap())
        .collect();
    assert_eq!(
        row,
        vec![
            Value::F32(1.25),
            Value::I32(-100_000),
            Value::I16(-300),
            Value::I8(-3),
            Value::I32(255),
            Value::U32(4_000_000_000),
            Value::U16(65535),
            Value::U8(255),
            Value::U32(0xDEAD_BEEF),
        ]
    );
}

#[test]
fn test_permissive_coercion() {
    let parser = from_str("abc,12kg,,  7.5e1x\n", headerless("LLLf")).unwrap();
    assert_eq!(parser.values_by_index(0).unwrap().as_i32(), Some(&[0][..]));
    assert_eq!(parser.values_by_index(1).unwrap().as_i32(), Some(&[12][..]));
    assert_eq!(parser.values_by_index(2).unwrap().as_i32(), Some(&[0][..]));
    assert_eq!(parser.values_by_index(3).unwrap().as_f32(), Some(&[75.0][..]));
}

#[test]
fn test_trailing_fields_without_line_break() {
    let parser = from_str("a,b\n1,x\n2,", ParserOptions::new("Ls")).unwrap();
    assert_eq!(parser.row_count(), 2);
    assert_eq!(strings(&parser, "b"), vec!["x", ""]);
}

#[test]
fn test_incomplete_row_is_not_committed() {
    let parser = from_str("1,2,3\n4,5", headerless("LLL")).unwrap();
    assert_eq!(parser.row_count(), 1);
    for column in parser.columns() {
        assert_eq!(column.values().len(), 1);
    }
    assert_eq!(
        parser.warnings(),
        &[Warning::IncompleteRow {
            row: 1,
            fields: 2,
            expected: 3
        }]
    );
}

#[test]
fn test_unterminated_quote_at_end_of_input() {
    let mut parser = Parser::new(headerless("Ls")).unwrap();
    parser.supply(b"1,ok\n2,\"never closed").unwrap();
    parser.finalize();
    assert_eq!(parser.row_count(), 1);
    assert!(parser
        .warnings()
        .iter()
        .any(|w| matches!(w, Warning::UnterminatedQuote { row: 1, column: 1, .. })));
}

#[test]
fn test_finalize_strict_reports_unterminated_quote() {
    let mut parser = Parser::new(headerless("s")).unwrap();
    parser.supply(b"\"open").unwrap();
    assert_eq!(
        parser.finalize_strict(),
        Err(Error::UnterminatedQuote { row: 0, column: 0 })
    );
    assert_eq!(parser.finalize_strict(), Ok(()));
}

#[test]
fn test_alternative_dialects() {
    let options = ParserOptions::new("Ls")
        .with_delimiter(Delimiter::Tab)
        .with_quote_char(b'\'');
    let parser = from_str("a\tb\n1\t'x\ty'\n", options).unwrap();
    assert_eq!(strings(&parser, "b"), vec!["x\ty"]);

    let parser = from_str("a;b\n1;2\n", ParserOptions::new("LL").with_delimiter(b';')).unwrap();
    assert_eq!(parser.values_by_name("b").unwrap().as_i32(), Some(&[2][..]));

    let options = ParserOptions::new("LL").with_delimiter(Delimiter::Pipe);
    let parser = from_str("a|b\n1|2\n", options).unwrap();
    assert_eq!(parser.values_by_name("a").unwrap().as_i32(), Some(&[1][..]));
}

#[test]
fn test_invalid_configuration() {
    assert_eq!(Parser::new(ParserOptions::new("")).unwrap_err(), Error::EmptyFormat);
    assert_eq!(Parser::new(ParserOptions::new(" \t ")).unwrap_err(), Error::EmptyFormat);
    assert!(matches!(
        Parser::new(ParserOptions::new("s").with_delimiter(b'\n')),
        Err(Error::InvalidOption { option: "delimiter", .. })
    ));
    assert!(matches!(
        Parser::new(ParserOptions::new("s").with_quote_char(b',')),
        Err(Error::InvalidOption { option: "quote_char", .. })
    ));
}

#[test]
fn test_format_warnings_reach_the_sink() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let seen = Arc::clone(&seen);
        FnSink(move |w: &Warning| seen.lock().unwrap().push(w.clone()))
    };

    let mut parser = Parser::with_sink(ParserOptions::new("Lzus").with_header(false), sink).unwrap();
    assert_eq!(parser.column_count(), 3);
    assert_eq!(parser.format()[1].ty, ColumnType::Skip);

    parser.supply(b"1,2,x\n3").unwrap();
    parser.finalize();

    let seen = seen.lock().unwrap();
    assert_eq!(&seen[..], parser.warnings());
    assert_eq!(
        &seen[..],
        &[
            Warning::UnknownFormatTag { column: 1, tag: 'z' },
            Warning::UnsignedNotApplicable { column: 2, tag: 's' },
            Warning::IncompleteRow {
                row: 1,
                fields: 1,
                expected: 3
            },
        ]
    );
}

#[test]
fn test_single_byte_supply() {
    let input = b"id,name\r\n1,\"Smith, \"\"J\"\"\"\r\n2,Doe\r\n";
    let mut parser = Parser::new(ParserOptions::new("cs")).unwrap();
    for &byte in input.iter() {
        parser.supply_byte(byte).unwrap();
    }
    parser.finalize();
    assert_eq!(parser.values_by_name("id").unwrap().as_i8(), Some(&[1, 2][..]));
    assert_eq!(strings(&parser, "name"), vec!["Smith, \"J\"", "Doe"]);
}

#[test]
fn test_from_reader_and_from_slice_agree() {
    let input = b"t,v\n0,1.5\n1,2.5\n2,3.5\n".to_vec();
    let a = from_reader(Cursor::new(input.clone()), ParserOptions::new("Lf")).unwrap();
    let b = from_slice(&input, ParserOptions::new("Lf")).unwrap();
    assert_eq!(a.columns(), b.columns());
    assert_eq!(
        a.values_by_name("v").unwrap().as_f32(),
        Some(&[1.5, 2.5, 3.5][..])
    );
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let parser = from_slice(b"\xffok\n", headerless("s")).unwrap();
    assert_eq!(
        parser.values_by_index(0).unwrap().as_strings(),
        Some(&["\u{fffd}ok".to_string()][..])
    );
}

#[test]
fn test_columns_serialize_to_json() {
    let parser = from_str("id,name\n1,a\n2,b\n", ParserOptions::new("Ls")).unwrap();
    let json = serde_json::to_value(parser.columns()).unwrap();
    assert_eq!(json[0]["name"], "id");
    assert_eq!(json[0]["values"], serde_json::json!([1, 2]));
    assert_eq!(json[1]["values"], serde_json::json!(["a", "b"]));
}

#[test]
fn test_dump() {
    let parser = from_str("a,b,c\n1,2,3\n4,5,6\n", ParserOptions::new("L-c")).unwrap();
    let dump = parser.to_string();
    assert!(dump.starts_with("rows = 2, columns = 3\n"));
    assert!(dump.contains("      a | - | c\n"));
    assert!(dump.contains("      4 | - | 6\n"));
}
