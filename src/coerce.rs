//! Permissive text-to-number coercion.
//!
//! Fields are converted the way C's `atof`/`atol`/`strtoul` would on a
//! 64-bit host: leading whitespace is skipped, the longest numeric prefix is
//! used and anything after it is ignored. Text without a numeric prefix
//! becomes zero. Integers accumulate with wrapping arithmetic and are then
//! truncated to the column width, so out-of-range input never fails:
//!
//! ```rust
//! use chunkcsv::coerce::{parse_decimal, parse_float, parse_hex};
//!
//! assert_eq!(parse_decimal(b"-5") as u16, 65531);
//! assert_eq!(parse_decimal(b"70000") as i16, 4464);
//! assert_eq!(parse_hex(b"0xFFFFFFFF") as i32, -1);
//! assert_eq!(parse_float(b" 2.5kg"), 2.5);
//! assert_eq!(parse_float(b"n/a"), 0.0);
//! ```

use crate::format::{ColumnFormat, ColumnType};
use crate::value::Value;

fn skip_whitespace(text: &[u8]) -> &[u8] {
    let start = text
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c))
        .unwrap_or(text.len());
    &text[start..]
}

/// Splits an optional sign off the front; returns (negative, rest).
fn split_sign(text: &[u8]) -> (bool, &[u8]) {
    match text.first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn accumulate(digits: &[u8], radix: u32) -> i64 {
    digits
        .iter()
        .map_while(|&b| (b as char).to_digit(radix))
        .fold(0i64, |acc, d| {
            acc.wrapping_mul(i64::from(radix))
                .wrapping_add(i64::from(d))
        })
}

/// Base-10 integer prefix, wrapping on overflow.
#[must_use]
pub fn parse_decimal(text: &[u8]) -> i64 {
    let (negative, digits) = split_sign(skip_whitespace(text));
    let value = accumulate(digits, 10);
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Base-16 integer prefix with an optional `0x`/`0X` prefix, wrapping on overflow.
#[must_use]
pub fn parse_hex(text: &[u8]) -> i64 {
    let (negative, mut digits) = split_sign(skip_whitespace(text));
    if digits.len() > 2
        && digits[0] == b'0'
        && matches!(digits[1], b'x' | b'X')
        && digits[2].is_ascii_hexdigit()
    {
        digits = &digits[2..];
    }
    let value = accumulate(digits, 16);
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Length of the longest prefix that reads as a decimal float.
fn float_prefix_len(text: &[u8]) -> usize {
    let mut i = usize::from(matches!(text.first(), Some(b'+' | b'-')));

    for word in [&b"infinity"[..], b"inf", b"nan"] {
        if text.len() >= i + word.len() && text[i..i + word.len()].eq_ignore_ascii_case(word) {
            return i + word.len();
        }
    }

    let int_digits = text[i..].iter().take_while(|b| b.is_ascii_digit()).count();
    i += int_digits;
    let mut frac_digits = 0;
    if text.get(i) == Some(&b'.') {
        frac_digits = text[i + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if int_digits + frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(text.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(text.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = text[j.min(text.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}

/// Decimal float prefix; `0.0` when there is none.
#[must_use]
pub fn parse_float(text: &[u8]) -> f32 {
    let text = skip_whitespace(text);
    let len = float_prefix_len(text);
    std::str::from_utf8(&text[..len])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .map_or(0.0, |v| v as f32)
}

/// Converts raw field bytes into the value stored for `format`.
///
/// Returns `None` for skipped columns.
#[must_use]
pub fn coerce(format: ColumnFormat, raw: &[u8]) -> Option<Value> {
    let value = match (format.ty, format.unsigned) {
        (ColumnType::Skip, _) => return None,
        (ColumnType::Utf8String, _) => Value::Str(String::from_utf8_lossy(raw).into_owned()),
        (ColumnType::Float32, _) => Value::F32(parse_float(raw)),
        (ColumnType::Int32, false) => Value::I32(parse_decimal(raw) as i32),
        (ColumnType::Int32, true) => Value::U32(parse_decimal(raw) as u32),
        (ColumnType::Int16, false) => Value::I16(parse_decimal(raw) as i16),
        (ColumnType::Int16, true) => Value::U16(parse_decimal(raw) as u16),
        (ColumnType::Int8, false) => Value::I8(parse_decimal(raw) as i8),
        (ColumnType::Int8, true) => Value::U8(parse_decimal(raw) as u8),
        (ColumnType::Int32Hex, false) => Value::I32(parse_hex(raw) as i32),
        (ColumnType::Int32Hex, true) => Value::U32(parse_hex(raw) as u32),
    };
    Some(value)
}
