//! Literal text for scalar and string constants.

use std::fmt::Write;

/// Shortest round-trip text of a float; non-finite values use the
/// preamble's `FLT_*` macros.
pub fn float_literal(value: f32) -> String {
    if value.is_nan() {
        "FLT_NAN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "FLT_POS_INF" } else { "FLT_NEG_INF" }.to_string()
    } else {
        format!("{value:?}")
    }
}

/// Half literal, constructed from its float widening.
pub fn half_literal(value: f32) -> String {
    if value.is_nan() {
        "HALF_NAN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "HALF_POS_INF" } else { "HALF_NEG_INF" }.to_string()
    } else {
        format!("half( {value:?} )")
    }
}

/// Quoted, escaped C++ string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for byte in value.bytes() {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7e => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    out.push('"');
    out
}
