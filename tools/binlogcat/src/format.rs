use std::fmt::Write as _;

use binlog_decode::Value;
use clap::ValueEnum;

/// How byte-string values are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum BytesStyle {
    /// UTF-8 text when valid, hex otherwise
    Text,
    /// Always hex
    Hex,
}

pub fn render_value(value: &Value, style: BytesStyle) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::U8(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::String(s) => s.to_string(),
        Value::Bytes(b) => match (style, std::str::from_utf8(b)) {
            (BytesStyle::Text, Ok(s)) => s.to_string(),
            _ => hex(b),
        },
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;

    use super::*;

    #[test]
    fn renders_scalars_and_null() {
        assert_eq!(render_value(&Value::Null, BytesStyle::Text), "NULL");
        assert_eq!(render_value(&Value::U16(2011), BytesStyle::Text), "2011");
        assert_eq!(
            render_value(&Value::String(Arc::from("12:34:56")), BytesStyle::Hex),
            "12:34:56"
        );
    }

    #[test]
    fn renders_bytes_by_style() {
        let text = Value::Bytes(Bytes::from_static(b"ok"));
        assert_eq!(render_value(&text, BytesStyle::Text), "ok");
        assert_eq!(render_value(&text, BytesStyle::Hex), "0x6f6b");

        let binary = Value::Bytes(Bytes::from_static(&[0xff, 0x00]));
        assert_eq!(render_value(&binary, BytesStyle::Text), "0xff00");
    }
}
