//! Serialization of redacted payloads.
//!
//! Redacted payloads are written with `", "` and `": "` separators and with
//! every non-ASCII character escaped as `\uXXXX` (surrogate pairs above the
//! BMP), which is the layout downstream consumers of the CSV already read.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

use crate::errors::PiiGuardError;

/// A `serde_json` formatter emitting spaced separators and ASCII-only strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut run_start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[run_start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            run_start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[run_start..].as_bytes())
    }
}

/// Serializes `value` with [`SpacedAsciiFormatter`].
pub fn to_payload_string<T>(value: &T) -> Result<String, PiiGuardError>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedAsciiFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| PiiGuardError::Fatal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn separators_are_spaced() {
        let value = json!({"name": "A", "tags": ["x", "y"]});
        assert_eq!(
            to_payload_string(&value).unwrap(),
            r#"{"name": "A", "tags": ["x", "y"]}"#
        );
    }

    #[test]
    fn non_ascii_is_escaped() {
        let value = json!({"city": "Zürich", "note": "😀"});
        assert_eq!(
            to_payload_string(&value).unwrap(),
            r#"{"city": "Z\u00fcrich", "note": "\ud83d\ude00"}"#
        );
    }

    #[test]
    fn control_characters_keep_json_escapes() {
        let value = json!({"a": "line\nbreak \"quoted\""});
        assert_eq!(
            to_payload_string(&value).unwrap(),
            r#"{"a": "line\nbreak \"quoted\""}"#
        );
    }

    #[test]
    fn field_order_is_preserved() {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"zeta": "1", "alpha": "2", "mid": "3"}"#).unwrap();
        assert_eq!(
            to_payload_string(&map).unwrap(),
            r#"{"zeta": "1", "alpha": "2", "mid": "3"}"#
        );
    }
}
