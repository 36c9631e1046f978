//! Line format of the snapshot file: one `key:value` pair per line.
//!
//! There is no escaping. A line is split at the first delimiter, so a value
//! may contain `:` but a key that contains one will not read back intact.

use std::fmt::Display;
use std::io::{self, Write};
use std::str::FromStr;

use crate::types::Entry;

pub(crate) const DELIMITER: char = ':';

pub(crate) trait LineEncode {
    fn encode_line<W: Write>(&self, w: &mut W) -> io::Result<()>;
}

pub(crate) trait LineDecode: Sized {
    /// `None` for a line that should be skipped.
    fn decode_line(line: &str) -> Option<Self>;
}

/// Splits a line into non-empty key and value text.
pub(crate) fn split_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(DELIMITER)?;
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

impl<K, V> LineEncode for Entry<K, V>
where
    K: Display,
    V: Display,
{
    fn encode_line<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{}{}{}", self.key, DELIMITER, self.value)
    }
}

impl<K, V> LineDecode for Entry<K, V>
where
    K: FromStr,
    V: FromStr,
{
    fn decode_line(line: &str) -> Option<Self> {
        let (key, value) = split_line(line)?;
        let key = key.parse().ok()?;
        let value = value.parse().ok()?;
        Some(Entry::new(key, value))
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::{split_line, LineDecode, LineEncode};
    use crate::types::Entry;

    #[test]
    fn test_encode() {
        let mut buf = Vec::new();
        Entry::new(10, "ten".to_string()).encode_line(&mut buf).unwrap();
        Entry::new(-3, "minus".to_string()).encode_line(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "10:ten\n-3:minus\n");
    }

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("1:one"), Some(("1", "one")));
        assert_eq!(split_line("1:a:b"), Some(("1", "a:b")));
        assert_eq!(split_line("no delimiter"), None);
        assert_eq!(split_line(":value"), None);
        assert_eq!(split_line("key:"), None);
        assert_eq!(split_line(""), None);
    }

    #[test]
    fn test_decode_line() {
        let entry = Entry::<i32, String>::decode_line("20:二十").unwrap();
        assert_eq!(entry, Entry::new(20, "二十".to_string()));
        assert!(Entry::<i32, String>::decode_line("x:y").is_none());
        assert!(Entry::<i32, u8>::decode_line("1:300").is_none());
    }

    #[test]
    fn test_delimiter_in_key_is_lossy() {
        let mut buf = Vec::new();
        Entry::new("a:b".to_string(), "c".to_string())
            .encode_line(&mut buf)
            .unwrap();
        let line = String::from_utf8(buf).unwrap();
        let entry = Entry::<String, String>::decode_line(line.trim_end()).unwrap();
        assert_eq!(entry, Entry::new("a".to_string(), "b:c".to_string()));
    }
}
