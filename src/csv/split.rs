//! Splitting a logical line into fields.

use crate::source::find_aligned;
use crate::{Encoding, Record};

/// Field separator in bare mode.
pub const SEPARATOR: char = ',';

/// Field separator in quoted mode: the closing quote of one field, a comma,
/// and the opening quote of the next.
pub const QUOTED_SEPARATOR: &str = "\",\"";

/// Splits `line` into fields.
///
/// In bare mode the line is split on every comma and every field is present,
/// so a line with `n` commas yields `n + 1` fields.
///
/// In quoted mode one leading and one trailing `"` are dropped, each
/// independently of the other, and the rest is split on `","`. Empty fields
/// are absent. A comma inside a quoted field does not split it.
///
/// Quotes are not otherwise interpreted: there are no escape sequences and
/// `""` is not an escaped quote.
///
/// # Panics
///
/// Panics in quoted mode if `line` cannot be encoded in `encoding` or a field
/// cannot be decoded from it. Lines read from a source in the same encoding
/// always round-trip.
#[must_use]
pub fn split(line: &str, has_quotes: bool, encoding: Encoding) -> Record {
    if has_quotes {
        split_quoted(line, encoding)
    } else {
        split_bare(line)
    }
}

fn split_bare(line: &str) -> Record {
    line.split(SEPARATOR)
        .map(|field| Some(field.to_string()))
        .collect::<Vec<_>>()
        .into()
}

fn split_quoted(line: &str, encoding: Encoding) -> Record {
    let line = line.strip_prefix('"').unwrap_or(line);
    let line = line.strip_suffix('"').unwrap_or(line);

    let bytes = encode(line, encoding);
    let separator = encode(QUOTED_SEPARATOR, encoding);
    let width = encoding.unit_width();

    let mut fields = Vec::new();
    let mut start = 0;
    while let Some(idx) = find_aligned(&bytes[start..], &separator, width) {
        fields.push(decode(&bytes[start..start + idx], encoding));
        start += idx + separator.len();
    }
    fields.push(decode(&bytes[start..], encoding));
    fields.into()
}

fn encode(text: &str, encoding: Encoding) -> Vec<u8> {
    match encoding.encode(text) {
        Ok(bytes) => bytes,
        Err(e) => panic!("cannot split {:?}: {}", text, e),
    }
}

fn decode(bytes: &[u8], encoding: Encoding) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    match encoding.decode(bytes) {
        Ok(text) => Some(text),
        Err(e) => panic!("cannot split field: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(record: &Record) -> Vec<Option<&str>> {
        record.iter().collect()
    }

    #[test]
    fn bare() {
        let record = split("1,2,3", false, Encoding::Utf8);
        assert_eq!(fields(&record), vec![Some("1"), Some("2"), Some("3")]);
    }

    #[test]
    fn bare_keeps_empty_fields() {
        let record = split(",,", false, Encoding::Utf8);
        assert_eq!(fields(&record), vec![Some(""), Some(""), Some("")]);
        let record = split("", false, Encoding::Utf8);
        assert_eq!(fields(&record), vec![Some("")]);
    }

    #[test]
    fn bare_does_not_interpret_quotes() {
        let record = split("\"a,b\",c", false, Encoding::Utf8);
        assert_eq!(fields(&record), vec![Some("\"a"), Some("b\""), Some("c")]);
    }

    #[test]
    fn quoted_with_absent_fields() {
        let record = split("\"hoi\",\"lol\",\"\",\"\",\"haha\"", true, Encoding::Utf8);
        assert_eq!(
            fields(&record),
            vec![Some("hoi"), Some("lol"), None, None, Some("haha")]
        );
    }

    #[test]
    fn quoted_keeps_inner_commas() {
        let record = split("\"a,b\",\"c\"", true, Encoding::Utf8);
        assert_eq!(fields(&record), vec![Some("a,b"), Some("c")]);
    }

    #[test]
    fn quoted_trailing_absent_field() {
        let record = split("\"a\",\"\"", true, Encoding::Utf8);
        assert_eq!(fields(&record), vec![Some("a"), None]);
    }

    #[test]
    fn quoted_strips_quotes_independently() {
        let record = split("\"a\",\"b", true, Encoding::Utf8);
        assert_eq!(fields(&record), vec![Some("a"), Some("b")]);
        let record = split("a\",\"b\"", true, Encoding::Utf8);
        assert_eq!(fields(&record), vec![Some("a"), Some("b")]);
        let record = split("a,b", true, Encoding::Utf8);
        assert_eq!(fields(&record), vec![Some("a,b")]);
    }

    #[test]
    fn quoted_empty_line() {
        assert_eq!(fields(&split("", true, Encoding::Utf8)), vec![None]);
        assert_eq!(fields(&split("\"", true, Encoding::Utf8)), vec![None]);
        assert_eq!(fields(&split("\"\"", true, Encoding::Utf8)), vec![None]);
    }

    #[test]
    fn quoted_in_other_encodings() {
        for encoding in [Encoding::Latin1, Encoding::Utf16Le, Encoding::Utf16Be] {
            let record = split("\"café\",\"\",\"x,y\"", true, encoding);
            assert_eq!(fields(&record), vec![Some("café"), None, Some("x,y")]);
        }
    }

    #[test]
    #[should_panic]
    fn quoted_unrepresentable() {
        let _ = split("\"é\",\"a\"", true, Encoding::Ascii);
    }
}
