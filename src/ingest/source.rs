//! Line-per-field record reading
//!
//! Record files carry one logical field per line. `RecordReader` wraps any
//! `BufRead` and exposes typed field accessors; running out of input mid
//! record and malformed numbers are reported as typed errors so the
//! pipeline can skip the offending record.

use std::io::BufRead;

use rust_decimal::Decimal;

use crate::error::IngestError;

/// Reader over a line-per-field record stream.
pub struct RecordReader<R: BufRead> {
    inner: R,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the next field, or `None` at a clean end of stream.
    ///
    /// Used at record boundaries, where end of input is the normal loop
    /// exit rather than an error.
    pub fn next_field(&mut self) -> Result<Option<String>, IngestError> {
        let mut line = String::new();
        let read = self.inner.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Read a required string field inside a record.
    pub fn field(&mut self, name: &'static str) -> Result<String, IngestError> {
        self.next_field()?
            .ok_or(IngestError::UnexpectedEof { field: name })
    }

    /// Read a required decimal field inside a record.
    pub fn decimal_field(&mut self, name: &'static str) -> Result<Decimal, IngestError> {
        let raw = self.field(name)?;
        raw.trim()
            .parse()
            .map_err(|_| IngestError::InvalidNumber {
                field: name,
                value: raw,
            })
    }

    /// Read a required integer field inside a record.
    pub fn int_field(&mut self, name: &'static str) -> Result<i64, IngestError> {
        let raw = self.field(name)?;
        raw.trim().parse().map_err(|_| IngestError::InvalidNumber {
            field: name,
            value: raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn make_test_reader(input: &str) -> RecordReader<Cursor<Vec<u8>>> {
        RecordReader::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_fields_in_order() {
        let mut reader = make_test_reader("1\nFood\n12.5\n");
        assert_eq!(reader.int_field("id").unwrap(), 1);
        assert_eq!(reader.field("name").unwrap(), "Food");
        assert_eq!(
            reader.decimal_field("price").unwrap(),
            "12.5".parse::<Decimal>().unwrap()
        );
        assert!(reader.next_field().unwrap().is_none());
    }

    #[test]
    fn test_crlf_lines() {
        let mut reader = make_test_reader("Zagreb\r\n");
        assert_eq!(reader.field("city").unwrap(), "Zagreb");
    }

    #[test]
    fn test_eof_mid_record() {
        let mut reader = make_test_reader("1\n");
        reader.int_field("id").unwrap();
        let err = reader.field("name").unwrap_err();
        assert!(matches!(err, IngestError::UnexpectedEof { field: "name" }));
    }

    #[test]
    fn test_invalid_number() {
        let mut reader = make_test_reader("not-a-number\n");
        let err = reader.int_field("id").unwrap_err();
        assert!(matches!(err, IngestError::InvalidNumber { field: "id", .. }));
    }
}
