use std::str::FromStr;

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of file, expected '{exp}'")]
    UnexpectedEof { exp: char },

    #[error("Expected '{exp}', but got '{got}'")]
    UnexpectedToken { exp: char, got: char },
}

/// Takes the next character from the slice. If none is found, the slice is left as-is.
pub const fn take_1(bytes: &[u8]) -> (Option<u8>, &[u8]) {
    let [b, bytes @ ..] = bytes else {
        return (None, bytes);
    };

    (Some(*b), bytes)
}

/// Like `take_1`, but doesn't consume the token
pub fn peek_1(bytes: &[u8]) -> Option<u8> {
    let [b, _bytes @ ..] = bytes else { return None };

    Some(*b)
}

/// Expects the next character in `bytes` to be `b`. Otherwise leaves `bytes` unchanged.
pub fn expect(b: u8, bytes: &[u8]) -> ParseResult<&[u8]> {
    let (Some(a), bytes) = take_1(bytes) else {
        return Err(ParseError::UnexpectedEof { exp: b as char });
    };

    if a != b {
        return Err(ParseError::UnexpectedToken {
            exp: b as char,
            got: a as char,
        });
    }

    Ok(bytes)
}

/// Advance the slice until `P` is satisfied, without consuming the matching byte.
///
/// If `P` is never satisfied, the whole slice is taken.
pub fn take_until_fn<P>(p: P, bytes: &[u8]) -> (&[u8], &[u8])
where
    P: Fn(u8) -> bool,
{
    let i = bytes.iter().position(|&a| p(a)).unwrap_or(bytes.len());

    bytes.split_at(i)
}

/// Advance the slice until byte `b` is found, without consuming it.
pub fn take_until(b: u8, bytes: &[u8]) -> (&[u8], &[u8]) {
    take_until_fn(|a| a == b, bytes)
}

/// Like `take_until`, but stops at the first ascii whitespace character found.
pub fn take_until_ws(bytes: &[u8]) -> (&[u8], &[u8]) {
    take_until_fn(|a| a.is_ascii_whitespace(), bytes)
}

/// Takes a single line. Returns `None` once the input is exhausted.
///
/// A linebreak is any of
/// * `\n`
/// * `\r\n`
///
/// The linebreak is consumed but not included in the line.
pub fn take_line(bytes: &[u8]) -> (Option<&[u8]>, &[u8]) {
    if bytes.is_empty() {
        return (None, bytes);
    }

    let (line, rest) = take_until(b'\n', bytes);
    let (_, rest) = take_1(rest);

    let line = line.strip_suffix(b"\r").unwrap_or(line);

    (Some(line), rest)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Input is not valid UTF-8")]
    InvalidUtf8,

    #[error("Failed to convert \"{str}\"")]
    ParseError { str: String },
}

/// Converts `&[u8]` to `T` if `T: FromStr`. Surrounding whitespace is ignored.
pub fn convert<T: FromStr>(bytes: &[u8]) -> Result<T, ConvertError> {
    let Ok(str) = std::str::from_utf8(bytes) else {
        return Err(ConvertError::InvalidUtf8);
    };

    let str = str.trim();

    let Ok(res) = str.parse::<T>() else {
        return Err(ConvertError::ParseError {
            str: str.to_string(),
        });
    };

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::ConvertError;

    #[test]
    fn take_line_handles_crlf() {
        let (line, rest) = super::take_line(b"12\r\nXX\n");

        assert_eq!(line, Some(b"12".as_slice()));
        assert_eq!(rest, b"XX\n");
    }

    #[test]
    fn take_line_without_trailing_newline() {
        let (line, rest) = super::take_line(b"last");

        assert_eq!(line, Some(b"last".as_slice()));
        assert_eq!(rest, b"");
        assert_eq!(super::take_line(rest).0, None);
    }

    #[test]
    fn take_until_missing_byte_takes_everything() {
        let (head, rest) = super::take_until(b'/', b"b3");

        assert_eq!(head, b"b3");
        assert_eq!(rest, b"");
    }

    #[test]
    fn convert_trims_and_reports() {
        assert_eq!(super::convert::<usize>(b" 42 "), Ok(42));
        assert_eq!(
            super::convert::<usize>(b"4x"),
            Err(ConvertError::ParseError {
                str: "4x".to_string()
            })
        );
    }
}
