//! Quote-and-escape-aware field splitter for delimited reference tables.
//!
//! The reference data quotes fields that contain the separator, and inside a
//! quoted field a backslash escapes the quote character (`\"` does not close
//! the field) while a doubled backslash is a literal backslash. Neither the
//! `csv` crate nor `str::split` matches those semantics, so the splitter is
//! written by hand as a single left-to-right scan with one character of
//! lookback.

use thiserror::Error;

pub const DEFAULT_SEPARATOR: char = ',';
pub const DEFAULT_QUOTE: char = '"';

/// Errors that can occur while splitting a line into fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TokenizerError {
    /// The line ended while a quoted region was still open
    #[error("unterminated quoted region")]
    MalformedQuoting,
}

/// Splits one line into trimmed fields.
///
/// Outside a quoted region the separator closes the current field; the
/// finished field is stripped of quote characters at both ends and appended
/// if it is non-empty or `keep_empty` is set. Inside a quoted region every
/// character is kept verbatim, a quote preceded by an unescaped backslash
/// does not close the region, and a trailing separator produces one more
/// empty field when `keep_empty` is set.
pub fn split_fields(
    line: &str,
    separator: char,
    quote: char,
    keep_empty: bool,
) -> Result<Vec<String>, TokenizerError> {
    let mut fields: Vec<String> = Vec::new();
    let mut buffer = String::new();
    let mut in_quote = false;
    let mut last_char = '\0';
    let mut last_was_escaped_backslash = false;

    for c in line.chars() {
        let mut escaped_backslash = false;
        if !in_quote {
            if c == separator {
                if !buffer.is_empty() || keep_empty {
                    fields.push(buffer.trim_matches(quote).to_string());
                }
                buffer.clear();
            } else {
                if c == quote {
                    in_quote = true;
                }
                buffer.push(c);
            }
        } else {
            if c == '\\' && last_char == '\\' && !last_was_escaped_backslash {
                // Doubled backslash: a literal backslash, consumed once so a
                // following quote still closes the region.
                escaped_backslash = true;
            } else if c == quote && !(last_char == '\\' && !last_was_escaped_backslash) {
                in_quote = false;
            }
            buffer.push(c);
        }
        last_char = c;
        last_was_escaped_backslash = escaped_backslash;
    }

    if in_quote {
        return Err(TokenizerError::MalformedQuoting);
    }
    if !buffer.is_empty() || (last_char == separator && keep_empty) {
        fields.push(buffer.trim_matches(quote).to_string());
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str, keep_empty: bool) -> Result<Vec<String>, TokenizerError> {
        split_fields(line, DEFAULT_SEPARATOR, DEFAULT_QUOTE, keep_empty)
    }

    #[test]
    fn plain_fields() {
        assert_eq!(split("a,b,c", true).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_field_keeps_embedded_separator() {
        assert_eq!(split("a,\"b,c\",d", true).unwrap(), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn escaped_backslash_does_not_eat_closing_quote() {
        // The field is "b\\c" in the raw data: the doubled backslash is one
        // escaped unit, so the quote after 'c' closes the region normally.
        assert_eq!(
            split("a,\"b\\\\c\",d", true).unwrap(),
            vec!["a", "b\\\\c", "d"]
        );
    }

    #[test]
    fn backslash_escaped_quote_stays_inside_field() {
        assert_eq!(split("a,\"b\\\"c\",d", true).unwrap(), vec!["a", "b\\\"c", "d"]);
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        assert_eq!(split("a,\"b,c", true), Err(TokenizerError::MalformedQuoting));
    }

    #[test]
    fn trailing_separator_with_keep_empty() {
        assert_eq!(split("a,", true).unwrap(), vec!["a", ""]);
    }

    #[test]
    fn trailing_separator_without_keep_empty() {
        assert_eq!(split("a,", false).unwrap(), vec!["a"]);
    }

    #[test]
    fn consecutive_separators() {
        assert_eq!(split("a,,b", true).unwrap(), vec!["a", "", "b"]);
        assert_eq!(split("a,,b", false).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn empty_line_yields_no_fields() {
        assert_eq!(split("", true).unwrap(), Vec::<String>::new());
        assert_eq!(split("", false).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn whitespace_only_field_is_not_special() {
        assert_eq!(split("  ,a", true).unwrap(), vec!["  ", "a"]);
    }

    #[test]
    fn alternate_separator_and_quote() {
        assert_eq!(
            split_fields("a\t'b\tc'\td", '\t', '\'', true).unwrap(),
            vec!["a", "b\tc", "d"]
        );
    }

    #[test]
    fn join_and_resplit_round_trip() {
        let original = vec!["alpha", "beta", "gamma", "PC 34:1"];
        let joined = original.join(",");
        assert_eq!(split(&joined, true).unwrap(), original);
    }
}
