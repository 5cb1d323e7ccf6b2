//! Hand-rolled delimited-text scanner for the distributor feed.
//!
//! Not RFC 4180 and deliberately not the csv crate: the upstream feed's
//! contract is a bare quote toggle. A `"` flips the in-quotes flag and is
//! never part of the field value, so doubled quotes (`""`) do NOT produce a
//! literal quote; they open and immediately close. Feeds have been produced
//! against that behavior for years, so it must not be "fixed" here without
//! coordinating an upstream change. Quoted fields may span raw line breaks.

/// Split raw feed text into rows of string fields.
///
/// One left-to-right pass. Outside quotes, `,` ends a field and `\n`/`\r`
/// end a row; inside quotes, both accumulate like any other character. A
/// row is emitted only if it carries anything (pending field text or at
/// least one completed field), so blank lines and a trailing newline yield
/// nothing. A partial row at end of input is flushed.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for ch in text.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == ',' && !in_quotes {
            fields.push(std::mem::take(&mut field));
        } else if (ch == '\n' || ch == '\r') && !in_quotes {
            if !field.is_empty() || !fields.is_empty() {
                fields.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut fields));
            }
        } else {
            field.push(ch);
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(fields);
    }

    rows
}
