use std::borrow::Cow;

use crate::ParsePathError;

pub(crate) struct TokenParser<'a> {
    input: &'a str,
    unescape: bool,
}

impl<'a> TokenParser<'a> {
    #[inline]
    pub(crate) fn new(input: &'a str, unescape: bool) -> Self {
        Self { input, unescape }
    }
}

impl<'a> Iterator for TokenParser<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        // Callers guarantee the leading `/`, so every remaining chunk starts with one.
        let rest = self.input.strip_prefix('/')?;

        let (token, remaining) = match memchr::memchr(b'/', rest.as_bytes()) {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };
        self.input = remaining;

        if self.unescape {
            Some(unescape_token(token))
        } else {
            Some(Cow::Borrowed(token))
        }
    }
}

/// Applies RFC 6901 unescaping: `~1` becomes `/`, `~0` becomes `~`.
/// A `~` followed by anything else is kept verbatim.
fn unescape_token(token: &str) -> Cow<'_, str> {
    let bytes = token.as_bytes();
    let first = match memchr::memchr(b'~', bytes) {
        Some(idx) => idx,
        None => return Cow::Borrowed(token),
    };

    let mut out = String::with_capacity(token.len());
    out.push_str(&token[..first]);

    let mut chars = token[first..].chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('0') => {
                out.push('~');
                chars.next();
            }
            Some('1') => {
                out.push('/');
                chars.next();
            }
            _ => out.push('~'),
        }
    }

    Cow::Owned(out)
}

/// The inverse of [`unescape_token`]: `~` becomes `~0`, `/` becomes `~1`.
pub(crate) fn escape_token(token: &str) -> Cow<'_, str> {
    if memchr::memchr2(b'~', b'/', token.as_bytes()).is_none() {
        return Cow::Borrowed(token);
    }

    let mut out = String::with_capacity(token.len() + 2);
    for ch in token.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Splits a patch path into its tokens.
///
/// The input must be non-empty and start with `/`. The empty element produced by the
/// leading separator is discarded, so `"/"` yields a single empty token.
pub fn parse_tokens(input: &str, unescape: bool) -> Result<Vec<String>, ParsePathError> {
    if input.is_empty() {
        return Err(ParsePathError::Empty);
    }
    if !input.starts_with('/') {
        return Err(ParsePathError::MissingLeadingSlash {
            path: input.to_string(),
        });
    }

    Ok(TokenParser::new(input, unescape)
        .map(Cow::into_owned)
        .collect())
}
