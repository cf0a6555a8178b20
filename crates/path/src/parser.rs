//! A `nom`-based parser for path expressions.
//!
//! Grammar: an optional leading `$`, then keys separated by `.`, each key
//! optionally followed by bracket suffixes: `[n]` (index), `[]` (append point),
//! `['key']` / `["key"]` (quoted key).
//!
//! The bracket syntax is permissive: a bracket with non-numeric content is read
//! as an index without a value (`[]`), and a `[` that is never closed is kept as
//! part of the key text.
use super::ast::{PathExpression, PathSegment};
use crate::error::PathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, preceded, terminated},
};

// --- Main Public Parser ---

pub fn parse_path(input: &str) -> Result<PathExpression, PathError> {
    let trimmed = input.trim();
    match path(trimmed) {
        Ok(("", segments)) => Ok(PathExpression::new(segments)),
        Ok((rem, _)) => Err(PathError::invalid(
            input,
            format!("unexpected text at '{}'", rem),
        )),
        Err(e) => Err(PathError::invalid(input, e.to_string())),
    }
}

// --- Combinators ---

fn path(input: &str) -> IResult<&str, Vec<PathSegment>> {
    let (input, rooted) = opt(char('$')).parse(input)?;
    let (input, first) = if rooted.is_some() {
        (input, None)
    } else {
        opt(map(key_name, PathSegment::Key)).parse(input)?
    };
    let (input, rest) = many0(segment).parse(input)?;

    let mut segments = Vec::with_capacity(rest.len() + 1);
    segments.extend(first);
    segments.extend(rest);
    Ok((input, segments))
}

fn segment(input: &str) -> IResult<&str, PathSegment> {
    alt((
        map(preceded(char('.'), key_name), PathSegment::Key),
        bracket,
    ))
    .parse(input)
}

/// A bare key. An unterminated `[` and whatever follows it up to the next `.`
/// stays part of the key.
fn key_name(input: &str) -> IResult<&str, String> {
    let (rest, name) = take_while1(|c: char| c != '.' && c != '[').parse(input)?;
    if rest.starts_with('[') && !rest.contains(']') {
        let (rest, tail) = take_while(|c: char| c != '.').parse(rest)?;
        return Ok((rest, format!("{}{}", name, tail)));
    }
    Ok((rest, name.to_string()))
}

fn bracket(input: &str) -> IResult<&str, PathSegment> {
    preceded(
        char('['),
        alt((
            map(terminated(quoted('\''), char(']')), PathSegment::Key),
            map(terminated(quoted('"'), char(']')), PathSegment::Key),
            map(terminated(digit1, char(']')), |digits: &str| {
                PathSegment::Index(digits.parse().ok())
            }),
            map(char(']'), |_| PathSegment::Index(None)),
            map(terminated(is_not("]"), char(']')), |_| PathSegment::Index(None)),
        )),
    )
    .parse(input)
}

fn quoted<'a>(quote: char) -> impl Parser<&'a str, Output = String, Error = nom::error::Error<&'a str>> {
    map(
        delimited(char(quote), take_while(move |c: char| c != quote), char(quote)),
        |s: &str| s.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(input: &str) -> Vec<PathSegment> {
        parse_path(input).unwrap().segments().to_vec()
    }

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    #[test]
    fn test_root_forms() {
        assert!(parse_path("$").unwrap().is_root());
        assert!(parse_path("").unwrap().is_root());
        assert_eq!(segments("$.a"), segments("a"));
    }

    #[test]
    fn test_keys_and_indexes() {
        assert_eq!(
            segments("$.a.b[2]"),
            vec![key("a"), key("b"), PathSegment::Index(Some(2))]
        );
        assert_eq!(
            segments("a[0][1]"),
            vec![key("a"), PathSegment::Index(Some(0)), PathSegment::Index(Some(1))]
        );
        assert_eq!(segments("$[3]"), vec![PathSegment::Index(Some(3))]);
    }

    #[test]
    fn test_append_point() {
        assert_eq!(segments("a.b[]"), vec![key("a"), key("b"), PathSegment::Index(None)]);
    }

    #[test]
    fn test_quoted_keys() {
        assert_eq!(segments("$['a.b'].c"), vec![key("a.b"), key("c")]);
        assert_eq!(segments("$[\"x y\"]"), vec![key("x y")]);
    }

    #[test]
    fn test_malformed_bracket_degrades_to_append() {
        assert_eq!(segments("a[x]"), vec![key("a"), PathSegment::Index(None)]);
    }

    #[test]
    fn test_unterminated_bracket_stays_in_key() {
        assert_eq!(segments("a[0.b"), vec![key("a[0"), key("b")]);
    }

    #[test]
    fn test_empty_segments_are_invalid() {
        assert!(matches!(parse_path("a..b"), Err(PathError::InvalidPath { .. })));
        assert!(matches!(parse_path("a."), Err(PathError::InvalidPath { .. })));
        assert!(matches!(parse_path("a.[0]"), Err(PathError::InvalidPath { .. })));
        assert!(matches!(parse_path("$x"), Err(PathError::InvalidPath { .. })));
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["$", "$.a", "$.a[1].b", "$['a.b'][0]", "$.list[]"] {
            assert_eq!(parse_path(text).unwrap().to_string(), text);
        }
    }
}
