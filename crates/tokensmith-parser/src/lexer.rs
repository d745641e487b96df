//! Recognizers for token value shapes.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1, take_while_m_n},
    character::complete::{char, digit1},
    combinator::{all_consuming, recognize},
    sequence::{delimited, pair, preceded},
    IResult,
};
use tokensmith_core::TokenPath;

/// Parse the inside of a `{path.to.token}` reference.
///
/// The braces must wrap the whole input and the path may not contain
/// another `{` or `}`.
pub fn reference(input: &str) -> IResult<&str, &str> {
    delimited(
        char('{'),
        take_while1(|c: char| c != '{' && c != '}'),
        char('}'),
    )(input)
}

/// Parse a dimension with an explicit unit (`16px`, `1rem`, `2em`).
pub fn dimension(input: &str) -> IResult<&str, (&str, &str)> {
    pair(digit1, alt((tag("px"), tag("rem"), tag("em"))))(input)
}

/// Parse a `#rgb` .. `#rrggbbaa` hex color.
pub fn hex_color(input: &str) -> IResult<&str, &str> {
    recognize(preceded(
        char('#'),
        take_while_m_n(3, 8, |c: char| c.is_ascii_hexdigit()),
    ))(input)
}

/// Parse the reference path out of a value, if the whole string is a reference.
pub fn parse_reference(input: &str) -> Option<TokenPath> {
    all_consuming(reference)(input)
        .ok()
        .map(|(_, path)| TokenPath::from_dotted(path))
}

pub fn is_reference(input: &str) -> bool {
    all_consuming(reference)(input).is_ok()
}

pub fn is_dimension(input: &str) -> bool {
    all_consuming(dimension)(input).is_ok()
}

pub fn is_hex_color(input: &str) -> bool {
    all_consuming(hex_color)(input).is_ok()
}

/// A bare run of ASCII digits with no unit.
pub fn is_unitless_integer(input: &str) -> bool {
    all_consuming(digit1::<&str, nom::error::Error<&str>>)(input).is_ok()
}
