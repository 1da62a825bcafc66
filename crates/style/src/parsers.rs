//! nom parsers for length values written in configuration files.

use crate::dimension::{Length, Margins, Unit};
use crate::error::StyleError;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{char, space0, space1};
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair};
use nom::{IResult, Parser};

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(
                    take_while1(|c: char| c.is_ascii_digit()),
                    opt(pair(char('.'), take_while1(|c: char| c.is_ascii_digit()))),
                )),
                recognize(pair(char('.'), take_while1(|c: char| c.is_ascii_digit()))),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

pub fn parse_unit(input: &str) -> IResult<&str, Unit> {
    alt((
        map(tag_no_case("pt"), |_| Unit::Pt),
        map(tag_no_case("mm"), |_| Unit::Mm),
        map(tag_no_case("cm"), |_| Unit::Cm),
        map(tag_no_case("in"), |_| Unit::In),
    ))
    .parse(input)
}

/// Parses a length with an optional unit suffix (`"12"`, `"10mm"`, `"1in"`).
pub fn parse_length(input: &str) -> IResult<&str, Length> {
    map(pair(parse_f32, opt(parse_unit)), |(value, unit)| Length { value, unit }).parse(input)
}

/// Parses a complete length string, rejecting trailing garbage.
pub fn parse_length_str(input: &str) -> Result<Length, StyleError> {
    match delimited(space0, parse_length, space0).parse(input) {
        Ok(("", length)) => Ok(length),
        _ => Err(StyleError::Parse(format!("Invalid length: '{}'", input))),
    }
}

/// Parses CSS-style margin shorthand with 1, 2 or 4 values.
pub fn parse_shorthand_margins(input: &str) -> Result<Margins, StyleError> {
    let parts = match separated_list1(space1, parse_length).parse(input.trim()) {
        Ok(("", parts)) => parts,
        _ => {
            return Err(StyleError::Parse(format!(
                "Failed to parse margins value: '{}'",
                input
            )));
        }
    };

    match parts.as_slice() {
        [all] => Ok(Margins::all(*all)),
        [y, x] => Ok(Margins {
            top: *y,
            right: *x,
            bottom: *y,
            left: *x,
        }),
        [top, right, bottom, left] => Ok(Margins {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        }),
        _ => Err(StyleError::Parse(format!(
            "Invalid number of values for margin shorthand: got {}, expected 1, 2, or 4.",
            parts.len()
        ))),
    }
}
