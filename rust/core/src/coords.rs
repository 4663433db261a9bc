// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate text parser using nom
//!
//! KML-style coordinate text is a whitespace separated list of tuples, each
//! tuple being `longitude,latitude[,altitude]` with no inner whitespace.
//! Altitude is accepted and dropped.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, multispace1},
    multi::separated_list1,
    IResult,
};

use crate::error::{Error, Result};

/// Longest excerpt of offending input carried in an error.
const SNIPPET_LEN: usize = 32;

/// A parsed longitude/latitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

#[inline]
fn is_component_char(c: char) -> bool {
    !c.is_whitespace() && c != ','
}

/// Parse one raw tuple: `a,b` or `a,b,c` (component count checked later)
fn raw_tuple(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char(','), take_while1(is_component_char))(input)
}

/// Parse the whole tuple list
fn tuple_list(input: &str) -> IResult<&str, Vec<Vec<&str>>> {
    separated_list1(multispace1, raw_tuple)(input)
}

fn snippet(s: &str) -> String {
    s.trim().chars().take(SNIPPET_LEN).collect()
}

fn parse_component(token: &str) -> Result<f64> {
    let value: f64 = fast_float::parse(token).map_err(|_| Error::InvalidNumber {
        token: token.to_string(),
    })?;
    if !value.is_finite() {
        return Err(Error::NonFinite(token.to_string()));
    }
    Ok(value)
}

fn to_coordinate(components: &[&str]) -> Result<Coordinate> {
    match components {
        [lon, lat] | [lon, lat, _] => {
            let lon = parse_component(lon)?;
            let lat = parse_component(lat)?;
            // Altitude must still be numeric even though it is ignored
            if let [_, _, alt] = components {
                parse_component(alt)?;
            }
            Ok(Coordinate::new(lon, lat))
        }
        _ => Err(Error::TupleArity {
            tuple: components.join(","),
            count: components.len(),
        }),
    }
}

/// Parse coordinate text into an ordered list of coordinates.
///
/// Blank text yields an empty list. Any malformed tuple fails the whole text;
/// nothing is repaired or skipped.
pub fn parse_coordinates(text: &str) -> Result<Vec<Coordinate>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let (rest, tuples) =
        tuple_list(trimmed).map_err(|_| Error::UnexpectedInput(snippet(trimmed)))?;
    if !rest.is_empty() {
        return Err(Error::UnexpectedInput(snippet(rest)));
    }

    tuples.iter().map(|t| to_coordinate(t)).collect()
}
