// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Radiance scene description parser using nom
//!
//! Zero-copy scanning of the uniform primitive grammar:
//!
//! ```text
//! modifier type identifier
//! n  s1 .. sn     (string arguments)
//! n  i1 .. in     (integer arguments)
//! n  r1 .. rn     (real arguments)
//! ```
//!
//! All tokens are whitespace separated and wrap freely across lines.
//! `#` comments run to end of line; `!` command lines are surfaced as
//! [`Record::Command`] so the caller can report and skip them.

use nom::{
    bytes::complete::{take_till, take_while1},
    character::complete::char,
    combinator::map_res,
    IResult,
};
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Real-argument block, stack-allocated for the common polygon/material sizes
pub type RealArgs = SmallVec<[f64; 12]>;

/// One parsed Radiance primitive record
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive<'a> {
    /// Modifier name as written in the file (e.g. `void` or a material id)
    pub modifier: &'a str,
    /// Primitive type name: `polygon`, `plastic`, `metal`, `glass`, ...
    pub kind: &'a str,
    /// Identifier, unique within the scene
    pub identifier: &'a str,
    /// String arguments
    pub strings: Vec<&'a str>,
    /// Integer arguments
    pub integers: SmallVec<[i64; 2]>,
    /// Real arguments (vertex coordinates, reflectances, ...)
    pub reals: RealArgs,
}

/// One record scanned from the input
#[derive(Debug, Clone, PartialEq)]
pub enum Record<'a> {
    /// A primitive in the uniform grammar
    Primitive(Primitive<'a>),
    /// A `!` command line, passed through verbatim (without the `!`)
    Command(&'a str),
}

/// Skip whitespace and `#` comments
fn skip_space(mut input: &str) -> &str {
    loop {
        let trimmed = input.trim_start();
        if let Some(rest) = trimmed.strip_prefix('#') {
            input = match rest.find('\n') {
                Some(pos) => &rest[pos + 1..],
                None => "",
            };
        } else {
            return trimmed;
        }
    }
}

/// Parse one whitespace-delimited token
fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

/// Parse a whitespace-preceded token
fn spaced_word(input: &str) -> IResult<&str, &str> {
    word(skip_space(input))
}

/// Parse an argument count (non-negative integer token)
fn arg_count(input: &str) -> IResult<&str, usize> {
    map_res(spaced_word, |s: &str| s.parse::<usize>())(input)
}

/// Parse a real argument with fast-float
fn real(input: &str) -> IResult<&str, f64> {
    map_res(spaced_word, |s: &str| {
        fast_float::parse::<f64, _>(s).map_err(|_| ())
    })(input)
}

/// Parse an integer argument
fn integer(input: &str) -> IResult<&str, i64> {
    map_res(spaced_word, |s: &str| s.parse::<i64>())(input)
}

/// Parse a count-prefixed argument block into `out`
fn arg_block<'a, T, F>(
    mut input: &'a str,
    item: F,
    out: &mut impl Extend<T>,
) -> IResult<&'a str, ()>
where
    F: Fn(&'a str) -> IResult<&'a str, T>,
{
    let (rest, count) = arg_count(input)?;
    input = rest;
    for _ in 0..count {
        let (rest, value) = item(input)?;
        out.extend(std::iter::once(value));
        input = rest;
    }
    Ok((input, ()))
}

/// Parse one primitive record
fn primitive(input: &str) -> IResult<&str, Primitive<'_>> {
    let (input, modifier) = spaced_word(input)?;
    let (input, kind) = spaced_word(input)?;
    let (input, identifier) = spaced_word(input)?;

    let mut strings = Vec::new();
    let mut integers = SmallVec::new();
    let mut reals = RealArgs::new();
    let (input, ()) = arg_block(input, spaced_word, &mut strings)?;
    let (input, ()) = arg_block(input, integer, &mut integers)?;
    let (input, ()) = arg_block(input, real, &mut reals)?;

    Ok((
        input,
        Primitive {
            modifier,
            kind,
            identifier,
            strings,
            integers,
            reals,
        },
    ))
}

/// Parse a `!` command line (after the `!`), up to end of line
fn command(input: &str) -> IResult<&str, &str> {
    let (input, _) = char('!')(input)?;
    let (input, line) = take_till(|c| c == '\n')(input)?;
    Ok((input, line.trim_end()))
}

/// Streaming scanner over the records of a `.rad` source
///
/// Yields records in file order. A syntax error is reported for the
/// offending record and scanning resumes at the next line, so one bad
/// record never aborts the whole scene.
pub struct RecordScanner<'a> {
    source: &'a str,
    rest: &'a str,
}

impl<'a> RecordScanner<'a> {
    /// Create a scanner over the full source text
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
        }
    }

    /// Byte offset of the scan position in the original source
    fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    /// Scan the next record, or `None` at end of input
    pub fn next_record(&mut self) -> Option<Result<Record<'a>>> {
        self.rest = skip_space(self.rest);
        if self.rest.is_empty() {
            return None;
        }

        if self.rest.starts_with('!') {
            return match command(self.rest) {
                Ok((rest, line)) => {
                    self.rest = rest;
                    Some(Ok(Record::Command(line)))
                }
                Err(_) => unreachable!("command parser accepts any '!' line"),
            };
        }

        match primitive(self.rest) {
            Ok((rest, prim)) => {
                self.rest = rest;
                Some(Ok(Record::Primitive(prim)))
            }
            Err(e) => {
                let offset = self.offset();
                // Resync at the next line so scanning can continue
                self.rest = match self.rest.find('\n') {
                    Some(pos) => &self.rest[pos + 1..],
                    None => "",
                };
                Some(Err(Error::Syntax {
                    offset,
                    message: match e {
                        nom::Err::Error(e) | nom::Err::Failure(e) => {
                            format!("{:?}", e.code)
                        }
                        nom::Err::Incomplete(_) => "incomplete record".to_string(),
                    },
                }))
            }
        }
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}
