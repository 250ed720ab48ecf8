// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::str;

use crate::errors::Error;
use crate::pileup::{Base, Observation, PositionRecord, Strand};

/// Parse a line of the form `chrom pos ref depth bases [quals ...]`.
pub(crate) fn parse_line(line: &str) -> Result<PositionRecord, Error> {
    let mut fields = line.split_whitespace();
    let mut next_field = |field| fields.next().ok_or(Error::MissingPileupField { field });

    let contig = next_field("chromosome")?;
    let pos = next_field("position")?;
    let ref_base = next_field("reference base")?;
    let depth = next_field("depth")?;
    let bases = next_field("bases")?;

    let pos = pos
        .parse::<u64>()
        .ok()
        .filter(|pos| *pos > 0)
        .ok_or_else(|| Error::InvalidPosition {
            value: pos.to_owned(),
        })?;
    if depth.parse::<u32>().is_err() {
        return Err(Error::InvalidDepth {
            value: depth.to_owned(),
        });
    }
    let ref_base = parse_ref_base(ref_base)?;
    let observations = tokenize_bases(bases.as_bytes(), ref_base)?;

    Ok(PositionRecord::new(
        contig.to_owned(),
        pos,
        ref_base,
        observations,
    ))
}

fn parse_ref_base(value: &str) -> Result<Option<Base>, Error> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(Base::from_char(symbol)),
        _ => Err(Error::InvalidReferenceBase {
            value: value.to_owned(),
        }),
    }
}

fn tokenize_bases(bases: &[u8], ref_base: Option<Base>) -> Result<Vec<Observation>, Error> {
    let mut observations = Vec::with_capacity(bases.len());
    let mut i = 0;
    while i < bases.len() {
        let symbol = bases[i];
        i += 1;
        match symbol {
            b'.' => observations.push(Observation::new(ref_base, Strand::Forward)),
            b',' => observations.push(Observation::new(ref_base, Strand::Reverse)),
            b'^' => {
                // skip mapping quality of the starting read
                if i == bases.len() {
                    return Err(Error::TruncatedReadStart);
                }
                i += 1;
            }
            b'+' | b'-' => {
                let digits = bases[i..].iter().take_while(|b| b.is_ascii_digit()).count();
                let len = str::from_utf8(&bases[i..i + digits])
                    .ok()
                    .and_then(|digits| digits.parse::<usize>().ok())
                    .ok_or(Error::InvalidIndelLength {
                        marker: char::from(symbol),
                    })?;
                i += digits;
                if bases.len() - i < len {
                    return Err(Error::TruncatedIndel { len });
                }
                i += len;
            }
            // read end, deletion placeholders and reference skips
            b'$' | b'*' | b'#' | b'>' | b'<' => (),
            symbol if symbol.is_ascii_alphabetic() => {
                let strand = if symbol.is_ascii_uppercase() {
                    Strand::Forward
                } else {
                    Strand::Reverse
                };
                observations.push(Observation::new(Base::from_ascii(symbol), strand));
            }
            symbol => {
                return Err(Error::InvalidPileupSymbol {
                    symbol: char::from(symbol),
                })
            }
        }
    }

    Ok(observations)
}
