// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Pileup positions as written by `samtools mpileup`.

use std::convert::TryFrom;
use std::str::FromStr;

use derive_new::new;

use crate::errors;

pub(crate) mod parser;

/// A nucleotide that can be called. The declaration order (A, C, G, T) is the order in
/// which alleles are enumerated.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
    IntoStaticStr,
)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// Interpret an ASCII nucleotide, ignoring case. Anything other than A, C, G or T
    /// yields `None`.
    pub fn from_ascii(symbol: u8) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            b'A' => Some(Base::A),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'T' => Some(Base::T),
            _ => None,
        }
    }

    pub fn from_char(symbol: char) -> Option<Self> {
        u8::try_from(symbol).ok().and_then(Base::from_ascii)
    }

    pub fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Strand of the read an observation stems from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

/// A single read base at a pileup position. `base` is `None` for symbols that are not
/// one of A, C, G, T (e.g. N); such observations count towards coverage only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Observation {
    base: Option<Base>,
    strand: Strand,
}

/// One line of pileup. A reference base of `None` stands for an undefined reference
/// (N or any ambiguity code).
#[derive(Debug, Clone, PartialEq, Eq, new, Getters, CopyGetters)]
pub struct PositionRecord {
    #[getset(get = "pub")]
    contig: String,
    /// 1-based.
    #[getset(get_copy = "pub")]
    pos: u64,
    #[getset(get_copy = "pub")]
    ref_base: Option<Base>,
    #[getset(get = "pub")]
    observations: Vec<Observation>,
}

impl PositionRecord {
    /// Number of tokenized read bases at this position.
    pub fn coverage(&self) -> usize {
        self.observations.len()
    }
}

impl FromStr for PositionRecord {
    type Err = errors::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parser::parse_line(line)
    }
}
