// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("pileup line lacks the {field} column")]
    MissingPileupField { field: &'static str },
    #[error("invalid position '{value}', must be a positive integer")]
    InvalidPosition { value: String },
    #[error("invalid depth '{value}', must be a non-negative integer")]
    InvalidDepth { value: String },
    #[error("invalid reference base '{value}', must be a single character")]
    InvalidReferenceBase { value: String },
    #[error("read start marker '^' without mapping quality at end of base column")]
    TruncatedReadStart,
    #[error("indel marker '{marker}' not followed by a length")]
    InvalidIndelLength { marker: char },
    #[error("indel of length {len} exceeds the remaining base column")]
    TruncatedIndel { len: usize },
    #[error("unexpected symbol '{symbol}' in base column")]
    InvalidPileupSymbol { symbol: char },
}
