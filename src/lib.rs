// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Calling of single nucleotide variants from samtools mpileup text.
//!
//! Each pileup line is tokenized into a [`pileup::PositionRecord`]. Records whose
//! coverage falls into the configured window are handed to [`calling::call`], which
//! reports a position if one or two alleles are seen on both strands.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate getset;
#[macro_use]
extern crate strum_macros;

pub mod calling;
pub mod cli;
pub mod errors;
pub mod pileup;
pub(crate) mod utils;
