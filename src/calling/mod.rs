// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Strand-concordant calling of single nucleotide variants.
//!
//! A base is *confident* at a position if it has been observed at least
//! `min_strand_both` times on the forward and on the reverse strand. Positions with
//! exactly two confident bases are reported as heterozygous; positions with a single
//! confident base that differs from a defined reference are reported as homozygous
//! differences (unless only heterozygous sites are requested).

use derive_new::new;

use crate::pileup::{Base, PositionRecord};

pub mod caller;
pub(crate) mod strand_counts;

pub use caller::{CallStats, Caller, CallerBuilder, SkipReason};

use strand_counts::StrandCounts;

/// Parameters of the caller, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct CallerConfig {
    /// Minimum coverage (inclusive) for a position to be considered.
    low_coverage: usize,
    /// Maximum coverage (inclusive) for a position to be considered.
    high_coverage: usize,
    /// Required observations of an allele on each strand.
    min_strand_both: u32,
    /// Only report positions with two confident alleles.
    het_only: bool,
}

impl Default for CallerConfig {
    fn default() -> Self {
        CallerConfig::new(6, 20, 1, false)
    }
}

impl CallerConfig {
    /// Whether the given coverage lies within the configured window.
    pub fn covers(&self, coverage: usize) -> bool {
        coverage >= self.low_coverage && coverage <= self.high_coverage
    }
}

/// A called position. If the reference base is among the two alleles, it is `allele1`.
/// Two non-reference alleles are given in A, C, G, T order, which carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, new, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct VariantCall {
    allele1: Base,
    allele2: Base,
}

/// Decide whether the given position carries a variant.
///
/// Coverage is not checked here, callers are expected to filter with
/// [`CallerConfig::covers`] beforehand.
pub fn call(record: &PositionRecord, config: &CallerConfig) -> Option<VariantCall> {
    let counts = StrandCounts::from_observations(record.observations());
    let confident = counts.confident_bases(config.min_strand_both());
    let ref_base = record.ref_base();

    match *confident.as_slice() {
        [first, second] => {
            if ref_base == Some(second) {
                Some(VariantCall::new(second, first))
            } else {
                Some(VariantCall::new(first, second))
            }
        }
        _ if config.het_only() => None,
        [allele] => match ref_base {
            Some(ref_base) if ref_base != allele => Some(VariantCall::new(ref_base, allele)),
            _ => None,
        },
        // only reference, nothing confident or more than two alleles
        _ => None,
    }
}
