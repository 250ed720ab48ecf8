// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::pileup::{Base, Observation, Strand};

/// Forward and reverse strand counts per base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct StrandCounts {
    forward: [u32; 4],
    reverse: [u32; 4],
}

impl StrandCounts {
    pub(crate) fn from_observations<'a, I>(observations: I) -> Self
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut counts = StrandCounts::default();
        for observation in observations {
            if let Some(base) = observation.base() {
                counts.incr(base, observation.strand());
            }
        }
        counts
    }

    fn incr(&mut self, base: Base, strand: Strand) {
        match strand {
            Strand::Forward => self.forward[base.index()] += 1,
            Strand::Reverse => self.reverse[base.index()] += 1,
        }
    }

    pub(crate) fn forward(&self, base: Base) -> u32 {
        self.forward[base.index()]
    }

    pub(crate) fn reverse(&self, base: Base) -> u32 {
        self.reverse[base.index()]
    }

    /// A base is confident if it was seen at least `min_strand_both` times on each strand.
    pub(crate) fn is_confident(&self, base: Base, min_strand_both: u32) -> bool {
        self.forward(base) >= min_strand_both && self.reverse(base) >= min_strand_both
    }

    /// Confident bases in A, C, G, T order.
    pub(crate) fn confident_bases(&self, min_strand_both: u32) -> Vec<Base> {
        Base::iter()
            .filter(|base| self.is_confident(*base, min_strand_both))
            .collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(symbol: u8, strand: Strand) -> Observation {
        Observation::new(Base::from_ascii(symbol), strand)
    }

    #[test]
    fn test_tally() {
        let observations = vec![
            obs(b'A', Strand::Forward),
            obs(b'A', Strand::Forward),
            obs(b'A', Strand::Reverse),
            obs(b'T', Strand::Reverse),
            obs(b'N', Strand::Forward),
            obs(b'N', Strand::Reverse),
        ];
        let counts = StrandCounts::from_observations(&observations);
        assert_eq!(counts.forward(Base::A), 2);
        assert_eq!(counts.reverse(Base::A), 1);
        assert_eq!(counts.forward(Base::T), 0);
        assert_eq!(counts.reverse(Base::T), 1);
        assert_eq!(counts.forward(Base::C) + counts.reverse(Base::C), 0);
    }

    #[test]
    fn test_confident_bases() {
        let observations = vec![
            obs(b'T', Strand::Forward),
            obs(b'T', Strand::Reverse),
            obs(b'C', Strand::Forward),
            obs(b'C', Strand::Forward),
            obs(b'C', Strand::Reverse),
            obs(b'C', Strand::Reverse),
            obs(b'G', Strand::Forward),
        ];
        let counts = StrandCounts::from_observations(&observations);
        assert_eq!(counts.confident_bases(1), vec![Base::C, Base::T]);
        assert_eq!(counts.confident_bases(2), vec![Base::C]);
        assert!(counts.confident_bases(3).is_empty());
        assert_eq!(counts.confident_bases(0).len(), 4);
    }
}
