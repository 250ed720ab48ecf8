// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::io::{BufRead, Write};
use std::str;
use std::time::Duration;

use anyhow::{Context, Result};
use derive_builder::Builder;
use derive_new::new;
use progress_logger::ProgressLogger;
use strum::IntoEnumIterator;

use crate::calling::{call, CallerConfig, VariantCall};
use crate::pileup::{Base, PositionRecord};
use crate::utils::SimpleCounter;

#[derive(Hash, PartialEq, Eq, Clone, Copy, EnumIter, IntoStaticStr, Display, Debug)]
pub enum SkipReason {
    #[strum(serialize = "invalid pileup lines")]
    InvalidPileup,
    #[strum(serialize = "positions with coverage outside of the given bounds")]
    CoverageOutOfBounds,
    #[strum(serialize = "positions without evidence for a variant")]
    NoCall,
}

/// Streams pileup lines through the variant caller, one position at a time.
#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct Caller<R, W>
where
    R: BufRead,
    W: Write,
{
    config: CallerConfig,
    pileup: R,
    calls: W,
    /// Receives the raw pileup line of each call.
    #[builder(setter(strip_option), default)]
    debug: Option<Box<dyn Write>>,
}

impl<R, W> Caller<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn call(self) -> Result<CallStats> {
        let Caller {
            config,
            pileup,
            calls,
            mut debug,
        } = self;

        if config.low_coverage() > config.high_coverage() {
            warn!(
                "Lower coverage bound {} exceeds upper bound {}, no position will be called.",
                config.low_coverage(),
                config.high_coverage()
            );
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .from_writer(calls);
        let mut stats = CallStats::default();
        let mut progress_logger = ProgressLogger::builder()
            .with_items_name("positions")
            .with_frequency(Duration::from_secs(20))
            .start();

        for (i, line) in pileup.split(b'\n').enumerate() {
            let line = line.context("error reading pileup")?;
            stats.positions += 1;
            progress_logger.update(1u64);

            let (line, record) = match str::from_utf8(&line) {
                Ok(line) => match line.parse::<PositionRecord>() {
                    Ok(record) => (line, record),
                    Err(e) => {
                        debug!("Skipping pileup line {}: {}", i + 1, e);
                        stats.skips.incr(SkipReason::InvalidPileup);
                        continue;
                    }
                },
                Err(_) => {
                    debug!("Skipping pileup line {}: not valid UTF-8", i + 1);
                    stats.skips.incr(SkipReason::InvalidPileup);
                    continue;
                }
            };

            if !config.covers(record.coverage()) {
                stats.skips.incr(SkipReason::CoverageOutOfBounds);
                continue;
            }

            if let Some(variant_call) = call(&record, &config) {
                writer.serialize(CallRecord::from_call(&record, &variant_call))?;
                stats.calls += 1;
                if let Some(debug) = debug.as_mut() {
                    writeln!(
                        debug,
                        "** Pile-up line that has a variant\n{}",
                        line.trim_end_matches('\r')
                    )?;
                }
            } else {
                stats.skips.incr(SkipReason::NoCall);
            }
        }

        writer.flush()?;
        if let Some(debug) = debug.as_mut() {
            debug.flush()?;
        }
        progress_logger.stop();

        Ok(stats)
    }
}

/// Output row: contig, start and end (both the 1-based position) and the two alleles.
#[derive(Serialize, new)]
struct CallRecord<'a> {
    contig: &'a str,
    start: u64,
    end: u64,
    allele1: Base,
    allele2: Base,
}

impl<'a> CallRecord<'a> {
    fn from_call(record: &'a PositionRecord, variant_call: &VariantCall) -> Self {
        CallRecord::new(
            record.contig(),
            record.pos(),
            record.pos(),
            variant_call.allele1(),
            variant_call.allele2(),
        )
    }
}

/// Summary of a calling run.
#[derive(Debug, Default, CopyGetters)]
pub struct CallStats {
    /// Number of pileup lines read.
    #[getset(get_copy = "pub")]
    positions: usize,
    #[getset(get_copy = "pub")]
    calls: usize,
    skips: SimpleCounter<SkipReason>,
}

impl CallStats {
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skips.count(&reason)
    }

    pub fn log(&self) {
        info!(
            "Processed {} positions, found {} variants.",
            self.positions, self.calls
        );
        for reason in SkipReason::iter() {
            let count = self.skipped(reason);
            if count > 0 {
                info!("Skipped {} {}.", count, reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    /// Write handle whose content stays accessible after being boxed.
    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    const PILEUP: &str = "\
chr1\t100\tA\t4\t.,Gg\tIIII
chr1\t101\tC\t2\tTt\tII
chr1\t102\tG\t2\t..\tII
chr1\t103\tG\t3
chr1\t104\tN\t2\tAa\tII
chr1\t105\tT\t1\tA\tI
";

    fn run(config: CallerConfig, pileup: &str) -> (String, CallStats) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut calls = Vec::new();
        let stats = CallerBuilder::default()
            .config(config)
            .pileup(pileup.as_bytes())
            .calls(&mut calls)
            .build()
            .unwrap()
            .call()
            .unwrap();
        (String::from_utf8(calls).unwrap(), stats)
    }

    #[test]
    fn test_call() {
        let (calls, stats) = run(CallerConfig::new(1, 10, 1, false), PILEUP);
        assert_eq!(calls, "chr1 100 100 A G\nchr1 101 101 C T\n");
        assert_eq!(stats.positions(), 6);
        assert_eq!(stats.calls(), 2);
        assert_eq!(stats.skipped(SkipReason::InvalidPileup), 1);
        assert_eq!(stats.skipped(SkipReason::NoCall), 3);
        assert_eq!(stats.skipped(SkipReason::CoverageOutOfBounds), 0);
    }

    #[test]
    fn test_het_only() {
        let (calls, _) = run(CallerConfig::new(1, 10, 1, true), PILEUP);
        assert_eq!(calls, "chr1 100 100 A G\n");
    }

    #[test]
    fn test_coverage_bounds() {
        let (calls, stats) = run(CallerConfig::new(3, 4, 1, false), PILEUP);
        assert_eq!(calls, "chr1 100 100 A G\n");
        assert_eq!(stats.skipped(SkipReason::CoverageOutOfBounds), 4);

        let (calls, stats) = run(CallerConfig::new(5, 4, 1, false), PILEUP);
        assert!(calls.is_empty());
        assert_eq!(stats.calls(), 0);
    }

    #[test]
    fn test_debug_echo() {
        let debug = SharedBuffer::default();
        let mut calls = Vec::new();
        CallerBuilder::default()
            .config(CallerConfig::new(1, 10, 1, false))
            .pileup(PILEUP.as_bytes())
            .calls(&mut calls)
            .debug(Box::new(debug.clone()) as Box<dyn Write>)
            .build()
            .unwrap()
            .call()
            .unwrap();
        let echoed = String::from_utf8(debug.0.borrow().clone()).unwrap();
        assert_eq!(
            echoed,
            "** Pile-up line that has a variant\nchr1\t100\tA\t4\t.,Gg\tIIII\n\
             ** Pile-up line that has a variant\nchr1\t101\tC\t2\tTt\tII\n"
        );
    }

    #[test]
    fn test_invalid_utf8_is_skipped() {
        let mut pileup = b"chr1 1 A 2 \xff\xfe\n".to_vec();
        pileup.extend_from_slice(b"chr1 2 A 2 Gg\n");
        let mut calls = Vec::new();
        let stats = CallerBuilder::default()
            .config(CallerConfig::new(1, 10, 1, false))
            .pileup(&pileup[..])
            .calls(&mut calls)
            .build()
            .unwrap()
            .call()
            .unwrap();
        assert_eq!(calls, b"chr1 2 2 A G\n".to_vec());
        assert_eq!(stats.skipped(SkipReason::InvalidPileup), 1);
    }
}
