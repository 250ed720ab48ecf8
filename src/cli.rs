// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use structopt::clap::{AppSettings, ErrorKind};
use structopt::StructOpt;

use crate::calling::{CallerBuilder, CallerConfig};

const AFTER_HELP: &str = "\
Prints a bed file of positions with likely variants.
These variants are either homozygous differences from
the reference or heterozygotes within this individual.
To be reported, a variant base must be seen in both
forward and reverse strand at least once.
It is understood that map-quality and base-quality
cut-offs are to be set by the options to samtools mpileup.
If the -d flag is set, it runs in debug mode, sending to
stderr the raw mpileup lines that are determined to have
evidence for a variant.";

#[derive(Debug, StructOpt, Serialize, Deserialize, Clone)]
#[structopt(
    name = "pu-variants",
    about = "Call SNVs supported by both strands from samtools mpileup output.",
    after_help = AFTER_HELP,
    setting = AppSettings::ColoredHelp,
    setting = AppSettings::DisableVersion
)]
pub struct PuVariants {
    #[structopt(
        short = "p",
        parse(from_os_str),
        help = "Pileup file to process (if omitted, read from STDIN)."
    )]
    pub pileup: Option<PathBuf>,
    #[structopt(
        short = "l",
        default_value = "6",
        help = "Minimum coverage of a position to be considered."
    )]
    pub low_coverage: usize,
    #[structopt(
        short = "h",
        default_value = "20",
        help = "Maximum coverage of a position to be considered."
    )]
    pub high_coverage: usize,
    #[structopt(
        short = "m",
        default_value = "1",
        help = "Required observations of each allele on each strand."
    )]
    pub min_strand_both: u32,
    #[structopt(
        short = "d",
        help = "Send the raw pileup lines of called positions to STDERR."
    )]
    pub debug: bool,
    #[structopt(short = "H", help = "Show heterozygous sites only.")]
    pub het_only: bool,
    #[structopt(
        long,
        parse(from_os_str),
        help = "File that shall contain the calls (if omitted, write to STDOUT)."
    )]
    pub output: Option<PathBuf>,
    #[structopt(long, help = "Log progress and a summary to STDERR.")]
    pub verbose: bool,
}

impl PuVariants {
    pub fn caller_config(&self) -> CallerConfig {
        CallerConfig::new(
            self.low_coverage,
            self.high_coverage,
            self.min_strand_both,
            self.het_only,
        )
    }
}

/// Outcome of command line parsing.
#[derive(Debug)]
pub enum Invocation {
    Call(PuVariants),
    /// Help text to print before exiting successfully.
    Usage(String),
}

/// Parse the command line. Calling without arguments, with an unknown flag or an
/// invalid value yields the usage text instead of an error.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Invocation::Usage(usage());
    }
    match PuVariants::from_iter_safe(args) {
        Ok(opt) => Invocation::Call(opt),
        Err(e) if e.kind == ErrorKind::HelpDisplayed => Invocation::Usage(e.message),
        Err(e) => {
            debug!("Invalid command line: {}", e.message);
            Invocation::Usage(usage())
        }
    }
}

fn usage() -> String {
    let mut help = Vec::new();
    if PuVariants::clap().write_long_help(&mut help).is_err() {
        return AFTER_HELP.to_owned();
    }
    String::from_utf8_lossy(&help).into_owned()
}

pub fn run(opt: PuVariants) -> Result<()> {
    let config = opt.caller_config();
    info!("Caller configuration: {}", serde_json::to_string(&config)?);

    let pileup: Box<dyn BufRead> = match &opt.pileup {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("unable to open pileup file {}", path.display())
        })?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let calls: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(File::create(path).with_context(|| {
            format!("unable to create output file {}", path.display())
        })?),
        None => Box::new(io::stdout()),
    };

    let mut builder = CallerBuilder::default()
        .config(config)
        .pileup(pileup)
        .calls(calls);
    if opt.debug {
        builder = builder.debug(Box::new(io::stderr()) as Box<dyn Write>);
    }

    let stats = builder.build()?.call()?;
    stats.log();

    Ok(())
}
