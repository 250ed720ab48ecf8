// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::process;

use anyhow::Result;
use log::{error, LevelFilter};

use pileup_varcall::cli::{self, Invocation};

pub fn main() -> Result<()> {
    let opt = match cli::parse_args(std::env::args_os()) {
        Invocation::Call(opt) => opt,
        Invocation::Usage(usage) => {
            println!("{}", usage);
            return Ok(());
        }
    };

    // setup logger
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(if opt.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .chain(std::io::stderr())
        .apply()?;

    if let Err(e) = cli::run(opt) {
        error!("{:#}", e);
        process::exit(1);
    }

    Ok(())
}
