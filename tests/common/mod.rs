use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::NamedTempFile;

use pileup_varcall::calling::CallerConfig;
use pileup_varcall::cli::{run, PuVariants};

pub(crate) struct Testcase {
    path: PathBuf,
    config: CallerConfig,
    output: NamedTempFile,
}

pub(crate) fn load_testcase(path: impl AsRef<Path>) -> Result<Testcase> {
    let config = serde_json::from_reader(File::open(path.as_ref().join("config.json"))?)?;
    Ok(Testcase {
        path: path.as_ref().to_owned(),
        config,
        output: NamedTempFile::new()?,
    })
}

impl Testcase {
    fn pileup(&self) -> PathBuf {
        self.path.join("pileup.txt")
    }

    pub(crate) fn options(&self) -> PuVariants {
        PuVariants {
            pileup: Some(self.pileup()),
            low_coverage: self.config.low_coverage(),
            high_coverage: self.config.high_coverage(),
            min_strand_both: self.config.min_strand_both(),
            debug: false,
            het_only: self.config.het_only(),
            output: Some(self.output.path().to_owned()),
            verbose: false,
        }
    }

    pub(crate) fn run(&self) -> Result<()> {
        run(self.options())
    }

    pub(crate) fn check(&self) {
        let expected = fs::read_to_string(self.path.join("expected.txt")).unwrap();
        let calls = fs::read_to_string(self.output.path()).unwrap();
        assert_eq!(calls, expected, "unexpected calls for {}", self.path.display());
    }
}
