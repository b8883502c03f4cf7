use std::path::PathBuf;

use clap::Parser;

use crate::core::{SessionSeed, Settings};

#[derive(Parser, Debug)]
#[command(name = "sheetdiff")]
#[command(about = "Show the diff-session state for a pair of workbooks")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Path to the source workbook")]
    pub source: PathBuf,
    #[arg(help = "Path to the destination workbook")]
    pub dest: PathBuf,
    #[arg(long, help = "Sheet to select in both workbooks when present")]
    pub sheet: Option<String>,
    #[arg(long, help = "Keep running and re-print when either workbook changes")]
    pub watch: bool,
}

impl Cli {
    /// Seed for the session; `--sheet` overrides the configured default sheet.
    #[must_use]
    pub fn seed(&self, settings: &Settings) -> SessionSeed {
        let mut seed = settings.seed(self.source.clone(), self.dest.clone());
        if let Some(sheet) = &self.sheet {
            seed.default_sheet_name.clone_from(sheet);
        }
        seed
    }

    #[must_use]
    pub fn should_watch(&self, settings: &Settings) -> bool {
        self.watch || settings.watch_files
    }
}
