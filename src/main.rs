use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;

use page_directory::{
    cli::{self, Args},
    logger,
};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose).context("failed to install logger")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    cli::run(&args, &mut out)
}
