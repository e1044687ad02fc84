use std::io::Write;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;

use crate::{
    addr::VirtAddr,
    draw::{boxed, Draw, MmuDraw},
    error::SizeError,
    mmu::Mmu,
};

/// 4 KiB * 16.
pub const DEFAULT_SIZE: u64 = 4096 * 16;

#[derive(Parser, Debug)]
#[command(name = "page_directory")]
#[command(about = "Build 32-bit two-level page tables for a memory size and dump them")]
pub struct Args {
    /// Memory size in bytes, optionally suffixed with K or M.
    #[arg(value_parser = parse_size, default_value_t = DEFAULT_SIZE)]
    pub size: u64,

    /// Virtual address to translate after building (hex with 0x, or decimal).
    #[arg(short, long = "translate", value_name = "ADDR", value_parser = parse_virt)]
    pub translate: Vec<VirtAddr>,

    /// Print the summary only.
    #[arg(long)]
    pub no_tables: bool,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Build the structure for `args` and write the report to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let mmu = Mmu::build(args.size).with_context(|| format!("cannot map {} bytes", args.size))?;
    info!("Page directory at {}", mmu.cr3());

    writeln!(out, "{}\n", mmu.draw_summary())?;

    if !args.no_tables {
        writeln!(out, "MMU table")?;
        for row in mmu.dump() {
            writeln!(out, "{}", row.draw())?;
        }
    }

    if !args.translate.is_empty() {
        let lines: Vec<_> = args
            .translate
            .iter()
            .map(|&virt| mmu.draw_translation(virt))
            .collect();
        writeln!(out, "{}", boxed("Translations", &lines.join("\n")))?;
    }

    out.flush().context("failed to write output")?;
    Ok(())
}

/// Parse `<digits>[K|k|M|m]` into a byte count.
pub fn parse_size(arg: &str) -> Result<u64, SizeError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(SizeError::Empty);
    }

    let split = arg.find(|c: char| !c.is_ascii_digit()).unwrap_or(arg.len());
    let (digits, suffix) = arg.split_at(split);
    if digits.is_empty() {
        return Err(SizeError::MissingDigits(arg.to_string()));
    }

    let multiplier: u64 = match suffix {
        "" => 1,
        "K" | "k" => 1024,
        "M" | "m" => 1024 * 1024,
        _ => return Err(SizeError::UnknownSuffix(arg.to_string())),
    };

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| SizeError::Overflow(arg.to_string()))
}

pub fn parse_virt(arg: &str) -> Result<VirtAddr, String> {
    let arg = arg.trim();
    let parsed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => arg.parse::<u32>(),
    };
    parsed
        .map(VirtAddr::from_bits)
        .map_err(|e| format!("`{arg}` is not a 32-bit address: {e}"))
}
