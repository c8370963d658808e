//! `repeatfill dump` - run one read through a repeat target.
//!
//! The read is split into the requested segments and filled in a single
//! request, so the output also shows offset carry across segment boundaries.

use clap::Args;
use repeatfill::position::sector_to_position;
use repeatfill::target::RepeatTarget;
use std::path::PathBuf;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Bytes read when neither --length nor --segments is given.
const DEFAULT_DUMP_LENGTH: usize = 64;

/// Largest total read a single dump will allocate (64 MiB).
const MAX_DUMP_LENGTH: usize = 64 * 1024 * 1024;

/// Bytes per hex dump line.
const BYTES_PER_LINE: usize = 16;

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Pattern spec to use instead of pattern.spec from config.ini
    #[arg(long)]
    pub spec: Option<String>,

    /// Starting byte position
    #[arg(long, conflicts_with = "sector")]
    pub position: Option<u64>,

    /// Starting sector (uses device.sector_size)
    #[arg(long)]
    pub sector: Option<u64>,

    /// Number of bytes to read
    #[arg(long, conflicts_with = "segments")]
    pub length: Option<usize>,

    /// Comma-separated segment lengths, e.g. 2,5
    #[arg(long, value_delimiter = ',')]
    pub segments: Vec<usize>,

    /// Write raw bytes to this file instead of printing a hex dump
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: DumpArgs, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("dump");

    let target = runner.create_target(args.spec.as_deref())?;
    let position = start_position(&target, args.position, args.sector);
    let lens = segment_lengths(args.length, &args.segments)?;

    let bytes = read_segments(&target, position, &lens);
    info!(
        "Read {} bytes at {} in {} segment(s)",
        bytes.len(),
        position,
        lens.len()
    );

    match args.output {
        Some(path) => {
            std::fs::write(&path, &bytes).map_err(|e| CliError::FileWrite {
                path: path.display().to_string(),
                error: e,
            })?;
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            println!("{}", target.pattern().describe());
            print!("{}", hex_dump(position, &bytes));
        }
    }

    Ok(())
}

fn start_position(target: &RepeatTarget, position: Option<u64>, sector: Option<u64>) -> u64 {
    match (position, sector) {
        (Some(position), _) => position,
        (None, Some(sector)) => sector_to_position(sector, target.sector_size()),
        (None, None) => 0,
    }
}

/// Resolve the segment layout of the read.
///
/// The total is capped at [`MAX_DUMP_LENGTH`] so a typo cannot ask for an
/// unbounded allocation.
fn segment_lengths(length: Option<usize>, segments: &[usize]) -> Result<Vec<usize>, CliError> {
    let lens = if !segments.is_empty() {
        segments.to_vec()
    } else {
        match length {
            Some(0) => {
                return Err(CliError::InvalidArgument(
                    "--length must be greater than zero".to_string(),
                ))
            }
            Some(length) => vec![length],
            None => vec![DEFAULT_DUMP_LENGTH],
        }
    };

    let total = lens
        .iter()
        .try_fold(0usize, |total, &len| total.checked_add(len))
        .filter(|&total| total <= MAX_DUMP_LENGTH);
    match total {
        Some(_) => Ok(lens),
        None => Err(CliError::InvalidArgument(format!(
            "dump length must not exceed {} bytes",
            MAX_DUMP_LENGTH
        ))),
    }
}

/// Read `lens` consecutive segments and return them joined.
fn read_segments(target: &RepeatTarget, position: u64, lens: &[usize]) -> Vec<u8> {
    let mut buffers: Vec<Vec<u8>> = lens.iter().map(|&len| vec![0u8; len]).collect();
    target.read(position, buffers.iter_mut().map(|b| b.as_mut_slice()));
    buffers.concat()
}

/// Format bytes as `position: hex bytes` lines.
fn hex_dump(start: u64, bytes: &[u8]) -> String {
    bytes
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(line, chunk)| {
            let address = start.wrapping_add((line * BYTES_PER_LINE) as u64);
            let hex: String = chunk.iter().map(|byte| format!(" {:02x}", byte)).collect();
            format!("{:016x}:{}\n", address, hex)
        })
        .collect()
}
