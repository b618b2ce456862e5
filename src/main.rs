use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::{debug, error, LevelFilter};

use molsketch::Molecule;

/// Print the atoms, bonds and 2D coordinates synthesized from chemical formulas
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Formulas to sketch, e.g. `C6H12O6` or `Ca(OH)2`
    #[arg(required = true)]
    formulas: Vec<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!("{args:?}");

    let mut status = ExitCode::SUCCESS;
    for formula in &args.formulas {
        let molecule = match Molecule::from_formula(formula) {
            Ok(molecule) => molecule,
            Err(e) => {
                error!("{formula}: {e}");
                status = ExitCode::FAILURE;
                continue;
            }
        };

        println!("{} ({} atoms)", molecule.composition(), molecule.size());
        for (i, atom) in molecule.atoms().iter().enumerate() {
            let position = match atom.position {
                Some(p) => format!("{:8.3} {:8.3}", p.x, p.y),
                None => "  unplaced".to_string(),
            };
            println!(
                "  {i:>4} {:<3} {position}  charge {} lone pairs {}",
                atom.symbol, atom.charge, atom.lone_pairs
            );
        }
        for bond in molecule.bonds() {
            println!("  {}-{} {}", bond[0], bond[1], bond.order);
        }
    }
    status
}
