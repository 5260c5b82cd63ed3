//! Punto de entrada ("driver").
//!
//! Expone una CLI sobre [`shimcheck::check()`].

use anyhow::{self, Context};
use clap::{crate_version, Arg, ArgAction, Command};
use shimcheck::Suites;
use tracing::Level;

fn main() -> anyhow::Result<()> {
    // Parsing de CLI
    let args = Command::new("shimcheck")
        .about("Cross-checks the libruntime atomic and C string shims")
        .version(crate_version!())
        .arg(
            Arg::new("suite")
                .short('s')
                .long("suite")
                .value_name("SUITE")
                .action(ArgAction::Append)
                .help("Check suite to run: atomic, string or guest (repeatable, default: all)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every check, not only failures"),
        )
        .get_matches();

    let level = if args.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // stdout queda reservado para el reporte
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut suites = Suites::empty();
    for name in args.get_many::<String>("suite").into_iter().flatten() {
        suites |= name
            .parse::<Suites>()
            .with_context(|| format!("Bad --suite argument: {}", name))?;
    }

    if suites.is_empty() {
        suites = Suites::all();
    }

    let report = shimcheck::check(suites);
    print!("{}", report);

    report.status().context("Self-check failed")?;
    Ok(())
}
