use clap::error::ErrorKind;
use clap::Parser;

use sortbench_cli::Cli;

fn main() {
    // Exit 0 for --help, 1 for anything invalid; clap's default of 2 does
    // not match the harness contract.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    if let Err(err) = sortbench_cli::run_with_cli(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
