use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    crudgen::cli::run_cli()
}
