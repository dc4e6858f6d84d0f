use clap::Parser;

use sdk_picker::cli::{Cli, run};
use sdk_picker::config::log_path;
use sdk_picker::logging::{init_file_logging, init_stderr_logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = if cli.log_file {
        Some(init_file_logging(&log_path())?)
    } else {
        init_stderr_logging()?;
        None
    };

    run(cli.command, &mut std::io::stdout().lock())
}
