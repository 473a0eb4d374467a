use anyhow::Context;
use pdfnarrator::logging::{self, Logger};
use pdfnarrator::options::{RunOptions, USAGE};
use pdfnarrator::App;
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let cli = RunOptions::from_args(std::env::args().skip(1)).context("invalid arguments")?;
    let options = RunOptions::from_env().merged_with(&cli);

    if options.show_help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut logger = Logger::new(options.resolve_log_level());
    if let Some(path) = &options.log_path {
        logger = logger.with_file_output(path);
    }
    logging::init(logger);

    println!("pdfnarrator {}", env!("CARGO_PKG_VERSION"));
    println!("type 'help' for commands");

    let mut app = App::new(&options);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if let Some(path) = &options.initial_file {
        app.open_initial(path, &mut stdout)
            .context("failed to write output")?;
    }

    app.run(stdin.lock(), &mut stdout)
        .context("terminal I/O failed")?;
    stdout.flush()?;
    Ok(())
}
