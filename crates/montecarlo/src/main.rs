use clap::Parser;
use montecarlo::commands::execute;
use montecarlo::{Args, ReportStore, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(ReportStore::default_path);

    let _guard = init_logging(&data_dir, &args.log_level)?;

    let store = ReportStore::new(data_dir);
    let mut stdout = std::io::stdout().lock();
    let result = execute(&store, args.command, &mut stdout);

    if let Err(err) = &result {
        tracing::error!("Command failed: {err}");
    }
    result
}
