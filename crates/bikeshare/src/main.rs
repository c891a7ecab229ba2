mod bootstrap;

use anyhow::{Context, Result};
use bikeshare_core::settings::Settings;
use bikeshare_data::reader::CsvTripSource;
use bikeshare_ui::app::App;
use bikeshare_ui::console::Console;
use bikeshare_ui::report::ReportOptions;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("bikeshare v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Data directory: {}", settings.data_dir.display());

    let files = settings
        .city_files()
        .context("cannot locate the city data files")?;
    let source = CsvTripSource::new(files);

    let options = ReportOptions {
        show_timing: !settings.no_timing,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    App::new(&source, options)
        .run(&mut console)
        .context("bikeshare session aborted")?;

    Ok(())
}
