//! Diagnostics go to a file because the game owns the terminal.

use color_eyre::Result;
use std::fs::File;
use std::path::Path;

/// Opens the log file, or reports on stderr why it could not be opened.
/// Must run before the terminal enters raw mode.
pub fn open_log_file(path: &Path) -> Option<File> {
    match File::create(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!(
                "Cannot write {} ({}), continuing without a log",
                path.display(),
                err
            );
            None
        }
    }
}

/// Installs the file logger at `info`. A log file that cannot be created
/// leaves logging disabled rather than stopping the game.
pub fn init_logging(path: &Path) -> Result<()> {
    let Some(file) = open_log_file(path) else {
        return Ok(());
    };

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}
