use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Initialize logging: warnings by default, debug output with `--verbose`.
pub fn init_logging(verbose: bool) -> LevelFilter {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // only fails if a logger is already installed
    let _ = SimpleLogger::new().with_level(level).init();

    level
}
