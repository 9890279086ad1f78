// Logging utilities for CLI
use std::io::Write;

/// Initialize logger for CLI
pub fn init_logger(verbose: bool, quiet: bool) {
    // RUST_LOG takes over completely when set
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    }

    let default_level = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();

    builder.filter_level(default_level).format(|buf, record| {
        if record.level() >= log::Level::Debug {
            writeln!(buf, "[{}] {}", record.level(), record.args())
        } else {
            writeln!(buf, "{}", record.args())
        }
    });

    // Debug output from this crate only, not from hyper and friends
    if verbose && !quiet {
        builder.filter_module("cidgate", log::LevelFilter::Debug);
        builder.filter_module("hyper", log::LevelFilter::Info);
        builder.filter_module("tower_http", log::LevelFilter::Info);
    }

    builder.init();
}
