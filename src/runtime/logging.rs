use std::fs::{self, OpenOptions};

use env_logger::{Builder, Env, Target};

use crate::config::{LogSettings, default_log_path};

/// Route `log` records to a file; the terminal belongs to the UI.
///
/// `RUST_LOG` wins over `log.level`. When no file can be opened, logging is
/// left disabled and a single line is printed before the UI starts.
pub fn init(settings: &LogSettings) {
    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        eprintln!("drizzle: no log file location, logging disabled");
        return;
    };

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!(
                "drizzle: cannot open log file {}: {e}; logging disabled",
                path.display()
            );
            return;
        }
    };

    let result = Builder::from_env(Env::default().default_filter_or(settings.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();

    if let Err(e) = result {
        eprintln!("drizzle: logger already initialised: {e}");
    }
}
