use crate::config::Settings;

/// Settings to run with, plus the reason defaults were used, if they were.
pub struct LoadedSettings {
    pub settings: Settings,
    pub fallback: Option<String>,
}

/// Read and validate the config. A broken config never stops startup: the
/// defaults are used and the reason is handed back for logging.
pub fn load_settings() -> LoadedSettings {
    let fallback = match Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => {
                return LoadedSettings {
                    settings: s,
                    fallback: None,
                };
            }
            Err(msg) => format!("invalid config, using defaults: {msg}"),
        },
        Err(e) => format!("could not load config, using defaults: {e}"),
    };

    eprintln!("drizzle: {fallback}");
    LoadedSettings {
        settings: Settings::default(),
        fallback: Some(fallback),
    }
}
