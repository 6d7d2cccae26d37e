//! `toriiguide config ...` subcommands.

use tg_domain::config::{Config, ConfigSeverity};

/// Print validation issues; returns false when any error-severity issue
/// exists.
pub fn validate(config: &Config, path: &str) -> bool {
    let issues = config.validate();
    if issues.is_empty() {
        println!("{path}: OK");
        return true;
    }

    for issue in &issues {
        println!("{issue}");
    }
    !issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error)
}

/// Dump the resolved configuration as TOML.
pub fn show(config: &Config) {
    match toml::to_string_pretty(config) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to serialize config: {e}"),
    }
}
