use std::env;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;

use crate::timesheet::policy::{ShiftPolicy, ShiftRules};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_timesheet_per_min: u32,

    pub log_dir: String,
    pub log_level: tracing::Level,

    // Site shift windows, HHmm-HHmm
    pub shift_rules: ShiftRules,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").context("SERVER_ADDR must be set")?,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            rate_timesheet_per_min: env::var("RATE_TIMESHEET_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .context("RATE_TIMESHEET_PER_MIN must be a number")?,

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "debug".to_string())
                .parse()
                .map_err(|_| anyhow!("LOG_LEVEL must be one of trace, debug, info, warn, error"))?,

            shift_rules: shift_rules(
                env::var("DAY_SHIFT_WINDOW").ok().as_deref(),
                env::var("NIGHT_SHIFT_WINDOW").ok().as_deref(),
            )?,
        })
    }
}

/// Site overrides on top of the default 07:30-16:30 / 18:30-04:30 windows.
fn shift_rules(day: Option<&str>, night: Option<&str>) -> Result<ShiftRules> {
    let mut rules = ShiftRules::default();
    if let Some(window) = day {
        rules.day = ShiftPolicy::parse_window(window)
            .with_context(|| format!("DAY_SHIFT_WINDOW {window:?} is not HHmm-HHmm"))?;
    }
    if let Some(window) = night {
        rules.night = ShiftPolicy::parse_window(window)
            .with_context(|| format!("NIGHT_SHIFT_WINDOW {window:?} is not HHmm-HHmm"))?;
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(shift_rules(None, None).unwrap(), ShiftRules::default());
    }

    #[test]
    fn site_override() {
        let rules = shift_rules(Some("0800-1700"), None).unwrap();
        assert_eq!(rules.day.start_minutes, 480);
        assert_eq!(rules.day.ot_start_minutes, 1020);
        assert_eq!(rules.night, ShiftPolicy::NIGHT);

        let rules = shift_rules(None, Some("2200-0600")).unwrap();
        assert_eq!(rules.night.end_minutes, 360 + 1440);
    }

    #[test]
    fn bad_override_is_an_error() {
        let err = shift_rules(Some("7:30 to 4:30"), None).unwrap_err();
        assert!(err.to_string().contains("DAY_SHIFT_WINDOW"));
    }
}
