use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use crate::badge::{BadgeReader, CarrierTable, NameRule};

pub const CARRIERS_FILE_VAR: &str = "LOUNGE_CARRIERS_FILE";
pub const NAME_RULE_VAR: &str = "LOUNGE_NAME_RULE";

/// Desk configuration, read from the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Extra/overriding carrier entries (JSON object file)
    pub carriers_file: Option<PathBuf>,
    pub name_rule: NameRule,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or invalid values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let carriers_file = lookup(CARRIERS_FILE_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let name_rule = match lookup(NAME_RULE_VAR) {
            Some(value) => value.parse::<NameRule>().unwrap_or_else(|e| {
                warn!("Invalid {NAME_RULE_VAR} value: {e}");
                NameRule::default()
            }),
            None => {
                info!("{NAME_RULE_VAR} not set, using default");
                NameRule::default()
            }
        };

        Config {
            carriers_file,
            name_rule,
        }
    }

    /// Reader for this configuration. Fails only if a carriers file is set
    /// and can't be loaded.
    pub fn reader(&self) -> Result<BadgeReader> {
        let carriers = match &self.carriers_file {
            Some(path) => CarrierTable::from_file(path)?,
            None => CarrierTable::new(),
        };
        info!(carriers = carriers.len(), name_rule = ?self.name_rule, "Badge reader ready");

        Ok(BadgeReader::new()
            .with_carriers(carriers)
            .with_name_rule(self.name_rule))
    }
}
