// Seed loading: the initial activity set the directory starts with.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::Activities;
use crate::config::{Config, ConfigTrait};

/// Reference seed shipped with the service.
const REFERENCE_SEED: &str = include_str!("../../cfg/activities.seed.yaml");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("malformed seed yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("activity {activity:?} has max_participants = 0")]
    ZeroCapacity { activity: String },
    #[error("activity {activity:?} lists participant {email:?} more than once")]
    DuplicateParticipant { activity: String, email: String },
}

/// Parses and validates a YAML seed document.
pub fn parse(data: &str) -> Result<Activities, SeedError> {
    let activities: Activities = serde_yaml::from_str(data)?;
    validate(&activities)?;
    Ok(activities)
}

/// Returns the embedded reference seed.
pub fn reference() -> Result<Activities, SeedError> {
    parse(REFERENCE_SEED)
}

/// Reads a seed from an external YAML file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Activities> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read seed yaml file {:?}", path))?;
    parse(&data).with_context(|| format!("load seed from {:?}", path))
}

/// Resolves the seed configured for this process.
pub fn from_config(cfg: &Config) -> Result<Activities> {
    match cfg.seed().and_then(|s| s.path.as_ref()) {
        Some(path) => {
            let activities = load(path)?;
            info!(
                component = "seed",
                event = "load_success",
                path = ?path,
                activities = activities.len(),
                "seed loaded"
            );
            Ok(activities)
        }
        None => {
            let activities = reference().context("embedded reference seed is invalid")?;
            info!(
                component = "seed",
                event = "load_success",
                path = "embedded",
                activities = activities.len(),
                "seed loaded"
            );
            Ok(activities)
        }
    }
}

fn validate(activities: &Activities) -> Result<(), SeedError> {
    for (name, activity) in activities {
        if activity.max_participants == 0 {
            return Err(SeedError::ZeroCapacity {
                activity: name.clone(),
            });
        }
        for (i, email) in activity.participants.iter().enumerate() {
            if activity.participants[..i].contains(email) {
                return Err(SeedError::DuplicateParticipant {
                    activity: name.clone(),
                    email: email.clone(),
                });
            }
        }
    }
    Ok(())
}
