use crate::milestones::DEFAULT_MILESTONES;
use std::{env, path::PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
    pub milestones: Vec<u32>,
}

impl Config {
    pub fn from_env() -> Self {
        let data_path = env::var("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/state.json"));

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let milestones = match env::var("APP_MILESTONES") {
            Ok(raw) => parse_milestones(&raw).unwrap_or_else(|| {
                warn!("ignoring invalid APP_MILESTONES value {raw:?}");
                DEFAULT_MILESTONES.to_vec()
            }),
            Err(_) => DEFAULT_MILESTONES.to_vec(),
        };

        Self {
            data_path,
            port,
            milestones,
        }
    }
}

/// Comma-separated positive day counts, sorted and deduplicated.
pub fn parse_milestones(raw: &str) -> Option<Vec<u32>> {
    let mut days = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u32>().ok().filter(|&days| days > 0))
        .collect::<Option<Vec<u32>>>()?;
    if days.is_empty() {
        return None;
    }
    days.sort_unstable();
    days.dedup();
    Some(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestones_parse_sorted() {
        assert_eq!(parse_milestones("90, 30,60,30"), Some(vec![30, 60, 90]));
    }

    #[test]
    fn milestones_reject_garbage() {
        assert_eq!(parse_milestones(""), None);
        assert_eq!(parse_milestones("30,abc"), None);
        assert_eq!(parse_milestones("0,30"), None);
    }
}
