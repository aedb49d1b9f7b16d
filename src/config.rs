use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::defs::{DEFAULT_HIGHLIGHT_OFF_MS, DEFAULT_HIGHLIGHT_ON_MS};
use crate::geometry::BoardGeometry;
use crate::highlight::HighlightTiming;
use crate::logging::{log_info, log_warning};
use crate::matcher::PatternMatcher;
use crate::pattern::Pattern;

pub const DEFAULT_CONFIG_PATH: &str = "conf/bingo.conf";

#[derive(Debug, Clone)]
pub struct BingoConfig {
    pub geometry: BoardGeometry,
    pub patterns: Vec<Pattern>,
    pub free_center: bool,
    pub highlight_on_ms: u64,
    pub highlight_off_ms: u64,
}

impl Default for BingoConfig {
    fn default() -> Self {
        Self {
            geometry: BoardGeometry::default(),
            patterns: Pattern::ALL.to_vec(),
            free_center: true,
            highlight_on_ms: DEFAULT_HIGHLIGHT_ON_MS,
            highlight_off_ms: DEFAULT_HIGHLIGHT_OFF_MS,
        }
    }
}

impl BingoConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::from_str_content(&content)
    }

    pub fn from_str_content(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config_map = parse_config(content)?;
        let defaults = Self::default();

        let rows = match config_map.get("rows") {
            Some(value) => parse_axis(value)?,
            None => defaults.geometry.rows().to_vec(),
        };
        let cols = match config_map.get("cols") {
            Some(value) => parse_axis(value)?,
            None => defaults.geometry.cols().to_vec(),
        };
        let geometry = BoardGeometry::new(rows, cols)?;

        let patterns = match config_map.get("patterns") {
            Some(value) => value
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(str::parse::<Pattern>)
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.patterns,
        };

        let free_center = parse_or_default(&config_map, "free_center", defaults.free_center);
        let highlight_on_ms = parse_or_default(&config_map, "highlight_on_ms", defaults.highlight_on_ms);
        let highlight_off_ms = parse_or_default(&config_map, "highlight_off_ms", defaults.highlight_off_ms);

        Ok(BingoConfig { geometry, patterns, free_center, highlight_on_ms, highlight_off_ms })
    }

    pub fn load_or_default() -> Self {
        Self::load_from_or_default(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        match Self::from_file(path) {
            Ok(config) => {
                log_info(&format!("Loaded bingo configuration from {}", path.display()));
                config
            }
            Err(e) => {
                log_warning(&format!("Could not load config from {}: {}. Using defaults.", path.display(), e));
                Self::default()
            }
        }
    }

    pub fn highlight_timing(&self) -> HighlightTiming {
        HighlightTiming {
            on: Duration::from_millis(self.highlight_on_ms),
            off: Duration::from_millis(self.highlight_off_ms),
        }
    }

    /// Matcher over the configured geometry and patterns.
    pub fn matcher(&self) -> crate::error::Result<PatternMatcher> {
        PatternMatcher::new(self.geometry.clone(), self.patterns.clone())
    }
}

// Unparseable values keep the default, with a warning naming the key.
fn parse_or_default<T>(config_map: &HashMap<String, String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match config_map.get(key) {
        Some(value) => value.parse::<T>().unwrap_or_else(|e| {
            log_warning(&format!("Invalid value '{value}' for {key}: {e}. Using default {default}."));
            default
        }),
        None => default,
    }
}

fn parse_axis(value: &str) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    let mut axis = Vec::new();
    for item in value.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        axis.push(item.parse::<i32>().map_err(|e| format!("invalid index '{item}': {e}"))?);
    }
    Ok(axis)
}

fn parse_config(content: &str) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            config.insert(key.trim().to_string(), value.trim().to_string());
        } else {
            return Err(format!("malformed config line '{line}'").into());
        }
    }

    Ok(config)
}
