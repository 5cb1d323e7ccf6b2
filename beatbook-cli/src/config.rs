use anyhow::{Context, Result};
use beatbook_core::{BeatCalendar, GeoPoint};
use beatbook_ingest::FeedSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_beatbook_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedSection,
    pub agent: AgentSection,
    pub routing: RoutingSection,
    /// Weekday → areas override; defaults to the built-in beat table.
    pub calendar: BeatCalendar,
    /// Column re-mapping for distributors that export a different layout.
    pub schema: FeedSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSection {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSection {
    /// Home base, start and end of every day's loop.
    pub origin_lat: f64,
    pub origin_lng: f64,
    /// Average field speed for the travel-time estimate.
    pub avg_speed_kmh: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedSection::default(),
            agent: AgentSection::default(),
            routing: RoutingSection::default(),
            calendar: BeatCalendar::default(),
            schema: FeedSchema::default(),
        }
    }
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            url: "https://feeds.example.com/beatbook/accounts.csv".to_string(),
        }
    }
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

impl Default for RoutingSection {
    fn default() -> Self {
        Self {
            origin_lat: 20.9964,
            origin_lng: 83.0526,
            avg_speed_kmh: beatbook_core::AVG_SPEED_KMH,
        }
    }
}

impl Config {
    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.routing.origin_lat, self.routing.origin_lng)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_beatbook_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}
