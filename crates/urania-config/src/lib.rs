use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use urania::aspects::AspectTable;
use urania::ephemeris::types::{Body, EphemerisMode};
use urania::houses::HouseSystem;
use urania::ChartSettings;

/// Same lookup as the other workspace tools: repo root first, then from inside `apps/<name>`.
pub const CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    bodies: Option<Vec<String>>,
    #[serde(default)]
    ephemeris: Option<String>,
    #[serde(default)]
    apparent: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct AspectsToml {
    #[serde(default = "default_include_minor")]
    include_minor: bool,
    #[serde(default)]
    orbs: HashMap<String, f64>,
}

impl Default for AspectsToml {
    fn default() -> Self {
        Self {
            include_minor: default_include_minor(),
            orbs: HashMap::new(),
        }
    }
}

fn default_include_minor() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    aspects: AspectsToml,
}

/// Parse `urania.toml` text into engine settings. Unset keys keep the engine defaults.
pub fn parse_chart_settings(text: &str) -> anyhow::Result<ChartSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let RootConfigToml { chart, aspects } = root;
    let mut settings = ChartSettings::default();

    if let Some(name) = chart.house_system {
        settings.house_system = name
            .parse::<HouseSystem>()
            .with_context(|| format!("[chart] house_system = {name:?}"))?;
    }
    if let Some(names) = chart.bodies {
        if names.is_empty() {
            anyhow::bail!("[chart] bodies must name at least one body");
        }
        settings.bodies = names
            .iter()
            .map(|n| n.parse::<Body>())
            .collect::<Result<Vec<_>, _>>()
            .context("[chart] bodies")?;
    }
    if let Some(mode) = chart.ephemeris {
        settings.ephemeris = mode
            .parse::<EphemerisMode>()
            .with_context(|| format!("[chart] ephemeris = {mode:?}"))?;
    }
    if let Some(apparent) = chart.apparent {
        settings.apparent = apparent;
    }

    let table = AspectTable::default()
        .with_orbs(&aspects.orbs)
        .context("[aspects] orbs")?;
    settings.aspects = if aspects.include_minor { table } else { table.majors_only() };
    Ok(settings)
}

/// Load settings from a specific file. A missing file yields the defaults.
pub fn load_chart_settings_from(path: &Path) -> anyhow::Result<ChartSettings> {
    match fs::read_to_string(path) {
        Ok(text) => parse_chart_settings(&text).with_context(|| format!("in {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ChartSettings::default()),
        Err(e) => Err(e).with_context(|| format!("Could not read {}", path.display())),
    }
}

/// Load settings from the first of [`CONFIG_PATHS`] that exists, or the defaults.
pub fn load_chart_settings() -> anyhow::Result<ChartSettings> {
    for p in &CONFIG_PATHS {
        let path = Path::new(p);
        if path.exists() {
            return load_chart_settings_from(path);
        }
    }
    Ok(ChartSettings::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(parse_chart_settings("").unwrap(), ChartSettings::default());
    }

    #[test]
    fn chart_section_overrides() {
        let settings = parse_chart_settings(
            r#"
            [chart]
            house_system = "whole_sign"
            bodies = ["sun", "moon", "north_node"]
            ephemeris = "ingested"
            "#,
        )
        .unwrap();
        assert_eq!(settings.house_system, HouseSystem::WholeSign);
        assert_eq!(settings.bodies, vec![Body::Sun, Body::Moon, Body::NorthNode]);
        assert_eq!(settings.ephemeris, EphemerisMode::Ingested);
        assert!(settings.apparent);
    }

    #[test]
    fn aspects_section_filters_and_overrides() {
        let settings = parse_chart_settings(
            r#"
            [aspects]
            include_minor = false
            orbs = { trine = 7.5, conjunction = 10.0 }
            "#,
        )
        .unwrap();
        assert_eq!(settings.aspects.len(), 6);
        assert!(settings.aspects.get("quintile").is_none());
        assert_eq!(settings.aspects.get("trine").unwrap().orb, 7.5);
        assert_eq!(settings.aspects.get("conjunction").unwrap().orb, 10.0);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(parse_chart_settings("[chart]\nhouse_system = \"campanus\"").is_err());
        assert!(parse_chart_settings("[chart]\nbodies = [\"vulcan\"]").is_err());
        assert!(parse_chart_settings("[chart]\nbodies = []").is_err());
        assert!(parse_chart_settings("[aspects]\norbs = { trine = -1.0 }").is_err());
        assert!(parse_chart_settings("[chart\n").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_chart_settings_from(&dir.path().join("urania.toml")).unwrap();
        assert_eq!(settings, ChartSettings::default());
    }

    #[test]
    fn file_is_read_and_malformed_file_fails() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "[chart]\nhouse_system = \"koch\"").unwrap();
        let settings = load_chart_settings_from(good.path()).unwrap();
        assert_eq!(settings.house_system, HouseSystem::Koch);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "[chart]\nhouse_system = 3").unwrap();
        assert!(load_chart_settings_from(bad.path()).is_err());
    }
}
