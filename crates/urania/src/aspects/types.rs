use crate::ephemeris::types::Body;
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of the aspect table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectDefinition {
    /// Aspect name: "conjunction", "trine", etc.
    pub name: String,
    /// Exact angle for this aspect
    pub exact_angle: f64,
    /// Maximum allowed deviation from the exact angle
    pub orb: f64,
    pub major: bool,
}

/// Name, exact angle, default orb, major flag. Order is priority order.
const DEFAULT_ASPECTS: &[(&str, f64, f64, bool)] = &[
    ("conjunction", 0.0, 8.0, true),
    ("opposition", 180.0, 8.0, true),
    ("trine", 120.0, 6.0, true),
    ("square", 90.0, 6.0, true),
    ("sextile", 60.0, 4.0, true),
    ("quincunx", 150.0, 3.0, true),
    ("semisextile", 30.0, 2.0, false),
    ("semisquare", 45.0, 2.0, false),
    ("sesquiquadrate", 135.0, 2.0, false),
    ("quintile", 72.0, 1.5, false),
    ("biquintile", 144.0, 1.5, false),
    ("septile", 360.0 / 7.0, 1.0, false),
    ("novile", 40.0, 1.0, false),
    ("decile", 36.0, 1.0, false),
    ("undecile", 360.0 / 11.0, 1.0, false),
];

/// Priority-ordered aspect table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectTable {
    definitions: Vec<AspectDefinition>,
}

impl Default for AspectTable {
    fn default() -> Self {
        Self {
            definitions: DEFAULT_ASPECTS
                .iter()
                .map(|&(name, exact_angle, orb, major)| AspectDefinition {
                    name: name.to_string(),
                    exact_angle,
                    orb,
                    major,
                })
                .collect(),
        }
    }
}

impl AspectTable {
    /// Build a table from explicit definitions, kept in the given order.
    pub fn new(definitions: Vec<AspectDefinition>) -> Result<Self> {
        for def in &definitions {
            validate_orb(&def.name, def.orb)?;
            if !(0.0..=180.0).contains(&def.exact_angle) {
                return Err(ChartError::invalid(format!(
                    "aspect angle for {} must be within [0, 180], got {}",
                    def.name, def.exact_angle
                )));
            }
        }
        Ok(Self { definitions })
    }

    /// The default table restricted to the major aspects.
    pub fn majors_only(self) -> Self {
        Self {
            definitions: self.definitions.into_iter().filter(|d| d.major).collect(),
        }
    }

    /// Override the orb of one named aspect.
    pub fn with_orb(mut self, name: &str, orb: f64) -> Result<Self> {
        validate_orb(name, orb)?;
        let key = name.trim().to_lowercase();
        let def = self
            .definitions
            .iter_mut()
            .find(|d| d.name == key)
            .ok_or_else(|| {
                ChartError::invalid(format!(
                    "unknown aspect '{name}' (known: {})",
                    DEFAULT_ASPECTS.iter().map(|a| a.0).collect::<Vec<_>>().join(", ")
                ))
            })?;
        def.orb = orb;
        Ok(self)
    }

    /// Apply several orb overrides keyed by aspect name.
    pub fn with_orbs(self, orbs: &HashMap<String, f64>) -> Result<Self> {
        orbs.iter()
            .try_fold(self, |table, (name, &orb)| table.with_orb(name, orb))
    }

    pub fn definitions(&self) -> &[AspectDefinition] {
        &self.definitions
    }

    pub fn get(&self, name: &str) -> Option<&AspectDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn validate_orb(name: &str, orb: f64) -> Result<()> {
    if orb.is_finite() && orb >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::invalid(format!(
            "orb for {name} must be a non-negative number, got {orb}"
        )))
    }
}

/// A detected aspect between two bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectRecord {
    pub body_a: Body,
    pub body_b: Body,
    pub aspect_name: String,
    pub exact_angle: f64,
    /// Signed deviation from the exact angle (separation − exact)
    pub orb: f64,
    /// Position of the aspect in the priority table
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_priority_order() {
        let table = AspectTable::default();
        let names: Vec<&str> = table.definitions().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names.len(), 15);
        assert_eq!(&names[..6], &["conjunction", "opposition", "trine", "square", "sextile", "quincunx"]);
        assert_eq!(names[14], "undecile");
    }

    #[test]
    fn majors_only_keeps_six() {
        let table = AspectTable::default().majors_only();
        assert_eq!(table.len(), 6);
        assert!(table.get("quintile").is_none());
    }

    #[test]
    fn orb_overrides() {
        let mut orbs = HashMap::new();
        orbs.insert("trine".to_string(), 9.0);
        orbs.insert("Sextile".to_string(), 5.5);
        let table = AspectTable::default().with_orbs(&orbs).unwrap();
        assert_eq!(table.get("trine").unwrap().orb, 9.0);
        assert_eq!(table.get("sextile").unwrap().orb, 5.5);

        assert!(AspectTable::default().with_orb("trine", -1.0).is_err());
        assert!(AspectTable::default().with_orb("hexagon", 1.0).is_err());
    }
}
