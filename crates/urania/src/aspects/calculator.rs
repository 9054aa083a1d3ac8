use crate::aspects::types::{AspectRecord, AspectTable};
use crate::ephemeris::types::{Body, PlanetPosition};
use crate::math::separation;

/// A single aspect hit between two longitudes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectHit {
    /// Position in the aspect table
    pub index: usize,
    /// Signed deviation from the exact angle
    pub orb: f64,
}

/// Aspect calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Every table entry whose orb window contains the separation of two longitudes.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64, table: &AspectTable) -> Vec<AspectHit> {
        let delta = separation(lon1, lon2);
        table
            .definitions()
            .iter()
            .enumerate()
            .filter_map(|(index, def)| {
                let orb = delta - def.exact_angle;
                (orb.abs() <= def.orb).then_some(AspectHit { index, orb })
            })
            .collect()
    }

    /// Aspects for every unordered pair of points, sorted by table priority.
    ///
    /// Pairs keep their input order within one aspect type. The two lunar
    /// nodes are never paired with each other.
    pub fn compute_aspects(&self, points: &[(Body, f64)], table: &AspectTable) -> Vec<AspectRecord> {
        let mut records = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let (body_a, lon_a) = points[i];
                let (body_b, lon_b) = points[j];
                if body_a.is_antipode_of(body_b) {
                    continue;
                }
                for hit in self.calculate_aspect(lon_a, lon_b, table) {
                    let def = &table.definitions()[hit.index];
                    records.push(AspectRecord {
                        body_a,
                        body_b,
                        aspect_name: def.name.clone(),
                        exact_angle: def.exact_angle,
                        orb: hit.orb,
                        index: hit.index,
                    });
                }
            }
        }
        records.sort_by_key(|r| r.index);
        records
    }

    /// Aspects between computed body positions.
    pub fn compute_for_positions(&self, positions: &[PlanetPosition], table: &AspectTable) -> Vec<AspectRecord> {
        let points: Vec<(Body, f64)> = positions
            .iter()
            .map(|p| (p.body, p.position.longitude))
            .collect();
        self.compute_aspects(&points, table)
    }
}
