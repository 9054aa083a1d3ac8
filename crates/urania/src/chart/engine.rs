use crate::aspects::AspectCalculator;
use crate::chart::data::ChartRecord;
use crate::chart::request::ChartRequest;
use crate::chart::settings::ChartSettings;
use crate::ephemeris::types::{Body, EphemerisSettings, PhaseInfo, PlanetPosition};
use crate::ephemeris::{EphemerisAdapter, EphemerisIngestor};
use crate::error::Result;
use crate::houses::{HouseSolver, HouseSystem};
use crate::time::{parse_zone, Moment, NoZone, TimeFrame, ZoneResolver};
use log::debug;

/// Runs a chart request end to end: time frame, bodies, houses, aspects.
///
/// Holds only read-only configuration; one engine can serve any number of
/// requests, including concurrently.
pub struct ChartEngine {
    settings: ChartSettings,
    adapter: EphemerisAdapter,
    houses: HouseSolver,
    aspects: AspectCalculator,
    zone_resolver: Box<dyn ZoneResolver>,
}

impl Default for ChartEngine {
    fn default() -> Self {
        Self::new(ChartSettings::default())
    }
}

impl ChartEngine {
    pub fn new(settings: ChartSettings) -> Self {
        Self {
            settings,
            adapter: EphemerisAdapter::new(),
            houses: HouseSolver::new(),
            aspects: AspectCalculator::new(),
            zone_resolver: Box::new(NoZone),
        }
    }

    /// Resolver used for requests that carry no explicit zone, typically a
    /// coordinate-to-zone lookup service.
    pub fn with_zone_resolver(mut self, resolver: Box<dyn ZoneResolver>) -> Self {
        self.zone_resolver = resolver;
        self
    }

    pub fn with_ingestor(mut self, ingestor: EphemerisIngestor) -> Self {
        self.adapter = EphemerisAdapter::with_ingestor(ingestor);
        self
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Validate, resolve the local time and compute the full chart.
    pub fn calculate(&self, request: &ChartRequest) -> Result<ChartRecord> {
        let validated = request.validate()?;
        let moment = match &request.zone {
            Some(zone) => Moment::resolve(validated.local, validated.location, parse_zone(zone)?.as_ref())?,
            None => Moment::resolve(validated.local, validated.location, self.zone_resolver.as_ref())?,
        };
        let bodies = validated.bodies.unwrap_or_else(|| self.settings.bodies.clone());
        let system = validated.house_system.unwrap_or(self.settings.house_system);
        self.calculate_moment(&moment, &bodies, system)
    }

    /// Compute a chart for an already resolved moment.
    pub fn calculate_moment(&self, moment: &Moment, bodies: &[Body], system: HouseSystem) -> Result<ChartRecord> {
        let frame = TimeFrame::new(moment);
        debug!(
            "Chart at JD(UT) {:.6}, ΔT {:.1}s, LST {:.4}°",
            frame.julian_day_ut, frame.delta_t_seconds, frame.local_sidereal_time
        );

        let ephemeris = EphemerisSettings {
            mode: self.settings.ephemeris,
            include_objects: bodies.to_vec(),
            apparent: self.settings.apparent,
        };
        let positions = self.adapter.calc_positions(&frame, &ephemeris)?;
        let houses = self.houses.calculate(&frame, system)?;
        let aspects = self
            .aspects
            .compute_for_positions(&positions, &self.settings.aspects);
        let phase = self.moon_phase(&frame, &positions, &ephemeris)?;

        debug!(
            "{} bodies, {} houses, {} aspects",
            positions.len(),
            houses.system,
            aspects.len()
        );
        Ok(ChartRecord::assemble(
            moment.utc(),
            &frame,
            &positions,
            &houses,
            &aspects,
            phase,
        ))
    }

    /// Phase from the chart's Sun and Moon, computing whichever was not requested.
    fn moon_phase(
        &self,
        frame: &TimeFrame,
        positions: &[PlanetPosition],
        settings: &EphemerisSettings,
    ) -> Result<PhaseInfo> {
        let longitude = |body: Body| -> Result<f64> {
            match positions.iter().find(|p| p.body == body) {
                Some(p) => Ok(p.position.longitude),
                None => Ok(self.adapter.calc_planet_position(body, frame, settings)?.position.longitude),
            }
        };
        let moon = longitude(Body::Moon)?;
        let sun = longitude(Body::Sun)?;
        Ok(self.adapter.lunar().phase(moon, sun))
    }
}
