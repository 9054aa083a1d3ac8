use crate::ephemeris::ingest::EphemerisIngestor;
use crate::ephemeris::kepler::KeplerianPlanetEngine;
use crate::ephemeris::lunar::LunarEngine;
use crate::ephemeris::solar::SolarEngine;
use crate::ephemeris::types::{Body, EclipticPosition, EphemerisMode, EphemerisSettings, PlanetPosition};
use crate::error::Result;
use crate::math::norm180;
use crate::time::TimeFrame;
use log::{debug, warn};

/// Half-width of the finite-difference window used for daily speed.
const SPEED_HALF_WINDOW_DAYS: f64 = 0.5;

/// Dispatches each body to the engine that computes it.
///
/// Closed-form engines cover every body; an optional [`EphemerisIngestor`]
/// supplies higher-accuracy positions for the bodies it has rows for.
#[derive(Debug, Clone, Default)]
pub struct EphemerisAdapter {
    solar: SolarEngine,
    lunar: LunarEngine,
    planets: KeplerianPlanetEngine,
    ingestor: Option<EphemerisIngestor>,
}

impl EphemerisAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ingestor(ingestor: EphemerisIngestor) -> Self {
        Self {
            ingestor: Some(ingestor),
            ..Self::default()
        }
    }

    pub fn ingestor(&self) -> Option<&EphemerisIngestor> {
        self.ingestor.as_ref()
    }

    pub fn lunar(&self) -> &LunarEngine {
        &self.lunar
    }

    /// Position of `body` from the closed-form engines only.
    pub fn closed_form(&self, body: Body, frame: &TimeFrame, apparent: bool) -> Result<EclipticPosition> {
        match body {
            Body::Sun => Ok(self.solar.position(frame, apparent)),
            Body::Moon => Ok(self.lunar.position(frame, apparent)),
            Body::NorthNode => Ok(self.lunar.mean_node(frame)),
            Body::SouthNode => Ok(self.lunar.mean_node(frame).antipode()),
            planet => self.planets.position(planet, frame, apparent),
        }
    }

    /// Daily motion in longitude from a centred finite difference.
    fn speed(&self, body: Body, frame: &TimeFrame, apparent: bool) -> Result<f64> {
        let before = self.closed_form(body, &frame.shifted(-SPEED_HALF_WINDOW_DAYS), apparent)?;
        let after = self.closed_form(body, &frame.shifted(SPEED_HALF_WINDOW_DAYS), apparent)?;
        Ok(norm180(after.longitude - before.longitude) / (2.0 * SPEED_HALF_WINDOW_DAYS))
    }

    /// Calculate position for a single body
    pub fn calc_planet_position(
        &self,
        body: Body,
        frame: &TimeFrame,
        settings: &EphemerisSettings,
    ) -> Result<PlanetPosition> {
        let ingested = match (settings.mode, &self.ingestor) {
            (EphemerisMode::Ingested, Some(ingestor)) => ingestor.position(body, frame),
            _ => None,
        };

        let position = match ingested {
            Some(pos) => {
                debug!("{} taken from ingested ephemeris", body);
                pos
            }
            None => {
                if settings.mode == EphemerisMode::Ingested {
                    warn!("No ingested row for {}; using the Keplerian engine", body);
                }
                self.closed_form(body, frame, settings.apparent)?
            }
        };

        let speed_lon = self.speed(body, frame, settings.apparent)?;
        Ok(PlanetPosition {
            body,
            position,
            speed_lon,
            retrograde: speed_lon < 0.0,
        })
    }

    /// Calculate positions for every requested body, in request order
    pub fn calc_positions(
        &self,
        frame: &TimeFrame,
        settings: &EphemerisSettings,
    ) -> Result<Vec<PlanetPosition>> {
        settings
            .include_objects
            .iter()
            .map(|&body| self.calc_planet_position(body, frame, settings))
            .collect()
    }
}
