//! Display projection of ecliptic longitudes onto the tropical zodiac.

use crate::math::norm360;
use serde::{Deserialize, Serialize};
use std::fmt;

const ARCSEC_PER_SIGN: i64 = 30 * 3600;
const ARCSEC_PER_CIRCLE: i64 = 360 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing a longitude.
    pub fn from_longitude(longitude: f64) -> Self {
        let idx = (norm360(longitude) / 30.0).floor() as usize;
        Self::ALL[idx.min(11)]
    }

    /// Zero-based position from Aries.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn start_longitude(&self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign, degree, minute and second of a longitude, rounded to the nearest second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZodiacPosition {
    pub sign: ZodiacSign,
    pub degree: u32,
    pub minute: u32,
    pub second: u32,
}

impl ZodiacPosition {
    /// Rounding carries upward: 60″ into the minute, 60′ into the degree,
    /// 30° into the next sign and Pisces 30° back to Aries 0°.
    pub fn from_longitude(longitude: f64) -> Self {
        let total = ((norm360(longitude) * 3600.0).round() as i64).rem_euclid(ARCSEC_PER_CIRCLE);
        let sign = ZodiacSign::ALL[(total / ARCSEC_PER_SIGN) as usize];
        let within = total % ARCSEC_PER_SIGN;
        Self {
            sign,
            degree: (within / 3600) as u32,
            minute: (within % 3600 / 60) as u32,
            second: (within % 60) as u32,
        }
    }

    /// Recombine into decimal ecliptic longitude.
    pub fn to_degrees(&self) -> f64 {
        self.sign.start_longitude()
            + f64::from(self.degree)
            + f64::from(self.minute) / 60.0
            + f64::from(self.second) / 3600.0
    }
}

impl fmt::Display for ZodiacPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°{:02}′{:02}″ {}",
            self.degree, self.minute, self.second, self.sign
        )
    }
}

/// An aspect orb as unsigned degree/minute/second plus the signed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbDms {
    pub degree: u32,
    pub minute: u32,
    pub second: u32,
    pub signed: f64,
}

impl OrbDms {
    pub fn from_orb(orb: f64) -> Self {
        let total = (orb.abs() * 3600.0).round() as u64;
        Self {
            degree: (total / 3600) as u32,
            minute: (total % 3600 / 60) as u32,
            second: (total % 60) as u32,
            signed: orb,
        }
    }
}

impl fmt::Display for OrbDms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.signed < 0.0 { "-" } else { "+" };
        write!(f, "{sign}{}°{:02}′{:02}″", self.degree, self.minute, self.second)
    }
}
