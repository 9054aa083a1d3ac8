use chrono::{TimeZone, Utc};
use urania::ephemeris::types::{Body, EphemerisMode, EphemerisSettings};
use urania::ephemeris::{equatorial_to_ecliptic, EphemerisAdapter, EphemerisIngestor, KeplerianPlanetEngine};
use urania::math::separation;
use urania::time::{GeoLocation, Moment, TimeFrame};

fn reference_frame() -> TimeFrame {
    let loc = GeoLocation::new(28.0786111, -80.6027778).unwrap();
    let utc = Utc.with_ymd_and_hms(1984, 8, 18, 12, 3, 0).unwrap();
    TimeFrame::new(&Moment::from_utc(utc, loc).unwrap())
}

#[test]
fn test_reference_date_planets() {
    let frame = reference_frame();
    let engine = KeplerianPlanetEngine::new();
    // Mars just entered Sagittarius; Jupiter early Capricorn; Saturn mid Scorpio; Pluto late Libra
    let expected = [
        (Body::Mars, 240.35),
        (Body::Jupiter, 273.31),
        (Body::Saturn, 220.75),
        (Body::Pluto, 209.76),
    ];
    for (body, lon) in expected {
        let pos = engine.position(body, &frame, true).unwrap();
        assert!(separation(pos.longitude, lon) < 0.5, "{body}: {}", pos.longitude);
    }
    let pluto = engine.position(Body::Pluto, &frame, true).unwrap();
    assert!(pluto.latitude > 15.0 && pluto.latitude < 18.0);
}

#[test]
fn test_all_bodies_have_finite_positions() {
    let adapter = EphemerisAdapter::new();
    let positions = adapter
        .calc_positions(&reference_frame(), &EphemerisSettings::default())
        .unwrap();
    assert_eq!(positions.len(), 12);
    for p in &positions {
        assert!((0.0..360.0).contains(&p.position.longitude), "{}", p.body);
        assert!(p.position.latitude.abs() < 20.0, "{}", p.body);
        assert!(p.speed_lon.is_finite());
        assert_eq!(p.retrograde, p.speed_lon < 0.0);
    }
    let moon = positions.iter().find(|p| p.body == Body::Moon).unwrap();
    assert!(moon.speed_lon > 11.0 && moon.speed_lon < 16.0);
    assert!(moon.position.latitude.abs() <= 5.4);
}

#[test]
fn test_ingested_mode_without_rows_falls_back() {
    let frame = reference_frame();
    let settings = EphemerisSettings {
        mode: EphemerisMode::Ingested,
        include_objects: vec![Body::Venus],
        apparent: true,
    };
    let with_empty = EphemerisAdapter::with_ingestor(EphemerisIngestor::new())
        .calc_positions(&frame, &settings)
        .unwrap();
    let closed = EphemerisAdapter::new()
        .calc_positions(&frame, &EphemerisSettings { mode: EphemerisMode::Keplerian, ..settings.clone() })
        .unwrap();
    assert_eq!(with_empty, closed);
}

#[test]
fn test_equatorial_rotation_preserves_angles() {
    // Points on the equator and ecliptic poles
    let pole = equatorial_to_ecliptic(270.0, 90.0 - 23.44, 23.44);
    assert!((pole.latitude - 90.0).abs() < 1e-6);

    let summer = equatorial_to_ecliptic(90.0, 23.44, 23.44);
    assert!((summer.longitude - 90.0).abs() < 1e-9);
    assert!(summer.latitude.abs() < 1e-9);
}
