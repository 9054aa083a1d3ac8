use urania::houses::placidus::{declination, placidus_cusps, ra_from_lambda};
use urania::houses::{Angles, HouseSolver, HouseSystem};
use urania::math::{norm180, separation};
use urania::time::{GeoLocation, TimeFrame};

const SYSTEMS: [HouseSystem; 4] = [
    HouseSystem::Placidus,
    HouseSystem::Koch,
    HouseSystem::Equal,
    HouseSystem::WholeSign,
];

fn frame(lat: f64, lon: f64, jd: f64) -> TimeFrame {
    TimeFrame::from_julian_day(jd, 55.0, GeoLocation::new(lat, lon).unwrap())
}

#[test]
fn test_angles_and_cusps_are_antipodal() {
    let solver = HouseSolver::new();
    for lat in [-60.0, -33.9, 0.0, 28.08, 51.5, 64.0] {
        for step in 0..24 {
            let f = frame(lat, 15.0 * step as f64 - 170.0, 2_445_931.0 + step as f64 * 0.37);
            for system in SYSTEMS {
                let set = solver.calculate(&f, system).unwrap();
                let a = set.angles;
                assert!((separation(a.ascendant, a.descendant) - 180.0).abs() < 1e-9);
                assert!((separation(a.midheaven, a.imum_coeli) - 180.0).abs() < 1e-9);
                for n in 0..6 {
                    let d = separation(set.cusps[n], set.cusps[n + 6]);
                    assert!((d - 180.0).abs() < 1e-6, "{system} lat {lat} house {}", n + 1);
                }
                assert!(set.cusps.iter().all(|c| (0.0..360.0).contains(c)));
            }
        }
    }
}

#[test]
fn test_quadrant_systems_pin_the_angles() {
    let solver = HouseSolver::new();
    let f = frame(28.0786111, -80.6027778, 2_445_931.002_083);
    for system in [HouseSystem::Placidus, HouseSystem::Koch] {
        let set = solver.calculate(&f, system).unwrap();
        let a = set.angles;
        assert_eq!(set.cusps[0], a.ascendant);
        assert_eq!(set.cusps[3], a.imum_coeli);
        assert_eq!(set.cusps[6], a.descendant);
        assert_eq!(set.cusps[9], a.midheaven);
    }
}

#[test]
fn test_placidus_cusps_advance_in_order() {
    let solver = HouseSolver::new();
    for lat in [-50.0, 0.0, 45.0, 60.0] {
        let f = frame(lat, 10.0, 2_451_545.2);
        let set = solver.calculate(&f, HouseSystem::Placidus).unwrap();
        let start = set.cusps[0];
        let offsets: Vec<f64> = set.cusps.iter().map(|c| (c - start).rem_euclid(360.0)).collect();
        for w in offsets.windows(2) {
            assert!(w[0] < w[1], "lat {lat}: {offsets:?}");
        }
    }
}

#[test]
fn test_placidus_cusp_meets_trisection_condition() {
    let f = frame(51.5, -0.13, 2_451_545.2);
    let set = HouseSolver::new().calculate(&f, HouseSystem::Placidus).unwrap();
    let a = set.angles;
    let eps = a.obliquity;
    let tan_lat = a.latitude.to_radians().tan();

    // House 11: RA = ARMC + SDA/3
    let c11 = set.cusps[10];
    let ad = (tan_lat * declination(c11, eps).to_radians().tan()).asin().to_degrees();
    let expected = a.armc + (90.0 + ad) / 3.0;
    assert!(norm180(ra_from_lambda(c11, eps) - expected).abs() < 1e-5);

    // House 3: RA = ARMC + 180 − SNA/3
    let c3 = set.cusps[2];
    let ad = (tan_lat * declination(c3, eps).to_radians().tan()).asin().to_degrees();
    let expected = a.armc + 180.0 - (90.0 - ad) / 3.0;
    assert!(norm180(ra_from_lambda(c3, eps) - expected).abs() < 1e-5);
}

#[test]
fn test_equal_and_whole_sign_from_ascendant() {
    let angles = Angles::new(200.0, 23.44, 40.0);
    let solver = HouseSolver::new();
    let equal = solver.cusps_for(angles, HouseSystem::Equal).unwrap();
    let whole = solver.cusps_for(angles, HouseSystem::WholeSign).unwrap();
    for n in 0..12 {
        let expected = (angles.ascendant + 30.0 * n as f64).rem_euclid(360.0);
        assert!(separation(equal.cusps[n], expected) < 1e-9);
        assert_eq!(whole.cusps[n] % 30.0, 0.0);
    }
    assert!(angles.ascendant - whole.cusps[0] >= 0.0 && angles.ascendant - whole.cusps[0] < 30.0);
}

#[test]
fn test_placidus_converges_below_polar_circle() {
    let mut latitudes: Vec<f64> = (55..=66).map(f64::from).collect();
    latitudes.push(66.5);
    for lat in latitudes {
        for lat in [lat, -lat] {
            for armc in 0..360 {
                let angles = Angles::new(armc as f64, 23.44, lat);
                let cusps = match placidus_cusps(&angles) {
                    Ok(cusps) => cusps,
                    Err(e) => panic!("lat {lat} armc {armc}: {e}"),
                };
                let offsets: Vec<f64> = cusps
                    .iter()
                    .map(|c| (c - angles.ascendant).rem_euclid(360.0))
                    .collect();
                assert!(
                    offsets.windows(2).all(|w| w[0] < w[1]),
                    "lat {lat} armc {armc}: {cusps:?}"
                );
            }
        }
    }
}
