//! Mean Keplerian elements and two-body positions for the planets.
//!
//! Elements and rates per Julian century (TT) from Standish, "Keplerian
//! Elements for Approximate Positions of the Major Planets" (JPL SSD),
//! Table 1, valid 1800 AD – 2050 AD. Positions are heliocentric, in AU, in
//! the J2000 ecliptic frame.

use std::f64::consts::{PI, TAU};

use almanac_core::Body;

/// One element as `(value at J2000, rate per century)`.
type Rate = (f64, f64);

/// Mean orbital elements of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetElements {
    /// Semi-major axis, AU.
    pub a: Rate,
    pub e: Rate,
    /// Inclination, degrees.
    pub i: Rate,
    /// Mean longitude, degrees.
    pub mean_longitude: Rate,
    /// Longitude of perihelion, degrees.
    pub perihelion_longitude: Rate,
    /// Longitude of the ascending node, degrees.
    pub node_longitude: Rate,
}

const MERCURY: PlanetElements = PlanetElements {
    a: (0.387_099_27, 0.000_000_37),
    e: (0.205_635_93, 0.000_019_06),
    i: (7.004_979_02, -0.005_947_49),
    mean_longitude: (252.250_323_50, 149_472.674_111_75),
    perihelion_longitude: (77.457_796_28, 0.160_476_89),
    node_longitude: (48.330_765_93, -0.125_340_81),
};

const VENUS: PlanetElements = PlanetElements {
    a: (0.723_335_66, 0.000_003_90),
    e: (0.006_776_72, -0.000_041_07),
    i: (3.394_676_05, -0.000_788_90),
    mean_longitude: (181.979_099_50, 58_517.815_387_29),
    perihelion_longitude: (131.602_467_18, 0.002_683_29),
    node_longitude: (76.679_842_55, -0.277_694_18),
};

/// Earth–Moon barycenter.
pub const EARTH_MOON_BARYCENTER: PlanetElements = PlanetElements {
    a: (1.000_002_61, 0.000_005_62),
    e: (0.016_711_23, -0.000_043_92),
    i: (-0.000_015_31, -0.012_946_68),
    mean_longitude: (100.464_571_66, 35_999.372_449_81),
    perihelion_longitude: (102.937_681_93, 0.323_273_64),
    node_longitude: (0.0, 0.0),
};

const MARS: PlanetElements = PlanetElements {
    a: (1.523_710_34, 0.000_018_47),
    e: (0.093_394_10, 0.000_078_82),
    i: (1.849_691_42, -0.008_131_31),
    mean_longitude: (-4.553_432_05, 19_140.302_684_99),
    perihelion_longitude: (-23.943_629_59, 0.444_410_88),
    node_longitude: (49.559_538_91, -0.292_573_43),
};

const JUPITER: PlanetElements = PlanetElements {
    a: (5.202_887_00, -0.000_116_07),
    e: (0.048_386_24, -0.000_132_53),
    i: (1.304_396_95, -0.001_837_14),
    mean_longitude: (34.396_440_51, 3_034.746_127_75),
    perihelion_longitude: (14.728_479_83, 0.212_526_68),
    node_longitude: (100.473_909_09, 0.204_691_06),
};

const SATURN: PlanetElements = PlanetElements {
    a: (9.536_675_94, -0.001_250_60),
    e: (0.053_861_79, -0.000_509_91),
    i: (2.485_991_87, 0.001_936_09),
    mean_longitude: (49.954_244_23, 1_222.493_622_01),
    perihelion_longitude: (92.598_878_31, -0.418_972_16),
    node_longitude: (113.662_424_48, -0.288_677_94),
};

const URANUS: PlanetElements = PlanetElements {
    a: (19.189_164_64, -0.001_961_76),
    e: (0.047_257_44, -0.000_043_97),
    i: (0.772_637_83, -0.002_429_39),
    mean_longitude: (313.238_104_51, 428.482_027_85),
    perihelion_longitude: (170.954_276_30, 0.408_052_81),
    node_longitude: (74.016_925_03, 0.042_405_89),
};

const NEPTUNE: PlanetElements = PlanetElements {
    a: (30.069_922_76, 0.000_262_91),
    e: (0.008_590_48, 0.000_051_05),
    i: (1.770_043_47, 0.000_353_72),
    mean_longitude: (-55.120_029_69, 218.459_453_25),
    perihelion_longitude: (44.964_762_27, -0.322_414_64),
    node_longitude: (131.784_225_74, -0.005_086_64),
};

const PLUTO: PlanetElements = PlanetElements {
    a: (39.482_116_75, -0.000_315_96),
    e: (0.248_827_30, 0.000_051_70),
    i: (17.140_012_06, 0.000_048_18),
    mean_longitude: (238.929_038_33, 145.207_805_15),
    perihelion_longitude: (224.068_916_29, -0.040_629_42),
    node_longitude: (110.303_936_84, -0.011_834_82),
};

/// Elements for a planet; `None` for the Sun and Moon.
pub fn planet_elements(body: Body) -> Option<&'static PlanetElements> {
    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Pluto => Some(&PLUTO),
        Body::Sun | Body::Moon => None,
    }
}

fn at((value, rate): Rate, t: f64) -> f64 {
    value + rate * t
}

/// Wrap radians to [-π, π).
fn normpi(x: f64) -> f64 {
    (x + PI).rem_euclid(TAU) - PI
}

/// Solve Kepler's equation `M = E − e·sin E` for the eccentric anomaly
/// (radians) by Newton iteration. Elliptic orbits only.
pub fn eccentric_anomaly(e: f64, mean_anomaly_rad: f64) -> f64 {
    let m = normpi(mean_anomaly_rad);
    let mut ea = if e < 0.8 { m + e * m.sin() } else { PI.copysign(m) };
    for _ in 0..30 {
        let d_ea = (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
        ea -= d_ea;
        if d_ea.abs() < 1e-14 {
            break;
        }
    }
    ea
}

/// Heliocentric position (AU, J2000 ecliptic) at `t` Julian centuries TT
/// since J2000.0.
pub fn heliocentric_position(el: &PlanetElements, t: f64) -> [f64; 3] {
    let a = at(el.a, t);
    let e = at(el.e, t);
    let inc = at(el.i, t).to_radians();
    let varpi = at(el.perihelion_longitude, t);
    let node = at(el.node_longitude, t);
    let arg_peri = (varpi - node).to_radians();
    let mean_anomaly = (at(el.mean_longitude, t) - varpi).to_radians();

    let ea = eccentric_anomaly(e, mean_anomaly);
    // Position in the orbital plane, x toward perihelion.
    let xp = a * (ea.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ea.sin();

    let (sw, cw) = arg_peri.sin_cos();
    let (so, co) = node.to_radians().sin_cos();
    let (si, ci) = inc.sin_cos();
    [
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        sw * si * xp + cw * si * yp,
    ]
}
