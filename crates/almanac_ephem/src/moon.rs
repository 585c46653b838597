//! Truncated ELP-2000/82 lunar theory.
//!
//! The leading periodic terms of Meeus, *Astronomical Algorithms*, ch. 47
//! (Tables 47.A and 47.B). Longitude error stays below about 0.02°, distance
//! below about 100 km.

/// Multipliers of (D, M, M′, F) followed by Σl (1e-6 deg) and Σr (1e-3 km).
const LONGITUDE_DISTANCE_TERMS: [(i8, i8, i8, i8, f64, f64); 24] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
];

/// Multipliers of (D, M, M′, F) followed by Σb (1e-6 deg).
const LATITUDE_TERMS: [(i8, i8, i8, i8, f64); 10] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
];

/// Mean distance term of the series, km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Geocentric Moon, mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub distance_km: f64,
}

/// Geocentric ecliptic position of the Moon at `t` Julian centuries TT
/// since J2000.0, without nutation.
pub fn lunar_position(t: f64) -> LunarPosition {
    let mean_lon = 218.316_447_7 + 481_267.881_234_21 * t;
    let d = 297.850_192_1 + 445_267.111_403_4 * t;
    let m = 357.529_109_2 + 35_999.050_290_9 * t;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t;
    let f = 93.272_095_0 + 483_202.017_523_3 * t;
    // Solar-eccentricity damping for terms in M.
    let ecc = 1.0 - 0.002_516 * t;

    let arg = |kd: i8, km: i8, kmp: i8, kf: i8| {
        (kd as f64 * d + km as f64 * m + kmp as f64 * mp + kf as f64 * f).to_radians()
    };
    let damping = |km: i8| ecc.powi(km.unsigned_abs() as i32);

    let (mut sl, mut sr) = (0.0, 0.0);
    for &(kd, km, kmp, kf, l, r) in &LONGITUDE_DISTANCE_TERMS {
        let a = arg(kd, km, kmp, kf);
        let k = damping(km);
        sl += l * k * a.sin();
        sr += r * k * a.cos();
    }
    let sb: f64 = LATITUDE_TERMS
        .iter()
        .map(|&(kd, km, kmp, kf, b)| b * damping(km) * arg(kd, km, kmp, kf).sin())
        .sum();

    LunarPosition {
        lon_deg: (mean_lon + sl / 1e6).rem_euclid(360.0),
        lat_deg: sb / 1e6,
        distance_km: MEAN_DISTANCE_KM + sr / 1000.0,
    }
}
