//! Cartesian ↔ spherical coordinate conversion.

/// Spherical coordinates: longitude, latitude, radius.
///
/// The radius carries whatever unit the Cartesian input used (AU or km).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Longitude in degrees, [0, 360), measured from +x toward +y.
    pub lon_deg: f64,
    /// Latitude in degrees, [-90, 90], elevation above the x-y plane.
    pub lat_deg: f64,
    pub radius: f64,
}

/// Convert Cartesian `[x, y, z]` to spherical coordinates.
pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> SphericalCoords {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return SphericalCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            radius: 0.0,
        };
    }
    SphericalCoords {
        lon_deg: y.atan2(x).to_degrees().rem_euclid(360.0),
        lat_deg: (z / r).clamp(-1.0, 1.0).asin().to_degrees(),
        radius: r,
    }
}

/// Convert spherical coordinates back to Cartesian `[x, y, z]`.
pub fn spherical_to_cartesian(s: &SphericalCoords) -> [f64; 3] {
    let (sin_lon, cos_lon) = s.lon_deg.to_radians().sin_cos();
    let (sin_lat, cos_lat) = s.lat_deg.to_radians().sin_cos();
    [
        s.radius * cos_lat * cos_lon,
        s.radius * cos_lat * sin_lon,
        s.radius * sin_lat,
    ]
}
