//! Common fixture data for ocean-hazards tests.

/// Bounding boxes used across tests.
pub mod bbox {
    /// Campos basin offshore area (lat_min, lat_max, lon_min, lon_max).
    pub const CAMPOS: (f64, f64, f64, f64) = (-24.0, -21.0, -42.0, -39.0);

    /// A degenerate single-cell box.
    pub const POINT: (f64, f64, f64, f64) = (-22.0, -22.0, -40.0, -40.0);
}

/// Axis values shared by several fixtures.
pub mod axes {
    /// A small ascending latitude axis.
    pub const LATS: [f64; 4] = [-30.0, -25.0, -20.0, -15.0];

    /// A small ascending longitude axis in the [-180, 180) convention.
    pub const LONS_SIGNED: [f64; 4] = [-45.0, -40.0, -35.0, -30.0];

    /// The same longitudes in the [0, 360) convention.
    pub const LONS_WRAPPED: [f64; 4] = [315.0, 320.0, 325.0, 330.0];
}

/// Build a (time, lat, lon) value cube from a per-sample function.
///
/// The function receives (time_index, lat_index, lon_index).
pub fn value_cube<F>(n_time: usize, n_lat: usize, n_lon: usize, f: F) -> Vec<f64>
where
    F: Fn(usize, usize, usize) -> f64,
{
    let mut values = Vec::with_capacity(n_time * n_lat * n_lon);
    for t in 0..n_time {
        for y in 0..n_lat {
            for x in 0..n_lon {
                values.push(f(t, y, x));
            }
        }
    }
    values
}
