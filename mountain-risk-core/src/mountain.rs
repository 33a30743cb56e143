/// Decide whether a location is treated as mountainous.
///
/// `force` always wins. Otherwise the elevation must be known and at or above
/// `threshold_m`; an unknown elevation counts as lowland.
pub fn is_mountainous(elevation_m: Option<f64>, force: bool, threshold_m: f64) -> bool {
    force || elevation_m.is_some_and(|e| e >= threshold_m)
}
