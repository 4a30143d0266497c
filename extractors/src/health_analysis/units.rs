const KM_PER_MILE: f64 = 1.60934;
const KG_PER_POUND: f64 = 0.453592;

/// Convert between the handful of distance and weight units the export
/// commonly uses. Unsupported pairs return `value` unchanged.
pub fn convert_unit(value: f64, from_unit: &str, to_unit: &str) -> f64 {
    match (from_unit, to_unit) {
        ("mi", "km") => value * KM_PER_MILE,
        ("km", "mi") => value / KM_PER_MILE,
        ("lb", "kg") => value * KG_PER_POUND,
        ("kg", "lb") => value / KG_PER_POUND,
        _ => value,
    }
}
