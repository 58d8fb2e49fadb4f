/// Formats a result the way the JVM prints a `double`: `7.0`, `0.25`,
/// `1.0E7`, `1.5E-4`, `Infinity`, `NaN`.
pub fn format_value(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = x.abs();
    if x == 0.0 || (1e-3..1e7).contains(&magnitude) {
        // Debug keeps a trailing `.0` on integral values.
        return format!("{:?}", x);
    }

    let sci = format!("{:e}", x);
    match sci.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{}E{}", mantissa, exponent),
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => sci,
    }
}
