//! HUD race time formatting

/// Format an elapsed race time as `M:SS.D`
///
/// Tenths are truncated, not rounded, so the clock never shows a time the
/// race has not reached yet.
pub fn format_race_time(seconds: f64) -> String {
    let total_tenths = (seconds.max(0.0) * 10.0).floor() as i64;
    let minutes = total_tenths / 600;
    let secs = (total_tenths % 600) / 10;
    let tenths = total_tenths % 10;
    format!("{}:{:02}.{}", minutes, secs, tenths)
}
