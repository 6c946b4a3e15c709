/// Render seconds as `m:ss`.
///
/// A missing, non-finite or negative value renders as `0:00`; a track whose
/// duration is not known yet must not show garbage.
pub fn format_time(seconds: Option<f64>) -> String {
    let secs = match seconds {
        Some(s) if s.is_finite() && s > 0.0 => s.floor() as u64,
        _ => 0,
    };
    format!("{}:{:02}", secs / 60, secs % 60)
}
