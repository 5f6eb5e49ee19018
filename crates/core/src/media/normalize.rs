//! Field normalization rules applied by every provider mapping.

/// Placeholder for a missing release date or genre.
pub const NOT_AVAILABLE: &str = "N/A";

/// Upgrade an insecure `http://` URL to `https://`.
pub fn secure_url(url: &str) -> String {
    let trimmed = url.trim();
    match trimmed.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => trimmed.to_string(),
    }
}

/// Rescale a native rating to the common 0-10 scale, rounded to one decimal.
///
/// Non-positive values are treated as missing: upstreams report `0` for
/// items nobody has rated yet.
pub fn rescale_rating(value: Option<f32>, native_max: f32) -> Option<f32> {
    let value = value.filter(|v| v.is_finite() && *v > 0.0)?;
    let scaled = (value * 10.0 / native_max).clamp(0.0, 10.0);
    Some((scaled * 10.0).round() / 10.0)
}

/// Year part of a `YYYY-MM-DD` (or partial) date.
pub fn year_of(date: Option<&str>) -> Option<String> {
    date.and_then(|d| d.trim().split('-').next())
        .map(str::trim)
        .filter(|y| !y.is_empty())
        .map(str::to_string)
}

/// Year part of a date, or `"N/A"`.
pub fn year_or_placeholder(date: Option<&str>) -> String {
    year_of(date).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Display label from up to two genre names, or `"N/A"`.
pub fn genre_label(genres: &[String]) -> String {
    let names: Vec<&str> = genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .take(2)
        .collect();

    if names.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        names.join(" / ")
    }
}
