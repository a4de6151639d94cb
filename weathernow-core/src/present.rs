//! Pure mappings from raw forecast values to what the panel shows.

use serde::Serialize;

/// Icon shown next to the temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconVariant {
    Sunny,
    Cloudy,
    Rain,
    Wind,
}

impl IconVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconVariant::Sunny => "sunny",
            IconVariant::Cloudy => "cloudy",
            IconVariant::Rain => "rain",
            IconVariant::Wind => "wind",
        }
    }

    /// Terminal stand-in for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconVariant::Sunny => "☀",
            IconVariant::Cloudy => "☁",
            IconVariant::Rain => "☂",
            IconVariant::Wind => "≋",
        }
    }
}

impl std::fmt::Display for IconVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Weather code bands, first match wins. Codes below zero land in the
/// lowest band.
fn band(code: i32) -> IconVariant {
    match code {
        i32::MIN..=1 => IconVariant::Sunny,
        2..=3 => IconVariant::Cloudy,
        4..=67 => IconVariant::Rain,
        _ => IconVariant::Wind,
    }
}

pub fn icon_for(code: i32) -> IconVariant {
    band(code)
}

pub fn description_for(code: i32) -> &'static str {
    match band(code) {
        IconVariant::Sunny => "Clear sky",
        IconVariant::Cloudy => "Partly cloudy",
        IconVariant::Rain => "Rainy",
        IconVariant::Wind => "Windy",
    }
}

/// 16-point compass label for a wind direction in degrees.
///
/// Halves round up (348.75° is `N`, not `NNW`) and the index wraps with a
/// Euclidean modulo, so negative or >360 inputs still land on a point.
pub fn compass_label(degrees: f64) -> &'static str {
    let x = degrees / 22.5;
    let whole = x.floor();
    // x - whole is exact; adding 0.5 to x first can round 0.4999.. up.
    let steps = if x - whole < 0.5 { whole } else { whole + 1.0 };
    if !steps.is_finite() {
        return COMPASS_POINTS[0];
    }

    let index = (steps as i64).rem_euclid(COMPASS_POINTS.len() as i64) as usize;
    COMPASS_POINTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_bands() {
        assert_eq!(icon_for(0), IconVariant::Sunny);
        assert_eq!(icon_for(1), IconVariant::Sunny);
        assert_eq!(icon_for(2), IconVariant::Cloudy);
        assert_eq!(icon_for(3), IconVariant::Cloudy);
        assert_eq!(icon_for(4), IconVariant::Rain);
        assert_eq!(icon_for(61), IconVariant::Rain);
        assert_eq!(icon_for(67), IconVariant::Rain);
        assert_eq!(icon_for(68), IconVariant::Wind);
        assert_eq!(icon_for(95), IconVariant::Wind);
    }

    #[test]
    fn negative_and_extreme_codes() {
        assert_eq!(icon_for(-1), IconVariant::Sunny);
        assert_eq!(icon_for(i32::MIN), IconVariant::Sunny);
        assert_eq!(description_for(-5), "Clear sky");
        assert_eq!(icon_for(i32::MAX), IconVariant::Wind);
    }

    #[test]
    fn description_agrees_with_icon_on_every_boundary() {
        for code in -10..=120 {
            let expected = match icon_for(code) {
                IconVariant::Sunny => "Clear sky",
                IconVariant::Cloudy => "Partly cloudy",
                IconVariant::Rain => "Rainy",
                IconVariant::Wind => "Windy",
            };
            assert_eq!(description_for(code), expected, "code {code}");
        }
    }

    #[test]
    fn compass_cardinal_points() {
        assert_eq!(compass_label(0.0), "N");
        assert_eq!(compass_label(22.5), "NNE");
        assert_eq!(compass_label(90.0), "E");
        assert_eq!(compass_label(180.0), "S");
        assert_eq!(compass_label(270.0), "W");
        assert_eq!(compass_label(360.0), "N");
    }

    #[test]
    fn compass_rounds_halves_up() {
        // 348.75 / 22.5 = 15.5 -> 16 -> wraps to N
        assert_eq!(compass_label(348.75), "N");
        assert_eq!(compass_label(348.7), "NNW");
        assert_eq!(compass_label(11.25), "NNE");
        assert_eq!(compass_label(11.2), "N");
        // Just below a half step: 11.249999999999998 / 22.5 = 0.49999999999999994
        assert_eq!(compass_label(11.249999999999998), "N");
    }

    #[test]
    fn compass_wraps_out_of_range() {
        assert_eq!(compass_label(450.0), "E");
        assert_eq!(compass_label(720.0), "N");
        assert_eq!(compass_label(-90.0), "W");
        assert_eq!(compass_label(-22.5), "NNW");
    }

    #[test]
    fn compass_non_finite_is_north() {
        assert_eq!(compass_label(f64::NAN), "N");
        assert_eq!(compass_label(f64::INFINITY), "N");
    }

    #[test]
    fn mappers_are_deterministic() {
        for _ in 0..3 {
            assert_eq!(icon_for(45), IconVariant::Rain);
            assert_eq!(compass_label(200.0), "SSW");
        }
    }
}
