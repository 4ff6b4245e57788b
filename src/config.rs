use serde::Deserialize;

pub const DEFAULT_TESTIMONIAL_INTERVAL_MS: u32 = 5_000;
pub const DEFAULT_REVEAL_MARGIN_PERCENT: u32 = 10;
pub const DEFAULT_REVEAL_STAGGER_MS: u32 = 150;
pub const DEFAULT_CAROUSEL_SETTLE_DELAY_MS: u32 = 100;
pub const DEFAULT_CURSOR_SIZE_PX: f64 = 32.0;
pub const DEFAULT_CURSOR_HOVER_SCALE: f64 = 2.5;
pub const DEFAULT_SPRING_STIFFNESS: f64 = 150.0;
pub const DEFAULT_SPRING_DAMPING: f64 = 15.0;
pub const DEFAULT_SPRING_MASS: f64 = 0.1;
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// Fixed integration step of the cursor springs.
pub const SPRING_STEP_SECONDS: f64 = 1.0 / 240.0;
const SPRING_STABILITY_LIMIT: f64 = 2.0;

const TESTIMONIAL_INTERVAL_MS_BOUNDS: (u32, u32) = (1_000, 60_000);
const REVEAL_MARGIN_PERCENT_BOUNDS: (u32, u32) = (0, 50);
const REVEAL_STAGGER_MS_BOUNDS: (u32, u32) = (0, 2_000);
const CAROUSEL_SETTLE_DELAY_MS_BOUNDS: (u32, u32) = (0, 5_000);
const CURSOR_SIZE_PX_BOUNDS: (f64, f64) = (8.0, 128.0);
const CURSOR_HOVER_SCALE_BOUNDS: (f64, f64) = (1.0, 5.0);
const SPRING_STIFFNESS_BOUNDS: (f64, f64) = (1.0, 2_000.0);
const SPRING_DAMPING_BOUNDS: (f64, f64) = (0.1, 500.0);
const SPRING_MASS_BOUNDS: (f64, f64) = (0.01, 50.0);

/// Settings block as written in `content/site.json`. Every key is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSettings {
    pub testimonial_interval_ms: Option<u32>,
    pub reveal_margin_percent: Option<u32>,
    pub reveal_stagger_ms: Option<u32>,
    pub carousel_settle_delay_ms: Option<u32>,
    pub cursor_size_px: Option<f64>,
    pub cursor_hover_scale: Option<f64>,
    pub spring_stiffness: Option<f64>,
    pub spring_damping: Option<f64>,
    pub spring_mass: Option<f64>,
    pub log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_SPRING_STIFFNESS,
            damping: DEFAULT_SPRING_DAMPING,
            mass: DEFAULT_SPRING_MASS,
        }
    }
}

impl SpringConfig {
    /// Semi-implicit Euler at `SPRING_STEP_SECONDS` diverges once
    /// `(k/m)·dt² + 2(c/m)·dt` reaches 4; half of that is accepted.
    pub fn is_stable(&self) -> bool {
        let dt = SPRING_STEP_SECONDS;
        let stiffness_term = self.stiffness / self.mass * dt * dt;
        let damping_term = 2.0 * self.damping / self.mass * dt;

        (stiffness_term + damping_term).is_finite()
            && stiffness_term + damping_term < SPRING_STABILITY_LIMIT
    }
}

/// Resolved tunables for the animated sections.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub testimonial_interval_ms: u32,
    pub reveal_margin_percent: u32,
    pub reveal_stagger_ms: u32,
    pub carousel_settle_delay_ms: u32,
    pub cursor_size_px: f64,
    pub cursor_hover_scale: f64,
    pub spring: SpringConfig,
    pub log_level: log::Level,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_raw(&RawSettings::default())
    }
}

impl SiteConfig {
    /// Out-of-range values fall back to the default instead of being clamped.
    pub fn from_raw(raw: &RawSettings) -> Self {
        Self {
            testimonial_interval_ms: u32_with_bounds(
                raw.testimonial_interval_ms,
                DEFAULT_TESTIMONIAL_INTERVAL_MS,
                TESTIMONIAL_INTERVAL_MS_BOUNDS,
            ),
            reveal_margin_percent: u32_with_bounds(
                raw.reveal_margin_percent,
                DEFAULT_REVEAL_MARGIN_PERCENT,
                REVEAL_MARGIN_PERCENT_BOUNDS,
            ),
            reveal_stagger_ms: u32_with_bounds(
                raw.reveal_stagger_ms,
                DEFAULT_REVEAL_STAGGER_MS,
                REVEAL_STAGGER_MS_BOUNDS,
            ),
            carousel_settle_delay_ms: u32_with_bounds(
                raw.carousel_settle_delay_ms,
                DEFAULT_CAROUSEL_SETTLE_DELAY_MS,
                CAROUSEL_SETTLE_DELAY_MS_BOUNDS,
            ),
            cursor_size_px: f64_with_bounds(
                raw.cursor_size_px,
                DEFAULT_CURSOR_SIZE_PX,
                CURSOR_SIZE_PX_BOUNDS,
            ),
            cursor_hover_scale: f64_with_bounds(
                raw.cursor_hover_scale,
                DEFAULT_CURSOR_HOVER_SCALE,
                CURSOR_HOVER_SCALE_BOUNDS,
            ),
            spring: spring_with_bounds(raw),
            log_level: parse_log_level(raw.log_level.as_deref(), DEFAULT_LOG_LEVEL),
        }
    }

    /// Root margin handed to the intersection observer, e.g. `"-10%"`.
    pub fn reveal_root_margin(&self) -> String {
        format!("-{}%", self.reveal_margin_percent)
    }
}

fn u32_with_bounds(value: Option<u32>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn f64_with_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

/// Each term is bounded on its own, then the combination must integrate
/// stably or the whole spring falls back to the default.
fn spring_with_bounds(raw: &RawSettings) -> SpringConfig {
    let spring = SpringConfig {
        stiffness: f64_with_bounds(
            raw.spring_stiffness,
            DEFAULT_SPRING_STIFFNESS,
            SPRING_STIFFNESS_BOUNDS,
        ),
        damping: f64_with_bounds(raw.spring_damping, DEFAULT_SPRING_DAMPING, SPRING_DAMPING_BOUNDS),
        mass: f64_with_bounds(raw.spring_mass, DEFAULT_SPRING_MASS, SPRING_MASS_BOUNDS),
    };

    if spring.is_stable() {
        spring
    } else {
        SpringConfig::default()
    }
}

fn parse_log_level(value: Option<&str>, default: log::Level) -> log::Level {
    match value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("trace") => log::Level::Trace,
        Some("debug") => log::Level::Debug,
        Some("info") => log::Level::Info,
        Some("warn") => log::Level::Warn,
        Some("error") => log::Level::Error,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_resolve_to_defaults() {
        let config = SiteConfig::default();

        assert_eq!(config.testimonial_interval_ms, DEFAULT_TESTIMONIAL_INTERVAL_MS);
        assert_eq!(config.reveal_margin_percent, DEFAULT_REVEAL_MARGIN_PERCENT);
        assert_eq!(config.spring, SpringConfig::default());
        assert_eq!(config.log_level, log::Level::Info);
        assert_eq!(config.reveal_root_margin(), "-10%");
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_defaults() {
        let raw = RawSettings {
            testimonial_interval_ms: Some(10),
            cursor_size_px: Some(f64::NAN),
            spring_mass: Some(-1.0),
            reveal_margin_percent: Some(25),
            ..RawSettings::default()
        };

        let config = SiteConfig::from_raw(&raw);
        assert_eq!(config.testimonial_interval_ms, DEFAULT_TESTIMONIAL_INTERVAL_MS);
        assert_eq!(config.cursor_size_px, DEFAULT_CURSOR_SIZE_PX);
        assert_eq!(config.spring.mass, DEFAULT_SPRING_MASS);
        assert_eq!(config.reveal_margin_percent, 25);
    }

    #[test]
    fn log_level_is_case_insensitive_with_fallback() {
        assert_eq!(parse_log_level(Some(" DEBUG "), log::Level::Info), log::Level::Debug);
        assert_eq!(parse_log_level(Some("verbose"), log::Level::Warn), log::Level::Warn);
        assert_eq!(parse_log_level(None, log::Level::Info), log::Level::Info);
    }

    #[test]
    fn settings_deserialize_from_camel_case_json() {
        let raw: RawSettings =
            serde_json::from_str(r#"{"testimonialIntervalMs": 8000, "logLevel": "warn"}"#)
                .expect("settings should parse");

        let config = SiteConfig::from_raw(&raw);
        assert_eq!(config.testimonial_interval_ms, 8_000);
        assert_eq!(config.log_level, log::Level::Warn);
    }

    #[test]
    fn unstable_spring_combination_falls_back_to_default() {
        let raw = RawSettings {
            spring_mass: Some(0.01),
            spring_damping: Some(15.0),
            ..RawSettings::default()
        };

        let config = SiteConfig::from_raw(&raw);
        assert_eq!(config.spring, SpringConfig::default());

        let stiff = RawSettings {
            spring_mass: Some(0.01),
            spring_stiffness: Some(2_000.0),
            spring_damping: Some(0.1),
            ..RawSettings::default()
        };
        assert_eq!(SiteConfig::from_raw(&stiff).spring, SpringConfig::default());
    }

    #[test]
    fn stable_spring_combination_is_kept() {
        let raw = RawSettings {
            spring_mass: Some(0.01),
            spring_damping: Some(2.39),
            spring_stiffness: Some(1.0),
            ..RawSettings::default()
        };

        let config = SiteConfig::from_raw(&raw);
        assert_eq!(config.spring.mass, 0.01);
        assert_eq!(config.spring.damping, 2.39);
        assert!(SpringConfig::default().is_stable());
    }
}
