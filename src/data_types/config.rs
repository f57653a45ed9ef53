//! JSON configuration for a split line chart.

use super::appearance::{Fill, GradientKind, GradientSpec, SegmentAppearance};
use super::data_set::{DataSet, FillFormatter, HighlightCircleStyle, LineMode};
use super::settings::LineCap;
use crate::delegate::StaticAppearances;
use eyre::{Result, WrapErr};
use gpui::{Hsla, Point};
use serde::{Deserialize, Serialize};

/// Serialization of `Hsla` as `#rrggbb` / `#rrggbbaa` strings.
pub mod hex_color {
    use eyre::{eyre, Result};
    use gpui::{Hsla, Rgba};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Hsla, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex_string(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Hsla, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_hex_str(&text).map_err(serde::de::Error::custom)
    }

    pub fn parse_hex_str(hex: &str) -> Result<Hsla> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(eyre!("invalid hex color {hex:?}: non-hex digit"));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|e| eyre!("invalid hex color {hex:?}: {e}"))?;
        match digits.len() {
            6 => Ok(gpui::rgb(value).into()),
            8 => Ok(gpui::rgba(value).into()),
            n => Err(eyre!("hex color {hex:?} has {n} digits, expected 6 or 8")),
        }
    }

    pub fn to_hex_string(color: Hsla) -> String {
        let rgba = Rgba::from(color);
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            channel(rgba.r),
            channel(rgba.g),
            channel(rgba.b),
            channel(rgba.a)
        )
    }

    pub mod option {
        use gpui::Hsla;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(
            color: &Option<Hsla>,
            serializer: S,
        ) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match color {
                Some(color) => serializer.serialize_some(&super::to_hex_string(*color)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<Hsla>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|text| super::parse_hex_str(&text).map_err(serde::de::Error::custom))
                .transpose()
        }
    }

    pub mod list {
        use gpui::Hsla;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(colors: &[Hsla], serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_seq(colors.iter().map(|c| super::to_hex_string(*c)))
        }

        pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<Hsla>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Vec::<String>::deserialize(deserializer)?
                .iter()
                .map(|text| super::parse_hex_str(text).map_err(serde::de::Error::custom))
                .collect()
        }
    }
}

/// Which renderer draws the line itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Lines and fills are drawn into the context every frame.
    #[default]
    Immediate,
    /// Lines live in the layer tree; only highlight markers are drawn per frame.
    Retained,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    #[serde(with = "hex_color::list")]
    pub colors: Vec<Hsla>,
    pub locations: Option<Vec<f32>>,
    pub start_point: Option<(f32, f32)>,
    pub end_point: Option<(f32, f32)>,
    pub kind: Option<GradientKind>,
}

impl From<&GradientConfig> for GradientSpec {
    fn from(config: &GradientConfig) -> Self {
        GradientSpec {
            colors: config.colors.clone(),
            locations: config.locations.clone(),
            start_point: config.start_point.map(|(x, y)| Point::new(x, y)),
            end_point: config.end_point.map(|(x, y)| Point::new(x, y)),
            kind: config.kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceEntry {
    #[serde(with = "hex_color")]
    pub line_color: Hsla,
    #[serde(with = "hex_color::option")]
    pub fill_color: Option<Hsla>,
    pub gradient: Option<GradientConfig>,
    pub fill_alpha: f32,
}

impl Default for AppearanceEntry {
    fn default() -> Self {
        Self {
            line_color: gpui::blue(),
            fill_color: None,
            gradient: None,
            fill_alpha: 1.0,
        }
    }
}

impl From<&AppearanceEntry> for SegmentAppearance {
    fn from(entry: &AppearanceEntry) -> Self {
        let fill = match (&entry.gradient, entry.fill_color) {
            (Some(gradient), _) => Some(Fill::Gradient(gradient.into())),
            (None, Some(color)) => Some(Fill::Solid(color)),
            (None, None) => None,
        };
        SegmentAppearance::new(fill, entry.fill_alpha, entry.line_color)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub default: Option<AppearanceEntry>,
    pub before: Option<AppearanceEntry>,
    pub after: Option<AppearanceEntry>,
}

impl AppearanceConfig {
    pub fn to_provider(&self) -> StaticAppearances {
        StaticAppearances {
            default: self.default.as_ref().map(Into::into),
            before: self.before.as_ref().map(Into::into),
            after: self.after.as_ref().map(Into::into),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightCircleConfig {
    pub enabled: bool,
    pub outer_radius: f32,
    #[serde(with = "hex_color")]
    pub outer_color: Hsla,
    pub outer_alpha: f32,
    pub inner_radius: f32,
    #[serde(with = "hex_color")]
    pub inner_color: Hsla,
    pub inner_alpha: f32,
    pub hole_radius: f32,
}

impl Default for HighlightCircleConfig {
    fn default() -> Self {
        let style = HighlightCircleStyle::default();
        Self {
            enabled: style.enabled,
            outer_radius: style.outer_radius,
            outer_color: style.outer_color,
            outer_alpha: style.outer_alpha,
            inner_radius: style.inner_radius,
            inner_color: style.inner_color,
            inner_alpha: style.inner_alpha,
            hole_radius: style.hole_radius,
        }
    }
}

impl From<&HighlightCircleConfig> for HighlightCircleStyle {
    fn from(c: &HighlightCircleConfig) -> Self {
        Self {
            enabled: c.enabled,
            outer_radius: c.outer_radius,
            outer_color: c.outer_color,
            outer_alpha: c.outer_alpha,
            inner_radius: c.inner_radius,
            inner_color: c.inner_color,
            inner_alpha: c.inner_alpha,
            hole_radius: c.hole_radius,
        }
    }
}

/// Styling of the line's data set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSetStyle {
    #[serde(with = "hex_color::list")]
    pub colors: Vec<Hsla>,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub mode: LineMode,
    pub draw_filled: bool,
    #[serde(with = "hex_color")]
    pub fill_color: Hsla,
    pub fill_alpha: f32,
    pub fill_gradient: Option<GradientConfig>,
    pub line_gradient_enabled: bool,
    /// Baseline of the filled area in data space; 0.0 when absent.
    pub fill_baseline: Option<f64>,
    pub highlight_circle: HighlightCircleConfig,
}

impl Default for DataSetStyle {
    fn default() -> Self {
        let data_set = DataSet::default();
        Self {
            colors: data_set.colors,
            line_width: data_set.line_width,
            line_cap: data_set.line_cap,
            mode: data_set.mode,
            draw_filled: data_set.draw_filled,
            fill_color: data_set.fill_color,
            fill_alpha: data_set.fill_alpha,
            fill_gradient: None,
            line_gradient_enabled: data_set.line_gradient_enabled,
            fill_baseline: None,
            highlight_circle: HighlightCircleConfig::default(),
        }
    }
}

impl DataSetStyle {
    pub fn apply_to(&self, data_set: &mut DataSet) {
        data_set.colors = self.colors.clone();
        data_set.line_width = self.line_width;
        data_set.line_cap = self.line_cap;
        data_set.mode = self.mode;
        data_set.draw_filled = self.draw_filled;
        data_set.fill_color = self.fill_color;
        data_set.fill_alpha = self.fill_alpha;
        data_set.fill = self
            .fill_gradient
            .as_ref()
            .map(|g| Fill::Gradient(g.into()));
        data_set.line_gradient_enabled = self.line_gradient_enabled;
        data_set.fill_formatter = self.fill_baseline.map(FillFormatter::Constant);
        data_set.highlight_circle = (&self.highlight_circle).into();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitChartConfig {
    pub render_mode: RenderMode,
    pub data_set: DataSetStyle,
    pub appearances: Option<AppearanceConfig>,
}

impl SplitChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("failed to parse split chart config")
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize split chart config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config_with_defaults() {
        let config = SplitChartConfig::from_json_str(
            r##"{
                "render_mode": "retained",
                "data_set": { "line_width": 2.5, "line_cap": "round", "colors": ["#ff0000"] },
                "appearances": {
                    "before": { "line_color": "#00ff00", "fill_color": "#00ff0080", "fill_alpha": 0.5 },
                    "after": { "line_color": "#888888" }
                }
            }"##,
        )
        .unwrap();

        assert_eq!(config.render_mode, RenderMode::Retained);
        assert_eq!(config.data_set.line_width, 2.5);
        assert_eq!(config.data_set.line_cap, LineCap::Round);
        assert_eq!(config.data_set.fill_alpha, DataSet::default().fill_alpha);

        let provider = config.appearances.unwrap().to_provider();
        assert!(provider.default.is_none());
        let before = provider.before.unwrap();
        assert!(matches!(before.fill, Some(Fill::Solid(_))));
        assert_eq!(before.fill_alpha, 0.5);
        assert!(provider.after.unwrap().fill.is_none());
    }

    #[test]
    fn rejects_malformed_colors() {
        let err = SplitChartConfig::from_json_str(r##"{ "data_set": { "fill_color": "#12" } }"##)
            .unwrap_err();
        assert!(format!("{err:?}").contains("expected 6 or 8"));
        assert!(hex_color::parse_hex_str("#zzzzzz").is_err());
        assert!(hex_color::parse_hex_str("#+fffff").is_err());
        assert!(hex_color::parse_hex_str("#-fffff").is_err());
        assert!(hex_color::parse_hex_str("#00ff00").is_ok());
    }

    #[test]
    fn style_applies_to_data_set() {
        let style = DataSetStyle {
            mode: LineMode::Stepped,
            fill_baseline: Some(-2.0),
            draw_filled: true,
            ..Default::default()
        };
        let mut data_set = DataSet::default();
        style.apply_to(&mut data_set);
        assert!(data_set.is_stepped());
        assert!(data_set.draw_filled);
        assert_eq!(data_set.fill_min(), -2.0);
    }
}
