use crate::charts::figure::ColorScale;
use crate::error::DashboardError;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Perceptually uniform color palettes, ten evenly spaced stops each
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Viridis,
    Cividis,
    Plasma,
}

const VIRIDIS: [&str; 10] = [
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

const CIVIDIS: [&str; 10] = [
    "#00224e", "#123570", "#3b496c", "#575d6d", "#707173", "#8a8678", "#a59c74", "#c3b369",
    "#e1cc55", "#fee838",
];

const PLASMA: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

impl Palette {
    /// Parse a palette name from configuration
    pub fn parse(name: &str) -> Result<Self> {
        name.trim()
            .parse::<Palette>()
            .map_err(|_| DashboardError::UnknownPalette(name.to_string()).into())
    }

    pub fn colors(self) -> &'static [&'static str; 10] {
        match self {
            Self::Viridis => &VIRIDIS,
            Self::Cividis => &CIVIDIS,
            Self::Plasma => &PLASMA,
        }
    }

    /// Plotly continuous color scale: `[[position, color], ...]` from 0 to 1
    pub fn color_scale(self) -> ColorScale {
        let colors = self.colors();
        let last = (colors.len() - 1) as f64;
        colors
            .iter()
            .enumerate()
            .map(|(i, color)| (i as f64 / last, color.to_string()))
            .collect()
    }

    /// Single color for charts without a color field
    pub fn accent(self) -> &'static str {
        self.colors()[4]
    }
}

/// Visual conventions shared by every chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub name: String,
    pub palette: Palette,
    pub font_family: String,
    pub text_color: String,
    pub background: String,
    pub title_font_size: u32,
    pub annotation_font_size: u32,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::with_palette(Palette::default())
    }
}

impl ChartTheme {
    pub fn with_palette(palette: Palette) -> Self {
        Self {
            name: format!("Light {palette}"),
            palette,
            font_family: "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif"
                .to_string(),
            text_color: "#1e293b".to_string(),
            background: "#ffffff".to_string(),
            title_font_size: 18,
            annotation_font_size: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_parse() {
        assert_eq!(Palette::parse("viridis").unwrap(), Palette::Viridis);
        assert_eq!(Palette::parse(" Plasma ").unwrap(), Palette::Plasma);

        let err = Palette::parse("rainbow").unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::UnknownPalette("rainbow".to_string()))
        );
    }

    #[test]
    fn test_color_scale_spans_unit_interval() {
        let scale = Palette::Viridis.color_scale();
        assert_eq!(scale.len(), 10);
        assert_eq!(scale[0], (0.0, "#440154".to_string()));
        assert_eq!(scale[9], (1.0, "#fde725".to_string()));
        assert!(scale.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_theme_names_palette() {
        let theme = ChartTheme::with_palette(Palette::Cividis);
        assert_eq!(theme.name, "Light cividis");
        assert_eq!(theme.palette.accent(), "#707173");
    }
}
