//! Plotly figure model
//!
//! A [`Figure`] serializes to the `{data, layout}` JSON object that
//! `Plotly.newPlot`/`Plotly.react` accept. Only the attributes the dashboard
//! sets are modelled.

use serde::Serialize;

/// `[[position, color], ...]`
pub type ColorScale = Vec<(f64, String)>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// True for the text-only "nothing to plot" figure
    pub fn is_placeholder(&self) -> bool {
        self.data.is_empty() && !self.layout.annotations.is_empty()
    }
}

/// A single value on an axis or in a color array
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datum {
    Text(String),
    Number(f64),
    Missing,
}

impl From<Option<f64>> for Datum {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Datum::Number(v),
            _ => Datum::Missing,
        }
    }
}

impl From<Option<&str>> for Datum {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Datum::Missing, |v| Datum::Text(v.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub x: Vec<Datum>,
    pub y: Vec<Datum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: MarkerColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
}

impl Marker {
    pub fn solid(color: &str) -> Self {
        Self {
            color: MarkerColor::Solid(color.to_string()),
            colorscale: None,
            showscale: None,
            colorbar: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Solid(String),
    Values(Vec<Datum>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
    pub xanchor: &'static str,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Text>,
    pub showticklabels: bool,
    pub visible: bool,
    pub automargin: bool,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(Text::new(title)),
            showticklabels: true,
            visible: true,
            automargin: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            title: None,
            showticklabels: false,
            visible: false,
            automargin: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub showarrow: bool,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub font: Font,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    pub margin: Margin,
}
