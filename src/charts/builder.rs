use crate::charts::figure::{
    Annotation, Axis, ColorBar, Datum, Figure, Font, Layout, Margin, Marker, MarkerColor, Text,
    Title, Trace,
};
use crate::charts::histogram::bin_values;
use crate::charts::theme::ChartTheme;
use crate::error::DashboardError;
use color_eyre::Result;
use polars::prelude::*;

/// Options for a categorical bar chart
#[derive(Debug, Clone, Copy)]
pub struct BarChart<'a> {
    pub title: &'a str,
    /// Category column
    pub x: &'a str,
    /// Bar height column
    pub y: &'a str,
    /// Numeric column mapped through the palette
    pub color: Option<&'a str>,
    pub hide_x_tick_labels: bool,
}

/// Builds plotly figures from tabular data with the shared theme
///
/// Output depends only on the inputs and the theme.
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    theme: ChartTheme,
}

impl ChartBuilder {
    pub fn new(theme: ChartTheme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn bar_chart(&self, data: &DataFrame, spec: &BarChart<'_>) -> Result<Figure> {
        let x = column_data(data, spec.x)?;
        let y = column_data(data, spec.y)?;

        let marker = match spec.color {
            Some(field) => Marker {
                color: MarkerColor::Values(
                    numeric_data(data, field)?.into_iter().map(Datum::from).collect(),
                ),
                colorscale: Some(self.theme.palette.color_scale()),
                showscale: Some(true),
                colorbar: Some(ColorBar {
                    title: Text::new(field),
                }),
            },
            None => Marker::solid(self.theme.palette.accent()),
        };

        let trace = Trace {
            kind: "bar",
            name: spec.y.to_string(),
            x,
            y,
            width: None,
            customdata: None,
            hovertemplate: None,
            marker,
        };

        let mut layout = self.layout(spec.title);
        layout.xaxis = Axis::titled(spec.x);
        layout.xaxis.showticklabels = !spec.hide_x_tick_labels;
        layout.yaxis = Axis::titled(spec.y);

        Ok(Figure {
            data: vec![trace],
            layout,
        })
    }

    /// Equal-width histogram of `field`, missing values skipped
    pub fn histogram(&self, data: &DataFrame, title: &str, field: &str, bins: usize) -> Result<Figure> {
        let values: Vec<f64> = numeric_data(data, field)?.into_iter().flatten().collect();
        let binned = bin_values(&values, bins);

        let trace = Trace {
            kind: "bar",
            name: field.to_string(),
            x: binned.iter().map(|b| Datum::Number(b.midpoint())).collect(),
            y: binned.iter().map(|b| Datum::Number(b.count as f64)).collect(),
            width: Some(binned.iter().map(|b| b.width()).collect()),
            customdata: Some(
                binned
                    .iter()
                    .map(|b| format!("{:.1} to {:.1}", b.start, b.end))
                    .collect(),
            ),
            hovertemplate: Some("%{customdata}<br>count: %{y}<extra></extra>".to_string()),
            marker: Marker::solid(self.theme.palette.accent()),
        };

        let mut layout = self.layout(title);
        layout.xaxis = Axis::titled(field);
        layout.yaxis = Axis::titled("count");
        layout.bargap = Some(0.0);

        Ok(Figure {
            data: vec![trace],
            layout,
        })
    }

    /// Text-only figure with both axes hidden
    pub fn placeholder(&self, title: &str, message: &str) -> Figure {
        let mut layout = self.layout(title);
        layout.xaxis = Axis::hidden();
        layout.yaxis = Axis::hidden();
        layout.annotations = vec![Annotation {
            text: message.to_string(),
            x: 0.5,
            y: 0.5,
            xref: "paper",
            yref: "paper",
            xanchor: "center",
            yanchor: "middle",
            showarrow: false,
            font: self.font(self.theme.annotation_font_size),
        }];
        Figure {
            data: Vec::new(),
            layout,
        }
    }

    fn layout(&self, title: &str) -> Layout {
        Layout {
            title: Title {
                text: title.to_string(),
                x: 0.5,
                xanchor: "center",
                font: self.font(self.theme.title_font_size),
            },
            font: self.font(12),
            paper_bgcolor: self.theme.background.clone(),
            plot_bgcolor: self.theme.background.clone(),
            xaxis: Axis::titled(""),
            yaxis: Axis::titled(""),
            bargap: None,
            annotations: Vec::new(),
            margin: Margin {
                l: 40,
                r: 20,
                t: 60,
                b: 40,
            },
        }
    }

    fn font(&self, size: u32) -> Font {
        Font {
            family: self.theme.font_family.clone(),
            size,
            color: self.theme.text_color.clone(),
        }
    }
}

fn lookup<'a>(data: &'a DataFrame, field: &str) -> Result<&'a Series> {
    let found = data
        .column(field)
        .map_err(|_| DashboardError::MissingColumn(field.to_string()))?;
    Ok(found.as_materialized_series())
}

/// Text columns stay text; everything else is plotted as a number
fn column_data(data: &DataFrame, field: &str) -> Result<Vec<Datum>> {
    let series = lookup(data, field)?;
    if matches!(series.dtype(), DataType::String) {
        Ok(series.str()?.into_iter().map(Datum::from).collect())
    } else {
        Ok(numeric_data(data, field)?
            .into_iter()
            .map(Datum::from)
            .collect())
    }
}

fn numeric_data(data: &DataFrame, field: &str) -> Result<Vec<Option<f64>>> {
    let as_float = lookup(data, field)?.cast(&DataType::Float64)?;
    Ok(as_float.f64()?.into_iter().collect())
}
