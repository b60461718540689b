use serde::Serialize;
use crate::data::{Dataset, Value};
use crate::processing::skewness::histogram_bin_count;

/// Chart kinds the projector knows how to feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    Box,
    Histogram,
}

impl ChartType {
    pub const ALL: [ChartType; 6] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Scatter,
        ChartType::Pie,
        ChartType::Box,
        ChartType::Histogram,
    ];

    /// Parse a selector tag. Unknown tags fall back to `Bar`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "line" => ChartType::Line,
            "scatter" => ChartType::Scatter,
            "pie" => ChartType::Pie,
            "box" => ChartType::Box,
            "histogram" => ChartType::Histogram,
            _ => ChartType::Bar,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Scatter => "scatter",
            ChartType::Pie => "pie",
            ChartType::Box => "box",
            ChartType::Histogram => "histogram",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar Chart",
            ChartType::Line => "Line Plot",
            ChartType::Scatter => "Scatter Plot",
            ChartType::Pie => "Pie Chart",
            ChartType::Box => "Box Plot",
            ChartType::Histogram => "Histogram",
        }
    }

    /// Everything except histograms needs a y field.
    pub fn requires_y(&self) -> bool {
        !matches!(self, ChartType::Histogram)
    }

    fn title(&self) -> String {
        let tag = self.tag();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => format!("{}{} Plot", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawMode {
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// One named trace. Only the channels the chart type uses are filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DrawMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_count: Option<usize>,
}

/// Renderer-agnostic description of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDescriptor {
    pub chart_type: ChartType,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub series: Vec<Series>,
}

impl SeriesDescriptor {
    fn empty(chart_type: ChartType, x_label: Option<&str>, y_label: Option<&str>) -> Self {
        SeriesDescriptor {
            chart_type,
            title: chart_type.title(),
            x_label: x_label.map(str::to_string),
            y_label: y_label.map(str::to_string),
            series: Vec::new(),
        }
    }

    /// True when a required field was missing and nothing can be drawn.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Map a chart type and column selection to plot-ready series.
///
/// Values are passed through raw, in row order; nothing is aggregated. A
/// required field that is unset or not a dataset header produces a
/// descriptor with no series.
pub fn project(
    chart_type: ChartType,
    dataset: &Dataset,
    x_field: Option<&str>,
    y_field: Option<&str>,
) -> SeriesDescriptor {
    let x_field = x_field.filter(|f| dataset.has_field(f));
    let y_field = y_field.filter(|f| dataset.has_field(f));
    let mut descriptor = SeriesDescriptor::empty(chart_type, x_field, y_field);

    let Some(x_name) = x_field else {
        tracing::debug!("No x field for {} projection", chart_type.tag());
        return descriptor;
    };
    let x = owned_column(dataset, x_name);

    if chart_type == ChartType::Histogram {
        let count = x.iter().filter(|v| !v.is_missing()).count();
        descriptor.series.push(Series {
            name: x_name.to_string(),
            x,
            bin_count: Some(histogram_bin_count(count)),
            ..Default::default()
        });
        return descriptor;
    }

    let Some(y_name) = y_field else {
        tracing::debug!("No y field for {} projection", chart_type.tag());
        return descriptor;
    };
    let y = owned_column(dataset, y_name);

    descriptor.series = match chart_type {
        ChartType::Bar => vec![Series {
            name: y_name.to_string(),
            x,
            y,
            ..Default::default()
        }],
        ChartType::Line => vec![Series {
            name: y_name.to_string(),
            mode: Some(DrawMode::LinesMarkers),
            x,
            y,
            ..Default::default()
        }],
        ChartType::Scatter => vec![Series {
            name: y_name.to_string(),
            mode: Some(DrawMode::Markers),
            x,
            y,
            ..Default::default()
        }],
        ChartType::Pie => vec![Series {
            name: y_name.to_string(),
            labels: x,
            values: y,
            ..Default::default()
        }],
        // Two independent boxes: the y column first, then the x column.
        ChartType::Box => vec![
            Series {
                name: y_name.to_string(),
                y,
                ..Default::default()
            },
            Series {
                name: x_name.to_string(),
                y: x,
                ..Default::default()
            },
        ],
        ChartType::Histogram => Vec::new(),
    };
    descriptor
}

fn owned_column(dataset: &Dataset, field: &str) -> Vec<Value> {
    dataset.column(field).into_iter().cloned().collect()
}
