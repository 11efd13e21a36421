//! Declarative render specs handed to the render surface
//!
//! Nothing here draws. A spec says what to show; the surface decides how,
//! and sends pager clicks back as [`PagerCommand`]s.

use lvi_core::{PagerCommand, ViewKey};
use lvi_data::DataRecord;
use serde::{Deserialize, Serialize};

/// Mark drawn for each datum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    Bar,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub kind: MarkKind,
    /// Point area for circle marks
    pub size: Option<f64>,
}

impl Mark {
    pub fn bar() -> Self {
        Self { kind: MarkKind::Bar, size: None }
    }

    pub fn circle(size: f64) -> Self {
        Self {
            kind: MarkKind::Circle,
            size: Some(size),
        }
    }
}

/// Measurement type of an encoded field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Quantitative,
    Nominal,
}

/// Positional channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    X,
    Y,
}

/// Order categories by another channel's value, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescendingBy(pub Channel);

/// Explicit axis range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
    /// True when min == max in the data and the range was widened
    pub widened: bool,
}

impl AxisDomain {
    /// Fraction of the range added on each side
    pub const PADDING: f64 = 0.05;

    /// Domain `[min - 5%·range, max + 5%·range]` of the values
    ///
    /// A single repeated value is first widened by ±1 so the axis never has
    /// zero width. Returns `None` for no values.
    pub fn padded(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (mut min, mut max) = values
            .into_iter()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        let widened = min == max;
        if widened {
            tracing::debug!("Degenerate axis at {}, widening by 1", min);
            min -= 1.0;
            max += 1.0;
        }

        let padding = (max - min) * Self::PADDING;
        Some(Self {
            min: min - padding,
            max: max + padding,
            widened,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    pub field: String,
    pub field_type: FieldType,
    pub title: Option<String>,
    pub sort: Option<DescendingBy>,
    pub domain: Option<AxisDomain>,
}

impl Encoding {
    pub fn quantitative(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            field_type: FieldType::Quantitative,
            title: Some(title.into()),
            sort: None,
            domain: None,
        }
    }

    pub fn nominal(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field_type: FieldType::Nominal,
            ..Self::quantitative(field, title)
        }
    }

    pub fn sorted_descending_by(mut self, channel: Channel) -> Self {
        self.sort = Some(DescendingBy(channel));
        self
    }

    pub fn with_domain(mut self, domain: AxisDomain) -> Self {
        self.domain = Some(domain);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipField {
    pub field: String,
    pub field_type: FieldType,
    pub title: String,
}

impl TooltipField {
    pub fn new(field: impl Into<String>, field_type: FieldType, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            field_type,
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendOrient {
    Right,
    Bottom,
}

/// Nominal color channel with its resolved palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorEncoding {
    pub field: String,
    pub legend_orient: LegendOrient,
    pub legend_title: Option<String>,
    /// Category and its color, in legend order
    pub palette: Vec<(String, String)>,
}

/// Rectangle in data coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRegion {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl BrushRegion {
    pub fn new(x: [f64; 2], y: [f64; 2]) -> Self {
        Self { x, y }
    }

    /// Edge-inclusive containment; corners may be given in any order
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (x0, x1) = (self.x[0].min(self.x[1]), self.x[0].max(self.x[1]));
        let (y0, y1) = (self.y[0].min(self.y[1]), self.y[0].max(self.y[1]));
        x >= x0 && x <= x1 && y >= y0 && y <= y1
    }
}

/// Interval selection that dims points outside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub name: String,
    pub region: Option<BrushRegion>,
    pub selected_opacity: f64,
    pub unselected_opacity: f64,
}

impl Brush {
    pub fn new(region: Option<BrushRegion>) -> Self {
        Self {
            name: "brush".to_string(),
            region,
            selected_opacity: 1.0,
            unselected_opacity: 0.3,
        }
    }

    /// Opacity of a point; with no active region every point is selected
    pub fn opacity_at(&self, x: f64, y: f64) -> f64 {
        match &self.region {
            Some(region) if !region.contains(x, y) => self.unselected_opacity,
            _ => self.selected_opacity,
        }
    }
}

/// Chart width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    Container,
    Fixed(u32),
}

/// A complete chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub mark: Mark,
    pub x: Encoding,
    pub y: Encoding,
    pub color: Option<ColorEncoding>,
    pub tooltip: Vec<TooltipField>,
    pub brush: Option<Brush>,
    pub width: Width,
    pub height: u32,
    pub data: Vec<DataRecord>,
}

/// One pager button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerButton {
    pub widget_id: String,
    pub caption: String,
    pub command: PagerCommand,
    /// False at the boundary the button points past
    pub enabled: bool,
}

/// Previous / next controls under a paginated chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerControlsSpec {
    pub view_key: ViewKey,
    pub info: String,
    pub previous: PagerButton,
    pub next: PagerButton,
    pub page: usize,
    pub total_pages: usize,
    /// "Page P of T"
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Inline message shown in place of a visual
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_axis_is_widened() {
        let domain = AxisDomain::padded([10.0, 10.0, 10.0]).unwrap();
        assert!(domain.widened);
        assert!(domain.width() > 0.0);
        assert!((domain.min - 8.9).abs() < 1e-9);
        assert!((domain.max - 11.1).abs() < 1e-9);
    }

    #[test]
    fn test_axis_padding() {
        let domain = AxisDomain::padded([20.0, 60.0, 40.0]).unwrap();
        assert!(!domain.widened);
        assert!((domain.min - 18.0).abs() < 1e-9);
        assert!((domain.max - 62.0).abs() < 1e-9);
        assert!(AxisDomain::padded(std::iter::empty()).is_none());
    }

    #[test]
    fn test_brush_opacity() {
        let brush = Brush::new(Some(BrushRegion::new([50.0, 10.0], [0.0, 5.0])));
        assert_eq!(brush.opacity_at(20.0, 2.0), 1.0);
        assert_eq!(brush.opacity_at(60.0, 2.0), 0.3);
        assert_eq!(Brush::new(None).opacity_at(60.0, 2.0), 1.0);
    }
}
