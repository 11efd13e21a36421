//! Vega-Lite export of chart specs
//!
//! Produces a self-contained v5 document with inline data, so any
//! vega-embed host can draw a [`ChartSpec`] without knowing our types.

use lvi_data::DataRecord;
use serde_json::{json, Map, Value};

use crate::spec::{
    Brush, Channel, ChartSpec, ColorEncoding, Encoding, FieldType, LegendOrient, MarkKind, TooltipField, Width,
};

/// Schema URL written into every document
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Serialize a chart spec as a Vega-Lite document
pub fn to_vega_lite(chart: &ChartSpec) -> Value {
    let mut encoding = Map::new();
    encoding.insert("x".to_string(), encode_position(&chart.x));
    encoding.insert("y".to_string(), encode_position(&chart.y));

    if let Some(color) = &chart.color {
        encoding.insert("color".to_string(), encode_color(color));
    }
    if let Some(brush) = &chart.brush {
        encoding.insert("opacity".to_string(), encode_brush_opacity(brush));
    }
    if !chart.tooltip.is_empty() {
        let tooltip: Vec<Value> = chart.tooltip.iter().map(encode_tooltip).collect();
        encoding.insert("tooltip".to_string(), Value::Array(tooltip));
    }

    let mut doc = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": chart.title,
        "mark": encode_mark(chart),
        "encoding": encoding,
        "height": chart.height,
        "data": { "values": chart.data.iter().map(record_to_json).collect::<Vec<_>>() },
    });

    let width = match chart.width {
        Width::Container => json!("container"),
        Width::Fixed(px) => json!(px),
    };
    doc["width"] = width;

    if let Some(brush) = &chart.brush {
        doc["params"] = json!([brush_param(brush)]);
    }

    doc
}

fn field_type_name(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Quantitative => "quantitative",
        FieldType::Nominal => "nominal",
    }
}

fn encode_mark(chart: &ChartSpec) -> Value {
    let mut mark = Map::new();
    let kind = match chart.mark.kind {
        MarkKind::Bar => "bar",
        MarkKind::Circle => "circle",
    };
    mark.insert("type".to_string(), json!(kind));
    if let Some(size) = chart.mark.size {
        mark.insert("size".to_string(), json!(size));
    }
    Value::Object(mark)
}

fn encode_position(encoding: &Encoding) -> Value {
    let mut channel = Map::new();
    channel.insert("field".to_string(), json!(encoding.field));
    channel.insert("type".to_string(), json!(field_type_name(encoding.field_type)));

    if let Some(title) = &encoding.title {
        channel.insert("title".to_string(), json!(title));
    }

    if let Some(sort) = encoding.sort {
        let by = match sort.0 {
            Channel::X => "-x",
            Channel::Y => "-y",
        };
        channel.insert("sort".to_string(), json!(by));
    }

    if let Some(domain) = encoding.domain {
        channel.insert(
            "scale".to_string(),
            json!({ "domain": [domain.min, domain.max], "zero": false }),
        );
    }

    Value::Object(channel)
}

fn encode_color(color: &ColorEncoding) -> Value {
    let (domain, range): (Vec<&str>, Vec<&str>) = color
        .palette
        .iter()
        .map(|(category, hex)| (category.as_str(), hex.as_str()))
        .unzip();

    let orient = match color.legend_orient {
        LegendOrient::Right => "right",
        LegendOrient::Bottom => "bottom",
    };

    json!({
        "field": color.field,
        "type": "nominal",
        "scale": { "domain": domain, "range": range },
        "legend": { "orient": orient, "title": color.legend_title },
    })
}

fn encode_brush_opacity(brush: &Brush) -> Value {
    json!({
        "condition": { "param": brush.name, "value": brush.selected_opacity },
        "value": brush.unselected_opacity,
    })
}

fn brush_param(brush: &Brush) -> Value {
    let mut select = json!({ "type": "interval" });
    if let Some(region) = brush.region {
        select["value"] = json!({ "x": region.x, "y": region.y });
    }
    json!({ "name": brush.name, "select": select })
}

fn encode_tooltip(field: &TooltipField) -> Value {
    json!({
        "field": field.field,
        "type": field_type_name(field.field_type),
        "title": field.title,
    })
}

fn record_to_json(record: &DataRecord) -> Value {
    let object: Map<String, Value> = record
        .iter()
        .map(|(field, cell)| (field.clone(), Value::from(cell)))
        .collect();
    Value::Object(object)
}
