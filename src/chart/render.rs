//! SVG rendering of laid-out pie charts.

use super::pie::{PieChart, Wedge};
use svg::node::element::{Element, Group, Path, Rectangle};
use svg::node::{Node, Text};
use svg::Document;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const CENTER_X: f64 = WIDTH / 2.0;
const CENTER_Y: f64 = 260.0;
const RADIUS: f64 = 160.0;
/// Label distance from the centre, as a fraction of the radius.
const LABEL_DISTANCE: f64 = 1.1;
/// Annotation distance from the centre, as a fraction of the radius.
const ANNOTATION_DISTANCE: f64 = 0.6;
const SHADOW_SHIFT: f64 = 0.02 * RADIUS;
const ANNOTATION_FONT_SIZE: f64 = 12.5;

/// Default categorical color cycle.
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[inline]
fn num(value: f64) -> String {
    format!("{:.2}", value)
}

/// Point at `distance` (fraction of the radius) along `angle` degrees from
/// `(cx, cy)`. SVG y grows downwards.
fn polar(cx: f64, cy: f64, distance: f64, angle: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (cx + distance * RADIUS * rad.cos(), cy - distance * RADIUS * rad.sin())
}

/// Centre of a wedge after applying its explode offset.
fn wedge_center(wedge: &Wedge) -> (f64, f64) {
    polar(CENTER_X, CENTER_Y, wedge.offset, wedge.mid_angle())
}

/// Path data for a wedge centred at `(cx, cy)`.
///
/// Written by hand: `path::Data` separates parameters with commas and
/// repeats commands.
fn wedge_data(wedge: &Wedge, cx: f64, cy: f64) -> String {
    let r = num(RADIUS);
    let sweep = wedge.theta2 - wedge.theta1;
    if sweep >= 360.0 - 1e-9 {
        // A full circle cannot be drawn as a single arc.
        let d = num(2.0 * RADIUS);
        return format!(
            "M {} {} m -{r} 0 a {r} {r} 0 1 0 {d} 0 a {r} {r} 0 1 0 -{d} 0 Z",
            num(cx),
            num(cy),
        );
    }
    let (x1, y1) = polar(cx, cy, 1.0, wedge.theta1);
    let (x2, y2) = polar(cx, cy, 1.0, wedge.theta2);
    let large_arc = if sweep > 180.0 { 1 } else { 0 };
    format!(
        "M {} {} L {} {} A {r} {r} 0 {} 0 {} {} Z",
        num(cx),
        num(cy),
        num(x1),
        num(y1),
        large_arc,
        num(x2),
        num(y2),
    )
}

fn text_anchor(angle: f64) -> &'static str {
    let x = angle.to_radians().cos();
    if x > 1e-6 {
        "start"
    } else if x < -1e-6 {
        "end"
    } else {
        "middle"
    }
}

/// A `<text>` element holding `content`.
fn text(x: f64, y: f64, content: &str) -> Element {
    let mut element = Element::new("text");
    element.assign("x", num(x));
    element.assign("y", num(y));
    element.append(Text::new(content));
    element
}

/// Multi-line annotation, one `<tspan>` per line, centred on `(x, y)`.
fn annotation(x: f64, y: f64, content: &str) -> Element {
    let lines: Vec<&str> = content.lines().collect();
    let first_dy = -0.6 * lines.len().saturating_sub(1) as f64;

    let mut element = Element::new("text");
    element.assign("x", num(x));
    element.assign("y", num(y));
    element.assign("dominant-baseline", "middle");
    for (k, line) in lines.iter().enumerate() {
        let dy = if k == 0 { first_dy } else { 1.2 };
        let mut span = Element::new("tspan");
        span.assign("x", num(x));
        span.assign("dy", format!("{:.1}em", dy));
        span.append(Text::new(*line));
        element.append(span);
    }
    element
}

/// Render a laid-out pie chart as a standalone SVG document.
pub fn render_pie(chart: &PieChart) -> String {
    let visible: Vec<(usize, &Wedge)> = chart
        .wedges
        .iter()
        .enumerate()
        .filter(|(_, w)| w.theta2 > w.theta1)
        .collect();

    let mut shadows = Group::new()
        .set("class", "shadow")
        .set("fill", "black")
        .set("fill-opacity", "0.3");
    let mut wedges = Group::new()
        .set("class", "wedges")
        .set("stroke", "white")
        .set("stroke-width", 1);
    for (i, wedge) in &visible {
        let (cx, cy) = wedge_center(wedge);
        shadows.append(
            Path::new().set("d", wedge_data(wedge, cx + SHADOW_SHIFT, cy + SHADOW_SHIFT)),
        );
        wedges.append(
            Path::new()
                .set("d", wedge_data(wedge, cx, cy))
                .set("fill", PALETTE[i % PALETTE.len()]),
        );
    }

    let mut labels = Group::new().set("class", "labels").set("font-size", 12);
    let mut annotations = Group::new()
        .set("class", "annotations")
        .set("font-size", ANNOTATION_FONT_SIZE.to_string())
        .set("fill", chart.text_color.as_str())
        .set("text-anchor", "middle");
    for wedge in &chart.wedges {
        let (cx, cy) = wedge_center(wedge);
        let angle = wedge.mid_angle();

        let (x, y) = polar(cx, cy, LABEL_DISTANCE, angle);
        let mut label = text(x, y, &wedge.label);
        label.assign("text-anchor", text_anchor(angle));
        label.assign("dominant-baseline", "middle");
        labels.append(label);

        let (x, y) = polar(cx, cy, ANNOTATION_DISTANCE, angle);
        annotations.append(annotation(x, y, &wedge.annotation));
    }

    let mut document = Document::new()
        .set("width", WIDTH.to_string())
        .set("height", HEIGHT.to_string())
        .set("viewBox", format!("0 0 {} {}", WIDTH, HEIGHT))
        .set("font-family", "sans-serif")
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", "white"),
        );

    if !chart.title.is_empty() {
        let mut title = text(CENTER_X, 40.0, &chart.title);
        title.assign("text-anchor", "middle");
        title.assign("font-size", 16);
        title.assign("font-weight", "bold");
        document.append(title);
    }

    document
        .add(shadows)
        .add(wedges)
        .add(labels)
        .add(annotations)
        .to_string()
}
