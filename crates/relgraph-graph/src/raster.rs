//! Static SVG and PNG output via plotters

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::{node_size, Layout, RelationGraph};
use relgraph_core::{RelGraphError, Result, VisualizationConfig};

const MARGIN: f64 = 60.0;
const TITLE_HEIGHT: f64 = 40.0;

fn draw_error(e: impl std::fmt::Display) -> RelGraphError {
    RelGraphError::Visualization(e.to_string())
}

/// Parse `#rgb`, `#rrggbb` or a basic colour name
pub fn parse_color(value: &str) -> Result<RGBColor> {
    let invalid = || RelGraphError::Visualization(format!("unsupported colour {value:?}"));

    if let Some(hex) = value.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;
        return match digits.as_slice() {
            [r, g, b] => Ok(RGBColor(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(RGBColor(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
            _ => Err(invalid()),
        };
    }

    match value.to_lowercase().as_str() {
        "red" => Ok(RED),
        "green" => Ok(GREEN),
        "blue" => Ok(BLUE),
        "black" => Ok(BLACK),
        "white" => Ok(WHITE),
        "gray" | "grey" => Ok(RGBColor(128, 128, 128)),
        "orange" => Ok(RGBColor(255, 165, 0)),
        _ => Err(invalid()),
    }
}

struct Palette {
    node: RGBColor,
    edge: RGBColor,
    label: RGBColor,
}

impl Palette {
    fn from_config(config: &VisualizationConfig) -> Result<Self> {
        Ok(Self {
            node: parse_color(&config.node_color)?,
            edge: parse_color(&config.edge_color)?,
            label: parse_color(&config.label_color)?,
        })
    }
}

/// Map layout coordinates in [-1, 1] onto the canvas
fn to_pixel(p: (f64, f64), (width, height): (u32, u32)) -> (i32, i32) {
    let w = (width as f64 - 2.0 * MARGIN).max(1.0);
    let h = (height as f64 - 2.0 * MARGIN - TITLE_HEIGHT).max(1.0);
    let x = MARGIN + (p.0 + 1.0) / 2.0 * w;
    // screen y grows downwards
    let y = MARGIN + TITLE_HEIGHT + (1.0 - p.1) / 2.0 * h;
    (x.round() as i32, y.round() as i32)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    graph: &RelationGraph,
    positions: &Layout,
    config: &VisualizationConfig,
) -> Result<()> {
    let palette = Palette::from_config(config)?;
    let size = (config.width, config.height);
    let centred = Pos::new(HPos::Center, VPos::Center);

    root.fill(&WHITE).map_err(draw_error)?;
    root.draw(&Text::new(
        config.title.clone(),
        (config.width as i32 / 2, (TITLE_HEIGHT / 2.0) as i32 + 10),
        ("sans-serif", 16).into_font().color(&BLACK).pos(centred),
    ))
    .map_err(draw_error)?;

    for (source, target, _) in graph.edges() {
        let from = to_pixel(positions[source], size);
        let to = to_pixel(positions[target], size);
        root.draw(&PathElement::new(vec![from, to], palette.edge.stroke_width(2)))
            .map_err(draw_error)?;
    }

    for (i, name) in graph.nodes().enumerate() {
        let centre = to_pixel(positions[i], size);
        let radius = (node_size(graph.degree(i)) / 2.0).round() as i32;
        root.draw(&Circle::new(centre, radius, palette.node.filled()))
            .map_err(draw_error)?;
        root.draw(&Circle::new(centre, radius, BLACK.stroke_width(2)))
            .map_err(draw_error)?;
        root.draw(&Text::new(
            name.to_string(),
            (centre.0, centre.1 - radius - 8),
            ("sans-serif", 12).into_font().color(&BLACK).pos(centred),
        ))
        .map_err(draw_error)?;
    }

    for (source, target, label) in graph.edges() {
        let (x0, y0) = to_pixel(positions[source], size);
        let (x1, y1) = to_pixel(positions[target], size);
        root.draw(&Text::new(
            label.to_string(),
            ((x0 + x1) / 2, (y0 + y1) / 2),
            ("sans-serif", 10).into_font().color(&palette.label).pos(centred),
        ))
        .map_err(draw_error)?;
    }

    root.present().map_err(draw_error)?;
    Ok(())
}

/// Render to an in-memory SVG document
pub fn render_svg(graph: &RelationGraph, positions: &Layout, config: &VisualizationConfig) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        draw(&root, graph, positions, config)?;
    }
    Ok(svg)
}

/// Render an SVG file
pub fn render_svg_file(
    graph: &RelationGraph,
    positions: &Layout,
    config: &VisualizationConfig,
    path: &Path,
) -> Result<()> {
    let svg = render_svg(graph, positions, config)?;
    std::fs::write(path, svg).map_err(|e| RelGraphError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Render a PNG file
pub fn render_png(
    graph: &RelationGraph,
    positions: &Layout,
    config: &VisualizationConfig,
    path: &Path,
) -> Result<()> {
    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    draw(&root, graph, positions, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpringLayout;
    use relgraph_core::Relationship;

    #[test]
    fn test_parse_colors() {
        assert_eq!(parse_color("#6175c1").unwrap(), RGBColor(0x61, 0x75, 0xc1));
        assert_eq!(parse_color("#888").unwrap(), RGBColor(0x88, 0x88, 0x88));
        assert_eq!(parse_color("Red").unwrap(), RED);
        assert!(parse_color("#12").is_err());
        assert!(parse_color("#zzzzzz").is_err());
        assert!(parse_color("chartreuse").is_err());
    }

    #[test]
    fn test_pixels_stay_on_canvas() {
        let size = (1200, 900);
        for p in [(-1.0, -1.0), (1.0, 1.0), (0.0, 0.0)] {
            let (x, y) = to_pixel(p, size);
            assert!((0..1200).contains(&x));
            assert!((0..900).contains(&y));
        }
        assert!(to_pixel((0.0, 1.0), size).1 < to_pixel((0.0, -1.0), size).1);
    }

    #[test]
    fn test_svg_contains_labels() {
        let graph = RelationGraph::from_relationships(&[Relationship::new("UNMIK", "support", "KTA")]);
        let positions = SpringLayout::default().compute(&graph);
        let svg = render_svg(&graph, &positions, &VisualizationConfig::default()).unwrap();
        assert!(svg.contains("UNMIK"));
        assert!(svg.contains("support"));
        assert!(svg.contains("Enhanced Entity Relationship Network"));
    }

    #[test]
    fn test_bad_color_is_an_error() {
        let config = VisualizationConfig {
            node_color: "not-a-colour".to_string(),
            ..VisualizationConfig::default()
        };
        let result = render_svg(&RelationGraph::new(), &Vec::new(), &config);
        assert!(matches!(result, Err(RelGraphError::Visualization(_))));
    }
}
