//! Interactive Plotly output
//!
//! The figure is a plain Plotly JSON document (one line trace for edges,
//! one marker trace for nodes, one annotation per edge label) embedded in
//! a standalone HTML page. plotly.js is either referenced by URL or, when
//! configured as a local file, inlined so the page works offline.

use std::path::Path;

use serde_json::{json, Value};

use crate::{node_size, Layout, RelationGraph};
use relgraph_core::{RelGraphError, Result, VisualizationConfig};

/// Build the Plotly figure document
pub fn figure(graph: &RelationGraph, positions: &Layout, config: &VisualizationConfig) -> Value {
    let mut edge_x: Vec<Value> = Vec::new();
    let mut edge_y: Vec<Value> = Vec::new();
    let mut annotations = Vec::new();

    for (source, target, label) in graph.edges() {
        let (x0, y0) = positions[source];
        let (x1, y1) = positions[target];
        edge_x.extend([json!(x0), json!(x1), Value::Null]);
        edge_y.extend([json!(y0), json!(y1), Value::Null]);
        annotations.push(json!({
            "x": (x0 + x1) / 2.0,
            "y": (y0 + y1) / 2.0,
            "text": label,
            "showarrow": false,
            "font": { "color": config.label_color, "size": 10 },
            "xanchor": "center",
            "yanchor": "middle",
        }));
    }

    let names: Vec<&str> = graph.nodes().collect();
    let sizes: Vec<f64> = (0..graph.node_count())
        .map(|i| node_size(graph.degree(i)))
        .collect();
    let node_x: Vec<f64> = positions.iter().map(|p| p.0).collect();
    let node_y: Vec<f64> = positions.iter().map(|p| p.1).collect();

    let hidden_axis = json!({ "showgrid": false, "zeroline": false, "showticklabels": false });

    json!({
        "data": [
            {
                "type": "scatter",
                "x": edge_x,
                "y": edge_y,
                "mode": "lines",
                "line": { "width": 1.5, "color": config.edge_color },
                "hoverinfo": "none",
            },
            {
                "type": "scatter",
                "x": node_x,
                "y": node_y,
                "mode": "markers+text",
                "text": names,
                "textposition": "top center",
                "hoverinfo": "text",
                "marker": {
                    "size": sizes,
                    "color": config.node_color,
                    "line": { "width": 2 },
                },
            },
        ],
        "layout": {
            "title": { "text": config.title, "font": { "size": 16 } },
            "showlegend": false,
            "hovermode": "closest",
            "margin": { "b": 20, "l": 5, "r": 5, "t": 40 },
            "annotations": annotations,
            "xaxis": hidden_axis,
            "yaxis": hidden_axis,
        },
    })
}

/// Render a standalone HTML page
pub fn render_html(
    graph: &RelationGraph,
    positions: &Layout,
    config: &VisualizationConfig,
) -> Result<String> {
    // "</" inside a script block would end it early
    let figure = figure(graph, positions, config).to_string().replace("</", "<\\/");
    let script = plotly_script(&config.plotly_js)?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
{script}
</head>
<body>
<div id="graph" style="width:100%;height:100vh;"></div>
<script>
var figure = {figure};
Plotly.newPlot("graph", figure.data, figure.layout);
</script>
</body>
</html>
"#,
        title = escape_html(&config.title),
    ))
}

/// `<script>` tag for plotly.js: remote sources are linked, local files inlined
fn plotly_script(source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return Ok(format!(r#"<script src="{}"></script>"#, escape_html(source)));
    }
    let path = Path::new(source);
    let code = std::fs::read_to_string(path).map_err(|e| RelGraphError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(format!("<script>\n{}\n</script>", code.replace("</script", "<\\/script")))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpringLayout;
    use relgraph_core::Relationship;

    fn sample() -> (RelationGraph, Layout) {
        let graph = RelationGraph::from_relationships(&[
            Relationship::new("UNMIK", "discuss", "mandate"),
            Relationship::new("UNMIK", "support", "KTA"),
        ]);
        let positions = SpringLayout::default().compute(&graph);
        (graph, positions)
    }

    #[test]
    fn test_figure_traces() {
        let (graph, positions) = sample();
        let fig = figure(&graph, &positions, &VisualizationConfig::default());

        let edges = &fig["data"][0];
        assert_eq!(edges["x"].as_array().unwrap().len(), 6);
        assert_eq!(edges["line"]["color"], "#888");
        assert_eq!(edges["line"]["width"], 1.5);

        let nodes = &fig["data"][1];
        assert_eq!(nodes["text"], json!(["UNMIK", "mandate", "KTA"]));
        assert_eq!(nodes["marker"]["size"], json!([35.0, 25.0, 25.0]));
        assert_eq!(nodes["marker"]["color"], "#6175c1");
    }

    #[test]
    fn test_edge_labels_at_midpoints() {
        let (graph, positions) = sample();
        let fig = figure(&graph, &positions, &VisualizationConfig::default());
        let label = &fig["layout"]["annotations"][1];
        assert_eq!(label["text"], "support");
        assert_eq!(label["font"]["color"], "red");
        assert_eq!(label["font"]["size"], 10);
        let expected = (positions[0].0 + positions[2].0) / 2.0;
        assert!((label["x"].as_f64().unwrap() - expected).abs() < 1e-12);
        assert_eq!(fig["layout"]["showlegend"], false);
    }

    #[test]
    fn test_html_escapes_script_breakouts() {
        let graph = RelationGraph::from_relationships(&[Relationship::new(
            "</script>",
            "x",
            "y",
        )]);
        let positions = SpringLayout::default().compute(&graph);
        let html = render_html(&graph, &positions, &VisualizationConfig::default()).unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains(r#"<script src="https://cdn.plot.ly/plotly-2.35.2.min.js">"#));
    }

    #[test]
    fn test_local_plotly_js_is_inlined() {
        let dir = tempfile::tempdir().unwrap();
        let js = dir.path().join("plotly.min.js");
        std::fs::write(&js, "window.Plotly = {}; // </script> inside a comment").unwrap();

        let (graph, positions) = sample();
        let config = VisualizationConfig {
            plotly_js: js.display().to_string(),
            ..VisualizationConfig::default()
        };
        let html = render_html(&graph, &positions, &config).unwrap();
        assert!(html.contains("window.Plotly = {};"));
        assert!(!html.contains("<script src="));
        assert!(!html.contains("http"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_missing_local_plotly_js_fails() {
        let (graph, positions) = sample();
        let config = VisualizationConfig {
            plotly_js: "/nonexistent/plotly.min.js".to_string(),
            ..VisualizationConfig::default()
        };
        let result = render_html(&graph, &positions, &config);
        assert!(matches!(result, Err(RelGraphError::Io { .. })));
    }

    #[test]
    fn test_empty_figure() {
        let fig = figure(&RelationGraph::new(), &Vec::new(), &VisualizationConfig::default());
        assert!(fig["data"][1]["x"].as_array().unwrap().is_empty());
        assert!(fig["layout"]["annotations"].as_array().unwrap().is_empty());
    }
}
