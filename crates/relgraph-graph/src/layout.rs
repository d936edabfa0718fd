//! Force-directed layout
//!
//! Fruchterman-Reingold. Every pair repels with `k² / d` and every edge
//! attracts with `d² / k`. Edges live in per-node neighbour lists, so memory
//! grows with the edge count rather than with n². Each step moves a node by the
//! current temperature, which starts at a tenth of the layout span and
//! cools linearly. The result is centred on the origin and scaled so the
//! largest absolute coordinate is 1.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::RelationGraph;
use relgraph_core::VisualizationConfig;

/// 2D position per node, indexed like the graph
pub type Layout = Vec<(f64, f64)>;

const MIN_DISTANCE: f64 = 0.01;
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Seeded spring layout
#[derive(Debug, Clone)]
pub struct SpringLayout {
    k: f64,
    iterations: usize,
    seed: u64,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self::from_config(&VisualizationConfig::default())
    }
}

impl SpringLayout {
    pub fn from_config(config: &VisualizationConfig) -> Self {
        Self {
            k: config.spring_k,
            iterations: config.iterations,
            seed: config.seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Optimal distance; non-positive values fall back to `sqrt(1/n)`
    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    /// Compute positions for every node
    pub fn compute(&self, graph: &RelationGraph) -> Layout {
        let n = graph.node_count();
        match n {
            0 => return Vec::new(),
            1 => return vec![(0.0, 0.0)],
            _ => {}
        }

        let adjacency = adjacency(graph);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut pos: Layout = (0..n).map(|_| (rng.gen::<f64>(), rng.gen::<f64>())).collect();

        let k = if self.k > 0.0 { self.k } else { (1.0 / n as f64).sqrt() };
        let mut t = span(&pos) * 0.1;
        let dt = t / (self.iterations as f64 + 1.0);

        for iteration in 0..self.iterations {
            let mut moves = Vec::with_capacity(n);
            for i in 0..n {
                let (mut dx, mut dy) = (0.0, 0.0);
                for j in (0..n).filter(|&j| j != i) {
                    let (delta, distance) = offset(pos[i], pos[j]);
                    let repulsion = k * k / (distance * distance);
                    dx += delta.0 * repulsion;
                    dy += delta.1 * repulsion;
                }
                for &(j, weight) in &adjacency[i] {
                    let (delta, distance) = offset(pos[i], pos[j]);
                    let attraction = weight * distance / k;
                    dx -= delta.0 * attraction;
                    dy -= delta.1 * attraction;
                }
                let length = dx.hypot(dy);
                let length = if length < MIN_DISTANCE { 0.1 } else { length };
                moves.push((dx * t / length, dy * t / length));
            }

            let mut total = 0.0;
            for (p, m) in pos.iter_mut().zip(&moves) {
                p.0 += m.0;
                p.1 += m.1;
                total += m.0 * m.0 + m.1 * m.1;
            }
            t -= dt;

            if total.sqrt() / (n as f64) < CONVERGENCE_THRESHOLD {
                debug!(iteration, "Spring layout converged");
                break;
            }
        }

        rescale(&mut pos);
        pos
    }
}

/// Undirected weighted neighbour lists
///
/// Parallel edges in either direction add to one weight. Self-loops are
/// dropped since a node cannot pull on itself.
fn adjacency(graph: &RelationGraph) -> Vec<Vec<(usize, f64)>> {
    fn link(neighbours: &mut Vec<(usize, f64)>, to: usize) {
        match neighbours.iter_mut().find(|(j, _)| *j == to) {
            Some((_, weight)) => *weight += 1.0,
            None => neighbours.push((to, 1.0)),
        }
    }

    let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); graph.node_count()];
    for (source, target, _) in graph.edges() {
        if source != target {
            link(&mut adjacency[source], target);
            link(&mut adjacency[target], source);
        }
    }
    adjacency
}

/// Vector from `b` to `a` and its length, floored at `MIN_DISTANCE`
fn offset(a: (f64, f64), b: (f64, f64)) -> ((f64, f64), f64) {
    let delta = (a.0 - b.0, a.1 - b.1);
    (delta, delta.0.hypot(delta.1).max(MIN_DISTANCE))
}

fn span(pos: &Layout) -> f64 {
    let (min_x, max_x, min_y, max_y) = pos.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(a, b, c, d), &(x, y)| (a.min(x), b.max(x), c.min(y), d.max(y)),
    );
    (max_x - min_x).max(max_y - min_y)
}

/// Centre on the origin and scale the largest coordinate to 1
fn rescale(pos: &mut Layout) {
    let n = pos.len() as f64;
    let (sum_x, sum_y) = pos.iter().fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    let (mean_x, mean_y) = (sum_x / n, sum_y / n);
    for p in pos.iter_mut() {
        p.0 -= mean_x;
        p.1 -= mean_y;
    }

    let limit = pos
        .iter()
        .fold(0.0_f64, |acc, &(x, y)| acc.max(x.abs()).max(y.abs()));
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= limit;
            p.1 /= limit;
        }
    }
}
