//! Spring embedding in 2D, lifted to 3D by kind bands.

use crate::strategy::LayoutStrategy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rg_model::{KnowledgeEdge, KnowledgeNode, NodeId, Vec3};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Spring constant of the 2D embedding.
const SPRING_K: f64 = 3.0;

/// Iteration cap for the 2D embedding.
const ITERATIONS: usize = 50;

/// Stop once mean displacement falls below this.
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Pairwise distances are clamped here before dividing.
const MIN_DISTANCE: f64 = 0.01;

/// Scale from unit square to layout space.
const PLANE_SCALE: f64 = 200.0;

/// Spring layout.
///
/// Runs a 2D Fruchterman-Reingold embedding with per-iteration step decay,
/// rescales the plane to ±1, and stretches it by 200. The z coordinate is
/// not part of the simulation: each node kind hashes to a fixed band in
/// [-50, 50), so kinds separate into parallel planes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpringLayout {
    seed: Option<u64>,
}

impl SpringLayout {
    /// New spring layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a fixed seed for reproducible positions.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Deterministic z band for a kind tag.
fn kind_band(tag: &str) -> f64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    #[allow(clippy::cast_precision_loss)]
    let band = (hasher.finish() % 100) as f64;
    band - 50.0
}

impl LayoutStrategy for SpringLayout {
    fn name(&self) -> &'static str {
        "spring"
    }

    fn compute(
        &self,
        nodes: &[KnowledgeNode],
        edges: &[KnowledgeEdge],
    ) -> HashMap<NodeId, Vec3> {
        let n = nodes.len();
        if n == 0 {
            return HashMap::new();
        }

        let index: HashMap<&NodeId, usize> =
            nodes.iter().enumerate().map(|(i, node)| (&node.id, i)).collect();

        // Symmetric weight lookup keyed by ordered index pair. A repeated
        // edge overwrites the previous weight; self-loops exert no force.
        let mut weights: HashMap<(usize, usize), f64> = HashMap::new();
        for edge in edges {
            let (Some(&a), Some(&b)) = (index.get(&edge.source), index.get(&edge.target)) else {
                continue;
            };
            if a != b {
                weights.insert((a.min(b), a.max(b)), edge.weight);
            }
        }
        let weight_of = |a: usize, b: usize| -> f64 {
            weights.get(&(a.min(b), a.max(b))).copied().unwrap_or(0.0)
        };

        let mut rng = self
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut pos: Vec<[f64; 2]> = (0..n)
            .map(|_| [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
            .collect();

        // Initial step: a tenth of the wider coordinate spread.
        let spread = |axis: usize| -> f64 {
            let values = pos.iter().map(|p| p[axis]);
            let max = values.clone().fold(f64::MIN, f64::max);
            let min = values.fold(f64::MAX, f64::min);
            max - min
        };
        let mut step = spread(0).max(spread(1)) * 0.1;
        #[allow(clippy::cast_precision_loss)]
        let step_decay = step / (ITERATIONS + 1) as f64;

        for iteration in 0..ITERATIONS {
            let mut moved_sq = 0.0;
            let mut next = pos.clone();
            for i in 0..n {
                let mut disp = [0.0_f64; 2];
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let dx = pos[i][0] - pos[j][0];
                    let dy = pos[i][1] - pos[j][1];
                    let distance = dx.hypot(dy).max(MIN_DISTANCE);
                    let coefficient = SPRING_K * SPRING_K / (distance * distance)
                        - weight_of(i, j) * distance / SPRING_K;
                    disp[0] += dx * coefficient;
                    disp[1] += dy * coefficient;
                }

                let mut length = disp[0].hypot(disp[1]);
                if length < 0.01 {
                    length = 0.1;
                }
                let dx = disp[0] * step / length;
                let dy = disp[1] * step / length;
                next[i][0] += dx;
                next[i][1] += dy;
                moved_sq += dx * dx + dy * dy;
            }
            pos = next;
            step -= step_decay;

            #[allow(clippy::cast_precision_loss)]
            let mean_moved = moved_sq.sqrt() / n as f64;
            if mean_moved < CONVERGENCE_THRESHOLD {
                debug!(iteration, "spring embedding converged early");
                break;
            }
        }

        rescale_to_unit(&mut pos);

        nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let position = Vec3::new(
                    pos[i][0] * PLANE_SCALE,
                    pos[i][1] * PLANE_SCALE,
                    kind_band(node.kind.as_str()),
                );
                (node.id.clone(), position)
            })
            .collect()
    }
}

/// Center on the mean and scale the widest coordinate to ±1.
fn rescale_to_unit(pos: &mut [[f64; 2]]) {
    if pos.is_empty() {
        return;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = pos.len() as f64;
    for axis in 0..2 {
        let mean: f64 = pos.iter().map(|p| p[axis]).sum::<f64>() / n;
        for p in pos.iter_mut() {
            p[axis] -= mean;
        }
    }
    let limit = pos
        .iter()
        .flat_map(|p| p.iter())
        .fold(0.0_f64, |acc, &v| acc.max(v.abs()));
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p[0] /= limit;
            p[1] /= limit;
        }
    }
}
