//! Force-directed layout for schema graphs.
//!
//! A fixed number of ticks of a velocity-Verlet style simulation with five
//! forces: centering, link springs, many-body repulsion, collision and weak
//! per-axis pulls toward the viewport center. Runs are reproducible: start
//! positions follow a phyllotaxis spiral and coincident nodes are nudged
//! with a fixed-seed generator.
//!
//! After the tick budget a separation sweep removes leftover box overlap.
//! Node centers never leave [`SchemaLayout::containment_radius`].

use nextmap_schema::{ModelConstraint, SchemaEdge, SchemaGraph, SchemaNode};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{Position, Rect, Size};

const HEADER_HEIGHT: f64 = 56.0;
const FIELD_ROW_HEIGHT: f64 = 44.0;
const SECTION_HEADER_HEIGHT: f64 = 40.0;
const SECTION_ROW_HEIGHT: f64 = 32.0;
const FOOTER_HEIGHT: f64 = 48.0;
const BODY_PADDING: f64 = 20.0;

const SWEEP_PASSES: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForceLayoutConfig {
    pub viewport: Size,
    /// Fixed simulation budget; there is no convergence test.
    pub ticks: usize,
    pub node_width: f64,
    pub min_node_height: f64,
    pub max_node_height: f64,
    pub link_distance: f64,
    pub link_strength: f64,
    /// Negative values repel.
    pub charge_strength: f64,
    pub charge_distance_max: f64,
    /// Added to each node's half-diagonal for the collision radius.
    pub collide_padding: f64,
    pub collide_strength: f64,
    pub collide_iterations: usize,
    pub axis_strength: f64,
    pub alpha_min: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// Minimum gap between boxes left by the final sweep.
    pub separation_gap: f64,
}

impl Default for ForceLayoutConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1920.0, 1080.0),
            ticks: 400,
            node_width: 320.0,
            min_node_height: 180.0,
            max_node_height: 1200.0,
            link_distance: 350.0,
            link_strength: 0.4,
            charge_strength: -1500.0,
            charge_distance_max: 1000.0,
            collide_padding: 60.0,
            collide_strength: 1.0,
            collide_iterations: 3,
            axis_strength: 0.03,
            alpha_min: 0.001,
            velocity_decay: 0.4,
            separation_gap: 20.0,
        }
    }
}

impl ForceLayoutConfig {
    pub fn center(&self) -> Position {
        Position::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Rendered height of a schema node: header, one row per field, optional
    /// constraint and index sections, footer.
    pub fn estimate_node_height(&self, node: &SchemaNode) -> f64 {
        let indexes = node
            .constraints
            .iter()
            .filter(|c| matches!(c, ModelConstraint::Index { .. }))
            .count();
        let constraints = node.constraints.len() - indexes;

        let section = |rows: usize| {
            if rows == 0 {
                0.0
            } else {
                SECTION_HEADER_HEIGHT + rows as f64 * SECTION_ROW_HEIGHT
            }
        };
        let height = HEADER_HEIGHT
            + node.row_count() as f64 * FIELD_ROW_HEIGHT
            + section(constraints)
            + section(indexes)
            + FOOTER_HEIGHT
            + BODY_PADDING;
        height.clamp(self.min_node_height, self.max_node_height)
    }

    pub fn node_size(&self, node: &SchemaNode) -> Size {
        Size::new(self.node_width, self.estimate_node_height(node))
    }

    /// Grid that holds every node with `separation_gap` between cells.
    fn fallback_grid(&self, sizes: &[Size]) -> GridShape {
        let cell = sizes.iter().fold(Size::default(), |acc, s| {
            Size::new(acc.width.max(s.width), acc.height.max(s.height))
        });
        let columns = (sizes.len() as f64).sqrt().ceil().max(1.0) as usize;
        let rows = sizes.len().div_ceil(columns).max(1);
        GridShape {
            columns,
            rows,
            cell: Size::new(
                cell.width + self.separation_gap,
                cell.height + self.separation_gap,
            ),
        }
    }

    /// Farthest any node center may sit from the viewport center.
    pub fn containment_radius(&self, sizes: &[Size]) -> f64 {
        let viewport = self.viewport.width.min(self.viewport.height) / 2.0;
        viewport.max(self.fallback_grid(sizes).half_diagonal())
    }
}

#[derive(Debug, Clone, Copy)]
struct GridShape {
    columns: usize,
    rows: usize,
    cell: Size,
}

impl GridShape {
    fn extent(&self) -> Size {
        Size::new(
            self.columns as f64 * self.cell.width,
            self.rows as f64 * self.cell.height,
        )
    }

    fn half_diagonal(&self) -> f64 {
        self.extent().half_diagonal()
    }

    fn cell_center(&self, index: usize, center: Position) -> Position {
        let extent = self.extent();
        let column = (index % self.columns) as f64;
        let row = (index / self.columns) as f64;
        Position::new(
            center.x - extent.width / 2.0 + (column + 0.5) * self.cell.width,
            center.y - extent.height / 2.0 + (row + 0.5) * self.cell.height,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedSchemaNode {
    pub id: String,
    /// Top-left corner.
    pub position: Position,
    #[serde(flatten)]
    pub size: Size,
    pub data: SchemaNode,
}

impl PositionedSchemaNode {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn center(&self) -> Position {
        self.rect().center()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaLayout {
    pub nodes: Vec<PositionedSchemaNode>,
    pub edges: Vec<SchemaEdge>,
    pub center: Position,
    pub containment_radius: f64,
}

impl SchemaLayout {
    pub fn node(&self, id: &str) -> Option<&PositionedSchemaNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Linear congruential generator with the constants of Numerical Recipes.
#[derive(Debug, Clone)]
struct Lcg(u32);

impl Lcg {
    const SEED: u32 = 1;

    fn new() -> Self {
        Self(Self::SEED)
    }

    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        f64::from(self.0) / 4_294_967_296.0
    }

    /// Tiny non-zero offset for separating coincident nodes.
    fn jiggle(&mut self) -> f64 {
        let offset = (self.next_unit() - 0.5) * 1e-6;
        if offset == 0.0 { 1e-7 } else { offset }
    }
}

#[derive(Debug, Clone, Copy)]
struct Body {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    size: Size,
    radius: f64,
}

#[derive(Debug, Clone, Copy)]
struct Link {
    source: usize,
    target: usize,
    /// Share of the correction applied to the target.
    bias: f64,
}

struct Simulation<'a> {
    config: &'a ForceLayoutConfig,
    bodies: Vec<Body>,
    links: Vec<Link>,
    center: Position,
    radius: f64,
    alpha: f64,
    alpha_decay: f64,
    rng: Lcg,
}

impl<'a> Simulation<'a> {
    fn new(config: &'a ForceLayoutConfig, sizes: &[Size], edges: &[(usize, usize)]) -> Self {
        let center = config.center();
        let initial_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
        let bodies = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                let r = 10.0 * (0.5 + i as f64).sqrt();
                let angle = i as f64 * initial_angle;
                Body {
                    x: center.x + r * angle.cos(),
                    y: center.y + r * angle.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    size: *size,
                    radius: size.half_diagonal() + config.collide_padding,
                }
            })
            .collect();

        let mut degree = vec![0usize; sizes.len()];
        for &(s, t) in edges {
            degree[s] += 1;
            degree[t] += 1;
        }
        let links = edges
            .iter()
            .map(|&(source, target)| Link {
                source,
                target,
                bias: degree[source] as f64 / (degree[source] + degree[target]) as f64,
            })
            .collect();

        let alpha_decay = if config.ticks == 0 {
            0.0
        } else {
            1.0 - config.alpha_min.powf(1.0 / 300.0)
        };

        Self {
            config,
            bodies,
            links,
            center,
            radius: config.containment_radius(sizes),
            alpha: 1.0,
            alpha_decay,
            rng: Lcg::new(),
        }
    }

    fn run(&mut self) {
        for _ in 0..self.config.ticks {
            self.tick();
        }
    }

    fn tick(&mut self) {
        self.alpha += (0.0 - self.alpha) * self.alpha_decay;

        self.apply_center();
        self.apply_links();
        self.apply_charge();
        for _ in 0..self.config.collide_iterations {
            self.apply_collide();
        }
        self.apply_axis();

        let keep = 1.0 - self.config.velocity_decay;
        for body in &mut self.bodies {
            body.vx *= keep;
            body.vy *= keep;
            body.x += body.vx;
            body.y += body.vy;
        }
        self.contain();
    }

    fn apply_center(&mut self) {
        let n = self.bodies.len() as f64;
        let (sx, sy) = self
            .bodies
            .iter()
            .fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
        let dx = sx / n - self.center.x;
        let dy = sy / n - self.center.y;
        for body in &mut self.bodies {
            body.x -= dx;
            body.y -= dy;
        }
    }

    fn apply_links(&mut self) {
        let strength = self.config.link_strength * self.alpha;
        for link in &self.links {
            let (s, t) = (self.bodies[link.source], self.bodies[link.target]);
            let mut x = t.x + t.vx - s.x - s.vx;
            let mut y = t.y + t.vy - s.y - s.vy;
            if x == 0.0 {
                x = self.rng.jiggle();
            }
            if y == 0.0 {
                y = self.rng.jiggle();
            }
            let l = x.hypot(y);
            let k = (l - self.config.link_distance) / l * strength;
            x *= k;
            y *= k;
            self.bodies[link.target].vx -= x * link.bias;
            self.bodies[link.target].vy -= y * link.bias;
            self.bodies[link.source].vx += x * (1.0 - link.bias);
            self.bodies[link.source].vy += y * (1.0 - link.bias);
        }
    }

    fn apply_charge(&mut self) {
        let max2 = self.config.charge_distance_max * self.config.charge_distance_max;
        let weight = self.config.charge_strength * self.alpha;
        let n = self.bodies.len();
        let mut deltas = vec![(0.0, 0.0); n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let mut x = self.bodies[j].x - self.bodies[i].x;
                let mut y = self.bodies[j].y - self.bodies[i].y;
                let mut l = x * x + y * y;
                if l >= max2 {
                    continue;
                }
                if x == 0.0 {
                    x = self.rng.jiggle();
                    l += x * x;
                }
                if y == 0.0 {
                    y = self.rng.jiggle();
                    l += y * y;
                }
                if l < 1.0 {
                    l = l.sqrt();
                }
                deltas[i].0 += x * weight / l;
                deltas[i].1 += y * weight / l;
            }
        }

        for (body, (dx, dy)) in self.bodies.iter_mut().zip(deltas) {
            body.vx += dx;
            body.vy += dy;
        }
    }

    fn apply_collide(&mut self) {
        let strength = self.config.collide_strength;
        let n = self.bodies.len();
        for i in 0..n {
            let xi = self.bodies[i].x + self.bodies[i].vx;
            let yi = self.bodies[i].y + self.bodies[i].vy;
            let ri = self.bodies[i].radius;
            for j in i + 1..n {
                let other = self.bodies[j];
                let mut x = xi - other.x - other.vx;
                let mut y = yi - other.y - other.vy;
                let r = ri + other.radius;
                let mut l = x * x + y * y;
                if l >= r * r {
                    continue;
                }
                if x == 0.0 {
                    x = self.rng.jiggle();
                    l += x * x;
                }
                if y == 0.0 {
                    y = self.rng.jiggle();
                    l += y * y;
                }
                let l = l.sqrt();
                let k = (r - l) / l * strength;
                x *= k;
                y *= k;
                let share = other.radius * other.radius / (ri * ri + other.radius * other.radius);
                self.bodies[i].vx += x * share;
                self.bodies[i].vy += y * share;
                self.bodies[j].vx -= x * (1.0 - share);
                self.bodies[j].vy -= y * (1.0 - share);
            }
        }
    }

    fn apply_axis(&mut self) {
        let k = self.config.axis_strength * self.alpha;
        for body in &mut self.bodies {
            body.vx += (self.center.x - body.x) * k;
            body.vy += (self.center.y - body.y) * k;
        }
    }

    fn contain(&mut self) {
        for body in &mut self.bodies {
            let dx = body.x - self.center.x;
            let dy = body.y - self.center.y;
            let d = dx.hypot(dy);
            if d > self.radius {
                let scale = self.radius / d;
                body.x = self.center.x + dx * scale;
                body.y = self.center.y + dy * scale;
                body.vx = 0.0;
                body.vy = 0.0;
            }
        }
    }

    fn rect(&self, i: usize) -> Rect {
        let b = &self.bodies[i];
        Rect::centered(Position::new(b.x, b.y), b.size)
    }

    fn has_overlap(&self) -> bool {
        let n = self.bodies.len();
        (0..n).any(|i| (i + 1..n).any(|j| self.rect(i).overlaps(&self.rect(j))))
    }

    /// Push overlapping pairs apart along their axis of least penetration.
    fn separate(&mut self) {
        let gap = self.config.separation_gap;
        let n = self.bodies.len();

        for _ in 0..SWEEP_PASSES {
            let mut moved = false;
            for i in 0..n {
                for j in i + 1..n {
                    let (a, b) = (self.bodies[i], self.bodies[j]);
                    let dx = b.x - a.x;
                    let dy = b.y - a.y;
                    let ox = (a.size.width + b.size.width) / 2.0 + gap - dx.abs();
                    let oy = (a.size.height + b.size.height) / 2.0 + gap - dy.abs();
                    if ox <= 0.0 || oy <= 0.0 {
                        continue;
                    }
                    moved = true;
                    if ox < oy {
                        let sign = if dx < 0.0 { -1.0 } else { 1.0 };
                        self.bodies[i].x -= sign * ox / 2.0;
                        self.bodies[j].x += sign * ox / 2.0;
                    } else {
                        let sign = if dy < 0.0 { -1.0 } else { 1.0 };
                        self.bodies[i].y -= sign * oy / 2.0;
                        self.bodies[j].y += sign * oy / 2.0;
                    }
                }
            }
            self.contain();
            if !moved {
                return;
            }
        }
    }

    /// Deterministic grid inside the containment radius.
    fn fall_back_to_grid(&mut self) {
        let sizes: Vec<Size> = self.bodies.iter().map(|b| b.size).collect();
        let grid = self.config.fallback_grid(&sizes);
        for (i, body) in self.bodies.iter_mut().enumerate() {
            let c = grid.cell_center(i, self.center);
            body.x = c.x;
            body.y = c.y;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForceLayoutEngine {
    config: ForceLayoutConfig,
}

impl ForceLayoutEngine {
    pub fn new(config: ForceLayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForceLayoutConfig {
        &self.config
    }

    /// Position every node of `graph`.
    ///
    /// Edges whose endpoints are missing from the graph, and self-relations,
    /// are kept in the output but exert no force.
    pub fn layout(&self, graph: &SchemaGraph) -> SchemaLayout {
        let sizes: Vec<Size> = graph.nodes.iter().map(|n| self.config.node_size(n)).collect();
        let index: FxHashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();
        let links: Vec<(usize, usize)> = graph
            .edges
            .iter()
            .filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?)))
            .filter(|(s, t)| s != t)
            .collect();

        let center = self.config.center();
        let containment_radius = self.config.containment_radius(&sizes);
        if graph.nodes.is_empty() {
            return SchemaLayout {
                nodes: Vec::new(),
                edges: graph.edges.clone(),
                center,
                containment_radius,
            };
        }

        let mut sim = Simulation::new(&self.config, &sizes, &links);
        sim.run();
        sim.separate();
        if sim.has_overlap() {
            tracing::debug!(
                "Separation left overlaps among {} nodes, using grid placement",
                graph.nodes.len()
            );
            sim.fall_back_to_grid();
        }

        let nodes = graph
            .nodes
            .iter()
            .zip(&sim.bodies)
            .map(|(node, body)| PositionedSchemaNode {
                id: node.id.clone(),
                position: Position::new(
                    body.x - body.size.width / 2.0,
                    body.y - body.size.height / 2.0,
                ),
                size: body.size,
                data: node.clone(),
            })
            .collect();

        tracing::debug!(
            "Force layout: {} nodes, {} links, {} ticks",
            graph.nodes.len(),
            links.len(),
            self.config.ticks
        );

        SchemaLayout {
            nodes,
            edges: graph.edges.clone(),
            center,
            containment_radius,
        }
    }
}
