use crate::bisector::HalfPlane;
use crate::bounds::{BoundingBox, box_side};

/// Scratch buffer to reuse allocations during clipping.
#[derive(Default, Clone)]
pub(crate) struct CellScratch {
    vertices: Vec<f64>,
    neighbors: Vec<i32>,
    dists: Vec<f64>,
}

/// A convex cell of the tessellation, represented as a polygon.
///
/// Vertices are stored as a flat `[x, y, x, y, ...]` array in
/// counter-clockwise order. `edge_neighbors[i]` is the ID of whatever cut the
/// edge starting at vertex `i`: the index of the neighboring site whose
/// bisector produced it, or a negative `BOX_ID_*` value while the edge still
/// belongs to the initial frame. Finished cells emitted by the tessellation
/// are canonicalized (deduplicated vertices, lexicographically smallest
/// vertex first) and carry no frame edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) site: usize,
    pub(crate) vertices: Vec<f64>,
    pub(crate) edge_neighbors: Vec<i32>,
}

impl Cell {
    /// Initial candidate region: the full clipping frame, edges tagged with
    /// the frame-side IDs.
    pub(crate) fn frame(site: usize, bounds: BoundingBox) -> Cell {
        let vertices = vec![
            bounds.min[0], bounds.min[1], // 0: Bottom-Left
            bounds.max[0], bounds.min[1], // 1: Bottom-Right
            bounds.max[0], bounds.max[1], // 2: Top-Right
            bounds.min[0], bounds.max[1], // 3: Top-Left
        ];

        let edge_neighbors = vec![
            box_side(1, false), // 0->1 (Bottom / Y-Min)
            box_side(0, true),  // 1->2 (Right / X-Max)
            box_side(1, true),  // 2->3 (Top / Y-Max)
            box_side(0, false), // 3->0 (Left / X-Min)
        ];

        Cell {
            site,
            vertices,
            edge_neighbors,
        }
    }

    /// Index of the site this cell belongs to.
    pub fn site(&self) -> usize {
        self.site
    }

    /// Flat `[x, y, x, y, ...]` vertex coordinates, counter-clockwise.
    pub fn vertices(&self) -> &[f64] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Per-edge neighbor IDs: `edge_neighbors()[i]` is the site whose
    /// bisector bounds the edge starting at vertex `i`.
    pub fn edge_neighbors(&self) -> &[i32] {
        &self.edge_neighbors
    }

    /// A cell that collapsed to fewer than 3 vertices encloses no area.
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 6
    }

    /// Whether any edge still lies on the initial clipping frame. Such a
    /// region was not closed off by bisectors and is unbounded in truth.
    pub(crate) fn touches_frame(&self) -> bool {
        self.edge_neighbors.iter().any(|&id| id < 0)
    }

    pub fn area(&self) -> f64 {
        let n = self.vertices.len() / 2;
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];
            area += xi * yj - xj * yi;
        }
        (area * 0.5).abs()
    }

    pub fn centroid(&self) -> [f64; 2] {
        let n = self.vertices.len() / 2;
        if n < 3 {
            return [0.0, 0.0];
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut area = 0.0;

        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];

            let cross = xi * yj - xj * yi;
            area += cross;
            cx += (xi + xj) * cross;
            cy += (yi + yj) * cross;
        }

        if area.abs() < 1e-9 {
            return [0.0, 0.0];
        }

        let factor = 1.0 / (3.0 * area);
        [cx * factor, cy * factor]
    }

    /// Whether `point` lies inside or on the boundary of this convex cell,
    /// with a tolerance band around the edges.
    pub fn contains(&self, point: [f64; 2], tolerance: f64) -> bool {
        let n = self.vertices.len() / 2;
        if n < 3 {
            return false;
        }
        for i in 0..n {
            let j = (i + 1) % n;
            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let ex = self.vertices[j * 2] - xi;
            let ey = self.vertices[j * 2 + 1] - yi;
            let len = (ex * ex + ey * ey).sqrt();
            if len <= tolerance {
                continue;
            }
            // CCW winding: inside points sit left of every edge.
            let cross = ex * (point[1] - yi) - ey * (point[0] - xi);
            if cross < -tolerance * len {
                return false;
            }
        }
        true
    }

    /// Intersect the cell with the kept side of `plane`, tagging the cut
    /// edge with `neighbor_id`. Returns `true` if the cell was modified.
    ///
    /// Vertices within `tolerance` of the boundary line count as inside, so
    /// a plane grazing the polygon leaves it untouched.
    pub(crate) fn clip(
        &mut self,
        plane: &HalfPlane,
        neighbor_id: i32,
        tolerance: f64,
        scratch: &mut CellScratch,
    ) -> bool {
        let num_verts = self.vertices.len() / 2;
        if num_verts < 3 {
            return false;
        }

        scratch.dists.clear();
        scratch.dists.reserve(num_verts);

        let mut all_inside = true;
        let mut all_outside = true;

        for i in 0..num_verts {
            let d = plane.signed_distance(self.vertices[i * 2], self.vertices[i * 2 + 1]);
            scratch.dists.push(d);

            if d > tolerance {
                all_inside = false;
            } else if d < -tolerance {
                all_outside = false;
            }
        }

        if all_inside {
            return false;
        }
        if all_outside {
            self.vertices.clear();
            self.edge_neighbors.clear();
            return true;
        }

        scratch.vertices.clear();
        scratch.neighbors.clear();

        for i in 0..num_verts {
            let j = (i + 1) % num_verts;

            let d_i = scratch.dists[i];
            let d_j = scratch.dists[j];
            let neighbor = self.edge_neighbors[i];

            let xi = self.vertices[i * 2];
            let yi = self.vertices[i * 2 + 1];
            let xj = self.vertices[j * 2];
            let yj = self.vertices[j * 2 + 1];

            if d_i <= tolerance {
                // V_i is inside
                scratch.vertices.push(xi);
                scratch.vertices.push(yi);

                if d_j <= tolerance {
                    // V_j is inside: Keep edge
                    scratch.neighbors.push(neighbor);
                } else {
                    // V_j is outside: Leaving
                    let t = (d_i / (d_i - d_j)).clamp(0.0, 1.0);
                    // The edge from V_i to I inherits neighbor
                    scratch.neighbors.push(neighbor);

                    scratch.vertices.push(xi + t * (xj - xi));
                    scratch.vertices.push(yi + t * (yj - yi));

                    // The next edge starts at I and runs along the clipping line.
                    scratch.neighbors.push(neighbor_id);
                }
            } else if d_j <= tolerance {
                // V_i is outside, V_j is inside: Entering
                let t = (d_i / (d_i - d_j)).clamp(0.0, 1.0);

                scratch.vertices.push(xi + t * (xj - xi));
                scratch.vertices.push(yi + t * (yj - yi));

                // The edge from I to V_j inherits neighbor
                scratch.neighbors.push(neighbor);
            }
            // Else both outside: Skip
        }

        std::mem::swap(&mut self.vertices, &mut scratch.vertices);
        std::mem::swap(&mut self.edge_neighbors, &mut scratch.neighbors);
        true
    }

    /// Bring the polygon into canonical form: merge runs of vertices closer
    /// than `tolerance`, collapse to empty below 3 distinct vertices, and
    /// rotate so the lexicographically smallest vertex (x, then y) comes
    /// first. Recomputing a diagram on identical input therefore reproduces
    /// identical cells.
    pub(crate) fn canonicalize(&mut self, tolerance: f64) {
        let n = self.vertices.len() / 2;
        if n == 0 {
            return;
        }

        let tol_sq = tolerance * tolerance;
        let mut verts: Vec<f64> = Vec::with_capacity(self.vertices.len());
        let mut edges: Vec<i32> = Vec::with_capacity(self.edge_neighbors.len());

        for i in 0..n {
            let x = self.vertices[i * 2];
            let y = self.vertices[i * 2 + 1];
            if !verts.is_empty() {
                let lx = verts[verts.len() - 2];
                let ly = verts[verts.len() - 1];
                let dx = x - lx;
                let dy = y - ly;
                if dx * dx + dy * dy <= tol_sq {
                    // Collapsed onto the previous vertex: the zero-length edge
                    // vanishes and the kept vertex takes over the outgoing edge.
                    let last = edges.len() - 1;
                    edges[last] = self.edge_neighbors[i];
                    continue;
                }
            }
            verts.push(x);
            verts.push(y);
            edges.push(self.edge_neighbors[i]);
        }

        // Wrap-around duplicate between last and first vertex.
        if verts.len() >= 4 {
            let m = verts.len() / 2;
            let dx = verts[0] - verts[(m - 1) * 2];
            let dy = verts[1] - verts[(m - 1) * 2 + 1];
            if dx * dx + dy * dy <= tol_sq {
                verts.truncate((m - 1) * 2);
                edges.truncate(m - 1);
            }
        }

        if verts.len() < 6 {
            self.vertices.clear();
            self.edge_neighbors.clear();
            return;
        }

        // Lexicographic minimum with the x comparison widened by the
        // tolerance, so clip noise on the last few ulps cannot flip which of
        // two nearly x-equal vertices leads. The winner depends only on the
        // vertex set, not its current rotation, keeping this idempotent.
        let m = verts.len() / 2;
        let mut x_min = f64::INFINITY;
        for i in 0..m {
            x_min = x_min.min(verts[i * 2]);
        }
        let mut start = 0;
        let mut best_y = f64::INFINITY;
        for i in 0..m {
            if verts[i * 2] <= x_min + tolerance && verts[i * 2 + 1] < best_y {
                best_y = verts[i * 2 + 1];
                start = i;
            }
        }

        if start != 0 {
            let mut rotated_verts = Vec::with_capacity(verts.len());
            let mut rotated_edges = Vec::with_capacity(edges.len());
            for k in 0..m {
                let i = (start + k) % m;
                rotated_verts.push(verts[i * 2]);
                rotated_verts.push(verts[i * 2 + 1]);
                rotated_edges.push(edges[i]);
            }
            verts = rotated_verts;
            edges = rotated_edges;
        }

        self.vertices = verts;
        self.edge_neighbors = edges;
    }
}
