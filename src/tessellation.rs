use crate::bisector::HalfPlane;
use crate::bounds::BoundingBox;
use crate::cell::{Cell, CellScratch};
use crate::error::VoronoiError;
use crate::site::Site;
use rayon::prelude::*;

/// Default tolerance band around clipping boundaries and for vertex
/// deduplication, in coordinate units. Override it via
/// [`Tessellation::with_tolerance`] for ill-conditioned input (near-coincident
/// sites, extreme weight magnitudes).
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// The clipping frame must exceed the site extent plus the worst bisector
/// displacement by a generous factor, so bisectors of well-separated sites
/// can never land on it.
const FRAME_SAFETY: f64 = 8.0;

/// An additively weighted (power) Voronoi tessellation of the plane.
///
/// Holds an immutable snapshot of the sites plus the numeric tolerance;
/// [`calculate`](Tessellation::calculate) derives the diagram from scratch on
/// every call. Each site's cell is the intersection of the half-planes closer
/// (in power distance) to it than to any other site; only cells with a finite
/// polygonal boundary are reported.
pub struct Tessellation {
    sites: Vec<Site>,
    tolerance: f64,
}

impl Tessellation {
    pub fn new(sites: Vec<Site>) -> Tessellation {
        Tessellation {
            sites,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Tessellation {
        self.tolerance = tolerance;
        self
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Calculates all cells and classifies them.
    ///
    /// Cells are built in parallel; each one depends only on the read-only
    /// site slice, so results are deterministic and collected in site order.
    /// Bounded cells land in [`Diagram::cells`]; empty and unbounded regions
    /// are omitted. A coincident site pair fails only the two cells involved,
    /// which are reported in [`Diagram::failures`] instead.
    pub fn calculate(&self) -> Diagram {
        if self.sites.is_empty() {
            return Diagram {
                cells: Vec::new(),
                failures: Vec::new(),
            };
        }

        let sites = &self.sites;
        let tolerance = self.tolerance;
        let frame = enclosing_frame(sites, tolerance);

        let outcomes: Vec<Result<Option<Cell>, SiteFailure>> = (0..sites.len())
            .into_par_iter()
            .map_init(CellScratch::default, |scratch, i| {
                build_cell(sites, i, frame, tolerance, scratch)
            })
            .collect();

        let mut cells = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(Some(cell)) => cells.push(cell),
                Ok(None) => {}
                Err(failure) => failures.push(failure),
            }
        }

        Diagram { cells, failures }
    }

    /// All-or-nothing variant: any per-site failure aborts the whole
    /// computation with the first error, in site order.
    pub fn calculate_strict(&self) -> Result<Vec<Cell>, VoronoiError> {
        let diagram = self.calculate();
        match diagram.failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(diagram.cells),
        }
    }
}

/// Result of one tessellation run: the bounded cells in site order, plus the
/// sites whose cell construction failed.
#[derive(Clone, Debug)]
pub struct Diagram {
    pub(crate) cells: Vec<Cell>,
    pub(crate) failures: Vec<SiteFailure>,
}

impl Diagram {
    /// Bounded, non-empty cells in ascending site order. Sites whose true
    /// region is empty or unbounded contribute nothing, so this can be
    /// shorter than the input.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn count_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn get_cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// The cell belonging to a given site, if it is bounded.
    pub fn cell_for_site(&self, site: usize) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.site() == site)
    }

    /// Per-site construction failures, in ascending site order. Sites absent
    /// from both `cells` and `failures` had an empty or unbounded region.
    pub fn failures(&self) -> &[SiteFailure] {
        &self.failures
    }
}

/// A site whose cell could not be constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteFailure {
    pub site: usize,
    pub error: VoronoiError,
}

fn build_cell(
    sites: &[Site],
    index: usize,
    frame: BoundingBox,
    tolerance: f64,
    scratch: &mut CellScratch,
) -> Result<Option<Cell>, SiteFailure> {
    let mut cell = Cell::frame(index, frame);
    let site = &sites[index];

    for (j, other) in sites.iter().enumerate() {
        if j == index {
            continue;
        }
        let plane = HalfPlane::between(index, site, j, other, tolerance)
            .map_err(|error| SiteFailure { site: index, error })?;
        cell.clip(&plane, j as i32, tolerance, scratch);
        if cell.is_empty() {
            break;
        }
    }

    cell.canonicalize(tolerance);
    if cell.is_empty() || cell.touches_frame() {
        return Ok(None);
    }
    Ok(Some(cell))
}

/// Square frame guaranteed to enclose every bounded cell of the input:
/// centered on the site bounding box, with a half-extent of `FRAME_SAFETY`
/// times the extent diagonal plus the largest weight-induced bisector
/// displacement over all non-coincident pairs. Computed from the actual
/// input, so arbitrary coordinate scales stay correct.
fn enclosing_frame(sites: &[Site], tolerance: f64) -> BoundingBox {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for site in sites {
        for axis in 0..2 {
            min[axis] = min[axis].min(site.position[axis]);
            max[axis] = max[axis].max(site.position[axis]);
        }
    }

    let diameter = ((max[0] - min[0]).powi(2) + (max[1] - min[1]).powi(2)).sqrt();

    let mut max_shift: f64 = 0.0;
    for i in 0..sites.len() {
        for j in (i + 1)..sites.len() {
            let dx = sites[j].position[0] - sites[i].position[0];
            let dy = sites[j].position[1] - sites[i].position[1];
            let dist = (dx * dx + dy * dy).sqrt();
            // Coincident pairs are reported during cell construction.
            if dist <= tolerance {
                continue;
            }
            let shift = (sites[i].weight - sites[j].weight).abs() / (2.0 * dist);
            max_shift = max_shift.max(shift);
        }
    }

    let half = (diameter + max_shift).max(1.0) * FRAME_SAFETY;
    let cx = (min[0] + max[0]) * 0.5;
    let cy = (min[1] + max[1]) * 0.5;

    BoundingBox::new([cx - half, cy - half], [cx + half, cy + half])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_diagram() {
        let diagram = Tessellation::new(Vec::new()).calculate();
        assert_eq!(diagram.count_cells(), 0);
        assert!(diagram.failures().is_empty());
    }

    #[test]
    fn test_single_site_has_no_bounded_cell() {
        let diagram = Tessellation::new(vec![Site::new(0.0, 0.0, 0.0)]).calculate();
        assert_eq!(diagram.count_cells(), 0);
        assert!(diagram.failures().is_empty());
    }

    #[test]
    fn test_frame_encloses_sites_with_margin() {
        let sites = vec![
            Site::new(-3.0, 1.0, 0.0),
            Site::new(5.0, 2.0, 2.0),
            Site::new(0.0, -4.0, -1.0),
        ];
        let frame = enclosing_frame(&sites, DEFAULT_TOLERANCE);
        let diameter = (8.0f64.powi(2) + 6.0f64.powi(2)).sqrt();
        for site in &sites {
            for axis in 0..2 {
                assert!(site.position[axis] - frame.min[axis] > diameter);
                assert!(frame.max[axis] - site.position[axis] > diameter);
            }
        }
    }

    #[test]
    fn test_frame_scales_with_weight_displacement() {
        let near = Tessellation::new(vec![
            Site::new(0.0, 0.0, 0.0),
            Site::new(0.1, 0.0, 50.0),
        ]);
        let frame = enclosing_frame(near.sites(), near.tolerance());
        // shift = 50 / 0.2 = 250, dwarfing the 0.1 extent.
        assert!(frame.max[0] - frame.min[0] > 2.0 * 250.0);
    }

    #[test]
    fn test_with_tolerance_overrides_default() {
        let tess = Tessellation::new(Vec::new()).with_tolerance(1e-6);
        assert_eq!(tess.tolerance(), 1e-6);
    }
}
