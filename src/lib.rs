//! # voroplane
//!
//! `voroplane` is a Rust library for additively weighted (power) Voronoi
//! tessellations of the plane. Each site carries a weight entering the power
//! distance `|x - p|^2 - w`; the bisector between two sites is then a
//! straight line displaced from the segment midpoint, and every cell is a
//! convex polygon obtained by half-plane clipping.
//!
//! ## Features
//!
//! - **Bounded cells only**: regions that extend to infinity are detected
//!   via the clipping frame and omitted, never truncated.
//! - **Per-site failure isolation**: a coincident site pair invalidates the
//!   two cells involved, not the whole diagram.
//! - **Parallel**: cells are computed concurrently with `rayon` from an
//!   immutable site snapshot.
//! - **Window filtering**: a full-containment test against an axis-aligned
//!   window, reusing the same clipping kernel.
//!
//! ## Example
//!
//! ```
//! use voroplane::{Site, Tessellation};
//!
//! let sites = vec![
//!     Site::new(0.0, 0.0, 0.2),
//!     Site::new(1.0, 0.0, 0.0),
//!     Site::new(-1.0, 0.0, 0.0),
//!     Site::new(0.0, 1.0, 0.0),
//!     Site::new(0.0, -1.0, 0.0),
//! ];
//! let diagram = Tessellation::new(sites).calculate();
//!
//! // Only the surrounded center site has a bounded cell.
//! assert_eq!(diagram.count_cells(), 1);
//! let cell = diagram.cell_for_site(0).unwrap();
//! assert!(cell.area() > 0.0);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Tessellation`] struct, which snapshots
//! the sites and derives a [`Diagram`] of bounded [`Cell`]s. The
//! [`fully_contained`] filter reduces a cell list to those inside a window.

mod bisector;
mod bounds;
mod cell;
mod error;
mod site;
mod tessellation;
mod window;

pub use bisector::HalfPlane;
pub use bounds::BOX_ID_BOTTOM;
pub use bounds::BOX_ID_LEFT;
pub use bounds::BOX_ID_RIGHT;
pub use bounds::BOX_ID_TOP;
pub use bounds::BoundingBox;
pub use bounds::box_side;
pub use cell::Cell;
pub use error::VoronoiError;
pub use site::Site;
pub use tessellation::DEFAULT_TOLERANCE;
pub use tessellation::Diagram;
pub use tessellation::SiteFailure;
pub use tessellation::Tessellation;
pub use window::fully_contained;
pub use window::is_fully_contained;
