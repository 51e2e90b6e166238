pub mod aabb;
pub mod contour;
pub mod periodic;
pub mod pline;
pub mod shapes;
pub mod simplex;

pub use aabb::Aabb;
pub use contour::Contour;
pub use periodic::PeriodicGeometry;
pub use pline::{Pline, PlineVertex};
pub use shapes::{Circle, Polygon};
pub use simplex::{CircularArcSimplex, EdgeKind, LineSegmentSimplex, Simplex};
