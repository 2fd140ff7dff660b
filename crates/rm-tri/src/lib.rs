//! Constrained Delaunay triangulation of a [`Pslg`].
//!
//! Wraps [`spade`]'s CDT: boundary edges become constraint edges, the mesh is
//! refined against a [`MeshingDirective`], faces outside the outer boundary
//! are excluded by the refiner, and faces inside hole loops are removed by a
//! flood fill seeded at each hole's interior point.

use core::fmt;
use std::collections::{HashMap, HashSet};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    AngleLimit, ConstrainedDelaunayTriangulation, InsertionError, Point2,
    PositionInTriangulation, RefinementParameters, Triangulation,
};

use rm_core::Point2d;
use rm_pslg::{MeshingDirective, Pslg};

/// Triangle mesh: vertex coordinates plus index triples into `vertices`.
///
/// Only vertices referenced by at least one triangle are retained; indices
/// are compacted and bear no relation to the input PSLG's vertex order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point2d>,
    pub triangles: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Vertex coordinates must be finite; `index` is the PSLG vertex index.
    NonFiniteVertex { index: usize },
    /// The underlying triangulation rejected a vertex.
    Insertion(InsertionError),
    /// Two boundary edges cross; constraint edges must not intersect.
    /// `a` and `b` are the PSLG vertex indices of the offending edge.
    IntersectingConstraint { a: usize, b: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NonFiniteVertex { index } => {
                write!(f, "vertex {index} has non-finite coordinates")
            }
            Error::Insertion(err) => write!(f, "vertex insertion failed: {err:?}"),
            Error::IntersectingConstraint { a, b } => {
                write!(f, "boundary edge ({a}, {b}) intersects another boundary edge")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<InsertionError> for Error {
    fn from(err: InsertionError) -> Self {
        Error::Insertion(err)
    }
}

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// Triangulate a PSLG under the given quality directive.
///
/// An empty PSLG yields an empty mesh. Hole interiors are identified by
/// flood-filling from the face containing each hole point, stopping at
/// constraint edges.
pub fn triangulate(pslg: &Pslg, directive: &MeshingDirective) -> Result<Mesh, Error> {
    if pslg.is_empty() {
        return Ok(Mesh::default());
    }

    let mut cdt = Cdt::new();
    let mut handles = Vec::with_capacity(pslg.vertices.len());
    for (index, v) in pslg.vertices.iter().enumerate() {
        if !v.x.is_finite() || !v.y.is_finite() {
            return Err(Error::NonFiniteVertex { index });
        }
        handles.push(cdt.insert(Point2::new(v.x, v.y))?);
    }

    for &[a, b] in &pslg.edges {
        let (ha, hb) = (handles[a], handles[b]);
        if ha == hb {
            continue;
        }
        if !cdt.can_add_constraint(ha, hb) {
            return Err(Error::IntersectingConstraint { a, b });
        }
        cdt.add_constraint(ha, hb);
    }

    let mut params = RefinementParameters::<f64>::new()
        .with_angle_limit(AngleLimit::from_deg(directive.min_angle_deg))
        .exclude_outer_faces(true);
    if let Some(area) = directive.max_area {
        params = params.with_max_allowed_area(area);
    }
    let refinement = cdt.refine(params);

    let mut dropped: HashSet<FixedFaceHandle<InnerTag>> =
        refinement.excluded_faces.iter().copied().collect();
    for hp in &pslg.hole_points {
        match cdt.locate(Point2::new(hp.x, hp.y)) {
            PositionInTriangulation::OnFace(seed) => flood_fill(&cdt, seed, &mut dropped),
            // A hole point can land exactly on a triangulation edge; both
            // sides belong to the hole unless the edge is a boundary
            // constraint.
            PositionInTriangulation::OnEdge(edge) => {
                if !cdt.is_constraint_edge(edge.as_undirected()) {
                    let handle = cdt.directed_edge(edge);
                    let seeds = [
                        handle.face().as_inner().map(|f| f.fix()),
                        handle.rev().face().as_inner().map(|f| f.fix()),
                    ];
                    for seed in seeds.into_iter().flatten() {
                        flood_fill(&cdt, seed, &mut dropped);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(collect_mesh(&cdt, &dropped))
}

/// Mark `seed` and every inner face reachable from it without crossing a
/// constraint edge.
fn flood_fill(cdt: &Cdt, seed: FixedFaceHandle<InnerTag>, dropped: &mut HashSet<FixedFaceHandle<InnerTag>>) {
    let mut stack = vec![seed];
    while let Some(fixed) = stack.pop() {
        if !dropped.insert(fixed) {
            continue;
        }
        let face = cdt.face(fixed);
        for edge in face.adjacent_edges() {
            if cdt.is_constraint_edge(edge.fix().as_undirected()) {
                continue;
            }
            if let Some(neighbor) = edge.rev().face().as_inner() {
                if !dropped.contains(&neighbor.fix()) {
                    stack.push(neighbor.fix());
                }
            }
        }
    }
}

fn collect_mesh(cdt: &Cdt, dropped: &HashSet<FixedFaceHandle<InnerTag>>) -> Mesh {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut mesh = Mesh::default();
    for face in cdt.inner_faces() {
        if dropped.contains(&face.fix()) {
            continue;
        }
        let tri = face.vertices().map(|v| {
            let raw = v.fix().index();
            *remap.entry(raw).or_insert_with(|| {
                let pos = v.position();
                mesh.vertices.push(Point2d::new(pos.x, pos.y));
                mesh.vertices.len() - 1
            })
        });
        mesh.triangles.push(tri);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use rm_core::Point2d;
    use rm_poly::point_in_polygon;
    use rm_pslg::{MeshingDirective, Pslg, default_directive};

    use super::{Error, triangulate};

    fn square_pslg(lo: f64, hi: f64) -> Pslg {
        Pslg {
            vertices: vec![
                Point2d::new(lo, lo),
                Point2d::new(hi, lo),
                Point2d::new(hi, hi),
                Point2d::new(lo, hi),
            ],
            edges: vec![[0, 1], [1, 2], [2, 3], [3, 0]],
            hole_points: Vec::new(),
        }
    }

    fn annulus_pslg() -> Pslg {
        let mut pslg = square_pslg(0.0, 10.0);
        let base = pslg.vertices.len();
        pslg.vertices.extend([
            Point2d::new(3.0, 3.0),
            Point2d::new(7.0, 3.0),
            Point2d::new(7.0, 7.0),
            Point2d::new(3.0, 7.0),
        ]);
        pslg.edges.extend([
            [base, base + 1],
            [base + 1, base + 2],
            [base + 2, base + 3],
            [base + 3, base],
        ]);
        pslg.hole_points.push(Point2d::new(5.0, 5.0));
        pslg
    }

    fn centroid(mesh: &super::Mesh, tri: [usize; 3]) -> Point2d {
        let [a, b, c] = tri.map(|i| mesh.vertices[i]);
        Point2d::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    #[test]
    fn empty_pslg_yields_empty_mesh() {
        let mesh = triangulate(&Pslg::default(), &MeshingDirective::default()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn square_meshes_with_valid_indices() {
        let pslg = square_pslg(0.0, 4.0);
        let directive = default_directive(&pslg).unwrap();
        let mesh = triangulate(&pslg, &directive).unwrap();
        assert!(!mesh.is_empty());
        for tri in &mesh.triangles {
            for &i in tri {
                assert!(i < mesh.vertices.len());
            }
        }
        // Every centroid lies inside the square.
        let square: Vec<Point2d> = pslg.vertices.clone();
        for &tri in &mesh.triangles {
            assert!(point_in_polygon(&square, centroid(&mesh, tri)));
        }
    }

    #[test]
    fn refinement_respects_area_constraint() {
        let pslg = square_pslg(0.0, 8.0);
        let coarse = triangulate(&pslg, &MeshingDirective::default()).unwrap();
        let directive = MeshingDirective {
            max_area: Some(0.5),
            ..MeshingDirective::default()
        };
        let fine = triangulate(&pslg, &directive).unwrap();
        assert!(fine.triangles.len() > coarse.triangles.len());
    }

    #[test]
    fn annulus_hole_is_carved_out() {
        let pslg = annulus_pslg();
        let directive = default_directive(&pslg).unwrap();
        let mesh = triangulate(&pslg, &directive).unwrap();
        assert!(!mesh.is_empty());
        let hole: Vec<Point2d> = pslg.vertices[4..8].to_vec();
        for &tri in &mesh.triangles {
            assert!(!point_in_polygon(&hole, centroid(&mesh, tri)));
        }
    }

    #[test]
    fn hole_point_on_a_triangulation_edge_still_carves() {
        // A square whose entire interior is a hole: with no refinement the
        // CDT is two triangles and the center sits exactly on the shared
        // diagonal.
        let mut pslg = square_pslg(0.0, 2.0);
        pslg.hole_points.push(Point2d::new(1.0, 1.0));
        let directive = MeshingDirective {
            min_angle_deg: 0.0,
            max_area: None,
            quiet: true,
        };

        let mesh = triangulate(&pslg, &directive).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let mut pslg = square_pslg(0.0, 1.0);
        pslg.vertices[2] = Point2d::new(f64::NAN, 1.0);
        let err = triangulate(&pslg, &MeshingDirective::default()).unwrap_err();
        assert_eq!(err, Error::NonFiniteVertex { index: 2 });
    }

    #[test]
    fn crossing_constraints_are_rejected() {
        let pslg = Pslg {
            vertices: vec![
                Point2d::new(0.0, 0.0),
                Point2d::new(4.0, 4.0),
                Point2d::new(0.0, 4.0),
                Point2d::new(4.0, 0.0),
            ],
            edges: vec![[0, 1], [2, 3]],
            hole_points: Vec::new(),
        };
        let err = triangulate(&pslg, &MeshingDirective::default()).unwrap_err();
        assert!(matches!(err, Error::IntersectingConstraint { .. }));
    }
}
