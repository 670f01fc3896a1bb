/// Base geometry of the displayed mesh
use nalgebra::Point3;

use crate::error::GeometryError;

/// A point of the base mesh
pub type Vertex = Point3<f32>;

/// A planar quadrilateral, given as four indices into the vertex list
pub type Face = [usize; 4];

const LETTER_K_VERTICES: [[f32; 3]; 20] = [
    [1.0, 1.0, 0.0],
    [1.0, 6.0, 0.0],
    [2.0, 1.0, 0.0],
    [2.0, 6.0, 0.0],
    [2.0, 3.0, 0.0],
    [2.0, 4.0, 0.0],
    [4.0, 1.0, 0.0],
    [5.0, 1.0, 0.0],
    [4.0, 6.0, 0.0],
    [5.0, 6.0, 0.0],
    [1.0, 1.0, 1.0],
    [1.0, 6.0, 1.0],
    [2.0, 1.0, 1.0],
    [2.0, 6.0, 1.0],
    [2.0, 3.0, 1.0],
    [2.0, 4.0, 1.0],
    [4.0, 1.0, 1.0],
    [5.0, 1.0, 1.0],
    [4.0, 6.0, 1.0],
    [5.0, 6.0, 1.0],
];

const LETTER_K_FACES: [Face; 17] = [
    [0, 1, 3, 2],
    [4, 5, 7, 6],
    [5, 4, 9, 8],
    [10, 11, 13, 12],
    [14, 15, 17, 16],
    [15, 14, 19, 18],
    [0, 10, 11, 1],
    [1, 3, 11, 13],
    [13, 3, 5, 15],
    [5, 15, 18, 8],
    [8, 18, 19, 9],
    [19, 9, 4, 14],
    [5, 15, 17, 7],
    [7, 17, 16, 6],
    [16, 6, 4, 14],
    [14, 4, 2, 12],
    [12, 2, 0, 10],
];

/// Immutable vertex and face data.
///
/// Every face index is checked against the vertex list on construction, so
/// code holding a `BaseMesh` can index vertices through its faces freely.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl BaseMesh {
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Result<Self, GeometryError> {
        let vertex_count = vertices.len();
        for (face_idx, face) in faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i >= vertex_count) {
                return Err(GeometryError::FaceIndexOutOfRange {
                    face: face_idx,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// The block letter "K": 20 vertices over two layers (z = 0 and z = 1)
    /// and 17 quadrilateral faces.
    pub fn letter_k() -> Result<Self, GeometryError> {
        let vertices = LETTER_K_VERTICES
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();
        Self::new(vertices, LETTER_K_FACES.to_vec())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Resolve a face against an arbitrary vertex slice with the same
    /// indexing as the base vertices (e.g. a transformed copy).
    pub fn face_vertices<'a>(
        &'a self,
        face: usize,
        vertices: &'a [Vertex],
    ) -> impl Iterator<Item = Vertex> + 'a {
        self.faces[face].iter().map(move |&i| vertices[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_k_counts() {
        let mesh = BaseMesh::letter_k().unwrap();
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.face_count(), 17);
        assert_eq!(mesh.vertices()[0], Point3::new(1.0, 1.0, 0.0));
        assert_eq!(mesh.vertices()[19], Point3::new(5.0, 6.0, 1.0));
    }

    #[test]
    fn test_rejects_out_of_range_face() {
        let vertices = vec![Point3::origin(); 4];
        let result = BaseMesh::new(vertices, vec![[0, 1, 2, 3], [0, 1, 4, 2]]);
        assert_eq!(
            result,
            Err(GeometryError::FaceIndexOutOfRange {
                face: 1,
                index: 4,
                vertex_count: 4,
            })
        );
    }

    #[test]
    fn test_face_vertices_follow_indices() {
        let mesh = BaseMesh::letter_k().unwrap();
        let corners: Vec<_> = mesh.face_vertices(0, mesh.vertices()).collect();
        assert_eq!(
            corners,
            vec![
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, 6.0, 0.0),
                Point3::new(2.0, 6.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ]
        );
    }
}
