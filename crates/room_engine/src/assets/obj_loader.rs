//! OBJ file loader for 3D models
//!
//! Parsing is delegated to `tobj`; this module flattens all shapes of a file
//! into one indexed vertex list in the [`VertexNormTanTex`] format and
//! derives the per-vertex tangents the lighting shaders expect.

use std::io::BufRead;
use std::path::Path;

use crate::assets::AssetError;
use crate::foundation::math::{Vec2, Vec3};
use crate::render::vertex::VertexNormTanTex;

/// CPU-side indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Interleaved vertices
    pub vertices: Vec<VertexNormTanTex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// OBJ loading entry points
pub struct ObjLoader;

impl ObjLoader {
    fn options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        }
    }

    /// Load an OBJ file
    ///
    /// `flip_uv` maps `v` to `1 - v`, for files authored with a top-left
    /// texture origin.
    pub fn load_obj<P: AsRef<Path>>(path: P, flip_uv: bool) -> Result<MeshData, AssetError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &Self::options()).map_err(|source| AssetError::Obj {
            path: path.to_path_buf(),
            source,
        })?;

        let mesh = Self::flatten(models.iter().map(|model| &model.mesh), flip_uv);
        if mesh.indices.is_empty() {
            return Err(AssetError::EmptyModel(path.to_path_buf()));
        }

        log::info!(
            "Loaded model {:?}: {} vertices, {} triangles",
            path,
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parse OBJ text from a reader; material libraries are not followed
    pub fn parse_obj<R: BufRead>(reader: &mut R, flip_uv: bool) -> Result<MeshData, AssetError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &Self::options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|source| AssetError::Obj {
            path: "<memory>".into(),
            source,
        })?;

        Ok(Self::flatten(models.iter().map(|model| &model.mesh), flip_uv))
    }

    fn flatten<'a>(meshes: impl Iterator<Item = &'a tobj::Mesh>, flip_uv: bool) -> MeshData {
        let mut out = MeshData::default();

        for mesh in meshes {
            let base = out.vertices.len() as u32;
            let vertex_count = mesh.positions.len() / 3;
            let has_normals = mesh.normals.len() == mesh.positions.len();
            let has_uvs = mesh.texcoords.len() / 2 == vertex_count;

            for i in 0..vertex_count {
                let normal = if has_normals {
                    [mesh.normals[3 * i], mesh.normals[3 * i + 1], mesh.normals[3 * i + 2]]
                } else {
                    [0.0; 3]
                };
                let tex_coord = if has_uvs {
                    let v = mesh.texcoords[2 * i + 1];
                    [mesh.texcoords[2 * i], if flip_uv { 1.0 - v } else { v }]
                } else {
                    [0.0; 2]
                };

                out.vertices.push(VertexNormTanTex {
                    position: [mesh.positions[3 * i], mesh.positions[3 * i + 1], mesh.positions[3 * i + 2]],
                    normal,
                    tangent: [0.0; 3],
                    tex_coord,
                });
            }

            let first_index = out.indices.len();
            out.indices.extend(mesh.indices.iter().map(|index| base + index));

            if !has_normals {
                compute_normals(&mut out.vertices, &out.indices[first_index..]);
            }
        }

        compute_tangents(&mut out.vertices, &out.indices);
        out
    }
}

fn corner(vertices: &[VertexNormTanTex], index: u32) -> (Vec3, Vec2) {
    let v = &vertices[index as usize];
    (Vec3::from(v.position), Vec2::from(v.tex_coord))
}

/// Area-weighted smooth normals for meshes without `vn` records
fn compute_normals(vertices: &mut [VertexNormTanTex], indices: &[u32]) {
    let mut accumulated = vec![Vec3::zeros(); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let (p0, _) = corner(vertices, triangle[0]);
        let (p1, _) = corner(vertices, triangle[1]);
        let (p2, _) = corner(vertices, triangle[2]);
        let face = (p1 - p0).cross(&(p2 - p0));
        for &index in triangle {
            accumulated[index as usize] += face;
        }
    }

    for &index in indices {
        let normal = accumulated[index as usize].try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y);
        vertices[index as usize].normal = normal.into();
    }
}

/// Per-vertex tangents along +U, orthogonalized against the normal
pub fn compute_tangents(vertices: &mut [VertexNormTanTex], indices: &[u32]) {
    let mut accumulated = vec![Vec3::zeros(); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let (p0, uv0) = corner(vertices, triangle[0]);
        let (p1, uv1) = corner(vertices, triangle[1]);
        let (p2, uv2) = corner(vertices, triangle[2]);

        let (edge1, edge2) = (p1 - p0, p2 - p0);
        let (duv1, duv2) = (uv1 - uv0, uv2 - uv0);
        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < f32::EPSILON {
            continue;
        }

        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;
        for &index in triangle {
            accumulated[index as usize] += tangent;
        }
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let normal = Vec3::from(vertex.normal);
        let tangent = (tangent - normal * normal.dot(&tangent))
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| any_perpendicular(normal));
        vertex.tangent = tangent.into();
    }
}

fn any_perpendicular(normal: Vec3) -> Vec3 {
    let helper = if normal.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
    helper
        .cross(&normal)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vec3::x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const TRIANGLE: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn test_parse_single_triangle() {
        let mesh = ObjLoader::parse_obj(&mut Cursor::new(TRIANGLE), false).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices[1].tex_coord, [1.0, 0.0]);
    }

    #[test]
    fn test_tangent_follows_u() {
        let mesh = ObjLoader::parse_obj(&mut Cursor::new(TRIANGLE), false).unwrap();
        for vertex in &mesh.vertices {
            assert_relative_eq!(Vec3::from(vertex.tangent), Vec3::x(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_flip_uv_inverts_v() {
        let mesh = ObjLoader::parse_obj(&mut Cursor::new(TRIANGLE), true).unwrap();
        assert_eq!(mesh.vertices[0].tex_coord, [0.0, 1.0]);
        assert_eq!(mesh.vertices[2].tex_coord, [0.0, 0.0]);
        assert_relative_eq!(Vec3::from(mesh.vertices[0].tangent), Vec3::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_missing_normals_are_generated() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = ObjLoader::parse_obj(&mut Cursor::new(src), false).unwrap();
        for vertex in &mesh.vertices {
            assert_relative_eq!(Vec3::from(vertex.normal), Vec3::z(), epsilon = 1e-6);
            assert_relative_eq!(Vec3::from(vertex.tangent).dot(&Vec3::z()), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_quads_are_triangulated() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = ObjLoader::parse_obj(&mut Cursor::new(src), false).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            ObjLoader::load_obj("no/such/model.obj", false),
            Err(AssetError::Obj { .. })
        ));
    }
}
