//! CPU-side mesh buffers built from a parsed OBJ document.

use anyhow::{Result, anyhow, bail};

use crate::obj::ObjDocument;

/// Flat position buffer plus 0-based triangle indices, ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Concatenate the vertices of every group (document order) and turn each
    /// face's 1-based position index into a 0-based index into that buffer.
    ///
    /// UV and normal indices are not used.
    pub fn from_document(doc: &ObjDocument) -> Result<Self> {
        let positions: Vec<[f32; 3]> = doc
            .groups
            .iter()
            .flat_map(|g| g.vertices.iter())
            .map(|v| [v[0] as f32, v[1] as f32, v[2] as f32])
            .collect();

        let mut indices = Vec::with_capacity(doc.face_count() * 3);
        for group in &doc.groups {
            for (face_no, face) in group.faces.iter().enumerate() {
                for corner in face {
                    let idx = resolve_index(corner.vertex, positions.len()).map_err(|e| {
                        anyhow!("Group '{}', face {}: {}", group.name, face_no + 1, e)
                    })?;
                    indices.push(idx);
                }
            }
        }

        let mesh = Self::new(positions, indices);
        if !mesh.is_valid() {
            bail!("OBJ contained no triangles");
        }
        log::debug!(
            "Flattened mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if both position and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.positions.is_empty() && !self.indices.is_empty()
    }
}

fn resolve_index(raw: u64, len: usize) -> Result<u32> {
    if raw == 0 {
        bail!("missing position index");
    }
    let idx = raw - 1;
    if idx >= len as u64 {
        bail!("position index {} out of bounds (len={})", raw, len);
    }
    u32::try_from(idx).map_err(|_| anyhow!("Too many vertices in OBJ (>{})", u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::parse_obj_str;

    #[test]
    fn indices_are_zero_based_across_groups() {
        let src = "\
g a
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
g b
v 0 0 1
f 2/1/1 3 4//2
";
        let doc = parse_obj_str(src).unwrap();
        let mesh = MeshData::from_document(&doc).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 2, 3]);
        assert_eq!(mesh.positions[3], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn parser_output_keeps_raw_indices() {
        let doc = parse_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(doc.groups[0].faces[0][0].vertex, 1);
        let mesh = MeshData::from_document(&doc).unwrap();
        assert_eq!(mesh.indices[0], 0);
    }

    #[test]
    fn missing_or_out_of_range_index_is_rejected() {
        let doc = parse_obj_str("v 0 0 0\nf /1/1 1 1\n").unwrap();
        assert!(MeshData::from_document(&doc).is_err());

        let doc = parse_obj_str("v 0 0 0\nf 1 1 2\n").unwrap();
        let err = MeshData::from_document(&doc).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn document_without_faces_is_invalid() {
        let doc = parse_obj_str("v 0 0 0\n").unwrap();
        assert!(MeshData::from_document(&doc).is_err());
        assert!(!MeshData::default().is_valid());
    }
}
