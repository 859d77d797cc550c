//! Asset loading: OBJ mesh documents and their flattened CPU-side buffers.
//! D1: group-aware OBJ document parser with typed errors.
//! D2: flattening into position/index buffers for upload.

pub mod error;
pub mod mesh;
pub mod obj;

pub use error::{ObjError, ObjResult};
pub use mesh::MeshData;
pub use obj::{
    Face, InvalidIndex, MaterialRange, ObjDocument, ObjGroup, VertexRef, load_obj_from_path, parse_obj,
    parse_obj_str,
};
