use std::path::PathBuf;

use asset::{MaterialRange, MeshData, ObjError, VertexRef, load_obj_from_path};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn load_two_groups_from_disk() {
    let doc = load_obj_from_path(fixture("two_groups.obj")).expect("load fixture");
    assert_eq!(doc.name.as_deref(), Some("panel"));
    assert_eq!(doc.material_lib.as_deref(), Some("scene.mtl"));
    assert_eq!(doc.group_names().collect::<Vec<_>>(), vec!["front", "back"]);

    let front = doc.group("front").unwrap();
    assert_eq!(front.vertices.len(), 4);
    assert_eq!(front.uvs.len(), 4);
    assert_eq!(front.normals.len(), 1);
    assert_eq!(front.faces.len(), 2);
    assert_eq!(front.smoothing_group, 1);
    assert_eq!(
        front.material_ranges,
        vec![MaterialRange {
            start_face: 0,
            material: "white".into()
        }]
    );

    let back = doc.group("back").unwrap();
    assert_eq!(back.smoothing_group, 0);
    assert_eq!(back.faces[0][0], VertexRef::new(5, 0, 2));

    let mesh = MeshData::from_document(&doc).unwrap();
    assert_eq!(mesh.vertex_count(), 7);
    assert_eq!(mesh.triangle_count(), 3);
    assert_eq!(&mesh.indices[6..], &[4, 6, 5]);
}

#[test]
fn missing_file_is_io_error() {
    let err = load_obj_from_path(fixture("does_not_exist.obj")).unwrap_err();
    assert!(matches!(err, ObjError::Io(_)));
    assert_eq!(err.line(), None);
}
