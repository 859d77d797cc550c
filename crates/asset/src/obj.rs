//! Group-aware OBJ document parser.
//!
//! Supported directives: `mtllib`, `o`, `g`, `usemtl`, `v`, `vt`, `vn`, `f`
//! (triangles only) and `s`. Every directive takes an exact number of
//! arguments; anything else on the first token is skipped.
//!
//! Face indices are kept exactly as written (1-based, `0` = field omitted).
//! Converting them for GPU use is left to [`crate::mesh`].

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use thiserror::Error;

use crate::error::{ObjError, ObjResult};

/// One corner of a face: raw position/uv/normal indices, `0` when absent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct VertexRef {
    pub vertex: u64,
    pub uv: u64,
    pub normal: u64,
}

impl VertexRef {
    pub const fn new(vertex: u64, uv: u64, normal: u64) -> Self {
        Self { vertex, uv, normal }
    }
}

/// Face corner field that is not a plain unsigned decimal number.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invalid index field '{0}'")]
pub struct InvalidIndex(pub String);

fn parse_index(field: &str) -> Result<u64, InvalidIndex> {
    // No sign prefix: `+1` and `-1` are both rejected.
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidIndex(field.to_owned()));
    }
    field
        .parse::<u64>()
        .map_err(|_| InvalidIndex(field.to_owned()))
}

impl FromStr for VertexRef {
    type Err = InvalidIndex;

    /// Parses `v`, `v/vt`, `v//vn` or `v/vt/vn`. Fields past the third are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split('/');
        let mut next = || match fields.next() {
            Some(field) if !field.is_empty() => parse_index(field),
            _ => Ok(0),
        };
        let vertex = next()?;
        let uv = next()?;
        let normal = next()?;
        Ok(Self { vertex, uv, normal })
    }
}

/// Triangle.
pub type Face = [VertexRef; 3];

/// Faces from `start_face` onwards (until the next range) use `material`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MaterialRange {
    pub start_face: u64,
    pub material: String,
}

/// Named partition of the document with its own coordinate lists and faces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjGroup {
    pub name: String,
    pub material_ranges: Vec<MaterialRange>,
    pub vertices: Vec<[f64; 3]>,
    pub uvs: Vec<[f64; 2]>,
    pub normals: Vec<[f64; 3]>,
    pub faces: Vec<Face>,
    /// `0` means flat shading.
    pub smoothing_group: i64,
}

impl ObjGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Fully parsed OBJ file.
///
/// Groups are kept in the order they were first declared. Data that appears
/// before any `g` directive lands in a group named `""`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjDocument {
    pub name: Option<String>,
    pub material_lib: Option<String>,
    pub groups: Vec<ObjGroup>,
}

impl ObjDocument {
    pub fn group(&self, name: &str) -> Option<&ObjGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn face_count(&self) -> usize {
        self.groups.iter().map(|g| g.faces.len()).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.groups.iter().map(|g| g.vertices.len()).sum()
    }
}

/// Load an OBJ document from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> ObjResult<ObjDocument> {
    let path = path.as_ref();
    log::debug!("Loading OBJ document from {}", path.display());
    let file = File::open(path)?;
    parse_obj(BufReader::new(file))
}

/// Convenience helper to parse an OBJ string literal.
pub fn parse_obj_str(contents: &str) -> ObjResult<ObjDocument> {
    parse_obj(io::Cursor::new(contents))
}

/// Parse a whole OBJ stream. The first error aborts the parse.
///
/// Lines are decoded lossily: directives are ASCII, so stray non-UTF-8 bytes
/// only matter inside tokens, where they fail the usual number checks.
pub fn parse_obj<R: BufRead>(mut reader: R) -> ObjResult<ObjDocument> {
    let mut builder = DocumentBuilder::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };
        let args: Vec<&str> = tokens.collect();
        builder.apply(line_no, directive, &args)?;
    }

    let doc = builder.finish();
    log::debug!(
        "Parsed OBJ document {:?}: {} group(s), {} vertices, {} faces",
        doc.name.as_deref().unwrap_or(""),
        doc.groups.len(),
        doc.vertex_count(),
        doc.face_count()
    );
    Ok(doc)
}

/// In-progress document plus the index of the group receiving data.
#[derive(Default)]
struct DocumentBuilder {
    doc: ObjDocument,
    current: Option<usize>,
}

impl DocumentBuilder {
    fn apply(&mut self, line: usize, directive: &str, args: &[&str]) -> ObjResult<()> {
        match directive {
            "mtllib" => {
                expect_args(line, directive, args, 1)?;
                self.doc.material_lib = Some(args[0].to_owned());
            }
            "o" => {
                expect_args(line, directive, args, 1)?;
                self.doc.name = Some(args[0].to_owned());
            }
            "g" => {
                expect_args(line, directive, args, 1)?;
                self.start_group(args[0]);
            }
            "usemtl" => {
                expect_args(line, directive, args, 1)?;
                let group = self.current_group();
                let start_face = group.faces.len() as u64;
                group.material_ranges.push(MaterialRange {
                    start_face,
                    material: args[0].to_owned(),
                });
            }
            "v" => {
                expect_args(line, directive, args, 3)?;
                let position = parse_coords(line, args)?;
                self.current_group().vertices.push(position);
            }
            "vt" => {
                expect_args(line, directive, args, 2)?;
                let uv = parse_coords(line, args)?;
                self.current_group().uvs.push(uv);
            }
            "vn" => {
                expect_args(line, directive, args, 3)?;
                let normal = parse_coords(line, args)?;
                self.current_group().normals.push(normal);
            }
            "f" => {
                expect_args(line, directive, args, 3)?;
                let face = parse_face(line, args)?;
                self.current_group().faces.push(face);
            }
            "s" => {
                expect_args(line, directive, args, 1)?;
                let smoothing = args[0].parse::<i64>().map_err(|_| ObjError::NumberFormat {
                    line,
                    token: args[0].to_owned(),
                })?;
                self.current_group().smoothing_group = smoothing;
            }
            other => {
                log::trace!("Ignoring directive '{}' on line {}", other, line);
            }
        }
        Ok(())
    }

    /// Create the group, or clear it in place if it already exists.
    fn start_group(&mut self, name: &str) {
        let idx = match self.doc.groups.iter().position(|g| g.name == name) {
            Some(idx) => {
                self.doc.groups[idx] = ObjGroup::new(name);
                idx
            }
            None => {
                self.doc.groups.push(ObjGroup::new(name));
                self.doc.groups.len() - 1
            }
        };
        self.current = Some(idx);
    }

    fn current_group(&mut self) -> &mut ObjGroup {
        let idx = match self.current {
            Some(idx) => idx,
            None => {
                self.doc.groups.push(ObjGroup::new(""));
                let idx = self.doc.groups.len() - 1;
                self.current = Some(idx);
                idx
            }
        };
        &mut self.doc.groups[idx]
    }

    fn finish(self) -> ObjDocument {
        self.doc
    }
}

fn expect_args(line: usize, directive: &str, args: &[&str], expected: usize) -> ObjResult<()> {
    if args.len() != expected {
        return Err(ObjError::InvalidFormat {
            line,
            directive: directive.to_owned(),
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn parse_coords<const N: usize>(line: usize, args: &[&str]) -> ObjResult<[f64; N]> {
    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = token.parse::<f64>().map_err(|_| ObjError::NumberFormat {
            line,
            token: (*token).to_owned(),
        })?;
    }
    Ok(out)
}

fn parse_face(line: usize, args: &[&str]) -> ObjResult<Face> {
    let mut face = [VertexRef::default(); 3];
    for (corner, token) in face.iter_mut().zip(args) {
        *corner = token.parse().map_err(|_| ObjError::MalformedReference {
            line,
            token: (*token).to_owned(),
        })?;
    }
    Ok(face)
}
