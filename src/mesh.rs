//! Wavefront OBJ loading.
//!
//! Only the geometry records are read:
//!
//! ```text
//! v  x y z                 vertex position
//! vt u v                   texture coordinate
//! vn x y z                 vertex normal
//! f  a[/b][/c] ×3          triangle, 1-based indices into v / vt / vn
//! ```
//!
//! Everything else (`o`, `g`, `s`, `usemtl`, comments, ...) is skipped.
//! Attribute records may appear anywhere in the file; faces are resolved only
//! after the whole text has been scanned. Negative indices count back from the
//! end of the respective list.

use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::math::{Vec2, Vec3};
use crate::triangle::Triangle;

/// One `a/b/c` reference of a face record. Indices are as written in the file.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FaceRef {
    position: i64,
    tex_coord: Option<i64>,
    normal: Option<i64>,
}

#[derive(Default)]
struct ObjData {
    positions: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
    faces: Vec<[FaceRef; 3]>,
}

/// Parse OBJ text into one [`Triangle`] per face record, in file order.
///
/// Fails with [`Error::Parse`] on malformed records and with
/// [`Error::IndexOutOfRange`] when a face refers to a missing vertex, texture
/// coordinate or normal.
pub fn load_obj(text: &str) -> Result<Vec<Triangle>> {
    let data = parse(text)?;
    debug!(
        "parsed OBJ: {} positions, {} texcoords, {} normals, {} faces",
        data.positions.len(),
        data.tex_coords.len(),
        data.normals.len(),
        data.faces.len()
    );

    data.faces
        .iter()
        .map(|refs| -> Result<Triangle> {
            let mut t = Triangle::new();
            for (i, r) in refs.iter().enumerate() {
                t.set_vertex(i, *lookup(&data.positions, r.position, "vertex")?);
                if let Some(vt) = r.tex_coord {
                    let uv = lookup(&data.tex_coords, vt, "texture coordinate")?;
                    t.set_tex_coord(i, uv.x, uv.y);
                }
                if let Some(vn) = r.normal {
                    t.set_normal(i, *lookup(&data.normals, vn, "normal")?);
                }
            }
            Ok(t)
        })
        .collect()
}

/// Read and parse an OBJ file from disk.
pub fn load_obj_file<P: AsRef<Path>>(path: P) -> Result<Vec<Triangle>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    debug!("loading mesh from {}", path.as_ref().display());
    load_obj(&text)
}

fn parse(text: &str) -> Result<ObjData> {
    let mut data = ObjData::default();

    for (n, raw) in text.lines().enumerate() {
        let line = n + 1;
        let mut fields = raw.split_whitespace();
        match fields.next() {
            Some("v") => {
                let [x, y, z] = numbers::<3>(&mut fields, line, "v")?;
                data.positions.push(Vec3::new(x, y, z));
            }
            Some("vt") => {
                let [u, v] = numbers::<2>(&mut fields, line, "vt")?;
                data.tex_coords.push(Vec2::new(u, v));
            }
            Some("vn") => {
                let [x, y, z] = numbers::<3>(&mut fields, line, "vn")?;
                data.normals.push(Vec3::new(x, y, z));
            }
            Some("f") => {
                let refs: Vec<FaceRef> = fields
                    .map(|field| face_ref(field, line))
                    .collect::<Result<_>>()?;
                if refs.len() > 3 {
                    warn!(
                        "line {}: face has {} vertices, only the first three are used",
                        line,
                        refs.len()
                    );
                }
                let refs: [FaceRef; 3] = match refs.get(..3) {
                    Some(&[a, b, c]) => [a, b, c],
                    _ => {
                        return Err(Error::Parse {
                            line,
                            message: format!("face needs 3 vertices, got {}", refs.len()),
                        })
                    }
                };
                data.faces.push(refs);
            }
            _ => {}
        }
    }

    Ok(data)
}

/// Parse the next `N` whitespace-separated floats. Extra fields (such as the
/// optional `w` of a `v` record) are ignored.
fn numbers<'a, const N: usize>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    record: &str,
) -> Result<[f64; N]> {
    let mut out = [0.0; N];
    for value in out.iter_mut() {
        let field = fields.next().ok_or_else(|| Error::Parse {
            line,
            message: format!("`{}` record needs {} components", record, N),
        })?;
        *value = field.parse().map_err(|_| Error::Parse {
            line,
            message: format!("invalid number `{}`", field),
        })?;
    }
    Ok(out)
}

fn face_ref(field: &str, line: usize) -> Result<FaceRef> {
    let mut parts = field.split('/');
    let mut index = |required: bool| -> Result<Option<i64>> {
        match parts.next() {
            None | Some("") if !required => Ok(None),
            Some(s) => s.parse().map(Some).map_err(|_| Error::Parse {
                line,
                message: format!("invalid face index `{}` in `{}`", s, field),
            }),
            None => Err(Error::Parse {
                line,
                message: format!("empty face reference `{}`", field),
            }),
        }
    };

    let position = index(true)?.unwrap_or_default();
    let tex_coord = index(false)?;
    let normal = index(false)?;
    Ok(FaceRef {
        position,
        tex_coord,
        normal,
    })
}

/// Resolve a 1-based (or negative, relative) OBJ index.
fn lookup<'a, T>(items: &'a [T], index: i64, what: &'static str) -> Result<&'a T> {
    let resolved = match index {
        i if i > 0 => usize::try_from(i - 1).ok(),
        i if i < 0 => usize::try_from(items.len() as i64 + i).ok(),
        _ => None,
    };
    resolved
        .and_then(|i| items.get(i))
        .ok_or(Error::IndexOutOfRange {
            what,
            index,
            len: items.len(),
        })
}
