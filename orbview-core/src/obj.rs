/// Wavefront OBJ subset parser (`v`, `vt`, `vn`, `f`)
///
/// Produces flat per-corner attribute arrays. Polygonal faces are fan-triangulated
/// around their first reference.
use std::str::FromStr;

use nom::{
    character::complete::{char, i64 as integer},
    combinator::{all_consuming, opt},
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::{Error, MeshParseError, MeshParseErrorKind, Result};
use crate::geometry::Mesh;

/// One recognised line of input
#[derive(Debug, Clone, PartialEq)]
enum Directive {
    Position([f32; 3]),
    TexCoord([f32; 2]),
    Normal([f32; 3]),
    Face(Vec<FaceRef>),
}

/// A face corner: `p[/t][/n]` with raw (unresolved) indices
#[derive(Debug, Clone, Copy, PartialEq)]
struct FaceRef {
    position: i64,
    texcoord: Option<i64>,
    normal: Option<i64>,
}

/// Parse OBJ text into a [`Mesh`]
pub fn parse_obj(text: &str) -> Result<Mesh> {
    let mut parser = ObjParser::new();
    for (index, line) in text.lines().enumerate() {
        parser
            .parse_line(line)
            .map_err(|kind| MeshParseError {
                line: index + 1,
                text: line.to_string(),
                kind,
            })?;
    }
    let mesh = parser.finish();
    log::debug!(
        "parsed OBJ: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

impl FromStr for Mesh {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        parse_obj(text)
    }
}

struct ObjParser {
    // slot 0 of each table is a placeholder so 1-based indices work directly
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    mesh: Mesh,
}

impl ObjParser {
    fn new() -> Self {
        Self {
            positions: vec![[0.0; 3]],
            texcoords: vec![[0.0; 2]],
            normals: vec![[0.0; 3]],
            mesh: Mesh::new(),
        }
    }

    fn parse_line(&mut self, line: &str) -> std::result::Result<(), MeshParseErrorKind> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let mut parts = line.split_whitespace();
        let keyword = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match parse_directive(keyword, &args)? {
            Some(directive) => self.apply(directive),
            None => {
                log::trace!("ignoring OBJ directive '{}'", keyword);
                Ok(())
            }
        }
    }

    fn apply(&mut self, directive: Directive) -> std::result::Result<(), MeshParseErrorKind> {
        match directive {
            Directive::Position(p) => self.positions.push(p),
            Directive::TexCoord(t) => self.texcoords.push(t),
            Directive::Normal(n) => self.normals.push(n),
            Directive::Face(refs) => {
                for tri in 1..refs.len() - 1 {
                    for corner in [refs[0], refs[tri], refs[tri + 1]] {
                        self.emit(corner)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn emit(&mut self, corner: FaceRef) -> std::result::Result<(), MeshParseErrorKind> {
        let p = self.positions[resolve("position", corner.position, self.positions.len())?];
        let t = corner
            .texcoord
            .map(|raw| resolve("texcoord", raw, self.texcoords.len()).map(|i| self.texcoords[i]))
            .transpose()?;
        let n = corner
            .normal
            .map(|raw| resolve("normal", raw, self.normals.len()).map(|i| self.normals[i]))
            .transpose()?;

        self.mesh.positions.extend_from_slice(&p);
        if let Some(t) = t {
            self.mesh.texcoords.extend_from_slice(&t);
        }
        if let Some(n) = n {
            self.mesh.normals.extend_from_slice(&n);
        }
        Ok(())
    }

    fn finish(self) -> Mesh {
        self.mesh
    }
}

/// Turn a raw 1-based or negative (relative to end) index into a table slot
fn resolve(
    attribute: &'static str,
    raw: i64,
    len: usize,
) -> std::result::Result<usize, MeshParseErrorKind> {
    let resolved = if raw >= 0 { raw } else { raw + len as i64 };
    if resolved >= 1 && (resolved as usize) < len {
        Ok(resolved as usize)
    } else {
        Err(MeshParseErrorKind::IndexOutOfRange {
            attribute,
            index: raw,
            len,
        })
    }
}

fn parse_directive(
    keyword: &str,
    args: &[&str],
) -> std::result::Result<Option<Directive>, MeshParseErrorKind> {
    let directive = match keyword {
        "v" => {
            // an optional trailing w is accepted and dropped
            let v = parse_floats(args, 3, 4)?;
            Directive::Position([v[0], v[1], v[2]])
        }
        "vn" => {
            let v = parse_floats(args, 3, 3)?;
            Directive::Normal([v[0], v[1], v[2]])
        }
        "vt" => {
            let v = parse_floats(args, 1, 3)?;
            Directive::TexCoord([v[0], v.get(1).copied().unwrap_or(0.0)])
        }
        "f" => {
            if args.len() < 3 {
                return Err(MeshParseErrorKind::TooFewFaceVertices(args.len()));
            }
            let refs = args
                .iter()
                .map(|token| parse_face_ref(token))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Directive::Face(refs)
        }
        _ => return Ok(None),
    };
    Ok(Some(directive))
}

fn parse_floats(
    args: &[&str],
    min: usize,
    max: usize,
) -> std::result::Result<Vec<f32>, MeshParseErrorKind> {
    if args.len() < min || args.len() > max {
        return Err(MeshParseErrorKind::ArgumentCount(args.len()));
    }
    args.iter()
        .map(|token| {
            // nom's float also accepts nan and inf spellings
            match all_consuming(float::<&str, nom::error::Error<&str>>)(*token) {
                Ok((_, value)) if value.is_finite() => Ok(value),
                _ => Err(MeshParseErrorKind::InvalidNumber),
            }
        })
        .collect()
}

fn parse_face_ref(token: &str) -> std::result::Result<FaceRef, MeshParseErrorKind> {
    all_consuming(face_ref)(token)
        .map(|(_, r)| r)
        .map_err(|_| MeshParseErrorKind::InvalidFaceReference(token.to_string()))
}

fn face_ref(input: &str) -> IResult<&str, FaceRef> {
    let (input, position) = integer(input)?;
    let (input, texcoord) = opt(preceded(char('/'), opt(integer)))(input)?;
    let (input, normal) = opt(preceded(char('/'), opt(integer)))(input)?;
    Ok((
        input,
        FaceRef {
            position,
            texcoord: texcoord.flatten(),
            normal: normal.flatten(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_kind(text: &str) -> MeshParseErrorKind {
        match parse_obj(text) {
            Err(Error::MeshParse(err)) => err.kind,
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_triangle() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.positions, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert!(mesh.normals.is_empty());
        assert!(mesh.texcoords.is_empty());
    }

    #[test]
    fn test_pentagon_is_fan_triangulated() {
        let text = "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.triangle_count(), 3);

        let first_x: Vec<f32> = mesh.positions.chunks(3).map(|p| p[0]).collect();
        // (1,2,3) (1,3,4) (1,4,5)
        assert_eq!(first_x, vec![0.0, 1.0, 2.0, 0.0, 2.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_negative_indices_count_from_end() {
        let mesh = parse_obj("v 1 1 1\nv 2 2 2\nf -1 -2 1").unwrap();
        assert_eq!(&mesh.positions[0..3], &[2.0, 2.0, 2.0]);
        assert_eq!(&mesh.positions[3..6], &[1.0, 1.0, 1.0]);
        assert_eq!(&mesh.positions[6..9], &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_full_references() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0 0.5
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.texcoords, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert!(mesh.has_normals());
        assert!(mesh.has_texcoords());
    }

    #[test]
    fn test_missing_components_leave_arrays_ragged() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2 3//-1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.normals.len(), 6);
        assert!(mesh.texcoords.is_empty());
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_comments_blank_lines_and_unknown_directives() {
        let text = concat!(
            "# a comment\n\n   \nmtllib x.mtl\no thing\ns off\n",
            "v 0 0 0\r\nv 1 0 0\nv 0 1 0\nusemtl red\nf 1 2 3",
        );
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_vertex_w_is_dropped() {
        let mesh = parse_obj("v 1 2 3 1\nf 1 1 1").unwrap();
        assert_eq!(&mesh.positions[0..3], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_malformed_number_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1 zero 0\n").unwrap_err();
        match err {
            Error::MeshParse(e) => {
                assert_eq!(e.line, 2);
                assert_eq!(e.text, "v 1 zero 0");
                assert_eq!(e.kind, MeshParseErrorKind::InvalidNumber);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_finite_numbers() {
        let tri = "v 1 0 0\nv 0 1 0\nf 1 2 3";
        for line in ["v nan 0 0", "v inf 0 0", "v 0 -infinity 0", "vn NaN 0 1", "vt 0 inf"] {
            let text = format!("{}\n{}", line, tri);
            assert_eq!(parse_kind(&text), MeshParseErrorKind::InvalidNumber, "{}", line);
        }
    }

    #[test]
    fn test_rejects_bad_arity() {
        assert_eq!(parse_kind("v 1 2"), MeshParseErrorKind::ArgumentCount(2));
        assert_eq!(parse_kind("vn 1 2 3 4"), MeshParseErrorKind::ArgumentCount(4));
        assert_eq!(
            parse_kind("v 0 0 0\nf 1 1"),
            MeshParseErrorKind::TooFewFaceVertices(2)
        );
    }

    #[test]
    fn test_rejects_bad_face_reference() {
        assert_eq!(
            parse_kind("v 0 0 0\nf 1 1 a"),
            MeshParseErrorKind::InvalidFaceReference("a".to_string())
        );
        assert_eq!(
            parse_kind("v 0 0 0\nf 1 1 /1/1"),
            MeshParseErrorKind::InvalidFaceReference("/1/1".to_string())
        );
        assert_eq!(
            parse_kind("v 0 0 0\nf 1 1 1/1/1/1"),
            MeshParseErrorKind::InvalidFaceReference("1/1/1/1".to_string())
        );
    }

    #[test]
    fn test_rejects_out_of_range_indices() {
        assert_eq!(
            parse_kind("v 0 0 0\nf 1 1 2"),
            MeshParseErrorKind::IndexOutOfRange {
                attribute: "position",
                index: 2,
                len: 2
            }
        );
        assert_eq!(
            parse_kind("v 0 0 0\nf 1 1 0"),
            MeshParseErrorKind::IndexOutOfRange {
                attribute: "position",
                index: 0,
                len: 2
            }
        );
        assert_eq!(
            parse_kind("v 0 0 0\nf -2 1 1"),
            MeshParseErrorKind::IndexOutOfRange {
                attribute: "position",
                index: -2,
                len: 2
            }
        );
        assert!(matches!(
            parse_kind("v 0 0 0\nf 1//1 1 1"),
            MeshParseErrorKind::IndexOutOfRange { attribute: "normal", .. }
        ));
    }

    #[test]
    fn test_from_str() {
        let mesh: Mesh = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 3 2 1".parse().unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }
}
