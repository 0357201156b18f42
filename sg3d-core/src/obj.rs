/// Wavefront OBJ subset parser: records, fan triangulation, deduplication
use indexmap::IndexMap;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, i64, multispace0, multispace1},
    combinator::{eof, map, opt},
    multi::many1,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::LoadError;

/// Parser output: flat arrays structurally identical to what a mesh
/// needs. Positions are xyz triples, texcoords uv pairs (one per output
/// vertex), indices triangle triples into both.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub positions: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub indices: Vec<u32>,
}

impl ModelData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// One `position[/texcoord[/normal]]` face-vertex reference, 1-based.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FaceRef {
    position: i64,
    texcoord: Option<i64>,
}

#[derive(Debug, PartialEq)]
enum Record {
    Position([f32; 3]),
    TexCoord([f32; 2]),
    Normal([f32; 3]),
    Face(Vec<FaceRef>),
}

/// Parse OBJ text into deduplicated, triangulated model data.
///
/// Faces with N >= 3 references are fan-triangulated around the first
/// reference. Output vertices are deduplicated on the (position index,
/// texcoord index) pair in first-occurrence order, so a position
/// referenced with two different texcoord indices becomes two distinct
/// output vertices. Malformed numeric fields degrade to 0 instead of
/// aborting the parse; a structurally empty result is an error.
pub fn parse_obj(text: &str) -> Result<ModelData, LoadError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();
    let mut faces: Vec<Vec<FaceRef>> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_record(line) {
            Some(Record::Position(p)) => positions.push(p),
            Some(Record::TexCoord(t)) => texcoords.push(t),
            // Normals are parsed for format compatibility but not
            // emitted; the mesh derives its own.
            Some(Record::Normal(_)) => {}
            Some(Record::Face(refs)) => faces.push(refs),
            None => log::trace!("skipping unrecognized OBJ record: {}", line),
        }
    }

    let mut unique: IndexMap<(i64, Option<i64>), u32> = IndexMap::new();
    let mut data = ModelData {
        positions: Vec::new(),
        texcoords: Vec::new(),
        indices: Vec::new(),
    };

    for refs in &faces {
        if refs.len() < 3 {
            log::debug!("ignoring face with {} vertex references", refs.len());
            continue;
        }
        for i in 1..refs.len() - 1 {
            for r in [refs[0], refs[i], refs[i + 1]] {
                let key = (r.position - 1, r.texcoord.map(|t| t - 1));
                let next = unique.len() as u32;
                let index = *unique.entry(key).or_insert_with(|| {
                    let position = usize::try_from(key.0)
                        .ok()
                        .and_then(|p| positions.get(p))
                        .copied()
                        .unwrap_or([0.0; 3]);
                    data.positions.extend_from_slice(&position);

                    let texcoord = key
                        .1
                        .and_then(|t| usize::try_from(t).ok())
                        .and_then(|t| texcoords.get(t))
                        .copied()
                        .unwrap_or([0.0; 2]);
                    data.texcoords.extend_from_slice(&texcoord);
                    next
                });
                data.indices.push(index);
            }
        }
    }

    if data.positions.is_empty() || data.indices.is_empty() {
        return Err(LoadError::EmptyModel);
    }
    Ok(data)
}

fn parse_record(line: &str) -> Option<Record> {
    let result: IResult<&str, Record> = alt((
        texcoord_record,
        normal_record,
        position_record,
        face_record,
    ))(line);
    result.ok().map(|(_, record)| record)
}

/// A record keyword followed by whitespace or end of line, so `v` does
/// not match `vt` or arbitrary words starting with `v`.
fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input| {
        let (input, _) = tag(word)(input)?;
        alt((multispace1, eof))(input)
    }
}

/// A float field; missing or malformed fields default to 0.
fn float_field(input: &str) -> IResult<&str, f32> {
    map(opt(preceded(multispace0, float)), |value| {
        value.unwrap_or(0.0)
    })(input)
}

fn position_record(input: &str) -> IResult<&str, Record> {
    let (input, _) = keyword("v")(input)?;
    let (input, x) = float_field(input)?;
    let (input, y) = float_field(input)?;
    let (input, z) = float_field(input)?;
    Ok((input, Record::Position([x, y, z])))
}

fn texcoord_record(input: &str) -> IResult<&str, Record> {
    let (input, _) = keyword("vt")(input)?;
    let (input, u) = float_field(input)?;
    let (input, v) = float_field(input)?;
    Ok((input, Record::TexCoord([u, v])))
}

fn normal_record(input: &str) -> IResult<&str, Record> {
    let (input, _) = keyword("vn")(input)?;
    let (input, x) = float_field(input)?;
    let (input, y) = float_field(input)?;
    let (input, z) = float_field(input)?;
    Ok((input, Record::Normal([x, y, z])))
}

fn face_record(input: &str) -> IResult<&str, Record> {
    let (input, _) = keyword("f")(input)?;
    let (input, tokens) = many1(face_token)(input)?;
    Ok((input, Record::Face(tokens.iter().map(parse_face_ref).collect())))
}

fn face_token(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, take_while1(|c: char| !c.is_whitespace()))(input)
}

/// Interpret one face-vertex token. A token with no leading integer
/// degrades to reference 0 (which resolves to the zero-defaulted vertex)
/// rather than aborting the parse.
fn parse_face_ref(token: &&str) -> FaceRef {
    let parsed: IResult<&str, FaceRef> = face_ref(token);
    match parsed {
        Ok((_, r)) => r,
        Err(_) => {
            log::debug!("malformed face reference {:?}, defaulting to 0", token);
            FaceRef {
                position: 0,
                texcoord: None,
            }
        }
    }
}

fn face_ref(input: &str) -> IResult<&str, FaceRef> {
    let (input, position) = i64(input)?;
    let (input, texcoord) = opt(preceded(char('/'), opt(i64)))(input)?;
    let (input, _normal) = opt(preceded(char('/'), opt(i64)))(input)?;
    Ok((
        input,
        FaceRef {
            position,
            texcoord: texcoord.flatten(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_fan_triangulation() {
        let data = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        // Two triangles sharing the fan pivot, four unique vertices.
        assert_eq!(data.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.triangle_count(), 2);
        assert_eq!(&data.positions[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&data.positions[9..12], &[0.0, 1.0, 0.0]);
        // No texcoord records: zero pairs, one per output vertex.
        assert_eq!(data.texcoords, vec![0.0; 8]);
    }

    #[test]
    fn test_dedup_splits_on_texcoord_index() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 1
f 1/1 2/1 3/1
f 1/2 2/1 3/1
";
        let data = parse_obj(text).unwrap();
        // Position 1 appears with two texcoord indices: two distinct
        // output vertices sharing position data.
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(&data.positions[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&data.positions[9..12], &[0.0, 0.0, 0.0]);
        assert_eq!(&data.texcoords[0..2], &[0.0, 0.0]);
        assert_eq!(&data.texcoords[6..8], &[1.0, 1.0]);
        // Second face reuses vertices 1 and 2 from the first.
        assert_eq!(data.indices, vec![0, 1, 2, 3, 1, 2]);
    }

    #[test]
    fn test_shared_vertices_are_reused() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
f 1 2 3
f 2 4 3
";
        let data = parse_obj(text).unwrap();
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.indices, vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn test_normals_parsed_but_not_emitted() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
";
        let data = parse_obj(text).unwrap();
        assert_eq!(data.vertex_count(), 3);
        // `1//1` has no texcoord index: zero pair.
        assert_eq!(&data.texcoords[0..2], &[0.0, 0.0]);
    }

    #[test]
    fn test_malformed_fields_default_to_zero() {
        let text = "\
v 1 junk
v 1 0 0
v 0 1 0
f 1 2 3
";
        let data = parse_obj(text).unwrap();
        assert_eq!(&data.positions[0..3], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_reference_defaults() {
        let text = "\
v 1 2 3
f 1 9 1
";
        let data = parse_obj(text).unwrap();
        // Reference 9 has no position record: zero-defaulted vertex.
        assert_eq!(data.vertex_count(), 2);
        assert_eq!(&data.positions[3..6], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_records_skipped() {
        let text = "\
# comment
o object
v 0 0 0
v 1 0 0
v 0 1 0
s off
f 1 2 3
";
        let data = parse_obj(text).unwrap();
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.triangle_count(), 1);
    }

    #[test]
    fn test_empty_source_is_an_error() {
        assert!(matches!(parse_obj(""), Err(LoadError::EmptyModel)));
        // Vertices but no faces is still structurally empty.
        assert!(matches!(
            parse_obj("v 0 0 0\nv 1 0 0\n"),
            Err(LoadError::EmptyModel)
        ));
    }

    #[test]
    fn test_degenerate_face_ignored() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2
f 1 2 3
";
        let data = parse_obj(text).unwrap();
        assert_eq!(data.triangle_count(), 1);
    }
}
