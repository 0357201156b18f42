/// Indexed triangle meshes and their flattened render streams
use crate::error::MeshError;
use crate::math::{cross3, normalize3, sub3, Mat4};
use crate::obj::ModelData;

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

/// Either one color broadcast to every stream entry, or one color per
/// mesh vertex expanded exactly like the position data.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Uniform(Color),
    PerVertex(Vec<Color>),
}

impl ColorSpec {
    fn validate(&self, vertex_count: usize) -> Result<(), MeshError> {
        match self {
            ColorSpec::Uniform(color) => {
                if !color.is_finite() {
                    return Err(MeshError::InvalidColorSpec(
                        "color components must be finite numbers".to_string(),
                    ));
                }
            }
            ColorSpec::PerVertex(colors) => {
                if colors.len() != vertex_count {
                    return Err(MeshError::InvalidColorSpec(format!(
                        "per-vertex color list has {} entries for {} vertices",
                        colors.len(),
                        vertex_count
                    )));
                }
                if !colors.iter().all(Color::is_finite) {
                    return Err(MeshError::InvalidColorSpec(
                        "color components must be finite numbers".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Normal-computation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalMode {
    /// One normal per face, shared by its three vertices (faceted shading).
    Flat,
    /// One normal per vertex, averaged over all faces touching it.
    Smooth,
}

/// Primitive mode for the renderer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    Triangles,
    Lines,
}

/// Local transform applied per frame: translation, Euler rotation in
/// degrees (it feeds the axis-angle matrix builder), scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3 {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for Transform3 {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

/// Per-object data handed to the rendering backend.
#[derive(Debug)]
pub struct RenderPacket<'a> {
    pub world: Mat4,
    pub positions: &'a [f32],
    pub colors: &'a [f32],
    pub normals: &'a [f32],
    pub texcoords: &'a [f32],
    pub mode: PrimitiveMode,
    pub vertex_count: usize,
    pub texture_url: Option<&'a str>,
}

/// An indexed triangle mesh with derived, render-ready attribute streams.
///
/// The flattened position, color and normal streams are rebuilt eagerly
/// whenever the inputs they depend on change; toggling the wireframe flag
/// regenerates only the color stream, swapping the normal policy only the
/// normal stream.
pub struct Mesh {
    vertices: Vec<[f32; 3]>,
    faces: Vec<[usize; 3]>,
    texcoords: Option<Vec<f32>>,
    color: ColorSpec,
    wireframe: bool,
    normal_mode: NormalMode,
    texture_url: Option<String>,
    pub transform: Transform3,

    raw_positions: Vec<f32>,
    color_stream: Vec<f32>,
    normal_stream: Vec<f32>,
    texcoord_stream: Vec<f32>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<[f32; 3]>,
        faces: Vec<[usize; 3]>,
        color: ColorSpec,
        normal_mode: NormalMode,
    ) -> Result<Self, MeshError> {
        for (face_index, face) in faces.iter().enumerate() {
            for &vertex_index in face {
                if vertex_index >= vertices.len() {
                    return Err(MeshError::FaceIndexOutOfBounds {
                        face: face_index,
                        index: vertex_index,
                    });
                }
            }
        }
        color.validate(vertices.len())?;

        let mut mesh = Self {
            vertices,
            faces,
            texcoords: None,
            color,
            wireframe: false,
            normal_mode,
            texture_url: None,
            transform: Transform3::default(),
            raw_positions: Vec::new(),
            color_stream: Vec::new(),
            normal_stream: Vec::new(),
            texcoord_stream: Vec::new(),
        };
        mesh.rebuild_positions();
        mesh.rebuild_colors();
        mesh.rebuild_normals();
        mesh.rebuild_texcoords();
        Ok(mesh)
    }

    /// Build a mesh from parser output by renumbering the flat index
    /// stream into face triples.
    pub fn from_model_data(
        data: &ModelData,
        color: ColorSpec,
        normal_mode: NormalMode,
    ) -> Result<Self, MeshError> {
        if data.positions.is_empty() || data.indices.is_empty() {
            return Err(MeshError::EmptyModelData);
        }

        let vertices = data
            .positions
            .chunks_exact(3)
            .map(|v| [v[0], v[1], v[2]])
            .collect();
        let faces = data
            .indices
            .chunks_exact(3)
            .map(|f| [f[0] as usize, f[1] as usize, f[2] as usize])
            .collect();

        let mut mesh = Self::new(vertices, faces, color, normal_mode)?;
        if !data.texcoords.is_empty() {
            // Parser texcoords are one pair per output vertex; expand them
            // through the faces like positions.
            let pairs: Vec<[f32; 2]> = data
                .texcoords
                .chunks_exact(2)
                .map(|t| [t[0], t[1]])
                .collect();
            let mut stream = Vec::with_capacity(mesh.faces.len() * 6);
            for face in &mesh.faces {
                for &vertex_index in face {
                    let pair = pairs.get(vertex_index).copied().unwrap_or([0.0; 2]);
                    stream.extend_from_slice(&pair);
                }
            }
            mesh.set_texcoords(Some(stream));
        }
        Ok(mesh)
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn color(&self) -> &ColorSpec {
        &self.color
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn normal_mode(&self) -> NormalMode {
        self.normal_mode
    }

    /// Flattened triangle-vertex position stream (3 floats per entry).
    pub fn position_stream(&self) -> &[f32] {
        &self.raw_positions
    }

    pub fn color_stream(&self) -> &[f32] {
        &self.color_stream
    }

    pub fn normal_stream(&self) -> &[f32] {
        &self.normal_stream
    }

    pub fn texcoord_stream(&self) -> &[f32] {
        &self.texcoord_stream
    }

    pub fn texture_url(&self) -> Option<&str> {
        self.texture_url.as_deref()
    }

    pub fn set_texture_url(&mut self, url: Option<String>) {
        self.texture_url = url;
    }

    /// Replace the vertex/face data, rebuilding every derived stream.
    pub fn set_geometry(
        &mut self,
        vertices: Vec<[f32; 3]>,
        faces: Vec<[usize; 3]>,
    ) -> Result<(), MeshError> {
        for (face_index, face) in faces.iter().enumerate() {
            for &vertex_index in face {
                if vertex_index >= vertices.len() {
                    return Err(MeshError::FaceIndexOutOfBounds {
                        face: face_index,
                        index: vertex_index,
                    });
                }
            }
        }
        self.color.validate(vertices.len())?;
        self.vertices = vertices;
        self.faces = faces;
        self.rebuild_positions();
        self.rebuild_colors();
        self.rebuild_normals();
        self.rebuild_texcoords();
        Ok(())
    }

    /// Toggle wireframe mode. Only the color stream changes cardinality
    /// (line expansion); positions, normals and texcoords are untouched.
    pub fn set_wireframe(&mut self, wireframe: bool) {
        if self.wireframe != wireframe {
            self.wireframe = wireframe;
            self.rebuild_colors();
        }
    }

    /// Swap the normal policy, regenerating only the normal stream.
    pub fn set_normal_mode(&mut self, mode: NormalMode) {
        if self.normal_mode != mode {
            self.normal_mode = mode;
            self.rebuild_normals();
        }
    }

    /// Replace the color specification; revalidated like at construction.
    pub fn set_color(&mut self, color: ColorSpec) -> Result<(), MeshError> {
        color.validate(self.vertices.len())?;
        self.color = color;
        self.rebuild_colors();
        Ok(())
    }

    /// Replace the per-triangle-vertex texture coordinates. A list whose
    /// length does not match the stream is zero-filled instead.
    pub fn set_texcoords(&mut self, texcoords: Option<Vec<f32>>) {
        self.texcoords = texcoords;
        self.rebuild_texcoords();
    }

    /// World matrix for one frame: `outer x (scale . rotX . rotY . rotZ .
    /// translate)`, each factor built fresh from the current transform.
    /// The order is load-bearing; reversing it changes pivot behavior.
    pub fn world_matrix(&self, outer: &Mat4) -> Mat4 {
        let t = &self.transform;
        let object = Mat4::identity()
            .multiply(&Mat4::scaling(t.scale[0], t.scale[1], t.scale[2]))
            .multiply(&Mat4::rotation(t.rotation[0], 1.0, 0.0, 0.0))
            .multiply(&Mat4::rotation(t.rotation[1], 0.0, 1.0, 0.0))
            .multiply(&Mat4::rotation(t.rotation[2], 0.0, 0.0, 1.0))
            .multiply(&Mat4::translation(t.position[0], t.position[1], t.position[2]));
        outer.multiply(&object)
    }

    /// Everything the rendering backend needs for this object.
    pub fn render_packet<'a>(&'a self, outer: &Mat4) -> RenderPacket<'a> {
        RenderPacket {
            world: self.world_matrix(outer),
            positions: &self.raw_positions,
            colors: &self.color_stream,
            normals: &self.normal_stream,
            texcoords: &self.texcoord_stream,
            mode: if self.wireframe {
                PrimitiveMode::Lines
            } else {
                PrimitiveMode::Triangles
            },
            vertex_count: self.raw_positions.len() / 3,
            texture_url: self.texture_url.as_deref(),
        }
    }

    fn rebuild_positions(&mut self) {
        self.raw_positions = expand_triangles(&self.vertices, &self.faces);
    }

    fn rebuild_colors(&mut self) {
        self.color_stream = match &self.color {
            ColorSpec::Uniform(color) => {
                let entries = if self.wireframe {
                    self.faces.len() * 6
                } else {
                    self.raw_positions.len() / 3
                };
                let mut stream = Vec::with_capacity(entries * 3);
                for _ in 0..entries {
                    stream.extend_from_slice(&[color.r, color.g, color.b]);
                }
                stream
            }
            // A per-vertex color list is a second "vertex" array: run it
            // through the same expansion as positions so cardinality
            // always matches.
            ColorSpec::PerVertex(colors) => {
                let as_triples: Vec<[f32; 3]> =
                    colors.iter().map(|c| [c.r, c.g, c.b]).collect();
                if self.wireframe {
                    expand_lines(&as_triples, &self.faces)
                } else {
                    expand_triangles(&as_triples, &self.faces)
                }
            }
        };
    }

    fn rebuild_normals(&mut self) {
        let face_normals = self.face_normals();
        self.normal_stream = match self.normal_mode {
            NormalMode::Flat => {
                let mut stream = Vec::with_capacity(self.faces.len() * 9);
                for normal in &face_normals {
                    for _ in 0..3 {
                        stream.extend_from_slice(normal);
                    }
                }
                stream
            }
            NormalMode::Smooth => {
                // Per face-vertex, sum the flat normals of every face that
                // references the same vertex index, then renormalize. The
                // quadratic scan is fine at the mesh sizes this targets.
                let mut stream = Vec::with_capacity(self.faces.len() * 9);
                for face in &self.faces {
                    for &vertex_index in face {
                        let mut sum = [0.0f32; 3];
                        for (other, normal) in self.faces.iter().zip(&face_normals) {
                            if other.contains(&vertex_index) {
                                sum[0] += normal[0];
                                sum[1] += normal[1];
                                sum[2] += normal[2];
                            }
                        }
                        stream.extend_from_slice(&normalize3(sum));
                    }
                }
                stream
            }
        };
    }

    /// Unnormalized face normals; the magnitude carries each face's
    /// relative area weight.
    fn face_normals(&self) -> Vec<[f32; 3]> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];
                cross3(sub3(v1, v0), sub3(v2, v0))
            })
            .collect()
    }

    fn rebuild_texcoords(&mut self) {
        let expected = (self.raw_positions.len() / 3) * 2;
        self.texcoord_stream = match &self.texcoords {
            Some(texcoords) if texcoords.len() == expected => texcoords.clone(),
            _ => vec![0.0; expected],
        };
    }
}

/// Per face, per vertex index, append that vertex's components; shared
/// vertices are physically duplicated so per-face data stays attributable.
fn expand_triangles(vertices: &[[f32; 3]], faces: &[[usize; 3]]) -> Vec<f32> {
    let mut stream = Vec::with_capacity(faces.len() * 9);
    for face in faces {
        for &vertex_index in face {
            stream.extend_from_slice(&vertices[vertex_index]);
        }
    }
    stream
}

/// Connect each face vertex to the next, wrapping to the first: one
/// segment per edge, two entries per segment.
fn expand_lines(vertices: &[[f32; 3]], faces: &[[usize; 3]]) -> Vec<f32> {
    let mut stream = Vec::with_capacity(faces.len() * 18);
    for face in faces {
        for i in 0..face.len() {
            stream.extend_from_slice(&vertices[face[i]]);
            stream.extend_from_slice(&vertices[face[(i + 1) % face.len()]]);
        }
    }
    stream
}

// Generated primitives.
impl Mesh {
    /// A unit cube centered on the origin, 12 flat-shaded faces with
    /// canonical per-face texture coordinates.
    pub fn cuboid(color: ColorSpec) -> Result<Self, MeshError> {
        const X: f32 = 0.5;
        const Y: f32 = 0.5;
        const Z: f32 = 0.5;
        let vertices = vec![
            [-X, -Y, Z],
            [X, -Y, Z],
            [X, Y, Z],
            [-X, Y, Z],
            [-X, -Y, -Z],
            [X, -Y, -Z],
            [X, Y, -Z],
            [-X, Y, -Z],
        ];
        let faces = vec![
            [0, 1, 2],
            [0, 2, 3],
            [4, 6, 5],
            [4, 7, 6],
            [3, 2, 6],
            [3, 6, 7],
            [0, 5, 1],
            [0, 4, 5],
            [1, 5, 6],
            [1, 6, 2],
            [0, 3, 7],
            [0, 7, 4],
        ];
        #[rustfmt::skip]
        let texcoords = vec![
            // Front
            0.0, 1.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 0.0, 0.0, 0.0,
            // Back
            0.0, 1.0, 1.0, 0.0, 1.0, 1.0,
            0.0, 1.0, 0.0, 0.0, 1.0, 0.0,
            // Top
            0.0, 1.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 0.0, 0.0, 0.0,
            // Bottom
            0.0, 1.0, 1.0, 0.0, 1.0, 1.0,
            0.0, 1.0, 0.0, 0.0, 1.0, 0.0,
            // Right
            0.0, 1.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 0.0, 0.0, 0.0,
            // Left
            0.0, 1.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 0.0, 0.0, 0.0,
        ];

        let mut mesh = Self::new(vertices, faces, color, NormalMode::Flat)?;
        mesh.set_texcoords(Some(texcoords));
        Ok(mesh)
    }

    /// A latitude/longitude unit sphere centered on the origin with
    /// smooth normals. `resolution` is the band count in each direction.
    pub fn sphere(color: ColorSpec, resolution: usize) -> Result<Self, MeshError> {
        let mut vertices = Vec::with_capacity((resolution + 1) * (resolution + 1));
        let mut faces = Vec::with_capacity(resolution * resolution * 2);
        let mut texcoords = Vec::new();

        for lat in 0..=resolution {
            let theta = lat as f32 * std::f32::consts::PI / resolution as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for long in 0..=resolution {
                let phi = long as f32 * 2.0 * std::f32::consts::PI / resolution as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                vertices.push([cos_phi * sin_theta, cos_theta, sin_phi * sin_theta]);
            }
        }

        let res = resolution as f32;
        for lat in 0..resolution {
            for long in 0..resolution {
                let first = lat * (resolution + 1) + long;
                let second = first + resolution + 1;

                faces.push([first, first + 1, second]);
                texcoords.extend_from_slice(&[
                    long as f32 / res,
                    lat as f32 / res,
                    (long + 1) as f32 / res,
                    lat as f32 / res,
                    long as f32 / res,
                    (lat + 1) as f32 / res,
                ]);

                faces.push([second, first + 1, second + 1]);
                texcoords.extend_from_slice(&[
                    long as f32 / res,
                    (lat + 1) as f32 / res,
                    (long + 1) as f32 / res,
                    lat as f32 / res,
                    (long + 1) as f32 / res,
                    (lat + 1) as f32 / res,
                ]);
            }
        }

        let mut mesh = Self::new(vertices, faces, color, NormalMode::Smooth)?;
        mesh.set_texcoords(Some(texcoords));
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> Mesh {
        Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 1, 2]],
            ColorSpec::Uniform(Color::new(0.2, 0.4, 0.6)),
            NormalMode::Flat,
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_stream_duplicates_shared_vertices() {
        let mesh = Mesh::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
            vec![[0, 1, 2], [1, 3, 2]],
            ColorSpec::Uniform(Color::white()),
            NormalMode::Flat,
        )
        .unwrap();

        // 2 faces x 3 vertices x 3 floats, shared vertices repeated.
        assert_eq!(mesh.position_stream().len(), 18);
        assert_eq!(&mesh.position_stream()[3..6], &[1.0, 0.0, 0.0]);
        assert_eq!(&mesh.position_stream()[9..12], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_stream_counts_match() {
        let mesh = Mesh::cuboid(ColorSpec::Uniform(Color::white())).unwrap();
        let vertex_count = mesh.position_stream().len() / 3;
        assert_eq!(vertex_count, 36);
        assert_eq!(mesh.color_stream().len() / 3, vertex_count);
        assert_eq!(mesh.normal_stream().len() / 3, vertex_count);
        assert_eq!(mesh.texcoord_stream().len() / 2, vertex_count);
    }

    #[test]
    fn test_flat_normals_identical_per_triangle() {
        let mesh = triangle_mesh();
        // cross((1,0,0), (0,1,0)) = (0,0,1), unnormalized.
        let normals = mesh.normal_stream();
        assert_eq!(normals.len(), 9);
        for entry in normals.chunks_exact(3) {
            assert_eq!(entry, &[0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_flat_normals_carry_area_weight() {
        let mesh = Mesh::new(
            vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]],
            vec![[0, 1, 2]],
            ColorSpec::Uniform(Color::white()),
            NormalMode::Flat,
        )
        .unwrap();
        // Twice the edge length, four times the cross-product magnitude.
        assert_eq!(&mesh.normal_stream()[0..3], &[0.0, 0.0, 4.0]);
    }

    #[test]
    fn test_smooth_normals_radial_on_sphere() {
        let mesh = Mesh::sphere(ColorSpec::Uniform(Color::white()), 12).unwrap();
        let positions = mesh.position_stream();
        let normals = mesh.normal_stream();
        assert_eq!(positions.len(), normals.len());

        for (p, n) in positions.chunks_exact(3).zip(normals.chunks_exact(3)) {
            let p = normalize3([p[0], p[1], p[2]]);
            let dot = p[0] * n[0] + p[1] * n[1] + p[2] * n[2];
            assert!(dot > 0.9, "normal {:?} not radial at {:?}", n, p);
        }
    }

    #[test]
    fn test_wireframe_toggle_regenerates_colors_only() {
        let mut mesh = triangle_mesh();
        let positions_before = mesh.position_stream().to_vec();
        let faces_before = mesh.faces().to_vec();

        mesh.set_wireframe(true);
        // 3 edges x 2 endpoints x 3 floats.
        assert_eq!(mesh.color_stream().len(), 18);
        assert_eq!(mesh.position_stream(), positions_before.as_slice());
        assert_eq!(mesh.faces(), faces_before.as_slice());

        mesh.set_wireframe(false);
        assert_eq!(mesh.color_stream().len(), 9);
    }

    #[test]
    fn test_per_vertex_colors_expand_like_positions() {
        let colors = vec![
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.0, 1.0, 0.0),
            Color::new(0.0, 0.0, 1.0),
            Color::new(1.0, 1.0, 0.0),
        ];
        let mesh = Mesh::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
            vec![[0, 1, 2], [1, 3, 2]],
            ColorSpec::PerVertex(colors),
            NormalMode::Flat,
        )
        .unwrap();

        assert_eq!(mesh.color_stream().len(), mesh.position_stream().len());
        // Face 1, vertex index 3 -> yellow in the second triangle.
        assert_eq!(&mesh.color_stream()[12..15], &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_invalid_color_specs_rejected() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let faces = vec![[0, 1, 2]];

        let wrong_count = Mesh::new(
            vertices.clone(),
            faces.clone(),
            ColorSpec::PerVertex(vec![Color::white(); 2]),
            NormalMode::Flat,
        );
        assert!(matches!(wrong_count, Err(MeshError::InvalidColorSpec(_))));

        let non_finite = Mesh::new(
            vertices.clone(),
            faces.clone(),
            ColorSpec::Uniform(Color::new(f32::NAN, 0.0, 0.0)),
            NormalMode::Flat,
        );
        assert!(matches!(non_finite, Err(MeshError::InvalidColorSpec(_))));

        // Reassignment revalidates.
        let mut mesh = triangle_mesh();
        let result = mesh.set_color(ColorSpec::PerVertex(vec![Color::white(); 5]));
        assert!(matches!(result, Err(MeshError::InvalidColorSpec(_))));
    }

    #[test]
    fn test_out_of_bounds_face_rejected() {
        let result = Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            vec![[0, 1, 2]],
            ColorSpec::Uniform(Color::white()),
            NormalMode::Flat,
        );
        assert!(matches!(
            result,
            Err(MeshError::FaceIndexOutOfBounds { face: 0, index: 2 })
        ));
    }

    #[test]
    fn test_normal_mode_swap_regenerates_normals_only() {
        let mut mesh = Mesh::cuboid(ColorSpec::Uniform(Color::white())).unwrap();
        let positions_before = mesh.position_stream().to_vec();
        let colors_before = mesh.color_stream().to_vec();
        let normals_before = mesh.normal_stream().to_vec();

        mesh.set_normal_mode(NormalMode::Smooth);
        assert_eq!(mesh.position_stream(), positions_before.as_slice());
        assert_eq!(mesh.color_stream(), colors_before.as_slice());
        assert_ne!(mesh.normal_stream(), normals_before.as_slice());
        assert_eq!(mesh.normal_stream().len(), normals_before.len());
    }

    #[test]
    fn test_texcoord_mismatch_zero_filled() {
        let mut mesh = triangle_mesh();
        mesh.set_texcoords(Some(vec![0.5; 4])); // wrong length for 3 entries
        assert_eq!(mesh.texcoord_stream(), &[0.0; 6]);

        mesh.set_texcoords(Some(vec![0.25; 6]));
        assert_eq!(mesh.texcoord_stream(), &[0.25; 6]);
    }

    #[test]
    fn test_world_matrix_composition_order() {
        let mut mesh = triangle_mesh();
        mesh.transform.scale = [2.0, 2.0, 2.0];
        mesh.transform.position = [1.0, 0.0, 0.0];

        let world = mesh.world_matrix(&Mat4::identity());
        // Scale composes before translation: the translation row must not
        // be scaled.
        assert!((world[0] - 2.0).abs() < 1e-6);
        assert!((world[12] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_render_packet_mode() {
        let mut mesh = triangle_mesh();
        let outer = Mat4::identity();
        assert_eq!(mesh.render_packet(&outer).mode, PrimitiveMode::Triangles);
        assert_eq!(mesh.render_packet(&outer).vertex_count, 3);

        mesh.set_wireframe(true);
        assert_eq!(mesh.render_packet(&outer).mode, PrimitiveMode::Lines);
    }

    #[test]
    fn test_from_model_data_rejects_empty() {
        let empty = ModelData {
            positions: Vec::new(),
            texcoords: Vec::new(),
            indices: Vec::new(),
        };
        let result = Mesh::from_model_data(
            &empty,
            ColorSpec::Uniform(Color::white()),
            NormalMode::Smooth,
        );
        assert!(matches!(result, Err(MeshError::EmptyModelData)));
    }
}
