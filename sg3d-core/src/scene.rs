/// Ordered scene collection: drawables, lights, pending loads
use crate::error::MeshError;
use crate::loader::{LoadStatus, PendingModel};
use crate::math::Mat4;
use crate::mesh::{Color, Mesh, RenderPacket};
use crate::obj::ModelData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
}

/// Light parameters as data; evaluation happens in the shader.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub color: Color,
}

/// A scene slot: either a light descriptor or a drawable mesh. The render
/// pass dispatches by matching the variant.
pub enum SceneEntry {
    Light(Light),
    Drawable(Mesh),
}

type MeshBuilder = Box<dyn FnOnce(ModelData) -> Result<Mesh, MeshError> + Send>;

/// An ordered collection of scene entries composed for a frame.
///
/// Meshes referenced by in-flight loads are absent from the collection
/// until [`Scene::resolve_pending`] observes their completion; a failed
/// load stays absent and the rest of the scene keeps rendering.
#[derive(Default)]
pub struct Scene {
    entries: Vec<SceneEntry>,
    pending: Vec<(PendingModel, MeshBuilder)>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.entries.push(SceneEntry::Drawable(mesh));
    }

    pub fn add_light(&mut self, light: Light) {
        self.entries.push(SceneEntry::Light(light));
    }

    /// Register an in-flight load along with the builder that turns its
    /// model data into a mesh once it resolves.
    pub fn add_pending<F>(&mut self, load: PendingModel, build: F)
    where
        F: FnOnce(ModelData) -> Result<Mesh, MeshError> + Send + 'static,
    {
        self.pending.push((load, Box::new(build)));
    }

    /// Poll every in-flight load once; called once per frame. Resolved
    /// models are appended as drawables, failures dropped (the loader
    /// already logged them).
    pub fn resolve_pending(&mut self) {
        let mut still_pending = Vec::new();
        for (mut load, build) in self.pending.drain(..) {
            match load.poll() {
                LoadStatus::Pending => still_pending.push((load, build)),
                LoadStatus::Ready(data) => match build(data) {
                    Ok(mesh) => self.entries.push(SceneEntry::Drawable(mesh)),
                    Err(error) => {
                        log::error!(
                            "discarding model {}: {}",
                            load.source().display(),
                            error
                        );
                    }
                },
                LoadStatus::Failed => {}
            }
        }
        self.pending = still_pending;
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    pub fn drawables(&self) -> impl Iterator<Item = &Mesh> {
        self.entries.iter().filter_map(|entry| match entry {
            SceneEntry::Drawable(mesh) => Some(mesh),
            SceneEntry::Light(_) => None,
        })
    }

    pub fn drawables_mut(&mut self) -> impl Iterator<Item = &mut Mesh> {
        self.entries.iter_mut().filter_map(|entry| match entry {
            SceneEntry::Drawable(mesh) => Some(mesh),
            SceneEntry::Light(_) => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.entries.iter().filter_map(|entry| match entry {
            SceneEntry::Light(light) => Some(light),
            SceneEntry::Drawable(_) => None,
        })
    }

    /// Renderer-boundary data for every drawable, in insertion order,
    /// each composed with the caller's outer (camera/world) transform.
    pub fn render_packets<'a>(&'a self, outer: &'a Mat4) -> impl Iterator<Item = RenderPacket<'a>> {
        self.drawables().map(move |mesh| mesh.render_packet(outer))
    }
}
