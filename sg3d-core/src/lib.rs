/// SG3D Core Library - Scene description and geometry preparation
///
/// This library provides the CPU-side core that feeds a rasterizer:
/// vector/matrix algebra, camera orientation and view matrices, indexed
/// meshes with flattened render streams, OBJ parsing, and scene
/// composition.

pub mod camera;
pub mod error;
pub mod loader;
pub mod math;
pub mod mesh;
pub mod obj;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, Key, KeyQuery};
pub use error::{LoadError, MathError, MeshError};
pub use loader::{load_obj, LoadStatus, PendingModel};
pub use math::{Mat4, Vector};
pub use mesh::{Color, ColorSpec, Mesh, NormalMode, PrimitiveMode, RenderPacket, Transform3};
pub use obj::{parse_obj, ModelData};
pub use scene::{Light, LightKind, Scene, SceneEntry};
