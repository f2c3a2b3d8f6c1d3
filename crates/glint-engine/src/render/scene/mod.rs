//! 3D scene rendering: meshes, perspective camera, lights, the lit mesh pass
//! feeding the post-processing chains, a shadowed spotlight scene and
//! wireframes.

mod camera;
mod light;
mod lit;
mod mesh;
mod orbit;
mod spot;
mod wire;

pub use camera::PerspectiveCamera;
pub use light::{LightOrbit, OrbitPath, PointLight, SpotLight};
pub use lit::{LitMaterial, LitScenePass};
pub use mesh::{GpuMesh, Mesh, MeshVertex, Transform};
pub use orbit::OrbitControls;
pub use spot::{ObjectId, SpotMaterial, SpotScenePass};
pub use wire::WireframePass;
