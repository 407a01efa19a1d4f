pub mod meshes;
pub mod sources;
pub mod systems;
pub mod textures;
pub mod types;

pub use sources::*;
pub use systems::*;
pub use textures::*;
pub use types::*;
