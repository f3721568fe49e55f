pub mod content_type;
pub mod coordinator;
pub mod handle;
pub mod model;
pub mod repository;
pub mod sanitizer;
pub mod store;

pub use coordinator::AssetCoordinator;
pub use model::{AssetConfig, NamingPolicy, Upload};
pub use repository::{AssetOwner, AssetOwnerRepository};
pub use store::LocalAssetStore;
