/// Server services
pub mod association;
pub mod media_store;
pub mod playlists;

pub use association::AssociationService;
pub use media_store::{MediaStore, StoredMedia};
pub use playlists::{PlaylistService, UploadedFile};
