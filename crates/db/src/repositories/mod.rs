//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&DbPool` as the first argument. Every method issues single statements, so
//! each call is atomic against the store.

pub mod place_photo_repo;
pub mod place_repo;

pub use place_photo_repo::PlacePhotoRepo;
pub use place_repo::PlaceRepo;
