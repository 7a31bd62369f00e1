//! Row models and request DTOs.

pub mod place;
pub mod place_photo;
