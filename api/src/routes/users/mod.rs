//! Profile routes under `/api/v1/users`.

pub mod profile;
pub mod profile_image;
