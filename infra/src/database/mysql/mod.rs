//! MySQL repository implementations.

mod account_repository_impl;
mod image_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use image_repository_impl::MySqlProfileImageRepository;
