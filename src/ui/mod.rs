//! Screen loops built on the [`mvi`] runtime.

pub mod async_image;
pub mod list;
pub mod mvi;
pub mod photo_detail;
