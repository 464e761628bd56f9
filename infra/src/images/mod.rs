//! Image host integration (Cloudinary upload API)

pub mod cloudinary;

pub use cloudinary::CloudinaryImageHost;
