//! Domain entities representing core business objects.

pub mod company;
pub mod image;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use company::{CompanyDetails, CompanyProfile, Industry};
pub use image::{ImageKind, ImageUpload, UploadedImage, MIB};
pub use token::{Claims, SessionIdentity, SESSION_TOKEN_EXPIRY_DAYS};
pub use user::{Gender, PublicUser, SignupType, User};
