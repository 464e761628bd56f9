pub mod company;
pub mod user;

pub use company::CompanyRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "testing"))]
pub use company::MockCompanyRepository;
#[cfg(any(test, feature = "testing"))]
pub use user::MockUserRepository;
