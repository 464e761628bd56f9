//! MySQL repository implementations

mod company_repository_impl;
mod mapping;
mod user_repository_impl;

pub use company_repository_impl::MySqlCompanyRepository;
pub use user_repository_impl::MySqlUserRepository;

pub(crate) use mapping::{map_write_error, parse_code, parse_uuid};
