pub mod display;
pub mod http_authority;
