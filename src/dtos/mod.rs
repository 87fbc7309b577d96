pub mod response_dtos;
pub mod auth_dtos;
pub mod admin_dtos;
pub mod user_dtos;

pub use response_dtos::ApiResponse;
