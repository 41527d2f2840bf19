pub mod json_body;
pub mod response;

pub use json_body::{required, JsonBody, QueryBody};
pub use response::{ApiResponse, ApiResult};
