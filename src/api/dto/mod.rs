//! Data Transfer Objects (DTOs)

mod request;
mod response;

pub use request::{CreateTreeRequest, InsertNodeRequest, MoveNodeRequest, RenameNodeRequest};
pub use response::{CreatedNodeResponse, CreatedTreeResponse, HealthResponse, SuccessResponse};
