//! Response shaping and the API error taxonomy.
//!
//! Every endpoint answers with one of two envelope shapes:
//!
//! - success: `{ "success": true, "message"?, "data"?, "meta"? }`
//! - error:   `{ "success": false, "error", "code", "details"? }`
//!
//! [`Envelope`] builds the success shape; [`ApiError`] carries the error
//! taxonomy and renders the error shape through `actix_web::ResponseError`,
//! so handlers simply return `Result<HttpResponse, ApiError>`.
mod envelope;
mod error;

pub use envelope::*;
pub use error::*;
