mod client;
mod error;
pub mod http;
mod types;

pub use client::{Credentials, TwitchClient};
pub use error::{classify_response, ClipError};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use types::*;
