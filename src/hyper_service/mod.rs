#![forbid(unsafe_code)]

mod service;

pub use self::service::{error_response, ErrorHandler, RouterService};
