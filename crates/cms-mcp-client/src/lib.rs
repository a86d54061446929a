//! HTTP implementation of the CMS capability traits.

pub mod client;
pub mod error;
pub mod wire;

pub use client::{HttpCmsClient, CONTENT_TYPE};
pub use error::{ClientError, ClientResult};
