#![cfg_attr(not(doctest), doc = include_str!("../README.md"))]

pub mod client;
mod credentials;
pub mod datatype;
pub mod error;
pub mod provider;
mod signer;
pub mod time;
mod utils;

pub use crate::client::{Cos, CosBuilder};
pub use crate::credentials::Credentials;
pub use crate::signer::{sign_request_cos, sign_request_v4, SignatureVersion};
