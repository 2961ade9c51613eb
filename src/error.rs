//! Error and Result module.
use core::fmt;
use hyper::header::{InvalidHeaderName, InvalidHeaderValue};
use serde::Deserialize;
use std::{convert::Infallible, error::Error as StdError};
use std::{fmt::Display, result};

/// A `Result` typedef to use with the `cos-rsc::error` type
pub type Result<T> = result::Result<T, Error>;

/// inducate an illegal variable was used.
#[derive(Debug)]
pub struct ValueError(String);

impl ValueError {
    pub fn new<T: Into<String>>(value: T) -> Self {
        Self(value.into())
    }
}

impl Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value error: {}", self.0)
    }
}

impl StdError for ValueError {}

impl From<&str> for ValueError {
    fn from(err: &str) -> Self {
        Self(err.to_string())
    }
}

impl From<String> for ValueError {
    fn from(err: String) -> Self {
        Self(err)
    }
}

impl From<InvalidHeaderValue> for ValueError {
    fn from(err: InvalidHeaderValue) -> Self {
        ValueError(err.to_string())
    }
}

impl From<InvalidHeaderName> for ValueError {
    fn from(err: InvalidHeaderName) -> Self {
        ValueError(err.to_string())
    }
}

impl From<Infallible> for ValueError {
    fn from(err: Infallible) -> Self {
        ValueError(err.to_string())
    }
}

/// XML parsing error.
#[derive(Debug)]
pub struct XmlError(String);

impl XmlError {
    pub fn new<T: Into<String>>(value: T) -> Self {
        Self(value.into())
    }
}

impl Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xmlerror: {}", self.0)
    }
}

impl StdError for XmlError {}

impl From<quick_xml::DeError> for XmlError {
    fn from(err: quick_xml::DeError) -> Self {
        Self(err.to_string())
    }
}

/// COS service returned error response.
///
/// ```xml
/// <Error>
///   <Code>NoSuchBucket</Code>
///   <Message>The specified bucket does not exist.</Message>
///   <Resource>examplebucket-1250000000.cos.ap-beijing.myqcloud.com</Resource>
///   <RequestId>NjQ2...</RequestId>
///   <TraceId>OGVmYzZiMmQzYjA2OWNh...</TraceId>
/// </Error>
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", rename = "Error")]
pub struct CosError {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub request_id: String,
    pub trace_id: Option<String>,
}

impl CosError {
    /// Returns true if the error code equals `code`, ignoring ASCII case.
    ///
    /// COS spells some codes differently from S3, e.g. `ReplicationConfigurationnotFoundError`.
    pub fn is_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }
}

impl std::fmt::Display for CosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CosError: {}: {}", self.code, self.message)
    }
}

impl StdError for CosError {}

impl TryFrom<&str> for CosError {
    type Error = XmlError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Ok(quick_xml::de::from_str(value)?)
    }
}

/// Errors of COS operations.
#[derive(Debug)]
pub enum Error {
    /// inducate an illegal variable was used.
    ValueError(String),

    /// indicate XML parsing error.
    XmlError(XmlError),

    /// indicate COS service returned error response.
    CosError(CosError),

    /// indicate conncet to COS service failed.
    HttpError(reqwest::Error),

    /// indicate the http response returned is not expected by COS.
    UnknownResponse(reqwest::Response),

    /// the client has been shut down.
    Shutdown,
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::XmlError(e) => Some(e),
            Error::CosError(e) => Some(e),
            Error::HttpError(e) => Some(e),
            _ => None,
        }
    }
}

#[rustfmt::skip]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Error::ValueError(e) => write!(f, "value error: {}", e),
            Error::XmlError(e) => write!(f, "{}", e),
            Error::CosError(e) => write!(f, "{}", e),
            Error::HttpError(e) => write!(f, "{}", e),
            Error::UnknownResponse(e) => write!(f, "Unexpected HTTP responses, status: {}", e.status()),
            Error::Shutdown => write!(f, "client has been shut down"),
        }
    }
}

impl From<CosError> for Error {
    fn from(err: CosError) -> Self {
        Error::CosError(err)
    }
}

impl<T: Into<ValueError>> From<T> for Error {
    fn from(err: T) -> Self {
        Error::ValueError(err.into().0)
    }
}

impl From<XmlError> for Error {
    fn from(err: XmlError) -> Self {
        Error::XmlError(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::ValueError(err.to_string());
        }
        Self::HttpError(err)
    }
}

impl From<reqwest::Response> for Error {
    fn from(err: reqwest::Response) -> Self {
        Self::UnknownResponse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::{CosError, Error};

    #[test]
    fn test_cos_error() {
        let res = r#"<?xml version="1.0" encoding="UTF-8"?>
        <Error>
            <Code>ReplicationConfigurationnotFoundError</Code>
            <Message>The replication configuration was not found</Message>
            <Resource>examplebucket-1250000000.cos.ap-guangzhou.myqcloud.com/</Resource>
            <RequestId>NjQ2ZjA2YjZfNmI0ZjBiMGJfMjFkYl8xNjg=</RequestId>
            <TraceId>OGVmYzZiMmQzYjA2OWNhODk0NTRkMTBiOWVmMDAxODc0OWRkZjk0ZDM1NmI1M2E2MTRlY2MzZDhmNmI5MWI1OTBjYzE2MjAxN2M1MzJiOTdkZjMxMDVlYTZjN2FiMmI0</TraceId>
        </Error>"#;
        let result: CosError = res.try_into().unwrap();
        assert!(result.is_code("ReplicationConfigurationNotFoundError"));
        assert_eq!(result.message, "The replication configuration was not found");
        assert!(result.trace_id.is_some());
    }

    #[test]
    fn test_error_display() {
        let err: Error = "Miss endpoint".into();
        assert_eq!(err.to_string(), "value error: Miss endpoint");
        assert_eq!(Error::Shutdown.to_string(), "client has been shut down");
    }
}
