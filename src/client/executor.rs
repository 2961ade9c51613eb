use bytes::Bytes;
use hyper::header::{self, HeaderName, HeaderValue};
use hyper::{HeaderMap, Method};
use reqwest::Response;
use tracing::warn;

use super::{Cos, QueryMap};
use crate::datatype::{FromXml, ToXml};
use crate::error::{CosError, Error, Result};
use crate::utils::md5sum_hash;

/// An executor builds the COS request.
/// ```rust
/// use hyper::Method;
/// use cos_rsc::Cos;
/// use cos_rsc::error::Result;
///
/// async fn get_bucket_replication(cos: Cos) -> Result<String> {
///     cos.executor(Method::GET)
///         .bucket_name("examplebucket-1250000000")
///         .query("replication", "")
///         .send_text_ok()
///         .await
/// }
/// ```
pub struct BaseExecutor<'a> {
    method: Method,
    region: String,
    bucket_name: Option<String>,
    body: Bytes,
    headers: HeaderMap,
    querys: QueryMap,
    client: &'a Cos,
    build_err: Result<()>,
}

impl<'a> BaseExecutor<'a> {
    pub fn new(method: Method, client: &'a Cos) -> Self {
        Self {
            method,
            region: client.region().to_string(),
            bucket_name: None,
            body: Bytes::new(),
            headers: HeaderMap::new(),
            client,
            querys: QueryMap::new(),
            build_err: Ok(()),
        }
    }

    /// Set the bucket name.
    pub fn bucket_name<T: Into<String>>(mut self, name: T) -> Self {
        self.bucket_name = Some(name.into());
        self
    }

    /// Set the region.
    pub fn region<T: Into<String>>(mut self, region: T) -> Self {
        self.region = region.into();
        self
    }

    /// Set the request body.
    pub fn body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    /// Set the xml struct to body and set md5 header.
    pub(crate) fn xml<S>(mut self, xml: &S) -> Self
    where
        S: ToXml,
    {
        let xml = match xml.to_xml() {
            Ok(xml) => xml,
            Err(e) => {
                self.build_err = Err(e);
                return self;
            }
        };
        let body = Bytes::from(xml);
        let md5 = md5sum_hash(&body);
        self.body(body)
            .header("Content-MD5", md5)
            .header(header::CONTENT_TYPE, "application/xml")
    }

    /// Inserts a key-value pair into the request header.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<Error>,
    {
        let key = <HeaderName as TryFrom<K>>::try_from(key).map_err(Into::into);
        let value = <HeaderValue as TryFrom<V>>::try_from(value).map_err(Into::into);
        match (key, value) {
            (Ok(key), Ok(val)) => {
                self.headers.insert(key, val);
            }
            (Err(e), _) => self.build_err = Err(e),
            (_, Err(e)) => self.build_err = Err(e),
        };
        self
    }

    /// Merge header into request header.
    pub fn headers_merge(mut self, header: Option<HeaderMap>) -> Self {
        if let Some(header) = header {
            self.headers.extend(header);
        }
        self
    }

    /// Inserts a key-value pair into the query map.
    pub fn query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.querys.insert(key.into(), value.into());
        self
    }

    /// Merge querys into request query.
    pub fn querys_merge(mut self, querys: QueryMap) -> Self {
        self.querys.merge(querys);
        self
    }

    pub fn apply<F>(self, apply: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        apply(self)
    }

    /// Send an HTTP request to COS and return a Result<[Response]>.
    ///
    /// note: this is just a response from the cos service, probably a wrong response.
    pub async fn send(self) -> Result<Response> {
        self.build_err?;
        let query = self.querys.to_query_string();
        self.client
            ._execute(
                self.method,
                &self.region,
                self.bucket_name,
                self.body,
                self.headers,
                query,
            )
            .await
    }

    /// Send an HTTP request to COS and return a Result<[Response]>.
    ///
    /// This checks if the request is a legitimate COS response.
    pub async fn send_ok(self) -> Result<Response> {
        let res = self.send().await?;
        if res.status().is_success() {
            return Ok(res);
        }
        if res.content_length() == Some(0) {
            return Err(res.into());
        }
        let status = res.status();
        let text = res.text().await?;
        let err: CosError = text.as_str().try_into()?;
        warn!(%status, code = %err.code, request_id = %err.request_id, "cos returned an error");
        Err(err.into())
    }

    /// Send an HTTP request to COS and return a Result<[String]>.
    ///
    /// This checks if the request is a legitimate COS response.
    pub async fn send_text_ok(self) -> Result<String> {
        let res = self.send_ok().await?;
        let text = res.text().await?;
        Ok(text)
    }

    /// Send an HTTP request to COS and conver to xml struct.
    ///
    /// This checks if the request is a legitimate COS response.
    pub(crate) async fn send_xml_ok<T>(self) -> Result<T>
    where
        T: FromXml,
    {
        self.send_text_ok().await.and_then(T::from_xml)
    }
}
