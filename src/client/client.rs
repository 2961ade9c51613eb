use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use hyper::{header, header::HeaderValue, HeaderMap};
use hyper::{Method, Uri};
use reqwest::Response;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::error::{Error, Result, ValueError};
use crate::provider::Provider;
use crate::signer::{sign_request_cos, sign_request_v4, SignatureVersion};
use crate::time::UtcTime;
use crate::utils::{check_bucket_name, check_region, urlencode, _VALID_ENDPOINT};
use crate::Credentials;

use super::{Bucket, BucketArgs};

/// Default bound of in-flight requests of a [Cos] client.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 32;

/// A `CosBuilder` can be used to create a [`Cos`] with custom configuration.
pub struct CosBuilder {
    endpoint: Option<String>,
    region: Option<String>,
    agent: String,
    secure: bool,
    virtual_hosted: bool,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    signature_version: SignatureVersion,
    max_concurrent_requests: usize,
    provider: Option<Box<dyn Provider>>,
    client: Option<reqwest::Client>,
}

impl CosBuilder {
    pub fn new() -> Self {
        CosBuilder {
            endpoint: None,
            region: None,
            agent: "cos-rsc (Linux; x86_64)".to_string(),
            secure: true,
            virtual_hosted: true,
            timeout: None,
            connect_timeout: None,
            signature_version: SignatureVersion::default(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            provider: None,
            client: None,
        }
    }

    /// Set region of buckets, like `ap-beijing`.
    ///
    /// **Required**.
    pub fn region<T: Into<String>>(mut self, region: T) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set endpoint of the COS service. `hostname[:port]`
    ///
    /// Default: `cos.<region>.myqcloud.com`, following the region of each request.
    pub fn endpoint<T: Into<String>>(mut self, endpoint: T) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set agent header for cos client.
    ///
    /// Default: `cos-rsc (Linux; x86_64)`
    pub fn agent<T: Into<String>>(mut self, agent: T) -> Self {
        self.agent = agent.into();
        self
    }

    /// Set flag to indicate to use secure (TLS) connection to COS service or not.
    ///
    /// Default: `true`.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set flag to indicate to use Virtual-hosted–style or not.
    ///
    /// In a virtual-hosted–style URI, the bucket name is part of the domain name in the URL.
    /// like `https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com`
    ///
    /// Default: `true`.
    ///
    /// **Note**: If the endpoint is an IP address, virtual-hosted–style can not be resolved.
    pub fn virtual_hosted_style(mut self, virtual_hosted_style: bool) -> Self {
        self.virtual_hosted = virtual_hosted_style;
        self
    }

    /// Set a timeout for a whole request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a timeout for the connect phase of a request.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the signature scheme.
    ///
    /// Default: [SignatureVersion::Cos].
    pub fn signature_version(mut self, version: SignatureVersion) -> Self {
        self.signature_version = version;
        self
    }

    /// Set the maximum number of requests in flight at the same time.
    ///
    /// Default: `32`.
    pub fn max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max;
        self
    }

    /// Set custom http [reqwest::Client].
    ///
    /// `agent`, `timeout` and `connect_timeout` are ignored with a custom client.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set credentials provider of your account in COS service.
    ///
    /// **Required**.
    pub fn provider<P>(mut self, provider: P) -> Self
    where
        P: Provider + 'static,
    {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn build(self) -> std::result::Result<Cos, ValueError> {
        let region = self.region.ok_or("Miss region")?;
        check_region(&region)?;
        if let Some(endpoint) = &self.endpoint {
            if !_VALID_ENDPOINT.is_match(endpoint) {
                return Err("Invalid endpoint".into());
            }
        }
        let provider = self.provider.ok_or("Miss provider")?;
        if self.max_concurrent_requests == 0 {
            return Err("max_concurrent_requests must be greater than 0".into());
        }

        let agent: HeaderValue = self
            .agent
            .parse()
            .map_err(|_| ValueError::from("Invalid agent"))?;

        let http = match self.client {
            Some(client) => client,
            None => {
                let mut headers = header::HeaderMap::new();
                headers.insert(header::USER_AGENT, agent.clone());
                let mut builder = reqwest::Client::builder()
                    .default_headers(headers)
                    .https_only(self.secure);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| ValueError::new(e.to_string()))?
            }
        };
        Ok(Cos {
            inner: Arc::new(CosRef {
                endpoint: self.endpoint,
                secure: self.secure,
                http,
                virtual_hosted: self.virtual_hosted,
                region,
                agent,
                signature_version: self.signature_version,
                provider,
                permits: Semaphore::new(self.max_concurrent_requests),
            }),
        })
    }
}

impl Default for CosBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Tencent Cloud Object Storage (aka COS) client to perform bucket operations.
///
/// You do **not** have to wrap the `Cos` in an [`Rc`](std::rc::Rc) or [`Arc`] to **reuse** it,
/// because it already uses an [`Arc`] internally. Keep one client per process
/// and call [Cos::shutdown] when done.
///
/// ## Create Cos client
/// ```rust
/// use cos_rsc::{provider::StaticProvider, Cos};
/// let provider = StaticProvider::new("COS_SECRETID", "COS_SECRETKEY", None);
/// let cos = Cos::builder()
///     .region("ap-guangzhou")
///     .provider(provider)
///     .max_concurrent_requests(32)
///     .build()
///     .unwrap();
/// cos.shutdown();
/// ```
#[derive(Clone)]
pub struct Cos {
    inner: Arc<CosRef>,
}

struct CosRef {
    endpoint: Option<String>,
    virtual_hosted: bool,
    secure: bool,
    http: reqwest::Client,
    region: String,
    agent: HeaderValue,
    signature_version: SignatureVersion,
    provider: Box<dyn Provider>,
    permits: Semaphore,
}

impl Cos {
    /// get a cos [`CosBuilder`]
    pub fn builder() -> CosBuilder {
        CosBuilder::new()
    }

    /// Default region of requests.
    pub fn region(&self) -> &str {
        self.inner.region.as_ref()
    }

    pub fn signature_version(&self) -> SignatureVersion {
        self.inner.signature_version
    }

    /// Release the client.
    ///
    /// Requests in flight complete, any later request of this client or
    /// of its clones fails with [Error::Shutdown].
    pub fn shutdown(&self) {
        if !self.inner.permits.is_closed() {
            self.inner.permits.close();
            info!("cos client shut down");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.inner.permits.is_closed()
    }

    #[inline]
    pub(super) async fn fetch_credentials(&self) -> Credentials {
        self.inner.provider.fetch().await
    }

    #[inline]
    fn scheme(&self) -> &str {
        if self.inner.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Endpoint serving buckets of `region`.
    pub(super) fn endpoint(&self, region: &str) -> String {
        match &self.inner.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("cos.{region}.myqcloud.com"),
        }
    }

    /// build uri for bucket
    pub(super) fn _build_uri(&self, bucket: Option<&str>, region: &str) -> String {
        let scheme = self.scheme();
        let endpoint = self.endpoint(region);
        match bucket {
            Some(b) if self.inner.virtual_hosted => format!("{scheme}://{b}.{endpoint}/"),
            Some(b) => format!("{scheme}://{endpoint}/{}", urlencode(b, false)),
            None => format!("{scheme}://{endpoint}/"),
        }
    }

    /// Sign and send a request.
    ///
    /// A permit of the client is held until the response head arrives.
    pub(super) async fn _execute(
        &self,
        method: Method,
        region: &str,
        bucket_name: Option<String>,
        body: Bytes,
        mut headers: HeaderMap,
        query: String,
    ) -> Result<Response> {
        let _permit = self
            .inner
            .permits
            .acquire()
            .await
            .map_err(|_| Error::Shutdown)?;

        check_region(region)?;
        if let Some(bucket_name) = &bucket_name {
            check_bucket_name(bucket_name)?;
        }
        let mut url = self._build_uri(bucket_name.as_deref(), region);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        headers.insert(header::USER_AGENT, self.inner.agent.clone());
        headers.insert(header::CONTENT_LENGTH, body.len().into());
        let uri = url
            .parse::<Uri>()
            .map_err(|e| Error::ValueError(e.to_string()))?;
        let credentials = self.fetch_credentials().await;
        let date = UtcTime::now();
        match self.inner.signature_version {
            SignatureVersion::Cos => {
                sign_request_cos(&method, &uri, &mut headers, &credentials, &date)?
            }
            SignatureVersion::V4 => {
                sign_request_v4(&method, &uri, &mut headers, region, &body, &credentials, &date)?
            }
        }

        debug!(%method, %url, region, "send cos request");
        let response = self
            .inner
            .http
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;
        debug!(status = %response.status(), "cos response");
        Ok(response)
    }

    #[inline]
    pub fn executor(&self, method: Method) -> super::BaseExecutor<'_> {
        super::BaseExecutor::new(method, self)
    }

    /// Instantiate a [Bucket]
    pub fn bucket<B>(&self, bucket: B) -> Bucket
    where
        B: Into<BucketArgs>,
    {
        Bucket {
            client: self.clone(),
            bucket: bucket.into(),
        }
    }
}
