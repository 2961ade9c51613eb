use hyper::HeaderMap;

/// Custom request parameters for bucket operations.
/// ## parmas
/// - `bucket_name`: The bucket name, with appid, e.g. `examplebucket-1250000000`.
/// - `region`: *Optional*, The bucket region, defaults to the region of the client.
/// - `extra_headers`: *Optional*, Extra headers for advanced usage.
///
/// `BucketArgs` is the request object form of every bucket operation,
/// a plain bucket name converts into it.
/// ```rust
/// use cos_rsc::client::BucketArgs;
///
/// let args = BucketArgs::new("examplebucket-1250000000").region(Some("ap-guangzhou".into()));
/// let same_bucket: BucketArgs = "examplebucket-1250000000".into();
/// assert_eq!(args.name(), same_bucket.name());
/// ```
#[derive(Debug, Clone)]
pub struct BucketArgs {
    pub(crate) name: String,
    pub(crate) region: Option<String>,
    pub(crate) extra_headers: Option<HeaderMap>,
}

impl BucketArgs {
    pub fn new<S: Into<String>>(bucket_name: S) -> Self {
        Self {
            name: bucket_name.into(),
            region: None,
            extra_headers: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set bucket region
    pub fn region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Set extra headers for advanced usage.
    pub fn extra_headers(mut self, extra_headers: Option<HeaderMap>) -> Self {
        self.extra_headers = extra_headers;
        self
    }
}

impl<S> From<S> for BucketArgs
where
    S: Into<String>,
{
    fn from(s: S) -> Self {
        Self::new(s)
    }
}
