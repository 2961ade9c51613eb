use hyper::Method;

use super::BucketArgs;
use crate::datatype::{ReplicationConfiguration, VersioningConfiguration};
use crate::error::{Error, Result};
use crate::Cos;

macro_rules! get_attr {
    ($name:ident, $query:expr, $T:tt) => {
        #[doc = concat!("Get [",stringify!($T),"] of a bucket")]
        /// ## Example
        /// ```rust
        /// # use cos_rsc::{Cos, error::Result};
        /// # async fn example(cos: Cos) -> Result<()> {
        #[doc = concat!("let config = cos.", stringify!($name), r#"("examplebucket-1250000000").await?;"#)]
        /// # Ok(())}
        /// ```
        #[inline]
        pub async fn $name<B>(&self, bucket: B) -> Result<$T>
        where
            B: Into<BucketArgs>,
        {
            self._bucket_executor(bucket.into(), Method::GET)
                .query($query, "")
                .send_xml_ok()
                .await
        }
    };
}

macro_rules! set_attr {
    ($name:ident, $query:expr, $T:tt) => {
        #[doc = concat!("Set [",stringify!($T),"] of a bucket")]
        #[inline]
        pub async fn $name<B>(&self, bucket: B, value: $T) -> Result<()>
        where
            B: Into<BucketArgs>,
        {
            self._bucket_executor(bucket.into(), Method::PUT)
                .query($query, "")
                .xml(&value)
                .send_ok()
                .await
                .map(|_| ())
        }
    };
}

macro_rules! del_attr {
    ($name:ident, $query:expr) => {
        #[doc = concat!("Delete ",$query," configuration of a bucket")]
        #[inline]
        pub async fn $name<B>(&self, bucket: B) -> Result<()>
        where
            B: Into<BucketArgs>,
        {
            self._bucket_executor(bucket.into(), Method::DELETE)
                .query($query, "")
                .send_ok()
                .await
                .map(|_| ())
        }
    };
}

/// Operating the bucket
impl Cos {
    #[inline]
    pub(crate) fn _bucket_executor(
        &self,
        bucket: BucketArgs,
        method: Method,
    ) -> super::BaseExecutor<'_> {
        self.executor(method)
            .bucket_name(bucket.name)
            .headers_merge(bucket.extra_headers)
            .apply(|e| match bucket.region {
                Some(region) => e.region(region),
                None => e,
            })
    }

    /// Check if a bucket exists.
    /// If bucket exists and you have permission to access it, return [Ok(true)], otherwise [Ok(false)]
    /// ## Example
    /// ```rust
    /// use cos_rsc::client::BucketArgs;
    /// # use cos_rsc::Cos;
    /// # use cos_rsc::error::Result;
    /// # async fn example(cos: Cos) -> Result<()>{
    /// let exists: bool = cos.bucket_exists(BucketArgs::new("examplebucket-1250000000")).await?;
    /// let exists: bool = cos.bucket_exists("examplebucket-1250000000").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn bucket_exists<B>(&self, bucket: B) -> Result<bool>
    where
        B: Into<BucketArgs>,
    {
        self._bucket_executor(bucket.into(), Method::HEAD)
            .send()
            .await
            .map(|res| res.status().is_success())
    }

    /// Set cross-region replication rules of a bucket, replacing the current ones.
    ///
    /// Versioning must be enabled on the source and the destination bucket.
    /// ## Example
    /// ```rust
    /// use cos_rsc::client::BucketArgs;
    /// use cos_rsc::datatype::{
    ///     ReplicationConfiguration, ReplicationDestination, ReplicationRule, StorageClass,
    /// };
    /// # use cos_rsc::{Cos, error::Result};
    /// # async fn example(cos: Cos) -> Result<()> {
    /// let destination = ReplicationDestination::new(
    ///     "qcs::cos:ap-beijing::destinationbucket-1250000000",
    ///     StorageClass::Standard,
    /// );
    /// let config = ReplicationConfiguration::new("qcs::cam::uin/100000000001:uin/100000000001")
    ///     .with_rule("replication-to-beijing", ReplicationRule::enabled("", destination));
    /// cos.set_bucket_replication("examplebucket-1250000000", config.clone()).await?;
    /// cos.set_bucket_replication(BucketArgs::new("examplebucket-1250000000"), config).await?;
    /// # Ok(())}
    /// ```
    pub async fn set_bucket_replication<B>(
        &self,
        bucket: B,
        config: ReplicationConfiguration,
    ) -> Result<()>
    where
        B: Into<BucketArgs>,
    {
        self._bucket_executor(bucket.into(), Method::PUT)
            .query("replication", "")
            .xml(&config)
            .send_ok()
            .await
            .map(|_| ())
    }

    /// Get cross-region replication rules of a bucket.
    /// Note: return [None] if the bucket has no replication configuration.
    /// ## Example
    /// ```rust
    /// use cos_rsc::client::BucketArgs;
    /// use cos_rsc::datatype::ReplicationConfiguration;
    /// # use cos_rsc::{Cos, error::Result};
    /// # async fn example(cos: Cos) -> Result<()> {
    /// let config: Option<ReplicationConfiguration> =
    ///     cos.get_bucket_replication("examplebucket-1250000000").await?;
    /// let config: Option<ReplicationConfiguration> = cos
    ///     .get_bucket_replication(BucketArgs::new("examplebucket-1250000000"))
    ///     .await?;
    /// # Ok(())}
    /// ```
    pub async fn get_bucket_replication<B>(&self, bucket: B) -> Result<Option<ReplicationConfiguration>>
    where
        B: Into<BucketArgs>,
    {
        let res = self
            ._bucket_executor(bucket.into(), Method::GET)
            .query("replication", "")
            .send_xml_ok::<ReplicationConfiguration>()
            .await;
        match res {
            Ok(config) => Ok(Some(config)),
            Err(Error::CosError(e)) if e.is_code("ReplicationConfigurationNotFoundError") => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    del_attr!(del_bucket_replication, "replication");

    get_attr!(get_bucket_versioning, "versioning", VersioningConfiguration);
    set_attr!(set_bucket_versioning, "versioning", VersioningConfiguration);
}
