use super::BucketArgs;
use crate::datatype::{ReplicationConfiguration, VersioningConfiguration};
use crate::{error::Result, Cos};

/// Instantiate a Bucket which wrap [Cos] and [BucketArgs].
/// Provides operations on the bucket.
/// ```rust
/// # use cos_rsc::{Cos, error::Result};
/// # async fn example(cos: Cos) -> Result<()> {
/// let bucket = cos.bucket("examplebucket-1250000000");
/// if bucket.exists().await? {
///     let config = bucket.get_replication().await?;
///     bucket.del_replication().await?;
/// }
/// # Ok(())}
/// ```
#[derive(Clone)]
pub struct Bucket {
    pub(super) client: Cos,
    pub(super) bucket: BucketArgs,
}

macro_rules! proxy_bucket {
    ($name:ident=>$name2:ident, $reponse:ty) => {
        #[inline]
        pub async fn $name2(&self) -> Result<$reponse> {
            self.client.$name(self.bucket.clone()).await
        }
    };

    ($name:ident=>$name2:ident, $reponse:ty, $args:ty) => {
        #[inline]
        pub async fn $name2(&self, args: $args) -> Result<$reponse> {
            self.client.$name(self.bucket.clone(), args).await
        }
    };
}

impl Bucket {
    #[inline]
    pub fn bucket_args(&self) -> BucketArgs {
        self.bucket.clone()
    }

    /// The client this bucket is bound to.
    pub fn client(&self) -> &Cos {
        &self.client
    }

    proxy_bucket!(bucket_exists=>exists, bool);

    proxy_bucket!(get_bucket_replication=>get_replication, Option<ReplicationConfiguration>);
    proxy_bucket!(set_bucket_replication=>set_replication, (), ReplicationConfiguration);
    proxy_bucket!(del_bucket_replication=>del_replication, ());

    proxy_bucket!(get_bucket_versioning=>get_versioning, VersioningConfiguration);
    proxy_bucket!(set_bucket_versioning=>set_versioning, (), VersioningConfiguration);
}

// `From` would overlap with `impl<S: Into<String>> From<S> for BucketArgs`.
impl Into<BucketArgs> for Bucket {
    fn into(self) -> BucketArgs {
        self.bucket
    }
}

impl Into<BucketArgs> for &Bucket {
    fn into(self) -> BucketArgs {
        self.bucket.clone()
    }
}
