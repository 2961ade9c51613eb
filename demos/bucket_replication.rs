//! Walkthrough of the bucket replication api: set the rules, read them back
//! in both call forms, delete them in both call forms, release the client.
use std::env;
use std::str::FromStr;

use cos_rsc::client::BucketArgs;
use cos_rsc::datatype::{
    Qcs, ReplicationConfiguration, ReplicationDestination, ReplicationRule, StorageClass,
    VersioningConfiguration,
};
use cos_rsc::error::Result;
use cos_rsc::provider::StaticProvider;
use cos_rsc::Cos;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

async fn put_bucket_replication(cos: &Cos, bucket: &str) -> Result<()> {
    let destination = env::var("COS_DESTINATION_BUCKET").unwrap_or_else(|_| {
        Qcs::cos_bucket("ap-beijing", "destinationbucket-1250000000").to_string()
    });
    let role = env::var("COS_ROLE")
        .unwrap_or_else(|_| Qcs::cam_role(100000000001u64, 100000000001u64).to_string());

    let rule = ReplicationRule::enabled(
        "",
        ReplicationDestination::new(destination.as_str(), StorageClass::Standard),
    );
    // replication requires versioning on both buckets
    let target = Qcs::from_str(&destination)?;
    cos.set_bucket_versioning(
        BucketArgs::new(target.resource).region(Some(target.region)),
        VersioningConfiguration::new(true),
    )
    .await?;
    cos.set_bucket_versioning(bucket, VersioningConfiguration::new(true))
        .await?;

    let config = ReplicationConfiguration::new(role).with_rule("replication-to-beijing", rule);
    cos.set_bucket_replication(bucket, config).await?;
    info!(bucket, "replication rules set");
    Ok(())
}

async fn get_bucket_replication(cos: &Cos, bucket: &str) -> Result<()> {
    let by_name = cos.get_bucket_replication(bucket).await?;
    let by_request = cos.get_bucket_replication(BucketArgs::new(bucket)).await?;
    info!(?by_name, ?by_request, "replication rules");
    Ok(())
}

async fn delete_bucket_replication(cos: &Cos, bucket: &str) -> Result<()> {
    cos.del_bucket_replication(bucket).await?;
    cos.del_bucket_replication(BucketArgs::new(bucket)).await?;
    info!(bucket, "replication rules deleted");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let provider = StaticProvider::from_env()
        .unwrap_or_else(|| StaticProvider::new("COS_SECRETID", "COS_SECRETKEY", None));
    let cos = Cos::builder()
        .region(env_or("COS_REGION", "ap-guangzhou"))
        .provider(provider)
        .max_concurrent_requests(32)
        .build()?;
    let bucket = env_or("COS_BUCKET", "examplebucket-1250000000");

    put_bucket_replication(&cos, &bucket).await?;
    get_bucket_replication(&cos, &bucket).await?;
    delete_bucket_replication(&cos, &bucket).await?;

    cos.shutdown();
    Ok(())
}
