mod common;

use std::time::{Duration, Instant};

use common::{bucket_path, get_test_builder, get_test_cos, BUCKET};
use cos_rsc::datatype::{VersioningConfiguration, VersioningStatus};
use cos_rsc::error::{Error, Result};
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_bucket_exists() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(bucket_path()))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/missingbucket-1250000000"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cos = get_test_cos(&server);
    assert!(cos.bucket_exists(BUCKET).await?);
    assert!(!cos.bucket_exists("missingbucket-1250000000").await?);
    assert!(cos.bucket(BUCKET).exists().await?);
    Ok(())
}

#[tokio::test]
async fn test_bucket_versioning() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(bucket_path()))
        .and(query_param("versioning", ""))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<VersioningConfiguration><Status>Enabled</Status></VersioningConfiguration>",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(bucket_path()))
        .and(query_param("versioning", ""))
        .and(body_string(
            "<VersioningConfiguration><Status>Enabled</Status></VersioningConfiguration>",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let cos = get_test_cos(&server);
    cos.set_bucket_versioning(BUCKET, VersioningConfiguration::new(true))
        .await?;
    let versioning = cos.get_bucket_versioning(BUCKET).await?;
    assert_eq!(versioning.status, Some(VersioningStatus::Enabled));
    Ok(())
}

#[tokio::test]
async fn test_invalid_bucket_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cos = get_test_cos(&server);
    let res = cos.get_bucket_replication("Example_Bucket").await;
    assert!(matches!(res, Err(Error::ValueError(_))));
}

#[tokio::test]
async fn test_shutdown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cos = get_test_cos(&server);
    let clone = cos.clone();
    cos.shutdown();
    assert!(clone.is_shutdown());
    assert!(matches!(
        clone.get_bucket_replication(BUCKET).await,
        Err(Error::Shutdown)
    ));
    assert!(matches!(cos.bucket_exists(BUCKET).await, Err(Error::Shutdown)));
}

const EMPTY_REPLICATION: &str = "<ReplicationConfiguration><Role>r</Role></ReplicationConfiguration>";

async fn mount_slow_replication(server: &MockServer, delay: Duration, times: u64) {
    Mock::given(method("GET"))
        .and(path(bucket_path()))
        .and(query_param("replication", ""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(EMPTY_REPLICATION)
                .set_delay(delay),
        )
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_max_concurrent_requests() -> Result<()> {
    let delay = Duration::from_millis(300);
    let server = MockServer::start().await;
    mount_slow_replication(&server, delay, 2).await;

    let cos = get_test_builder(&server)
        .max_concurrent_requests(1)
        .build()
        .unwrap();
    let start = Instant::now();
    let (a, b) = tokio::join!(
        cos.get_bucket_replication(BUCKET),
        cos.get_bucket_replication(BUCKET)
    );
    assert!(a?.is_some());
    assert!(b?.is_some());
    assert!(start.elapsed() >= delay * 2);
    Ok(())
}

#[tokio::test]
async fn test_shutdown_completes_in_flight_request() -> Result<()> {
    let server = MockServer::start().await;
    mount_slow_replication(&server, Duration::from_millis(300), 1).await;

    let cos = get_test_builder(&server)
        .max_concurrent_requests(1)
        .build()
        .unwrap();
    let (in_flight, _) = tokio::join!(cos.get_bucket_replication(BUCKET), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        cos.shutdown();
    });
    assert!(in_flight?.is_some());
    assert!(cos.is_shutdown());
    assert!(matches!(
        cos.get_bucket_replication(BUCKET).await,
        Err(Error::Shutdown)
    ));
    Ok(())
}
