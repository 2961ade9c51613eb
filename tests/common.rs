#![allow(dead_code)]

use cos_rsc::{provider::StaticProvider, Cos, CosBuilder, SignatureVersion};
use wiremock::MockServer;

pub const BUCKET: &str = "examplebucket-1250000000";
pub const ROLE: &str = "qcs::cam::uin/100000000001:uin/100000000001";
pub const DESTINATION: &str = "qcs::cos:ap-beijing::destinationbucket-1250000000";

/// A client talking path-style to the mock server.
pub fn get_test_cos(server: &MockServer) -> Cos {
    get_test_cos_with(server, SignatureVersion::Cos)
}

pub fn get_test_cos_with(server: &MockServer, version: SignatureVersion) -> Cos {
    get_test_builder(server)
        .signature_version(version)
        .build()
        .unwrap()
}

pub fn get_test_builder(server: &MockServer) -> CosBuilder {
    let provider = StaticProvider::new("COS_SECRETID", "COS_SECRETKEY", None);
    Cos::builder()
        .region("ap-guangzhou")
        .endpoint(server.address().to_string())
        .virtual_hosted_style(false)
        .secure(false)
        .provider(provider)
}

pub fn bucket_path() -> String {
    format!("/{BUCKET}")
}
