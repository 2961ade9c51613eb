//! Request signing for COS.
//!
//! Two schemes are supported:
//! - [SignatureVersion::Cos], the COS native `q-sign-algorithm=sha1` authorization.
//! - [SignatureVersion::V4], AWS Signature version '4', accepted by the S3 compatible endpoint.
use hmac::{Hmac, Mac};
use hyper::{
    header::{self, HeaderName, InvalidHeaderValue},
    HeaderMap, Method, Uri,
};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::{
    time::UtcTime,
    utils::{trim_bytes, urlencode, EMPTY_CONTENT_SHA256},
    Credentials,
};

/// Validity of a COS native signature, in seconds.
pub const COS_SIGN_DURATION: i64 = 15 * 60;

/// Signature scheme used to authorize requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureVersion {
    /// COS native signature, `Authorization: q-sign-algorithm=sha1&...`
    #[default]
    Cos,
    /// AWS Signature version '4', service name `s3`.
    V4,
}

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

fn _hmac_sha1(key: &[u8], data: &str) -> Vec<u8> {
    let mut hasher = HmacSha1::new_from_slice(key).expect("hmac accepts keys of any length");
    hasher.update(data.as_bytes());
    hasher.finalize().into_bytes().to_vec()
}

fn _hmac_sha256(key: &[u8], data: &str) -> Vec<u8> {
    let mut hasher = HmacSha256::new_from_slice(key).expect("hmac accepts keys of any length");
    hasher.update(data.as_bytes());
    hasher.finalize().into_bytes().to_vec()
}

/// Compute SHA-256 of data and return hash as hex encoded value.
#[inline]
pub fn sha256_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Compute SHA-1 of data and return hash as hex encoded value.
#[inline]
pub fn sha1_hash(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

/// Split an already uri-encoded query string into key-value pairs.
fn _split_query(query: &str) -> Vec<(&str, &str)> {
    query
        .split('&')
        .filter(|x| !x.is_empty())
        .map(|q| match q.find('=') {
            Some(i) => (&q[0..i], &q[i + 1..]),
            None => (q, ""),
        })
        .collect()
}

/// Headers taking part in the signature.
fn _signed_headers(headers: &HeaderMap) -> Vec<(&HeaderName, &[u8])> {
    let mut hdrs = headers
        .iter()
        .filter(|&(name, _)| name != header::USER_AGENT && name != header::AUTHORIZATION)
        .map(|(name, value)| (name, value.as_bytes()))
        .collect::<Vec<_>>();
    hdrs.sort_by_key(|f| f.0.as_str());
    hdrs
}

fn _insert_host(uri: &Uri, headers: &mut HeaderMap) -> Result<(), InvalidHeaderValue> {
    if let Some(authority) = uri.authority() {
        headers.insert(header::HOST, authority.as_str().parse()?);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// COS native signature
// ---------------------------------------------------------------------------

/// Build `(key-list, key=value&...)` for the COS signature.
///
/// keys are lowercased, pairs are sorted by key.
fn _cos_param_list(mut pairs: Vec<(String, String)>) -> (String, String) {
    pairs.sort();
    let keys = pairs
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");
    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    (keys, joined)
}

/// Get the COS `HttpString`.
///
/// `HttpMethod\nUriPathname\nHttpParameters\nHttpHeaders\n`
///
/// Returns `(http_string, url_param_list, header_list)`.
fn _get_cos_http_string(method: &Method, uri: &Uri, headers: &HeaderMap) -> (String, String, String) {
    // query parameters are uri-encoded already
    let params = _split_query(uri.query().unwrap_or(""))
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v.to_string()))
        .collect();
    let (url_param_list, http_parameters) = _cos_param_list(params);

    let hdrs = _signed_headers(headers)
        .into_iter()
        .map(|(k, v)| {
            let v = String::from_utf8_lossy(trim_bytes(v));
            (urlencode(k.as_str(), false).to_lowercase(), urlencode(&v, false))
        })
        .collect();
    let (header_list, http_headers) = _cos_param_list(hdrs);

    let http_string = format!(
        "{}\n{}\n{}\n{}\n",
        method.as_str().to_lowercase(),
        uri.path(),
        http_parameters,
        http_headers
    );
    (http_string, url_param_list, header_list)
}

/// Do the COS native signature of given request.
///
/// Adds the `Host` header, the `x-cos-security-token` header for temporary keys,
/// and the `Authorization` header.
///
/// ```text
/// KeyTime      = <start>;<end>
/// SignKey      = Hex(HMAC-SHA1(SecretKey, KeyTime))
/// StringToSign = "sha1\n" + KeyTime + "\n" + Hex(SHA1(HttpString)) + "\n"
/// Signature    = Hex(HMAC-SHA1(SignKey, StringToSign))
/// ```
pub fn sign_request_cos(
    method: &Method,
    uri: &Uri,
    headers: &mut HeaderMap,
    credentials: &Credentials,
    date: &UtcTime,
) -> Result<(), InvalidHeaderValue> {
    _insert_host(uri, headers)?;
    if let Some(token) = credentials.session_token() {
        headers.insert("x-cos-security-token", token.parse()?);
    }

    let start = date.timestamp();
    let key_time = format!("{};{}", start, start + COS_SIGN_DURATION);
    let sign_key = hex::encode(_hmac_sha1(credentials.secret_key().as_bytes(), &key_time));

    let (http_string, url_param_list, header_list) = _get_cos_http_string(method, uri, headers);
    let string_to_sign = format!(
        "sha1\n{}\n{}\n",
        key_time,
        sha1_hash(http_string.as_bytes())
    );
    let signature = hex::encode(_hmac_sha1(sign_key.as_bytes(), &string_to_sign));

    let authorization = format!(
        "q-sign-algorithm=sha1&q-ak={}&q-sign-time={}&q-key-time={}&q-header-list={}&q-url-param-list={}&q-signature={}",
        credentials.secret_id(),
        key_time,
        key_time,
        header_list,
        url_param_list,
        signature
    );
    headers.insert(header::AUTHORIZATION, authorization.parse()?);
    Ok(())
}

// ---------------------------------------------------------------------------
// AWS Signature V4
// ---------------------------------------------------------------------------

/// Get scope string.
///
/// `date.Format(<YYYYMMDD>) + "/" + <region> + "/" + <service> + "/aws4_request"`
#[inline]
fn _get_scope(date: &UtcTime, region: &str, service_name: &str) -> String {
    format!(
        "{}/{}/{}/aws4_request",
        date.aws_format_date(),
        region,
        service_name
    )
}

/// Get canonical query string, sorted by key.
fn _get_canonical_query_string(query: &str) -> String {
    let mut querys = _split_query(query);
    querys.sort_by_key(|x| x.0);
    querys
        .iter()
        .map(|&(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&")
}

/// Get canonical request hash and signed_headers.
///
/// CanonicalRequest =
///     HTTPRequestMethod + '\n' +
///     CanonicalURI + '\n' +
///     CanonicalQueryString + '\n' +
///     CanonicalHeaders + '\n' +
///     SignedHeaders + '\n' +
///     HashedPayload
fn _get_canonical_request_hash(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    content_sha256: &str,
) -> (String, String) {
    let mut cr: Vec<u8> = Vec::new();

    cr.extend_from_slice(method.as_str().as_bytes());
    cr.push(b'\n');

    cr.extend_from_slice(uri.path().as_bytes());
    cr.push(b'\n');

    let canonical_query_string = _get_canonical_query_string(uri.query().unwrap_or(""));
    cr.extend_from_slice(canonical_query_string.as_bytes());
    cr.push(b'\n');

    let mut signed_headers = Vec::new();
    for (h, v) in _signed_headers(headers) {
        cr.extend_from_slice(h.as_str().as_bytes());
        cr.push(b':');
        cr.extend_from_slice(trim_bytes(v));
        cr.push(b'\n');
        signed_headers.push(h.as_str());
    }
    let signed_headers = signed_headers.join(";");
    cr.push(b'\n');
    cr.extend_from_slice(signed_headers.as_bytes());
    cr.push(b'\n');

    cr.extend_from_slice(content_sha256.as_bytes());

    (sha256_hash(&cr), signed_headers)
}

/// Get signing key
///
/// DateKey = HMAC-SHA256("AWS4"+"<SecretAccessKey>", "<YYYYMMDD>")
/// DateRegionKey = HMAC-SHA256(<DateKey>, "<aws-region>")
/// DateRegionServiceKey = HMAC-SHA256(<DateRegionKey>, "<aws-service>")
/// SigningKey = HMAC-SHA256(<DateRegionServiceKey>, "aws4_request")
fn _get_signing_key(secret_key: &str, date: &UtcTime, region: &str, service_name: &str) -> Vec<u8> {
    let secret_access_key = format!("AWS4{}", secret_key);
    let date_key = _hmac_sha256(secret_access_key.as_bytes(), &date.aws_format_date());
    let date_region_key = _hmac_sha256(&date_key, region);
    let date_region_service_key = _hmac_sha256(&date_region_key, service_name);
    _hmac_sha256(&date_region_service_key, "aws4_request")
}

/// Do signature V4 of given request.
///
/// Adds the `Host`, `x-amz-date`, `x-amz-content-sha256`, `x-amz-security-token`
/// (temporary keys only) and `Authorization` headers.
pub fn sign_request_v4(
    method: &Method,
    uri: &Uri,
    headers: &mut HeaderMap,
    region: &str,
    body: &[u8],
    credentials: &Credentials,
    date: &UtcTime,
) -> Result<(), InvalidHeaderValue> {
    let service_name = "s3";

    _insert_host(uri, headers)?;
    headers.insert("x-amz-date", date.aws_format_time().parse()?);
    let content_sha256 = if body.is_empty() {
        EMPTY_CONTENT_SHA256.to_owned()
    } else {
        sha256_hash(body)
    };
    headers.insert("x-amz-content-sha256", content_sha256.parse()?);
    if let Some(token) = credentials.session_token() {
        headers.insert("x-amz-security-token", token.parse()?);
    }

    let scope = _get_scope(date, region, service_name);
    let (canonical_request_hash, signed_headers) =
        _get_canonical_request_hash(method, uri, headers, &content_sha256);
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        date.aws_format_time(),
        scope,
        canonical_request_hash,
    );
    let signing_key = _get_signing_key(credentials.secret_key(), date, region, service_name);
    let signature = hex::encode(_hmac_sha256(&signing_key, &string_to_sign));

    let authorization = format!(
        "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
        credentials.secret_id(),
        scope,
        signed_headers,
        signature
    );
    headers.insert(header::AUTHORIZATION, authorization.parse()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use hyper::{header, HeaderMap, Method, Uri};

    use super::*;

    fn fixed_date() -> UtcTime {
        Utc.with_ymd_and_hms(2023, 9, 10, 8, 26, 43).unwrap().into()
    }

    fn credentials() -> Credentials {
        Credentials::new("AKIDEXAMPLE", "SECRETKEYEXAMPLE", None)
    }

    #[test]
    fn test_cos_http_string() {
        let uri: Uri = "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/?replication"
            .parse()
            .unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "examplebucket-1250000000.cos.ap-beijing.myqcloud.com".parse().unwrap());
        headers.insert("Content-MD5", "1B2M2Y8AsgTpgAmY7PhCfg==".parse().unwrap());
        headers.insert(header::USER_AGENT, "cos-rsc".parse().unwrap());
        let (http_string, params, header_list) =
            _get_cos_http_string(&Method::PUT, &uri, &headers);
        assert_eq!(params, "replication");
        assert_eq!(header_list, "content-md5;host");
        assert_eq!(
            http_string,
            "put\n/\nreplication=\ncontent-md5=1B2M2Y8AsgTpgAmY7PhCfg%3D%3D&host=examplebucket-1250000000.cos.ap-beijing.myqcloud.com\n"
        );
    }

    #[test]
    fn test_sign_request_cos() {
        let uri: Uri = "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/?replication"
            .parse()
            .unwrap();
        let date = fixed_date();
        let cred = credentials();
        let mut headers = HeaderMap::new();
        sign_request_cos(&Method::GET, &uri, &mut headers, &cred, &date).unwrap();

        let key_time = "1694334403;1694335303";
        let http_string = "get\n/\nreplication=\nhost=examplebucket-1250000000.cos.ap-beijing.myqcloud.com\n";
        let string_to_sign = format!("sha1\n{}\n{}\n", key_time, sha1_hash(http_string.as_bytes()));
        let sign_key = hex::encode(_hmac_sha1(b"SECRETKEYEXAMPLE", key_time));
        let signature = hex::encode(_hmac_sha1(sign_key.as_bytes(), &string_to_sign));
        let expected = format!(
            "q-sign-algorithm=sha1&q-ak=AKIDEXAMPLE&q-sign-time={key_time}&q-key-time={key_time}&q-header-list=host&q-url-param-list=replication&q-signature={signature}"
        );
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), expected.as_str());
    }

    #[test]
    fn test_sign_request_cos_session_token() {
        let uri: Uri = "http://127.0.0.1:9000/examplebucket-1250000000?replication"
            .parse()
            .unwrap();
        let cred = Credentials::new("AKIDEXAMPLE", "SECRETKEYEXAMPLE", Some("token".into()));
        let mut headers = HeaderMap::new();
        sign_request_cos(&Method::DELETE, &uri, &mut headers, &cred, &fixed_date()).unwrap();
        assert_eq!(headers.get("x-cos-security-token").unwrap(), "token");
        assert_eq!(headers.get(header::HOST).unwrap(), "127.0.0.1:9000");
        let auth = headers.get(header::AUTHORIZATION).unwrap().to_str().unwrap();
        assert!(auth.contains("&q-header-list=host;x-cos-security-token&"));
    }

    #[test]
    fn test_sign_request_v4() {
        let uri: Uri = "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/?replication"
            .parse()
            .unwrap();
        let mut headers = HeaderMap::new();
        sign_request_v4(
            &Method::GET,
            &uri,
            &mut headers,
            "ap-beijing",
            b"",
            &credentials(),
            &fixed_date(),
        )
        .unwrap();
        assert_eq!(headers.get("x-amz-date").unwrap(), "20230910T082643Z");
        assert_eq!(headers.get("x-amz-content-sha256").unwrap(), EMPTY_CONTENT_SHA256);
        let auth = headers.get(header::AUTHORIZATION).unwrap().to_str().unwrap();
        assert!(auth.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20230910/ap-beijing/s3/aws4_request, SignedHeaders=host;x-amz-content-sha256;x-amz-date, Signature="
        ));
    }

    #[test]
    fn test_canonical_query_string() {
        assert_eq!(_get_canonical_query_string("b=2&replication&a=1"), "a=1&b=2&replication=");
    }
}
