use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValueError;

pub static EMPTY_CONTENT_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

static _VALID_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$").unwrap());

pub static _VALID_ENDPOINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-.]+(:\d+)?$").unwrap());

pub static _VALID_REGION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").unwrap());

static _IS_URLENCODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9a-zA-Z-.~_]|(%[0-9A-F]{2}))*$").unwrap());

/// Check whether bucket name is valid.
///
/// A COS bucket is named `<name>-<appid>`, e.g. `examplebucket-1250000000`.
pub fn check_bucket_name(name: &str) -> Result<(), ValueError> {
    if name.len() < 2 || name.len() > 60 {
        Err(ValueError::from(
            "Bucket name must be between 2 (min) and 60 (max) characters long.",
        ))?;
    };
    if !_VALID_NAME.is_match(name) {
        Err(ValueError::from(
            "Bucket name can consist only of lowercase letters, numbers, and hyphens (-). must begin and end with a letter or number.",
        ))?;
    }
    Ok(())
}

/// Check whether region is valid, like `ap-beijing`.
pub fn check_region(region: &str) -> Result<(), ValueError> {
    if _VALID_REGION.is_match(region) {
        Ok(())
    } else {
        Err(ValueError::new(format!("Invalid region: {region}")))
    }
}

/// Encode arbitrary octets as base64 using the provided [base64::engine::general_purpose::STANDARD].
/// Returns a `String`.
#[inline]
pub fn base64_encode<T: AsRef<[u8]>>(input: T) -> String {
    base64::engine::general_purpose::STANDARD.encode(input)
}

/// Compute MD5 of data and return hash as Base64 encoded value.
pub fn md5sum_hash(data: &[u8]) -> String {
    base64_encode(md5::compute(data).0)
}

/// uri encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
#[inline]
pub fn urlencode(data: &str, safe_slash: bool) -> String {
    let s = urlencoding::encode(data).into_owned();
    if safe_slash {
        s.replace("%2F", "/")
    } else {
        s
    }
}

/// check text is be url encode
pub fn is_urlencoded(text: &str) -> bool {
    _IS_URLENCODE.is_match(text)
}

pub fn trim_bytes(b: &[u8]) -> &[u8] {
    let start = b.iter().position(|c| !c.is_ascii_whitespace());
    let end = b.iter().rposition(|c| !c.is_ascii_whitespace());
    match (start, end) {
        (Some(start), Some(end)) => &b[start..=end],
        _ => &b[0..0],
    }
}

#[cfg(test)]
mod tests {
    use super::{check_bucket_name, check_region, is_urlencoded, md5sum_hash, trim_bytes};

    #[test]
    fn test_check_bucket_name() {
        assert!(check_bucket_name("examplebucket-1250000000").is_ok());
        assert!(check_bucket_name("Examplebucket-1250000000").is_err());
        assert!(check_bucket_name("-examplebucket-1250000000").is_err());
        assert!(check_bucket_name("examplebucket-").is_err());
        assert!(check_bucket_name("example.bucket-1250000000").is_err());
        assert!(check_bucket_name("a").is_err());
        assert!(is_urlencoded("uri-encode_.~%AA%20"));
        assert!(!is_urlencoded("uri encode"));
        assert!(!is_urlencoded("uri%2aencode"));
    }

    #[test]
    fn test_check_region() {
        assert!(check_region("ap-beijing").is_ok());
        assert!(check_region("ap-guangzhou").is_ok());
        assert!(check_region("COS_REGION").is_err());
        assert!(check_region("").is_err());
    }

    #[test]
    fn test_trim_bytes() {
        assert_eq!(trim_bytes(" hello \n".as_bytes()), "hello".as_bytes());
        assert_eq!(trim_bytes("  ".as_bytes()), "".as_bytes());
    }

    #[test]
    fn test_md5sum_hash() {
        assert_eq!(md5sum_hash(b""), "1B2M2Y8AsgTpgAmY7PhCfg==");
    }
}
