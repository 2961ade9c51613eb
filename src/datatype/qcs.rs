use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A Qcloud resource name, `qcs:<project>:<service>:<region>:<account>:<resource>`.
///
/// Empty segments are kept, so the replication role
/// `qcs::cam::uin/100000000001:uin/100000000001` and the destination bucket
/// `qcs::cos:ap-beijing::destinationbucket-1250000000` both round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Qcs {
    pub project: String,
    pub service: String,
    pub region: String,
    pub account: String,
    pub resource: String,
}

impl Qcs {
    /// Destination bucket of a replication rule.
    ///
    /// `qcs::cos:<region>::<bucket-appid>`
    pub fn cos_bucket<R: Into<String>, B: Into<String>>(region: R, bucket: B) -> Self {
        Self {
            service: "cos".to_owned(),
            region: region.into(),
            resource: bucket.into(),
            ..Default::default()
        }
    }

    /// Role that COS assumes to replicate objects.
    ///
    /// `qcs::cam::uin/<owner_uin>:uin/<sub_uin>`
    pub fn cam_role<O: fmt::Display, S: fmt::Display>(owner_uin: O, sub_uin: S) -> Self {
        Self {
            service: "cam".to_owned(),
            account: format!("uin/{owner_uin}"),
            resource: format!("uin/{sub_uin}"),
            ..Default::default()
        }
    }
}

impl fmt::Display for Qcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "qcs:{}:{}:{}:{}:{}",
            self.project, self.service, self.region, self.account, self.resource
        )
    }
}

impl From<Qcs> for String {
    fn from(qcs: Qcs) -> Self {
        qcs.to_string()
    }
}

impl FromStr for Qcs {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(6, ':').collect();
        match parts.as_slice() {
            ["qcs", project, service, region, account, resource] if !service.is_empty() => Ok(Self {
                project: project.to_string(),
                service: service.to_string(),
                region: region.to_string(),
                account: account.to_string(),
                resource: resource.to_string(),
            }),
            _ => Err(ValueError::new(format!("Invalid qcs resource name: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Qcs;

    #[test]
    fn test_qcs() {
        let role = Qcs::cam_role(100000000001u64, 100000000001u64);
        assert_eq!(role.to_string(), "qcs::cam::uin/100000000001:uin/100000000001");

        let dest = Qcs::cos_bucket("ap-beijing", "destinationbucket-1250000000");
        assert_eq!(dest.to_string(), "qcs::cos:ap-beijing::destinationbucket-1250000000");

        let parsed: Qcs = "qcs::cos:ap-beijing::destinationbucket-1250000000".parse().unwrap();
        assert_eq!(parsed, dest);
        assert_eq!(parsed.region, "ap-beijing");

        let parsed: Qcs = "qcs::cam::uin/100000000001:uin/100000000001".parse().unwrap();
        assert_eq!(parsed, role);

        assert!("cos:ap-beijing::bucket".parse::<Qcs>().is_err());
        assert!("qcs::::".parse::<Qcs>().is_err());
    }
}
