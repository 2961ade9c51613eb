use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::{FromXml, ToXml};
use crate::error::{Result, XmlError};

/// Versioning state of a bucket, Valid Values: `Enabled | Suspended`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum VersioningStatus {
    Enabled,
    Suspended,
}

/// Describes the versioning state of a COS bucket.
/// - response XML of `get_bucket_versioning` API
/// - request XML of `set_bucket_versioning` API.
///
/// Replication requires versioning enabled on both the source and destination bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersioningConfiguration {
    /// `None` if versioning was never enabled on the bucket.
    pub status: Option<VersioningStatus>,
}

impl VersioningConfiguration {
    pub fn new(enable: bool) -> Self {
        Self {
            status: Some(if enable {
                VersioningStatus::Enabled
            } else {
                VersioningStatus::Suspended
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.status == Some(VersioningStatus::Enabled)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "VersioningConfiguration", rename_all = "PascalCase")]
struct VersioningConfigurationXml {
    #[serde(default)]
    status: Option<String>,
}

impl ToXml for VersioningConfiguration {
    fn to_xml(&self) -> Result<String> {
        let xml = VersioningConfigurationXml {
            status: Some(
                self.status
                    .unwrap_or(VersioningStatus::Suspended)
                    .to_string(),
            ),
        };
        quick_xml::se::to_string(&xml)
            .map_err(XmlError::from)
            .map_err(Into::into)
    }
}

impl FromXml for VersioningConfiguration {
    fn from_xml(v: String) -> Result<Self> {
        let xml: VersioningConfigurationXml =
            quick_xml::de::from_str(&v).map_err(XmlError::from)?;
        let status = match xml.status.as_deref() {
            Some("Enabled") => Some(VersioningStatus::Enabled),
            Some("Suspended") => Some(VersioningStatus::Suspended),
            _ => None,
        };
        Ok(Self { status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioning_configuration() {
        let xml = VersioningConfiguration::new(true).to_xml().unwrap();
        assert_eq!(
            xml,
            "<VersioningConfiguration><Status>Enabled</Status></VersioningConfiguration>"
        );

        let conf = VersioningConfiguration::from_xml(
            "<VersioningConfiguration><Status>Suspended</Status></VersioningConfiguration>".into(),
        )
        .unwrap();
        assert_eq!(conf.status, Some(VersioningStatus::Suspended));
        assert!(!conf.is_enabled());

        let conf = VersioningConfiguration::from_xml("<VersioningConfiguration/>".into()).unwrap();
        assert_eq!(conf.status, None);
    }
}
