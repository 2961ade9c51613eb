use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::{from_xml_str, FromXml, StorageClass, ToXml};
use crate::error::{Result, ValueError, XmlError};

/// Status of a replication rule, Valid Values: `Enabled | Disabled`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReplicationRuleStatus {
    Enabled,
    Disabled,
}

impl FromStr for ReplicationRuleStatus {
    type Err = ValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Enabled" => Ok(Self::Enabled),
            "Disabled" => Ok(Self::Disabled),
            _ => Err(ValueError::new(format!("Unknown replication rule status: {s}"))),
        }
    }
}

/// Where a replication rule copies objects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationDestination {
    /// Destination bucket, `qcs::cos:<region>::<bucket-appid>`.
    pub bucket: String,
    /// Storage class of the replicas.
    /// `None` keeps the storage class of the source object.
    pub storage_class: Option<StorageClass>,
}

impl ReplicationDestination {
    pub fn new<B: Into<String>>(bucket_qcs: B, storage_class: StorageClass) -> Self {
        Self {
            bucket: bucket_qcs.into(),
            storage_class: Some(storage_class),
        }
    }
}

/// A replication rule: objects whose key starts with `prefix` are copied to `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationRule {
    pub status: ReplicationRuleStatus,
    /// Key prefix filter, an empty prefix matches every object.
    pub prefix: String,
    pub destination: ReplicationDestination,
}

impl ReplicationRule {
    pub fn new<P: Into<String>>(
        status: ReplicationRuleStatus,
        prefix: P,
        destination: ReplicationDestination,
    ) -> Self {
        Self {
            status,
            prefix: prefix.into(),
            destination,
        }
    }

    /// An enabled rule.
    pub fn enabled<P: Into<String>>(prefix: P, destination: ReplicationDestination) -> Self {
        Self::new(ReplicationRuleStatus::Enabled, prefix, destination)
    }

    pub fn is_enabled(&self) -> bool {
        self.status == ReplicationRuleStatus::Enabled
    }
}

/// Cross-region replication configuration of a bucket.
/// - request XML of `set_bucket_replication` API
/// - response XML of `get_bucket_replication` API.
///
/// ## Example
/// ```rust
/// use cos_rsc::datatype::{
///     ReplicationConfiguration, ReplicationDestination, ReplicationRule, StorageClass,
/// };
///
/// let destination = ReplicationDestination::new(
///     "qcs::cos:ap-beijing::destinationbucket-1250000000",
///     StorageClass::Standard,
/// );
/// let mut config = ReplicationConfiguration::new("qcs::cam::uin/100000000001:uin/100000000001");
/// config.add_rule("replication-to-beijing", ReplicationRule::enabled("", destination));
/// assert!(config.rule("replication-to-beijing").unwrap().is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplicationConfiguration {
    role: String,
    rules: BTreeMap<String, ReplicationRule>,
}

impl ReplicationConfiguration {
    /// Create an empty configuration, `role` is the identity COS assumes to replicate,
    /// in the form `qcs::cam::uin/<OwnerUin>:uin/<SubUin>`.
    pub fn new<R: Into<String>>(role: R) -> Self {
        Self {
            role: role.into(),
            rules: BTreeMap::new(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn set_role<R: Into<String>>(&mut self, role: R) {
        self.role = role.into();
    }

    /// Add a rule, replacing any rule with the same id.
    pub fn add_rule<I: Into<String>>(&mut self, id: I, rule: ReplicationRule) -> &mut Self {
        self.rules.insert(id.into(), rule);
        self
    }

    /// Builder form of [Self::add_rule].
    pub fn with_rule<I: Into<String>>(mut self, id: I, rule: ReplicationRule) -> Self {
        self.add_rule(id, rule);
        self
    }

    pub fn rule(&self, id: &str) -> Option<&ReplicationRule> {
        self.rules.get(id)
    }

    pub fn remove_rule(&mut self, id: &str) -> Option<ReplicationRule> {
        self.rules.remove(id)
    }

    /// Rules keyed by rule id.
    pub fn rules(&self) -> &BTreeMap<String, ReplicationRule> {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "ReplicationConfiguration", rename_all = "PascalCase")]
struct ReplicationConfigurationXml {
    #[serde(default)]
    role: String,
    #[serde(rename = "Rule", default)]
    rules: Vec<RuleXml>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RuleXml {
    #[serde(rename = "ID")]
    id: String,
    status: String,
    #[serde(default)]
    prefix: String,
    destination: DestinationXml,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DestinationXml {
    bucket: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    storage_class: Option<String>,
}

impl From<&ReplicationConfiguration> for ReplicationConfigurationXml {
    fn from(config: &ReplicationConfiguration) -> Self {
        let rules = config
            .rules
            .iter()
            .map(|(id, rule)| RuleXml {
                id: id.clone(),
                status: rule.status.to_string(),
                prefix: rule.prefix.clone(),
                destination: DestinationXml {
                    bucket: rule.destination.bucket.clone(),
                    storage_class: rule.destination.storage_class.map(|c| c.to_string()),
                },
            })
            .collect();
        Self {
            role: config.role.clone(),
            rules,
        }
    }
}

impl TryFrom<ReplicationConfigurationXml> for ReplicationConfiguration {
    type Error = ValueError;

    fn try_from(xml: ReplicationConfigurationXml) -> std::result::Result<Self, Self::Error> {
        let mut config = ReplicationConfiguration::new(xml.role);
        for rule in xml.rules {
            let storage_class = match rule.destination.storage_class {
                Some(c) if !c.is_empty() => Some(c.parse()?),
                _ => None,
            };
            let destination = ReplicationDestination {
                bucket: rule.destination.bucket,
                storage_class,
            };
            if config.rules.contains_key(&rule.id) {
                return Err(format!("duplicate replication rule id: {}", rule.id).into());
            }
            config.add_rule(
                rule.id,
                ReplicationRule::new(rule.status.parse()?, rule.prefix, destination),
            );
        }
        Ok(config)
    }
}

impl ToXml for ReplicationConfiguration {
    fn to_xml(&self) -> Result<String> {
        quick_xml::se::to_string(&ReplicationConfigurationXml::from(self))
            .map_err(XmlError::from)
            .map_err(Into::into)
    }
}

impl FromXml for ReplicationConfiguration {
    fn from_xml(v: String) -> Result<Self> {
        let xml: ReplicationConfigurationXml = from_xml_str(&v)?;
        Ok(xml.try_into()?)
    }
}
