use std::str::FromStr;

use strum_macros::Display;

use crate::error::ValueError;

/// Storage class of COS objects.
///
/// Valid Values: `Standard | Standard_IA | Archive | Deep_Archive | Intelligent_Tiering |
/// MAZ_Standard | MAZ_Standard_IA | MAZ_Intelligent_Tiering`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StorageClass {
    #[strum(serialize = "Standard")]
    Standard,
    #[strum(serialize = "Standard_IA")]
    StandardIA,
    #[strum(serialize = "Archive")]
    Archive,
    #[strum(serialize = "Deep_Archive")]
    DeepArchive,
    #[strum(serialize = "Intelligent_Tiering")]
    IntelligentTiering,
    #[strum(serialize = "MAZ_Standard")]
    MazStandard,
    #[strum(serialize = "MAZ_Standard_IA")]
    MazStandardIA,
    #[strum(serialize = "MAZ_Intelligent_Tiering")]
    MazIntelligentTiering,
}

impl StorageClass {
    const ALL: [StorageClass; 8] = [
        StorageClass::Standard,
        StorageClass::StandardIA,
        StorageClass::Archive,
        StorageClass::DeepArchive,
        StorageClass::IntelligentTiering,
        StorageClass::MazStandard,
        StorageClass::MazStandardIA,
        StorageClass::MazIntelligentTiering,
    ];
}

impl FromStr for StorageClass {
    type Err = ValueError;

    /// Case insensitive, COS answers `STANDARD` on some apis.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::new(format!("Unknown storage class: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::StorageClass;

    #[test]
    fn test_storage_class() {
        assert_eq!(StorageClass::StandardIA.to_string(), "Standard_IA");
        assert_eq!(StorageClass::MazIntelligentTiering.to_string(), "MAZ_Intelligent_Tiering");
        assert_eq!("STANDARD".parse::<StorageClass>().unwrap(), StorageClass::Standard);
        assert_eq!("deep_archive".parse::<StorageClass>().unwrap(), StorageClass::DeepArchive);
        assert!("Glacier".parse::<StorageClass>().is_err());
    }
}
