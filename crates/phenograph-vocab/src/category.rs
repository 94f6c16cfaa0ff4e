//! Biolink semantic type tags attached to statement subjects and objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialized as the full CURIE; deserialized from either the CURIE or the
/// bare local name (`"LifeStage"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum BiolinkCategory {
    #[serde(rename = "biolink:Genotype")]
    Genotype,
    #[serde(rename = "biolink:PhenotypicFeature")]
    PhenotypicFeature,
    #[serde(rename = "biolink:BiologicalProcess")]
    BiologicalProcess,
    #[serde(rename = "biolink:LifeStage")]
    LifeStage,
    #[serde(rename = "biolink:Environment")]
    Environment,
    #[serde(rename = "biolink:EvidenceType")]
    EvidenceType,
    #[serde(rename = "biolink:Publication")]
    Publication,
}

impl BiolinkCategory {
    pub const fn as_curie(self) -> &'static str {
        match self {
            BiolinkCategory::Genotype => "biolink:Genotype",
            BiolinkCategory::PhenotypicFeature => "biolink:PhenotypicFeature",
            BiolinkCategory::BiologicalProcess => "biolink:BiologicalProcess",
            BiolinkCategory::LifeStage => "biolink:LifeStage",
            BiolinkCategory::Environment => "biolink:Environment",
            BiolinkCategory::EvidenceType => "biolink:EvidenceType",
            BiolinkCategory::Publication => "biolink:Publication",
        }
    }

    /// Parse either the full CURIE or the bare local name.
    pub fn parse(text: &str) -> Option<Self> {
        let local = text.strip_prefix("biolink:").unwrap_or(text);
        match local {
            "Genotype" => Some(BiolinkCategory::Genotype),
            "PhenotypicFeature" => Some(BiolinkCategory::PhenotypicFeature),
            "BiologicalProcess" => Some(BiolinkCategory::BiologicalProcess),
            "LifeStage" => Some(BiolinkCategory::LifeStage),
            "Environment" => Some(BiolinkCategory::Environment),
            "EvidenceType" => Some(BiolinkCategory::EvidenceType),
            "Publication" => Some(BiolinkCategory::Publication),
            _ => None,
        }
    }
}

impl TryFrom<String> for BiolinkCategory {
    type Error = String;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text).ok_or_else(|| format!("unknown Biolink category `{text}`"))
    }
}

impl fmt::Display for BiolinkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_curie())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_curie_and_local_name() {
        assert_eq!(
            BiolinkCategory::parse("biolink:Genotype"),
            Some(BiolinkCategory::Genotype)
        );
        assert_eq!(
            BiolinkCategory::parse("Environment"),
            Some(BiolinkCategory::Environment)
        );
        assert_eq!(BiolinkCategory::parse("biolink:Gene"), None);
    }

    #[test]
    fn serializes_as_curie() {
        let json = serde_json::to_string(&BiolinkCategory::LifeStage).expect("json");
        assert_eq!(json, "\"biolink:LifeStage\"");
    }

    #[test]
    fn deserializes_curie_or_local_name() {
        let parsed: Vec<BiolinkCategory> =
            serde_json::from_str(r#"["biolink:LifeStage", "Publication"]"#).expect("json");
        assert_eq!(
            parsed,
            [BiolinkCategory::LifeStage, BiolinkCategory::Publication]
        );
        assert!(serde_json::from_str::<BiolinkCategory>(r#""biolink:Gene""#).is_err());
    }
}
