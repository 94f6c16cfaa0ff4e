//! Per-pipeline association settings.

use crate::digest::DEFAULT_ID_NAMESPACE;
use phenograph_vocab::BiolinkCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationConfig {
    /// Namespace prefix of derived association ids.
    pub id_namespace: String,
    /// Category attached to the subject when the caller gives none.
    pub subject_category: BiolinkCategory,
    /// Category attached to the object when the caller gives none.
    pub object_category: BiolinkCategory,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            id_namespace: DEFAULT_ID_NAMESPACE.to_string(),
            subject_category: BiolinkCategory::Genotype,
            object_category: BiolinkCategory::PhenotypicFeature,
        }
    }
}

impl AssociationConfig {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = AssociationConfig::from_json_str(r#"{"id_namespace": "ZFIN"}"#)
            .expect("config");
        assert_eq!(config.id_namespace, "ZFIN");
        assert_eq!(config.subject_category, BiolinkCategory::Genotype);
        assert_eq!(config.object_category, BiolinkCategory::PhenotypicFeature);
    }

    #[test]
    fn categories_accept_bare_names() {
        let config = AssociationConfig::from_json_str(r#"{"object_category": "Environment"}"#)
            .expect("config");
        assert_eq!(config.object_category, BiolinkCategory::Environment);
        assert!(AssociationConfig::from_json_str(r#"{"object_category": "Gene"}"#).is_err());
    }

    #[test]
    fn categories_parse_from_curies() {
        let config = AssociationConfig::from_json_str(
            r#"{"subject_category": "biolink:LifeStage"}"#,
        )
        .expect("config");
        assert_eq!(config.subject_category, BiolinkCategory::LifeStage);
        assert_eq!(config.id_namespace, DEFAULT_ID_NAMESPACE);
    }
}
