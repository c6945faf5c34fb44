//! Options of a meta-object reconstruction.

use config::constants::{ConfigError, SOMA_CONNECTION_FACTOR};
use morphology::{ArborType, BranchingCriterion};
use serde::{Deserialize, Serialize};
use skeleton_builder::ArborOptions;

use crate::error::MetaError;

/// How arbors are walked when sampling spheres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArborSampling {
    /// Section by section in pre-order.
    #[default]
    Sections,
    /// Along the connected-sections polylines, depth first.
    ConnectedPolylines,
}

/// Options of a meta-object reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaOptions {
    /// Options of the axon.
    pub axon: ArborOptions,
    /// Options shared by every basal dendrite.
    pub basal_dendrites: ArborOptions,
    /// Options of the apical dendrite.
    pub apical_dendrite: ArborOptions,
    /// How arbors are walked when sampling spheres.
    pub sampling: ArborSampling,
    /// Remove samples inside the soma, flag roots that do not start at the
    /// soma and label primary children first.
    pub repair_morphology: bool,
    /// How the primary child is chosen at a bifurcation.
    pub branching: BranchingCriterion,
    /// Roots starting farther than this multiple of the soma radius are not
    /// joined to the soma.
    pub soma_connection_factor: f64,
}

impl Default for MetaOptions {
    fn default() -> Self {
        Self {
            axon: ArborOptions::default(),
            basal_dendrites: ArborOptions::default(),
            apical_dendrite: ArborOptions::default(),
            sampling: ArborSampling::default(),
            repair_morphology: true,
            branching: BranchingCriterion::default(),
            soma_connection_factor: SOMA_CONNECTION_FACTOR,
        }
    }
}

impl MetaOptions {
    /// Parses and validates options from JSON.
    pub fn from_json(json: &str) -> Result<Self, MetaError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the numeric options.
    pub fn validate(&self) -> Result<(), MetaError> {
        if !(self.soma_connection_factor > 0.0) {
            let factor = self.soma_connection_factor;
            return Err(ConfigError::InvalidSomaConnectionFactor(factor).into());
        }
        Ok(())
    }

    /// Options of one arbor type.
    pub fn arbor(&self, arbor_type: ArborType) -> &ArborOptions {
        match arbor_type {
            ArborType::Axon => &self.axon,
            ArborType::BasalDendrite => &self.basal_dendrites,
            ArborType::ApicalDendrite => &self.apical_dendrite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_repair() {
        let options = MetaOptions::default();
        assert!(options.repair_morphology);
        assert_eq!(options.sampling, ArborSampling::Sections);
    }

    #[test]
    fn test_from_json() {
        let options = MetaOptions::from_json(
            r#"{ "sampling": "connected_polylines", "axon": { "ignore": true } }"#,
        )
        .unwrap();
        assert_eq!(options.sampling, ArborSampling::ConnectedPolylines);
        assert!(options.arbor(ArborType::Axon).ignore);
        assert!(!options.arbor(ArborType::BasalDendrite).ignore);
    }

    #[test]
    fn test_bad_json() {
        let err = MetaOptions::from_json(r#"{ "sampling": "spiral" }"#).unwrap_err();
        assert!(matches!(err, MetaError::InvalidOptions(_)));
    }

    #[test]
    fn test_rejects_non_positive_connection_factor() {
        let err = MetaOptions::from_json(r#"{ "soma_connection_factor": 0.0 }"#).unwrap_err();
        assert_eq!(
            err,
            MetaError::Config(ConfigError::InvalidSomaConnectionFactor(0.0))
        );
        assert!(MetaOptions::default().validate().is_ok());
    }

    #[test]
    fn test_every_field_is_named_in_json() {
        let json = serde_json::to_value(MetaOptions::default()).unwrap();
        let fields = json.as_object().unwrap();
        for name in ["axon", "sampling", "branching", "soma_connection_factor"] {
            assert!(fields.contains_key(name), "missing {name}");
        }
        let parsed = MetaOptions::from_json(&json.to_string()).unwrap();
        assert_eq!(parsed, MetaOptions::default());
    }
}
