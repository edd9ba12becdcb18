// Weight vectors, the preset formula table, and the original-formula check.

use crate::player::{MetricKey, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Absolute tolerance used when comparing weights against the preset table.
pub const ORIGINAL_FORMULA_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// WeightVector
// ---------------------------------------------------------------------------

/// Signed coefficient per metric for one position.
///
/// Keys are kept in `MetricKey` order so iteration (and slider order) is
/// deterministic. A metric absent from the vector contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<MetricKey, f64>);

impl WeightVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `key`, or `None` when the vector omits it.
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    /// Weight for `key`, treating an omitted key as 0.
    pub fn weight(&self, key: MetricKey) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn set(&mut self, key: MetricKey, weight: f64) {
        self.0.insert(key, weight);
    }

    pub fn contains(&self, key: MetricKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Metric keys present in this vector, in `MetricKey` order.
    pub fn keys(&self) -> Vec<MetricKey> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(MetricKey, f64)> for WeightVector {
    fn from_iter<I: IntoIterator<Item = (MetricKey, f64)>>(iter: I) -> Self {
        WeightVector(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// FormulaWeights
// ---------------------------------------------------------------------------

/// One weight vector per position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormulaWeights(BTreeMap<Position, WeightVector>);

impl FormulaWeights {
    pub fn get(&self, position: Position) -> Option<&WeightVector> {
        self.0.get(&position)
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut WeightVector> {
        self.0.get_mut(&position)
    }

    /// Replace the whole vector for a position.
    pub fn insert(&mut self, position: Position, weights: WeightVector) {
        self.0.insert(position, weights);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &WeightVector)> + '_ {
        self.0.iter().map(|(p, w)| (*p, w))
    }

    /// Weight vector for a position; an empty vector when the position is
    /// missing, so scoring degrades to all-zero rather than failing.
    pub fn for_position(&self, position: Position) -> WeightVector {
        self.0.get(&position).cloned().unwrap_or_default()
    }
}

impl FromIterator<(Position, WeightVector)> for FormulaWeights {
    fn from_iter<I: IntoIterator<Item = (Position, WeightVector)>>(iter: I) -> Self {
        FormulaWeights(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Preset table
// ---------------------------------------------------------------------------

/// Preset coefficients as (metric, guard, forward, center).
const PRESET_TABLE: [(MetricKey, f64, f64, f64); 10] = [
    (MetricKey::Pts, 1.2, 1.1, 1.0),
    (MetricKey::Trb, 0.6, 1.0, 1.3),
    (MetricKey::Ast, 1.3, 0.7, 0.5),
    (MetricKey::Ws, 1.0, 1.0, 1.1),
    (MetricKey::Bpm, 1.0, 1.0, 1.0),
    (MetricKey::Vorp, 1.0, 0.9, 1.0),
    (MetricKey::Stl, 0.9, 0.7, 0.5),
    (MetricKey::Blk, 0.3, 0.8, 1.2),
    (MetricKey::Tov, -0.7, -0.6, -0.6),
    (MetricKey::Availability, 0.8, 0.8, 0.9),
];

/// Metric keys used by the preset formula, in table order.
pub fn preset_metrics() -> Vec<MetricKey> {
    PRESET_TABLE.iter().map(|(k, ..)| *k).collect()
}

/// Preset weight vector for a single position.
pub fn default_weights_for(position: Position) -> WeightVector {
    PRESET_TABLE
        .iter()
        .map(|&(key, g, f, c)| {
            let w = match position {
                Position::Guard => g,
                Position::Forward => f,
                Position::Center => c,
            };
            (key, w)
        })
        .collect()
}

/// The starting formula used to initialize the weight sliders.
pub fn default_weights() -> FormulaWeights {
    Position::ALL
        .iter()
        .map(|&pos| (pos, default_weights_for(pos)))
        .collect()
}

/// Whether `weights` is the preset formula.
///
/// Every preset position and key must be present, no extra keys may be
/// present, and each coefficient must be within
/// `ORIGINAL_FORMULA_TOLERANCE` of the preset value.
pub fn is_original_formula(weights: &FormulaWeights) -> bool {
    let original = default_weights();
    let matches = original.iter().all(|(pos, preset)| {
        let Some(candidate) = weights.get(pos) else {
            return false;
        };
        if candidate.len() != preset.len() {
            return false;
        }
        preset.iter().all(|(key, expected)| {
            candidate
                .get(key)
                .is_some_and(|actual| (actual - expected).abs() <= ORIGINAL_FORMULA_TOLERANCE)
        })
    });
    matches
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("weight for {position}.{metric:?} must be finite, got {value}")]
    NonFinite {
        position: Position,
        metric: MetricKey,
        value: f64,
    },
}

/// Preset metrics that a position's vector leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingWeights {
    pub position: Position,
    pub metrics: Vec<MetricKey>,
}

/// Validate a weight set.
///
/// Non-finite coefficients are rejected. Preset metrics a position omits
/// are returned (they still score as 0) so the caller can report them.
pub fn validate_weights(weights: &FormulaWeights) -> Result<Vec<MissingWeights>, WeightError> {
    let expected = preset_metrics();
    let mut missing = Vec::new();

    for (position, vector) in weights.iter() {
        for (metric, value) in vector.iter() {
            if !value.is_finite() {
                return Err(WeightError::NonFinite {
                    position,
                    metric,
                    value,
                });
            }
        }
        let omitted: Vec<MetricKey> = expected
            .iter()
            .copied()
            .filter(|k| !vector.contains(*k))
            .collect();
        if !omitted.is_empty() {
            missing.push(MissingWeights {
                position,
                metrics: omitted,
            });
        }
    }

    Ok(missing)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_cover_all_positions() {
        let weights = default_weights();
        for pos in Position::ALL {
            let vector = weights.get(pos).expect("preset for every position");
            assert_eq!(vector.len(), 10);
        }
    }

    #[test]
    fn preset_values_match_table() {
        let weights = default_weights();
        let g = weights.get(Position::Guard).unwrap();
        let f = weights.get(Position::Forward).unwrap();
        let c = weights.get(Position::Center).unwrap();
        assert_eq!(g.get(MetricKey::Ast), Some(1.3));
        assert_eq!(g.get(MetricKey::Tov), Some(-0.7));
        assert_eq!(f.get(MetricKey::Vorp), Some(0.9));
        assert_eq!(c.get(MetricKey::Trb), Some(1.3));
        assert_eq!(c.get(MetricKey::Availability), Some(0.9));
        assert_eq!(c.get(MetricKey::FgPercent), None);
    }

    #[test]
    fn weight_treats_missing_as_zero() {
        let vector = WeightVector::new();
        assert_eq!(vector.weight(MetricKey::Pts), 0.0);
        assert!(vector.get(MetricKey::Pts).is_none());
    }

    #[test]
    fn keys_follow_metric_order() {
        let vector: WeightVector = [(MetricKey::Availability, 1.0), (MetricKey::Pts, 1.0)]
            .into_iter()
            .collect();
        assert_eq!(vector.keys(), vec![MetricKey::Pts, MetricKey::Availability]);
    }

    #[test]
    fn original_formula_matches_presets() {
        assert!(is_original_formula(&default_weights()));
    }

    #[test]
    fn original_formula_tolerates_tiny_noise() {
        let mut weights = default_weights();
        let g = weights.get_mut(Position::Guard).unwrap();
        g.set(MetricKey::Pts, 1.2 + 5e-10);
        assert!(is_original_formula(&weights));
    }

    #[test]
    fn any_single_perturbation_breaks_original_formula() {
        for pos in Position::ALL {
            for key in preset_metrics() {
                let mut weights = default_weights();
                let vector = weights.get_mut(pos).unwrap();
                let current = vector.weight(key);
                vector.set(key, current + 2e-9);
                assert!(
                    !is_original_formula(&weights),
                    "perturbing {pos}.{key:?} should break the match"
                );
            }
        }
    }

    #[test]
    fn missing_position_breaks_original_formula() {
        let weights: FormulaWeights = [Position::Guard, Position::Forward]
            .into_iter()
            .map(|p| (p, default_weights_for(p)))
            .collect();
        assert!(!is_original_formula(&weights));
    }

    #[test]
    fn missing_key_breaks_original_formula() {
        let mut weights = default_weights();
        let trimmed: WeightVector = default_weights_for(Position::Center)
            .iter()
            .filter(|(k, _)| *k != MetricKey::Blk)
            .collect();
        weights.insert(Position::Center, trimmed);
        assert!(!is_original_formula(&weights));
    }

    #[test]
    fn extra_key_breaks_original_formula() {
        let mut weights = default_weights();
        weights
            .get_mut(Position::Forward)
            .unwrap()
            .set(MetricKey::FgPercent, 0.0);
        assert!(!is_original_formula(&weights));
    }

    #[test]
    fn validate_presets_ok() {
        let missing = validate_weights(&default_weights()).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn validate_reports_missing_keys() {
        let mut weights = default_weights();
        let partial: WeightVector = [(MetricKey::Pts, 1.0)].into_iter().collect();
        weights.insert(Position::Guard, partial);
        let missing = validate_weights(&weights).unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].position, Position::Guard);
        assert_eq!(missing[0].metrics.len(), 9);
        assert!(!missing[0].metrics.contains(&MetricKey::Pts));
    }

    #[test]
    fn validate_rejects_non_finite() {
        let mut weights = default_weights();
        weights
            .get_mut(Position::Center)
            .unwrap()
            .set(MetricKey::Blk, f64::NAN);
        let err = validate_weights(&weights).unwrap_err();
        assert!(matches!(
            err,
            WeightError::NonFinite {
                position: Position::Center,
                metric: MetricKey::Blk,
                ..
            }
        ));
    }

    #[test]
    fn formula_weights_parse_from_toml() {
        let text = r#"
[G]
pts = 2.0
tov = -1.0

[C]
blk = 1.5
"#;
        let weights: FormulaWeights = toml::from_str(text).unwrap();
        assert_eq!(weights.get(Position::Guard).unwrap().get(MetricKey::Pts), Some(2.0));
        assert_eq!(weights.get(Position::Guard).unwrap().get(MetricKey::Tov), Some(-1.0));
        assert!(weights.get(Position::Forward).is_none());
        assert_eq!(weights.get(Position::Center).unwrap().get(MetricKey::Blk), Some(1.5));
    }
}
