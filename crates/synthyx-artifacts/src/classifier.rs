//! Pretrained classifier boundary.
//!
//! Activity oracles never train or introspect a model: a classifier arrives
//! as a serialized artifact and is consumed as an opaque probability
//! function over a fixed-width feature vector.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use synthyx_common::{Result, SynthyxError};

use crate::store::{abort_on_load_failure, ArtifactStore};

/// A pretrained probability model.
pub trait ProbabilityModel: Send + Sync {
    /// Probability of the positive class, in [0, 1].
    fn predict_probability(&self, features: &[f64]) -> f64;
}

/// Logistic-regression weights over a folded fingerprint feature vector.
/// The artifact is JSON: `{version, feature_width, weights, bias}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub version: u32,
    pub feature_width: usize,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticModel {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model artifact at {:?}", path))?;
        let model: LogisticModel = serde_json::from_str(&raw)?;
        if model.weights.len() != model.feature_width {
            return Err(SynthyxError::ArtifactLoad(format!(
                "{:?}: {} weights for feature width {}",
                path,
                model.weights.len(),
                model.feature_width
            )));
        }
        Ok(model)
    }
}

impl ProbabilityModel for LogisticModel {
    fn predict_probability(&self, features: &[f64]) -> f64 {
        let z = self.bias
            + self
                .weights
                .iter()
                .zip(features.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        1.0 / (1.0 + (-z).exp())
    }
}

/// Process-wide cache of deserialized models, one per artifact name.
/// Concurrent first callers race to a single load.
pub struct ModelCache {
    store: ArtifactStore,
    models: tokio::sync::Mutex<HashMap<String, Arc<LogisticModel>>>,
}

impl ModelCache {
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store,
            models: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a model by artifact name, loading it on first use.
    ///
    /// A load failure is fatal with the maintenance message: scoring is
    /// impossible without the model, so there is no per-call error path.
    pub async fn get_or_load(&self, name: &str) -> Arc<LogisticModel> {
        let mut models = self.models.lock().await;
        if let Some(model) = models.get(name) {
            return model.clone();
        }
        let model = match self.load(name).await {
            Ok(model) => Arc::new(model),
            Err(err) => abort_on_load_failure(name, &err),
        };
        info!(
            "Loaded classifier {} (v{}, {} features)",
            name, model.version, model.feature_width
        );
        models.insert(name.to_string(), model.clone());
        model
    }

    async fn load(&self, name: &str) -> Result<LogisticModel> {
        let path = self.store.ensure(name).await?;
        LogisticModel::load(&path)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use synthyx_common::ArtifactConfig;

    fn model(weights: Vec<f64>, bias: f64) -> LogisticModel {
        LogisticModel {
            version: 1,
            feature_width: weights.len(),
            weights,
            bias,
        }
    }

    #[test]
    fn test_sigmoid_midpoint() {
        let m = model(vec![0.0, 0.0], 0.0);
        assert!((m.predict_probability(&[1.0, 1.0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_probability_is_bounded_and_monotone() {
        let m = model(vec![1.0], 0.0);
        let low = m.predict_probability(&[-10.0]);
        let high = m.predict_probability(&[10.0]);
        assert!(low > 0.0 && low < 0.01);
        assert!(high > 0.99 && high < 1.0);
        assert!(m.predict_probability(&[0.5]) < m.predict_probability(&[1.5]));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let m = model(vec![0.25, -1.5, 0.0], 0.1);
        std::fs::write(&path, serde_json::to_string(&m).unwrap()).unwrap();

        let loaded = LogisticModel::load(&path).unwrap();
        assert_eq!(loaded.weights, m.weights);
        assert_eq!(loaded.bias, m.bias);
    }

    #[test]
    fn test_load_rejects_width_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{"version":1,"feature_width":4,"weights":[0.1,0.2],"bias":0.0}"#,
        )
        .unwrap();
        assert!(matches!(
            LogisticModel::load(&path),
            Err(SynthyxError::ArtifactLoad(_))
        ));
    }

    #[tokio::test]
    async fn test_model_cache_returns_shared_instance() {
        let dir = tempfile::tempdir().unwrap();
        let m = model(vec![0.5], 0.0);
        std::fs::write(
            dir.path().join("toy-logistic-v1.json"),
            serde_json::to_string(&m).unwrap(),
        )
        .unwrap();

        let cache = ModelCache::new(ArtifactStore::new(&ArtifactConfig {
            base_url: "http://127.0.0.1:9/artifacts".to_string(),
            cache_dir: Some(dir.path().to_path_buf()),
        }));
        let first = cache.get_or_load("toy-logistic-v1.json").await;
        let second = cache.get_or_load("toy-logistic-v1.json").await;
        assert!(Arc::ptr_eq(&first, &second));
    }
}
