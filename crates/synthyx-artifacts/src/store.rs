//! Versioned artifact cache.
//!
//! Artifacts are keyed by a stable name that carries its version (e.g.
//! `fragment-scores-v2.csv`). Resolution checks the local cache directory
//! first; a miss fetches the artifact from the remote store and installs it
//! atomically, so a crashed download never poisons the cache.

use std::path::{Path, PathBuf};

use anyhow::Context;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

use synthyx_common::{ArtifactConfig, Result, SynthyxError};

/// Fragment log-frequency table for the SA estimator.
pub const FRAGMENT_SCORES: &str = "fragment-scores-v2.csv";
/// DRD2 bioactivity classifier weights.
pub const DRD2_MODEL: &str = "drd2-logistic-v1.json";
/// GSK3B bioactivity classifier weights.
pub const GSK3B_MODEL: &str = "gsk3b-logistic-v1.json";
/// JNK3 bioactivity classifier weights.
pub const JNK3_MODEL: &str = "jnk3-logistic-v1.json";

/// Content cache over the remote artifact store.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    base_url: String,
    cache_dir: PathBuf,
    client: reqwest::Client,
}

impl ArtifactStore {
    pub fn new(config: &ArtifactConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache_dir: config
                .cache_dir
                .clone()
                .unwrap_or_else(Self::default_cache_dir),
            client: reqwest::Client::new(),
        }
    }

    fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("synthyx")
            .join("oracle")
    }

    /// Local path an artifact resolves to, whether or not it is cached yet.
    pub fn cached_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(name)
    }

    /// Resolve an artifact by name, fetching it from the remote store on
    /// first use.
    pub async fn ensure(&self, name: &str) -> Result<PathBuf> {
        let path = self.cached_path(name);
        if path.exists() {
            debug!("Artifact {} already cached at {:?}", name, path);
            return Ok(path);
        }

        std::fs::create_dir_all(&self.cache_dir)
            .with_context(|| format!("Failed to create cache directory: {:?}", self.cache_dir))?;

        let url = format!("{}/{}", self.base_url, name);
        info!("Fetching artifact {} from {}", name, url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            warn!("Artifact store returned {} for {}", response.status(), url);
            return Err(SynthyxError::ArtifactLoad(format!(
                "{}: HTTP {}",
                name,
                response.status()
            )));
        }
        let bytes = response.bytes().await?;

        let staging = path.with_extension("partial");
        std::fs::write(&staging, &bytes)
            .with_context(|| format!("Failed to write artifact to {:?}", staging))?;
        std::fs::rename(&staging, &path)
            .with_context(|| format!("Failed to install artifact at {:?}", path))?;

        info!("Cached artifact {} ({} bytes)", name, bytes.len());
        Ok(path)
    }

    /// Resolve an artifact and verify its sha-256 digest. A mismatch evicts
    /// the cached copy so the next call re-fetches.
    pub async fn ensure_verified(&self, name: &str, sha256_hex: &str) -> Result<PathBuf> {
        let path = self.ensure(name).await?;
        let digest = sha256_file(&path)?;
        if digest != sha256_hex.to_lowercase() {
            let _ = std::fs::remove_file(&path);
            return Err(SynthyxError::ArtifactLoad(format!(
                "{}: checksum mismatch (expected {}, got {})",
                name, sha256_hex, digest
            )));
        }
        Ok(path)
    }
}

/// Hex-encoded sha-256 digest of a file on disk.
pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read artifact at {:?}", path))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Abort the process with the store-maintenance message.
///
/// Artifact loads are a precondition for scoring; a caller holding a
/// per-call error here has no useful recovery, and retries belong to the
/// fetch layer, not the core.
pub fn abort_on_load_failure(name: &str, err: &SynthyxError) -> ! {
    error!("Failed to load artifact {}: {}", name, err);
    eprintln!(
        "The Synthyx artifact store is unavailable while loading '{}'. \
         The store may be under maintenance; please check back in a few hours, \
         or point SYNTHYX_ARTIFACT_URL at a mirror.",
        name
    );
    std::process::exit(1);
}

// ── Tests ───────────────────────────────────────────────────────────────────
