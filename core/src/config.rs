//! JSON configuration loaded from the data directory at startup:
//! scoring-model coefficients and the seed history used to populate an
//! empty store.

use crate::types::{Period, WideRow, CHANNEL_COUNT};
use serde::{Deserialize, Serialize};

/// Coefficients for the linear stand-in scorer, positional per
/// `Channel::ALL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub coefficients: [f64; CHANNEL_COUNT],
    pub intercept:    f64,
}

#[derive(Debug, Clone, Deserialize)]
struct SeedRow {
    month:         String,
    search_engine: f64,
    social_media:  f64,
    video:         f64,
    email:         f64,
    roi:           f64,
}

#[derive(Debug, Clone, Deserialize)]
struct SeedHistoryFile {
    rows: Vec<SeedRow>,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub model:        ModelConfig,
    pub seed_history: Vec<WideRow>,
}

impl EngineConfig {
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let model_path = format!("{data_dir}/scoring_model.json");
        let model_content = std::fs::read_to_string(&model_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {model_path}: {e}"))?;
        let model: ModelConfig = serde_json::from_str(&model_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {model_path}: {e}"))?;

        let seed_path = format!("{data_dir}/seed_history.json");
        let seed_content = std::fs::read_to_string(&seed_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {seed_path}: {e}"))?;
        let seed_file: SeedHistoryFile = serde_json::from_str(&seed_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {seed_path}: {e}"))?;

        let seed_history = seed_file
            .rows
            .into_iter()
            .map(|row| {
                let period = Period::parse(&row.month)
                    .ok_or_else(|| anyhow::anyhow!("Unknown month '{}' in {seed_path}", row.month))?;
                Ok(WideRow {
                    period,
                    budgets: [row.search_engine, row.social_media, row.video, row.email],
                    outcome: row.roi,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { model, seed_history })
    }
}
