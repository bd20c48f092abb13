use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use arena_core::{Agent, Policy};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AgentConfig;
use crate::recording::{self, Recording};
use crate::runner::ModeCounts;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayReport {
    pub source: String,
    pub game: String,
    pub recorded_agent: String,
    pub agent_id: String,
    pub ticks: u32,
    pub divergent_ticks: u32,
    pub first_divergence: Option<u32>,
    pub modes: ModeCounts,
    pub final_status: Option<String>,
}

impl ReplayReport {
    pub fn agreement(&self) -> f64 {
        if self.ticks == 0 {
            1.0
        } else {
            1.0 - self.divergent_ticks as f64 / self.ticks as f64
        }
    }
}

/// Feed the recorded observations to a fresh agent built from `cfg` and count
/// the ticks where it would have acted differently.
pub fn replay(recording: &Recording, cfg: &AgentConfig) -> Result<ReplayReport> {
    let policy = Policy::new(cfg.policy_config(recording.limits))
        .with_context(|| format!("bad limits in {}", recording.source.display()))?;
    let mut agent = Agent::new(policy);

    let mut modes = ModeCounts::default();
    let mut divergent_ticks = 0u32;
    let mut first_divergence = None;
    for tick in &recording.ticks {
        let decision = agent.tick(&tick.observation).with_context(|| {
            format!(
                "{}: tick {} does not replay",
                recording.source.display(),
                tick.index
            )
        })?;
        modes.record(decision.mode);
        if decision.action != tick.action {
            debug!(
                tick = tick.index,
                recorded = %tick.action,
                replayed = %decision.action,
                "divergence"
            );
            divergent_ticks += 1;
            first_divergence.get_or_insert(tick.index);
        }
    }

    Ok(ReplayReport {
        source: recording.source.to_string_lossy().into_owned(),
        game: recording.game.clone(),
        recorded_agent: recording.agent_id.clone(),
        agent_id: cfg.id.clone(),
        ticks: recording.ticks.len() as u32,
        divergent_ticks,
        first_divergence,
        modes,
        final_status: recording.final_status.clone(),
    })
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub agent_id: String,
    pub recording_count: usize,
    pub total_ticks: u64,
    pub total_divergent: u64,
    pub agreement_rate: f64,
    pub modes: ModeCounts,
    pub runs: Vec<ReplayReport>,
}

pub struct BenchmarkConfig {
    pub agent_config: AgentConfig,
    pub recordings: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.recordings.is_empty() {
        return Err(anyhow!("benchmark requires at least one recording"));
    }

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let run_one = |path: &PathBuf| -> Result<ReplayReport> {
        let recording = recording::load_recording(path)?;
        replay(&recording, &config.agent_config)
    };

    let run_results: Vec<Result<ReplayReport>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| config.recordings.par_iter().map(run_one).collect())
    } else {
        config.recordings.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }
    runs.sort_by(|a, b| {
        b.divergent_ticks
            .cmp(&a.divergent_ticks)
            .then_with(|| a.source.cmp(&b.source))
    });

    let total_ticks: u64 = runs.iter().map(|r| r.ticks as u64).sum();
    let total_divergent: u64 = runs.iter().map(|r| r.divergent_ticks as u64).sum();
    let mut modes = ModeCounts::default();
    for run in &runs {
        modes.fire += run.modes.fire;
        modes.hunt += run.modes.hunt;
        modes.collect += run.modes.collect;
        modes.cower += run.modes.cower;
        modes.idle += run.modes.idle;
    }

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        agent_id: config.agent_config.id,
        recording_count: runs.len(),
        total_ticks,
        total_divergent,
        agreement_rate: if total_ticks == 0 {
            1.0
        } else {
            1.0 - total_divergent as f64 / total_ticks as f64
        },
        modes,
        runs,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;
    info!(path = %report_path.display(), "wrote benchmark summary");

    Ok(report)
}
