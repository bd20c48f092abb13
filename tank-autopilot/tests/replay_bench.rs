mod common;

use std::fs;
use std::path::Path;

use anyhow::Result;
use arena_core::Orientation;
use tank_autopilot::benchmark::{replay, run_benchmark, BenchmarkConfig, BenchmarkReport};
use tank_autopilot::config::AgentConfig;
use tank_autopilot::recording::{collect_recordings, load_recording, Recorder};
use tank_autopilot::runner::play;

use common::{agent, finished, running, ScriptedSession, DUEL, LIMITS};

fn record_duel(path: &Path, game: &str) -> Result<()> {
    let cfg = AgentConfig::default();
    let mut agent = agent(&cfg);
    let mut session = ScriptedSession::new([
        running(DUEL, Orientation::North, 9),
        finished("won"),
    ]);
    let mut recorder = Recorder::create(path)?;
    recorder.session(game, "jps", &cfg.id, LIMITS)?;
    play(
        &mut agent,
        &cfg.id,
        &mut session,
        running(DUEL, Orientation::East, 10),
        Some(&mut recorder),
    )?;
    Ok(())
}

#[test]
fn same_config_replays_without_divergence() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("duel.jsonl");
    record_duel(&path, "g1")?;

    let report = replay(&load_recording(&path)?, &AgentConfig::default())?;
    assert_eq!(report.ticks, 2);
    assert_eq!(report.divergent_ticks, 0);
    assert_eq!(report.first_divergence, None);
    assert_eq!(report.agreement(), 1.0);
    assert_eq!(report.final_status.as_deref(), Some("won"));
    Ok(())
}

#[test]
fn shorter_fire_range_diverges_on_the_opening_shot() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("duel.jsonl");
    record_duel(&path, "g1")?;

    let short_sighted = AgentConfig {
        id: "short-sighted".to_string(),
        max_fire_distance: 1,
        ..AgentConfig::default()
    };
    let report = replay(&load_recording(&path)?, &short_sighted)?;
    assert_eq!(report.agent_id, "short-sighted");
    assert_eq!(report.recorded_agent, "standard");
    assert_eq!(report.divergent_ticks, 1);
    assert_eq!(report.first_divergence, Some(0));
    assert_eq!(report.modes.fire, 0);
    assert_eq!(report.modes.hunt, 2);
    Ok(())
}

#[test]
fn bench_replays_a_directory_in_parallel() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let recordings = dir.path().join("recordings");
    record_duel(&recordings.join("a.jsonl"), "g1")?;
    record_duel(&recordings.join("b.jsonl"), "g2")?;
    fs::write(recordings.join("README"), "not a recording")?;

    let out_dir = dir.path().join("out");
    let report = run_benchmark(BenchmarkConfig {
        agent_config: AgentConfig::preset("brawler").expect("preset exists"),
        recordings: collect_recordings(&recordings)?,
        out_dir: out_dir.clone(),
        jobs: Some(2),
    })?;

    assert_eq!(report.agent_id, "brawler");
    assert_eq!(report.recording_count, 2);
    assert_eq!(report.total_ticks, 4);
    assert_eq!(report.modes.fire, 2);

    let saved: BenchmarkReport =
        serde_json::from_slice(&fs::read(out_dir.join("summary.json"))?)?;
    assert_eq!(saved.recording_count, 2);
    assert_eq!(saved.total_divergent, report.total_divergent);
    Ok(())
}

#[test]
fn bench_requires_recordings() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_benchmark(BenchmarkConfig {
        agent_config: AgentConfig::default(),
        recordings: Vec::new(),
        out_dir: dir.path().join("out"),
        jobs: None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("at least one recording"));
}
