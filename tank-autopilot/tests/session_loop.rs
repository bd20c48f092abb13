mod common;

use anyhow::Result;
use arena_core::{Action, Orientation};
use tank_autopilot::config::AgentConfig;
use tank_autopilot::recording::{load_recording, Recorder};
use tank_autopilot::runner::play;

use common::{agent, finished, running, ScriptedSession, DUEL, LIMITS};

#[test]
fn plays_until_the_arena_says_stop() -> Result<()> {
    let cfg = AgentConfig::default();
    let mut agent = agent(&cfg);
    let mut session = ScriptedSession::new([
        running(DUEL, Orientation::North, 9),
        finished("won"),
    ]);

    let metrics = play(
        &mut agent,
        &cfg.id,
        &mut session,
        running(DUEL, Orientation::East, 10),
        None,
    )?;

    assert_eq!(session.submitted, [Action::Fire, Action::Left]);
    assert_eq!(metrics.ticks, 2);
    assert_eq!(metrics.final_status, "won");
    assert_eq!(metrics.modes.fire, 1);
    assert_eq!(metrics.modes.hunt, 1);
    assert_eq!(metrics.actions.left, 1);
    assert_eq!(metrics.agent_id, "standard");
    Ok(())
}

#[test]
fn terminal_first_observation_submits_nothing() -> Result<()> {
    let cfg = AgentConfig::default();
    let mut agent = agent(&cfg);
    let mut session = ScriptedSession::new(Vec::new());

    let metrics = play(&mut agent, &cfg.id, &mut session, finished("draw"), None)?;

    assert!(session.submitted.is_empty());
    assert_eq!(metrics.ticks, 0);
    assert_eq!(metrics.final_status, "draw");
    Ok(())
}

#[test]
fn resized_grid_aborts_instead_of_guessing() {
    let cfg = AgentConfig::default();
    let mut agent = agent(&cfg);
    let mut session = ScriptedSession::new([running("X_O", Orientation::East, 10)]);

    let err = play(
        &mut agent,
        &cfg.id,
        &mut session,
        running(DUEL, Orientation::East, 10),
        None,
    )
    .unwrap_err();

    assert_eq!(session.submitted, [Action::Fire]);
    assert!(err.to_string().contains("tick 1"), "{err:#}");
}

#[test]
fn recorder_captures_every_decision() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("duel.jsonl");
    let cfg = AgentConfig::default();
    let mut agent = agent(&cfg);
    let mut session = ScriptedSession::new([
        running(DUEL, Orientation::North, 9),
        finished("lost"),
    ]);

    let mut recorder = Recorder::create(&path)?;
    recorder.session("g7", "jps", &cfg.id, LIMITS)?;
    play(
        &mut agent,
        &cfg.id,
        &mut session,
        running(DUEL, Orientation::East, 10),
        Some(&mut recorder),
    )?;
    drop(recorder);

    let recording = load_recording(&path)?;
    assert_eq!(recording.game, "g7");
    assert_eq!(recording.limits, LIMITS);
    let actions: Vec<_> = recording.ticks.iter().map(|t| t.action).collect();
    assert_eq!(actions, session.submitted);
    assert_eq!(recording.ticks[1].index, 1);
    assert_eq!(recording.ticks[1].observation.orientation, Some(Orientation::North));
    assert_eq!(recording.final_status.as_deref(), Some("lost"));
    Ok(())
}
