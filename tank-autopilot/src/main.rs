use anyhow::{anyhow, Context, Result};
use arena_core::{Agent, Policy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tank_autopilot::benchmark::{self, BenchmarkConfig};
use tank_autopilot::client::{ArenaClient, SessionOptions};
use tank_autopilot::config::load_config;
use tank_autopilot::recording::{self, Recorder};
use tank_autopilot::runner;

#[derive(Parser)]
#[command(
    name = "tank-autopilot",
    about = "Autonomous tank agent for the wrapped-grid arena"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Join a game and play it to the end
    Play {
        /// Game id to join
        #[arg(long)]
        game: String,

        /// Arena server host
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Arena server port
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Player moniker shown by the arena
        #[arg(long, default_value = "jps")]
        name: String,

        /// Config file path (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use a named preset instead of config file
        #[arg(long)]
        preset: Option<String>,

        /// Write a JSON Lines recording of the game
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Re-run the agent over a recorded game
    Replay {
        /// Recording path (JSON Lines)
        #[arg(long)]
        recording: PathBuf,

        /// Config file path (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use a named preset
        #[arg(long)]
        preset: Option<String>,
    },

    /// Replay every recording in a directory
    Bench {
        /// Directory holding *.jsonl recordings
        #[arg(long)]
        recordings: PathBuf,

        /// Config file path (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use a named preset
        #[arg(long)]
        preset: Option<String>,

        /// Output directory
        #[arg(long, default_value = "bench-output")]
        out_dir: PathBuf,

        /// Parallel jobs (default: all cores)
        #[arg(long)]
        jobs: Option<usize>,
    },

    /// Print a config as JSON
    ShowConfig {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use a named preset
        #[arg(long)]
        preset: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            game,
            host,
            port,
            name,
            config,
            preset,
            record,
        } => {
            let cfg = load_config(config.as_deref(), preset.as_deref())?;
            let opts = SessionOptions {
                host,
                port,
                game,
                moniker: name,
            };
            let joined = ArenaClient::join(&opts)?;
            info!(
                player_id = %joined.player_id,
                max_health = joined.limits.max_health,
                max_energy = joined.limits.max_energy,
                "joined"
            );

            let policy = Policy::new(cfg.policy_config(joined.limits))
                .context("arena announced unusable limits")?;
            let mut agent = Agent::new(policy);

            let mut recorder = match &record {
                Some(path) => {
                    let mut rec = Recorder::create(path)?;
                    rec.session(&opts.game, &opts.moniker, &cfg.id, joined.limits)?;
                    Some(rec)
                }
                None => None,
            };

            let mut client = joined.client;
            let metrics = runner::play(
                &mut agent,
                &cfg.id,
                &mut client,
                joined.observation,
                recorder.as_mut(),
            )?;

            eprintln!(
                "status={} ticks={} fire={} hunt={} collect={} cower={} idle={}",
                metrics.final_status,
                metrics.ticks,
                metrics.modes.fire,
                metrics.modes.hunt,
                metrics.modes.collect,
                metrics.modes.cower,
                metrics.modes.idle,
            );
            if let Some(rec) = &recorder {
                eprintln!("recording saved to {}", rec.path().display());
            }
        }

        Command::Replay {
            recording,
            config,
            preset,
        } => {
            let cfg = load_config(config.as_deref(), preset.as_deref())?;
            let loaded = recording::load_recording(&recording)?;
            let report = benchmark::replay(&loaded, &cfg)?;

            eprintln!(
                "game={} recorded_by={} ticks={} divergent={} agreement={:.3} final={}",
                report.game,
                report.recorded_agent,
                report.ticks,
                report.divergent_ticks,
                report.agreement(),
                report.final_status.as_deref().unwrap_or("(unfinished)"),
            );
            if let Some(tick) = report.first_divergence {
                eprintln!("first divergence at tick {tick}");
            }
        }

        Command::Bench {
            recordings,
            config,
            preset,
            out_dir,
            jobs,
        } => {
            let cfg = load_config(config.as_deref(), preset.as_deref())?;
            let paths = recording::collect_recordings(&recordings)?;
            if paths.is_empty() {
                return Err(anyhow!(
                    "no *.jsonl recordings in {}",
                    recordings.display()
                ));
            }

            let report = benchmark::run_benchmark(BenchmarkConfig {
                agent_config: cfg,
                recordings: paths,
                out_dir: out_dir.clone(),
                jobs,
            })?;

            eprintln!(
                "recordings={} ticks={} divergent={} agreement={:.3}",
                report.recording_count,
                report.total_ticks,
                report.total_divergent,
                report.agreement_rate,
            );
            for run in report.runs.iter().take(5) {
                eprintln!(
                    "  {} divergent={}/{}",
                    run.source, run.divergent_ticks, run.ticks
                );
            }
            eprintln!("summary: {}", out_dir.join("summary.json").display());
        }

        Command::ShowConfig { config, preset } => {
            let cfg = load_config(config.as_deref(), preset.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
    }

    Ok(())
}
