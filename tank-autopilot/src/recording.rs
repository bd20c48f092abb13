//! JSON Lines game recordings: one `session` header, a `tick` per decision,
//! and a closing `finish` entry.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use arena_core::{Action, ArenaLimits, Decision, Mode, Observation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordEntry {
    Session {
        game: String,
        moniker: String,
        agent_id: String,
        limits: ArenaLimits,
    },
    Tick {
        index: u32,
        observation: Observation,
        action: Action,
        mode: Mode,
    },
    Finish {
        status: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedTick {
    pub index: u32,
    pub observation: Observation,
    pub action: Action,
    pub mode: Mode,
}

#[derive(Clone, Debug)]
pub struct Recording {
    pub source: PathBuf,
    pub game: String,
    pub moniker: String,
    pub agent_id: String,
    pub limits: ArenaLimits,
    pub ticks: Vec<RecordedTick>,
    /// `None` when the run was cut short before the game ended.
    pub final_status: Option<String>,
}

pub struct Recorder {
    path: PathBuf,
    out: BufWriter<File>,
}

impl Recorder {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed creating recording {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(
        &mut self,
        game: &str,
        moniker: &str,
        agent_id: &str,
        limits: ArenaLimits,
    ) -> Result<()> {
        self.write(&RecordEntry::Session {
            game: game.to_string(),
            moniker: moniker.to_string(),
            agent_id: agent_id.to_string(),
            limits,
        })
    }

    pub fn tick(&mut self, index: u32, observation: &Observation, decision: Decision) -> Result<()> {
        self.write(&RecordEntry::Tick {
            index,
            observation: observation.clone(),
            action: decision.action,
            mode: decision.mode,
        })
    }

    pub fn finish(&mut self, status: &str) -> Result<()> {
        self.write(&RecordEntry::Finish {
            status: status.to_string(),
        })
    }

    // Flushed per entry so a crashed run still leaves a readable prefix.
    fn write(&mut self, entry: &RecordEntry) -> Result<()> {
        serde_json::to_writer(&mut self.out, entry).context("failed to serialize entry")?;
        self.out.write_all(b"\n")?;
        self.out
            .flush()
            .with_context(|| format!("failed writing {}", self.path.display()))
    }
}

pub fn load_recording(path: &Path) -> Result<Recording> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed reading recording {}", path.display()))?;
    let mut entries = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str::<RecordEntry>(line)
                .with_context(|| format!("{}:{}: invalid entry", path.display(), n + 1))
        });

    let mut recording = match entries.next().transpose()? {
        Some(RecordEntry::Session {
            game,
            moniker,
            agent_id,
            limits,
        }) => Recording {
            source: path.to_path_buf(),
            game,
            moniker,
            agent_id,
            limits,
            ticks: Vec::new(),
            final_status: None,
        },
        Some(_) => bail!("{}: first entry must be a session header", path.display()),
        None => bail!("{}: recording is empty", path.display()),
    };

    for entry in entries {
        if recording.final_status.is_some() {
            bail!("{}: entries after finish", path.display());
        }
        match entry? {
            RecordEntry::Tick {
                index,
                observation,
                action,
                mode,
            } => recording.ticks.push(RecordedTick {
                index,
                observation,
                action,
                mode,
            }),
            RecordEntry::Finish { status } => recording.final_status = Some(status),
            RecordEntry::Session { .. } => {
                return Err(anyhow!("{}: duplicate session header", path.display()))
            }
        }
    }
    Ok(recording)
}

/// Every `*.jsonl` file directly under `dir`, sorted by name.
pub fn collect_recordings(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("failed listing {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "jsonl") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
