use crate::domains::geometry::Point;
use crate::domains::pursuit::{AgentSpawn, RenderOptions, RuleKind, SessionSettings, Tracked};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
    #[serde(default)]
    pub render: RenderOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    /// Full visibility refresh every this many ticks.
    pub refresh_interval: u64,
    /// 0 runs until interrupted.
    pub max_ticks: u64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            refresh_interval: 5,
            max_ticks: 600,
            seed: 7,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub data_dir: Option<PathBuf>,
    /// File under `<data_dir>/arenas`. Takes precedence over `walls`.
    pub name: Option<String>,
    pub walls: Vec<[f64; 4]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub start: [f64; 2],
    pub speed: f64,
    pub pointer: PointerConfig,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            start: [90.0, 50.0],
            speed: 2.0,
            pointer: PointerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub waypoints: Vec<[f64; 2]>,
    pub hold_ticks: u64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            hold_ticks: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub id: u32,
    pub start: [f64; 2],
    #[serde(default = "default_agent_speed")]
    pub speed: f64,
    pub rule: RuleKind,
}

fn default_agent_speed() -> f64 {
    1.5
}

impl AgentConfig {
    fn new(id: u32, start: [f64; 2], rule: RuleKind) -> Self {
        Self { id, start, speed: default_agent_speed(), rule }
    }

    pub fn to_spawn(&self) -> AgentSpawn {
        AgentSpawn::new(self.id, Point::from(self.start), self.speed, self.rule)
            .tracking(Tracked::Target)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { file: "logs/pursuit-app.log".to_string() }
    }
}

impl Config {
    /// TOML file (optional) layered under `PURSUIT__SECTION__KEY` environment
    /// variables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix("PURSUIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            refresh_interval: self.simulation.refresh_interval,
            seed: self.simulation.seed,
            render: self.render,
        }
    }

    pub fn agent_spawns(&self) -> Vec<AgentSpawn> {
        self.agents.iter().map(AgentConfig::to_spawn).collect()
    }
}

impl Default for Config {
    /// Runnable demo: four walls and one pursuer per rule.
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            arena: ArenaConfig {
                walls: vec![
                    [20.0, 20.0, 20.0, 80.0],
                    [40.0, 0.0, 40.0, 50.0],
                    [60.0, 50.0, 60.0, 100.0],
                    [75.0, 20.0, 75.0, 80.0],
                ],
                ..ArenaConfig::default()
            },
            target: TargetConfig {
                pointer: PointerConfig {
                    waypoints: vec![[90.0, 50.0], [90.0, 10.0], [10.0, 90.0], [50.0, 60.0]],
                    hold_ticks: 120,
                },
                ..TargetConfig::default()
            },
            agents: vec![
                AgentConfig::new(1, [5.0, 5.0], RuleKind::Seek),
                AgentConfig::new(2, [5.0, 50.0], RuleKind::BreadthFirst),
                AgentConfig::new(3, [5.0, 95.0], RuleKind::DepthFirst),
                AgentConfig::new(4, [50.0, 95.0], RuleKind::Weighted),
                AgentConfig::new(5, [50.0, 5.0], RuleKind::RandomizedWalk),
                AgentConfig::new(6, [30.0, 30.0], RuleKind::RandomWalk),
                AgentConfig::new(7, [70.0, 90.0], RuleKind::StandStill),
            ],
            render: RenderOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}
