use pursuit_app::config::Config;
use pursuit_app::domains::pursuit::{AgentId, RuleKind};
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = r#"
[simulation]
tick_interval_ms = 20
refresh_interval = 3
max_ticks = 100
seed = 11

[arena]
walls = [[5.0, -10.0, 5.0, 10.0]]

[target]
start = [10.0, 0.0]
speed = 2.5

[target.pointer]
waypoints = [[10.0, 0.0], [20.0, 5.0]]
hold_ticks = 30

[[agents]]
id = 1
start = [0.0, 0.0]
speed = 1.0
rule = "weighted"

[[agents]]
id = 2
start = [0.0, 3.0]
rule = "randomized_walk"

[render]
show_routes = true
"#;

#[tokio::test]
async fn test_from_file_reads_every_section() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pursuit.toml");
    fs::write(&path, SAMPLE).unwrap();

    let config = Config::from_file(&path).await.unwrap();
    assert_eq!(config.simulation.tick_interval_ms, 20);
    assert_eq!(config.simulation.refresh_interval, 3);
    assert_eq!(config.simulation.seed, 11);
    assert_eq!(config.arena.walls, vec![[5.0, -10.0, 5.0, 10.0]]);
    assert!(config.arena.name.is_none());
    assert_eq!(config.target.speed, 2.5);
    assert_eq!(config.target.pointer.hold_ticks, 30);
    assert_eq!(config.agents.len(), 2);
    assert_eq!(config.agents[1].rule, RuleKind::RandomizedWalk);
    assert_eq!(config.agents[1].speed, 1.5);
    assert!(config.render.show_routes);
    assert!(!config.render.show_graph);
    assert_eq!(config.logging.file, "logs/pursuit-app.log");

    let settings = config.session_settings();
    assert_eq!(settings.refresh_interval, 3);
    assert_eq!(settings.seed, 11);
    let spawns = config.agent_spawns();
    assert_eq!(spawns[0].id, AgentId(1));
    assert_eq!(spawns[0].rule, RuleKind::Weighted);
}

#[tokio::test]
async fn test_from_file_rejects_unknown_rules() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[[agents]]\nid = 1\nstart = [0.0, 0.0]\nrule = \"teleport\"\n").unwrap();
    assert!(Config::from_file(&path).await.is_err());
    assert!(Config::from_file(dir.path().join("missing.toml")).await.is_err());
}

#[test]
fn test_load_layers_environment_over_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pursuit.toml");
    fs::write(&path, SAMPLE).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.simulation.max_ticks, 100);
    assert_eq!(config.agents.len(), 2);
    assert_eq!(config.agents[0].rule, RuleKind::Weighted);

    std::env::set_var("PURSUIT__SIMULATION__MAX_TICKS", "42");
    let overridden = Config::load(&path);
    std::env::remove_var("PURSUIT__SIMULATION__MAX_TICKS");
    assert_eq!(overridden.unwrap().simulation.max_ticks, 42);
}

#[test]
fn test_default_is_a_runnable_demo() {
    let config = Config::default();
    assert_eq!(config.simulation.refresh_interval, 5);
    assert_eq!(config.simulation.tick_interval_ms, 16);
    assert_eq!(config.target.speed, 2.0);
    assert!(!config.arena.walls.is_empty());

    let mut rules: Vec<RuleKind> = config.agents.iter().map(|a| a.rule).collect();
    rules.dedup();
    assert_eq!(rules.len(), 7);
    for spawn in config.agent_spawns() {
        assert!(spawn.validate().is_ok());
    }
}
