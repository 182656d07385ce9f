//! Content domain: tests for tuning defaults and RON parsing.

use std::path::Path;

use approx::assert_relative_eq;

use super::{CombatConfig, ConfigError, load_combat_config, parse_combat_config, secs};

const SHIPPED_CONFIG: &str = include_str!("../../assets/data/combat.ron");

#[test]
fn test_shipped_config_parses() {
    let config = parse_combat_config(SHIPPED_CONFIG).expect("shipped tuning should parse");

    assert_relative_eq!(config.boss.max_health, 500.0);
    assert_relative_eq!(config.boss.minion_max_health, 100.0);
    assert_eq!(config.boss.minion_count, 4);
    assert_eq!(config.clone.count, 5);
    assert_relative_eq!(config.abilities.area_strike_damage, 1000.0);
    assert_eq!(config.level.creature_count, 5);
}

#[test]
fn test_shipped_config_matches_built_in_defaults() {
    let shipped = parse_combat_config(SHIPPED_CONFIG).expect("shipped tuning should parse");
    let defaults = CombatConfig::default();

    assert_relative_eq!(shipped.creature.move_speed, defaults.creature.move_speed);
    assert_relative_eq!(shipped.boss.invincibility, defaults.boss.invincibility);
    assert_relative_eq!(shipped.clone.lifetime, defaults.clone.lifetime);
    assert_relative_eq!(
        shipped.player.base_lifesteal,
        defaults.player.base_lifesteal
    );
    assert_eq!(
        shipped.navigation.max_iterations,
        defaults.navigation.max_iterations
    );
    assert_eq!(shipped.level.fallback_spawn, defaults.level.fallback_spawn);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = parse_combat_config("(boss: (max_health: 800.0))").expect("partial tuning");

    assert_relative_eq!(config.boss.max_health, 800.0);
    assert_relative_eq!(config.boss.attack_damage, 10.0);
    assert_relative_eq!(config.creature.aggro_radius, 15.0);
}

#[test]
fn test_empty_document_is_all_defaults() {
    let config = parse_combat_config("()").expect("empty tuning");
    assert_relative_eq!(config.abilities.summon_cooldown, 30.0);
}

#[test]
fn test_malformed_config_reports_parse_error() {
    let err = parse_combat_config("(boss: (max_health: \"lots\"))").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_missing_file_reports_io_error() {
    let err = load_combat_config(Path::new("does/not/exist.ron")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("does/not/exist.ron"));
}

#[test]
fn test_secs_clamps_negative_spans() {
    assert_eq!(secs(-1.0).as_millis(), 0);
    assert_eq!(secs(1.5).as_millis(), 1500);
}
