use std::path::PathBuf;
use vtally::config::Config;
use vtally::core::oplog::OpLog;
use vtally::errors::AppError;
use vtally::utils::table::{strip_ansi, visible_width};

#[test]
fn test_partial_yaml_takes_defaults() {
    let cfg = Config::from_yaml("count_key: enter\nrecent_log_size: 3\n").expect("valid yaml");
    assert_eq!(cfg.count_key, "enter");
    assert_eq!(cfg.recent_log_size, 3);
    assert_eq!(cfg.export_file_name, "vehicle_log.csv");
    assert_eq!(cfg.time_format, "%H:%M:%S");
    assert!(cfg.is_count_key(" ENTER "));
    assert!(!cfg.is_count_key("space"));
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(matches!(
        Config::from_yaml("time_format: \"%Q\"\n"),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        Config::from_yaml("count_key: \"  \"\n"),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        Config::from_yaml("recent_log_size: lots\n"),
        Err(AppError::Yaml(_))
    ));
    assert!(matches!(
        Config::from_yaml("time_format: \"\"\n"),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        Config::from_yaml("recent_log_size: 0\n"),
        Err(AppError::Config(_))
    ));
}

#[test]
fn test_export_target_uses_dir_and_extension() {
    let cfg = Config {
        export_dir: "/tmp/tally".into(),
        ..Config::default()
    };
    assert_eq!(cfg.export_target("csv"), PathBuf::from("/tmp/tally/vehicle_log.csv"));
    assert_eq!(cfg.export_target("json"), PathBuf::from("/tmp/tally/vehicle_log.json"));
}

#[test]
fn test_oplog_render() {
    let mut ops = OpLog::new();
    assert!(ops.is_empty());
    assert!(ops.render().contains("empty"));

    ops.record("count", "manual-key", "#1 at video 00:12");
    ops.record("undo", "#1", "Removed entry");
    assert_eq!(ops.len(), 2);
    assert_eq!(ops.operations(), vec!["count", "undo"]);
    assert_eq!(ops.entries()[1].id, 2);

    let plain = strip_ansi(&ops.render());
    assert!(plain.contains("count (manual-key)"));
    assert!(plain.contains("=> #1 at video 00:12"));
    assert!(plain.contains("undo (#1)"));
}

#[test]
fn test_oplog_render_aligns_wide_targets() {
    let mut ops = OpLog::new();
    ops.record("export", "/tmp/conteggio_città_über.csv", "3 entries as csv");
    ops.record("count", "manual-key", "#1 at video 00:12");
    ops.record("export", "/tmp/日本語.csv", "1 entries as csv");

    let plain = strip_ansi(&ops.render());
    let arrows: Vec<usize> = plain
        .lines()
        .filter_map(|line| line.find(" => ").map(|i| visible_width(&line[..i])))
        .collect();
    assert_eq!(arrows.len(), 3);
    assert!(arrows.windows(2).all(|w| w[0] == w[1]), "{plain}");
}
