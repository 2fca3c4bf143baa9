use std::path::PathBuf;
use std::time::Duration;

use rfl_reflect::load::{FlatLoader, RequiredTracker, TreeLoader};
use rfl_reflect::{DecodeError, Enumerated, Record};
use serde_json::json;

#[derive(Enumerated, Debug, Clone, Copy, PartialEq, Default)]
#[repr(u8)]
enum FanMode {
    #[default]
    Auto = 0,
    On = 1,
    Circulate = 2,
}

#[derive(Record, Default, Debug)]
struct Setpoint {
    #[record(required)]
    target: f64,
    fan_mode: FanMode,
}

#[derive(Record, Default, Debug)]
struct Thermostat {
    #[record(required)]
    name: String,
    setpoint: Setpoint,
    log_dir: Option<PathBuf>,
    poll: Duration,
    zones: Vec<String>,
    #[record(skip_flat)]
    history: Vec<f64>,
}

#[test]
fn command_line_style() {
    let mut t = Thermostat::default();
    FlatLoader::assign(&mut t, "setpoint.fan_mode", "1").unwrap();
    FlatLoader::assign(&mut t, "setpoint", "target.19.5").unwrap();
    FlatLoader::load_dotted(&mut t, "setpoint.fan-mode.2").unwrap();
    FlatLoader::assign(&mut t, "log-dir", "/var/log/t").unwrap();
    FlatLoader::assign(&mut t, "poll", "250000").unwrap();
    FlatLoader::assign(&mut t, "zones", "hall").unwrap();
    FlatLoader::assign(&mut t, "zones", "attic").unwrap();

    assert_eq!(t.setpoint.fan_mode, FanMode::Circulate);
    assert_eq!(t.setpoint.target, 19.5);
    assert_eq!(t.log_dir, Some(PathBuf::from("/var/log/t")));
    assert_eq!(t.poll, Duration::from_millis(250));
    assert_eq!(t.zones, ["hall", "attic"]);
}

#[test]
fn flat_errors() {
    let mut t = Thermostat::default();
    assert!(matches!(
        FlatLoader::assign(&mut t, "history", "1.0"),
        Err(DecodeError::UnknownField { .. })
    ));
    assert!(matches!(
        FlatLoader::assign(&mut t, "setpoint.fan_mode", "7"),
        Err(DecodeError::Field { field: "setpoint", .. })
    ));
    assert_eq!(
        FlatLoader::assign(&mut t, "name.first", "x"),
        Err(DecodeError::NotARecord { field: "name" })
    );
    assert!(FlatLoader::assign(&mut t, "poll", "-1").is_err());
    assert!(FlatLoader::assign(&mut t, "setpoint.target", "warm").is_err());
}

#[test]
fn one_tracker_across_tree_and_flat_loads() {
    let mut t = Thermostat::default();
    let mut tracker = RequiredTracker::<Thermostat>::new();

    TreeLoader::new()
        .load_tracked(&mut t, &json!({ "setpoint": { "target": 20.0 } }), &mut tracker)
        .unwrap();
    assert!(!tracker.seen_all());
    assert_eq!(
        tracker.check(),
        Err(DecodeError::MissingRequired { fields: vec!["name"] })
    );

    FlatLoader::assign_tracked(&mut t, "name", "hall", &mut tracker).unwrap();
    FlatLoader::assign_tracked(&mut t, "name", "lobby", &mut tracker).unwrap();
    assert_eq!(tracker.seen_count(), 1);
    assert!(tracker.check().is_ok());
    assert_eq!(t.name, "lobby");
}

#[test]
fn nested_tracker_through_registry() {
    let mut setpoint = Setpoint::default();
    let mut tracker = RequiredTracker::<Setpoint>::new();
    let registry = Setpoint::registry();

    let fan_mode = registry.find::<()>("fan-mode").unwrap();
    tracker.handle(fan_mode, &mut setpoint, &json!(1)).unwrap();
    assert!(!tracker.seen_all());
    assert_eq!(tracker.missing().map(|f| f.name()).collect::<Vec<_>>(), ["target"]);

    let target = registry.find::<()>("target").unwrap();
    assert!(tracker.handle(target, &mut setpoint, &json!("hot")).is_err());
    assert!(!tracker.seen_all());
    tracker.handle(target, &mut setpoint, &json!(18)).unwrap();
    assert!(tracker.seen_all());
}
