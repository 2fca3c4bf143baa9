use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use rfl_reflect::{Codec, DecodeError, Enumerated, Record, SumType};
use serde_json::json;

#[derive(Enumerated, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i8)]
enum Direction {
    #[default]
    Up = 1,
    Down = -1,
}

#[derive(Enumerated, Debug, PartialEq, Default)]
enum Plain {
    #[default]
    A,
    B,
    C = 10,
}

#[derive(SumType, Debug, PartialEq)]
enum Payload {
    Nothing,
    Count(u32),
    Name(String),
}

#[derive(Record, Debug, PartialEq)]
struct Everything {
    direction: Direction,
    plain: Plain,
    payload: Option<Payload>,
    outcome: Result<u8, String>,
    pair: (u8, String),
    unit: (),
    queue: VecDeque<i64>,
    lookup: BTreeMap<u8, String>,
    timeout: Duration,
    maybe: Option<f32>,
}

impl Default for Everything {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            plain: Plain::default(),
            payload: None,
            outcome: Ok(0),
            pair: Default::default(),
            unit: (),
            queue: VecDeque::new(),
            lookup: BTreeMap::new(),
            timeout: Duration::ZERO,
            maybe: Some(1.0),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::Nothing
    }
}

#[test]
fn enumerated_uses_repr() {
    assert_eq!(Direction::Down.to_repr(), -1i8);
    assert_eq!(Direction::Down.encode(), json!(-1));
    assert_eq!(Plain::C.encode(), json!(10));
    assert_eq!(Plain::from_repr(1), Some(Plain::B));

    let mut d = Direction::Up;
    d.decode(&json!(-1)).unwrap();
    assert_eq!(d, Direction::Down);
    assert!(matches!(
        d.decode(&json!(0)),
        Err(DecodeError::UnknownDiscriminant { .. })
    ));
    assert!(matches!(d.decode(&json!(200)), Err(DecodeError::OutOfRange { .. })));
}

#[test]
fn sum_type_indices() {
    assert_eq!(Payload::ALTERNATIVES, 3);
    assert_eq!(Payload::Name("n".into()).encode(), json!([2, "n"]));
    assert_eq!(Payload::Nothing.encode(), json!([0, null]));

    let mut p = Payload::Nothing;
    p.decode(&json!([1, 9])).unwrap();
    assert_eq!(p, Payload::Count(9));

    assert_eq!(
        p.decode(&json!([5, null])),
        Err(DecodeError::IndexOutOfRange { index: 5, count: 3 })
    );
    assert_eq!(p.decode(&json!(["x", null])), Err(DecodeError::InvalidIndex));
    assert_eq!(p, Payload::Count(9));
}

#[test]
fn maps_decode_in_any_order() {
    let map = HashMap::from([(1u8, "x".to_owned()), (2, "y".to_owned())]);
    let mut forward = HashMap::new();
    forward.decode(&json!([[1, "x"], [2, "y"]])).unwrap();
    let mut backward = HashMap::new();
    backward.decode(&json!([[2, "y"], [1, "x"]])).unwrap();
    assert_eq!(forward, map);
    assert_eq!(backward, map);
}

#[test]
fn every_shape_round_trips_through_a_record() {
    let value = Everything {
        direction: Direction::Down,
        plain: Plain::C,
        payload: Some(Payload::Name("p".into())),
        outcome: Err("boom".into()),
        pair: (3, "three".into()),
        unit: (),
        queue: VecDeque::from([-5, 5]),
        lookup: BTreeMap::from([(1, "one".into())]),
        timeout: Duration::from_millis(1500),
        maybe: None,
    };

    let tree = value.encode();
    assert_eq!(
        tree,
        json!({
            "direction": -1,
            "plain": 10,
            "payload": [2, "p"],
            "outcome": [1, "boom"],
            "pair": [3, "three"],
            "unit": [],
            "queue": [-5, 5],
            "lookup": [[1, "one"]],
            "timeout": 1_500_000,
            "maybe": null,
        })
    );

    let mut back = Everything::default();
    back.decode(&tree).unwrap();
    assert_eq!(back, value);
}

#[test]
fn field_errors_name_their_path() {
    let mut value = Everything::default();
    let err = value
        .decode(&json!({ "pair": [1, 2] }))
        .unwrap_err();
    assert_eq!(err.field_path().as_deref(), Some("pair"));
    assert!(err.to_string().starts_with("pair: "));
}
