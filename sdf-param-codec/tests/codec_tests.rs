//! Integration tests for sdf-param-codec

use std::fmt::Debug;

use sdf_param_codec::{
    Color, ParamCodec, ParseError, Pose, Quaternion, Time, Vector2d, Vector2i, Vector3, decode,
    encode,
};

fn assert_round_trip<T: ParamCodec + PartialEq + Debug>(value: T) {
    let text = encode(&value);
    assert_eq!(decode::<T>(&text), Ok(value), "round trip through {text:?}");
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_scalar_round_trip() {
    assert_round_trip(true);
    assert_round_trip(false);
    assert_round_trip(i32::MIN);
    assert_round_trip(-17i32);
    assert_round_trip(u32::MAX);
    assert_round_trip(f32::MIN_POSITIVE);
    assert_round_trip(0.1f32);
    assert_round_trip(1e-300f64);
    assert_round_trip(std::f64::consts::PI);
    assert_round_trip(-0.0f64);
    assert_round_trip('z');
    assert_round_trip('\t');
    assert_round_trip(" keeps spaces ".to_string());
}

#[test]
fn test_compound_round_trip() {
    assert_round_trip(Vector2i::new(-3, 7));
    assert_round_trip(Vector2d::new(0.25, -1e10));
    assert_round_trip(Vector3::new(5.5645e-6, 22.8758e-6, -42.3884e-6));
    assert_round_trip(Quaternion::new(0.7071067811865476, 0.0, 0.7071067811865476, 0.0));
    assert_round_trip(Pose::new(
        Vector3::new(1.0, -2.5, 0.125),
        Quaternion::new(0.5, 0.5, 0.5, 0.5),
    ));
    assert_round_trip(Color::new(0.1, 0.2, 0.3, 1.0));
    assert_round_trip(Time::new(12, 500_000_000));
}

// ============================================================================
// Canonical forms
// ============================================================================

#[test]
fn test_double_canonical_form() {
    assert_eq!(encode(&2.0f64), "2");
    assert_eq!(encode(&1.5f64), "1.5");
    assert_eq!(decode::<f64>("2"), Ok(2.0));
    assert_eq!(decode::<f64>("2.0"), Ok(2.0));
}

#[test]
fn test_compound_canonical_forms() {
    assert_eq!(encode(&Vector2i::new(1, 2)), "1 2");
    assert_eq!(encode(&Color::default()), "0 0 0 1");
    assert_eq!(encode(&Quaternion::default()), "1 0 0 0");
    assert_eq!(encode(&Time::new(3, 4)), "3 4");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_arity_checked_before_tokens() {
    assert_eq!(
        decode::<Color>("red green blue"),
        Err(ParseError::WrongArity {
            type_name: "color",
            expected: 4,
            found: 3,
        })
    );
}

#[test]
fn test_error_messages() {
    let err = decode::<f64>("abc").unwrap_err();
    assert_eq!(err.to_string(), "'abc' is not a valid double");

    let err = decode::<Vector2d>("1 2 3").unwrap_err();
    assert_eq!(err.to_string(), "vector2d expects 2 tokens, found 3");
}

#[test]
fn test_time_rejects_fractional_seconds() {
    assert!(matches!(
        decode::<Time>("1.5 0"),
        Err(ParseError::Malformed { type_name: "time", .. })
    ));
}
