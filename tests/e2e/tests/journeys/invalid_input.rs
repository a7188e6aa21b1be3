//! # Invalid Input Journeys
//!
//! Misuse is reported to the caller as a typed error, never turned into a
//! silently wrong card.

use lapse_core::{Card, Deck, DeckParams, Grade, SchedulerError};
use lapse_e2e_tests::{REFERENCE_WEIGHTS, reference_deck};

#[test]
fn test_out_of_range_grades() {
    assert_eq!(Grade::try_from(0_i64), Err(SchedulerError::InvalidGrade(0)));
    assert_eq!(Grade::try_from(5_i64), Err(SchedulerError::InvalidGrade(5)));
    assert_eq!("0".parse::<Grade>(), Err(SchedulerError::InvalidGrade(0)));
    assert_eq!("5".parse::<Grade>(), Err(SchedulerError::InvalidGrade(5)));

    // A stored review log carrying a bad grade fails on load
    let err = serde_json::from_str::<Grade>("5").unwrap_err();
    assert!(err.to_string().contains("Invalid grade: 5"));
}

#[test]
fn test_zero_stability_card() {
    let deck = reference_deck();
    let card = Card::from_parts(5.0, 0.0, 1.0);

    for grade in Grade::ALL {
        assert_eq!(
            deck.grade_card(&card, 1.0, grade),
            Err(SchedulerError::InvalidStability(0.0))
        );
    }
    assert!(deck.preview(&card, 1.0).is_err());
    assert!(deck.retrievability(&card, 1.0).is_err());
}

#[test]
fn test_corrupt_stored_card() {
    let deck = reference_deck();

    let negative: Card = serde_json::from_str(r#"{"D": 5.0, "S": -3.0, "I": 1.0}"#).unwrap();
    assert_eq!(
        deck.grade_card(&negative, 1.0, Grade::Good),
        Err(SchedulerError::InvalidStability(-3.0))
    );

    let too_easy: Card = serde_json::from_str(r#"{"D": 0.5, "S": 3.0, "I": 3.0}"#).unwrap();
    assert_eq!(
        deck.grade_card(&too_easy, 1.0, Grade::Good),
        Err(SchedulerError::InvalidDifficulty(0.5))
    );
}

#[test]
fn test_retention_checked_at_construction() {
    // 1e-200 is inside (0, 1] but its interval overflows to infinity
    for rate in [1.5, 0.0, -0.2, 1e-200, f64::MIN_POSITIVE] {
        let params = DeckParams {
            requested_retention_rate: Some(rate),
            w: None,
        };
        assert_eq!(
            Deck::new(params),
            Err(SchedulerError::InvalidRetentionRate(rate))
        );
    }

    // Exactly 1 is allowed: review immediately
    let strict = Deck::new(DeckParams {
        requested_retention_rate: Some(1.0),
        w: None,
    })
    .unwrap();
    assert_eq!(strict.new_card(Grade::Good).unwrap().interval(), 0.0);
}

#[test]
fn test_retention_checked_when_loaded_from_json() {
    let params = DeckParams::from_json_str(r#"{"requestedRetentionRate": 1.5}"#).unwrap();
    assert_eq!(
        Deck::new(params),
        Err(SchedulerError::InvalidRetentionRate(1.5))
    );
}

#[test]
fn test_malformed_weight_vectors() {
    let too_short = DeckParams {
        requested_retention_rate: None,
        w: Some(REFERENCE_WEIGHTS[..16].to_vec()),
    };
    assert!(matches!(
        Deck::new(too_short),
        Err(SchedulerError::InvalidConfiguration(_))
    ));

    let mut too_long = REFERENCE_WEIGHTS.to_vec();
    too_long.extend([0.5, 0.5]);
    let too_long = DeckParams {
        requested_retention_rate: None,
        w: Some(too_long),
    };
    assert!(matches!(
        Deck::new(too_long),
        Err(SchedulerError::InvalidConfiguration(_))
    ));

    let mut with_nan = REFERENCE_WEIGHTS.to_vec();
    with_nan[12] = f64::NAN;
    let with_nan = DeckParams {
        requested_retention_rate: None,
        w: Some(with_nan),
    };
    assert!(matches!(
        Deck::new(with_nan),
        Err(SchedulerError::InvalidConfiguration(msg)) if msg.contains("w[12]")
    ));
}

#[test]
fn test_explicit_empty_weights_not_replaced_by_defaults() {
    let params = DeckParams::from_json_str(r#"{"w": []}"#).unwrap();
    assert_eq!(params.w, Some(Vec::new()));
    assert!(Deck::new(params).is_err());
}

#[test]
fn test_negative_elapsed_days() {
    let deck = reference_deck();
    let card = deck.new_card(Grade::Good).unwrap();
    assert_eq!(
        deck.grade_card(&card, -1.0, Grade::Good),
        Err(SchedulerError::InvalidElapsedDays(-1.0))
    );
    assert!(deck.grade_card(&card, f64::INFINITY, Grade::Good).is_err());
}

#[test]
fn test_non_positive_initial_stability_weight() {
    let mut w = REFERENCE_WEIGHTS.to_vec();
    w[0] = 0.0;
    let deck = Deck::new(DeckParams {
        requested_retention_rate: None,
        w: Some(w),
    })
    .unwrap();

    assert_eq!(
        deck.new_card(Grade::Again),
        Err(SchedulerError::InvalidStability(0.0))
    );
    assert!(deck.new_card(Grade::Good).is_ok());
}
