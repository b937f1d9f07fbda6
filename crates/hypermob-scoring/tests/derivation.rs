use hypermob_core::models::field::{Field, FieldKind, CATALOG};
use hypermob_core::models::observation::RawObservation;
use hypermob_core::schema::Column;
use hypermob_scoring::derivation::{
    bmi, plausible_bmi, Derivation, GmsCategory, Observation, DEFAULT_BMI_DECIMALS, MAX_BMI_DECIMALS,
};
use hypermob_scoring::error::ScoringError;
use hypermob_scoring::rules::ValidationReason;
use hypermob_scoring::schemes::unweighted::UnweightedV1;
use hypermob_scoring::schemes::weighted::{WeightedV2, WEIGHTED_THRESHOLD};
use hypermob_scoring::{all_schemes, get_scheme, ScoringScheme, DEFAULT_SCHEME_ID};
use proptest::prelude::*;

fn baseline(gms: u8) -> RawObservation {
    let mut raw: RawObservation = CATALOG
        .iter()
        .filter(|s| s.kind == FieldKind::Binary)
        .map(|s| (s.field, "0"))
        .collect();
    raw.set(Field::Age, "30");
    raw.set(Field::HeightCm, "170");
    raw.set(Field::WeightKg, "85");
    raw.set(Field::Gms, gms.to_string());
    raw
}

#[test]
fn healthy_baseline_is_not_classified() {
    let record = Derivation::default().derive(&baseline(3), 1).unwrap();
    assert_eq!(record.bmi, 29.41);
    assert_eq!(record.bmi_under_25, 0);
    assert_eq!(record.gms_category, 1);
    assert_eq!(record.gms_light, 0);
    assert_eq!(record.gms_expressed, 0);
    assert_eq!(record.score, 0);
    assert_eq!(record.disease, 0);
    assert_eq!(record.height_cm, Some(170.0));
    assert_eq!(record.weight_kg, Some(85.0));
    assert_eq!(record.clinician_id, 1);
}

#[test]
fn expressed_mobility_with_hernia_and_ptosis_is_classified() {
    let mut raw = baseline(7);
    raw.set(Field::Hernia, "1");
    raw.set(Field::Ptosis, "1");

    let record = Derivation::default().derive(&raw, 1).unwrap();
    assert_eq!(record.gms_category, 3);
    assert_eq!(record.gms_expressed, 1);
    assert_eq!(record.score, 9);
    assert_eq!(record.disease, 1);
}

#[test]
fn score_just_below_threshold_is_not_classified() {
    let mut raw = baseline(4);
    raw.set(Field::Hernia, "1");
    raw.set(Field::Keloid, "1");

    let record = Derivation::default().derive(&raw, 1).unwrap();
    assert_eq!(record.gms_light, 1);
    // hernia 3 + keloid 2 + light mobility 2
    assert_eq!(record.score, 7);
    assert!(record.score < WEIGHTED_THRESHOLD);
    assert_eq!(record.disease, 0);
}

#[test]
fn unscored_fields_do_not_change_the_weighted_score() {
    let mut raw = baseline(3);
    raw.set(Field::Dst, "1");
    raw.set(Field::SkinLight, "1");
    raw.set(Field::SkinHeavy, "1");

    let record = Derivation::default().derive(&raw, 1).unwrap();
    assert_eq!(record.dst, 1);
    assert_eq!(record.skin_heavy, 1);
    assert_eq!(record.score, 0);
}

#[test]
fn low_bmi_contributes_one_point() {
    let mut raw = baseline(3);
    raw.set(Field::WeightKg, "60");

    let record = Derivation::default().derive(&raw, 1).unwrap();
    assert_eq!(record.bmi, 20.76);
    assert_eq!(record.bmi_under_25, 1);
    assert_eq!(record.score, 1);
}

#[test]
fn unweighted_scheme_counts_flags_against_five() {
    let derivation = Derivation::new(DEFAULT_BMI_DECIMALS, Box::new(UnweightedV1)).unwrap();
    let mut raw = baseline(7);
    raw.set(Field::WeightKg, "60");
    for field in [Field::Hernia, Field::Ptosis, Field::SkinLight] {
        raw.set(field, "1");
    }

    let record = derivation.derive(&raw, 1).unwrap();
    // hernia, ptosis, skin, expressed mobility; BMI is not counted
    assert_eq!(record.score, 4);
    assert_eq!(record.disease, 0);

    raw.set(Field::Gerd, "1");
    let record = derivation.derive(&raw, 1).unwrap();
    assert_eq!(record.score, 5);
    assert_eq!(record.disease, 1);
}

#[test]
fn parsed_observation_exposes_validated_values() {
    let obs = Observation::parse(&baseline(7)).unwrap();
    assert_eq!(obs.age(), 30);
    assert_eq!(obs.height_cm(), 170.0);
    assert_eq!(obs.weight_kg(), 85.0);
    assert_eq!(obs.gms(), 7);
    assert_eq!(obs.flag(Field::Hernia), 0);
}

#[test]
fn unstorable_bmi_is_a_contract_violation() {
    let mut raw = baseline(3);
    raw.set(Field::HeightCm, "1e-200");
    raw.set(Field::WeightKg, "1e200");

    let err = Derivation::default().derive(&raw, 1).unwrap_err();
    assert!(matches!(
        err,
        ScoringError::Contract {
            field: Field::WeightKg,
            reason: ValidationReason::ImplausibleBmi
        }
    ));
}

#[test]
fn missing_field_is_a_contract_violation() {
    let mut raw = baseline(3);
    raw.clear(Field::Hypotension);

    let err = Derivation::default().derive(&raw, 1).unwrap_err();
    assert!(matches!(
        err,
        ScoringError::Contract {
            field: Field::Hypotension,
            reason: ValidationReason::Missing
        }
    ));
}

#[test]
fn bmi_precision_is_configurable() {
    let derivation = Derivation::new(0, Box::new(WeightedV2)).unwrap();
    let record = derivation.derive(&baseline(3), 1).unwrap();
    assert_eq!(record.bmi, 29.0);
    assert!(Derivation::new(9, Box::new(WeightedV2)).is_err());
}

#[test]
fn scheme_registry_resolves_ids() {
    assert_eq!(all_schemes().len(), 2);
    assert_eq!(get_scheme(DEFAULT_SCHEME_ID).unwrap().threshold(), 8);
    assert_eq!(get_scheme("unweighted_v1").unwrap().threshold(), 5);
    assert!(get_scheme("blended").is_none());
    assert!(matches!(
        Derivation::from_scheme_id("blended", 2),
        Err(ScoringError::UnknownScheme(_))
    ));
}

#[test]
fn weight_tables_only_reference_flag_columns() {
    for scheme in all_schemes() {
        for weight in scheme.weights() {
            assert_eq!(weight.column.kind(), FieldKind::Binary, "{}", scheme.id());
            assert!(weight.weight > 0);
        }
    }
}

#[test]
fn contributions_list_the_scored_flags() {
    let mut raw = baseline(7);
    raw.set(Field::Hernia, "1");
    let record = Derivation::default().derive(&raw, 1).unwrap();

    let columns: Vec<_> = WeightedV2
        .contributions(&record)
        .iter()
        .map(|w| w.column)
        .collect();
    assert_eq!(columns, vec![Column::Hernia, Column::GmsExpressed]);
}

proptest! {
    #[test]
    fn gms_categories_partition_the_score_range(g in 1u8..=9) {
        let category = GmsCategory::from_score(g);
        let expected = match g {
            1..=3 => 1,
            4 | 5 => 2,
            _ => 3,
        };
        prop_assert_eq!(category.value(), expected);
        prop_assert!(category.light_flag() + category.expressed_flag() <= 1);
        prop_assert_eq!(category.light_flag() == 1, expected == 2);
        prop_assert_eq!(category.expressed_flag() == 1, expected == 3);

        let record = Derivation::default().derive(&baseline(g), 1).unwrap();
        prop_assert_eq!(record.gms_category, expected);
    }

    #[test]
    fn bmi_flag_matches_rounded_bmi(height in 100.0f64..220.0, weight in 30.0f64..180.0) {
        let mut raw = baseline(3);
        raw.set(Field::HeightCm, height.to_string());
        raw.set(Field::WeightKg, weight.to_string());

        let record = Derivation::default().derive(&raw, 1).unwrap();
        let expected = bmi(weight, height, DEFAULT_BMI_DECIMALS);
        prop_assert_eq!(record.bmi, expected);
        prop_assert_eq!(record.bmi_under_25 == 1, expected < 25.0);
    }

    #[test]
    fn plausible_bmi_is_storable_at_every_precision(
        height in 1.0f64..1000.0,
        weight in 0.1f64..1000.0,
        decimals in 0u32..=MAX_BMI_DECIMALS,
    ) {
        prop_assume!(plausible_bmi(weight, height));
        let value = bmi(weight, height, decimals);
        prop_assert!(value.is_finite());
        prop_assert!(value > 0.0);
    }

    #[test]
    fn disease_tracks_threshold(flags in proptest::collection::vec(0u8..=1, 24)) {
        let mut raw = baseline(3);
        let binaries: Vec<_> = CATALOG.iter().filter(|s| s.kind == FieldKind::Binary).collect();
        for (spec, value) in binaries.iter().zip(flags) {
            raw.set(spec.field, value.to_string());
        }

        let record = Derivation::default().derive(&raw, 1).unwrap();
        prop_assert_eq!(record.score, WeightedV2.score(&record));
        prop_assert_eq!(record.disease == 1, record.score >= WEIGHTED_THRESHOLD);
    }
}
