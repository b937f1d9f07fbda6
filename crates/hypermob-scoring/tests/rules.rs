use hypermob_core::models::field::Field;
use hypermob_core::models::observation::RawObservation;
use hypermob_core::models::step::Step;
use hypermob_scoring::rules::{parse_value, validate_all, validate_step, ParsedValue, ValidationReason};

fn with(values: &[(Field, &str)]) -> RawObservation {
    values.iter().map(|(f, v)| (*f, *v)).collect()
}

#[test]
fn valid_anthropometrics_pass() {
    let raw = with(&[(Field::Age, "30"), (Field::HeightCm, "170.5"), (Field::WeightKg, " 85 ")]);
    assert!(validate_step(Step::Anthropometrics, &raw).is_ok());
}

#[test]
fn anthropometrics_report_one_combined_message() {
    let raw = with(&[(Field::Age, "30"), (Field::HeightCm, "-1"), (Field::WeightKg, "heavy")]);
    let err = validate_step(Step::Anthropometrics, &raw).unwrap_err();

    assert_eq!(err.step, Step::Anthropometrics);
    assert_eq!(err.field, Field::HeightCm);
    assert_eq!(err.reason, ValidationReason::NotPositive);
    assert_eq!(err.fields, vec![Field::HeightCm, Field::WeightKg]);
    for name in ["age", "height_cm", "weight_kg"] {
        assert!(err.message.contains(name), "message should name {name}");
    }
}

#[test]
fn fractional_age_is_rejected() {
    let raw = with(&[(Field::Age, "30.5"), (Field::HeightCm, "170"), (Field::WeightKg, "85")]);
    let err = validate_step(Step::Anthropometrics, &raw).unwrap_err();
    assert_eq!(err.reason, ValidationReason::NotInteger);
}

#[test]
fn non_finite_measurements_are_rejected() {
    let raw = with(&[(Field::Age, "30"), (Field::HeightCm, "inf"), (Field::WeightKg, "NaN")]);
    let err = validate_step(Step::Anthropometrics, &raw).unwrap_err();
    assert_eq!(err.reason, ValidationReason::NotNumber);
    assert_eq!(err.fields.len(), 2);
}

#[test]
fn gms_out_of_range_names_the_field() {
    let raw = with(&[(Field::Gms, "10")]);
    let err = validate_step(Step::JointMobility, &raw).unwrap_err();
    assert_eq!(err.field, Field::Gms);
    assert_eq!(err.reason, ValidationReason::OutOfRange { min: 1, max: 9 });
    assert!(err.message.contains("gms"));
    assert!(err.to_string().contains("from 1 to 9"));

    for ok in ["1", "5", "9"] {
        assert!(validate_step(Step::JointMobility, &with(&[(Field::Gms, ok)])).is_ok());
    }
    assert!(validate_step(Step::JointMobility, &with(&[(Field::Gms, "0")])).is_err());
}

#[test]
fn binary_fields_are_checked_independently() {
    let raw = with(&[(Field::VaricoseLight, "1"), (Field::VaricoseHeavy, "2")]);
    let err = validate_step(Step::Varicose, &raw).unwrap_err();
    assert_eq!(err.field, Field::VaricoseHeavy);
    assert_eq!(err.fields, vec![Field::VaricoseHeavy]);
    assert_eq!(err.reason, ValidationReason::NotBinary);
    assert!(err.message.contains("varicose_heavy"));
}

#[test]
fn blank_binary_is_missing() {
    let raw = with(&[(Field::Hernia, "   ")]);
    let err = validate_step(Step::Hernia, &raw).unwrap_err();
    assert_eq!(err.reason, ValidationReason::Missing);
}

#[test]
fn validate_all_stops_at_first_incomplete_step() {
    let raw = with(&[(Field::Age, "30"), (Field::HeightCm, "170"), (Field::WeightKg, "85")]);
    let err = validate_all(&raw).unwrap_err();
    assert_eq!(err.step, Step::ConnectiveTissue);
}

#[test]
fn parsed_values_keep_their_kind() {
    let spec = Field::HeightCm.spec();
    assert_eq!(parse_value(spec, Some("170.5")), Ok(ParsedValue::Decimal(170.5)));
    assert_eq!(parse_value(Field::Keloid.spec(), Some("1")), Ok(ParsedValue::Int(1)));
    assert_eq!(parse_value(Field::Keloid.spec(), None), Err(ValidationReason::Missing));
}

#[test]
fn age_beyond_bound_is_rejected_at_entry() {
    let raw = with(&[(Field::Age, "5000000000"), (Field::HeightCm, "170"), (Field::WeightKg, "85")]);
    let err = validate_step(Step::Anthropometrics, &raw).unwrap_err();
    assert_eq!(err.field, Field::Age);
    assert_eq!(err.reason, ValidationReason::OutOfRange { min: 1, max: 130 });

    let oldest = with(&[(Field::Age, "130"), (Field::HeightCm, "170"), (Field::WeightKg, "85")]);
    assert!(validate_step(Step::Anthropometrics, &oldest).is_ok());
}

#[test]
fn measurements_giving_an_unstorable_bmi_are_rejected() {
    for (height, weight) in [("1e-200", "1e200"), ("100000", "0.001")] {
        let raw = with(&[(Field::Age, "30"), (Field::HeightCm, height), (Field::WeightKg, weight)]);
        let err = validate_step(Step::Anthropometrics, &raw).unwrap_err();
        assert_eq!(err.reason, ValidationReason::ImplausibleBmi);
        assert_eq!(err.fields, vec![Field::HeightCm, Field::WeightKg]);
        assert!(err.message.contains("BMI"));
    }
}
