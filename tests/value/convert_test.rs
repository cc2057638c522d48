#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use heron::value::{convert, ConversionError, EnumMember, EnumType, TargetType, Value};

    fn status_enum() -> EnumType {
        EnumType::new(
            "Status",
            vec![
                EnumMember::new("Open"),
                EnumMember::with_description("InProgress", "In progress"),
                EnumMember::new("Closed"),
            ],
        )
    }

    #[test]
    fn test_converted_value_lands_in_target_family() {
        let targets = [
            (Value::Text("true".into()), TargetType::Bool),
            (Value::Text("42".into()), TargetType::Int),
            (Value::Text("7".into()), TargetType::Byte),
            (Value::Text("x".into()), TargetType::Char),
            (Value::Text("3.25".into()), TargetType::Float),
            (Value::Text("3.25".into()), TargetType::Decimal),
            (Value::Int(9), TargetType::Text),
            (Value::Text("2024-03-01".into()), TargetType::Date),
            (Value::Text("2024-03-01 08:30:00".into()), TargetType::DateTime),
            (Value::Text("08:30:00".into()), TargetType::Time),
            (Value::Text("Open".into()), TargetType::Enum(status_enum())),
        ];

        for (value, target) in targets {
            let converted = convert(&value, &target).unwrap();
            assert!(
                target.accepts(&converted),
                "{:?} converted to {:?} which {} does not accept",
                value,
                converted,
                target
            );
        }
    }

    #[test]
    fn test_null_converts_to_non_nullable_default() {
        assert_eq!(convert(&Value::Null, &TargetType::Int).unwrap(), Value::Int(0));
        assert_eq!(
            convert(&Value::Null, &TargetType::Text).unwrap(),
            Value::Text(String::new())
        );
        assert_eq!(
            convert(&Value::Null, &TargetType::Float).unwrap(),
            Value::Float(0.0)
        );
    }

    #[test]
    fn test_null_stays_null_for_nullable_target() {
        let target = TargetType::nullable(TargetType::Date);
        assert_eq!(convert(&Value::Null, &target).unwrap(), Value::Null);
    }

    #[test]
    fn test_nullable_unwraps_before_converting() {
        let target = TargetType::nullable(TargetType::Int);
        assert_eq!(
            convert(&Value::Text("5".into()), &target).unwrap(),
            Value::Int(5)
        );
    }

    #[test]
    fn test_matching_value_is_returned_as_is() {
        let date = Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(convert(&date, &TargetType::Date).unwrap(), date);
    }

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(
            convert(&Value::Int(3), &TargetType::Float).unwrap(),
            Value::Float(3.0)
        );
    }

    #[test]
    fn test_fractional_float_to_int_fails() {
        let err = convert(&Value::Float(1.5), &TargetType::Int).unwrap_err();
        assert!(matches!(err, ConversionError::Unconvertible { .. }));
    }

    #[test]
    fn test_time_parses_with_and_without_seconds() {
        let expected = Value::Time(NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(
            convert(&Value::Text("08:30:00".into()), &TargetType::Time).unwrap(),
            expected
        );
        assert_eq!(
            convert(&Value::Text("08:30".into()), &TargetType::Time).unwrap(),
            expected
        );
    }

    #[test]
    fn test_enum_parse_is_case_sensitive_exact_match() {
        let target = TargetType::Enum(status_enum());
        assert_eq!(
            convert(&Value::Text("Closed".into()), &target).unwrap(),
            Value::Enum {
                ty: "Status".into(),
                member: "Closed".into()
            }
        );
        let err = convert(&Value::Text("closed".into()), &target).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownEnumMember { .. }));
    }

    #[test]
    fn test_enum_ordinal_conversion() {
        let target = TargetType::Enum(status_enum());
        assert_eq!(
            convert(&Value::Int(1), &target).unwrap(),
            Value::Enum {
                ty: "Status".into(),
                member: "InProgress".into()
            }
        );
        assert!(convert(&Value::Int(3), &target).is_err());
    }

    #[test]
    fn test_byte_out_of_range_is_explicit() {
        let err = convert(&Value::Text("300".into()), &TargetType::Byte).unwrap_err();
        assert!(matches!(err, ConversionError::OutOfRange { .. }));
    }

    #[test]
    fn test_oversized_integer_to_byte_reports_out_of_range() {
        let err = convert(&Value::Int(256), &TargetType::Byte).unwrap_err();
        assert!(matches!(err, ConversionError::OutOfRange { .. }));
        assert_eq!(
            convert(&Value::Int(-1), &TargetType::Byte).unwrap_err(),
            ConversionError::OutOfRange {
                value: "-1".to_string(),
                target: "byte".to_string()
            }
        );
    }

    #[test]
    fn test_unconvertible_error_names_value_and_target() {
        let err = convert(&Value::Text("not a date".into()), &TargetType::Date).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not a date"));
        assert!(message.contains("date"));
    }
}
