#[cfg(test)]
mod tests {
    use heron::param::ParameterInfo;
    use heron::report::{
        ComponentDefinition, ComponentType, ReportDefinition, ReportFilter,
        ReportSectionDefinition, SectionType,
    };
    use heron::value::{TargetType, Value};

    fn definition_with_body() -> ReportDefinition {
        ReportDefinition::new("sales")
            .with_parameter(ParameterInfo::new("region", TargetType::Text))
            .with_section(
                ReportSectionDefinition::new(SectionType::Body)
                    .with_title("Body")
                    .with_component(ComponentDefinition::new("sep", ComponentType::Separator)),
            )
    }

    #[test]
    fn test_sections_are_keyed_by_type() {
        let mut definition = definition_with_body();
        assert!(definition.section(SectionType::Body).is_some());
        assert!(definition.section(SectionType::PageFooter).is_none());

        definition.set_section(ReportSectionDefinition::new(SectionType::PageFooter));
        assert!(definition.section(SectionType::PageFooter).is_some());

        definition.remove_section(SectionType::Body);
        assert!(definition.section(SectionType::Body).is_none());
    }

    #[test]
    fn test_setting_a_section_replaces_the_existing_one() {
        let mut definition = definition_with_body();
        definition.set_section(
            ReportSectionDefinition::new(SectionType::Body).with_title("Replaced"),
        );
        assert_eq!(definition.section(SectionType::Body).unwrap().title, "Replaced");
    }

    #[test]
    fn test_filter_is_generated_from_parameter_schema() {
        let definition = definition_with_body();
        let filter = ReportFilter::from_definition(&definition);
        let parameter = filter.parameter_value("region").unwrap();
        assert!(parameter.value().is_null());
    }

    #[test]
    fn test_set_parameter_values_ignores_unknown_names() {
        let definition = definition_with_body();
        let mut filter = ReportFilter::from_definition(&definition);
        filter
            .set_parameter_values(
                [
                    ("region".to_string(), Value::from("west")),
                    ("no_such".to_string(), Value::Int(1)),
                ]
                .into(),
            )
            .unwrap();
        assert_eq!(filter.raw_value("region"), Some(&Value::from("west")));
        assert_eq!(filter.raw_value("no_such"), None);
    }

    #[test]
    fn test_component_exclusions() {
        let mut filter = ReportFilter::new();
        filter.exclude_component("sep");
        assert!(filter.is_excluded("sep"));
        assert!(!filter.is_excluded("other"));
    }

    #[test]
    fn test_nested_filter_overrides_do_not_touch_the_original() {
        let definition = definition_with_body();
        let filter = ReportFilter::from_definition(&definition);
        let nested = filter
            .with_overrides([("region".to_string(), Value::from("east"))].into())
            .unwrap();
        assert_eq!(nested.raw_value("region"), Some(&Value::from("east")));
        assert!(filter.raw_value("region").unwrap().is_null());
    }
}
