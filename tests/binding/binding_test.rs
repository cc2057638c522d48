#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use heron::binding::{
        BindingError, CollaboratorError, DataBinding, MathEvaluator, ResolverContext,
        TemplateRenderer,
    };
    use heron::row::QueryRow;
    use heron::value::{TargetType, Value};

    /// Substitutes `{column}` placeholders with row values.
    struct BraceRenderer;

    impl TemplateRenderer for BraceRenderer {
        fn render(&self, template: &str, row: &QueryRow) -> Result<String, CollaboratorError> {
            let mut rendered = template.to_string();
            for cell in row.cells() {
                rendered = rendered.replace(&format!("{{{}}}", cell.column), &cell.value.to_string());
            }
            Ok(rendered)
        }
    }

    /// Evaluates `a+b` and `a*b` forms, enough to exercise the chain.
    struct TinyEvaluator;

    impl MathEvaluator for TinyEvaluator {
        fn evaluate(&self, expression: &str) -> Result<Value, CollaboratorError> {
            let (op, parts) = if expression.contains('+') {
                ('+', expression.split('+'))
            } else {
                ('*', expression.split('*'))
            };
            let numbers: Vec<f64> = parts
                .map(|p| p.trim().parse::<f64>())
                .collect::<Result<_, _>>()?;
            let result = match op {
                '+' => numbers.iter().sum(),
                _ => numbers.iter().product(),
            };
            Ok(Value::Float(result))
        }
    }

    fn sample_row() -> QueryRow {
        let customer: BTreeMap<String, Value> = [
            ("Name".to_string(), Value::from("Acme")),
            ("City".to_string(), Value::from("Lyon")),
        ]
        .into();
        QueryRow::from_pairs([
            ("Total", Value::Float(12.5)),
            ("Quantity", Value::Int(4)),
            ("Customer", Value::Object(customer)),
            ("Missing", Value::Null),
        ])
        .unwrap()
    }

    fn full_context() -> ResolverContext {
        ResolverContext::default()
            .with_renderer(Arc::new(BraceRenderer))
            .with_evaluator(Arc::new(TinyEvaluator))
    }

    #[test]
    fn test_single_column_path_yields_cell_value() {
        let binding = DataBinding::query_path("Total");
        let value = binding
            .resolve(&sample_row(), &ResolverContext::default())
            .unwrap();
        assert_eq!(value, Value::Float(12.5));
    }

    #[test]
    fn test_property_path_traverses_object_values() {
        let binding = DataBinding::query_path("Customer.Name");
        let value = binding
            .resolve(&sample_row(), &ResolverContext::default())
            .unwrap();
        assert_eq!(value, Value::from("Acme"));
    }

    #[test]
    fn test_unknown_column_fails() {
        let binding = DataBinding::query_path("Nope");
        let err = binding
            .resolve(&sample_row(), &ResolverContext::default())
            .unwrap_err();
        assert!(matches!(err, BindingError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_null_before_a_segment_fails_with_null_reference() {
        let binding = DataBinding::query_path("Missing.Anything");
        let err = binding
            .resolve(&sample_row(), &ResolverContext::default())
            .unwrap_err();
        match err {
            BindingError::NullReferenceInPath { segment, .. } => {
                assert_eq!(segment, "Anything");
            }
            other => panic!("expected null reference error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_property_fails() {
        let binding = DataBinding::query_path("Customer.Zip");
        let err = binding
            .resolve(&sample_row(), &ResolverContext::default())
            .unwrap_err();
        assert!(matches!(err, BindingError::PropertyNotFound { .. }));
    }

    #[test]
    fn test_template_binding_renders_against_the_row() {
        let binding = DataBinding::template("{Customer} has {Quantity} items");
        let value = binding.resolve(&sample_row(), &full_context()).unwrap();
        // Objects render as their type name; scalar placeholders substitute.
        assert_eq!(value, Value::from("object has 4 items"));
    }

    #[test]
    fn test_template_without_renderer_fails() {
        let binding = DataBinding::template("{Total}");
        let err = binding
            .resolve(&sample_row(), &ResolverContext::default())
            .unwrap_err();
        assert!(matches!(err, BindingError::RendererNotConfigured));
    }

    #[test]
    fn test_math_binding_interpolates_then_evaluates() {
        let binding = DataBinding::math("{Total} * {Quantity}");
        let value = binding.resolve(&sample_row(), &full_context()).unwrap();
        assert_eq!(value, Value::Float(50.0));
    }

    #[test]
    fn test_math_without_evaluator_fails() {
        let ctx = ResolverContext::default().with_renderer(Arc::new(BraceRenderer));
        let binding = DataBinding::math("1+1");
        let err = binding.resolve(&sample_row(), &ctx).unwrap_err();
        assert!(matches!(err, BindingError::EvaluatorNotConfigured));
    }

    #[test]
    fn test_resolve_as_converts_the_result() {
        let binding = DataBinding::query_path("Quantity");
        let value = binding
            .resolve_as(&sample_row(), &ResolverContext::default(), &TargetType::Float)
            .unwrap();
        assert_eq!(value, Value::Float(4.0));
    }
}
