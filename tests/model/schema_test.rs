#[cfg(test)]
mod tests {
    use heron::schema::{
        DataColumnSchema, DataForeignKey, DataTableSchema, ValidationError,
    };
    use heron::value::TargetType;

    fn orders_table() -> DataTableSchema {
        DataTableSchema::new(
            "orders",
            vec![
                DataColumnSchema::new("id", TargetType::Int),
                DataColumnSchema::new("customer_id", TargetType::Int),
                DataColumnSchema::new("total", TargetType::Float),
            ],
        )
    }

    #[test]
    fn test_valid_table_passes() {
        let mut table = orders_table();
        table.primary_key = Some(vec!["id".to_string()]);
        table.foreign_keys.push(DataForeignKey {
            columns: vec!["customer_id".to_string()],
            referenced_table: "customers".to_string(),
            referenced_columns: vec!["id".to_string()],
        });
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_duplicate_columns_are_collected() {
        let mut table = orders_table();
        table
            .columns
            .push(DataColumnSchema::new("id", TargetType::Int));
        let errors = table.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::DuplicateColumn { .. }
        ));
    }

    #[test]
    fn test_primary_key_must_reference_known_columns() {
        let mut table = orders_table();
        table.primary_key = Some(vec!["missing".to_string()]);
        let errors = table.validate().unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::UnknownPrimaryKeyColumn { .. }
        ));
    }

    #[test]
    fn test_foreign_key_arity_and_columns_are_checked() {
        let mut table = orders_table();
        table.foreign_keys.push(DataForeignKey {
            columns: vec!["customer_id".to_string(), "missing".to_string()],
            referenced_table: "customers".to_string(),
            referenced_columns: vec!["id".to_string()],
        });
        let errors = table.validate().unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ForeignKeyArityMismatch { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnknownForeignKeyColumn { .. })));
    }
}
