#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use heron::param::ParameterValues;
    use heron::query::{
        DataSource, NativeResult, Query, QueryColumnInfo, QueryError, QueryResult,
    };
    use heron::schema::{DataColumnSchema, DataTableSchema};
    use heron::value::{TargetType, Value};

    struct OrdersQuery {
        columns: Vec<QueryColumnInfo>,
        native: NativeResult,
        maximum_rows: Option<usize>,
    }

    impl OrdersQuery {
        fn with_rows(count: usize) -> Self {
            OrdersQuery {
                columns: vec![
                    QueryColumnInfo::new("id", TargetType::Int),
                    QueryColumnInfo::new("total", TargetType::Float),
                ],
                native: NativeResult {
                    columns: vec!["id".to_string(), "total".to_string()],
                    rows: (0..count)
                        .map(|i| vec![(i as i64).into(), format!("{}.5", i).into()])
                        .collect(),
                },
                maximum_rows: None,
            }
        }

        fn capped(mut self, limit: usize) -> Self {
            self.maximum_rows = Some(limit);
            self
        }
    }

    #[async_trait]
    impl Query for OrdersQuery {
        fn name(&self) -> &str {
            "orders"
        }

        fn columns(&self) -> &[QueryColumnInfo] {
            &self.columns
        }

        fn maximum_rows(&self) -> Option<usize> {
            self.maximum_rows
        }

        async fn fetch(&self, _parameters: &ParameterValues) -> QueryResult<NativeResult> {
            Ok(self.native.clone())
        }
    }

    #[tokio::test]
    async fn test_rows_materialize_through_declared_columns() {
        let query = OrdersQuery::with_rows(2);
        let result = query.execute(&ParameterValues::new()).await.unwrap();
        assert_eq!(result.len(), 2);

        let row = &result.all_rows()[1];
        assert_eq!(row.value("id"), Some(&Value::Int(1)));
        // Native text converts to the declared float type.
        assert_eq!(row.value("total"), Some(&Value::Float(1.5)));
    }

    #[tokio::test]
    async fn test_row_cap_exceeded_names_query_count_and_limit() {
        let query = OrdersQuery::with_rows(11).capped(10);
        let err = query.execute(&ParameterValues::new()).await.unwrap_err();
        match err {
            QueryError::RowLimitExceeded {
                query,
                actual,
                limit,
            } => {
                assert_eq!(query, "orders");
                assert_eq!(actual, 11);
                assert_eq!(limit, 10);
            }
            other => panic!("expected row limit error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fallback_cap_guards_queries_without_their_own() {
        let query = OrdersQuery::with_rows(3);
        let err = query
            .execute_with_cap(&ParameterValues::new(), Some(2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::RowLimitExceeded {
                actual: 3,
                limit: 2,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_declared_cap_wins_over_the_fallback() {
        let query = OrdersQuery::with_rows(3).capped(5);
        assert!(query
            .execute_with_cap(&ParameterValues::new(), Some(2))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_result_at_the_cap_is_allowed() {
        let query = OrdersQuery::with_rows(10).capped(10);
        assert!(query.execute(&ParameterValues::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_declared_column_missing_from_result_fails() {
        let mut query = OrdersQuery::with_rows(1);
        query.native.columns = vec!["id".to_string()];
        query.native.rows = vec![vec![0i64.into()]];
        let err = query.execute(&ParameterValues::new()).await.unwrap_err();
        assert!(matches!(err, QueryError::ColumnMissing { .. }));
    }

    struct OrdersSource {
        tables: Vec<DataTableSchema>,
    }

    impl DataSource for OrdersSource {
        fn schema(&self) -> &[DataTableSchema] {
            &self.tables
        }
    }

    fn orders_source() -> OrdersSource {
        OrdersSource {
            tables: vec![DataTableSchema::new(
                "orders",
                vec![
                    DataColumnSchema::new("id", TargetType::Int),
                    DataColumnSchema::new("total", TargetType::Decimal),
                ],
            )],
        }
    }

    #[test]
    fn test_resolved_columns_prefer_schema_types() {
        let query = OrdersQuery::with_rows(0);
        let resolved = query.resolved_columns(&orders_source(), "orders").unwrap();
        assert_eq!(resolved[0].data_type, TargetType::Int);
        // Schema knows better than the declaration.
        assert_eq!(resolved[1].data_type, TargetType::Decimal);
    }

    #[test]
    fn test_unknown_table_is_not_found() {
        let query = OrdersQuery::with_rows(0);
        let err = query
            .resolved_columns(&orders_source(), "customers")
            .unwrap_err();
        assert!(matches!(err, QueryError::TableNotFound(_)));
    }
}
