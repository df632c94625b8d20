use regtree::prelude::*;
use regtree::{Split, SplitCandidate, SplitError};


/// Tests for the errors surfaced by training and prediction.
#[cfg(test)]
pub mod errors {
    use super::*;

    fn rows() -> Vec<Row> {
        (0..6)
            .map(|i| Row::numeric(&[i as f64], (i % 3) as f64))
            .collect()
    }

    #[test]
    fn text_label_is_rejected() {
        let mut rows = rows();
        rows[2].label = "three".into();

        let res = RegressionTreeBuilder::new().build().train(&rows, None);
        assert!(
            matches!(res, Err(TreeError::InvalidLabelType { row: 2 })),
            "got {res:?}."
        );
    }

    #[test]
    fn non_finite_label_is_rejected() {
        let mut rows = rows();
        rows[4].label = f64::INFINITY.into();

        let res = RegressionTreeBuilder::new().build().train(&rows, None);
        assert!(
            matches!(res, Err(TreeError::InvalidLabelType { row: 4 })),
            "got {res:?}."
        );
    }

    #[test]
    fn no_rows_is_empty() {
        let res = RegressionTreeBuilder::new().build().train(&[], None);
        assert!(
            matches!(res, Err(TreeError::EmptyTrainingSet)),
            "got {res:?}."
        );
    }

    #[test]
    fn all_zero_weights_is_empty() {
        let rows = rows();
        let weights = [0.0, -1.0, 0.0, f64::NAN, 0.0, 0.0];

        let res = RegressionTreeBuilder::new()
            .build()
            .train(&rows, Some(&weights));
        assert!(
            matches!(res, Err(TreeError::EmptyTrainingSet)),
            "got {res:?}."
        );
    }

    #[test]
    fn weight_length_must_match() {
        let rows = rows();
        let res = RegressionTreeBuilder::new()
            .build()
            .train(&rows, Some(&[1.0, 2.0]));
        assert!(
            matches!(
                res,
                Err(TreeError::WeightLengthMismatch { expected: 6, got: 2 })
            ),
            "got {res:?}."
        );
    }

    #[test]
    fn infinite_weight_is_rejected() {
        let rows = rows();
        let weights = [f64::INFINITY, 1.0, 1.0, 1.0, 1.0, 1.0];

        let res = RegressionTreeBuilder::new()
            .build()
            .train(&rows, Some(&weights));
        assert!(
            matches!(res, Err(TreeError::NonFiniteWeight { row: 0 })),
            "got {res:?}."
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut rows = rows();
        rows[3].features.push(1.0.into());

        let res = RegressionTreeBuilder::new().build().train(&rows, None);
        assert!(
            matches!(
                res,
                Err(TreeError::RowLengthMismatch { row: 3, expected: 1, got: 2 })
            ),
            "got {res:?}."
        );
    }

    #[test]
    fn mixed_column_is_rejected() {
        let mut rows = rows();
        rows[5].features[0] = "five".into();

        let res = RegressionTreeBuilder::new().build().train(&rows, None);
        assert!(
            matches!(res, Err(TreeError::MixedColumnType { column: 0, row: 5 })),
            "got {res:?}."
        );
    }

    #[test]
    fn unseen_category_fails_at_prediction() -> anyhow::Result<()> {
        let rows = vec![
            Row::new(vec!["cat".into()], 1.0.into()),
            Row::new(vec!["dog".into()], 2.0.into()),
        ];
        let (model, _) = RegressionTreeBuilder::new()
            .build()
            .train(&rows, None)?;

        assert_eq!(model.predict_raw(&["dog".into()])?, 2.0);

        let res = model.predict_raw(&["bird".into()]);
        match res {
            Err(TreeError::UnseenCategory { column, value }) => {
                assert_eq!(column, 0);
                assert_eq!(value, "bird");
            },
            other => panic!("expected an unseen category, got {other:?}."),
        }
        Ok(())
    }

    #[test]
    fn wrong_row_shape_fails_at_prediction() -> anyhow::Result<()> {
        let rows = vec![
            Row::new(vec!["cat".into(), 1.0.into()], 1.0.into()),
            Row::new(vec!["dog".into(), 2.0.into()], 2.0.into()),
        ];
        let (model, _) = RegressionTreeBuilder::new()
            .build()
            .train(&rows, None)?;

        let res = model.predict_raw(&["cat".into()]);
        assert!(
            matches!(
                res,
                Err(TreeError::FeatureCountMismatch { expected: 2, got: 1 })
            ),
            "got {res:?}."
        );

        let res = model.predict_raw(&["cat".into(), "dog".into()]);
        assert!(
            matches!(res, Err(TreeError::ColumnTypeMismatch { column: 1 })),
            "got {res:?}."
        );
        Ok(())
    }

    #[test]
    fn nan_feature_is_a_splitter_error() {
        let mut rows = rows();
        rows[4].features[0] = f64::NAN.into();

        let res = RegressionTreeBuilder::new().build().train(&rows, None);
        assert!(
            matches!(
                res,
                Err(TreeError::Splitter(
                    SplitError::NonComparableValue { feature: 0, row: 4 }
                ))
            ),
            "got {res:?}."
        );
    }

    #[derive(Debug)]
    struct Refusal;

    impl std::fmt::Display for Refusal {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "refused to split")
        }
    }

    impl std::error::Error for Refusal {}

    struct RefusingSplitter;

    impl Splitter for RefusingSplitter {
        fn best_split(&self, _: &Sample, _: &[usize])
            -> Result<Option<SplitCandidate>, SplitError>
        {
            Err(SplitError::Other(Box::new(Refusal)))
        }
    }

    #[test]
    fn splitter_errors_pass_through() {
        let res = RegressionTreeBuilder::new()
            .splitter(RefusingSplitter)
            .build()
            .train(&rows(), None);

        match res {
            Err(TreeError::Splitter(SplitError::Other(e))) => {
                assert!(e.downcast_ref::<Refusal>().is_some());
                assert_eq!(e.to_string(), "refused to split");
            },
            other => panic!("expected the splitter error, got {other:?}."),
        }
    }

    struct MisplacedSplitter;

    impl Splitter for MisplacedSplitter {
        fn best_split(&self, _: &Sample, _: &[usize])
            -> Result<Option<SplitCandidate>, SplitError>
        {
            let split = Split::threshold(5, 0.0);
            Ok(Some(SplitCandidate { split, improvement: 1.0 }))
        }
    }

    #[test]
    fn split_on_a_missing_feature_is_an_error() {
        let res = RegressionTreeBuilder::new()
            .splitter(MisplacedSplitter)
            .build()
            .train(&rows(), None);
        assert!(
            matches!(
                res,
                Err(TreeError::Splitter(
                    SplitError::FeatureOutOfRange { feature: 5, n_feature: 1 }
                ))
            ),
            "got {res:?}."
        );
    }

    #[test]
    fn stopping_rules_do_not_consult_the_splitter() -> anyhow::Result<()> {
        let tree = RegressionTreeBuilder::new()
            .max_depth(0)
            .splitter(RefusingSplitter)
            .build();
        let (model, _) = tree.train(&rows(), None)?;
        assert_eq!(model.n_leaves(), 1);

        let single = vec![Row::numeric(&[1.0], 1.0)];
        let tree = RegressionTreeBuilder::new()
            .splitter(RefusingSplitter)
            .build();
        let (model, _) = tree.train(&single, None)?;
        assert_eq!(model.n_leaves(), 1);
        Ok(())
    }
}
