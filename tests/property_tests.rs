//! Property-based tests using proptest.
//!
//! These tests verify invariants of the encoders and their building blocks.

use aprender_dirtycat::cluster::{fcluster, linkage};
use aprender_dirtycat::metrics::pairwise_condensed;
use aprender_dirtycat::prelude::*;
use aprender_dirtycat::primitives::Matrix;
use proptest::prelude::*;

// Short mixed-case words, with the occasional space or digit
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-dA-D0-9 ]{1,8}"
}

// Training columns of 2..12 values
fn column_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(word_strategy(), 2..12)
}

fn bool_vec_strategy(len: usize) -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), len)
}

fn method_strategy() -> impl Strategy<Value = LinkageMethod> {
    prop_oneof![
        Just(LinkageMethod::Average),
        Just(LinkageMethod::Complete),
        Just(LinkageMethod::Single),
    ]
}

fn frame(values: &[String]) -> DataFrame {
    DataFrame::from_strings("x", values).expect("Test data should be valid")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Metric properties
    #[test]
    fn metric_is_symmetric_and_bounded(u in bool_vec_strategy(12), v in bool_vec_strategy(12)) {
        for metric in [Metric::Dice, Metric::Jaccard, Metric::Hamming, Metric::RogersTanimoto] {
            let d_uv = metric.distance(&u, &v);
            let d_vu = metric.distance(&v, &u);
            prop_assert!((d_uv - d_vu).abs() < 1e-12);
            prop_assert!((0.0..=1.0).contains(&d_uv), "{metric}: {d_uv}");
            prop_assert!(!d_uv.is_nan());
        }
    }

    #[test]
    fn metric_self_distance_is_zero(u in bool_vec_strategy(12)) {
        for metric in [Metric::Dice, Metric::Jaccard, Metric::Hamming, Metric::Cosine] {
            prop_assert!(metric.distance(&u, &u).abs() < 1e-12, "{metric}");
        }
    }

    // Clustering properties
    #[test]
    fn maxclust_gives_exactly_min_t_n_clusters(
        rows in proptest::collection::vec(bool_vec_strategy(6), 2..10),
        t in 1usize..12,
        method in method_strategy(),
    ) {
        let n = rows.len();
        let x = Matrix::from_rows(&rows, 6).expect("Test data should be valid");
        let tree = linkage(&pairwise_condensed(&x, Metric::Hamming), n, method).unwrap();
        let mut labels = fcluster(&tree, t as f64, Criterion::MaxClust).unwrap();
        labels.sort_unstable();
        labels.dedup();
        prop_assert_eq!(labels, (1..=t.min(n)).collect::<Vec<_>>());
    }

    // Encoder properties
    #[test]
    fn known_values_map_to_fitted_cluster(values in column_strategy(), t in 1usize..6) {
        let mut encoder = StringAgglomerativeEncoder::new(t as f64);
        let labels = encoder.fit_transform(&frame(&values)).unwrap();
        for (value, label) in values.iter().zip(labels.as_slice()) {
            prop_assert_eq!(*label, encoder.cluster_of(value));
            prop_assert!(label.is_some());
        }
    }

    #[test]
    fn unknowns_resolve_within_fitted_clusters(
        values in column_strategy(),
        unknowns in proptest::collection::vec(word_strategy(), 1..6),
        t in 1usize..6,
        method in method_strategy(),
    ) {
        let mut encoder = StringAgglomerativeEncoder::new(t as f64).with_linkage_method(method);
        encoder.fit(&frame(&values)).unwrap();
        let k = encoder.n_clusters();
        let labels = encoder.transform(&frame(&unknowns)).unwrap();
        prop_assert_eq!(labels.len(), unknowns.len());
        for label in labels.as_slice() {
            let id = label.unwrap();
            prop_assert!((1..=k).contains(&id));
        }
    }

    #[test]
    fn impute_nan_marks_exactly_the_unseen_rows(
        values in column_strategy(),
        queries in proptest::collection::vec(word_strategy(), 1..8),
    ) {
        let mut encoder = StringAgglomerativeEncoder::new(2.0)
            .with_handle_unknown(HandleUnknown::ImputeNan);
        encoder.fit(&frame(&values)).unwrap();
        let labels = encoder.transform(&frame(&queries)).unwrap();
        for (query, label) in queries.iter().zip(labels.as_slice()) {
            prop_assert_eq!(label.is_none(), !values.contains(query));
        }
    }

    #[test]
    fn distance_embedding_is_row_consistent(values in column_strategy()) {
        let mut encoder = StringDistanceEncoder::new(1);
        let embedded = encoder.fit_transform(&frame(&values)).unwrap();
        prop_assert_eq!(embedded.shape(), (values.len(), 1));
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] == values[j] {
                    prop_assert_eq!(embedded.row(i), embedded.row(j));
                }
            }
        }
    }
}
