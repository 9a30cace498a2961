//! Integration tests for the dirty-category encoders.
//!
//! These tests verify end-to-end workflows combining multiple components.

use aprender_dirtycat::cluster::{fcluster, linkage};
use aprender_dirtycat::metrics::{pairwise_condensed, squareform};
use aprender_dirtycat::prelude::*;
use aprender_dirtycat::preprocessing::{AgglomerativeConfig, DistanceConfig};
use aprender_dirtycat::text::ngram::CharNgramVectorizer;

fn frame(values: &[&str]) -> DataFrame {
    DataFrame::from_strings("employee_position_title", values).unwrap()
}

const TITLES: [&str; 12] = [
    "Police Officer III",
    "Police Officer II",
    "Police Officer I",
    "Police Aide",
    "Firefighter/Rescuer III",
    "Firefighter/Rescuer II",
    "Fire/Rescue Captain",
    "Bus Operator",
    "Bus Operator",
    "Transit Bus Operator",
    "Office Services Coordinator",
    "Office Clerk",
];

#[test]
fn test_agglomerative_workflow() {
    let mut encoder = StringAgglomerativeEncoder::new(4.0).with_ngram_range(2, 4);
    let train_labels = encoder.fit_transform(&frame(&TITLES)).expect("Failed to fit");

    assert_eq!(train_labels.len(), TITLES.len());
    assert_eq!(train_labels.n_missing(), 0);
    assert_eq!(encoder.n_clusters(), 4);
    // Duplicate rows share a label
    assert_eq!(train_labels[7], train_labels[8]);
    assert_eq!(encoder.categories().len(), 11);

    // Unseen spellings land next to their siblings
    let test = frame(&["Police Officer IV", "Bus Opertor", "Firefighter/Rescuer I"]);
    let labels = encoder.transform(&test).expect("Failed to transform");
    assert_eq!(labels[0], encoder.cluster_of("Police Officer III"));
    assert_eq!(labels[1], encoder.cluster_of("Bus Operator"));
    assert_eq!(labels[2], encoder.cluster_of("Firefighter/Rescuer II"));
}

#[test]
fn test_agglomerative_from_json_config() {
    let config: AgglomerativeConfig = serde_json::from_str(
        r#"{
            "t": 4,
            "linkage_method": "complete",
            "ngram_range": [2, 4],
            "handle_unknown": "impute nan"
        }"#,
    )
    .expect("valid json");

    let mut encoder = StringAgglomerativeEncoder::from_config(&config).expect("valid config");
    encoder.fit(&frame(&TITLES)).expect("Failed to fit");

    let labels = encoder
        .transform(&frame(&["Police Aide", "Janitor"]))
        .expect("Failed to transform");
    assert_eq!(labels[0], encoder.cluster_of("Police Aide"));
    assert_eq!(labels[1], None);

    let column = labels.to_matrix();
    assert!(column.get(1, 0).is_nan());
}

#[test]
fn test_rejected_config_never_builds() {
    let config: AgglomerativeConfig =
        serde_json::from_str(r#"{"t": 3, "linkage_method": "ward"}"#).expect("valid json");
    let err = StringAgglomerativeEncoder::from_config(&config).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_encoder_agrees_with_building_blocks() {
    let mut encoder = StringAgglomerativeEncoder::new(3.0)
        .with_linkage_method(LinkageMethod::Single)
        .with_metric(Metric::Jaccard);
    encoder.fit(&frame(&TITLES)).expect("Failed to fit");

    let categories = encoder.categories().to_vec();
    let mut vectorizer = CharNgramVectorizer::new();
    vectorizer.fit(&categories).unwrap();
    let features = vectorizer.transform_binary(&categories).unwrap();
    let condensed = pairwise_condensed(&features, Metric::Jaccard);
    let tree = linkage(&condensed, categories.len(), LinkageMethod::Single).unwrap();
    let labels = fcluster(&tree, 3.0, Criterion::MaxClust).unwrap();

    assert_eq!(encoder.clusters(), labels.as_slice());
    assert_eq!(encoder.linkage_tree(), &tree);

    let square = squareform(&condensed, categories.len()).unwrap();
    assert!(square.is_symmetric(1e-12));
}

#[test]
fn test_distance_encoder_workflow() {
    let mut encoder = StringDistanceEncoder::from_config(&DistanceConfig {
        n_components: 3,
        ..DistanceConfig::default()
    })
    .expect("valid config");

    let embedded = encoder.fit_transform(&frame(&TITLES)).expect("Failed to fit");
    assert_eq!(embedded.shape(), (12, 3));
    assert_eq!(embedded.row(7), embedded.row(8));

    let ratios = encoder.svd().explained_variance_ratio();
    assert_eq!(ratios.len(), 3);
    assert!(ratios.iter().all(|r| (0.0..=1.0 + 1e-9).contains(r)));

    let unseen = encoder
        .transform(&frame(&["Bus Opertor", "Police Officer IV"]))
        .expect("Failed to transform");
    assert_eq!(unseen.shape(), (2, 3));
}

#[test]
fn test_generic_over_encoder_trait() {
    fn encode_all<E: CategoricalEncoder>(encoder: &mut E, x: &DataFrame) -> E::Output {
        encoder.fit_transform(x).expect("Failed to encode")
    }

    let x = frame(&TITLES);
    let labels = encode_all(&mut StringAgglomerativeEncoder::new(2.0), &x);
    let embedded = encode_all(&mut StringDistanceEncoder::new(2), &x);
    assert_eq!(labels.len(), embedded.n_rows());
}

#[test]
fn test_shared_across_threads() {
    let mut encoder = StringAgglomerativeEncoder::new(4.0);
    encoder.fit(&frame(&TITLES)).expect("Failed to fit");
    let encoder = std::sync::Arc::new(encoder);

    let handles: Vec<_> = ["Police Officer V", "Bus Driver"]
        .into_iter()
        .map(|value| {
            let encoder = std::sync::Arc::clone(&encoder);
            std::thread::spawn(move || encoder.transform(&frame(&[value])).unwrap())
        })
        .collect();

    for handle in handles {
        let labels = handle.join().unwrap();
        assert!(labels[0].is_some());
    }
}
