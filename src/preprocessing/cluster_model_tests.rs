pub(crate) use super::*;

fn settings(t: f64, method: LinkageMethod) -> ClusterSettings {
    ClusterSettings {
        t,
        metric: Metric::Dice,
        linkage_method: method,
        ngram_range: (1, 1),
        lowercase: true,
        criterion: Criterion::MaxClust,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

/// Unigram vocabulary {a, b, z}; "aa" and "ab" are 1/3 apart, "zz" is 1 away
/// from both, so t = 2 gives {zz} -> 1 and {aa, ab} -> 2.
fn toy_model(method: LinkageMethod) -> ClusterModel {
    ClusterModel::fit(&strings(&["zz", "ab", "aa", "ab"]), &settings(2.0, method))
        .expect("fit should succeed")
}

#[test]
fn test_fit_sorts_and_dedups() {
    let model = toy_model(LinkageMethod::Average);
    assert_eq!(model.categories(), &["aa", "ab", "zz"]);
    assert_eq!(model.labels(), &[2, 2, 1]);
    assert_eq!(model.n_clusters(), 2);
}

#[test]
fn test_cluster_of_known_and_unknown() {
    let model = toy_model(LinkageMethod::Average);
    assert_eq!(model.cluster_of("aa"), Some(2));
    assert_eq!(model.cluster_of("zz"), Some(1));
    assert_eq!(model.cluster_of("b"), None);
    assert!(model.contains("ab"));
    assert!(!model.contains("AB"));
}

#[test]
fn test_linkage_tree_exposed() {
    let model = toy_model(LinkageMethod::Average);
    let tree = model.linkage_tree();
    assert_eq!(tree.n_leaves(), 3);
    assert_eq!(tree.steps().len(), 2);
    assert!((tree.steps()[0].distance - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_cluster_distances_average() {
    let model = toy_model(LinkageMethod::Average);
    let distances = model.cluster_distances("b").expect("fitted model");
    assert_eq!(distances.len(), 2);
    assert_eq!(distances[0].0, 1);
    assert!((distances[0].1 - 1.0).abs() < 1e-12);
    // mean of d(b, aa) = 1 and d(b, ab) = 1/3
    assert!((distances[1].1 - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_cluster_distances_single_and_complete() {
    let single = toy_model(LinkageMethod::Single);
    let d = single.cluster_distances("b").expect("fitted model");
    assert!((d[1].1 - 1.0 / 3.0).abs() < 1e-12);

    let complete = toy_model(LinkageMethod::Complete);
    let d = complete.cluster_distances("b").expect("fitted model");
    assert!((d[1].1 - 1.0).abs() < 1e-12);
}

#[test]
fn test_resolve_follows_linkage_method() {
    assert_eq!(toy_model(LinkageMethod::Average).resolve("b").expect("resolve"), 2);
    assert_eq!(toy_model(LinkageMethod::Single).resolve("b").expect("resolve"), 2);
    // complete: both clusters at distance 1, tie goes to the smaller id
    assert_eq!(toy_model(LinkageMethod::Complete).resolve("b").expect("resolve"), 1);
}

#[test]
fn test_resolve_without_overlap_picks_smallest_id() {
    let model = toy_model(LinkageMethod::Average);
    let distances = model.cluster_distances("qqq").expect("fitted model");
    assert!(distances.iter().all(|&(_, d)| (d - 1.0).abs() < 1e-12));
    assert_eq!(model.resolve("qqq").expect("resolve"), 1);
}

#[test]
fn test_resolve_applies_lowercase() {
    let model = toy_model(LinkageMethod::Average);
    assert_eq!(model.resolve("AB").expect("resolve"), 2);
}

#[test]
fn test_resolve_single_cluster_short_circuit() {
    let model = ClusterModel::fit(
        &strings(&["aa", "ab", "zz"]),
        &settings(1.0, LinkageMethod::Average),
    )
    .expect("fit should succeed");
    assert_eq!(model.n_clusters(), 1);
    assert_eq!(model.resolve("zzz").expect("resolve"), 1);
    assert_eq!(model.resolve("").expect("resolve"), 1);
}

#[test]
fn test_t_larger_than_categories() {
    let model = ClusterModel::fit(
        &strings(&["aa", "ab", "zz"]),
        &settings(10.0, LinkageMethod::Average),
    )
    .expect("fit should succeed");
    assert_eq!(model.n_clusters(), 3);
    let mut labels = model.labels().to_vec();
    labels.sort_unstable();
    assert_eq!(labels, vec![1, 2, 3]);
}

#[test]
fn test_single_category() {
    let model = ClusterModel::fit(&strings(&["only", "only"]), &settings(2.0, LinkageMethod::Average))
        .expect("fit should succeed");
    assert_eq!(model.categories(), &["only"]);
    assert_eq!(model.labels(), &[1]);
    assert_eq!(model.resolve("other").expect("resolve"), 1);
}

#[test]
fn test_fit_empty_values() {
    let err = ClusterModel::fit(&[], &settings(2.0, LinkageMethod::Average)).unwrap_err();
    assert!(err.to_string().contains("empty input"));
}

#[test]
fn test_fit_only_empty_strings() {
    let err = ClusterModel::fit(&strings(&["", ""]), &settings(2.0, LinkageMethod::Average))
        .unwrap_err();
    assert!(matches!(err, EncoderError::InvalidInput { .. }));
}

#[test]
fn test_fit_rejects_invalid_threshold() {
    let err = ClusterModel::fit(&strings(&["a", "b"]), &settings(0.0, LinkageMethod::Average))
        .unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_distance_criterion() {
    let mut s = settings(0.5, LinkageMethod::Average);
    s.criterion = Criterion::Distance;
    let model = ClusterModel::fit(&strings(&["aa", "ab", "zz"]), &s).expect("fit should succeed");
    assert_eq!(model.n_clusters(), 2);
    assert_eq!(model.cluster_of("aa"), model.cluster_of("ab"));

    s.t = 0.1;
    let model = ClusterModel::fit(&strings(&["aa", "ab", "zz"]), &s).expect("fit should succeed");
    assert_eq!(model.n_clusters(), 3);
}
