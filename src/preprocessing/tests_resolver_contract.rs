// =========================================================================
// FALSIFY-UR: Unknown-category resolution contract
//
// Claims under test:
//   - the chosen cluster has the smallest linkage distance (first on ties)
//   - the result is always a fitted cluster id in 1..=K
//   - refitting on the same data resolves every unknown identically
//   - per cluster, single <= average <= complete
// =========================================================================

use super::*;

const TRAIN: [&str; 8] = [
    "Police Officer",
    "police officer",
    "Police Oficer",
    "Firefighter",
    "Fire fighter",
    "Accountant",
    "Accountant II",
    "Senior Accountant",
];

const UNKNOWNS: [&str; 6] = [
    "Police Oficer III",
    "firefigter",
    "Acountant",
    "xyz",
    "",
    "Senior Police Accountant",
];

fn fit(method: LinkageMethod, t: f64) -> ClusterModel {
    let values: Vec<String> = TRAIN.iter().map(|s| (*s).to_string()).collect();
    let settings = ClusterSettings {
        t,
        metric: Metric::Dice,
        linkage_method: method,
        ngram_range: (2, 4),
        lowercase: true,
        criterion: Criterion::MaxClust,
    };
    ClusterModel::fit(&values, &settings).expect("fit should succeed")
}

/// FALSIFY-UR-001: resolved cluster minimizes the aggregate
#[test]
fn falsify_ur_001_resolution_is_argmin() {
    for method in [LinkageMethod::Average, LinkageMethod::Complete, LinkageMethod::Single] {
        let model = fit(method, 3.0);
        for unknown in UNKNOWNS {
            let chosen = model.resolve(unknown).expect("resolve");
            let distances = model.cluster_distances(unknown).expect("distances");
            let chosen_d = distances[chosen - 1].1;
            for &(id, d) in &distances {
                assert!(
                    chosen_d <= d,
                    "FALSIFIED UR-001: {method} {unknown:?} chose {chosen} ({chosen_d}) over {id} ({d})"
                );
                if d == chosen_d {
                    assert!(
                        chosen <= id,
                        "FALSIFIED UR-001: {method} {unknown:?} tie not broken to smallest id"
                    );
                }
            }
        }
    }
}

/// FALSIFY-UR-002: resolved id is a fitted cluster
#[test]
fn falsify_ur_002_result_in_range() {
    for t in [1.0, 2.0, 3.0, 5.0, 8.0] {
        let model = fit(LinkageMethod::Average, t);
        for unknown in UNKNOWNS {
            let id = model.resolve(unknown).expect("resolve");
            assert!(
                (1..=model.n_clusters()).contains(&id),
                "FALSIFIED UR-002: t={t} {unknown:?} -> {id}, K={}",
                model.n_clusters()
            );
        }
    }
}

/// FALSIFY-UR-003: refitting gives identical resolution
#[test]
fn falsify_ur_003_deterministic() {
    let a = fit(LinkageMethod::Average, 3.0);
    let b = fit(LinkageMethod::Average, 3.0);
    assert_eq!(a.labels(), b.labels(), "FALSIFIED UR-003: labels differ between fits");
    for unknown in UNKNOWNS {
        assert_eq!(
            a.resolve(unknown).expect("resolve"),
            b.resolve(unknown).expect("resolve"),
            "FALSIFIED UR-003: {unknown:?} resolved differently"
        );
    }
}

/// FALSIFY-UR-004: single <= average <= complete on a shared partition
#[test]
fn falsify_ur_004_reduction_order() {
    let average = fit(LinkageMethod::Average, 3.0);
    let mut single = average.clone();
    single.linkage_method = LinkageMethod::Single;
    let mut complete = average.clone();
    complete.linkage_method = LinkageMethod::Complete;

    for unknown in UNKNOWNS {
        let s = single.cluster_distances(unknown).expect("distances");
        let a = average.cluster_distances(unknown).expect("distances");
        let c = complete.cluster_distances(unknown).expect("distances");
        for k in 0..a.len() {
            assert!(
                s[k].1 <= a[k].1 + 1e-12 && a[k].1 <= c[k].1 + 1e-12,
                "FALSIFIED UR-004: {unknown:?} cluster {}: {} / {} / {}",
                k + 1,
                s[k].1,
                a[k].1,
                c[k].1
            );
        }
    }
}
