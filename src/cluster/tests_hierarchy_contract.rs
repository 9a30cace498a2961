// =========================================================================
// FALSIFY-HC: Agglomerative (hierarchical) clustering contract
//
// Claims under test:
//   - a tree over n leaves has n-1 merges and its root holds all n leaves
//   - merge heights are non-decreasing for average/complete/single
//   - maxclust with t <= n yields exactly t distinct labels in 1..=t
//   - every leaf and every internal node is merged exactly once
// =========================================================================

use super::*;

const METHODS: [LinkageMethod; 3] = [
    LinkageMethod::Average,
    LinkageMethod::Complete,
    LinkageMethod::Single,
];

/// Deterministic pseudo-distances for 7 items (not a metric, still valid).
fn scrambled_condensed(n: usize) -> Vec<f64> {
    let mut out = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            out.push((((i * 7 + j * 13) % 11) as f64) / 10.0);
        }
    }
    out
}

/// FALSIFY-HC-001: n-1 merges, root has n leaves
#[test]
fn falsify_hc_001_tree_shape() {
    let n = 7;
    for method in METHODS {
        let tree = linkage(&scrambled_condensed(n), n, method).expect("valid input");
        assert_eq!(
            tree.steps().len(),
            n - 1,
            "FALSIFIED HC-001: {method} produced {} merges",
            tree.steps().len()
        );
        assert_eq!(
            tree.steps().last().map(|s| s.size),
            Some(n),
            "FALSIFIED HC-001: {method} root size wrong"
        );
    }
}

/// FALSIFY-HC-002: heights are monotone
#[test]
fn falsify_hc_002_monotone_heights() {
    let n = 7;
    for method in METHODS {
        let tree = linkage(&scrambled_condensed(n), n, method).expect("valid input");
        for w in tree.steps().windows(2) {
            assert!(
                w[0].distance <= w[1].distance + 1e-12,
                "FALSIFIED HC-002: {method} heights {} then {}",
                w[0].distance,
                w[1].distance
            );
        }
    }
}

/// FALSIFY-HC-003: maxclust preserves the requested cluster count
#[test]
fn falsify_hc_003_maxclust_count() {
    let n = 7;
    for method in METHODS {
        let tree = linkage(&scrambled_condensed(n), n, method).expect("valid input");
        for k in 1..=n {
            let labels = fcluster(&tree, k as f64, Criterion::MaxClust).expect("valid t");
            let mut unique = labels.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(
                unique,
                (1..=k).collect::<Vec<_>>(),
                "FALSIFIED HC-003: {method} k={k} labels={labels:?}"
            );
        }
    }
}

/// FALSIFY-HC-004: each node is a child at most once
#[test]
fn falsify_hc_004_nodes_merged_once() {
    let n = 7;
    for method in METHODS {
        let tree = linkage(&scrambled_condensed(n), n, method).expect("valid input");
        let mut seen = vec![0usize; 2 * n - 1];
        for (i, s) in tree.steps().iter().enumerate() {
            assert!(s.left < s.right, "FALSIFIED HC-004: left >= right");
            assert!(s.right < n + i, "FALSIFIED HC-004: child from the future");
            seen[s.left] += 1;
            seen[s.right] += 1;
        }
        // All but the root are merged exactly once.
        assert!(
            seen[..2 * n - 2].iter().all(|&c| c == 1),
            "FALSIFIED HC-004: {method} merge counts {seen:?}"
        );
    }
}
