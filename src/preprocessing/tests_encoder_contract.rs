// =========================================================================
// FALSIFY-SAE: String agglomerative encoder contract
//
// Claims under test:
//   - training values bypass resolution and get their fitted cluster
//   - maxclust produces exactly min(t, n) clusters, and transform never
//     emits an id outside 1..=K
//   - the unknown policy only affects rows holding unseen values
//   - transform is a pure function of the fitted model
// =========================================================================

use super::*;

const TRAIN: [&str; 10] = [
    "Senior Engineer",
    "Sr. Engineer",
    "Engineer II",
    "Software Engineer",
    "Nurse",
    "Registered Nurse",
    "Nurse Practitioner",
    "Pharmacist",
    "Hospital Pharmacist",
    "Pharmacy Technician",
];

const TEST: [&str; 7] = [
    "Engineer",
    "Nurse",
    "Regstered Nurse",
    "pharmacist",
    "Senior Engineer",
    "plumber",
    "Pharmacy Tech",
];

fn frame(values: &[&str]) -> DataFrame {
    DataFrame::from_strings("job_title", values).expect("valid frame")
}

fn fitted(t: f64, policy: HandleUnknown) -> StringAgglomerativeEncoder {
    let mut encoder = StringAgglomerativeEncoder::new(t)
        .with_ngram_range(2, 4)
        .with_handle_unknown(policy);
    encoder.fit(&frame(&TRAIN)).expect("fit succeeds");
    encoder
}

/// FALSIFY-SAE-001: known values map to their fitted cluster
#[test]
fn falsify_sae_001_known_values_covered() {
    let encoder = fitted(3.0, HandleUnknown::ForceLinkage);
    let labels = encoder.transform(&frame(&TRAIN)).expect("transform");
    for (value, label) in TRAIN.iter().zip(labels.as_slice()) {
        assert_eq!(
            *label,
            encoder.cluster_of(value),
            "FALSIFIED SAE-001: {value:?} not mapped to its fitted cluster"
        );
    }
}

/// FALSIFY-SAE-002: K = min(t, n) and transform stays within 1..=K
#[test]
fn falsify_sae_002_k_preserved() {
    for t in [1.0, 2.0, 3.0, 4.0, 10.0, 25.0] {
        let encoder = fitted(t, HandleUnknown::ForceLinkage);
        let k = (t as usize).min(TRAIN.len());

        let mut distinct = encoder.clusters().to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(
            distinct,
            (1..=k).collect::<Vec<_>>(),
            "FALSIFIED SAE-002: t={t} gave clusters {distinct:?}"
        );

        let labels = encoder.transform(&frame(&TEST)).expect("transform");
        for label in labels.as_slice() {
            let id = label.expect("force linkage never imputes");
            assert!(
                (1..=k).contains(&id),
                "FALSIFIED SAE-002: t={t} emitted id {id} outside 1..={k}"
            );
        }
    }
}

/// FALSIFY-SAE-003: policies agree on known rows, differ only on unknown rows
#[test]
fn falsify_sae_003_policy_switch() {
    let forced = fitted(3.0, HandleUnknown::ForceLinkage);
    let imputed = fitted(3.0, HandleUnknown::ImputeNan);

    let a = forced.transform(&frame(&TEST)).expect("transform");
    let b = imputed.transform(&frame(&TEST)).expect("transform");

    for (i, value) in TEST.iter().enumerate() {
        if forced.cluster_of(value).is_some() {
            assert_eq!(a[i], b[i], "FALSIFIED SAE-003: known {value:?} differs by policy");
        } else {
            assert!(a[i].is_some(), "FALSIFIED SAE-003: force linkage imputed {value:?}");
            assert!(b[i].is_none(), "FALSIFIED SAE-003: impute nan labelled {value:?}");
        }
    }
    assert_eq!(b.n_missing(), 5, "FALSIFIED SAE-003: wrong missing count");
}

/// FALSIFY-SAE-004: repeated transforms are identical
#[test]
fn falsify_sae_004_transform_is_pure() {
    let encoder = fitted(3.0, HandleUnknown::ForceLinkage);
    let first = encoder.transform(&frame(&TEST)).expect("transform");
    let second = encoder.transform(&frame(&TEST)).expect("transform");
    assert_eq!(first, second, "FALSIFIED SAE-004: transform not deterministic");

    let other = fitted(3.0, HandleUnknown::ForceLinkage);
    assert_eq!(
        other.transform(&frame(&TEST)).expect("transform"),
        first,
        "FALSIFIED SAE-004: refit changed the encoding"
    );
}
