pub(crate) use super::*;

const U: [bool; 6] = [true, true, true, false, false, false];
const V: [bool; 6] = [true, false, false, true, false, false];
// ntt = 1, ntf = 2, nft = 1, nff = 2

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn test_dice() {
    assert!(close(Metric::Dice.distance(&U, &V), 3.0 / 5.0));
}

#[test]
fn test_jaccard() {
    assert!(close(Metric::Jaccard.distance(&U, &V), 3.0 / 4.0));
}

#[test]
fn test_hamming() {
    assert!(close(Metric::Hamming.distance(&U, &V), 3.0 / 6.0));
}

#[test]
fn test_rogerstanimoto_and_sokalmichener() {
    assert!(close(Metric::RogersTanimoto.distance(&U, &V), 6.0 / 9.0));
    assert!(close(Metric::SokalMichener.distance(&U, &V), 6.0 / 9.0));
}

#[test]
fn test_russellrao() {
    assert!(close(Metric::RussellRao.distance(&U, &V), 5.0 / 6.0));
}

#[test]
fn test_sokalsneath() {
    assert!(close(Metric::SokalSneath.distance(&U, &V), 6.0 / 7.0));
}

#[test]
fn test_yule() {
    // 2 * (2*1) / (1*2 + 2*1)
    assert!(close(Metric::Yule.distance(&U, &V), 1.0));
}

#[test]
fn test_numeric_metrics() {
    assert!(close(Metric::Euclidean.distance(&U, &V), 3.0_f64.sqrt()));
    assert!(close(Metric::SqEuclidean.distance(&U, &V), 3.0));
    assert!(close(Metric::Cityblock.distance(&U, &V), 3.0));
    let expected_cos = 1.0 - 1.0 / (3.0_f64.sqrt() * 2.0_f64.sqrt());
    assert!(close(Metric::Cosine.distance(&U, &V), expected_cos));
}

#[test]
fn test_identical_vectors_have_zero_distance() {
    for metric in Metric::ALL {
        if metric == Metric::RussellRao {
            // Russell-Rao counts shared negatives as mismatches.
            continue;
        }
        let d = metric.distance(&U, &U);
        assert!(close(d, 0.0), "{metric}: d(u, u) = {d}");
    }
}

#[test]
fn test_all_false_vectors_are_not_nan() {
    let zero = [false; 4];
    for metric in Metric::ALL {
        let d = metric.distance(&zero, &zero);
        assert!(d.is_finite(), "{metric} produced {d}");
    }
    assert!(close(Metric::Dice.distance(&zero, &zero), 0.0));
}

#[test]
fn test_disjoint_vectors_are_maximal_for_dice() {
    let a = [true, true, false, false];
    let b = [false, false, true, true];
    assert!(close(Metric::Dice.distance(&a, &b), 1.0));
    assert!(close(Metric::Jaccard.distance(&a, &b), 1.0));
}

#[test]
fn test_symmetry() {
    for metric in Metric::ALL {
        assert!(close(metric.distance(&U, &V), metric.distance(&V, &U)));
    }
}

#[test]
fn test_from_str_and_display() {
    for metric in Metric::ALL {
        let parsed: Metric = metric.name().parse().expect("canonical name parses");
        assert_eq!(parsed, metric);
        assert_eq!(metric.to_string(), metric.name());
    }
    assert_eq!("Manhattan".parse::<Metric>().expect("alias"), Metric::Cityblock);
    assert_eq!(Metric::default(), Metric::Dice);
}

#[test]
fn test_from_str_unknown_is_config_error() {
    let err = "levenshtein".parse::<Metric>().expect_err("unsupported");
    assert!(err.is_config_error());
    assert!(err.to_string().contains("levenshtein"));
}

#[test]
fn test_pairwise_condensed_layout() {
    let x = Matrix::from_rows(
        &[
            vec![true, false],
            vec![true, true],
            vec![false, true],
        ],
        2,
    )
    .expect("3x2");
    let d = pairwise_condensed(&x, Metric::Dice);
    // (0,1), (0,2), (1,2)
    assert_eq!(d.len(), 3);
    assert!(close(d[0], 1.0 / 3.0));
    assert!(close(d[1], 1.0));
    assert!(close(d[2], 1.0 / 3.0));

    let square = squareform(&d, 3).expect("valid length");
    assert!(square.is_symmetric(0.0));
    assert!(close(square.get(2, 0), 1.0));
    assert!(close(square.get(1, 1), 0.0));
}

#[test]
fn test_squareform_length_mismatch() {
    assert!(squareform(&[0.5, 0.5], 3).is_err());
    assert_eq!(squareform(&[], 1).expect("1x1").shape(), (1, 1));
}

#[test]
fn test_pairwise_cross() {
    let a = Matrix::from_rows(&[vec![true, false]], 2).expect("1x2");
    let b = Matrix::from_rows(&[vec![true, false], vec![false, true]], 2).expect("2x2");
    let d = pairwise(&a, &b, Metric::Jaccard).expect("same width");
    assert_eq!(d.shape(), (1, 2));
    assert!(close(d.get(0, 0), 0.0));
    assert!(close(d.get(0, 1), 1.0));
}

#[test]
fn test_pairwise_width_mismatch() {
    let a = Matrix::filled(1, 2, false);
    let b = Matrix::filled(1, 3, false);
    assert!(pairwise(&a, &b, Metric::Dice).is_err());
}
