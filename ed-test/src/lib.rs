use itertools::Itertools;
use rand::{seq::IteratorRandom, thread_rng, Rng};
use std::cmp::max;

use pa_generate::ErrorModel;
use pa_types::*;

/// Hand picked pairs that previously broke aligners, and the degenerate cases.
pub fn test_sequences() -> Vec<(Seq<'static>, Seq<'static>)> {
    vec![
        (b"", b""),
        (b"", b"A"),
        (b"A", b""),
        (b"A", b"A"),
        (b"A", b"C"),
        (b"AC", b"CA"),
        (b"TTGGGTCAATCAGCCAGTTTTTA", b"TTTGAGTGGGTCATCACCGATTTTAT"),
        (b"ACTGACCAGT", b"CCGACAGGA"),
        (b"AGTTTTAT", b"ACCGATTTTTA"),
        (b"CTCTCTTCTCTCTCTA", b"CCTCTCTCTCTCCTCTC"),
        (b"AGTGGGTTGCCTTCATTCCG", b"AGTGGTGTCTTCAGGCCTTCATTCCG"),
        (b"GCACGTCGCCCCCCGCCCGCG", b"GCCCGCCCGCCCGCCCCCGCCCCC"),
        (b"CGCGTGTATCCGTCCACATCGAGCCGCCCTTGTTGCTTTTCGAGCGCTCATTTCCCGCAAGAGTGGCGTGCGGTCACTTTCGCGCAGCAATTAGAGTACTAACGGGTAGACGTGGCTTTCCTCCTCGTCCTGTCAACGCGCATAGGATGTCCTGCAGCAGGCCGCCGCGATTGCCTAAATCAAGGGGTTCCAATGGAGTTTCCATCTGATATCCGCGCTCCGGTTCTGAGTCTAAAGTGGAAATACTCCGAATGGGCCGGTATGAGGTTGGGTCAATCAGCCAGTTTTTA",
         b"CGCTGGGGATGCCTCCACCTTTCGAGTGCCTGTTGGTTCCGACGCTATCATAGTCCCCATGCAAGGAGATGGCTGCGCGTCCTATCGCGCGGCAAATAGAGTCTACGGGGGCGGCTGTCCTCCTCGTCCTGGTCAACGGCCATAGGATTTCCGCGATGGTCGCCCGGATGTGCCTAAACCAAGGCTCCGATGGAGCTGCCTCTGATATCCGCGCTGCCGGTTTCCTGACGTCTGAAAACGTTGGAAAATACCTCCGAATGGGCCCCGTTTGAGTGGGTCATCACCGATTTTAT"),
    ]
}

const FIXED: bool = false;

pub fn gen_seqs() -> impl Iterator<Item = ((Sequence, Sequence), (usize, f32, ErrorModel, u64))> {
    let rng = &mut thread_rng();
    let mut ns = vec![
        0usize, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 30, 40, 50,
        60, 70, 80, 90, 100, 110, 120, 130, 140, 150, 160, 170, 180, 190, 200, 210, 220, 230, 240,
        250, 254, 255, 256, 257, 258, 260, 270, 280, 290, 300, 500, 511, 512, 513, 515,
    ];
    let mut es = vec![
        0.0f32, 0.01, 0.02, 0.03, 0.05, 0.10, 0.20, 0.30, 0.40, 0.50, 0.60, 0.70, 1.0,
    ];

    // Pick a random subset of the above for 4x speedup. CI runs often enough to get good coverage.
    if !FIXED {
        let nl = ns.len();
        ns = ns.into_iter().choose_multiple(rng, nl / 4);
        let el = es.len();
        es = es.into_iter().choose_multiple(rng, el / 4);
    }

    let models = [
        ErrorModel::Uniform,
        ErrorModel::NoisyInsert,
        ErrorModel::NoisyDelete,
        ErrorModel::SymmetricRepeat,
    ];
    // Run each test on a new random seed for increased coverage over time.
    let seeds = if FIXED {
        [31415]
    } else {
        [rng.gen_range(0..u64::MAX)]
    };
    ns.into_iter()
        .cartesian_product(es)
        .cartesian_product(models)
        .cartesian_product(seeds)
        .map(|(((n, e), error_model), seed)| {
            let (a, b) = pa_generate::generate_model(n, e, error_model, seed);
            ((a, b), (n, e, error_model, seed))
        })
}

/// Levenshtein distance: insertions, deletions and substitutions all cost 1.
pub fn levenshtein(a: Seq, b: Seq) -> Cost {
    triple_accel::levenshtein_exp(a, b) as Cost
}

/// Indel distance: insertions and deletions cost 1, substitutions are not allowed.
///
/// Computed as `|a| + |b| - 2 LCS(a, b)`, with the LCS in two rolling rows.
pub fn indel_distance(a: Seq, b: Seq) -> Cost {
    let mut prev = vec![0usize; b.len() + 1];
    let mut next = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            next[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                max(prev[j + 1], next[j])
            };
        }
        std::mem::swap(&mut prev, &mut next);
    }
    (a.len() + b.len() - 2 * prev[b.len()]) as Cost
}

/// A reference implementation the aligner under test is compared to.
pub type Reference = fn(Seq, Seq) -> Cost;

pub fn test_aligner_on_input(
    a: Seq,
    b: Seq,
    aligner: &mut impl Aligner,
    reference: Reference,
    params: &str,
) {
    // Set to true for local debugging.
    const D: bool = false;

    // useful in case of panics inside the alignment code.
    eprintln!("{params}");
    if D {
        eprintln!("a {}\nb {}", seq_to_string(a), seq_to_string(b));
    }
    let cost = reference(a, b);
    let aligner_cost = aligner.align(a, b).0;
    assert_eq!(
        cost,
        aligner_cost,
        "\n{params}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();\nAligner\n{aligner:?}",
        seq_to_string(a),
        seq_to_string(b),
    );
    // Distances do not depend on the order of the input.
    let (rev_cost, _) = aligner.align(b, a);
    assert_eq!(
        rev_cost,
        reference(b, a),
        "\n{params}\nswapped input\nAligner\n{aligner:?}"
    );
}

/// Test the given aligner on a large set of random sequences:
/// - length 0 to 515
/// - error rate 0.0 to 1.0
/// - error models: uniform, noisy insert, noisy delete, symmetric repeat (using `pa_generate`)
///
/// The cost reported by the aligner must match `reference`.
pub fn test_aligner(aligner: impl Aligner, reference: Reference) {
    test_aligner_up_to(aligner, reference, usize::MAX);
}

/// As test_aligner, but only test sequences with n <= max_n.
pub fn test_aligner_up_to(mut aligner: impl Aligner, reference: Reference, max_n: usize) {
    for (a, b) in test_sequences() {
        test_aligner_on_input(
            a,
            b,
            &mut aligner,
            reference,
            &format!(
                "hardcoded test_sequences: a {:?} b {:?}",
                seq_to_string(a),
                seq_to_string(b)
            ),
        );
    }
    for ((a, b), (n, e, error_model, seed)) in gen_seqs() {
        if n > max_n {
            continue;
        }
        test_aligner_on_input(
            &a,
            &b,
            &mut aligner,
            reference,
            &format!("seed {seed:>10} n {n:>5} e {e:>.2} error_model {error_model:?}"),
        );
    }
}
