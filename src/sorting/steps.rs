//! Sort Script Module
//! Pure step sequences for the animated sorting demos. The generators run the
//! textbook algorithm to completion up front; the player replays the recorded
//! steps at its own cadence.

/// Algorithms available in the visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    Insertion,
    Selection,
}

impl SortAlgorithm {
    pub fn label(&self) -> &'static str {
        match self {
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Selection => "Selection Sort",
        }
    }
}

/// One event in a sorting animation. Indices always refer to current slots,
/// i.e. positions after all preceding `Swap` steps have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStep {
    /// The element whose final position is currently being decided.
    Key(usize),
    /// Two slots under comparison.
    Compare(usize, usize),
    /// Exchange the bars at two slots.
    Swap(usize, usize),
    /// Slots below this index have reached their final order.
    Prefix(usize),
    /// Drop transient highlights at the end of a pass.
    Clear,
    /// The whole array is in order.
    Done,
}

/// Record the full step script for sorting `values` ascending.
pub fn script(algorithm: SortAlgorithm, values: &[i64]) -> Vec<SortStep> {
    match algorithm {
        SortAlgorithm::Insertion => insertion(values),
        SortAlgorithm::Selection => selection(values),
    }
}

/// Replay only the `Swap` steps of a script over `items`.
#[allow(dead_code)]
pub fn apply_swaps<T>(items: &mut [T], steps: &[SortStep]) {
    for step in steps {
        if let SortStep::Swap(a, b) = *step {
            items.swap(a, b);
        }
    }
}

fn insertion(values: &[i64]) -> Vec<SortStep> {
    let mut v = values.to_vec();
    let mut steps = Vec::new();
    let n = v.len();
    if n < 2 {
        steps.push(SortStep::Done);
        return steps;
    }

    for i in 1..n {
        steps.push(SortStep::Key(i));
        let mut j = i;
        while j > 0 && v[j - 1] > v[j] {
            steps.push(SortStep::Compare(j - 1, j));
            v.swap(j - 1, j);
            steps.push(SortStep::Swap(j - 1, j));
            j -= 1;
            // the key keeps its highlight as it walks left
            steps.push(SortStep::Key(j));
        }
        steps.push(SortStep::Clear);
    }

    steps.push(SortStep::Done);
    steps
}

fn selection(values: &[i64]) -> Vec<SortStep> {
    let mut v = values.to_vec();
    let mut steps = Vec::new();
    let n = v.len();
    if n < 2 {
        steps.push(SortStep::Done);
        return steps;
    }

    for i in 0..n {
        let mut min_idx = i;
        steps.push(SortStep::Key(min_idx));
        for j in i + 1..n {
            steps.push(SortStep::Compare(min_idx, j));
            if v[j] < v[min_idx] {
                min_idx = j;
                steps.push(SortStep::Key(min_idx));
            }
        }
        if min_idx != i {
            steps.push(SortStep::Swap(i, min_idx));
            v.swap(i, min_idx);
        }
        steps.push(SortStep::Prefix(i + 1));
    }

    steps.push(SortStep::Done);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASES: [&[i64]; 6] = [
        &[],
        &[42],
        &[5, 4, 3, 2, 1],
        &[1, 2, 3, 4, 5],
        &[3, 1, 4, 1, 5, 9, 2, 6, 5, 3],
        &[7, 7, 7, 7],
    ];

    fn final_order(algorithm: SortAlgorithm, values: &[i64]) -> Vec<i64> {
        let steps = script(algorithm, values);
        let mut items = values.to_vec();
        apply_swaps(&mut items, &steps);
        items
    }

    #[test]
    fn test_swaps_produce_sorted_permutation() {
        for algorithm in [SortAlgorithm::Insertion, SortAlgorithm::Selection] {
            for case in CASES {
                let mut expected = case.to_vec();
                expected.sort();
                assert_eq!(
                    final_order(algorithm, case),
                    expected,
                    "{} failed on {case:?}",
                    algorithm.label()
                );
            }
        }
    }

    #[test]
    fn test_all_indices_in_bounds() {
        for algorithm in [SortAlgorithm::Insertion, SortAlgorithm::Selection] {
            for case in CASES {
                let n = case.len();
                for step in script(algorithm, case) {
                    let ok = match step {
                        SortStep::Key(i) => i < n,
                        SortStep::Compare(a, b) | SortStep::Swap(a, b) => a < n && b < n && a != b,
                        SortStep::Prefix(k) => k <= n,
                        SortStep::Clear | SortStep::Done => true,
                    };
                    assert!(ok, "out-of-bounds step {step:?} for {case:?}");
                }
            }
        }
    }

    #[test]
    fn test_done_is_always_the_final_step() {
        for algorithm in [SortAlgorithm::Insertion, SortAlgorithm::Selection] {
            for case in CASES {
                let steps = script(algorithm, case);
                assert_eq!(steps.last(), Some(&SortStep::Done));
                assert_eq!(
                    steps.iter().filter(|s| **s == SortStep::Done).count(),
                    1
                );
            }
        }
    }

    #[test]
    fn test_trivial_inputs_have_nothing_to_animate() {
        for algorithm in [SortAlgorithm::Insertion, SortAlgorithm::Selection] {
            assert_eq!(script(algorithm, &[]), vec![SortStep::Done]);
            assert_eq!(script(algorithm, &[9]), vec![SortStep::Done]);
        }
    }

    #[test]
    fn test_insertion_only_swaps_neighbours() {
        for step in script(SortAlgorithm::Insertion, &[9, 3, 7, 1, 8, 2]) {
            if let SortStep::Swap(a, b) = step {
                assert_eq!(a.abs_diff(b), 1);
            }
        }
    }

    #[test]
    fn test_selection_swaps_at_most_once_per_pass() {
        let values = [9, 3, 7, 1, 8, 2];
        let swaps = script(SortAlgorithm::Selection, &values)
            .iter()
            .filter(|s| matches!(s, SortStep::Swap(_, _)))
            .count();
        assert!(swaps < values.len());
    }

    #[test]
    fn test_sorted_input_needs_no_swaps() {
        for algorithm in [SortAlgorithm::Insertion, SortAlgorithm::Selection] {
            let steps = script(algorithm, &[1, 2, 3, 4]);
            assert!(
                !steps.iter().any(|s| matches!(s, SortStep::Swap(_, _))),
                "{} swapped on sorted input",
                algorithm.label()
            );
        }
    }
}
