mod common;

pub mod adaboost_oc_tests {
    use arcboost::prelude::*;
    use arcboost::booster::adaboost_oc::coloring;
    use crate::common::*;

    #[test]
    fn exhaustive_search_scores_every_partition_once() {
        for n_class in 2..=6 {
            let mut calls = 0_usize;
            let (_, _) = coloring::exhaustive_search(n_class, |_| {
                calls += 1;
                0.0
            });
            assert_eq!(calls, 1 << (n_class - 1));
        }
    }


    #[test]
    fn complement_scores_identically() {
        // The splitting criterion only sees the partition,
        // so a coloring and its complement always tie.
        let n_class = 5;
        let w = (0..n_class * n_class)
            .map(|ab| ((ab * 7919) % 13) as f64)
            .collect::<Vec<_>>();
        let crit = |coloring: &Coloring| {
            let mut sum = 0.0;
            for a in 0..n_class {
                for b in 0..n_class {
                    if coloring.splits(a, b) {
                        sum += w[a * n_class + b];
                    }
                }
            }
            sum
        };

        let (best, score) = coloring::exhaustive_search(n_class, crit);
        assert_eq!(crit(&best.complement()), score);
    }


    #[test]
    fn binary_oracle_recovers_both_classes() {
        let sample = alternating_sample();
        let n_sample = sample.shape().0;

        let f = AdaBoostOC::init(&sample)
            .ensemble_size(3)
            .run(&ReplayBuilder::oracle());

        assert_eq!(f.n_members(), 3);
        assert_eq!(f.colorings().len(), 3);
        for i in 0..n_sample {
            assert_eq!(f.class_predict(sample.input(i)), Some(sample.class_of(i)));
        }
    }


    #[test]
    fn multiclass_oracle_recovers_true_classes() {
        let sample = gaussian_clusters(9, 3, 6.0, 5);
        let n_sample = sample.shape().0;

        let f = AdaBoostOC::init(&sample)
            .ensemble_size(4)
            .run(&ReplayBuilder::oracle());

        assert_eq!(f.n_members(), 4);
        assert!(f.alphas().iter().all(|&a| a > 0.0 && a.is_finite()));
        for i in 0..n_sample {
            assert_eq!(f.class_predict(sample.input(i)), Some(sample.class_of(i)));
        }
    }


    #[test]
    fn randomized_strategy_runs_on_small_problems() {
        let sample = gaussian_clusters(9, 3, 6.0, 17);
        let n_sample = sample.shape().0;

        let f = AdaBoostOC::init(&sample)
            .ensemble_size(3)
            .coloring_strategy(ColoringStrategy::Randomized { n_candidates: 64 })
            .seed(42)
            .run(&ReplayBuilder::oracle());

        assert_eq!(f.n_members(), 3);
        for i in 0..n_sample {
            assert!(f.class_predict(sample.input(i)).is_some());
        }
    }


    #[test]
    fn single_random_candidate_still_trains() {
        // With one random candidate over two classes, the draw is
        // the degenerate all-equal coloring for half the seeds;
        // the search fallback must keep training well-defined.
        let sample = alternating_sample();
        let n_sample = sample.shape().0;

        for seed in 0..32 {
            let f = AdaBoostOC::init(&sample)
                .ensemble_size(2)
                .coloring_strategy(ColoringStrategy::Randomized { n_candidates: 1 })
                .seed(seed)
                .run(&ReplayBuilder::oracle());

            assert_eq!(f.n_members(), 2);
            for i in 0..n_sample {
                assert_eq!(
                    f.class_predict(sample.input(i)),
                    Some(sample.class_of(i)),
                );
            }
        }
    }


    #[test]
    fn scores_are_bounded_by_total_alpha() {
        let sample = gaussian_clusters(8, 4, 6.0, 29);

        let f = AdaBoostOC::init(&sample)
            .ensemble_size(3)
            .run(&ReplayBuilder::oracle());

        let total = f.alphas().iter().sum::<f64>();
        for i in 0..sample.shape().0 {
            let scores = f.scores(sample.input(i));
            assert_eq!(scores.len(), 4);
            assert!(scores.iter().all(|&s| s >= 0.0 && s <= total + 1e-9));
        }
    }


    #[test]
    fn empty_ensemble_predicts_nothing() {
        let sample = alternating_sample();

        let f = AdaBoostOC::init(&sample)
            .ensemble_size(0)
            .run(&ReplayBuilder::oracle());

        assert_eq!(f.n_members(), 0);
        assert_eq!(f.class_predict(sample.input(0)), None);
    }
}
