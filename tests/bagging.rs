mod common;

pub mod bagging_tests {
    use arcboost::prelude::*;
    use crate::common::*;

    #[test]
    fn votes_sum_to_replicate_count() {
        let sample = gaussian_clusters(12, 3, 5.0, 11);
        let n_sample = sample.shape().0;

        let f = Bagging::init(&sample)
            .ensemble_size(5)
            .run(&ReplayBuilder::oracle());

        assert_eq!(f.n_replicates(), 5);
        for i in 0..n_sample {
            let votes = f.votes(sample.input(i));
            assert_eq!(votes.iter().sum::<usize>(), 5);
        }
    }


    #[test]
    fn same_seed_reproduces_predictions() {
        let sample = gaussian_clusters(16, 2, 5.0, 23);
        let n_sample = sample.shape().0;

        let run = || {
            Bagging::init(&sample)
                .ensemble_size(7)
                .seed(99)
                .run(&ReplayBuilder::oracle())
        };
        let first = run();
        let second = run();

        for i in 0..n_sample {
            let input = sample.input(i);
            assert_eq!(first.votes(input), second.votes(input));
            assert_eq!(first.numeric_predict(input), second.numeric_predict(input));
            assert_eq!(first.class_predict(input), second.class_predict(input));
        }
    }


    #[test]
    fn numeric_predict_stays_in_unit_interval() {
        let sample = gaussian_clusters(12, 3, 5.0, 31);
        let n_sample = sample.shape().0;

        let f = Bagging::init(&sample)
            .ensemble_size(4)
            .run(&ReplayBuilder::oracle());

        for i in 0..n_sample {
            let output = f.numeric_predict(sample.input(i));
            assert_eq!(output.len(), 3);
            assert!(output.iter().all(|&o| (-1.0..=1.0).contains(&o)));
        }
    }


    #[test]
    fn empty_ensemble_predicts_nothing() {
        let sample = alternating_sample();

        let f = Bagging::init(&sample)
            .ensemble_size(0)
            .run(&ReplayBuilder::oracle());

        assert_eq!(f.n_replicates(), 0);
        assert_eq!(f.class_predict(sample.input(0)), None);
        assert_eq!(f.numeric_predict(sample.input(0)), vec![0.0, 0.0]);
    }
}
