pub mod learner_tests {
    use arcboost::prelude::*;

    #[test]
    fn grnn_separates_two_clusters() {
        let builder = GrnnBuilder::new(1)
            .n_outer(3)
            .n_inner(25)
            .seed(7);
        let mut grnn = builder.build();

        for (x, t) in [(-1.0, -1.0), (-0.9, -1.0), (0.9, 1.0), (1.0, 1.0)] {
            grnn.add_case(&[x], t);
        }
        grnn.train();

        assert!(grnn.predict(&[-0.95]) < 0.0);
        assert!(grnn.predict(&[0.95]) > 0.0);
    }


    #[test]
    fn grnn_reset_discards_old_cases() {
        let builder = GrnnBuilder::new(1)
            .n_outer(2)
            .n_inner(10);
        let mut grnn = builder.build();

        grnn.add_case(&[0.0], 1.0);
        grnn.add_case(&[1.0], 1.0);
        grnn.train();
        assert!(grnn.predict(&[0.5]) > 0.0);

        grnn.reset();
        grnn.add_case(&[0.0], -1.0);
        grnn.add_case(&[1.0], -1.0);
        grnn.train();

        // All stored targets agree, so the kernel average is exact.
        assert_eq!(grnn.predict(&[0.5]), -1.0);
    }


    #[test]
    fn grnn_importance_tilts_the_average() {
        let builder = GrnnBuilder::new(1)
            .n_outer(2)
            .n_inner(10);

        let mut grnn = builder.build();
        grnn.add_weighted_case(&[-1.0], -1.0, 0.1);
        grnn.add_weighted_case(&[1.0], 1.0, 10.0);
        grnn.train();
        assert!(grnn.predict(&[0.0]) > 0.0);

        let mut grnn = builder.build();
        grnn.add_weighted_case(&[-1.0], -1.0, 10.0);
        grnn.add_weighted_case(&[1.0], 1.0, 0.1);
        grnn.train();
        assert!(grnn.predict(&[0.0]) < 0.0);
    }


    #[test]
    fn logistic_learns_a_separable_threshold() {
        let builder = LogisticBuilder::new(1);
        let mut logistic = builder.build();

        for (x, t) in [(-2.0, -1.0), (-1.5, -1.0), (1.5, 1.0), (2.0, 1.0)] {
            logistic.add_case(&[x], t);
        }
        logistic.train();

        // The raw log odds, positive on the positive side.
        assert!(logistic.predict(&[2.0]) > 0.0);
        assert!(logistic.predict(&[-2.0]) < 0.0);
    }


    #[test]
    fn logistic_importance_shifts_the_intercept() {
        let builder = LogisticBuilder::new(1)
            .n_outer(3)
            .n_inner(10);
        let mut logistic = builder.build();

        // Conflicting targets at the same input;
        // the heavier one must win through the intercept.
        logistic.add_weighted_case(&[0.0], 1.0, 10.0);
        logistic.add_weighted_case(&[0.0], -1.0, 0.1);
        logistic.train();

        assert!(logistic.predict(&[0.0]) > 0.0);
    }


    #[test]
    fn brent_finds_known_minima() {
        let brent = BrentMinimizer::new();

        let (x, y) = brent.minimize(
            (-1.0, 1.0),
            &|x| (x - 0.3) * (x - 0.3),
        );
        assert!((x - 0.3).abs() < 1e-3);
        assert!(y < 1e-6);

        let (x, _) = brent.minimize((0.0, 6.0), &f64::cos);
        assert!((x - std::f64::consts::PI).abs() < 1e-2);
    }
}
