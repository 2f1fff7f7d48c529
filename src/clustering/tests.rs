#[cfg(test)]
mod tests {
    use crate::clustering::{
        euclidean_distance, ClusterMetrics, ClusteringEngine, ClusteringError, EnginePhase,
        DEFAULT_GRID_SIZE, MAX_HOUSES,
    };

    fn seeded(m: i64) -> ClusteringEngine {
        ClusteringEngine::with_grid_and_seed(m, 42).expect("valid grid")
    }

    #[test]
    fn test_default_grid_size() {
        assert_eq!(DEFAULT_GRID_SIZE, 10);
    }

    #[test]
    fn test_new_engine_is_unconfigured() {
        let mut engine = ClusteringEngine::with_seed(1);
        assert_eq!(engine.phase(), EnginePhase::Unconfigured);
        assert_eq!(engine.grid_size(), None);
        assert!(matches!(
            engine.generate_points(1),
            Err(ClusteringError::NotReady(_))
        ));
    }

    #[test]
    fn test_configure_grid_resets_everything() {
        let mut engine = seeded(5);
        engine.generate_points(10).unwrap();
        engine.generate_centroids(3).unwrap();
        engine.assign_step().unwrap();

        assert_eq!(engine.configure_grid(7).unwrap(), 7);
        assert_eq!(engine.grid_size(), Some(7));
        assert_eq!(engine.phase(), EnginePhase::GridSet);
        assert!(engine.houses().is_none());
        assert!(engine.hospitals().is_none());
        assert!(engine.clusters().is_none());

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.m, Some(7));
        assert_eq!(snapshot.n, None);
        assert_eq!(snapshot.a, None);
        assert!(!snapshot.has_data());
    }

    #[test]
    fn test_configure_grid_rejects_non_positive() {
        let mut engine = seeded(4);
        engine.generate_points(3).unwrap();
        for m in [0, -1, -100] {
            assert!(matches!(
                engine.configure_grid(m),
                Err(ClusteringError::InvalidArgument(_))
            ));
        }
        // Failed calls leave state alone
        assert_eq!(engine.grid_size(), Some(4));
        assert_eq!(engine.houses().map(|h| h.len()), Some(3));
    }

    #[test]
    fn test_generate_points_within_grid() {
        for m in 1..=6_i64 {
            let mut engine = seeded(m);
            for n in [0, 1, m * m / 2, m * m] {
                let houses = engine.generate_points(n).unwrap().to_vec();
                assert_eq!(houses.len() as i64, n);
                assert!(houses.iter().all(|h| (h[0] as i64) < m && (h[1] as i64) < m));
            }
        }
    }

    #[test]
    fn test_generate_points_rejects_over_capacity() {
        let mut engine = seeded(3);
        engine.generate_points(4).unwrap();
        let err = engine.generate_points(10).unwrap_err();
        match &err {
            ClusteringError::InvalidArgument(msg) => {
                assert!(msg.contains("m*m = 9"));
                assert!(msg.contains("m = 3"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(
            engine.generate_points(-1),
            Err(ClusteringError::InvalidArgument(_))
        ));
        // Validation happens before mutation
        assert_eq!(engine.houses().map(|h| h.len()), Some(4));
    }

    #[test]
    fn test_generate_centroids_requires_houses() {
        let mut engine = seeded(4);
        assert!(matches!(
            engine.generate_centroids(1),
            Err(ClusteringError::NotReady(_))
        ));
    }

    #[test]
    fn test_generate_centroids_bounds_in_order() {
        let mut engine = seeded(3);
        engine.generate_points(4).unwrap();

        let err = engine.generate_centroids(0).unwrap_err();
        assert!(err.detail().contains("positive"));

        let err = engine.generate_centroids(10).unwrap_err();
        assert!(err.detail().contains("m*m"));

        let err = engine.generate_centroids(5).unwrap_err();
        assert!(err.detail().contains("number of houses"));
        assert_eq!(err.kind(), "invalid_argument");

        assert!(engine.hospitals().is_none());
    }

    #[test]
    fn test_generate_centroids_within_grid() {
        let mut engine = seeded(6);
        engine.generate_points(20).unwrap();
        for a in 1..=20 {
            let hospitals = engine.generate_centroids(a).unwrap().to_vec();
            assert_eq!(hospitals.len() as i64, a);
            for h in hospitals {
                assert!(h[0] >= 0.0 && h[0] < 6.0);
                assert!(h[1] >= 0.0 && h[1] < 6.0);
            }
        }
        assert_eq!(engine.phase(), EnginePhase::HospitalsReady);
    }

    #[test]
    fn test_full_grid_boundary_is_accepted() {
        let mut engine = seeded(3);
        engine.generate_points(9).unwrap();
        assert_eq!(engine.generate_centroids(9).unwrap().len(), 9);
    }

    #[test]
    fn test_assign_requires_houses_and_hospitals() {
        let mut engine = seeded(4);
        assert!(matches!(engine.assign_step(), Err(ClusteringError::NotReady(_))));
        engine.generate_points(4).unwrap();
        assert!(matches!(engine.assign_step(), Err(ClusteringError::NotReady(_))));
        assert_eq!(engine.phase(), EnginePhase::DataReady);
    }

    #[test]
    fn test_assign_picks_nearest_hospital() {
        let mut engine = seeded(10);
        engine.generate_points(60).unwrap();
        engine.generate_centroids(5).unwrap();
        let clusters = engine.assign_step().unwrap().to_vec();

        let houses = engine.houses().unwrap();
        let hospitals = engine.hospitals().unwrap();
        assert_eq!(clusters.len(), houses.len());
        for (house, &cluster) in houses.iter().zip(&clusters) {
            assert!(cluster < hospitals.len());
            let assigned = euclidean_distance(house, &hospitals[cluster]);
            for other in hospitals {
                assert!(assigned <= euclidean_distance(house, other));
            }
        }
        assert_eq!(engine.phase(), EnginePhase::ClustersAssigned);
    }

    #[test]
    fn test_update_requires_assignment() {
        let mut engine = seeded(4);
        engine.generate_points(5).unwrap();
        engine.generate_centroids(2).unwrap();
        assert!(matches!(engine.update_step(), Err(ClusteringError::NotReady(_))));
    }

    #[test]
    fn test_update_moves_hospitals_to_means() {
        let mut engine = seeded(8);
        engine.generate_points(40).unwrap();
        engine.generate_centroids(4).unwrap();
        let clusters = engine.assign_step().unwrap().to_vec();
        let houses = engine.houses().unwrap().to_vec();

        let hospitals = engine.update_step().unwrap().to_vec();
        assert_eq!(hospitals.len(), 4);
        for (idx, hospital) in hospitals.iter().enumerate() {
            let members: Vec<_> = houses
                .iter()
                .zip(&clusters)
                .filter(|(_, c)| **c == idx)
                .map(|(h, _)| *h)
                .collect();
            if members.is_empty() {
                assert!(hospital[0] >= 0.0 && hospital[0] < 8.0);
                assert!(hospital[1] >= 0.0 && hospital[1] < 8.0);
            } else {
                let count = members.len() as f64;
                let mean_x = members.iter().map(|h| h[0] as f64).sum::<f64>() / count;
                let mean_y = members.iter().map(|h| h[1] as f64).sum::<f64>() / count;
                assert_eq!(hospital[0], mean_x);
                assert_eq!(hospital[1], mean_y);
            }
        }
        assert_eq!(engine.phase(), EnginePhase::HospitalsUpdated);
    }

    #[test]
    fn test_empty_clusters_are_reseeded() {
        // Two houses, two hospitals: some seeds send both houses to one hospital
        let mut reseeded = 0;
        for seed in 0..200 {
            let mut engine = ClusteringEngine::with_grid_and_seed(1000, seed).unwrap();
            engine.generate_points(2).unwrap();
            engine.generate_centroids(2).unwrap();
            let clusters = engine.assign_step().unwrap().to_vec();
            let Some(empty) = (0..2).find(|idx| !clusters.contains(idx)) else {
                continue;
            };
            let stale = engine.hospitals().unwrap()[empty];

            let hospitals = engine.update_step().unwrap();
            let fresh = hospitals[empty];
            assert!(!fresh[0].is_nan() && !fresh[1].is_nan());
            assert_eq!(fresh[0].fract(), 0.0);
            assert_eq!(fresh[1].fract(), 0.0);
            assert!(fresh[0] >= 0.0 && fresh[0] < 1000.0);
            assert!(fresh[1] >= 0.0 && fresh[1] < 1000.0);
            assert_ne!(fresh, stale);
            reseeded += 1;
        }
        assert!(reseeded > 0, "no run produced an empty cluster");
    }

    #[test]
    fn test_huge_house_counts_are_rejected() {
        let mut engine = ClusteringEngine::with_grid_and_seed(4_000_000_000, 1).unwrap();
        for n in [i64::MAX, 10_000_000_000, MAX_HOUSES as i64 + 1] {
            let err = engine.generate_points(n).unwrap_err();
            assert_eq!(err.kind(), "invalid_argument");
            assert!(err.detail().contains(&MAX_HOUSES.to_string()));
        }
        assert!(engine.houses().is_none());
        assert_eq!(engine.generate_points(5).unwrap().len(), 5);
    }

    #[test]
    fn test_steps_alternate() {
        let mut engine = seeded(10);
        engine.generate_points(30).unwrap();
        engine.generate_centroids(3).unwrap();
        for _ in 0..5 {
            let clusters = engine.assign_step().unwrap();
            assert_eq!(clusters.len(), 30);
            assert!(clusters.iter().all(|&c| c < 3));
            assert_eq!(engine.update_step().unwrap().len(), 3);
        }
    }

    #[test]
    fn test_regenerating_points_keeps_hospitals_and_drops_clusters() {
        let mut engine = seeded(6);
        engine.generate_points(10).unwrap();
        let hospitals = engine.generate_centroids(3).unwrap().to_vec();
        engine.assign_step().unwrap();

        engine.generate_points(12).unwrap();
        assert_eq!(engine.hospitals().unwrap(), hospitals.as_slice());
        assert!(engine.clusters().is_none());
        assert_eq!(engine.phase(), EnginePhase::HospitalsReady);
        assert!(matches!(engine.update_step(), Err(ClusteringError::NotReady(_))));
        assert_eq!(engine.assign_step().unwrap().len(), 12);
    }

    #[test]
    fn test_regenerating_hospitals_drops_clusters() {
        let mut engine = seeded(6);
        engine.generate_points(10).unwrap();
        engine.generate_centroids(5).unwrap();
        engine.assign_step().unwrap();
        engine.generate_centroids(2).unwrap();
        assert!(engine.clusters().is_none());
        assert_eq!(engine.metrics(), ClusterMetrics::default());
    }

    #[test]
    fn test_metrics_zero_until_assigned() {
        let mut engine = seeded(4);
        assert_eq!(engine.metrics(), ClusterMetrics::default());
        engine.generate_points(3).unwrap();
        assert_eq!(engine.metrics(), ClusterMetrics::default());
        engine.generate_centroids(2).unwrap();
        assert_eq!(engine.metrics(), ClusterMetrics::default());
    }

    #[test]
    fn test_metrics_after_steps() {
        let mut engine = seeded(10);
        engine.generate_points(50).unwrap();
        engine.generate_centroids(4).unwrap();
        engine.assign_step().unwrap();
        let before = engine.metrics();
        assert!(before.average_distance >= 0.0);
        assert!(before.inertia >= 0.0);

        engine.update_step().unwrap();
        engine.assign_step().unwrap();
        let after = engine.metrics();
        assert!(after.average_distance >= 0.0);
        assert!(after.inertia >= 0.0);
    }

    #[test]
    fn test_walkthrough_example() {
        let mut engine = seeded(4);
        let houses = engine.generate_points(3).unwrap().to_vec();
        assert_eq!(houses.len(), 3);
        assert!(houses.iter().all(|h| h[0] < 4 && h[1] < 4));

        engine.generate_centroids(2).unwrap();
        let clusters = engine.assign_step().unwrap().to_vec();
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|&c| c == 0 || c == 1));

        assert_eq!(engine.update_step().unwrap().len(), 2);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = seeded(9);
        let mut b = seeded(9);
        assert_eq!(a.generate_points(20).unwrap(), b.generate_points(20).unwrap());
        assert_eq!(
            a.generate_centroids(4).unwrap(),
            b.generate_centroids(4).unwrap()
        );
        a.assign_step().unwrap();
        b.assign_step().unwrap();
        assert_eq!(a.update_step().unwrap(), b.update_step().unwrap());
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
