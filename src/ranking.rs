//! Ordering of aggregated vehicles by distance

use crate::models::Vehicle;

/// Sort ascending by distance from the query origin.
///
/// The sort is stable, so vehicles at the same distance keep the order in
/// which they were merged.
#[must_use]
pub fn rank(mut vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
    vehicles.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    vehicles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use proptest::prelude::*;
    use rstest::rstest;

    fn vehicle(id: usize, distance_km: f64) -> Vehicle {
        Vehicle::bike(id.to_string(), "test", Coordinate::new(0.0, 0.0), distance_km)
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![0.4], vec!["0"])]
    #[case(vec![0.9, 0.1, 0.5], vec!["1", "2", "0"])]
    #[case(vec![0.5, 0.2, 0.5, 0.2], vec!["1", "3", "0", "2"])]
    fn test_rank(#[case] distances: Vec<f64>, #[case] expected: Vec<&str>) {
        let vehicles = distances
            .into_iter()
            .enumerate()
            .map(|(id, d)| vehicle(id, d))
            .collect();
        let ranked = rank(vehicles);
        let ids: Vec<&str> = ranked.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    proptest! {
        #[test]
        fn prop_rank_is_sorted_and_stable(distances in prop::collection::vec(0u8..5, 0..40)) {
            let vehicles: Vec<Vehicle> = distances
                .iter()
                .enumerate()
                .map(|(id, d)| vehicle(id, f64::from(*d) / 4.0))
                .collect();

            let ranked = rank(vehicles);

            prop_assert_eq!(ranked.len(), distances.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].distance_km <= pair[1].distance_km);
                if pair[0].distance_km == pair[1].distance_km {
                    let first: usize = pair[0].id.parse().unwrap();
                    let second: usize = pair[1].id.parse().unwrap();
                    prop_assert!(first < second);
                }
            }
        }
    }
}
