#[cfg(test)]
mod scoring_calculations {
    use daftrank::{
        config,
        producer::calculations::{
            ber_score, calculate_scoring, distance_score, floor_area_score, price_per_square_meter,
            price_per_square_meter_score, price_score, property_type_score, store_score,
            transport_score, ScoreInputs,
        },
    };

    #[test]
    fn ber_letter_table() {
        let expected = [
            ("A", 200),
            ("B", 70),
            ("C", 0),
            ("D", -50),
            ("E", -100),
            ("F", -150),
            ("G", -200),
        ];
        for (letter, score) in expected {
            assert_eq!(ber_score(&format!("{letter}9")), Some(score), "{letter}");
        }
    }

    #[test]
    fn ber_digit_bonus() {
        assert_eq!(ber_score("A1"), Some(240));
        assert_eq!(ber_score("A2"), Some(220));
        assert_eq!(ber_score("A3"), Some(210));
        assert_eq!(ber_score("B2"), Some(77));
        assert_eq!(ber_score("C1"), Some(0));
        assert_eq!(ber_score("E2"), Some(-90));
        assert_eq!(ber_score("G1"), Some(-160));
    }

    #[test]
    fn ber_outside_a_to_g_is_not_scored() {
        assert_eq!(ber_score("H1"), None);
        assert_eq!(ber_score("SI_666"), None);
        assert_eq!(ber_score(""), None);
    }

    #[test]
    fn property_type_table() {
        assert_eq!(property_type_score("Detached"), 100);
        assert_eq!(property_type_score("Semi-D"), 50);
        assert_eq!(property_type_score("Bungalow"), 30);
        assert_eq!(property_type_score("End of Terrace"), -100);
        assert_eq!(property_type_score("Terrace"), -100);
        assert_eq!(property_type_score(""), -100);
    }

    #[test]
    fn linear_factors() {
        assert_eq!(floor_area_score(150), 0);
        assert_eq!(floor_area_score(200), 100);
        assert_eq!(floor_area_score(100), -100);
        assert_eq!(distance_score(0.57), 0);
        assert_eq!(distance_score(25.0), -3);
        assert_eq!(distance_score(15.0), -2);
        assert_eq!(transport_score(5), -15);
        assert_eq!(store_score(10), -20);
    }

    #[test]
    fn price_rewards_distance_below_midpoint() {
        let config = config::create_test_config();
        assert_eq!(config.price_midpoint(), 450000.0);
        assert_eq!(price_score(400000, config.price_midpoint()), 50);
        assert_eq!(price_score(600000, config.price_midpoint()), -150);
        assert_eq!(price_score(449500, config.price_midpoint()), 1);
        assert_eq!(price_score(450500, config.price_midpoint()), 0);
    }

    #[test]
    fn price_per_square_meter_factor() {
        let ppsm = price_per_square_meter(400000, 120.0);
        assert_eq!(ppsm, 3334);
        assert_eq!(price_per_square_meter_score(ppsm), 17);
        assert_eq!(price_per_square_meter_score(6000), -10);
    }

    #[test]
    fn semi_d_example_scores_exactly() {
        let config = config::create_test_config();
        let scoring = calculate_scoring(&ScoreInputs {
            ber_rating: "B2",
            bedrooms: 3,
            bathrooms: 2,
            floor_area: 120,
            distance_km: 0.57,
            transport_minutes: 5,
            store_minutes: Some(10),
            price: 400000,
            price_midpoint: config.price_midpoint(),
            price_per_square_meter: 3334,
            property_type: "Semi-D",
        })
        .unwrap();

        let factors = scoring.factors();
        assert_eq!(factors.ber, 77);
        assert_eq!(factors.bedrooms, 75);
        assert_eq!(factors.bathrooms, 20);
        assert_eq!(factors.floor_area, -60);
        assert_eq!(factors.distance, 0);
        assert_eq!(factors.transport, -15);
        assert_eq!(factors.store, Some(-20));
        assert_eq!(factors.price, 50);
        assert_eq!(factors.price_per_square_meter, 17);
        assert_eq!(factors.property_type, 50);
        assert_eq!(scoring.total(), 194);
    }

    #[test]
    fn total_always_matches_parts() {
        let config = config::create_test_config();
        for (rating, beds, minutes, store) in [
            ("A1", 5, 2, Some(3)),
            ("D3", 1, 29, None),
            ("G", 0, 0, Some(45)),
            ("C7", 4, 13, Some(7)),
        ] {
            let scoring = calculate_scoring(&ScoreInputs {
                ber_rating: rating,
                bedrooms: beds,
                bathrooms: 1,
                floor_area: 180,
                distance_km: 12.3,
                transport_minutes: minutes,
                store_minutes: store,
                price: 512345,
                price_midpoint: config.price_midpoint(),
                price_per_square_meter: 2847,
                property_type: "Bungalow",
            })
            .unwrap();

            let f = scoring.factors();
            let parts = f.ber
                + f.bedrooms
                + f.bathrooms
                + f.floor_area
                + f.distance
                + f.transport
                + f.store.unwrap_or(0)
                + f.price
                + f.price_per_square_meter
                + f.property_type;
            assert_eq!(scoring.total(), parts, "{rating}");
        }
    }
}
