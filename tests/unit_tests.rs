use single_enrichment::enrichment::{
    descending_order, rank_data, running_sum_profile, select_score,
};
use single_enrichment::error::DegenerateReason;

#[cfg(test)]
mod quick_test {
    use super::*;

    #[test]
    fn check_members_on_top_score_positive() {
        // Ten genes, the set holds the three most expressed ones.
        // The running sum climbs first and only falls afterwards, so the
        // area under it must be positive and the classic peak must be > 0.
        let values = [9.0f64, 8.5, 8.0, 1.0, 2.0, 0.5, 3.0, 1.5, 2.5, 0.1];
        let in_set = [true, true, true, false, false, false, false, false, false, false];

        let ranks = rank_data(&values);
        let order = descending_order(&ranks);
        let profile = running_sum_profile(&ranks, &order, &in_set, 0.25).unwrap();

        let ss = select_score(&profile, values.len(), true, true);
        let classic = select_score(&profile, values.len(), false, false);

        println!("ssGSEA score: {}, classic score: {}", ss, classic);
        assert!(ss > 0.0);
        assert!((classic - 1.0).abs() < 1e-12);
    }

    #[test]
    fn check_members_at_bottom_score_negative() {
        // Same genes, the set now holds the three least expressed ones.
        let values = [9.0f64, 8.5, 8.0, 1.0, 2.0, 0.5, 3.0, 1.5, 2.5, 0.1];
        let in_set = [false, false, false, false, false, true, false, true, false, true];

        let ranks = rank_data(&values);
        let order = descending_order(&ranks);
        let profile = running_sum_profile(&ranks, &order, &in_set, 0.25).unwrap();

        assert!(select_score(&profile, values.len(), true, true) < 0.0);
        assert!(select_score(&profile, values.len(), false, false) < 0.0);
    }

    #[test]
    fn check_alpha_zero_is_unweighted() {
        // With alpha = 0 every member weighs 1, so the member CDF moves in
        // equal steps of 1/k.
        let values = [4.0f64, 3.0, 2.0, 1.0];
        let in_set = [true, false, true, false];

        let ranks = rank_data(&values);
        let order = descending_order(&ranks);
        let profile = running_sum_profile(&ranks, &order, &in_set, 0.0).unwrap();

        let expected = [0.5f64, 0.0, 0.5, 0.0];
        for (got, want) in profile.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "profile {:?}", profile);
        }
    }

    #[test]
    fn check_relabeling_does_not_change_score() {
        // Shuffle the gene rows together with their membership; scores only
        // depend on which value belongs to which member.
        let values = [0.2f64, 5.1, 3.3, 4.4, 1.0, 2.2];
        let in_set = [false, true, false, true, true, false];
        let perm = [3, 0, 5, 1, 4, 2];

        let shuffled_values: Vec<f64> = perm.iter().map(|&i| values[i]).collect();
        let shuffled_set: Vec<bool> = perm.iter().map(|&i| in_set[i]).collect();

        let score = |v: &[f64], s: &[bool]| {
            let ranks = rank_data(v);
            let order = descending_order(&ranks);
            let profile = running_sum_profile(&ranks, &order, s, 0.25).unwrap();
            select_score(&profile, v.len(), true, true)
        };

        let a = score(&values[..], &in_set[..]);
        let b = score(&shuffled_values[..], &shuffled_set[..]);
        assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
    }

    #[test]
    fn check_degenerate_sets() {
        let ranks = rank_data(&[1.0f64, 2.0, 3.0]);
        let order = descending_order(&ranks);

        assert_eq!(
            running_sum_profile(&ranks, &order, &[false; 3], 0.25),
            Err(DegenerateReason::NoMembers)
        );
        assert_eq!(
            running_sum_profile(&ranks, &order, &[true; 3], 0.25),
            Err(DegenerateReason::AllMembers)
        );
    }
}
