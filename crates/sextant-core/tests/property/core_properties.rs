//! Property tests for core tables and signal helpers.

use proptest::prelude::*;
use sextant_core::intent::{Intent, IntentProfile, IntentProfiles};
use sextant_core::signals::{normalize_by_max, top_k, SignalMap};
use sextant_core::SignalBreakdown;

fn signal_map() -> impl Strategy<Value = SignalMap> {
    prop::collection::hash_map("[a-z]{1,6}", 0.0f64..100.0, 0..30)
}

fn unit_signal() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

proptest! {
    #[test]
    fn normalized_values_stay_in_unit_interval(mut m in signal_map()) {
        normalize_by_max(&mut m);
        for v in m.values() {
            prop_assert!((0.0..=1.0).contains(v));
        }
        if m.values().any(|v| *v > 0.0) {
            let max = m.values().copied().fold(0.0, f64::max);
            prop_assert!((max - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn top_k_is_sorted_and_bounded(m in signal_map(), k in 0usize..20) {
        let top = top_k(&m, k);
        prop_assert!(top.len() <= k);
        for pair in top.windows(2) {
            let (a, b) = (m[&pair[0]], m[&pair[1]]);
            prop_assert!(a > b || (a == b && pair[0] < pair[1]));
        }
    }

    #[test]
    fn fused_score_of_unit_signals_stays_in_unit_interval(
        e in unit_signal(), t in unit_signal(), g in unit_signal(), i in unit_signal(),
        idx in 0usize..Intent::COUNT,
    ) {
        let profile = IntentProfiles::default().get(Intent::ALL[idx]);
        let s = SignalBreakdown { embedding: e, text: t, graph: g, intent: i };
        let score = s.fuse(&profile);
        prop_assert!(score >= 0.0);
        prop_assert!(score <= 1.0 + 1e-9);
    }

    #[test]
    fn zero_graph_weights_reduce_to_two_weight_formula(
        alpha in 0.0f64..=1.0, e in unit_signal(), t in unit_signal(),
        g in unit_signal(), i in unit_signal(),
    ) {
        let profile = IntentProfile { embedding: alpha, text: 1.0 - alpha, graph: 0.0, intent: 0.0 };
        let s = SignalBreakdown { embedding: e, text: t, graph: g, intent: i };
        prop_assert_eq!(s.fuse(&profile), alpha * e + (1.0 - alpha) * t);
    }

    #[test]
    fn valid_profiles_round_trip_through_new(a in 0.0f64..0.5, b in 0.0f64..0.5) {
        let c = (1.0 - a - b) / 2.0;
        prop_assert!(IntentProfile::new(a, b, c, 1.0 - a - b - c).is_ok());
    }
}
