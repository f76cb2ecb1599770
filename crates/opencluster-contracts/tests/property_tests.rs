//! Property-based tests for contract conversions and mode ordering.

use opencluster_contracts::{GearSelector, PanelId, TerrainMode};
use proptest::prelude::*;

fn panel_strategy() -> impl Strategy<Value = PanelId> {
    prop::sample::select(PanelId::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_selector_parse_accepts_only_prnd(c in any::<char>()) {
        let parsed = GearSelector::try_from(c);
        let expected = matches!(c.to_ascii_uppercase(), 'P' | 'R' | 'N' | 'D');
        prop_assert_eq!(parsed.is_ok(), expected);
        if let Ok(selector) = parsed {
            prop_assert_eq!(selector.as_char(), c.to_ascii_uppercase());
        }
    }

    #[test]
    fn test_panel_order_is_permutation_sorted_desc(
        entries in prop::collection::vec((panel_strategy(), -50i32..150), 0..8)
    ) {
        let mut mode = TerrainMode::new("Prop");
        for (panel, priority) in &entries {
            mode = mode.with_priority(*panel, *priority);
        }

        let order = mode.panel_order();
        prop_assert_eq!(order.len(), PanelId::ALL.len());
        for panel in PanelId::ALL {
            prop_assert!(order.contains(&panel));
        }
        for pair in order.windows(2) {
            if let [a, b] = pair {
                prop_assert!(mode.priority_of(*a) >= mode.priority_of(*b));
            }
        }
    }

    #[test]
    fn test_mode_json_round_trip_preserves_lookups(
        entries in prop::collection::vec((panel_strategy(), 0i32..200), 0..5)
    ) {
        let mut mode = TerrainMode::new("Prop");
        for (panel, priority) in &entries {
            mode = mode.with_priority(*panel, *priority);
        }
        let json = serde_json::to_string(&mode).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let back: TerrainMode =
            serde_json::from_str(&json).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(back.panel_order(), mode.panel_order());
    }
}
