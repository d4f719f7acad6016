//! Property tests for the stage model, list editing and procedure parsing.

use proptest::prelude::*;

use dental_chart_core::config::DisplayConfig;
use dental_chart_core::display::format_cost;
use dental_chart_core::models::Stage;
use dental_chart_core::session::{DraftSession, ListEditor};
use dental_chart_core::widgets::{parse_cost, parse_procedures, timeline};

fn any_stage() -> impl Strategy<Value = Stage> {
    prop::sample::select(Stage::ALL.to_vec())
}

proptest! {
    #[test]
    fn progress_follows_stage_order(a in any_stage(), b in any_stage()) {
        if a <= b {
            prop_assert!(a.progress() <= b.progress());
        } else {
            prop_assert!(a.progress() > b.progress());
        }
    }

    #[test]
    fn timeline_has_one_active_node(stage in any_stage()) {
        let nodes = timeline(stage);
        prop_assert_eq!(nodes.len(), 4);
        prop_assert_eq!(nodes.iter().filter(|n| n.active).count(), 1);
        let completed = nodes.iter().filter(|n| n.completed).count();
        prop_assert_eq!(completed, stage.progress() as usize / 25);
    }

    #[test]
    fn append_then_remove_restores_list(items in prop::collection::vec(".*", 0..8)) {
        let mut list = items.clone();
        list.append_blank();
        let last = list.len() - 1;
        list.remove_entry(last).unwrap();
        prop_assert_eq!(list, items);
    }

    #[test]
    fn remove_preserves_relative_order(items in prop::collection::vec("[a-z]{1,6}", 1..8), pick in any::<prop::sample::Index>()) {
        let index = pick.index(items.len());
        let mut list = items.clone();
        let removed = list.remove_entry(index).unwrap();

        let mut expected = items.clone();
        expected.remove(index);
        prop_assert_eq!(removed, items[index].clone());
        prop_assert_eq!(list, expected);
    }

    #[test]
    fn parsed_procedures_are_never_blank(text in "[a-zA-Z \n\t]{0,64}") {
        let procedures = parse_procedures(&text);
        prop_assert!(procedures.iter().all(|p| !p.trim().is_empty()));
        prop_assert!(procedures.iter().all(|p| !p.contains('\n')));
    }

    #[test]
    fn parsed_cost_is_never_negative(input in ".{0,16}") {
        let cost = parse_cost(&input);
        prop_assert!(cost.is_finite());
        prop_assert!(cost >= 0.0);
    }

    #[test]
    fn formatted_cost_has_no_leading_separator(amount in 0.0f64..1.0e9) {
        let text = format_cost(amount, &DisplayConfig::default());
        prop_assert!(text.starts_with('$'));
        prop_assert!(!text[1..].starts_with(','));
    }

    #[test]
    fn discard_always_restores_committed(start in any::<i64>(), edits in prop::collection::vec(any::<i64>(), 0..5)) {
        let mut session = DraftSession::new(start);
        session.begin_edit();
        for value in edits {
            session.edit(|draft| *draft = value);
        }
        session.discard();
        prop_assert_eq!(*session.draft(), start);
        prop_assert!(!session.is_editing());
    }
}
