extern crate preflop_range;
use preflop_range::*;
use proptest::prelude::*;

fn position() -> impl Strategy<Value = Position> {
    (0u8..6).prop_map(|i| Position::try_from(i).unwrap())
}

fn kind() -> impl Strategy<Value = ActionKind> {
    prop_oneof![
        Just(ActionKind::Fold),
        Just(ActionKind::Call),
        Just(ActionKind::Raise),
    ]
}

fn field() -> impl Strategy<Value = CellField> {
    prop_oneof![
        Just(CellField::Call),
        Just(CellField::Fold),
        Just(CellField::Raise),
    ]
}

/// Random cell edits: `(row, col, field, value)`.
fn cell_edits() -> impl Strategy<Value = Vec<(usize, usize, CellField, u8)>> {
    prop::collection::vec((0usize..13, 0usize..13, field(), 0u8..=120), 1..40)
}

/// Builds a legal sequence for `position` by replaying random edits from the first seat on.
fn sequence() -> impl Strategy<Value = ActionSequence> {
    (position(), prop::collection::vec((kind(), 0.0f64..4.0), 5)).prop_map(|(position, edits)| {
        let mut seq = ActionSequence::new(position);
        for (index, (kind, extra)) in edits.into_iter().take(seq.len()).enumerate() {
            let amount = match kind {
                ActionKind::Raise => Some(seq.min_raise(index) + extra),
                _ => None,
            };
            seq = seq.set_action(index, kind, amount).unwrap();
        }
        seq
    })
}

proptest! {
    #[test]
    fn resize_is_all_fold(seq in sequence(), position in position()) {
        let resized = seq.resize(position);
        prop_assert_eq!(resized.len(), position.index());
        prop_assert!(resized.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn min_raise_doubles_last_bet(seq in sequence(), index in 0usize..6) {
        prop_assert_eq!(seq.min_raise(index), 2.0 * seq.last_bet_amount(index));
        prop_assert!(seq.last_bet_amount(index) >= 1.0);
    }

    #[test]
    fn classify_matches_set_action(seq in sequence(), index in 0usize..5, kind in kind()) {
        prop_assume!(index < seq.len());
        let edited = seq.set_action(index, kind, None).unwrap();
        prop_assert_eq!(edited.classify(index).unwrap(), kind);
    }

    #[test]
    fn custom_raise_classifies_as_raise(seq in sequence(), index in 0usize..5, extra in 0.0f64..50.0) {
        prop_assume!(index < seq.len());
        let amount = seq.min_raise(index) + extra;
        let edited = seq.set_action(index, ActionKind::Raise, Some(amount)).unwrap();
        prop_assert_eq!(edited.classify(index).unwrap(), ActionKind::Raise);
        prop_assert_eq!(edited.values()[index], amount);
    }

    #[test]
    fn edit_resets_later_seats(seq in sequence(), index in 0usize..5, kind in kind()) {
        prop_assume!(index < seq.len());
        let edited = seq.set_action(index, kind, None).unwrap();
        prop_assert_eq!(edited.len(), seq.len());
        prop_assert_eq!(&edited.values()[..index], &seq.values()[..index]);
        prop_assert!(edited.values()[index + 1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn short_raise_is_rejected(seq in sequence(), index in 0usize..5, short in 0.01f64..1.0) {
        prop_assume!(index < seq.len());
        let amount = seq.min_raise(index) * (1.0 - short);
        let result = seq.set_action(index, ActionKind::Raise, Some(amount));
        prop_assert!(matches!(result, Err(RangeError::IllegalRaise(_))));
    }

    #[test]
    fn edited_sequences_are_valid(seq in sequence()) {
        prop_assert!(seq.validate().is_ok());
        prop_assert!(ActionSequence::from_values(seq.values().to_vec()).is_ok());
    }

    #[test]
    fn committed_cells_sum_to_100(edits in cell_edits()) {
        let mut chart = RangeChart::new();
        for (row, col, field, value) in edits {
            let cell = chart.get(row, col).unwrap().edit(field, value);
            let before = chart.clone();
            match chart.with_cell(row, col, cell) {
                Ok(edited) => {
                    prop_assert!(cell.is_valid());
                    prop_assert_eq!(edited.get(row, col).unwrap(), cell);
                    chart = edited;
                }
                Err(e) => {
                    prop_assert!(matches!(e, RangeError::Validation(_)));
                    prop_assert!(!cell.is_valid());
                    prop_assert_eq!(&chart, &before);
                }
            }
            prop_assert!(chart.is_valid());
        }
    }

    #[test]
    fn applied_session_edits_keep_chart_valid(edits in cell_edits()) {
        let mut session = EditSession::new();
        for (row, col, field, value) in edits {
            session.select_cell(row, col).unwrap();
            let pending = session.edit_cell(field, value).unwrap();
            let before = session.chart().clone();
            if session.apply_cell().is_ok() {
                prop_assert!(pending.is_valid());
                prop_assert_eq!(session.chart().get(row, col).unwrap(), pending);
            } else {
                prop_assert!(!pending.is_valid());
                prop_assert_eq!(session.chart(), &before);
                prop_assert!(session.editor().is_some());
                session.cancel_cell();
            }
            prop_assert!(session.chart().is_valid());
        }
    }

    #[test]
    fn labels_swap_suitedness_under_transpose(row in 0usize..13, col in 0usize..13) {
        prop_assume!(row < col);
        let suited = hand_label(row, col).unwrap();
        let offsuit = hand_label(col, row).unwrap();
        prop_assert!(suited.ends_with('s'));
        prop_assert!(offsuit.ends_with('o'));
        prop_assert_eq!(&suited[..2], &offsuit[..2]);
    }
}

#[test]
fn first_to_act_has_no_previous_actions() {
    let seq = ActionSequence::new(Position::Utg);
    assert!(seq.is_empty());
    assert!(seq.seat_contexts().is_empty());
}

#[test]
fn unopened_pot_calls_the_big_blind() {
    let seq = ActionSequence::new(Position::Btn);
    assert_eq!(seq.values(), &[0.0, 0.0, 0.0]);
    assert_eq!(seq.last_bet_amount(3), 1.0);
    assert_eq!(seq.min_raise(3), 2.0);
}

#[test]
fn raise_and_reraise_then_reset() {
    let seq = ActionSequence::new(Position::Btn)
        .set_action(0, ActionKind::Raise, Some(3.0))
        .unwrap()
        .set_action(1, ActionKind::Raise, Some(7.0))
        .unwrap()
        .set_action(2, ActionKind::Call, None)
        .unwrap();

    assert_eq!(seq.values(), &[3.0, 7.0, 7.0]);
    assert_eq!(seq.last_bet_amount(2), 7.0);
    assert_eq!(seq.min_raise(2), 14.0);

    let seq = seq.set_action(0, ActionKind::Fold, None).unwrap();
    assert_eq!(seq.values(), &[0.0, 0.0, 0.0]);
}

#[test]
fn cascade_applies_even_without_change() {
    let seq = ActionSequence::new(Position::Co)
        .set_action(0, ActionKind::Call, None)
        .unwrap()
        .set_action(1, ActionKind::Raise, None)
        .unwrap();
    assert_eq!(seq.values(), &[1.0, 2.0]);

    let seq = seq.set_action(0, ActionKind::Call, None).unwrap();
    assert_eq!(seq.values(), &[1.0, 0.0]);
}
