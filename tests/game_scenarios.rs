use connect_four::ai::HeuristicAi;
use connect_four::error::MoveError;
use connect_four::game::{has_run, Cell, GameSession, Outcome, Side, Status, WIN_LENGTH};

/// Full 7x6 game that fills every cell without a four-in-a-row.
const TIE_SEQUENCE: [usize; 42] = [
    3, 4, 4, 6, 0, 3, 5, 2, 6, 5, 0, 6, 5, 0, 3, 6, 5, 6, 1, 3, 1, 3, 6, 5, 2, 0, 5, 3, 4, 4, 0,
    1, 1, 1, 0, 1, 4, 2, 4, 2, 2, 2,
];

fn play(session: &mut GameSession, columns: &[usize]) {
    for &col in columns {
        assert_eq!(session.apply_move(col), Ok(Outcome::InProgress));
    }
}

#[test]
fn vertical_stack_wins_on_fourth_drop() {
    let mut session = GameSession::new(7, 6, false).unwrap();

    for _ in 0..3 {
        assert_eq!(session.apply_move(3), Ok(Outcome::InProgress)); // A
        assert_eq!(session.apply_move(0), Ok(Outcome::InProgress)); // B
    }
    assert_eq!(session.apply_move(3), Ok(Outcome::Win(Side::First)));
    assert_eq!(session.status(), Status::Finished(Outcome::Win(Side::First)));
    assert_eq!(session.board().column_height(3), 4);
}

#[test]
fn filling_the_board_without_a_run_is_a_tie() {
    let mut session = GameSession::new(7, 6, false).unwrap();

    let (last, rest) = TIE_SEQUENCE.split_last().unwrap();
    play(&mut session, rest);
    assert_eq!(session.apply_move(*last), Ok(Outcome::Tie));

    assert!(session.board().is_full());
    assert_eq!(session.status(), Status::Finished(Outcome::Tie));
    assert!(!has_run(session.board(), Side::First, WIN_LENGTH));
    assert!(!has_run(session.board(), Side::Second, WIN_LENGTH));
    assert_eq!(session.history().len(), 42);
}

#[test]
fn boundary_columns() {
    let mut session = GameSession::new(7, 6, false).unwrap();

    assert_eq!(
        session.apply_move(7),
        Err(MoveError::ColumnOutOfRange { column: 7, width: 7 })
    );
    assert!(session.apply_move(usize::MAX).is_err());
    assert!(session.history().is_empty());

    assert_eq!(session.apply_move(0), Ok(Outcome::InProgress));
    assert_eq!(session.board().get(5, 0), Cell::Occupied(Side::First));
}

#[test]
fn ai_completes_its_own_row() {
    let mut session = GameSession::standard(true);
    // Human stacks column 6, the computer's pieces line up along the bottom
    play(&mut session, &[6, 0, 6, 1, 5, 2, 6]);
    assert!(session.is_ai_turn());

    let mut ai = HeuristicAi::seeded(1);
    let side = session.current_side().unwrap();
    let column = ai.choose_column(session.board(), side).unwrap();
    assert_eq!(column, 3);
    assert_eq!(session.apply_move(column), Ok(Outcome::Win(Side::Second)));
}

#[test]
fn ai_blocks_open_three() {
    let mut session = GameSession::standard(true);
    play(&mut session, &[0, 6, 1, 6, 2]);

    let mut ai = HeuristicAi::seeded(2);
    let column = ai.choose_column(session.board(), Side::Second).unwrap();
    assert_eq!(column, 3);
    assert_eq!(session.apply_move(column), Ok(Outcome::InProgress));
}

#[test]
fn ai_against_itself_finishes() {
    for seed in 0..5 {
        let mut first = HeuristicAi::seeded(seed);
        let mut second = HeuristicAi::seeded(seed + 100);
        let mut session = GameSession::standard(false);

        while let Some(side) = session.current_side() {
            let ai = match side {
                Side::First => &mut first,
                Side::Second => &mut second,
            };
            let column = ai.choose_column(session.board(), side).unwrap();
            session.apply_move(column).unwrap();
        }

        assert!(session.is_finished());
        assert!(session.history().len() <= 42);
        assert!(session.legal_moves().is_empty());
    }
}

#[test]
fn small_boards_are_supported() {
    let mut session = GameSession::new(4, 4, false).unwrap();
    // First side fills the bottom row
    play(&mut session, &[0, 0, 1, 1, 2, 2]);
    assert_eq!(session.apply_move(3), Ok(Outcome::Win(Side::First)));
}
