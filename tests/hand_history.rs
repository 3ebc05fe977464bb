mod common;

use common::{card, table};
use crazy_eights::cards::Suit;
use crazy_eights::config::GameConfig;
use crazy_eights::game::{Game, HistoryVerb, Intent, Turn};

#[test]
fn history_records_plays_draws_and_win() {
    let mut game = table("2s 3s", "5c", "9c Kd", "7c", Turn::Player, Suit::Clubs);
    game.submit(Intent::DrawCard { actor: Turn::Player }).unwrap();
    game.submit(Intent::PlayCard { actor: Turn::Player, card: card("9c").id(), declared: None })
        .unwrap();
    game.submit(Intent::PlayCard { actor: Turn::Opponent, card: card("7c").id(), declared: None })
        .unwrap();

    let history = game.history_recent(10);
    let verbs: Vec<HistoryVerb> = history.iter().map(|e| e.verb).collect();
    assert_eq!(verbs, [HistoryVerb::Draw, HistoryVerb::Play, HistoryVerb::Play, HistoryVerb::Win]);
    assert_eq!(history[0].card, None, "drawn cards stay hidden");
    assert_eq!(history[1].actor, Turn::Player);
    assert_eq!(history[1].card, Some(card("9c")));
    assert_eq!(history[3].actor, Turn::Opponent);
    let seqs: Vec<usize> = history.iter().map(|e| e.seq).collect();
    assert_eq!(seqs, [0, 1, 2, 3]);
}

#[test]
fn declared_suit_is_recorded() {
    let mut game = table("2s", "5c", "8d Kd", "7c 2h", Turn::Player, Suit::Clubs);
    game.submit(Intent::PlayCard {
        actor: Turn::Player,
        card: card("8d").id(),
        declared: Some(Suit::Hearts),
    })
    .unwrap();
    let last = game.history_recent(1);
    assert_eq!(last[0].declared, Some(Suit::Hearts));
}

#[test]
fn history_cleared_on_new_game() {
    let mut game = Game::new(GameConfig::default().with_seed(4));
    game.submit(Intent::StartGame).unwrap();
    game.submit(Intent::DrawCard { actor: Turn::Player }).unwrap();
    assert_eq!(game.history_len(), 1);
    game.submit(Intent::Reset).unwrap();
    assert_eq!(game.history_len(), 0);
    game.submit(Intent::StartGame).unwrap();
    assert!(game.history_recent(5).is_empty());
}

#[test]
fn history_offset_pages_from_the_end() {
    let mut game = table("2s 3s 4s 5s 6s 7s", "5c", "9h", "9d", Turn::Player, Suit::Clubs);
    for _ in 0..6 {
        game.submit(Intent::DrawCard { actor: Turn::Player }).unwrap();
    }
    assert_eq!(game.history_len(), 6);
    let window = game.history_recent_offset(3, 0);
    assert_eq!(window.len(), 3);
    let older = game.history_recent_offset(3, 2);
    assert_eq!(older.len(), 3);
    assert_ne!(window[0], older[0]);
    let clamped = game.history_recent_offset(3, 100);
    assert_eq!(clamped[0].seq, 0);
}
