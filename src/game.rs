use crate::cards::{Card, CardId, Suit};
use crate::config::{DrawRule, GameConfig};
use crate::deck::{build_standard_deck, Deck, RandomSource, RngSource, DECK_SIZE};
use crate::hand::{DiscardPile, Hand};
use crate::observe::{Subscribers, Subscription};
use crate::rules;
use core::fmt;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

/// Cards dealt to each participant.
pub const HAND_SIZE: usize = 8;

/// The two participants. Also names whose intents the engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Player,
    Opponent,
}

impl Turn {
    pub const BOTH: [Turn; 2] = [Turn::Player, Turn::Opponent];

    pub const fn other(self) -> Turn {
        match self {
            Turn::Player => Turn::Opponent,
            Turn::Opponent => Turn::Player,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Turn::Player => 0,
            Turn::Opponent => 1,
        }
    }

    /// Subject used in action messages.
    pub const fn subject(self) -> &'static str {
        match self {
            Turn::Player => "You",
            Turn::Opponent => "Opponent",
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Player => f.write_str("Player"),
            Turn::Opponent => f.write_str("Opponent"),
        }
    }
}

/// Strictly sequential; only an explicit reset goes back to `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    Start,
    Dealing,
    Playing,
    GameOver,
}

/// External request to change the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Intent {
    StartGame,
    PlayCard { actor: Turn, card: CardId, declared: Option<Suit> },
    DrawCard { actor: Turn },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalCardReason {
    NotInHand,
    NotPlayable,
}

impl fmt::Display for IllegalCardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalCardReason::NotInHand => f.write_str("not in hand"),
            IllegalCardReason::NotPlayable => f.write_str("matches neither suit nor rank"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DealError {
    #[error("deck too short to deal: need at least {needed}, got {got}")]
    ShortDeck { needed: usize, got: usize },
    #[error("no non-eight card left to start the discard pile")]
    NoStarterCard,
    #[error("a game in progress needs a discard pile")]
    EmptyDiscard,
    #[error("card {0} is placed more than once")]
    DuplicateCard(CardId),
    #[error("{0} is not a card of the standard deck")]
    UnknownCard(Card),
    #[error("table holds {got} cards, expected {expected}")]
    IncompleteDeck { expected: usize, got: usize },
}

/// Reasons an intent is refused. A refused intent never changes the state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("not accepted during the {0:?} phase")]
    WrongPhase(Phase),
    #[error("it is the {expected}'s turn, not the {actor}'s")]
    NotYourTurn { expected: Turn, actor: Turn },
    #[error("card {card} cannot be played: {reason}")]
    IllegalCard { card: CardId, reason: IllegalCardReason },
    #[error("playing {0} requires declaring a suit")]
    MissingSuitDeclaration(Card),
    #[error("{0} is not wild; no suit may be declared")]
    UnexpectedSuitDeclaration(Card),
    #[error(transparent)]
    Deal(#[from] DealError),
}

/// Human-readable description of the most recent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LastAction {
    Welcome,
    Dealt,
    Played { actor: Turn, card: Card, declared: Option<Suit> },
    Drew { actor: Turn },
    DeckEmptyPass { actor: Turn },
    Skipped { actor: Turn },
}

impl fmt::Display for LastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastAction::Welcome => f.write_str("Welcome to Crazy Eights!"),
            LastAction::Dealt => f.write_str("Game started! Your turn."),
            LastAction::Played { actor, card, declared } => {
                let (rank, suit) = (card.rank().label(), card.suit().name());
                write!(f, "{} played {rank} of {suit}", actor.subject())?;
                if let Some(s) = declared {
                    write!(f, ". New suit: {}", s.name())?;
                }
                Ok(())
            }
            LastAction::Drew { actor } => write!(f, "{} drew a card.", actor.subject()),
            LastAction::DeckEmptyPass { actor } => {
                write!(f, "The deck is empty! {} passed.", actor.subject())
            }
            LastAction::Skipped { actor } => write!(
                f,
                "{} had no playable card and the deck is empty. Turn skipped!",
                actor.subject()
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryVerb {
    Play,
    Draw,
    Pass,
    Skip,
    Win,
}

impl HistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HistoryVerb::Play => "Play",
            HistoryVerb::Draw => "Draw",
            HistoryVerb::Pass => "Pass",
            HistoryVerb::Skip => "Skip",
            HistoryVerb::Win => "Win",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    pub seq: usize,
    pub actor: Turn,
    pub verb: HistoryVerb,
    /// Card played, for `Play` entries.
    pub card: Option<Card>,
    pub declared: Option<Suit>,
}

/// Complete state of one game. Values are never mutated once published;
/// the engine builds a new one for every accepted step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameState {
    pub(crate) deck: Deck,
    pub(crate) discard: DiscardPile,
    pub(crate) player_hand: Hand,
    pub(crate) opponent_hand: Hand,
    pub(crate) turn: Turn,
    pub(crate) phase: Phase,
    pub(crate) active_suit: Option<Suit>,
    pub(crate) winner: Option<Turn>,
    pub(crate) last_action: LastAction,
}

impl GameState {
    /// State before the first deal: an unshuffled deck holds every card.
    pub fn initial() -> Self {
        Self {
            deck: Deck::standard(),
            discard: DiscardPile::new(),
            player_hand: Hand::default(),
            opponent_hand: Hand::default(),
            turn: Turn::Player,
            phase: Phase::Start,
            active_suit: None,
            winner: None,
            last_action: LastAction::Welcome,
        }
    }

    /// A game already in progress, e.g. to replay a position.
    ///
    /// `deck` uses the usual orientation: its last card is drawn first. The
    /// four zones together must hold every standard card exactly once.
    pub fn in_progress(
        deck: Vec<Card>,
        discard: Vec<Card>,
        player: Vec<Card>,
        opponent: Vec<Card>,
        turn: Turn,
        active_suit: Suit,
    ) -> Result<Self, DealError> {
        if discard.is_empty() {
            return Err(DealError::EmptyDiscard);
        }
        let standard = build_standard_deck();
        let mut seen = [false; DECK_SIZE];
        let mut got = 0;
        for &c in deck.iter().chain(&discard).chain(&player).chain(&opponent) {
            let slot = usize::from(c.id().0);
            if standard.get(slot) != Some(&c) {
                return Err(DealError::UnknownCard(c));
            }
            if std::mem::replace(&mut seen[slot], true) {
                return Err(DealError::DuplicateCard(c.id()));
            }
            got += 1;
        }
        if got != DECK_SIZE {
            return Err(DealError::IncompleteDeck { expected: DECK_SIZE, got });
        }
        let mut pile = DiscardPile::new();
        for c in discard {
            pile.push(c);
        }
        Ok(Self {
            deck: Deck::from_cards(deck),
            discard: pile,
            player_hand: Hand::new(player),
            opponent_hand: Hand::new(opponent),
            turn,
            phase: Phase::Playing,
            active_suit: Some(active_suit),
            winner: None,
            last_action: LastAction::Dealt,
        })
    }

    /// Like [`GameState::in_progress`], but only the top of the discard pile
    /// is given. Every standard card not placed elsewhere goes beneath it.
    pub fn arrange(
        deck: Vec<Card>,
        top: Card,
        player: Vec<Card>,
        opponent: Vec<Card>,
        turn: Turn,
        active_suit: Suit,
    ) -> Result<Self, DealError> {
        let placed: Vec<Card> =
            deck.iter().chain(&player).chain(&opponent).copied().chain([top]).collect();
        let mut discard: Vec<Card> =
            build_standard_deck().into_iter().filter(|c| !placed.contains(c)).collect();
        discard.push(top);
        Self::in_progress(deck, discard, player, opponent, turn, active_suit)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn discard_pile(&self) -> &DiscardPile {
        &self.discard
    }

    pub fn top_discard(&self) -> Option<Card> {
        self.discard.top()
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn opponent_hand(&self) -> &Hand {
        &self.opponent_hand
    }

    pub fn hand(&self, seat: Turn) -> &Hand {
        match seat {
            Turn::Player => &self.player_hand,
            Turn::Opponent => &self.opponent_hand,
        }
    }

    fn hand_mut(&mut self, seat: Turn) -> &mut Hand {
        match seat {
            Turn::Player => &mut self.player_hand,
            Turn::Opponent => &mut self.opponent_hand,
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_suit(&self) -> Option<Suit> {
        self.active_suit
    }

    pub fn winner(&self) -> Option<Turn> {
        self.winner
    }

    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    /// Cards across deck, both hands and the discard pile.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.player_hand.len() + self.opponent_hand.len() + self.discard.len()
    }

    /// Whether `card` may be played on the current table.
    pub fn can_play(&self, card: Card) -> bool {
        match (self.top_discard(), self.active_suit) {
            (Some(top), Some(active)) => rules::is_playable(card, top, active),
            _ => false,
        }
    }

    /// Cards from `seat`'s hand that are legal right now, in hand order.
    pub fn playable_cards(&self, seat: Turn) -> Vec<Card> {
        self.hand(seat).as_slice().iter().copied().filter(|&c| self.can_play(c)).collect()
    }

    fn is_seat_stalled(&self, seat: Turn) -> bool {
        match (self.top_discard(), self.active_suit) {
            (Some(top), Some(active)) => {
                rules::is_stalled(self.hand(seat).as_slice(), top, active, self.deck.len())
            }
            _ => false,
        }
    }

    /// The participant to act can neither play nor draw.
    pub fn is_stalled(&self) -> bool {
        self.phase == Phase::Playing && self.is_seat_stalled(self.turn)
    }

    /// Neither participant can ever move again; skips would alternate forever.
    pub fn is_deadlocked(&self) -> bool {
        self.phase == Phase::Playing && Turn::BOTH.iter().all(|&s| self.is_seat_stalled(s))
    }
}

/// Deal from an already shuffled deck.
///
/// The first [`HAND_SIZE`] cards go to the Player, the next [`HAND_SIZE`] to
/// the Opponent. The first non-Eight among the rest starts the discard pile;
/// Eights skipped over stay in the deck in their original order.
pub fn deal(cards: Vec<Card>) -> Result<GameState, DealError> {
    let needed = 2 * HAND_SIZE + 1;
    if cards.len() < needed {
        return Err(DealError::ShortDeck { needed, got: cards.len() });
    }
    let mut rest = cards;
    let player: Vec<Card> = rest.drain(..HAND_SIZE).collect();
    let opponent: Vec<Card> = rest.drain(..HAND_SIZE).collect();
    let idx = rest.iter().position(|c| !c.is_wild()).ok_or(DealError::NoStarterCard)?;
    let starter = rest.remove(idx);
    let mut discard = DiscardPile::new();
    discard.push(starter);
    Ok(GameState {
        deck: Deck::from_cards(rest),
        discard,
        player_hand: Hand::new(player),
        opponent_hand: Hand::new(opponent),
        turn: Turn::Player,
        phase: Phase::Playing,
        active_suit: Some(starter.suit()),
        winner: None,
        last_action: LastAction::Dealt,
    })
}

/// The turn state machine. Single writer of [`GameState`].
pub struct Game {
    config: GameConfig,
    state: Arc<GameState>,
    source: Box<dyn RandomSource>,
    history: Vec<HistoryEntry>,
    subscribers: Subscribers,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("history", &self.history.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    /// Shuffles with ChaCha8 seeded from `config.seed`, or from the OS when unset.
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self::with_source(config, Box::new(RngSource::seeded(seed)))
    }

    /// Use a caller-supplied shuffle source.
    pub fn with_source(config: GameConfig, source: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            state: Arc::new(GameState::initial()),
            source,
            history: Vec::new(),
            subscribers: Subscribers::default(),
        }
    }

    /// Continue from an arbitrary state.
    pub fn resume(config: GameConfig, state: GameState) -> Self {
        let mut game = Self::new(config);
        game.state = Arc::new(state);
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    /// Apply one intent. On rejection the state is left untouched.
    pub fn submit(&mut self, intent: Intent) -> Result<Arc<GameState>, ActionError> {
        let result = match intent {
            Intent::StartGame => self.start(),
            Intent::PlayCard { actor, card, declared } => self.play_card(actor, card, declared),
            Intent::DrawCard { actor } => self.draw_card(actor),
            Intent::Reset => {
                self.reset();
                Ok(())
            }
        };
        if let Err(err) = &result {
            debug!(?intent, %err, "intent rejected");
        }
        result.map(|()| self.snapshot())
    }

    pub fn subscribe<F>(&mut self, observer: F) -> Subscription
    where
        F: FnMut(&GameState) + 'static,
    {
        self.subscribers.register(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.subscribers.unregister(subscription)
    }

    /// Shuffle, deal and seed the discard pile. Only valid from `Start`.
    pub fn start(&mut self) -> Result<(), ActionError> {
        if self.state.phase != Phase::Start {
            return Err(ActionError::WrongPhase(self.state.phase));
        }
        let mut deck = Deck::standard();
        deck.shuffle_from(self.source.as_mut());
        debug!(phase = ?Phase::Dealing, "dealing");
        let next = deal(deck.into_cards())?;
        info!(
            starter = %next.discard.top().map(|c| c.to_string()).unwrap_or_default(),
            "game started"
        );
        self.history.clear();
        self.commit(next);
        Ok(())
    }

    /// Back to `Start` from any phase.
    pub fn reset(&mut self) {
        info!(phase = ?self.state.phase, "game reset");
        self.history.clear();
        self.commit(GameState::initial());
    }

    pub fn play_card(
        &mut self,
        actor: Turn,
        id: CardId,
        declared: Option<Suit>,
    ) -> Result<(), ActionError> {
        let (top, active) = self.ensure_can_act(actor)?;
        let card = self
            .state
            .hand(actor)
            .get(id)
            .ok_or(ActionError::IllegalCard { card: id, reason: IllegalCardReason::NotInHand })?;
        if !rules::is_playable(card, top, active) {
            return Err(ActionError::IllegalCard {
                card: id,
                reason: IllegalCardReason::NotPlayable,
            });
        }
        let effect = rules::effect_of_play(card, declared);
        if !effect.requires_suit_declaration && declared.is_some() {
            return Err(ActionError::UnexpectedSuitDeclaration(card));
        }
        let Some(new_suit) = effect.new_active_suit else {
            return Err(ActionError::MissingSuitDeclaration(card));
        };

        let mut next = GameState::clone(&self.state);
        next.hand_mut(actor).remove(id);
        next.discard.push(card);
        next.active_suit = Some(new_suit);
        let declared = declared.filter(|_| effect.requires_suit_declaration);
        next.last_action = LastAction::Played { actor, card, declared };
        self.record(actor, HistoryVerb::Play, Some(card), declared);
        debug!(%actor, %card, ?declared, "card played");

        match rules::check_winner(next.player_hand.len(), next.opponent_hand.len()) {
            Some(winner) => {
                next.winner = Some(winner);
                next.phase = Phase::GameOver;
                self.record(winner, HistoryVerb::Win, None, None);
                info!(%winner, "game over");
            }
            None => next.turn = actor.other(),
        }
        self.commit(next);
        Ok(())
    }

    /// Draw from the deck. On an empty deck this is a pass, not an error.
    pub fn draw_card(&mut self, actor: Turn) -> Result<(), ActionError> {
        self.ensure_can_act(actor)?;
        let mut next = GameState::clone(&self.state);
        match next.deck.draw() {
            None => {
                next.turn = actor.other();
                next.last_action = LastAction::DeckEmptyPass { actor };
                self.record(actor, HistoryVerb::Pass, None, None);
                debug!(%actor, "draw on empty deck, turn passes");
            }
            Some(card) => {
                next.hand_mut(actor).push(card);
                next.last_action = LastAction::Drew { actor };
                if self.config.draw_rule == DrawRule::EndsTurn {
                    next.turn = actor.other();
                }
                self.record(actor, HistoryVerb::Draw, None, None);
                debug!(%actor, remaining = next.deck.len(), "card drawn");
            }
        }
        self.commit(next);
        Ok(())
    }

    /// Skip the participant to act when they can neither play nor draw.
    /// Returns whether a skip happened.
    ///
    /// Once neither side can move, only the first skip of each seat is
    /// recorded in the history.
    pub fn skip_if_stalled(&mut self) -> bool {
        if !self.state.is_stalled() {
            return false;
        }
        let actor = self.state.turn;
        let deadlocked = self.state.is_deadlocked();
        let mut next = GameState::clone(&self.state);
        next.turn = actor.other();
        next.last_action = LastAction::Skipped { actor };
        if !(deadlocked && self.skips_recorded_for_both()) {
            self.record(actor, HistoryVerb::Skip, None, None);
            debug!(%actor, deadlocked, "stalled, turn skipped");
        }
        self.commit(next);
        true
    }

    pub fn history_recent(&self, n: usize) -> Vec<HistoryEntry> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        let start = len.saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        if len == 0 {
            return Vec::new();
        }
        let max_offset = len.saturating_sub(n);
        let offset = offset.min(max_offset);
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn ensure_can_act(&self, actor: Turn) -> Result<(Card, Suit), ActionError> {
        let st = &self.state;
        if st.phase != Phase::Playing {
            return Err(ActionError::WrongPhase(st.phase));
        }
        if st.turn != actor {
            return Err(ActionError::NotYourTurn { expected: st.turn, actor });
        }
        match (st.top_discard(), st.active_suit) {
            (Some(top), Some(active)) => Ok((top, active)),
            _ => Err(ActionError::WrongPhase(st.phase)),
        }
    }

    fn skips_recorded_for_both(&self) -> bool {
        match self.history.as_slice() {
            [.., a, b] => a.verb == HistoryVerb::Skip && b.verb == HistoryVerb::Skip,
            _ => false,
        }
    }

    fn record(
        &mut self,
        actor: Turn,
        verb: HistoryVerb,
        card: Option<Card>,
        declared: Option<Suit>,
    ) {
        let entry = HistoryEntry { seq: self.history.len(), actor, verb, card, declared };
        self.history.push(entry);
    }

    fn commit(&mut self, next: GameState) {
        self.state = Arc::new(next);
        self.subscribers.broadcast(&self.state);
    }
}
