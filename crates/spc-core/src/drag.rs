//! Drag-to-reorder over a single card grid.
//!
//! The grid is reflowed on every move event, so by the time the gesture
//! ends the visual order is final and is simply read back and persisted.

use spc_storage::{CardOrderRepository, KeyValueStore};
use spc_types::CardOrder;
use std::collections::HashMap;
use tracing::debug;

pub const DRAGGING_CLASS: &str = "dragging";

/// Container of reorderable cards, in document order.
pub trait CardGrid {
    /// Handle identifying one card element (node identity, not its id attribute).
    type Card: Clone + PartialEq;

    fn cards(&self) -> Vec<Self::Card>;
    /// The card's id attribute, empty when it has none.
    fn card_id(&self, card: &Self::Card) -> String;
    /// Vertical midpoint of the card's box, in pointer coordinates.
    fn midpoint_y(&self, card: &Self::Card) -> f64;
    fn append(&mut self, card: &Self::Card);
    fn insert_before(&mut self, card: &Self::Card, anchor: &Self::Card);
    fn set_dragging(&mut self, card: &Self::Card, dragging: bool);
}

/// First card, other than `subject`, whose midpoint is still below the pointer.
///
/// Among cards with `pointer_y - midpoint < 0` the one with the offset
/// closest to zero wins; on equal offsets the earliest in document order.
pub fn nearest_card_below<G: CardGrid>(
    grid: &G,
    subject: &G::Card,
    pointer_y: f64,
) -> Option<G::Card> {
    let mut nearest: Option<(f64, G::Card)> = None;
    for card in grid.cards() {
        if &card == subject {
            continue;
        }
        let offset = pointer_y - grid.midpoint_y(&card);
        if offset < 0.0 && nearest.as_ref().is_none_or(|(best, _)| offset > *best) {
            nearest = Some((offset, card));
        }
    }
    nearest.map(|(_, card)| card)
}

pub fn current_order<G: CardGrid>(grid: &G) -> CardOrder {
    CardOrder(
        grid.cards()
            .iter()
            .map(|card| grid.card_id(card))
            .collect(),
    )
}

/// Moves each persisted card to the end of the grid, in persisted order.
///
/// Unknown ids are ignored and cards without an entry keep their relative
/// order ahead of the moved ones. Returns how many cards were moved.
pub fn restore_order<G: CardGrid>(grid: &mut G, order: &CardOrder) -> usize {
    if order.is_empty() {
        return 0;
    }
    let by_id: HashMap<String, G::Card> = grid
        .cards()
        .into_iter()
        .filter_map(|card| {
            let id = grid.card_id(&card);
            (!id.is_empty()).then_some((id, card))
        })
        .collect();

    let mut moved = 0;
    for id in order.ids() {
        if let Some(card) = by_id.get(id) {
            grid.append(card);
            moved += 1;
        }
    }
    debug!("restored card order, {} of {} entries matched", moved, order.0.len());
    moved
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragState<C> {
    Idle,
    Dragging(C),
}

impl<C> Default for DragState<C> {
    fn default() -> Self {
        DragState::Idle
    }
}

#[derive(Debug)]
pub struct DragEngine<C> {
    state: DragState<C>,
}

impl<C> Default for DragEngine<C> {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
        }
    }
}

impl<C: Clone + PartialEq> DragEngine<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState<C> {
        &self.state
    }

    pub fn subject(&self) -> Option<&C> {
        match &self.state {
            DragState::Dragging(card) => Some(card),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn start<G>(&mut self, grid: &mut G, card: C)
    where
        G: CardGrid<Card = C>,
    {
        if let DragState::Dragging(previous) = &self.state {
            grid.set_dragging(previous, false);
        }
        grid.set_dragging(&card, true);
        debug!("drag started on `{}`", grid.card_id(&card));
        self.state = DragState::Dragging(card);
    }

    /// Reflows the grid for a pointer at `pointer_y`. Returns `false` when idle.
    pub fn drag_over<G>(&mut self, grid: &mut G, pointer_y: f64) -> bool
    where
        G: CardGrid<Card = C>,
    {
        let DragState::Dragging(subject) = &self.state else {
            return false;
        };
        match nearest_card_below(grid, subject, pointer_y) {
            Some(anchor) => grid.insert_before(subject, &anchor),
            None => grid.append(subject),
        }
        true
    }

    /// Ends the gesture and persists the grid's order as one write.
    pub fn end<G, S>(&mut self, grid: &mut G, repo: &CardOrderRepository<'_, S>) -> CardOrder
    where
        G: CardGrid<Card = C>,
        S: KeyValueStore,
    {
        if let DragState::Dragging(card) = std::mem::take(&mut self.state) {
            grid.set_dragging(&card, false);
        }
        let order = current_order(grid);
        repo.save(&order);
        order
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardHandle(usize);

#[derive(Debug, Clone)]
struct StackedCard {
    handle: CardHandle,
    id: String,
    dragging: bool,
}

/// Headless grid laying cards out in one column of equal height.
#[derive(Debug, Clone)]
pub struct StackedGrid {
    cards: Vec<StackedCard>,
    card_height: f64,
}

impl StackedGrid {
    pub fn new<I, S>(ids: I, card_height: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cards: ids
                .into_iter()
                .enumerate()
                .map(|(index, id)| StackedCard {
                    handle: CardHandle(index),
                    id: id.into(),
                    dragging: false,
                })
                .collect(),
            card_height,
        }
    }

    pub fn ids(&self) -> Vec<String> {
        self.cards.iter().map(|card| card.id.clone()).collect()
    }

    pub fn handle(&self, id: &str) -> Option<CardHandle> {
        self.cards
            .iter()
            .find(|card| card.id == id)
            .map(|card| card.handle)
    }

    pub fn is_dragging(&self, handle: CardHandle) -> bool {
        self.cards
            .iter()
            .any(|card| card.handle == handle && card.dragging)
    }

    /// Pointer position just above the middle of the card at `index`.
    pub fn y_above(&self, index: usize) -> f64 {
        index as f64 * self.card_height + self.card_height / 4.0
    }

    fn position(&self, handle: CardHandle) -> Option<usize> {
        self.cards.iter().position(|card| card.handle == handle)
    }
}

impl CardGrid for StackedGrid {
    type Card = CardHandle;

    fn cards(&self) -> Vec<CardHandle> {
        self.cards.iter().map(|card| card.handle).collect()
    }

    fn card_id(&self, card: &CardHandle) -> String {
        self.position(*card)
            .map(|index| self.cards[index].id.clone())
            .unwrap_or_default()
    }

    fn midpoint_y(&self, card: &CardHandle) -> f64 {
        let index = self.position(*card).unwrap_or(self.cards.len());
        index as f64 * self.card_height + self.card_height / 2.0
    }

    fn append(&mut self, card: &CardHandle) {
        if let Some(index) = self.position(*card) {
            let moved = self.cards.remove(index);
            self.cards.push(moved);
        }
    }

    fn insert_before(&mut self, card: &CardHandle, anchor: &CardHandle) {
        if card == anchor {
            return;
        }
        let Some(index) = self.position(*card) else {
            return;
        };
        let moved = self.cards.remove(index);
        let at = self.position(*anchor).unwrap_or(self.cards.len());
        self.cards.insert(at, moved);
    }

    fn set_dragging(&mut self, card: &CardHandle, dragging: bool) {
        if let Some(index) = self.position(*card) {
            self.cards[index].dragging = dragging;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_card_skips_cards_above_the_pointer() {
        let grid = StackedGrid::new(["a", "b", "c", "d"], 100.0);
        let a = grid.handle("a").unwrap();

        let found = nearest_card_below(&grid, &a, 200.0).unwrap();
        assert_eq!(grid.card_id(&found), "c");
    }

    #[test]
    fn no_card_below_pointer_at_the_bottom() {
        let grid = StackedGrid::new(["a", "b", "c"], 100.0);
        let a = grid.handle("a").unwrap();
        assert_eq!(nearest_card_below(&grid, &a, 290.0), None);
    }

    #[test]
    fn pointer_on_a_midpoint_does_not_select_that_card() {
        let grid = StackedGrid::new(["a", "b", "c"], 100.0);
        let a = grid.handle("a").unwrap();
        let found = nearest_card_below(&grid, &a, 150.0).unwrap();
        assert_eq!(grid.card_id(&found), "c");
    }

    #[test]
    fn restore_handles_missing_and_unknown_ids() {
        let mut grid = StackedGrid::new(["a", "b", "c"], 100.0);
        let moved = restore_order(&mut grid, &CardOrder::new(["c", "zzz", "a"]));
        assert_eq!(moved, 2);
        assert_eq!(grid.ids(), vec!["b", "c", "a"]);
    }

    #[test]
    fn restore_with_empty_order_is_a_no_op() {
        let mut grid = StackedGrid::new(["a", "b"], 100.0);
        assert_eq!(restore_order(&mut grid, &CardOrder::default()), 0);
        assert_eq!(grid.ids(), vec!["a", "b"]);
    }

    #[test]
    fn cards_without_ids_stay_in_place_and_persist_empty() {
        let mut grid = StackedGrid::new(["a", "", "b"], 100.0);
        restore_order(&mut grid, &CardOrder::new(["", "a"]));
        assert_eq!(grid.ids(), vec!["", "b", "a"]);
        assert_eq!(current_order(&grid), CardOrder::new(["", "b", "a"]));
    }

    #[test]
    fn drag_over_while_idle_does_nothing() {
        let mut grid = StackedGrid::new(["a", "b"], 100.0);
        let mut engine = DragEngine::new();
        assert!(!engine.drag_over(&mut grid, 0.0));
        assert!(matches!(engine.state(), DragState::Idle));
        assert_eq!(grid.ids(), vec!["a", "b"]);
    }

    /// Two-column layout: cards in the same row share a midpoint.
    struct RowGrid {
        cards: Vec<(&'static str, f64)>,
    }

    impl RowGrid {
        fn ids(&self) -> Vec<&'static str> {
            self.cards.iter().map(|(id, _)| *id).collect()
        }

        fn take(&mut self, card: &str) -> Option<(&'static str, f64)> {
            let index = self.cards.iter().position(|(id, _)| *id == card)?;
            Some(self.cards.remove(index))
        }
    }

    impl CardGrid for RowGrid {
        type Card = &'static str;

        fn cards(&self) -> Vec<&'static str> {
            self.ids()
        }

        fn card_id(&self, card: &&'static str) -> String {
            (*card).to_owned()
        }

        fn midpoint_y(&self, card: &&'static str) -> f64 {
            self.cards
                .iter()
                .find(|(id, _)| id == card)
                .map_or(f64::MAX, |(_, y)| *y)
        }

        fn append(&mut self, card: &&'static str) {
            if let Some(entry) = self.take(card) {
                self.cards.push(entry);
            }
        }

        fn insert_before(&mut self, card: &&'static str, anchor: &&'static str) {
            if let Some(entry) = self.take(card) {
                let index = self
                    .cards
                    .iter()
                    .position(|(id, _)| id == anchor)
                    .unwrap_or(self.cards.len());
                self.cards.insert(index, entry);
            }
        }

        fn set_dragging(&mut self, _card: &&'static str, _dragging: bool) {}
    }

    #[test]
    fn equal_offsets_pick_the_earlier_card() {
        let grid = RowGrid {
            cards: vec![("x", 50.0), ("y", 50.0), ("z", 150.0)],
        };
        assert_eq!(nearest_card_below(&grid, &"z", 10.0), Some("x"));

        let grid = RowGrid {
            cards: vec![("y", 50.0), ("x", 50.0), ("z", 150.0)],
        };
        assert_eq!(nearest_card_below(&grid, &"z", 10.0), Some("y"));
    }

    #[test]
    fn drag_into_a_shared_row_lands_before_its_first_card() {
        let mut grid = RowGrid {
            cards: vec![("a", 50.0), ("b", 50.0), ("c", 150.0), ("d", 150.0)],
        };
        let mut engine = DragEngine::new();
        engine.start(&mut grid, "d");
        assert!(engine.drag_over(&mut grid, 20.0));
        assert_eq!(grid.ids(), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn restarting_a_drag_clears_previous_marker() {
        let mut grid = StackedGrid::new(["a", "b"], 100.0);
        let a = grid.handle("a").unwrap();
        let b = grid.handle("b").unwrap();
        let mut engine = DragEngine::new();

        engine.start(&mut grid, a);
        engine.start(&mut grid, b);

        assert!(!grid.is_dragging(a));
        assert!(grid.is_dragging(b));
        assert_eq!(engine.subject(), Some(&b));
    }
}
