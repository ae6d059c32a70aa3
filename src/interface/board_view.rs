use std::fmt;
use std::sync::Arc;

use crate::domain::mask::BoardMask;
use crate::domain::models::{Occupant, PieceCount, Player};
use crate::domain::square::{CELL_COUNT, CellIndex, bit_at};

pub type ActivationCallback = Arc<dyn Fn(CellIndex) + Send + Sync>;

/// One renderable square of the board.
pub struct CellSlot {
    index: CellIndex,
    occupant: Occupant,
    on_activated: ActivationCallback,
}

impl CellSlot {
    pub fn index(&self) -> CellIndex {
        self.index
    }

    pub fn occupant(&self) -> Occupant {
        self.occupant
    }

    /// Pointer-action equivalent: hands this slot's index to the callback.
    pub fn activate(&self) {
        (self.on_activated)(self.index);
    }
}

/// The 64 slots the player sees.
///
/// Slots are laid out from cell 63 down to cell 0, which puts file `a` on
/// the left and rank 8 on top under the authority's numbering. Only
/// [`BoardView::render`] changes what a slot shows.
pub struct BoardView {
    slots: Vec<CellSlot>,
    count: PieceCount,
}

impl BoardView {
    pub fn initialize<F>(on_cell_activated: F) -> Self
    where
        F: Fn(CellIndex) + Send + Sync + 'static,
    {
        let callback: ActivationCallback = Arc::new(on_cell_activated);
        let slots = (0..CELL_COUNT)
            .rev()
            .map(|index| CellSlot {
                index,
                occupant: Occupant::Empty,
                on_activated: Arc::clone(&callback),
            })
            .collect();

        BoardView {
            slots,
            count: PieceCount::default(),
        }
    }

    /// Repaints every slot from the two masks and returns the tally.
    pub fn render(&mut self, black: BoardMask, white: BoardMask) -> PieceCount {
        let mut count = PieceCount::default();

        for slot in &mut self.slots {
            slot.occupant = Occupant::Empty;

            if bit_at(black, slot.index) == 1 {
                count.black += 1;
                slot.occupant = Occupant::Disc(Player::Black);
            } else if bit_at(white, slot.index) == 1 {
                count.white += 1;
                slot.occupant = Occupant::Disc(Player::White);
            }
        }

        self.count = count;
        count
    }

    pub fn activate(&self, index: CellIndex) {
        self.slot(index).activate();
    }

    pub fn slot(&self, index: CellIndex) -> &CellSlot {
        assert!(index < CELL_COUNT, "cell index {index} out of range");
        &self.slots[CELL_COUNT - 1 - index]
    }

    pub fn occupant(&self, index: CellIndex) -> Occupant {
        self.slot(index).occupant
    }

    /// Occupants keyed by cell index.
    pub fn occupants(&self) -> [Occupant; CELL_COUNT] {
        let mut cells = [Occupant::Empty; CELL_COUNT];
        for slot in &self.slots {
            cells[slot.index] = slot.occupant;
        }
        cells
    }

    /// Count from the last render.
    pub fn piece_count(&self) -> PieceCount {
        self.count
    }

    /// Slots in screen order.
    pub fn slots(&self) -> impl Iterator<Item = &CellSlot> {
        self.slots.iter()
    }

    pub fn visual_order(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.slots.iter().map(|slot| slot.index)
    }
}

impl fmt::Debug for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardView")
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn inert_view() -> BoardView {
        BoardView::initialize(|_| {})
    }

    #[test]
    fn starts_empty_in_descending_order() {
        let view = inert_view();
        let order: Vec<_> = view.visual_order().collect();
        assert_eq!(order.len(), CELL_COUNT);
        assert_eq!(order.first(), Some(&63));
        assert_eq!(order.last(), Some(&0));
        assert!(view.occupants().iter().all(|o| *o == Occupant::Empty));
    }

    #[test]
    fn render_places_discs_where_bits_are() {
        let mut view = inert_view();
        let black = BoardMask(0x0000000810000000);
        let white = BoardMask(0x0000001008000000);

        let count = view.render(black, white);

        assert_eq!(count, PieceCount { black: 2, white: 2 });
        for index in 0..CELL_COUNT {
            let expected = if black.get_bit(index) {
                Occupant::Disc(Player::Black)
            } else if white.get_bit(index) {
                Occupant::Disc(Player::White)
            } else {
                Occupant::Empty
            };
            assert_eq!(view.occupant(index), expected, "cell {index}");
        }
    }

    #[test]
    fn render_counts_match_popcount() {
        let mut view = inert_view();
        let black = BoardMask(0xF0F0_0000_0000_00FF);
        let white = BoardMask(0x0F0F_0000_FF00_0000);
        assert!((black & white).is_empty());

        let count = view.render(black, white);
        assert_eq!(count.black, black.count_ones());
        assert_eq!(count.white, white.count_ones());
        assert_eq!(view.piece_count(), count);
    }

    #[test]
    fn render_is_idempotent() {
        let mut view = inert_view();
        let black = BoardMask(0x0000_0018_1c00_0000);
        let white = BoardMask(0x0000_2000_0000_0000);

        let first = view.render(black, white);
        let cells = view.occupants();
        let second = view.render(black, white);

        assert_eq!(first, second);
        assert_eq!(cells, view.occupants());
    }

    #[test]
    fn render_clears_previous_discs() {
        let mut view = inert_view();
        view.render(BoardMask(u64::MAX), BoardMask::EMPTY);
        let count = view.render(BoardMask::EMPTY, BoardMask(1));

        assert_eq!(count, PieceCount { black: 0, white: 1 });
        assert_eq!(view.occupant(0), Occupant::Disc(Player::White));
        assert_eq!(view.occupant(63), Occupant::Empty);
    }

    #[test]
    fn overlapping_bit_renders_black() {
        let mut view = inert_view();
        let count = view.render(BoardMask(1), BoardMask(1));
        assert_eq!(count, PieceCount { black: 1, white: 0 });
        assert_eq!(view.occupant(0), Occupant::Disc(Player::Black));
    }

    #[test]
    fn activation_reports_slot_index() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&hits);
        let view = BoardView::initialize(move |index| sink.lock().unwrap().push(index));

        view.activate(19);
        view.slot(0).activate();
        view.slots().next().unwrap().activate();

        assert_eq!(*hits.lock().unwrap(), vec![19, 0, 63]);
    }
}
