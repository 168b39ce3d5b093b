//! Pattern grid state: nine fixed cells, the trace being drawn and the cursor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;
use yew::Reducible;

use crate::config::{CELL_COUNT, GRID_SIDE, GridConfig};
use crate::state::TouchAction;

/// Index into the grid, row-major, `0..9`.
pub type CellIndex = usize;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub center_x: f64,
    pub center_y: f64,
    pub selected: bool,
}

impl Cell {
    fn new(center_x: f64, center_y: f64) -> Self {
        Self {
            center_x,
            center_y,
            selected: false,
        }
    }

    /// Strictly inside the circle of the given radius.
    pub fn contains(&self, x: f64, y: f64, radius: f64) -> bool {
        let dx = self.center_x - x;
        let dy = self.center_y - y;
        (dx * dx + dy * dy).sqrt() < radius
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceParseError {
    #[error("not a cell index: {0:?}")]
    InvalidIndex(String),
    #[error("cell index {0} is outside the grid")]
    OutOfRange(usize),
    #[error("cell index {0} appears twice")]
    Duplicate(CellIndex),
}

/// Cells selected during the current gesture, in the order they were hit.
///
/// Never holds the same index twice. The text form is comma separated
/// (`"0,1,4"`); an empty string is an empty trace. The serde form is a plain
/// index array, checked the same way as the text form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CellIndex>", into = "Vec<CellIndex>")]
pub struct Trace(Vec<CellIndex>);

impl Trace {
    pub fn as_slice(&self) -> &[CellIndex] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<CellIndex> {
        self.0.last().copied()
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.0.contains(&index)
    }

    /// Consecutive pairs of cells, in trace order.
    pub fn segments(&self) -> impl Iterator<Item = (CellIndex, CellIndex)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    fn push(&mut self, index: CellIndex) {
        debug_assert!(!self.contains(index));
        self.0.push(index);
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<CellIndex>> for Trace {
    type Error = TraceParseError;

    fn try_from(indices: Vec<CellIndex>) -> Result<Self, Self::Error> {
        let mut trace = Trace::default();
        for index in indices {
            if index >= CELL_COUNT {
                return Err(TraceParseError::OutOfRange(index));
            }
            if trace.contains(index) {
                return Err(TraceParseError::Duplicate(index));
            }
            trace.push(index);
        }
        Ok(trace)
    }
}

impl From<Trace> for Vec<CellIndex> {
    fn from(trace: Trace) -> Self {
        trace.0
    }
}

impl FromStr for Trace {
    type Err = TraceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // older buffers end every entry with a comma
        let s = s.strip_suffix(',').unwrap_or(s);
        if s.is_empty() {
            return Ok(Trace::default());
        }
        let indices = s
            .split(',')
            .map(|piece| {
                piece
                    .trim()
                    .parse::<CellIndex>()
                    .map_err(|_| TraceParseError::InvalidIndex(piece.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Trace::try_from(indices)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternGrid {
    config: GridConfig,
    cells: [Cell; CELL_COUNT],
    trace: Trace,
    cursor: Point,
    /// Pointer released; suppresses the trailing segment.
    finished: bool,
    /// Bumped on every redraw request.
    pub version: u64,
}

impl PatternGrid {
    pub fn new(config: GridConfig) -> Self {
        let radius = config.radius();
        let cells = std::array::from_fn(|i| {
            let column = (i % GRID_SIDE) as f64;
            let row = (i / GRID_SIDE) as f64;
            Cell::new(
                config.spacing * (column + 1.0) + radius + config.cell_diameter * column,
                config.spacing * (row + 1.0) + radius + config.cell_diameter * row,
            )
        });
        Self {
            config,
            cells,
            trace: Trace::default(),
            cursor: Point::default(),
            finished: false,
            version: 0,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn selected_count(&self) -> usize {
        self.cells.iter().filter(|c| c.selected).count()
    }

    /// First unselected cell, in index order, whose circle strictly contains the point.
    pub fn find_cell_index(&self, x: f64, y: f64) -> Option<CellIndex> {
        let radius = self.config.radius();
        self.cells
            .iter()
            .position(|cell| !cell.selected && cell.contains(x, y, radius))
    }

    /// Feeds one pointer event through the grid. Returns whether the event was consumed;
    /// release is the only action that is passed on.
    pub fn handle_touch(&mut self, action: TouchAction, x: f64, y: f64) -> bool {
        match action {
            TouchAction::Down | TouchAction::Move => self.select_at(x, y),
            TouchAction::Up => self.release(),
            TouchAction::Other => {}
        }
        action.consumed()
    }

    pub fn apply(&mut self, input: TouchInput) -> bool {
        self.handle_touch(input.action, input.x, input.y)
    }

    fn select_at(&mut self, x: f64, y: f64) {
        if let Some(index) = self.find_cell_index(x, y) {
            self.cells[index].selected = true;
            self.trace.push(index);
            log::debug!("cell {} selected, trace {}", index, self.trace);
        }
        self.cursor = Point { x, y };
        self.request_redraw();
    }

    fn release(&mut self) {
        log::debug!("gesture finished: [{}]", self.trace);
        for cell in &mut self.cells {
            cell.selected = false;
        }
        self.finished = false;
        self.trace.clear();
        self.request_redraw();
    }

    fn request_redraw(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// Reducer action: one pointer event in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchInput {
    pub action: TouchAction,
    pub x: f64,
    pub y: f64,
}

impl Reducible for PatternGrid {
    type Action = TouchInput;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if action.action == TouchAction::Other {
            return self;
        }
        let mut new = (*self).clone();
        new.apply(action);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> PatternGrid {
        PatternGrid::new(GridConfig::default())
    }

    #[test]
    fn centers_follow_row_major_layout() {
        let g = grid();
        let r = 100.0;
        for (i, cell) in g.cells().iter().enumerate() {
            let col = (i % 3) as f64;
            let row = (i / 3) as f64;
            assert_eq!(cell.center_x, 100.0 * (col + 1.0) + r + 200.0 * col);
            assert_eq!(cell.center_y, 100.0 * (row + 1.0) + r + 200.0 * row);
            assert!(!cell.selected);
        }
    }

    #[test]
    fn default_geometry_corner_and_middle_centers() {
        let g = grid();
        let c = g.cells();
        assert_eq!((c[0].center_x, c[0].center_y), (200.0, 200.0));
        assert_eq!((c[4].center_x, c[4].center_y), (500.0, 500.0));
        assert_eq!((c[8].center_x, c[8].center_y), (800.0, 800.0));
        assert_eq!((c[2].center_x, c[2].center_y), (800.0, 200.0));
        assert_eq!((c[6].center_x, c[6].center_y), (200.0, 800.0));
    }

    #[test]
    fn custom_geometry_uses_same_formula() {
        let config = GridConfig {
            cell_diameter: 60.0,
            spacing: 20.0,
            ..GridConfig::default()
        };
        let g = PatternGrid::new(config);
        assert_eq!((g.cells()[0].center_x, g.cells()[0].center_y), (50.0, 50.0));
        assert_eq!((g.cells()[5].center_x, g.cells()[5].center_y), (210.0, 130.0));
    }

    #[test]
    fn hit_test_inside_and_outside() {
        let g = grid();
        assert_eq!(g.find_cell_index(200.0, 200.0), Some(0));
        assert_eq!(g.find_cell_index(560.0, 450.0), Some(4));
        assert_eq!(g.find_cell_index(799.0, 801.0), Some(8));
        assert_eq!(g.find_cell_index(350.0, 350.0), None);
        assert_eq!(g.find_cell_index(-50.0, 2000.0), None);
    }

    #[test]
    fn hit_test_boundary_is_exclusive() {
        let g = grid();
        // exactly one radius from cell 0's center
        assert_eq!(g.find_cell_index(300.0, 200.0), None);
        assert_eq!(g.find_cell_index(299.9, 200.0), Some(0));
    }

    #[test]
    fn overlapping_circles_resolve_to_lowest_index() {
        // pull cell 1 over cell 0
        let config = GridConfig {
            cell_diameter: 200.0,
            spacing: 0.0,
            ..GridConfig::default()
        };
        let mut g = PatternGrid::new(config);
        g.cells[1].center_x = 150.0;
        assert_eq!(g.find_cell_index(120.0, 100.0), Some(0));
        g.handle_touch(TouchAction::Down, 120.0, 100.0);
        assert_eq!(g.find_cell_index(120.0, 100.0), Some(1));
    }

    #[test]
    fn press_then_move_then_release() {
        let mut g = grid();
        assert!(g.handle_touch(TouchAction::Down, 210.0, 220.0));
        assert_eq!(g.trace().as_slice(), &[0]);
        assert!(g.cells()[0].selected);

        assert!(g.handle_touch(TouchAction::Move, 480.0, 230.0));
        assert_eq!(g.trace().as_slice(), &[0, 1]);
        assert_eq!(g.selected_count(), 2);

        assert!(!g.handle_touch(TouchAction::Up, 480.0, 230.0));
        assert!(g.trace().is_empty());
        assert_eq!(g.selected_count(), 0);
        assert!(!g.is_finished());
    }

    #[test]
    fn moving_within_selected_cell_does_not_duplicate() {
        let mut g = grid();
        g.handle_touch(TouchAction::Down, 200.0, 200.0);
        let before = *g.cells();
        g.handle_touch(TouchAction::Move, 230.0, 180.0);
        g.handle_touch(TouchAction::Down, 200.0, 200.0);
        assert_eq!(g.trace().as_slice(), &[0]);
        assert_eq!(g.cells(), &before);
        assert_eq!(g.cursor(), Point { x: 200.0, y: 200.0 });
    }

    #[test]
    fn miss_still_moves_cursor() {
        let mut g = grid();
        assert!(g.handle_touch(TouchAction::Down, 40.0, 960.0));
        assert!(g.trace().is_empty());
        assert_eq!(g.selected_count(), 0);
        assert_eq!(g.cursor(), Point { x: 40.0, y: 960.0 });
    }

    #[test]
    fn every_cell_once_fills_trace_in_hit_order() {
        let mut g = grid();
        let order = [4, 0, 1, 2, 5, 8, 7, 6, 3];
        for (n, &i) in order.iter().enumerate() {
            let c = g.cells()[i];
            let action = if n == 0 { TouchAction::Down } else { TouchAction::Move };
            g.handle_touch(action, c.center_x + 5.0, c.center_y - 5.0);
            assert_eq!(g.trace().len(), n + 1);
            assert_eq!(g.selected_count(), g.trace().len());
        }
        assert_eq!(g.trace().as_slice(), &order);
        // nothing left to hit
        assert_eq!(g.find_cell_index(500.0, 500.0), None);
    }

    #[test]
    fn other_actions_change_nothing() {
        let mut g = grid();
        g.handle_touch(TouchAction::Down, 200.0, 200.0);
        let before = g.clone();
        assert!(g.handle_touch(TouchAction::Other, 500.0, 500.0));
        assert_eq!(g, before);
    }

    #[test]
    fn redraw_requested_for_press_move_release() {
        let mut g = grid();
        g.handle_touch(TouchAction::Down, 1.0, 1.0);
        g.handle_touch(TouchAction::Move, 2.0, 2.0);
        g.handle_touch(TouchAction::Up, 2.0, 2.0);
        assert_eq!(g.version, 3);
        g.handle_touch(TouchAction::Other, 2.0, 2.0);
        assert_eq!(g.version, 3);
    }

    #[test]
    fn reducer_skips_other_and_applies_touch() {
        let g = Rc::new(grid());
        let same = g.clone().reduce(TouchInput {
            action: TouchAction::Other,
            x: 200.0,
            y: 200.0,
        });
        assert!(Rc::ptr_eq(&g, &same));

        let next = g.clone().reduce(TouchInput {
            action: TouchAction::Down,
            x: 200.0,
            y: 200.0,
        });
        assert_eq!(next.trace().as_slice(), &[0]);
        assert!(g.trace().is_empty());
    }

    #[test]
    fn new_gesture_starts_from_scratch() {
        let mut g = grid();
        g.handle_touch(TouchAction::Down, 200.0, 200.0);
        g.handle_touch(TouchAction::Up, 200.0, 200.0);
        g.handle_touch(TouchAction::Down, 200.0, 200.0);
        assert_eq!(g.trace().as_slice(), &[0]);
    }

    #[test]
    fn trace_text_form() {
        let mut g = grid();
        g.handle_touch(TouchAction::Down, 200.0, 200.0);
        g.handle_touch(TouchAction::Move, 500.0, 500.0);
        g.handle_touch(TouchAction::Move, 800.0, 800.0);
        assert_eq!(g.trace().to_string(), "0,4,8");
        assert_eq!(Trace::default().to_string(), "");
    }

    #[test]
    fn trace_parses_empty_and_trailing_comma() {
        assert_eq!("".parse::<Trace>(), Ok(Trace::default()));
        assert_eq!("  ".parse::<Trace>(), Ok(Trace::default()));
        let t: Trace = "3,1,2,".parse().unwrap();
        assert_eq!(t.as_slice(), &[3, 1, 2]);
        assert_eq!(t.segments().collect::<Vec<_>>(), vec![(3, 1), (1, 2)]);
    }

    #[test]
    fn trace_serde_form_is_validated() {
        let t: Trace = serde_json::from_str("[2,5,8]").unwrap();
        assert_eq!(t.as_slice(), &[2, 5, 8]);
        assert_eq!(serde_json::to_string(&t).unwrap(), "[2,5,8]");
        assert_eq!(
            Trace::try_from(vec![4, 4, 42]),
            Err(TraceParseError::Duplicate(4))
        );
        assert!(serde_json::from_str::<Trace>("[4,4,42]").is_err());
        assert!(serde_json::from_str::<Trace>("[1,42]").is_err());
    }

    #[test]
    fn trace_parse_errors() {
        assert_eq!(
            "0,x".parse::<Trace>(),
            Err(TraceParseError::InvalidIndex("x".to_string()))
        );
        assert_eq!("0,9".parse::<Trace>(), Err(TraceParseError::OutOfRange(9)));
        assert_eq!("4,2,4".parse::<Trace>(), Err(TraceParseError::Duplicate(4)));
        assert_eq!(
            "1,,2".parse::<Trace>(),
            Err(TraceParseError::InvalidIndex(String::new()))
        );
    }
}
