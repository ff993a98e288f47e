use super::Cell;

/// One worksheet row. Cells are appended left to right starting at column A.
#[derive(Debug, Clone)]
pub struct Row {
    number: u32,
    cells: Vec<Cell>,
    /// Row height in points (0 = default height)
    pub height: f32,
}

impl Row {
    pub(crate) fn new(number: u32) -> Self {
        Self {
            number,
            cells: Vec::new(),
            height: 0.0,
        }
    }

    /// 1-based row number, fixed when the row was added.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Append a cell in the next column and return it.
    #[allow(clippy::indexing_slicing)] // index of the element just pushed
    pub fn add_cell(&mut self) -> &mut Cell {
        let column = self.next_column();
        let idx = self.cells.len();
        self.cells.push(Cell::new(column, self.number));
        &mut self.cells[idx]
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Cell at a 1-based column, if it has been added.
    #[must_use]
    pub fn cell(&self, column: u32) -> Option<&Cell> {
        let idx = usize::try_from(column.checked_sub(1)?).ok()?;
        self.cells.get(idx)
    }

    /// Custom height in points. Values that are not finite and positive
    /// leave the row at the default height when written.
    pub fn set_height(&mut self, height: f32) -> &mut Self {
        self.height = height;
        self
    }

    fn next_column(&self) -> u32 {
        self.cells.last().map_or(1, |c| c.column() + 1)
    }
}
