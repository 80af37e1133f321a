//! Response-to-table projection.
//!
//! A [`ColumnProjector`] is driven entirely by a static column list, so an
//! endpoint declares its columns once and never writes formatting code.

use crate::error::TableError;
use crate::table::{Alignment, Cell, ColumnDef, Table};
use crate::transport::RestRequest;

/// Maps a response type onto a table.
pub trait TableProjector: Send + Sync + 'static {
    /// The response being projected.
    type Item;

    /// Column definitions without any rows.
    fn header(&self, request: &RestRequest) -> Table;

    /// Append the rows for `item`.
    fn append(
        &self,
        table: &mut Table,
        item: &Self::Item,
        request: &RestRequest,
    ) -> Result<(), TableError>;

    /// `header` followed by one `append`.
    fn project(&self, item: &Self::Item, request: &RestRequest) -> Result<Table, TableError> {
        let mut table = self.header(request);
        self.append(&mut table, item, request)?;
        Ok(table)
    }
}

/// Declarative column: metadata plus the function producing its cell.
pub struct Column<T> {
    pub name: &'static str,
    pub alignment: Alignment,
    pub description: &'static str,
    pub value: fn(&T) -> Cell,
}

impl<T> Column<T> {
    pub fn definition(&self) -> ColumnDef {
        ColumnDef::new(self.name, self.alignment, self.description)
    }
}

/// Projects one row per item from a static column list.
pub struct ColumnProjector<T: 'static> {
    columns: &'static [Column<T>],
}

impl<T: 'static> ColumnProjector<T> {
    pub const fn new(columns: &'static [Column<T>]) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &'static [Column<T>] {
        self.columns
    }

    /// Build one row for `item`.
    pub fn row(&self, item: &T) -> Vec<Cell> {
        self.columns.iter().map(|c| (c.value)(item)).collect()
    }
}

impl<T: 'static> TableProjector for ColumnProjector<T> {
    type Item = T;

    fn header(&self, _request: &RestRequest) -> Table {
        Table::new(self.columns.iter().map(Column::definition).collect())
    }

    fn append(&self, table: &mut Table, item: &T, _request: &RestRequest) -> Result<(), TableError> {
        table.add_row(self.row(item))
    }
}
