//! Column registry: accessor, sort and render declarations per column.

use crate::model::error::RegistryError;
use crate::model::value::CellValue;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

type Accessor<R> = Arc<dyn Fn(&R) -> CellValue>;
type Renderer<P> = Arc<dyn Fn(&CellValue) -> P>;

/// Declaration of a single column over rows of type `R`.
///
/// `P` is the presentation type produced by the render callback. The engine
/// never inspects it; hosts pick whatever their drawing layer consumes.
pub struct ColumnDef<R, P = String> {
    id: String,
    header: String,
    accessor: Accessor<R>,
    sortable: bool,
    searchable: bool,
    render: Renderer<P>,
}

impl<R> ColumnDef<R, String> {
    /// Create a sortable, searchable column rendered as plain text.
    ///
    /// The header defaults to the id.
    pub fn new<F>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> CellValue + 'static,
    {
        let id = id.into();
        Self {
            header: id.clone(),
            id,
            accessor: Arc::new(accessor),
            sortable: true,
            searchable: true,
            render: Arc::new(CellValue::to_search_text),
        }
    }
}

impl<R, P> ColumnDef<R, P> {
    /// Set the header label.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set whether the column takes part in sorting.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set whether the column takes part in the global search.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Replace the render callback, changing the presentation type.
    pub fn with_renderer<Q, F>(self, render: F) -> ColumnDef<R, Q>
    where
        F: Fn(&CellValue) -> Q + 'static,
    {
        ColumnDef {
            id: self.id,
            header: self.header,
            accessor: self.accessor,
            sortable: self.sortable,
            searchable: self.searchable,
            render: Arc::new(render),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header_label(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Read this column's value out of a row.
    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    /// Produce the presentation of this column for a row.
    pub fn render(&self, row: &R) -> P {
        (self.render)(&self.value(row))
    }
}

impl<R, P> Clone for ColumnDef<R, P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: Arc::clone(&self.accessor),
            sortable: self.sortable,
            searchable: self.searchable,
            render: Arc::clone(&self.render),
        }
    }
}

impl<R, P> fmt::Debug for ColumnDef<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .finish_non_exhaustive()
    }
}

/// Lookup of column capabilities by id.
///
/// The query reducer only needs to know which ids exist and which of them
/// are sortable, so it depends on this trait rather than on the registry.
pub trait ColumnLookup {
    /// Whether a column with this id is declared.
    fn contains(&self, id: &str) -> bool;

    /// Whether the column exists and is sortable.
    fn is_sortable(&self, id: &str) -> bool;
}

/// Ordered set of column declarations with unique ids.
pub struct ColumnRegistry<R, P = String> {
    columns: Vec<ColumnDef<R, P>>,
}

impl<R, P> ColumnRegistry<R, P> {
    /// Build a registry, rejecting duplicate column ids.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateColumnId`] naming the first id
    /// declared twice.
    pub fn new(columns: Vec<ColumnDef<R, P>>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.id()) {
                return Err(RegistryError::DuplicateColumnId(column.id().to_string()));
            }
        }
        Ok(Self { columns })
    }

    /// Registry with no columns. Valid, but renders nothing.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDef<R, P>> {
        self.columns.iter()
    }

    pub fn columns(&self) -> &[ColumnDef<R, P>] {
        &self.columns
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDef<R, P>> {
        self.columns.iter().find(|c| c.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id() == id)
    }

    /// Column ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(ColumnDef::id)
    }
}

impl<R, P> ColumnLookup for ColumnRegistry<R, P> {
    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn is_sortable(&self, id: &str) -> bool {
        self.get(id).is_some_and(ColumnDef::is_sortable)
    }
}

impl<R, P> Clone for ColumnRegistry<R, P> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R, P> fmt::Debug for ColumnRegistry<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

impl<'a, R, P> IntoIterator for &'a ColumnRegistry<R, P> {
    type Item = &'a ColumnDef<R, P>;
    type IntoIter = std::slice::Iter<'a, ColumnDef<R, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
