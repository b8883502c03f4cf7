use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use serde::{Deserialize, Serialize};

use crate::core::{ActivePaths, Listener, ListenerId, Listeners, SessionField, SheetNameResolver};

/// Which of the two workbooks a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Dest,
}

impl Side {
    /// Maps a drop-target slot hint (0 = source, 1 = destination).
    #[must_use]
    pub const fn from_slot_hint(hint: i32) -> Option<Self> {
        match hint {
            0 => Some(Self::Source),
            1 => Some(Self::Dest),
            _ => None,
        }
    }
}

/// Counts reported by the diff engine after comparing the selected sheets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub modified_cells: u32,
    pub modified_rows: u32,
    pub added_rows: u32,
    pub removed_rows: u32,
}

/// Sheet list of one workbook and the sheet picked from it.
///
/// `selected` is `None` whenever the workbook is missing or has no sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSelection {
    pub sheet_names: Vec<String>,
    pub selected: Option<usize>,
}

impl SheetSelection {
    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.sheet_names.get(i))
            .map(String::as_str)
    }
}

/// Initial values for a freshly opened diff tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSeed {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub default_sheet_name: String,
}

/// Serializable view of every observable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
    pub default_sheet_name: String,
    pub source: SheetSelection,
    pub dest: SheetSelection,
    pub ready: bool,
    pub summary: Option<DiffSummary>,
    pub show_location_grid_line: bool,
}

/// Picks the sheet to show for a workbook given the preferred name.
///
/// Empty preference or no match selects the first sheet; an empty list selects nothing.
#[must_use]
pub fn select_default_sheet(sheet_names: &[String], default_sheet_name: &str) -> Option<usize> {
    if sheet_names.is_empty() {
        return None;
    }
    if default_sheet_name.is_empty() {
        return Some(0);
    }
    Some(
        sheet_names
            .iter()
            .position(|name| name == default_sheet_name)
            .unwrap_or(0),
    )
}

/* ================================ Session ================================= */

/// Per-tab state for comparing two workbooks.
///
/// Every path or preference change runs a full reconcile of both sides before
/// any listener is told about it, so observers always see a consistent state.
pub struct DiffSession {
    source_path: PathBuf,
    dest_path: PathBuf,
    default_sheet_name: String,
    source: SheetSelection,
    dest: SheetSelection,
    ready: bool,
    summary: Option<DiffSummary>,
    show_location_grid_line: bool,
    resolver: Rc<dyn SheetNameResolver>,
    listeners: Listeners,
    context: Option<ActivePaths>,
}

impl DiffSession {
    #[must_use]
    pub fn new(resolver: Rc<dyn SheetNameResolver>) -> Self {
        Self {
            source_path: PathBuf::new(),
            dest_path: PathBuf::new(),
            default_sheet_name: String::new(),
            source: SheetSelection::default(),
            dest: SheetSelection::default(),
            ready: false,
            summary: None,
            show_location_grid_line: false,
            resolver,
            listeners: Listeners::default(),
            context: None,
        }
    }

    #[must_use]
    pub fn with_seed(resolver: Rc<dyn SheetNameResolver>, seed: SessionSeed) -> Self {
        let mut session = Self::new(resolver);
        session.source_path = seed.source;
        session.dest_path = seed.dest;
        session.default_sheet_name = seed.default_sheet_name;
        session.reconcile();
        session
    }

    /* ------------------------------ accessors ----------------------------- */

    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    #[must_use]
    pub fn dest_path(&self) -> &Path {
        &self.dest_path
    }

    #[must_use]
    pub fn path(&self, side: Side) -> &Path {
        match side {
            Side::Source => &self.source_path,
            Side::Dest => &self.dest_path,
        }
    }

    #[must_use]
    pub fn default_sheet_name(&self) -> &str {
        &self.default_sheet_name
    }

    #[must_use]
    pub fn sheets(&self, side: Side) -> &SheetSelection {
        match side {
            Side::Source => &self.source,
            Side::Dest => &self.dest,
        }
    }

    #[must_use]
    pub fn sheet_names(&self, side: Side) -> &[String] {
        &self.sheets(side).sheet_names
    }

    #[must_use]
    pub fn selected_index(&self, side: Side) -> Option<usize> {
        self.sheets(side).selected
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn summary(&self) -> Option<DiffSummary> {
        self.summary
    }

    #[must_use]
    pub fn show_location_grid_line(&self) -> bool {
        self.show_location_grid_line
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            source_path: self.source_path.clone(),
            dest_path: self.dest_path.clone(),
            default_sheet_name: self.default_sheet_name.clone(),
            source: self.source.clone(),
            dest: self.dest.clone(),
            ready: self.ready,
            summary: self.summary,
            show_location_grid_line: self.show_location_grid_line,
        }
    }

    /* ------------------------------ mutation ------------------------------ */

    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.set_path(Side::Source, path.into());
    }

    pub fn set_dest_path(&mut self, path: impl Into<PathBuf>) {
        self.set_path(Side::Dest, path.into());
    }

    pub fn set_path(&mut self, side: Side, path: PathBuf) {
        let mut changed = Vec::new();
        self.store_path(side, path, &mut changed);
        changed.extend(self.reconcile());
        self.notify(&changed);
    }

    /// Stores both paths and reconciles once.
    pub fn set_paths(&mut self, source: impl Into<PathBuf>, dest: impl Into<PathBuf>) {
        let mut changed = Vec::new();
        self.store_path(Side::Source, source.into(), &mut changed);
        self.store_path(Side::Dest, dest.into(), &mut changed);
        changed.extend(self.reconcile());
        self.notify(&changed);
    }

    pub fn set_default_sheet_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        let mut changed = Vec::new();
        if self.default_sheet_name != name {
            self.default_sheet_name = name;
            changed.push(SessionField::DefaultSheetName);
        }
        changed.extend(self.reconcile());
        self.notify(&changed);
    }

    /// Re-reads both workbooks and re-derives sheet lists, selection and readiness.
    pub fn refresh(&mut self) {
        let changed = self.reconcile();
        self.notify(&changed);
    }

    /// Selects another sheet by index. Returns `false` if `index` is out of range.
    pub fn select_sheet(&mut self, side: Side, index: usize) -> bool {
        let sheets = match side {
            Side::Source => &mut self.source,
            Side::Dest => &mut self.dest,
        };
        if index >= sheets.sheet_names.len() {
            tracing::debug!(?side, index, len = sheets.sheet_names.len(), "sheet index out of range");
            return false;
        }
        if sheets.selected != Some(index) {
            sheets.selected = Some(index);
            self.notify(&[SessionField::selected_index(side)]);
        }
        true
    }

    pub fn apply_summary(&mut self, summary: DiffSummary) {
        if self.summary != Some(summary) {
            self.summary = Some(summary);
            self.notify(&[SessionField::Summary]);
        }
    }

    pub fn set_show_location_grid_line(&mut self, show: bool) {
        if self.show_location_grid_line != show {
            self.show_location_grid_line = show;
            self.notify(&[SessionField::ShowLocationGridLine]);
        }
    }

    /* ---------------------------- notifications --------------------------- */

    /// Registers a listener called once per changed field, after the change is committed.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(SessionField, &DiffSession) + 'static,
    {
        let listener: Listener = Box::new(listener);
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Publishes the current paths to `context` and keeps it updated on every assignment.
    pub fn attach_context(&mut self, context: ActivePaths) {
        context.set(Side::Source, self.source_path.clone());
        context.set(Side::Dest, self.dest_path.clone());
        self.context = Some(context);
    }

    #[must_use]
    pub fn context(&self) -> Option<&ActivePaths> {
        self.context.as_ref()
    }

    /* ------------------------------ internals ----------------------------- */

    fn store_path(&mut self, side: Side, path: PathBuf, changed: &mut Vec<SessionField>) {
        if let Some(ctx) = &self.context {
            ctx.set(side, path.clone());
        }
        let slot = match side {
            Side::Source => &mut self.source_path,
            Side::Dest => &mut self.dest_path,
        };
        if *slot != path {
            *slot = path;
            changed.push(SessionField::path(side));
        }
    }

    fn resolve_side(&self, side: Side) -> (bool, SheetSelection) {
        let path = self.path(side);
        if !path.is_file() {
            return (false, SheetSelection::default());
        }
        match self.resolver.sheet_names(path) {
            Ok(sheet_names) => {
                let selected = select_default_sheet(&sheet_names, &self.default_sheet_name);
                (
                    true,
                    SheetSelection {
                        sheet_names,
                        selected,
                    },
                )
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read sheet names");
                (false, SheetSelection::default())
            }
        }
    }

    // Both sides are resolved before anything is stored.
    fn reconcile(&mut self) -> Vec<SessionField> {
        let (source_exists, source) = self.resolve_side(Side::Source);
        let (dest_exists, dest) = self.resolve_side(Side::Dest);
        let ready = source_exists && dest_exists;

        let mut changed = Vec::new();
        for (side, fresh) in [(Side::Source, source), (Side::Dest, dest)] {
            let current = match side {
                Side::Source => &mut self.source,
                Side::Dest => &mut self.dest,
            };
            if current.sheet_names != fresh.sheet_names {
                changed.push(SessionField::sheet_names(side));
            }
            if current.selected != fresh.selected {
                changed.push(SessionField::selected_index(side));
            }
            *current = fresh;
        }
        if self.ready != ready {
            self.ready = ready;
            changed.push(SessionField::Ready);
        }

        tracing::debug!(
            source = %self.source_path.display(),
            dest = %self.dest_path.display(),
            ready,
            changed = changed.len(),
            "reconciled session"
        );
        changed
    }

    fn notify(&mut self, fields: &[SessionField]) {
        if fields.is_empty() || self.listeners.is_empty() {
            return;
        }
        let mut active = self.listeners.take();
        for &field in fields {
            for (_, listener) in &mut active {
                listener(field, &*self);
            }
        }
        self.listeners.restore(active);
    }
}
