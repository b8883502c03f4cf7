use std::path::Path;

/* ============================ Sheet name lookup ============================ */

/// Lists the sheet names of a workbook, in workbook order.
///
/// Only called for paths that exist on disk. An `Err` is treated by the
/// session exactly like a missing file.
pub trait SheetNameResolver {
    fn sheet_names(&self, path: &Path) -> anyhow::Result<Vec<String>>;
}

impl<F> SheetNameResolver for F
where
    F: Fn(&Path) -> anyhow::Result<Vec<String>>,
{
    fn sheet_names(&self, path: &Path) -> anyhow::Result<Vec<String>> {
        self(path)
    }
}

/// Reads sheet names with calamine (xlsx, xlsm, xlsb, xls, ods).
#[cfg(feature = "xlsx")]
#[derive(Debug, Default, Clone, Copy)]
pub struct CalamineResolver;

#[cfg(feature = "xlsx")]
impl SheetNameResolver for CalamineResolver {
    fn sheet_names(&self, path: &Path) -> anyhow::Result<Vec<String>> {
        use anyhow::Context;
        use calamine::{Reader, open_workbook_auto};

        let workbook = open_workbook_auto(path)
            .with_context(|| format!("opening workbook {}", path.display()))?;
        Ok(workbook.sheet_names())
    }
}
