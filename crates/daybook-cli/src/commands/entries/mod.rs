//! Entry commands: add, edit, delete, and the single-day view.

mod add;
mod day;
mod delete;
mod edit;

pub use add::handle_add;
pub use day::handle_day;
pub use delete::handle_delete;
pub use edit::handle_edit;

use daybook_core::{EntryStore, KeyValueStore};

use crate::ui::{print_warning, UiContext};

/// Make sure the last mutation reached disk, retrying once.
fn ensure_persisted<S: KeyValueStore>(
    ui: &UiContext,
    store: &mut EntryStore<S>,
) -> anyhow::Result<()> {
    let failed = store.last_persist_error().map(str::to_string);
    if let Some(err) = failed {
        print_warning(ui, &format!("Save failed, retrying: {}", err));
        store
            .flush()
            .map_err(|e| anyhow::anyhow!("Failed to save entries: {}", e))?;
    }
    Ok(())
}
