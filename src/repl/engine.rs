//! Line editor setup and the read loop entry point

use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::debug;

use super::completer::SessionCompleter;
use super::prompt::ApshPrompt;
use crate::config::HistoryConfig;
use crate::error::{ApshError, Result};
use crate::session::Session;

const COMPLETION_MENU: &str = "completion_menu";

/// Wrapper around the reedline editor configured for apsh
///
/// Tab opens the completion menu and cycles through it on repeat; any
/// other edit closes the menu, which matches the engine's reset-on-edit
/// contract since the next Tab triggers a fresh query.
pub struct ReplEngine {
    line_editor: Reedline,
}

impl ReplEngine {
    /// Build the editor
    ///
    /// # Arguments
    /// * `session` - Shared session backing the completer
    /// * `history` - History configuration
    pub fn new(session: Arc<Session>, history: &HistoryConfig) -> Self {
        let completion_menu = ColumnarMenu::default().with_name(COMPLETION_MENU);

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let mut line_editor = Reedline::create()
            .with_completer(Box::new(SessionCompleter::new(session)))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(completion_menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        if history.persist {
            match FileBackedHistory::with_file(history.max_size, history.file_path.clone()) {
                Ok(file_history) => {
                    line_editor = line_editor.with_history(Box::new(file_history));
                }
                Err(e) => debug!("history file unavailable, using in-memory history: {}", e),
            }
        }

        Self { line_editor }
    }

    /// Read one line from the terminal
    ///
    /// Returns `None` on Ctrl-C or Ctrl-D, which the host loop treats the
    /// same as `/quit`.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self
            .line_editor
            .read_line(&ApshPrompt)
            .map_err(|e| ApshError::Generic(format!("line editor failure: {e}")))?
        {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlC | Signal::CtrlD => Ok(None),
        }
    }
}
