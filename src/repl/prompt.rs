//! Custom prompt implementation for apsh

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// PowerShell-style prompt showing the working directory
///
/// The cwd is read at render time so local `cd` is reflected on the next
/// prompt without any extra plumbing.
pub struct ApshPrompt;

impl ApshPrompt {
    fn current_dir() -> String {
        std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|_| "?".to_string())
    }
}

impl Prompt for ApshPrompt {
    /// Render the left prompt (main prompt)
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - Prompt string
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        format!("PS {}> ", Self::current_dir()).into()
    }

    /// Render the right prompt (empty in our case)
    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the prompt indicator (empty since we include it in the left prompt)
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the multiline prompt indicator
    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    /// Render the history search prompt
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
