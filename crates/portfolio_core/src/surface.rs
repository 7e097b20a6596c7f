use crate::{Project, Role};

/// Handle to a message previously placed on a [`Surface`].
pub type MessageId = usize;

/// Rendering capabilities the chat needs from a UI toolkit.
///
/// Everything above this trait (decoder, backend client, state machine) is
/// toolkit independent; a browser, a terminal or a test recorder implement it.
pub trait Surface {
    /// Add one project card to the gallery.
    fn create_card(&mut self, project: &Project);

    /// Add a new chat bubble and return a handle to it.
    fn append_message(&mut self, role: Role, text: &str) -> MessageId;

    /// Append text to an existing bubble.
    fn extend_message(&mut self, id: MessageId, text: &str);

    /// Toggle the busy indicator and disable/enable input.
    fn set_busy(&mut self, busy: bool);

    /// Show a diagnostic outside the transcript (status line, stderr).
    fn show_diagnostic(&mut self, text: &str);
}
