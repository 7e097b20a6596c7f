use std::io::Write;

use portfolio_core::{AppViewModel, MessageId, Project, Role, Surface, BUSY_LABEL};

use super::constants::*;

/// Line-oriented [`Surface`]: chat on `out`, diagnostics on `err`.
///
/// Only the last bubble can grow in place; its line stays open until the
/// next bubble starts or the turn ends.
pub struct TerminalSurface<W: Write, E: Write> {
    out: W,
    err: E,
    next_id: MessageId,
    open: Option<(MessageId, Role)>,
}

impl<W: Write, E: Write> TerminalSurface<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self {
            out,
            err,
            next_id: 0,
            open: None,
        }
    }

    /// Input prompt labelled like the send button. Nothing while input is disabled.
    pub fn prompt(&mut self, view: &AppViewModel) {
        if !view.input_enabled {
            return;
        }
        self.close_line();
        let _ = write!(self.out, "{}{PROMPT}", view.send_label);
        let _ = self.out.flush();
    }

    /// Plain informational line outside the transcript.
    pub fn note(&mut self, text: &str) {
        self.close_line();
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn close_line(&mut self) {
        if self.open.take().is_some() {
            let _ = writeln!(self.out);
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}

fn prefix(role: Role) -> &'static str {
    match role {
        Role::User => USER_PREFIX,
        Role::Bot => BOT_PREFIX,
    }
}

impl<W: Write, E: Write> Surface for TerminalSurface<W, E> {
    fn create_card(&mut self, project: &Project) {
        self.close_line();
        let _ = writeln!(self.out, "{CARD_BULLET}{}", project.title);
        let _ = writeln!(self.out, "{CARD_INDENT}{}", project.description);
        let _ = writeln!(self.out, "{CARD_INDENT}{} ({})", project.repo, project.image);
        let _ = self.out.flush();
    }

    fn append_message(&mut self, role: Role, text: &str) -> MessageId {
        self.close_line();
        let id = self.next_id;
        self.next_id += 1;
        let _ = write!(self.out, "{}{}", prefix(role), text);
        let _ = self.out.flush();
        self.open = Some((id, role));
        id
    }

    fn extend_message(&mut self, id: MessageId, text: &str) {
        match self.open {
            Some((open_id, _)) if open_id == id => {
                let _ = write!(self.out, "{text}");
            }
            // Something else was printed since; continue on a fresh line.
            _ => {
                self.close_line();
                let _ = write!(self.out, "{BOT_PREFIX}{text}");
                self.open = Some((id, Role::Bot));
            }
        }
        let _ = self.out.flush();
    }

    fn set_busy(&mut self, busy: bool) {
        self.close_line();
        let _ = self.out.flush();
        if busy {
            let _ = writeln!(self.err, "{STATUS_PREFIX}{BUSY_LABEL}");
            let _ = self.err.flush();
        }
    }

    fn show_diagnostic(&mut self, text: &str) {
        let _ = writeln!(self.err, "{DIAGNOSTIC_PREFIX}{text}");
        let _ = self.err.flush();
    }
}
