/// Lifecycle of the create-team dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Editing,
    Pending,
}

#[derive(Debug, Default)]
pub struct CreateTeamDialog {
    state: DialogState,
    name: String,
}

impl CreateTeamDialog {
    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn is_pending(&self) -> bool {
        self.state == DialogState::Pending
    }

    pub fn open(&mut self) {
        if self.state == DialogState::Closed {
            self.state = DialogState::Editing;
        }
    }

    /// Open or dismiss the dialog. The typed name survives a dismissal.
    pub fn set_open(&mut self, open: bool) {
        match (open, self.state) {
            (true, _) => self.open(),
            (false, DialogState::Editing) => self.state = DialogState::Closed,
            (false, _) => {}
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty() && !self.is_pending()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_pending() {
            "Creating..."
        } else {
            "Create Team"
        }
    }

    /// Move to pending and hand back the name to send, if submission is allowed.
    pub(super) fn begin_submit(&mut self) -> Option<String> {
        if self.state != DialogState::Editing || !self.can_submit() {
            return None;
        }
        self.state = DialogState::Pending;
        Some(self.name.clone())
    }

    pub(super) fn succeed(&mut self) {
        self.name.clear();
        self.state = DialogState::Closed;
    }

    pub(super) fn fail(&mut self) {
        self.state = DialogState::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_cannot_submit() {
        let mut dialog = CreateTeamDialog::default();
        dialog.open();

        for name in ["", "   ", "\t\n"] {
            dialog.set_name(name);
            assert!(!dialog.can_submit());
            assert_eq!(dialog.begin_submit(), None);
            assert_eq!(dialog.state(), DialogState::Editing);
        }
    }

    #[test]
    fn pending_blocks_second_submission() {
        let mut dialog = CreateTeamDialog::default();
        dialog.open();
        dialog.set_name("Rocket");

        assert_eq!(dialog.begin_submit().as_deref(), Some("Rocket"));
        assert_eq!(dialog.submit_label(), "Creating...");
        assert_eq!(dialog.begin_submit(), None);

        // Dismissing mid-flight is ignored
        dialog.set_open(false);
        assert!(dialog.is_pending());
    }

    #[test]
    fn closed_dialog_cannot_submit() {
        let mut dialog = CreateTeamDialog::default();
        dialog.set_name("Rocket");
        assert_eq!(dialog.begin_submit(), None);

        dialog.open();
        dialog.set_open(false);
        assert_eq!(dialog.begin_submit(), None);
        assert_eq!(dialog.state(), DialogState::Closed);
    }

    #[test]
    fn dismiss_keeps_typed_name() {
        let mut dialog = CreateTeamDialog::default();
        dialog.set_open(true);
        dialog.set_name("Half typed");
        dialog.set_open(false);

        assert!(!dialog.is_open());
        assert_eq!(dialog.name(), "Half typed");
    }

    #[test]
    fn outcomes() {
        let mut dialog = CreateTeamDialog::default();
        dialog.open();
        dialog.set_name("Rocket");

        dialog.begin_submit();
        dialog.fail();
        assert_eq!(dialog.state(), DialogState::Editing);
        assert_eq!(dialog.name(), "Rocket");
        assert_eq!(dialog.submit_label(), "Create Team");

        dialog.begin_submit();
        dialog.succeed();
        assert_eq!(dialog.state(), DialogState::Closed);
        assert_eq!(dialog.name(), "");
    }
}
