use crate::character::MAX_PETALS;

/// One line of prompt text.
#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
    pub text: String,
    /// Alerts (game over) are rendered prominently and never auto-clear.
    pub alert: bool,
}

/// What the HUD should show. Rendering belongs to whoever reads this.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    message: Option<Prompt>,
    /// Seconds the current message survives `clear_message`.
    hold: f32,
    dialogue: Option<String>,
    petals: u8,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current message unless a held message or an alert is up.
    pub fn show_message(&mut self, text: impl Into<String>) {
        if self.hold > 0.0 || self.is_alert() {
            return;
        }
        self.message = Some(Prompt { text: text.into(), alert: false });
    }

    /// Shows a message that stays up for `seconds` even if others try to
    /// replace or clear it.
    pub fn flash(&mut self, text: impl Into<String>, seconds: f32) {
        if self.is_alert() {
            return;
        }
        self.message = Some(Prompt { text: text.into(), alert: false });
        self.hold = seconds;
    }

    pub fn show_alert(&mut self, text: impl Into<String>) {
        self.message = Some(Prompt { text: text.into(), alert: true });
        self.hold = 0.0;
    }

    pub fn clear_message(&mut self) {
        if self.hold > 0.0 || self.is_alert() {
            return;
        }
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|p| p.text.as_str())
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.message.as_ref()
    }

    fn is_alert(&self) -> bool {
        self.message.as_ref().is_some_and(|p| p.alert)
    }

    pub fn show_dialogue(&mut self, line: impl Into<String>) {
        self.dialogue = Some(line.into());
    }

    pub fn hide_dialogue(&mut self) {
        self.dialogue = None;
    }

    pub fn dialogue(&self) -> Option<&str> {
        self.dialogue.as_deref()
    }

    pub fn set_petals(&mut self, count: u8) {
        self.petals = count;
    }

    pub fn petal_counter(&self) -> String {
        format!("Petals: {} / {}", self.petals, MAX_PETALS)
    }

    /// Counts down the hold time of a flashed message.
    pub fn tick(&mut self, dt: f32) {
        if self.hold > 0.0 {
            self.hold = (self.hold - dt).max(0.0);
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
