//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error();
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup();
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state();

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                model.set_should_quit(true);
            }
            KeyCode::Tab | KeyCode::BackTab => {
                model.toggle_section();
            }
            KeyCode::Up => {
                model.move_selection_up();
            }
            KeyCode::Down => {
                model.move_selection_down();
            }
            KeyCode::Left => {
                model.move_selection_sideways(false);
            }
            KeyCode::Right => {
                model.move_selection_sideways(true);
            }
            KeyCode::Enter => {
                drop(model);
                match ui_state.active_section {
                    ActiveSection::Drawer => self.open_drawer_item(ui_state.drawer_selected).await,
                    ActiveSection::MainContent => self.open_selected_content().await,
                }
            }
            KeyCode::Backspace | KeyCode::Esc => {
                drop(model);
                self.navigate_back().await;
            }
            // Play/Pause toggle
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_playback().await;
            }
            // Next / previous track
            KeyCode::Char('n') | KeyCode::Char('N') => {
                drop(model);
                self.skip_forward().await;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                drop(model);
                self.skip_back().await;
            }
            // Rewind / fast forward
            KeyCode::Char(',') => {
                drop(model);
                self.rewind().await;
            }
            KeyCode::Char('.') => {
                drop(model);
                self.fast_forward().await;
            }
            // Volume
            KeyCode::Char('+') | KeyCode::Char('=') => {
                drop(model);
                self.volume_up().await;
            }
            KeyCode::Char('-') => {
                drop(model);
                self.volume_down().await;
            }
            // Seek to 0%..90%
            KeyCode::Char(c @ '0'..='9') => {
                drop(model);
                let percent = f64::from(c.to_digit(10).unwrap_or(0)) * 10.0;
                self.seek_to_fraction(percent).await;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                drop(model);
                self.toggle_drawer().await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup();
            }
            _ => {}
        }
        Ok(())
    }
}
