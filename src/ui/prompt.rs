//! Answers engine selection requests by asking the player.

use super::app::App;
use super::menus::draw_picker;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use stagequest::combat::{Choice, MemberRequest, Selector, TargetRequest};
use stagequest::core::snapshot::GameSnapshot;

/// Blocks on the keyboard until the player picks a candidate. Esc or a
/// terminal error yields no answer, so the engine takes its default.
pub struct PromptSelector<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    app: &'a App,
    snapshot: &'a GameSnapshot,
}

impl<'a, B: Backend> PromptSelector<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, app: &'a App, snapshot: &'a GameSnapshot) -> Self {
        Self {
            terminal,
            app,
            snapshot,
        }
    }

    fn pick(&mut self, title: &str, candidates: &[Choice]) -> Option<usize> {
        let (app, snapshot) = (self.app, self.snapshot);
        let mut cursor = 0;
        loop {
            let drawn = self.terminal.draw(|frame| {
                super::draw(frame, app, snapshot);
                draw_picker(frame, title, candidates, cursor);
            });
            if let Err(error) = drawn {
                tracing::warn!(%error, "picker draw failed");
                return None;
            }

            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(error) => {
                    tracing::warn!(%error, "picker input failed");
                    return None;
                }
            };
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => cursor = cursor.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    cursor = (cursor + 1).min(candidates.len().saturating_sub(1));
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    let n = c.to_digit(10).unwrap_or(0) as usize;
                    if n >= 1 && n <= candidates.len() {
                        return Some(candidates[n - 1].index);
                    }
                }
                KeyCode::Enter => return candidates.get(cursor).map(|c| c.index),
                KeyCode::Esc => return None,
                _ => {}
            }
        }
    }
}

impl<B: Backend> Selector for PromptSelector<'_, B> {
    fn choose_target(&mut self, request: &TargetRequest) -> Option<usize> {
        let verb = if request.special { "special attack" } else { "attack" };
        let title = format!("{}: {} whom?", request.attacker, verb);
        self.pick(&title, &request.candidates)
    }

    fn choose_member(&mut self, request: &MemberRequest) -> Option<usize> {
        let title = format!("Use {} on whom?", request.item);
        self.pick(&title, &request.candidates)
    }
}
