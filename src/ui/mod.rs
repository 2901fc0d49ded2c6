//! Terminal front-end. The engine never draws; this module renders
//! snapshots and feeds commands back.

pub mod app;
mod battle_scene;
mod menus;
pub mod prompt;

use app::App;
use ratatui::Frame;
use stagequest::core::snapshot::GameSnapshot;

/// Main UI drawing function
pub fn draw(frame: &mut Frame, app: &App, snapshot: &GameSnapshot) {
    let size = frame.size();
    battle_scene::draw_battle(frame, size, app, snapshot);
    if let Some(menu) = app.menu {
        menus::draw_menu(frame, app, menu, snapshot);
    }
}
