use super::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};
use stagequest::core::snapshot::{CombatantSnapshot, GameSnapshot, MemberSnapshot, MonsterSnapshot};
use stagequest::core::turn::Phase;

/// Draws the whole battle screen: header, party, monsters, log and footer.
pub fn draw_battle(frame: &mut Frame, area: Rect, app: &App, snapshot: &GameSnapshot) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Party + monsters
            Constraint::Length(12), // Combat log
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_header(frame, v_chunks[0], snapshot);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[1]);
    draw_party(frame, h_chunks[0], app, snapshot);
    draw_monsters(frame, h_chunks[1], snapshot);

    draw_log(frame, v_chunks[2], snapshot);
    draw_footer(frame, v_chunks[3], app, snapshot);
}

fn draw_header(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let boss = snapshot.monsters.iter().any(|m| m.boss);
    let phase = match snapshot.phase {
        Phase::Battle if boss => Span::styled(
            "BOSS BATTLE",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Phase::Battle => Span::styled("Battle", Style::default().fg(Color::Yellow)),
        Phase::StageCleared => Span::styled(
            "Stage cleared",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Stage {}", snapshot.stage),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        phase,
        Span::raw(" | "),
        Span::styled(
            format!("Gold: {}", snapshot.party.gold),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("StageQuest"))
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn hp_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn ratio(current: i32, max: i32) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    (current as f64 / max as f64).clamp(0.0, 1.0)
}

fn hp_gauge(stats: &CombatantSnapshot) -> Gauge<'static> {
    let r = ratio(stats.hp, stats.max_hp);
    Gauge::default()
        .gauge_style(Style::default().fg(hp_color(r)).add_modifier(Modifier::BOLD))
        .label(format!("HP {}/{}", stats.hp, stats.max_hp))
        .ratio(r)
}

fn mp_gauge(stats: &CombatantSnapshot) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue))
        .label(format!("MP {}/{}", stats.mp, stats.max_mp))
        .ratio(ratio(stats.mp, stats.max_mp))
}

fn draw_party(frame: &mut Frame, area: Rect, app: &App, snapshot: &GameSnapshot) {
    let block = Block::default().borders(Borders::ALL).title("Party");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            snapshot
                .members
                .iter()
                .map(|_| Constraint::Length(5))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, member) in snapshot.members.iter().enumerate() {
        if let Some(row) = rows.get(i) {
            let active = snapshot.phase == Phase::Battle && snapshot.active_member == i;
            draw_member(frame, *row, member, active, app.focus_member == i);
        }
    }
}

fn draw_member(frame: &mut Frame, area: Rect, member: &MemberSnapshot, active: bool, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Name line
            Constraint::Length(1), // HP
            Constraint::Length(1), // MP
            Constraint::Length(1), // Stats + gear
        ])
        .split(area);

    let s = &member.stats;
    let marker = if active { "▶ " } else { "  " };
    let mut name_style = Style::default().add_modifier(Modifier::BOLD);
    name_style = if !s.alive {
        name_style.fg(Color::DarkGray)
    } else if active {
        name_style.fg(Color::Yellow)
    } else {
        name_style.fg(Color::Cyan)
    };
    let mut spans = vec![
        Span::raw(marker),
        Span::styled(s.name.clone(), name_style),
        Span::raw(format!(
            " Lv{} {}  XP {}/100",
            member.level, member.class, member.xp
        )),
    ];
    if member.upgrade_points > 0 {
        spans.push(Span::styled(
            format!("  +{} pts", member.upgrade_points),
            Style::default().fg(Color::Magenta),
        ));
    }
    if member.defending {
        spans.push(Span::styled("  [DEF]", Style::default().fg(Color::Blue)));
    }
    if !s.alive {
        spans.push(Span::styled("  FALLEN", Style::default().fg(Color::Red)));
    }
    if focused {
        spans.push(Span::styled("  *", Style::default().fg(Color::Magenta)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    frame.render_widget(hp_gauge(s), chunks[1]);
    frame.render_widget(mp_gauge(s), chunks[2]);

    let eq = &member.equipment;
    let gear = [&eq.weapon, &eq.armor, &eq.accessory]
        .iter()
        .filter_map(|slot| slot.as_deref())
        .collect::<Vec<_>>()
        .join(", ");
    let stats_line = format!(
        "ATK {} DEF {} EVA {}%  {}",
        s.attack,
        s.defense,
        s.evasion,
        if gear.is_empty() { "no gear".to_string() } else { gear }
    );
    frame.render_widget(
        Paragraph::new(Span::styled(stats_line, Style::default().fg(Color::Gray))),
        chunks[3],
    );
}

fn draw_monsters(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let block = Block::default().borders(Borders::ALL).title("Enemies");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if snapshot.phase == Phase::StageCleared {
        let text = Paragraph::new(Span::styled(
            "All enemies defeated. Press n to continue.",
            Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(text, inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            snapshot
                .monsters
                .iter()
                .map(|_| Constraint::Length(4))
                .collect::<Vec<_>>(),
        )
        .split(inner);
    for (i, monster) in snapshot.monsters.iter().enumerate() {
        if let Some(row) = rows.get(i) {
            draw_monster(frame, *row, monster);
        }
    }
}

fn draw_monster(frame: &mut Frame, area: Rect, monster: &MonsterSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let s = &monster.stats;
    let color = if !s.alive {
        Color::DarkGray
    } else if monster.boss {
        Color::Red
    } else {
        Color::LightRed
    };
    let mut spans = vec![Span::styled(
        s.name.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw(format!(
        "  ATK {} DEF {} EVA {}%",
        s.attack, s.defense, s.evasion
    )));
    if !s.alive {
        spans.push(Span::styled("  defeated", Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    frame.render_widget(hp_gauge(s), chunks[1]);
    frame.render_widget(mp_gauge(s), chunks[2]);
}

fn draw_log(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let items: Vec<ListItem> = snapshot
        .log
        .iter()
        .map(|entry| {
            let style = if entry.is_crit {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if entry.is_player_action {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::LightRed)
            };
            ListItem::new(entry.message.clone()).style(style)
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Combat Log"));
    frame.render_widget(list, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App, snapshot: &GameSnapshot) {
    let line = match &app.status {
        Some(status) => Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None if snapshot.phase == Phase::StageCleared => Line::from(
            "[n] Next stage  [i] Items  [b] Shop  [u] Upgrade  [e] Unequip  [q] Quit",
        ),
        None => Line::from(
            "[a] Attack  [s] Special  [d] Defend  [i] Items  [b] Shop  [u] Upgrade  [Tab] Focus  [h] Help  [q] Quit",
        ),
    };
    let footer = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
