//! BoardView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{is_prime, GameSnapshot, TurnOutcome, TurnPhase};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    cell_to_node, Ladder, Node, Token, BOARD_SIDE, BONUS_ROLL_MULTIPLE, FINISH_NODE, START_NODE,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BLACK: Rgb = Rgb::new(0, 0, 0);
const TEXT: Rgb = Rgb::new(210, 210, 215);
const MUTED: Rgb = Rgb::new(130, 130, 140);
const PRIME: Rgb = Rgb::new(90, 200, 220);
const BONUS: Rgb = Rgb::new(230, 200, 80);
const STAR: Rgb = Rgb::new(255, 215, 0);
const LADDER: Rgb = Rgb::new(110, 210, 120);
const CELL_DARK: Rgb = Rgb::new(32, 36, 46);
const CELL_LIGHT: Rgb = Rgb::new(44, 48, 60);
const CLIMB: Rgb = Rgb::new(60, 110, 60);
const FINISH: Rgb = Rgb::new(70, 60, 20);
const FINISH_TEXT: Rgb = Rgb::new(231, 76, 60);
const START_TEXT: Rgb = Rgb::new(46, 204, 113);

const NAME_WIDTH: usize = 10;

fn token_color(token: Token) -> Rgb {
    match token {
        Token::Red => Rgb::new(230, 80, 80),
        Token::Blue => Rgb::new(80, 140, 240),
        Token::Green => Rgb::new(100, 210, 110),
        Token::Orange => Rgb::new(255, 165, 0),
    }
}

fn token_letter(token: Token) -> char {
    token
        .as_str()
        .chars()
        .next()
        .map_or('?', |c| c.to_ascii_uppercase())
}

/// Renders the board, side panel and prompt.
pub struct BoardView {
    /// Node cell width in terminal columns.
    cell_w: u16,
    /// Node cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // Number and two markers on the first line, up to four tokens on the second.
        Self {
            cell_w: 6,
            cell_h: 2,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(5),
            cell_h: cell_h.max(2),
        }
    }

    /// Width and height of the bordered board.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            u16::from(BOARD_SIDE) * self.cell_w + 2,
            u16::from(BOARD_SIDE) * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_status(snap, None, viewport, fb);
    }

    /// Like [`render_into`](Self::render_into) with a one-line status message
    /// (e.g. why the last key was ignored) under the prompt.
    pub fn render_into_with_status(
        &self,
        snap: &GameSnapshot,
        status: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let title = CellStyle::new(TEXT, BLACK).bold();
        fb.put_str(1, 0, "LADDER RACE", title);

        let (frame_w, frame_h) = self.frame_size();
        let start_x = 1;
        let start_y = 1;
        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        let climbing = snap.active_ladder();
        for row in 0..BOARD_SIDE {
            for col in 0..BOARD_SIDE {
                if let Some(node) = cell_to_node(row, col) {
                    self.draw_node(fb, snap, climbing, start_x, start_y, row, col, node);
                }
            }
        }

        self.draw_side_panel(fb, snap, climbing, start_x + frame_w + 2, start_y);

        let below = start_y + frame_h;
        self.draw_legend(fb, start_x, below);
        self.draw_prompt(fb, snap, status, start_x, below + 2);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Top-left terminal position of a node's cell.
    pub fn node_origin(&self, start_x: u16, start_y: u16, row: u8, col: u8) -> (u16, u16) {
        (
            start_x + 1 + u16::from(col) * self.cell_w,
            start_y + 1 + u16::from(row) * self.cell_h,
        )
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::new(MUTED, BLACK);
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_node(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        climbing: Option<Ladder>,
        start_x: u16,
        start_y: u16,
        row: u8,
        col: u8,
        node: Node,
    ) {
        let (px, py) = self.node_origin(start_x, start_y, row, col);

        let on_climb = climbing.is_some_and(|l| l.from == node || l.to == node);
        let bg = if on_climb {
            CLIMB
        } else if node == FINISH_NODE {
            FINISH
        } else if (row + col) % 2 == 0 {
            CELL_DARK
        } else {
            CELL_LIGHT
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::new(TEXT, bg));

        let label = match node {
            START_NODE => Some(("START", START_TEXT)),
            FINISH_NODE => Some(("FINISH", FINISH_TEXT)),
            _ => None,
        };
        if let Some((text, fg)) = label {
            let text: String = text.chars().take(usize::from(self.cell_w)).collect();
            fb.put_str(px, py, &text, CellStyle::new(fg, bg).bold());
        } else {
            let number_fg = if is_prime(u32::from(node)) {
                PRIME
            } else if node % BONUS_ROLL_MULTIPLE == 0 {
                BONUS
            } else {
                MUTED
            };
            let number = CellStyle::new(number_fg, bg);
            let x = fb.put_str(px + 1, py, &format!("{:>2}", node), number);

            if snap.is_score_node(node) {
                fb.put_char(x, py, '*', CellStyle::new(STAR, bg).bold());
            }
            if snap.ladder_at(node).is_some() {
                fb.put_char(x + 1, py, '^', CellStyle::new(LADDER, bg).bold());
            } else if snap.ladders.iter().any(|l| l.to == node) {
                fb.put_char(x + 1, py, '=', CellStyle::new(LADDER, bg));
            }
        }

        let mut tx = px + 1;
        for (seat, player) in snap.players_at(node) {
            let mut style = CellStyle::new(token_color(player.token), bg);
            if snap.current_seat == Some(seat) {
                style = style.bold();
            }
            fb.put_char(tx, py + 1, token_letter(player.token), style);
            tx += 1;
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        climbing: Option<Ladder>,
        x: u16,
        start_y: u16,
    ) {
        if x >= fb.width() {
            return;
        }
        let label = CellStyle::new(TEXT, BLACK).bold();
        let value = CellStyle::new(TEXT, BLACK);
        let dim = CellStyle::new(MUTED, BLACK);

        let mut y = start_y;
        let end = fb.put_str(x, y, "ROUND ", label);
        fb.put_u32(end, y, snap.round, value);
        y += 1;

        let end = fb.put_str(x, y, "TURN  ", label);
        match snap.current_player() {
            Some(p) if snap.started => {
                fb.put_str(end, y, &p.name, CellStyle::new(token_color(p.token), BLACK).bold());
            }
            _ => {
                fb.put_str(end, y, "-", dim);
            }
        }
        y += 1;

        let end = fb.put_str(x, y, "NEXT  ", label);
        let queue = if snap.turn_queue.is_empty() || !snap.started {
            "-".to_owned()
        } else {
            snap.turn_queue.join(", ")
        };
        fb.put_str(end, y, &queue, value);
        y += 2;

        fb.put_str(x, y, "LAST ROLL", label);
        y += 1;
        match &snap.last_roll {
            Some(roll) => {
                let line = format!(
                    "{} rolled {} {}",
                    roll.player,
                    roll.dice,
                    roll.direction.as_str()
                );
                fb.put_str(x, y, &line, value);
                if roll.ladder_eligible {
                    y += 1;
                    fb.put_str(x, y, "ladders usable", CellStyle::new(PRIME, BLACK));
                }
            }
            None => {
                fb.put_str(x, y, "-", dim);
            }
        }
        if let Some(outcome) = &snap.last_outcome {
            y += 1;
            fb.put_str(x, y, &outcome_text(outcome), dim);
        }
        y += 2;

        fb.put_str(x, y, "LADDERS", label);
        y += 1;
        for ladder in &snap.ladders {
            let style = if climbing == Some(*ladder) {
                CellStyle::new(TEXT, CLIMB).bold()
            } else {
                CellStyle::new(LADDER, BLACK)
            };
            fb.put_str(x, y, &format!("{:>2} -> {:>2}", ladder.from, ladder.to), style);
            y += 1;
        }
        y += 1;

        fb.put_str(x, y, "LEADERBOARD", label);
        y += 1;
        let header = format!(
            "{:<2} {:<w$} {:>4} {:>4} {:>4}",
            "#",
            "NAME",
            "WINS",
            "NODE",
            "PTS",
            w = NAME_WIDTH
        );
        fb.put_str(x, y, &header, dim);
        y += 1;
        for row in &snap.standings {
            let name: String = row.name.chars().take(NAME_WIDTH).collect();
            let line = format!(
                "{:<2} {:<w$} {:>4} {:>4} {:>4}",
                row.rank,
                name,
                row.total_wins,
                row.position,
                row.session_score,
                w = NAME_WIDTH
            );
            let end = fb.put_str(x, y, &line, value);
            let token = CellStyle::new(token_color(row.token), BLACK);
            fb.put_char(end + 1, y, token_letter(row.token), token);
            y += 1;
        }
    }

    fn draw_legend(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let dim = CellStyle::new(MUTED, BLACK);
        let mut cx = fb.put_str(x, y, "* star  ^ ladder  = top  ", dim);
        cx = fb.put_str(cx, y, "prime", CellStyle::new(PRIME, BLACK));
        cx = fb.put_str(cx, y, ": ladders on  ", dim);
        cx = fb.put_str(cx, y, "x5", CellStyle::new(BONUS, BLACK));
        fb.put_str(cx, y, ": bonus roll", dim);
    }

    fn draw_prompt(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        status: Option<&str>,
        x: u16,
        y: u16,
    ) {
        let style = CellStyle::new(TEXT, BLACK).bold();
        fb.put_str(x, y, &prompt_text(snap), style);
        if let Some(status) = status {
            fb.put_str(x, y + 1, status, CellStyle::new(BONUS, BLACK));
        }
        fb.put_str(x, y + 2, "g: new game   q: quit", CellStyle::new(MUTED, BLACK));
    }
}

fn outcome_text(outcome: &TurnOutcome) -> String {
    match outcome {
        TurnOutcome::Passed { next } => format!("next up: {}", next),
        TurnOutcome::BonusRollOffered { node } => format!("bonus roll on {}", node),
        TurnOutcome::Won {
            name, total_wins, ..
        } => format!("{} won ({} total)", name, total_wins),
    }
}

/// The one-line instruction for the current phase.
pub fn prompt_text(snap: &GameSnapshot) -> String {
    let current = snap.current.as_deref().unwrap_or("-");
    match snap.phase {
        TurnPhase::Idle => "Press g to start a game".to_owned(),
        TurnPhase::AwaitingRoll => format!("{}'s turn: SPACE to roll", current),
        TurnPhase::Moving => format!("{} is moving...", current),
        TurnPhase::BonusOffer { node } => {
            format!("{} landed on {}. Roll again? (y/n)", current, node)
        }
        TurnPhase::Finished { .. } => format!(
            "{} wins! c: new round",
            snap.winner.as_deref().unwrap_or(current)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerSnapshot;
    use crate::types::node_to_cell;

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            phase: TurnPhase::AwaitingRoll,
            started: true,
            round: 1,
            current: Some("Ana".into()),
            current_seat: Some(0),
            turn_queue: vec!["Budi".into()],
            players: vec![
                PlayerSnapshot {
                    name: "Ana".into(),
                    token: Token::Red,
                    position: 1,
                    session_score: 0,
                    total_wins: 0,
                    total_score: 0,
                },
                PlayerSnapshot {
                    name: "Budi".into(),
                    token: Token::Blue,
                    position: 1,
                    session_score: 0,
                    total_wins: 0,
                    total_score: 0,
                },
            ],
            ladders: vec![Ladder::new(4, 20)],
            score_nodes: vec![9],
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn tokens_share_the_start_cell() {
        let view = BoardView::default();
        let fb = view.render(&snapshot(), Viewport::new(120, 40));
        let (row, col) = node_to_cell(1).unwrap();
        let (px, py) = view.node_origin(1, 1, row, col);
        assert_eq!(fb.get(px + 1, py + 1).unwrap().ch, 'R');
        assert_eq!(fb.get(px + 2, py + 1).unwrap().ch, 'B');
        assert!(fb.get(px + 1, py + 1).unwrap().style.bold);
        assert!(!fb.get(px + 2, py + 1).unwrap().style.bold);
    }

    #[test]
    fn star_and_ladder_marks() {
        let view = BoardView::default();
        let fb = view.render(&snapshot(), Viewport::new(120, 40));

        let (row, col) = node_to_cell(9).unwrap();
        let (px, py) = view.node_origin(1, 1, row, col);
        assert_eq!(fb.get(px + 3, py).unwrap().ch, '*');

        let (row, col) = node_to_cell(4).unwrap();
        let (px, py) = view.node_origin(1, 1, row, col);
        assert_eq!(fb.get(px + 4, py).unwrap().ch, '^');
    }

    fn cell_text(fb: &FrameBuffer, x: u16, y: u16, len: u16) -> String {
        (x..x + len).map(|cx| fb.get(cx, y).unwrap().ch).collect()
    }

    #[test]
    fn start_and_finish_are_labelled() {
        let view = BoardView::default();
        let fb = view.render(&snapshot(), Viewport::new(120, 40));

        let (px, py) = view.node_origin(1, 1, 0, 7);
        assert_eq!(cell_text(&fb, px, py, 6), "FINISH");
        let (px, py) = view.node_origin(1, 1, 7, 7);
        assert_eq!(cell_text(&fb, px, py, 5), "START");
    }

    #[test]
    fn only_the_current_seat_is_bold_when_names_repeat() {
        let mut snap = snapshot();
        snap.players[1].name = "Ana".into();
        snap.current_seat = Some(1);
        let view = BoardView::default();
        let fb = view.render(&snap, Viewport::new(120, 40));

        let (row, col) = node_to_cell(1).unwrap();
        let (px, py) = view.node_origin(1, 1, row, col);
        assert!(!fb.get(px + 1, py + 1).unwrap().style.bold);
        assert!(fb.get(px + 2, py + 1).unwrap().style.bold);
    }

    #[test]
    fn side_panel_shows_last_outcome() {
        let mut snap = snapshot();
        snap.last_outcome = Some(TurnOutcome::BonusRollOffered { node: 15 });
        let fb = BoardView::default().render(&snap, Viewport::new(120, 40));
        let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.iter().any(|row| row.contains("bonus roll on 15")));
    }

    #[test]
    fn prompt_follows_phase() {
        let mut snap = snapshot();
        assert_eq!(prompt_text(&snap), "Ana's turn: SPACE to roll");
        snap.phase = TurnPhase::BonusOffer { node: 15 };
        assert_eq!(prompt_text(&snap), "Ana landed on 15. Roll again? (y/n)");
        snap.phase = TurnPhase::Finished { winner: 0 };
        snap.winner = Some("Ana".into());
        assert_eq!(prompt_text(&snap), "Ana wins! c: new round");
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = BoardView::default();
        let fb = view.render(&snapshot(), Viewport::new(10, 3));
        assert_eq!(fb.width(), 10);
    }
}
