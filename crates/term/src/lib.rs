//! Terminal "game renderer" module.
//!
//! Renders the board into a simple framebuffer that is flushed to the
//! terminal, rather than going through a widget toolkit. Node cells are wider
//! than tall so the 8x8 grid reads as roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use ladder_games_core as core;
pub use ladder_games_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{prompt_text, BoardView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
