mod claim;
mod define;
mod meld;
mod player;
mod state;
mod tile;
mod win_context;

use std::fmt;

use serde::Serialize;

pub use claim::*;
pub use define::*;
pub use meld::*;
pub use player::*;
pub use state::*;
pub use tile::*;
pub use win_context::*;
