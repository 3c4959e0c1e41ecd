pub mod evaluate;
pub mod fan;
pub mod shanten;
pub mod win;

pub use evaluate::{evaluate_hand, WinResult};
pub use fan::{Fan, FanContext};
pub use shanten::{calc_discard_shanten, calc_shanten, count_live_tiles, ShantenCache};
pub use win::{calc_decompositions, calc_winning_kinds, is_tenpai, Decomposition};
