use super::*;

// 和了時の状況情報 得点計算にのみ使用
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinContext {
    pub round_wind: Rank,     // 場風 (東:1, 南:2, 西:3, 北:4)
    pub seat_wind: Rank,      // 自風 (同上)
    pub is_self_drawn: bool,  // ツモ和了
    pub winning_kind: Kind,   // 和了牌の牌種
    pub is_last_tile: bool,   // 牌山最後の牌による和了
    pub is_replacement: bool, // 嶺上牌による和了
    pub n_bonus: usize,       // 抜いた花牌の枚数
    pub is_concealed: bool,   // 副露なし
}
