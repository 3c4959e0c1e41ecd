use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClaimType {
    Ron,    // 栄和
    Minkan, // 大明槓
    Pon,    // ポン
    Chii,   // チー
}

// 応答の優先度 (高いほど優先)
pub fn claim_priority(type_: ClaimType) -> usize {
    match type_ {
        ClaimType::Ron => 3,
        ClaimType::Minkan => 2,
        ClaimType::Pon => 1,
        ClaimType::Chii => 0,
    }
}

// 打牌に対する応答候補 打牌から解決までの間のみ存在する
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    pub seat: Seat,
    pub type_: ClaimType,
    pub tiles: Vec<TileId>, // 手牌から消費する牌
    pub priority: usize,
}

impl Claim {
    pub fn new(seat: Seat, type_: ClaimType, tiles: Vec<TileId>) -> Self {
        Self {
            seat,
            type_,
            tiles,
            priority: claim_priority(type_),
        }
    }
}
