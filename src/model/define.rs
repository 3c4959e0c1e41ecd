// 型エイリアス
pub type Seat = usize; // 座席
pub type Suit = usize; // 牌の種別部分 (萬子,筒子,索子,風牌,三元牌,花牌)
pub type Rank = usize; // 牌の数字部分 (1~9)
pub type TileId = usize; // 物理牌ID (0~143)
pub type Index = usize; // その他Index
pub type Points = usize; // 得点

// Number
pub const SEAT: usize = 4; // 座席の数
pub const SUIT: usize = 7; // 牌の種別コードの数 (0は未使用)
pub const RNUM: usize = 10; // 牌の数字コードの数 (0は未使用)
pub const N_TILE: usize = 144; // 物理牌の総数

// Suit Code (kind = suit * 10 + rank)
pub const TM: usize = 1; // Suit: Manzu (萬子)
pub const TP: usize = 2; // Suit: Pinzu (筒子)
pub const TS: usize = 3; // Suit: Souzu (索子)
pub const TW: usize = 4; // Suit: Wind (風牌)
pub const TD: usize = 5; // Suit: Doragon (三元牌)
pub const TF: usize = 6; // Suit: Flower (花牌)

// Rank Index (風牌)
pub const WE: usize = 1; // Wind: East  (東)
pub const WS: usize = 2; // Wind: South (南)
pub const WW: usize = 3; // Wind: West  (西)
pub const WN: usize = 4; // Wind: North (北)

// Rank Index (三元牌)
pub const DW: usize = 1; // Doragon: White (白)
pub const DG: usize = 2; // Doragon: Green (發)
pub const DR: usize = 3; // Doragon: Red   (中)

// 種別毎の数字の範囲 (1..=RANKS[suit])
pub const RANKS: [usize; SUIT] = [0, 9, 9, 9, 4, 3, 8];
