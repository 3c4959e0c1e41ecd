use super::*;
use crate::util::common::vec_to_string;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Player {
    pub seat: Seat,
    pub seat_wind: Rank,       // 自風 (東:1, 南:2, 西:3, 北:4)
    pub hand: Vec<TileId>,     // 手牌 (ツモ牌は含まない)
    pub drawn: Option<TileId>, // ツモ牌 打牌まで手牌とは別に保持
    pub melds: Vec<Meld>,      // 副露一覧
    pub discards: Vec<TileId>, // 捨て牌一覧 (鳴かれた牌は移動する)
    pub bonus: Vec<TileId>,    // 抜いた花牌
    pub is_replacement: bool,  // 嶺上牌の操作中にtrueをセット 打牌でfalseをセット
}

impl Player {
    // 手牌(ツモ牌を除く)の枚数テーブル
    pub fn hand_table(&self) -> TileTable {
        table_from_ids(&self.hand)
    }

    // 手牌+ツモ牌の枚数テーブル
    pub fn full_table(&self) -> TileTable {
        table_from_ids(&self.full_hand())
    }

    pub fn full_hand(&self) -> Vec<TileId> {
        let mut ids = self.hand.clone();
        if let Some(d) = self.drawn {
            ids.push(d);
        }
        ids
    }

    pub fn count_kind(&self, kind: Kind) -> usize {
        self.hand.iter().filter(|&&id| kind_of(id) == kind).count()
    }

    // 副露なし
    #[inline]
    pub fn is_concealed(&self) -> bool {
        self.melds.is_empty()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hand = vec_to_string(&kinds_from_ids(&self.hand));
        let drawn = match self.drawn {
            Some(d) => kind_of(d).to_string(),
            None => "None".to_string(),
        };
        writeln!(
            f,
            "seat: {}, wind: {}, drawn: {}, bonus: {}",
            self.seat,
            Kind(TW, self.seat_wind),
            drawn,
            self.bonus.len(),
        )?;
        writeln!(f, "hand: {}", hand)?;
        writeln!(f, "melds: {}", vec_to_string(&self.melds))?;
        write!(f, "discards: {}", vec_to_string(&kinds_from_ids(&self.discards)))
    }
}
