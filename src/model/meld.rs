use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeldType {
    Chii,   // チー (順子の副露)
    Pon,    // ポン (刻子の副露)
    Minkan, // 明槓 (大明槓 + 加槓)
    Ankan,  // 暗槓
}

// 副露 加槓の場合のみPonの値をその場で書き換える
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meld {
    pub seat: Seat,
    pub type_: MeldType,
    pub tiles: Vec<TileId>,
    pub from: Option<Seat>,      // 鳴いた相手の座席
    pub claimed: Option<TileId>, // 鳴いた牌
}

impl Meld {
    pub fn kinds(&self) -> Vec<Kind> {
        kinds_from_ids(&self.tiles)
    }

    // 代表の牌種 (チーは最小の数字)
    pub fn kind(&self) -> Kind {
        self.kinds().into_iter().min().unwrap()
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: Vec<String> = self.kinds().iter().map(|k| format!("{}", k)).collect();
        write!(f, "{}", s.join("|"))
    }
}
