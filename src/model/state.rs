use super::*;
use crate::hand::evaluate::WinResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,        // 配牌直後 (親の第一ツモ待ち)
    Discard,     // ツモ番の打牌待ち
    AwaitClaims, // 打牌に対する他家の応答待ち
    GameOver,    // 終局
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOptions {
    pub min_points: Points, // 和了に必要な最低打点 (0で縛りなし)
}

impl Default for GameOptions {
    fn default() -> Self {
        Self { min_points: 8 }
    }
}

// ゲームの進行状態
// 遷移関数は値を受け取って新しい値を返し, 不正な操作では入力をそのまま返却する
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub phase: Phase,
    pub turn: Seat,                          // ツモ番の座席
    pub round_wind: Rank,                    // 場風
    pub players: [Player; SEAT],             // 各座席の状態
    pub wall: Vec<TileId>,                   // 牌山 (先頭からツモ)
    pub dead_wall: Vec<TileId>,              // 王牌 (槓の代わり牌)
    pub last_discard: Option<(Seat, TileId)>, // 直前の捨て牌
    pub claims: Vec<Claim>,                  // 未解決の応答候補
    pub chosen: Vec<Claim>,                  // 各座席が選択した応答
    pub passed: [bool; SEAT],                // 応答をスキップした座席
    pub winner: Option<Seat>,
    pub result: Option<WinResult>,
    pub options: GameOptions,
}

impl GameState {
    // 全id空間の保存則を検査 (牌の重複・消失はプログラムエラー)
    pub fn check_conservation(&self) -> bool {
        let mut ids = vec![];
        for pl in &self.players {
            ids.extend(&pl.hand);
            if let Some(d) = pl.drawn {
                ids.push(d);
            }
            ids.extend(&pl.discards);
            ids.extend(&pl.bonus);
            for m in &pl.melds {
                ids.extend(&m.tiles);
            }
        }
        ids.extend(&self.wall);
        ids.extend(&self.dead_wall);

        if ids.len() != N_TILE {
            return false;
        }
        let mut seen = [false; N_TILE];
        for id in ids {
            if id >= N_TILE || seen[id] {
                return false;
            }
            seen[id] = true;
        }
        true
    }

    // 永続化・転送用のスナップショット
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    // 指定座席向けの視界 非公開の牌はBLANKに置き換える(配列の位置は保つ)
    pub fn masked_for(&self, seat: Seat) -> GameState {
        let mut stg = self.clone();
        for s in 0..SEAT {
            if s == seat {
                continue;
            }
            let pl = &mut stg.players[s];
            for id in pl.hand.iter_mut() {
                *id = BLANK;
            }
            if pl.drawn.is_some() {
                pl.drawn = Some(BLANK);
            }
        }
        for id in stg.wall.iter_mut() {
            *id = BLANK;
        }
        for id in stg.dead_wall.iter_mut() {
            *id = BLANK;
        }
        stg
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "phase: {:?}, turn: {}, round_wind: {}, wall: {}, dead_wall: {}",
            self.phase,
            self.turn,
            Kind(TW, self.round_wind),
            self.wall.len(),
            self.dead_wall.len(),
        )?;
        let boader = "-".to_string().repeat(80);
        write!(f, "{}", boader)?;
        for pl in &self.players {
            writeln!(f)?;
            writeln!(f, "{}", pl)?;
            write!(f, "{}", boader)?;
        }
        Ok(())
    }
}

#[test]
fn test_masked_snapshot() {
    use crate::controller::transition::deal_new_game;

    let wall: Vec<TileId> = (0..N_TILE).collect();
    let stg = deal_new_game(wall, WE, GameOptions::default());

    let masked = stg.masked_for(1);
    // 自席の手牌は見える
    assert_eq!(masked.players[1].hand, stg.players[1].hand);
    // 他家の手牌は枚数を保ったまま伏せられる
    assert_eq!(masked.players[0].hand.len(), stg.players[0].hand.len());
    assert!(masked.players[0].hand.iter().all(|&id| id == BLANK));
    assert!(masked.wall.iter().all(|&id| id == BLANK));

    // スナップショットはそのままJSONになる
    let json = masked.snapshot();
    assert!(json.contains("\"phase\""));
}
