use std::fmt;

use crate::model::*;

use super::win::{Decomposition, SetType};

use SetPairType::*;

// 雀頭を含む面子1つの分類 (手牌内 + 副露)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPairType {
    Pair,    // 雀頭
    Shuntsu, // 順子
    Koutsu,  // 刻子
    Chii,    // チー
    Pon,     // ポン
    Minkan,  // 明槓
    Ankan,   // 暗槓
}

// Kindは順子・チーの場合は先頭の牌種
#[derive(Debug, Clone, Copy)]
pub struct SetPair(pub SetPairType, pub Kind);

// 副露をSetPairに変換したリストを返却
pub fn parse_melds(melds: &[Meld]) -> Vec<SetPair> {
    let mut res = vec![];
    for m in melds {
        res.push(match m.type_ {
            MeldType::Chii => SetPair(Chii, m.kind()),
            MeldType::Pon => SetPair(Pon, m.kind()),
            MeldType::Minkan => SetPair(Minkan, m.kind()),
            MeldType::Ankan => SetPair(Ankan, m.kind()),
        });
    }
    res
}

// 和了形1通りに対する役判定の情報
// parsedの要素数: 通常形5, 七対子7, 十三幺0
#[derive(Debug)]
pub struct FanContext {
    hand: TileTable,          // 手牌(副露を含まない, 和了牌を含む)
    parsed: Vec<SetPair>,     // 雀頭を含むすべての面子
    pair_kind: Option<Kind>,  // 雀頭の牌種
    ctx: WinContext,          // 状況情報
    counts: Counts,           // 面子や牌種別のカウント
    triplet_check: TileTable, // 刻子系面子のカウント(雀頭は含まない)
}

impl FanContext {
    pub fn new(hand: &TileTable, decomp: &Decomposition, melds: &[Meld], ctx: WinContext) -> Self {
        let mut parsed = vec![];
        let mut pair_kind = None;
        match decomp {
            Decomposition::Standard { sets, pair } => {
                for &(tp, k) in sets {
                    parsed.push(match tp {
                        SetType::Shuntsu => SetPair(Shuntsu, k),
                        SetType::Koutsu => SetPair(Koutsu, k),
                    });
                }
                parsed.append(&mut parse_melds(melds));
                parsed.push(SetPair(Pair, *pair));
                pair_kind = Some(*pair);
            }
            Decomposition::SevenPairs(pairs) => {
                for &k in pairs {
                    parsed.push(SetPair(Pair, k));
                }
            }
            Decomposition::ThirteenOrphans(pair) => {
                pair_kind = Some(*pair);
            }
        }

        let counts = count_type(&parsed, &ctx);
        let triplet_check = check_triplets(&parsed);

        Self {
            hand: *hand,
            parsed,
            pair_kind,
            ctx,
            counts,
            triplet_check,
        }
    }

    // (成立した役と成立数の一覧, 合計点)を返却
    // 検出後に打ち消しテーブルを適用してから合計する
    pub fn calc_fans(&self) -> (Vec<(&'static Fan, usize)>, Points) {
        let mut detected = vec![];
        for (i, f) in FAN_LIST.iter().enumerate() {
            let n = (f.func)(self);
            if n > 0 {
                detected.push((i, n));
            }
        }

        let mut excluded = vec![false; FAN_LIST.len()];
        for &(i, _) in &detected {
            for &j in FAN_EXCLUDES[i] {
                excluded[j] = true;
            }
        }

        let mut fans = vec![];
        let mut total = 0;
        for &(i, n) in &detected {
            if !excluded[i] {
                fans.push((&FAN_LIST[i], n));
                total += FAN_LIST[i].points * n;
            }
        }
        (fans, total)
    }
}

#[derive(Debug, Default)]
struct Counts {
    koutsu: usize,
    ankan: usize,
    shuntsu_total: usize, // shuntsu + chii
    koutsu_total: usize,  // koutsu + pon + minkan + ankan
    ankou_total: usize,   // koutsu + ankan (ロン和了で完成した刻子は除く)
    suits: [usize; SUIT], // 面子・雀頭の種別カウント
}

fn count_type(parsed: &[SetPair], ctx: &WinContext) -> Counts {
    let mut cnt = Counts::default();
    let mut won_koutsu = false;
    for SetPair(tp, k) in parsed {
        match tp {
            Pair => {}
            Shuntsu | Chii => cnt.shuntsu_total += 1,
            Koutsu | Pon | Minkan | Ankan => cnt.koutsu_total += 1,
        }
        match tp {
            Koutsu => {
                cnt.koutsu += 1;
                if *k == ctx.winning_kind {
                    won_koutsu = true;
                }
            }
            Ankan => cnt.ankan += 1,
            _ => {}
        }
        cnt.suits[k.0] += 1;
    }
    cnt.ankou_total = cnt.koutsu + cnt.ankan;

    // ロン和了で完成した刻子は暗刻として数えない
    if !ctx.is_self_drawn && won_koutsu && cnt.ankou_total > 0 {
        cnt.ankou_total -= 1;
    }

    cnt
}

fn check_triplets(parsed: &[SetPair]) -> TileTable {
    let mut tt = TileTable::default();
    for SetPair(tp, k) in parsed {
        match tp {
            Koutsu | Pon | Minkan | Ankan => tt[k.0][k.1] += 1,
            _ => {}
        }
    }
    tt
}

pub struct Fan {
    pub name: &'static str,
    pub points: Points,
    pub func: fn(&FanContext) -> usize, // 成立数 (0で不成立)
}

impl fmt::Debug for Fan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.name, self.points)
    }
}

macro_rules! fan {
    ($n: expr, $f: expr, $p: expr) => {
        Fan {
            name: $n,
            func: $f,
            points: $p,
        }
    };
}

// 役のindex (打ち消しテーブル用)
pub const F_DAISANGEN: usize = 0;
pub const F_DAISUUSHII: usize = 1;
pub const F_SHIISANYAO: usize = 2;
pub const F_CHUURENPOUTOU: usize = 3;
pub const F_TSUUIISOU: usize = 4;
pub const F_SHOUSANGEN: usize = 5;
pub const F_SHOUSUUSHII: usize = 6;
pub const F_SUUANKOU: usize = 7;
pub const F_SANANKOU: usize = 8;
pub const F_CHIITOITSU: usize = 9;
pub const F_CHINIISOU: usize = 10;
pub const F_IKKITSUUKAN: usize = 11;
pub const F_HONIISOU: usize = 12;
pub const F_TOITOIHOU: usize = 13;
pub const F_PINFU: usize = 14;
pub const F_TANYAOCHUU: usize = 15;
pub const F_MENZENCHIN: usize = 16;
pub const F_BAKAZE: usize = 17;
pub const F_JIKAZE: usize = 18;
pub const F_YAKUHAI: usize = 19;
pub const F_TSUMO: usize = 20;
pub const F_HAITEI: usize = 21;
pub const F_RINSHAN: usize = 22;
pub const F_KAHAI: usize = 23;

// 検出は先頭から順に行う (順序は得点には影響しないが出力順を固定する)
static FAN_LIST: &[Fan] = &[
    fan!("大三元", is_daisangen, 88),
    fan!("大四喜", is_daisuushii, 88),
    fan!("十三幺", is_shiisanyao, 88),
    fan!("九蓮宝燈", is_chuurenpoutou, 88),
    fan!("字一色", is_tsuuiisou, 64),
    fan!("小三元", is_shousangen, 64),
    fan!("小四喜", is_shousuushii, 64),
    fan!("四暗刻", is_suuankou, 64),
    fan!("三暗刻", is_sanankou, 16),
    fan!("七対子", is_chiitoitsu, 24),
    fan!("清一色", is_chiniisou, 24),
    fan!("一気通貫", is_ikkitsuukan, 16),
    fan!("混一色", is_honiisou, 6),
    fan!("対々和", is_toitoihou, 6),
    fan!("平和", is_pinfu, 2),
    fan!("断幺九", is_tanyaochuu, 2),
    fan!("門前清", is_menzenchin, 2),
    fan!("場風刻", is_bakaze, 2),
    fan!("自風刻", is_jikaze, 2),
    fan!("箭刻", is_yakuhai, 2),
    fan!("自摸和", is_tsumo, 1),
    fan!("海底撈月", is_haitei, 8),
    fan!("嶺上開花", is_rinshan, 8),
    fan!("花牌", is_kahai, 1),
];

// 各役が打ち消す下位役の静的テーブル (FAN_LISTとindexを揃えること)
static FAN_EXCLUDES: &[&[usize]] = &[
    &[F_SHOUSANGEN, F_YAKUHAI, F_TOITOIHOU],            // 大三元
    &[F_SHOUSUUSHII, F_BAKAZE, F_JIKAZE, F_TOITOIHOU],  // 大四喜
    &[F_MENZENCHIN],                                    // 十三幺
    &[F_CHINIISOU, F_HONIISOU, F_MENZENCHIN],           // 九蓮宝燈
    &[F_HONIISOU, F_TOITOIHOU],                         // 字一色
    &[F_YAKUHAI],                                       // 小三元
    &[F_BAKAZE, F_JIKAZE],                              // 小四喜
    &[F_SANANKOU, F_TOITOIHOU, F_MENZENCHIN],           // 四暗刻
    &[],                                                // 三暗刻
    &[F_MENZENCHIN],                                    // 七対子
    &[F_HONIISOU],                                      // 清一色
    &[],                                                // 一気通貫
    &[],                                                // 混一色
    &[],                                                // 対々和
    &[],                                                // 平和
    &[],                                                // 断幺九
    &[],                                                // 門前清
    &[],                                                // 場風刻
    &[],                                                // 自風刻
    &[],                                                // 箭刻
    &[],                                                // 自摸和
    &[F_TSUMO],                                         // 海底撈月
    &[F_TSUMO],                                         // 嶺上開花
    &[],                                                // 花牌
];

// 大三元
fn is_daisangen(ctx: &FanContext) -> usize {
    let tc = &ctx.triplet_check[TD];
    ((1..=RANKS[TD]).all(|ni| tc[ni] >= 1)) as usize
}

// 大四喜
fn is_daisuushii(ctx: &FanContext) -> usize {
    let tc = &ctx.triplet_check[TW];
    ((1..=RANKS[TW]).all(|ni| tc[ni] >= 1)) as usize
}

// 十三幺
fn is_shiisanyao(ctx: &FanContext) -> usize {
    (ctx.parsed.is_empty() && ctx.pair_kind.is_some()) as usize
}

// 九蓮宝燈 (門前で1種の数牌が 1112345678999 + 1枚)
fn is_chuurenpoutou(ctx: &FanContext) -> usize {
    if !ctx.ctx.is_concealed || ctx.parsed.len() != 5 {
        return 0;
    }

    let suits = &ctx.counts.suits;
    let ti = if suits[TM] == 5 {
        TM
    } else if suits[TP] == 5 {
        TP
    } else if suits[TS] == 5 {
        TS
    } else {
        return 0;
    };

    let h = &ctx.hand;
    if h[ti][1] < 3 || h[ti][9] < 3 {
        return 0;
    }
    for ni in 2..9 {
        if h[ti][ni] == 0 {
            return 0;
        }
    }
    1
}

// 字一色
fn is_tsuuiisou(ctx: &FanContext) -> usize {
    let n = ctx.parsed.len();
    (n >= 5 && ctx.counts.suits[TW] + ctx.counts.suits[TD] == n) as usize
}

// 小三元
fn is_shousangen(ctx: &FanContext) -> usize {
    let tc = &ctx.triplet_check[TD];
    let n: usize = (1..=RANKS[TD]).map(|ni| (tc[ni] >= 1) as usize).sum();
    let pair_doragon = matches!(ctx.pair_kind, Some(k) if k.is_doragon());
    (n == 2 && pair_doragon) as usize
}

// 小四喜
fn is_shousuushii(ctx: &FanContext) -> usize {
    let tc = &ctx.triplet_check[TW];
    let n: usize = (1..=RANKS[TW]).map(|ni| (tc[ni] >= 1) as usize).sum();
    let pair_wind = matches!(ctx.pair_kind, Some(k) if k.is_wind());
    (n == 3 && pair_wind) as usize
}

// 四暗刻
fn is_suuankou(ctx: &FanContext) -> usize {
    (ctx.counts.ankou_total == 4) as usize
}

// 三暗刻
fn is_sanankou(ctx: &FanContext) -> usize {
    (ctx.counts.ankou_total == 3) as usize
}

// 七対子
fn is_chiitoitsu(ctx: &FanContext) -> usize {
    (ctx.parsed.len() == 7) as usize
}

// 清一色
fn is_chiniisou(ctx: &FanContext) -> usize {
    use std::cmp::min;
    let suits = &ctx.counts.suits;
    let n_suit = min(suits[TM], 1) + min(suits[TP], 1) + min(suits[TS], 1);
    (!ctx.parsed.is_empty() && n_suit == 1 && suits[TW] + suits[TD] == 0) as usize
}

// 一気通貫 (同種の数牌で123,456,789)
fn is_ikkitsuukan(ctx: &FanContext) -> usize {
    if ctx.counts.shuntsu_total < 3 {
        return 0;
    }

    let mut f147 = [[false; 3]; 3];
    for SetPair(tp, k) in &ctx.parsed {
        match tp {
            Shuntsu | Chii => match k.1 {
                1 | 4 | 7 => f147[k.0 - 1][k.1 / 3] = true,
                _ => {}
            },
            _ => {}
        }
    }

    f147.iter().any(|f| f[0] && f[1] && f[2]) as usize
}

// 混一色
fn is_honiisou(ctx: &FanContext) -> usize {
    use std::cmp::min;
    let suits = &ctx.counts.suits;
    let n_suit = min(suits[TM], 1) + min(suits[TP], 1) + min(suits[TS], 1);
    (n_suit == 1 && suits[TW] + suits[TD] > 0) as usize
}

// 対々和
fn is_toitoihou(ctx: &FanContext) -> usize {
    (ctx.counts.koutsu_total == 4) as usize
}

// 平和 (順子4つ + 数牌の雀頭, 字牌なし)
fn is_pinfu(ctx: &FanContext) -> usize {
    let pair_suit = matches!(ctx.pair_kind, Some(k) if k.is_suit());
    (ctx.counts.shuntsu_total == 4 && pair_suit) as usize
}

// 断幺九
fn is_tanyaochuu(ctx: &FanContext) -> usize {
    if ctx.parsed.is_empty() {
        return 0; // 十三幺対策
    }

    for SetPair(tp, k) in &ctx.parsed {
        match tp {
            Chii | Shuntsu => {
                if k.1 == 1 || k.1 == 7 {
                    return 0;
                }
            }
            _ => {
                if k.is_end() {
                    return 0;
                }
            }
        }
    }
    1
}

// 門前清
fn is_menzenchin(ctx: &FanContext) -> usize {
    ctx.ctx.is_concealed as usize
}

// 場風刻
fn is_bakaze(ctx: &FanContext) -> usize {
    (ctx.triplet_check[TW][ctx.ctx.round_wind] >= 1) as usize
}

// 自風刻
fn is_jikaze(ctx: &FanContext) -> usize {
    (ctx.triplet_check[TW][ctx.ctx.seat_wind] >= 1) as usize
}

// 箭刻 (三元牌の刻子毎に加算)
fn is_yakuhai(ctx: &FanContext) -> usize {
    let tc = &ctx.triplet_check[TD];
    (1..=RANKS[TD]).map(|ni| tc[ni]).sum()
}

// 自摸和
fn is_tsumo(ctx: &FanContext) -> usize {
    ctx.ctx.is_self_drawn as usize
}

// 海底撈月 (牌山最後の牌)
fn is_haitei(ctx: &FanContext) -> usize {
    (ctx.ctx.is_last_tile && ctx.ctx.is_self_drawn) as usize
}

// 嶺上開花 (槓の代わり牌)
fn is_rinshan(ctx: &FanContext) -> usize {
    (ctx.ctx.is_replacement && ctx.ctx.is_self_drawn) as usize
}

// 花牌 (1枚につき1点)
fn is_kahai(ctx: &FanContext) -> usize {
    ctx.ctx.n_bonus
}
