use std::collections::HashMap;

use crate::model::*;

use super::win::orphan_kinds;

// キャッシュの肥大化防止 上限超過で全消去する
const CACHE_CAP: usize = 1 << 16;

// 向聴数のメモ化キャッシュ
// キーは牌種の枚数表と副露数のみでゲームの文脈を含まない
// 同時に複数のゲームを走らせる場合はゲーム毎に1つ保持し,
// 各座席の手番開始時にclear()を呼んでから使用すること
#[derive(Debug, Default)]
pub struct ShantenCache {
    map: HashMap<([u8; 34], usize), isize>,
}

impl ShantenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn cache_key(hand: &TileTable) -> [u8; 34] {
    let mut key = [0; 34];
    let mut i = 0;
    for ti in TM..TF {
        for ni in 1..=RANKS[ti] {
            key[i] = hand[ti][ni] as u8;
            i += 1;
        }
    }
    key
}

// [向聴数]
// 聴牌までに必要な牌の交換回数 (0 = 聴牌)
// 手牌は (4 - 副露数) * 3 + 1 枚を想定 14枚の手牌はcalc_discard_shantenで評価する
pub fn calc_shanten(hand: &TileTable, n_melds: usize, cache: &mut ShantenCache) -> isize {
    let key = (cache_key(hand), n_melds);
    if let Some(&v) = cache.map.get(&key) {
        return v;
    }

    let mut min = calc_standard_shanten(hand, n_melds);
    if n_melds == 0 {
        min = min.min(calc_seven_pairs_shanten(hand));
        min = min.min(calc_orphans_shanten(hand));
    }

    if cache.map.len() >= CACHE_CAP {
        cache.map.clear();
    }
    cache.map.insert(key, min);
    min
}

// 通常形: 雀頭候補を総当たりしてから面子・搭子の割り当てを探索
pub fn calc_standard_shanten(hand: &TileTable, n_melds: usize) -> isize {
    let need = 4 - n_melds;
    let mut tt = *hand;
    let mut best = (need * 2) as isize;

    for ti in TM..TF {
        for ni in 1..=RANKS[ti] {
            if tt[ti][ni] >= 2 {
                tt[ti][ni] -= 2;
                best = best.min(search_blocks(&mut tt, TM, 1, 0, 0, need, true));
                tt[ti][ni] += 2;
            }
        }
    }
    // 雀頭を固定しない場合
    best = best.min(search_blocks(&mut tt, TM, 1, 0, 0, need, false));

    best
}

// 面子2・搭子1の評価値で最小の交換回数を求める
// 搭子は面子の不足分までしか数えない
fn block_cost(sets: usize, partials: usize, need: usize, has_pair: bool) -> isize {
    let partials = partials.min(need - sets);
    let mut c = (need * 2) as isize - (sets * 2) as isize - partials as isize;
    if has_pair {
        c -= 1;
    }
    c.max(0)
}

// 最小の牌種から刻子・順子・搭子・孤立牌の割り当てを試す
// 搭子は残り面子数までしか数えない
fn search_blocks(
    tt: &mut TileTable,
    ti0: Suit,
    ni0: Rank,
    sets: usize,
    partials: usize,
    need: usize,
    has_pair: bool,
) -> isize {
    // 残っている最小の牌種まで走査
    let (mut ti, mut ni) = (ti0, ni0);
    loop {
        if ti == TF {
            return block_cost(sets, partials, need, has_pair);
        }
        if ni > RANKS[ti] {
            ti += 1;
            ni = 1;
            continue;
        }
        if tt[ti][ni] > 0 {
            break;
        }
        ni += 1;
    }

    let c = tt[ti][ni];

    // 孤立牌として使わない
    tt[ti][ni] = 0;
    let mut best = search_blocks(tt, ti, ni, sets, partials, need, has_pair);
    tt[ti][ni] = c;

    // 刻子
    if c >= 3 && sets < need {
        tt[ti][ni] -= 3;
        best = best.min(search_blocks(tt, ti, ni, sets + 1, partials, need, has_pair));
        tt[ti][ni] += 3;
    }

    // 対子 (刻子への搭子)
    if c >= 2 && sets + partials < need {
        tt[ti][ni] -= 2;
        best = best.min(search_blocks(tt, ti, ni, sets, partials + 1, need, has_pair));
        tt[ti][ni] += 2;
    }

    if ti <= TS {
        // 順子
        if ni <= 7 && tt[ti][ni + 1] > 0 && tt[ti][ni + 2] > 0 && sets < need {
            tt[ti][ni] -= 1;
            tt[ti][ni + 1] -= 1;
            tt[ti][ni + 2] -= 1;
            best = best.min(search_blocks(tt, ti, ni, sets + 1, partials, need, has_pair));
            tt[ti][ni] += 1;
            tt[ti][ni + 1] += 1;
            tt[ti][ni + 2] += 1;
        }

        // 両面・辺張搭子
        if ni <= 8 && tt[ti][ni + 1] > 0 && sets + partials < need {
            tt[ti][ni] -= 1;
            tt[ti][ni + 1] -= 1;
            best = best.min(search_blocks(tt, ti, ni, sets, partials + 1, need, has_pair));
            tt[ti][ni] += 1;
            tt[ti][ni + 1] += 1;
        }

        // 嵌張搭子
        if ni <= 7 && tt[ti][ni + 2] > 0 && sets + partials < need {
            tt[ti][ni] -= 1;
            tt[ti][ni + 2] -= 1;
            best = best.min(search_blocks(tt, ti, ni, sets, partials + 1, need, has_pair));
            tt[ti][ni] += 1;
            tt[ti][ni + 2] += 1;
        }
    }

    best
}

// 七対子形 (閉形式)
pub fn calc_seven_pairs_shanten(hand: &TileTable) -> isize {
    let mut pairs = 0;
    let mut kinds = 0;
    for ti in TM..TF {
        for ni in 1..=RANKS[ti] {
            let c = hand[ti][ni];
            if c > 0 {
                kinds += 1;
            }
            if c >= 2 {
                pairs += 1;
            }
        }
    }

    let shortage = if kinds < 7 { 7 - kinds } else { 0 };
    6 - pairs as isize + shortage as isize
}

// 十三幺形 (閉形式)
pub fn calc_orphans_shanten(hand: &TileTable) -> isize {
    let mut kinds = 0;
    let mut has_pair = false;
    for k in orphan_kinds() {
        let c = hand[k.0][k.1];
        if c > 0 {
            kinds += 1;
        }
        if c >= 2 {
            has_pair = true;
        }
    }

    13 - kinds as isize - if has_pair { 1 } else { 0 }
}

// [打牌候補の評価]
// 13枚または14枚の手牌について, 各打牌候補とその後の向聴数を返却
pub fn calc_discard_shanten(
    hand: &TileTable,
    n_melds: usize,
    cache: &mut ShantenCache,
) -> Vec<(Kind, isize)> {
    let mut res = vec![];
    let mut tt = *hand;
    for ti in TM..TF {
        for ni in 1..=RANKS[ti] {
            if tt[ti][ni] > 0 {
                tt[ti][ni] -= 1;
                res.push((Kind(ti, ni), calc_shanten(&tt, n_melds, cache)));
                tt[ti][ni] += 1;
            }
        }
    }
    res
}

// [有効牌の残り枚数]
// visibleには捨て牌・副露など場に見えている牌の枚数表を渡す
// 各牌種4枚の上限から自分の手牌と見えている牌を引いた合計
pub fn count_live_tiles(hand: &TileTable, kinds: &[Kind], visible: &TileTable) -> usize {
    let mut n = 0;
    for k in kinds {
        let used = hand[k.0][k.1] + visible[k.0][k.1];
        n += 4usize.saturating_sub(used);
    }
    n
}

#[cfg(test)]
use super::win::table_from_symbols;

#[test]
fn test_shanten_tenpai() {
    let mut cache = ShantenCache::new();
    // 面子3つ + 雀頭 + 両面搭子
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "m4", "m5", "m6", "m7", "m8", "m9", "p1", "p1", "s2", "s3",
    ]);
    assert_eq!(calc_shanten(&tt, 0, &mut cache), 0);

    // 面子3つ + 雀頭 + 孤立字牌2つ
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "m4", "m5", "m6", "p1", "p2", "p3", "s1", "s1", "w1", "w2",
    ]);
    assert_eq!(calc_shanten(&tt, 0, &mut cache), 1);
}

#[test]
fn test_shanten_excess_partials() {
    let mut cache = ShantenCache::new();
    // 面子3つ + 搭子2つ + 雀頭なし: 搭子の1つは雀頭に化ける必要がある
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "p1", "p2", "p3", "s1", "s2", "s3", "m4", "m5", "p4", "p5",
    ]);
    assert_eq!(calc_shanten(&tt, 0, &mut cache), 1);
}

#[test]
fn test_shanten_scrambled() {
    let mut cache = ShantenCache::new();
    // 連続も対子もない手牌
    let tt = table_from_symbols(&[
        "m1", "m4", "m7", "p2", "p5", "p8", "s3", "s6", "s9", "w1", "w2", "d1", "d2",
    ]);
    assert!(calc_shanten(&tt, 0, &mut cache) >= 3);
}

#[test]
fn test_shanten_monotonic() {
    let mut cache = ShantenCache::new();
    // 和了形に向かって1枚ずつ交換すると向聴数は増加しない
    let steps = [
        vec![
            "m1", "m4", "m7", "p2", "p5", "p8", "s3", "s6", "s9", "w1", "w2", "d1", "d2",
        ],
        vec![
            "m1", "m2", "m7", "p2", "p5", "p8", "s3", "s6", "s9", "w1", "w2", "d1", "d2",
        ],
        vec![
            "m1", "m2", "m3", "p2", "p5", "p8", "s3", "s6", "s9", "w1", "w2", "d1", "d2",
        ],
        vec![
            "m1", "m2", "m3", "p2", "p3", "p8", "s3", "s6", "s9", "w1", "w2", "d1", "d2",
        ],
        vec![
            "m1", "m2", "m3", "p2", "p3", "p4", "s3", "s6", "s9", "w1", "w2", "d1", "d2",
        ],
        vec![
            "m1", "m2", "m3", "p2", "p3", "p4", "s3", "s4", "s9", "w1", "w2", "d1", "d2",
        ],
        vec![
            "m1", "m2", "m3", "p2", "p3", "p4", "s3", "s4", "s5", "w1", "w1", "d1", "d2",
        ],
        vec![
            "m1", "m2", "m3", "p2", "p3", "p4", "s3", "s4", "s5", "w1", "w1", "d1", "d1",
        ],
    ];

    let mut prev = isize::MAX;
    for syms in &steps {
        let sh = calc_shanten(&table_from_symbols(syms), 0, &mut cache);
        assert!(sh <= prev, "shanten increased: {} -> {}", prev, sh);
        prev = sh;
    }
    assert_eq!(prev, 0);
}

#[test]
fn test_shanten_with_melds() {
    let mut cache = ShantenCache::new();
    // 副露2つ: 手牌7枚 面子1つ + 雀頭 + 孤立牌
    let tt = table_from_symbols(&["m1", "m2", "m3", "p5", "p5", "s9", "w1"]);
    assert_eq!(calc_shanten(&tt, 2, &mut cache), 1);

    // 聴牌
    let tt = table_from_symbols(&["m1", "m2", "m3", "p5", "p5", "s8", "s9"]);
    assert_eq!(calc_shanten(&tt, 2, &mut cache), 0);
}

#[test]
fn test_discard_shanten_from_win() {
    let mut cache = ShantenCache::new();
    // 和了形14枚: 最良の打牌はすべて向聴数0になる
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "m4", "m5", "m6", "p1", "p2", "p3", "p4", "p5", "p6", "s9", "s9",
    ]);
    let ds = calc_discard_shanten(&tt, 0, &mut cache);
    let min = ds.iter().map(|&(_, sh)| sh).min().unwrap();
    assert_eq!(min, 0);
}

#[test]
fn test_seven_pairs_orphans_shanten() {
    let mut cache = ShantenCache::new();
    // 対子6つ + 孤立1枚 → 七対子聴牌
    let tt = table_from_symbols(&[
        "m1", "m1", "m3", "m3", "p2", "p2", "p7", "p7", "s5", "s5", "w1", "w1", "d3",
    ]);
    assert_eq!(calc_seven_pairs_shanten(&tt), 0);
    assert_eq!(calc_shanten(&tt, 0, &mut cache), 0);

    // 么九牌12種 + 雀頭 → 十三幺聴牌
    let tt = table_from_symbols(&[
        "m1", "m9", "p1", "p9", "s1", "s9", "w1", "w2", "w3", "w4", "d1", "d2", "d2",
    ]);
    assert_eq!(calc_orphans_shanten(&tt), 0);
    assert_eq!(calc_shanten(&tt, 0, &mut cache), 0);
}

#[test]
fn test_cache_clear() {
    let mut cache = ShantenCache::new();
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "m4", "m5", "m6", "p1", "p2", "p3", "s1", "s1", "w1", "w2",
    ]);
    let v1 = calc_shanten(&tt, 0, &mut cache);
    assert!(!cache.is_empty());
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(calc_shanten(&tt, 0, &mut cache), v1);
}

#[test]
fn test_count_live_tiles() {
    let hand = table_from_symbols(&["m1", "m2", "m2"]);
    let mut visible = TileTable::default();
    visible[TM][3] = 2; // 場に2枚見えている
    let kinds = [Kind(TM, 1), Kind(TM, 3)];
    // m1: 4 - 1 = 3, m3: 4 - 2 = 2
    assert_eq!(count_live_tiles(&hand, &kinds, &visible), 5);
}
