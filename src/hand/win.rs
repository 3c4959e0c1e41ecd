use crate::model::*;

use SetType::*;

// 手牌内で完成している面子の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetType {
    Shuntsu, // 順子
    Koutsu,  // 刻子
}

// 和了形の分解 手牌スナップショットから都度計算する一時値
// Standardの面子は (4 - 副露数) 個
#[derive(Debug, Clone, PartialEq)]
pub enum Decomposition {
    Standard { sets: Vec<(SetType, Kind)>, pair: Kind },
    SevenPairs(Vec<Kind>),
    ThirteenOrphans(Kind), // 2枚ある牌種
}

// 么九牌の13種
pub fn orphan_kinds() -> Vec<Kind> {
    let mut res = vec![];
    for ti in TM..=TS {
        res.push(Kind(ti, 1));
        res.push(Kind(ti, 9));
    }
    for ni in 1..=RANKS[TW] {
        res.push(Kind(TW, ni));
    }
    for ni in 1..=RANKS[TD] {
        res.push(Kind(TD, ni));
    }
    res
}

pub fn table_total(hand: &TileTable) -> usize {
    let mut n = 0;
    for ti in TM..SUIT {
        for ni in 1..=RANKS[ti] {
            n += hand[ti][ni];
        }
    }
    n
}

// [和了形の列挙]
// 手牌の牌種集合を和了形に分解するすべての方法を返却
// 枚数が (4 - 副露数) * 3 + 2 でない場合は和了形なし
pub fn calc_decompositions(hand: &TileTable, n_melds: usize) -> Vec<Decomposition> {
    assert!(n_melds <= 4);
    let need = 4 - n_melds;
    if table_total(hand) != need * 3 + 2 {
        return vec![];
    }

    let mut res = vec![];

    // 特殊形 (副露がある場合は成立しない)
    if n_melds == 0 {
        if let Some(pair) = parse_thirteen_orphans(hand) {
            res.push(Decomposition::ThirteenOrphans(pair));
        }
        if let Some(pairs) = parse_seven_pairs(hand) {
            res.push(Decomposition::SevenPairs(pairs));
        }
    }

    // 通常形: 雀頭候補を総当たりして残りを面子に分解
    // 複数の分解が存在する場合はすべて保持する(得点計算で最高のものを選ぶ)
    let mut tt = *hand;
    for ti in TM..TF {
        for ni in 1..=RANKS[ti] {
            if tt[ti][ni] < 2 {
                continue;
            }
            tt[ti][ni] -= 2;
            let mut acc = vec![];
            let mut sets_list = vec![];
            extract_sets(&mut tt, need, &mut acc, &mut sets_list);
            tt[ti][ni] += 2;
            for sets in sets_list {
                res.push(Decomposition::Standard {
                    sets,
                    pair: Kind(ti, ni),
                });
            }
        }
    }

    res
}

// 最小の牌種を刻子または順子として取り除く再帰で完全分解をすべて列挙
fn extract_sets(
    tt: &mut TileTable,
    left: usize,
    acc: &mut Vec<(SetType, Kind)>,
    out: &mut Vec<Vec<(SetType, Kind)>>,
) {
    // 残っている最小の牌種
    let mut lowest = None;
    'search: for ti in TM..TF {
        for ni in 1..=RANKS[ti] {
            if tt[ti][ni] > 0 {
                lowest = Some((ti, ni));
                break 'search;
            }
        }
    }

    let (ti, ni) = match lowest {
        Some(x) => x,
        None => {
            if left == 0 {
                out.push(acc.clone());
            }
            return;
        }
    };
    if left == 0 {
        return; // 牌が余っている
    }

    // 刻子
    if tt[ti][ni] >= 3 {
        tt[ti][ni] -= 3;
        acc.push((Koutsu, Kind(ti, ni)));
        extract_sets(tt, left - 1, acc, out);
        acc.pop();
        tt[ti][ni] += 3;
    }

    // 順子 (数牌のみ)
    if ti <= TS && ni <= 7 && tt[ti][ni + 1] > 0 && tt[ti][ni + 2] > 0 {
        tt[ti][ni] -= 1;
        tt[ti][ni + 1] -= 1;
        tt[ti][ni + 2] -= 1;
        acc.push((Shuntsu, Kind(ti, ni)));
        extract_sets(tt, left - 1, acc, out);
        acc.pop();
        tt[ti][ni] += 1;
        tt[ti][ni + 1] += 1;
        tt[ti][ni + 2] += 1;
    }
}

// 十三幺: 么九牌13種がすべてあり, いずれか1種のみ2枚
fn parse_thirteen_orphans(hand: &TileTable) -> Option<Kind> {
    let mut pair = None;
    for k in orphan_kinds() {
        match hand[k.0][k.1] {
            1 => {}
            2 => {
                if pair.is_some() {
                    return None;
                }
                pair = Some(k);
            }
            _ => return None,
        }
    }
    pair
}

// 七対子: 7種がちょうど2枚ずつ (同種4枚は2対子として数えない)
fn parse_seven_pairs(hand: &TileTable) -> Option<Vec<Kind>> {
    let mut pairs = vec![];
    for ti in TM..TF {
        for ni in 1..=RANKS[ti] {
            match hand[ti][ni] {
                0 => {}
                2 => pairs.push(Kind(ti, ni)),
                _ => return None,
            }
        }
    }

    if pairs.len() == 7 {
        Some(pairs)
    } else {
        None
    }
}

// [和了牌判定]
// 34種それぞれを手牌に仮に加えて分解を試し, 和了牌の一覧を返却
// 聴牌していない場合は空のリストを返却
pub fn calc_winning_kinds(hand: &TileTable, n_melds: usize) -> Vec<Kind> {
    let mut res = vec![];
    let mut tt = *hand;
    for k in playable_kinds() {
        if tt[k.0][k.1] >= 4 {
            continue; // 5枚目は存在しない
        }
        tt[k.0][k.1] += 1;
        if !calc_decompositions(&tt, n_melds).is_empty() {
            res.push(k);
        }
        tt[k.0][k.1] -= 1;
    }
    res
}

#[inline]
pub fn is_tenpai(hand: &TileTable, n_melds: usize) -> bool {
    !calc_winning_kinds(hand, n_melds).is_empty()
}

#[cfg(test)]
pub fn table_from_symbols(symbols: &[&str]) -> TileTable {
    let mut tt = TileTable::default();
    for s in symbols {
        let k = Kind::from_symbol(s);
        tt[k.0][k.1] += 1;
    }
    tt
}

#[test]
fn test_size_gate() {
    // 13枚の牌種集合は分解されない
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "m4", "m5", "m6", "p1", "p2", "p3", "p4", "p5", "p6", "s9",
    ]);
    assert!(calc_decompositions(&tt, 0).is_empty());
}

#[test]
fn test_standard_win() {
    // 順子4つ + 数牌の雀頭
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "m4", "m5", "m6", "p1", "p2", "p3", "p4", "p5", "p6", "s9", "s9",
    ]);
    let ds = calc_decompositions(&tt, 0);
    assert!(!ds.is_empty());
    for d in &ds {
        match d {
            Decomposition::Standard { sets, pair } => {
                assert_eq!(sets.len(), 4);
                assert_eq!(*pair, Kind::from_symbol("s9"));
            }
            _ => panic!("unexpected decomposition: {:?}", d),
        }
    }
}

#[test]
fn test_multiple_decompositions() {
    // 三連刻は刻子3つと順子3つの2通りに分解できる
    let tt = table_from_symbols(&[
        "m1", "m1", "m1", "m2", "m2", "m2", "m3", "m3", "m3", "p5", "p6", "p7", "w1", "w1",
    ]);
    let ds = calc_decompositions(&tt, 0);
    assert_eq!(ds.len(), 2);
}

#[test]
fn test_seven_pairs_reject_quad() {
    // 同種4枚は2対子として数えない
    let tt = table_from_symbols(&[
        "m1", "m1", "m1", "m1", "p2", "p2", "p3", "p3", "p4", "p4", "s5", "s5", "s6", "s6",
    ]);
    let ds = calc_decompositions(&tt, 0);
    assert!(!ds
        .iter()
        .any(|d| matches!(d, Decomposition::SevenPairs(_))));
}

#[test]
fn test_seven_pairs_win() {
    let tt = table_from_symbols(&[
        "m1", "m1", "m3", "m3", "p2", "p2", "p7", "p7", "s5", "s5", "w1", "w1", "d3", "d3",
    ]);
    let ds = calc_decompositions(&tt, 0);
    assert!(ds
        .iter()
        .any(|d| matches!(d, Decomposition::SevenPairs(_))));
}

#[test]
fn test_thirteen_orphans() {
    let mut syms = vec![
        "m1", "m9", "p1", "p9", "s1", "s9", "w1", "w2", "w3", "w4", "d1", "d2", "d3",
    ];
    syms.push("d3");
    let tt = table_from_symbols(&syms);
    let ds = calc_decompositions(&tt, 0);
    assert!(ds
        .iter()
        .any(|d| matches!(d, Decomposition::ThirteenOrphans(k) if *k == Kind::from_symbol("d3"))));

    // 么九牌以外が混ざると不成立
    let tt = table_from_symbols(&[
        "m1", "m9", "p1", "p9", "s1", "s2", "w1", "w2", "w3", "w4", "d1", "d2", "d3", "d3",
    ]);
    assert!(calc_decompositions(&tt, 0).is_empty());
}

#[test]
fn test_winning_kinds_two_sided() {
    // 両面待ちは両側の牌種を報告する
    let tt = table_from_symbols(&[
        "m2", "m3", "m4", "m5", "m6", "m7", "m8", "m9", "p1", "p1", "w1", "w1", "w1",
    ]);
    let wins = calc_winning_kinds(&tt, 0);
    assert!(wins.contains(&Kind::from_symbol("m1")));
    assert!(wins.contains(&Kind::from_symbol("m4")));
    assert!(wins.contains(&Kind::from_symbol("m7")));
    assert!(is_tenpai(&tt, 0));

    // 聴牌していない手牌
    let tt = table_from_symbols(&[
        "m1", "m4", "m7", "p2", "p5", "p8", "s3", "s6", "s9", "w1", "w2", "d1", "d2",
    ]);
    assert!(calc_winning_kinds(&tt, 0).is_empty());
    assert!(!is_tenpai(&tt, 0));
}

#[test]
fn test_declared_sets_win() {
    // 副露2つ + 手牌8枚 (面子2つ + 雀頭)
    let tt = table_from_symbols(&["m1", "m2", "m3", "s5", "s5", "s5", "d1", "d1"]);
    let ds = calc_decompositions(&tt, 2);
    assert!(!ds.is_empty());
    match &ds[0] {
        Decomposition::Standard { sets, pair } => {
            assert_eq!(sets.len(), 2);
            assert_eq!(*pair, Kind::from_symbol("d1"));
        }
        _ => panic!(),
    }

    // 副露があると七対子・十三幺は不成立
    let tt = table_from_symbols(&["m1", "m1", "p2", "p2", "s3", "s3", "d1", "d1"]);
    assert!(calc_decompositions(&tt, 2).is_empty());
}
