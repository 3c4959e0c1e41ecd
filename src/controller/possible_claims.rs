use crate::model::*;

// [Claim Eligibility]
// 打牌や自分の手牌から形成できる副露の候補を列挙する
// 候補はすべて具体的な牌idの組み合わせで返却する

fn hand_ids_of(pl: &Player, kind: Kind) -> Vec<TileId> {
    pl.hand
        .iter()
        .copied()
        .filter(|&id| kind_of(id) == kind)
        .collect()
}

// チー: 鳴く2枚の組み合わせ (低い側, 嵌張, 高い側) をすべて返却
// 下家のみ可能という条件は呼び出し側で確認する
pub fn calc_chii_candidates(pl: &Player, discarded: Kind) -> Vec<Vec<TileId>> {
    if !discarded.is_suit() {
        return vec![];
    }

    let (ti, ni) = (discarded.0, discarded.1);
    let mut check: Vec<(Rank, Rank)> = vec![];
    // l2 l1 c0(discarded) r1 r2
    if ni >= 3 {
        check.push((ni - 2, ni - 1));
    }
    if 2 <= ni && ni <= 8 {
        check.push((ni - 1, ni + 1));
    }
    if ni <= 7 {
        check.push((ni + 1, ni + 2));
    }

    let mut res = vec![];
    for (a, b) in check {
        let ids0 = hand_ids_of(pl, Kind(ti, a));
        let ids1 = hand_ids_of(pl, Kind(ti, b));
        if !ids0.is_empty() && !ids1.is_empty() {
            res.push(vec![ids0[0], ids1[0]]);
        }
    }
    res
}

// ポン: 同種2枚を保持している場合に鳴く2枚を返却
pub fn calc_pon_candidate(pl: &Player, discarded: Kind) -> Option<Vec<TileId>> {
    let ids = hand_ids_of(pl, discarded);
    if ids.len() >= 2 {
        Some(ids[..2].to_vec())
    } else {
        None
    }
}

// 大明槓: 同種3枚を保持している場合に鳴く3枚を返却
pub fn calc_minkan_candidate(pl: &Player, discarded: Kind) -> Option<Vec<TileId>> {
    let ids = hand_ids_of(pl, discarded);
    if ids.len() >= 3 {
        Some(ids[..3].to_vec())
    } else {
        None
    }
}

// 暗槓: 手牌(ツモ牌を含む)に同種4枚がある牌種毎に4枚を返却
pub fn calc_ankan_candidates(pl: &Player) -> Vec<Vec<TileId>> {
    let full = pl.full_hand();
    let tt = table_from_ids(&full);
    let mut res = vec![];
    for ti in TM..TF {
        for ni in 1..=RANKS[ti] {
            if tt[ti][ni] == 4 {
                let k = Kind(ti, ni);
                res.push(
                    full.iter()
                        .copied()
                        .filter(|&id| kind_of(id) == k)
                        .collect(),
                );
            }
        }
    }
    res
}

// 加槓: ポンした刻子の4枚目を保持している場合にその牌を返却
pub fn calc_kakan_candidates(pl: &Player) -> Vec<TileId> {
    let full = pl.full_hand();
    let mut res = vec![];
    for m in &pl.melds {
        if m.type_ == MeldType::Pon {
            let k = m.kind();
            if let Some(&id) = full.iter().find(|&&id| kind_of(id) == k) {
                res.push(id);
            }
        }
    }
    res
}

// [手牌からの除去]
// 指定したidをすべて取り除く 重複指定や不所持があれば何もせずfalseを返却
pub fn remove_tiles(hand: &mut Vec<TileId>, ids: &[TileId]) -> bool {
    let mut positions = vec![];
    for &id in ids {
        match hand
            .iter()
            .enumerate()
            .position(|(i, &h)| h == id && !positions.contains(&i))
        {
            Some(i) => positions.push(i),
            None => return false,
        }
    }

    positions.sort();
    for &i in positions.iter().rev() {
        hand.remove(i);
    }
    true
}

#[cfg(test)]
fn test_player(symbols: &[&str]) -> Player {
    // 牌種毎にカタログ順のidを割り当てる
    let mut cursor = [[0; RNUM]; SUIT];
    let mut hand = vec![];
    for s in symbols {
        let k = Kind::from_symbol(s);
        let id = (0..N_TILE)
            .filter(|&id| kind_of(id) == k)
            .nth(cursor[k.0][k.1])
            .unwrap();
        cursor[k.0][k.1] += 1;
        hand.push(id);
    }
    Player {
        hand,
        ..Player::default()
    }
}

#[test]
fn test_chii_candidates() {
    let pl = test_player(&["m1", "m2", "m4", "m5", "m6", "p1", "w1"]);
    // m3に対して (m1,m2), (m2,m4), (m4,m5) の3通り
    let cs = calc_chii_candidates(&pl, Kind::from_symbol("m3"));
    assert_eq!(cs.len(), 3);
    for c in &cs {
        assert_eq!(c.len(), 2);
    }

    // 端の牌は組み合わせが減る
    let cs = calc_chii_candidates(&pl, Kind::from_symbol("m9"));
    assert!(cs.is_empty());

    // 字牌はチーできない
    let cs = calc_chii_candidates(&pl, Kind::from_symbol("w1"));
    assert!(cs.is_empty());
}

#[test]
fn test_pon_minkan_candidates() {
    let pl = test_player(&["s5", "s5", "s5", "p2", "p2", "w1"]);
    assert!(calc_pon_candidate(&pl, Kind::from_symbol("s5")).is_some());
    assert!(calc_minkan_candidate(&pl, Kind::from_symbol("s5")).is_some());
    assert!(calc_pon_candidate(&pl, Kind::from_symbol("p2")).is_some());
    assert!(calc_minkan_candidate(&pl, Kind::from_symbol("p2")).is_none());
    assert!(calc_pon_candidate(&pl, Kind::from_symbol("w1")).is_none());
}

#[test]
fn test_ankan_kakan_candidates() {
    let mut pl = test_player(&["m3", "m3", "m3", "m3", "p7", "w2"]);
    let cs = calc_ankan_candidates(&pl);
    assert_eq!(cs.len(), 1);
    assert_eq!(cs[0].len(), 4);

    // ポンの4枚目で加槓
    let pon = test_player(&["d1", "d1", "d1"]).hand;
    pl.melds.push(Meld {
        seat: 0,
        type_: MeldType::Pon,
        tiles: pon.clone(),
        from: Some(1),
        claimed: Some(pon[2]),
    });
    assert!(calc_kakan_candidates(&pl).is_empty());
    pl.hand.push(
        (0..N_TILE)
            .filter(|&id| kind_of(id) == Kind::from_symbol("d1"))
            .nth(3)
            .unwrap(),
    );
    assert_eq!(calc_kakan_candidates(&pl).len(), 1);
}

#[test]
fn test_remove_tiles() {
    let pl = test_player(&["m1", "m1", "m2", "p5"]);
    let mut hand = pl.hand.clone();

    // 不所持のidは拒否して手牌を変更しない
    assert!(!remove_tiles(&mut hand, &[999]));
    assert_eq!(hand, pl.hand);

    // 同じidの重複指定も拒否
    assert!(!remove_tiles(&mut hand, &[pl.hand[0], pl.hand[0]]));
    assert_eq!(hand, pl.hand);

    assert!(remove_tiles(&mut hand, &[pl.hand[0], pl.hand[2]]));
    assert_eq!(hand.len(), 2);
}
