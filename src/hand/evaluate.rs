use serde::Serialize;

use crate::model::*;

use super::fan::FanContext;
use super::win::calc_decompositions;

// 和了の評価結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinResult {
    pub fans: Vec<(String, Points)>, // (役名, 小計 = 点数 x 成立数)
    pub total: Points,
}

impl WinResult {
    pub fn has_fan(&self, name: &str) -> bool {
        self.fans.iter().any(|(n, _)| n == name)
    }
}

// 和了形である場合, 最も高得点となる分解のSome(WinResult)を返却
// 和了形でない場合はNoneを返却
// 複数の分解が存在する場合はすべて評価して最高点のものを残す
pub fn evaluate_hand(hand: &TileTable, melds: &[Meld], ctx: &WinContext) -> Option<WinResult> {
    let mut results = vec![];
    for d in calc_decompositions(hand, melds.len()) {
        let fc = FanContext::new(hand, &d, melds, *ctx);
        let (fans, total) = fc.calc_fans();
        results.push(WinResult {
            fans: fans
                .iter()
                .map(|&(f, n)| (f.name.to_string(), f.points * n))
                .collect(),
            total,
        });
    }

    results.sort_by_key(|r| r.total);
    results.pop()
}

#[cfg(test)]
use super::win::table_from_symbols;

#[cfg(test)]
fn test_ctx(winning: &str, is_self_drawn: bool, is_concealed: bool) -> WinContext {
    WinContext {
        round_wind: WE,
        seat_wind: WS,
        is_self_drawn,
        winning_kind: Kind::from_symbol(winning),
        is_last_tile: false,
        is_replacement: false,
        n_bonus: 0,
        is_concealed,
    }
}

#[test]
fn test_all_runs_concealed() {
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "m4", "m5", "m6", "p1", "p2", "p3", "p4", "p5", "p6", "s9", "s9",
    ]);
    let res = evaluate_hand(&tt, &[], &test_ctx("m3", false, true)).unwrap();
    assert!(res.has_fan("平和"));
    assert!(res.has_fan("門前清"));
    assert!(res.total >= 4);
}

#[test]
fn test_big_three_doragons() {
    let tt = table_from_symbols(&[
        "d1", "d1", "d1", "d2", "d2", "d2", "d3", "d3", "d3", "m1", "m2", "m3", "p5", "p5",
    ]);
    let res = evaluate_hand(&tt, &[], &test_ctx("m1", true, true)).unwrap();
    assert!(res.has_fan("大三元"));
    // 下位役は打ち消される
    assert!(!res.has_fan("箭刻"));
    assert!(!res.has_fan("小三元"));
    assert!(res.total >= 88);
}

#[test]
fn test_full_flush_excludes_half_flush() {
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "m4", "m5", "m6", "m7", "m8", "m9", "m2", "m3", "m4", "m5", "m5",
    ]);
    let res = evaluate_hand(&tt, &[], &test_ctx("m5", false, true)).unwrap();
    assert!(res.has_fan("清一色"));
    assert!(!res.has_fan("混一色"));
}

#[test]
fn test_seven_pairs_points() {
    let tt = table_from_symbols(&[
        "m1", "m1", "m3", "m3", "p2", "p2", "p7", "p7", "s5", "s5", "w1", "w1", "d3", "d3",
    ]);
    let res = evaluate_hand(&tt, &[], &test_ctx("d3", false, true)).unwrap();
    assert!(res.has_fan("七対子"));
    assert!(res.total >= 24);
}

#[test]
fn test_bonus_tiles() {
    let tt = table_from_symbols(&[
        "m1", "m2", "m3", "m4", "m5", "m6", "p1", "p2", "p3", "p4", "p5", "p6", "s9", "s9",
    ]);
    let base = evaluate_hand(&tt, &[], &test_ctx("m3", false, true)).unwrap();

    let mut ctx = test_ctx("m3", false, true);
    ctx.n_bonus = 3;
    let res = evaluate_hand(&tt, &[], &ctx).unwrap();
    assert!(res.fans.contains(&("花牌".to_string(), 3)));
    assert_eq!(res.total, base.total + 3);
}

#[test]
fn test_all_honors_all_winds() {
    // 大四喜+字一色+四暗刻 下位役(小四喜,風牌刻,対々和,門前清)はすべて打ち消される
    let tt = table_from_symbols(&[
        "w1", "w1", "w1", "w2", "w2", "w2", "w3", "w3", "w3", "w4", "w4", "w4", "d1", "d1",
    ]);
    let res = evaluate_hand(&tt, &[], &test_ctx("d1", true, true)).unwrap();
    assert!(res.has_fan("大四喜"));
    assert!(res.has_fan("字一色"));
    assert!(res.has_fan("四暗刻"));
    assert!(!res.has_fan("小四喜"));
    assert!(!res.has_fan("場風刻"));
    assert!(!res.has_fan("自風刻"));
    assert!(!res.has_fan("対々和"));
    assert!(!res.has_fan("門前清"));
    assert_eq!(res.total, 88 + 64 + 64 + 1); // +自摸和
}

#[test]
fn test_best_decomposition_kept() {
    // 三連刻: 刻子3つ(三暗刻)と順子3つの分解では前者が高得点
    let tt = table_from_symbols(&[
        "m1", "m1", "m1", "m2", "m2", "m2", "m3", "m3", "m3", "p5", "p6", "p7", "w1", "w1",
    ]);
    let res = evaluate_hand(&tt, &[], &test_ctx("p5", true, true)).unwrap();
    assert!(res.has_fan("三暗刻"));
}

#[test]
fn test_not_a_win() {
    let tt = table_from_symbols(&[
        "m1", "m4", "m7", "p2", "p5", "p8", "s3", "s6", "s9", "w1", "w2", "d1", "d2", "d3",
    ]);
    assert!(evaluate_hand(&tt, &[], &test_ctx("d3", false, true)).is_none());
}
