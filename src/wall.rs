use rand::prelude::*;

use crate::model::*;

// 144枚のid列をシャッフルして返却
// エンジン自身はシャッフルを行わない 配牌側のコラボレータとして使用する
pub fn create_wall(seed: u64) -> Vec<TileId> {
    let mut wall: Vec<TileId> = (0..N_TILE).collect();
    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(seed);
    wall.shuffle(&mut rng);
    wall
}

#[test]
fn test_create_wall() {
    // 同一シードで決定的
    let w1 = create_wall(0);
    let w2 = create_wall(0);
    assert_eq!(w1, w2);

    // 全idがちょうど1回ずつ現れる
    let mut sorted = w1;
    sorted.sort();
    assert_eq!(sorted, (0..N_TILE).collect::<Vec<_>>());
}
