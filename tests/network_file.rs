use std::sync::Arc;

use cozy_chess::Square;
use movepick::encoder::move_index;
use movepick::network::LinearPolicy;
use movepick::strategy::ModelStrategy;
use movepick::{MoveGenerator, Position};

#[test]
fn saved_policy_drives_the_model_strategy() {
    let dir = std::env::temp_dir().join(format!("movepick_policy_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("policy.bin");

    let mut net = LinearPolicy::zeros();
    net.set_bias(move_index(Square::D2, Square::D4).unwrap(), 5.0);
    net.save(&path).expect("save policy");

    let loaded = LinearPolicy::load(&path).expect("load policy");
    let mut s = ModelStrategy::new(Arc::new(loaded));
    let pos = Position::startpos();
    let mv = s.generate_move(&pos).unwrap();
    assert_eq!(pos.move_to_uci(mv), "d2d4");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn truncated_policy_file_is_an_error() {
    let dir = std::env::temp_dir().join(format!("movepick_bad_policy_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.bin");
    std::fs::write(&path, b"MVPKLIN1\x00\x03\x00\x00").unwrap();
    assert!(LinearPolicy::load(&path).is_err());
    std::fs::write(&path, b"NOTMAGIC").unwrap();
    assert!(LinearPolicy::load(&path).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
