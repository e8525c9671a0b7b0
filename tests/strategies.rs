use std::sync::Arc;

use anyhow::anyhow;
use cozy_chess::{Piece, Square};
use movepick::encoder::{move_index, BoardTensor, POLICY_SIZE};
use movepick::network::{LinearPolicy, Predictor};
use movepick::strategy::model::{best_by_probability, legal_move_probabilities};
use movepick::strategy::{ModelStrategy, RandomStrategy};
use movepick::{EngineError, MoveGenerator, Position, Strategy, StrategyConfig, StrategyKind};

const FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
    "8/4P3/8/8/8/8/k7/4K3 w - - 0 1",
    "4k3/8/8/8/8/8/K3p3/8 b - - 0 1",
    "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
];

/// Puts all the mass on one (from, to) pair.
fn one_hot(from: Square, to: Square) -> Arc<dyn Predictor> {
    let idx = move_index(from, to).expect("distinct squares");
    Arc::new(move |_: &BoardTensor| -> anyhow::Result<Vec<f32>> {
        let mut v = vec![0.0f32; POLICY_SIZE];
        v[idx] = 1.0;
        Ok(v)
    })
}

#[test]
fn every_strategy_returns_a_legal_move() {
    let model: Arc<dyn Predictor> = Arc::new(LinearPolicy::random(7));
    let configs = [
        StrategyConfig::Random,
        StrategyConfig::Minimax { depth: 2 },
        StrategyConfig::Model { predictor: model },
    ];
    for fen in FENS {
        let pos = Position::from_fen(fen).unwrap();
        for cfg in &configs {
            let mut s = Strategy::new(cfg, Some(17));
            let before = pos.to_fen();
            let mv = s.generate_move(&pos).unwrap_or_else(|e| panic!("{} failed on {fen}: {e}", s.name()));
            assert!(pos.legal_moves().contains(&mv), "{} returned illegal {} on {fen}", s.name(), mv);
            assert_eq!(pos.to_fen(), before, "input position must not change");
        }
    }
}

#[test]
fn random_strategy_covers_many_moves() {
    let pos = Position::startpos();
    let mut s = RandomStrategy::new(Some(4));
    let picks: std::collections::HashSet<String> = (0..200).map(|_| pos.move_to_uci(s.generate_move(&pos).unwrap())).collect();
    assert!(picks.len() > 10, "only {} distinct moves", picks.len());
}

#[test]
fn model_picks_the_most_probable_legal_move() {
    let pos = Position::startpos();
    let mut s = ModelStrategy::new(one_hot(Square::G1, Square::F3));
    let mv = s.generate_move(&pos).unwrap();
    assert_eq!(pos.move_to_uci(mv), "g1f3");
}

#[test]
fn model_scores_castling_by_king_destination() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mut s = ModelStrategy::new(one_hot(Square::E1, Square::G1));
    let mv = s.generate_move(&pos).unwrap();
    assert_eq!(pos.move_to_uci(mv), "e1g1");
    assert!(pos.legal_moves().contains(&mv));
}

#[test]
fn model_promotes_to_queen() {
    let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    let mut s = ModelStrategy::new(one_hot(Square::E7, Square::E8));
    let mv = s.generate_move(&pos).unwrap();
    assert_eq!((mv.from, mv.to, mv.promotion), (Square::E7, Square::E8, Some(Piece::Queen)));
}

#[test]
fn short_or_nan_predictions_count_as_zero() {
    let pos = Position::startpos();
    // Ten entries only, none of them a legal move.
    let short: Arc<dyn Predictor> = Arc::new(|_: &BoardTensor| -> anyhow::Result<Vec<f32>> { Ok(vec![0.5; 10]) });
    let mut s = ModelStrategy::new(short);
    let mv = s.generate_move(&pos).unwrap();
    assert!(pos.legal_moves().contains(&mv));

    let e4 = move_index(Square::E2, Square::E4).unwrap();
    let mut probs = vec![f32::NAN; POLICY_SIZE];
    probs[e4] = 0.01;
    let scored = legal_move_probabilities(&pos, &probs);
    assert_eq!(scored.len(), 20);
    assert!(scored.iter().all(|(_, p)| !p.is_nan()));
    assert_eq!(best_by_probability(&scored).map(|m| pos.move_to_uci(m)), Some("e2e4".to_string()));
}

#[test]
fn predictor_failure_is_reported() {
    let failing: Arc<dyn Predictor> = Arc::new(|_: &BoardTensor| -> anyhow::Result<Vec<f32>> { Err(anyhow!("device lost")) });
    let mut s = ModelStrategy::new(failing);
    assert!(matches!(s.generate_move(&Position::startpos()), Err(EngineError::Predictor(_))));
}

#[test]
fn config_from_kind() {
    let cfg = StrategyConfig::from_kind(StrategyKind::Minimax, 3, None).unwrap();
    assert!(matches!(cfg, StrategyConfig::Minimax { depth: 3 }));
    assert_eq!(StrategyConfig::from_kind(StrategyKind::Random, 3, None).unwrap().kind(), StrategyKind::Random);
    assert!(StrategyConfig::from_kind(StrategyKind::Model, 3, None).is_err());
    assert!(StrategyConfig::from_kind(StrategyKind::Model, 3, Some(std::path::Path::new("/nonexistent/policy.bin"))).is_err());
}
