use anyhow::{bail, Context, Result};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::encoder::{BoardTensor, BOARD_TENSOR_LEN, POLICY_SIZE};

/// Opaque move predictor: board planes in, one probability per entry of the
/// 64x63 (from, to) enumeration out.
pub trait Predictor: Send + Sync {
    fn infer(&self, input: &BoardTensor) -> Result<Vec<f32>>;
}

impl<F> Predictor for F
where
    F: Fn(&BoardTensor) -> Result<Vec<f32>> + Send + Sync,
{
    fn infer(&self, input: &BoardTensor) -> Result<Vec<f32>> { self(input) }
}

const L_MAGIC: &[u8; 8] = b"MVPKLIN1";

/// Single dense layer over the board planes followed by a softmax.
#[derive(Debug, Clone)]
pub struct LinearPolicy {
    weights: Vec<f32>, // POLICY_SIZE x BOARD_TENSOR_LEN, output-major
    bias: Vec<f32>,    // POLICY_SIZE
}

impl LinearPolicy {
    pub fn new(weights: Vec<f32>, bias: Vec<f32>) -> Result<Self> {
        if weights.len() != POLICY_SIZE * BOARD_TENSOR_LEN {
            bail!("expected {} weights, got {}", POLICY_SIZE * BOARD_TENSOR_LEN, weights.len());
        }
        if bias.len() != POLICY_SIZE {
            bail!("expected {} biases, got {}", POLICY_SIZE, bias.len());
        }
        Ok(Self { weights, bias })
    }

    pub fn zeros() -> Self {
        Self { weights: vec![0.0; POLICY_SIZE * BOARD_TENSOR_LEN], bias: vec![0.0; POLICY_SIZE] }
    }

    /// Small uniform weights, reproducible from `seed`.
    pub fn random(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let weights = (0..POLICY_SIZE * BOARD_TENSOR_LEN).map(|_| rng.gen_range(-0.05f32..0.05)).collect();
        let bias = (0..POLICY_SIZE).map(|_| rng.gen_range(-0.05f32..0.05)).collect();
        Self { weights, bias }
    }

    pub fn set_bias(&mut self, idx: usize, value: f32) {
        if let Some(b) = self.bias.get_mut(idx) { *b = value; }
    }

    pub fn logits(&self, input: &BoardTensor) -> Vec<f32> {
        let mut out = self.bias.clone();
        // Inputs are one-hot occupancy, at most 32 active cells.
        for (i, &x) in input.as_slice().iter().enumerate() {
            if x == 0.0 { continue; }
            for (o, v) in out.iter_mut().enumerate() {
                *v += self.weights[o * BOARD_TENSOR_LEN + i] * x;
            }
        }
        out
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        // magic: 8 bytes b"MVPKLIN1"
        // u32 input_dim, u32 output_dim
        // f32 weights[output*input], f32 bias[output], all little-endian
        let f = File::open(&path).with_context(|| format!("open policy file: {}", path.as_ref().display()))?;
        let mut r = BufReader::new(f);
        let mut magic = [0u8; 8];
        r.read_exact(&mut magic).context("read magic")?;
        if &magic != L_MAGIC { bail!("bad policy file magic"); }
        let mut b4 = [0u8; 4];
        r.read_exact(&mut b4).context("read input_dim")?;
        let input_dim = u32::from_le_bytes(b4) as usize;
        r.read_exact(&mut b4).context("read output_dim")?;
        let output_dim = u32::from_le_bytes(b4) as usize;
        if input_dim != BOARD_TENSOR_LEN || output_dim != POLICY_SIZE {
            bail!("policy dims {input_dim}x{output_dim} do not match {BOARD_TENSOR_LEN}x{POLICY_SIZE}");
        }

        fn read_f32s(r: &mut impl Read, n: usize) -> Result<Vec<f32>> {
            let mut buf = vec![0u8; n * 4];
            r.read_exact(&mut buf)?;
            Ok(buf.chunks_exact(4).map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect())
        }

        let weights = read_f32s(&mut r, output_dim * input_dim).context("read weights")?;
        let bias = read_f32s(&mut r, output_dim).context("read bias")?;
        info!("loaded linear policy from {}", path.as_ref().display());
        Self::new(weights, bias)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let f = File::create(&path).with_context(|| format!("create policy file: {}", path.as_ref().display()))?;
        let mut w = BufWriter::new(f);
        w.write_all(L_MAGIC)?;
        w.write_all(&(BOARD_TENSOR_LEN as u32).to_le_bytes())?;
        w.write_all(&(POLICY_SIZE as u32).to_le_bytes())?;
        for v in self.weights.iter().chain(self.bias.iter()) {
            w.write_all(&v.to_le_bytes())?;
        }
        w.flush()?;
        Ok(())
    }
}

impl Predictor for LinearPolicy {
    fn infer(&self, input: &BoardTensor) -> Result<Vec<f32>> {
        let logits = self.logits(input);
        let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let mut probs: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
        let sum: f32 = probs.iter().sum();
        if sum > 0.0 { for p in &mut probs { *p /= sum; } }
        Ok(probs)
    }
}
