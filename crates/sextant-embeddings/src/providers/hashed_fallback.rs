//! Hashed bag-of-words fallback provider.
//!
//! Terms are hashed into fixed-dimension buckets with a hash-derived sign,
//! weighted by term frequency, and L2-normalized. Always available.

use std::collections::HashMap;

use sextant_core::errors::SextantResult;
use sextant_core::traits::IEmbeddingProvider;

pub struct HashedFallback {
    dimensions: usize,
}

impl HashedFallback {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a 64-bit.
    fn hash_term(term: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut tf: HashMap<String, f32> = HashMap::new();
        for term in text
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| !s.is_empty())
        {
            *tf.entry(term.to_lowercase()).or_default() += 1.0;
        }

        let mut vec = vec![0.0f32; self.dimensions];
        for (term, count) in &tf {
            let h = Self::hash_term(term);
            let bucket = (h % self.dimensions as u64) as usize;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            vec[bucket] += sign * count;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashedFallback {
    fn embed(&self, text: &str) -> SextantResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}
