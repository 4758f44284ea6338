//! Byte layout helpers shared by every proof's `to_bytes`/`from_bytes`.
//!
//! Points are 32-byte compressed, scalars and challenges 32-byte big-endian.
//! Variable-length vectors carry a big-endian `u32` count in front. The
//! reader is strict: trailing bytes after the last field are an error.

use crate::config::{CHALLENGE_LEN, MAX_VECTOR_LEN, POINT_ENCODED_LEN, SCALAR_ENCODED_LEN};
use crate::curve::{scalar_from_canonical_bytes, scalar_to_bytes, EcPoint, Scalar};
use crate::error::{CryptoError, Result};

use super::transcript::Challenge;

#[derive(Default)]
pub(crate) struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    pub fn point(&mut self, p: &EcPoint) -> &mut Self {
        self.buf.extend_from_slice(&p.to_bytes());
        self
    }

    pub fn points(&mut self, ps: &[EcPoint]) -> &mut Self {
        for p in ps {
            self.point(p);
        }
        self
    }

    pub fn scalar(&mut self, s: &Scalar) -> &mut Self {
        self.buf.extend_from_slice(&scalar_to_bytes(s));
        self
    }

    pub fn scalars(&mut self, ss: &[Scalar]) -> &mut Self {
        for s in ss {
            self.scalar(s);
        }
        self
    }

    pub fn challenge(&mut self, c: &Challenge) -> &mut Self {
        self.buf.extend_from_slice(c.as_bytes());
        self
    }

    /// Write a vector length as a big-endian `u32`. Provers cap arity at
    /// `MAX_VECTOR_LEN`, so every proof they build fits the prefix.
    pub fn count(&mut self, n: usize) -> &mut Self {
        debug_assert!(n <= MAX_VECTOR_LEN, "vector length {n} overflows the u32 prefix");
        self.buf.extend_from_slice(&(n as u32).to_be_bytes());
        self
    }

    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

pub(crate) struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.data.len());
        match end {
            Some(end) => {
                let out = &self.data[self.pos..end];
                self.pos = end;
                Ok(out)
            }
            None => Err(truncated(what)),
        }
    }

    pub fn point(&mut self) -> Result<EcPoint> {
        EcPoint::from_bytes(self.take(POINT_ENCODED_LEN, "point")?)
    }

    pub fn points(&mut self, n: usize) -> Result<Vec<EcPoint>> {
        (0..n).map(|_| self.point()).collect()
    }

    pub fn scalar(&mut self) -> Result<Scalar> {
        scalar_from_canonical_bytes(self.take(SCALAR_ENCODED_LEN, "scalar")?)
    }

    pub fn scalars(&mut self, n: usize) -> Result<Vec<Scalar>> {
        (0..n).map(|_| self.scalar()).collect()
    }

    pub fn challenge(&mut self) -> Result<Challenge> {
        Challenge::from_bytes(self.take(CHALLENGE_LEN, "challenge")?)
    }

    /// Read a vector length and sanity-check it against the bytes left, so
    /// a forged count cannot trigger a huge allocation.
    pub fn count(&mut self, min_item_len: usize) -> Result<usize> {
        let raw = self.take(4, "length prefix")?;
        let n = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize;
        let remaining = self.data.len() - self.pos;
        if n.saturating_mul(min_item_len) > remaining {
            return Err(truncated("vector"));
        }
        Ok(n)
    }

    pub fn finish(self) -> Result<()> {
        if self.pos != self.data.len() {
            return Err(CryptoError::MalformedEncoding(format!(
                "{} trailing bytes after proof",
                self.data.len() - self.pos
            )));
        }
        Ok(())
    }
}

fn truncated(what: &str) -> CryptoError {
    let msg = format!("truncated input while reading {what}");
    match what {
        "point" => CryptoError::InvalidPoint(msg),
        "scalar" | "challenge" => CryptoError::InvalidScalar(msg),
        _ => CryptoError::MalformedEncoding(msg),
    }
}
