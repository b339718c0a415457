//! # Program Images
//!
//! A program image ("scroll") is a flat sequence of big-endian 32-bit words.
//! There is no header; the whole image becomes block 0.
//!
//! ```text
//! Offset  Size  Field
//! ──────────────────────────────
//! 0x00    4     word 0 (big-endian)
//! 0x04    4     word 1
//! ...
//! ```

use crate::error::{Result, UmError};
use crate::instruction::Instruction;
use crate::{Word, WORD_BYTES};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

/// A loaded program image
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Words of block 0
    pub code: Vec<Word>,
}

impl Program {
    /// Create a program from raw words
    pub fn new(code: Vec<Word>) -> Self {
        Self { code }
    }

    /// Create a program by encoding typed instructions
    pub fn from_instructions(instructions: &[Instruction]) -> Self {
        Self {
            code: instructions.iter().map(Instruction::encode).collect(),
        }
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Check if program is empty
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Serialize to image bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.code.len() * WORD_BYTES);
        for &word in &self.code {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    /// Deserialize from image bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % WORD_BYTES != 0 {
            return Err(UmError::MalformedImage { len: bytes.len() });
        }

        let code = bytes
            .chunks_exact(WORD_BYTES)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Self { code })
    }

    /// Read an image file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Write an image file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// SHA-256 of the image bytes
    pub fn checksum(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for &word in &self.code {
            hasher.update(word.to_be_bytes());
        }
        hasher.finalize().into()
    }

    /// Hex form of [`Program::checksum`]
    pub fn checksum_hex(&self) -> String {
        self.checksum().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl From<Vec<Word>> for Program {
    fn from(code: Vec<Word>) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Universal Machine Program")?;
        writeln!(f, "  Words:       {}", self.code.len())?;
        writeln!(f, "  Bytes:       {}", self.code.len() * WORD_BYTES)?;
        writeln!(f, "  SHA-256:     {}", self.checksum_hex())?;
        Ok(())
    }
}
