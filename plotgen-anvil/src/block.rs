use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// Largest sub-variant a block can carry (4 bits).
pub const MAX_META: u8 = 0x0f;

/// A placeable material: numeric type id plus its sub-variant.
///
/// The generator never interprets these, it only places them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Block {
    pub id: u16,
    pub meta: u8,
}

impl Block {
    pub const AIR: Block = Block::new(0, 0);
    pub const GRASS: Block = Block::new(2, 0);
    pub const DIRT: Block = Block::new(3, 0);
    pub const PLANKS: Block = Block::new(5, 0);
    pub const BEDROCK: Block = Block::new(7, 0);
    pub const STONE_SLAB: Block = Block::new(44, 0);

    /// `meta` above 15 is a caller bug; release builds keep only its low 4 bits.
    pub const fn new(id: u16, meta: u8) -> Self {
        debug_assert!(meta <= MAX_META, "block variant out of range");
        Self { id, meta: meta & MAX_META }
    }

    pub fn is_air(&self) -> bool {
        self.id == 0
    }
}

impl FromStr for Block {
    type Err = anyhow::Error;

    /// Parses `"<id>:<variant>"`; the variant may be omitted.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (id, meta) = match s.split_once(':') {
            Some((id, meta)) => (id.trim(), Some(meta.trim())),
            None => (s, None),
        };

        let id: u16 = id
            .parse()
            .with_context(|| format!("invalid block id in {s:?}"))?;
        let meta: u8 = match meta {
            Some(meta) => meta
                .parse()
                .with_context(|| format!("invalid block variant in {s:?}"))?,
            None => 0,
        };
        if meta > MAX_META {
            bail!("block variant {meta} out of range in {s:?}");
        }

        Ok(Block::new(id, meta))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_and_variant() {
        let block: Block = "236:15".parse().unwrap();
        assert_eq!(block, Block::new(236, 15));
        assert_eq!(block.to_string(), "236:15");
    }

    #[test]
    fn test_parse_without_variant() {
        assert_eq!("2".parse::<Block>().unwrap(), Block::GRASS);
        assert_eq!(" 44 : 0 ".parse::<Block>().unwrap(), Block::STONE_SLAB);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Block>().is_err());
        assert!("planks".parse::<Block>().is_err());
        assert!("5:oak".parse::<Block>().is_err());
        assert!("-1:0".parse::<Block>().is_err());
        assert!("5:16".parse::<Block>().is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "block variant out of range")]
    fn test_new_rejects_wide_variant() {
        let _ = Block::new(5, 16);
    }

    #[test]
    fn test_air() {
        assert!(Block::AIR.is_air());
        assert!(Block::default().is_air());
        assert!(!Block::BEDROCK.is_air());
    }
}
