use alloc::vec::Vec;

/// Per-pillar properties from a SOL file. Bits other than the three
/// named ones are kept but have no known meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PillarFlags(pub u8);

impl PillarFlags {
    pub const COLLISION: u8 = 0x01;
    pub const COLLISION_RANGE: u8 = 0x04;
    pub const TRANSPARENCY: u8 = 0x08;

    /// Blocks players and monsters.
    pub fn is_collision(self) -> bool {
        self.0 & Self::COLLISION != 0
    }

    /// Blocks missiles and monster summoning.
    pub fn is_collision_range(self) -> bool {
        self.0 & Self::COLLISION_RANGE != 0
    }

    pub fn allows_transparency(self) -> bool {
        self.0 & Self::TRANSPARENCY != 0
    }
}

/// Parse a SOL file: one flag byte per pillar.
pub fn parse_sol(data: &[u8]) -> Vec<PillarFlags> {
    data.iter().copied().map(PillarFlags).collect()
}
