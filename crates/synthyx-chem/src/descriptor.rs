//! Named scalar descriptors computed by the chemistry toolkit.

use serde::{Deserialize, Serialize};

/// Physicochemical and structural descriptors the oracles consume.
/// Count-valued descriptors are reported as floats for uniformity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Descriptor {
    /// Octanol-water partition coefficient.
    LogP,
    /// Topological polar surface area.
    Tpsa,
    /// Bertz structural complexity index.
    BertzComplexity,
    /// Quantitative estimate of drug-likeness.
    Qed,
    AromaticRingCount,
    RingCount,
    SpiroAtomCount,
    BridgeheadAtomCount,
    /// Chiral centers, unassigned ones included.
    ChiralCenterCount,
    /// Heavy (non-hydrogen) atom count.
    HeavyAtomCount,
    /// Atom count, hydrogens included.
    TotalAtomCount,
    /// Number of rings with more than eight atoms.
    MacrocycleCount,
    /// Size of the largest ring.
    LargestRingSize,
}
