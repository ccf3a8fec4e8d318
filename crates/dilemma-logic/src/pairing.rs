//! Round-robin pairing generation
//!
//! Every unordered pair of entrants meets exactly once. Pairs are ranked
//! colexicographically so any game's pairing can be computed from its
//! index alone.

/// Number of games in a full round-robin: C(n, 2)
pub fn calculate_game_count(participant_count: u32) -> u32 {
    let n = participant_count as u64;
    if n < 2 {
        return 0;
    }
    (n * (n - 1) / 2) as u32
}

/// All pairings `(a, b)` with `a < b`, in game-index order
pub fn generate_all_pairings(participant_count: u32) -> Vec<(u32, u32)> {
    (0..calculate_game_count(participant_count)).map(unrank_pair).collect()
}

/// Pairing for a specific game index, `None` when out of range
pub fn get_pairing_for_game(participant_count: u32, game_index: u32) -> Option<(u32, u32)> {
    if game_index >= calculate_game_count(participant_count) {
        return None;
    }
    Some(unrank_pair(game_index))
}

/// Colexicographic combination unranking: rank → (a, b) with a < b.
///
/// rank = C(b,2) + a = b*(b−1)/2 + a
fn unrank_pair(rank: u32) -> (u32, u32) {
    // Estimate b via integer floor(sqrt(1 + 8·rank))
    let val = 1u64 + 8 * rank as u64;
    let mut s = val;
    let mut t = (s + 1) / 2;
    while t < s {
        s = t;
        t = (s + val / s) / 2;
    }
    let mut b = (1 + s) / 2;

    // Correct estimate
    let rank = rank as u64;
    while b > 0 && b * (b - 1) / 2 > rank {
        b -= 1;
    }
    while (b + 1) * b / 2 <= rank {
        b += 1;
    }

    let a = rank - b * (b - 1) / 2;
    (a as u32, b as u32)
}
