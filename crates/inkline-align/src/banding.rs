//! Line banding
//!
//! Distributes a requested line count across column segments and
//! partitions each segment's word y-centers into exactly that many
//! ordered groups. Bounded, deterministic numeric routines with no image
//! dependencies, so everything here is testable standalone.
//!
//! Two partition strategies implement the same step: quantile banding
//! (canonical) cuts the sorted y-centers into contiguous equal-mass
//! groups; iterative clustering is a 1-D k-means with percentile seeding
//! and empty-cluster re-seeding.

use inkline_core::{Rect, profile};

/// Strategy for partitioning word y-centers into line groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandingStrategy {
    /// Contiguous equal-mass cuts of the sorted y-center distribution
    #[default]
    Quantile,
    /// Iterative 1-D clustering with percentile seeding
    Cluster,
}

/// Distribute `n` lines across segments proportional to their energies,
/// using largest-remainder rounding so the allocations sum exactly to `n`.
///
/// Zero total energy falls back to an even split. Remainder ties go to
/// the lower-index segment.
pub fn allocate_lines(energies: &[f32], n: usize) -> Vec<usize> {
    if energies.is_empty() {
        return Vec::new();
    }
    let k = energies.len();
    let total: f32 = energies.iter().map(|e| e.max(0.0)).sum();

    let quotas: Vec<f32> = if total > 0.0 {
        energies
            .iter()
            .map(|e| n as f32 * e.max(0.0) / total)
            .collect()
    } else {
        vec![n as f32 / k as f32; k]
    };

    let mut alloc: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();
    let assigned: usize = alloc.iter().sum();

    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| {
        let fa = quotas[a] - quotas[a].floor();
        let fb = quotas[b] - quotas[b].floor();
        fb.total_cmp(&fa).then(a.cmp(&b))
    });
    for &i in order.iter().take(n.saturating_sub(assigned)) {
        alloc[i] += 1;
    }
    alloc
}

/// Partition words into exactly `n` ordered groups of indices
///
/// Groups are ordered by mean y; a group may be empty only when there
/// are fewer words than groups. `n == 0` returns an empty vector.
pub fn band_words(words: &[Rect], n: usize, strategy: BandingStrategy) -> Vec<Vec<usize>> {
    if n == 0 {
        return Vec::new();
    }
    if words.is_empty() {
        return vec![Vec::new(); n];
    }
    match strategy {
        BandingStrategy::Quantile => quantile_groups(words, n),
        BandingStrategy::Cluster => cluster_groups(words, n),
    }
}

/// Indices sorted by (y-center, x), the reading order within a column
fn sorted_indices(words: &[Rect]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..words.len()).collect();
    idx.sort_by_key(|&i| (words[i].center_y(), words[i].x));
    idx
}

fn quantile_groups(words: &[Rect], n: usize) -> Vec<Vec<usize>> {
    let sorted = sorted_indices(words);
    let len = sorted.len();
    let mut groups = Vec::with_capacity(n);
    for g in 0..n {
        let start = g * len / n;
        let end = (g + 1) * len / n;
        groups.push(sorted[start..end].to_vec());
    }
    groups
}

/// 1-D k-means over word y-centers.
///
/// Seeds at evenly spaced percentiles; assignment ties go to the lower
/// center index; an empty cluster steals the point farthest from its
/// current center. At most [`MAX_CLUSTER_ITERATIONS`] rounds.
fn cluster_groups(words: &[Rect], n: usize) -> Vec<Vec<usize>> {
    let ys: Vec<f32> = words.iter().map(|w| w.center_y() as f32).collect();

    let mut centers: Vec<f32> = (0..n)
        .map(|i| {
            let fract = (i as f32 + 0.5) / n as f32;
            profile::rank_value(&ys, fract).unwrap_or(0.0)
        })
        .collect();

    let mut assignment = vec![0usize; ys.len()];
    for _ in 0..MAX_CLUSTER_ITERATIONS {
        // Assignment step.
        let mut changed = false;
        for (p, &y) in ys.iter().enumerate() {
            let mut best = 0usize;
            let mut best_dist = f32::INFINITY;
            for (c, &center) in centers.iter().enumerate() {
                let dist = (y - center).abs();
                if dist < best_dist {
                    best_dist = dist;
                    best = c;
                }
            }
            if assignment[p] != best {
                assignment[p] = best;
                changed = true;
            }
        }

        // Re-seed empty clusters with the point farthest from its center.
        let mut counts = vec![0usize; n];
        for &a in &assignment {
            counts[a] += 1;
        }
        let mut reseeded = false;
        for c in 0..n {
            if counts[c] > 0 {
                continue;
            }
            // Farthest point from its current center, among clusters that
            // can spare one; the lower point index wins ties.
            let mut farthest: Option<(usize, f32)> = None;
            for (p, &y) in ys.iter().enumerate() {
                if counts[assignment[p]] <= 1 {
                    continue;
                }
                let dist = (y - centers[assignment[p]]).abs();
                match farthest {
                    Some((_, d)) if d >= dist => {}
                    _ => farthest = Some((p, dist)),
                }
            }
            if let Some((p, _)) = farthest {
                counts[assignment[p]] -= 1;
                assignment[p] = c;
                counts[c] = 1;
                centers[c] = ys[p];
                reseeded = true;
            }
        }

        // Update step.
        let mut sums = vec![0.0f32; n];
        let mut nums = vec![0usize; n];
        for (p, &a) in assignment.iter().enumerate() {
            sums[a] += ys[p];
            nums[a] += 1;
        }
        for c in 0..n {
            if nums[c] > 0 {
                centers[c] = sums[c] / nums[c] as f32;
            }
        }

        if !changed && !reseeded {
            break;
        }
    }

    // Order clusters by mean y, then emit reading-order groups.
    let mut cluster_order: Vec<usize> = (0..n).collect();
    cluster_order.sort_by(|&a, &b| centers[a].total_cmp(&centers[b]).then(a.cmp(&b)));

    let sorted = sorted_indices(words);
    let mut groups = vec![Vec::new(); n];
    for &word_idx in &sorted {
        let cluster = assignment[word_idx];
        let ordinal = cluster_order
            .iter()
            .position(|&c| c == cluster)
            .unwrap_or(0);
        groups[ordinal].push(word_idx);
    }
    groups
}

/// Maximum k-means rounds; convergence is typically immediate on the
/// well-separated distributions handwriting produces.
pub const MAX_CLUSTER_ITERATIONS: usize = 50;

#[cfg(test)]
mod tests {
    use super::*;

    fn word_at(y: i32) -> Rect {
        Rect::new_unchecked(10, y, 40, 10)
    }

    #[test]
    fn test_allocate_sums_to_n() {
        let alloc = allocate_lines(&[3.0, 2.0, 1.0], 7);
        assert_eq!(alloc.iter().sum::<usize>(), 7);
        assert_eq!(alloc.len(), 3);
    }

    #[test]
    fn test_allocate_proportional() {
        let alloc = allocate_lines(&[300.0, 100.0], 8);
        assert_eq!(alloc, vec![6, 2]);
    }

    #[test]
    fn test_allocate_largest_remainder_tie_to_lower_index() {
        // Quotas 1.5 and 1.5: the extra line goes to segment 0.
        let alloc = allocate_lines(&[1.0, 1.0], 3);
        assert_eq!(alloc, vec![2, 1]);
    }

    #[test]
    fn test_allocate_zero_energy_splits_evenly() {
        let alloc = allocate_lines(&[0.0, 0.0], 5);
        assert_eq!(alloc.iter().sum::<usize>(), 5);
        assert!(alloc[0] >= alloc[1]);
    }

    #[test]
    fn test_allocate_empty_segments() {
        assert!(allocate_lines(&[], 5).is_empty());
    }

    #[test]
    fn test_quantile_groups_equal_mass() {
        let words: Vec<Rect> = (0..9).map(|i| word_at(i * 30)).collect();
        let groups = band_words(&words, 3, BandingStrategy::Quantile);
        assert_eq!(groups.len(), 3);
        for g in &groups {
            assert_eq!(g.len(), 3);
        }
        // Ordered by mean y.
        assert!(words[groups[0][0]].y < words[groups[1][0]].y);
        assert!(words[groups[1][0]].y < words[groups[2][0]].y);
    }

    #[test]
    fn test_quantile_more_groups_than_words() {
        let words = vec![word_at(10), word_at(200)];
        let groups = band_words(&words, 5, BandingStrategy::Quantile);
        assert_eq!(groups.len(), 5);
        let total: usize = groups.iter().map(Vec::len).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_cluster_separates_clear_lines() {
        // Three tight line clusters of y-centers.
        let mut words = Vec::new();
        for &base in &[20, 120, 220] {
            for dx in 0..4 {
                words.push(Rect::new_unchecked(dx * 50, base, 40, 10));
            }
        }
        let groups = band_words(&words, 3, BandingStrategy::Cluster);
        assert_eq!(groups.len(), 3);
        for g in &groups {
            assert_eq!(g.len(), 4);
        }
        assert!(words[groups[0][0]].y < words[groups[2][0]].y);
    }

    #[test]
    fn test_cluster_outlier_gets_own_group() {
        let words = vec![word_at(50), word_at(52), word_at(48), word_at(400)];
        let groups = band_words(&words, 2, BandingStrategy::Cluster);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1], vec![3]);
    }

    #[test]
    fn test_cluster_reseeds_empty_cluster() {
        // Identical y-centers give duplicate percentile seeds, so one
        // cluster starves and must steal a point.
        let words = vec![word_at(50), word_at(50), word_at(50), word_at(50)];
        let groups = band_words(&words, 2, BandingStrategy::Cluster);
        assert_eq!(groups.len(), 2);
        assert!(!groups[0].is_empty());
        assert!(!groups[1].is_empty());
    }

    #[test]
    fn test_band_words_empty_input() {
        let groups = band_words(&[], 4, BandingStrategy::Quantile);
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_band_words_deterministic() {
        let words: Vec<Rect> = (0..20).map(|i| word_at((i * 37) % 300)).collect();
        for &strategy in &[BandingStrategy::Quantile, BandingStrategy::Cluster] {
            let a = band_words(&words, 6, strategy);
            let b = band_words(&words, 6, strategy);
            assert_eq!(a, b);
        }
    }
}
