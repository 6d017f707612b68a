use crate::Rolls;

/// Draw up to `k` items without replacement (partial Fisher–Yates).
///
/// Returns `min(k, items.len())` items in draw order, consuming one roll per item
/// drawn. Each subset of size `k` is equally likely.
pub fn sample_without_replacement<T: Clone, R: Rolls + ?Sized>(
    items: &[T],
    k: usize,
    rng: &mut R,
) -> Vec<T> {
    let mut pool: Vec<T> = items.to_vec();
    let take = k.min(pool.len());
    for i in 0..take {
        let last = (pool.len() - 1) as u32;
        let j = rng.roll_range(i as u32, last) as usize;
        pool.swap(i, j);
    }
    pool.truncate(take);
    tracing::trace!(available = items.len(), drawn = take, "sampled");
    pool
}

/// Uniform pick of one element; `None` for an empty slice.
pub fn pick_one<'a, T, R: Rolls + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let i = rng.roll_range(0, (items.len() - 1) as u32) as usize;
    items.get(i)
}
