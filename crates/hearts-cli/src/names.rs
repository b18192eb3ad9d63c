use rand::Rng;
use rand::seq::SliceRandom;

const NAME_POOL: [&str; 19] = [
    "Adam", "Ahmet", "Alessandro", "Alexandre", "Alfie", "Daniel", "Efaz", "Isaac", "Jess",
    "Johannes", "Matt", "Mercy", "Patrick", "Rahnel", "Shaeera", "Taha", "Tobi", "Valeria",
    "Will",
];

/// Draws `count` distinct names from the pool, skipping `taken`.
pub fn pick_names<R: Rng + ?Sized>(rng: &mut R, count: usize, taken: Option<&str>) -> Vec<String> {
    let available: Vec<&str> = NAME_POOL
        .iter()
        .copied()
        .filter(|name| Some(*name) != taken)
        .collect();
    available
        .choose_multiple(rng, count)
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::pick_names;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn names_are_distinct_and_skip_taken() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let names = pick_names(&mut rng, 3, Some("Alfie"));
            assert_eq!(names.len(), 3);
            assert!(!names.iter().any(|name| name == "Alfie"));
            assert_eq!(names.iter().collect::<HashSet<_>>().len(), 3);
        }
    }

    #[test]
    fn seeded_draw_is_repeatable() {
        let a = pick_names(&mut StdRng::seed_from_u64(5), 4, None);
        let b = pick_names(&mut StdRng::seed_from_u64(5), 4, None);
        assert_eq!(a, b);
    }
}
