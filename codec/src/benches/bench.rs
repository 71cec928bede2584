use criterion::criterion_main;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};


criterion_main!(sequence::benches, record::benches);

canon_codec::record! {
    /// A mixed record exercising scalars, sequences and optionals.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Entry {
        pub id: u64,
        pub name: Vec<u8>,
        pub score: f64,
        pub flags: [bool; 8],
        pub parent: Option<u32>,
        pub samples: Vec<i32>,
    }
}

/// Generates `count` entries from a fixed seed.
fn random_entries(count: usize) -> Vec<Entry> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..count)
        .map(|_| {
            let mut name = vec![0u8; rng.gen_range(0..32)];
            rng.fill_bytes(&mut name);
            let samples = (0..rng.gen_range(0..64)).map(|_| rng.gen()).collect();
            Entry {
                id: rng.gen(),
                name,
                score: rng.gen(),
                flags: rng.gen(),
                parent: rng.gen::<bool>().then(|| rng.gen()),
                samples,
            }
        })
        .collect()
}
