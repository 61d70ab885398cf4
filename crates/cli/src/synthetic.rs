//! Synthetic instances generated by cutting a container into pieces.

use crate::dataset::ItemRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use u_packing_d3::Rotation;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 102;

/// Cuts `container` into `count` pieces that tile it exactly.
///
/// Repeatedly picks a random piece and a random axis. If the piece is longer
/// than 1 along that axis it is replaced by two pieces split at a random
/// integer offset, each turned by a random one of the six rotations. Stops
/// early, with a warning, if every piece is already a unit cube.
///
/// Each returned record has quantity 1.
pub fn generate_by_cutting(container: [u32; 3], count: usize, seed: u64) -> Vec<ItemRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pieces: Vec<[u32; 3]> = vec![container];

    while pieces.len() < count {
        if pieces.iter().all(|p| p.iter().all(|&e| e <= 1)) {
            log::warn!(
                "Container {:?} cannot be cut into {} pieces; stopping at {}",
                container,
                count,
                pieces.len()
            );
            break;
        }

        let index = rng.gen_range(0..pieces.len());
        let axis = rng.gen_range(0..3);
        let piece = pieces[index];
        if piece[axis] <= 1 {
            continue;
        }

        let split = rng.gen_range(1..piece[axis]);
        let mut first = piece;
        let mut second = piece;
        first[axis] = split;
        second[axis] = piece[axis] - split;

        pieces.remove(index);
        pieces.push(random_rotation(&mut rng, first));
        pieces.push(random_rotation(&mut rng, second));
    }

    pieces
        .into_iter()
        .map(|[l, w, h]| ItemRecord::new(f64::from(l), f64::from(w), f64::from(h), 1))
        .collect()
}

fn random_rotation(rng: &mut StdRng, piece: [u32; 3]) -> [u32; 3] {
    let rotation = Rotation::ALL[rng.gen_range(0..Rotation::ALL.len())];
    let (x, y, z) = rotation.axes();
    [piece[x], piece[y], piece[z]]
}

/// Writes records as `length,width,height,quantity` rows with a comment
/// header.
pub fn write_items_csv(path: impl AsRef<Path>, records: &[ItemRecord]) -> std::io::Result<()> {
    let mut csv = String::from("# length,width,height,quantity\n");
    for r in records {
        // Writing to a String cannot fail.
        let _ = writeln!(csv, "{},{},{},{}", r.length, r.width, r.height, r.quantity);
    }
    fs::write(path, csv)
}
