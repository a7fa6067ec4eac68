//! Nearest-neighbour regression test
//!
//! Run with:
//! ```
//! cargo test -p docseg-region --test neighbours_reg
//! ```

use docseg_region::{ComponentId, ExtractOptions, RegionError, find_components};
use docseg_test::{RegParams, ascii_raster};

/// Four corner dots around a centre dot, collection order A B C D E:
///
/// ```text
/// A . . . B
/// . . C . .
/// D . . . E
/// ```
fn five_points() -> docseg_core::BitImage {
    let mut rows = vec!["..........."; 11];
    rows[0] = "#.........#";
    rows[5] = ".....#.....";
    rows[10] = "#.........#";
    ascii_raster(&rows).unwrap()
}

#[test]
fn neighbours_reg() {
    let mut rp = RegParams::new("neighbours");

    let img = five_points();
    let mut ccs = find_components(&img, &ExtractOptions::new()).unwrap();
    rp.compare_values(5.0, ccs.len() as f64, 0.0);
    let ids: Vec<ComponentId> = ccs.ids().to_vec();
    let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

    ccs.find_k_nearest_neighbours(1).unwrap();
    // All four corners are equally far from the centre; the first wins
    let centre = ccs.component(c).unwrap();
    rp.compare_values(1.0, centre.neighbours().len() as f64, 0.0);
    assert_eq!(centre.neighbours()[0].id, a);
    rp.compare_values(50f64.sqrt(), centre.neighbours()[0].distance, 1e-12);

    // Each corner's nearest is the centre
    for &corner in &[a, b, d, ids[4]] {
        assert_eq!(ccs.component(corner).unwrap().neighbours()[0].id, c);
    }

    // Ties at distance 10 resolve in collection order
    ccs.find_k_nearest_neighbours(3).unwrap();
    let got: Vec<ComponentId> = ccs.component(a).unwrap().neighbours().iter().map(|n| n.id).collect();
    assert_eq!(got, vec![c, b, d]);

    // Same input, same answer
    let first: Vec<Vec<ComponentId>> = ccs
        .iter()
        .map(|cc| cc.neighbours().iter().map(|n| n.id).collect())
        .collect();
    ccs.find_k_nearest_neighbours(3).unwrap();
    let second: Vec<Vec<ComponentId>> = ccs
        .iter()
        .map(|cc| cc.neighbours().iter().map(|n| n.id).collect())
        .collect();
    assert_eq!(first, second);

    // k beyond the component count is clamped
    ccs.find_k_nearest_neighbours(50).unwrap();
    rp.compare_values(4.0, ccs.get(0).unwrap().neighbours().len() as f64, 0.0);
    let distances: Vec<f64> = ccs.get(0).unwrap().neighbours().iter().map(|n| n.distance).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));

    assert!(rp.cleanup());
}

#[test]
fn neighbours_invalidation_reg() {
    let mut rp = RegParams::new("neighbours_invalidation");

    let img = five_points();
    let mut ccs = find_components(&img, &ExtractOptions::new()).unwrap();

    assert!(matches!(
        ccs.find_k_nearest_neighbours(0),
        Err(RegionError::InvalidParameters(_))
    ));

    ccs.find_k_nearest_neighbours(2).unwrap();
    rp.compare_values(10.0, ccs.iter().map(|cc| cc.neighbours().len()).sum::<usize>() as f64, 0.0);

    // Deleting a component invalidates every list, so none names it
    let victim = ccs.ids()[2];
    ccs.delete_component(victim).unwrap();
    rp.compare_values(0.0, ccs.iter().map(|cc| cc.neighbours().len()).sum::<usize>() as f64, 0.0);

    ccs.find_k_nearest_neighbours(2).unwrap();
    assert!(ccs.iter().all(|cc| cc.neighbours().iter().all(|n| n.id != victim)));

    // Merging clears them too
    let (a, b) = (ccs.ids()[0], ccs.ids()[1]);
    ccs.merge(a, b).unwrap();
    assert!(ccs.iter().all(|cc| cc.neighbours().is_empty()));

    assert!(rp.cleanup());
}
