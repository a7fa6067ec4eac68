//! Component subset regression test
//!
//! Run with:
//! ```
//! cargo test -p docseg-region --test subset_reg
//! ```

use docseg_core::{Box, Polygon};
use docseg_region::{ComponentCollection, ExtractOptions, find_components};
use docseg_test::{RegParams, ascii_raster, filled_rects};

fn boxes(ccs: &ComponentCollection) -> Vec<Box> {
    ccs.iter().map(|cc| cc.bounds()).collect()
}

#[test]
fn subset_outline_reg() {
    let mut rp = RegParams::new("subset_outline");

    // Right triangle with legs along the axes; hypotenuse x + y = 20
    let triangle = Polygon::from_points(vec![(0, 0), (20, 0), (0, 20)]).unwrap();
    let img = filled_rects(
        30,
        30,
        &[
            (2, 2, 3, 3),   // well inside
            (12, 5, 6, 2),  // crosses the hypotenuse
            (22, 22, 3, 3), // outside
            (0, 15, 2, 5),  // touches the hypotenuse at (0, 19)..(1, 19)
        ],
    )
    .unwrap();
    let ccs = find_components(&img, &ExtractOptions::new()).unwrap();
    rp.compare_values(4.0, ccs.len() as f64, 0.0);

    let full = ccs.create_subset(&triangle, 0, true).unwrap();
    rp.compare_boxes(
        &[Box::new(2, 2, 3, 3).unwrap(), Box::new(0, 15, 2, 5).unwrap()],
        &boxes(&full),
    );
    for cc in &full {
        for run in cc.runs() {
            assert!(triangle_contains(run.x1(), run.row()));
            assert!(triangle_contains(run.x2(), run.row()));
        }
    }

    let partial = ccs.create_subset(&triangle, 0, false).unwrap();
    rp.compare_boxes(
        &[
            Box::new(2, 2, 3, 3).unwrap(),
            Box::new(12, 5, 6, 2).unwrap(),
            Box::new(0, 15, 2, 5).unwrap(),
        ],
        &boxes(&partial),
    );

    // Clones survive changes to the source
    let mut source = ccs;
    while !source.is_empty() {
        source.delete_at(0).unwrap();
    }
    full.check_invariants().unwrap();
    rp.compare_values(2.0, full.len() as f64, 0.0);
    rp.compare_values(0.0, full.iter().filter(|cc| !cc.neighbours().is_empty()).count() as f64, 0.0);

    assert!(rp.cleanup());
}

fn triangle_contains(x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && x + y <= 20
}

#[test]
fn subset_noise_filter_reg() {
    let mut rp = RegParams::new("subset_noise");

    // Three letters plus specks of area 1, 2 and 6
    let img = filled_rects(
        60,
        20,
        &[
            (2, 2, 4, 8),
            (10, 2, 5, 8),
            (20, 2, 3, 6),
            (30, 15, 1, 1),
            (35, 15, 2, 1),
            (40, 15, 3, 2),
        ],
    )
    .unwrap();
    let ccs = find_components(&img, &ExtractOptions::new()).unwrap();
    rp.compare_values(6.0, ccs.len() as f64, 0.0);

    // Only components with area > 10 enter the average
    rp.compare_values((32.0 + 40.0 + 18.0) / 3.0, ccs.average_area(10), 1e-12);

    let page = Polygon::from_box(&Box::new(0, 0, 60, 20).unwrap());
    let letters = ccs.create_subset(&page, 10, true).unwrap();
    rp.compare_boxes(
        &[
            Box::new(2, 2, 4, 8).unwrap(),
            Box::new(10, 2, 5, 8).unwrap(),
            Box::new(20, 2, 3, 6).unwrap(),
        ],
        &boxes(&letters),
    );

    assert!(rp.cleanup());
}

#[test]
fn subset_inside_component_reg() {
    let mut rp = RegParams::new("subset_inside");

    // A ring around a separate dot
    let page = ascii_raster(&[
        "#######",
        "#.....#",
        "#.#...#",
        "#.....#",
        "#######",
    ])
    .unwrap();
    let ccs = find_components(&page, &ExtractOptions::new()).unwrap();
    rp.compare_values(2.0, ccs.len() as f64, 0.0);
    let ring = ccs.get(0).unwrap();

    // Marks found in a 5x3 crop taken at (1, 1); only those landing on the
    // ring's own pixels qualify
    let crop = ascii_raster(&[
        "#....",
        ".....",
        "....#",
    ])
    .unwrap();
    let marks = find_components(&crop, &ExtractOptions::new()).unwrap();
    let on_ring = marks.create_subset_inside(&ring, 1, 1).unwrap();
    rp.compare_values(0.0, on_ring.len() as f64, 0.0);

    // The same marks shifted onto the frame
    let on_ring = marks.create_subset_inside(&ring, 0, 0).unwrap();
    rp.compare_boxes(&[Box::from_extent(0, 0, 0, 0)], &boxes(&on_ring));

    assert!(rp.cleanup());
}
