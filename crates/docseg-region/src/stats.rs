//! Aggregate component statistics
//!
//! Averages skip components whose bounding-box area does not exceed a
//! noise threshold; pass 0 to include everything non-empty.

use crate::collection::ComponentCollection;
use crate::component::ComponentView;

impl ComponentCollection {
    fn average_of(&self, noise_filter: u64, f: impl Fn(&ComponentView<'_>) -> f64) -> f64 {
        let (sum, count) = self
            .iter()
            .filter(|cc| cc.area() > noise_filter)
            .fold((0.0, 0u64), |(sum, count), cc| (sum + f(&cc), count + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    /// Mean bounding-box width of components with `area > noise_filter`.
    ///
    /// Returns 0.0 when no component qualifies.
    pub fn average_width(&self, noise_filter: u64) -> f64 {
        self.average_of(noise_filter, |cc| f64::from(cc.width()))
    }

    /// Mean bounding-box height of components with `area > noise_filter`.
    pub fn average_height(&self, noise_filter: u64) -> f64 {
        self.average_of(noise_filter, |cc| f64::from(cc.height()))
    }

    /// Mean bounding-box area of components with `area > noise_filter`.
    pub fn average_area(&self, noise_filter: u64) -> f64 {
        self.average_of(noise_filter, |cc| cc.area() as f64)
    }

    /// Number of components per [`size`](crate::ConnectedComponent::size)
    /// value; index `s` counts components with `size() == s`.
    ///
    /// Empty for an empty collection.
    pub fn size_histogram(&self) -> Vec<u32> {
        let max = self.iter().map(|cc| cc.size()).max();
        let Some(max) = max else {
            return Vec::new();
        };
        let mut histogram = vec![0u32; max as usize + 1];
        for cc in self.iter() {
            histogram[cc.size() as usize] += 1;
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use crate::collection::ComponentCollection;

    /// Components given as (x, y, w, h) boxes filled with runs.
    fn rects(rects: &[(i32, i32, i32, i32)]) -> ComponentCollection {
        let mut ccs = ComponentCollection::new();
        for &(x, y, w, h) in rects {
            let id = ccs.add_component().unwrap();
            for row in y..y + h {
                ccs.add_run(id, row, x, x + w - 1).unwrap();
            }
        }
        ccs
    }

    #[test]
    fn test_averages() {
        let ccs = rects(&[(0, 0, 2, 4), (10, 0, 4, 2), (20, 0, 1, 1)]);
        assert_eq!(ccs.average_width(0), 7.0 / 3.0);
        assert_eq!(ccs.average_height(0), 7.0 / 3.0);
        assert_eq!(ccs.average_area(0), 17.0 / 3.0);
        // The 1x1 dot is noise
        assert_eq!(ccs.average_width(1), 3.0);
        assert_eq!(ccs.average_area(1), 8.0);
    }

    #[test]
    fn test_averages_empty() {
        let ccs = rects(&[(0, 0, 1, 1)]);
        assert_eq!(ccs.average_area(5), 0.0);
        assert_eq!(ComponentCollection::new().average_width(0), 0.0);
    }

    #[test]
    fn test_size_histogram() {
        // Sizes: sqrt(1)=1, sqrt(8)=2, sqrt(9)=3, sqrt(4)=2
        let ccs = rects(&[(0, 0, 1, 1), (5, 0, 2, 4), (10, 0, 3, 3), (20, 0, 2, 2)]);
        assert_eq!(ccs.size_histogram(), vec![0, 1, 2, 1]);
        assert!(ComponentCollection::new().size_histogram().is_empty());
    }
}
