/// Display framing — axis ranges computed from the visible series.

use crate::data::spectrum::SpectrumCollection;

/// Margin applied on each side, as a fraction of the unpadded span.
pub const RANGE_PADDING: f64 = 0.05;

/// The pair of axis ranges framing the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

/// Compute the viewport framing every visible series.
///
/// X extrema come from the records' cached wavelength ranges; y extrema
/// scan the reflectance columns. Both axes get a 5 % margin, but the y
/// range is then clamped to [0, 1], the physical bounds of reflectance.
///
/// Returns `None` when nothing is visible; the caller keeps its previous
/// viewport rather than collapsing the view.
pub fn frame_visible(collection: &SpectrumCollection) -> Option<Viewport> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut any = false;

    for (_, record) in collection.visible_records() {
        any = true;
        let (w_min, w_max) = record.wavelength_range();
        x_min = x_min.min(w_min);
        x_max = x_max.max(w_max);
        for &r in record.reflectances() {
            y_min = y_min.min(r);
            y_max = y_max.max(r);
        }
    }
    if !any {
        return None;
    }

    let pad_x = RANGE_PADDING * (x_max - x_min);
    let pad_y = RANGE_PADDING * (y_max - y_min);
    Some(Viewport {
        x_range: (x_min - pad_x, x_max + pad_x),
        y_range: ((y_min - pad_y).max(0.0), (y_max + pad_y).min(1.0)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_empty_collection_yields_no_viewport() {
        let collection = SpectrumCollection::new();
        assert!(frame_visible(&collection).is_none());
    }

    #[test]
    fn test_all_hidden_yields_no_viewport() {
        let mut collection = SpectrumCollection::new();
        collection
            .add_series(vec![1.0, 2.0], vec![0.2, 0.3], "a.dpt")
            .unwrap();
        collection.set_visible(0, false);
        assert!(frame_visible(&collection).is_none());
    }

    #[test]
    fn test_y_range_padded_then_clamped() {
        let mut collection = SpectrumCollection::new();
        collection
            .add_series(
                vec![1.0, 2.0, 3.0, 4.0],
                vec![0.1, 0.4, 0.25, 0.3],
                "a.dpt",
            )
            .unwrap();
        let vp = frame_visible(&collection).unwrap();
        // pad = 0.05 * (0.4 - 0.1) = 0.015
        assert!(approx(vp.y_range.0, 0.085));
        assert!(approx(vp.y_range.1, 0.415));
    }

    #[test]
    fn test_y_clamp_hits_physical_bounds() {
        let mut collection = SpectrumCollection::new();
        collection
            .add_series(vec![1.0, 2.0], vec![0.01, 0.99], "a.dpt")
            .unwrap();
        let vp = frame_visible(&collection).unwrap();
        // padding would push past [0, 1]; the clamp wins
        assert_eq!(vp.y_range, (0.0, 1.0));
    }

    #[test]
    fn test_x_range_spans_visible_union_with_margin() {
        let mut collection = SpectrumCollection::new();
        collection
            .add_series(vec![2.0, 8.0], vec![0.2, 0.3], "a.dpt")
            .unwrap();
        collection
            .add_series(vec![5.0, 12.0], vec![0.25, 0.35], "b.dpt")
            .unwrap();
        let vp = frame_visible(&collection).unwrap();
        let pad = 0.05 * 10.0;
        assert!(approx(vp.x_range.0, 2.0 - pad));
        assert!(approx(vp.x_range.1, 12.0 + pad));
    }

    #[test]
    fn test_hidden_series_excluded_from_extrema() {
        let mut collection = SpectrumCollection::new();
        collection
            .add_series(vec![1.0, 5.0], vec![0.2, 0.3], "a.dpt")
            .unwrap();
        collection
            .add_series(vec![0.5, 20.0], vec![0.0, 1.0], "b.dpt")
            .unwrap();
        collection.set_visible(1, false);
        let vp = frame_visible(&collection).unwrap();
        let pad = 0.05 * 4.0;
        assert!(approx(vp.x_range.0, 1.0 - pad));
        assert!(approx(vp.x_range.1, 5.0 + pad));
        assert!(vp.y_range.1 < 0.5);
    }

    #[test]
    fn test_zero_span_data_gets_zero_padding() {
        let mut collection = SpectrumCollection::new();
        collection
            .add_series(vec![3.0], vec![0.5], "point.dpt")
            .unwrap();
        let vp = frame_visible(&collection).unwrap();
        assert_eq!(vp.x_range, (3.0, 3.0));
        assert_eq!(vp.y_range, (0.5, 0.5));
    }

    #[test]
    fn test_deterministic_over_visible_set() {
        let mut collection = SpectrumCollection::new();
        collection
            .add_series(vec![1.0, 2.0], vec![0.2, 0.3], "a.dpt")
            .unwrap();
        let first = frame_visible(&collection).unwrap();
        // Toggling an unrelated flag back and forth must not change framing
        collection.set_visible(0, false);
        collection.set_visible(0, true);
        assert_eq!(frame_visible(&collection).unwrap(), first);
    }
}
