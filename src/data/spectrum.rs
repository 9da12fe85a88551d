/// Spectrum data model — loaded reflectance series and the ordered
/// collection that drives the plot, the legend, and the cursor readout.

use egui::Color32;
use thiserror::Error;

/// Fixed curve palette, cycled by load order.
pub const COLOR_PALETTE: [Color32; 10] = [
    Color32::from_rgb(0, 0, 255),    // blue
    Color32::from_rgb(255, 0, 0),    // red
    Color32::from_rgb(0, 150, 0),    // green
    Color32::from_rgb(255, 140, 0),  // orange
    Color32::from_rgb(148, 0, 211),  // violet
    Color32::from_rgb(0, 191, 255),  // sky blue
    Color32::from_rgb(255, 20, 147), // pink
    Color32::from_rgb(128, 128, 0),  // olive
    Color32::from_rgb(0, 128, 128),  // teal
    Color32::from_rgb(128, 0, 0),    // maroon
];

/// Why a parsed series was refused by the collection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("series has no samples")]
    Empty,
    #[error("column lengths differ ({wavelengths} wavelengths vs {reflectances} reflectances)")]
    LengthMismatch {
        wavelengths: usize,
        reflectances: usize,
    },
    #[error("wavelengths not strictly ascending at sample {index}")]
    NotAscending { index: usize },
}

/// One loaded spectrum.
///
/// The numeric series are fixed once the record is built; only `color` and
/// `visible` change afterwards. The wavelength extrema are cached at build
/// time so range checks during cursor tracking and viewport framing never
/// rescan the axis.
#[derive(Debug, Clone)]
pub struct SpectrumRecord {
    wavelengths: Vec<f64>,
    reflectances: Vec<f64>,
    range: (f64, f64),
    pub filename: String,
    pub color: Color32,
    pub visible: bool,
}

impl SpectrumRecord {
    /// Validate a parsed series and build a record.
    ///
    /// Requires at least one sample, equal column lengths, and a strictly
    /// ascending wavelength axis (the nearest-sample search assumes it).
    fn new(
        wavelengths: Vec<f64>,
        reflectances: Vec<f64>,
        filename: String,
        color: Color32,
    ) -> Result<Self, SeriesError> {
        if wavelengths.len() != reflectances.len() {
            return Err(SeriesError::LengthMismatch {
                wavelengths: wavelengths.len(),
                reflectances: reflectances.len(),
            });
        }
        if wavelengths.is_empty() {
            return Err(SeriesError::Empty);
        }
        if let Some(index) = (1..wavelengths.len()).find(|&i| wavelengths[i] <= wavelengths[i - 1])
        {
            return Err(SeriesError::NotAscending { index });
        }

        let range = (wavelengths[0], wavelengths[wavelengths.len() - 1]);
        Ok(Self {
            wavelengths,
            reflectances,
            range,
            filename,
            color,
            visible: true,
        })
    }

    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    pub fn reflectances(&self) -> &[f64] {
        &self.reflectances
    }

    /// Cached `(min, max)` of the wavelength axis.
    pub fn wavelength_range(&self) -> (f64, f64) {
        self.range
    }

    /// Whether `x` lies within the sampled wavelength range.
    pub fn covers(&self, x: f64) -> bool {
        x >= self.range.0 && x <= self.range.1
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }
}

/// Ordered registry of loaded spectra.
///
/// Insertion order is display and legend order. Records are only ever
/// removed all at once by `clear`, which also restarts the palette cycle.
#[derive(Debug, Default)]
pub struct SpectrumCollection {
    records: Vec<SpectrumRecord>,
    next_color_index: usize,
}

impl SpectrumCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parsed series as a new visible record and return its index.
    ///
    /// The next palette color is consumed only on success; a rejected series
    /// leaves the collection untouched.
    pub fn add_series(
        &mut self,
        wavelengths: Vec<f64>,
        reflectances: Vec<f64>,
        filename: impl Into<String>,
    ) -> Result<usize, SeriesError> {
        let color = COLOR_PALETTE[self.next_color_index % COLOR_PALETTE.len()];
        let record = SpectrumRecord::new(wavelengths, reflectances, filename.into(), color)?;
        self.next_color_index += 1;
        self.records.push(record);
        Ok(self.records.len() - 1)
    }

    /// Toggle display of one record. The record and its cache stay intact.
    pub fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(record) = self.records.get_mut(index) {
            record.visible = visible;
        }
    }

    pub fn set_color(&mut self, index: usize, color: Color32) {
        if let Some(record) = self.records.get_mut(index) {
            record.color = color;
        }
    }

    /// Drop every record and restart the palette cycle. This is the only
    /// removal operation; there is no single-record delete.
    pub fn clear(&mut self) {
        self.records.clear();
        self.next_color_index = 0;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SpectrumRecord> {
        self.records.get(index)
    }

    /// The reference series for snap-mode cursor tracking.
    pub fn first(&self) -> Option<&SpectrumRecord> {
        self.records.first()
    }

    /// Indices of displayed records, in insertion order.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.visible)
            .map(|(i, _)| i)
    }

    /// Displayed records with their indices, in insertion order.
    pub fn visible_records(&self) -> impl Iterator<Item = (usize, &SpectrumRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.records.iter().filter(|r| r.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> (Vec<f64>, Vec<f64>) {
        let w: Vec<f64> = (0..n).map(|i| 1.0 + i as f64).collect();
        let r: Vec<f64> = (0..n).map(|i| 0.1 * (i % 5) as f64).collect();
        (w, r)
    }

    #[test]
    fn test_add_assigns_palette_in_load_order() {
        let mut collection = SpectrumCollection::new();
        for i in 0..12 {
            let (w, r) = ramp(4);
            let idx = collection
                .add_series(w, r, format!("s{}.dpt", i))
                .expect("well-formed series should be accepted");
            assert_eq!(idx, i);
        }
        for (i, record) in (0..12).map(|i| (i, collection.get(i).unwrap())) {
            assert_eq!(
                record.color,
                COLOR_PALETTE[i % COLOR_PALETTE.len()],
                "record {} should carry palette color {}",
                i,
                i % COLOR_PALETTE.len()
            );
        }
    }

    #[test]
    fn test_clear_restarts_palette_cycle() {
        let mut collection = SpectrumCollection::new();
        for i in 0..3 {
            let (w, r) = ramp(4);
            collection.add_series(w, r, format!("s{}.dpt", i)).unwrap();
        }
        collection.clear();
        assert!(collection.is_empty());

        let (w, r) = ramp(4);
        let idx = collection.add_series(w, r, "fresh.dpt").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(collection.get(0).unwrap().color, COLOR_PALETTE[0]);
    }

    #[test]
    fn test_range_cache_matches_axis_ends() {
        let mut collection = SpectrumCollection::new();
        collection
            .add_series(vec![2.5, 3.0, 14.0], vec![0.2, 0.3, 0.1], "a.dpt")
            .unwrap();
        let record = collection.get(0).unwrap();
        assert_eq!(record.wavelength_range(), (2.5, 14.0));
        assert!(record.covers(2.5));
        assert!(record.covers(14.0));
        assert!(!record.covers(14.000001));
        assert!(!record.covers(2.4999));
    }

    #[test]
    fn test_toggle_only_touches_visibility() {
        let mut collection = SpectrumCollection::new();
        let (w, r) = ramp(5);
        collection.add_series(w.clone(), r.clone(), "a.dpt").unwrap();
        let color_before = collection.get(0).unwrap().color;

        collection.set_visible(0, false);
        let record = collection.get(0).unwrap();
        assert!(!record.visible);
        assert_eq!(record.wavelengths(), &w[..]);
        assert_eq!(record.reflectances(), &r[..]);
        assert_eq!(record.color, color_before);
        assert_eq!(record.wavelength_range(), (w[0], w[4]));
        assert_eq!(collection.visible_indices().count(), 0);

        collection.set_visible(0, true);
        assert_eq!(collection.visible_indices().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_visible_indices_keep_insertion_order() {
        let mut collection = SpectrumCollection::new();
        for i in 0..4 {
            let (w, r) = ramp(4);
            collection.add_series(w, r, format!("s{}.dpt", i)).unwrap();
        }
        collection.set_visible(1, false);
        collection.set_visible(3, false);
        assert_eq!(collection.visible_indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(collection.visible_count(), 2);
    }

    #[test]
    fn test_rejects_malformed_series_without_mutating() {
        let mut collection = SpectrumCollection::new();

        assert_eq!(
            collection.add_series(vec![], vec![], "empty.dpt"),
            Err(SeriesError::Empty)
        );
        assert_eq!(
            collection.add_series(vec![1.0, 2.0], vec![0.1], "short.dpt"),
            Err(SeriesError::LengthMismatch {
                wavelengths: 2,
                reflectances: 1
            })
        );
        assert_eq!(
            collection.add_series(vec![1.0, 1.0, 2.0], vec![0.1, 0.2, 0.3], "dup.dpt"),
            Err(SeriesError::NotAscending { index: 1 })
        );

        assert!(collection.is_empty());
        // A failed add must not consume a palette slot
        collection
            .add_series(vec![1.0, 2.0], vec![0.1, 0.2], "good.dpt")
            .unwrap();
        assert_eq!(collection.get(0).unwrap().color, COLOR_PALETTE[0]);
    }

    #[test]
    fn test_recolor_keeps_data_and_visibility() {
        let mut collection = SpectrumCollection::new();
        let (w, r) = ramp(5);
        collection.add_series(w.clone(), r, "a.dpt").unwrap();
        collection.set_visible(0, false);
        collection.set_color(0, Color32::from_rgb(10, 20, 30));

        let record = collection.get(0).unwrap();
        assert_eq!(record.color, Color32::from_rgb(10, 20, 30));
        assert!(!record.visible);
        assert_eq!(record.wavelengths(), &w[..]);
    }
}
