/// One weighted neighbor of a pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Raster index of the neighbor.
    pub index: usize,
    /// Normalized, non-negative weight.
    pub weight: f64,
}

/// Per-pixel neighbor lists stored back to back.
///
/// `offsets[i]..offsets[i + 1]` is the slice of `entries` belonging to pixel
/// `i`. Built once per request and dropped after assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightGraph {
    offsets: Vec<usize>,
    entries: Vec<Neighbor>,
}

impl WeightGraph {
    pub(crate) fn from_rows(rows: Vec<Vec<Neighbor>>) -> Self {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut entries = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        offsets.push(0);
        for row in rows {
            entries.extend(row);
            offsets.push(entries.len());
        }
        Self { offsets, entries }
    }

    /// Number of pixels covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbors of the pixel at raster index `idx`. Empty for marked pixels.
    #[inline]
    pub fn neighbors(&self, idx: usize) -> &[Neighbor] {
        &self.entries[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Total number of `(pixel, neighbor)` pairs.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.entries.len()
    }
}
