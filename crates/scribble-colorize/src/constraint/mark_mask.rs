/// Boolean grid of user-pinned pixels, same geometry as the images.
///
/// `true` means the chrominance at that pixel was supplied by a scribble;
/// `false` means it must be inferred from the neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkMask {
    width: usize,
    height: usize,
    marks: Vec<bool>,
    marked: usize,
}

impl MarkMask {
    /// Build a mask from row-major flags.
    ///
    /// # Panics
    ///
    /// Panics if `marks.len() != width * height`.
    pub fn new(width: usize, height: usize, marks: Vec<bool>) -> Self {
        assert_eq!(
            marks.len(),
            width * height,
            "mark mask has {} entries for a {}x{} image",
            marks.len(),
            width,
            height
        );
        Self::from_parts(width, height, marks)
    }

    pub(crate) fn from_parts(width: usize, height: usize, marks: Vec<bool>) -> Self {
        let marked = marks.iter().filter(|&&m| m).count();
        Self {
            width,
            height,
            marks,
            marked,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether the pixel at raster index `idx` is pinned.
    #[inline]
    pub fn is_marked(&self, idx: usize) -> bool {
        self.marks[idx]
    }

    /// Row-major flags.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.marks
    }

    /// Number of pinned pixels.
    #[inline]
    pub fn marked_count(&self) -> usize {
        self.marked
    }

    /// True when the mask covers no pixels at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// True when no pixel is pinned.
    #[inline]
    pub fn has_no_marks(&self) -> bool {
        self.marked == 0
    }

    /// True when every pixel is pinned.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.marked == self.marks.len()
    }
}
