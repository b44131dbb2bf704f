use ndarray::{s, Array2, Array4, ArrayView1, ArrayView2, ArrayViewMut1};

/// Message box of a pixel. The first four hold the latest message received
/// from the neighbor on that side, `Data` caches the unary cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
    Data = 4,
}

pub const SLOTS: usize = 5;

impl Slot {
    pub const ALL: [Slot; SLOTS] = [Slot::Left, Slot::Right, Slot::Up, Slot::Down, Slot::Data];
    pub const NEIGHBORS: [Slot; 4] = [Slot::Left, Slot::Right, Slot::Up, Slot::Down];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Dense 4-connected MRF over a `width x height` image.
///
/// Messages live in one `(height, width, slot, label)` array, so every
/// pixel's message boxes are contiguous and each box is a contiguous run of
/// `labels` costs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MrfGrid {
    pub(crate) messages: Array4<u32>,
    pub(crate) best: Array2<u8>,
    pub(crate) decoded: bool,
}

impl MrfGrid {
    /// Allocate a grid with every message set to zero.
    pub fn new(width: usize, height: usize, labels: usize) -> Self {
        Self {
            messages: Array4::zeros((height, width, SLOTS, labels)),
            best: Array2::zeros((height, width)),
            decoded: false,
        }
    }

    pub fn width(&self) -> usize {
        self.messages.shape()[1]
    }

    pub fn height(&self) -> usize {
        self.messages.shape()[0]
    }

    pub fn labels(&self) -> usize {
        self.messages.shape()[3]
    }

    /// Number of pixels.
    pub fn size(&self) -> usize {
        self.width() * self.height()
    }

    /// Row-major flat index of `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width() && y < self.height(), "pixel ({x}, {y}) out of range");
        y * self.width() + x
    }

    /// All five message boxes of a pixel, `(slot, label)`.
    pub fn pixel(&self, x: usize, y: usize) -> ArrayView2<'_, u32> {
        self.messages.slice(s![y, x, .., ..])
    }

    pub fn message(&self, x: usize, y: usize, slot: Slot) -> ArrayView1<'_, u32> {
        self.messages.slice(s![y, x, slot.index(), ..])
    }

    pub fn message_mut(&mut self, x: usize, y: usize, slot: Slot) -> ArrayViewMut1<'_, u32> {
        self.messages.slice_mut(s![y, x, slot.index(), ..])
    }

    /// Decoded label of `(x, y)`, `None` until the first decode.
    pub fn best_label(&self, x: usize, y: usize) -> Option<usize> {
        self.decoded.then(|| self.best[(y, x)] as usize)
    }

    /// Decoded labels as a `(height, width)` array, `None` until the first decode.
    pub fn best_labels(&self) -> Option<ArrayView2<'_, u8>> {
        self.decoded.then(|| self.best.view())
    }
}
