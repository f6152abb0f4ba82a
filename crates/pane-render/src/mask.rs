//! Alpha masks

/// 8-bit coverage mask, one byte per pixel (0 = transparent, 255 = opaque)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    /// Create an empty (fully transparent) mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Create from raw coverage bytes
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self { width, height, data })
    }

    /// Filled ellipse inscribed in a `width` x `height` box
    pub fn ellipse(width: u32, height: u32) -> Self {
        let mut mask = Self::new(width, height);
        if let Some(path) = crate::paint::ellipse_path(0.0, 0.0, width as f32, height as f32) {
            crate::paint::fill_mask(&mut mask, &path, true);
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at (x, y), 0 outside the mask
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_mask_center_and_corner() {
        let mask = AlphaMask::ellipse(100, 100);
        assert_eq!(mask.get(50, 50), 255);
        assert_eq!(mask.get(1, 1), 0);
        assert_eq!(mask.get(500, 500), 0);
    }

    #[test]
    fn test_zero_size_mask() {
        let mask = AlphaMask::ellipse(0, 0);
        assert_eq!(mask.width(), 0);
        assert!(mask.data().is_empty());
    }

    #[test]
    fn test_from_data_checks_length() {
        assert!(AlphaMask::from_data(2, 2, vec![0; 4]).is_some());
        assert!(AlphaMask::from_data(2, 2, vec![0; 3]).is_none());
    }
}
