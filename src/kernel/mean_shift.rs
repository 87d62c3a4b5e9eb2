/// Offset scaled by the linear falloff `(bandwidth - |dr|) / bandwidth`.
///
/// `dr` is in normalized units while `bandwidth` is in pixels, so for typical rasters the
/// falloff stays close to 1.
#[inline]
pub fn weighted_offset(dr: [f32; 2], bandwidth: f32) -> [f32; 2] {
    let len = dr[0].hypot(dr[1]);
    let w = (bandwidth - len) / bandwidth;
    [dr[0] * w, dr[1] * w]
}

/// Running vector sum and match count of one mean-shift window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeanShiftAccumulator {
    /// Sum of weighted offsets of matching candidates.
    pub sum: [f32; 2],
    /// Number of matching candidates.
    pub count: u32,
}

impl MeanShiftAccumulator {
    /// Feed one candidate. It counts only if `color_distance < threshold`.
    ///
    /// Returns whether the candidate matched.
    #[inline]
    pub fn offer(
        &mut self,
        dr: [f32; 2],
        bandwidth: f32,
        color_distance: f32,
        threshold: f32,
    ) -> bool {
        if color_distance.is_nan() || color_distance >= threshold {
            return false;
        }
        let [wx, wy] = weighted_offset(dr, bandwidth);
        self.sum[0] += wx;
        self.sum[1] += wy;
        self.count += 1;
        true
    }

    /// Mean shift `sum / max(1, count)`; zero when nothing matched.
    #[inline]
    pub fn mean(&self) -> [f32; 2] {
        let n = self.count.max(1) as f32;
        [self.sum[0] / n, self.sum[1] / n]
    }
}
