//! Depth classification for earthquake markers and the legend.
//!
//! Buckets are half-open ranges in kilometres, ordered by upper bound. The
//! last bucket has no upper bound and also catches `NaN`, since every
//! comparison against `NaN` is false.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBucket {
    /// Exclusive upper bound in km, `None` for the open-ended top bucket
    pub upper: Option<f64>,
    pub color: &'static str,
}

pub const DEPTH_BUCKETS: [DepthBucket; 6] = [
    DepthBucket { upper: Some(10.0), color: "#B2FF66" }, // green
    DepthBucket { upper: Some(30.0), color: "#FFFF00" }, // yellow
    DepthBucket { upper: Some(50.0), color: "#FFB266" }, // orange
    DepthBucket { upper: Some(70.0), color: "#FF8000" }, // orange-red
    DepthBucket { upper: Some(90.0), color: "#FF6666" }, // red
    DepthBucket { upper: None, color: "#FF0000" },       // dark red
];

/// Lower edges shown in the legend, one per bucket
pub const LEGEND_LIMITS: [f64; 6] = [-10.0, 10.0, 30.0, 50.0, 70.0, 90.0];

/// Returns the bucket a depth falls into. Total over all `f64` values.
pub fn classify_depth(depth: f64) -> &'static DepthBucket {
    DEPTH_BUCKETS
        .iter()
        .find(|bucket| matches!(bucket.upper, Some(upper) if depth < upper))
        .unwrap_or(&DEPTH_BUCKETS[DEPTH_BUCKETS.len() - 1])
}

/// Fill color for a depth in km
pub fn depth_color(depth: f64) -> &'static str {
    classify_depth(depth).color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_edges() {
        assert_eq!(depth_color(9.999), "#B2FF66");
        assert_eq!(depth_color(10.0), "#FFFF00");
        assert_eq!(depth_color(29.9), "#FFFF00");
        assert_eq!(depth_color(30.0), "#FFB266");
        assert_eq!(depth_color(50.0), "#FF8000");
        assert_eq!(depth_color(70.0), "#FF6666");
        assert_eq!(depth_color(89.99), "#FF6666");
        assert_eq!(depth_color(90.0), "#FF0000");
        assert_eq!(depth_color(650.0), "#FF0000");
    }

    #[test]
    fn test_negative_and_non_finite_depths() {
        assert_eq!(depth_color(-3.5), "#B2FF66");
        assert_eq!(depth_color(f64::NEG_INFINITY), "#B2FF66");
        assert_eq!(depth_color(f64::INFINITY), "#FF0000");
        assert_eq!(depth_color(f64::NAN), "#FF0000");
    }

    #[test]
    fn test_classifier_is_monotone() {
        let palette: Vec<&str> = DEPTH_BUCKETS.iter().map(|b| b.color).collect();
        let mut last_index = 0;
        let mut depth = -50.0;
        while depth < 200.0 {
            let color = depth_color(depth);
            let index = palette
                .iter()
                .position(|c| *c == color)
                .expect("color must come from the bucket table");
            assert!(index >= last_index, "bucket went backwards at {} km", depth);
            last_index = index;
            depth += 0.25;
        }
        assert_eq!(last_index, palette.len() - 1);
    }

    #[test]
    fn test_legend_limits_hit_each_bucket_once() {
        let colors: Vec<&str> = LEGEND_LIMITS.iter().map(|d| depth_color(*d)).collect();
        let expected: Vec<&str> = DEPTH_BUCKETS.iter().map(|b| b.color).collect();
        assert_eq!(colors, expected);
    }
}
