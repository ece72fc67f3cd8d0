//! Pure projection from carousel state to per-item transforms.
//!
//! Every function here is deterministic, so the whole strip can be
//! recomputed on each frame of a drag without accumulating error.

use super::{
    DEFAULT_ARC_ANGLE_DEG, DEFAULT_MAX_SCALE, DEFAULT_MAX_VISIBLE_OFFSET, DEFAULT_MIN_SCALE,
    DEFAULT_SCALE_SPREAD, DEFAULT_SPREAD, DEFAULT_STACK_BASE, DEPTH_RISE, STACK_STEP,
};
use crate::geometry::{Point, Rect, Size};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::cmp::Ordering;
use std::num::NonZeroUsize;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Items sit on a straight line, `spread` pixels apart.
    #[default]
    #[strum(to_string = "linear", serialize = "flat")]
    Linear,
    /// Items sit on a circular arc, receding as they rotate away.
    #[strum(to_string = "arc", serialize = "3d", serialize = "circular")]
    Arc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub spread: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub scale_spread: f64,
    pub max_visible_offset: f64,
    pub placement: Placement,
    /// Radians per index step, only used by [`Placement::Arc`].
    pub arc_angle: f64,
    pub stack_base: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spread: DEFAULT_SPREAD,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            scale_spread: DEFAULT_SCALE_SPREAD,
            max_visible_offset: DEFAULT_MAX_VISIBLE_OFFSET,
            placement: Placement::Linear,
            arc_angle: DEFAULT_ARC_ANGLE_DEG.to_radians(),
            stack_base: DEFAULT_STACK_BASE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTransform {
    /// Signed circular distance to the center item, in index units.
    pub offset: f64,
    pub horizontal_offset: f64,
    pub depth_offset: f64,
    pub depth_scale: f64,
    pub stack_order: u32,
    pub opacity: f64,
}

impl VisualTransform {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// The item that would end up centered if the drag were released now.
    pub fn is_centered(&self) -> bool {
        self.offset.abs() < 0.5
    }

    pub fn center(&self, stage_center: Point) -> Point {
        Point::new(
            stage_center.x + self.horizontal_offset,
            stage_center.y - self.depth_offset * DEPTH_RISE,
        )
    }

    pub fn bounds(&self, stage_center: Point, item: Size) -> Rect {
        Rect::centered(self.center(stage_center), item.scaled(self.depth_scale))
    }
}

/// Maps item `index` onto the symmetric range `(-n/2, n/2]` around `current`,
/// taking the shorter way round the circle. `drag` is the live drag fraction.
pub fn signed_offset(index: usize, current: usize, len: NonZeroUsize, drag: f64) -> f64 {
    let n = len.get() as f64;
    let raw = (index as f64 - current as f64 + drag + n).rem_euclid(n);
    if raw > n / 2.0 { raw - n } else { raw }
}

/// Gaussian falloff from `max_scale` at the center towards `min_scale`.
pub fn depth_scale(offset: f64, config: &LayoutConfig) -> f64 {
    let falloff = (-(offset * offset) / (2.0 * config.scale_spread)).exp();
    (config.max_scale - config.min_scale) * falloff + config.min_scale
}

/// Returns `(horizontal, depth)` placement in pixels.
pub fn placement(offset: f64, config: &LayoutConfig) -> (f64, f64) {
    match config.placement {
        Placement::Linear => (offset * config.spread, 0.0),
        Placement::Arc => {
            let theta = config.arc_angle;
            // neighbors stay `spread` apart at the center
            let radius = config.spread / theta.sin();
            let angle = offset * theta;
            (radius * angle.sin(), radius * (1.0 - angle.cos()))
        }
    }
}

pub fn stack_order(offset: f64, base: u32) -> u32 {
    (base as f64 - (offset.abs() * STACK_STEP).round()).max(0.0) as u32
}

pub fn opacity(offset: f64, max_visible_offset: f64) -> f64 {
    let distance = offset.abs();
    if distance > max_visible_offset {
        return 0.0;
    }
    (1.0 - distance / (max_visible_offset + 1.0)).clamp(0.0, 1.0)
}

pub fn transform(
    index: usize,
    current: usize,
    len: NonZeroUsize,
    drag: f64,
    config: &LayoutConfig,
) -> VisualTransform {
    let offset = signed_offset(index, current, len, drag);
    let (horizontal_offset, depth_offset) = placement(offset, config);

    VisualTransform {
        offset,
        horizontal_offset,
        depth_offset,
        depth_scale: depth_scale(offset, config),
        stack_order: stack_order(offset, config.stack_base),
        opacity: opacity(offset, config.max_visible_offset),
    }
}

/// Transforms for every item of a carousel, in item order.
pub fn project(
    current: usize,
    len: NonZeroUsize,
    drag: f64,
    config: &LayoutConfig,
) -> Vec<VisualTransform> {
    (0..len.get())
        .map(|i| transform(i, current, len, drag, config))
        .collect()
}

/// Orders two items from back to front. Equal stack orders fall back to
/// distance from the center, the nearer item being in front.
pub fn depth_cmp(a: &VisualTransform, b: &VisualTransform) -> Ordering {
    a.stack_order
        .cmp(&b.stack_order)
        .then_with(|| b.offset.abs().total_cmp(&a.offset.abs()))
}

/// Indices of the visible items, back to front.
pub fn paint_order(transforms: &[VisualTransform]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..transforms.len())
        .filter(|&i| transforms[i].is_visible())
        .collect();
    order.sort_by(|&a, &b| depth_cmp(&transforms[a], &transforms[b]));
    order
}

/// Topmost visible item under `point`. Transparent items never take input.
pub fn hit_test(
    point: Point,
    stage_center: Point,
    item: Size,
    transforms: &[VisualTransform],
) -> Option<usize> {
    transforms
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_visible() && t.bounds(stage_center, item).contains(point))
        .max_by(|(_, a), (_, b)| depth_cmp(a, b))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(len: usize) -> NonZeroUsize {
        NonZeroUsize::new(len).unwrap()
    }

    #[test]
    fn offsets_stay_in_the_symmetric_range() {
        for len in 1..=12 {
            let half = len as f64 / 2.0;
            for i in 0..len {
                for c in 0..len {
                    let o = signed_offset(i, c, n(len), 0.0);
                    assert!(o > -half && o <= half, "n={len} i={i} c={c} o={o}");
                }
            }
        }
    }

    #[test]
    fn current_item_has_zero_offset() {
        for len in 1..=9 {
            for c in 0..len {
                assert_eq!(signed_offset(c, c, n(len), 0.0), 0.0);
            }
        }
    }

    #[test]
    fn offset_takes_the_short_way_round() {
        let cases = vec![
            // (index, current, len, expected)
            (6, 0, 7, -1.0),
            (1, 6, 7, 2.0),
            (0, 6, 7, 1.0),
            (5, 0, 10, 5.0),
            (6, 0, 10, -4.0),
            (3, 0, 4, -1.0),
        ];

        for (i, c, len, expected) in cases {
            assert_eq!(signed_offset(i, c, n(len), 0.0), expected, "i={i} c={c}");
        }
    }

    #[test]
    fn drag_fraction_shifts_offsets_continuously() {
        // dragging right by half a step pushes the center item right
        assert_eq!(signed_offset(2, 2, n(5), 0.5), 0.5);
        // and pulls the previous item towards the center
        assert_eq!(signed_offset(1, 2, n(5), 0.5), -0.5);
        // long drags still wrap
        assert_eq!(signed_offset(0, 0, n(5), 7.0), 2.0);
        assert_eq!(signed_offset(0, 0, n(5), -3.0), 2.0);
    }

    #[test]
    fn depth_scale_peaks_at_center_and_never_grows_with_distance() {
        let config = LayoutConfig::default();
        let center = depth_scale(0.0, &config);
        assert!((center - config.max_scale).abs() < 1e-12);

        let mut previous = center;
        for step in 1..=40 {
            let scale = depth_scale(step as f64 * 0.25, &config);
            assert!(scale < center);
            assert!(scale <= previous);
            assert!(scale >= config.min_scale);
            assert_eq!(scale, depth_scale(-(step as f64) * 0.25, &config));
            previous = scale;
        }
    }

    #[test]
    fn stack_order_is_floored_at_zero() {
        assert_eq!(stack_order(0.0, 100), 100);
        assert_eq!(stack_order(1.0, 100), 90);
        assert_eq!(stack_order(-1.0, 100), 90);
        assert_eq!(stack_order(2.5, 100), 75);
        assert_eq!(stack_order(50.0, 100), 0);
        assert_eq!(stack_order(3.0, 20), 0);
    }

    #[test]
    fn opacity_fades_out_past_the_visible_range() {
        assert_eq!(opacity(0.0, 3.0), 1.0);
        assert_eq!(opacity(1.0, 3.0), 0.75);
        assert_eq!(opacity(-3.0, 3.0), 0.25);
        assert_eq!(opacity(3.01, 3.0), 0.0);
        assert_eq!(opacity(-5.0, 3.0), 0.0);
    }

    #[test]
    fn linear_placement_spaces_items_evenly() {
        let config = LayoutConfig::default();
        let transforms = project(0, n(5), 0.0, &config);
        let offsets: Vec<f64> = transforms.iter().map(|t| t.horizontal_offset).collect();
        assert_eq!(
            offsets,
            vec![0.0, config.spread, 2.0 * config.spread, -2.0 * config.spread, -config.spread]
        );
        assert!(transforms.iter().all(|t| t.depth_offset == 0.0));
    }

    #[test]
    fn arc_placement_recedes_symmetrically() {
        let config = LayoutConfig {
            placement: Placement::Arc,
            ..LayoutConfig::default()
        };
        let (x0, d0) = placement(0.0, &config);
        assert_eq!((x0, d0), (0.0, 0.0));

        let (x1, d1) = placement(1.0, &config);
        let (xm1, dm1) = placement(-1.0, &config);
        assert!((x1 - config.spread).abs() < 1e-9);
        assert!((x1 + xm1).abs() < 1e-9);
        assert!(d1 > 0.0);
        assert!((d1 - dm1).abs() < 1e-9);

        let (_, d2) = placement(2.0, &config);
        assert!(d2 > d1);
    }

    #[test]
    fn exactly_one_item_is_centered_at_rest() {
        let config = LayoutConfig::default();
        for len in 1..=8 {
            for c in 0..len {
                let transforms = project(c, n(len), 0.0, &config);
                let centered: Vec<usize> = transforms
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.is_centered())
                    .map(|(i, _)| i)
                    .collect();
                assert_eq!(centered, vec![c]);
            }
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let config = LayoutConfig::default();
        let a = project(3, n(10), -0.37, &config);
        let b = project(3, n(10), -0.37, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn hit_test_prefers_the_topmost_item() {
        let config = LayoutConfig {
            spread: 50.0,
            ..LayoutConfig::default()
        };
        let item = Size::new(200.0, 100.0);
        let stage = Point::new(400.0, 300.0);
        let transforms = project(0, n(5), 0.0, &config);

        // the center card overlaps both neighbors here
        assert_eq!(hit_test(Point::new(430.0, 300.0), stage, item, &transforms), Some(0));
        // only the right neighbor reaches this far
        assert_eq!(hit_test(Point::new(535.0, 300.0), stage, item, &transforms), Some(1));
        assert_eq!(hit_test(Point::new(265.0, 300.0), stage, item, &transforms), Some(4));
        assert_eq!(hit_test(Point::new(400.0, 10.0), stage, item, &transforms), None);
    }

    #[test]
    fn hit_test_prefers_the_nearer_item_when_stack_orders_tie() {
        let config = LayoutConfig {
            spread: 50.0,
            stack_base: 0,
            ..LayoutConfig::default()
        };
        let item = Size::new(200.0, 100.0);
        let stage = Point::new(400.0, 300.0);
        let transforms = project(0, n(5), 0.0, &config);

        assert!(transforms.iter().all(|t| t.stack_order == 0));
        assert_eq!(hit_test(Point::new(430.0, 300.0), stage, item, &transforms), Some(0));
        assert_eq!(hit_test(Point::new(370.0, 300.0), stage, item, &transforms), Some(0));
    }

    #[test]
    fn paint_order_ends_with_the_center_item() {
        let transforms = project(0, n(7), 0.0, &LayoutConfig::default());
        let order = paint_order(&transforms);
        assert_eq!(order.len(), 7);
        assert_eq!(order.last(), Some(&0));
        assert!(order.windows(2).all(|w| {
            transforms[w[0]].offset.abs() >= transforms[w[1]].offset.abs()
        }));

        // same result once every stack order collapses to zero
        let flat = LayoutConfig {
            stack_base: 0,
            ..LayoutConfig::default()
        };
        let transforms = project(0, n(7), 0.0, &flat);
        assert_eq!(paint_order(&transforms).last(), Some(&0));
    }

    #[test]
    fn paint_order_leaves_out_hidden_items() {
        let config = LayoutConfig {
            max_visible_offset: 1.0,
            ..LayoutConfig::default()
        };
        let transforms = project(0, n(7), 0.0, &config);
        let mut order = paint_order(&transforms);
        assert_eq!(order.pop(), Some(0));
        order.sort();
        assert_eq!(order, vec![1, 6]);
    }

    #[test]
    fn hit_test_skips_transparent_items() {
        let config = LayoutConfig {
            max_visible_offset: 0.0,
            ..LayoutConfig::default()
        };
        let item = Size::new(200.0, 100.0);
        let stage = Point::new(400.0, 300.0);
        let transforms = project(0, n(3), 0.0, &config);
        let right = transforms[1].center(stage);

        assert!(!transforms[1].is_visible());
        assert_eq!(hit_test(right, stage, item, &transforms), None);
    }
}
