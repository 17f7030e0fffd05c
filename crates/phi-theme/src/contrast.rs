//! WCAG contrast evaluation and contrast-correcting lightness search.
//!
//! Contrast is always measured on the 8-bit RGB a color actually renders
//! as, while corrections move only HSL lightness, in whole-percent steps,
//! so hue and saturation stay exactly as the user chose them.
//!
//! Two searches live here:
//!
//! - [`find_lightness`] walks one direction and returns the *first*
//!   lightness that reaches the target, or `None` when the walk runs out.
//! - [`adjust_for_contrast`] runs both walks and picks one with a
//!   luminance heuristic on the base color, never by distance.

use std::fmt;

use phi_color::{Hsl, Rgb, srgb_to_linear};
use tracing::{debug, trace};

/// WCAG AA threshold for normal text.
pub const AA_RATIO: f64 = 4.5;

/// WCAG AAA threshold for normal text.
pub const AAA_RATIO: f64 = 7.0;

/// WCAG AA threshold for large text.
pub const AA_LARGE_RATIO: f64 = 3.0;

/// Relative luminance above which a base color counts as "light".
///
/// Approximately the luminance of sRGB mid-gray (0.216). Palette
/// reproducibility depends on this exact value.
pub const LIGHT_BASE_LUMINANCE: f64 = 0.22;

/// Compute the relative luminance of a color per WCAG 2.0.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let [r, g, b] = rgb.channels().map(|c| srgb_to_linear(f64::from(c) / 255.0));
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Compute the WCAG contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]. The formula is:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// Symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ---------------------------------------------------------------------------
// ContrastLevel
// ---------------------------------------------------------------------------

/// WCAG conformance grade of a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContrastLevel {
    /// Below 3:1.
    Fail,
    /// At least 3:1, acceptable for large text only.
    AaLarge,
    /// At least 4.5:1.
    Aa,
    /// At least 7:1.
    Aaa,
}

impl ContrastLevel {
    #[must_use]
    pub fn of(ratio: f64) -> Self {
        if ratio >= AAA_RATIO {
            Self::Aaa
        } else if ratio >= AA_RATIO {
            Self::Aa
        } else if ratio >= AA_LARGE_RATIO {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::AaLarge => "AA Large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Lightness search
// ---------------------------------------------------------------------------

/// Which way a lightness search walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Increasing lightness, toward 100.
    Lighter,
    /// Decreasing lightness, toward 0.
    Darker,
}

/// Find the first lightness, walking from `hsl` in `direction`, whose color
/// reaches `target` contrast against `base`.
///
/// Hue and saturation are held fixed. The walk starts one whole unit away
/// from the rounded current lightness and includes the bound (0 or 100).
/// Returns `None` when no lightness in that direction reaches the target,
/// which is routine for targets near 21:1 or bases near mid-gray.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn find_lightness(hsl: Hsl, base: Rgb, direction: Direction, target: f64) -> Option<Hsl> {
    // Saturating cast; NaN becomes 0.
    let start = hsl.l.round() as i32;

    let passes = |l: i32| {
        let candidate = hsl.with_lightness(f64::from(l));
        (contrast_ratio(candidate.to_rgb(), base) >= target).then_some(candidate)
    };

    let found = match direction {
        Direction::Lighter => (start.saturating_add(1).max(0)..=100).find_map(passes),
        Direction::Darker => (0..start.min(101)).rev().find_map(passes),
    };

    if found.is_none() {
        trace!(?direction, target, h = hsl.h, s = hsl.s, l = hsl.l, "no lightness reaches target");
    }
    found
}

/// Direction preferred when both searches succeed: away from the base's
/// perceived brightness.
#[must_use]
pub fn preferred_direction(base: Rgb) -> Direction {
    if relative_luminance(base) > LIGHT_BASE_LUMINANCE {
        Direction::Darker
    } else {
        Direction::Lighter
    }
}

/// Move `hsl`'s lightness until it reaches `target` contrast against `base`.
///
/// Best effort, never fails:
///
/// 1. Already passing: returned unchanged.
/// 2. Only one direction has a solution: that one.
/// 3. Both do: the darker one on a light base (luminance above
///    [`LIGHT_BASE_LUMINANCE`]), the lighter one otherwise. Which solution
///    is closer to the original lightness plays no part.
/// 4. Neither does: returned unchanged.
///
/// Idempotent: a corrected color already passes, so a second call returns it
/// as is.
#[must_use]
pub fn adjust_for_contrast(hsl: Hsl, base: Rgb, target: f64) -> Hsl {
    if contrast_ratio(hsl.to_rgb(), base) >= target {
        return hsl;
    }

    let lighter = find_lightness(hsl, base, Direction::Lighter, target);
    let darker = find_lightness(hsl, base, Direction::Darker, target);

    let adjusted = match (lighter, darker) {
        (Some(lighter), Some(darker)) => match preferred_direction(base) {
            Direction::Lighter => lighter,
            Direction::Darker => darker,
        },
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => {
            debug!(target, h = hsl.h, "contrast target unreachable; leaving color unchanged");
            return hsl;
        }
    };

    debug!(target, h = hsl.h, from = hsl.l, to = adjusted.l, "adjusted lightness for contrast");
    adjusted
}

/// One step of manual lightness editing.
///
/// With `auto_adjust`, jumps to the next lightness in `direction` that keeps
/// AA contrast against `base` (see [`find_lightness`]). Without it, moves one
/// whole unit, clamped to [0, 100]. Returns `None` when no further step is
/// possible, so a caller repeating the step knows to stop.
#[must_use]
pub fn step_lightness(hsl: Hsl, base: Rgb, direction: Direction, auto_adjust: bool) -> Option<Hsl> {
    if auto_adjust {
        return find_lightness(hsl, base, direction, AA_RATIO);
    }

    let delta = match direction {
        Direction::Lighter => 1.0,
        Direction::Darker => -1.0,
    };
    let next = (hsl.l.round() + delta).clamp(0.0, 100.0);
    ((next - hsl.l).abs() > f64::EPSILON).then(|| hsl.with_lightness(next))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use phi_color::hsl_to_rgb;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn default_base() -> Rgb {
        hsl_to_rgb(173.0, 83.0, 59.0)
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        assert!(approx_eq(relative_luminance(Rgb::BLACK), 0.0, 1e-9));
    }

    #[test]
    fn luminance_white_is_one() {
        assert!(approx_eq(relative_luminance(Rgb::WHITE), 1.0, 1e-9));
    }

    #[test]
    fn luminance_pure_red() {
        let lum = relative_luminance(Rgb::new(255, 0, 0));
        assert!(approx_eq(lum, 0.2126, 1e-9), "Red luminance: {lum}");
    }

    #[test]
    fn luminance_mid_gray_sits_just_below_threshold() {
        let lum = relative_luminance(Rgb::new(128, 128, 128));
        assert!(approx_eq(lum, 0.2159, 1e-3), "Mid-gray luminance: {lum}");
        assert!(lum < LIGHT_BASE_LUMINANCE);
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Rgb::BLACK, Rgb::WHITE);
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = Rgb::new(12, 200, 99);
        assert!(approx_eq(contrast_ratio(c, c), 1.0, 1e-12));
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = Rgb::new(204, 51, 77);
        let b = Rgb::new(26, 26, 102);
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
    }

    #[test]
    fn contrast_levels() {
        assert_eq!(ContrastLevel::of(21.0), ContrastLevel::Aaa);
        assert_eq!(ContrastLevel::of(7.0), ContrastLevel::Aaa);
        assert_eq!(ContrastLevel::of(6.99), ContrastLevel::Aa);
        assert_eq!(ContrastLevel::of(4.5), ContrastLevel::Aa);
        assert_eq!(ContrastLevel::of(3.0), ContrastLevel::AaLarge);
        assert_eq!(ContrastLevel::of(1.2), ContrastLevel::Fail);
        assert_eq!(ContrastLevel::AaLarge.to_string(), "AA Large");
    }

    // ── find_lightness ──────────────────────────────────────────────

    #[test]
    fn finds_first_passing_lightness_darker() {
        // Golden-angle neighbour of the default base, too close in luminance.
        let hsl = Hsl::new(35.5, 83.0, 59.0);
        let found = find_lightness(hsl, default_base(), Direction::Darker, AA_RATIO).unwrap();
        assert_eq!(found, Hsl::new(35.5, 83.0, 28.0));

        // One step lighter than the hit must still fail.
        let previous = hsl.with_lightness(29.0).to_rgb();
        assert!(contrast_ratio(previous, default_base()) < AA_RATIO);
    }

    #[test]
    fn lighter_search_on_light_base_fails() {
        let hsl = Hsl::new(35.5, 83.0, 59.0);
        assert_eq!(find_lightness(hsl, default_base(), Direction::Lighter, AA_RATIO), None);
    }

    #[test]
    fn unreachable_target_not_found_either_way() {
        let hsl = Hsl::new(35.5, 83.0, 28.0);
        for direction in [Direction::Lighter, Direction::Darker] {
            assert_eq!(find_lightness(hsl, default_base(), direction, 25.0), None);
        }
    }

    #[test]
    fn search_includes_the_bound() {
        // Only pure black reaches 21:1 against white.
        let hsl = Hsl::new(0.0, 0.0, 50.0);
        let found = find_lightness(hsl, Rgb::WHITE, Direction::Darker, 21.0).unwrap();
        assert_eq!(found.l, 0.0);
    }

    #[test]
    fn search_from_the_bound_is_empty() {
        let top = Hsl::new(0.0, 0.0, 100.0);
        assert_eq!(find_lightness(top, Rgb::BLACK, Direction::Lighter, 1.0), None);
        let bottom = Hsl::new(0.0, 0.0, 0.0);
        assert_eq!(find_lightness(bottom, Rgb::WHITE, Direction::Darker, 1.0), None);
    }

    // ── adjust_for_contrast ─────────────────────────────────────────

    #[test]
    fn adjust_leaves_passing_color_alone() {
        let hsl = Hsl::new(0.0, 0.0, 100.0);
        assert_eq!(adjust_for_contrast(hsl, Rgb::BLACK, AA_RATIO), hsl);
    }

    #[test]
    fn adjust_uses_the_only_solution() {
        let hsl = Hsl::new(120.0, 60.0, 70.0);
        assert_eq!(adjust_for_contrast(hsl, Rgb::WHITE, AA_RATIO), hsl.with_lightness(33.0));
        let hsl = Hsl::new(120.0, 60.0, 30.0);
        assert_eq!(adjust_for_contrast(hsl, Rgb::BLACK, AA_RATIO), hsl.with_lightness(33.0));
    }

    #[test]
    fn adjust_prefers_lighter_on_dark_base() {
        // Gray 128 has luminance 0.216, under the threshold.
        let base = Rgb::new(128, 128, 128);
        let hsl = Hsl::new(200.0, 80.0, 50.0);
        assert_eq!(adjust_for_contrast(hsl, base, 2.0), hsl.with_lightness(68.0));
    }

    #[test]
    fn adjust_prefers_darker_on_light_base() {
        // Gray 140 has luminance 0.262, over the threshold.
        let base = Rgb::new(140, 140, 140);
        let hsl = Hsl::new(200.0, 80.0, 50.0);
        assert_eq!(adjust_for_contrast(hsl, base, 2.0), hsl.with_lightness(30.0));
    }

    #[test]
    fn adjust_ignores_distance() {
        // Darker solution (26) is 14 away, lighter (68) is 28 away; the dark
        // base still selects lighter.
        let base = Rgb::new(128, 128, 128);
        let hsl = Hsl::new(200.0, 80.0, 40.0);
        assert_eq!(find_lightness(hsl, base, Direction::Darker, 2.0).map(|c| c.l), Some(26.0));
        assert_eq!(adjust_for_contrast(hsl, base, 2.0), hsl.with_lightness(68.0));
    }

    #[test]
    fn adjust_gives_up_silently() {
        let hsl = Hsl::new(35.5, 83.0, 59.0);
        assert_eq!(adjust_for_contrast(hsl, default_base(), 21.0), hsl);
    }

    #[test]
    fn adjust_is_idempotent() {
        let base = default_base();
        for h in [35.5, 258.0, 120.5] {
            let once = adjust_for_contrast(Hsl::new(h, 83.0, 59.0), base, AA_RATIO);
            assert_eq!(adjust_for_contrast(once, base, AA_RATIO), once);
        }
    }

    // ── step_lightness ──────────────────────────────────────────────

    #[test]
    fn manual_step_moves_one_unit() {
        let hsl = Hsl::new(10.0, 50.0, 40.0);
        assert_eq!(step_lightness(hsl, Rgb::BLACK, Direction::Lighter, false), Some(hsl.with_lightness(41.0)));
        assert_eq!(step_lightness(hsl, Rgb::BLACK, Direction::Darker, false), Some(hsl.with_lightness(39.0)));
    }

    #[test]
    fn manual_step_stops_at_bounds() {
        let top = Hsl::new(10.0, 50.0, 100.0);
        assert_eq!(step_lightness(top, Rgb::BLACK, Direction::Lighter, false), None);
        let bottom = Hsl::new(10.0, 50.0, 0.0);
        assert_eq!(step_lightness(bottom, Rgb::BLACK, Direction::Darker, false), None);
    }

    #[test]
    fn auto_step_keeps_aa_contrast() {
        let hsl = Hsl::new(35.5, 83.0, 28.0);
        let next = step_lightness(hsl, default_base(), Direction::Darker, true).unwrap();
        assert_eq!(next.l, 27.0);
        assert!(contrast_ratio(next.to_rgb(), default_base()) >= AA_RATIO);
        assert_eq!(step_lightness(hsl, default_base(), Direction::Lighter, true), None);
    }
}
