// SPDX-License-Identifier: MIT
//
// Editing session: the caller-side state around the pure palette engine.
//
// The engine computes palettes and default role maps but keeps no state.
// The session sequences recomputation:
//
//   request ──generate──▶ complementary ──harmony──▶ active palette
//                                                        │
//                              snapshot differs? ◀───────┘
//                                 │ yes: assign_roles, drop overrides
//                                 ▼
//                              ColorMap (+ manual overrides)
//
// Palette identity is decided by comparing the active palette against the
// snapshot taken at the last recomputation. Overrides survive any change
// that leaves the active palette identical.

use phi_color::{FullColor, Hsl, Rgb};
use phi_theme::contrast::step_lightness;
use phi_theme::palette::generate_complementary;
use phi_theme::{
    ColorMap, Direction, HarmonyChoice, Palette, PaletteRequest, Role, active_palette,
    assign_roles,
};
use tracing::debug;

bitflags::bitflags! {
    /// Roles the user has reassigned by hand since the last reset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct RoleSet: u8 {
        const BACKGROUND         = 1 << 0;
        const SURFACE            = 1 << 1;
        const PRIMARY            = 1 << 2;
        const SECONDARY          = 1 << 3;
        const TEXT_ON_BACKGROUND = 1 << 4;
        const TEXT_ON_SURFACE    = 1 << 5;
        const TEXT_ON_PRIMARY    = 1 << 6;
        const HEADING            = 1 << 7;
    }
}

impl RoleSet {
    #[must_use]
    pub const fn of(role: Role) -> Self {
        match role {
            Role::Background => Self::BACKGROUND,
            Role::Surface => Self::SURFACE,
            Role::Primary => Self::PRIMARY,
            Role::Secondary => Self::SECONDARY,
            Role::TextOnBackground => Self::TEXT_ON_BACKGROUND,
            Role::TextOnSurface => Self::TEXT_ON_SURFACE,
            Role::TextOnPrimary => Self::TEXT_ON_PRIMARY,
            Role::Heading => Self::HEADING,
        }
    }
}

// ─── PaletteSession ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PaletteSession {
    request: PaletteRequest,
    complementary: Vec<FullColor>,
    harmony: HarmonyChoice,
    map: ColorMap,
    overrides: RoleSet,
    snapshot: Palette,
}

impl PaletteSession {
    #[must_use]
    pub fn new(request: PaletteRequest) -> Self {
        let complementary = generate_complementary(&request);
        let mut session = Self {
            request,
            complementary,
            harmony: HarmonyChoice::Current,
            map: ColorMap::fallback(),
            overrides: RoleSet::empty(),
            snapshot: Palette::default(),
        };
        session.reset_map();
        session
    }

    #[must_use]
    pub const fn request(&self) -> &PaletteRequest {
        &self.request
    }

    #[must_use]
    pub const fn harmony(&self) -> HarmonyChoice {
        self.harmony
    }

    #[must_use]
    pub const fn color_map(&self) -> &ColorMap {
        &self.map
    }

    #[must_use]
    pub const fn overrides(&self) -> RoleSet {
        self.overrides
    }

    /// The generated palette: base plus the (possibly hand-edited)
    /// complementary colors.
    #[must_use]
    pub fn generated(&self) -> Palette {
        Palette::with_base(FullColor::from_hsl(self.request.base), self.complementary.iter().cloned())
    }

    /// The palette being themed: the generated one or the selected harmony.
    #[must_use]
    pub fn active_palette(&self) -> Palette {
        active_palette(&self.generated(), self.harmony)
    }

    // ── Request edits (regenerate complementary colors) ─────────────

    pub fn set_base(&mut self, base: Hsl) {
        self.request.base = base.clamped();
        self.regenerate();
    }

    pub fn set_count(&mut self, count: usize) {
        self.request.count = count;
        self.regenerate();
    }

    pub fn set_auto_adjust(&mut self, auto_adjust: bool) {
        self.request.auto_adjust = auto_adjust;
        self.regenerate();
    }

    pub fn set_target(&mut self, target_ratio: f64) {
        self.request.target_ratio = target_ratio;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.complementary = generate_complementary(&self.request);
        self.refresh();
    }

    // ── Per-color edits ─────────────────────────────────────────────

    /// Replace one complementary color. Returns `false` if `index` is out of
    /// range.
    pub fn edit_complementary(&mut self, index: usize, hsl: Hsl) -> bool {
        let Some(slot) = self.complementary.get_mut(index) else {
            return false;
        };
        *slot = FullColor::from_hsl(hsl.clamped());
        self.refresh();
        true
    }

    /// Step one complementary color's lightness. Returns `false` when the
    /// index is out of range or no further step exists in `direction`.
    pub fn step_complementary(&mut self, index: usize, direction: Direction) -> bool {
        let base = self.request.base.to_rgb();
        let Some(current) = self.complementary.get(index).map(FullColor::hsl) else {
            return false;
        };
        let Some(next) = step_lightness(current, base, direction, self.request.auto_adjust) else {
            return false;
        };
        self.edit_complementary(index, next)
    }

    pub fn select_harmony(&mut self, choice: HarmonyChoice) {
        self.harmony = choice;
        self.refresh();
    }

    // ── Roles ───────────────────────────────────────────────────────

    /// Pin `role` to `color` until the palette identity next changes.
    pub fn override_role(&mut self, role: Role, color: Rgb) {
        self.map.set(role, color.to_hex());
        self.overrides |= RoleSet::of(role);
    }

    /// Discard overrides and re-derive the default map.
    pub fn reset_map(&mut self) {
        let active = self.active_palette();
        self.map = assign_roles(&active);
        self.overrides = RoleSet::empty();
        self.snapshot = active;
    }

    /// Adopt a loaded palette: its base and complementary colors replace the
    /// current ones, and the harmony view returns to the generated palette.
    pub fn load_palette(&mut self, palette: &Palette) {
        let Some(base) = palette.base() else {
            return;
        };
        self.request.base = base.hsl();
        self.request.count = palette.complementary().len();
        self.complementary = palette.complementary().to_vec();
        self.harmony = HarmonyChoice::Current;
        self.refresh();
    }

    fn refresh(&mut self) {
        if self.active_palette() != self.snapshot {
            debug!(dropped = ?self.overrides, "palette changed; re-deriving roles");
            self.reset_map();
        }
    }
}

impl Default for PaletteSession {
    fn default() -> Self {
        Self::new(PaletteRequest::default())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use phi_theme::Harmony;
    use pretty_assertions::assert_eq;

    fn pink() -> Rgb {
        Rgb::new(0xff, 0x00, 0x99)
    }

    #[test]
    fn new_session_uses_default_roles() {
        let session = PaletteSession::default();
        assert_eq!(session.color_map(), &assign_roles(&session.active_palette()));
        assert!(session.overrides().is_empty());
        assert_eq!(session.active_palette().len(), 4);
    }

    #[test]
    fn override_sets_role_and_flag() {
        let mut session = PaletteSession::default();
        session.override_role(Role::Primary, pink());
        assert_eq!(session.color_map().get(Role::Primary), "#ff0099");
        assert_eq!(session.overrides(), RoleSet::PRIMARY);
    }

    #[test]
    fn override_survives_no_op_changes() {
        let mut session = PaletteSession::default();
        session.override_role(Role::Heading, pink());
        session.set_auto_adjust(true);
        session.select_harmony(HarmonyChoice::Current);
        assert_eq!(session.color_map().get(Role::Heading), "#ff0099");
        assert!(session.overrides().contains(RoleSet::HEADING));
    }

    #[test]
    fn palette_change_discards_overrides() {
        let mut session = PaletteSession::default();
        session.override_role(Role::Background, pink());
        session.set_base(Hsl::new(20.0, 70.0, 50.0));
        assert!(session.overrides().is_empty());
        assert_eq!(session.color_map(), &assign_roles(&session.active_palette()));
    }

    #[test]
    fn harmony_selection_is_a_palette_change() {
        let mut session = PaletteSession::default();
        session.override_role(Role::Surface, pink());
        session.select_harmony(HarmonyChoice::Kind(Harmony::Triadic));
        assert!(session.overrides().is_empty());
        assert_eq!(session.active_palette().len(), 5);
    }

    #[test]
    fn set_count_regenerates() {
        let mut session = PaletteSession::default();
        session.set_count(1);
        assert_eq!(session.active_palette().len(), 2);
        assert_eq!(session.request().count, 1);
    }

    #[test]
    fn edit_out_of_range_is_rejected() {
        let mut session = PaletteSession::default();
        assert!(!session.edit_complementary(7, Hsl::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn edit_replaces_one_color() {
        let mut session = PaletteSession::default();
        assert!(session.edit_complementary(0, Hsl::new(10.0, 20.0, 30.0)));
        let generated = session.generated();
        assert_eq!(generated.complementary()[0].hsl(), Hsl::new(10.0, 20.0, 30.0));
        assert_eq!(generated.complementary()[1].hex(), "#662deb");
    }

    #[test]
    fn manual_step_moves_one_unit() {
        let mut session = PaletteSession::default();
        session.set_auto_adjust(false);
        assert!(session.step_complementary(0, Direction::Darker));
        assert_eq!(session.generated().complementary()[0].hsl().l, 58.0);
    }

    #[test]
    fn auto_step_jumps_to_next_passing_lightness() {
        // First complementary sits at l = 28, the first darker AA solution.
        let mut session = PaletteSession::default();
        assert!(session.step_complementary(0, Direction::Darker));
        assert_eq!(session.generated().complementary()[0].hsl().l, 27.0);
    }

    #[test]
    fn step_stops_at_bound() {
        let mut session = PaletteSession::default();
        session.set_auto_adjust(false);
        assert!(session.edit_complementary(0, Hsl::new(35.5, 83.0, 100.0)));
        assert!(!session.step_complementary(0, Direction::Lighter));
    }

    #[test]
    fn load_palette_adopts_base_and_count() {
        let mut session = PaletteSession::default();
        session.select_harmony(HarmonyChoice::Kind(Harmony::Analogous));
        let loaded = Palette::new(vec![
            FullColor::from_hsl(Hsl::new(200.0, 50.0, 40.0)),
            FullColor::from_hsl(Hsl::new(62.5, 50.0, 40.0)),
        ]);
        session.load_palette(&loaded);
        assert_eq!(session.harmony(), HarmonyChoice::Current);
        assert_eq!(session.request().count, 1);
        assert_eq!(session.active_palette(), loaded);
    }

    #[test]
    fn reset_map_clears_overrides() {
        let mut session = PaletteSession::default();
        session.override_role(Role::Secondary, pink());
        session.reset_map();
        assert!(session.overrides().is_empty());
        assert_eq!(session.color_map(), &assign_roles(&session.active_palette()));
    }

    #[test]
    fn role_set_covers_every_role() {
        let all = Role::ALL.into_iter().fold(RoleSet::empty(), |set, role| set | RoleSet::of(role));
        assert_eq!(all, RoleSet::all());
    }
}
