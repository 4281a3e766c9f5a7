//! egui-painted map/globe.
//!
//! Every point is projected twice, onto an equirectangular map and onto an
//! orthographic globe, and the two are blended by the current morph factor
//! (0 = map, 1 = globe). Switching projection animates that factor; flying
//! to an entity animates the camera center. Both advance only through
//! [`GlobeScene::tick`], so the scene is fully deterministic under test.

use eframe::egui;

use crate::catalog::coords::{Position, SHELL_BASE_ALTITUDE_M, SHELL_SPREAD_M};
use crate::catalog::markup_to_text;

use super::{EntityStyle, ProjectionMode, RenderTarget};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
/// Geocentric radius mapped to one view unit: the top of the catalog shell.
const VIEW_EXTENT_M: f64 = EARTH_RADIUS_M + SHELL_BASE_ALTITUDE_M + SHELL_SPREAD_M as f64;
/// Fraction of the shorter viewport side covered by one view unit at zoom 1.
const VIEW_FILL: f32 = 0.45;
const MIN_ZOOM: f32 = 0.5;
const MAX_ZOOM: f32 = 8.0;
const GRATICULE_STEP_DEG: i32 = 30;
const GRATICULE_SAMPLE_DEG: i32 = 5;

/// Opaque id of an entity added to a [`GlobeScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(u64);

#[derive(Debug, Clone)]
pub struct GlobeEntity {
    pub handle: EntityHandle,
    pub position: Position,
    pub label: String,
    pub description: String,
}

/// Camera state. Degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center_lat: 0.0,
            center_lon: 0.0,
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    from: (f64, f64),
    to: (f64, f64),
    elapsed: f32,
    duration: f32,
}

#[derive(Debug, Clone, Copy)]
struct Morph {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

/// A point projected into view units (y up, origin at the view center).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Projected {
    x: f64,
    y: f64,
    occluded: bool,
}

pub struct GlobeScene {
    entities: Vec<GlobeEntity>,
    next_handle: u64,
    selected: Option<EntityHandle>,
    hovered: Option<EntityHandle>,
    camera: Camera,
    flight: Option<Flight>,
    /// 0 = flat map, 1 = globe.
    morph: f32,
    morph_anim: Option<Morph>,
    style: EntityStyle,
}

impl Default for GlobeScene {
    fn default() -> Self {
        Self::new(ProjectionMode::default())
    }
}

impl GlobeScene {
    pub fn new(mode: ProjectionMode) -> Self {
        Self {
            entities: Vec::new(),
            next_handle: 0,
            selected: None,
            hovered: None,
            camera: Camera::default(),
            flight: None,
            morph: morph_target(mode),
            morph_anim: None,
            style: EntityStyle::default(),
        }
    }

    pub fn entities(&self) -> &[GlobeEntity] {
        &self.entities
    }

    pub fn selected(&self) -> Option<EntityHandle> {
        self.selected
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn morph_factor(&self) -> f32 {
        self.morph
    }

    pub fn is_animating(&self) -> bool {
        self.flight.is_some() || self.morph_anim.is_some()
    }

    fn entity(&self, handle: EntityHandle) -> Option<&GlobeEntity> {
        self.entities.iter().find(|e| e.handle == handle)
    }

    // ─── Animation ───────────────────────────────────────────────────────────

    /// Advance camera flight and projection morph by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if let Some(mut flight) = self.flight {
            flight.elapsed += dt;
            let t = smoothstep(progress(flight.elapsed, flight.duration));
            let dlon = wrap_degrees(flight.to.1 - flight.from.1);
            self.camera.center_lat = flight.from.0 + (flight.to.0 - flight.from.0) * t as f64;
            self.camera.center_lon = wrap_degrees(flight.from.1 + dlon * t as f64);
            self.flight = (t < 1.0).then_some(flight);
        }

        if let Some(mut morph) = self.morph_anim {
            morph.elapsed += dt;
            let t = smoothstep(progress(morph.elapsed, morph.duration));
            self.morph = morph.from + (morph.to - morph.from) * t;
            self.morph_anim = (t < 1.0).then_some(morph);
        }
    }

    // ─── Projection ──────────────────────────────────────────────────────────

    fn project(&self, lat: f64, lon: f64, alt: f64) -> Projected {
        let lat0 = self.camera.center_lat.to_radians();
        let phi = lat.to_radians();
        let dlam = (lon - self.camera.center_lon).to_radians();

        let r = (EARTH_RADIUS_M + alt) / VIEW_EXTENT_M;
        let gx = r * phi.cos() * dlam.sin();
        let gy = r * (lat0.cos() * phi.sin() - lat0.sin() * phi.cos() * dlam.cos());
        let depth = lat0.sin() * phi.sin() + lat0.cos() * phi.cos() * dlam.cos();

        let mx = wrap_degrees(lon - self.camera.center_lon) / 180.0;
        let my = (lat - self.camera.center_lat) / 180.0;

        let m = self.morph as f64;
        let earth = EARTH_RADIUS_M / VIEW_EXTENT_M;
        Projected {
            x: mx + (gx - mx) * m,
            y: my + (gy - my) * m,
            occluded: m >= 0.5 && depth < 0.0 && gx * gx + gy * gy < earth * earth,
        }
    }

    fn view_scale(&self, rect: egui::Rect) -> f32 {
        rect.width().min(rect.height()) * VIEW_FILL * self.camera.zoom
    }

    fn to_screen(&self, p: Projected, rect: egui::Rect) -> egui::Pos2 {
        let scale = self.view_scale(rect);
        let c = rect.center();
        egui::pos2(c.x + p.x as f32 * scale, c.y - p.y as f32 * scale)
    }

    fn screen_pos(&self, position: &Position, rect: egui::Rect) -> Option<egui::Pos2> {
        let p = self.project(position.latitude, position.longitude, position.altitude);
        (!p.occluded).then(|| self.to_screen(p, rect))
    }

    /// Topmost visible entity under `pointer`.
    ///
    /// Later entities are drawn over earlier ones, so the search runs from
    /// the most recently added backwards.
    pub fn pick(&self, pointer: egui::Pos2, rect: egui::Rect) -> Option<EntityHandle> {
        let radius = self.style.pixel_size * 0.5 + 3.0;
        self.entities.iter().rev().find_map(|e| {
            let pos = self.screen_pos(&e.position, rect)?;
            (pos.distance(pointer) <= radius).then_some(e.handle)
        })
    }

    // ─── Input ───────────────────────────────────────────────────────────────

    fn pan(&mut self, delta: egui::Vec2, rect: egui::Rect) {
        let scale = self.view_scale(rect) as f64;
        if scale <= 0.0 {
            return;
        }
        let earth = EARTH_RADIUS_M / VIEW_EXTENT_M;
        let map_deg_per_px = 180.0 / scale;
        let globe_deg_per_px = 180.0 / std::f64::consts::PI / (scale * earth);
        let m = self.morph as f64;
        let deg_per_px = map_deg_per_px + (globe_deg_per_px - map_deg_per_px) * m;

        self.flight = None;
        self.camera.center_lon = wrap_degrees(self.camera.center_lon - delta.x as f64 * deg_per_px);
        self.camera.center_lat =
            (self.camera.center_lat + delta.y as f64 * deg_per_px).clamp(-89.0, 89.0);
    }

    fn zoom_by(&mut self, scroll: f32) {
        self.camera.zoom = (self.camera.zoom * (scroll * 0.002).exp()).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    // ─── Painting ────────────────────────────────────────────────────────────

    /// Paint the scene into the remaining space of `ui`.
    ///
    /// Handles drag-to-pan and scroll-to-zoom, and returns the entity that
    /// was clicked this frame, if any.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<EntityHandle> {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;

        if response.dragged() {
            self.pan(response.drag_delta(), rect);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.zoom_by(scroll);
            }
        }

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(8, 12, 24));
        self.paint_earth(&painter, rect);
        self.paint_graticule(&painter, rect);
        self.paint_entities(&painter, rect);

        self.hovered = response.hover_pos().and_then(|p| self.pick(p, rect));
        if let Some(entity) = self.hovered.and_then(|h| self.entity(h)) {
            self.paint_card(&painter, rect, entity);
        }

        if response.clicked() {
            return response
                .interact_pointer_pos()
                .and_then(|p| self.pick(p, rect));
        }
        None
    }

    fn paint_earth(&self, painter: &egui::Painter, rect: egui::Rect) {
        let scale = self.view_scale(rect);
        let globe_alpha = (self.morph * 255.0) as u8;
        let map_alpha = 255 - globe_alpha;

        if globe_alpha > 0 {
            let radius = (EARTH_RADIUS_M / VIEW_EXTENT_M) as f32 * scale;
            painter.circle_filled(
                rect.center(),
                radius,
                egui::Color32::from_rgba_unmultiplied(22, 56, 110, globe_alpha),
            );
        }
        if map_alpha > 0 {
            let corners = [(90.0, -180.0), (90.0, 179.999), (-90.0, 179.999), (-90.0, -180.0)];
            let points: Vec<egui::Pos2> = corners
                .iter()
                .map(|&(lat, lon)| {
                    let p = self.project(lat, self.camera.center_lon + lon, 0.0);
                    self.to_screen(p, rect)
                })
                .collect();
            painter.add(egui::Shape::convex_polygon(
                points,
                egui::Color32::from_rgba_unmultiplied(22, 56, 110, map_alpha),
                egui::Stroke::NONE,
            ));
        }
    }

    fn paint_graticule(&self, painter: &egui::Painter, rect: egui::Rect) {
        for lon in (-180..180).step_by(GRATICULE_STEP_DEG as usize) {
            let samples = (-90..=90)
                .step_by(GRATICULE_SAMPLE_DEG as usize)
                .map(|lat| (lat as f64, lon as f64));
            self.trace_line(painter, rect, samples);
        }
        // parallels start at the map's left edge so they never cross the seam
        let left = self.camera.center_lon - 180.0;
        for lat in (-60..=60).step_by(GRATICULE_STEP_DEG as usize) {
            let samples = (0..360)
                .step_by(GRATICULE_SAMPLE_DEG as usize)
                .map(|d| (lat as f64, left + d as f64));
            self.trace_line(painter, rect, samples);
        }
    }

    /// Polyline through `samples` (lat, lon at ground level), broken where
    /// the globe hides it.
    fn trace_line(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        samples: impl Iterator<Item = (f64, f64)>,
    ) {
        let stroke = egui::Stroke::new(0.5, egui::Color32::from_rgba_unmultiplied(140, 170, 210, 70));
        let mut run: Vec<egui::Pos2> = Vec::new();
        for (lat, lon) in samples {
            let p = self.project(lat, lon, 0.0);
            if p.occluded {
                if run.len() > 1 {
                    painter.add(egui::Shape::line(std::mem::take(&mut run), stroke));
                }
                run.clear();
            } else {
                run.push(self.to_screen(p, rect));
            }
        }
        if run.len() > 1 {
            painter.add(egui::Shape::line(run, stroke));
        }
    }

    fn paint_entities(&self, painter: &egui::Painter, rect: egui::Rect) {
        let style = self.style;
        let [r, g, b] = style.color;
        let [or, og, ob] = style.outline_color;
        let fill = egui::Color32::from_rgb(r, g, b);
        let outline = egui::Stroke::new(style.outline_width, egui::Color32::from_rgb(or, og, ob));
        let radius = style.pixel_size * 0.5;

        for e in &self.entities {
            if let Some(pos) = self.screen_pos(&e.position, rect) {
                painter.circle(pos, radius, fill, outline);
            }
        }

        // selected last, on top of everything
        let Some(sel) = self.selected.and_then(|h| self.entity(h)) else {
            return;
        };
        if let Some(pos) = self.screen_pos(&sel.position, rect) {
            let ring = egui::Color32::from_rgb(255, 215, 0);
            painter.circle(pos, radius + 2.0, fill, outline);
            painter.circle_stroke(pos, radius + 6.0, egui::Stroke::new(2.0, ring));
            painter.text(
                pos + egui::vec2(radius + 8.0, -radius - 4.0),
                egui::Align2::LEFT_BOTTOM,
                &sel.label,
                egui::FontId::proportional(14.0),
                egui::Color32::WHITE,
            );
        }
    }

    fn paint_card(&self, painter: &egui::Painter, rect: egui::Rect, entity: &GlobeEntity) {
        let Some(anchor) = self.screen_pos(&entity.position, rect) else {
            return;
        };
        let galley = painter.layout_no_wrap(
            markup_to_text(&entity.description),
            egui::FontId::proportional(13.0),
            egui::Color32::WHITE,
        );
        let margin = egui::vec2(8.0, 6.0);
        let mut card = egui::Rect::from_min_size(
            anchor + egui::vec2(12.0, 12.0),
            galley.size() + margin * 2.0,
        );
        // keep inside the view
        if card.right() > rect.right() {
            card = card.translate(egui::vec2(-(card.width() + 24.0), 0.0));
        }
        if card.bottom() > rect.bottom() {
            card = card.translate(egui::vec2(0.0, -(card.height() + 24.0)));
        }
        painter.rect_filled(card, 4.0, egui::Color32::from_rgba_unmultiplied(10, 10, 10, 220));
        painter.galley(card.min + margin, galley, egui::Color32::WHITE);
    }
}

impl RenderTarget for GlobeScene {
    type Handle = EntityHandle;

    fn clear_all_entities(&mut self) {
        self.entities.clear();
        self.selected = None;
        self.hovered = None;
        self.flight = None;
    }

    fn add_entity(&mut self, position: Position, label: &str, description: &str) -> EntityHandle {
        self.next_handle += 1;
        let handle = EntityHandle(self.next_handle);
        self.entities.push(GlobeEntity {
            handle,
            position,
            label: label.to_string(),
            description: description.to_string(),
        });
        handle
    }

    fn set_selected_entity(&mut self, handle: EntityHandle) {
        if self.entity(handle).is_some() {
            self.selected = Some(handle);
        } else {
            log::debug!("Ignoring selection of unknown entity {:?}", handle);
        }
    }

    fn fly_to_entity(&mut self, handle: EntityHandle, duration_secs: f32) {
        let Some(target) = self.entity(handle).map(|e| e.position) else {
            log::debug!("Ignoring fly-to for unknown entity {:?}", handle);
            return;
        };
        self.flight = Some(Flight {
            from: (self.camera.center_lat, self.camera.center_lon),
            to: (target.latitude.clamp(-89.0, 89.0), target.longitude),
            elapsed: 0.0,
            duration: duration_secs,
        });
        self.tick(0.0);
    }

    fn morph_projection(&mut self, target: ProjectionMode, duration_secs: f32) {
        self.morph_anim = Some(Morph {
            from: self.morph,
            to: morph_target(target),
            elapsed: 0.0,
            duration: duration_secs,
        });
        self.tick(0.0);
    }
}

fn morph_target(mode: ProjectionMode) -> f32 {
    match mode {
        ProjectionMode::TwoD => 0.0,
        ProjectionMode::ThreeD => 1.0,
    }
}

fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Normalize to [-180, 180).
fn wrap_degrees(d: f64) -> f64 {
    (d + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn at(lat: f64, lon: f64, alt: f64) -> Position {
        Position {
            latitude: lat,
            longitude: lon,
            altitude: alt,
        }
    }

    #[test]
    fn handles_are_unique_across_clears() {
        let mut scene = GlobeScene::default();
        let a = scene.add_entity(at(0.0, 0.0, 0.0), "a", "");
        scene.clear_all_entities();
        let b = scene.add_entity(at(0.0, 0.0, 0.0), "b", "");
        assert_ne!(a, b);
        assert_eq!(scene.entities().len(), 1);
    }

    #[test]
    fn clear_drops_selection() {
        let mut scene = GlobeScene::default();
        let a = scene.add_entity(at(10.0, 10.0, 0.0), "a", "");
        scene.set_selected_entity(a);
        assert_eq!(scene.selected(), Some(a));
        scene.clear_all_entities();
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn unknown_handles_are_ignored() {
        let mut scene = GlobeScene::default();
        scene.set_selected_entity(EntityHandle(42));
        scene.fly_to_entity(EntityHandle(42), 1.2);
        assert_eq!(scene.selected(), None);
        assert!(!scene.is_animating());
    }

    #[test]
    fn fly_to_reaches_the_target() {
        let mut scene = GlobeScene::default();
        let h = scene.add_entity(at(40.0, 170.0, 2.0e7), "a", "");
        scene.fly_to_entity(h, 1.2);
        assert!(scene.is_animating());

        scene.tick(0.6);
        let mid = scene.camera();
        assert!(mid.center_lat > 0.0 && mid.center_lat < 40.0);

        scene.tick(0.7);
        assert!(!scene.is_animating());
        let cam = scene.camera();
        assert!((cam.center_lat - 40.0).abs() < 1e-9);
        assert!((cam.center_lon - 170.0).abs() < 1e-9);
    }

    #[test]
    fn fly_to_takes_the_short_way_round() {
        let mut scene = GlobeScene::default();
        let west = scene.add_entity(at(0.0, -170.0, 0.0), "w", "");
        let east = scene.add_entity(at(0.0, 170.0, 0.0), "e", "");
        scene.fly_to_entity(west, 0.0);
        scene.fly_to_entity(east, 1.0);
        scene.tick(0.5);
        // halfway across the antimeridian, not through 0
        assert!(scene.camera().center_lon.abs() > 170.0);
    }

    #[test]
    fn morph_settles_after_duration() {
        let mut scene = GlobeScene::new(ProjectionMode::ThreeD);
        assert_eq!(scene.morph_factor(), 1.0);
        scene.morph_projection(ProjectionMode::TwoD, 0.8);
        scene.tick(0.4);
        assert!(scene.morph_factor() > 0.0 && scene.morph_factor() < 1.0);
        scene.tick(0.4);
        assert_eq!(scene.morph_factor(), 0.0);
        assert!(!scene.is_animating());
    }

    #[test]
    fn later_entity_wins_hit_test() {
        let mut scene = GlobeScene::default();
        let first = scene.add_entity(at(0.0, 0.0, 2.0e7), "first", "");
        let second = scene.add_entity(at(0.0, 0.0, 2.0e7), "second", "");
        let pos = scene.screen_pos(&at(0.0, 0.0, 2.0e7), view()).unwrap();
        assert_eq!(scene.pick(pos, view()), Some(second));
        assert_ne!(scene.pick(pos, view()), Some(first));
        assert_eq!(scene.pick(egui::pos2(1.0, 1.0), view()), None);
    }

    #[test]
    fn far_side_hidden_on_globe_only() {
        let mut scene = GlobeScene::new(ProjectionMode::ThreeD);
        let behind = at(0.0, 180.0, 0.0);
        assert!(scene.screen_pos(&behind, view()).is_none());
        // high enough to peek past the limb
        assert!(scene.screen_pos(&at(0.0, 120.0, 2.0e7), view()).is_some());

        scene.morph_projection(ProjectionMode::TwoD, 0.0);
        assert!(scene.screen_pos(&behind, view()).is_some());
    }

    #[test]
    fn map_projection_is_equirectangular() {
        let scene = GlobeScene::new(ProjectionMode::TwoD);
        let p = scene.project(45.0, 90.0, 0.0);
        assert!((p.x - 0.5).abs() < 1e-12);
        assert!((p.y - 0.25).abs() < 1e-12);
        assert!(!p.occluded);
    }

    #[test]
    fn wraps_longitudes() {
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(180.0), -180.0);
    }
}
