//! Geometry of the photoelectric apparatus
//!
//! A square vacuum chamber holds two plates: the emitter (photocathode) at the
//! bottom and the collector (anode) at the top. A voltmeter left of the
//! chamber is wired to both plates through small terminals.

use glam::Vec2;

/// Sizes of the apparatus parts in world units
#[derive(Debug, Clone, Copy)]
pub struct ApparatusStyle {
    pub chamber_size: f32,
    pub plate_width: f32,
    pub plate_height: f32,
    pub plate_separation: f32,
    pub terminal_radius: f32,
    pub voltmeter_radius: f32,
    /// Voltage that swings the needle fully to one side
    pub voltmeter_full_scale: f32,
}

impl Default for ApparatusStyle {
    fn default() -> Self {
        Self {
            chamber_size: 4.0,
            plate_width: 2.5,
            plate_height: 0.3,
            plate_separation: 2.0,
            terminal_radius: 0.1,
            voltmeter_radius: 0.5,
            voltmeter_full_scale: 5.0,
        }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            max: center + size * 0.5,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn top(&self) -> Vec2 {
        Vec2::new(self.center().x, self.max.y)
    }

    pub fn bottom(&self) -> Vec2 {
        Vec2::new(self.center().x, self.min.y)
    }

    pub fn left(&self) -> Vec2 {
        Vec2::new(self.min.x, self.center().y)
    }

    pub fn right(&self) -> Vec2 {
        Vec2::new(self.max.x, self.center().y)
    }
}

/// Placed apparatus, centered on the chamber
#[derive(Debug, Clone)]
pub struct Apparatus {
    pub style: ApparatusStyle,
    pub chamber: Rect,
    pub emitter: Rect,
    pub collector: Rect,
    pub emitter_terminal: Vec2,
    pub collector_terminal: Vec2,
    pub voltmeter_center: Vec2,
    /// Plate to terminal wires
    pub plate_wires: [[Vec2; 2]; 2],
    /// Voltmeter to collector terminal (up, across, down)
    pub collector_circuit: [Vec2; 4],
    /// Voltmeter to emitter terminal (down, across, up)
    pub emitter_circuit: [Vec2; 4],
}

impl Apparatus {
    pub fn new(style: ApparatusStyle, center: Vec2) -> Self {
        let plate = Vec2::new(style.plate_width, style.plate_height);
        let half_gap = Vec2::Y * style.plate_separation * 0.5;

        let chamber = Rect::from_center(center, Vec2::splat(style.chamber_size));
        let emitter = Rect::from_center(center - half_gap, plate);
        let collector = Rect::from_center(center + half_gap, plate);

        // Terminals sit just left of each plate
        let terminal_offset = Vec2::X * (0.1 + style.terminal_radius);
        let emitter_terminal = emitter.left() - terminal_offset;
        let collector_terminal = collector.left() - terminal_offset;

        let voltmeter_center = chamber.left() - Vec2::X * 1.5;
        let meter_top = voltmeter_center + Vec2::Y * style.voltmeter_radius;
        let meter_bottom = voltmeter_center - Vec2::Y * style.voltmeter_radius;

        let up = meter_top + Vec2::Y * 0.5;
        let down = meter_bottom - Vec2::Y * 0.5;

        Self {
            style,
            chamber,
            emitter,
            collector,
            emitter_terminal,
            collector_terminal,
            voltmeter_center,
            plate_wires: [
                [emitter.left(), emitter_terminal],
                [collector.left(), collector_terminal],
            ],
            collector_circuit: [
                meter_top,
                up,
                Vec2::new(collector_terminal.x, up.y),
                collector_terminal,
            ],
            emitter_circuit: [
                meter_bottom,
                down,
                Vec2::new(emitter_terminal.x, down.y),
                emitter_terminal,
            ],
        }
    }

    /// Top face of the emitter, where electrons leave the metal
    pub fn emitter_surface(&self) -> Vec2 {
        self.emitter.top()
    }

    /// Bottom face of the collector
    pub fn collector_surface(&self) -> Vec2 {
        self.collector.bottom()
    }

    /// Distance electrons must cross between the plates
    pub fn gap(&self) -> f32 {
        self.collector_surface().y - self.emitter_surface().y
    }

    /// Where new photons appear, just right of the chamber
    pub fn photon_spawn(&self) -> Vec2 {
        self.chamber.right() + Vec2::X * 0.5
    }

    /// Needle angle in degrees: 0 points up, −90 left, +90 right
    pub fn needle_angle(&self, voltage: f32) -> f32 {
        let full_scale = self.style.voltmeter_full_scale.max(f32::EPSILON);
        (voltage / full_scale).clamp(-1.0, 1.0) * 90.0
    }

    /// Tip of the voltmeter needle for an angle in degrees
    pub fn needle_end(&self, angle_degrees: f32) -> Vec2 {
        let a = angle_degrees.to_radians();
        let length = self.style.voltmeter_radius * 0.7;
        self.voltmeter_center + Vec2::new(a.sin(), a.cos()) * length
    }
}

impl Default for Apparatus {
    fn default() -> Self {
        Self::new(ApparatusStyle::default(), Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_plate_placement() {
        let apparatus = Apparatus::default();
        assert!(close(apparatus.emitter.center(), Vec2::new(0.0, -1.0)));
        assert!(close(apparatus.collector.center(), Vec2::new(0.0, 1.0)));
        assert!(close(apparatus.emitter_surface(), Vec2::new(0.0, -0.85)));
        assert!(close(apparatus.collector_surface(), Vec2::new(0.0, 0.85)));
        assert!((apparatus.gap() - 1.7).abs() < 1e-5);
        assert!((apparatus.emitter.width() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_plates_inside_chamber() {
        let a = Apparatus::default();
        for plate in [a.emitter, a.collector] {
            assert!(plate.min.cmpge(a.chamber.min).all());
            assert!(plate.max.cmple(a.chamber.max).all());
        }
    }

    #[test]
    fn test_voltmeter_and_terminals() {
        let a = Apparatus::default();
        assert!(close(a.voltmeter_center, Vec2::new(-3.5, 0.0)));
        assert!(close(a.emitter_terminal, Vec2::new(-1.45, -1.0)));
        assert!(close(a.collector_circuit[0], Vec2::new(-3.5, 0.5)));
        assert!(close(a.collector_circuit[1], Vec2::new(-3.5, 1.0)));
        assert!(close(a.emitter_circuit[2], Vec2::new(-1.45, -1.0)));
        assert!(close(a.photon_spawn(), Vec2::new(2.5, 0.0)));
    }

    #[test]
    fn test_needle() {
        let a = Apparatus::default();
        assert!(close(a.needle_end(0.0), Vec2::new(-3.5, 0.35)));
        assert!(close(a.needle_end(90.0), Vec2::new(-3.15, 0.0)));
        assert!(close(a.needle_end(-90.0), Vec2::new(-3.85, 0.0)));

        assert_eq!(a.needle_angle(0.0), 0.0);
        assert_eq!(a.needle_angle(2.5), 45.0);
        assert_eq!(a.needle_angle(50.0), 90.0);
        assert_eq!(a.needle_angle(-50.0), -90.0);
    }

    #[test]
    fn test_offset_center_moves_everything() {
        let shifted = Apparatus::new(ApparatusStyle::default(), Vec2::new(1.0, 2.0));
        let base = Apparatus::default();
        let d = Vec2::new(1.0, 2.0);
        assert!(close(shifted.voltmeter_center, base.voltmeter_center + d));
        assert!(close(shifted.photon_spawn(), base.photon_spawn() + d));
    }
}
