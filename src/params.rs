//! Parameter store for the four primitives
//!
//! Every field has a static range description used both by the sliders and by
//! the store itself, so a value reaching the rasterizer is always in range.

use serde::{Deserialize, Serialize};

/// The available primitives (fixed set, one tab each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    SquareOutline = 0,
    FilledCircle = 1,
    CircleOutline = 2,
    Particle = 3,
}

impl Primitive {
    pub const ALL: [Primitive; 4] = [
        Primitive::SquareOutline,
        Primitive::FilledCircle,
        Primitive::CircleOutline,
        Primitive::Particle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Primitive::SquareOutline => "Square Outline",
            Primitive::FilledCircle => "Circle",
            Primitive::CircleOutline => "Circle Outline",
            Primitive::Particle => "Particle",
        }
    }

    pub fn from_index(i: usize) -> Option<Primitive> {
        Primitive::ALL.get(i).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Numeric controls shown for this primitive, in display order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Primitive::SquareOutline => &SQUARE_FIELDS,
            Primitive::FilledCircle => &CIRCLE_FIELDS,
            Primitive::CircleOutline => &RING_FIELDS,
            Primitive::Particle => &PARTICLE_FIELDS,
        }
    }
}

/// How a particle sprite is meant to be composited downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Additive blending: exported on an opaque black base
    Add,
    /// Normal alpha blending: exported on a transparent base
    Alpha,
}

impl BlendMode {
    pub const ALL: [BlendMode; 2] = [BlendMode::Alpha, BlendMode::Add];

    pub fn label(&self) -> &'static str {
        match self {
            BlendMode::Add => "Additive",
            BlendMode::Alpha => "Alpha Blend",
        }
    }
}

/// Identifies one numeric input across all primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SquareStrokeWidth,
    CircleDiameter,
    RingDiameter,
    RingStrokeWidth,
    ParticleSize,
    ParticleWeight,
}

impl Field {
    pub fn primitive(&self) -> Primitive {
        match self {
            Field::SquareStrokeWidth => Primitive::SquareOutline,
            Field::CircleDiameter => Primitive::FilledCircle,
            Field::RingDiameter | Field::RingStrokeWidth => Primitive::CircleOutline,
            Field::ParticleSize | Field::ParticleWeight => Primitive::Particle,
        }
    }

    pub fn spec(&self) -> &'static FieldSpec {
        match self {
            Field::SquareStrokeWidth => &SQUARE_FIELDS[0],
            Field::CircleDiameter => &CIRCLE_FIELDS[0],
            Field::RingDiameter => &RING_FIELDS[0],
            Field::RingStrokeWidth => &RING_FIELDS[1],
            Field::ParticleSize => &PARTICLE_FIELDS[0],
            Field::ParticleWeight => &PARTICLE_FIELDS[1],
        }
    }
}

/// Range, granularity and label of one control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    /// When set, only these values are selectable (step is ignored)
    pub marks: Option<&'static [u32]>,
    /// Whether the value is a pixel length ("px" suffix on display)
    pub pixels: bool,
}

impl FieldSpec {
    /// Clamp to range and snap to the nearest step or mark
    pub fn snap(&self, value: u32) -> u32 {
        if let Some(marks) = self.marks {
            return marks
                .iter()
                .copied()
                .min_by_key(|m| m.abs_diff(value))
                .unwrap_or(self.min);
        }
        let clamped = value.clamp(self.min, self.max);
        let step = self.step.max(1);
        let steps = (clamped - self.min + step / 2) / step;
        (self.min + steps * step).min(self.max)
    }

    /// Value at a 0.0-1.0 slider position
    pub fn value_at(&self, t: f32) -> u32 {
        let t = t.clamp(0.0, 1.0);
        let raw = self.min as f32 + t * (self.max - self.min) as f32;
        self.snap(raw.round() as u32)
    }

    /// Slider position (0.0-1.0) of a value
    pub fn fraction_of(&self, value: u32) -> f32 {
        if self.max <= self.min {
            return 0.0;
        }
        (value.clamp(self.min, self.max) - self.min) as f32 / (self.max - self.min) as f32
    }

    /// Next selectable value above (`up`) or below the current one
    pub fn nudge(&self, value: u32, up: bool) -> u32 {
        if let Some(marks) = self.marks {
            let next = if up {
                marks.iter().copied().find(|m| *m > value)
            } else {
                marks.iter().rev().copied().find(|m| *m < value)
            };
            return next.unwrap_or(value);
        }
        let step = self.step.max(1);
        let raw = if up { value.saturating_add(step) } else { value.saturating_sub(step) };
        self.snap(raw)
    }

    /// Display text for a value ("10px", "50")
    pub fn format(&self, value: u32) -> String {
        if self.pixels {
            format!("{}px", value)
        } else {
            value.to_string()
        }
    }
}

/// Selectable particle sizes (powers of two)
pub const PARTICLE_SIZES: [u32; 5] = [32, 64, 128, 256, 512];

static SQUARE_FIELDS: [FieldSpec; 1] = [FieldSpec {
    field: Field::SquareStrokeWidth,
    label: "Width",
    min: 1,
    max: 50,
    step: 1,
    marks: None,
    pixels: true,
}];

static CIRCLE_FIELDS: [FieldSpec; 1] = [FieldSpec {
    field: Field::CircleDiameter,
    label: "Diameter",
    min: 2,
    max: 512,
    step: 2,
    marks: None,
    pixels: true,
}];

static RING_FIELDS: [FieldSpec; 2] = [
    FieldSpec {
        field: Field::RingDiameter,
        label: "Diameter",
        min: 2,
        max: 512,
        step: 2,
        marks: None,
        pixels: true,
    },
    FieldSpec {
        field: Field::RingStrokeWidth,
        label: "Width",
        min: 1,
        max: 256,
        step: 1,
        marks: None,
        pixels: true,
    },
];

static PARTICLE_FIELDS: [FieldSpec; 2] = [
    FieldSpec {
        field: Field::ParticleSize,
        label: "Size",
        min: 32,
        max: 512,
        step: 1,
        marks: Some(&PARTICLE_SIZES),
        pixels: true,
    },
    FieldSpec {
        field: Field::ParticleWeight,
        label: "Falloff",
        min: 0,
        max: 100,
        step: 1,
        marks: None,
        pixels: false,
    },
];

/// Square outline parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareParams {
    pub stroke_width: u32,
}

impl SquareParams {
    pub fn filename(&self) -> String {
        format!("wired-rect-{}.png", self.stroke_width)
    }

    pub fn caption(&self) -> String {
        let size = self.stroke_width * 2 + 2;
        format!("{}x{}", size, size)
    }
}

/// Filled circle parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleParams {
    pub diameter: u32,
}

impl CircleParams {
    pub fn filename(&self) -> String {
        format!("circle-{0}x{0}.png", self.diameter)
    }

    pub fn caption(&self) -> String {
        format!("{0}x{0}", self.diameter)
    }
}

/// Circle outline parameters.
///
/// Invariant: `stroke_width <= diameter / 2`. Fields are private so every
/// update goes through the clamping setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingParams {
    diameter: u32,
    stroke_width: u32,
}

impl RingParams {
    pub fn new(diameter: u32, stroke_width: u32) -> Self {
        let mut p = Self { diameter, stroke_width };
        p.set_stroke_width(stroke_width);
        p
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    /// Set the diameter, shrinking the stroke if it no longer fits
    pub fn set_diameter(&mut self, diameter: u32) {
        self.diameter = diameter;
        self.stroke_width = self.stroke_width.min(diameter / 2);
    }

    /// Set the stroke width, capped at half the diameter
    pub fn set_stroke_width(&mut self, stroke_width: u32) {
        self.stroke_width = stroke_width.min(self.diameter / 2);
    }

    /// Radius of the stroked path: the outer stroke edge lands on the diameter
    pub fn ring_radius(&self) -> f32 {
        (self.diameter as f32 - self.stroke_width as f32) / 2.0
    }

    pub fn filename(&self) -> String {
        format!("wired-circle-{0}x{0} ({1}).png", self.diameter, self.stroke_width)
    }

    pub fn caption(&self) -> String {
        format!("{0}x{0}", self.diameter)
    }
}

/// Radial particle parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleParams {
    pub size: u32,
    pub mode: BlendMode,
    /// Falloff radius as a percentage of half the size
    pub weight: u32,
}

impl ParticleParams {
    /// Radius where the gradient alpha reaches zero
    pub fn falloff_radius(&self) -> f32 {
        self.size as f32 * self.weight as f32 / 200.0
    }

    pub fn filename(&self) -> String {
        format!("particle-{0}x{0} ({1}).png", self.size, self.weight)
    }

    pub fn caption(&self) -> String {
        format!("{0}x{0} ({1})", self.size, self.weight)
    }
}

/// A snapshot of one primitive's parameters, handed to the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Params {
    SquareOutline(SquareParams),
    FilledCircle(CircleParams),
    CircleOutline(RingParams),
    Particle(ParticleParams),
}

impl Params {
    /// Suggested download filename
    pub fn filename(&self) -> String {
        match self {
            Params::SquareOutline(p) => p.filename(),
            Params::FilledCircle(p) => p.filename(),
            Params::CircleOutline(p) => p.filename(),
            Params::Particle(p) => p.filename(),
        }
    }

    /// Size label shown under the result thumbnail
    pub fn caption(&self) -> String {
        match self {
            Params::SquareOutline(p) => p.caption(),
            Params::FilledCircle(p) => p.caption(),
            Params::CircleOutline(p) => p.caption(),
            Params::Particle(p) => p.caption(),
        }
    }
}

/// Current inputs of every primitive for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterStore {
    pub square: SquareParams,
    pub circle: CircleParams,
    pub ring: RingParams,
    pub particle: ParticleParams,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            square: SquareParams { stroke_width: 10 },
            circle: CircleParams { diameter: 128 },
            ring: RingParams::new(128, 10),
            particle: ParticleParams {
                size: 128,
                mode: BlendMode::Add,
                weight: 50,
            },
        }
    }
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one primitive's parameters
    pub fn params(&self, primitive: Primitive) -> Params {
        match primitive {
            Primitive::SquareOutline => Params::SquareOutline(self.square),
            Primitive::FilledCircle => Params::FilledCircle(self.circle),
            Primitive::CircleOutline => Params::CircleOutline(self.ring),
            Primitive::Particle => Params::Particle(self.particle),
        }
    }

    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::SquareStrokeWidth => self.square.stroke_width,
            Field::CircleDiameter => self.circle.diameter,
            Field::RingDiameter => self.ring.diameter(),
            Field::RingStrokeWidth => self.ring.stroke_width(),
            Field::ParticleSize => self.particle.size,
            Field::ParticleWeight => self.particle.weight,
        }
    }

    /// Apply one `(field, value)` update from the control surface.
    /// Returns true if any stored value changed.
    pub fn set(&mut self, field: Field, value: u32) -> bool {
        let before = self.params(field.primitive());
        let value = field.spec().snap(value);
        match field {
            Field::SquareStrokeWidth => self.square.stroke_width = value,
            Field::CircleDiameter => self.circle.diameter = value,
            Field::RingDiameter => self.ring.set_diameter(value),
            Field::RingStrokeWidth => self.ring.set_stroke_width(value),
            Field::ParticleSize => self.particle.size = value,
            Field::ParticleWeight => self.particle.weight = value,
        }
        self.params(field.primitive()) != before
    }

    /// Select the particle blend mode. Returns true if it changed.
    pub fn set_mode(&mut self, mode: BlendMode) -> bool {
        let changed = self.particle.mode != mode;
        self.particle.mode = mode;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let store = ParameterStore::new();
        assert_eq!(store.get(Field::SquareStrokeWidth), 10);
        assert_eq!(store.get(Field::CircleDiameter), 128);
        assert_eq!(store.get(Field::RingDiameter), 128);
        assert_eq!(store.get(Field::RingStrokeWidth), 10);
        assert_eq!(store.get(Field::ParticleSize), 128);
        assert_eq!(store.get(Field::ParticleWeight), 50);
        assert_eq!(store.particle.mode, BlendMode::Add);
    }

    #[test]
    fn test_ring_clamp_scenario() {
        let mut store = ParameterStore::new();
        store.set(Field::RingStrokeWidth, 80);
        assert_eq!(store.get(Field::RingStrokeWidth), 64);
    }

    #[test]
    fn test_ring_clamp_on_diameter_shrink() {
        let mut store = ParameterStore::new();
        store.set(Field::RingStrokeWidth, 60);
        assert_eq!(store.get(Field::RingStrokeWidth), 60);
        store.set(Field::RingDiameter, 100);
        assert_eq!(store.get(Field::RingStrokeWidth), 50);
        // Growing the diameter back does not restore the old width
        store.set(Field::RingDiameter, 512);
        assert_eq!(store.get(Field::RingStrokeWidth), 50);
    }

    #[test]
    fn test_ring_invariant_any_order() {
        let mut store = ParameterStore::new();
        let updates = [
            (Field::RingDiameter, 2),
            (Field::RingStrokeWidth, 256),
            (Field::RingDiameter, 300),
            (Field::RingStrokeWidth, 200),
            (Field::RingDiameter, 10),
            (Field::RingStrokeWidth, 3),
            (Field::RingDiameter, 6),
            (Field::RingStrokeWidth, 4),
        ];
        for (field, value) in updates {
            store.set(field, value);
            assert!(store.ring.stroke_width() <= store.ring.diameter() / 2, "{:?}", store.ring);
        }
        assert_eq!(store.ring.diameter(), 6);
        assert_eq!(store.ring.stroke_width(), 3);
    }

    #[test]
    fn test_snap() {
        assert_eq!(Field::CircleDiameter.spec().snap(129), 130);
        assert_eq!(Field::CircleDiameter.spec().snap(0), 2);
        assert_eq!(Field::CircleDiameter.spec().snap(9999), 512);
        assert_eq!(Field::SquareStrokeWidth.spec().snap(0), 1);
        assert_eq!(Field::ParticleSize.spec().snap(100), 128);
        assert_eq!(Field::ParticleSize.spec().snap(90), 64);
        assert_eq!(Field::ParticleSize.spec().snap(1000), 512);
    }

    #[test]
    fn test_slider_mapping() {
        let spec = Field::ParticleWeight.spec();
        assert_eq!(spec.value_at(0.0), 0);
        assert_eq!(spec.value_at(1.0), 100);
        assert_eq!(spec.value_at(0.5), 50);
        assert!((spec.fraction_of(25) - 0.25).abs() < 1e-6);
        assert_eq!(Field::CircleDiameter.spec().value_at(2.0), 512);
    }

    #[test]
    fn test_nudge() {
        let size = Field::ParticleSize.spec();
        assert_eq!(size.nudge(128, true), 256);
        assert_eq!(size.nudge(128, false), 64);
        assert_eq!(size.nudge(512, true), 512);
        assert_eq!(size.nudge(32, false), 32);

        let diameter = Field::CircleDiameter.spec();
        assert_eq!(diameter.nudge(128, true), 130);
        assert_eq!(diameter.nudge(2, false), 2);
        assert_eq!(diameter.nudge(512, true), 512);
        assert_eq!(Field::ParticleWeight.spec().nudge(0, false), 0);
    }

    #[test]
    fn test_set_reports_change() {
        let mut store = ParameterStore::new();
        assert!(!store.set(Field::CircleDiameter, 128));
        assert!(store.set(Field::CircleDiameter, 64));
        assert!(!store.set_mode(BlendMode::Add));
        assert!(store.set_mode(BlendMode::Alpha));
    }

    #[test]
    fn test_filenames() {
        assert_eq!(SquareParams { stroke_width: 10 }.filename(), "wired-rect-10.png");
        assert_eq!(CircleParams { diameter: 256 }.filename(), "circle-256x256.png");
        assert_eq!(RingParams::new(128, 80).filename(), "wired-circle-128x128 (64).png");
        let p = ParticleParams { size: 128, mode: BlendMode::Alpha, weight: 50 };
        assert_eq!(p.filename(), "particle-128x128 (50).png");
        assert_eq!(Params::Particle(p).caption(), "128x128 (50)");
        assert_eq!(Params::SquareOutline(SquareParams { stroke_width: 10 }).caption(), "22x22");
    }

    #[test]
    fn test_field_table() {
        for primitive in Primitive::ALL {
            for spec in primitive.fields() {
                assert_eq!(spec.field.primitive(), primitive);
                assert_eq!(spec.field.spec(), spec);
            }
        }
    }
}
