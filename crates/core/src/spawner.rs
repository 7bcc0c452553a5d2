//! Spawner module - which shape comes next
//!
//! The session asks a [`Spawner`] for the next shape on every landing and
//! shows [`Spawner::preview`] as the "next" piece. [`RandomSpawner`] draws
//! uniformly from the seven shapes with a small seeded LCG so sessions are
//! reproducible; [`ScriptedSpawner`] replays a fixed sequence.

use crate::types::ShapeKind;

/// Source of piece shapes.
pub trait Spawner {
    /// Consume and return the next shape.
    fn next_piece_shape(&mut self) -> ShapeKind;

    /// Shape the next call to [`Spawner::next_piece_shape`] will return.
    fn preview(&self) -> ShapeKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG have short periods.
        (self.next_u32() >> 16) % max.max(1)
    }
}

/// Uniform random shapes with a one-shape lookahead.
#[derive(Debug, Clone)]
pub struct RandomSpawner {
    rng: SimpleRng,
    next: ShapeKind,
}

impl RandomSpawner {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::draw(&mut rng);
        Self { rng, next }
    }

    fn draw(rng: &mut SimpleRng) -> ShapeKind {
        ShapeKind::ALL[rng.next_range(ShapeKind::ALL.len() as u32) as usize]
    }
}

impl Spawner for RandomSpawner {
    fn next_piece_shape(&mut self) -> ShapeKind {
        let current = self.next;
        self.next = Self::draw(&mut self.rng);
        current
    }

    fn preview(&self) -> ShapeKind {
        self.next
    }
}

/// Cycles through a fixed list of shapes.
#[derive(Debug, Clone)]
pub struct ScriptedSpawner {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl ScriptedSpawner {
    /// An empty list behaves like `[ShapeKind::O]`.
    pub fn new(shapes: impl Into<Vec<ShapeKind>>) -> Self {
        let mut shapes = shapes.into();
        if shapes.is_empty() {
            shapes.push(ShapeKind::O);
        }
        Self { shapes, index: 0 }
    }
}

impl Spawner for ScriptedSpawner {
    fn next_piece_shape(&mut self) -> ShapeKind {
        let shape = self.shapes[self.index];
        self.index = (self.index + 1) % self.shapes.len();
        shape
    }

    fn preview(&self) -> ShapeKind {
        self.shapes[self.index]
    }
}
