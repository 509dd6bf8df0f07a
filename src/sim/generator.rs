//! Procedural obstacle generation for endless play
//!
//! Each beat advances a cursor by a base gap plus a random extra gap, then
//! rolls once to pick a pattern. The probability bands define how hard a run
//! feels, so their order and boundaries are fixed:
//!
//! | roll              | pattern                   | p    |
//! |-------------------|---------------------------|------|
//! | r < 0.25          | single spike              | 0.25 |
//! | 0.25 <= r < 0.40  | double spike              | 0.15 |
//! | 0.40 <= r < 0.50  | moving spike              | 0.10 |
//! | 0.50 <= r < 0.65  | block (+ trailing spike)  | 0.15 |
//! | 0.65 <= r <= 0.78 | triple spike + coin       | 0.13 |
//! | 0.78 < r <= 0.85  | rocket pickup + fire ring | 0.07 |
//! | r > 0.85          | spinning blade (+ coin)   | 0.15 |
//! | otherwise         | coin path                 | 0    |

use rand::Rng;

use super::state::Obstacle;

/// Standard density
pub const DENSITY: f32 = 0.9;
/// Minimum spacing between beats before density scaling
pub const BASE_GAP: f32 = 350.0;
/// Upper bound of the random extra spacing before density scaling
pub const VARIABLE_GAP: f32 = 200.0;
/// Distance from a rocket pickup to its fire ring
pub const RING_LEAD: f32 = 350.0;
/// Cursor clearance after a fire ring
pub const RING_CLEARANCE: f32 = 100.0;

/// Source of uniform numbers in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    index: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}

/// Obstacle arrangement placed at one beat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    SingleSpike,
    DoubleSpike,
    TripleSpike,
    Block,
    MovingSpike,
    SpinningBlade,
    RingOfFire,
    CoinPath,
}

impl Pattern {
    pub const ALL: [Pattern; 8] = [
        Pattern::SingleSpike,
        Pattern::DoubleSpike,
        Pattern::TripleSpike,
        Pattern::Block,
        Pattern::MovingSpike,
        Pattern::SpinningBlade,
        Pattern::RingOfFire,
        Pattern::CoinPath,
    ];

    /// Map a uniform roll onto its band
    pub fn from_roll(r: f64) -> Self {
        if r > 0.85 {
            Pattern::SpinningBlade
        } else if r > 0.78 && r <= 0.85 {
            Pattern::RingOfFire
        } else if r < 0.25 {
            Pattern::SingleSpike
        } else if r < 0.4 {
            Pattern::DoubleSpike
        } else if r < 0.5 {
            Pattern::MovingSpike
        } else if r < 0.65 {
            Pattern::Block
        } else if r <= 0.78 {
            Pattern::TripleSpike
        } else {
            Pattern::CoinPath
        }
    }

    /// Width of the band `from_roll` maps onto this pattern
    pub fn probability(&self) -> f64 {
        match self {
            Pattern::SingleSpike => 0.25,
            Pattern::DoubleSpike => 0.15,
            Pattern::MovingSpike => 0.10,
            Pattern::Block => 0.15,
            Pattern::TripleSpike => 0.13,
            Pattern::RingOfFire => 0.07,
            Pattern::SpinningBlade => 0.15,
            Pattern::CoinPath => 0.0,
        }
    }
}

/// One generated beat
#[derive(Debug, Clone)]
pub struct Beat {
    pub pattern: Pattern,
    /// Cursor position the pattern was placed at
    pub cursor: f32,
    pub obstacles: Vec<Obstacle>,
}

/// Generate `count` beats starting after `start_x`
pub fn generate_beats<R: RandomSource + ?Sized>(start_x: f32, count: usize, rng: &mut R) -> Vec<Beat> {
    let mut beats = Vec::with_capacity(count);
    let mut cursor = start_x;

    for _ in 0..count {
        let roll = rng.next_unit();
        let base_gap = BASE_GAP * DENSITY;
        let var_gap = rng.next_unit() as f32 * VARIABLE_GAP * DENSITY;
        cursor += base_gap + var_gap;

        let pattern = Pattern::from_roll(roll);
        let x = cursor;
        let mut obstacles = Vec::new();

        match pattern {
            Pattern::SpinningBlade => {
                let elevation = if rng.next_unit() > 0.5 { 40.0 } else { 100.0 };
                obstacles.push(Obstacle::spinning_blade(x, elevation));
                if rng.next_unit() > 0.5 {
                    obstacles.push(Obstacle::coin(x + 10.0, elevation + 60.0));
                }
            }
            Pattern::RingOfFire => {
                obstacles.push(Obstacle::rocket_pickup(x, 50.0));
                let ring_x = x + RING_LEAD;
                obstacles.push(Obstacle::fire_ring(ring_x, 70.0));
                cursor = ring_x + RING_CLEARANCE;
            }
            Pattern::SingleSpike => {
                obstacles.push(Obstacle::spike(x, 0.0));
            }
            Pattern::DoubleSpike => {
                obstacles.push(Obstacle::spike(x, 0.0));
                obstacles.push(Obstacle::spike(x + 35.0, 0.0));
            }
            Pattern::MovingSpike => {
                obstacles.push(Obstacle::moving_spike(x, 0.0));
            }
            Pattern::Block => {
                obstacles.push(Obstacle::block(x, 0.0));
                if rng.next_unit() > 0.5 {
                    obstacles.push(Obstacle::spike(x + 250.0, 0.0));
                }
            }
            Pattern::TripleSpike => {
                obstacles.push(Obstacle::spike(x, 0.0));
                obstacles.push(Obstacle::spike(x + 30.0, 0.0));
                obstacles.push(Obstacle::spike(x + 60.0, 0.0));
                obstacles.push(Obstacle::coin(x + 30.0, 100.0));
            }
            Pattern::CoinPath => {
                obstacles.push(Obstacle::coin(x, 50.0));
                obstacles.push(Obstacle::coin(x + 100.0, 80.0));
            }
        }

        beats.push(Beat {
            pattern,
            cursor: x,
            obstacles,
        });
    }

    beats
}

/// Generate a chunk of `count` beats as a flat obstacle list
pub fn generate_chunk<R: RandomSource + ?Sized>(start_x: f32, count: usize, rng: &mut R) -> Vec<Obstacle> {
    generate_beats(start_x, count, rng)
        .into_iter()
        .flat_map(|beat| beat.obstacles)
        .collect()
}
