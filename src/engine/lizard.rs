//! Spine simulator: the lizard's body chain and its animation timers.
//!
//! The head eases toward the pointer; every following segment chases its
//! predecessor by a damped fraction and picks up a travelling wave. This is
//! a deliberately simple follow chain, not a constraint solver.

use std::f64::consts::PI;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::SEGMENT_COUNT;
use crate::types::Point;

use super::geometry::normal;

/// Time dilation applied to `dt` before it drives the wave.
const TIME_SCALE: f64 = 50.0;
/// Fraction of the remaining head→pointer distance covered per tick.
const HEAD_EASE: f64 = 0.12;

/// Where a leg attaches and how it moves in the gait cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegConfig {
    /// Spine segment the hip sits on.
    pub segment: usize,
    /// -1 for the left side, +1 for the right.
    pub side: f64,
    /// Offset into the shared gait cycle, in radians.
    pub phase: f64,
}

/// Front pair on segment 10, back pair on 22; diagonal legs move together.
pub const LEGS: [LegConfig; 4] = [
    LegConfig { segment: 10, side: -1.0, phase: 0.0 },
    LegConfig { segment: 10, side: 1.0, phase: PI },
    LegConfig { segment: 22, side: -1.0, phase: PI },
    LegConfig { segment: 22, side: 1.0, phase: 0.0 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TongueDirection {
    Retract,
    Rest,
    Extend,
}

impl TongueDirection {
    pub fn sign(self) -> f64 {
        match self {
            TongueDirection::Retract => -1.0,
            TongueDirection::Rest => 0.0,
            TongueDirection::Extend => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Tongue {
    extension: f64,
    direction: TongueDirection,
    speed: f64,
}

#[derive(Debug, Clone)]
struct Blink {
    amount: f64,
    timer: f64,
}

#[derive(Debug, Clone)]
pub struct Lizard {
    spine: Vec<Point>,
    time: f64,
    speed: f64,
    tongue: Tongue,
    blink: Blink,
    rng: ChaCha8Rng,
}

impl Lizard {
    /// A lizard curled up on `start`, drawing its randomness from `rng`.
    pub fn new(start: Point, mut rng: ChaCha8Rng) -> Self {
        let tongue = Tongue {
            extension: 0.0,
            direction: TongueDirection::Extend,
            speed: rng.random_range(0.03..0.07),
        };
        let blink = Blink { amount: 0.0, timer: rng.random_range(2.0..5.0) };
        Lizard {
            spine: vec![start; SEGMENT_COUNT],
            time: 0.0,
            speed: 0.0,
            tongue,
            blink,
            rng,
        }
    }

    pub fn seeded(start: Point, seed: u64) -> Self {
        Self::new(start, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Advance one tick toward the pointer at `(pointer_x, pointer_y)`.
    /// `dt` is the wall-clock delta in seconds.
    pub fn update(&mut self, pointer_x: f64, pointer_y: f64, dt: f64) {
        let pointer = Point::new(pointer_x, pointer_y);
        self.time += dt * TIME_SCALE;

        let old_head = self.spine[0];
        self.spine[0] = old_head + (pointer - old_head) * HEAD_EASE;
        self.speed = old_head.distance_to(pointer);

        let amplitude = self.wave_amplitude();
        for i in 1..self.spine.len() {
            let f = i as f64;
            let lateral = (self.time * 0.12 - f * 0.22).sin() * amplitude * if i < 8 { 0.2 } else { 1.0 };
            let vertical = (self.time * 0.10 - f * 0.18).cos() * amplitude * 0.3;
            let follow = (0.28 - f * 0.002).max(0.07);
            let pull = (self.spine[i - 1] - self.spine[i]) * follow;
            self.spine[i] = self.spine[i] + pull + Point::new(lateral, vertical);
        }

        self.update_tongue();
        self.update_blink(dt);
    }

    fn update_tongue(&mut self) {
        let t = &mut self.tongue;
        t.extension += t.direction.sign() * t.speed;
        if t.extension >= 1.0 {
            t.extension = 1.0;
            t.direction = TongueDirection::Retract;
        } else if t.extension <= 0.0 {
            t.extension = 0.0;
            t.direction = if self.rng.random_bool(0.7) {
                TongueDirection::Extend
            } else {
                TongueDirection::Rest
            };
            t.speed = self.rng.random_range(0.03..0.08);
        }
    }

    fn update_blink(&mut self, dt: f64) {
        let b = &mut self.blink;
        b.timer -= dt;
        if b.timer <= 0.0 {
            b.amount = 1.0;
            b.timer = self.rng.random_range(3.0..7.0);
        }
        if b.amount > 0.0 {
            b.amount = (b.amount - dt * 8.0).clamp(0.0, 1.0);
        }
    }

    /// Unit normal at segment `i`, from the direction toward the next
    /// segment (or from the previous one, for the tail tip).
    pub fn normal_at(&self, i: usize) -> Point {
        let last = self.spine.len() - 1;
        if i < last {
            normal(self.spine[i], self.spine[i + 1])
        } else {
            normal(self.spine[last - 1], self.spine[last])
        }
    }

    /// Segment positions, head first.
    pub fn spine(&self) -> &[Point] {
        &self.spine
    }

    pub fn segment(&self, i: usize) -> Point {
        self.spine[i]
    }

    pub fn head(&self) -> Point {
        self.spine[0]
    }

    /// Scaled animation clock.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Distance between the head and the pointer at the last update.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn wave_amplitude(&self) -> f64 {
        (self.speed * 0.04).clamp(0.2, 3.5)
    }

    /// Gait intensity in `[0, 1]`.
    pub fn walk_speed(&self) -> f64 {
        (self.speed * 0.04).clamp(0.0, 1.0)
    }

    pub fn legs(&self) -> &'static [LegConfig] {
        &LEGS
    }

    pub fn tongue_extension(&self) -> f64 {
        self.tongue.extension
    }

    pub fn tongue_direction(&self) -> TongueDirection {
        self.tongue.direction
    }

    pub fn tongue_speed(&self) -> f64 {
        self.tongue.speed
    }

    pub fn blink_amount(&self) -> f64 {
        self.blink.amount
    }

    pub fn blink_timer(&self) -> f64 {
        self.blink.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.016;

    #[test]
    fn starts_collapsed_on_spawn_point() {
        let liz = Lizard::seeded(Point::new(10.0, 20.0), 1);
        assert_eq!(liz.spine().len(), SEGMENT_COUNT);
        assert!(liz.spine().iter().all(|p| *p == Point::new(10.0, 20.0)));
        assert!((0.03..0.07).contains(&liz.tongue_speed()));
        assert!((2.0..5.0).contains(&liz.blink_timer()));
        assert_eq!(liz.tongue_direction(), TongueDirection::Extend);
    }

    #[test]
    fn head_eases_twelve_percent_toward_pointer() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 2);
        liz.update(100.0, -50.0, DT);
        let head = liz.head();
        assert!((head.x - 12.0).abs() < 1e-12);
        assert!((head.y + 6.0).abs() < 1e-12);
        // Measured from where the head was before moving.
        assert!((liz.speed() - 100f64.hypot(50.0)).abs() < 1e-9);
        assert_eq!(liz.wave_amplitude(), 3.5);
        assert_eq!(liz.walk_speed(), 1.0);
    }

    #[test]
    fn stationary_pointer_drives_amplitude_to_floor() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 3);
        for _ in 0..400 {
            liz.update(300.0, 200.0, DT);
        }
        assert!(liz.speed() < 1e-6);
        assert_eq!(liz.wave_amplitude(), 0.2);
        assert!(liz.walk_speed() < 1e-6);
    }

    #[test]
    fn tongue_and_blink_stay_in_bounds() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 4);
        let mut saw_blink = false;
        let mut saw_full_tongue = false;
        for k in 0..5000 {
            let a = k as f64 * 0.01;
            liz.update(a.cos() * 400.0, a.sin() * 300.0, DT);
            let ext = liz.tongue_extension();
            let blink = liz.blink_amount();
            assert!((0.0..=1.0).contains(&ext));
            assert!((0.0..=1.0).contains(&blink));
            assert!((0.03..0.08).contains(&liz.tongue_speed()));
            saw_blink |= blink > 0.5;
            saw_full_tongue |= ext == 1.0;
        }
        assert!(saw_blink);
        assert!(saw_full_tongue);
    }

    #[test]
    fn tongue_reverses_at_full_extension() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 5);
        let mut prev = liz.tongue_extension();
        loop {
            liz.update(0.0, 0.0, DT);
            if liz.tongue_extension() == 1.0 {
                assert_eq!(liz.tongue_direction(), TongueDirection::Retract);
                break;
            }
            assert!(liz.tongue_extension() > prev);
            prev = liz.tongue_extension();
        }
        liz.update(0.0, 0.0, DT);
        assert!(liz.tongue_extension() < 1.0);
    }

    #[test]
    fn resting_tongue_stays_retracted_until_resampled() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 6);
        let mut rests = 0;
        for _ in 0..20_000 {
            let was_resting = liz.tongue_direction() == TongueDirection::Rest;
            liz.update(0.0, 0.0, DT);
            if was_resting {
                rests += 1;
                assert_eq!(liz.tongue_extension(), 0.0);
                assert_ne!(liz.tongue_direction(), TongueDirection::Retract);
            }
        }
        assert!(rests > 0);
    }

    #[test]
    fn blink_fires_when_timer_elapses() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 7);
        let timer = liz.blink_timer();
        // One big step past the timer: amount is set to 1 then decays by dt * 8.
        let dt = timer + 0.01;
        liz.update(0.0, 0.0, dt);
        let expected = (1.0 - dt * 8.0).max(0.0);
        assert!((liz.blink_amount() - expected).abs() < 1e-12);
        assert!((3.0..7.0).contains(&liz.blink_timer()));

        // Small steps: the arming tick leaves 1 - dt * 8.
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 7);
        let mut elapsed = 0.0;
        while elapsed < timer - DT {
            liz.update(0.0, 0.0, DT);
            elapsed += DT;
        }
        assert_eq!(liz.blink_amount(), 0.0);
        while liz.blink_amount() == 0.0 {
            liz.update(0.0, 0.0, DT);
        }
        assert!((liz.blink_amount() - (1.0 - DT * 8.0)).abs() < 1e-12);
    }

    #[test]
    fn same_seed_same_motion() {
        let mut a = Lizard::seeded(Point::new(5.0, 5.0), 42);
        let mut b = Lizard::seeded(Point::new(5.0, 5.0), 42);
        for k in 0..300 {
            let x = (k as f64 * 0.05).sin() * 200.0;
            a.update(x, 100.0, DT);
            b.update(x, 100.0, DT);
        }
        assert_eq!(a.spine(), b.spine());
        assert_eq!(a.tongue_extension(), b.tongue_extension());
        assert_eq!(a.blink_timer(), b.blink_timer());
    }

    #[test]
    fn normal_at_tail_uses_previous_segment() {
        let mut liz = Lizard::seeded(Point::new(0.0, 0.0), 8);
        for _ in 0..50 {
            liz.update(500.0, 0.0, DT);
        }
        for i in 0..SEGMENT_COUNT {
            let n = liz.normal_at(i);
            assert!((n.length() - 1.0).abs() < 1e-9, "segment {i}");
        }
    }
}
