/// Rotational camera shake.
///
/// Shake requests become damped sine sources. Each source contributes a
/// small rotation on all three camera axes, with the amplitude fading
/// linearly over the source's lifetime. The tactical view steps the
/// shaker at a fixed rate while building the camera transform and
/// applies the summed angles after the look-at.

use glam::Vec3;

// ===== CONSTANTS =====

/// Per-axis oscillation rates, radians per second. Mutually prime-ish so
/// the combined motion never settles into a visible loop.
const AXIS_RATES: [f32; 3] = [23.0, 17.0, 29.0];

// ===== SHAKE SOURCE =====

#[derive(Debug, Clone)]
struct ShakeSource {
    /// Peak rotation, radians
    amplitude: f32,
    /// Total lifetime, seconds
    duration: f32,
    elapsed: f32,
}

impl ShakeSource {
    fn envelope(&self) -> f32 {
        1.0 - self.elapsed / self.duration
    }
}

// ===== SHAKER =====

#[derive(Debug, Clone, Default)]
pub struct CameraShaker {
    sources: Vec<ShakeSource>,
}

impl CameraShaker {
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    /// Add a shake source. Zero or negative durations are ignored.
    pub fn add_shake(&mut self, amplitude: f32, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        self.sources.push(ShakeSource {
            amplitude,
            duration,
            elapsed: 0.0,
        });
    }

    /// Advance all sources by `dt` seconds and drop the expired ones
    pub fn timestep(&mut self, dt: f32) {
        for source in &mut self.sources {
            source.elapsed += dt;
        }
        self.sources.retain(|s| s.elapsed < s.duration);
    }

    /// Summed rotation angles for the current instant, one per axis
    pub fn angles(&self) -> Vec3 {
        let mut angles = Vec3::ZERO;
        for source in &self.sources {
            let strength = source.amplitude * source.envelope();
            angles.x += strength * (source.elapsed * AXIS_RATES[0]).sin();
            angles.y += strength * (source.elapsed * AXIS_RATES[1]).sin();
            angles.z += strength * (source.elapsed * AXIS_RATES[2]).sin();
        }
        angles
    }

    pub fn is_active(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "shaker_tests.rs"]
mod tests;
