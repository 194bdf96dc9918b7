use crate::config::SimulationParams;
use crate::models::{ReferenceTable, SimulationMatrix, TimeSlot, WeatherSample};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of temperature jitter. One call per (day, slot).
pub trait JitterSource {
    /// Return an offset in `[-variation, +variation]`.
    fn jitter(&mut self, variation: f64) -> f64;
}

/// Uniform jitter backed by a seedable `rand` generator.
pub struct UniformJitter<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformJitter<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl<R: Rng> JitterSource for UniformJitter<R> {
    fn jitter(&mut self, variation: f64) -> f64 {
        if variation <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-variation..=variation)
    }
}

/// Humidity as an affine function of temperature: `humidity_max` at
/// `temp_min`, `humidity_min` at `temp_max`. Not clamped.
pub fn humidity_for(temperature_c: f64, params: &SimulationParams) -> f64 {
    let proportion = (temperature_c - params.temp_min) / (params.temp_max - params.temp_min);
    params.humidity_max - proportion * (params.humidity_max - params.humidity_min)
}

pub struct WeatherGenerator<'a> {
    params: &'a SimulationParams,
    reference: &'a ReferenceTable,
}

impl<'a> WeatherGenerator<'a> {
    pub fn new(params: &'a SimulationParams, reference: &'a ReferenceTable) -> Self {
        Self { params, reference }
    }

    pub fn reference_temp(&self, slot: TimeSlot) -> f64 {
        self.reference
            .for_slot(slot)
            .unwrap_or(self.params.default_reference_temp)
    }

    pub fn sample(&self, slot: TimeSlot, jitter: &mut dyn JitterSource) -> WeatherSample {
        let temperature_c = self.reference_temp(slot) + jitter.jitter(self.params.temp_variation);
        WeatherSample {
            temperature_c,
            humidity_percent: humidity_for(temperature_c, self.params),
        }
    }

    /// Build the `days × 8` grid. Draws are taken day by day, slot by slot.
    pub fn generate(&self, days: usize, jitter: &mut dyn JitterSource) -> SimulationMatrix {
        let grid = (0..days)
            .map(|_| TimeSlot::ALL.map(|slot| self.sample(slot, jitter)))
            .collect();
        SimulationMatrix::from_days(grid)
    }
}
