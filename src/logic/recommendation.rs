use crate::config::SimulationParams;
use crate::models::{HumidityLevel, PlantProfile, SunTolerance};

/// Humidity part of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityAdvice {
    Adequate,
    Low,
    Medium,
    High,
}

impl HumidityAdvice {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumidityAdvice::Adequate => "humidity adequate for the plant",
            HumidityAdvice::Low => "low ambient humidity; if soil is dry, watering is recommended",
            HumidityAdvice::Medium => "medium ambient humidity; verify soil is not dry",
            HumidityAdvice::High => "high ambient humidity; verify there is no waterlogging",
        }
    }
}

/// Sun part of a recommendation, appended after the humidity advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunAdvice {
    None,
    CanTakeSun,
    KeepAway,
}

impl SunAdvice {
    pub fn as_str(&self) -> &'static str {
        match self {
            SunAdvice::None => ".",
            SunAdvice::CanTakeSun => " and can be placed in the sun.",
            SunAdvice::KeepAway => " and must be kept away from the sun.",
        }
    }
}

/// Turns simulated conditions plus a plant's tolerances into care text.
///
/// Humidity is split into three equal-width tiers over
/// `[humidity_min, humidity_max]`. Values outside the band still classify as
/// low or high.
pub struct RecommendationEngine {
    low_bound: f64,
    high_bound: f64,
    sun_threshold: f64,
}

impl RecommendationEngine {
    pub fn new(params: &SimulationParams) -> Self {
        let third = (params.humidity_max - params.humidity_min) / 3.0;
        Self {
            low_bound: params.humidity_min + third,
            high_bound: params.humidity_max - third,
            sun_threshold: params.sun_threshold,
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.low_bound, self.high_bound)
    }

    pub fn humidity_tier(&self, humidity: f64) -> HumidityLevel {
        if humidity < self.low_bound {
            HumidityLevel::Low
        } else if humidity > self.high_bound {
            HumidityLevel::High
        } else {
            HumidityLevel::Medium
        }
    }

    pub fn humidity_advice(
        &self,
        humidity: f64,
        preference: Option<HumidityLevel>,
    ) -> HumidityAdvice {
        let tier = self.humidity_tier(humidity);

        // A match with the plant's preference wins over the generic tier text
        if preference == Some(tier) {
            return HumidityAdvice::Adequate;
        }

        match tier {
            HumidityLevel::Low => HumidityAdvice::Low,
            HumidityLevel::Medium => HumidityAdvice::Medium,
            HumidityLevel::High => HumidityAdvice::High,
        }
    }

    pub fn sun_advice(&self, temperature_c: f64, sun: SunTolerance) -> SunAdvice {
        if temperature_c <= self.sun_threshold {
            return SunAdvice::None;
        }
        match sun {
            SunTolerance::High => SunAdvice::CanTakeSun,
            SunTolerance::Other => SunAdvice::KeepAway,
        }
    }

    pub fn recommend(
        &self,
        temperature_c: f64,
        humidity: f64,
        preference: Option<HumidityLevel>,
        sun: SunTolerance,
    ) -> String {
        let humidity_part = self.humidity_advice(humidity, preference);
        let sun_part = self.sun_advice(temperature_c, sun);
        format!("{}{}", humidity_part.as_str(), sun_part.as_str())
    }

    pub fn recommend_for(&self, temperature_c: f64, humidity: f64, plant: &PlantProfile) -> String {
        self.recommend(
            temperature_c,
            humidity,
            plant.humidity_preference,
            plant.sun_tolerance,
        )
    }
}
