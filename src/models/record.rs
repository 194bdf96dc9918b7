use super::time_slot::TimeSlot;
use chrono::NaiveDate;

/// Simulated conditions at one (day, slot). Plant-independent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherSample {
    pub temperature_c: f64,
    pub humidity_percent: f64,
}

/// `days × 8` grid of weather samples, computed once per run and shared by
/// every plant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationMatrix {
    days: Vec<[WeatherSample; TimeSlot::COUNT]>,
}

impl SimulationMatrix {
    pub fn from_days(days: Vec<[WeatherSample; TimeSlot::COUNT]>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> usize {
        self.days.len()
    }

    pub fn day(&self, day: usize) -> Option<&[WeatherSample; TimeSlot::COUNT]> {
        self.days.get(day)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub slot: TimeSlot,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub recommendation: String,
}

/// Everything one plant got over the run: one ordered record list per day.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantSimulation {
    pub plant: String,
    pub days: Vec<Vec<Record>>,
}

/// Result of a run: per-plant, per-day record sequences in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub start_date: NaiveDate,
    pub day_count: usize,
    pub plants: Vec<PlantSimulation>,
}

impl SimulationOutcome {
    pub fn date_for_day(&self, day: usize) -> NaiveDate {
        self.start_date + chrono::Duration::days(day as i64)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.day_count
            .checked_sub(1)
            .map(|last| self.date_for_day(last))
    }

    pub fn is_empty(&self) -> bool {
        self.day_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_dates_follow_start_date() {
        let outcome = SimulationOutcome {
            start_date: NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            day_count: 3,
            plants: Vec::new(),
        };
        assert_eq!(
            outcome.date_for_day(1),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            outcome.last_date(),
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn empty_outcome_has_no_last_date() {
        let outcome = SimulationOutcome {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            day_count: 0,
            plants: Vec::new(),
        };
        assert!(outcome.is_empty());
        assert_eq!(outcome.last_date(), None);
    }
}
