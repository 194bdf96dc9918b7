use super::recommendation::RecommendationEngine;
use super::weather::{JitterSource, WeatherGenerator};
use crate::config::SimulationParams;
use crate::error::Result;
use crate::models::{
    PlantCatalog, PlantSimulation, Record, ReferenceTable, SimulationMatrix, SimulationOutcome,
    TimeSlot,
};
use crate::store::SimulationLog;
use chrono::NaiveDate;
use tracing::{debug, info};

/// One simulation run over a loaded catalog and reference table.
pub struct SimulationRun<'a> {
    params: &'a SimulationParams,
    catalog: &'a PlantCatalog,
    reference: &'a ReferenceTable,
    log: &'a SimulationLog,
}

impl<'a> SimulationRun<'a> {
    pub fn new(
        params: &'a SimulationParams,
        catalog: &'a PlantCatalog,
        reference: &'a ReferenceTable,
        log: &'a SimulationLog,
    ) -> Self {
        Self {
            params,
            catalog,
            reference,
            log,
        }
    }

    /// Simulate `days` days starting after the last logged date, append the
    /// result to the log and return it.
    pub fn execute(
        &self,
        days: usize,
        jitter: &mut dyn JitterSource,
        today: NaiveDate,
    ) -> Result<SimulationOutcome> {
        let start_date = self.log.next_start_date(today);
        info!(%start_date, days, plants = self.catalog.len(), "Starting simulation");

        let outcome = self.simulate(start_date, days, jitter);

        if outcome.is_empty() {
            info!("Nothing to simulate, log left untouched");
            return Ok(outcome);
        }

        self.log.append(&outcome)?;
        Ok(outcome)
    }

    /// Build the outcome without touching the log.
    pub fn simulate(
        &self,
        start_date: NaiveDate,
        days: usize,
        jitter: &mut dyn JitterSource,
    ) -> SimulationOutcome {
        let matrix = WeatherGenerator::new(self.params, self.reference).generate(days, jitter);
        let engine = RecommendationEngine::new(self.params);

        let plants = self
            .catalog
            .iter()
            .map(|plant| {
                debug!(plant = %plant.name, "Deriving recommendations");
                PlantSimulation {
                    plant: plant.name.clone(),
                    days: (0..matrix.days())
                        .map(|day| {
                            day_records(&matrix, day, |temp, humidity| {
                                engine.recommend_for(temp, humidity, plant)
                            })
                        })
                        .collect(),
                }
            })
            .collect();

        SimulationOutcome {
            start_date,
            day_count: days,
            plants,
        }
    }
}

fn day_records<F>(matrix: &SimulationMatrix, day: usize, recommend: F) -> Vec<Record>
where
    F: Fn(f64, f64) -> String,
{
    let Some(samples) = matrix.day(day) else {
        return Vec::new();
    };

    TimeSlot::ALL
        .iter()
        .zip(samples.iter())
        .map(|(slot, sample)| Record {
            slot: *slot,
            temperature_c: sample.temperature_c,
            humidity_percent: sample.humidity_percent,
            recommendation: recommend(sample.temperature_c, sample.humidity_percent),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::weather::testing::FixedJitter;
    use crate::logic::weather::UniformJitter;
    use crate::models::{HumidityLevel, PlantProfile, SunTolerance};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> PlantCatalog {
        vec![
            PlantProfile::new("Fern", Some(HumidityLevel::High), SunTolerance::Other),
            PlantProfile::new("Cactus", Some(HumidityLevel::Low), SunTolerance::High),
            PlantProfile::new("Pothos", Some(HumidityLevel::Medium), SunTolerance::Other),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn single_day_zero_jitter_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let log = SimulationLog::new(dir.path().join("log.csv"));
        let params = SimulationParams::default();
        let reference: ReferenceTable = vec![("0:00", 20.0)].into_iter().collect();
        let catalog: PlantCatalog =
            vec![PlantProfile::new("Pothos", Some(HumidityLevel::Medium), SunTolerance::Other)]
                .into_iter()
                .collect();
        let today = date(2024, 7, 1);

        let run = SimulationRun::new(&params, &catalog, &reference, &log);
        let outcome = run.execute(1, &mut FixedJitter(0.0), today).unwrap();

        assert_eq!(outcome.start_date, today);
        assert_eq!(outcome.plants.len(), 1);
        let records = &outcome.plants[0].days[0];
        assert_eq!(records.len(), 8);

        let first = &records[0];
        assert_eq!(first.slot, TimeSlot::H00);
        assert_eq!(first.temperature_c, 20.0);
        assert!((first.humidity_percent - 91.96).abs() < 0.01);
        assert_eq!(
            first.recommendation,
            "high ambient humidity; verify there is no waterlogging."
        );

        // Slots without a reference sit at 25.0: medium humidity, no sun clause
        let noon = &records[TimeSlot::H12.index()];
        assert_eq!(noon.temperature_c, 25.0);
        assert_eq!(noon.recommendation, "humidity adequate for the plant.");

        let written = std::fs::read_to_string(log.path()).unwrap();
        assert!(written.starts_with(
            "Fecha: 2024-07-01\nPLANTA;Pothos\nHora;Temperatura;Humedad;Recomendaciones\n\
             0:00;20.0;92.0;high ambient humidity; verify there is no waterlogging.\n"
        ));
    }

    #[test]
    fn every_plant_sees_the_same_weather() {
        let dir = tempfile::tempdir().unwrap();
        let log = SimulationLog::new(dir.path().join("log.csv"));
        let params = SimulationParams::default();
        let reference: ReferenceTable = vec![("0:00", 19.0), ("12:00", 29.0), ("15:00", 30.0)]
            .into_iter()
            .collect();
        let catalog = catalog();

        let run = SimulationRun::new(&params, &catalog, &reference, &log);
        let outcome = run.simulate(date(2024, 1, 1), 4, &mut UniformJitter::seeded(99));

        assert_eq!(outcome.plants.len(), 3);
        let baseline = &outcome.plants[0];
        for plant in &outcome.plants[1..] {
            assert_eq!(plant.days.len(), 4);
            for (day, records) in plant.days.iter().enumerate() {
                for (i, record) in records.iter().enumerate() {
                    let expected = &baseline.days[day][i];
                    assert_eq!(record.slot, expected.slot);
                    assert_eq!(record.temperature_c, expected.temperature_c);
                    assert_eq!(record.humidity_percent, expected.humidity_percent);
                }
            }
        }
    }

    #[test]
    fn plants_keep_catalog_order_and_slots_keep_daily_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = SimulationLog::new(dir.path().join("log.csv"));
        let params = SimulationParams::default();
        let reference = ReferenceTable::new();
        let catalog = catalog();

        let run = SimulationRun::new(&params, &catalog, &reference, &log);
        let outcome = run.simulate(date(2024, 1, 1), 2, &mut FixedJitter(0.5));

        let names: Vec<&str> = outcome.plants.iter().map(|p| p.plant.as_str()).collect();
        assert_eq!(names, vec!["Fern", "Cactus", "Pothos"]);
        for plant in &outcome.plants {
            for records in &plant.days {
                let slots: Vec<TimeSlot> = records.iter().map(|r| r.slot).collect();
                assert_eq!(slots, TimeSlot::ALL.to_vec());
            }
        }

        // 25.5 °C is above the sun threshold: only the sun clause differs per plant
        let cactus = &outcome.plants[1].days[0][0].recommendation;
        let fern = &outcome.plants[0].days[0][0].recommendation;
        assert!(cactus.ends_with(" and can be placed in the sun."));
        assert!(fern.ends_with(" and must be kept away from the sun."));
    }

    #[test]
    fn two_runs_append_consecutive_non_overlapping_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let log = SimulationLog::new(dir.path().join("simulation").join("simulaciones.csv"));
        let params = SimulationParams::default();
        let reference = ReferenceTable::new();
        let catalog = catalog();
        let today = date(2024, 12, 30);

        let run = SimulationRun::new(&params, &catalog, &reference, &log);
        let first = run.execute(3, &mut UniformJitter::seeded(1), today).unwrap();
        let after_first = std::fs::read_to_string(log.path()).unwrap();
        let second = run.execute(2, &mut UniformJitter::seeded(2), today).unwrap();
        let after_second = std::fs::read_to_string(log.path()).unwrap();

        assert_eq!(first.start_date, date(2024, 12, 30));
        assert_eq!(first.last_date(), Some(date(2025, 1, 1)));
        assert_eq!(second.start_date, date(2025, 1, 2));
        assert!(after_second.starts_with(&after_first));

        let markers: Vec<&str> = after_second
            .lines()
            .filter(|l| l.starts_with("Fecha: "))
            .collect();
        assert_eq!(
            markers,
            vec![
                "Fecha: 2024-12-30",
                "Fecha: 2024-12-31",
                "Fecha: 2025-01-01",
                "Fecha: 2025-01-02",
                "Fecha: 2025-01-03",
            ]
        );
    }

    #[test]
    fn zero_days_does_not_touch_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = SimulationLog::new(dir.path().join("log.csv"));
        let params = SimulationParams::default();
        let reference = ReferenceTable::new();
        let catalog = catalog();

        let run = SimulationRun::new(&params, &catalog, &reference, &log);
        let outcome = run
            .execute(0, &mut FixedJitter(0.0), date(2024, 1, 1))
            .unwrap();

        assert!(outcome.is_empty());
        assert!(outcome.plants.iter().all(|p| p.days.is_empty()));
        assert!(!log.path().exists());
    }
}
