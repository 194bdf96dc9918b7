use crate::logic::date_cursor::DATE_MARKER;
use crate::models::{Record, SimulationOutcome};
use std::io::{self, Write};

pub const PLANT_HEADER_PREFIX: &str = "PLANTA";
pub const RECORD_HEADER: &str = "Hora;Temperatura;Humedad;Recomendaciones";

/// How the date line of a block is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLine {
    /// `Fecha: 2024-01-01` on one line, as stored in the log.
    Inline,
    /// `Fecha` then the bare date on its own line, as shown on the console.
    Split,
}

/// Write one block per simulated day: the date line, then for every plant its
/// header and the eight slot rows.
pub fn write_blocks<W: Write>(
    out: &mut W,
    outcome: &SimulationOutcome,
    date_line: DateLine,
) -> io::Result<()> {
    for day in 0..outcome.day_count {
        let date = outcome.date_for_day(day);
        match date_line {
            DateLine::Inline => writeln!(out, "{}: {}", DATE_MARKER, date.format("%Y-%m-%d"))?,
            DateLine::Split => {
                writeln!(out, "{}", DATE_MARKER)?;
                writeln!(out, "{}", date.format("%Y-%m-%d"))?;
            }
        }

        for plant in &outcome.plants {
            writeln!(out, "{};{}", PLANT_HEADER_PREFIX, plant.plant)?;
            writeln!(out, "{}", RECORD_HEADER)?;
            if let Some(records) = plant.days.get(day) {
                for record in records {
                    write_record(out, record)?;
                }
            }
        }
    }
    Ok(())
}

pub fn write_record<W: Write>(out: &mut W, record: &Record) -> io::Result<()> {
    writeln!(
        out,
        "{};{:.1};{:.1};{}",
        record.slot, record.temperature_c, record.humidity_percent, record.recommendation
    )
}
