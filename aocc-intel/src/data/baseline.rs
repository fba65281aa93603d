//! Baseline traffic series for the Christmas / New Year holiday period
//!
//! Three datasets: CGK, DPS, and the network aggregate used for every other
//! code. Each covers 2025-12-18 through 2026-01-04.

use once_cell::sync::Lazy;

use crate::models::{AirportStats, DailyData};

#[derive(Clone, Copy)]
enum Mark {
    None,
    PeakDeparture,
    PeakReturn,
    Holiday,
}

type Row = (&'static str, &'static str, u64, u64, Mark, &'static str);

const ALL_ROWS: [Row; 18] = [
    ("2025-12-18", "Thursday", 526_101, 4_069, Mark::None, "H-7"),
    ("2025-12-19", "Friday", 538_526, 4_069, Mark::None, "H-6"),
    ("2025-12-20", "Saturday", 610_509, 4_526, Mark::PeakDeparture, "H-5 (departure peak)"),
    ("2025-12-21", "Sunday", 603_435, 4_412, Mark::PeakDeparture, "H-4 (departure peak)"),
    ("2025-12-22", "Monday", 547_369, 4_445, Mark::None, "H-3"),
    ("2025-12-23", "Tuesday", 543_502, 4_331, Mark::None, "H-2"),
    ("2025-12-24", "Wednesday", 499_100, 4_203, Mark::None, "H-1"),
    ("2025-12-25", "Thursday", 424_448, 4_069, Mark::Holiday, "Christmas Day"),
    ("2025-12-26", "Friday", 449_233, 4_176, Mark::None, "H+1"),
    ("2025-12-27", "Saturday", 516_161, 4_189, Mark::None, "H+2"),
    ("2025-12-28", "Sunday", 470_143, 4_143, Mark::None, "H+3"),
    ("2025-12-29", "Monday", 467_767, 4_211, Mark::None, "H-3 (New Year)"),
    ("2025-12-30", "Tuesday", 454_827, 4_056, Mark::None, "H-2 (New Year)"),
    ("2025-12-31", "Wednesday", 384_653, 3_857, Mark::None, "H-1 (New Year)"),
    ("2026-01-01", "Thursday", 442_420, 3_600, Mark::Holiday, "New Year's Day"),
    ("2026-01-02", "Friday", 485_538, 4_123, Mark::None, "H+1"),
    ("2026-01-03", "Saturday", 506_901, 4_243, Mark::PeakReturn, "H+2 (return peak)"),
    ("2026-01-04", "Sunday", 565_326, 4_201, Mark::PeakReturn, "H+3 (return peak)"),
];

const CGK_ROWS: [Row; 18] = [
    ("2025-12-18", "Thursday", 178_280, 1_139, Mark::None, "H-7"),
    ("2025-12-19", "Friday", 181_601, 1_140, Mark::None, "H-6"),
    ("2025-12-20", "Saturday", 188_322, 1_145, Mark::None, "H-5"),
    ("2025-12-21", "Sunday", 194_269, 1_146, Mark::PeakDeparture, "H-4 (peak)"),
    ("2025-12-22", "Monday", 163_951, 1_102, Mark::None, "H-3"),
    ("2025-12-23", "Tuesday", 159_887, 1_101, Mark::None, "H-2"),
    ("2025-12-24", "Wednesday", 175_245, 1_131, Mark::None, "H-1"),
    ("2025-12-25", "Thursday", 145_213, 1_006, Mark::Holiday, "Christmas Day"),
    ("2025-12-26", "Friday", 153_216, 1_023, Mark::None, "H+1"),
    ("2025-12-27", "Saturday", 178_192, 1_138, Mark::None, "H+2"),
    ("2025-12-28", "Sunday", 181_888, 1_141, Mark::PeakDeparture, "H+3 (pre New Year peak)"),
    ("2025-12-29", "Monday", 171_580, 1_107, Mark::None, "H-3"),
    ("2025-12-30", "Tuesday", 157_454, 1_094, Mark::None, "H-2"),
    ("2025-12-31", "Wednesday", 156_045, 1_073, Mark::None, "H-1"),
    ("2026-01-01", "Thursday", 155_682, 1_064, Mark::Holiday, "New Year's Day"),
    ("2026-01-02", "Friday", 173_930, 1_124, Mark::None, "H+1"),
    ("2026-01-03", "Saturday", 184_618, 1_142, Mark::None, "H+2"),
    ("2026-01-04", "Sunday", 184_908, 1_144, Mark::PeakReturn, "H+3 (return peak)"),
];

// Daily DPS flights are distributed from the period total by passenger weight.
const DPS_ROWS: [Row; 18] = [
    ("2025-12-18", "Thursday", 78_338, 440, Mark::None, "H-7"),
    ("2025-12-19", "Friday", 82_201, 462, Mark::PeakDeparture, "H-6 (pre Christmas peak)"),
    ("2025-12-20", "Saturday", 77_929, 438, Mark::None, "H-5"),
    ("2025-12-21", "Sunday", 76_666, 431, Mark::None, "H-4"),
    ("2025-12-22", "Monday", 79_565, 447, Mark::None, "H-3"),
    ("2025-12-23", "Tuesday", 73_508, 413, Mark::None, "H-2"),
    ("2025-12-24", "Wednesday", 72_354, 406, Mark::None, "H-1"),
    ("2025-12-25", "Thursday", 71_919, 404, Mark::Holiday, "Christmas Day"),
    ("2025-12-26", "Friday", 76_784, 431, Mark::None, "H+1"),
    ("2025-12-27", "Saturday", 77_089, 433, Mark::None, "H+2"),
    ("2025-12-28", "Sunday", 76_516, 430, Mark::None, "H+3"),
    ("2025-12-29", "Monday", 81_052, 455, Mark::PeakDeparture, "H-3 (pre New Year peak)"),
    ("2025-12-30", "Tuesday", 71_018, 399, Mark::None, "H-2"),
    ("2025-12-31", "Wednesday", 70_869, 398, Mark::None, "H-1"),
    ("2026-01-01", "Thursday", 71_290, 400, Mark::Holiday, "New Year's Day"),
    ("2026-01-02", "Friday", 78_030, 438, Mark::None, "H+1"),
    ("2026-01-03", "Saturday", 77_286, 434, Mark::None, "H+2"),
    ("2026-01-04", "Sunday", 81_820, 460, Mark::PeakReturn, "H+3 (return peak)"),
];

fn build(rows: &[Row]) -> Vec<DailyData> {
    rows.iter()
        .map(|&(date, day_name, passengers, flights, mark, description)| DailyData {
            date: date.to_string(),
            day_name: day_name.to_string(),
            passengers,
            flights,
            is_peak_departure: matches!(mark, Mark::PeakDeparture),
            is_peak_return: matches!(mark, Mark::PeakReturn),
            is_holiday: matches!(mark, Mark::Holiday),
            description: Some(description.to_string()),
        })
        .collect()
}

fn stats(values: [&str; 8]) -> AirportStats {
    let [pg, pr, fg, fr, tp, tf, pd, pret] = values;
    AirportStats {
        passenger_growth: pg.to_string(),
        passenger_recovery: pr.to_string(),
        flight_growth: fg.to_string(),
        flight_recovery: fr.to_string(),
        total_passengers: tp.to_string(),
        total_flights: tf.to_string(),
        peak_departure: pd.to_string(),
        peak_return: pret.to_string(),
    }
}

static ALL_DATA: Lazy<Vec<DailyData>> = Lazy::new(|| build(&ALL_ROWS));
static CGK_DATA: Lazy<Vec<DailyData>> = Lazy::new(|| build(&CGK_ROWS));
static DPS_DATA: Lazy<Vec<DailyData>> = Lazy::new(|| build(&DPS_ROWS));

static ALL_STATS: Lazy<AirportStats> = Lazy::new(|| {
    stats(["3.8%", "94.8%", "1.6%", "85.0%", "9,035,958", "64,060", "20-21 Dec", "3-4 Jan"])
});
static CGK_STATS: Lazy<AirportStats> = Lazy::new(|| {
    stats(["3.23%", "N/A", "1.33%", "N/A", "3,084,281", "19,960", "21 Dec & 28 Dec", "4 Jan"])
});
static DPS_STATS: Lazy<AirportStats> = Lazy::new(|| {
    stats(["13.29%", "106.72%", "2.17%", "92.05%", "1,366,231", "7,674", "19 Dec & 29 Dec", "4 Jan"])
});

/// Baseline series for an airport; unknown codes get the aggregate
pub fn airport_data(code: &str) -> &'static [DailyData] {
    match code {
        "CGK" => CGK_DATA.as_slice(),
        "DPS" => DPS_DATA.as_slice(),
        _ => ALL_DATA.as_slice(),
    }
}

/// Period statistics for an airport; unknown codes get the aggregate
pub fn airport_stats(code: &str) -> &'static AirportStats {
    match code {
        "CGK" => &*CGK_STATS,
        "DPS" => &*DPS_STATS,
        _ => &*ALL_STATS,
    }
}

/// Baseline day for an exact date, if covered
pub fn baseline_day(code: &str, date: &str) -> Option<&'static DailyData> {
    airport_data(code).iter().find(|d| d.date == date)
}
