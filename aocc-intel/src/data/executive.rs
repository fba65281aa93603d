//! Executive snapshot for the 2024/2025 holiday monitoring post

use crate::models::executive::{
    AccumulatedMetric, AccumulationData, AirportBreakdown, ExecutiveData, ExtraFlight, FlightPax,
    IrregularityDetail, Irregularities, MetricGrowth, OperationalData, OpsCondition, SegmentSplit,
    TopListItem, TrafficHighlight, Trend,
};

fn s(v: &str) -> String {
    v.to_string()
}

fn metric(value: &str, growth: &str, trend: Trend) -> MetricGrowth {
    MetricGrowth {
        value: s(value),
        growth: s(growth),
        trend,
        recovery: None,
    }
}

fn breakdown(flight: &str, pax: &str, cargo: &str) -> AirportBreakdown {
    AirportBreakdown {
        flight: s(flight),
        pax: s(pax),
        cargo: s(cargo),
    }
}

fn accumulated(total: &str, growth: &str, recovery: &str) -> AccumulatedMetric {
    AccumulatedMetric {
        total: s(total),
        growth: s(growth),
        recovery: s(recovery),
    }
}

fn split(dom: &str, int: &str, all: &str) -> SegmentSplit {
    SegmentSplit {
        dom: s(dom),
        int: s(int),
        all: s(all),
    }
}

fn top(items: &[(&str, &str)]) -> Vec<TopListItem> {
    items
        .iter()
        .map(|(name, value)| TopListItem {
            name: s(name),
            value: s(value),
        })
        .collect()
}

/// The bundled executive snapshot
pub fn executive_snapshot() -> ExecutiveData {
    ExecutiveData {
        last_updated: s("Jan 6, 2025, 7:19:15 AM"),
        highlight_before: TrafficHighlight {
            period: s("Highest traffic before Christmas"),
            date: s("Sunday, 22 December 2024"),
            h_date: s("H-3"),
            flight: metric("3,744", "-4%", Trend::Down),
            pax: metric("561,277", "+5%", Trend::Up),
            cargo: metric("3,986", "-17%", Trend::Down),
            cgk: breakdown("1,179", "189,202", "1,555"),
            dps: breakdown("438", "75,478", "188"),
        },
        highlight_after: TrafficHighlight {
            period: s("Highest traffic after New Year"),
            date: s("Sunday, 5 January 2025"),
            h_date: s("H+5"),
            flight: metric("3,535", "+5%", Trend::Up),
            pax: metric("521,431", "+26%", Trend::Up),
            cargo: metric("3,695", "-16%", Trend::Down),
            cgk: breakdown("1,122", "178,548", "1,448"),
            dps: breakdown("459", "77,812", "174"),
        },
        accumulation: AccumulationData {
            flight: accumulated("66,680", "4%", "85%"),
            pax: accumulated("9,240,482", "11%", "96%"),
            cargo: accumulated("70,704", "-2%", "127%"),
        },
        top_airports: top(&[
            ("CGK", "3,134,042"),
            ("DPS", "1,352,837"),
            ("SUB", "768,712"),
            ("UPG", "532,538"),
            ("KNO", "463,472"),
        ]),
        top_dest_int: top(&[
            ("SIN", "106,637"),
            ("KUL", "78,841"),
            ("JED", "51,901"),
            ("HKG", "21,827"),
            ("DOH", "20,492"),
        ]),
        top_dest_dom: top(&[
            ("DPS", "146,354"),
            ("KNO", "109,541"),
            ("SUB", "71,035"),
            ("UPG", "68,326"),
            ("PLM", "47,098"),
        ]),
        operational: OperationalData {
            otp: split("66%", "76%", "68%"),
            load_factor: split("80%", "91%", "82%"),
            slot_utilization: split("80%", "93%", "82%"),
            routes: split("827", "470", "1,297"),
        },
        extra_flight: ExtraFlight {
            plan: s("3,142"),
            realization: s("2,170"),
            percentage: s("69%"),
        },
        ops_condition: OpsCondition {
            yesterday_realization: FlightPax {
                flight: s("3,535"),
                pax: s("521,431"),
            },
            today_plan: FlightPax {
                flight: s("n/a"),
                pax: s("n/a"),
            },
        },
        irregularities: Irregularities {
            total: 360,
            top_cause: s("Natural factors (heavy rain)"),
            details: vec![IrregularityDetail {
                daily: s("H+5 / 05-Jan"),
                branch: s("CGK"),
                flight_no: s("JT170"),
                chronology: s("LATE ARRIVAL"),
                impact: s("Yes"),
                category: s("Airline factor"),
                kind: s("Delay"),
            }],
        },
    }
}
