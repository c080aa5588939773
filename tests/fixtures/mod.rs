// Test fixtures - reusable test data
// Provides consistent catalogs and instants across all test files

#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone};

/// Sample instants for testing
pub mod dates {
    use super::*;

    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    /// Sunday Jun 15, 2025 at 10:00, inside the morning service
    pub fn sunday_mid_service() -> DateTime<Local> {
        at(2025, 6, 15, 10, 0)
    }

    /// Wednesday Jun 11, 2025 at 14:00
    pub fn midweek() -> DateTime<Local> {
        at(2025, 6, 11, 14, 0)
    }
}

/// Sample catalogs for testing
pub mod catalogs {
    /// Catalog JSON around mid-June 2025, with two malformed rows.
    pub const JUNE_2025: &str = r#"[
        {"id": "s-dec-14", "kind": "service", "sub_type": "sunday", "date": "2024-12-14", "title": "Advent Service"},
        {"id": "s-dec-15", "kind": "service", "sub_type": "sunday", "date": "2024-12-15", "title": "Carol Service"},
        {"id": "e-mar-14", "kind": "event", "date": "2025-03-14", "title": "Lent Retreat"},
        {"id": "e-mar-15", "kind": "event", "date": "2025-03-15", "title": "Community Outreach"},
        {"id": "broken", "kind": "event", "date": "sometime in spring"},
        {"id": "s-jun-13", "kind": "service", "sub_type": "friday", "date": "2025-06-13", "title": "Friday Evening Worship"},
        {"id": "s-jun-22", "kind": "service", "sub_type": "sunday", "date": "2025-06-22", "title": "Sunday Main Service"},
        {"id": "undated", "kind": "service", "sub_type": "sunday"},
        {"id": "e-jul-04", "kind": "event", "date": "2025-07-04T18:00:00+00:00", "title": "Summer Fellowship Camp"}
    ]"#;
}
