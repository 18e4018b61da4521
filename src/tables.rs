use comfy_table::{Attribute, Cell, CellAlignment, Table, modifiers, presets};

use crate::core::{grouper::GroupedView, view_state::Count};

pub fn build_view_table(view: &GroupedView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Date", "Time", "Price", "Tier"]);
    for (date, rows) in view {
        for (index, row) in rows.iter().enumerate() {
            let date = if index == 0 {
                Cell::new(date).add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                date,
                Cell::new(&row.time),
                Cell::new(&row.price).set_alignment(CellAlignment::Right).fg(row.tier.color()),
                Cell::new(row.tier).fg(row.tier.color()).add_attribute(Attribute::Dim),
            ]);
        }
    }
    table
}

/// Backend endpoints behind the current view.
pub fn build_api_table(count: Count) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Endpoint", "Description"]);
    table.add_row(vec!["GET /api/all_slots", "All upcoming slots"]);
    table.add_row(vec![
        format!("GET /api/cheapest_slots/{count}"),
        format!("{count} cheapest upcoming slots"),
    ]);
    table.add_row(vec![
        format!("GET /api/cheapest_slots_tomorrow/{count}"),
        format!("{count} cheapest slots for tomorrow only"),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use chrono_tz::Tz;

    use super::*;
    use crate::{
        core::{
            locale::{Locale, Zone},
            slot::PricedSlot,
        },
        prelude::*,
    };

    #[test]
    fn test_build_view_table() -> Result {
        let slots = [
            PricedSlot::new("2024-01-01T00:00:00Z", 10.0),
            PricedSlot::new("2024-01-01T00:30:00Z", 20.0),
            PricedSlot::new("2024-01-02T00:00:00Z", 30.0),
        ];
        let locale = Locale::builder().zone(Zone::Named(Tz::UTC)).build();
        let view = GroupedView::build(&slots, "2024-01-01T00:00:00Z".parse()?, &locale)?;
        let table = build_view_table(&view);
        assert_eq!(table.row_count(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("Today"));
        assert!(rendered.contains("Tomorrow"));
        assert!(rendered.contains("30.0"));
        Ok(())
    }

    #[test]
    fn test_build_api_table() {
        let rendered = build_api_table(Count::new(7).unwrap()).to_string();
        assert!(rendered.contains("/api/cheapest_slots/7"));
    }
}
