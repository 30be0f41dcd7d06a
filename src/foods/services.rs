use time::OffsetDateTime;

use super::{repo::FoodTable, repo_types::ReferenceRow};
use crate::{journal::repo_types::LogEntry, parse::round2};

/// Scale a reference row to `grams`. No validation: zero or negative grams
/// flow through the arithmetic unchanged.
pub fn compute(row: &ReferenceRow, grams: f64) -> LogEntry {
    let factor = grams / 100.0;
    LogEntry {
        food: row.food.clone(),
        grams,
        calories: round2(row.effective_calories() * factor),
        protein: round2(row.protein * factor),
        carbs: round2(row.carbs * factor),
        fat: round2(row.fat * factor),
        fiber: round2(row.fiber * factor),
        logged_at: OffsetDateTime::now_utc(),
    }
}

/// First row, in table order, whose lowercased name contains the lowercased query.
pub fn find_food<'a>(table: &'a FoodTable, query: &str) -> Option<&'a ReferenceRow> {
    let needle = query.to_lowercase();
    table
        .rows()
        .iter()
        .find(|row| row.food.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(food: &str, calories: f64, protein: f64, carbs: f64, fat: f64, fiber: f64) -> ReferenceRow {
        ReferenceRow {
            food: food.into(),
            calories,
            protein,
            carbs,
            fat,
            fiber,
        }
    }

    fn table() -> FoodTable {
        FoodTable::new(vec![
            row("Green Apple", 52.0, 0.3, 14.0, 0.2, 2.4),
            row("Banana", 89.0, 1.1, 22.8, 0.3, 2.6),
            row("Apple pie", 237.0, 1.9, 34.0, 11.0, 1.6),
            row("Brown rice", 0.0, 2.6, 23.0, 0.9, 1.8),
        ])
    }

    #[test]
    fn compute_scales_explicit_calories() {
        let entry = compute(&row("Banana", 89.0, 1.1, 22.8, 0.3, 2.6), 150.0);
        assert_eq!(entry.food, "Banana");
        assert_eq!(entry.grams, 150.0);
        assert_eq!(entry.calories, 133.5);
        assert_eq!(entry.protein, 1.65);
        assert_eq!(entry.carbs, 34.2);
        assert_eq!(entry.fat, 0.45);
        assert_eq!(entry.fiber, 3.9);
    }

    #[test]
    fn compute_derives_calories_when_zero() {
        // 2.6*4 + 23*4 + 0.9*9 = 110.5 per 100 g, fiber ignored
        let entry = compute(&row("Brown rice", 0.0, 2.6, 23.0, 0.9, 1.8), 200.0);
        assert_eq!(entry.calories, 221.0);
        assert_eq!(entry.fiber, 3.6);
    }

    #[test]
    fn compute_propagates_zero_and_negative_grams() {
        let r = row("Banana", 89.0, 1.1, 22.8, 0.3, 2.6);
        let zero = compute(&r, 0.0);
        assert_eq!(zero.calories, 0.0);
        assert_eq!(zero.protein, 0.0);
        let neg = compute(&r, -100.0);
        assert_eq!(neg.calories, -89.0);
        assert_eq!(neg.carbs, -22.8);
    }

    #[test]
    fn calories_match_formula_across_weights() {
        let rows = [
            row("a", 52.0, 0.3, 14.0, 0.2, 2.4),
            row("b", 0.0, 31.0, 0.0, 3.6, 0.0),
            row("c", 0.0, 0.0, 0.0, 0.0, 9.0),
        ];
        for r in &rows {
            for g in [0.0, 1.0, 37.5, 100.0, 333.3] {
                let expected = round2(
                    if r.calories != 0.0 {
                        r.calories
                    } else {
                        r.protein * 4.0 + r.carbs * 4.0 + r.fat * 9.0
                    } * (g / 100.0),
                );
                assert_eq!(compute(r, g).calories, expected, "{} at {g} g", r.food);
            }
        }
    }

    #[test]
    fn find_food_returns_first_in_table_order() {
        let t = table();
        assert_eq!(find_food(&t, "apple").unwrap().food, "Green Apple");
        assert_eq!(find_food(&t, "PIE").unwrap().food, "Apple pie");
        assert_eq!(find_food(&t, "Rice").unwrap().food, "Brown rice");
    }

    #[test]
    fn find_food_misses_quietly() {
        assert!(find_food(&table(), "chicken").is_none());
        assert!(find_food(&FoodTable::default(), "banana").is_none());
    }

    #[test]
    fn empty_query_matches_first_row() {
        assert_eq!(find_food(&table(), "").unwrap().food, "Green Apple");
    }
}
