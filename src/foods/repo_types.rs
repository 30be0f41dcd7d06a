/// One food definition from the reference table, values per 100 g.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRow {
    pub food: String,   // display name, never empty
    pub calories: f64,  // kcal, 0 means "derive from macros"
    pub protein: f64,   // g
    pub carbs: f64,     // g
    pub fat: f64,       // g
    pub fiber: f64,     // g
}

impl ReferenceRow {
    /// Calories per 100 g, derived from macros when the table leaves it at zero.
    pub fn effective_calories(&self) -> f64 {
        if self.calories != 0.0 {
            self.calories
        } else {
            self.protein * 4.0 + self.carbs * 4.0 + self.fat * 9.0
        }
    }
}
