//! Server-rendered HTML for the single tracker page.

use html_escape::{encode_double_quoted_attribute, encode_text};
use time::macros::format_description;

use crate::{
    bmr::services::BmrResult,
    journal::repo_types::{DailyTotals, LogEntry},
};

const STYLE: &str = r#"
body{font-family:system-ui,sans-serif;background:#eef2ff;padding:20px}
.card{background:#fff;padding:20px;border-radius:14px;margin-bottom:20px;box-shadow:0 8px 20px rgba(0,0,0,.1)}
h2{margin-top:0;color:#1e3a8a}
button{background:#2563eb;color:#fff;border:none;padding:10px 14px;border-radius:8px;cursor:pointer}
input,select{padding:10px;width:100%;margin:6px 0;border-radius:8px;border:1px solid #ccc;box-sizing:border-box}
table{width:100%;border-collapse:collapse}
th,td{padding:8px;border-bottom:1px solid #ddd;text-align:center}
.total{font-size:18px;font-weight:bold;color:#16a34a}
.error{color:#dc2626;font-weight:bold}
"#;

const ACTIVITY_OPTIONS: [(&str, &str); 5] = [
    ("sedentary", "Sedentary"),
    ("light", "Light"),
    ("normal", "Normal"),
    ("heavy", "Heavy"),
    ("very", "Very Active"),
];

#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub entries: &'a [LogEntry],
    pub totals: DailyTotals,
    pub image_error: Option<&'a str>,
    pub bmr: Option<BmrResult>,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>Nutrition Tracker</title>");
    html.push_str(&format!("<style>{STYLE}</style></head><body>"));

    image_card(&mut html, view.image_error);
    text_card(&mut html);
    log_card(&mut html, view.entries, &view.totals);
    bmr_card(&mut html, view.bmr.as_ref());

    html.push_str("</body></html>");
    html
}

fn image_card(html: &mut String, error: Option<&str>) {
    html.push_str(
        r#"<div class="card"><h2>Add food by image</h2>
<form method="post" action="/image" enctype="multipart/form-data">
<input type="file" name="img" accept=".jpg,.jpeg,.png" required>
<input name="grams" placeholder="grams" required>
<button>Add</button>
</form>"#,
    );
    if let Some(msg) = error {
        html.push_str(&format!(r#"<p class="error">{}</p>"#, encode_text(msg)));
    }
    html.push_str("</div>");
}

fn text_card(html: &mut String) {
    html.push_str(
        r#"<div class="card"><h2>Add food by name</h2>
<form method="post" action="/text">
<input name="food" placeholder="banana / rice / chicken" required>
<input name="grams" placeholder="grams" required>
<button>Add</button>
</form></div>"#,
    );
}

fn log_card(html: &mut String, entries: &[LogEntry], totals: &DailyTotals) {
    let hhmm = format_description!("[hour]:[minute]");
    html.push_str(
        r#"<div class="card"><h2>Today</h2><table>
<tr><th>Time</th><th>Food</th><th>g</th><th>Cal</th><th>P</th><th>C</th><th>F</th><th>Fi</th></tr>"#,
    );
    for e in entries {
        let at = e.logged_at.format(hhmm).unwrap_or_default();
        html.push_str(&format!(
            "<tr><td>{at}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            encode_text(&e.food),
            e.grams,
            e.calories,
            e.protein,
            e.carbs,
            e.fat,
            e.fiber,
        ));
    }
    html.push_str(&format!(
        r#"</table><div class="total">Calories: {} | Protein: {} | Carbs: {} | Fat: {} | Fiber: {}</div>
<form method="post" action="/reset"><button>Reset day</button></form></div>"#,
        totals.calories, totals.protein, totals.carbs, totals.fat, totals.fiber,
    ));
}

fn bmr_card(html: &mut String, bmr: Option<&BmrResult>) {
    html.push_str(
        r#"<div class="card"><h2>BMR &amp; maintenance</h2>
<form method="post" action="/bmr">
<input name="weight" placeholder="Weight (kg)" required>
<input name="height" placeholder="Height (cm)" required>
<input name="age" placeholder="Age" required>
<select name="sex"><option value="male">Male</option><option value="female">Female</option></select>
<select name="activity">"#,
    );
    for (value, label) in ACTIVITY_OPTIONS {
        html.push_str(&format!(
            r#"<option value="{}">{label}</option>"#,
            encode_double_quoted_attribute(value)
        ));
    }
    html.push_str("</select><button>Calculate</button></form>");
    if let Some(r) = bmr {
        html.push_str(&format!(
            r#"<p class="total">BMR: {} kcal<br>Maintenance: {} kcal</p>"#,
            r.bmr, r.maintenance
        ));
    }
    html.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn renders_entries_escaped_with_totals() {
        let entries = vec![LogEntry {
            food: "Mac & <cheese>".into(),
            grams: 150.0,
            calories: 133.5,
            protein: 1.65,
            carbs: 34.2,
            fat: 0.45,
            fiber: 3.9,
            logged_at: OffsetDateTime::now_utc(),
        }];
        let totals = DailyTotals {
            calories: 133.5,
            protein: 1.65,
            carbs: 34.2,
            fat: 0.45,
            fiber: 3.9,
        };
        let html = render_page(&PageView {
            entries: &entries,
            totals,
            ..Default::default()
        });
        assert!(html.contains("Mac &amp; &lt;cheese&gt;"));
        assert!(html.contains("Calories: 133.5 | Protein: 1.65"));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("Maintenance:"));
    }

    #[test]
    fn renders_error_and_bmr_blocks() {
        let html = render_page(&PageView {
            image_error: Some("Only JPG / PNG images allowed"),
            bmr: Some(BmrResult {
                bmr: 1673.75,
                maintenance: 2594.31,
            }),
            ..Default::default()
        });
        assert!(html.contains(r#"<p class="error">Only JPG / PNG images allowed</p>"#));
        assert!(html.contains("BMR: 1673.75 kcal"));
        assert!(html.contains("Maintenance: 2594.31 kcal"));
    }
}
