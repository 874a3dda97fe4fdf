//! Server-rendered recommendation form at `/`
//!
//! Per-request failures are shown inline on the page with a 200 status.
//! They are never surfaced as HTTP errors.

use axum::{extract::State, response::Html, Extension, Form};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::Algorithm,
    routes::AppState,
    services::{recommendations, RecommendationLimits},
};

/// Fields posted by the form
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationForm {
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub num_recommendations: Option<String>,
}

enum Outcome {
    Blank,
    Recommendations(Vec<String>),
    Error(String),
}

/// GET `/`
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(
        &RecommendationForm::default(),
        state.limits,
        &Outcome::Blank,
    ))
}

/// POST `/`
pub async fn submit(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<RecommendationForm>,
) -> Html<String> {
    let outcome = match run(&state, &form) {
        Ok(list) => Outcome::Recommendations(list),
        Err(e) => {
            tracing::info!(request_id = %request_id, error = %e, "Form request rejected");
            Outcome::Error(e.user_message())
        }
    };

    Html(render_page(&form, state.limits, &outcome))
}

fn run(state: &AppState, form: &RecommendationForm) -> AppResult<Vec<String>> {
    let algorithm = form.algorithm.as_deref().unwrap_or_default();
    let num_recommendations = parse_count(form.num_recommendations.as_deref())?;

    let query = recommendations::build_query(
        algorithm,
        form.user_id.as_deref(),
        num_recommendations,
        state.limits,
    )?;

    recommendations::recommend(&state.data, &query)
}

fn parse_count(raw: Option<&str>) -> AppResult<Option<i64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(|_| {
            AppError::InvalidInput("Number of recommendations must be a whole number.".to_string())
        }),
    }
}

fn render_page(form: &RecommendationForm, limits: RecommendationLimits, outcome: &Outcome) -> String {
    let selected = form.algorithm.as_deref().unwrap_or(Algorithm::RankBased.as_str());
    let count = form
        .num_recommendations
        .clone()
        .unwrap_or_else(|| limits.default_count.to_string());

    let mut options = String::new();
    for algorithm in Algorithm::all() {
        let marker = if algorithm.as_str() == selected { " selected" } else { "" };
        options.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>",
            algorithm.as_str(),
            marker,
            algorithm.label()
        ));
    }

    let result = match outcome {
        Outcome::Blank => String::new(),
        Outcome::Recommendations(list) if list.is_empty() => {
            "<h2>Recommendations:</h2><p>No recommendations available.</p>".to_string()
        }
        Outcome::Recommendations(list) => {
            let items: String = list
                .iter()
                .map(|id| format!("<li>{}</li>", escape_html(id)))
                .collect();
            format!("<h2>Recommendations:</h2><ol>{}</ol>", items)
        }
        Outcome::Error(message) => format!("<p class=\"error\">{}</p>", escape_html(message)),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Product Recommendation Engine</title></head>
<body>
<h1>Product Recommendation Engine</h1>
<form method="post" action="/">
<label>Select Algorithm: <select name="algorithm">{options}</select></label>
<label>User ID: <input type="text" name="user_id" value="{user_id}"></label>
<label>Number of Recommendations: <input type="number" name="num_recommendations" min="1" max="{max}" value="{count}"></label>
<button type="submit">Get Recommendations</button>
</form>
{result}
</body>
</html>
"#,
        options = options,
        user_id = escape_html(form.user_id.as_deref().unwrap_or_default()),
        max = limits.max_count,
        count = escape_html(&count),
        result = result,
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(None).unwrap(), None);
        assert_eq!(parse_count(Some("  ")).unwrap(), None);
        assert_eq!(parse_count(Some(" 5 ")).unwrap(), Some(5));
        assert!(parse_count(Some("five")).is_err());
    }

    #[test]
    fn test_render_keeps_previous_selection() {
        let form = RecommendationForm {
            algorithm: Some("user_based_cf".to_string()),
            user_id: Some("<42>".to_string()),
            num_recommendations: Some("3".to_string()),
        };
        let page = render_page(
            &form,
            RecommendationLimits::default(),
            &Outcome::Recommendations(vec!["P2".to_string()]),
        );

        assert!(page.contains("<option value=\"user_based_cf\" selected>"));
        assert!(page.contains("value=\"&lt;42&gt;\""));
        assert!(page.contains("<li>P2</li>"));
    }
}
