// ABOUTME: Server-rendered HTML pages for the public recipe views
// ABOUTME: Index, recipe detail with optional inline error, and recipes lacking a product
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! HTML rendering
//!
//! Every value that comes from the database or the request path is escaped
//! with `html_escape` before it is written into the page.

use std::fmt::Write;

use html_escape::encode_text;
use recipe_core::models::{Recipe, RecipeIngredientDetail};

/// Title and message shown on the detail page when an ingredient could not be added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineError {
    /// Page heading
    pub title: String,
    /// Explanation below the heading
    pub message: String,
}

/// Wrap `body` in the shared page layout
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = encode_text(title),
    )
}

fn recipe_link(recipe: &Recipe) -> String {
    format!(
        r#"<li><a href="/recipes/{id}/">{title}</a></li>"#,
        id = recipe.id,
        title = encode_text(&recipe.title),
    )
}

/// The index page with the latest published recipes
#[must_use]
pub fn render_index(recipes: &[Recipe]) -> String {
    let body = if recipes.is_empty() {
        "<p>No recipes are available.</p>".to_owned()
    } else {
        let items: String = recipes.iter().map(recipe_link).collect();
        format!("<ul>{items}</ul>")
    };

    layout("Recipes", &format!("<h1>Recipes</h1>\n{body}"))
}

/// The detail page: upper-cased title and ingredient lines
#[must_use]
pub fn render_detail(recipe: &Recipe, ingredients: &[RecipeIngredientDetail]) -> String {
    let heading = recipe.title.to_uppercase();
    let mut body = format!("<h1>{}</h1>\n", encode_text(&heading));

    if let Some(description) = recipe.description.as_deref() {
        let _ = writeln!(body, "<p>{}</p>", encode_text(description));
    }

    if ingredients.is_empty() {
        body.push_str("<p>No ingredients yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for line in ingredients {
            let _ = writeln!(
                body,
                "<li>{name}: {amount} {unit} (used {times} times)</li>",
                name = encode_text(&line.ingredient_name),
                amount = line.amount,
                unit = encode_text(&line.unit),
                times = line.times_used,
            );
        }
        body.push_str("</ul>\n");
    }

    let _ = write!(
        body,
        r#"<p><a href="/recipes/cook_recipe/{id}/">Cook</a> | <a href="/recipes/">All recipes</a></p>"#,
        id = recipe.id,
    );

    layout(&heading, &body)
}

/// The detail page in its error form, shown when adding a product fails
#[must_use]
pub fn render_detail_error(error: &InlineError) -> String {
    let body = format!(
        "<h1>{title}</h1>\n<p><strong>{message}</strong></p>\n<p><a href=\"/recipes/\">All recipes</a></p>",
        title = encode_text(&error.title),
        message = encode_text(&error.message),
    );

    layout(&error.title, &body)
}

/// Recipes that do not hold an adequate amount of a product
#[must_use]
pub fn render_without_product(recipes: &[Recipe]) -> String {
    let body = if recipes.is_empty() {
        "<p>Every recipe has enough of this product.</p>".to_owned()
    } else {
        let items: String = recipes.iter().map(recipe_link).collect();
        format!("<ul>{items}</ul>")
    };

    layout(
        "Recipes without product",
        &format!("<h1>Recipes without product</h1>\n{body}"),
    )
}
